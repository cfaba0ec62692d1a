pub mod draft;
pub mod payload;
pub mod preview;

pub use draft::*;
pub use payload::*;
pub use preview::*;
