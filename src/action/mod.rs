pub mod list;
pub mod model;
pub mod shape;

pub use list::*;
pub use model::*;
pub use shape::*;
