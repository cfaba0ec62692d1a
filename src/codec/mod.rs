pub mod editor;
pub mod json;

pub use editor::*;
pub use json::*;
