pub mod display;
pub mod edit;
pub mod operator;
pub mod shape;
pub mod tree;

pub use edit::group_child_allowed;
pub use operator::*;
pub use shape::*;
pub use tree::*;
