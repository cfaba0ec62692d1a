//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the kisoku crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use kisoku::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let text = std::fs::read_to_string("path/to/condition.json")?;
//! let condition = Condition::from_json_text(&text)?;
//! println!("{}", condition);
//! # Ok(())
//! # }
//! ```

// Condition tree
pub use crate::condition::{
    Condition, Leaf, NodeKind, Operator, group_child_allowed, is_condition_shape,
};

// Actions
pub use crate::action::{Action, ActionId, ActionKind, ActionList, EntityRef, is_workflow_action_shape};

// Serialization and editing modes
pub use crate::codec::{DualModeEditor, EditorMode, FromJsonText, to_pretty_json};

// Rule envelope and previews
pub use crate::rule::{DryRunResponse, PlannedMutation, PreviewFormatter, RuleDraft, RulePayload};

// Autocomplete
pub use crate::suggest::{EntityType, PathSuggester};

// Configuration
pub use crate::config::EditorConfig;

// Validation and errors
pub use crate::error::{CodecError, ConfigError, EditError, ShapeError};
pub use crate::validate::{IssueTarget, ValidationIssue, ValidationReport};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
