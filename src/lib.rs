//! # Kisoku - Workflow Condition/Action Model
//!
//! **Kisoku** builds, edits, validates and previews the two structures a workflow
//! automation rule is made of: a recursive trigger *condition* and an ordered list of
//! *actions*. Rules are evaluated and executed by a remote server; this crate only
//! guarantees that what gets sent there is structurally sound.
//!
//! ## Core Workflow
//!
//! 1.  **Build**: Start from a `RuleDraft` and edit its `Condition` with path-based,
//!     immutable operations (`add_child`, `replace_at_path`, `remove_at_path`). Add
//!     actions to its `ActionList`.
//! 2.  **Edit as JSON (optional)**: Wrap a value in a `DualModeEditor` to switch between
//!     the structured view and raw JSON text. Loading text is all-or-nothing.
//! 3.  **Validate**: `RuleDraft::validate` collects every problem per rule field,
//!     condition node or action index. Submission is blocked while any remain.
//! 4.  **Submit**: `RuleDraft::to_payload` produces the wire `RulePayload`; dry-run
//!     responses coming back are rendered with `PreviewFormatter`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kisoku::prelude::*;
//! use serde_json::json;
//!
//! fn main() -> Result<()> {
//!     let mut draft = RuleDraft::new("Escalate big deals", "opportunity.updated");
//!
//!     // `all: [status eq New]` -> `all: [status eq New, any: [status eq New]]`
//!     let condition = draft.condition.add_child(&[], NodeKind::Any)?;
//!     let condition = condition.replace_at_path(
//!         &[1, 0],
//!         Condition::leaf("amount", Operator::Gt, json!(50000)),
//!     )?;
//!     draft.condition = condition;
//!
//!     draft.actions.add(ActionKind::Notify);
//!     draft.actions.set_payload_draft(0, r#"{"channel": "sales"}"#)?;
//!
//!     println!("{}", PreviewFormatter::format_draft(&draft));
//!
//!     match draft.to_payload() {
//!         Ok(payload) => println!("{}", to_pretty_json(&payload)?),
//!         Err(report) => {
//!             for issue in &report.issues {
//!                 eprintln!("{}", issue);
//!             }
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod action;
pub mod codec;
pub mod condition;
pub mod config;
pub mod error;
pub mod prelude;
pub mod rule;
pub mod suggest;
pub mod validate;
