use super::{DryRunResponse, RuleDraft};
use crate::action::{Action, is_workflow_action_shape};
use serde_json::{Map, Value};

/// Formats rule drafts and dry-run results into human-readable text.
pub struct PreviewFormatter;

impl PreviewFormatter {
    /// Describes what a draft would do, without evaluating anything.
    pub fn format_draft(draft: &RuleDraft) -> String {
        let mut result = format!(
            "When '{}' fires and {}\nthen:",
            draft.trigger_event, draft.condition
        );
        if draft.actions.is_empty() {
            result.push_str("\n  (no actions)");
        }
        for (i, action) in draft.actions.iter().enumerate() {
            result.push_str(&format!("\n  {}. {}", i + 1, action));
        }
        if !draft.is_active {
            result.push_str("\n(rule is inactive)");
        }
        result
    }

    /// Renders a dry-run response returned by the server.
    pub fn format_dry_run(response: &DryRunResponse) -> String {
        let mut lines = vec![format!(
            "Matched: {}",
            if response.matched { "yes" } else { "no" }
        )];

        lines.push(format!(
            "Planned actions ({}):",
            response.planned_actions.len()
        ));
        for (i, action) in response.planned_actions.iter().enumerate() {
            lines.push(format!("  {}. {}", i + 1, Self::format_planned_action(action)));
        }

        lines.push(format!(
            "Planned mutations ({}):",
            response.planned_mutations.len()
        ));
        for (path, mutation) in &response.planned_mutations {
            lines.push(format!(
                "  {}: {} -> {}",
                path, mutation.before, mutation.after
            ));
        }
        lines.join("\n")
    }

    /// Uses the action description when the object is a known action,
    /// otherwise falls back to compact JSON.
    fn format_planned_action(action: &Map<String, Value>) -> String {
        let value = Value::Object(action.clone());
        if is_workflow_action_shape(&value) {
            if let Ok(action) = serde_json::from_value::<Action>(value.clone()) {
                return action.to_string();
            }
        }
        value.to_string()
    }
}
