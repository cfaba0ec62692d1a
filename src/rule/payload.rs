use crate::action::Action;
use crate::condition::Condition;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// The rule body sent to the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulePayload {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope_legal_entity_id: Option<String>,
    pub trigger_event: String,
    pub condition_json: Condition,
    pub actions_json: Vec<Action>,
}

fn default_active() -> bool {
    true
}

/// Before/after values of one field the rule would change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedMutation {
    #[serde(default)]
    pub before: Value,
    #[serde(default)]
    pub after: Value,
}

/// Result of a server-side dry run. Rendered as-is, never loaded back into the
/// builder.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DryRunResponse {
    pub matched: bool,
    #[serde(default)]
    pub planned_actions: Vec<Map<String, Value>>,
    #[serde(default)]
    pub planned_mutations: BTreeMap<String, PlannedMutation>,
}
