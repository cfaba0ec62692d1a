use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Reference to the entity a created task is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub entity_type: String,
    pub entity_id: String,
}

/// A side effect planned by a workflow rule. Never executed locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Sets a field, or a custom field via a dotted path, to a literal value.
    SetField { path: String, value: Value },
    /// Schedules a follow-up task.
    CreateTask {
        title: String,
        due_in_days: i64,
        assigned_to_user_id: String,
        /// Defaults to the entity that triggered the rule when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        entity_ref: Option<EntityRef>,
    },
    /// Requests a notification with an object payload.
    Notify {
        notification_type: String,
        payload: Map<String, Value>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    SetField,
    CreateTask,
    Notify,
}

impl ActionKind {
    /// The `type` tag used on the wire.
    pub fn tag(&self) -> &'static str {
        match self {
            ActionKind::SetField => "SET_FIELD",
            ActionKind::CreateTask => "CREATE_TASK",
            ActionKind::Notify => "NOTIFY",
        }
    }

    pub fn from_tag(tag: &str) -> Option<ActionKind> {
        match tag {
            "SET_FIELD" => Some(ActionKind::SetField),
            "CREATE_TASK" => Some(ActionKind::CreateTask),
            "NOTIFY" => Some(ActionKind::Notify),
            _ => None,
        }
    }

    /// A freshly initialized action of this kind, as the builder creates it.
    pub fn default_action(&self) -> Action {
        match self {
            ActionKind::SetField => Action::SetField {
                path: "status".to_string(),
                value: Value::String("New".to_string()),
            },
            ActionKind::CreateTask => Action::CreateTask {
                title: "Follow up".to_string(),
                due_in_days: 3,
                assigned_to_user_id: String::new(),
                entity_ref: None,
            },
            ActionKind::Notify => Action::Notify {
                notification_type: "workflow".to_string(),
                payload: Map::new(),
            },
        }
    }
}

impl FromStr for ActionKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_uppercase().replace('-', "_");
        ActionKind::from_tag(&normalized).ok_or_else(|| {
            format!(
                "invalid action kind '{}'; supported values are set_field, create_task, notify",
                value
            )
        })
    }
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::SetField { .. } => ActionKind::SetField,
            Action::CreateTask { .. } => ActionKind::CreateTask,
            Action::Notify { .. } => ActionKind::Notify,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::SetField { path, value } => write!(f, "Set {} to {}", path, value),
            Action::CreateTask {
                title,
                due_in_days,
                assigned_to_user_id,
                entity_ref,
            } => {
                write!(
                    f,
                    "Create task \"{}\" due in {} day(s) for user {}",
                    title, due_in_days, assigned_to_user_id
                )?;
                if let Some(entity) = entity_ref {
                    write!(f, " on {} {}", entity.entity_type, entity.entity_id)?;
                }
                Ok(())
            }
            Action::Notify {
                notification_type,
                payload,
            } => write!(
                f,
                "Notify '{}' with {} payload field(s)",
                notification_type,
                payload.len()
            ),
        }
    }
}
