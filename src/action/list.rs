use super::{Action, ActionKind};
use crate::error::EditError;
use crate::validate::{IssueTarget, ValidationIssue, ValidationReport, validate_action};
use ahash::AHashMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Stable identity of an action within one `ActionList`.
///
/// Assigned at creation and never reused, so editor state keyed by it stays
/// attached to the right action when earlier entries are removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionId(u64);

/// Ordered action list as held by the rule builder.
///
/// Besides the actions themselves it keeps raw-text drafts of `Notify`
/// payloads, which may be invalid JSON while the user is typing.
#[derive(Debug, Clone, Default)]
pub struct ActionList {
    entries: Vec<(ActionId, Action)>,
    payload_drafts: AHashMap<ActionId, String>,
    next_id: u64,
}

impl ActionList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Action> {
        self.entries.get(index).map(|(_, action)| action)
    }

    pub fn id_at(&self, index: usize) -> Option<ActionId> {
        self.entries.get(index).map(|(id, _)| *id)
    }

    pub fn index_of(&self, id: ActionId) -> Option<usize> {
        self.entries.iter().position(|(entry_id, _)| *entry_id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.entries.iter().map(|(_, action)| action)
    }

    /// The committed actions, ignoring any pending payload drafts.
    pub fn actions(&self) -> Vec<Action> {
        self.iter().cloned().collect()
    }

    /// Appends a default-initialized action of `kind`.
    pub fn add(&mut self, kind: ActionKind) -> ActionId {
        self.push(kind.default_action())
    }

    pub fn push(&mut self, action: Action) -> ActionId {
        let id = ActionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, action));
        id
    }

    /// Replaces the action at `index`. Any payload draft for it is dropped,
    /// since `next` carries its own payload.
    pub fn update(&mut self, index: usize, next: Action) -> Result<(), EditError> {
        let len = self.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(EditError::ActionIndexOutOfBounds { index, len })?;
        if self.payload_drafts.remove(&entry.0).is_some() {
            tracing::debug!(index, "dropped payload draft of updated action");
        }
        entry.1 = next;
        Ok(())
    }

    /// Removes the action at `index` together with its draft.
    pub fn remove(&mut self, index: usize) -> Result<Action, EditError> {
        if index >= self.len() {
            return Err(EditError::ActionIndexOutOfBounds {
                index,
                len: self.len(),
            });
        }
        let (id, action) = self.entries.remove(index);
        if self.payload_drafts.remove(&id).is_some() {
            tracing::debug!(index, "dropped payload draft of removed action");
        }
        Ok(action)
    }

    /// Stores raw payload text for the `Notify` action at `index`.
    pub fn set_payload_draft(
        &mut self,
        index: usize,
        text: impl Into<String>,
    ) -> Result<(), EditError> {
        let len = self.len();
        let (id, action) = self
            .entries
            .get(index)
            .ok_or(EditError::ActionIndexOutOfBounds { index, len })?;
        if action.kind() != ActionKind::Notify {
            return Err(EditError::NoPayload {
                index,
                kind: action.kind().tag(),
            });
        }
        self.payload_drafts.insert(*id, text.into());
        Ok(())
    }

    pub fn payload_draft(&self, index: usize) -> Option<&str> {
        let id = self.id_at(index)?;
        self.payload_drafts.get(&id).map(String::as_str)
    }

    pub fn clear_payload_draft(&mut self, index: usize) -> Option<String> {
        let id = self.id_at(index)?;
        self.payload_drafts.remove(&id)
    }

    /// Collects every issue that blocks submission of this list.
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        if self.is_empty() {
            report.push(ValidationIssue::new(
                IssueTarget::ActionList,
                "at least one action is required",
            ));
        }
        for (index, (id, action)) in self.entries.iter().enumerate() {
            report.extend(validate_action(index, action));
            if let Some(text) = self.payload_drafts.get(id) {
                if let Err(message) = parse_payload_draft(text) {
                    report.push(ValidationIssue::new(
                        IssueTarget::Action {
                            index,
                            field: Some("payload"),
                        },
                        message,
                    ));
                }
            }
        }
        report
    }

    /// Produces the actions to submit, with payload drafts applied.
    ///
    /// Any issue blocks the whole list; no element is silently dropped.
    pub fn to_submittable(&self) -> Result<Vec<Action>, ValidationReport> {
        self.validate().into_result(())?;
        let mut actions = Vec::with_capacity(self.len());
        for (index, (id, action)) in self.entries.iter().enumerate() {
            let action = match (action, self.payload_drafts.get(id)) {
                (
                    Action::Notify {
                        notification_type, ..
                    },
                    Some(text),
                ) => Action::Notify {
                    notification_type: notification_type.clone(),
                    payload: parse_payload_draft(text).map_err(|message| ValidationReport {
                        issues: vec![ValidationIssue::new(
                            IssueTarget::Action {
                                index,
                                field: Some("payload"),
                            },
                            message,
                        )],
                    })?,
                },
                (action, _) => action.clone(),
            };
            actions.push(action);
        }
        Ok(actions)
    }
}

impl From<Vec<Action>> for ActionList {
    fn from(actions: Vec<Action>) -> Self {
        let mut list = ActionList::new();
        actions.into_iter().for_each(|action| {
            list.push(action);
        });
        list
    }
}

impl Serialize for ActionList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

/// Parses raw payload text, which must be a JSON object.
pub fn parse_payload_draft(text: &str) -> Result<Map<String, Value>, String> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(Value::Array(_)) => Err("payload must be a JSON object, not an array".to_string()),
        Ok(_) => Err("payload must be a JSON object".to_string()),
        Err(e) => Err(format!("payload is not valid JSON: {}", e)),
    }
}
