use crate::action::{Action, ActionList, check_action_list_shape};
use crate::condition::{Condition, check_condition_shape};
use crate::config::EditorConfig;
use crate::error::{CodecError, ShapeError};
use crate::rule::RulePayload;
use serde::Serialize;
use serde_json::Value;

/// Human-formatted JSON with 2-space indentation.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, CodecError> {
    serde_json::to_string_pretty(value).map_err(|e| CodecError::Serialization(e.to_string()))
}

/// Types that can be loaded from raw JSON text typed by a user or returned by
/// a server.
///
/// Loading is all-or-nothing: the text is parsed, checked against the shape
/// validators and only then converted. Any failure is a
/// [`CodecError::MalformedInput`] carrying the underlying message.
pub trait FromJsonText: Sized {
    fn from_json_text_with(text: &str, config: &EditorConfig) -> Result<Self, CodecError>;

    fn from_json_text(text: &str) -> Result<Self, CodecError> {
        Self::from_json_text_with(text, &EditorConfig::default())
    }
}

fn parse_text(text: &str) -> Result<Value, CodecError> {
    serde_json::from_str(text).map_err(|e| CodecError::MalformedInput(format!("invalid JSON: {}", e)))
}

fn rejected(kind: &str, err: CodecError) -> CodecError {
    tracing::debug!(kind, error = %err, "rejected JSON text");
    err
}

impl FromJsonText for Condition {
    fn from_json_text_with(text: &str, config: &EditorConfig) -> Result<Self, CodecError> {
        let load = || -> Result<Condition, CodecError> {
            let value = parse_text(text)?;
            check_condition_shape(&value, config.validation_depth())?;
            Ok(Condition::from_json_value(&value)?.normalize())
        };
        load().map_err(|e| rejected("condition", e))
    }
}

impl FromJsonText for Vec<Action> {
    fn from_json_text_with(text: &str, _config: &EditorConfig) -> Result<Self, CodecError> {
        let load = || -> Result<Vec<Action>, CodecError> {
            let value = parse_text(text)?;
            check_action_list_shape(&value)?;
            serde_json::from_value(value).map_err(|e| CodecError::MalformedInput(e.to_string()))
        };
        load().map_err(|e| rejected("actions", e))
    }
}

impl FromJsonText for ActionList {
    fn from_json_text_with(text: &str, config: &EditorConfig) -> Result<Self, CodecError> {
        Vec::<Action>::from_json_text_with(text, config).map(ActionList::from)
    }
}

impl FromJsonText for RulePayload {
    /// Applies the same shape checks and depth cap to `condition_json` and
    /// `actions_json` as loading them on their own.
    fn from_json_text_with(text: &str, config: &EditorConfig) -> Result<Self, CodecError> {
        let load = || -> Result<RulePayload, CodecError> {
            let value = parse_text(text)?;
            if let Some(condition) = value.get("condition_json") {
                check_condition_shape(condition, config.validation_depth())
                    .map_err(|e| in_field("condition_json", e))?;
            }
            if let Some(actions) = value.get("actions_json") {
                check_action_list_shape(actions).map_err(|e| in_field("actions_json", e))?;
            }
            let mut payload: RulePayload = serde_json::from_value(value)
                .map_err(|e| CodecError::MalformedInput(e.to_string()))?;
            payload.condition_json = payload.condition_json.normalize();
            Ok(payload)
        };
        load().map_err(|e| rejected("rule", e))
    }
}

fn in_field(field: &str, err: ShapeError) -> CodecError {
    CodecError::MalformedInput(format!("{}: {}", field, err))
}
