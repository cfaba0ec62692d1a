use super::ActionKind;
use crate::error::ShapeError;
use serde_json::{Map, Value};

/// Whether `value` has the structure of a workflow action.
pub fn is_workflow_action_shape(value: &Value) -> bool {
    check_action_shape(value, "$").is_ok()
}

/// Structurally checks one action object, reporting the first mismatch.
///
/// `SET_FIELD` needs a string `path` and a present (possibly null) `value`;
/// `CREATE_TASK` a string `title`, integer `due_in_days` and string
/// `assigned_to_user_id`; `NOTIFY` a string `notification_type` and an object
/// `payload`.
pub fn check_action_shape(value: &Value, location: &str) -> Result<(), ShapeError> {
    let object = value.as_object().ok_or_else(|| ShapeError::Expected {
        location: location.to_string(),
        expected: "an action object",
    })?;

    let tag = match object.get("type") {
        Some(Value::String(tag)) => tag,
        Some(_) => {
            return Err(field_type(location, "type", "a string"));
        }
        None => {
            return Err(ShapeError::MissingField {
                location: location.to_string(),
                field: "type",
            });
        }
    };

    let kind = ActionKind::from_tag(tag).ok_or_else(|| ShapeError::UnknownActionType {
        location: location.to_string(),
        type_name: tag.clone(),
    })?;

    match kind {
        ActionKind::SetField => {
            require(object, location, "path", Value::is_string, "a string")?;
            require(object, location, "value", |_: &Value| true, "present")
        }
        ActionKind::CreateTask => {
            require(object, location, "title", Value::is_string, "a string")?;
            require(object, location, "due_in_days", Value::is_i64, "an integer")?;
            require(
                object,
                location,
                "assigned_to_user_id",
                Value::is_string,
                "a string",
            )
        }
        ActionKind::Notify => {
            require(
                object,
                location,
                "notification_type",
                Value::is_string,
                "a string",
            )?;
            require(object, location, "payload", Value::is_object, "a JSON object")
        }
    }
}

/// Checks every element of an action array, reporting the first mismatch.
pub fn check_action_list_shape(value: &Value) -> Result<(), ShapeError> {
    let items = value.as_array().ok_or_else(|| ShapeError::Expected {
        location: "$".to_string(),
        expected: "an array of actions",
    })?;
    items
        .iter()
        .enumerate()
        .try_for_each(|(i, item)| check_action_shape(item, &format!("$[{}]", i)))
}

fn require(
    object: &Map<String, Value>,
    location: &str,
    field: &'static str,
    accepts: fn(&Value) -> bool,
    expected: &'static str,
) -> Result<(), ShapeError> {
    match object.get(field) {
        Some(value) if accepts(value) => Ok(()),
        Some(_) => Err(field_type(location, field, expected)),
        None => Err(ShapeError::MissingField {
            location: location.to_string(),
            field,
        }),
    }
}

fn field_type(location: &str, field: &'static str, expected: &'static str) -> ShapeError {
    ShapeError::FieldType {
        location: location.to_string(),
        field,
        expected,
    }
}
