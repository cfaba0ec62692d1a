use crate::config::EditorConfig;
use crate::error::ShapeError;
use serde_json::Value;

/// Whether `value` has the structure of a condition, using the default depth cap.
pub fn is_condition_shape(value: &Value) -> bool {
    is_condition_shape_within(value, EditorConfig::default().validation_depth())
}

/// Whether `value` has the structure of a condition with at most `max_groups`
/// nested group levels.
pub fn is_condition_shape_within(value: &Value, max_groups: usize) -> bool {
    check_condition_shape(value, max_groups).is_ok()
}

/// Structurally checks untrusted JSON against the condition shape.
///
/// Leaves need a string `path` and a string `op` (or `operator`). Groups need
/// an array of valid children, `not` a valid child. Nesting deeper than
/// `max_groups` is rejected instead of being followed.
pub fn check_condition_shape(value: &Value, max_groups: usize) -> Result<(), ShapeError> {
    check_node(value, "$", max_groups, max_groups)
}

fn check_node(
    value: &Value,
    location: &str,
    remaining: usize,
    limit: usize,
) -> Result<(), ShapeError> {
    let object = value.as_object().ok_or_else(|| ShapeError::Expected {
        location: location.to_string(),
        expected: "a condition object",
    })?;

    for key in ["all", "any"] {
        if let Some(children) = object.get(key) {
            let children = children.as_array().ok_or_else(|| ShapeError::FieldType {
                location: location.to_string(),
                field: key,
                expected: "an array of conditions",
            })?;
            if remaining == 0 {
                return Err(too_deep(location, limit));
            }
            for (i, child) in children.iter().enumerate() {
                let child_location = format!("{}.{}[{}]", location, key, i);
                check_node(child, &child_location, remaining - 1, limit)?;
            }
            return Ok(());
        }
    }

    if let Some(child) = object.get("not") {
        if remaining == 0 {
            return Err(too_deep(location, limit));
        }
        return check_node(child, &format!("{}.not", location), remaining - 1, limit);
    }

    require_string(object.get("path"), location, "path")?;
    require_string(object.get("op").or_else(|| object.get("operator")), location, "op")
}

fn require_string(
    field: Option<&Value>,
    location: &str,
    name: &'static str,
) -> Result<(), ShapeError> {
    match field {
        Some(Value::String(_)) => Ok(()),
        Some(_) => Err(ShapeError::FieldType {
            location: location.to_string(),
            field: name,
            expected: "a string",
        }),
        None => Err(ShapeError::MissingField {
            location: location.to_string(),
            field: name,
        }),
    }
}

fn too_deep(location: &str, limit: usize) -> ShapeError {
    ShapeError::TooDeep {
        location: location.to_string(),
        limit,
    }
}
