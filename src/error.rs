use thiserror::Error;

/// Errors raised by path-based edits on a condition tree or an action list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("Path {path:?} is invalid at step {step}: {reason}")]
    PathError {
        path: Vec<usize>,
        step: usize,
        reason: String,
    },

    #[error("Node at path {path:?} is a leaf and cannot hold children")]
    NotAGroup { path: Vec<usize> },

    #[error("The root condition cannot be removed")]
    InvalidRemoval,

    #[error("Action index {index} is out of bounds for a list of {len} action(s)")]
    ActionIndexOutOfBounds { index: usize, len: usize },

    #[error("Action at index {index} is a {kind} action and has no payload")]
    NoPayload { index: usize, kind: &'static str },
}

/// A structural mismatch found while checking untrusted JSON against the
/// condition or action shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("{location}: expected {expected}")]
    Expected {
        location: String,
        expected: &'static str,
    },

    #[error("{location}: missing required field '{field}'")]
    MissingField {
        location: String,
        field: &'static str,
    },

    #[error("{location}: field '{field}' must be {expected}")]
    FieldType {
        location: String,
        field: &'static str,
        expected: &'static str,
    },

    #[error("{location}: unknown action type '{type_name}'")]
    UnknownActionType { location: String, type_name: String },

    #[error("{location}: nesting exceeds the maximum of {limit} group level(s)")]
    TooDeep { location: String, limit: usize },
}

/// Errors produced when converting between typed values and JSON text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Failed to serialize value: {0}")]
    Serialization(String),
}

impl From<ShapeError> for CodecError {
    fn from(err: ShapeError) -> Self {
        CodecError::MalformedInput(err.to_string())
    }
}

/// Errors that can occur while loading an `EditorConfig`.
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Could not read config file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse config TOML: {0}")]
    Parse(String),

    #[error("Invalid config value for '{field}': {message}")]
    InvalidValue {
        field: &'static str,
        message: String,
    },
}
