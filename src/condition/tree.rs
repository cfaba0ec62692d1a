use super::Operator;
use crate::error::ShapeError;
use itertools::Itertools;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

/// A single comparison against a field of the target entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leaf {
    /// Field path, e.g. `status` or `custom_fields.priority`.
    pub path: String,
    #[serde(rename = "op")]
    pub operator: Operator,
    /// Comparison operand. `Null` when absent, which is only legal for `exists`.
    #[serde(skip_serializing_if = "Value::is_null")]
    pub value: Value,
}

impl Leaf {
    pub fn new(path: impl Into<String>, operator: Operator, value: Value) -> Self {
        Self {
            path: path.into(),
            operator,
            value,
        }
    }
}

impl Default for Leaf {
    /// `status eq "New"`, the payload every freshly created node starts with.
    fn default() -> Self {
        Leaf::new("status", Operator::Eq, Value::String("New".to_string()))
    }
}

/// Recursive boolean expression used as a workflow rule's trigger predicate.
///
/// Serializes to the wire shape expected by the rule evaluator:
/// `{"all": [...]}`, `{"any": [...]}`, `{"not": {...}}` or `{"path", "op", "value"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Condition {
    All {
        #[serde(rename = "all")]
        children: Vec<Condition>,
    },
    Any {
        #[serde(rename = "any")]
        children: Vec<Condition>,
    },
    Not {
        #[serde(rename = "not")]
        child: Box<Condition>,
    },
    Leaf(Leaf),
}

/// The kind of node to create when adding a child in the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Leaf,
    All,
    Any,
    Not,
}

impl NodeKind {
    /// Builds a new node of this kind, seeded with a default leaf.
    pub fn new_node(&self) -> Condition {
        match self {
            NodeKind::Leaf => Condition::default_leaf(),
            NodeKind::All => Condition::all(vec![Condition::default_leaf()]),
            NodeKind::Any => Condition::any(vec![Condition::default_leaf()]),
            NodeKind::Not => Condition::not(Condition::default_leaf()),
        }
    }
}

impl FromStr for NodeKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "leaf" => Ok(NodeKind::Leaf),
            "all" => Ok(NodeKind::All),
            "any" => Ok(NodeKind::Any),
            "not" => Ok(NodeKind::Not),
            _ => Err(format!(
                "invalid node kind '{}'; supported values are leaf, all, any, not",
                value
            )),
        }
    }
}

impl Default for Condition {
    fn default() -> Self {
        Condition::all(vec![Condition::default_leaf()])
    }
}

impl Condition {
    pub fn default_leaf() -> Self {
        Condition::Leaf(Leaf::default())
    }

    pub fn leaf(path: impl Into<String>, operator: Operator, value: Value) -> Self {
        Condition::Leaf(Leaf::new(path, operator, value))
    }

    pub fn all(children: Vec<Condition>) -> Self {
        Condition::All { children }
    }

    pub fn any(children: Vec<Condition>) -> Self {
        Condition::Any { children }
    }

    pub fn not(child: Condition) -> Self {
        Condition::Not {
            child: Box::new(child),
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Condition::All { .. } | Condition::Any { .. })
    }

    pub fn is_not(&self) -> bool {
        matches!(self, Condition::Not { .. })
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Condition::Leaf(_))
    }

    /// Children of an `All`/`Any` group. `None` for `Not` and leaves.
    pub fn children(&self) -> Option<&[Condition]> {
        match self {
            Condition::All { children } | Condition::Any { children } => Some(children),
            _ => None,
        }
    }

    /// Number of nested group (`All`/`Any`/`Not`) levels. A bare leaf has depth 0.
    pub fn depth(&self) -> usize {
        match self {
            Condition::All { children } | Condition::Any { children } => {
                1 + children.iter().map(Condition::depth).max().unwrap_or(0)
            }
            Condition::Not { child } => 1 + child.depth(),
            Condition::Leaf(_) => 0,
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            Condition::All { children } | Condition::Any { children } => {
                children.iter().map(Condition::leaf_count).sum()
            }
            Condition::Not { child } => child.leaf_count(),
            Condition::Leaf(_) => 1,
        }
    }

    /// Distinct field paths referenced by the condition, in first-seen order.
    pub fn field_paths(&self) -> Vec<&str> {
        let mut paths = Vec::new();
        self.collect_paths(&mut paths);
        paths.into_iter().unique().collect()
    }

    fn collect_paths<'a>(&'a self, paths: &mut Vec<&'a str>) {
        match self {
            Condition::All { children } | Condition::Any { children } => {
                children.iter().for_each(|c| c.collect_paths(paths));
            }
            Condition::Not { child } => child.collect_paths(paths),
            Condition::Leaf(leaf) => paths.push(&leaf.path),
        }
    }

    /// Replaces every empty group with a group holding one default leaf.
    pub fn normalize(self) -> Condition {
        match self {
            Condition::All { children } => Condition::All {
                children: Self::normalize_children(children),
            },
            Condition::Any { children } => Condition::Any {
                children: Self::normalize_children(children),
            },
            Condition::Not { child } => Condition::Not {
                child: Box::new(child.normalize()),
            },
            leaf @ Condition::Leaf(_) => leaf,
        }
    }

    fn normalize_children(children: Vec<Condition>) -> Vec<Condition> {
        if children.is_empty() {
            tracing::debug!("normalized empty condition group to a default leaf");
            return vec![Condition::default_leaf()];
        }
        children.into_iter().map(Condition::normalize).collect()
    }

    /// Builds a typed condition from JSON without any depth limit.
    ///
    /// Use `shape::check_condition_shape` first when the input is untrusted.
    pub fn from_json_value(value: &Value) -> Result<Condition, ShapeError> {
        Self::read_node(value, "$")
    }

    fn read_node(value: &Value, location: &str) -> Result<Condition, ShapeError> {
        let object = value.as_object().ok_or_else(|| ShapeError::Expected {
            location: location.to_string(),
            expected: "a condition object",
        })?;

        if let Some(children) = object.get("all") {
            return Ok(Condition::All {
                children: Self::read_children(children, location, "all")?,
            });
        }
        if let Some(children) = object.get("any") {
            return Ok(Condition::Any {
                children: Self::read_children(children, location, "any")?,
            });
        }
        if let Some(child) = object.get("not") {
            let child = Self::read_node(child, &format!("{}.not", location))?;
            return Ok(Condition::not(child));
        }
        Self::read_leaf(object, location).map(Condition::Leaf)
    }

    fn read_children(
        value: &Value,
        location: &str,
        key: &'static str,
    ) -> Result<Vec<Condition>, ShapeError> {
        let items = value.as_array().ok_or_else(|| ShapeError::FieldType {
            location: location.to_string(),
            field: key,
            expected: "an array of conditions",
        })?;
        items
            .iter()
            .enumerate()
            .map(|(i, item)| Self::read_node(item, &format!("{}.{}[{}]", location, key, i)))
            .collect()
    }

    fn read_leaf(object: &Map<String, Value>, location: &str) -> Result<Leaf, ShapeError> {
        let path = match object.get("path") {
            Some(Value::String(path)) => path.clone(),
            Some(_) => {
                return Err(ShapeError::FieldType {
                    location: location.to_string(),
                    field: "path",
                    expected: "a string",
                });
            }
            None => {
                return Err(ShapeError::MissingField {
                    location: location.to_string(),
                    field: "path",
                });
            }
        };

        let operator = match object.get("op").or_else(|| object.get("operator")) {
            Some(Value::String(op)) => {
                op.parse::<Operator>()
                    .map_err(|_| ShapeError::FieldType {
                        location: location.to_string(),
                        field: "op",
                        expected: "one of eq, neq, in, contains, gt, gte, lt, lte, exists",
                    })?
            }
            Some(_) => {
                return Err(ShapeError::FieldType {
                    location: location.to_string(),
                    field: "op",
                    expected: "a string",
                });
            }
            None => {
                return Err(ShapeError::MissingField {
                    location: location.to_string(),
                    field: "op",
                });
            }
        };

        let value = object.get("value").cloned().unwrap_or(Value::Null);
        Ok(Leaf {
            path,
            operator,
            value,
        })
    }
}

impl<'de> Deserialize<'de> for Condition {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Condition::from_json_value(&value).map_err(de::Error::custom)
    }
}
