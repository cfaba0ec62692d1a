//! Structured validation state.
//!
//! Problems are collected per rule field, per condition node and per action
//! index so each can be shown next to the element it concerns. A non-empty
//! report blocks submission; nothing here is fatal.

use crate::action::Action;
use crate::condition::{Condition, Leaf, Operator};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// What a validation issue is attached to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueTarget {
    /// A top-level field of the rule envelope, e.g. `name`.
    Rule { field: &'static str },
    /// The condition node at a child-index path.
    Condition { path: Vec<usize> },
    /// The action list as a whole.
    ActionList,
    /// One action, optionally narrowed to a field.
    Action {
        index: usize,
        field: Option<&'static str>,
    },
}

impl fmt::Display for IssueTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueTarget::Rule { field } => write!(f, "{}", field),
            IssueTarget::Condition { path } => write!(f, "condition{:?}", path),
            IssueTarget::ActionList => write!(f, "actions"),
            IssueTarget::Action {
                index,
                field: Some(field),
            } => write!(f, "actions[{}].{}", index, field),
            IssueTarget::Action { index, field: None } => write!(f, "actions[{}]", index),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub target: IssueTarget,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(target: IssueTarget, message: impl Into<String>) -> Self {
        Self {
            target,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.target, self.message)
    }
}

/// Every issue currently blocking submission.
#[derive(Error, Debug, Clone, Default, PartialEq, Eq)]
#[error("{} validation issue(s) block submission", .issues.len())]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issues attached to the action at `index`.
    pub fn for_action(&self, index: usize) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(move |issue| {
            matches!(issue.target, IssueTarget::Action { index: i, .. } if i == index)
        })
    }

    /// Issues attached to the condition node at `path`.
    pub fn for_condition<'a>(
        &'a self,
        path: &'a [usize],
    ) -> impl Iterator<Item = &'a ValidationIssue> {
        self.issues.iter().filter(move |issue| {
            matches!(&issue.target, IssueTarget::Condition { path: p } if p.as_slice() == path)
        })
    }

    /// Turns an empty report into `Ok(value)`.
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationReport> {
        if self.is_valid() { Ok(value) } else { Err(self) }
    }
}

impl Extend<ValidationIssue> for ValidationReport {
    fn extend<I: IntoIterator<Item = ValidationIssue>>(&mut self, iter: I) {
        self.issues.extend(iter);
    }
}

/// Checks the semantic requirements of every node in a condition tree.
pub fn validate_condition(condition: &Condition) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut path = Vec::new();
    walk_condition(condition, &mut path, &mut issues);
    issues
}

fn walk_condition(
    condition: &Condition,
    path: &mut Vec<usize>,
    issues: &mut Vec<ValidationIssue>,
) {
    match condition {
        Condition::All { children } | Condition::Any { children } => {
            if children.is_empty() {
                issues.push(ValidationIssue::new(
                    IssueTarget::Condition { path: path.clone() },
                    "group must contain at least one condition",
                ));
            }
            for (i, child) in children.iter().enumerate() {
                path.push(i);
                walk_condition(child, path, issues);
                path.pop();
            }
        }
        Condition::Not { child } => {
            path.push(0);
            walk_condition(child, path, issues);
            path.pop();
        }
        Condition::Leaf(leaf) => {
            if let Some(message) = leaf_problem(leaf) {
                issues.push(ValidationIssue::new(
                    IssueTarget::Condition { path: path.clone() },
                    message,
                ));
            }
        }
    }
}

fn leaf_problem(leaf: &Leaf) -> Option<String> {
    if leaf.path.trim().is_empty() {
        return Some("field path is required".to_string());
    }
    if leaf.operator.requires_value() && leaf.value.is_null() {
        return Some(format!("operator '{}' requires a value", leaf.operator));
    }
    if leaf.operator == Operator::In {
        let all_strings = leaf
            .value
            .as_array()
            .is_some_and(|items| items.iter().all(Value::is_string));
        if !all_strings {
            return Some("operator 'in' requires a list of strings".to_string());
        }
    }
    None
}

/// Checks the semantic requirements of one action.
pub fn validate_action(index: usize, action: &Action) -> Vec<ValidationIssue> {
    let issue = |field: &'static str, message: &str| {
        ValidationIssue::new(
            IssueTarget::Action {
                index,
                field: Some(field),
            },
            message,
        )
    };

    let mut issues = Vec::new();
    match action {
        Action::SetField { path, .. } => {
            if path.trim().is_empty() {
                issues.push(issue("path", "field path is required"));
            }
        }
        Action::CreateTask {
            title,
            due_in_days,
            assigned_to_user_id,
            ..
        } => {
            if title.trim().is_empty() {
                issues.push(issue("title", "task title is required"));
            }
            if *due_in_days < 0 {
                issues.push(issue("due_in_days", "due date cannot be in the past"));
            }
            if assigned_to_user_id.trim().is_empty() {
                issues.push(issue("assigned_to_user_id", "an assignee is required"));
            }
        }
        Action::Notify {
            notification_type, ..
        } => {
            if notification_type.trim().is_empty() {
                issues.push(issue("notification_type", "notification type is required"));
            }
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_leaf_requires_value_except_exists() {
        let missing = Condition::all(vec![
            Condition::leaf("amount", Operator::Gt, Value::Null),
            Condition::leaf("owner_id", Operator::Exists, Value::Null),
        ]);
        let issues = validate_condition(&missing);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].target, IssueTarget::Condition { path: vec![0] });
    }

    #[test]
    fn test_in_requires_string_list() {
        let condition = Condition::not(Condition::leaf("stage", Operator::In, json!([1, 2])));
        let issues = validate_condition(&condition);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].target, IssueTarget::Condition { path: vec![0] });
        assert!(issues[0].message.contains("list of strings"));
    }

    #[test]
    fn test_issue_target_display() {
        let target = IssueTarget::Action {
            index: 2,
            field: Some("payload"),
        };
        assert_eq!(target.to_string(), "actions[2].payload");
        assert_eq!(
            IssueTarget::Condition { path: vec![0, 1] }.to_string(),
            "condition[0, 1]"
        );
    }
}
