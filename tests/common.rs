//! Common test utilities for building conditions, actions and rule drafts.
use kisoku::prelude::*;
use serde_json::{Value, json};

/// A three-branch condition used across tests.
///
/// Logic: `status = "New" AND (amount > 50000 OR custom_fields.priority IN [high, urgent]) AND NOT owner_id EXISTS`
#[allow(dead_code)]
pub fn sample_condition() -> Condition {
    Condition::all(vec![
        Condition::default_leaf(),
        Condition::any(vec![
            Condition::leaf("amount", Operator::Gt, json!(50000)),
            Condition::leaf(
                "custom_fields.priority",
                Operator::In,
                json!(["high", "urgent"]),
            ),
        ]),
        Condition::not(Condition::leaf("owner_id", Operator::Exists, Value::Null)),
    ])
}

/// One action of every kind, all valid.
#[allow(dead_code)]
pub fn sample_actions() -> Vec<Action> {
    vec![
        Action::SetField {
            path: "stage".to_string(),
            value: json!("Qualified"),
        },
        Action::CreateTask {
            title: "Call customer".to_string(),
            due_in_days: 2,
            assigned_to_user_id: "user-42".to_string(),
            entity_ref: Some(EntityRef {
                entity_type: "opportunity".to_string(),
                entity_id: "opp-1".to_string(),
            }),
        },
        Action::Notify {
            notification_type: "deal_alert".to_string(),
            payload: json!({"channel": "sales"})
                .as_object()
                .cloned()
                .unwrap_or_default(),
        },
    ]
}

/// A complete, submittable draft.
#[allow(dead_code)]
pub fn sample_draft() -> RuleDraft {
    let mut draft = RuleDraft::new("Escalate large deals", "opportunity.updated");
    draft.description = Some("Alert sales when a big deal is unassigned".to_string());
    draft.condition = sample_condition();
    draft.actions = ActionList::from(sample_actions());
    draft
}

/// `depth` nested `all` groups around the default leaf.
#[allow(dead_code)]
pub fn nested_all(depth: usize) -> Value {
    let mut value = json!({"path": "status", "op": "eq", "value": "New"});
    for _ in 0..depth {
        value = json!({ "all": [value] });
    }
    value
}
