//! Tests for JSON text conversion and the dual-mode editor.
mod common;
use common::*;
use kisoku::prelude::*;
use serde_json::json;

#[test]
fn test_pretty_json_uses_two_space_indentation() {
    let leaf = Condition::default_leaf();
    assert_eq!(
        to_pretty_json(&leaf).unwrap(),
        "{\n  \"path\": \"status\",\n  \"op\": \"eq\",\n  \"value\": \"New\"\n}"
    );
}

#[test]
fn test_condition_round_trip() {
    let condition = sample_condition();
    let text = to_pretty_json(&condition).unwrap();
    assert_eq!(Condition::from_json_text(&text).unwrap(), condition);
}

#[test]
fn test_action_list_round_trip() {
    let actions = sample_actions();
    let text = to_pretty_json(&actions).unwrap();
    assert_eq!(Vec::<Action>::from_json_text(&text).unwrap(), actions);
}

#[test]
fn test_action_list_editor_serializes_committed_actions() {
    let list = ActionList::from(sample_actions());
    assert_eq!(
        to_pretty_json(&list).unwrap(),
        to_pretty_json(&sample_actions()).unwrap()
    );
    let reloaded = ActionList::from_json_text(&to_pretty_json(&list).unwrap()).unwrap();
    assert_eq!(reloaded.actions(), sample_actions());
}

#[test]
fn test_remove_only_leaf_from_text() {
    let text = r#"{"all": [{"path": "status", "op": "eq", "value": "New"}]}"#;
    let root = Condition::from_json_text(text).unwrap();
    let next = root.remove_at_path(&[0]).unwrap();
    assert_eq!(
        serde_json::to_value(&next).unwrap(),
        json!({"all": [{"path": "status", "op": "eq", "value": "New"}]})
    );
}

#[test]
fn test_empty_groups_are_normalized_on_load() {
    let condition = Condition::from_json_text(r#"{"any": []}"#).unwrap();
    assert_eq!(condition, Condition::any(vec![Condition::default_leaf()]));
}

#[test]
fn test_invalid_json_is_malformed_input() {
    let err = Condition::from_json_text("{\"all\": [").unwrap_err();
    match err {
        CodecError::MalformedInput(message) => assert!(message.contains("invalid JSON")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_shape_mismatch_carries_location() {
    let err = Condition::from_json_text(r#"{"all": [{"path": "status"}]}"#).unwrap_err();
    match err {
        CodecError::MalformedInput(message) => {
            assert!(message.contains("$.all[0]"), "{}", message);
            assert!(message.contains("'op'"), "{}", message);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_unknown_operator_is_malformed_input() {
    let err = Condition::from_json_text(r#"{"path": "status", "op": "like"}"#).unwrap_err();
    assert!(matches!(err, CodecError::MalformedInput(_)));
}

#[test]
fn test_deep_nesting_respects_config() {
    let text = nested_all(10).to_string();
    let err = Condition::from_json_text(&text).unwrap_err();
    match err {
        CodecError::MalformedInput(message) => assert!(message.contains("nesting exceeds")),
        other => panic!("unexpected error: {:?}", other),
    }

    let relaxed = EditorConfig::default().with_max_depth(9);
    let condition = Condition::from_json_text_with(&text, &relaxed).unwrap();
    assert_eq!(condition.depth(), 10);
}

#[test]
fn test_action_text_must_be_an_array() {
    let err = Vec::<Action>::from_json_text(r#"{"type": "NOTIFY"}"#).unwrap_err();
    assert!(matches!(err, CodecError::MalformedInput(_)));
}

#[test]
fn test_fractional_due_days_are_rejected_on_load() {
    let text = r#"[{"type": "CREATE_TASK", "title": "Call", "due_in_days": 1.5, "assigned_to_user_id": "u1"}]"#;
    assert!(Vec::<Action>::from_json_text(text).is_err());
}

#[test]
fn test_dual_mode_editor_sync_to_text() {
    let mut editor = DualModeEditor::new(Condition::default(), EditorConfig::default()).unwrap();
    assert_eq!(editor.mode(), EditorMode::Builder);

    let next = editor.value().add_child(&[], NodeKind::Not).unwrap();
    editor.set_value(next.clone());
    editor.switch_to_raw().unwrap();

    assert_eq!(editor.mode(), EditorMode::RawJson);
    assert_eq!(editor.text(), to_pretty_json(&next).unwrap());
}

#[test]
fn test_dual_mode_editor_invalid_text_never_partially_applies() {
    let mut editor = DualModeEditor::new(sample_condition(), EditorConfig::default()).unwrap();
    editor.switch_to_raw().unwrap();
    editor.set_text(r#"{"all": [{"path": "stage", "op": "eq", "value": "Won"}, {"path": 1}]}"#);

    assert!(editor.switch_to_builder().is_err());
    assert_eq!(editor.mode(), EditorMode::RawJson);
    assert_eq!(editor.value(), &sample_condition());
}

#[test]
fn test_dual_mode_editor_loads_valid_text() {
    let mut editor = DualModeEditor::new(sample_condition(), EditorConfig::default()).unwrap();
    editor.switch_to_raw().unwrap();
    editor.set_text(r#"{"not": {"path": "stage", "op": "eq", "value": "Lost"}}"#);

    editor.switch_to_builder().unwrap();
    assert_eq!(editor.mode(), EditorMode::Builder);
    assert_eq!(
        editor.into_value(),
        Condition::not(Condition::leaf("stage", Operator::Eq, json!("Lost")))
    );
}

#[test]
fn test_dual_mode_editor_for_actions() {
    let mut editor =
        DualModeEditor::new(ActionList::from(sample_actions()), EditorConfig::default()).unwrap();
    editor.set_text(r#"[{"type": "NOTIFY", "notification_type": "X", "payload": "not-an-object"}]"#);
    assert!(editor.load_text().is_err());
    assert_eq!(editor.value().len(), 3);

    editor.set_text(r#"[{"type": "SET_FIELD", "path": "status", "value": null}]"#);
    editor.load_text().unwrap();
    assert_eq!(editor.value().len(), 1);
}
