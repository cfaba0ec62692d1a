//! Tests for field-path autocomplete.
use kisoku::prelude::*;
use kisoku::suggest::CUSTOM_FIELDS_PREFIX;

#[test]
fn test_empty_input_returns_first_candidates_up_to_limit() {
    let suggester = PathSuggester::default();
    let suggestions = suggester.suggest(EntityType::Account, "");
    assert_eq!(suggestions.len(), 8);
    assert_eq!(suggestions[0], "status");
}

#[test]
fn test_matching_is_case_insensitive_substring() {
    let suggester = PathSuggester::default();
    let suggestions = suggester.suggest(EntityType::Opportunity, "AMO");
    assert_eq!(suggestions, vec!["amount".to_string()]);

    let ids = suggester.suggest(EntityType::Opportunity, "_id");
    assert_eq!(ids, vec!["account_id".to_string(), "owner_id".to_string()]);
}

#[test]
fn test_custom_fields_are_prefixed() {
    let suggester = PathSuggester::default()
        .with_custom_fields(EntityType::Opportunity, ["priority", "Region"]);
    let suggestions = suggester.suggest(EntityType::Opportunity, "custom");
    assert_eq!(
        suggestions,
        vec![
            format!("{}priority", CUSTOM_FIELDS_PREFIX),
            format!("{}Region", CUSTOM_FIELDS_PREFIX),
        ]
    );
    assert_eq!(
        suggester.suggest(EntityType::Opportunity, "region"),
        vec!["custom_fields.Region".to_string()]
    );
}

#[test]
fn test_custom_fields_are_scoped_per_entity() {
    let suggester =
        PathSuggester::default().with_custom_fields(EntityType::Invoice, ["po_number"]);
    assert!(suggester.suggest(EntityType::Account, "po_").is_empty());
    assert_eq!(suggester.suggest(EntityType::Invoice, "po_").len(), 1);
}

#[test]
fn test_duplicate_candidates_are_removed() {
    let suggester =
        PathSuggester::default().with_custom_fields(EntityType::Contact, ["tier", "tier"]);
    assert_eq!(suggester.suggest(EntityType::Contact, "tier").len(), 1);
}

#[test]
fn test_limit_follows_config() {
    let config = EditorConfig::default().with_suggestion_limit(3);
    let suggester = PathSuggester::new(&config);
    assert_eq!(suggester.suggest(EntityType::Subscription, "").len(), 3);
}

#[test]
fn test_entity_type_parsing() {
    assert_eq!("Invoice".parse::<EntityType>(), Ok(EntityType::Invoice));
    let err = "lead".parse::<EntityType>().unwrap_err();
    assert!(err.contains("account, contact, opportunity, invoice, subscription"));
}
