//! Field-path autocomplete for the condition and action builders.

use crate::config::EditorConfig;
use ahash::AHashMap;
use itertools::Itertools;
use std::fmt;
use std::str::FromStr;

/// Prefix under which custom fields are addressed in paths.
pub const CUSTOM_FIELDS_PREFIX: &str = "custom_fields.";

/// Entity types a workflow rule can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    Account,
    Contact,
    Opportunity,
    Invoice,
    Subscription,
}

impl EntityType {
    pub const ALL: [EntityType; 5] = [
        EntityType::Account,
        EntityType::Contact,
        EntityType::Opportunity,
        EntityType::Invoice,
        EntityType::Subscription,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Account => "account",
            EntityType::Contact => "contact",
            EntityType::Opportunity => "opportunity",
            EntityType::Invoice => "invoice",
            EntityType::Subscription => "subscription",
        }
    }

    /// Well-known fields of the entity, in display order.
    pub fn known_fields(&self) -> &'static [&'static str] {
        match self {
            EntityType::Account => &[
                "status",
                "name",
                "industry",
                "owner_id",
                "annual_revenue",
                "employee_count",
                "billing_country",
                "created_at",
                "updated_at",
            ],
            EntityType::Contact => &[
                "status",
                "first_name",
                "last_name",
                "email",
                "phone",
                "account_id",
                "owner_id",
                "created_at",
            ],
            EntityType::Opportunity => &[
                "status",
                "stage",
                "amount",
                "currency",
                "probability",
                "close_date",
                "account_id",
                "owner_id",
                "created_at",
            ],
            EntityType::Invoice => &[
                "status",
                "number",
                "total",
                "balance_due",
                "currency",
                "due_date",
                "issued_at",
                "account_id",
                "legal_entity_id",
            ],
            EntityType::Subscription => &[
                "status",
                "plan_id",
                "quantity",
                "billing_period",
                "current_period_end",
                "renewal_date",
                "cancel_at_period_end",
                "account_id",
            ],
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim().to_lowercase();
        EntityType::ALL
            .into_iter()
            .find(|entity| entity.as_str() == value)
            .ok_or_else(|| {
                format!(
                    "unknown entity type '{}'; supported values are {}",
                    value,
                    EntityType::ALL.iter().join(", ")
                )
            })
    }
}

/// Suggests field paths for an in-progress path string.
#[derive(Debug, Clone)]
pub struct PathSuggester {
    custom_fields: AHashMap<EntityType, Vec<String>>,
    limit: usize,
}

impl Default for PathSuggester {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl PathSuggester {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            custom_fields: AHashMap::new(),
            limit: config.suggestion_limit,
        }
    }

    /// Registers the active custom-field keys of an entity type, replacing any
    /// previously registered keys.
    pub fn with_custom_fields<I, S>(mut self, entity: EntityType, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_custom_fields(entity, keys);
        self
    }

    pub fn set_custom_fields<I, S>(&mut self, entity: EntityType, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys = keys.into_iter().map(Into::into).collect();
        self.custom_fields.insert(entity, keys);
    }

    /// Every candidate path for `entity`: known fields, then custom fields.
    pub fn candidates(&self, entity: EntityType) -> Vec<String> {
        let known = entity.known_fields().iter().map(|f| f.to_string());
        let custom = self
            .custom_fields
            .get(&entity)
            .into_iter()
            .flatten()
            .map(|key| format!("{}{}", CUSTOM_FIELDS_PREFIX, key));
        known.chain(custom).unique().collect()
    }

    /// Case-insensitive substring matches for `input`, capped at the
    /// configured limit.
    pub fn suggest(&self, entity: EntityType, input: &str) -> Vec<String> {
        let needle = input.trim().to_lowercase();
        self.candidates(entity)
            .into_iter()
            .filter(|candidate| candidate.to_lowercase().contains(&needle))
            .take(self.limit)
            .collect()
    }
}
