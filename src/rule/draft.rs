use super::RulePayload;
use crate::action::ActionList;
use crate::condition::Condition;
use crate::validate::{IssueTarget, ValidationIssue, ValidationReport, validate_condition};

/// Builder state of a workflow rule before it is sent to the server.
#[derive(Debug, Clone)]
pub struct RuleDraft {
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub scope_legal_entity_id: Option<String>,
    pub trigger_event: String,
    pub condition: Condition,
    pub actions: ActionList,
}

impl RuleDraft {
    /// An active rule with the default condition and no actions yet.
    pub fn new(name: impl Into<String>, trigger_event: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            is_active: true,
            scope_legal_entity_id: None,
            trigger_event: trigger_event.into(),
            condition: Condition::default(),
            actions: ActionList::new(),
        }
    }

    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        if self.name.trim().is_empty() {
            report.push(ValidationIssue::new(
                IssueTarget::Rule { field: "name" },
                "rule name is required",
            ));
        }
        if self.trigger_event.trim().is_empty() {
            report.push(ValidationIssue::new(
                IssueTarget::Rule {
                    field: "trigger_event",
                },
                "trigger event is required",
            ));
        }
        if self
            .scope_legal_entity_id
            .as_deref()
            .is_some_and(|id| id.trim().is_empty())
        {
            report.push(ValidationIssue::new(
                IssueTarget::Rule {
                    field: "scope_legal_entity_id",
                },
                "legal entity scope must be omitted rather than left blank",
            ));
        }
        report.extend(validate_condition(&self.condition));
        report.extend(self.actions.validate().issues);
        report
    }

    /// Builds the outbound payload used for create, update, dry-run and
    /// execute calls. Blocked while any validation issue exists.
    pub fn to_payload(&self) -> Result<RulePayload, ValidationReport> {
        self.validate().into_result(())?;
        let actions_json = self.actions.to_submittable()?;
        tracing::debug!(
            name = %self.name,
            leaves = self.condition.leaf_count(),
            actions = actions_json.len(),
            "built rule payload"
        );
        Ok(RulePayload {
            name: self.name.trim().to_string(),
            description: self.description.clone(),
            is_active: self.is_active,
            scope_legal_entity_id: self.scope_legal_entity_id.clone(),
            trigger_event: self.trigger_event.clone(),
            condition_json: self.condition.clone().normalize(),
            actions_json,
        })
    }
}

impl From<RulePayload> for RuleDraft {
    fn from(payload: RulePayload) -> Self {
        Self {
            name: payload.name,
            description: payload.description,
            is_active: payload.is_active,
            scope_legal_entity_id: payload.scope_legal_entity_id,
            trigger_event: payload.trigger_event,
            condition: payload.condition_json.normalize(),
            actions: ActionList::from(payload.actions_json),
        }
    }
}
