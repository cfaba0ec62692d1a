use super::{Condition, Leaf, Operator};
use serde_json::Value;
use std::fmt;

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Start the recursive formatting with the lowest parent precedence.
        self.fmt_with_precedence(f, 0)
    }
}

impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operator {
            Operator::Exists => write!(f, "{} {}", self.path, self.operator.symbol()),
            op => write!(
                f,
                "{} {} {}",
                self.path,
                op.symbol(),
                format_operand(&self.value)
            ),
        }
    }
}

impl Condition {
    /// Higher numbers bind more tightly.
    fn precedence(&self) -> u8 {
        match self {
            Condition::Any { children } | Condition::All { children } if children.len() == 1 => {
                children[0].precedence()
            }
            Condition::Any { .. } => 1,
            Condition::All { .. } => 2,
            Condition::Not { .. } => 3,
            Condition::Leaf(_) => 4,
        }
    }

    /// Recursively formats the condition, adding parentheses only when necessary.
    fn fmt_with_precedence(&self, f: &mut fmt::Formatter<'_>, parent_precedence: u8) -> fmt::Result {
        let current_precedence = self.precedence();
        let needs_parens = current_precedence < parent_precedence;

        if needs_parens {
            write!(f, "(")?;
        }

        match self {
            Condition::Any { children } => {
                self.fmt_joined(f, children, " OR ", current_precedence)?
            }
            Condition::All { children } => {
                self.fmt_joined(f, children, " AND ", current_precedence)?
            }
            Condition::Not { child } => {
                write!(f, "NOT ")?;
                child.fmt_with_precedence(f, current_precedence)?;
            }
            Condition::Leaf(leaf) => write!(f, "{}", leaf)?,
        }

        if needs_parens {
            write!(f, ")")?;
        }
        Ok(())
    }

    fn fmt_joined(
        &self,
        f: &mut fmt::Formatter<'_>,
        children: &[Condition],
        separator: &str,
        current_precedence: u8,
    ) -> fmt::Result {
        for (i, child) in children.iter().enumerate() {
            if i > 0 {
                f.write_str(separator)?;
            }
            child.fmt_with_precedence(f, current_precedence)?;
        }
        Ok(())
    }
}

fn format_operand(value: &Value) -> String {
    match value {
        Value::Array(items) => format!(
            "[{}]",
            items.iter().map(format_operand).collect::<Vec<_>>().join(", ")
        ),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_leaf_display() {
        let leaf = Leaf::new("amount", Operator::Gt, json!(100));
        assert_eq!(leaf.to_string(), "amount > 100");
        let exists = Leaf::new("owner_id", Operator::Exists, Value::Null);
        assert_eq!(exists.to_string(), "owner_id EXISTS");
    }

    #[test]
    fn test_nested_groups_get_parentheses() {
        let condition = Condition::all(vec![
            Condition::default_leaf(),
            Condition::any(vec![
                Condition::leaf("amount", Operator::Gt, json!(100)),
                Condition::not(Condition::leaf("owner_id", Operator::Exists, Value::Null)),
            ]),
        ]);
        assert_eq!(
            condition.to_string(),
            "status = \"New\" AND (amount > 100 OR NOT owner_id EXISTS)"
        );
    }

    #[test]
    fn test_not_over_group_is_parenthesized() {
        let condition = Condition::not(Condition::all(vec![
            Condition::leaf("stage", Operator::In, json!(["Won", "Lost"])),
            Condition::leaf("custom_fields.priority", Operator::Eq, json!("high")),
        ]));
        assert_eq!(
            condition.to_string(),
            "NOT (stage IN [\"Won\", \"Lost\"] AND custom_fields.priority = \"high\")"
        );
    }
}
