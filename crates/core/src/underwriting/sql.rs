use serde_json::Value;

use crate::domain::rule::{ConditionLeaf, ConditionNode};

/// Renders a rule tree as a SQL-style WHERE clause for display next to the
/// rule builder. Preview text only; nothing executes it.
pub fn rule_to_sql(node: Option<&ConditionNode>) -> String {
    match node {
        Some(node) => render_node(node),
        None => String::new(),
    }
}

fn render_node(node: &ConditionNode) -> String {
    match node {
        ConditionNode::Group(group) => {
            let parts: Vec<String> = group
                .conditions
                .iter()
                .map(render_node)
                .filter(|part| !part.is_empty())
                .collect();
            match parts.as_slice() {
                [] => String::new(),
                [single] => single.clone(),
                parts => format!("({})", parts.join(&format!(" {} ", group.operator.as_str()))),
            }
        }
        ConditionNode::Leaf(leaf) => render_leaf(leaf),
    }
}

fn render_leaf(leaf: &ConditionLeaf) -> String {
    if leaf.field.is_empty() || leaf.operator.is_empty() {
        return String::new();
    }

    if let Value::Array(items) = &leaf.value {
        let formatted = items.iter().map(render_value).collect::<Vec<_>>().join(", ");
        return format!("{} {} ({formatted})", leaf.field, leaf.operator);
    }

    format!("{} {} {}", leaf.field, leaf.operator, render_value(&leaf.value))
}

/// Strings carry single quotes; everything else prints as JSON.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => format!("'{text}'"),
        other => other.to_string(),
    }
}
