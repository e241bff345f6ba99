use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Combinator for a group of conditions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupOperator {
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
}

impl GroupOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// Discriminator carried by serialized group nodes (`"type": "group"`).
/// Required on the wire so leaves and groups never get confused.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupTag {
    #[default]
    #[serde(rename = "group")]
    Group,
}

/// One comparison of an applicant field against a scalar or list value.
/// The operator is kept as the raw wire string; unknown operators evaluate
/// to an unmet condition rather than failing the document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConditionLeaf {
    pub field: String,
    pub operator: String,
    #[serde(default)]
    pub value: Value,
}

impl ConditionLeaf {
    pub fn new(
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        Self { field: field.into(), operator: operator.into(), value: value.into() }
    }
}

/// Recursive AND/OR group over condition nodes. `conditions` order is
/// significant: children are evaluated and traced in declaration order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConditionGroup {
    #[serde(rename = "type")]
    pub tag: GroupTag,
    pub operator: GroupOperator,
    #[serde(default)]
    pub conditions: Vec<ConditionNode>,
}

impl ConditionGroup {
    pub fn new(operator: GroupOperator, conditions: Vec<ConditionNode>) -> Self {
        Self { tag: GroupTag::Group, operator, conditions }
    }
}

/// A node in an eligibility rule tree: either a leaf comparison or a nested
/// group.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionNode {
    Group(ConditionGroup),
    Leaf(ConditionLeaf),
}

impl ConditionNode {
    pub fn group(operator: GroupOperator, conditions: Vec<ConditionNode>) -> Self {
        Self::Group(ConditionGroup::new(operator, conditions))
    }

    pub fn leaf(
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        Self::Leaf(ConditionLeaf::new(field, operator, value))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{ConditionNode, GroupOperator};

    #[test]
    fn decodes_a_nested_rule_tree() {
        let document = json!({
            "type": "group",
            "operator": "AND",
            "conditions": [
                {"field": "age", "operator": ">=", "value": 18},
                {
                    "type": "group",
                    "operator": "OR",
                    "conditions": [
                        {"field": "state", "operator": "IN", "value": ["CA", "NY"]},
                        {"field": "income", "operator": ">", "value": 50000}
                    ]
                }
            ]
        });

        let node: ConditionNode = serde_json::from_value(document).expect("decode rule tree");
        let ConditionNode::Group(group) = node else {
            panic!("root should be a group");
        };
        assert_eq!(group.operator, GroupOperator::And);
        assert_eq!(group.conditions.len(), 2);
        assert!(matches!(group.conditions[0], ConditionNode::Leaf(_)));
        assert!(matches!(group.conditions[1], ConditionNode::Group(_)));
    }

    #[test]
    fn leaf_without_value_defaults_to_null() {
        let node: ConditionNode =
            serde_json::from_value(json!({"field": "age", "operator": ">"})).expect("decode leaf");
        let ConditionNode::Leaf(leaf) = node else {
            panic!("expected a leaf");
        };
        assert!(leaf.value.is_null());
    }

    #[test]
    fn leaf_missing_field_is_a_decode_error() {
        let result: Result<ConditionNode, _> =
            serde_json::from_value(json!({"operator": ">", "value": 1}));
        assert!(result.is_err());
    }

    #[test]
    fn group_round_trips_with_its_type_tag() {
        let node = ConditionNode::group(
            GroupOperator::Or,
            vec![ConditionNode::leaf("age", ">=", json!(21))],
        );
        let encoded = serde_json::to_value(&node).expect("encode group");
        assert_eq!(encoded["type"], json!("group"));
        assert_eq!(encoded["operator"], json!("OR"));
    }
}
