use serde::{Deserialize, Serialize};

use super::rule::{ConditionLeaf, GroupOperator};

/// Discriminator carried by serialized condition nodes
/// (`"type": "condition"`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionTag {
    #[default]
    #[serde(rename = "condition")]
    Condition,
}

/// Guard of a condition node: either one leaf comparison or a flat AND/OR
/// group of leaf comparisons. Guard groups do not nest.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GuardExpr {
    Group(GuardGroup),
    Leaf(ConditionLeaf),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GuardGroup {
    pub operator: GroupOperator,
    #[serde(default)]
    pub conditions: Vec<ConditionLeaf>,
}

/// Interior node: evaluate the guard, then descend `then` or `else`. A
/// missing `else` branch resolves to the NO_DECISION sentinel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConditionBranch {
    #[serde(rename = "type")]
    pub tag: ConditionTag,
    #[serde(rename = "if")]
    pub guard: GuardExpr,
    pub then: Box<DecisionNode>,
    #[serde(rename = "else", default, skip_serializing_if = "Option::is_none")]
    pub otherwise: Option<Box<DecisionNode>>,
}

/// Accepting terminal of the tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerminalNode {
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
}

/// An empty placeholder node (the builder saves `{}` before a tree is
/// drawn), resolving to NO_DECISION. Only the empty object decodes here;
/// a node carrying any field must match Condition or Terminal or the whole
/// document fails to decode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UndeterminedNode {}

/// A decision tree node. Variant order matters for untagged decoding:
/// condition nodes are identified by their `type` tag, terminals by the
/// presence of `action`, and exactly `{}` is undetermined.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DecisionNode {
    Condition(Box<ConditionBranch>),
    Terminal(TerminalNode),
    Undetermined(UndeterminedNode),
}

impl DecisionNode {
    pub fn condition(
        guard: GuardExpr,
        then: DecisionNode,
        otherwise: Option<DecisionNode>,
    ) -> Self {
        Self::Condition(Box::new(ConditionBranch {
            tag: ConditionTag::Condition,
            guard,
            then: Box::new(then),
            otherwise: otherwise.map(Box::new),
        }))
    }

    pub fn terminal(action: impl Into<String>, tier: Option<String>) -> Self {
        Self::Terminal(TerminalNode { action: action.into(), tier })
    }

    /// A tree counts as configured only when its root is a condition node.
    pub fn is_condition(&self) -> bool {
        matches!(self, Self::Condition(_))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{DecisionNode, GuardExpr};

    #[test]
    fn decodes_condition_terminal_and_undetermined_nodes() {
        let document = json!({
            "type": "condition",
            "if": {"field": "age", "operator": ">=", "value": 18},
            "then": {"action": "APPROVE", "tier": "TIER_1"},
            "else": {}
        });

        let node: DecisionNode = serde_json::from_value(document).expect("decode tree");
        let DecisionNode::Condition(branch) = node else {
            panic!("root should be a condition");
        };
        assert!(matches!(branch.guard, GuardExpr::Leaf(_)));
        assert!(matches!(*branch.then, DecisionNode::Terminal(_)));
        assert!(matches!(branch.otherwise.as_deref(), Some(DecisionNode::Undetermined(_))));
    }

    #[test]
    fn decodes_a_guard_group_of_leaves() {
        let document = json!({
            "type": "condition",
            "if": {"operator": "AND", "conditions": [
                {"field": "age", "operator": ">=", "value": 18},
                {"field": "_score", "operator": ">=", "value": 70}
            ]},
            "then": {"action": "APPROVE"}
        });

        let node: DecisionNode = serde_json::from_value(document).expect("decode tree");
        let DecisionNode::Condition(branch) = node else {
            panic!("root should be a condition");
        };
        let GuardExpr::Group(group) = branch.guard else {
            panic!("guard should be a group");
        };
        assert_eq!(group.conditions.len(), 2);
    }

    #[test]
    fn empty_document_is_undetermined_and_not_configured() {
        let node: DecisionNode = serde_json::from_value(json!({})).expect("decode empty tree");
        assert!(matches!(node, DecisionNode::Undetermined(_)));
        assert!(!node.is_condition());
    }

    #[test]
    fn condition_with_malformed_guard_fails_to_decode() {
        // Guard leaf missing its field must not fall through to the
        // placeholder variant.
        let result: Result<DecisionNode, _> = serde_json::from_value(json!({
            "type": "condition",
            "if": {"operator": ">=", "value": 18},
            "then": {"action": "APPROVE"}
        }));
        assert!(result.is_err());
    }

    #[test]
    fn non_empty_unrecognized_node_fails_to_decode() {
        let result: Result<DecisionNode, _> =
            serde_json::from_value(json!({"isValidated": false}));
        assert!(result.is_err());
    }

    #[test]
    fn terminal_without_else_round_trips_without_null_fields() {
        let node = DecisionNode::condition(
            GuardExpr::Leaf(crate::domain::rule::ConditionLeaf::new("age", ">=", json!(18))),
            DecisionNode::terminal("APPROVE", None),
            None,
        );
        let encoded = serde_json::to_value(&node).expect("encode tree");
        assert_eq!(encoded["type"], json!("condition"));
        assert!(encoded.get("else").is_none());
        assert!(encoded["then"].get("tier").is_none());
    }
}
