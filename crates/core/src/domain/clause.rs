use serde::{Deserialize, Serialize};

/// A documentation clause attached to a policy. Clauses participate in
/// completeness validation and version snapshots; this core never renders
/// them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clause {
    #[serde(default)]
    pub trigger_condition: Option<String>,
    #[serde(default)]
    pub clause_template: Option<String>,
    #[serde(default)]
    pub variables: Vec<String>,
    #[serde(default = "default_clause_status")]
    pub status: String,
    #[serde(default)]
    pub documents: Vec<ClauseDocument>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClauseDocument {
    #[serde(default)]
    pub document_name: Option<String>,
    #[serde(default = "default_true")]
    pub is_required: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub validity: Option<String>,
}

fn default_clause_status() -> String {
    "Draft".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::Clause;

    #[test]
    fn sparse_clause_gets_draft_status_and_required_documents() {
        let clause: Clause = serde_json::from_value(json!({
            "triggerCondition": "age < 25",
            "documents": [{"documentName": "Proof of income"}]
        }))
        .expect("decode clause");

        assert_eq!(clause.status, "Draft");
        assert!(clause.documents[0].is_required);
        assert!(clause.variables.is_empty());
    }
}
