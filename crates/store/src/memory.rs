use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use polysim_core::domain::clause::Clause;
use polysim_core::domain::policy::{PolicyId, PolicyRecord};
use polysim_core::domain::simulation::SimulationRecord;
use polysim_core::domain::version::PolicyVersion;

use super::{PolicyStore, SimulationResultStore, StoreError, VersionStore};

/// Policy store backed by in-process maps, used by tests and the CLI's
/// file-fed mode.
#[derive(Default)]
pub struct InMemoryPolicyStore {
    policies: RwLock<HashMap<String, PolicyRecord>>,
    tags: RwLock<HashMap<String, Vec<String>>>,
    rules: RwLock<HashMap<String, Value>>,
    scoring: RwLock<HashMap<String, Value>>,
    trees: RwLock<HashMap<String, Value>>,
    clauses: RwLock<HashMap<String, Vec<Clause>>>,
}

impl InMemoryPolicyStore {
    pub async fn put_policy(&self, policy: PolicyRecord) {
        let mut policies = self.policies.write().await;
        policies.insert(policy.id.0.clone(), policy);
    }

    pub async fn put_tags(&self, id: &PolicyId, tags: Vec<String>) {
        let mut all = self.tags.write().await;
        all.insert(id.0.clone(), tags);
    }

    pub async fn put_rules(&self, id: &PolicyId, document: Value) {
        let mut rules = self.rules.write().await;
        rules.insert(id.0.clone(), document);
    }

    pub async fn put_scoring(&self, id: &PolicyId, document: Value) {
        let mut scoring = self.scoring.write().await;
        scoring.insert(id.0.clone(), document);
    }

    pub async fn put_decision_tree(&self, id: &PolicyId, document: Value) {
        let mut trees = self.trees.write().await;
        trees.insert(id.0.clone(), document);
    }

    pub async fn put_clauses(&self, id: &PolicyId, clauses: Vec<Clause>) {
        let mut all = self.clauses.write().await;
        all.insert(id.0.clone(), clauses);
    }
}

#[async_trait]
impl PolicyStore for InMemoryPolicyStore {
    async fn find_policy(&self, id: &PolicyId) -> Result<Option<PolicyRecord>, StoreError> {
        let policies = self.policies.read().await;
        Ok(policies.get(&id.0).cloned())
    }

    async fn tags(&self, id: &PolicyId) -> Result<Vec<String>, StoreError> {
        let tags = self.tags.read().await;
        Ok(tags.get(&id.0).cloned().unwrap_or_default())
    }

    async fn eligibility_rules(&self, id: &PolicyId) -> Result<Option<Value>, StoreError> {
        let rules = self.rules.read().await;
        Ok(rules.get(&id.0).cloned())
    }

    async fn scoring_config(&self, id: &PolicyId) -> Result<Option<Value>, StoreError> {
        let scoring = self.scoring.read().await;
        Ok(scoring.get(&id.0).cloned())
    }

    async fn decision_tree(&self, id: &PolicyId) -> Result<Option<Value>, StoreError> {
        let trees = self.trees.read().await;
        Ok(trees.get(&id.0).cloned())
    }

    async fn clauses(&self, id: &PolicyId) -> Result<Vec<Clause>, StoreError> {
        let clauses = self.clauses.read().await;
        Ok(clauses.get(&id.0).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
pub struct InMemorySimulationResultStore {
    records: RwLock<Vec<SimulationRecord>>,
}

#[async_trait]
impl SimulationResultStore for InMemorySimulationResultStore {
    async fn record(&self, record: SimulationRecord) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        records.push(record);
        Ok(())
    }

    async fn history(
        &self,
        id: &PolicyId,
        limit: usize,
    ) -> Result<Vec<SimulationRecord>, StoreError> {
        let records = self.records.read().await;
        let mut matching: Vec<SimulationRecord> =
            records.iter().filter(|record| &record.policy_id == id).cloned().collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matching.truncate(limit);
        Ok(matching)
    }
}

#[derive(Default)]
pub struct InMemoryVersionStore {
    versions: RwLock<Vec<PolicyVersion>>,
}

#[async_trait]
impl VersionStore for InMemoryVersionStore {
    async fn save_version(&self, version: PolicyVersion) -> Result<(), StoreError> {
        let mut versions = self.versions.write().await;
        versions.push(version);
        Ok(())
    }

    async fn find_version(&self, id: &str) -> Result<Option<PolicyVersion>, StoreError> {
        let versions = self.versions.read().await;
        Ok(versions.iter().find(|version| version.id == id).cloned())
    }

    async fn versions_for_policy(
        &self,
        id: &PolicyId,
    ) -> Result<Vec<PolicyVersion>, StoreError> {
        let versions = self.versions.read().await;
        let mut matching: Vec<PolicyVersion> =
            versions.iter().filter(|version| &version.policy_id == id).cloned().collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use serde_json::json;

    use polysim_core::domain::policy::{PolicyId, PolicyRecord};
    use polysim_core::domain::simulation::{SimulationRecord, SimulationResult};

    use crate::{InMemoryPolicyStore, InMemorySimulationResultStore};
    use crate::{PolicyStore, SimulationResultStore};

    fn record(id: &str, policy: &PolicyId, age_minutes: i64) -> SimulationRecord {
        SimulationRecord {
            id: id.to_string(),
            policy_id: policy.clone(),
            simulation_input: serde_json::from_value(json!({"age": 30})).expect("input"),
            result: SimulationResult {
                decision: "APPROVE".to_string(),
                score: 80.0,
                tier: Some("TIER_1".to_string()),
                triggered_rule: "Score: 80".to_string(),
                reason: "Score 80 resulted in APPROVE".to_string(),
                trace: vec![],
            },
            created_at: Utc::now() - Duration::minutes(age_minutes),
        }
    }

    #[tokio::test]
    async fn policy_store_round_trips_documents() {
        let store = InMemoryPolicyStore::default();
        let id = PolicyId::from("pol-1");

        store.put_policy(PolicyRecord::new("pol-1")).await;
        store.put_rules(&id, json!({"type": "group", "operator": "AND", "conditions": []})).await;

        let policy = store.find_policy(&id).await.expect("find policy");
        assert!(policy.is_some());

        let rules = store.eligibility_rules(&id).await.expect("fetch rules");
        assert_eq!(rules, Some(json!({"type": "group", "operator": "AND", "conditions": []})));

        let tree = store.decision_tree(&id).await.expect("fetch tree");
        assert!(tree.is_none());
    }

    #[tokio::test]
    async fn history_is_newest_first_and_capped() {
        let store = InMemorySimulationResultStore::default();
        let id = PolicyId::from("pol-1");
        let other = PolicyId::from("pol-2");

        for (name, age) in [("a", 30), ("b", 10), ("c", 20)] {
            store.record(record(name, &id, age)).await.expect("record");
        }
        store.record(record("x", &other, 5)).await.expect("record");

        let history = store.history(&id, 2).await.expect("history");
        let ids: Vec<&str> = history.iter().map(|record| record.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }
}
