use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use polysim_core::domain::clause::Clause;
use polysim_core::domain::policy::{PolicyId, PolicyRecord};
use polysim_core::domain::simulation::SimulationRecord;
use polysim_core::domain::version::PolicyVersion;

pub mod memory;
pub mod service;

pub use memory::{InMemoryPolicyStore, InMemorySimulationResultStore, InMemoryVersionStore};
pub use service::{ServiceError, SimulationService};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("backend error: {0}")]
    Backend(String),
    #[error("decode error: {0}")]
    Decode(String),
}

/// Read access to a policy and its authored configuration documents. The
/// documents come back as raw JSON; decoding them is the evaluation layer's
/// job so that a malformed document fails the simulation, not the fetch.
#[async_trait]
pub trait PolicyStore: Send + Sync {
    async fn find_policy(&self, id: &PolicyId) -> Result<Option<PolicyRecord>, StoreError>;
    async fn tags(&self, id: &PolicyId) -> Result<Vec<String>, StoreError>;
    async fn eligibility_rules(&self, id: &PolicyId) -> Result<Option<Value>, StoreError>;
    async fn scoring_config(&self, id: &PolicyId) -> Result<Option<Value>, StoreError>;
    async fn decision_tree(&self, id: &PolicyId) -> Result<Option<Value>, StoreError>;
    async fn clauses(&self, id: &PolicyId) -> Result<Vec<Clause>, StoreError>;
}

#[async_trait]
pub trait SimulationResultStore: Send + Sync {
    async fn record(&self, record: SimulationRecord) -> Result<(), StoreError>;

    /// Most recent first, capped at `limit`.
    async fn history(
        &self,
        id: &PolicyId,
        limit: usize,
    ) -> Result<Vec<SimulationRecord>, StoreError>;
}

#[async_trait]
pub trait VersionStore: Send + Sync {
    async fn save_version(&self, version: PolicyVersion) -> Result<(), StoreError>;
    async fn find_version(&self, id: &str) -> Result<Option<PolicyVersion>, StoreError>;

    /// Most recent first.
    async fn versions_for_policy(
        &self,
        id: &PolicyId,
    ) -> Result<Vec<PolicyVersion>, StoreError>;
}
