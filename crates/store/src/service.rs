use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use polysim_core::config::DEFAULT_HISTORY_LIMIT;
use polysim_core::domain::applicant::ApplicantData;
use polysim_core::domain::policy::PolicyId;
use polysim_core::domain::simulation::{
    PolicyValidationReport, SimulationRecord, SimulationResult,
};
use polysim_core::domain::tree::DecisionNode;
use polysim_core::domain::version::{PolicyVersion, VersionComparison, VersionSnapshot};
use polysim_core::errors::EvaluationError;
use polysim_core::underwriting::{
    validate_policy, DecisionTreeEngine, PolicyConfiguration, SimulationPipeline, TreeTestReport,
};
use polysim_core::versioning::{DiffError, VersionDiffEngine};

use super::{PolicyStore, SimulationResultStore, StoreError, VersionStore};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("policy not found: {0}")]
    PolicyNotFound(PolicyId),
    #[error("version not found: {0}")]
    VersionNotFound(String),
    #[error("no decision tree configured for policy {0}")]
    TreeNotConfigured(PolicyId),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
    #[error(transparent)]
    Diff(#[from] DiffError),
}

/// Orchestrates the evaluation pipeline over the stores: fetches
/// configuration concurrently, runs the pure engines, and persists results
/// off the caller's critical path.
pub struct SimulationService {
    policies: Arc<dyn PolicyStore>,
    results: Arc<dyn SimulationResultStore>,
    versions: Arc<dyn VersionStore>,
    pipeline: SimulationPipeline,
    tree_engine: DecisionTreeEngine,
    diff: VersionDiffEngine,
    history_limit: usize,
}

impl SimulationService {
    pub fn new(
        policies: Arc<dyn PolicyStore>,
        results: Arc<dyn SimulationResultStore>,
        versions: Arc<dyn VersionStore>,
    ) -> Self {
        Self {
            policies,
            results,
            versions,
            pipeline: SimulationPipeline::default(),
            tree_engine: DecisionTreeEngine::default(),
            diff: VersionDiffEngine,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.pipeline = SimulationPipeline::with_max_depth(max_depth);
        self.tree_engine = DecisionTreeEngine::with_max_depth(max_depth);
        self
    }

    pub fn with_history_limit(mut self, history_limit: usize) -> Self {
        self.history_limit = history_limit;
        self
    }

    /// Runs one simulation. The result record is saved on a detached task;
    /// a failed write is logged and never surfaces to the caller.
    pub async fn simulate(
        &self,
        policy_id: &PolicyId,
        applicant: &ApplicantData,
    ) -> Result<SimulationResult, ServiceError> {
        let (rules, scoring, tree) = tokio::try_join!(
            self.policies.eligibility_rules(policy_id),
            self.policies.scoring_config(policy_id),
            self.policies.decision_tree(policy_id),
        )?;

        let configuration = PolicyConfiguration::from_documents(rules, scoring, tree)?;
        let result = self.pipeline.run(&configuration, applicant)?;

        self.persist_result(policy_id.clone(), applicant.clone(), result.clone());
        Ok(result)
    }

    /// Evaluates the stored decision tree directly against sample data,
    /// bypassing eligibility and scoring.
    pub async fn test_decision_tree(
        &self,
        policy_id: &PolicyId,
        applicant: &ApplicantData,
    ) -> Result<TreeTestReport, ServiceError> {
        let document = self.policies.decision_tree(policy_id).await?;
        let Some(document) = document else {
            return Err(ServiceError::TreeNotConfigured(policy_id.clone()));
        };

        let root: DecisionNode = serde_json::from_value(document)
            .map_err(|error| EvaluationError::malformed("decision tree", error.to_string()))?;
        let outcome = self.tree_engine.evaluate(&root, applicant)?;
        Ok(outcome.into())
    }

    pub async fn validate(&self, policy_id: &PolicyId) -> Result<PolicyValidationReport, ServiceError> {
        self.validate_at(policy_id, Utc::now()).await
    }

    pub async fn validate_at(
        &self,
        policy_id: &PolicyId,
        as_of: DateTime<Utc>,
    ) -> Result<PolicyValidationReport, ServiceError> {
        let policy = self
            .policies
            .find_policy(policy_id)
            .await?
            .ok_or_else(|| ServiceError::PolicyNotFound(policy_id.clone()))?;

        let (rules, scoring, tree, clauses) = tokio::try_join!(
            self.policies.eligibility_rules(policy_id),
            self.policies.scoring_config(policy_id),
            self.policies.decision_tree(policy_id),
            self.policies.clauses(policy_id),
        )?;
        let configuration = PolicyConfiguration::from_documents(rules, scoring, tree)?;

        Ok(validate_policy(
            &policy,
            configuration.rules.as_ref(),
            configuration.scoring.as_ref(),
            configuration.decision_tree.as_ref(),
            &clauses,
            as_of,
        ))
    }

    /// Freezes the policy's current configuration into a stored version.
    pub async fn create_snapshot(
        &self,
        policy_id: &PolicyId,
        created_by: &str,
    ) -> Result<PolicyVersion, ServiceError> {
        let policy = self
            .policies
            .find_policy(policy_id)
            .await?
            .ok_or_else(|| ServiceError::PolicyNotFound(policy_id.clone()))?;

        let (tags, rules, scoring, tree, clauses) = tokio::try_join!(
            self.policies.tags(policy_id),
            self.policies.eligibility_rules(policy_id),
            self.policies.scoring_config(policy_id),
            self.policies.decision_tree(policy_id),
            self.policies.clauses(policy_id),
        )?;
        let configuration = PolicyConfiguration::from_documents(rules, scoring, tree)?;

        let version = PolicyVersion {
            id: Uuid::new_v4().to_string(),
            policy_id: policy_id.clone(),
            version_number: policy.version,
            status: policy.status.clone(),
            snapshot: VersionSnapshot {
                policy,
                tags,
                rules: configuration.rules,
                scoring: configuration.scoring,
                decision_tree: configuration.decision_tree,
                clauses: (!clauses.is_empty()).then_some(clauses),
            },
            created_by: created_by.to_string(),
            created_at: Utc::now(),
        };

        self.versions.save_version(version.clone()).await?;
        Ok(version)
    }

    pub async fn compare_versions(
        &self,
        base_id: &str,
        compare_id: &str,
    ) -> Result<VersionComparison, ServiceError> {
        let base = self
            .versions
            .find_version(base_id)
            .await?
            .ok_or_else(|| ServiceError::VersionNotFound(base_id.to_string()))?;
        let compare = self
            .versions
            .find_version(compare_id)
            .await?
            .ok_or_else(|| ServiceError::VersionNotFound(compare_id.to_string()))?;

        let diff = self.diff.diff_snapshots(&base.snapshot, &compare.snapshot)?;
        Ok(VersionComparison { base, compare, diff })
    }

    pub async fn versions(&self, policy_id: &PolicyId) -> Result<Vec<PolicyVersion>, ServiceError> {
        Ok(self.versions.versions_for_policy(policy_id).await?)
    }

    pub async fn history(
        &self,
        policy_id: &PolicyId,
    ) -> Result<Vec<SimulationRecord>, ServiceError> {
        Ok(self.results.history(policy_id, self.history_limit).await?)
    }

    fn persist_result(&self, policy_id: PolicyId, input: ApplicantData, result: SimulationResult) {
        let results = Arc::clone(&self.results);
        let record = SimulationRecord {
            id: Uuid::new_v4().to_string(),
            policy_id,
            simulation_input: input,
            result,
            created_at: Utc::now(),
        };

        tokio::spawn(async move {
            if let Err(error) = results.record(record).await {
                tracing::warn!(%error, "failed to persist simulation result");
            }
        });
    }
}
