pub mod applicant;
pub mod clause;
pub mod policy;
pub mod rule;
pub mod scoring;
pub mod simulation;
pub mod tree;
pub mod version;
