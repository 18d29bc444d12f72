use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DashboardError {
    /// Requested generation parameters cannot be satisfied. Nothing is generated.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A detail view was requested for a topic that is not in the current ranking.
    #[error("topic {topic:?} is not in the current ranking")]
    EmptySelection { topic: String },
}
