use crate::sim::ScheduleError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scenario: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unsupported schema_version {0}")]
    UnsupportedSchema(u32),

    #[error("duplicate event label '{0}'")]
    DuplicateLabel(String),

    #[error("unknown event label '{0}'")]
    UnknownLabel(String),

    #[error("a run horizon cannot be combined with explicit ops; use a run_until op instead")]
    UntilWithOps,

    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}
