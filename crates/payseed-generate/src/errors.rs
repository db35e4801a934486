use std::path::PathBuf;

use thiserror::Error;

use payseed_core::EntityKind;

/// Errors emitted by the generation engine.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid params: {0}")]
    InvalidParams(String),
    #[error("stage '{stage}' needs {missing} which has not been generated yet")]
    StageOrder {
        stage: &'static str,
        missing: EntityKind,
    },
    #[error("output directory does not exist: {}", .0.display())]
    MissingOutputDir(PathBuf),
    #[error("core error: {0}")]
    Core(#[from] payseed_core::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
