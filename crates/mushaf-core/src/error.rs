use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum MushafError {
    #[error("failed to parse line metadata: {0}")]
    Parse(String),

    #[error("line metadata is missing required column '{0}'")]
    MissingColumn(String),

    #[error("page {page}: line {line} is out of order (rows must be sorted by line_number)")]
    LineOrder { page: u32, line: u32 },

    #[error("page {page}: extraction failed: {reason}")]
    Extraction { page: u32, reason: String },

    #[error("page {page}: no text block left for content line {line}")]
    Alignment { page: u32, line: u32 },

    #[error("failed to start page workers: {0}")]
    WorkerPool(String),

    #[error("archive expansion failed: {0}")]
    Archive(String),

    #[error("failed to load config from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
