use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse topology JSON: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("Failed to write statistics: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Failed to build scheduling graph: {0}")]
    ModelConstructionError(#[from] ConversionError),
}

/// Errors raised while turning configuration DTOs into domain objects.
#[derive(Debug, Error, PartialEq)]
pub enum ConversionError {
    #[error("Edge {source_node} -- {target_node} references unknown node '{missing}'")]
    UnknownNode { source_node: String, target_node: String, missing: String },

    #[error("Node '{0}' is defined more than once")]
    DuplicateNode(String),

    #[error("Learning parameter {name} = {value} is outside {allowed}")]
    InvalidLearningParameter { name: &'static str, value: f64, allowed: &'static str },

    #[error("Execution time range [{min}, {max}) must be finite with 0 < min < max")]
    InvalidExecutionTimeRange { min: f64, max: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;
