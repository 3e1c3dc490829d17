use crate::domain::utils::id::{JobId, NodeId};
use serde::Serialize;
use std::fmt;

/// One successful migration: `job` moved from `source` to `destination`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationRecord {
    pub job: JobId,
    pub source: NodeId,
    pub destination: NodeId,
}

impl MigrationRecord {
    pub fn new(job: JobId, source: NodeId, destination: NodeId) -> Self {
        Self { job, source, destination }
    }
}

impl fmt::Display for MigrationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} migrated from {} to {}", self.job, self.source, self.destination)
    }
}
