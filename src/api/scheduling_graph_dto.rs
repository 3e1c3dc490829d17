use serde::Deserialize;

use crate::domain::scheduling_graph::config::MigrationCost;

/// Topology file: nodes, undirected edges and optional run settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingGraphDto {
    pub nodes: Vec<NodeDto>,
    #[serde(default)]
    pub edges: Vec<EdgeDto>,
    pub learning: Option<LearningDto>,
    pub execution_time_range: Option<ExecutionTimeRangeDto>,
    pub migration_cost: Option<MigrationCost>,
    pub seed: Option<u64>,
    pub jobs: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodeDto {
    pub id: String,
    pub capacity: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EdgeDto {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LearningDto {
    pub alpha: f64,
    pub gamma: f64,
    pub epsilon: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExecutionTimeRangeDto {
    pub min: f64,
    pub max: f64,
}
