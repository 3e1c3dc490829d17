use crate::api::scheduling_graph_dto::SchedulingGraphDto;
use crate::domain::agent::learning_parameters::LearningParameters;
use crate::domain::scheduling_graph::config::{ExecutionTimeRange, SchedulerConfig};
use crate::domain::scheduling_graph::scheduling_graph::SchedulingGraph;
use crate::domain::simulator::batch::DEFAULT_JOBS;
use crate::domain::utils::id::{JobId, NodeId};
use crate::error::ConversionError;
use std::collections::HashSet;

/// A graph built from a topology file plus the job batch to run on it.
#[derive(Debug)]
pub struct SimulationSetup {
    pub graph: SchedulingGraph,
    pub jobs: Vec<JobId>,
}

impl TryFrom<&SchedulingGraphDto> for SchedulerConfig {
    type Error = ConversionError;

    fn try_from(dto: &SchedulingGraphDto) -> Result<Self, Self::Error> {
        let learning = match &dto.learning {
            Some(l) => LearningParameters::new(l.alpha, l.gamma, l.epsilon)?,
            None => LearningParameters::default(),
        };
        let execution_time_range = match &dto.execution_time_range {
            Some(r) => ExecutionTimeRange::new(r.min, r.max)?,
            None => ExecutionTimeRange::default(),
        };

        Ok(SchedulerConfig { learning, execution_time_range, migration_cost: dto.migration_cost.unwrap_or_default() })
    }
}

/// Unlike the permissive graph API, duplicate nodes and edges naming unknown
/// nodes are rejected here.
impl TryFrom<SchedulingGraphDto> for SimulationSetup {
    type Error = ConversionError;

    fn try_from(dto: SchedulingGraphDto) -> Result<Self, Self::Error> {
        let config = SchedulerConfig::try_from(&dto)?;

        let mut seen = HashSet::new();
        for node in &dto.nodes {
            if !seen.insert(node.id.as_str()) {
                return Err(ConversionError::DuplicateNode(node.id.clone()));
            }
        }
        for edge in &dto.edges {
            if let Some(missing) = [&edge.source, &edge.target].into_iter().find(|id| !seen.contains(id.as_str())) {
                return Err(ConversionError::UnknownNode {
                    source_node: edge.source.clone(),
                    target_node: edge.target.clone(),
                    missing: missing.clone(),
                });
            }
        }

        let mut graph = match dto.seed {
            Some(seed) => SchedulingGraph::seeded(config, seed),
            None => SchedulingGraph::new(config),
        };

        for node in &dto.nodes {
            graph.add_node(NodeId::new(node.id.as_str()), node.capacity);
        }
        for edge in &dto.edges {
            graph.add_edge(&NodeId::new(edge.source.as_str()), &NodeId::new(edge.target.as_str()));
        }

        let jobs: Vec<JobId> = match dto.jobs {
            Some(jobs) => jobs.into_iter().map(JobId::new).collect(),
            None => DEFAULT_JOBS.iter().map(|job| JobId::new(*job)).collect(),
        };

        log::info!("Built scheduling graph with {} node(s), {} edge(s) and {} job(s)", graph.len(), dto.edges.len(), jobs.len());

        Ok(SimulationSetup { graph, jobs })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scheduling_graph::config::MigrationCost;
    use crate::loader::parser::parse_json_str;

    fn setup_from(json: &str) -> Result<SimulationSetup, ConversionError> {
        let dto: SchedulingGraphDto = parse_json_str(json).unwrap();
        SimulationSetup::try_from(dto)
    }

    #[test]
    fn builds_graph_with_defaults() {
        let setup = setup_from(r#"{"nodes": [{"id": "N1", "capacity": 2}, {"id": "N2", "capacity": 1}], "edges": [{"source": "N1", "target": "N2"}]}"#).unwrap();

        assert_eq!(setup.graph.len(), 2);
        assert_eq!(setup.graph.neighbors(&NodeId::new("N2")), &[NodeId::new("N1")]);
        assert_eq!(setup.graph.config(), &SchedulerConfig::default());
        assert_eq!(setup.jobs.len(), DEFAULT_JOBS.len());
    }

    #[test]
    fn reads_optional_settings() {
        let setup = setup_from(
            r#"{
                "nodes": [{"id": "N1", "capacity": 1}],
                "learning": {"alpha": 0.5, "gamma": 0.0, "epsilon": 0.2},
                "executionTimeRange": {"min": 2.0, "max": 3.0},
                "migrationCost": "simulated",
                "seed": 17,
                "jobs": ["X", "Y"]
            }"#,
        )
        .unwrap();

        let config = setup.graph.config();
        assert_eq!(config.learning, LearningParameters::new(0.5, 0.0, 0.2).unwrap());
        assert_eq!(config.execution_time_range, ExecutionTimeRange::new(2.0, 3.0).unwrap());
        assert_eq!(config.migration_cost, MigrationCost::Simulated);
        assert_eq!(setup.jobs, vec![JobId::new("X"), JobId::new("Y")]);
    }

    #[test]
    fn rejects_duplicate_nodes() {
        let err = setup_from(r#"{"nodes": [{"id": "N1", "capacity": 1}, {"id": "N1", "capacity": 3}]}"#).unwrap_err();
        assert_eq!(err, ConversionError::DuplicateNode("N1".to_string()));
    }

    #[test]
    fn rejects_edges_to_unknown_nodes() {
        let err = setup_from(r#"{"nodes": [{"id": "N1", "capacity": 1}], "edges": [{"source": "N1", "target": "N9"}]}"#).unwrap_err();
        assert!(matches!(err, ConversionError::UnknownNode { ref missing, .. } if missing == "N9"));
    }

    #[test]
    fn rejects_invalid_learning_parameters() {
        let err = setup_from(r#"{"nodes": [], "learning": {"alpha": 2.0, "gamma": 0.9, "epsilon": 0.1}}"#).unwrap_err();
        assert!(matches!(err, ConversionError::InvalidLearningParameter { name: "alpha", .. }));
    }
}
