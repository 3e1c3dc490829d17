use crate::domain::agent::value_table::ValueTable;
use crate::domain::node::Node;
use crate::domain::scheduling_graph::config::{MigrationCost, SchedulerConfig};
use crate::domain::scheduling_graph::migration::MigrationRecord;
use crate::domain::utils::id::{JobId, NodeId};
use crate::domain::utils::statistics::ANALYTICS_TARGET;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

/// Network of capacity-bounded nodes with a learned migration policy.
///
/// A submitted job lands on a uniformly random node. If that node is full the
/// job may migrate one hop to a neighbor with spare capacity, chosen by the
/// [`ValueTable`]. The graph owns the single random generator used for node
/// selection, execution-time simulation, exploration and tie-breaking.
#[derive(Debug)]
pub struct SchedulingGraph<R: Rng = StdRng> {
    config: SchedulerConfig,
    nodes: HashMap<NodeId, Node>,
    /// Creation order of `nodes`, used for iteration and random selection.
    node_order: Vec<NodeId>,
    adjacency: HashMap<NodeId, Vec<NodeId>>,
    value_table: ValueTable,
    migration_count: usize,
    migration_history: Vec<MigrationRecord>,
    rng: R,
}

impl SchedulingGraph<StdRng> {
    pub fn new(config: SchedulerConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    pub fn seeded(config: SchedulerConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SchedulingGraph<R> {
    pub fn with_rng(config: SchedulerConfig, rng: R) -> Self {
        Self {
            config,
            nodes: HashMap::new(),
            node_order: Vec::new(),
            adjacency: HashMap::new(),
            value_table: ValueTable::new(config.learning),
            migration_count: 0,
            migration_history: Vec::new(),
            rng,
        }
    }

    /// Creates a node with an empty neighbor list.
    ///
    /// Re-adding an existing id replaces the node, dropping its jobs, and
    /// clears its own neighbor list. Other nodes keep their edges to it.
    pub fn add_node(&mut self, id: NodeId, capacity: usize) {
        if self.nodes.contains_key(&id) {
            log::warn!("Node {} already exists and is replaced; its {} job(s) are dropped.", id, self.nodes[&id].jobs().len());
        } else {
            self.node_order.push(id.clone());
        }

        log::debug!("Adding node {} with capacity {}", id, capacity);
        self.nodes.insert(id.clone(), Node::new(capacity));
        self.adjacency.insert(id, Vec::new());
        self.sync_value_table();
    }

    /// Adds an undirected edge. Returns `false` without mutation if either
    /// endpoint is unknown. Parallel edges are kept.
    pub fn add_edge(&mut self, a: &NodeId, b: &NodeId) -> bool {
        if !self.nodes.contains_key(a) || !self.nodes.contains_key(b) {
            log::warn!("Edge {} -- {} rejected: unknown node", a, b);
            return false;
        }

        self.adjacency.entry(a.clone()).or_default().push(b.clone());
        self.adjacency.entry(b.clone()).or_default().push(a.clone());
        self.sync_value_table();
        true
    }

    /// Places `job` on a uniformly random node, migrating it if that node is full.
    ///
    /// Returns the node the job ended up on, or `None` if it could not be placed.
    pub fn submit_job(&mut self, job: JobId) -> Option<NodeId> {
        let Some(target) = self.node_order.choose(&mut self.rng).cloned() else {
            log::warn!("Job {} cannot be submitted: the graph has no nodes", job);
            return None;
        };

        self.assign_job(job, &target)
    }

    /// Places `job` on `node` with a freshly simulated execution time, or
    /// migrates it to a neighbor if `node` has no spare capacity.
    pub fn assign_job(&mut self, job: JobId, node: &NodeId) -> Option<NodeId> {
        let execution_time = self.simulate_execution_time();

        let Some(target) = self.nodes.get_mut(node) else {
            log::warn!("Job {} cannot be assigned to unknown node {}", job, node);
            return None;
        };

        if target.add_job(job.clone(), execution_time) {
            log::debug!("Job {} placed on {} (execution time {:.3})", job, node, execution_time);
            return Some(node.clone());
        }

        log::debug!("Node {} is full, migrating job {}", node, job);
        self.migrate(job, node, execution_time)
    }

    /// Moves `job` from the saturated `assigned_node` to one neighbor chosen by
    /// the value table, then feeds the reward back into the table.
    ///
    /// Returns `None` if no neighbor has spare capacity. There is no retry
    /// and no search beyond direct neighbors.
    pub fn migrate_job(&mut self, job: JobId, assigned_node: &NodeId) -> Option<NodeId> {
        let execution_time = self.simulate_execution_time();
        self.migrate(job, assigned_node, execution_time)
    }

    fn migrate(&mut self, job: JobId, assigned_node: &NodeId, simulated_time: f64) -> Option<NodeId> {
        let available_actions = self.available_neighbors(assigned_node);
        if available_actions.is_empty() {
            log::warn!("Job {} left unplaced: no neighbor of {} has spare capacity", job, assigned_node);
            return None;
        }

        let state = assigned_node.clone();
        let action = self.value_table.choose_action(&state, &available_actions, &mut self.rng)?;
        let next_state = action.clone();

        let destination = self.nodes.get_mut(&action)?;
        let execution_time = match self.config.migration_cost {
            // Looked up before the job is recorded at the destination.
            MigrationCost::RecordedAtDestination => destination.execution_time_of(&job),
            MigrationCost::Simulated => simulated_time,
        };

        let placed = destination.add_job(job.clone(), execution_time);
        let reward = if placed {
            self.migration_count += 1;
            self.migration_history.push(MigrationRecord::new(job.clone(), assigned_node.clone(), action.clone()));
            -execution_time
        } else {
            0.0
        };

        self.value_table.update(&state, &action, reward, &next_state);

        tracing::info!(
            target: ANALYTICS_TARGET,
            Job = %job,
            Source = %assigned_node,
            Destination = %action,
            Placed = placed,
            Reward = reward,
            Value = self.value_table.get(&state, &action),
            MigrationCount = self.migration_count,
        );

        placed.then_some(action)
    }

    /// Neighbors of `node` (with multiplicity) that can take another job.
    pub fn available_neighbors(&self, node: &NodeId) -> Vec<NodeId> {
        self.neighbors(node)
            .iter()
            .filter(|neighbor| self.nodes.get(*neighbor).is_some_and(|n| n.remaining_capacity() >= 1))
            .cloned()
            .collect()
    }

    pub fn neighbors(&self, node: &NodeId) -> &[NodeId] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = (&NodeId, &Node)> {
        self.node_order.iter().filter_map(|id| self.nodes.get(id).map(|node| (id, node)))
    }

    pub fn node_ids(&self) -> &[NodeId] {
        &self.node_order
    }

    pub fn len(&self) -> usize {
        self.node_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_order.is_empty()
    }

    pub fn migration_count(&self) -> usize {
        self.migration_count
    }

    pub fn migration_history(&self) -> &[MigrationRecord] {
        &self.migration_history
    }

    pub fn value_table(&self) -> &ValueTable {
        &self.value_table
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn log_summary(&self) {
        log::info!("--- Scheduling Graph Summary ---");
        log::info!("Nodes: {}, migrations: {}", self.len(), self.migration_count);

        for (id, node) in self.nodes() {
            log::info!("  - Node: {}, capacity {}, jobs {:?}", id, node.capacity(), node.jobs().iter().map(JobId::as_str).collect::<Vec<_>>());
            for job in node.jobs() {
                log::debug!("      * {}: {:.3}", job, node.execution_time_of(job));
            }
        }
        log::info!("--------------------------------");
    }

    fn simulate_execution_time(&mut self) -> f64 {
        let range = self.config.execution_time_range;
        self.rng.random_range(range.min()..range.max())
    }

    fn sync_value_table(&mut self) {
        self.value_table.sync_actions(self.node_order.iter().cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::agent::learning_parameters::LearningParameters;

    fn greedy_config() -> SchedulerConfig {
        SchedulerConfig { learning: LearningParameters::new(0.1, 0.9, 0.0).unwrap(), ..SchedulerConfig::default() }
    }

    fn graph_of(nodes: &[(&str, usize)], edges: &[(&str, &str)]) -> SchedulingGraph {
        let mut graph = SchedulingGraph::seeded(greedy_config(), 42);
        for (id, capacity) in nodes {
            graph.add_node(NodeId::new(*id), *capacity);
        }
        for (a, b) in edges {
            assert!(graph.add_edge(&NodeId::new(*a), &NodeId::new(*b)));
        }
        graph
    }

    #[test]
    fn add_edge_is_symmetric_and_keeps_duplicates() {
        let mut graph = graph_of(&[("A", 1), ("B", 1)], &[("A", "B")]);
        assert!(graph.add_edge(&NodeId::new("A"), &NodeId::new("B")));

        assert_eq!(graph.neighbors(&NodeId::new("A")), &[NodeId::new("B"), NodeId::new("B")]);
        assert_eq!(graph.neighbors(&NodeId::new("B")), &[NodeId::new("A"), NodeId::new("A")]);
    }

    #[test]
    fn add_edge_with_unknown_node_fails_without_mutation() {
        let mut graph = graph_of(&[("A", 1)], &[]);

        assert!(!graph.add_edge(&NodeId::new("A"), &NodeId::new("Z")));
        assert!(graph.neighbors(&NodeId::new("A")).is_empty());
        assert!(graph.neighbors(&NodeId::new("Z")).is_empty());
    }

    #[test]
    fn known_actions_follow_the_node_set() {
        let mut graph = graph_of(&[("A", 1), ("B", 1)], &[("A", "B")]);
        graph.add_node(NodeId::new("C"), 2);

        assert_eq!(graph.value_table().known_actions(), &[NodeId::new("A"), NodeId::new("B"), NodeId::new("C")]);
    }

    #[test]
    fn readding_a_node_overwrites_it() {
        let mut graph = graph_of(&[("A", 2), ("B", 1)], &[("A", "B")]);
        assert_eq!(graph.assign_job(JobId::new("J1"), &NodeId::new("A")), Some(NodeId::new("A")));

        graph.add_node(NodeId::new("A"), 5);

        let node = graph.node(&NodeId::new("A")).unwrap();
        assert_eq!(node.capacity(), 5);
        assert!(node.jobs().is_empty());
        assert!(graph.neighbors(&NodeId::new("A")).is_empty());
        assert_eq!(graph.neighbors(&NodeId::new("B")), &[NodeId::new("A")]);
        assert_eq!(graph.node_ids().len(), 2);
    }

    #[test]
    fn direct_placement_records_a_simulated_time() {
        let mut graph = graph_of(&[("A", 1)], &[]);

        assert_eq!(graph.submit_job(JobId::new("J1")), Some(NodeId::new("A")));

        let time = graph.node(&NodeId::new("A")).unwrap().execution_time_of(&JobId::new("J1"));
        assert!((1.0..10.0).contains(&time));
        assert_eq!(graph.migration_count(), 0);
        assert!(graph.migration_history().is_empty());
    }

    #[test]
    fn saturated_node_migrates_to_only_free_neighbor() {
        let mut graph = graph_of(&[("A", 1), ("B", 1)], &[("A", "B")]);
        let (a, b) = (NodeId::new("A"), NodeId::new("B"));

        assert_eq!(graph.assign_job(JobId::new("J1"), &a), Some(a.clone()));
        assert_eq!(graph.assign_job(JobId::new("J2"), &a), Some(b.clone()));

        assert_eq!(graph.migration_count(), 1);
        assert_eq!(graph.migration_history(), &[MigrationRecord::new(JobId::new("J2"), a.clone(), b.clone())]);
        // Recorded cost at the destination is the pre-placement lookup.
        assert_eq!(graph.node(&b).unwrap().execution_time_of(&JobId::new("J2")), 0.0);
        assert_eq!(graph.value_table().get(&a, &b), 0.0);
    }

    #[test]
    fn migration_reward_is_zero_with_recorded_cost() {
        let mut graph = graph_of(&[("A", 1), ("B", 2)], &[("A", "B")]);
        let (a, b) = (NodeId::new("A"), NodeId::new("B"));

        graph.assign_job(JobId::new("J1"), &a);
        graph.value_table.update(&b, &a, 5.0, &a);
        let q_ba = graph.value_table().get(&b, &a);

        assert_eq!(graph.assign_job(JobId::new("J2"), &a), Some(b.clone()));

        // Q(A, B) = 0 + 0.1 * (0 + 0.9 * max(Q(B, A), Q(B, B)) - 0)
        let expected = 0.1 * (0.0 + 0.9 * q_ba);
        assert!((graph.value_table().get(&a, &b) - expected).abs() < 1e-12);
    }

    #[test]
    fn simulated_cost_penalizes_migrations() {
        let config = SchedulerConfig { migration_cost: MigrationCost::Simulated, ..greedy_config() };
        let mut graph = SchedulingGraph::seeded(config, 9);
        let (a, b) = (NodeId::new("A"), NodeId::new("B"));
        graph.add_node(a.clone(), 1);
        graph.add_node(b.clone(), 1);
        graph.add_edge(&a, &b);

        graph.assign_job(JobId::new("J1"), &a);
        assert_eq!(graph.assign_job(JobId::new("J2"), &a), Some(b.clone()));

        let time = graph.node(&b).unwrap().execution_time_of(&JobId::new("J2"));
        assert!((1.0..10.0).contains(&time));
        assert!((graph.value_table().get(&a, &b) - 0.1 * -time).abs() < 1e-12);
    }

    #[test]
    fn migration_without_free_neighbor_leaves_job_unplaced() {
        let mut graph = graph_of(&[("A", 1), ("B", 1)], &[]);
        let (a, b) = (NodeId::new("A"), NodeId::new("B"));
        graph.assign_job(JobId::new("J1"), &a);
        graph.assign_job(JobId::new("J2"), &b);

        assert_eq!(graph.submit_job(JobId::new("J3")), None);
        assert_eq!(graph.migrate_job(JobId::new("J3"), &a), None);
        assert_eq!(graph.migration_count(), 0);
        assert!(graph.value_table().is_empty());
    }

    #[test]
    fn full_neighbors_are_not_candidates() {
        let mut graph = graph_of(&[("A", 1), ("B", 1), ("C", 1)], &[("A", "B"), ("A", "C")]);
        let (a, b, c) = (NodeId::new("A"), NodeId::new("B"), NodeId::new("C"));
        graph.assign_job(JobId::new("J1"), &a);
        graph.assign_job(JobId::new("J2"), &b);

        assert_eq!(graph.available_neighbors(&a), vec![c.clone()]);
        assert_eq!(graph.migrate_job(JobId::new("J3"), &a), Some(c));
    }

    #[test]
    fn empty_graph_places_nothing() {
        let mut graph: SchedulingGraph = SchedulingGraph::seeded(SchedulerConfig::default(), 1);
        assert_eq!(graph.submit_job(JobId::new("J1")), None);
    }
}
