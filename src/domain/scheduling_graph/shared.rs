use crate::domain::scheduling_graph::migration::MigrationRecord;
use crate::domain::scheduling_graph::scheduling_graph::SchedulingGraph;
use crate::domain::utils::id::{JobId, NodeId};
use rand::Rng;
use rand::rngs::StdRng;
use std::sync::{Arc, Mutex, MutexGuard};

/// Cloneable handle for callers on several threads.
///
/// One mutex guards the whole graph: a placement and the value update it
/// triggers always run under the same lock.
#[derive(Debug)]
pub struct SharedSchedulingGraph<R: Rng = StdRng> {
    inner: Arc<Mutex<SchedulingGraph<R>>>,
}

impl<R: Rng> Clone for SharedSchedulingGraph<R> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<R: Rng> SharedSchedulingGraph<R> {
    pub fn new(graph: SchedulingGraph<R>) -> Self {
        Self { inner: Arc::new(Mutex::new(graph)) }
    }

    /// Exclusive access for compound operations.
    pub fn lock(&self) -> MutexGuard<'_, SchedulingGraph<R>> {
        // Poisoned locks are recovered.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn add_node(&self, id: NodeId, capacity: usize) {
        self.lock().add_node(id, capacity);
    }

    pub fn add_edge(&self, a: &NodeId, b: &NodeId) -> bool {
        self.lock().add_edge(a, b)
    }

    pub fn submit_job(&self, job: JobId) -> Option<NodeId> {
        self.lock().submit_job(job)
    }

    pub fn migration_count(&self) -> usize {
        self.lock().migration_count()
    }

    pub fn migration_history(&self) -> Vec<MigrationRecord> {
        self.lock().migration_history().to_vec()
    }
}
