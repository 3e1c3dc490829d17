use crate::domain::utils::id::JobId;
use serde::Serialize;
use std::collections::HashMap;

/// A capacity-bounded compute node.
///
/// Jobs are kept in insertion order. Duplicate job ids are not rejected; a
/// repeated job takes another capacity unit and overwrites its recorded
/// execution time.
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    capacity: usize,
    jobs: Vec<JobId>,
    execution_times: HashMap<JobId, f64>,
}

impl Node {
    pub fn new(capacity: usize) -> Self {
        Self { capacity, jobs: Vec::new(), execution_times: HashMap::new() }
    }

    /// Places `job` on this node if at least one capacity unit is free.
    /// Returns `false` without touching any state otherwise.
    pub fn add_job(&mut self, job: JobId, execution_time: f64) -> bool {
        if self.remaining_capacity() < 1 {
            return false;
        }

        self.execution_times.insert(job.clone(), execution_time);
        self.jobs.push(job);
        true
    }

    pub fn remaining_capacity(&self) -> usize {
        self.capacity.saturating_sub(self.jobs.len())
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn jobs(&self) -> &[JobId] {
        &self.jobs
    }

    /// Recorded execution time of `job`, `0.0` if the job is not on this node.
    pub fn execution_time_of(&self, job: &JobId) -> f64 {
        self.execution_times.get(job).copied().unwrap_or(0.0)
    }

    pub fn execution_times(&self) -> &HashMap<JobId, f64> {
        &self.execution_times
    }
}
