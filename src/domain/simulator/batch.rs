use crate::domain::scheduling_graph::migration::MigrationRecord;
use crate::domain::scheduling_graph::scheduling_graph::SchedulingGraph;
use crate::domain::utils::id::{JobId, NodeId};
use rand::Rng;
use serde::Serialize;

/// Demo batch submitted when no job list is configured.
pub const DEFAULT_JOBS: [&str; 8] = ["J14", "J1", "J2", "J3", "J4", "J5", "J13", "J8"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobPlacement {
    pub job: JobId,
    pub node: Option<NodeId>,
}

/// Outcome of one batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub placements: Vec<JobPlacement>,
    pub unprocessed: Vec<JobId>,
    pub migration_count: usize,
    pub migration_history: Vec<MigrationRecord>,
    pub node_jobs: Vec<NodeJobs>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeJobs {
    pub node: NodeId,
    pub jobs: Vec<(JobId, f64)>,
}

/// Submits `jobs` strictly in order and collects what happened to each.
pub fn run_batch<R: Rng>(graph: &mut SchedulingGraph<R>, jobs: &[JobId]) -> BatchReport {
    let mut placements = Vec::with_capacity(jobs.len());
    let mut unprocessed = Vec::new();

    for job in jobs {
        let node = graph.submit_job(job.clone());
        if node.is_none() {
            unprocessed.push(job.clone());
        }
        placements.push(JobPlacement { job: job.clone(), node });
    }

    if !unprocessed.is_empty() {
        log::warn!("{} job(s) could not be processed", unprocessed.len());
    }

    let node_jobs = graph
        .nodes()
        .map(|(id, node)| NodeJobs {
            node: id.clone(),
            jobs: node.jobs().iter().map(|job| (job.clone(), node.execution_time_of(job))).collect(),
        })
        .collect();

    BatchReport {
        placements,
        unprocessed,
        migration_count: graph.migration_count(),
        migration_history: graph.migration_history().to_vec(),
        node_jobs,
    }
}

impl BatchReport {
    pub fn migration_info(&self) -> String {
        self.migration_history.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")
    }

    pub fn job_info(&self) -> String {
        self.node_jobs
            .iter()
            .map(|entry| {
                let jobs: Vec<&str> = entry.jobs.iter().map(|(job, _)| job.as_str()).collect();
                let times: Vec<String> = entry.jobs.iter().map(|(job, time)| format!("{}: {:.3}", job, time)).collect();
                format!("Node: {}, Jobs: {:?}, Execution Times: {{{}}}\n", entry.node, jobs, times.join(", "))
            })
            .collect()
    }

    pub fn summary(&self) -> String {
        format!("Number of times migrations: {}", self.migration_count)
    }
}
