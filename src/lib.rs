use std::path::Path;

use crate::api::scheduling_graph_dto::SchedulingGraphDto;
use crate::domain::simulator::setup::SimulationSetup;
use crate::error::Result;
use crate::loader::parser::parse_json_file;

pub mod api;
pub mod domain;
pub mod error;
pub mod loader;
pub mod logger;

pub use crate::domain::agent::learning_parameters::LearningParameters;
pub use crate::domain::agent::value_table::ValueTable;
pub use crate::domain::node::Node;
pub use crate::domain::scheduling_graph::config::{ExecutionTimeRange, MigrationCost, SchedulerConfig};
pub use crate::domain::scheduling_graph::migration::MigrationRecord;
pub use crate::domain::scheduling_graph::scheduling_graph::SchedulingGraph;
pub use crate::domain::scheduling_graph::shared::SharedSchedulingGraph;
pub use crate::domain::utils::id::{JobId, NodeId};

/// Loads a topology file and builds the graph and job batch it describes.
///
/// `seed` overrides the seed stored in the file, if any.
pub fn generate_scheduling_graph(file_path: impl AsRef<Path>, seed: Option<u64>) -> Result<SimulationSetup> {
    logger::init();
    let file_path = file_path.as_ref();

    let mut dto: SchedulingGraphDto = parse_json_file(file_path)?;
    log::info!("Topology file '{}' parsed successfully.", file_path.display());

    if seed.is_some() {
        dto.seed = seed;
    }

    let setup = SimulationSetup::try_from(dto)?;
    Ok(setup)
}
