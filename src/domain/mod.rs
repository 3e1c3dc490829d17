pub mod agent;
pub mod node;
pub mod scheduling_graph;
pub mod simulator;
pub mod utils;
