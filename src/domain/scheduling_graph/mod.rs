pub mod config;
pub mod migration;
pub mod scheduling_graph;
pub mod shared;
