pub mod batch;
pub mod setup;
