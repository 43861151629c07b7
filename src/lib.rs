pub mod config;
pub mod db;
pub mod error;
pub mod ingest;
pub mod providers;
pub mod recipes;
pub mod server;
pub mod staging;

pub(crate) mod utils;

pub use error::FridgeError;
pub use ingest::{IngestOutcome, IngestionPipeline};
pub use staging::StagingWorkflow;
