mod fridge;
mod ingest;

pub use fridge::{ApiErrorBody, ApiErrorObject, FridgeError};
pub use ingest::IngestFailure;

pub trait IsRetryable {
    fn is_retryable(&self) -> bool;
}
