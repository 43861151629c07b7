//! Photo ingestion: one captured photo in, zero or more draft items out.

mod parse;
mod pipeline;

pub use parse::{
    DEFAULT_QUANTITY, DetectedItem, coerce_quantity, parse_vision_reply, strip_code_fence,
};
pub use pipeline::{IngestOutcome, IngestionPipeline};
