pub mod image_lookup;
pub mod vision;

mod bootstrap;
mod http;
mod policy;

pub use bootstrap::Providers;
pub use image_lookup::{ImageLookup, ImageLookupClient};
pub use policy::{UPSTREAM_BODY_PREVIEW_CHARS, body_preview};
pub use vision::{ImagePayload, VisionClient, VisionService};

/// User-Agent sent to every upstream service.
pub const FRIDGESCAN_USER_AGENT: &str = concat!("fridgescan/", env!("CARGO_PKG_VERSION"));
