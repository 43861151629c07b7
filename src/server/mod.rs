//! JSON API consumed by the kitchen UI.

pub mod router;
pub mod routes;

pub use router::{FridgeState, fridgescan_router};
