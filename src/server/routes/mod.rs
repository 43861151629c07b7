pub mod items;
pub mod recipes;
pub mod scan;

use serde::Serialize;

/// `{"id": ..}` reply for inserts.
#[derive(Debug, Serialize)]
pub struct Created {
    pub id: i64,
}
