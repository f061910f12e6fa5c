use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A media asset. Belongs to exactly one album at a time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: i64,
    pub album_id: i64,
    pub name: String,
    pub path: String,
}
