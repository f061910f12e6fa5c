use crate::database::album::{Album, AlbumSettings};
use serde::{Deserialize, Serialize};

// --- Request Payloads ---

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlbumRequest {
    pub name: String,
    /// Appended after the existing siblings when omitted.
    pub position: Option<i64>,
    pub parent_id: Option<i64>,
}

// --- Response Payloads ---

/// An album with its settings, media count and nested children.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AlbumNode {
    #[serde(flatten)]
    pub album: Album,
    pub settings: Option<AlbumSettings>,
    pub media_count: usize,
    pub children: Vec<AlbumNode>,
}
