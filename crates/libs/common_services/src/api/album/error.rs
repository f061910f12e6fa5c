use crate::database::DbError;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum AlbumError {
    #[error(transparent)]
    Database(#[from] DbError),

    #[error("Not found: {entity} {id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Album {parent_id} is album {album_id} or one of its descendants")]
    Cycle { album_id: i64, parent_id: i64 },

    #[error("The unsorted album cannot be removed or moved")]
    SentinelAlbum,

    #[error("Bad Request: {0}")]
    BadRequest(String),
}

impl AlbumError {
    pub(crate) const fn album_not_found(id: i64) -> Self {
        Self::NotFound { entity: "album", id }
    }

    pub(crate) const fn media_not_found(id: i64) -> Self {
        Self::NotFound { entity: "media", id }
    }

    pub fn log(&self) {
        match self {
            Self::Database(e) => warn!("Database query failed: {}", e),
            Self::NotFound { entity, id } => warn!("Album -> {} not found: {}", entity, id),
            Self::Cycle { album_id, parent_id } => {
                warn!("Album -> Refusing to move {} below {}", album_id, parent_id);
            }
            Self::SentinelAlbum => warn!("Album -> Unsorted album is protected"),
            Self::BadRequest(message) => warn!("Album -> Bad Request: {}", message),
        }
    }
}

impl From<sqlx::Error> for AlbumError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(DbError::from(err))
    }
}
