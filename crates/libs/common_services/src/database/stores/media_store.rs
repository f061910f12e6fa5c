use crate::database::media::Media;
use crate::database::DbError;
use sqlx::{Executor, Sqlite};

pub struct MediaStore;

impl MediaStore {
    pub async fn insert(
        executor: impl Executor<'_, Database = Sqlite>,
        album_id: i64,
        name: &str,
        path: &str,
    ) -> Result<Media, DbError> {
        Ok(sqlx::query_as::<_, Media>(
            r#"
            INSERT INTO media (album_id, name, path)
            VALUES (?1, ?2, ?3)
            RETURNING id, album_id, name, path
            "#,
        )
        .bind(album_id)
        .bind(name)
        .bind(path)
        .fetch_one(executor)
        .await?)
    }

    /// All media assigned to an album, oldest first.
    pub async fn list_by_album(
        executor: impl Executor<'_, Database = Sqlite>,
        album_id: i64,
    ) -> Result<Vec<Media>, DbError> {
        Ok(sqlx::query_as::<_, Media>(
            "SELECT id, album_id, name, path FROM media WHERE album_id = ?1 ORDER BY id",
        )
        .bind(album_id)
        .fetch_all(executor)
        .await?)
    }

    /// Assigns a media item to another album. `None` if the media item does not exist.
    pub async fn update_album(
        executor: impl Executor<'_, Database = Sqlite>,
        media_id: i64,
        album_id: i64,
    ) -> Result<Option<Media>, DbError> {
        Ok(sqlx::query_as::<_, Media>(
            r#"
            UPDATE media SET album_id = ?1 WHERE id = ?2
            RETURNING id, album_id, name, path
            "#,
        )
        .bind(album_id)
        .bind(media_id)
        .fetch_optional(executor)
        .await?)
    }
}
