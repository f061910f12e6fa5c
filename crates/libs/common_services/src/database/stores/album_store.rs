use crate::database::album::{Album, AlbumSettings, NewAlbumSettings};
use crate::database::DbError;
use sqlx::{Executor, Sqlite};

pub struct AlbumStore;

impl AlbumStore {
    //================================================================================
    // Core Album Management
    //================================================================================

    /// Inserts a new album. The id and the insertion sequence are assigned by the database.
    pub async fn insert(
        executor: impl Executor<'_, Database = Sqlite>,
        name: &str,
        parent_id: Option<i64>,
        position: i64,
    ) -> Result<Album, DbError> {
        Ok(sqlx::query_as::<_, Album>(
            r#"
            INSERT INTO album (name, parent_id, position, link_seq)
            VALUES (?1, ?2, ?3, (SELECT COALESCE(MAX(link_seq), 0) + 1 FROM album))
            RETURNING id, name, parent_id, position, link_seq
            "#,
        )
        .bind(name)
        .bind(parent_id)
        .bind(position)
        .fetch_one(executor)
        .await?)
    }

    /// Retrieves a single album by its ID.
    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Sqlite>,
        album_id: i64,
    ) -> Result<Option<Album>, DbError> {
        Ok(sqlx::query_as::<_, Album>(
            "SELECT id, name, parent_id, position, link_seq FROM album WHERE id = ?1",
        )
        .bind(album_id)
        .fetch_optional(executor)
        .await?)
    }

    /// Position that appends a new album after its current siblings.
    pub async fn next_position(
        executor: impl Executor<'_, Database = Sqlite>,
        parent_id: Option<i64>,
    ) -> Result<i64, DbError> {
        Ok(sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(MAX(position) + 1, 0) FROM album WHERE parent_id IS ?1",
        )
        .bind(parent_id)
        .fetch_one(executor)
        .await?)
    }

    /// Children of `parent_id` (root albums for `None`), ordered by position then insertion.
    pub async fn list_children(
        executor: impl Executor<'_, Database = Sqlite>,
        parent_id: Option<i64>,
    ) -> Result<Vec<Album>, DbError> {
        Ok(sqlx::query_as::<_, Album>(
            r#"
            SELECT id, name, parent_id, position, link_seq
            FROM album
            WHERE parent_id IS ?1
            ORDER BY position, link_seq
            "#,
        )
        .bind(parent_id)
        .fetch_all(executor)
        .await?)
    }

    /// Every album, in sibling order.
    pub async fn list_all(
        executor: impl Executor<'_, Database = Sqlite>,
    ) -> Result<Vec<Album>, DbError> {
        Ok(sqlx::query_as::<_, Album>(
            r#"
            SELECT id, name, parent_id, position, link_seq
            FROM album
            ORDER BY position, link_seq
            "#,
        )
        .fetch_all(executor)
        .await?)
    }

    pub async fn list_child_ids(
        executor: impl Executor<'_, Database = Sqlite>,
        parent_id: i64,
    ) -> Result<Vec<i64>, DbError> {
        Ok(
            sqlx::query_scalar::<_, i64>("SELECT id FROM album WHERE parent_id = ?1")
                .bind(parent_id)
                .fetch_all(executor)
                .await?,
        )
    }

    /// Ids of `album_id` and all of its ancestors, nearest first.
    /// Terminates even if the stored parent links contain a loop.
    pub async fn list_lineage_ids(
        executor: impl Executor<'_, Database = Sqlite>,
        album_id: i64,
    ) -> Result<Vec<i64>, DbError> {
        Ok(sqlx::query_scalar::<_, i64>(
            r#"
            WITH RECURSIVE lineage(id, parent_id) AS (
                SELECT id, parent_id FROM album WHERE id = ?1
                UNION
                SELECT a.id, a.parent_id
                FROM album a
                JOIN lineage l ON a.id = l.parent_id
            )
            SELECT id FROM lineage
            "#,
        )
        .bind(album_id)
        .fetch_all(executor)
        .await?)
    }

    /// Moves an album under a new parent and stamps a fresh insertion sequence.
    pub async fn update_parent(
        executor: impl Executor<'_, Database = Sqlite>,
        album_id: i64,
        parent_id: Option<i64>,
    ) -> Result<Album, DbError> {
        Ok(sqlx::query_as::<_, Album>(
            r#"
            UPDATE album
            SET parent_id = ?1,
                link_seq = (SELECT COALESCE(MAX(link_seq), 0) + 1 FROM album)
            WHERE id = ?2
            RETURNING id, name, parent_id, position, link_seq
            "#,
        )
        .bind(parent_id)
        .bind(album_id)
        .fetch_one(executor)
        .await?)
    }

    pub async fn update_name(
        executor: impl Executor<'_, Database = Sqlite>,
        album_id: i64,
        name: &str,
    ) -> Result<Option<Album>, DbError> {
        Ok(sqlx::query_as::<_, Album>(
            r#"
            UPDATE album SET name = ?1 WHERE id = ?2
            RETURNING id, name, parent_id, position, link_seq
            "#,
        )
        .bind(name)
        .bind(album_id)
        .fetch_optional(executor)
        .await?)
    }

    pub async fn update_position(
        executor: impl Executor<'_, Database = Sqlite>,
        album_id: i64,
        position: i64,
    ) -> Result<Option<Album>, DbError> {
        Ok(sqlx::query_as::<_, Album>(
            r#"
            UPDATE album SET position = ?1 WHERE id = ?2
            RETURNING id, name, parent_id, position, link_seq
            "#,
        )
        .bind(position)
        .bind(album_id)
        .fetch_optional(executor)
        .await?)
    }

    /// Deletes the album row. Callers must have moved its media and children away first.
    pub async fn delete(
        executor: impl Executor<'_, Database = Sqlite>,
        album_id: i64,
    ) -> Result<u64, DbError> {
        Ok(sqlx::query("DELETE FROM album WHERE id = ?1")
            .bind(album_id)
            .execute(executor)
            .await?
            .rows_affected())
    }

    //================================================================================
    // Album Media Management
    //================================================================================

    /// Points every media item of `from_album_id` at `to_album_id`.
    /// Returns the number of media rows changed, zero when the album was empty.
    pub async fn reassign_media(
        executor: impl Executor<'_, Database = Sqlite>,
        from_album_id: i64,
        to_album_id: i64,
    ) -> Result<u64, DbError> {
        Ok(
            sqlx::query("UPDATE media SET album_id = ?1 WHERE album_id = ?2")
                .bind(to_album_id)
                .bind(from_album_id)
                .execute(executor)
                .await?
                .rows_affected(),
        )
    }

    /// Number of media items per album, only for albums that have any.
    pub async fn count_media_per_album(
        executor: impl Executor<'_, Database = Sqlite>,
    ) -> Result<Vec<(i64, i64)>, DbError> {
        Ok(sqlx::query_as::<_, (i64, i64)>(
            "SELECT album_id, COUNT(*) FROM media GROUP BY album_id",
        )
        .fetch_all(executor)
        .await?)
    }

    //================================================================================
    // Album Settings Management
    //================================================================================

    pub async fn find_settings(
        executor: impl Executor<'_, Database = Sqlite>,
        album_id: i64,
    ) -> Result<Option<AlbumSettings>, DbError> {
        Ok(sqlx::query_as::<_, AlbumSettings>(
            r#"
            SELECT id, album_id, icon, create_thumbnails, thumbnail_size,
                   thumbnail_high_dpi, thumbnail_quality, thumbnail_high_dpi_quality
            FROM album_settings
            WHERE album_id = ?1
            "#,
        )
        .bind(album_id)
        .fetch_optional(executor)
        .await?)
    }

    pub async fn list_all_settings(
        executor: impl Executor<'_, Database = Sqlite>,
    ) -> Result<Vec<AlbumSettings>, DbError> {
        Ok(sqlx::query_as::<_, AlbumSettings>(
            r#"
            SELECT id, album_id, icon, create_thumbnails, thumbnail_size,
                   thumbnail_high_dpi, thumbnail_quality, thumbnail_high_dpi_quality
            FROM album_settings
            "#,
        )
        .fetch_all(executor)
        .await?)
    }

    pub async fn insert_settings(
        executor: impl Executor<'_, Database = Sqlite>,
        album_id: i64,
        settings: &NewAlbumSettings,
    ) -> Result<AlbumSettings, DbError> {
        Ok(sqlx::query_as::<_, AlbumSettings>(
            r#"
            INSERT INTO album_settings (album_id, icon, create_thumbnails, thumbnail_size,
                                        thumbnail_high_dpi, thumbnail_quality,
                                        thumbnail_high_dpi_quality)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            RETURNING id, album_id, icon, create_thumbnails, thumbnail_size,
                      thumbnail_high_dpi, thumbnail_quality, thumbnail_high_dpi_quality
            "#,
        )
        .bind(album_id)
        .bind(&settings.icon)
        .bind(settings.create_thumbnails)
        .bind(&settings.thumbnail_size)
        .bind(settings.thumbnail_high_dpi)
        .bind(settings.thumbnail_quality)
        .bind(settings.thumbnail_high_dpi_quality)
        .fetch_one(executor)
        .await?)
    }

    pub async fn delete_settings(
        executor: impl Executor<'_, Database = Sqlite>,
        album_id: i64,
    ) -> Result<u64, DbError> {
        Ok(sqlx::query("DELETE FROM album_settings WHERE album_id = ?1")
            .bind(album_id)
            .execute(executor)
            .await?
            .rows_affected())
    }
}
