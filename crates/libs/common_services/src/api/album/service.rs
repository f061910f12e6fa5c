use crate::api::album::error::AlbumError;
use crate::api::album::interfaces::{AlbumNode, CreateAlbumRequest};
use crate::database::album::{Album, AlbumSettings, NewAlbumSettings};
use crate::database::album_store::AlbumStore;
use crate::database::begin_write;
use crate::database::media::Media;
use crate::database::media_store::MediaStore;
use app_state::UNSORTED_ALBUM_ID;
use sqlx::{Executor, Sqlite, SqliteConnection, SqlitePool};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, instrument};

const MAX_NAME_LENGTH: usize = 255;

/// Fetches an album or fails with `NotFound`.
async fn find_album(
    executor: impl Executor<'_, Database = Sqlite>,
    album_id: i64,
) -> Result<Album, AlbumError> {
    AlbumStore::find_by_id(executor, album_id)
        .await?
        .ok_or(AlbumError::album_not_found(album_id))
}

fn validate_name(name: &str) -> Result<&str, AlbumError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AlbumError::BadRequest("Album name cannot be empty".to_string()));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(AlbumError::BadRequest(format!(
            "Album name is longer than {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(name)
}

fn validate_settings(settings: &NewAlbumSettings) -> Result<(), AlbumError> {
    for (field, quality) in [
        ("thumbnailQuality", settings.thumbnail_quality),
        ("thumbnailHighDpiQuality", settings.thumbnail_high_dpi_quality),
    ] {
        if !(1..=100).contains(&quality) {
            return Err(AlbumError::BadRequest(format!(
                "{field} must be between 1 and 100, got {quality}"
            )));
        }
    }
    Ok(())
}

/// Ids of `root_id` and every album below it, parents before children.
async fn collect_subtree(
    conn: &mut SqliteConnection,
    root_id: i64,
) -> Result<Vec<i64>, AlbumError> {
    let mut order = vec![root_id];
    let mut seen = HashSet::from([root_id]);
    let mut cursor = 0;
    while cursor < order.len() {
        let parent_id = order[cursor];
        cursor += 1;
        for child_id in AlbumStore::list_child_ids(&mut *conn, parent_id).await? {
            if seen.insert(child_id) {
                order.push(child_id);
            }
        }
    }
    Ok(order)
}

//================================================================================
// Album Tree
//================================================================================

/// Creates an album. With a parent, the album is appended to the parent's children
/// in position order; without a position it goes after the current last sibling.
#[instrument(skip(pool))]
pub async fn create_album(
    pool: &SqlitePool,
    request: &CreateAlbumRequest,
) -> Result<Album, AlbumError> {
    let name = validate_name(&request.name)?;
    let mut tx = begin_write(pool).await?;

    if let Some(parent_id) = request.parent_id {
        find_album(&mut *tx, parent_id).await?;
    }
    let position = match request.position {
        Some(position) => position,
        None => AlbumStore::next_position(&mut *tx, request.parent_id).await?,
    };
    let album = AlbumStore::insert(&mut *tx, name, request.parent_id, position).await?;

    tx.commit().await?;
    info!(album_id = album.id, "Created album {:?}", album.name);

    Ok(album)
}

#[instrument(skip(pool))]
pub async fn get_album(pool: &SqlitePool, album_id: i64) -> Result<Album, AlbumError> {
    find_album(pool, album_id).await
}

/// Direct children of an album, or the root albums for `None`.
/// Ordered by position, ties in the order the albums were attached.
#[instrument(skip(pool))]
pub async fn get_children(
    pool: &SqlitePool,
    album_id: Option<i64>,
) -> Result<Vec<Album>, AlbumError> {
    if let Some(album_id) = album_id {
        find_album(pool, album_id).await?;
    }
    Ok(AlbumStore::list_children(pool, album_id).await?)
}

/// Moves an album below `parent_id`, or to the root for `None`.
/// Fails with `Cycle` if the new parent is the album itself or lies below it.
#[instrument(skip(pool))]
pub async fn set_parent(
    pool: &SqlitePool,
    album_id: i64,
    parent_id: Option<i64>,
) -> Result<Album, AlbumError> {
    if album_id == UNSORTED_ALBUM_ID && parent_id.is_some() {
        return Err(AlbumError::SentinelAlbum);
    }

    let mut tx = begin_write(pool).await?;
    let album = find_album(&mut *tx, album_id).await?;

    if let Some(parent_id) = parent_id {
        find_album(&mut *tx, parent_id).await?;
        let lineage = AlbumStore::list_lineage_ids(&mut *tx, parent_id).await?;
        if lineage.contains(&album_id) {
            return Err(AlbumError::Cycle {
                album_id,
                parent_id,
            });
        }
    }

    if album.parent_id == parent_id {
        debug!("Album {} already has parent {:?}", album_id, parent_id);
        return Ok(album);
    }

    let album = AlbumStore::update_parent(&mut *tx, album_id, parent_id).await?;
    tx.commit().await?;
    info!(album_id, ?parent_id, "Moved album");

    Ok(album)
}

#[instrument(skip(pool))]
pub async fn rename_album(
    pool: &SqlitePool,
    album_id: i64,
    name: &str,
) -> Result<Album, AlbumError> {
    let name = validate_name(name)?;
    AlbumStore::update_name(pool, album_id, name)
        .await?
        .ok_or(AlbumError::album_not_found(album_id))
}

#[instrument(skip(pool))]
pub async fn set_position(
    pool: &SqlitePool,
    album_id: i64,
    position: i64,
) -> Result<Album, AlbumError> {
    AlbumStore::update_position(pool, album_id, position)
        .await?
        .ok_or(AlbumError::album_not_found(album_id))
}

/// Removes an album together with every album below it.
///
/// In one transaction, for each removed album (deepest first) its media is moved to
/// the unsorted album, its settings are deleted and then the row itself. If any
/// statement fails nothing is changed. Returns the number of media items moved.
#[instrument(skip(pool))]
pub async fn remove_album(pool: &SqlitePool, album_id: i64) -> Result<u64, AlbumError> {
    if album_id == UNSORTED_ALBUM_ID {
        return Err(AlbumError::SentinelAlbum);
    }

    let mut tx = begin_write(pool).await?;
    find_album(&mut *tx, album_id).await?;

    let subtree = collect_subtree(&mut tx, album_id).await?;
    let mut reassigned = 0;
    for id in subtree.iter().rev().copied() {
        let moved = AlbumStore::reassign_media(&mut *tx, id, UNSORTED_ALBUM_ID).await?;
        debug!("Moved {} media items from album {} to unsorted", moved, id);
        reassigned += moved;
        AlbumStore::delete_settings(&mut *tx, id).await?;
        AlbumStore::delete(&mut *tx, id).await?;
    }

    tx.commit().await?;
    info!(
        album_id,
        removed_albums = subtree.len(),
        reassigned,
        "Removed album"
    );

    Ok(reassigned)
}

/// The full tree below `album_id` (or every root album for `None`), with settings
/// and media counts.
#[instrument(skip(pool))]
pub async fn get_tree(
    pool: &SqlitePool,
    album_id: Option<i64>,
) -> Result<Vec<AlbumNode>, AlbumError> {
    if let Some(album_id) = album_id {
        find_album(pool, album_id).await?;
    }

    let albums = AlbumStore::list_all(pool).await?;
    let mut settings: HashMap<i64, AlbumSettings> = AlbumStore::list_all_settings(pool)
        .await?
        .into_iter()
        .map(|s| (s.album_id, s))
        .collect();
    let media_counts: HashMap<i64, i64> = AlbumStore::count_media_per_album(pool)
        .await?
        .into_iter()
        .collect();

    // `list_all` is already in sibling order, so grouping keeps it.
    let mut by_parent: HashMap<Option<i64>, Vec<Album>> = HashMap::new();
    for album in albums {
        by_parent.entry(album.parent_id).or_default().push(album);
    }

    fn build(
        parent_id: Option<i64>,
        by_parent: &mut HashMap<Option<i64>, Vec<Album>>,
        settings: &mut HashMap<i64, AlbumSettings>,
        media_counts: &HashMap<i64, i64>,
    ) -> Vec<AlbumNode> {
        let children = by_parent.remove(&parent_id).unwrap_or_default();
        children
            .into_iter()
            .map(|album| {
                let id = album.id;
                AlbumNode {
                    settings: settings.remove(&id),
                    media_count: media_counts
                        .get(&id)
                        .map_or(0, |count| usize::try_from(*count).unwrap_or(0)),
                    children: build(Some(id), by_parent, settings, media_counts),
                    album,
                }
            })
            .collect()
    }

    Ok(build(
        album_id,
        &mut by_parent,
        &mut settings,
        &media_counts,
    ))
}

//================================================================================
// Album Settings
//================================================================================

/// Attaches settings to an album, replacing and deleting any previous settings.
#[instrument(skip(pool))]
pub async fn set_settings(
    pool: &SqlitePool,
    album_id: i64,
    settings: &NewAlbumSettings,
) -> Result<AlbumSettings, AlbumError> {
    validate_settings(settings)?;
    let mut tx = begin_write(pool).await?;
    find_album(&mut *tx, album_id).await?;

    let replaced = AlbumStore::delete_settings(&mut *tx, album_id).await?;
    let settings = AlbumStore::insert_settings(&mut *tx, album_id, settings).await?;

    tx.commit().await?;
    debug!(album_id, replaced, "Stored album settings");

    Ok(settings)
}

#[instrument(skip(pool))]
pub async fn get_settings(
    pool: &SqlitePool,
    album_id: i64,
) -> Result<Option<AlbumSettings>, AlbumError> {
    find_album(pool, album_id).await?;
    Ok(AlbumStore::find_settings(pool, album_id).await?)
}

//================================================================================
// Album Media
//================================================================================

#[instrument(skip(pool))]
pub async fn get_media(pool: &SqlitePool, album_id: i64) -> Result<Vec<Media>, AlbumError> {
    find_album(pool, album_id).await?;
    Ok(MediaStore::list_by_album(pool, album_id).await?)
}

#[instrument(skip(pool))]
pub async fn add_media(
    pool: &SqlitePool,
    album_id: i64,
    name: &str,
    path: &str,
) -> Result<Media, AlbumError> {
    let mut tx = begin_write(pool).await?;
    find_album(&mut *tx, album_id).await?;
    let media = MediaStore::insert(&mut *tx, album_id, name, path).await?;
    tx.commit().await?;
    Ok(media)
}

/// Assigns a media item to another album.
#[instrument(skip(pool))]
pub async fn move_media(
    pool: &SqlitePool,
    media_id: i64,
    album_id: i64,
) -> Result<Media, AlbumError> {
    let mut tx = begin_write(pool).await?;
    find_album(&mut *tx, album_id).await?;
    let media = MediaStore::update_album(&mut *tx, media_id, album_id)
        .await?
        .ok_or(AlbumError::media_not_found(media_id))?;
    tx.commit().await?;
    Ok(media)
}
