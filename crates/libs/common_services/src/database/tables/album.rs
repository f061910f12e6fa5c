use bon::Builder;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const DEFAULT_ALBUM_ICON: &str = "sprite-blue-folder";

/// A node in the album tree.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: i64,
    pub name: String,
    pub parent_id: Option<i64>,
    /// Display order among siblings, ascending.
    pub position: i64,
    /// Insertion order into the parent's children. Breaks `position` ties.
    #[serde(skip)]
    pub link_seq: i64,
}

impl Album {
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Per-album configuration. At most one row per album.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AlbumSettings {
    pub id: i64,
    pub album_id: i64,
    pub icon: String,
    pub create_thumbnails: bool,
    /// `WIDTHxHEIGHT` entries separated by `;`, e.g. `200x200;600x600`.
    pub thumbnail_size: String,
    pub thumbnail_high_dpi: bool,
    pub thumbnail_quality: i64,
    pub thumbnail_high_dpi_quality: i64,
}

impl AlbumSettings {
    /// Parsed thumbnail sizes. Malformed entries are skipped.
    #[must_use]
    pub fn thumbnail_sizes(&self) -> Vec<(u32, u32)> {
        parse_thumbnail_sizes(&self.thumbnail_size)
    }
}

/// Values for a new settings record, see [`AlbumSettings`].
#[derive(Debug, Clone, Serialize, Deserialize, Builder, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewAlbumSettings {
    #[builder(into, default = DEFAULT_ALBUM_ICON.to_string())]
    pub icon: String,
    #[builder(default)]
    pub create_thumbnails: bool,
    #[builder(into, default)]
    pub thumbnail_size: String,
    #[builder(default)]
    pub thumbnail_high_dpi: bool,
    #[builder(default = 90)]
    pub thumbnail_quality: i64,
    #[builder(default = 70)]
    pub thumbnail_high_dpi_quality: i64,
}

impl From<AlbumSettings> for NewAlbumSettings {
    fn from(settings: AlbumSettings) -> Self {
        Self {
            icon: settings.icon,
            create_thumbnails: settings.create_thumbnails,
            thumbnail_size: settings.thumbnail_size,
            thumbnail_high_dpi: settings.thumbnail_high_dpi,
            thumbnail_quality: settings.thumbnail_quality,
            thumbnail_high_dpi_quality: settings.thumbnail_high_dpi_quality,
        }
    }
}

pub fn parse_thumbnail_sizes(raw: &str) -> Vec<(u32, u32)> {
    raw.split(';')
        .filter_map(|entry| {
            let (width, height) = entry.trim().split_once(['x', 'X'])?;
            Some((width.trim().parse().ok()?, height.trim().parse().ok()?))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_thumbnail_sizes() {
        assert_eq!(
            parse_thumbnail_sizes("200x200; 600X400;;bogus;1920x"),
            vec![(200, 200), (600, 400)]
        );
        assert!(parse_thumbnail_sizes("").is_empty());
    }

    #[test]
    fn new_settings_defaults() {
        let settings = NewAlbumSettings::builder().build();
        assert_eq!(settings.icon, DEFAULT_ALBUM_ICON);
        assert!(!settings.create_thumbnails);
        assert_eq!(settings.thumbnail_quality, 90);
        assert_eq!(settings.thumbnail_high_dpi_quality, 70);
    }
}
