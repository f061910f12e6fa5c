/// Id of the well-known album that receives the media of removed albums.
/// The initial migration creates it; every deployment must keep it.
pub const UNSORTED_ALBUM_ID: i64 = -10;

/// Settings file read by [`crate::load_app_settings`].
pub const DEFAULT_SETTINGS_PATH: &str = "config/settings.yaml";

/// Environment prefix for settings overrides, e.g. `APP__DATABASE__URL`.
pub const ENV_PREFIX: &str = "APP";
