pub mod album_store;
pub mod media_store;
