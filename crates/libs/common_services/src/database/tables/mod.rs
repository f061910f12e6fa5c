pub mod album;
pub mod media;
