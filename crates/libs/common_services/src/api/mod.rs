pub mod album;
