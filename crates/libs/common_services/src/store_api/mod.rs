//! Calls to the remote StoreApi service.

mod auth;
mod client;
mod error;
mod gateway;

pub use auth::*;
pub use client::*;
pub use error::*;
pub use gateway::*;
