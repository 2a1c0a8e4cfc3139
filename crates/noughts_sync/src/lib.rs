//! Optional, best-effort remote persistence for noughts games.
//!
//! # Architecture
//!
//! - **Config**: [`SyncConfig`] from TOML, environment and overrides
//! - **Client**: [`GameApiClient`], a typed wrapper over the two endpoints
//! - **Remote**: [`RemoteSync`], which swallows every failure into a
//!   [`Connectivity`] flag
//! - **Saver**: a background task that debounces state changes into single
//!   saves, owned by a [`SaverHandle`]

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod config;
mod connectivity;
mod error;
mod remote;
mod saver;

pub use client::GameApiClient;
pub use config::{ConfigError, ENV_API_URL, ENV_DEBOUNCE_MS, ENV_TIMEOUT_SECS, SyncConfig};
pub use connectivity::Connectivity;
pub use error::SyncError;
pub use remote::RemoteSync;
pub use saver::SaverHandle;
