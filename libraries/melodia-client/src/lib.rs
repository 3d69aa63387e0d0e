//! Melodia Client
//!
//! HTTP client library and auth session store for the Melodia streaming API.
//!
//! # Features
//!
//! - **Transport**: bearer-token requests with uniform non-2xx error mapping
//! - **Authentication**: login, registration, logout, session restore
//! - **Catalogue**: list, search, create, delete and upload tracks
//! - **Favorites**: per-user marks with a check-then-act toggle
//! - **Admin**: dashboard, user management, cache and rate-limit tooling
//!
//! # Example
//!
//! ```ignore
//! use melodia_client::{ClientConfig, FileTokenStore, MusicClient, SessionStore};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::load(None)?;
//!     let tokens = Arc::new(FileTokenStore::new(config.resolved_token_path()));
//!     let client = MusicClient::new(&config, tokens)?;
//!
//!     let session = SessionStore::new(client.clone());
//!     if session.check_session().await.is_none() {
//!         session.login("alice", "secret").await?;
//!     }
//!
//!     for track in client.songs().popular().await? {
//!         println!("{} - {}", track.artist, track.title);
//!     }
//!     Ok(())
//! }
//! ```

mod admin;
mod auth;
pub mod claims;
mod client;
mod config;
mod error;
mod favorites;
mod session;
mod songs;
mod token;
mod types;
mod users;

// Re-export main types
pub use client::MusicClient;
pub use config::ClientConfig;
pub use error::{AuthError, ClientError, HttpError, Result};
pub use session::{SessionState, SessionStore};
pub use token::{FileTokenStore, MemoryTokenStore, TokenStore, TOKEN_KEY};
pub use types::{LoginResponse, UploadMetadata};

pub use claims::decode_roles;

// Re-export sub-clients for direct use if needed
pub use admin::AdminClient;
pub use auth::AuthClient;
pub use favorites::FavoritesClient;
pub use songs::SongsClient;
pub use users::UserClient;
