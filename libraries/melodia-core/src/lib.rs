//! Melodia Core
//!
//! Domain types shared by the Melodia client crates.
//!
//! The backend owns all persistence; these types are the wire shapes the
//! client reads and writes, with the normalisation the backend's mixed
//! history requires (numeric or string identifiers, optional metadata).
//!
//! # Example
//!
//! ```rust
//! use melodia_core::types::{Track, TrackId};
//!
//! let track: Track = serde_json::from_str(
//!     r#"{"id": 42, "title": "Song", "artist": "Artist", "fileUrl": "/media/42.mp3"}"#,
//! ).unwrap();
//!
//! assert_eq!(track.id, TrackId::new("42"));
//! assert_eq!(track.play_count, 0);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod types;

pub use types::{
    ApiErrorBody, ApiResponse, DashboardStats, Favorite, HealthStatus, NewTrack, Role, Track,
    TrackId, User, UserId,
};
