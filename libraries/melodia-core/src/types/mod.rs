//! Wire types for the Melodia backend API.

mod admin;
mod envelope;
mod favorite;
mod ids;
mod track;
mod user;

pub use admin::{DashboardStats, HealthStatus};
pub use envelope::{ApiErrorBody, ApiResponse};
pub use favorite::Favorite;
pub use ids::{TrackId, UserId};
pub use track::{NewTrack, Track};
pub use user::{Role, User};
