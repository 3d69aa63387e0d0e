//! Error types for playback management

use thiserror::Error;

/// Failures reported by a [`MediaOutput`](crate::MediaOutput).
///
/// The controller never propagates these; they end up in the playback
/// state as the last error message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaError {
    /// The media could not be fetched or opened
    #[error("Failed to load media: {0}")]
    Load(String),

    /// The media format cannot be played by this output
    #[error("Unsupported media: {0}")]
    Unsupported(String),

    /// The output device rejected a transport command
    #[error("Media output error: {0}")]
    Output(String),
}

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Queue is empty
    #[error("Queue is empty")]
    QueueEmpty,

    /// Index out of bounds
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(usize),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
