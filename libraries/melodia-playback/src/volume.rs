//! Volume control
//!
//! Volume is a linear level in [0.0, 1.0] handed to the media output as-is.
//! Mute is a separate flag so unmuting restores the previous level.

/// Volume controller
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    /// Volume level (0.0-1.0)
    level: f32,

    /// Mute state (preserves volume level)
    muted: bool,
}

impl Volume {
    /// Create new volume controller
    ///
    /// # Arguments
    /// * `level` - Initial volume, clamped into [0.0, 1.0] (NaN reads as 0.0)
    pub fn new(level: f32) -> Self {
        Self {
            level: clamp_level(level),
            muted: false,
        }
    }

    /// Set volume level. Mute state is untouched.
    pub fn set_level(&mut self, level: f32) {
        self.level = clamp_level(level);
    }

    /// Get current volume level (0.0-1.0)
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }
}

/// Clamp into [0.0, 1.0]; NaN becomes 0.0.
pub fn clamp_level(level: f32) -> f32 {
    if level.is_nan() {
        0.0
    } else {
        level.clamp(0.0, 1.0)
    }
}
