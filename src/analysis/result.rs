//! Analysis result types

use serde::{Deserialize, Serialize};

/// Per-frame analysis qualities
///
/// All fields are clamped to [0.0, 1.0] at their computation boundary, so
/// downstream consumers never observe an out-of-range value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameAnalysis {
    /// Normalized loudness level (0.0 = at or below noise floor, 1.0 = saturated)
    pub level: f32,

    /// Closeness of the detected pitch to the nearest semitone center
    /// (1.0 = on center, 0.0 = a quarter-tone or more off, or no pitch)
    pub pitch_quality: f32,

    /// Scale membership of the detected pitch class
    /// (1.0 = in scale, soft penalty otherwise, 0.0 = no pitch)
    pub key_quality: f32,
}

impl FrameAnalysis {
    /// Analysis of a frame with no usable signal: everything zero
    pub fn silent() -> Self {
        Self {
            level: 0.0,
            pitch_quality: 0.0,
            key_quality: 0.0,
        }
    }
}

/// Everything the engine emits to display collaborators on one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickOutput {
    /// Normalized loudness level (0.0-1.0)
    pub level: f32,

    /// Pitch accuracy quality (0.0-1.0)
    pub pitch_quality: f32,

    /// Key alignment quality (0.0-1.0)
    pub key_quality: f32,

    /// Combined suppression signal for the guide vocal (0.0-1.0)
    pub duck_strength: f32,

    /// Guide-vocal volume selected by the mode policy (0.0-1.0)
    pub target_volume: f32,

    /// Exponentially smoothed live score (tracks 0-100)
    pub running_score: f32,

    /// Cumulative score for the current run, non-decreasing
    pub session_score: f32,
}
