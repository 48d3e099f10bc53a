//! Duck-strength computation
//!
//! Combines the three per-frame qualities into a single suppression signal
//! for the guide vocal. Composition is multiplicative so near-silence
//! collapses strength to ~0 regardless of pitch or key; the pitch and key
//! factors are compressed into [0.5, 1.0] so imperfect accuracy softens the
//! ducking driven by loudness but never zeroes it.

pub mod policy;

pub use policy::{target_volume, GuideMode};

use serde::{Deserialize, Serialize};

use crate::analysis::FrameAnalysis;

/// Per-quality weighting applied to the duck-strength inputs
///
/// Each weight lives in [0.0, 1.0] and is clamped on construction. Weights
/// are only consulted in manual engine mode; automatic mode uses
/// [`Weights::unity`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    /// Weight on key alignment
    pub key: f32,
    /// Weight on pitch accuracy
    pub pitch: f32,
    /// Weight on loudness level
    pub vol: f32,
}

impl Weights {
    /// Create weights, clamping each to [0.0, 1.0]
    pub fn new(key: f32, pitch: f32, vol: f32) -> Self {
        Self {
            key: key.clamp(0.0, 1.0),
            pitch: pitch.clamp(0.0, 1.0),
            vol: vol.clamp(0.0, 1.0),
        }
    }

    /// Create weights from 0-100 slider positions
    pub fn from_percent(key: u32, pitch: u32, vol: u32) -> Self {
        Self::new(key as f32 / 100.0, pitch as f32 / 100.0, vol as f32 / 100.0)
    }

    /// All weights at 1.0 (automatic engine mode)
    pub fn unity() -> Self {
        Self {
            key: 1.0,
            pitch: 1.0,
            vol: 1.0,
        }
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self::unity()
    }
}

/// Compute the duck strength for one frame
///
/// `strength = clamp(level*vw * (0.5 + 0.5*pitch*pw) * (0.5 + 0.5*key*kw), 0, 1)`
///
/// Monotonic non-decreasing in each of the three qualities with the other
/// two held fixed.
pub fn duck_strength(analysis: &FrameAnalysis, weights: &Weights) -> f32 {
    let vol_factor = analysis.level * weights.vol;
    let pitch_factor = analysis.pitch_quality * weights.pitch;
    let key_factor = analysis.key_quality * weights.key;

    (vol_factor * (0.5 + 0.5 * pitch_factor) * (0.5 + 0.5 * key_factor)).clamp(0.0, 1.0)
}
