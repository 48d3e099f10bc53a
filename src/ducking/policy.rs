//! Mode policy: mapping duck strength to a guide-vocal volume
//!
//! A small state machine with three modes. Transitions happen immediately on
//! external mode selection; there is no hysteresis and no intermediate state.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;

/// How the guide vocal responds to the performer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideMode {
    /// Guide ducks with the performer but never fully disappears
    Share,
    /// Guide held at a fixed training-support level
    Assist,
    /// Guide silent, instruments only
    Ghost,
}

impl Default for GuideMode {
    fn default() -> Self {
        GuideMode::Share
    }
}

/// Target guide-vocal volume for the given mode and duck strength
///
/// - `Share`: 1.0 while strength is at or below the duck threshold; above it,
///   volume falls linearly and bottoms out at the configured floor when
///   strength is 1.0.
/// - `Assist`: constant assist volume, independent of strength.
/// - `Ghost`: constant 0.0.
///
/// The result is clamped to [0.0, 1.0].
pub fn target_volume(mode: GuideMode, duck_strength: f32, config: &EngineConfig) -> f32 {
    let volume = match mode {
        GuideMode::Share => {
            if duck_strength <= config.share_duck_threshold {
                1.0
            } else {
                1.0 - duck_strength * (1.0 - config.share_volume_floor)
            }
        }
        GuideMode::Assist => config.assist_volume,
        GuideMode::Ghost => 0.0,
    };
    volume.clamp(0.0, 1.0)
}
