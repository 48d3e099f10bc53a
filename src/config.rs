//! Configuration parameters for the vocal analysis engine

use crate::features::key::Scale;

/// Engine configuration parameters
///
/// Defaults reproduce the tuning the engine ships with; every threshold that
/// shapes analysis or ducking behavior is adjustable here. Configuration is
/// applied at tick boundaries only (see [`crate::engine::Engine`]).
#[derive(Debug, Clone)]
pub struct EngineConfig {
    // Envelope
    /// RMS noise floor (default: 0.02)
    /// Frames below this loudness produce zero level and skip pitch analysis
    pub noise_floor_rms: f32,

    /// RMS saturation point (default: 0.3)
    /// Loudness at or above this maps to level = 1.0
    pub saturation_rms: f32,

    // Pitch detection
    /// Lowest fundamental to consider in Hz (default: 80.0)
    pub min_frequency: f32,

    /// Highest fundamental to consider in Hz (default: 1000.0)
    /// 80-1000 Hz covers the human singing voice
    pub max_frequency: f32,

    /// Semitone deviation at which pitch quality reaches zero (default: 0.5)
    /// A quarter-tone or more off the nearest semitone center scores 0
    pub semitone_tolerance: f32,

    // Key scoring
    /// Quality assigned to out-of-scale pitches (default: 0.4)
    /// A soft penalty: off-key singing still ducks the guide, just less
    pub off_scale_quality: f32,

    /// Target scale for key alignment (default: C major)
    pub scale: Scale,

    // Ducking policy
    /// Duck strength below which share mode keeps the guide at full volume
    /// (default: 0.15)
    pub share_duck_threshold: f32,

    /// Guide volume floor in share mode at full duck strength (default: 0.5)
    pub share_volume_floor: f32,

    /// Constant guide volume in assist mode (default: 0.5)
    pub assist_volume: f32,

    // Scoring
    /// Fraction of the previous live score retained per tick (default: 0.9)
    /// The remainder is taken from the instantaneous score (duck strength x 100)
    pub running_score_retain: f32,

    /// Session score accrued per tick per unit duck strength (default: 0.6)
    pub session_accrual: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            noise_floor_rms: 0.02,
            saturation_rms: 0.3,
            min_frequency: 80.0,
            max_frequency: 1000.0,
            semitone_tolerance: 0.5,
            off_scale_quality: 0.4,
            scale: Scale::major(0),
            share_duck_threshold: 0.15,
            share_volume_floor: 0.5,
            assist_volume: 0.5,
            running_score_retain: 0.9,
            session_accrual: 0.6,
        }
    }
}

impl EngineConfig {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns [`crate::EngineError::InvalidConfig`] if the frequency band or
    /// RMS mapping range is degenerate.
    pub fn validate(&self) -> Result<(), crate::error::EngineError> {
        if self.min_frequency <= 0.0 || self.max_frequency <= self.min_frequency {
            return Err(crate::error::EngineError::InvalidConfig(format!(
                "Invalid frequency band: [{:.1}, {:.1}] Hz",
                self.min_frequency, self.max_frequency
            )));
        }
        if self.saturation_rms <= self.noise_floor_rms {
            return Err(crate::error::EngineError::InvalidConfig(format!(
                "Saturation RMS ({}) must exceed noise floor ({})",
                self.saturation_rms, self.noise_floor_rms
            )));
        }
        if self.semitone_tolerance <= 0.0 {
            return Err(crate::error::EngineError::InvalidConfig(
                "Semitone tolerance must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
