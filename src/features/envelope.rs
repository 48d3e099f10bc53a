//! Envelope tracking: RMS loudness mapped to a normalized level

/// RMS and normalized level for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeReading {
    /// Root-mean-square amplitude of the frame
    pub rms: f32,

    /// RMS mapped linearly from the noise floor to the saturation point,
    /// clamped to [0.0, 1.0]
    pub level: f32,
}

/// Measure the loudness envelope of a frame
///
/// Computes `rms = sqrt(mean(sample^2))` over the centered samples, then maps
/// it linearly from `noise_floor` to `saturation` onto [0.0, 1.0]. RMS at or
/// below the floor yields level 0; at or above the saturation point, 1.
///
/// Degenerate (all-zero) input yields `level = 0`; there are no error
/// conditions.
pub fn measure(samples: &[f32], noise_floor: f32, saturation: f32) -> EnvelopeReading {
    if samples.is_empty() {
        return EnvelopeReading { rms: 0.0, level: 0.0 };
    }

    let sum_squares: f32 = samples.iter().map(|&s| s * s).sum();
    let rms = (sum_squares / samples.len() as f32).sqrt();

    let level = ((rms - noise_floor) / (saturation - noise_floor)).clamp(0.0, 1.0);

    EnvelopeReading { rms, level }
}
