//! Pitch estimation via autocorrelation
//!
//! Estimates the fundamental frequency of a voice frame by finding the time
//! lag that maximizes the signal's self-similarity, then grades how close
//! the detected pitch sits to the nearest semitone center.
//!
//! Detection failure is an expected outcome, not an error: sub-threshold
//! loudness, a lag band with no positive correlation, and non-finite or
//! non-positive derived frequencies all yield `None`, which the engine maps
//! to zero pitch and key qualities.

pub mod autocorrelation;

pub use autocorrelation::{autocorrelate, autocorrelate_naive, best_positive_lag};

use serde::{Deserialize, Serialize};

/// A4 reference in Hz
const A4_FREQUENCY: f32 = 440.0;

/// MIDI note number of A4
const A4_MIDI_NOTE: f32 = 69.0;

/// One detected pitch with its semitone-accuracy grade
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PitchEstimate {
    /// Detected fundamental frequency in Hz
    pub frequency: f32,

    /// Fractional MIDI-style note number (A4 = 69.0)
    pub note: f32,

    /// Nearest semitone as an integer MIDI note
    pub nearest_note: i32,

    /// Closeness to the nearest semitone center, in [0.0, 1.0]
    /// (1.0 exactly on center, 0.0 at or beyond the tolerance)
    pub quality: f32,
}

/// Estimate the pitch of a frame
///
/// Short-circuits to `None` when `rms` is below `noise_floor`, preventing
/// spurious pitch locks on silence or noise. Otherwise searches the lag band
/// `floor(sample_rate / max_frequency) ..= floor(sample_rate / min_frequency)`
/// for the maximum positive autocorrelation and converts the winning lag to a
/// frequency and a fractional semitone number.
///
/// # Arguments
///
/// * `samples` - Centered amplitude samples
/// * `sample_rate` - Sample rate in Hz
/// * `rms` - Frame RMS from the envelope analyzer
/// * `noise_floor` - RMS below which pitch analysis is skipped
/// * `min_frequency` / `max_frequency` - Admissible fundamental band in Hz
/// * `semitone_tolerance` - Deviation (in semitones) at which quality reaches 0
///
/// # Returns
///
/// `Some(PitchEstimate)` on detection, `None` on any defined failure path.
pub fn estimate(
    samples: &[f32],
    sample_rate: u32,
    rms: f32,
    noise_floor: f32,
    min_frequency: f32,
    max_frequency: f32,
    semitone_tolerance: f32,
) -> Option<PitchEstimate> {
    if rms < noise_floor {
        return None;
    }

    let min_lag = ((sample_rate as f32 / max_frequency).floor() as usize).max(1);
    let max_lag = (sample_rate as f32 / min_frequency).floor() as usize;
    if min_lag > max_lag || min_lag >= samples.len() {
        log::warn!(
            "Lag band [{}, {}] does not fit frame of {} samples",
            min_lag,
            max_lag,
            samples.len()
        );
        return None;
    }

    let acf = autocorrelate(samples);
    let (lag, _corr) = best_positive_lag(&acf, min_lag, max_lag)?;

    let frequency = sample_rate as f32 / lag as f32;
    if !frequency.is_finite() || frequency <= 0.0 {
        return None;
    }

    let note = A4_MIDI_NOTE + 12.0 * (frequency / A4_FREQUENCY).log2();
    let nearest_note = note.round() as i32;
    let quality = semitone_quality(note, semitone_tolerance);

    log::debug!(
        "Pitch: lag={} f={:.1} Hz note={:.2} quality={:.2}",
        lag,
        frequency,
        note,
        quality
    );

    Some(PitchEstimate {
        frequency,
        note,
        nearest_note,
        quality,
    })
}

/// Grade a fractional note's closeness to the nearest semitone center
///
/// Linear from 1.0 on the center down to 0.0 at `tolerance` semitones of
/// deviation, clamped to [0.0, 1.0].
pub fn semitone_quality(note: f32, tolerance: f32) -> f32 {
    let deviation = (note - note.round()).abs();
    (1.0 - deviation / tolerance).clamp(0.0, 1.0)
}
