//! # Encore DSP
//!
//! A real-time karaoke analysis and ducking engine. Listens to a performer's
//! voice, grades loudness, pitch accuracy, and key alignment per frame, and
//! turns those grades into a guide-vocal volume and a live score.
//!
//! ## Features
//!
//! - **Envelope Analysis**: RMS loudness normalized between a noise floor and saturation point
//! - **Pitch Estimation**: FFT-accelerated autocorrelation with semitone-accuracy grading
//! - **Key Alignment**: Pitch-class membership against a configurable song scale
//! - **Ducking**: Weighted duck strength driving a mode policy (share, assist, ghost)
//! - **Scoring**: Smoothed live score, cumulative session score, best score across runs
//!
//! ## Quick Start
//!
//! ```
//! use encore_dsp::{analyze_frame, AudioFrame, EngineConfig};
//!
//! let sample_rate = 44100;
//! let samples: Vec<f32> = (0..2048)
//!     .map(|i| 0.5 * (2.0 * std::f32::consts::PI * 440.0 * i as f32 / sample_rate as f32).sin())
//!     .collect();
//! let frame = AudioFrame::new(samples, sample_rate)?;
//!
//! let analysis = analyze_frame(&frame, &EngineConfig::default());
//!
//! println!("level: {:.2}", analysis.level);
//! println!("pitch quality: {:.2}", analysis.pitch_quality);
//! println!("key quality: {:.2}", analysis.key_quality);
//! # Ok::<(), encore_dsp::EngineError>(())
//! ```
//!
//! ## Architecture
//!
//! The per-tick pipeline follows this flow:
//!
//! ```text
//! Audio Frame → Envelope → Pitch → Key → Duck Strength → Mode Policy → Scores
//! ```
//!
//! [`Engine`] drives the pipeline: it pulls frames from a [`FrameSource`],
//! pushes results to a [`TickSink`], and applies queued [`EngineCommand`]s
//! only at tick boundaries.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod ducking;
pub mod engine;
pub mod error;
pub mod features;
pub mod scoring;

// Re-export main types
pub use analysis::{AudioFrame, FrameAnalysis, TickOutput};
pub use config::EngineConfig;
pub use ducking::{duck_strength, target_volume, GuideMode, Weights};
pub use engine::{CollectSink, Engine, EngineCommand, EngineMode, FrameSource, TickSink, TickStatus};
pub use error::EngineError;
pub use features::key::Scale;
pub use scoring::ScoreTracker;

/// Analyzes one frame of voice audio
///
/// Runs the envelope, pitch, and key analyzers in order and returns the three
/// per-frame qualities. Degenerate signals are graded, not rejected: an
/// all-zero frame yields all-zero qualities, and a frame too quiet for pitch
/// detection yields zero pitch and key qualities with its measured level.
///
/// # Arguments
///
/// * `frame` - One frame of centered voice samples
/// * `config` - Engine configuration (thresholds, frequency band, scale)
///
/// # Returns
///
/// `FrameAnalysis` with `level`, `pitch_quality`, and `key_quality`, each in
/// [0.0, 1.0]
///
/// # Example
///
/// ```
/// use encore_dsp::{analyze_frame, AudioFrame, EngineConfig};
///
/// let frame = AudioFrame::new(vec![0.0f32; 2048], 44100)?;
/// let analysis = analyze_frame(&frame, &EngineConfig::default());
/// assert_eq!(analysis.level, 0.0);
/// # Ok::<(), encore_dsp::EngineError>(())
/// ```
pub fn analyze_frame(frame: &AudioFrame, config: &EngineConfig) -> FrameAnalysis {
    log::debug!(
        "Analyzing frame: {} samples at {} Hz",
        frame.len(),
        frame.sample_rate
    );

    let envelope = features::envelope::measure(
        &frame.samples,
        config.noise_floor_rms,
        config.saturation_rms,
    );

    let estimate = features::pitch::estimate(
        &frame.samples,
        frame.sample_rate,
        envelope.rms,
        config.noise_floor_rms,
        config.min_frequency,
        config.max_frequency,
        config.semitone_tolerance,
    );

    match estimate {
        Some(pitch) => FrameAnalysis {
            level: envelope.level,
            pitch_quality: pitch.quality,
            key_quality: features::key::key_quality(
                pitch.nearest_note,
                &config.scale,
                config.off_scale_quality,
            ),
        },
        None => FrameAnalysis {
            level: envelope.level,
            pitch_quality: 0.0,
            key_quality: 0.0,
        },
    }
}
