//! Time-domain audio frames

use crate::error::EngineError;

/// One frame of time-domain audio, supplied fresh each control-loop tick
///
/// Samples are centered amplitudes in [-1.0, 1.0]. A frame is validated on
/// construction so the analysis pipeline never sees an empty buffer or a
/// zero sample rate.
#[derive(Debug, Clone)]
pub struct AudioFrame {
    /// Amplitude samples, centered on zero
    pub samples: Vec<f32>,

    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl AudioFrame {
    /// Create a frame from centered float samples
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] if `samples` is empty or
    /// `sample_rate` is zero.
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Result<Self, EngineError> {
        if samples.is_empty() {
            return Err(EngineError::InvalidInput("Empty sample buffer".to_string()));
        }
        if sample_rate == 0 {
            return Err(EngineError::InvalidInput("Invalid sample rate: 0".to_string()));
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Create a frame from unsigned byte time-domain data
    ///
    /// Web-Audio-style analysers deliver time-domain data as bytes centered
    /// on 128; each byte is mapped to `(b - 128) / 128` in [-1.0, 1.0).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] if `bytes` is empty or
    /// `sample_rate` is zero.
    pub fn from_byte_samples(bytes: &[u8], sample_rate: u32) -> Result<Self, EngineError> {
        let samples = bytes.iter().map(|&b| (b as f32 - 128.0) / 128.0).collect();
        Self::new(samples, sample_rate)
    }

    /// Number of samples in the frame
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True if the frame holds no samples (cannot occur for validated frames)
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
