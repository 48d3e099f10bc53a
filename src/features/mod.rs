//! Feature extraction modules
//!
//! This module contains the per-frame signal analyzers:
//! - Envelope tracking (RMS loudness -> normalized level)
//! - Pitch estimation (autocorrelation -> semitone accuracy)
//! - Key alignment (pitch class -> scale membership)

pub mod envelope;
pub mod key;
pub mod pitch;
