//! Key alignment: scoring a detected pitch class against a target scale

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Major scale degree offsets (ionian)
const MAJOR_DEGREES: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];

/// Natural minor scale degree offsets (aeolian)
const MINOR_DEGREES: [u8; 7] = [0, 2, 3, 5, 7, 8, 10];

/// A musical scale: a root pitch class and the degree offsets that belong to it
///
/// Pitch classes are 0-11 with 0 = C; degree offsets are semitone distances
/// from the root, also 0-11.
///
/// # Example
///
/// ```
/// use encore_dsp::features::key::Scale;
///
/// let c_major = Scale::major(0);
/// assert!(c_major.contains(4));  // E
/// assert!(!c_major.contains(1)); // C#
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scale {
    root: u8,
    degrees: Vec<u8>,
}

impl Scale {
    /// Create a scale from a root pitch class and degree offsets
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] if the root or any degree is
    /// outside 0-11, or if no degrees are given.
    pub fn new(root: u8, degrees: &[u8]) -> Result<Self, EngineError> {
        if root > 11 {
            return Err(EngineError::InvalidConfig(format!(
                "Scale root must be 0-11, got {}",
                root
            )));
        }
        if degrees.is_empty() {
            return Err(EngineError::InvalidConfig(
                "Scale must have at least one degree".to_string(),
            ));
        }
        if let Some(&bad) = degrees.iter().find(|&&d| d > 11) {
            return Err(EngineError::InvalidConfig(format!(
                "Scale degrees must be 0-11, got {}",
                bad
            )));
        }
        let mut degrees = degrees.to_vec();
        degrees.sort_unstable();
        degrees.dedup();
        Ok(Self { root, degrees })
    }

    /// Major scale on the given root (0 = C major)
    pub fn major(root: u8) -> Self {
        Self {
            root: root % 12,
            degrees: MAJOR_DEGREES.to_vec(),
        }
    }

    /// Natural minor scale on the given root (9 = A minor)
    pub fn minor(root: u8) -> Self {
        Self {
            root: root % 12,
            degrees: MINOR_DEGREES.to_vec(),
        }
    }

    /// Root pitch class (0-11)
    pub fn root(&self) -> u8 {
        self.root
    }

    /// Test whether a pitch class (0-11) belongs to the scale
    pub fn contains(&self, pitch_class: u8) -> bool {
        let relative = (pitch_class as i32 - self.root as i32).rem_euclid(12) as u8;
        self.degrees.contains(&relative)
    }
}

/// Score a detected note's membership in the target scale
///
/// The nearest semitone's pitch class is tested against the scale: in-scale
/// notes score 1.0, out-of-scale notes score `off_scale_quality`. The penalty
/// is soft: off-key singing still ducks the guide, just less.
pub fn key_quality(nearest_note: i32, scale: &Scale, off_scale_quality: f32) -> f32 {
    let pitch_class = nearest_note.rem_euclid(12) as u8;
    if scale.contains(pitch_class) {
        1.0
    } else {
        off_scale_quality
    }
}
