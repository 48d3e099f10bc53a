//! Analysis input and output types
//!
//! [`AudioFrame`] is the per-tick input pulled from the capture collaborator;
//! [`FrameAnalysis`] and [`TickOutput`] are the per-tick results pushed to
//! display collaborators. Frames are consumed fresh each tick and never
//! retained.

pub mod frame;
pub mod result;

pub use frame::AudioFrame;
pub use result::{FrameAnalysis, TickOutput};
