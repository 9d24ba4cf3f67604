//! Audio analysis layer
//!
//! Decoding plus two interchangeable pitch-estimation strategies behind the
//! `PitchEstimator` trait. `ContourAnalyzer` is the entry point the binary
//! drives.

mod contour;
mod decoder;
mod peak;
mod tracker;
mod traits;

pub use contour::{ContourAnalyzer, Strategy};
pub use decoder::{decode_to_mono, DecodedAudio};
pub use peak::PeakMagnitudeEstimator;
pub use tracker::TrackerEstimator;
pub use traits::{PitchEstimator, PitchFrame};
