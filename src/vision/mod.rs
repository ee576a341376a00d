//! Frame-facing helpers: ROI pixel reduction and motion gating.
//!
//! Face detection itself lives outside this crate; these modules consume
//! what the detector hands over (an RGBA patch and a landmark point set).

pub mod motion;
pub mod roi;

pub use motion::{MotionDecision, MotionGate, LANDMARK_MISMATCH_SCORE};
pub use roi::{forehead_region, mean_rgba, RoiPatch, RoiRect, LANDMARK_COUNT};
