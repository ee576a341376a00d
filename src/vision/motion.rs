//! Motion gating on landmark displacement.
//!
//! Head motion smears the subtle color signal rPPG depends on, so frames
//! whose landmarks moved too far since the previous capture are dropped
//! before they reach the channel buffers.

/// Sentinel motion score for landmark sets of different lengths, where no
/// point correspondence exists.
pub const LANDMARK_MISMATCH_SCORE: f32 = 9999.0;

/// Outcome of gating one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionDecision {
    /// Mean Euclidean displacement between corresponding points, or the
    /// mismatch sentinel.
    pub score: f32,
    /// Whether the frame may be sampled.
    pub accepted: bool,
}

/// Frame-to-frame motion gate.
///
/// Keeps the previous frame's landmark set and compares each incoming set
/// against it. Rejected frames still replace the stored set, so the gate
/// tracks the latest pose and a single jerk does not poison every
/// following comparison.
#[derive(Debug, Clone)]
pub struct MotionGate {
    threshold: f32,
    previous: Option<Vec<[f32; 2]>>,
}

impl MotionGate {
    /// `threshold` is in landmark-coordinate units (pixels for pixel-space
    /// landmarks).
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            previous: None,
        }
    }

    /// Score the incoming landmark set against the previous frame's and
    /// decide whether the frame may be sampled.
    ///
    /// The first observed frame has nothing to compare against and is
    /// accepted with score 0.
    pub fn observe(&mut self, landmarks: &[[f32; 2]]) -> MotionDecision {
        let score = match self.previous.as_deref() {
            None => 0.0,
            Some(prev) => Self::motion_score(prev, landmarks),
        };

        self.previous = Some(landmarks.to_vec());

        let accepted = score <= self.threshold;
        if !accepted {
            log::trace!("frame rejected: motion score {score:.2} over threshold {:.2}", self.threshold);
        }
        MotionDecision { score, accepted }
    }

    /// Mean Euclidean distance between corresponding points, or the
    /// mismatch sentinel when the sets cannot be paired up.
    pub fn motion_score(prev: &[[f32; 2]], curr: &[[f32; 2]]) -> f32 {
        if prev.len() != curr.len() || prev.is_empty() {
            return LANDMARK_MISMATCH_SCORE;
        }

        let total: f32 = prev
            .iter()
            .zip(curr.iter())
            .map(|(a, b)| {
                let dx = a[0] - b[0];
                let dy = a[1] - b[1];
                (dx * dx + dy * dy).sqrt()
            })
            .sum();
        total / prev.len() as f32
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Forget the stored landmark set (session restart).
    pub fn reset(&mut self) {
        self.previous = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn grid(offset: f32) -> Vec<[f32; 2]> {
        (0..68)
            .map(|i| [i as f32 + offset, i as f32 * 2.0 + offset])
            .collect()
    }

    #[test]
    fn test_first_frame_accepted() {
        let mut gate = MotionGate::new(3.0);
        let decision = gate.observe(&grid(0.0));
        assert!(decision.accepted);
        assert_eq!(decision.score, 0.0);
    }

    #[test]
    fn test_identical_sets_score_zero() {
        let mut gate = MotionGate::new(3.0);
        gate.observe(&grid(0.0));
        let decision = gate.observe(&grid(0.0));
        assert!(decision.accepted);
        assert_relative_eq!(decision.score, 0.0);
    }

    #[test]
    fn test_small_shift_accepted() {
        let mut gate = MotionGate::new(3.0);
        gate.observe(&grid(0.0));
        // Uniform (1, 1) shift -> mean distance sqrt(2) < 3
        let decision = gate.observe(&grid(1.0));
        assert!(decision.accepted);
        assert_relative_eq!(decision.score, std::f32::consts::SQRT_2, epsilon = 1e-4);
    }

    #[test]
    fn test_large_shift_rejected() {
        let mut gate = MotionGate::new(3.0);
        gate.observe(&grid(0.0));
        // Uniform (5, 5) shift -> mean distance ~7.07 > 3
        let decision = gate.observe(&grid(5.0));
        assert!(!decision.accepted);
        assert!(decision.score > 3.0);
    }

    #[test]
    fn test_mismatched_lengths_use_sentinel() {
        let mut gate = MotionGate::new(3.0);
        gate.observe(&grid(0.0));
        let short: Vec<[f32; 2]> = grid(0.0).into_iter().take(10).collect();
        let decision = gate.observe(&short);
        assert!(!decision.accepted);
        assert_eq!(decision.score, LANDMARK_MISMATCH_SCORE);
    }

    #[test]
    fn test_rejected_frame_still_advances_previous() {
        let mut gate = MotionGate::new(3.0);
        gate.observe(&grid(0.0));

        // Big jump: rejected, but becomes the new reference
        assert!(!gate.observe(&grid(50.0)).accepted);

        // Next frame near the new pose is accepted again
        let decision = gate.observe(&grid(50.5));
        assert!(decision.accepted);
        assert!(decision.score < 1.0);
    }

    #[test]
    fn test_reset_clears_history() {
        let mut gate = MotionGate::new(3.0);
        gate.observe(&grid(0.0));
        gate.reset();
        // After reset the next frame is a "first frame" again
        let decision = gate.observe(&grid(100.0));
        assert!(decision.accepted);
        assert_eq!(decision.score, 0.0);
    }
}
