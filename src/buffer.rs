//! Bounded FIFO primitives for the sampling/analysis split.
//!
//! `ChannelBuffer` holds one color channel's intensity history; it is
//! written only by the sampling tick and read by the analysis tick through
//! `snapshot()`, so analysis never observes a buffer mid-mutation.

use ndarray::Array1;
use std::collections::VecDeque;

/// Fixed-capacity ring buffer of per-frame intensity means for one channel.
///
/// Pushing past capacity evicts the oldest sample; that is normal steady
/// state once the warm-up window has filled, not a fault.
#[derive(Debug, Clone)]
pub struct ChannelBuffer {
    samples: VecDeque<f32>,
    capacity: usize,
}

impl ChannelBuffer {
    /// Create a buffer holding at most `capacity` samples.
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, evicting the oldest when full.
    pub fn push(&mut self, sample: f32) {
        self.samples.push_back(sample);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    /// Immutable copy of the current contents, oldest first.
    ///
    /// Taken once per analysis tick so spectral/interval estimation works
    /// on a stable series while sampling keeps appending.
    pub fn snapshot(&self) -> Array1<f32> {
        self.samples.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

/// Sliding window over the last N metric estimates, mean-reduced on read.
///
/// Damps tick-to-tick flicker in the displayed vitals without unbounded lag.
#[derive(Debug, Clone)]
pub struct RollingWindow {
    values: VecDeque<f32>,
    capacity: usize,
}

impl RollingWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            values: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an estimate, evicting the oldest past capacity.
    pub fn push(&mut self, value: f32) {
        self.values.push_back(value);
        while self.values.len() > self.capacity {
            self.values.pop_front();
        }
    }

    /// Arithmetic mean of the current window, or `None` when empty.
    pub fn mean(&self) -> Option<f32> {
        if self.values.is_empty() {
            return None;
        }
        Some(self.values.iter().sum::<f32>() / self.values.len() as f32)
    }

    /// Rounded mean, the externally displayed value.
    pub fn rounded_mean(&self) -> Option<i64> {
        self.mean().map(|m| m.round() as i64)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_buffer_capacity_invariant() {
        let mut buf = ChannelBuffer::new(5);
        for i in 0..20 {
            buf.push(i as f32);
            assert!(buf.len() <= 5);
        }
        // FIFO: oldest evicted, last 5 survive
        let snap = buf.snapshot();
        assert_eq!(snap.to_vec(), vec![15.0, 16.0, 17.0, 18.0, 19.0]);
    }

    #[test]
    fn test_channel_buffer_snapshot_isolated() {
        let mut buf = ChannelBuffer::new(10);
        buf.push(1.0);
        buf.push(2.0);

        let snap = buf.snapshot();
        buf.push(3.0);

        // Snapshot is a copy, unaffected by later pushes
        assert_eq!(snap.len(), 2);
        assert_eq!(buf.len(), 3);
    }

    #[test]
    fn test_channel_buffer_clear() {
        let mut buf = ChannelBuffer::new(4);
        buf.push(1.0);
        assert!(!buf.is_empty());
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.snapshot().len(), 0);
    }

    #[test]
    fn test_rolling_window_holds_last_five() {
        let mut window = RollingWindow::new(5);
        for v in [10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0] {
            window.push(v);
        }

        assert_eq!(window.len(), 5);
        // Last 5 are 30..=70, mean 50
        assert_eq!(window.rounded_mean(), Some(50));
    }

    #[test]
    fn test_rolling_window_rounded_mean() {
        let mut window = RollingWindow::new(5);
        window.push(71.0);
        window.push(72.0);
        // mean 71.5 rounds away from zero
        assert_eq!(window.rounded_mean(), Some(72));
    }

    #[test]
    fn test_rolling_window_empty() {
        let window = RollingWindow::new(5);
        assert!(window.mean().is_none());
        assert!(window.rounded_mean().is_none());
    }
}
