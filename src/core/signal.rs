use crate::error::{VadError, VadResult};
use std::time::Duration;

/// Mono sample sequence with its sample rate
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    /// Samples in time order
    samples: Vec<f32>,
    /// Sample rate in Hz (e.g., 8000, 16000)
    sample_rate: u32,
}

impl Signal {
    /// Create a new signal
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> VadResult<Self> {
        if sample_rate == 0 {
            return Err(VadError::InvalidSampleRate { rate: sample_rate });
        }

        Ok(Signal {
            samples,
            sample_rate,
        })
    }

    /// Get reference to the samples
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Get owned samples (consumes signal)
    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    /// Get sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if signal is empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Get duration of this signal
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.samples.len() as f64 / self.sample_rate as f64)
    }

    /// Borrow `len` samples starting at `start` as a classifier frame.
    ///
    /// Returns `None` when the window would run past the end of the signal.
    pub fn frame(&self, start: usize, len: usize) -> Option<Frame<'_>> {
        let end = start.checked_add(len)?;
        let data = self.samples.get(start..end)?;
        Some(Frame {
            start,
            shape: FrameShape::row(len),
            data,
        })
    }
}

/// Logical layout the classifier sees a frame as
///
/// Frames are always one channel and one row; the column count is the frame length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameShape {
    /// Number of channels
    pub channels: usize,
    /// Number of rows
    pub rows: usize,
    /// Number of columns
    pub cols: usize,
}

impl FrameShape {
    /// Single-channel, single-row shape of `len` columns
    pub fn row(len: usize) -> Self {
        FrameShape {
            channels: 1,
            rows: 1,
            cols: len,
        }
    }

    /// Total element count
    pub fn len(&self) -> usize {
        self.channels * self.rows * self.cols
    }

    /// Check if the shape holds no elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Borrowed fixed-length window into a [`Signal`]
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    start: usize,
    shape: FrameShape,
    data: &'a [f32],
}

impl<'a> Frame<'a> {
    /// Sample index in the signal where this frame begins
    pub fn start(&self) -> usize {
        self.start
    }

    /// Logical shape descriptor
    pub fn shape(&self) -> FrameShape {
        self.shape
    }

    /// Frame samples
    pub fn samples(&self) -> &'a [f32] {
        self.data
    }

    /// Number of samples in the frame
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if frame is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_creation() {
        let signal = Signal::new(vec![0.1, 0.2, 0.3, 0.4], 8000).unwrap();

        assert_eq!(signal.sample_rate(), 8000);
        assert_eq!(signal.len(), 4);
        assert!(!signal.is_empty());
        assert!((signal.duration().as_secs_f64() - 0.0005).abs() < 1e-9);
    }

    #[test]
    fn test_signal_invalid_rate() {
        assert!(Signal::new(vec![0.0], 0).is_err());
    }

    #[test]
    fn test_frame_view() {
        let signal = Signal::new((0..10).map(|i| i as f32).collect(), 8000).unwrap();

        let frame = signal.frame(4, 3).unwrap();
        assert_eq!(frame.start(), 4);
        assert_eq!(frame.samples(), &[4.0, 5.0, 6.0]);
        assert_eq!(frame.shape(), FrameShape::row(3));
        assert_eq!(frame.shape().len(), 3);

        // Last full window
        assert!(signal.frame(7, 3).is_some());
        // One past the end
        assert!(signal.frame(8, 3).is_none());
        assert!(signal.frame(usize::MAX, 2).is_none());
    }
}
