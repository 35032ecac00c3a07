use super::scan::FrameDecisions;
use crate::core::Signal;
use crate::error::{VadError, VadResult};
use std::time::Duration;

/// One voice region as sample indices into the resampled signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoiceSegment {
    /// First voiced sample
    pub start: usize,
    /// Boundary sample: the start of the first silent frame, or the last
    /// sample of the signal when voice runs to the end
    pub end: usize,
}

impl VoiceSegment {
    /// Number of samples between the boundaries
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if both boundaries coincide
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Start time at `sample_rate`
    pub fn start_time(&self, sample_rate: u32) -> Duration {
        Duration::from_secs_f64(self.start as f64 / sample_rate as f64)
    }

    /// End time at `sample_rate`
    pub fn end_time(&self, sample_rate: u32) -> Duration {
        Duration::from_secs_f64(self.end as f64 / sample_rate as f64)
    }

    /// Borrow the samples covered by this segment, clamped to the signal
    pub fn samples<'a>(&self, signal: &'a Signal) -> &'a [f32] {
        let samples = signal.samples();
        let end = self.end.min(samples.len());
        let start = self.start.min(end);
        &samples[start..end]
    }
}

/// Flattened boundary list: start, end, start, end, ...
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentList {
    boundaries: Vec<usize>,
}

impl SegmentList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Boundaries in flattened form; always even length
    pub fn as_flat(&self) -> &[usize] {
        &self.boundaries
    }

    /// Take the flattened boundaries
    pub fn into_flat(self) -> Vec<usize> {
        self.boundaries
    }

    /// Iterate the list as start/end pairs
    pub fn segments(&self) -> impl Iterator<Item = VoiceSegment> + '_ {
        self.boundaries.chunks_exact(2).map(|pair| VoiceSegment {
            start: pair[0],
            end: pair[1],
        })
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.boundaries.len() / 2
    }

    /// Check if no voice was found
    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    fn push(&mut self, boundary: usize) {
        self.boundaries.push(boundary);
    }
}

/// Where the extractor stands relative to the current voice region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    /// Not inside voice
    Closed,
    /// Inside voice, start boundary already emitted
    Open,
    /// Inside voice since the first frame, no start emitted yet
    OpenAtSignalStart,
}

/// Collapses frame decisions into voice segment boundaries
#[derive(Debug, Clone, Copy, Default)]
pub struct SegmentExtractor;

impl SegmentExtractor {
    /// Create an extractor
    pub fn new() -> Self {
        SegmentExtractor
    }

    /// Extract segments from a scan over a signal of `signal_len` samples
    pub fn extract(&self, frames: &FrameDecisions, signal_len: usize) -> SegmentList {
        Self::collapse(frames.decisions(), frames.frame_starts(), signal_len)
    }

    /// Extract segments from raw parallel sequences
    pub fn extract_parts(
        &self,
        decisions: &[bool],
        frame_starts: &[usize],
        signal_len: usize,
    ) -> VadResult<SegmentList> {
        if decisions.len() != frame_starts.len() {
            return Err(VadError::MalformedConfiguration(format!(
                "{} decisions but {} frame starts",
                decisions.len(),
                frame_starts.len()
            )));
        }
        Ok(Self::collapse(decisions, frame_starts, signal_len))
    }

    fn collapse(decisions: &[bool], frame_starts: &[usize], signal_len: usize) -> SegmentList {
        let mut list = SegmentList::new();

        let mut region = match decisions.first() {
            Some(true) => Region::OpenAtSignalStart,
            Some(false) => Region::Closed,
            None => return list,
        };

        for (i, pair) in decisions.windows(2).enumerate() {
            let boundary = frame_starts[i + 1];
            match (pair[0], pair[1]) {
                // Onset
                (false, true) => {
                    list.push(boundary);
                    region = Region::Open;
                }
                // Offset
                (true, false) => {
                    if region == Region::OpenAtSignalStart {
                        list.push(0);
                    }
                    list.push(boundary);
                    region = Region::Closed;
                }
                _ => {}
            }
        }

        // Voice still running when the scan ended
        let last = signal_len.saturating_sub(1);
        match region {
            Region::Closed => {}
            Region::Open => list.push(last),
            Region::OpenAtSignalStart => {
                list.push(0);
                list.push(last);
            }
        }

        list
    }
}
