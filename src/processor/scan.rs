use crate::classifier::Classifier;
use crate::core::Signal;
use crate::error::{VadError, VadResult};
use log::{debug, warn};

/// Per-frame decisions paired with the sample index each frame began at
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameDecisions {
    decisions: Vec<bool>,
    frame_starts: Vec<usize>,
}

impl FrameDecisions {
    /// Create an empty sequence
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from parallel sequences, which must have equal length
    pub fn from_parts(decisions: Vec<bool>, frame_starts: Vec<usize>) -> VadResult<Self> {
        if decisions.len() != frame_starts.len() {
            return Err(VadError::MalformedConfiguration(format!(
                "{} decisions but {} frame starts",
                decisions.len(),
                frame_starts.len()
            )));
        }
        Ok(FrameDecisions {
            decisions,
            frame_starts,
        })
    }

    /// Reserve room for `additional` frames, reporting failure instead of aborting
    pub fn try_reserve(&mut self, additional: usize) -> VadResult<()> {
        self.decisions
            .try_reserve_exact(additional)
            .map_err(|source| VadError::Allocation {
                buffer: "decisions",
                requested: additional,
                source,
            })?;
        self.frame_starts
            .try_reserve_exact(additional)
            .map_err(|source| VadError::Allocation {
                buffer: "frame starts",
                requested: additional,
                source,
            })
    }

    /// Append one classified frame
    pub fn push(&mut self, frame_start: usize, decision: bool) {
        self.frame_starts.push(frame_start);
        self.decisions.push(decision);
    }

    /// Remove everything
    pub fn clear(&mut self) {
        self.decisions.clear();
        self.frame_starts.clear();
    }

    /// Decisions in scan order
    pub fn decisions(&self) -> &[bool] {
        &self.decisions
    }

    /// Frame start indices, parallel to `decisions`
    pub fn frame_starts(&self) -> &[usize] {
        &self.frame_starts
    }

    /// Number of frames
    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    /// Check if no frame was classified
    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }

    /// Number of frames judged to contain voice
    pub fn voiced(&self) -> usize {
        self.decisions.iter().filter(|&&d| d).count()
    }
}

/// Walks a signal in fixed-length, fixed-hop frames and classifies each one
#[derive(Debug, Clone, Copy)]
pub struct FrameScanner {
    frame_len: usize,
    frame_step: usize,
}

impl FrameScanner {
    /// Create a scanner; both lengths are in samples and must be non-zero
    pub fn new(frame_len: usize, frame_step: usize) -> VadResult<Self> {
        if frame_len == 0 || frame_step == 0 {
            return Err(VadError::MalformedConfiguration(format!(
                "frame length {} and step {} must both be non-zero",
                frame_len, frame_step
            )));
        }

        Ok(FrameScanner {
            frame_len,
            frame_step,
        })
    }

    /// Samples per frame
    pub fn frame_len(&self) -> usize {
        self.frame_len
    }

    /// Samples between frame starts
    pub fn frame_step(&self) -> usize {
        self.frame_step
    }

    /// Number of full frames that fit in `signal_len` samples
    pub fn frame_count(&self, signal_len: usize) -> usize {
        if signal_len < self.frame_len {
            return 0;
        }
        (signal_len - self.frame_len) / self.frame_step + 1
    }

    /// Scan `signal`, returning a fresh decision sequence
    pub fn scan<C: Classifier + ?Sized>(
        &self,
        signal: &Signal,
        classifier: &mut C,
    ) -> VadResult<FrameDecisions> {
        let mut out = FrameDecisions::new();
        out.try_reserve(self.frame_count(signal.len()))?;
        self.scan_into(signal, classifier, &mut out)?;
        Ok(out)
    }

    /// Scan `signal`, appending to `out`.
    ///
    /// A trailing window shorter than the frame length is never classified.
    /// The scan stops at the first classifier failure; whatever was appended
    /// before it stays in `out` and is the caller's to discard.
    pub fn scan_into<C: Classifier + ?Sized>(
        &self,
        signal: &Signal,
        classifier: &mut C,
        out: &mut FrameDecisions,
    ) -> VadResult<()> {
        let mut start = 0usize;
        let mut frame_index = 0usize;

        while let Some(frame) = signal.frame(start, self.frame_len) {
            match classifier.classify(&frame) {
                Ok(decision) => out.push(start, decision),
                Err(source) => {
                    warn!(
                        "classifier failed on frame {} at sample {} (status {})",
                        frame_index,
                        start,
                        source.code()
                    );
                    return Err(VadError::Classifier {
                        frame_index,
                        frame_start: start,
                        source,
                    });
                }
            }

            frame_index += 1;
            start = match start.checked_add(self.frame_step) {
                Some(next) => next,
                None => break,
            };
        }

        debug!(
            "scanned {} frames of {} samples (step {}) over {} samples",
            frame_index,
            self.frame_len,
            self.frame_step,
            signal.len()
        );
        Ok(())
    }
}
