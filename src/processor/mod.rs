//! Frame scanning, segment extraction and the pipeline that drives them

pub mod pipeline;
pub mod scan;
pub mod segment;

pub use pipeline::{Pipeline, PipelineOutput};
pub use scan::{FrameDecisions, FrameScanner};
pub use segment::{SegmentExtractor, SegmentList, VoiceSegment};

/// Counters for one pipeline run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessingStats {
    /// Samples in the input signal
    pub input_samples: u64,
    /// Samples after decimation
    pub resampled_samples: u64,
    /// Frames handed to the classifier
    pub frames_scanned: u64,
    /// Frames judged to contain voice
    pub voiced_frames: u64,
    /// Voice segments extracted
    pub segments: u64,
}
