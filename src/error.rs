use crate::classifier::ClassifierFailure;
use std::collections::TryReserveError;
use std::io;
use thiserror::Error;

/// Result type for segmentation operations
pub type VadResult<T> = Result<T, VadError>;

/// Broad failure classes reported by a pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Buffers for the run could not be sized
    Allocation,
    /// The external classifier reported a non-normal status
    Classifier,
    /// Rates, frame geometry or signal length are inconsistent
    MalformedConfiguration,
    /// Reading the input signal or writing results failed
    Io,
}

/// Error types for voice segmentation
#[derive(Error, Debug)]
pub enum VadError {
    /// IO error (file operations, disk access)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Intermediate buffer could not be reserved
    #[error("Allocation failed for {buffer} ({requested} entries): {source}")]
    Allocation {
        /// Which pipeline buffer was being sized
        buffer: &'static str,
        /// Number of entries requested
        requested: usize,
        /// Underlying reservation error
        #[source]
        source: TryReserveError,
    },

    /// Classifier failed on a frame; the scan was aborted there
    #[error("Classifier failed on frame {frame_index} (sample {frame_start}): {source}")]
    Classifier {
        /// Position of the frame in scan order
        frame_index: usize,
        /// Sample index where the frame began
        frame_start: usize,
        /// Status reported by the classifier
        #[source]
        source: ClassifierFailure,
    },

    /// Configuration is inconsistent
    #[error("Malformed configuration: {0}")]
    MalformedConfiguration(String),

    /// Invalid sample rate
    #[error("Invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The invalid sample rate
        rate: u32,
    },

    /// Frame does not fit in the resampled signal
    #[error("Frame length {frame_len} exceeds signal length {signal_len}")]
    FrameTooLong {
        /// Configured frame length in samples
        frame_len: usize,
        /// Length of the resampled signal
        signal_len: usize,
    },

    /// Text sample file contained a value that is not a number
    #[error("Parse error on line {line}: {message}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// What went wrong
        message: String,
    },

    /// Unsupported audio format
    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    /// Decoding failed
    #[error("Decode error: {0}")]
    DecodeError(String),

    /// Encoding failed
    #[error("Encode error: {0}")]
    EncodeError(String),
}

impl VadError {
    /// Classify this error into the failure taxonomy of a run
    pub fn kind(&self) -> ErrorKind {
        match self {
            VadError::Allocation { .. } => ErrorKind::Allocation,
            VadError::Classifier { .. } => ErrorKind::Classifier,
            VadError::MalformedConfiguration(_)
            | VadError::InvalidSampleRate { .. }
            | VadError::FrameTooLong { .. } => ErrorKind::MalformedConfiguration,
            VadError::Io(_)
            | VadError::Parse { .. }
            | VadError::UnsupportedFormat(_)
            | VadError::DecodeError(_)
            | VadError::EncodeError(_) => ErrorKind::Io,
        }
    }

    /// Status code of a classifier failure, if that is what this is
    pub fn classifier_status(&self) -> Option<i32> {
        match self {
            VadError::Classifier { source, .. } => Some(source.code()),
            _ => None,
        }
    }
}

impl From<symphonia::core::errors::Error> for VadError {
    fn from(err: symphonia::core::errors::Error) -> Self {
        match err {
            symphonia::core::errors::Error::IoError(e) => VadError::Io(e),
            symphonia::core::errors::Error::Unsupported(what) => {
                VadError::UnsupportedFormat(what.to_string())
            }
            e => VadError::DecodeError(e.to_string()),
        }
    }
}

impl From<hound::Error> for VadError {
    fn from(err: hound::Error) -> Self {
        match err {
            hound::Error::IoError(e) => VadError::Io(e),
            e => VadError::EncodeError(e.to_string()),
        }
    }
}
