#![warn(missing_docs)]

//! # vad-segment: voice segment extraction from per-frame VAD decisions
//!
//! Takes a fully buffered signal, decimates it to the rate a voice classifier
//! expects, slices it into overlapping fixed-size frames, asks the classifier
//! about each frame and collapses the yes/no answers into voice segment
//! boundaries.
//!
//! ## Quick Start
//!
//! ```
//! use vad_segment::classifier::ScriptedClassifier;
//! use vad_segment::{Pipeline, PipelineConfig};
//!
//! // 600 samples at 8 kHz -> four 240-sample frames, 120 apart
//! let classifier = ScriptedClassifier::new(vec![false, true, true, false]);
//! let mut pipeline = Pipeline::new(PipelineConfig::default(), classifier)?;
//!
//! let output = pipeline.run_samples(&[0.0; 600])?;
//! assert_eq!(output.segments.as_flat(), &[120, 360]);
//! # Ok::<(), vad_segment::VadError>(())
//! ```

/// Core signal types and configuration
pub mod core;
/// Error types for segmentation
pub mod error;
/// Per-frame voice classifiers
pub mod classifier;
/// Input signal readers
pub mod decoder;
/// Signal filters
pub mod filter;
/// Segment writers
pub mod encoder;
/// Frame scanning, segment extraction and the pipeline driver
pub mod processor;

// Export public types
pub use classifier::{Classifier, ClassifierFailure};
pub use crate::core::{Frame, FrameShape, PipelineConfig, Signal};
pub use error::{ErrorKind, VadError, VadResult};
pub use processor::{Pipeline, PipelineOutput, ProcessingStats, SegmentList, VoiceSegment};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
