//! Core signal types and run configuration

/// Signal and frame view types
pub mod signal;
/// Rates, frame geometry and reference constants
pub mod config;

pub use config::{PipelineConfig, FRAME_LEN, FRAME_STEP, INPUT_SAMPLE_RATE, TARGET_SAMPLE_RATE};
pub use signal::{Frame, FrameShape, Signal};
