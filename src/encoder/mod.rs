//! Writers for extracted voice segments

pub mod text;
pub mod wav;

pub use text::{SegmentWriter, TimeFormat};
pub use wav::ClipExporter;

use crate::processor::PipelineOutput;
use crate::error::VadResult;

/// Trait for consumers of a pipeline run
pub trait Encoder {
    /// Write out the segments of one run
    fn encode(&mut self, output: &PipelineOutput) -> VadResult<()>;

    /// Finalize encoding (flush any remaining data)
    fn finalize(&mut self) -> VadResult<()> {
        Ok(())
    }
}
