//! Signal filters applied ahead of frame scanning

pub mod decimate;

pub use decimate::Decimate;

use crate::core::Signal;
use crate::error::VadResult;

/// Trait for whole-signal filters
pub trait Filter {
    /// Process a signal through this filter, producing a new signal
    fn process(&mut self, signal: &Signal) -> VadResult<Signal>;
}
