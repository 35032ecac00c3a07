//! Per-frame voice/non-voice classifiers
//!
//! The frame scanner only needs a yes/no decision per frame. Anything that
//! implements [`Classifier`] can be plugged in: a neural model behind FFI, the
//! bundled [`EnergyClassifier`], a closure wrapped with [`from_fn`], or a
//! [`ScriptedClassifier`] replaying fixed decisions in tests.

pub mod energy;

pub use energy::EnergyClassifier;

use crate::core::Frame;
use thiserror::Error;

/// Status code a classifier reports for a successful decision
pub const STATUS_NORMAL: i32 = 0;

/// Status code used when a scripted classifier runs out of decisions
pub const STATUS_EXHAUSTED: i32 = -1;

/// Non-normal status reported by a classifier for one frame
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("classifier status {code}: {message}")]
pub struct ClassifierFailure {
    code: i32,
    message: String,
}

impl ClassifierFailure {
    /// Create a failure with a status code and description
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        ClassifierFailure {
            code,
            message: message.into(),
        }
    }

    /// Status code as reported by the classifier
    pub fn code(&self) -> i32 {
        self.code
    }

    /// Human readable description
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Turn a `(status, decision)` pair from a status-code API into a result
pub fn decision_from_status(status: i32, decision: bool) -> Result<bool, ClassifierFailure> {
    if status == STATUS_NORMAL {
        Ok(decision)
    } else {
        Err(ClassifierFailure::new(status, "non-normal status"))
    }
}

/// Decides whether a single frame contains voice
pub trait Classifier {
    /// Classify one frame; `Ok(true)` means voice is present
    fn classify(&mut self, frame: &Frame<'_>) -> Result<bool, ClassifierFailure>;

    /// Clear any state carried between frames
    fn reset(&mut self) {}
}

impl<C: Classifier + ?Sized> Classifier for &mut C {
    fn classify(&mut self, frame: &Frame<'_>) -> Result<bool, ClassifierFailure> {
        (**self).classify(frame)
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}

impl<C: Classifier + ?Sized> Classifier for Box<C> {
    fn classify(&mut self, frame: &Frame<'_>) -> Result<bool, ClassifierFailure> {
        (**self).classify(frame)
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}

/// Classifier backed by a closure, see [`from_fn`]
pub struct FnClassifier<F> {
    f: F,
}

/// Wrap a closure as a [`Classifier`]
pub fn from_fn<F>(f: F) -> FnClassifier<F>
where
    F: FnMut(&Frame<'_>) -> Result<bool, ClassifierFailure>,
{
    FnClassifier { f }
}

impl<F> Classifier for FnClassifier<F>
where
    F: FnMut(&Frame<'_>) -> Result<bool, ClassifierFailure>,
{
    fn classify(&mut self, frame: &Frame<'_>) -> Result<bool, ClassifierFailure> {
        (self.f)(frame)
    }
}

/// Replays a fixed decision sequence, one entry per frame
#[derive(Debug, Clone, Default)]
pub struct ScriptedClassifier {
    decisions: Vec<bool>,
    fail_at: Option<(usize, i32)>,
    calls: usize,
}

impl ScriptedClassifier {
    /// Create a classifier answering `decisions` in order
    pub fn new(decisions: Vec<bool>) -> Self {
        ScriptedClassifier {
            decisions,
            fail_at: None,
            calls: 0,
        }
    }

    /// Report `status` instead of a decision on the frame at `index`
    pub fn failing_at(mut self, index: usize, status: i32) -> Self {
        self.fail_at = Some((index, status));
        self
    }

    /// Number of frames classified so far (including a failing one)
    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl Classifier for ScriptedClassifier {
    fn classify(&mut self, _frame: &Frame<'_>) -> Result<bool, ClassifierFailure> {
        let index = self.calls;
        self.calls += 1;

        if let Some((fail_index, status)) = self.fail_at {
            if index == fail_index {
                return Err(ClassifierFailure::new(status, "scripted failure"));
            }
        }

        self.decisions.get(index).copied().ok_or_else(|| {
            ClassifierFailure::new(
                STATUS_EXHAUSTED,
                format!("no decision scripted for frame {}", index),
            )
        })
    }

    fn reset(&mut self) {
        self.calls = 0;
    }
}
