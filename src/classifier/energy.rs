//! RMS-threshold classifier with a hangover counter.
//!
//! A frame is voice when its RMS reaches `threshold`. After a loud frame the
//! next `hangover_frames` quiet frames are still reported as voice so that
//! word endings are not clipped.

use super::{Classifier, ClassifierFailure};
use crate::core::Frame;

/// Simple energy-based voice classifier
#[derive(Debug, Clone)]
pub struct EnergyClassifier {
    /// RMS amplitude at or above which a frame counts as voice
    threshold: f32,
    /// Quiet frames still reported as voice after a loud one
    hangover_frames: u32,
    hangover_counter: u32,
}

impl EnergyClassifier {
    /// Create a new classifier
    pub fn new(threshold: f32, hangover_frames: u32) -> Self {
        EnergyClassifier {
            threshold,
            hangover_frames,
            hangover_counter: 0,
        }
    }

    /// Get the RMS threshold
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    fn rms(samples: &[f32]) -> f32 {
        if samples.is_empty() {
            return 0.0;
        }

        let sum_squared: f32 = samples.iter().map(|&s| s * s).sum();
        (sum_squared / samples.len() as f32).sqrt()
    }
}

impl Default for EnergyClassifier {
    fn default() -> Self {
        Self::new(0.02, 0)
    }
}

impl Classifier for EnergyClassifier {
    fn classify(&mut self, frame: &Frame<'_>) -> Result<bool, ClassifierFailure> {
        let rms = Self::rms(frame.samples());

        if !rms.is_finite() {
            return Err(ClassifierFailure::new(
                2,
                format!("non-finite energy in frame at sample {}", frame.start()),
            ));
        }

        if rms >= self.threshold {
            self.hangover_counter = self.hangover_frames;
            Ok(true)
        } else if self.hangover_counter > 0 {
            self.hangover_counter -= 1;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn reset(&mut self) {
        self.hangover_counter = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Signal;

    fn classify(classifier: &mut EnergyClassifier, samples: Vec<f32>) -> Result<bool, ClassifierFailure> {
        let len = samples.len();
        let signal = Signal::new(samples, 8000).unwrap();
        classifier.classify(&signal.frame(0, len).unwrap())
    }

    #[test]
    fn silence_below_threshold() {
        let mut classifier = EnergyClassifier::new(0.02, 0);
        assert_eq!(classify(&mut classifier, vec![0.0; 240]), Ok(false));
    }

    #[test]
    fn speech_above_threshold() {
        let mut classifier = EnergyClassifier::new(0.02, 0);
        assert_eq!(classify(&mut classifier, vec![0.5; 240]), Ok(true));
    }

    #[test]
    fn hangover_extends_voice() {
        let mut classifier = EnergyClassifier::new(0.02, 2);

        assert_eq!(classify(&mut classifier, vec![0.5; 240]), Ok(true));
        assert_eq!(classify(&mut classifier, vec![0.0; 240]), Ok(true));
        assert_eq!(classify(&mut classifier, vec![0.0; 240]), Ok(true));
        assert_eq!(classify(&mut classifier, vec![0.0; 240]), Ok(false));
    }

    #[test]
    fn reset_clears_hangover() {
        let mut classifier = EnergyClassifier::new(0.02, 5);
        classify(&mut classifier, vec![0.5; 240]).unwrap();
        classifier.reset();
        assert_eq!(classify(&mut classifier, vec![0.0; 240]), Ok(false));
    }

    #[test]
    fn nan_is_a_failure() {
        let mut classifier = EnergyClassifier::default();
        let err = classify(&mut classifier, vec![f32::NAN; 4]).unwrap_err();
        assert_eq!(err.code(), 2);
    }
}
