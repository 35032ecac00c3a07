use crate::core::Signal;
use crate::error::{VadError, VadResult};
use log::{debug, warn};

/// Naive decimator - keeps every `interval`-th sample, no anti-aliasing
#[derive(Clone, Debug)]
pub struct Decimate {
    input_rate: u32,
    output_rate: u32,
    interval: usize,
}

impl Decimate {
    /// Create a new decimator
    ///
    /// # Arguments
    /// * `input_rate` - Input sample rate in Hz
    /// * `output_rate` - Output sample rate in Hz, at most `input_rate`
    ///
    /// A rate pair that does not divide evenly is accepted; the interval is
    /// the integer quotient and the remainder is dropped.
    pub fn new(input_rate: u32, output_rate: u32) -> VadResult<Self> {
        if input_rate == 0 {
            return Err(VadError::InvalidSampleRate { rate: input_rate });
        }
        if output_rate == 0 {
            return Err(VadError::InvalidSampleRate { rate: output_rate });
        }
        if output_rate > input_rate {
            return Err(VadError::MalformedConfiguration(format!(
                "cannot decimate {} Hz up to {} Hz",
                input_rate, output_rate
            )));
        }
        if input_rate % output_rate != 0 {
            warn!(
                "{} Hz -> {} Hz is not an integer ratio, using interval {}",
                input_rate,
                output_rate,
                input_rate / output_rate
            );
        }

        Ok(Decimate {
            input_rate,
            output_rate,
            interval: (input_rate / output_rate) as usize,
        })
    }

    /// Get the input sample rate
    pub fn input_rate(&self) -> u32 {
        self.input_rate
    }

    /// Get the output sample rate
    pub fn output_rate(&self) -> u32 {
        self.output_rate
    }

    /// Input samples consumed per output sample
    pub fn interval(&self) -> usize {
        self.interval
    }

    /// Number of samples `decimate_into` produces for `input_len` samples
    pub fn output_len(&self, input_len: usize) -> usize {
        input_len.div_ceil(self.interval)
    }

    /// Append every `interval`-th sample of `input` to `output`.
    ///
    /// Returns the number of samples appended.
    pub fn decimate_into(&self, input: &[f32], output: &mut Vec<f32>) -> usize {
        let before = output.len();
        output.extend(input.iter().step_by(self.interval).copied());
        output.len() - before
    }
}

impl super::Filter for Decimate {
    fn process(&mut self, signal: &Signal) -> VadResult<Signal> {
        if signal.sample_rate() != self.input_rate {
            return Err(VadError::InvalidSampleRate {
                rate: signal.sample_rate(),
            });
        }

        if self.interval == 1 {
            // Same rate
            return Signal::new(signal.samples().to_vec(), self.output_rate);
        }

        let mut output = Vec::with_capacity(self.output_len(signal.len()));
        let written = self.decimate_into(signal.samples(), &mut output);
        debug!(
            "decimated {} -> {} samples (interval {})",
            signal.len(),
            written,
            self.interval
        );

        Signal::new(output, self.output_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Filter;

    #[test]
    fn test_decimate_creation() {
        let decimate = Decimate::new(16000, 8000).unwrap();
        assert_eq!(decimate.input_rate(), 16000);
        assert_eq!(decimate.output_rate(), 8000);
        assert_eq!(decimate.interval(), 2);
    }

    #[test]
    fn test_decimate_invalid_rate() {
        assert!(Decimate::new(0, 8000).is_err());
        assert!(Decimate::new(8000, 0).is_err());
        assert!(Decimate::new(8000, 16000).is_err());
    }

    #[test]
    fn test_remainder_is_dropped() {
        // 44100 / 16000 = 2.75 -> every second sample
        let decimate = Decimate::new(44100, 16000).unwrap();
        assert_eq!(decimate.interval(), 2);
    }

    #[test]
    fn test_identity_at_same_rate() {
        let mut decimate = Decimate::new(8000, 8000).unwrap();
        let input: Vec<f32> = (0..17).map(|i| i as f32 * 0.01).collect();
        let signal = Signal::new(input.clone(), 8000).unwrap();

        let output = decimate.process(&signal).unwrap();
        assert_eq!(output.samples(), input.as_slice());
        assert_eq!(output.sample_rate(), 8000);
    }

    #[test]
    fn test_strided_pick() {
        let decimate = Decimate::new(24000, 8000).unwrap();
        let input: Vec<f32> = (0..10).map(|i| i as f32).collect();

        let mut output = Vec::new();
        let written = decimate.decimate_into(&input, &mut output);

        // ceil(10 / 3) = 4
        assert_eq!(written, 4);
        assert_eq!(decimate.output_len(input.len()), 4);
        for (j, &sample) in output.iter().enumerate() {
            assert_eq!(sample, input[j * 3]);
        }
    }

    #[test]
    fn test_empty_input() {
        let mut decimate = Decimate::new(16000, 8000).unwrap();
        let signal = Signal::new(Vec::new(), 16000).unwrap();

        let output = decimate.process(&signal).unwrap();
        assert!(output.is_empty());
        assert_eq!(output.sample_rate(), 8000);
    }

    #[test]
    fn test_wrong_input_rate() {
        let mut decimate = Decimate::new(16000, 8000).unwrap();
        let signal = Signal::new(vec![0.0; 4], 44100).unwrap();
        assert!(decimate.process(&signal).is_err());
    }
}
