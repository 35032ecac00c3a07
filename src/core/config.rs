use crate::error::{VadError, VadResult};

/// Sample rate of the raw input signal in the reference deployment (Hz)
pub const INPUT_SAMPLE_RATE: u32 = 8_000;

/// Sample rate the classifier expects (Hz)
pub const TARGET_SAMPLE_RATE: u32 = 8_000;

/// Frame length in target-rate samples (30 ms at 8 kHz)
pub const FRAME_LEN: usize = 240;

/// Hop between frame starts in target-rate samples (15 ms at 8 kHz)
pub const FRAME_STEP: usize = 120;

/// Rates and frame geometry for one pipeline run
///
/// Frame length and hop are expressed in the target rate's sample domain,
/// i.e. after decimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Rate of the raw input signal in Hz
    pub input_rate: u32,
    /// Rate after decimation in Hz
    pub target_rate: u32,
    /// Samples per frame
    pub frame_len: usize,
    /// Samples between consecutive frame starts
    pub frame_step: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            input_rate: INPUT_SAMPLE_RATE,
            target_rate: TARGET_SAMPLE_RATE,
            frame_len: FRAME_LEN,
            frame_step: FRAME_STEP,
        }
    }
}

impl PipelineConfig {
    /// Build a config from frame and hop durations in milliseconds
    pub fn from_durations(
        input_rate: u32,
        target_rate: u32,
        frame_ms: u32,
        step_ms: u32,
    ) -> VadResult<Self> {
        let to_samples = |ms: u32| (target_rate as u64 * ms as u64 / 1000) as usize;

        let config = PipelineConfig {
            input_rate,
            target_rate,
            frame_len: to_samples(frame_ms),
            frame_step: to_samples(step_ms),
        };
        config.validate()?;
        Ok(config)
    }

    /// Set input and target rates
    pub fn with_rates(mut self, input_rate: u32, target_rate: u32) -> Self {
        self.input_rate = input_rate;
        self.target_rate = target_rate;
        self
    }

    /// Set frame length and hop
    pub fn with_frame(mut self, frame_len: usize, frame_step: usize) -> Self {
        self.frame_len = frame_len;
        self.frame_step = frame_step;
        self
    }

    /// Decimation interval (input samples per output sample)
    pub fn interval(&self) -> usize {
        if self.target_rate == 0 {
            return 0;
        }
        (self.input_rate / self.target_rate) as usize
    }

    /// Check that rates form an integer ratio and the frame geometry is usable
    pub fn validate(&self) -> VadResult<()> {
        if self.input_rate == 0 {
            return Err(VadError::InvalidSampleRate {
                rate: self.input_rate,
            });
        }
        if self.target_rate == 0 {
            return Err(VadError::InvalidSampleRate {
                rate: self.target_rate,
            });
        }
        if self.target_rate > self.input_rate {
            return Err(VadError::MalformedConfiguration(format!(
                "target rate {} Hz exceeds input rate {} Hz",
                self.target_rate, self.input_rate
            )));
        }
        if self.input_rate % self.target_rate != 0 {
            return Err(VadError::MalformedConfiguration(format!(
                "input rate {} Hz is not an integer multiple of target rate {} Hz",
                self.input_rate, self.target_rate
            )));
        }
        if self.frame_len == 0 {
            return Err(VadError::MalformedConfiguration(
                "frame length must be at least one sample".to_string(),
            ));
        }
        if self.frame_step == 0 {
            return Err(VadError::MalformedConfiguration(
                "frame step must be at least one sample".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of frames a scan over `signal_len` target-rate samples produces
    pub fn frame_count(&self, signal_len: usize) -> usize {
        if self.frame_step == 0 || self.frame_len == 0 || signal_len < self.frame_len {
            return 0;
        }
        (signal_len - self.frame_len) / self.frame_step + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_reference_setup() {
        let config = PipelineConfig::default();
        assert_eq!(config.input_rate, 8000);
        assert_eq!(config.target_rate, 8000);
        assert_eq!(config.frame_len, 240);
        assert_eq!(config.frame_step, 120);
        assert_eq!(config.interval(), 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_durations() {
        let config = PipelineConfig::from_durations(16000, 8000, 30, 15).unwrap();
        assert_eq!(config.frame_len, 240);
        assert_eq!(config.frame_step, 120);
        assert_eq!(config.interval(), 2);
    }

    #[test]
    fn test_non_integer_ratio_rejected() {
        let config = PipelineConfig::default().with_rates(44100, 16000);
        let err = config.validate().unwrap_err();
        assert!(matches!(err, VadError::MalformedConfiguration(_)));
    }

    #[test]
    fn test_upsampling_rejected() {
        let config = PipelineConfig::default().with_rates(8000, 16000);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_geometry_rejected() {
        assert!(PipelineConfig::default().with_frame(0, 120).validate().is_err());
        assert!(PipelineConfig::default().with_frame(240, 0).validate().is_err());
        assert!(PipelineConfig::default().with_rates(0, 8000).validate().is_err());
    }

    #[test]
    fn test_frame_count() {
        let config = PipelineConfig::default();
        assert_eq!(config.frame_count(100), 0);
        assert_eq!(config.frame_count(240), 1);
        assert_eq!(config.frame_count(359), 1);
        assert_eq!(config.frame_count(360), 2);
        assert_eq!(config.frame_count(600), 4);
    }
}
