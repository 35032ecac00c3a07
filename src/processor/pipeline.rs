use super::scan::{FrameDecisions, FrameScanner};
use super::segment::{SegmentExtractor, SegmentList};
use super::ProcessingStats;
use crate::classifier::Classifier;
use crate::core::{PipelineConfig, Signal};
use crate::error::{VadError, VadResult};
use crate::filter::Decimate;
use log::{debug, info};

/// Everything a successful run produces
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Voice segment boundaries in resampled sample indices
    pub segments: SegmentList,
    /// Per-frame decisions the segments were derived from
    pub decisions: FrameDecisions,
    /// Signal after decimation; segment indices point into this
    pub resampled: Signal,
    /// Counters for the run
    pub stats: ProcessingStats,
}

/// Decimate, scan and segment one fully buffered signal
///
/// Each call to [`Pipeline::run`] starts from scratch: the classifier is reset
/// and every intermediate buffer is allocated for that run only. Any failure
/// drops those buffers and is returned as-is; there is no partial output.
pub struct Pipeline<C> {
    config: PipelineConfig,
    decimate: Decimate,
    scanner: FrameScanner,
    extractor: SegmentExtractor,
    classifier: C,
}

impl<C: Classifier> Pipeline<C> {
    /// Create a pipeline, rejecting inconsistent configurations up front
    pub fn new(config: PipelineConfig, classifier: C) -> VadResult<Self> {
        config.validate()?;

        Ok(Pipeline {
            config,
            decimate: Decimate::new(config.input_rate, config.target_rate)?,
            scanner: FrameScanner::new(config.frame_len, config.frame_step)?,
            extractor: SegmentExtractor::new(),
            classifier,
        })
    }

    /// Get the run configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Borrow the classifier
    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Mutably borrow the classifier
    pub fn classifier_mut(&mut self) -> &mut C {
        &mut self.classifier
    }

    /// Give back the classifier
    pub fn into_classifier(self) -> C {
        self.classifier
    }

    /// Run over raw samples taken at the configured input rate
    pub fn run_samples(&mut self, samples: &[f32]) -> VadResult<PipelineOutput> {
        let signal = Signal::new(samples.to_vec(), self.config.input_rate)?;
        self.run(&signal)
    }

    /// Run over `signal`, which must be at the configured input rate
    pub fn run(&mut self, signal: &Signal) -> VadResult<PipelineOutput> {
        if signal.sample_rate() != self.config.input_rate {
            return Err(VadError::InvalidSampleRate {
                rate: signal.sample_rate(),
            });
        }

        let resampled = self.resample(signal)?;
        debug!(
            "resampled {} samples @ {} Hz -> {} samples @ {} Hz",
            signal.len(),
            signal.sample_rate(),
            resampled.len(),
            resampled.sample_rate()
        );

        if resampled.len() < self.config.frame_len {
            return Err(VadError::FrameTooLong {
                frame_len: self.config.frame_len,
                signal_len: resampled.len(),
            });
        }

        let mut decisions = FrameDecisions::new();
        decisions.try_reserve(self.scanner.frame_count(resampled.len()))?;

        self.classifier.reset();
        self.scanner
            .scan_into(&resampled, &mut self.classifier, &mut decisions)?;

        let segments = self.extractor.extract(&decisions, resampled.len());

        let stats = ProcessingStats {
            input_samples: signal.len() as u64,
            resampled_samples: resampled.len() as u64,
            frames_scanned: decisions.len() as u64,
            voiced_frames: decisions.voiced() as u64,
            segments: segments.len() as u64,
        };
        info!(
            "{} frames scanned, {} voiced, {} segments",
            stats.frames_scanned, stats.voiced_frames, stats.segments
        );

        Ok(PipelineOutput {
            segments,
            decisions,
            resampled,
            stats,
        })
    }

    fn resample(&self, signal: &Signal) -> VadResult<Signal> {
        let needed = self.decimate.output_len(signal.len());

        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(needed)
            .map_err(|source| VadError::Allocation {
                buffer: "resampled signal",
                requested: needed,
                source,
            })?;
        self.decimate.decimate_into(signal.samples(), &mut buffer);

        Signal::new(buffer, self.config.target_rate)
    }
}
