use crate::error::{VadError, VadResult};
use crate::processor::PipelineOutput;
use hound::{WavSpec, WavWriter};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Exports every voice segment as its own mono WAV file
///
/// Files are named `segment_0000.wav`, `segment_0001.wav`, ... in the target
/// directory and hold 32-bit float samples at the resampled rate.
pub struct ClipExporter {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl ClipExporter {
    /// Create an exporter writing into `dir`, creating it if needed
    pub fn new<P: AsRef<Path>>(dir: P) -> VadResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;

        Ok(ClipExporter {
            dir,
            written: Vec::new(),
        })
    }

    /// Paths of the clips written so far
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl super::Encoder for ClipExporter {
    fn encode(&mut self, output: &PipelineOutput) -> VadResult<()> {
        let spec = WavSpec {
            channels: 1,
            sample_rate: output.resampled.sample_rate(),
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };

        for segment in output.segments.segments() {
            let path = self
                .dir
                .join(format!("segment_{:04}.wav", self.written.len()));

            let mut writer = WavWriter::create(&path, spec)
                .map_err(|e| VadError::EncodeError(e.to_string()))?;
            for &sample in segment.samples(&output.resampled) {
                writer.write_sample(sample)?;
            }
            writer.finalize()?;

            debug!("wrote {} samples to {:?}", segment.len(), path);
            self.written.push(path);
        }

        Ok(())
    }
}
