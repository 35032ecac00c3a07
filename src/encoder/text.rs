use crate::error::VadResult;
use crate::processor::PipelineOutput;
use std::io::Write;

/// How segment boundaries are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeFormat {
    /// Sample indices into the resampled signal
    #[default]
    Samples,
    /// Seconds with millisecond precision
    Seconds,
}

/// Writes one `start, end` line per segment
pub struct SegmentWriter<W: Write> {
    out: W,
    format: TimeFormat,
    lines: usize,
}

impl<W: Write> SegmentWriter<W> {
    /// Create a writer over `out`
    pub fn new(out: W, format: TimeFormat) -> Self {
        SegmentWriter {
            out,
            format,
            lines: 0,
        }
    }

    /// Number of segment lines written so far
    pub fn lines_written(&self) -> usize {
        self.lines
    }

    /// Give back the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> super::Encoder for SegmentWriter<W> {
    fn encode(&mut self, output: &PipelineOutput) -> VadResult<()> {
        let rate = output.resampled.sample_rate();

        for segment in output.segments.segments() {
            match self.format {
                TimeFormat::Samples => writeln!(self.out, "{}, {}", segment.start, segment.end)?,
                TimeFormat::Seconds => writeln!(
                    self.out,
                    "{:.3}, {:.3}",
                    segment.start_time(rate).as_secs_f64(),
                    segment.end_time(rate).as_secs_f64()
                )?,
            }
            self.lines += 1;
        }

        Ok(())
    }

    fn finalize(&mut self) -> VadResult<()> {
        self.out.flush()?;
        Ok(())
    }
}
