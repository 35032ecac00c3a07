use crate::core::Signal;
use crate::error::{VadError, VadResult};
use log::debug;
use std::io::BufRead;

/// Reads one real-valued sample per line
///
/// Blank lines are skipped. When a line holds comma-separated fields only the
/// first one is read.
pub struct TextDecoder<R> {
    reader: R,
    sample_rate: u32,
}

impl<R: BufRead> TextDecoder<R> {
    /// Create a decoder over `reader`, tagging the result with `sample_rate`
    pub fn new(reader: R, sample_rate: u32) -> Self {
        TextDecoder {
            reader,
            sample_rate,
        }
    }

    fn parse_line(line: &str, number: usize) -> VadResult<Option<f32>> {
        let field = line.split(',').next().unwrap_or("").trim();
        if field.is_empty() {
            return Ok(None);
        }

        field.parse::<f64>().map(|v| Some(v as f32)).map_err(|e| VadError::Parse {
            line: number,
            message: format!("{:?}: {}", field, e),
        })
    }
}

impl<R: BufRead> super::Decoder for TextDecoder<R> {
    fn read_signal(&mut self) -> VadResult<Signal> {
        let mut samples = Vec::new();
        let mut line = String::new();
        let mut number = 0usize;

        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                break;
            }
            number += 1;

            if let Some(sample) = Self::parse_line(&line, number)? {
                samples.push(sample);
            }
        }

        debug!("read {} samples from {} lines", samples.len(), number);
        Signal::new(samples, self.sample_rate)
    }
}
