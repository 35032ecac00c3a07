//! Input signal readers

pub mod symphonia;
pub mod text;

pub use symphonia::SymphoniaDecoder;
pub use text::TextDecoder;

use crate::core::Signal;
use crate::error::VadResult;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Trait for readers that produce one fully buffered mono signal
pub trait Decoder {
    /// Read the whole input
    fn read_signal(&mut self) -> VadResult<Signal>;
}

/// Whether `path` looks like a plain-text sample file
pub fn is_text_file<P: AsRef<Path>>(path: P) -> bool {
    matches!(
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref(),
        Some("txt" | "csv")
    )
}

/// Create a decoder from a file path
///
/// Text files carry no rate of their own and are tagged with `text_rate`.
pub fn from_file<P: AsRef<Path>>(path: P, text_rate: u32) -> VadResult<Box<dyn Decoder>> {
    let path = path.as_ref();
    if is_text_file(path) {
        let reader = BufReader::new(File::open(path)?);
        Ok(Box::new(TextDecoder::new(reader, text_rate)))
    } else {
        SymphoniaDecoder::from_file(path).map(|d| Box::new(d) as Box<dyn Decoder>)
    }
}

/// Average interleaved channels down to mono, appending to `out`
pub fn downmix_into(interleaved: &[f32], channels: usize, out: &mut Vec<f32>) {
    if channels <= 1 {
        out.extend_from_slice(interleaved);
        return;
    }

    out.extend(
        interleaved
            .chunks_exact(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downmix_stereo() {
        // [L1, R1, L2, R2]
        let mut out = Vec::new();
        downmix_into(&[0.0, 1.0, 0.5, 0.5], 2, &mut out);

        assert_eq!(out.len(), 2);
        assert!((out[0] - 0.5).abs() < 0.001);
        assert!((out[1] - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_downmix_mono_passthrough() {
        let mut out = vec![9.0];
        downmix_into(&[0.1, 0.2], 1, &mut out);
        assert_eq!(out, vec![9.0, 0.1, 0.2]);
    }

    #[test]
    fn test_is_text_file() {
        assert!(is_text_file("data.txt"));
        assert!(is_text_file("DATA.CSV"));
        assert!(!is_text_file("speech.wav"));
        assert!(!is_text_file("noext"));
    }
}
