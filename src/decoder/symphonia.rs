use crate::core::Signal;
use crate::error::{VadError, VadResult};
use log::{debug, warn};
use std::fs::File;
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader};
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Symphonia-based audio file reader, downmixing to mono
pub struct SymphoniaDecoder {
    /// Container reader for the audio source
    reader: Box<dyn FormatReader>,
    /// Codec state for the selected track
    decoder: Box<dyn symphonia::core::codecs::Decoder>,
    /// Track being decoded
    track_id: u32,
    /// Sample rate
    sample_rate: u32,
}

impl SymphoniaDecoder {
    /// Create decoder from file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> VadResult<Self> {
        let path = path.as_ref();
        let file = Box::new(File::open(path)?);

        let mss = MediaSourceStream::new(file, Default::default());

        // Probe the file to detect format
        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|ext| ext.to_str()) {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| VadError::UnsupportedFormat(e.to_string()))?;

        let reader = probed.format;

        // Find the first audio track
        let track = reader
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| VadError::DecodeError("No audio track found".to_string()))?;

        let track_id = track.id;
        let sample_rate = track
            .codec_params
            .sample_rate
            .ok_or_else(|| VadError::DecodeError("Unknown sample rate".to_string()))?;

        let decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &DecoderOptions::default())?;

        debug!("opened {:?}: track {} @ {} Hz", path, track_id, sample_rate);

        Ok(SymphoniaDecoder {
            reader,
            decoder,
            track_id,
            sample_rate,
        })
    }

    /// Get sample rate
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

impl super::Decoder for SymphoniaDecoder {
    fn read_signal(&mut self) -> VadResult<Signal> {
        let mut samples = Vec::new();

        loop {
            let packet = match self.reader.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(ref e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(e) => return Err(e.into()),
            };

            if packet.track_id() != self.track_id {
                continue;
            }

            let decoded = match self.decoder.decode(&packet) {
                Ok(decoded) => decoded,
                Err(SymphoniaError::DecodeError(msg)) => {
                    // Corrupt packet, keep going
                    warn!("skipping undecodable packet: {}", msg);
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            let spec = *decoded.spec();
            let mut buffer = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
            buffer.copy_interleaved_ref(decoded);

            super::downmix_into(buffer.samples(), spec.channels.count(), &mut samples);
        }

        debug!("decoded {} mono samples", samples.len());
        Signal::new(samples, self.sample_rate)
    }
}
