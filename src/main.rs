//! vadseg command line interface
//!
//! Runs the energy classifier over an audio or text sample file and prints
//! the voice segments it finds.

use clap::{Args, Parser, Subcommand};
use log::info;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use vad_segment::classifier::EnergyClassifier;
use vad_segment::core::{FRAME_LEN, FRAME_STEP, INPUT_SAMPLE_RATE, TARGET_SAMPLE_RATE};
use vad_segment::decoder::{self, Decoder, TextDecoder};
use vad_segment::encoder::{ClipExporter, Encoder, SegmentWriter, TimeFormat};
use vad_segment::{Pipeline, PipelineConfig, Signal, VadResult};

#[derive(Parser)]
#[command(name = "vadseg")]
#[command(about = "Voice segment extraction from frame-level VAD decisions", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect voice segments in a signal
    Detect {
        /// Input audio or text sample file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file for `start, end` lines (stdout if omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Print boundaries in seconds instead of sample indices
        #[arg(long)]
        seconds: bool,

        /// Write each voice segment as a WAV clip into this directory
        #[arg(long, value_name = "DIR")]
        export_dir: Option<PathBuf>,

        /// RMS level at which a frame counts as voice
        #[arg(long, default_value = "0.02")]
        threshold: f32,

        /// Quiet frames still reported as voice after a loud one
        #[arg(long, default_value = "0")]
        hangover: u32,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Show signal length, rate and how many frames would be scanned
    Probe {
        /// Input audio or text sample file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },
}

#[derive(Args)]
struct PipelineArgs {
    /// Treat the input as one sample per line regardless of extension
    #[arg(long)]
    text: bool,

    /// Input sample rate in Hz (used for text input)
    #[arg(long, default_value_t = INPUT_SAMPLE_RATE)]
    input_rate: u32,

    /// Rate the classifier runs at in Hz
    #[arg(long, default_value_t = TARGET_SAMPLE_RATE)]
    target_rate: u32,

    /// Frame length in target-rate samples
    #[arg(long, default_value_t = FRAME_LEN)]
    frame_len: usize,

    /// Hop between frames in target-rate samples
    #[arg(long, default_value_t = FRAME_STEP)]
    frame_step: usize,
}

impl PipelineArgs {
    fn read_signal(&self, input: &Path) -> VadResult<Signal> {
        let mut decoder: Box<dyn Decoder> = if self.text {
            Box::new(TextDecoder::new(
                io::BufReader::new(File::open(input)?),
                self.input_rate,
            ))
        } else {
            decoder::from_file(input, self.input_rate)?
        };
        decoder.read_signal()
    }

    /// Config for `signal`; audio files carry their own input rate
    fn config_for(&self, signal: &Signal) -> PipelineConfig {
        PipelineConfig::default()
            .with_rates(signal.sample_rate(), self.target_rate)
            .with_frame(self.frame_len, self.frame_step)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging
    if cli.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    info!("vadseg {}", vad_segment::VERSION);

    match cli.command {
        Commands::Detect {
            input,
            output,
            seconds,
            export_dir,
            threshold,
            hangover,
            pipeline,
        } => {
            let signal = pipeline.read_signal(&input)?;
            let config = pipeline.config_for(&signal);
            info!(
                "{:?}: {} samples @ {} Hz",
                input,
                signal.len(),
                signal.sample_rate()
            );

            let classifier = EnergyClassifier::new(threshold, hangover);
            let result = Pipeline::new(config, classifier)?.run(&signal)?;

            let format = if seconds {
                TimeFormat::Seconds
            } else {
                TimeFormat::Samples
            };
            let sink: Box<dyn Write> = match output {
                Some(path) => Box::new(BufWriter::new(File::create(path)?)),
                None => Box::new(io::stdout().lock()),
            };
            let mut writer = SegmentWriter::new(sink, format);
            writer.encode(&result)?;
            writer.finalize()?;

            if let Some(dir) = export_dir {
                let mut exporter = ClipExporter::new(&dir)?;
                exporter.encode(&result)?;
                info!("exported {} clips to {:?}", exporter.written().len(), dir);
            }
        }
        Commands::Probe { input, pipeline } => {
            let signal = pipeline.read_signal(&input)?;
            let config = pipeline.config_for(&signal);
            config.validate()?;

            let resampled_len = signal.len().div_ceil(config.interval());
            println!("File:        {:?}", input);
            println!("Samples:     {}", signal.len());
            println!("Sample rate: {} Hz", signal.sample_rate());
            println!("Duration:    {:.3} s", signal.duration().as_secs_f64());
            println!(
                "Resampled:   {} samples @ {} Hz",
                resampled_len, config.target_rate
            );
            println!(
                "Frames:      {} ({} samples, step {})",
                config.frame_count(resampled_len),
                config.frame_len,
                config.frame_step
            );
        }
    }

    Ok(())
}
