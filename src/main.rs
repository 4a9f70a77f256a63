//! speexenc Command Line Interface
//!
//! Encodes WAV audio into a Speex-style container stream.

use clap::{Parser, Subcommand};
use log::info;
use speexenc_rs::encoder::{Encoder, SpxEncoder};
use speexenc_rs::{AudioFrame, Channels, CodecMode, SpxConfig, SpxError, StreamTags};
use std::path::PathBuf;

/// Samples per channel fed to the encoder per chunk
const CHUNK_SAMPLES: usize = 4096;

#[derive(Parser)]
#[command(name = "speexenc")]
#[command(about = "Speech codec container encoder", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a WAV file into a container stream
    Encode {
        /// Input WAV file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Encoding mode: auto, nb, wb, uwb
        #[arg(short, long, default_value = "auto")]
        mode: String,

        /// Quality (10: best)
        #[arg(short, long, default_value_t = 3)]
        quality: u32,

        /// Encoding complexity
        #[arg(long, default_value_t = 3)]
        complexity: u32,

        /// Frames per packet
        #[arg(short = 'n', long, default_value_t = 1)]
        frames_per_packet: u32,

        /// Bitrate in kbps (0: mode default)
        #[arg(short, long, default_value_t = 0)]
        bitrate: u32,

        /// Variable bitrate
        #[arg(long)]
        vbr: bool,

        /// Average bitrate in kbps (0: disabled)
        #[arg(long, default_value_t = 0)]
        abr_bitrate: u32,

        /// Voice activity detection
        #[arg(long)]
        vad: bool,

        /// File-based discontinuous transmission
        #[arg(long)]
        dtx: bool,

        /// Title tag
        #[arg(long)]
        title: Option<String>,

        /// Artist tag
        #[arg(long)]
        artist: Option<String>,

        /// Album tag
        #[arg(long)]
        album: Option<String>,

        /// Comment tag
        #[arg(long)]
        comment: Option<String>,
    },
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

    info!("speexenc {}", speexenc_rs::VERSION);

    match cli.command {
        Some(Commands::Encode {
            input,
            output,
            mode,
            quality,
            complexity,
            frames_per_packet,
            bitrate,
            vbr,
            abr_bitrate,
            vad,
            dtx,
            title,
            artist,
            album,
            comment,
        }) => {
            let config = SpxConfig {
                mode: CodecMode::from_name(&mode)?,
                quality,
                complexity,
                frames_per_packet,
                bitrate,
                vbr,
                abr_bitrate,
                vad,
                dtx,
            };

            let mut tags = StreamTags::new();
            tags.title = title;
            tags.artist = artist;
            tags.album = album;
            tags.comment = comment;

            run_encode(&input, &output, &config, &tags)?;
        }
        None => {
            println!("speexenc {} - Speech codec container encoder", speexenc_rs::VERSION);
            println!("\nEncodes WAV audio into a Speex-style container stream.");
            println!("\nUsage:");
            println!("  speexenc encode <FILE> -o <FILE> [options]");
            println!("\nRun with --help for detailed options");
        }
    }

    Ok(())
}

fn run_encode(
    input: &PathBuf,
    output: &PathBuf,
    config: &SpxConfig,
    tags: &StreamTags,
) -> speexenc_rs::SpxResult<()> {
    let mut reader = hound::WavReader::open(input)?;
    let spec = reader.spec();
    let channels = Channels::from_count(spec.channels as u32)?;

    info!(
        "Input: {} Hz, {}, {} bits",
        spec.sample_rate,
        channels.name(),
        spec.bits_per_sample
    );

    let mut encoder =
        SpxEncoder::create(output, spec.sample_rate, channels, config, tags)?;

    let chunk_len = CHUNK_SAMPLES * channels.count() as usize;
    let mut buffer: Vec<i16> = Vec::with_capacity(chunk_len);
    let mut frame_number = 0u64;

    // Drain the reader in chunks, converting to 16-bit as we go
    match (spec.sample_format, spec.bits_per_sample) {
        (hound::SampleFormat::Int, 16) => {
            for sample in reader.samples::<i16>() {
                buffer.push(sample?);
                if buffer.len() == chunk_len {
                    frame_number = flush_chunk(&mut encoder, &mut buffer, &spec, frame_number)?;
                }
            }
        }
        (hound::SampleFormat::Float, 32) => {
            for sample in reader.samples::<f32>() {
                let clamped = (sample? * 32767.0).clamp(-32768.0, 32767.0);
                buffer.push(clamped as i16);
                if buffer.len() == chunk_len {
                    frame_number = flush_chunk(&mut encoder, &mut buffer, &spec, frame_number)?;
                }
            }
        }
        (format, bits) => {
            return Err(SpxError::Config(format!(
                "Unsupported WAV sample format: {:?} {} bits",
                format, bits
            )));
        }
    }

    if !buffer.is_empty() {
        flush_chunk(&mut encoder, &mut buffer, &spec, frame_number)?;
    }

    encoder.finalize()?;

    let stats = encoder.stats();
    println!(
        "Encoded {} samples into {} packets ({} frames, {} filler)",
        stats.samples_submitted,
        stats.packets_written,
        stats.frames_encoded,
        stats.filler_frames
    );

    Ok(())
}

fn flush_chunk<W: std::io::Write>(
    encoder: &mut SpxEncoder<speexenc_rs::PcmCodec, W>,
    buffer: &mut Vec<i16>,
    spec: &hound::WavSpec,
    frame_number: u64,
) -> speexenc_rs::SpxResult<u64> {
    let channels = Channels::from_count(spec.channels as u32)?;
    let frame = AudioFrame::new(
        std::mem::take(buffer),
        spec.sample_rate,
        channels,
        frame_number,
    )?;
    encoder.encode(&frame)?;
    Ok(frame_number + 1)
}
