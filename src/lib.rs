#![warn(missing_docs)]

//! # speexenc-rs: Streaming Speech Codec Container Encoder
//!
//! Encodes raw PCM audio into a Speex-style container stream: samples are
//! chunked into fixed-size analysis frames, each frame is compressed by a
//! pluggable codec, encoded frames are grouped into transport packets
//! under a frames-per-packet policy, and packets are paged out to any
//! `Write` sink with granule positions, stream flags, and sequence
//! numbers intact.
//!
//! ## Features
//!
//! - **Frame accumulation** - arbitrary-length input re-chunked to the codec's frame size
//! - **Packet grouping** - configurable frames per packet with end-of-stream padding
//! - **Container framing** - identification and tag headers, paged packet output
//! - **Pluggable codecs** - the `FrameCodec` trait; uncompressed s16 built in
//! - **CLI** - `speexenc` encodes WAV files from the command line
//!
//! ## Quick Start
//!
//! ```ignore
//! use speexenc_rs::{AudioFrame, Channels, SpxConfig, StreamTags};
//! use speexenc_rs::encoder::{Encoder, SpxEncoder};
//!
//! let config = SpxConfig::default();
//! let tags = StreamTags::new().with_title("take one");
//!
//! let mut encoder =
//!     SpxEncoder::create("out.spx", 8000, Channels::Mono, &config, &tags)?;
//!
//! let samples = vec![0i16; 700];
//! let frame = AudioFrame::new(samples, 8000, Channels::Mono, 0)?;
//! encoder.encode(&frame)?;
//! encoder.finalize()?;
//! ```

// Declare modules
/// Core audio types and structures
pub mod core;
/// Error types for encoder operations
pub mod error;
/// Codec capability interface and configuration
pub mod codec;
/// Frame, packet, and page multiplexing engine
pub mod mux;
/// Container encoder implementations
pub mod encoder;
/// Stream metadata tags
pub mod tags;

// Export public types
pub use crate::core::{AudioFrame, Channels};
pub use error::{SpxError, SpxResult};
pub use codec::{CodecMode, FrameCodec, PcmCodec, SpxConfig};
pub use encoder::{Encoder, SpxEncoder, StreamStats};
pub use tags::StreamTags;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
