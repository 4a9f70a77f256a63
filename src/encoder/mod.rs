//! Container encoder implementations

pub mod spx;

pub use spx::SpxEncoder;

use crate::core::AudioFrame;
use crate::error::SpxResult;

/// Running statistics over an encoder's lifetime
#[derive(Debug, Clone, Copy, Default)]
pub struct StreamStats {
    /// Frames encoded from actual audio, the muted final frame included
    pub frames_encoded: u64,
    /// Synthetic filler frames appended at end of stream
    pub filler_frames: u64,
    /// Data packets written, headers not counted
    pub packets_written: u64,
    /// Per-channel samples submitted by the caller
    pub samples_submitted: u64,
}

/// Trait for streaming container encoders
pub trait Encoder {
    /// Encode an audio frame into the stream
    fn encode(&mut self, frame: &AudioFrame) -> SpxResult<()>;

    /// Drain and close the stream; a second call is a no-op
    fn finalize(&mut self) -> SpxResult<()>;

    /// Get the current statistics
    fn stats(&self) -> StreamStats;
}
