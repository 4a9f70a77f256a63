//! Codec capability interface and encoder configuration

pub mod header;
pub mod pcm;

pub use header::StreamHeader;
pub use pcm::PcmCodec;

use crate::error::{SpxError, SpxResult};

/// Lowest sample rate accepted at stream open
pub const MIN_SAMPLE_RATE: u32 = 6000;
/// Highest sample rate accepted at stream open
pub const MAX_SAMPLE_RATE: u32 = 48000;

/// Capability interface for a frame-based speech codec
///
/// The container engine never performs compression itself; it sequences
/// calls against this trait. Implementations own their codec handle and
/// release it on drop.
pub trait FrameCodec {
    /// Analysis frame size in samples per channel
    fn frame_size(&self) -> usize;

    /// Encoder delay in samples, subtracted from granule positions
    fn lookahead(&self) -> u64;

    /// Encode one full analysis frame
    ///
    /// `samples` holds exactly `frame_size() * channels` interleaved
    /// values. Returns the compressed payload for this frame.
    fn encode_frame(&mut self, samples: &[i16]) -> SpxResult<Vec<u8>>;

    /// The codec's zero-information filler unit
    ///
    /// Appended in place of a real frame when a final packet group must be
    /// completed at end of stream.
    fn filler_frame(&self) -> Vec<u8>;
}

/// Encoding mode, tied to the signal bandwidth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecMode {
    /// Pick the mode from the sample rate
    Auto,
    /// Narrowband (8 kHz class signals)
    Narrowband,
    /// Wideband (16 kHz class signals)
    Wideband,
    /// Ultra-wideband (32 kHz class signals)
    UltraWideband,
}

impl CodecMode {
    /// Resolve `Auto` against a sample rate
    pub fn resolve(self, sample_rate: u32) -> CodecMode {
        match self {
            CodecMode::Auto => {
                if sample_rate > 25000 {
                    CodecMode::UltraWideband
                } else if sample_rate > 12500 {
                    CodecMode::Wideband
                } else {
                    CodecMode::Narrowband
                }
            }
            mode => mode,
        }
    }

    /// Numeric mode id as stored in the stream header
    pub fn id(&self) -> u32 {
        match self {
            CodecMode::Auto | CodecMode::Narrowband => 0,
            CodecMode::Wideband => 1,
            CodecMode::UltraWideband => 2,
        }
    }

    /// Analysis frame size for this mode, in samples per channel
    pub fn frame_size(&self) -> usize {
        match self {
            CodecMode::Auto | CodecMode::Narrowband => 160,
            CodecMode::Wideband => 320,
            CodecMode::UltraWideband => 640,
        }
    }

    /// Parse a mode name as given on the command line
    pub fn from_name(name: &str) -> SpxResult<Self> {
        match name {
            "auto" => Ok(CodecMode::Auto),
            "nb" => Ok(CodecMode::Narrowband),
            "wb" => Ok(CodecMode::Wideband),
            "uwb" => Ok(CodecMode::UltraWideband),
            other => Err(SpxError::Config(format!("Unknown mode: {}", other))),
        }
    }
}

/// Encoder configuration
///
/// Field ranges and defaults follow the encoder's parameter set: quality
/// and complexity run 0..=10, frames per packet 1..=10, bitrates are in
/// kbps with 0 meaning "mode default" / "disabled".
#[derive(Debug, Clone)]
pub struct SpxConfig {
    /// Encoding mode; `Auto` resolves from the sample rate at open
    pub mode: CodecMode,
    /// Quality, 10 is best
    pub quality: u32,
    /// Encoding complexity
    pub complexity: u32,
    /// Encoded frames per transport packet
    pub frames_per_packet: u32,
    /// Bitrate in kbps, 0 selects the mode's standard bitrate
    pub bitrate: u32,
    /// Variable bitrate
    pub vbr: bool,
    /// Average bitrate in kbps, 0 disables ABR
    pub abr_bitrate: u32,
    /// Voice activity detection
    pub vad: bool,
    /// File-based discontinuous transmission
    pub dtx: bool,
}

impl Default for SpxConfig {
    fn default() -> Self {
        SpxConfig {
            mode: CodecMode::Auto,
            quality: 3,
            complexity: 3,
            frames_per_packet: 1,
            bitrate: 0,
            vbr: false,
            abr_bitrate: 0,
            vad: false,
            dtx: false,
        }
    }
}

impl SpxConfig {
    /// Validate all fields; called once at stream open
    pub fn validate(&self) -> SpxResult<()> {
        if self.frames_per_packet < 1 || self.frames_per_packet > 10 {
            return Err(SpxError::Config(format!(
                "Frames per packet out of range (1..=10): {}",
                self.frames_per_packet
            )));
        }
        if self.quality > 10 {
            return Err(SpxError::Config(format!(
                "Quality out of range (0..=10): {}",
                self.quality
            )));
        }
        if self.complexity > 10 {
            return Err(SpxError::Config(format!(
                "Complexity out of range (0..=10): {}",
                self.complexity
            )));
        }
        if self.bitrate > 128 {
            return Err(SpxError::Config(format!(
                "Bitrate out of range (0..=128 kbps): {}",
                self.bitrate
            )));
        }
        if self.abr_bitrate > 128 {
            return Err(SpxError::Config(format!(
                "Average bitrate out of range (0..=128 kbps): {}",
                self.abr_bitrate
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_resolve_from_rate() {
        assert_eq!(CodecMode::Auto.resolve(8000), CodecMode::Narrowband);
        assert_eq!(CodecMode::Auto.resolve(12500), CodecMode::Narrowband);
        assert_eq!(CodecMode::Auto.resolve(16000), CodecMode::Wideband);
        assert_eq!(CodecMode::Auto.resolve(32000), CodecMode::UltraWideband);
        // Explicit modes are not touched by the rate
        assert_eq!(CodecMode::Narrowband.resolve(48000), CodecMode::Narrowband);
    }

    #[test]
    fn test_mode_frame_size() {
        assert_eq!(CodecMode::Narrowband.frame_size(), 160);
        assert_eq!(CodecMode::Wideband.frame_size(), 320);
        assert_eq!(CodecMode::UltraWideband.frame_size(), 640);
    }

    #[test]
    fn test_mode_from_name() {
        assert_eq!(CodecMode::from_name("nb").unwrap(), CodecMode::Narrowband);
        assert_eq!(CodecMode::from_name("auto").unwrap(), CodecMode::Auto);
        assert!(CodecMode::from_name("xb").is_err());
    }

    #[test]
    fn test_config_defaults_valid() {
        assert!(SpxConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_rejects_bad_frames_per_packet() {
        let mut config = SpxConfig::default();
        config.frames_per_packet = 0;
        assert!(config.validate().is_err());
        config.frames_per_packet = 11;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_rejects_bad_quality() {
        let mut config = SpxConfig::default();
        config.quality = 11;
        assert!(config.validate().is_err());
    }
}
