use crate::codec::{CodecMode, FrameCodec};
use crate::core::Channels;
use crate::error::{SpxError, SpxResult};

/// Terminator byte standing in for a frame with no information content
const FILLER_UNIT: u8 = 0x0f;

/// Uncompressed frame codec
///
/// Passes 16-bit samples through as little-endian bytes, one analysis
/// frame at a time. This is the built-in concrete variant of
/// [`FrameCodec`]; compressed codecs with native bindings plug into the
/// same trait.
pub struct PcmCodec {
    frame_size: usize,
    channels: Channels,
}

impl PcmCodec {
    /// Create a codec with an explicit analysis-frame size
    pub fn new(frame_size: usize, channels: Channels) -> SpxResult<Self> {
        if frame_size == 0 {
            return Err(SpxError::Config(
                "Analysis frame size must be nonzero".to_string(),
            ));
        }
        Ok(PcmCodec {
            frame_size,
            channels,
        })
    }

    /// Create a codec with the frame size of the given mode
    pub fn for_mode(mode: CodecMode, channels: Channels) -> SpxResult<Self> {
        PcmCodec::new(mode.frame_size(), channels)
    }

    /// Get the channel configuration
    pub fn channels(&self) -> Channels {
        self.channels
    }
}

impl FrameCodec for PcmCodec {
    fn frame_size(&self) -> usize {
        self.frame_size
    }

    fn lookahead(&self) -> u64 {
        0
    }

    fn encode_frame(&mut self, samples: &[i16]) -> SpxResult<Vec<u8>> {
        let expected = self.frame_size * self.channels.count() as usize;
        if samples.len() != expected {
            return Err(SpxError::Encode(format!(
                "Analysis frame has {} samples, expected {}",
                samples.len(),
                expected
            )));
        }

        let mut payload = Vec::with_capacity(samples.len() * 2);
        for &sample in samples {
            payload.extend_from_slice(&sample.to_le_bytes());
        }
        Ok(payload)
    }

    fn filler_frame(&self) -> Vec<u8> {
        vec![FILLER_UNIT]
    }
}
