use crate::error::{SpxError, SpxResult};

/// Channel configuration for audio
///
/// The codec family encodes mono and stereo only; anything wider is
/// rejected at stream open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channels {
    /// Mono (1 channel)
    Mono = 1,
    /// Stereo (2 channels)
    Stereo = 2,
}

impl Channels {
    /// Create Channels from channel count
    pub fn from_count(count: u32) -> SpxResult<Self> {
        match count {
            1 => Ok(Channels::Mono),
            2 => Ok(Channels::Stereo),
            n => Err(SpxError::InvalidChannels {
                expected: 2,
                got: n,
            }),
        }
    }

    /// Get the number of channels
    pub fn count(&self) -> u32 {
        *self as u32
    }

    /// Get channel layout name
    pub fn name(&self) -> &'static str {
        match self {
            Channels::Mono => "Mono",
            Channels::Stereo => "Stereo",
        }
    }
}

/// Audio frame containing interleaved 16-bit samples
///
/// This is the caller-facing input unit. Frames may be any length; the
/// encoder re-chunks them into the codec's fixed analysis-frame size.
#[derive(Debug, Clone)]
pub struct AudioFrame {
    /// Interleaved samples (L R L R ... for stereo)
    samples: Vec<i16>,
    /// Sample rate in Hz
    sample_rate: u32,
    /// Channel layout
    channels: Channels,
    /// Frame number in the audio stream
    frame_number: u64,
}

impl AudioFrame {
    /// Create a new audio frame
    pub fn new(
        samples: Vec<i16>,
        sample_rate: u32,
        channels: Channels,
        frame_number: u64,
    ) -> SpxResult<Self> {
        if sample_rate == 0 {
            return Err(SpxError::InvalidSampleRate { rate: sample_rate });
        }

        if samples.len() % channels.count() as usize != 0 {
            return Err(SpxError::Config(
                "Sample count not divisible by channel count".to_string(),
            ));
        }

        Ok(AudioFrame {
            samples,
            sample_rate,
            channels,
            frame_number,
        })
    }

    /// Get reference to the samples
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Get owned samples (consumes frame)
    pub fn into_samples(self) -> Vec<i16> {
        self.samples
    }

    /// Get sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Get channel configuration
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Get number of samples per channel
    pub fn samples_per_channel(&self) -> usize {
        self.samples.len() / self.channels.count() as usize
    }

    /// Get frame number
    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    /// Check if frame is empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
