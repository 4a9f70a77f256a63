//! Identification header carried as the stream's first packet
//!
//! The layout matches the classic Speex identification header: an 8-byte
//! magic, a 20-byte version string, then thirteen little-endian 32-bit
//! fields, 80 bytes in total. The block is assembled in memory so the
//! writer never has to seek back to patch sizes.

/// Serialized header length in bytes
pub const HEADER_BYTES: usize = 80;

const MAGIC: &[u8; 8] = b"Speex   ";
const VERSION_FIELD_BYTES: usize = 20;
const VERSION_ID: u32 = 1;
const BITSTREAM_VERSION: u32 = 4;

/// Stream identification header (container packet 0)
#[derive(Debug, Clone)]
pub struct StreamHeader {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Numeric mode id (0 narrowband, 1 wideband, 2 ultra-wideband)
    pub mode_id: u32,
    /// Number of channels
    pub channels: u32,
    /// Bitrate in bits per second, -1 when the mode default applies
    pub bitrate: i32,
    /// Analysis frame size in samples per channel
    pub frame_size: u32,
    /// Variable bitrate flag
    pub vbr: bool,
    /// Encoded frames per transport packet
    pub frames_per_packet: u32,
}

impl StreamHeader {
    /// Serialize to the 80-byte wire form
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut block = Vec::with_capacity(HEADER_BYTES);

        block.extend_from_slice(MAGIC);

        // Version string, zero-padded to its fixed field width
        let version = env!("CARGO_PKG_VERSION").as_bytes();
        let take = version.len().min(VERSION_FIELD_BYTES);
        block.extend_from_slice(&version[..take]);
        block.resize(MAGIC.len() + VERSION_FIELD_BYTES, 0);

        for field in [
            VERSION_ID,
            HEADER_BYTES as u32,
            self.sample_rate,
            self.mode_id,
            BITSTREAM_VERSION,
            self.channels,
            self.bitrate as u32,
            self.frame_size,
            self.vbr as u32,
            self.frames_per_packet,
            0, // extra headers
            0, // reserved
            0, // reserved
        ] {
            block.extend_from_slice(&field.to_le_bytes());
        }

        debug_assert_eq!(block.len(), HEADER_BYTES);
        block
    }
}
