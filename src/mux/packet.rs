use crate::error::{SpxError, SpxResult};

/// One container-level unit holding a fixed count of encoded frames
///
/// The begin-of-stream flag and the packet sequence number are stamped by
/// the multiplexer when the packet is written out.
#[derive(Debug, Clone)]
pub struct TransportPacket {
    /// Concatenated encoded-frame payloads
    pub payload: Vec<u8>,
    /// Granule position: per-channel samples encoded, less the look-ahead
    pub position: u64,
    /// Set only on the stream's terminal packet
    pub end_of_stream: bool,
}

/// Groups encoded frames into transport packets
///
/// A group is *sealed* into a packet only when the next event proves it is
/// not the terminal one: either a further frame arrives, or finalization
/// is requested and the group goes out with the end-of-stream flag. This
/// keeps the terminal packet non-empty and exactly `frames_per_packet`
/// frames long in every case.
#[derive(Debug)]
pub struct PacketAssembler {
    /// Payload bytes of the in-progress group
    buffer: Vec<u8>,
    frames_per_packet: u32,
    /// Frames in the in-progress group
    frames_in_group: u32,
    /// Frames pushed over the stream's lifetime, real and filler
    frames_total: u64,
    /// Filler frames synthesized at end of stream
    filler_frames: u64,
}

impl PacketAssembler {
    /// Create an assembler; `frames_per_packet` must be at least 1
    pub fn new(frames_per_packet: u32) -> SpxResult<Self> {
        if frames_per_packet == 0 {
            return Err(SpxError::Config(
                "Frames per packet must be at least 1".to_string(),
            ));
        }
        Ok(PacketAssembler {
            buffer: Vec::new(),
            frames_per_packet,
            frames_in_group: 0,
            frames_total: 0,
            filler_frames: 0,
        })
    }

    /// Append one encoded frame to the in-progress group
    pub fn push_frame(&mut self, payload: &[u8]) {
        self.buffer.extend_from_slice(payload);
        self.frames_in_group += 1;
        self.frames_total += 1;
    }

    /// Append one synthetic filler frame (end-of-stream padding)
    pub fn push_filler(&mut self, payload: &[u8]) {
        self.push_frame(payload);
        self.filler_frames += 1;
    }

    /// Whether the in-progress group holds a full packet's worth of frames
    pub fn group_complete(&self) -> bool {
        self.frames_in_group == self.frames_per_packet
    }

    /// Whether finalization must synthesize filler frames
    ///
    /// True until the total frame count is a positive multiple of the
    /// group size, which also guarantees a packet for an empty stream.
    pub fn needs_filler(&self) -> bool {
        self.frames_total == 0 || self.frames_total % self.frames_per_packet as u64 != 0
    }

    /// Close the in-progress group into a packet and start a new group
    pub fn seal(&mut self, position: u64, end_of_stream: bool) -> TransportPacket {
        self.frames_in_group = 0;
        TransportPacket {
            payload: std::mem::take(&mut self.buffer),
            position,
            end_of_stream,
        }
    }

    /// Configured group size
    pub fn frames_per_packet(&self) -> u32 {
        self.frames_per_packet
    }

    /// Frames pushed over the stream's lifetime, real and filler
    pub fn frames_total(&self) -> u64 {
        self.frames_total
    }

    /// Filler frames synthesized so far
    pub fn filler_frames(&self) -> u64 {
        self.filler_frames
    }
}
