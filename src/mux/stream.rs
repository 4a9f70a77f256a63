use crate::error::{SpxError, SpxResult};
use crate::mux::packet::TransportPacket;
use std::io::Write;

/// Page boundary: buffered packet frames are written out once the page
/// buffer reaches this size
pub const PAGE_SIZE: usize = 4096;

/// Packet numbers 0 and 1 are reserved for the identification and
/// tag/comment headers written at stream open
const HEADER_PACKETS: u64 = 2;

const FLAG_BOS: u8 = 0x01;
const FLAG_EOS: u8 = 0x02;

/// Byte length of the framing trailer behind every packet payload
pub const PACKET_TRAILER_BYTES: usize = 17;

/// Wraps transport packets into container framing and pages them out
///
/// Each packet is serialized as payload bytes, one flag byte (bit 0
/// begin-of-stream, bit 1 end-of-stream), the 64-bit little-endian granule
/// position, and the 64-bit little-endian packet sequence number. Packets
/// accumulate in a page buffer that reaches the sink whenever the page
/// boundary is crossed or a flush is forced; packets are never reordered
/// or dropped, and sink failures propagate unchanged.
#[derive(Debug)]
pub struct StreamMultiplexer<W: Write> {
    sink: W,
    page: Vec<u8>,
    /// Next packet sequence number
    packetno: u64,
    /// Position of the most recent data packet
    last_position: u64,
    end_of_stream: bool,
    bytes_written: u64,
}

impl<W: Write> StreamMultiplexer<W> {
    /// Create a multiplexer over an output sink
    pub fn new(sink: W) -> Self {
        StreamMultiplexer {
            sink,
            page: Vec::with_capacity(PAGE_SIZE),
            packetno: 0,
            last_position: 0,
            end_of_stream: false,
            bytes_written: 0,
        }
    }

    /// Write one of the two header packets (opaque pre-built blocks)
    ///
    /// Packet 0 carries the begin-of-stream flag; both carry position 0.
    /// `flush` forces the page out immediately, which puts the
    /// identification header on its own page.
    pub fn write_header(&mut self, block: &[u8], flush: bool) -> SpxResult<()> {
        if self.packetno >= HEADER_PACKETS {
            return Err(SpxError::Stream(
                "Stream headers already written".to_string(),
            ));
        }
        let bos = self.packetno == 0;
        self.append(block, bos, false, 0);
        self.flush_page(flush)
    }

    /// Write a data packet, flushing the page at a boundary or when final
    pub fn write_packet(&mut self, packet: &TransportPacket, is_final: bool) -> SpxResult<()> {
        if self.packetno < HEADER_PACKETS {
            return Err(SpxError::Stream(
                "Data packet before stream headers".to_string(),
            ));
        }
        if self.end_of_stream {
            return Err(SpxError::Stream(
                "Packet after end of stream".to_string(),
            ));
        }
        if packet.position < self.last_position {
            return Err(SpxError::Stream(format!(
                "Granule position moved backwards: {} after {}",
                packet.position, self.last_position
            )));
        }

        self.last_position = packet.position;
        self.end_of_stream = packet.end_of_stream;
        self.append(&packet.payload, false, packet.end_of_stream, packet.position);
        self.flush_page(is_final)
    }

    /// Serialize one packet frame into the page buffer
    fn append(&mut self, payload: &[u8], bos: bool, eos: bool, position: u64) {
        self.page.extend_from_slice(payload);

        let mut flags = 0u8;
        if bos {
            flags |= FLAG_BOS;
        }
        if eos {
            flags |= FLAG_EOS;
        }
        self.page.push(flags);
        self.page.extend_from_slice(&position.to_le_bytes());
        self.page.extend_from_slice(&self.packetno.to_le_bytes());
        self.packetno += 1;
    }

    /// Write the page buffer to the sink if forced or past the boundary
    pub fn flush_page(&mut self, force: bool) -> SpxResult<()> {
        if self.page.is_empty() {
            return Ok(());
        }
        if force || self.page.len() >= PAGE_SIZE {
            self.sink.write_all(&self.page)?;
            self.bytes_written += self.page.len() as u64;
            self.page.clear();
        }
        Ok(())
    }

    /// Flush everything and hand back the sink
    pub fn finish(mut self) -> SpxResult<W> {
        self.flush_page(true)?;
        self.sink.flush()?;
        Ok(self.sink)
    }

    /// Packets accepted so far, headers included
    pub fn packets_written(&self) -> u64 {
        self.packetno
    }

    /// Bytes flushed to the sink so far
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_packet(payload: &[u8], position: u64, eos: bool) -> TransportPacket {
        TransportPacket {
            payload: payload.to_vec(),
            position,
            end_of_stream: eos,
        }
    }

    /// Split `bytes` into (payload, flags, position, packetno) frames,
    /// given the known payload length of each packet in order.
    fn parse_frames(bytes: &[u8], payload_lens: &[usize]) -> Vec<(Vec<u8>, u8, u64, u64)> {
        let mut frames = Vec::new();
        let mut at = 0;
        for &len in payload_lens {
            let payload = bytes[at..at + len].to_vec();
            at += len;
            let flags = bytes[at];
            let position = u64::from_le_bytes(bytes[at + 1..at + 9].try_into().unwrap());
            let packetno = u64::from_le_bytes(bytes[at + 9..at + 17].try_into().unwrap());
            at += PACKET_TRAILER_BYTES;
            frames.push((payload, flags, position, packetno));
        }
        assert_eq!(at, bytes.len());
        frames
    }

    #[test]
    fn test_headers_take_packets_zero_and_one() {
        let mut mux = StreamMultiplexer::new(Vec::new());
        mux.write_header(b"id", true).unwrap();
        mux.write_header(b"tags", true).unwrap();
        let sink = mux.finish().unwrap();

        let frames = parse_frames(&sink, &[2, 4]);
        assert_eq!(frames[0].1, FLAG_BOS);
        assert_eq!(frames[0].3, 0);
        assert_eq!(frames[1].1, 0);
        assert_eq!(frames[1].3, 1);
    }

    #[test]
    fn test_third_header_rejected() {
        let mut mux = StreamMultiplexer::new(Vec::new());
        mux.write_header(b"id", false).unwrap();
        mux.write_header(b"tags", false).unwrap();
        assert!(mux.write_header(b"again", false).is_err());
    }

    #[test]
    fn test_data_before_headers_rejected() {
        let mut mux = StreamMultiplexer::new(Vec::new());
        let result = mux.write_packet(&data_packet(b"x", 160, false), false);
        assert!(result.is_err());
    }

    #[test]
    fn test_data_packets_numbered_from_two() {
        let mut mux = StreamMultiplexer::new(Vec::new());
        mux.write_header(b"i", false).unwrap();
        mux.write_header(b"t", false).unwrap();
        mux.write_packet(&data_packet(b"aa", 160, false), false).unwrap();
        mux.write_packet(&data_packet(b"bb", 320, true), true).unwrap();
        let sink = mux.finish().unwrap();

        let frames = parse_frames(&sink, &[1, 1, 2, 2]);
        assert_eq!(frames[2].3, 2);
        assert_eq!(frames[2].2, 160);
        assert_eq!(frames[2].1, 0);
        assert_eq!(frames[3].3, 3);
        assert_eq!(frames[3].2, 320);
        assert_eq!(frames[3].1, FLAG_EOS);
    }

    #[test]
    fn test_page_buffered_until_boundary() {
        let mut mux = StreamMultiplexer::new(Vec::new());
        mux.write_header(b"i", false).unwrap();
        mux.write_header(b"t", false).unwrap();
        mux.write_packet(&data_packet(&[0; 64], 160, false), false).unwrap();
        // Everything still below the page boundary, nothing on the sink yet
        assert_eq!(mux.bytes_written(), 0);

        mux.write_packet(&data_packet(&[0; PAGE_SIZE], 320, false), false).unwrap();
        assert!(mux.bytes_written() > 0);
    }

    #[test]
    fn test_forced_flush_writes_short_page() {
        let mut mux = StreamMultiplexer::new(Vec::new());
        mux.write_header(b"i", true).unwrap();
        assert_eq!(mux.bytes_written() as usize, 1 + PACKET_TRAILER_BYTES);
    }

    #[test]
    fn test_position_regression_rejected() {
        let mut mux = StreamMultiplexer::new(Vec::new());
        mux.write_header(b"i", false).unwrap();
        mux.write_header(b"t", false).unwrap();
        mux.write_packet(&data_packet(b"a", 320, false), false).unwrap();
        let result = mux.write_packet(&data_packet(b"b", 160, false), false);
        assert!(result.is_err());
    }

    #[test]
    fn test_no_packets_after_end_of_stream() {
        let mut mux = StreamMultiplexer::new(Vec::new());
        mux.write_header(b"i", false).unwrap();
        mux.write_header(b"t", false).unwrap();
        mux.write_packet(&data_packet(b"a", 160, true), true).unwrap();
        let result = mux.write_packet(&data_packet(b"b", 320, false), false);
        assert!(result.is_err());
    }

    #[test]
    fn test_equal_position_allowed() {
        // A muted tail can leave the terminal position equal to the
        // previous packet's position
        let mut mux = StreamMultiplexer::new(Vec::new());
        mux.write_header(b"i", false).unwrap();
        mux.write_header(b"t", false).unwrap();
        mux.write_packet(&data_packet(b"a", 160, false), false).unwrap();
        assert!(mux.write_packet(&data_packet(b"b", 160, true), true).is_ok());
    }
}
