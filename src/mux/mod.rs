//! Streaming frame-to-packet-to-container multiplexing engine
//!
//! Samples flow one way through three stages: [`FrameAccumulator`] chunks
//! arbitrary-length input into fixed-size analysis frames, a codec turns
//! each frame into compressed bytes, [`PacketAssembler`] groups encoded
//! frames into transport packets, and [`StreamMultiplexer`] frames packets
//! into pages on the output sink. Control only flows backwards as error
//! propagation.

/// Analysis-frame buffering
pub mod accumulator;
/// Transport packet grouping
pub mod packet;
/// Container page framing and output
pub mod stream;

pub use accumulator::FrameAccumulator;
pub use packet::{PacketAssembler, TransportPacket};
pub use stream::StreamMultiplexer;
