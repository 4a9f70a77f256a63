use crate::codec::{
    FrameCodec, MAX_SAMPLE_RATE, MIN_SAMPLE_RATE, PcmCodec, SpxConfig, StreamHeader,
};
use crate::core::{AudioFrame, Channels};
use crate::encoder::{Encoder, StreamStats};
use crate::error::{SpxError, SpxResult};
use crate::mux::{FrameAccumulator, PacketAssembler, StreamMultiplexer};
use crate::tags::{self, StreamTags};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Streaming container encoder
///
/// Drives the full pipeline: caller samples are chunked into analysis
/// frames, each frame is encoded by the codec capability, encoded frames
/// are grouped into transport packets, and packets are paged out through
/// the multiplexer. The stream opens with the identification and tag
/// headers and closes with a single end-of-stream packet; see
/// [`finalize`](Encoder::finalize).
///
/// A completed packet group is held back until the next frame arrives or
/// the stream is finalized, so the terminal packet always carries the
/// end-of-stream flag with a full group of frames.
pub struct SpxEncoder<C: FrameCodec, W: Write> {
    codec: C,
    /// Taken on finalize; `None` marks a closed stream
    mux: Option<StreamMultiplexer<W>>,
    accumulator: FrameAccumulator,
    assembler: PacketAssembler,
    sample_rate: u32,
    channels: Channels,
    /// Data packets sealed so far
    packets: u64,
    /// Output path, kept for close-with-discard
    path: Option<PathBuf>,
}

fn check_sample_rate(rate: u32) -> SpxResult<()> {
    if rate < MIN_SAMPLE_RATE || rate > MAX_SAMPLE_RATE {
        return Err(SpxError::InvalidSampleRate { rate });
    }
    Ok(())
}

impl SpxEncoder<PcmCodec, BufWriter<File>> {
    /// Create a file-backed encoder with the built-in codec
    ///
    /// The codec mode is resolved from the configuration and the sample
    /// rate; all configuration is validated before the file is created.
    pub fn create<P: AsRef<Path>>(
        path: P,
        sample_rate: u32,
        channels: Channels,
        config: &SpxConfig,
        stream_tags: &StreamTags,
    ) -> SpxResult<Self> {
        config.validate()?;
        check_sample_rate(sample_rate)?;

        let mode = config.mode.resolve(sample_rate);
        let codec = PcmCodec::for_mode(mode, channels)?;
        let file = File::create(path.as_ref())?;

        let mut encoder = SpxEncoder::new(
            codec,
            BufWriter::new(file),
            sample_rate,
            channels,
            config,
            stream_tags,
        )?;
        encoder.path = Some(path.as_ref().to_path_buf());
        Ok(encoder)
    }
}

impl<C: FrameCodec, W: Write> SpxEncoder<C, W> {
    /// Create an encoder over an arbitrary codec and sink
    ///
    /// Writes the identification header (packet 0, flushed onto its own
    /// page) and the tag header (packet 1) before returning.
    pub fn new(
        codec: C,
        sink: W,
        sample_rate: u32,
        channels: Channels,
        config: &SpxConfig,
        stream_tags: &StreamTags,
    ) -> SpxResult<Self> {
        config.validate()?;
        check_sample_rate(sample_rate)?;

        let header = StreamHeader {
            sample_rate,
            mode_id: config.mode.resolve(sample_rate).id(),
            channels: channels.count(),
            bitrate: if config.bitrate > 0 {
                (config.bitrate * 1000) as i32
            } else {
                -1
            },
            frame_size: codec.frame_size() as u32,
            vbr: config.vbr,
            frames_per_packet: config.frames_per_packet,
        };

        let mut mux = StreamMultiplexer::new(sink);
        mux.write_header(&header.to_bytes(), true)?;
        mux.write_header(&tags::comment_block(stream_tags, false), true)?;

        let accumulator = FrameAccumulator::new(codec.frame_size(), channels);
        let assembler = PacketAssembler::new(config.frames_per_packet)?;

        Ok(SpxEncoder {
            codec,
            mux: Some(mux),
            accumulator,
            assembler,
            sample_rate,
            channels,
            packets: 0,
            path: None,
        })
    }

    /// Advance the pipeline by one event
    ///
    /// Order matters: a pending complete group is sealed before any new
    /// frame is encoded, and at end of stream the partial frame is muted
    /// and the group padded before the final seal.
    fn step(&mut self, end_of_stream: bool) -> SpxResult<()> {
        if end_of_stream {
            // Mute the rest of the last frame and encode it
            if !self.accumulator.is_empty() {
                let frame = self.accumulator.take_padded();
                let payload = self.codec.encode_frame(&frame)?;
                self.assembler.push_frame(&payload);
            }

            // Insert filler frames until the last group is complete
            while self.assembler.needs_filler() {
                let filler = self.codec.filler_frame();
                self.assembler.push_filler(&filler);
            }
        }

        if self.assembler.group_complete() {
            let position = if end_of_stream {
                self.accumulator
                    .samples_submitted()
                    .saturating_sub(self.codec.lookahead())
            } else {
                (self.assembler.frames_total() * self.codec.frame_size() as u64)
                    .saturating_sub(self.codec.lookahead())
            };

            let packet = self.assembler.seal(position, end_of_stream);
            self.packets += 1;

            let mux = self.mux.as_mut().ok_or_else(|| {
                SpxError::Stream("Encoder already finalized".to_string())
            })?;
            mux.write_packet(&packet, end_of_stream)?;
        }

        if end_of_stream {
            return Ok(());
        }

        if self.accumulator.is_full() {
            let frame = self.accumulator.take();
            let payload = self.codec.encode_frame(&frame)?;
            self.assembler.push_frame(&payload);
        }
        Ok(())
    }

    /// Drain and close, handing back the sink when the stream was open
    fn close_stream(&mut self) -> SpxResult<Option<W>> {
        if self.mux.is_none() {
            return Ok(None);
        }

        let drained = self.step(true);

        // The multiplexer is torn down even when draining failed; the
        // caller must treat the output as truncated in that case.
        let mux = match self.mux.take() {
            Some(mux) => mux,
            None => return drained.map(|_| None),
        };
        match drained {
            Ok(()) => Ok(Some(mux.finish()?)),
            Err(e) => {
                let _ = mux.finish();
                Err(e)
            }
        }
    }

    /// Drain, close, and return the sink
    ///
    /// Errors if the stream was already finalized.
    pub fn into_sink(mut self) -> SpxResult<W> {
        match self.close_stream()? {
            Some(sink) => Ok(sink),
            None => Err(SpxError::Stream(
                "Encoder already finalized".to_string(),
            )),
        }
    }

    /// Drain and close, then delete the output file
    ///
    /// Cancellation is modeled as close-with-discard: the stream is fully
    /// drained so the codec ends in a consistent state, and the persisted
    /// bytes are removed afterwards. Sink-only encoders skip the removal.
    pub fn finalize_and_discard(&mut self) -> SpxResult<()> {
        let drained = Encoder::finalize(self);
        let removed = match self.path.take() {
            Some(path) => fs::remove_file(path).map_err(SpxError::from),
            None => Ok(()),
        };
        drained.and(removed)
    }

    /// Get the sample rate
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Get the channel configuration
    pub fn channels(&self) -> Channels {
        self.channels
    }
}

impl<C: FrameCodec, W: Write> Encoder for SpxEncoder<C, W> {
    fn encode(&mut self, frame: &AudioFrame) -> SpxResult<()> {
        if self.mux.is_none() {
            return Err(SpxError::Stream(
                "Encoder already finalized".to_string(),
            ));
        }

        if frame.sample_rate() != self.sample_rate {
            return Err(SpxError::InvalidSampleRate {
                rate: frame.sample_rate(),
            });
        }

        if frame.channels() != self.channels {
            return Err(SpxError::InvalidChannels {
                expected: self.channels.count(),
                got: frame.channels().count(),
            });
        }

        let mut input = frame.samples();
        while !input.is_empty() {
            let consumed = self.accumulator.fill(input);
            input = &input[consumed..];
            self.step(false)?;
        }
        Ok(())
    }

    fn finalize(&mut self) -> SpxResult<()> {
        self.close_stream().map(|_| ())
    }

    fn stats(&self) -> StreamStats {
        StreamStats {
            frames_encoded: self.assembler.frames_total() - self.assembler.filler_frames(),
            filler_frames: self.assembler.filler_frames(),
            packets_written: self.packets,
            samples_submitted: self.accumulator.samples_submitted(),
        }
    }
}
