use crate::core::Channels;

/// Accumulates caller-supplied samples into fixed-size analysis frames
///
/// Input arrives in runs of arbitrary length; the accumulator copies them
/// into an internal buffer of exactly one analysis frame and reports when
/// the frame is full. A frame only ever leaves the accumulator at full
/// size: partial content is either topped up by later input or zero-padded
/// once, at end of stream.
#[derive(Debug)]
pub struct FrameAccumulator {
    /// Interleaved sample buffer, capacity is one analysis frame
    buffer: Vec<i16>,
    /// Interleaved samples currently buffered
    filled: usize,
    /// Per-channel samples accepted over the stream's lifetime
    submitted: u64,
    channels: u32,
}

impl FrameAccumulator {
    /// Create an accumulator for `frame_size` samples per channel
    pub fn new(frame_size: usize, channels: Channels) -> Self {
        let capacity = frame_size * channels.count() as usize;
        FrameAccumulator {
            buffer: vec![0; capacity],
            filled: 0,
            submitted: 0,
            channels: channels.count(),
        }
    }

    /// Copy input into the frame buffer, up to its remaining capacity
    ///
    /// Returns the number of interleaved samples consumed; callers loop,
    /// draining a full frame between iterations.
    pub fn fill(&mut self, input: &[i16]) -> usize {
        let space = self.buffer.len() - self.filled;
        let take = space.min(input.len());
        self.buffer[self.filled..self.filled + take].copy_from_slice(&input[..take]);
        self.filled += take;
        self.submitted += take as u64 / self.channels as u64;
        take
    }

    /// Whether a complete analysis frame is buffered
    pub fn is_full(&self) -> bool {
        self.filled == self.buffer.len()
    }

    /// Whether no samples are buffered
    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }

    /// Take the buffered full frame, resetting the accumulator
    ///
    /// Callers check `is_full` first; partial frames only leave through
    /// `take_padded`.
    pub fn take(&mut self) -> Vec<i16> {
        debug_assert!(self.is_full());
        self.filled = 0;
        self.buffer.clone()
    }

    /// Take a partial frame zero-padded to full size (end of stream only)
    pub fn take_padded(&mut self) -> Vec<i16> {
        self.buffer[self.filled..].fill(0);
        self.filled = 0;
        self.buffer.clone()
    }

    /// Per-channel samples accepted so far
    pub fn samples_submitted(&self) -> u64 {
        self.submitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_partial() {
        let mut acc = FrameAccumulator::new(4, Channels::Mono);
        assert_eq!(acc.fill(&[1, 2]), 2);
        assert!(!acc.is_full());
        assert!(!acc.is_empty());
        assert_eq!(acc.samples_submitted(), 2);
    }

    #[test]
    fn test_fill_across_boundary() {
        let mut acc = FrameAccumulator::new(4, Channels::Mono);
        let input = [1, 2, 3, 4, 5, 6];
        let consumed = acc.fill(&input);
        assert_eq!(consumed, 4);
        assert!(acc.is_full());

        assert_eq!(acc.take(), vec![1, 2, 3, 4]);
        assert!(acc.is_empty());

        let consumed = acc.fill(&input[consumed..]);
        assert_eq!(consumed, 2);
        assert!(!acc.is_full());
        assert_eq!(acc.samples_submitted(), 6);
    }

    #[test]
    fn test_stereo_counts_per_channel() {
        let mut acc = FrameAccumulator::new(4, Channels::Stereo);
        // 8 interleaved samples fill a 4-sample stereo frame
        assert_eq!(acc.fill(&[0; 8]), 8);
        assert!(acc.is_full());
        assert_eq!(acc.samples_submitted(), 4);
    }

    #[test]
    fn test_take_padded_mutes_tail() {
        let mut acc = FrameAccumulator::new(4, Channels::Mono);
        acc.fill(&[7, 7]);
        assert_eq!(acc.take_padded(), vec![7, 7, 0, 0]);
        assert!(acc.is_empty());
    }

    #[test]
    fn test_take_resets_for_next_frame() {
        let mut acc = FrameAccumulator::new(2, Channels::Mono);
        acc.fill(&[1, 2]);
        assert_eq!(acc.take(), vec![1, 2]);
        acc.fill(&[3, 4]);
        assert_eq!(acc.take(), vec![3, 4]);
        assert_eq!(acc.samples_submitted(), 4);
    }
}
