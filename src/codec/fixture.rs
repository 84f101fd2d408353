//! Deterministic fixture codecs for tests.
//!
//! None of these touch real SBC bitstreams. [`FixtureEncoder`] and
//! [`FixtureDecoder`] share the mSBC geometry and a trivial reversible
//! payload scheme, so a loopback pipeline can be verified end to end.
//! [`SilenceEncoder`] emits constant all-zero payloads regardless of its
//! input, useful for soaking the transmit path without a PCM source that
//! produces meaningful audio. Nothing in the crate's production paths
//! references this module.

use super::{
    CodecError, FrameDecoder, FrameEncoder, MSBC_FRAME_LEN, MSBC_PCM_BLOCK_LEN, MSBC_SYNCWORD,
};

/// How many PCM bytes of a block the fixture payload can carry verbatim:
/// the frame minus the syncword and a running counter byte.
const CARRIED: usize = MSBC_FRAME_LEN - 2;

/// Encoder with mSBC geometry and a trivially invertible payload.
///
/// Frame layout: `[0xAD, counter, pcm[0..55]]`. The counter increments per
/// frame so tests can observe encode order independently of the wire-level
/// frame-index marker.
#[derive(Debug, Default)]
pub struct FixtureEncoder {
    counter: u8,
    frame_len: usize,
}

impl FixtureEncoder {
    pub fn new() -> Self {
        Self {
            counter: 0,
            frame_len: MSBC_FRAME_LEN,
        }
    }

    /// A fixture that claims a non-standard frame length, for exercising
    /// the construction-time consistency check.
    pub fn with_frame_len(frame_len: usize) -> Self {
        Self {
            counter: 0,
            frame_len,
        }
    }
}

impl FrameEncoder for FixtureEncoder {
    fn pcm_block_len(&self) -> usize {
        MSBC_PCM_BLOCK_LEN
    }

    fn frame_len(&self) -> usize {
        self.frame_len
    }

    fn encode(&mut self, pcm: &[u8], out: &mut [u8]) -> Result<usize, CodecError> {
        if pcm.len() < MSBC_PCM_BLOCK_LEN {
            return Err(CodecError::ShortBuffer {
                needed: MSBC_PCM_BLOCK_LEN,
                got: pcm.len(),
            });
        }
        if out.len() < self.frame_len {
            return Err(CodecError::ShortBuffer {
                needed: self.frame_len,
                got: out.len(),
            });
        }
        out[0] = MSBC_SYNCWORD;
        out[1] = self.counter;
        let carried = CARRIED.min(self.frame_len.saturating_sub(2));
        out[2..2 + carried].copy_from_slice(&pcm[..carried]);
        for b in &mut out[2 + carried..self.frame_len] {
            *b = 0;
        }
        self.counter = self.counter.wrapping_add(1);
        Ok(self.frame_len)
    }
}

/// Decoder matching [`FixtureEncoder`]: checks the syncword, restores the
/// carried PCM prefix and zero-fills the rest of the block.
#[derive(Debug, Default)]
pub struct FixtureDecoder;

impl FixtureDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl FrameDecoder for FixtureDecoder {
    fn frame_len(&self) -> usize {
        MSBC_FRAME_LEN
    }

    fn pcm_block_len(&self) -> usize {
        MSBC_PCM_BLOCK_LEN
    }

    fn decode(&mut self, frame: &[u8], pcm_out: &mut [u8]) -> Result<usize, CodecError> {
        if frame.len() < MSBC_FRAME_LEN {
            return Err(CodecError::ShortBuffer {
                needed: MSBC_FRAME_LEN,
                got: frame.len(),
            });
        }
        if pcm_out.len() < MSBC_PCM_BLOCK_LEN {
            return Err(CodecError::ShortBuffer {
                needed: MSBC_PCM_BLOCK_LEN,
                got: pcm_out.len(),
            });
        }
        if frame[0] != MSBC_SYNCWORD {
            return Err(CodecError::CorruptFrame);
        }
        pcm_out[..CARRIED].copy_from_slice(&frame[2..2 + CARRIED]);
        for b in &mut pcm_out[CARRIED..MSBC_PCM_BLOCK_LEN] {
            *b = 0;
        }
        Ok(MSBC_PCM_BLOCK_LEN)
    }
}

/// Encoder that ignores its PCM input and emits silence frames.
#[derive(Debug, Default)]
pub struct SilenceEncoder;

impl SilenceEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl FrameEncoder for SilenceEncoder {
    fn pcm_block_len(&self) -> usize {
        MSBC_PCM_BLOCK_LEN
    }

    fn frame_len(&self) -> usize {
        MSBC_FRAME_LEN
    }

    fn encode(&mut self, _pcm: &[u8], out: &mut [u8]) -> Result<usize, CodecError> {
        if out.len() < MSBC_FRAME_LEN {
            return Err(CodecError::ShortBuffer {
                needed: MSBC_FRAME_LEN,
                got: out.len(),
            });
        }
        out[0] = MSBC_SYNCWORD;
        for b in &mut out[1..MSBC_FRAME_LEN] {
            *b = 0;
        }
        Ok(MSBC_FRAME_LEN)
    }
}

/// Encoder that always fails, for exercising the encode-error path.
#[derive(Debug, Default)]
pub struct FailingEncoder;

impl FrameEncoder for FailingEncoder {
    fn pcm_block_len(&self) -> usize {
        MSBC_PCM_BLOCK_LEN
    }

    fn frame_len(&self) -> usize {
        MSBC_FRAME_LEN
    }

    fn encode(&mut self, _pcm: &[u8], _out: &mut [u8]) -> Result<usize, CodecError> {
        Err(CodecError::Rejected("fixture failure".to_string()))
    }
}

/// Decoder that always fails, for exercising the framing-recovery path.
#[derive(Debug, Default)]
pub struct FailingDecoder;

impl FrameDecoder for FailingDecoder {
    fn frame_len(&self) -> usize {
        MSBC_FRAME_LEN
    }

    fn pcm_block_len(&self) -> usize {
        MSBC_PCM_BLOCK_LEN
    }

    fn decode(&mut self, _frame: &[u8], _pcm_out: &mut [u8]) -> Result<usize, CodecError> {
        Err(CodecError::CorruptFrame)
    }
}
