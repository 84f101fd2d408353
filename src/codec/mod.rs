//! Codec boundary - the opaque mSBC encode/decode primitives.
//!
//! The bit-level SBC codec is an external collaborator. This module pins
//! down only what the transcoder needs from it: per-frame geometry and a
//! block-in, frame-out (or frame-in, block-out) call. A binding to a real
//! codec library implements [`FrameEncoder`] and [`FrameDecoder`]; the
//! [`fixture`] module ships deterministic stand-ins for tests.
//!
//! # mSBC geometry
//!
//! The wideband-speech profile locks the codec to 16 kHz mono s16le with
//! 8 subbands, 15 blocks and bitpool 26: every 7.5 ms block of 120 samples
//! (240 bytes of PCM) encodes to exactly one 57-byte frame beginning with
//! the SBC syncword `0xAD`.

use thiserror::Error;

pub mod fixture;

/// SBC syncword, the first byte of every mSBC frame.
pub const MSBC_SYNCWORD: u8 = 0xAD;

/// Encoded mSBC frame length in bytes.
pub const MSBC_FRAME_LEN: usize = 57;

/// PCM bytes per mSBC frame: 120 samples, 16-bit, mono.
pub const MSBC_PCM_BLOCK_LEN: usize = 240;

/// Errors raised at the codec boundary.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The decoder could not make sense of the frame contents.
    #[error("corrupt frame")]
    CorruptFrame,

    /// Input or output buffer shorter than the codec's native size.
    #[error("short buffer: needed {needed} bytes, got {got}")]
    ShortBuffer { needed: usize, got: usize },

    /// The codec produced a frame of an unexpected length.
    #[error("bad frame length: expected {expected} bytes, got {got}")]
    BadFrameLength { expected: usize, got: usize },

    /// The codec rejected the operation for a library-specific reason.
    #[error("codec rejected input: {0}")]
    Rejected(String),

    /// Binding the codec with the mSBC parameter set failed.
    #[error("codec initialization failed: {0}")]
    Init(String),
}

/// One direction of the codec: PCM block in, encoded frame out.
///
/// The reported sizes must stay constant for the life of the codec; the
/// session derives its wire frame length from them at construction.
pub trait FrameEncoder {
    /// PCM bytes consumed per encoded frame.
    fn pcm_block_len(&self) -> usize;

    /// Encoded frame length in bytes.
    fn frame_len(&self) -> usize;

    /// Encode exactly one PCM block into `out`.
    ///
    /// `pcm` holds at least [`pcm_block_len`](Self::pcm_block_len) bytes
    /// and `out` at least [`frame_len`](Self::frame_len) bytes. Returns
    /// the number of frame bytes written, which must equal `frame_len`.
    fn encode(&mut self, pcm: &[u8], out: &mut [u8]) -> Result<usize, CodecError>;
}

/// The other direction: encoded frame in, PCM block out.
pub trait FrameDecoder {
    /// Encoded frame length in bytes.
    fn frame_len(&self) -> usize;

    /// PCM bytes produced per decoded frame.
    fn pcm_block_len(&self) -> usize;

    /// Decode one frame into `pcm_out`, returning the number of PCM bytes
    /// written.
    fn decode(&mut self, frame: &[u8], pcm_out: &mut [u8]) -> Result<usize, CodecError>;
}
