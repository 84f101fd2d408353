//! Codec session: all state for one bidirectional mSBC stream.
//!
//! A [`Session`] owns the codec handles, the three bounded buffers and the
//! framing counters for a single call leg. It is created when the call leg
//! comes up and dropped when it ends; teardown releases the codec handles
//! and performs no I/O.
//!
//! # Concurrency
//!
//! The session has no interior locking. The external readiness loop must
//! invoke the pumps one at a time per session; a multi-threaded host binds
//! each session to one worker.

use crate::buffer::ByteQueue;
use crate::codec::{FrameDecoder, FrameEncoder};
use crate::error::{Result, TranscodeError};
use crate::framing::{H2_HEADER_LEN, MSBC_WIRE_FRAME_LEN};

/// Default bytes per transmit call, matching common SCO MTUs.
pub const DEFAULT_MTU_BYTES: usize = 48;

/// Default number of MTU chunks withheld before the first send.
pub const DEFAULT_PREBUFFER_CHUNKS: usize = 2;

/// Streaming parameters, fixed at session construction.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bytes written to the SCO transport per transmit call.
    pub mtu_bytes: usize,
    /// Number of MTU chunks accumulated before the first send. Guards
    /// against immediate playback underrun at stream start.
    pub prebuffer_chunks: usize,
    /// Receive buffer capacity in bytes.
    pub rx_capacity: usize,
    /// Transmit buffer capacity in bytes.
    pub tx_capacity: usize,
    /// PCM staging buffer capacity in bytes.
    pub pcm_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mtu_bytes: DEFAULT_MTU_BYTES,
            prebuffer_chunks: DEFAULT_PREBUFFER_CHUNKS,
            rx_capacity: 512,
            tx_capacity: 768,
            pcm_capacity: 1024,
        }
    }
}

impl Config {
    /// Config with a specific MTU and prebuffer depth, default capacities.
    pub fn with_mtu(mtu_bytes: usize, prebuffer_chunks: usize) -> Self {
        Self {
            mtu_bytes,
            prebuffer_chunks,
            ..Self::default()
        }
    }
}

/// All mutable state for one bidirectional stream.
///
/// Buffer layout and counters:
///
/// ```text
/// SCO ──read──► rx ──scan/decode──► PCM sink
/// PCM source ──read──► pcm_in ──encode──► tx ──scheduled write──► SCO
/// ```
///
/// `tx` only ever holds whole wire frames between pump invocations;
/// `rx` may legitimately hold partial frames or garbage between frames.
pub struct Session {
    pub(crate) encoder: Box<dyn FrameEncoder>,
    pub(crate) decoder: Box<dyn FrameDecoder>,
    pub(crate) rx: ByteQueue,
    pub(crate) tx: ByteQueue,
    pub(crate) pcm_in: ByteQueue,
    /// Scratch block for decoder output; sized once at construction.
    pub(crate) pcm_scratch: Box<[u8]>,
    /// Cyclic frame-index counter, `0..=3`, one step per encoded frame.
    pub(crate) frame_index: u8,
    /// False until the first prebuffered burst has gone out.
    pub(crate) prebuffer_sent: bool,
    /// Bytes per frame in `tx`: H2 header plus the encoder's native frame.
    pub(crate) wire_frame_len: usize,
    pub(crate) config: Config,
}

impl Session {
    /// Bind a session around the given codec handles.
    ///
    /// Validates the codec geometry against the buffer capacities and
    /// zeroes all stream state. An encoder whose frame length disagrees
    /// with the expected mSBC wire constant is logged but accepted;
    /// genuinely unusable parameters (zero-length frames, buffers too
    /// small for a single frame or the prebuffer) fail construction, and
    /// no partial session survives such a failure.
    pub fn new(
        encoder: Box<dyn FrameEncoder>,
        decoder: Box<dyn FrameDecoder>,
        config: Config,
    ) -> Result<Self> {
        if config.mtu_bytes == 0 {
            return Err(TranscodeError::InvalidConfig("mtu_bytes is 0".to_string()));
        }
        if encoder.frame_len() == 0 || encoder.pcm_block_len() == 0 {
            return Err(TranscodeError::InvalidConfig(
                "encoder reports zero-length frames".to_string(),
            ));
        }
        if decoder.frame_len() == 0 || decoder.pcm_block_len() == 0 {
            return Err(TranscodeError::InvalidConfig(
                "decoder reports zero-length frames".to_string(),
            ));
        }

        let wire_frame_len = H2_HEADER_LEN + encoder.frame_len();
        if wire_frame_len != MSBC_WIRE_FRAME_LEN {
            // Inherited tolerance: a mismatched frame length is suspicious
            // but not fatal here.
            tracing::warn!(
                "Encoder frame length {} does not give the expected {}-byte wire frame",
                encoder.frame_len(),
                MSBC_WIRE_FRAME_LEN
            );
        }
        if decoder.frame_len() != encoder.frame_len() {
            tracing::warn!(
                "Decoder frame length {} differs from encoder frame length {}",
                decoder.frame_len(),
                encoder.frame_len()
            );
        }

        if config.rx_capacity < wire_frame_len {
            return Err(TranscodeError::InvalidConfig(format!(
                "rx_capacity {} cannot hold one {}-byte wire frame",
                config.rx_capacity, wire_frame_len
            )));
        }
        let tx_floor = wire_frame_len.max(config.prebuffer_chunks * config.mtu_bytes);
        if config.tx_capacity < tx_floor {
            return Err(TranscodeError::InvalidConfig(format!(
                "tx_capacity {} below required {} bytes",
                config.tx_capacity, tx_floor
            )));
        }
        if config.pcm_capacity < encoder.pcm_block_len() {
            return Err(TranscodeError::InvalidConfig(format!(
                "pcm_capacity {} cannot hold one {}-byte PCM block",
                config.pcm_capacity,
                encoder.pcm_block_len()
            )));
        }

        let pcm_scratch = vec![0u8; decoder.pcm_block_len()].into_boxed_slice();
        let rx = ByteQueue::new(config.rx_capacity);
        let tx = ByteQueue::new(config.tx_capacity);
        let pcm_in = ByteQueue::new(config.pcm_capacity);

        Ok(Self {
            encoder,
            decoder,
            rx,
            tx,
            pcm_in,
            pcm_scratch,
            frame_index: 0,
            prebuffer_sent: false,
            wire_frame_len,
            config,
        })
    }

    /// Occupied bytes in the receive buffer.
    #[inline]
    pub fn rx_len(&self) -> usize {
        self.rx.len()
    }

    /// Occupied bytes in the transmit buffer.
    #[inline]
    pub fn tx_len(&self) -> usize {
        self.tx.len()
    }

    /// Occupied bytes in the PCM staging buffer.
    #[inline]
    pub fn pcm_in_len(&self) -> usize {
        self.pcm_in.len()
    }

    /// Current cyclic frame index (`0..=3`).
    #[inline]
    pub fn frame_index(&self) -> u8 {
        self.frame_index
    }

    /// Whether the startup prebuffer burst has gone out.
    #[inline]
    pub fn prebuffer_sent(&self) -> bool {
        self.prebuffer_sent
    }

    /// Bytes per encoded frame in the transmit buffer.
    #[inline]
    pub fn wire_frame_len(&self) -> usize {
        self.wire_frame_len
    }

    /// Streaming parameters this session was built with.
    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }
}
