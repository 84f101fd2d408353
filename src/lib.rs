//! # msbc-stream
//!
//! Real-time mSBC (Bluetooth wideband speech) transcoder bridging a
//! bidirectional SCO byte stream and a PCM audio sink/source.
//!
//! ## Architecture
//!
//! ```text
//! SCO socket ──read──► rx buffer ──frame-sync scan──► decoder ──► PCM sink
//! PCM source ──read──► pcm buffer ──encoder + H2 header──► tx buffer
//!                     tx buffer ──prebuffer / MTU scheduling──► SCO socket
//! ```
//!
//! One [`Session`] holds all state for a call leg. An external
//! readiness-driven loop (poll/epoll or equivalent) calls
//! [`Session::pump_decode`] on read-readiness and [`Session::pump_encode`]
//! / [`Session::pump_transmit`] on write-readiness or a timer tick; no
//! call blocks, and buffer capacities are fixed at construction.
//!
//! The SBC bit-level codec is out of scope: sessions are built over the
//! [`codec::FrameEncoder`] / [`codec::FrameDecoder`] traits, with
//! deterministic fixtures in [`codec::fixture`] for tests.
//!
//! ## Example
//!
//! ```
//! use msbc_stream::codec::fixture::{FixtureDecoder, FixtureEncoder};
//! use msbc_stream::transport::loopback::{CapturePcmSink, LoopbackLink, QueuedPcmSource};
//! use msbc_stream::{Config, Session};
//!
//! # fn main() -> msbc_stream::error::Result<()> {
//! let mut session = Session::new(
//!     Box::new(FixtureEncoder::new()),
//!     Box::new(FixtureDecoder::new()),
//!     Config::default(),
//! )?;
//!
//! let mut link = LoopbackLink::new();
//! let mut source = QueuedPcmSource::new();
//! let mut sink = CapturePcmSink::new();
//!
//! // One 7.5 ms PCM block encodes to one 59-byte wire frame, which is
//! // below the default two-MTU prebuffer: nothing is sent yet.
//! source.push(&[0u8; 240]);
//! session.pump_encode(&mut source)?;
//! session.pump_transmit(&mut link)?;
//! assert_eq!(link.pending(), 0);
//!
//! // A second frame crosses the threshold and the burst goes out.
//! source.push(&[0u8; 240]);
//! session.pump_encode(&mut source)?;
//! session.pump_transmit(&mut link)?;
//! assert_eq!(link.pending(), 96);
//!
//! // Loop the wire bytes back through the decode path.
//! session.pump_decode(&mut link, Some(&mut sink))?;
//! assert_eq!(sink.blocks.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod buffer;
pub mod codec;
pub mod error;
pub mod framing;
pub mod transport;

mod pump;
mod scheduler;
mod session;

pub use error::TranscodeError;
pub use pump::EncodeStatus;
pub use session::{Config, Session, DEFAULT_MTU_BYTES, DEFAULT_PREBUFFER_CHUNKS};
