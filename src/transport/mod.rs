//! External I/O boundaries: the SCO byte stream and the PCM channel.
//!
//! The transcoder is driven by an external readiness loop and never
//! blocks, so both boundaries are specified in non-blocking terms:
//!
//! - [`ScoTransport`]: a duplex byte stream (typically a connected SCO
//!   socket in non-blocking mode). `ErrorKind::WouldBlock` means "no data
//!   or space right now" and is not a failure; a read of 0 bytes means the
//!   peer closed the link.
//! - [`PcmSink`] / [`PcmSource`]: the decoded-audio destination and the
//!   to-be-encoded audio origin. The sink may be detached, in which case
//!   the decode pump discards audio instead of buffering it unboundedly.
//!
//! Any `Read + Write` type works as an [`ScoTransport`] through the
//! blanket impl, which also absorbs `ErrorKind::Interrupted` so EINTR
//! never reaches the pumps.

use std::io::{self, Read, Write};

pub mod loopback;

/// Non-blocking duplex byte-stream transport carrying wire frames.
pub trait ScoTransport {
    /// Read whatever the transport currently offers into `buf`.
    fn read_sco(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Write as much of `buf` as the transport currently accepts.
    fn write_sco(&mut self, buf: &[u8]) -> io::Result<usize>;
}

impl<T: Read + Write> ScoTransport for T {
    fn read_sco(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            match self.read(buf) {
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
                r => return r,
            }
        }
    }

    fn write_sco(&mut self, buf: &[u8]) -> io::Result<usize> {
        loop {
            match self.write(buf) {
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
                r => return r,
            }
        }
    }
}

/// Destination for decoded PCM audio.
pub trait PcmSink {
    /// Deliver one decoded PCM block.
    fn write_pcm(&mut self, pcm: &[u8]) -> io::Result<()>;
}

/// Origin of PCM audio awaiting encode.
pub trait PcmSource {
    /// Read whatever PCM the source currently offers into `buf`.
    /// Returning `Ok(0)` means nothing is available right now.
    fn read_pcm(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}
