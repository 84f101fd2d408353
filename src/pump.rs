//! Decode and encode pumps.
//!
//! Both pumps are driven by the external readiness loop: the decode pump
//! on SCO read-readiness, the encode pump on PCM availability or a timer
//! tick. Each runs to a natural stopping point (buffer exhausted or space
//! exhausted) and returns; neither blocks.
//!
//! The receive direction tolerates arbitrary garbage: the scanner hunts
//! for the H2 sync byte and the SBC syncword, resynchronizing one byte at
//! a time, and a decode failure on a frame that looked valid drops the
//! whole receive buffer rather than guessing where the next boundary is.
//! There is no packet-loss concealment to benefit from a finer recovery.

use std::io::ErrorKind;

use crate::error::{Result, TranscodeError};
use crate::framing::{self, H2_HEADER_LEN};
use crate::session::Session;
use crate::transport::{PcmSink, PcmSource, ScoTransport};

/// Outcome of one encode-pump invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeStatus {
    /// The pump drained what it could; nothing more to do right now.
    Idle,
    /// The PCM backlog and the transmit queue are both full. The caller
    /// should ask for another write-readiness event to drain `tx` before
    /// pulling more PCM.
    Backlogged,
}

impl Session {
    /// Pull bytes from the transport and decode every complete frame
    /// found, forwarding PCM to `sink`.
    ///
    /// With no sink attached, everything read (and anything already
    /// buffered) is discarded: audio with no destination is dropped, not
    /// held. A would-block read is a no-op; a read of 0 bytes reports the
    /// transport closed, leaving buffer state untouched.
    pub fn pump_decode<T: ScoTransport + ?Sized>(
        &mut self,
        transport: &mut T,
        sink: Option<&mut dyn PcmSink>,
    ) -> Result<()> {
        if !self.rx.is_full() {
            let n = match transport.read_sco(self.rx.spare_mut()) {
                Ok(0) => return Err(TranscodeError::TransportClosed),
                Ok(n) => n,
                Err(ref e) if e.kind() == ErrorKind::WouldBlock => 0,
                Err(e) => return Err(e.into()),
            };
            self.rx.commit(n);
        }

        match sink {
            Some(sink) => self.scan_rx(sink),
            None => {
                self.rx.clear();
                Ok(())
            }
        }
    }

    /// Frame-sync scan over the receive buffer.
    ///
    /// At each cursor position the window either begins a valid frame
    /// (decode it and jump a whole frame forward) or it does not (advance
    /// one byte). Unconsumed tail bytes are compacted to the buffer front.
    fn scan_rx(&mut self, sink: &mut dyn PcmSink) -> Result<()> {
        let wire = self.wire_frame_len;
        let mut cursor = 0;

        while self.rx.len() - cursor >= wire {
            let window = &self.rx.as_slice()[cursor..cursor + wire];
            if !framing::starts_frame(window) {
                cursor += 1;
                continue;
            }

            match self
                .decoder
                .decode(&window[H2_HEADER_LEN..], &mut self.pcm_scratch)
            {
                Ok(n) => {
                    let written = sink.write_pcm(&self.pcm_scratch[..n]);
                    cursor += wire;
                    if let Err(e) = written {
                        self.rx.consume_front(cursor);
                        return Err(e.into());
                    }
                }
                Err(e) => {
                    // Fail fast: with no sequence validation there is no
                    // safe way to trust the rest of the buffer.
                    tracing::warn!(
                        "Decode error, dropping {} buffered SCO bytes: {}",
                        self.rx.len(),
                        e
                    );
                    self.rx.clear();
                    return Ok(());
                }
            }
        }

        self.rx.consume_front(cursor);
        Ok(())
    }

    /// Pull PCM from `source` and encode as many frames as fit in the
    /// transmit buffer.
    ///
    /// A source failure aborts before anything touches `tx`. Returns
    /// [`EncodeStatus::Backlogged`] when both the PCM backlog and `tx`
    /// are full, so the caller knows draining the transport is what will
    /// unblock progress.
    pub fn pump_encode(&mut self, source: &mut dyn PcmSource) -> Result<EncodeStatus> {
        if !self.pcm_in.is_full() {
            let n = source.read_pcm(self.pcm_in.spare_mut())?;
            self.pcm_in.commit(n);
        }

        self.encode_pending()?;

        if self.pcm_in.is_full() && self.tx.free() < self.wire_frame_len {
            Ok(EncodeStatus::Backlogged)
        } else {
            Ok(EncodeStatus::Idle)
        }
    }

    /// Encode buffered PCM blocks into wire frames appended to `tx`.
    ///
    /// Each frame is built directly in the transmit buffer's spare tail
    /// and only committed whole, so `tx` never holds a partial frame --
    /// including after an encoder failure, which aborts the pass and
    /// surfaces to the caller with everything already consumed compacted
    /// away.
    fn encode_pending(&mut self) -> Result<()> {
        let block = self.encoder.pcm_block_len();
        let wire = self.wire_frame_len;
        let payload = wire - H2_HEADER_LEN;
        let mut consumed = 0;

        while self.pcm_in.len() - consumed >= block && self.tx.free() >= wire {
            let pcm = &self.pcm_in.as_slice()[consumed..consumed + block];
            let header = framing::h2_header(self.frame_index);

            let spare = self.tx.spare_mut();
            spare[..H2_HEADER_LEN].copy_from_slice(&header);

            match self.encoder.encode(pcm, &mut spare[H2_HEADER_LEN..wire]) {
                Ok(n) if n == payload => {
                    self.tx.commit(wire);
                    self.frame_index = (self.frame_index + 1) % 4;
                    consumed += block;
                }
                Ok(n) => {
                    self.pcm_in.consume_front(consumed);
                    return Err(TranscodeError::Codec(
                        crate::codec::CodecError::BadFrameLength {
                            expected: payload,
                            got: n,
                        },
                    ));
                }
                Err(e) => {
                    self.pcm_in.consume_front(consumed);
                    return Err(e.into());
                }
            }
        }

        self.pcm_in.consume_front(consumed);
        Ok(())
    }
}
