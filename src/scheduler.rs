//! Transmit scheduling with startup prebuffering.
//!
//! SCO links drain at a fixed rate; sending the very first frame the
//! moment it is encoded leaves the peer's jitter buffer empty and the
//! stream underruns immediately. The scheduler therefore withholds
//! transmission until a configured number of MTU-sized chunks has
//! accumulated, flushes that burst back-to-back, and from then on emits
//! exactly one MTU chunk per invocation.

use std::io::ErrorKind;

use crate::error::Result;
use crate::session::Session;
use crate::transport::ScoTransport;

impl Session {
    /// Write encoded data to the transport under the prebuffer policy.
    ///
    /// Before the prebuffer has gone out: a no-op until `tx` holds
    /// `prebuffer_chunks * mtu_bytes` bytes, then that many MTU writes
    /// back-to-back. Afterwards: one MTU chunk per call, when available.
    ///
    /// A would-block write leaves the unsent bytes queued for the next
    /// readiness event and is not an error. A short write removes only
    /// the accepted prefix. Any other transport error surfaces as fatal
    /// for this attempt; bytes the transport already accepted stay
    /// removed.
    pub fn pump_transmit<T: ScoTransport + ?Sized>(&mut self, transport: &mut T) -> Result<()> {
        let mtu = self.config.mtu_bytes;

        if !self.prebuffer_sent {
            if self.tx.len() < self.config.prebuffer_chunks * mtu {
                return Ok(());
            }
            for _ in 0..self.config.prebuffer_chunks {
                let accepted = self.write_chunk(transport)?;
                if accepted > 0 {
                    // The gate commits open only once the transport has
                    // taken bytes; a burst attempt stalled entirely on
                    // would-block is retried whole on the next event.
                    self.prebuffer_sent = true;
                }
                if accepted < mtu {
                    break;
                }
            }
            return Ok(());
        }

        if self.tx.len() >= mtu {
            self.write_chunk(transport)?;
        }
        Ok(())
    }

    /// Write one MTU-sized chunk (or whatever shorter tail is queued)
    /// from the front of `tx`. Returns the number of bytes the transport
    /// accepted; a would-block write accepts zero.
    fn write_chunk<T: ScoTransport + ?Sized>(&mut self, transport: &mut T) -> Result<usize> {
        let chunk = self.config.mtu_bytes.min(self.tx.len());
        if chunk == 0 {
            return Ok(0);
        }

        let accepted = match transport.write_sco(&self.tx.as_slice()[..chunk]) {
            Ok(n) => n,
            Err(ref e) if e.kind() == ErrorKind::WouldBlock => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        if accepted < chunk {
            tracing::debug!("Short SCO write: {} of {} bytes accepted", accepted, chunk);
        }
        self.tx.consume_front(accepted);
        Ok(accepted)
    }
}
