//! In-memory transport and PCM endpoints for tests.
//!
//! [`LoopbackLink`] is a single-direction byte pipe with the error
//! semantics of a non-blocking socket: reads on an empty queue return
//! `WouldBlock`, and knobs exist to force short reads, short writes and
//! write stalls. Feeding a session's transmit output back into its own
//! receive path through one link gives a full wire round trip without a
//! real SCO socket.

use std::io::{self, Read, Write};

use bytes::{Buf, BytesMut};

use super::{PcmSink, PcmSource};

/// In-memory byte pipe with non-blocking-socket semantics.
#[derive(Debug, Default)]
pub struct LoopbackLink {
    queue: BytesMut,
    read_chunk: Option<usize>,
    write_limit: Option<usize>,
    block_writes: bool,
    /// Accepted length of every write, in order.
    pub writes: Vec<usize>,
}

impl LoopbackLink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver at most `n` bytes per read, simulating a transport that
    /// hands out partial frames.
    pub fn with_read_chunk(n: usize) -> Self {
        Self {
            read_chunk: Some(n),
            ..Self::default()
        }
    }

    /// Accept at most `n` bytes per write (short writes).
    pub fn set_write_limit(&mut self, n: Option<usize>) {
        self.write_limit = n;
    }

    /// When set, writes fail with `WouldBlock` instead of queueing.
    pub fn set_block_writes(&mut self, block: bool) {
        self.block_writes = block;
    }

    /// Bytes currently queued in the link.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Queue bytes directly, as if the peer had sent them.
    pub fn inject(&mut self, data: &[u8]) {
        self.queue.extend_from_slice(data);
    }
}

impl Read for LoopbackLink {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.queue.is_empty() {
            return Err(io::ErrorKind::WouldBlock.into());
        }
        let mut n = buf.len().min(self.queue.len());
        if let Some(chunk) = self.read_chunk {
            n = n.min(chunk);
        }
        buf[..n].copy_from_slice(&self.queue[..n]);
        self.queue.advance(n);
        Ok(n)
    }
}

impl Write for LoopbackLink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.block_writes {
            return Err(io::ErrorKind::WouldBlock.into());
        }
        let n = match self.write_limit {
            Some(limit) => buf.len().min(limit),
            None => buf.len(),
        };
        self.queue.extend_from_slice(&buf[..n]);
        self.writes.push(n);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// PCM sink that records every delivered block.
#[derive(Debug, Default)]
pub struct CapturePcmSink {
    pub blocks: Vec<Vec<u8>>,
}

impl CapturePcmSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total PCM bytes delivered across all blocks.
    pub fn total_bytes(&self) -> usize {
        self.blocks.iter().map(Vec::len).sum()
    }
}

impl PcmSink for CapturePcmSink {
    fn write_pcm(&mut self, pcm: &[u8]) -> io::Result<()> {
        self.blocks.push(pcm.to_vec());
        Ok(())
    }
}

/// PCM source draining a preloaded queue; offers 0 bytes when empty.
#[derive(Debug, Default)]
pub struct QueuedPcmSource {
    queue: BytesMut,
}

impl QueuedPcmSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue PCM bytes for the encode pump to pick up.
    pub fn push(&mut self, pcm: &[u8]) {
        self.queue.extend_from_slice(pcm);
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl PcmSource for QueuedPcmSource {
    fn read_pcm(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = buf.len().min(self.queue.len());
        buf[..n].copy_from_slice(&self.queue[..n]);
        self.queue.advance(n);
        Ok(n)
    }
}
