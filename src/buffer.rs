//! Fixed-capacity byte queue backing the session buffers.
//!
//! The receive, transmit and PCM staging buffers all share the same shape:
//! a flat byte region that fills from the tail and drains from the front,
//! with unconsumed bytes shifted back to the start after each pass. This
//! module wraps that pattern in a bounds-checked type so the pumps never
//! touch raw offsets.
//!
//! Capacity is fixed at construction; the queue never reallocates.
//!
//! # Example
//!
//! ```
//! use msbc_stream::buffer::ByteQueue;
//!
//! let mut q = ByteQueue::new(8);
//! assert!(q.push_back(b"abcdef"));
//! q.consume_front(2);
//! assert_eq!(q.as_slice(), b"cdef");
//! assert_eq!(q.free(), 4);
//! ```

/// A bounded FIFO byte buffer with explicit front compaction.
#[derive(Debug)]
pub struct ByteQueue {
    buf: Box<[u8]>,
    len: usize,
}

impl ByteQueue {
    /// Create a queue with the given fixed capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: vec![0u8; capacity].into_boxed_slice(),
            len: 0,
        }
    }

    /// Total capacity in bytes.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Number of occupied bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if no bytes are queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True if no free space remains.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.buf.len()
    }

    /// Remaining free space in bytes.
    #[inline]
    pub fn free(&self) -> usize {
        self.buf.len() - self.len
    }

    /// The occupied region, front first.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Append `data` to the tail.
    ///
    /// Returns `false` (and appends nothing) if `data` does not fit in the
    /// remaining free space. Partial appends never happen.
    pub fn push_back(&mut self, data: &[u8]) -> bool {
        if data.len() > self.free() {
            return false;
        }
        self.buf[self.len..self.len + data.len()].copy_from_slice(data);
        self.len += data.len();
        true
    }

    /// The unoccupied tail region, for filling directly from a transport
    /// read. Follow up with [`commit`](Self::commit) to mark bytes as
    /// occupied.
    #[inline]
    pub fn spare_mut(&mut self) -> &mut [u8] {
        &mut self.buf[self.len..]
    }

    /// Mark `n` spare bytes as occupied after a direct tail write.
    ///
    /// `n` must not exceed the length of the slice returned by the
    /// matching [`spare_mut`](Self::spare_mut) call.
    #[inline]
    pub fn commit(&mut self, n: usize) {
        debug_assert!(n <= self.free(), "commit past spare capacity");
        self.len += n;
    }

    /// Drop `n` bytes from the front and shift the remainder to the start
    /// of the buffer. Consuming more than is queued drains the queue.
    pub fn consume_front(&mut self, n: usize) {
        let n = n.min(self.len);
        if n == 0 {
            return;
        }
        self.buf.copy_within(n..self.len, 0);
        self.len -= n;
    }

    /// Drop all queued bytes.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }
}
