//! H2 wire framing for mSBC over SCO.
//!
//! Every frame on the wire is prefixed with the 2-byte H2 synchronization
//! header:
//!
//! ```text
//! ┌───────────┬──────────────┬───────────────────────────┐
//! │ 0x01      │ index marker │ mSBC frame (0xAD, ...)    │
//! │ 1 byte    │ 1 byte       │ frame_len bytes           │
//! └───────────┴──────────────┴───────────────────────────┘
//! ```
//!
//! The index marker cycles through four fixed values, one step per encoded
//! frame. It is written on transmit but **not** validated on receive: the
//! scanner resynchronizes on the fixed sync byte at offset 0 and the SBC
//! syncword at offset 2 alone, and there is no packet-loss concealment to
//! act on a detected gap.

use crate::codec::{MSBC_FRAME_LEN, MSBC_SYNCWORD};

/// Fixed sync byte, the first byte of every wire frame.
pub const H2_SYNC: u8 = 0x01;

/// H2 header length in bytes.
pub const H2_HEADER_LEN: usize = 2;

/// The four cyclic frame-index markers, indexed by `frame_index % 4`.
pub const H2_MARKERS: [u8; 4] = [0x08, 0x38, 0xC8, 0xF8];

/// Expected wire frame length for mSBC: H2 header plus one encoded frame.
pub const MSBC_WIRE_FRAME_LEN: usize = H2_HEADER_LEN + MSBC_FRAME_LEN;

/// Build the H2 header for the given frame index.
///
/// Only the low two bits of `frame_index` select the marker, so callers
/// may pass the raw cyclic counter.
#[inline]
pub fn h2_header(frame_index: u8) -> [u8; H2_HEADER_LEN] {
    [H2_SYNC, H2_MARKERS[(frame_index & 0x03) as usize]]
}

/// Test whether `window` begins a valid wire frame: fixed sync byte at
/// offset 0 and the SBC syncword at offset 2. The marker byte between them
/// is ignored.
///
/// Returns `false` for windows shorter than 3 bytes.
#[inline]
pub fn starts_frame(window: &[u8]) -> bool {
    window.len() > 2 && window[0] == H2_SYNC && window[2] == MSBC_SYNCWORD
}

/// Recover the frame index (`0..=3`) from a marker byte, if it is one of
/// the four valid values. Used by tests to read sequencing back off the
/// wire; the receive path never calls this.
pub fn marker_index(marker: u8) -> Option<u8> {
    H2_MARKERS.iter().position(|&m| m == marker).map(|i| i as u8)
}
