//! Integration tests for msbc-stream.
//!
//! These drive a whole session through its public API: encode pump,
//! transmit scheduler, a simulated SCO link, decode pump and a PCM sink,
//! the way an external readiness loop would.

use msbc_stream::codec::fixture::{FixtureDecoder, FixtureEncoder};
use msbc_stream::codec::MSBC_PCM_BLOCK_LEN;
use msbc_stream::framing::MSBC_WIRE_FRAME_LEN;
use msbc_stream::transport::loopback::{CapturePcmSink, LoopbackLink, QueuedPcmSource};
use msbc_stream::{Config, Session};

fn fixture_session(config: Config) -> Session {
    Session::new(
        Box::new(FixtureEncoder::new()),
        Box::new(FixtureDecoder::new()),
        config,
    )
    .unwrap()
}

/// Run all three pumps round-robin, checking the buffer invariants after
/// every step, until `iterations` passes have run.
fn drive(
    session: &mut Session,
    link: &mut LoopbackLink,
    source: &mut QueuedPcmSource,
    sink: &mut CapturePcmSink,
    iterations: usize,
) {
    for _ in 0..iterations {
        session.pump_encode(source).unwrap();
        session.pump_transmit(link).unwrap();
        session.pump_decode(link, Some(sink)).unwrap();

        assert!(session.rx_len() <= session.config().rx_capacity);
        assert!(session.tx_len() <= session.config().tx_capacity);
        assert!(session.pcm_in_len() <= session.config().pcm_capacity);
        assert_eq!(session.tx_len() % session.wire_frame_len(), 0);
    }
}

#[test]
fn test_full_round_trip_preserves_block_count() {
    // MTU of one wire frame so every queued byte eventually drains.
    let config = Config::with_mtu(MSBC_WIRE_FRAME_LEN, 2);
    let mut session = fixture_session(config);
    let mut link = LoopbackLink::new();
    let mut source = QueuedPcmSource::new();
    let mut sink = CapturePcmSink::new();

    let blocks = 8;
    source.push(&vec![0x33u8; MSBC_PCM_BLOCK_LEN * blocks]);

    drive(&mut session, &mut link, &mut source, &mut sink, 100);

    assert_eq!(sink.blocks.len(), blocks);
    assert!(sink.blocks.iter().all(|b| b.len() == MSBC_PCM_BLOCK_LEN));
    assert_eq!(sink.total_bytes(), MSBC_PCM_BLOCK_LEN * blocks);
    assert_eq!(source.remaining(), 0);
    assert_eq!(session.tx_len(), 0);
    assert_eq!(session.rx_len(), 0);
}

#[test]
fn test_round_trip_with_fragmented_reads() {
    // The link hands out at most 17 bytes per read, so the decode pump
    // sees misaligned partial frames on every pass.
    let config = Config::with_mtu(MSBC_WIRE_FRAME_LEN, 2);
    let mut session = fixture_session(config);
    let mut link = LoopbackLink::with_read_chunk(17);
    let mut source = QueuedPcmSource::new();
    let mut sink = CapturePcmSink::new();

    let blocks = 6;
    source.push(&vec![0x44u8; MSBC_PCM_BLOCK_LEN * blocks]);

    drive(&mut session, &mut link, &mut source, &mut sink, 200);

    assert_eq!(sink.blocks.len(), blocks);
    assert_eq!(sink.total_bytes(), MSBC_PCM_BLOCK_LEN * blocks);
}

#[test]
fn test_prebuffer_gating_end_to_end() {
    let mut session = fixture_session(Config::with_mtu(120, 2));
    let mut link = LoopbackLink::new();
    let mut source = QueuedPcmSource::new();

    // Four frames (236 bytes) stay below the 240-byte threshold no matter
    // how often the scheduler runs.
    for _ in 0..4 {
        source.push(&vec![0u8; MSBC_PCM_BLOCK_LEN]);
        session.pump_encode(&mut source).unwrap();
        session.pump_transmit(&mut link).unwrap();
        assert_eq!(link.pending(), 0);
        assert!(!session.prebuffer_sent());
    }
    assert_eq!(session.tx_len(), 4 * MSBC_WIRE_FRAME_LEN);

    // The fifth frame crosses it: exactly two 120-byte writes, back to
    // back, in one invocation.
    source.push(&vec![0u8; MSBC_PCM_BLOCK_LEN]);
    session.pump_encode(&mut source).unwrap();
    session.pump_transmit(&mut link).unwrap();

    assert!(session.prebuffer_sent());
    assert_eq!(link.writes, vec![120, 120]);
    assert_eq!(session.tx_len(), 5 * MSBC_WIRE_FRAME_LEN - 240);
}

#[test]
fn test_dropped_sink_drains_rx_without_output() {
    let mut session = fixture_session(Config::default());
    let mut link = LoopbackLink::new();

    // Real frames and garbage alike: with no sink attached, every read
    // ends with an empty receive buffer.
    let mut peer = fixture_session(Config::with_mtu(MSBC_WIRE_FRAME_LEN, 1));
    let mut source = QueuedPcmSource::new();
    source.push(&vec![0u8; MSBC_PCM_BLOCK_LEN * 2]);
    peer.pump_encode(&mut source).unwrap();
    peer.pump_transmit(&mut link).unwrap();
    link.inject(b"noise");

    session.pump_decode(&mut link, None).unwrap();
    assert_eq!(session.rx_len(), 0);
}

#[test]
fn test_garbage_between_frames_is_skipped() {
    let mut session = fixture_session(Config::default());
    let mut link = LoopbackLink::new();
    let mut sink = CapturePcmSink::new();

    // Build two valid wire frames by running a second session as the peer.
    let mut peer = fixture_session(Config::with_mtu(MSBC_WIRE_FRAME_LEN, 1));
    let mut source = QueuedPcmSource::new();
    source.push(&vec![0x5Au8; MSBC_PCM_BLOCK_LEN * 2]);
    peer.pump_encode(&mut source).unwrap();

    let mut wire = LoopbackLink::new();
    peer.pump_transmit(&mut wire).unwrap();
    peer.pump_transmit(&mut wire).unwrap();
    let mut frames = vec![0u8; 2 * MSBC_WIRE_FRAME_LEN];
    {
        use std::io::Read;
        wire.read_exact(&mut frames).unwrap();
    }

    // Interleave garbage around and between them.
    link.inject(&[0x55; 5]);
    link.inject(&frames[..MSBC_WIRE_FRAME_LEN]);
    link.inject(&[0x00, 0x02]);
    link.inject(&frames[MSBC_WIRE_FRAME_LEN..]);
    link.inject(&[0xEE; 3]);

    session.pump_decode(&mut link, Some(&mut sink)).unwrap();

    assert_eq!(sink.blocks.len(), 2);
    // Only the trailing garbage, too short to scan, stays buffered.
    assert_eq!(session.rx_len(), 3);
}

#[test]
fn test_idle_pumps_hold_all_state() {
    let mut session = fixture_session(Config::default());
    let mut link = LoopbackLink::new();
    let mut source = QueuedPcmSource::new();
    let mut sink = CapturePcmSink::new();

    // Park some state in the session first.
    source.push(&vec![0u8; MSBC_PCM_BLOCK_LEN + 50]);
    session.pump_encode(&mut source).unwrap();
    let tx_before = session.tx_len();
    let pcm_before = session.pcm_in_len();

    // Empty source, would-block link: nothing may move.
    for _ in 0..10 {
        session.pump_encode(&mut source).unwrap();
        session.pump_decode(&mut link, Some(&mut sink)).unwrap();
        assert_eq!(session.tx_len(), tx_before);
        assert_eq!(session.pcm_in_len(), pcm_before);
        assert!(sink.blocks.is_empty());
    }
}
