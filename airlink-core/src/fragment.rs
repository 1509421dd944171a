//! Packet fragmentation and reassembly
//!
//! Outbound, the serial byte stream is cut into radio-sized payloads straight
//! out of the ingestion buffer. Inbound, each received packet is read whole
//! and its payload written to serial byte by byte; there is no buffering on
//! that side.

use airlink_hal::{RadioLink, UartTx};
use airlink_protocol::{Packet, MAX_PACKET_SIZE};
use heapless::Vec;

use crate::ingest::IngestBuffer;

/// Payload drained from the ingestion buffer for one outbound packet
pub type Payload = Vec<u8, MAX_PACKET_SIZE>;

/// Take the next payload of at most `limit` bytes
///
/// Returns `None` when the buffer is empty. `limit` is clamped to the
/// packet size.
pub fn take_payload(ingest: &IngestBuffer, limit: usize) -> Option<Payload> {
    let mut buf = [0u8; MAX_PACKET_SIZE];
    let limit = limit.min(MAX_PACKET_SIZE);

    let count = ingest.drain_into(&mut buf[..limit]);
    if count == 0 {
        return None;
    }

    Payload::from_slice(&buf[..count]).ok()
}

/// Read one received packet from the radio
///
/// The reported length is trusted but clamped to the packet buffer.
pub fn read_packet<R: RadioLink>(radio: &mut R) -> Result<Packet, R::Error> {
    let mut buf = [0u8; MAX_PACKET_SIZE];
    let len = radio.receive(&mut buf)?.min(MAX_PACKET_SIZE);

    let mut packet = Packet::new();
    // Cannot fail: len is clamped to capacity
    let _ = packet.extend_from_slice(&buf[..len]);
    Ok(packet)
}

/// Write an inbound payload to serial in order
pub fn deliver<U: UartTx>(serial: &mut U, payload: &[u8]) -> Result<(), U::Error> {
    serial.write_blocking(payload)
}
