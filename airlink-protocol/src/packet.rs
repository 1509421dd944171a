//! Radio packet framing.
//!
//! Two data framings share the air:
//! - Plain: the packet is the payload, 1-32 bytes, forwarded verbatim
//! - Sequence-tagged: byte 0 is a wrapping sequence number, bytes 1.. are
//!   the payload (at most 31 bytes)
//!
//! Nothing on the wire says which framing a packet uses; both ends are
//! configured the same way.

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum packet size supported by the transceiver
pub const MAX_PACKET_SIZE: usize = 32;

/// Size of the sequence header in sequence-tagged framing
pub const SEQUENCE_HEADER_LEN: usize = 1;

/// Maximum payload of a sequence-tagged packet
pub const MAX_SEQUENCED_PAYLOAD: usize = MAX_PACKET_SIZE - SEQUENCE_HEADER_LEN;

/// A packet as it goes over the air
pub type Packet = Vec<u8, MAX_PACKET_SIZE>;

/// Errors that can occur while building or parsing packets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolError {
    /// Payload does not fit in one packet
    PayloadTooLarge,
    /// Packet is too short for the expected framing
    Truncated,
    /// Packet has an unexpected length for its type
    InvalidLength,
}

/// Packet framing used for data traffic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Framing {
    /// Raw passthrough, no header
    #[default]
    Plain,
    /// One-byte sequence header for duplicate suppression
    Sequenced,
}

impl Framing {
    /// Number of header bytes this framing adds
    pub const fn header_len(self) -> usize {
        match self {
            Framing::Plain => 0,
            Framing::Sequenced => SEQUENCE_HEADER_LEN,
        }
    }

    /// Largest payload one packet can carry with this framing
    pub const fn max_payload(self) -> usize {
        MAX_PACKET_SIZE - self.header_len()
    }
}

/// Build a plain packet from `payload`
pub fn plain(payload: &[u8]) -> Result<Packet, ProtocolError> {
    Packet::from_slice(payload).map_err(|_| ProtocolError::PayloadTooLarge)
}

/// Build a sequence-tagged packet
pub fn sequenced(seq: u8, payload: &[u8]) -> Result<Packet, ProtocolError> {
    if payload.len() > MAX_SEQUENCED_PAYLOAD {
        return Err(ProtocolError::PayloadTooLarge);
    }

    let mut packet = Packet::new();
    packet
        .push(seq)
        .map_err(|_| ProtocolError::PayloadTooLarge)?;
    packet
        .extend_from_slice(payload)
        .map_err(|_| ProtocolError::PayloadTooLarge)?;
    Ok(packet)
}

/// Borrowed view of a received sequence-tagged packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequencedView<'a> {
    /// Sender's sequence number
    pub seq: u8,
    /// Payload following the header (may be empty)
    pub payload: &'a [u8],
}

impl<'a> SequencedView<'a> {
    /// Split a received packet into sequence number and payload
    pub fn parse(packet: &'a [u8]) -> Result<Self, ProtocolError> {
        match packet.split_first() {
            Some((&seq, payload)) => Ok(Self { seq, payload }),
            None => Err(ProtocolError::Truncated),
        }
    }
}
