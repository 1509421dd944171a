//! Airlink radio wire format
//!
//! This crate defines what goes over the air between a serial-to-radio
//! bridge and its peer. The transceiver does its own framing and CRC, so
//! everything here is a packet of at most 32 bytes.
//!
//! # Packet types
//!
//! ```text
//! Plain data        ┌─────────────────────────────┐
//!                   │ PAYLOAD 1–32B               │
//!                   └─────────────────────────────┘
//! Sequenced data    ┌─────┬───────────────────────┐
//!                   │ SEQ │ PAYLOAD 0–31B         │
//!                   └─────┴───────────────────────┘
//! Reset signal      ┌──────┐
//!                   │ 0xFF │
//!                   └──────┘
//! Addressing        ┌──────────────┬─────────────┐
//!                   │ OWN ADDR 3B  │ [MAX PKT 1B]│
//!                   └──────────────┴─────────────┘
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod control;
pub mod packet;

pub use control::{is_reset_signal, AddressingPacket, RESET_BYTE, RESET_SIGNAL};
pub use packet::{
    Framing, Packet, ProtocolError, SequencedView, MAX_PACKET_SIZE, MAX_SEQUENCED_PAYLOAD,
};
