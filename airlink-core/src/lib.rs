//! Board-agnostic serial-to-radio bridging engine
//!
//! This crate contains everything between the serial driver and the radio
//! driver:
//!
//! - Interrupt-fed ingestion buffer for serial bytes
//! - Fragmentation of the byte stream into radio packets
//! - Sequence tags, duplicate suppression and bounded retry
//! - Remote bootloader handshake for flashing over the air
//! - The dispatch loop tying it together
//!
//! Hardware is reached only through the traits in `airlink-hal`.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// Must come first so the logging macros are visible to the other modules
mod fmt;

pub mod bridge;
pub mod config;
pub mod error;
pub mod fragment;
pub mod handshake;
pub mod ingest;
pub mod link;
pub mod sequence;
pub mod target;

#[cfg(test)]
mod testing;

pub use bridge::{Bridge, LinkStats};
pub use config::{BootstrapConfig, BridgeConfig, PersistedLayout, RadioAddresses};
pub use error::InitError;
pub use handshake::HandshakeState;
pub use ingest::IngestBuffer;
pub use sequence::RetryPolicy;
