//! Airlink Hardware Abstraction Layer
//!
//! This crate defines the narrow collaborator contracts the bridge core
//! consumes. Chip- and transceiver-specific crates implement them; the core
//! never touches registers, SPI transactions or interrupt vectors directly.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  airlink-core (dispatch loop, buffers)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  airlink-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!     ┌───────────────┼────────────────┐
//!     ▼               ▼                ▼
//! ┌─────────┐   ┌───────────┐   ┌─────────────┐
//! │  radio  │   │   UART    │   │ EEPROM/timer│
//! │ driver  │   │  driver   │   │   drivers   │
//! └─────────┘   └───────────┘   └─────────────┘
//! ```
//!
//! # Traits
//!
//! - [`radio::RadioLink`] - Packet radio transceiver
//! - [`uart::UartTx`], [`uart::UartRxInterrupt`] - Serial communication
//! - [`eeprom::ByteStorage`] - Byte-addressed persistent storage
//! - [`timer::MonotonicClock`] - Free-running tick counter
//! - [`bootloader::BootloaderEntry`] - Jump into the resident bootloader
//!
//! Blocking millisecond delays use [`embedded_hal::delay::DelayNs`], re-exported
//! here as [`DelayNs`].

#![no_std]
#![deny(unsafe_code)]

pub mod bootloader;
pub mod eeprom;
pub mod radio;
pub mod timer;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use bootloader::BootloaderEntry;
pub use eeprom::{ByteStorage, StorageError};
pub use embedded_hal::delay::DelayNs;
pub use radio::{RadioAddress, RadioLink, TxOutcome, ADDRESS_LEN};
pub use timer::MonotonicClock;
pub use uart::{RxHandler, UartRxInterrupt, UartTx};
