//! Remote board side of the bootstrap handshake
//!
//! The application on the remote board watches its inbound packets for the
//! reset signal and jumps to the bootloader when it sees one. The bootloader
//! then waits for the addressing packet to learn where to send its replies.

use airlink_hal::{BootloaderEntry, RadioLink};
use airlink_protocol::{is_reset_signal, AddressingPacket, ProtocolError};

/// Failure to act on an addressing packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressingError<E> {
    /// Not a valid addressing packet
    Malformed(ProtocolError),
    /// The transceiver rejected the new peer address
    Radio(E),
}

/// Reset-signal watcher for application firmware
pub struct ResetWatch<B> {
    bootloader: B,
}

impl<B: BootloaderEntry> ResetWatch<B> {
    /// Watch inbound packets, jumping through `bootloader` on reset
    pub fn new(bootloader: B) -> Self {
        Self { bootloader }
    }

    /// Check one inbound packet; does not return if it is the reset signal
    pub fn inspect(&mut self, packet: &[u8]) {
        if is_reset_signal(packet) {
            info!("reset signal received, entering bootloader");
            self.bootloader.enter_bootloader();
        }
    }
}

/// Point the radio at the sender of an addressing packet
///
/// Returns the decoded packet so the caller can honour its max packet size.
pub fn accept_addressing<R: RadioLink>(
    radio: &mut R,
    packet: &[u8],
) -> Result<AddressingPacket, AddressingError<R::Error>> {
    let addressing = AddressingPacket::decode(packet).map_err(AddressingError::Malformed)?;
    radio
        .set_peer_address(addressing.reply_to)
        .map_err(AddressingError::Radio)?;
    Ok(addressing)
}
