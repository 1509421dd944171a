//! Radio addresses in persistent storage
//!
//! ```text
//! offset  0      3      6   7
//!         ├──────┼──────┼───┤
//!         │ own  │ peer │ M │   M = max packet size (flashing mode only)
//!         └──────┴──────┴───┘
//! ```
//!
//! The block is read once at startup and never written by the bridge
//! itself; [`PersistedLayout::store`] exists for provisioning.

use airlink_hal::{ByteStorage, RadioAddress, StorageError, ADDRESS_LEN};
use airlink_protocol::MAX_PACKET_SIZE;

/// Addresses and limits loaded at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RadioAddresses {
    /// Address this node listens on
    pub own: RadioAddress,
    /// Address all packets are sent to
    pub peer: RadioAddress,
    /// Largest packet the remote accepts, when configured
    pub max_packet: Option<u8>,
}

/// Byte offsets of the persisted address block
pub struct PersistedLayout;

impl PersistedLayout {
    /// Own address, 3 bytes
    pub const OWN_ADDRESS: u16 = 0;
    /// Peer address, 3 bytes
    pub const PEER_ADDRESS: u16 = Self::OWN_ADDRESS + ADDRESS_LEN as u16;
    /// Max packet size, 1 byte
    pub const MAX_PACKET: u16 = Self::PEER_ADDRESS + ADDRESS_LEN as u16;

    /// Read the address block
    ///
    /// The max packet size byte is only read when `with_max_packet` is set.
    pub fn load<S: ByteStorage>(
        storage: &mut S,
        with_max_packet: bool,
    ) -> Result<RadioAddresses, StorageError> {
        let mut own = [0u8; ADDRESS_LEN];
        let mut peer = [0u8; ADDRESS_LEN];
        storage.read_into(Self::OWN_ADDRESS, &mut own)?;
        storage.read_into(Self::PEER_ADDRESS, &mut peer)?;

        let max_packet = if with_max_packet {
            Some(clamp_max_packet(storage.read_byte(Self::MAX_PACKET)?))
        } else {
            None
        };

        Ok(RadioAddresses {
            own: RadioAddress::new(own),
            peer: RadioAddress::new(peer),
            max_packet,
        })
    }

    /// Write the address block
    pub fn store<S: ByteStorage>(
        storage: &mut S,
        addresses: &RadioAddresses,
    ) -> Result<(), StorageError> {
        storage.write_from(Self::OWN_ADDRESS, addresses.own.as_bytes())?;
        storage.write_from(Self::PEER_ADDRESS, addresses.peer.as_bytes())?;
        if let Some(max) = addresses.max_packet {
            storage.write_byte(Self::MAX_PACKET, clamp_max_packet(max))?;
        }
        Ok(())
    }
}

/// Bring a stored max packet size into 1..=32
///
/// Zero and anything above the radio limit (including erased 0xFF) mean
/// "no limit".
pub fn clamp_max_packet(raw: u8) -> u8 {
    if raw == 0 || usize::from(raw) > MAX_PACKET_SIZE {
        MAX_PACKET_SIZE as u8
    } else {
        raw
    }
}
