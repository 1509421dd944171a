//! Packet radio abstractions
//!
//! Models a short-range transceiver with hardware packet framing (nRF24-class
//! parts): fixed maximum packet size, a receive FIFO, a single peer address
//! for transmission and an auto-acknowledge result per transmitted packet.

/// Length of a radio address in bytes
pub const ADDRESS_LEN: usize = 3;

/// Three-byte radio pipe address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RadioAddress(pub [u8; ADDRESS_LEN]);

impl RadioAddress {
    /// Create an address from its raw bytes
    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw address bytes
    pub const fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

impl From<[u8; ADDRESS_LEN]> for RadioAddress {
    fn from(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }
}

/// Result of a single transmission as reported by the transceiver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TxOutcome {
    /// The peer acknowledged the packet
    Delivered,
    /// No acknowledgement before the transceiver gave up
    Failed,
}

impl TxOutcome {
    /// Check if the packet was delivered
    pub fn is_delivered(self) -> bool {
        matches!(self, TxOutcome::Delivered)
    }
}

/// Packet radio transceiver
///
/// All operations are blocking. [`RadioLink::wait_transmit_result`] busy-polls
/// until the transceiver reports completion; implementations should bound
/// that wait, since nothing above them can cancel it.
pub trait RadioLink {
    /// Error type for bus or device failures
    type Error;

    /// Start transmitting one packet to the peer address
    fn transmit(&mut self, packet: &[u8]) -> Result<(), Self::Error>;

    /// Block until the last transmission completes
    fn wait_transmit_result(&mut self) -> TxOutcome;

    /// Check whether a received packet is waiting in the FIFO
    fn receive_available(&mut self) -> bool;

    /// Read the next received packet into `buf`
    ///
    /// Returns the packet length as reported by the transceiver.
    fn receive(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Power down the receiver so the transceiver can transmit
    fn enter_idle_mode(&mut self) -> Result<(), Self::Error>;

    /// Start listening on the own address
    fn enter_receive_mode(&mut self) -> Result<(), Self::Error>;

    /// Set the address this node listens on
    fn set_own_address(&mut self, address: RadioAddress) -> Result<(), Self::Error>;

    /// Set the address packets are transmitted to
    fn set_peer_address(&mut self, address: RadioAddress) -> Result<(), Self::Error>;
}
