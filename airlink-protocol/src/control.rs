//! Bootstrap control packets.
//!
//! Before programming traffic, the bridge sends two standalone packets:
//! - RESET (1 byte): 0xFF. Any application running on the remote board must
//!   reboot into its bootloader when it receives exactly this packet.
//! - ADDRESSING (3 or 4 bytes): the bridge's own radio address, optionally
//!   followed by the maximum packet size the bootloader should use when
//!   replying.

use airlink_hal::{RadioAddress, ADDRESS_LEN};
use heapless::Vec;

use crate::packet::{ProtocolError, MAX_PACKET_SIZE};

/// Reserved byte that asks the remote board to reboot
pub const RESET_BYTE: u8 = 0xFF;

/// The complete reset packet
pub const RESET_SIGNAL: [u8; 1] = [RESET_BYTE];

/// Maximum encoded size of an addressing packet
pub const MAX_ADDRESSING_LEN: usize = ADDRESS_LEN + 1;

/// Check if a received packet is the reset signal
pub fn is_reset_signal(packet: &[u8]) -> bool {
    packet == RESET_SIGNAL
}

/// Address announcement sent after the reset signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AddressingPacket {
    /// Address the bootloader should send its replies to
    pub reply_to: RadioAddress,
    /// Largest packet the bootloader should send, if announced
    pub max_packet: Option<u8>,
}

impl AddressingPacket {
    /// Encode into the on-air representation
    pub fn encode(&self) -> Vec<u8, MAX_ADDRESSING_LEN> {
        let mut out = Vec::new();
        // Capacity covers address plus one size byte
        let _ = out.extend_from_slice(self.reply_to.as_bytes());
        if let Some(max) = self.max_packet {
            let _ = out.push(max);
        }
        out
    }

    /// Decode a received addressing packet
    pub fn decode(packet: &[u8]) -> Result<Self, ProtocolError> {
        if packet.len() < ADDRESS_LEN {
            return Err(ProtocolError::Truncated);
        }

        let mut address = [0u8; ADDRESS_LEN];
        address.copy_from_slice(&packet[..ADDRESS_LEN]);

        let max_packet = match &packet[ADDRESS_LEN..] {
            [] => None,
            [max] if *max > 0 && *max as usize <= MAX_PACKET_SIZE => Some(*max),
            _ => return Err(ProtocolError::InvalidLength),
        };

        Ok(Self {
            reply_to: RadioAddress::new(address),
            max_packet,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_signal_exact_match() {
        assert!(is_reset_signal(&[0xFF]));
        assert!(!is_reset_signal(&[0xFF, 0xFF]));
        assert!(!is_reset_signal(&[0xFE]));
        assert!(!is_reset_signal(&[]));
    }

    #[test]
    fn test_encode_three_byte_variant() {
        let pkt = AddressingPacket {
            reply_to: RadioAddress::new([0x10, 0x20, 0x30]),
            max_packet: None,
        };
        assert_eq!(pkt.encode().as_slice(), &[0x10, 0x20, 0x30]);
    }

    #[test]
    fn test_encode_with_max_packet() {
        let pkt = AddressingPacket {
            reply_to: RadioAddress::new([1, 2, 3]),
            max_packet: Some(16),
        };
        assert_eq!(pkt.encode().as_slice(), &[1, 2, 3, 16]);
    }

    #[test]
    fn test_decode_both_variants() {
        let short = AddressingPacket::decode(&[7, 8, 9]).unwrap();
        assert_eq!(short.reply_to, RadioAddress::new([7, 8, 9]));
        assert_eq!(short.max_packet, None);

        let long = AddressingPacket::decode(&[7, 8, 9, 32]).unwrap();
        assert_eq!(long.max_packet, Some(32));
    }

    #[test]
    fn test_decode_rejects_bad_lengths() {
        assert_eq!(
            AddressingPacket::decode(&[1, 2]),
            Err(ProtocolError::Truncated)
        );
        assert_eq!(
            AddressingPacket::decode(&[1, 2, 3, 4, 5]),
            Err(ProtocolError::InvalidLength)
        );
        // Size byte outside what the transceiver can carry
        assert_eq!(
            AddressingPacket::decode(&[1, 2, 3, 33]),
            Err(ProtocolError::InvalidLength)
        );
        assert_eq!(
            AddressingPacket::decode(&[1, 2, 3, 0]),
            Err(ProtocolError::InvalidLength)
        );
    }
}
