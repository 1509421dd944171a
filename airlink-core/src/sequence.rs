//! Sequence reliability layer
//!
//! Optional best-effort reliability for the radio hop:
//! - Outbound packets carry a wrapping sequence byte
//! - Inbound packets repeating the previous sequence byte are retransmissions
//!   of something already forwarded and are dropped
//! - Each packet is attempted a bounded number of times
//! - Consecutive packets of a burst are size-shaped to suit the deployed peer

use airlink_protocol::SequencedView;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Attempts per packet in sequence-tagged mode
pub const SEQUENCED_MAX_ATTEMPTS: u16 = 128;

/// Attempts per packet in plain mode (one retry)
pub const PLAIN_MAX_ATTEMPTS: u16 = 2;

/// Delay before every transmission attempt, in milliseconds
pub const TX_SPACING_MS: u32 = 4;

/// Bounded resend policy for one outbound packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RetryPolicy {
    /// Total attempts including the first; at least 1
    pub max_attempts: u16,
    /// Delay before each attempt so the remote receiver is not flooded
    pub spacing_ms: u32,
}

impl RetryPolicy {
    /// Policy for sequence-tagged packets
    pub const SEQUENCED: Self = Self {
        max_attempts: SEQUENCED_MAX_ATTEMPTS,
        spacing_ms: TX_SPACING_MS,
    };

    /// Policy for plain passthrough packets
    pub const PLAIN: Self = Self {
        max_attempts: PLAIN_MAX_ATTEMPTS,
        spacing_ms: TX_SPACING_MS,
    };

    /// Attempts actually made, never zero
    pub fn attempts(&self) -> u16 {
        self.max_attempts.max(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::PLAIN
    }
}

/// Outbound sequence number generator
#[derive(Debug, Clone, Default)]
pub struct SequenceCounter {
    next: u8,
}

impl SequenceCounter {
    /// Start at sequence number 0
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Take the sequence number for the next packet
    pub fn advance(&mut self) -> u8 {
        let seq = self.next;
        self.next = seq.wrapping_add(1);
        seq
    }

    /// Sequence number the next packet will carry
    pub fn peek(&self) -> u8 {
        self.next
    }
}

/// Outcome of running an inbound packet through the [`DuplicateFilter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict<'a> {
    /// New sequence number; forward this payload
    Fresh(&'a [u8]),
    /// Same sequence number as the last accepted packet
    Duplicate(u8),
    /// Zero-length packet, no sequence byte to judge
    Empty,
}

/// Inbound duplicate suppression
///
/// Only an exact repeat of the immediately preceding sequence number counts
/// as a duplicate; gaps and reordering are passed through.
#[derive(Debug, Clone, Default)]
pub struct DuplicateFilter {
    last: Option<u8>,
}

impl DuplicateFilter {
    /// Create a filter that accepts any first packet
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Judge a received sequence-tagged packet
    pub fn accept<'a>(&mut self, packet: &'a [u8]) -> Verdict<'a> {
        let Ok(view) = SequencedView::parse(packet) else {
            return Verdict::Empty;
        };

        if self.last == Some(view.seq) {
            return Verdict::Duplicate(view.seq);
        }

        self.last = Some(view.seq);
        Verdict::Fresh(view.payload)
    }

    /// Last accepted sequence number
    pub fn last(&self) -> Option<u8> {
        self.last
    }
}

/// Payload-size shaping across consecutive packets of a burst
///
/// The first packet goes out at full size, the second two bytes short, the
/// third with a single byte, and everything after at full size again. This
/// matches the packet sizes the deployed peer firmware was tuned against.
#[derive(Debug, Clone, Default)]
pub struct BurstShaper {
    enabled: bool,
    index: u8,
}

impl BurstShaper {
    /// Create a shaper; a disabled shaper always returns the full size
    pub const fn new(enabled: bool) -> Self {
        Self { enabled, index: 0 }
    }

    /// Payload limit for the next packet given the unshaped limit
    pub fn limit(&self, full: usize) -> usize {
        if !self.enabled {
            return full;
        }

        match self.index {
            1 => full.saturating_sub(2).max(1),
            2 => full.min(1),
            _ => full,
        }
    }

    /// Record that a packet of the current burst was sent
    pub fn advance(&mut self) {
        // Saturate past the shaped range so long bursts stay at full size
        if self.index < 3 {
            self.index += 1;
        }
    }

    /// The input ran dry; the next packet starts a new burst
    pub fn end(&mut self) {
        self.index = 0;
    }

    /// Position of the next packet within the burst
    pub fn position(&self) -> u8 {
        self.index
    }
}
