//! Configuration type definitions
//!
//! A board picks one preset at build time. Nothing here is persisted; the
//! only stored configuration is the address block in [`super::persisted`].

use airlink_protocol::Framing;

use crate::sequence::RetryPolicy;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Activity gap after which the remote is bootstrapped again (ms)
pub const DEFAULT_QUIET_PERIOD_MS: u32 = 1000;

/// Time given to the remote to reboot into its bootloader (ms)
pub const DEFAULT_SETTLE_MS: u32 = 100;

/// Remote bootloader handshake settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BootstrapConfig {
    /// Radio silence that re-arms the handshake, in milliseconds
    pub quiet_period_ms: u32,
    /// Delay between the reset signal and the addressing packet
    pub settle_ms: u32,
    /// Append the persisted max packet size to the addressing packet
    pub announce_max_packet: bool,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            quiet_period_ms: DEFAULT_QUIET_PERIOD_MS,
            settle_ms: DEFAULT_SETTLE_MS,
            announce_max_packet: false,
        }
    }
}

/// Bridge behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BridgeConfig {
    /// Outbound and inbound packet framing
    pub framing: Framing,
    /// Resend policy per outbound packet
    pub retry: RetryPolicy,
    /// Shape payload sizes across a burst
    pub burst_shaping: bool,
    /// Bootstrap the remote before relaying; `None` disables the handshake
    pub bootstrap: Option<BootstrapConfig>,
    /// Print our address on serial at startup
    pub announce_on_boot: bool,
}

impl BridgeConfig {
    /// Verbatim serial passthrough
    pub fn passthrough() -> Self {
        Self {
            framing: Framing::Plain,
            retry: RetryPolicy::PLAIN,
            burst_shaping: false,
            bootstrap: None,
            announce_on_boot: true,
        }
    }

    /// Passthrough with sequence tags and duplicate suppression
    pub fn sequenced() -> Self {
        Self {
            framing: Framing::Sequenced,
            retry: RetryPolicy::SEQUENCED,
            burst_shaping: true,
            bootstrap: None,
            announce_on_boot: true,
        }
    }

    /// Programming bridge for a remote bootloader
    ///
    /// The serial side carries a programming protocol, so no banner is
    /// printed.
    pub fn flasher(announce_max_packet: bool) -> Self {
        Self {
            framing: Framing::Plain,
            retry: RetryPolicy::PLAIN,
            burst_shaping: false,
            bootstrap: Some(BootstrapConfig {
                announce_max_packet,
                ..BootstrapConfig::default()
            }),
            announce_on_boot: false,
        }
    }

    /// Whether the persisted max packet size byte is needed
    pub fn uses_max_packet(&self) -> bool {
        self.bootstrap.is_some_and(|b| b.announce_max_packet)
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self::passthrough()
    }
}
