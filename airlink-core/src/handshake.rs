//! Remote bootloader handshake
//!
//! A flashing tool talks to one target across possibly many reboots. Before
//! programming traffic reaches the target, the bridge resets it and tells
//! the freshly started bootloader where to send its replies.
//!
//! ```text
//!            quiet period elapsed
//!        ┌────────────────────────────┐
//!        ▼                            │
//!   ┌─────────┐   bootstrap sent  ┌────────┐
//!   │  Armed  │ ────────────────► │ Active │ ◄── send / receive refresh
//!   └─────────┘                   └────────┘
//! ```
//!
//! The machine is driven purely by gaps in radio activity. A gap longer
//! than the quiet period means the bootloader has timed out and started
//! the application again, so the next transmission repeats the bootstrap.

use airlink_hal::{DelayNs, RadioLink};
use airlink_protocol::{AddressingPacket, RESET_SIGNAL};

use crate::link::Link;

/// Handshake states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HandshakeState {
    /// Next transmission must bootstrap the remote first
    Armed,
    /// Remote is in its bootloader; traffic passes through
    Active,
}

/// Activity-gap tracker
#[derive(Debug, Clone)]
pub struct Handshake {
    state: HandshakeState,
    last_activity: u32,
    quiet_ticks: u32,
}

impl Handshake {
    /// Create an armed handshake
    ///
    /// `quiet_ticks` is the activity gap, in clock ticks, after which the
    /// remote is assumed to have left its bootloader.
    pub fn new(quiet_ticks: u32) -> Self {
        Self {
            state: HandshakeState::Armed,
            last_activity: 0,
            quiet_ticks,
        }
    }

    /// Current state
    pub fn state(&self) -> HandshakeState {
        self.state
    }

    /// Record radio activity at `now`
    pub fn note_activity(&mut self, now: u32) {
        self.last_activity = now;
    }

    /// Re-arm if the link has been quiet for too long
    ///
    /// Returns the state the next transmission has to honour.
    pub fn check(&mut self, now: u32) -> HandshakeState {
        if now.wrapping_sub(self.last_activity) > self.quiet_ticks {
            self.state = HandshakeState::Armed;
        }
        self.state
    }

    /// The bootstrap sequence has been sent at `now`
    pub fn complete(&mut self, now: u32) {
        self.state = HandshakeState::Active;
        self.last_activity = now;
    }
}

/// Reset the remote and announce our address
///
/// Both packets are single attempts; the remote cannot acknowledge the reset
/// and its bootloader may not be listening yet for the address. Their
/// outcome is not used.
pub fn bootstrap<R: RadioLink, D: DelayNs>(
    link: &mut Link<R, D>,
    announcement: &AddressingPacket,
    settle_ms: u32,
) {
    debug!("bootstrap: resetting remote");
    let _ = link.send_once(&RESET_SIGNAL);

    // Give the board time to reboot into its bootloader
    link.delay_ms(settle_ms);

    let _ = link.send_once(&announcement.encode());
    debug!("bootstrap: address announced");
}
