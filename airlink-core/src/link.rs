//! Radio link wrapper
//!
//! Owns the transceiver and the blocking delay. Every transmission follows
//! the same pattern: drop to idle mode, transmit, block on the result, return
//! to receive mode. Adapter errors are counted and treated as a failed
//! attempt or an absent packet; they never stop the dispatch loop.

use airlink_hal::{DelayNs, RadioLink, TxOutcome};
use airlink_protocol::Packet;

use crate::fragment;
use crate::sequence::RetryPolicy;

/// What happened to one packet under the retry policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RetryReport {
    /// Attempts made, including the successful one
    pub attempts: u16,
    /// Outcome of the last attempt
    pub outcome: TxOutcome,
}

/// Transceiver plus delay source
pub struct Link<R, D> {
    radio: R,
    delay: D,
    errors: u32,
}

impl<R: RadioLink, D: DelayNs> Link<R, D> {
    /// Wrap a transceiver and a delay provider
    pub fn new(radio: R, delay: D) -> Self {
        Self {
            radio,
            delay,
            errors: 0,
        }
    }

    /// Access the underlying transceiver
    pub fn radio(&self) -> &R {
        &self.radio
    }

    /// Mutable access to the underlying transceiver
    pub fn radio_mut(&mut self) -> &mut R {
        &mut self.radio
    }

    /// Number of adapter errors seen so far
    pub fn errors(&self) -> u32 {
        self.errors
    }

    /// Block for `ms` milliseconds
    pub fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    /// Transmit one packet once and report the result
    pub fn send_once(&mut self, packet: &[u8]) -> TxOutcome {
        if self.radio.enter_idle_mode().is_err() {
            self.note_error();
        }

        let outcome = match self.radio.transmit(packet) {
            Ok(()) => self.radio.wait_transmit_result(),
            Err(_) => {
                self.note_error();
                TxOutcome::Failed
            }
        };

        if self.radio.enter_receive_mode().is_err() {
            self.note_error();
        }

        outcome
    }

    /// Transmit with bounded resends, stopping at the first success
    ///
    /// Waits `policy.spacing_ms` before every attempt.
    pub fn send_with_retry(&mut self, packet: &[u8], policy: &RetryPolicy) -> RetryReport {
        let max = policy.attempts();
        let mut attempts = 0;
        let mut outcome = TxOutcome::Failed;

        while attempts < max {
            self.delay.delay_ms(policy.spacing_ms);
            attempts += 1;
            outcome = self.send_once(packet);
            if outcome.is_delivered() {
                break;
            }
        }

        RetryReport { attempts, outcome }
    }

    /// Read a pending packet, if the transceiver has one
    pub fn receive(&mut self) -> Option<Packet> {
        if !self.radio.receive_available() {
            return None;
        }

        match fragment::read_packet(&mut self.radio) {
            Ok(packet) => Some(packet),
            Err(_) => {
                self.note_error();
                None
            }
        }
    }

    fn note_error(&mut self) {
        self.errors = self.errors.wrapping_add(1);
        warn!("radio adapter error ({} total)", self.errors);
    }
}
