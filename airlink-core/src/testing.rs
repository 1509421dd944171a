//! Scripted collaborators for host tests

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use airlink_hal::{
    BootloaderEntry, ByteStorage, DelayNs, MonotonicClock, RadioAddress, RadioLink, RxHandler,
    StorageError, TxOutcome, UartRxInterrupt, UartTx,
};

/// Radio call log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RadioEvent {
    Idle,
    Receive,
    Transmit(Vec<u8>),
    OwnAddress(RadioAddress),
    PeerAddress(RadioAddress),
}

/// Error returned by the mocks when told to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

/// Scripted transceiver
pub struct MockRadio {
    pub events: Vec<RadioEvent>,
    inbox: VecDeque<Vec<u8>>,
    outcomes: VecDeque<TxOutcome>,
    /// Outcome once the script runs out
    pub default_outcome: TxOutcome,
    pub fail_transmit: bool,
    pub fail_address: bool,
    /// Length reported by `receive` instead of the real one
    pub report_len_override: Option<usize>,
}

impl MockRadio {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            inbox: VecDeque::new(),
            outcomes: VecDeque::new(),
            default_outcome: TxOutcome::Delivered,
            fail_transmit: false,
            fail_address: false,
            report_len_override: None,
        }
    }

    pub fn queue_inbound(&mut self, packet: &[u8]) {
        self.inbox.push_back(packet.to_vec());
    }

    pub fn script_outcomes(&mut self, outcomes: &[TxOutcome]) {
        self.outcomes.extend(outcomes.iter().copied());
    }

    /// Every packet handed to `transmit`, in order
    pub fn transmitted(&self) -> Vec<Vec<u8>> {
        self.events
            .iter()
            .filter_map(|event| match event {
                RadioEvent::Transmit(packet) => Some(packet.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn own_address(&self) -> Option<RadioAddress> {
        self.events.iter().rev().find_map(|event| match event {
            RadioEvent::OwnAddress(addr) => Some(*addr),
            _ => None,
        })
    }

    pub fn peer_address(&self) -> Option<RadioAddress> {
        self.events.iter().rev().find_map(|event| match event {
            RadioEvent::PeerAddress(addr) => Some(*addr),
            _ => None,
        })
    }
}

impl RadioLink for MockRadio {
    type Error = MockError;

    fn transmit(&mut self, packet: &[u8]) -> Result<(), MockError> {
        self.events.push(RadioEvent::Transmit(packet.to_vec()));
        if self.fail_transmit {
            return Err(MockError);
        }
        Ok(())
    }

    fn wait_transmit_result(&mut self) -> TxOutcome {
        self.outcomes.pop_front().unwrap_or(self.default_outcome)
    }

    fn receive_available(&mut self) -> bool {
        !self.inbox.is_empty()
    }

    fn receive(&mut self, buf: &mut [u8]) -> Result<usize, MockError> {
        let packet = self.inbox.pop_front().ok_or(MockError)?;
        let len = packet.len().min(buf.len());
        buf[..len].copy_from_slice(&packet[..len]);
        Ok(self.report_len_override.unwrap_or(packet.len()))
    }

    fn enter_idle_mode(&mut self) -> Result<(), MockError> {
        self.events.push(RadioEvent::Idle);
        Ok(())
    }

    fn enter_receive_mode(&mut self) -> Result<(), MockError> {
        self.events.push(RadioEvent::Receive);
        Ok(())
    }

    fn set_own_address(&mut self, address: RadioAddress) -> Result<(), MockError> {
        if self.fail_address {
            return Err(MockError);
        }
        self.events.push(RadioEvent::OwnAddress(address));
        Ok(())
    }

    fn set_peer_address(&mut self, address: RadioAddress) -> Result<(), MockError> {
        if self.fail_address {
            return Err(MockError);
        }
        self.events.push(RadioEvent::PeerAddress(address));
        Ok(())
    }
}

/// Serial output capture
#[derive(Default)]
pub struct MockSerial {
    pub written: Vec<u8>,
    pub fail: bool,
}

impl MockSerial {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UartTx for MockSerial {
    type Error = MockError;

    fn write_byte(&mut self, byte: u8) -> Result<(), MockError> {
        if self.fail {
            return Err(MockError);
        }
        self.written.push(byte);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), MockError> {
        Ok(())
    }
}

/// Tick counter shared between the bridge and its delay
///
/// Runs at 1 kHz unless built with [`MockClock::with_rate`]; delays are
/// converted to ticks at that rate.
#[derive(Clone)]
pub struct MockClock {
    ticks: Rc<Cell<u32>>,
    rate: u32,
}

impl MockClock {
    pub fn new() -> Self {
        Self::with_rate(1000)
    }

    pub fn with_rate(ticks_per_second: u32) -> Self {
        Self {
            ticks: Rc::new(Cell::new(0)),
            rate: ticks_per_second,
        }
    }

    /// Move forward by `ms` milliseconds worth of ticks
    pub fn advance(&self, ms: u32) {
        self.advance_ticks(self.ms_to_ticks(ms));
    }

    pub fn advance_ticks(&self, ticks: u32) {
        self.ticks.set(self.ticks.get().wrapping_add(ticks));
    }

    pub fn now_ms(&self) -> u32 {
        (u64::from(self.ticks.get()) * 1000 / u64::from(self.rate)) as u32
    }
}

impl MonotonicClock for MockClock {
    fn now(&self) -> u32 {
        self.ticks.get()
    }

    fn ticks_per_second(&self) -> u32 {
        self.rate
    }
}

/// Delay that moves the mock clock forward instead of sleeping
pub struct MockDelay {
    clock: MockClock,
    /// Every `delay_ms` argument, in order
    pub calls: Vec<u32>,
}

impl MockDelay {
    pub fn new(clock: MockClock) -> Self {
        Self {
            clock,
            calls: Vec::new(),
        }
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.clock.advance(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.calls.push(ms);
        self.clock.advance(ms);
    }
}

/// In-memory EEPROM, erased to 0xFF
pub struct MockStorage {
    pub bytes: Vec<u8>,
    pub fail_reads: bool,
}

impl MockStorage {
    pub fn new(size: usize) -> Self {
        Self {
            bytes: std::vec![0xFF; size],
            fail_reads: false,
        }
    }

    pub fn with_contents(contents: &[u8]) -> Self {
        Self {
            bytes: contents.to_vec(),
            fail_reads: false,
        }
    }
}

impl ByteStorage for MockStorage {
    fn read_byte(&mut self, addr: u16) -> Result<u8, StorageError> {
        if self.fail_reads {
            return Err(StorageError::Read);
        }
        self.bytes
            .get(addr as usize)
            .copied()
            .ok_or(StorageError::OutOfRange)
    }

    fn write_byte(&mut self, addr: u16, value: u8) -> Result<(), StorageError> {
        let slot = self
            .bytes
            .get_mut(addr as usize)
            .ok_or(StorageError::OutOfRange)?;
        *slot = value;
        Ok(())
    }
}

/// Records the installed receive handler
#[derive(Default)]
pub struct MockRxInterrupt {
    pub handler: Option<RxHandler>,
}

impl MockRxInterrupt {
    /// Deliver bytes as the interrupt would
    pub fn fire(&self, bytes: &[u8]) {
        if let Some(handler) = self.handler {
            for &byte in bytes {
                handler(byte);
            }
        }
    }
}

impl UartRxInterrupt for MockRxInterrupt {
    fn set_rx_handler(&mut self, handler: RxHandler) {
        self.handler = Some(handler);
    }
}

/// Bootloader jump that unwinds the test instead
pub struct MockBootloader;

impl BootloaderEntry for MockBootloader {
    fn enter_bootloader(&mut self) -> ! {
        panic!("entered bootloader");
    }
}
