//! Dispatch loop
//!
//! [`Bridge`] owns every collaborator except the ingestion buffer, which it
//! shares with the serial-receive interrupt. Each iteration services the
//! radio receive side first, then the transmit side:
//!
//! ```text
//!   radio ──► receive ──► duplicate filter ──► serial
//!                │
//!                └──► handshake activity
//!
//!   serial IRQ ──► IngestBuffer ──► handshake ──► shaper ──► framing ──► retry ──► radio
//! ```
//!
//! Typical board setup:
//!
//! ```rust,ignore
//! static INGEST: IngestBuffer = IngestBuffer::new();
//! airlink_core::rx_handler!(on_rx => INGEST);
//!
//! uart_rx.set_rx_handler(on_rx);
//! let bridge = Bridge::new(radio, uart_tx, clock, delay, &mut eeprom, &INGEST,
//!                          BridgeConfig::sequenced())?;
//! bridge.run()
//! ```

use airlink_hal::{ByteStorage, DelayNs, MonotonicClock, RadioLink, UartTx};
use airlink_protocol::{packet, AddressingPacket, Framing};

use crate::config::{BridgeConfig, PersistedLayout, RadioAddresses};
use crate::error::InitError;
use crate::fragment;
use crate::handshake::{self, Handshake, HandshakeState};
use crate::ingest::IngestBuffer;
use crate::link::Link;
use crate::sequence::{BurstShaper, DuplicateFilter, SequenceCounter, Verdict};

const BANNER_PREFIX: &str = "airlink: our addr: ";
const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Traffic counters since startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStats {
    /// Outbound packets acknowledged by the peer
    pub packets_sent: u32,
    /// Outbound packets abandoned after the last attempt
    pub packets_dropped: u32,
    /// Transmission attempts for data packets
    pub attempts: u32,
    /// Inbound packets read from the radio
    pub packets_received: u32,
    /// Inbound packets discarded as retransmissions
    pub duplicates: u32,
    /// Reset and address sequences sent
    pub bootstraps: u32,
    /// Radio adapter errors
    pub adapter_errors: u32,
    /// Serial writes that failed
    pub serial_errors: u32,
}

/// Per-direction protocol state
struct LinkState {
    counter: SequenceCounter,
    filter: DuplicateFilter,
    shaper: BurstShaper,
    handshake: Option<Handshake>,
}

/// Serial-to-radio bridge
pub struct Bridge<'a, R, U, C, D> {
    link: Link<R, D>,
    serial: U,
    clock: C,
    ingest: &'a IngestBuffer,
    config: BridgeConfig,
    addresses: RadioAddresses,
    announcement: AddressingPacket,
    state: LinkState,
    stats: LinkStats,
}

impl<'a, R, U, C, D> Bridge<'a, R, U, C, D>
where
    R: RadioLink,
    U: UartTx,
    C: MonotonicClock,
    D: DelayNs,
{
    /// Load addresses, configure the radio and start listening
    ///
    /// Writes the boot banner to serial when `config.announce_on_boot` is
    /// set. A banner write failure is counted, not fatal.
    pub fn new<S: ByteStorage>(
        mut radio: R,
        serial: U,
        clock: C,
        delay: D,
        storage: &mut S,
        ingest: &'a IngestBuffer,
        config: BridgeConfig,
    ) -> Result<Self, InitError> {
        let addresses = PersistedLayout::load(storage, config.uses_max_packet())?;

        radio
            .set_own_address(addresses.own)
            .map_err(|_| InitError::Radio)?;
        radio
            .set_peer_address(addresses.peer)
            .map_err(|_| InitError::Radio)?;

        let handshake = config
            .bootstrap
            .map(|b| Handshake::new(clock.ms_to_ticks(b.quiet_period_ms)));

        let announcement = AddressingPacket {
            reply_to: addresses.own,
            max_packet: if config.uses_max_packet() {
                addresses.max_packet
            } else {
                None
            },
        };

        let mut bridge = Self {
            link: Link::new(radio, delay),
            serial,
            clock,
            ingest,
            config,
            addresses,
            announcement,
            state: LinkState {
                counter: SequenceCounter::new(),
                filter: DuplicateFilter::new(),
                shaper: BurstShaper::new(config.burst_shaping),
                handshake,
            },
            stats: LinkStats::default(),
        };

        if config.announce_on_boot && bridge.write_banner().is_err() {
            bump(&mut bridge.stats.serial_errors);
        }

        bridge
            .link
            .radio_mut()
            .enter_receive_mode()
            .map_err(|_| InitError::Radio)?;

        info!(
            "bridge up: framing={}, attempts={}, bootstrap={}",
            config.framing,
            config.retry.attempts(),
            config.bootstrap.is_some()
        );

        Ok(bridge)
    }

    /// Service the link forever
    pub fn run(mut self) -> ! {
        loop {
            self.poll();
        }
    }

    /// One dispatch iteration: receive side, then transmit side
    pub fn poll(&mut self) {
        self.service_receive();
        self.service_transmit();
    }

    /// Counters since startup
    pub fn stats(&self) -> LinkStats {
        LinkStats {
            adapter_errors: self.link.errors(),
            ..self.stats
        }
    }

    /// Addresses loaded at startup
    pub fn addresses(&self) -> &RadioAddresses {
        &self.addresses
    }

    /// Active configuration
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Handshake state, `None` when bootstrapping is disabled
    pub fn handshake_state(&self) -> Option<HandshakeState> {
        self.state.handshake.as_ref().map(Handshake::state)
    }

    /// Access the transceiver
    pub fn radio(&self) -> &R {
        self.link.radio()
    }

    /// Mutable access to the transceiver
    pub fn radio_mut(&mut self) -> &mut R {
        self.link.radio_mut()
    }

    /// Access the serial transmitter
    pub fn serial(&self) -> &U {
        &self.serial
    }

    fn service_receive(&mut self) {
        let Some(packet) = self.link.receive() else {
            return;
        };

        bump(&mut self.stats.packets_received);
        if let Some(hs) = self.state.handshake.as_mut() {
            hs.note_activity(self.clock.now());
        }

        let payload: &[u8] = match self.config.framing {
            Framing::Plain => &packet,
            Framing::Sequenced => match self.state.filter.accept(&packet) {
                Verdict::Fresh(payload) => payload,
                Verdict::Duplicate(seq) => {
                    bump(&mut self.stats.duplicates);
                    trace!("duplicate seq {} dropped", seq);
                    return;
                }
                Verdict::Empty => return,
            },
        };

        if fragment::deliver(&mut self.serial, payload).is_err() {
            bump(&mut self.stats.serial_errors);
        }
    }

    fn service_transmit(&mut self) {
        if self.ingest.pending() == 0 {
            self.state.shaper.end();
            return;
        }

        if let Some(hs) = self.state.handshake.as_mut() {
            if hs.check(self.clock.now()) == HandshakeState::Armed {
                let settle_ms = self.config.bootstrap.map_or(0, |b| b.settle_ms);
                handshake::bootstrap(&mut self.link, &self.announcement, settle_ms);
                hs.complete(self.clock.now());
                bump(&mut self.stats.bootstraps);
            }
        }

        let limit = self.payload_limit();
        let Some(payload) = fragment::take_payload(self.ingest, limit) else {
            self.state.shaper.end();
            return;
        };
        self.state.shaper.advance();

        let framed = match self.config.framing {
            Framing::Plain => packet::plain(&payload),
            Framing::Sequenced => packet::sequenced(self.state.counter.peek(), &payload),
        };
        let framed = match framed {
            Ok(framed) => framed,
            Err(err) => {
                // Payload is already out of the ingestion buffer
                bump(&mut self.stats.packets_dropped);
                warn!("{} byte payload could not be framed: {}", payload.len(), err);
                return;
            }
        };
        if self.config.framing == Framing::Sequenced {
            self.state.counter.advance();
        }

        let report = self.link.send_with_retry(&framed, &self.config.retry);
        self.stats.attempts = self.stats.attempts.wrapping_add(u32::from(report.attempts));
        if report.outcome.is_delivered() {
            bump(&mut self.stats.packets_sent);
        } else {
            bump(&mut self.stats.packets_dropped);
            warn!(
                "packet of {} bytes dropped after {} attempts",
                framed.len(),
                report.attempts
            );
        }

        if let Some(hs) = self.state.handshake.as_mut() {
            hs.note_activity(self.clock.now());
        }
    }

    /// Payload bytes allowed in the next outbound packet
    fn payload_limit(&self) -> usize {
        let framing = self.config.framing;
        let mut full = framing.max_payload();

        if let Some(max) = self.announcement.max_packet {
            let cap = usize::from(max).saturating_sub(framing.header_len()).max(1);
            full = full.min(cap);
        }

        self.state.shaper.limit(full)
    }

    fn write_banner(&mut self) -> Result<(), U::Error> {
        self.serial.write_str(BANNER_PREFIX)?;
        for &byte in self.addresses.own.as_bytes() {
            self.serial.write_byte(HEX_DIGITS[usize::from(byte >> 4)])?;
            self.serial.write_byte(HEX_DIGITS[usize::from(byte & 0x0F)])?;
        }
        self.serial.write_str("\r\n")?;
        self.serial.flush()
    }
}

fn bump(counter: &mut u32) {
    *counter = counter.wrapping_add(1);
}
