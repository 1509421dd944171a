//! UART serial communication abstractions
//!
//! The transmit side is blocking and used from the main loop. The receive
//! side is interrupt driven: the driver calls a registered handler once per
//! received byte.

/// UART transmitter
///
/// Used by the bridge to forward radio payloads to the host.
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Write a single byte
    ///
    /// Blocks until the byte has been handed to the peripheral.
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Write data to the UART
    ///
    /// Blocks until all data has been written or an error occurs.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        for &byte in data {
            self.write_byte(byte)?;
        }
        Ok(())
    }

    /// Write a string
    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.write_blocking(s.as_bytes())
    }

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Receive callback invoked from interrupt context
///
/// Must not block. In practice it only pushes the byte into the bridge's
/// ingestion buffer.
pub type RxHandler = fn(u8);

/// Interrupt-driven UART receiver
pub trait UartRxInterrupt {
    /// Install the per-byte receive handler and enable the RX interrupt
    fn set_rx_handler(&mut self, handler: RxHandler);
}

