//! Persistent storage abstractions
//!
//! The bridge keeps its radio addresses in a handful of EEPROM bytes.
//! Access is single-byte and random by address.

/// Errors from persistent storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Address is beyond the end of the storage
    OutOfRange,
    /// The device reported a read failure
    Read,
    /// The device reported a write failure
    Write,
}

/// Byte-addressed persistent storage
///
/// Typically the MCU's internal EEPROM. Reads are expected to be cheap;
/// writes may block until the cell has been programmed.
pub trait ByteStorage {
    /// Read the byte stored at `addr`
    fn read_byte(&mut self, addr: u16) -> Result<u8, StorageError>;

    /// Program `value` at `addr`
    fn write_byte(&mut self, addr: u16, value: u8) -> Result<(), StorageError>;

    /// Read `buf.len()` consecutive bytes starting at `addr`
    fn read_into(&mut self, addr: u16, buf: &mut [u8]) -> Result<(), StorageError> {
        for (offset, slot) in buf.iter_mut().enumerate() {
            let addr = addr
                .checked_add(offset as u16)
                .ok_or(StorageError::OutOfRange)?;
            *slot = self.read_byte(addr)?;
        }
        Ok(())
    }

    /// Write `data` to consecutive bytes starting at `addr`
    fn write_from(&mut self, addr: u16, data: &[u8]) -> Result<(), StorageError> {
        for (offset, &value) in data.iter().enumerate() {
            let addr = addr
                .checked_add(offset as u16)
                .ok_or(StorageError::OutOfRange)?;
            self.write_byte(addr, value)?;
        }
        Ok(())
    }
}
