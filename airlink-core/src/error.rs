//! Startup errors
//!
//! Steady-state faults never surface as errors; they are counted in
//! [`crate::bridge::LinkStats`] and the loop carries on.

use airlink_hal::StorageError;

/// Bridge initialization failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitError {
    /// The persisted address block could not be read
    Storage(StorageError),
    /// The transceiver rejected its address or mode configuration
    Radio,
}

impl From<StorageError> for InitError {
    fn from(err: StorageError) -> Self {
        InitError::Storage(err)
    }
}
