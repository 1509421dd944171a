//! Bootloader entry

/// Transfer control to the resident bootloader
///
/// Implemented by firmware that runs on a bridge's remote peer. On AVR this
/// clears the reset cause, disables interrupts and jumps to the start of the
/// boot section.
pub trait BootloaderEntry {
    /// Never returns
    fn enter_bootloader(&mut self) -> !;
}
