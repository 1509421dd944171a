//! Monotonic time source

/// Free-running tick counter
///
/// The counter wraps at `u32::MAX`; consumers compare instants with
/// `wrapping_sub`, so gaps shorter than one full wrap are measured correctly.
pub trait MonotonicClock {
    /// Current tick count
    fn now(&self) -> u32;

    /// Tick rate of [`MonotonicClock::now`] in Hz
    fn ticks_per_second(&self) -> u32;

    /// Convert a duration in milliseconds to ticks of this clock
    fn ms_to_ticks(&self, ms: u32) -> u32 {
        let ticks = u64::from(self.ticks_per_second()) * u64::from(ms) / 1000;
        ticks.min(u64::from(u32::MAX)) as u32
    }
}
