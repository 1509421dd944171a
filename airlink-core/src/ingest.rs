//! Serial ingestion buffer
//!
//! Fixed-capacity circular byte queue between the serial-receive interrupt
//! (producer) and the dispatch loop (consumer).
//!
//! ```text
//!        start                start + len
//!          ▼                      ▼
//! ┌────────┬──────────────────────┬───────────────┐
//! │  free  │   unread bytes       │     free      │
//! └────────┴──────────────────────┴───────────────┘
//! ```
//!
//! The (start, len) pair is only ever changed inside a critical section.
//! Byte slots are atomics, so the consumer copies payload out without
//! masking interrupts and only re-enters the critical section to commit
//! how much it took.

use core::sync::atomic::Ordering;

use portable_atomic::{AtomicU8, AtomicUsize};

/// Buffer capacity in bytes
pub const CAPACITY: usize = 256;

/// Single-producer single-consumer byte queue fed from interrupt context
///
/// Intended to live in a `static` so a `fn(u8)` receive handler can reach it:
///
/// ```rust
/// use airlink_core::ingest::IngestBuffer;
///
/// static INGEST: IngestBuffer = IngestBuffer::new();
///
/// airlink_core::rx_handler!(on_serial_rx => INGEST);
///
/// on_serial_rx(b'x');
/// assert_eq!(INGEST.pending(), 1);
/// ```
pub struct IngestBuffer {
    data: [AtomicU8; CAPACITY],
    start: AtomicUsize,
    len: AtomicUsize,
    overruns: AtomicUsize,
}

impl IngestBuffer {
    /// Create an empty buffer
    pub const fn new() -> Self {
        Self {
            data: [const { AtomicU8::new(0) }; CAPACITY],
            start: AtomicUsize::new(0),
            len: AtomicUsize::new(0),
            overruns: AtomicUsize::new(0),
        }
    }

    /// Get the total capacity of the buffer
    #[inline]
    pub const fn capacity(&self) -> usize {
        CAPACITY
    }

    /// Append one byte
    ///
    /// Called from the serial-receive interrupt. Never blocks. When the
    /// buffer is full the oldest unread byte is overwritten.
    pub fn push(&self, byte: u8) {
        critical_section::with(|_| {
            let start = self.start.load(Ordering::Relaxed);
            let len = self.len.load(Ordering::Relaxed);

            if len < CAPACITY {
                self.data[(start + len) % CAPACITY].store(byte, Ordering::Relaxed);
                self.len.store(len + 1, Ordering::Release);
            } else {
                // Full: the write position is the oldest unread byte
                self.data[start].store(byte, Ordering::Relaxed);
                self.start.store((start + 1) % CAPACITY, Ordering::Release);
                let overruns = self.overruns.load(Ordering::Relaxed);
                self.overruns
                    .store(overruns.wrapping_add(1), Ordering::Relaxed);
            }
        });
    }

    /// Number of unread bytes, read without masking interrupts
    ///
    /// Only suitable for polling whether there is work: the producer may
    /// append between this read and any later drain.
    #[inline]
    pub fn pending(&self) -> usize {
        self.len.load(Ordering::Acquire)
    }

    /// Number of unread bytes, read inside a critical section
    pub fn len(&self) -> usize {
        critical_section::with(|_| self.len.load(Ordering::Acquire))
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of bytes lost to overwrite since boot
    pub fn overruns(&self) -> usize {
        self.overruns.load(Ordering::Relaxed)
    }

    /// Move up to `out.len()` bytes into `out` in FIFO order
    ///
    /// Snapshots (start, len), copies in at most two contiguous runs, then
    /// commits the copied amount. Returns the number of bytes moved.
    pub fn drain_into(&self, out: &mut [u8]) -> usize {
        let snapshot = self.snapshot();

        let count = snapshot.len.min(out.len());
        if count == 0 {
            return 0;
        }

        let start = snapshot.start;
        let first = count.min(CAPACITY - start);
        for (slot, cell) in out[..first].iter_mut().zip(&self.data[start..start + first]) {
            *slot = cell.load(Ordering::Relaxed);
        }
        for (slot, cell) in out[first..count].iter_mut().zip(&self.data[..count - first]) {
            *slot = cell.load(Ordering::Relaxed);
        }

        self.commit(&snapshot, count);
        count
    }

    fn snapshot(&self) -> Snapshot {
        critical_section::with(|_| Snapshot {
            start: self.start.load(Ordering::Acquire),
            len: self.len.load(Ordering::Acquire),
            overruns: self.overruns.load(Ordering::Relaxed),
        })
    }

    /// Retire `count` bytes copied from the window described by `snapshot`
    ///
    /// Each overrun since the snapshot has already moved `start` past one
    /// of the copied positions, so only the remainder is retired here. The
    /// bytes that replaced those positions may have been copied too; that
    /// loss is accepted, but nothing unread is skipped.
    fn commit(&self, snapshot: &Snapshot, count: usize) {
        critical_section::with(|_| {
            let overrun = self
                .overruns
                .load(Ordering::Relaxed)
                .wrapping_sub(snapshot.overruns);
            let retire = count.saturating_sub(overrun);

            let start = self.start.load(Ordering::Relaxed);
            let len = self.len.load(Ordering::Relaxed);
            self.start.store((start + retire) % CAPACITY, Ordering::Release);
            self.len.store(len.saturating_sub(retire), Ordering::Release);
        });
    }
}

/// Buffer window at the start of a drain
struct Snapshot {
    start: usize,
    len: usize,
    overruns: usize,
}

impl Default for IngestBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Declare a `fn(u8)` receive handler that feeds a static [`IngestBuffer`]
///
/// The generated function is what gets installed with
/// `UartRxInterrupt::set_rx_handler`.
#[macro_export]
macro_rules! rx_handler {
    ($name:ident => $buffer:expr) => {
        fn $name(byte: u8) {
            $buffer.push(byte);
        }
    };
}
