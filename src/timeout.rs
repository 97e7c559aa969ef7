//! Shared limit on how long a sample may wait for the receive pin.
//!
//! The limit is kept as a count of busy-loop iterations rather than a
//! duration, since the loop count is what the timing loop compares
//! against. One [`Timeout`] is normally placed in a `static` and
//! borrowed by every sensor, so a call to [`Timeout::set_timeout`]
//! applies to all of them at once.

use core::sync::atomic::{AtomicU32, Ordering};

/// Busy-loop iterations per millisecond of timeout at
/// [`REFERENCE_CLOCK_HZ`], determined empirically.
pub const LOOP_TIMING_FACTOR: u32 = 310;

/// Clock speed [`LOOP_TIMING_FACTOR`] was measured at.
pub const REFERENCE_CLOCK_HZ: u32 = 84_000_000;

/// Timeout in effect until [`Timeout::set_timeout`] is called.
pub const DEFAULT_TIMEOUT_MS: u32 = 2000;

/// Convert a timeout in milliseconds to a loop iteration count on a
/// CPU running at `clock_hz`.
///
/// The product is formed in floating point so large timeouts do not
/// overflow; results past `u32::MAX` saturate.
pub const fn iterations_for(millis: u32, clock_hz: u32) -> u32 {
    (millis as f64 * LOOP_TIMING_FACTOR as f64 * clock_hz as f64 / REFERENCE_CLOCK_HZ as f64) as u32
}

/// Iteration threshold shared between sensors.
#[derive(Debug)]
pub struct Timeout {
    iterations: AtomicU32,
    clock_hz: u32,
}

impl Timeout {
    /// Timeout for a CPU running at `clock_hz`, initially
    /// [`DEFAULT_TIMEOUT_MS`].
    pub const fn new(clock_hz: u32) -> Self {
        Self {
            iterations: AtomicU32::new(iterations_for(DEFAULT_TIMEOUT_MS, clock_hz)),
            clock_hz,
        }
    }

    /// Set the timeout to `millis` milliseconds. Measurements already
    /// in progress keep the threshold they started with.
    pub fn set_timeout(&self, millis: u32) {
        self.set_iterations(iterations_for(millis, self.clock_hz));
    }

    /// Set the loop iteration threshold directly.
    pub fn set_iterations(&self, iterations: u32) {
        self.iterations.store(iterations, Ordering::Relaxed);
    }

    pub fn iterations(&self) -> u32 {
        self.iterations.load(Ordering::Relaxed)
    }

    pub fn clock_hz(&self) -> u32 {
        self.clock_hz
    }
}
