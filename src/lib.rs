#![cfg_attr(not(test), no_std)]

//! Capacitive touch sensing using nothing but two GPIO pins.
//!
//! A send pin drives a touch electrode through a high value resistor
//! (around 1 MΩ); a receive pin on the electrode is watched until it
//! follows. [`CapacitiveSensor::measure`] counts busy-loop iterations
//! through one charge and one discharge per sample and reports the
//! total relative to the quietest reading seen so far.
//!
//! ```ignore
//! static TIMEOUT: Timeout = Timeout::new(64_000_000);
//!
//! let mut sensor = CapacitiveSensor::new(Nrf52Gpio, &TIMEOUT, 2, 3);
//! TIMEOUT.set_timeout(100);
//! match sensor.measure(30) {
//!     -1 => rprintln!("timeout"),
//!     reading => rprintln!("{}", reading),
//! }
//! ```
//!
//! Platform access goes through [`GpioPort`]. The `board` feature
//! provides [`nrf::Nrf52Gpio`] for the BBC micro:bit v2. Interrupts
//! are masked through [`critical_section`], so the final binary must
//! link a critical section implementation.

mod error;
mod hal;
mod sensor;
mod timeout;

#[cfg(feature = "board")]
pub mod nrf;

pub use error::{Error, Phase};
pub use hal::{GpioPort, PinId, PinMode, Register};
pub use sensor::CapacitiveSensor;
pub use timeout::{
    DEFAULT_TIMEOUT_MS, LOOP_TIMING_FACTOR, REFERENCE_CLOCK_HZ, Timeout, iterations_for,
};
