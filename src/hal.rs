//! The hardware capabilities a sensor needs from its platform.
//!
//! A [`GpioPort`] resolves logical pin numbers to a bit within a GPIO
//! register and gives raw access to those registers. Everything the
//! timing loop does goes through this trait, so the same code runs on
//! the micro:bit and against a simulated port in tests.

/// Logical pin number, as understood by the platform.
pub type PinId = u8;

/// Address of a memory-mapped GPIO register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Register(pub usize);

/// Direction of a pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinMode {
    Input,
    Output,
}

/// Pin mapping and register access for one GPIO controller.
pub trait GpioPort {
    /// Handle for a GPIO port (bank of up to 32 pins).
    type Port: Copy;

    /// Bit of `pin` within its port's registers.
    fn bitmask(&self, pin: PinId) -> u32;

    /// Port that `pin` belongs to.
    fn port(&self, pin: PinId) -> Self::Port;

    /// Writable output level register of `port`.
    fn output_register(&self, port: Self::Port) -> Register;

    /// Readable input level register of `port`.
    fn input_register(&self, port: Self::Port) -> Register;

    /// Read the current value of `register`.
    fn read(&mut self, register: Register) -> u32;

    /// Set the bits in `mask`, leaving the others untouched.
    fn set_bits(&mut self, register: Register, mask: u32);

    /// Clear the bits in `mask`, leaving the others untouched.
    fn clear_bits(&mut self, register: Register, mask: u32);

    fn set_mode(&mut self, pin: PinId, mode: PinMode);
}
