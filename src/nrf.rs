//! [`GpioPort`] for the nRF52833 on the micro:bit v2.
//!
//! Pins are numbered `port * 32 + pin`: P0.02 is 2, P1.04 is 36.

use core::ptr;

use microbit::hal::pac::{P0, P1, p0};

use crate::hal::{GpioPort, PinId, PinMode, Register};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Port {
    P0,
    P1,
}

impl Port {
    fn block(self) -> *const p0::RegisterBlock {
        match self {
            Port::P0 => P0::ptr(),
            Port::P1 => P1::ptr(),
        }
    }
}

/// Raw access to the P0 and P1 GPIO registers.
///
/// This does not own the pins: the application must keep the pins a
/// sensor uses away from the rest of the HAL.
#[derive(Clone, Copy, Debug, Default)]
pub struct Nrf52Gpio;

impl GpioPort for Nrf52Gpio {
    type Port = Port;

    fn bitmask(&self, pin: PinId) -> u32 {
        1 << (pin % 32)
    }

    fn port(&self, pin: PinId) -> Port {
        if pin < 32 { Port::P0 } else { Port::P1 }
    }

    fn output_register(&self, port: Port) -> Register {
        // Safety: the block pointer is a fixed peripheral address.
        Register(unsafe { ptr::addr_of!((*port.block()).out) } as usize)
    }

    fn input_register(&self, port: Port) -> Register {
        // Safety: as above.
        Register(unsafe { ptr::addr_of!((*port.block()).in_) } as usize)
    }

    fn read(&mut self, register: Register) -> u32 {
        // Safety: registers only ever come from `output_register` and
        // `input_register`, which are valid 32-bit MMIO addresses.
        unsafe { ptr::read_volatile(register.0 as *const u32) }
    }

    fn set_bits(&mut self, register: Register, mask: u32) {
        let value = self.read(register) | mask;
        // Safety: as in `read`.
        unsafe { ptr::write_volatile(register.0 as *mut u32, value) }
    }

    fn clear_bits(&mut self, register: Register, mask: u32) {
        let value = self.read(register) & !mask;
        // Safety: as in `read`.
        unsafe { ptr::write_volatile(register.0 as *mut u32, value) }
    }

    fn set_mode(&mut self, pin: PinId, mode: PinMode) {
        // Safety: PIN_CNF writes are single-word and touch only `pin`.
        let block = unsafe { &*self.port(pin).block() };
        // The input buffer stays connected in both modes so IN always
        // reflects the pad.
        block.pin_cnf[usize::from(pin % 32)].write(|w| match mode {
            PinMode::Input => w.dir().input().input().connect().pull().disabled(),
            PinMode::Output => w.dir().output().input().connect().pull().disabled(),
        });
    }
}
