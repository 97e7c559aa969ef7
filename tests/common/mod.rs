//! Simulated GPIO port modelling an RC pair between a send pin and a
//! receive pin.
//!
//! After the send pin goes high, the receive pin reads low for
//! `charge` polls of the input register and high after that. After the
//! send pin goes low it reads high for `discharge` polls and then low.
//! `None` means the receive pin never follows.

#![allow(dead_code)]

use mb2_capsense::{GpioPort, PinId, PinMode, Register};

pub const SEND: PinId = 2;
pub const RECEIVE: PinId = 3;

const OUT: usize = 0x504;
const IN: usize = 0x510;
const PORT_STRIDE: usize = 0x300;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Mode(PinId, PinMode),
    Set(Register, u32),
    Clear(Register, u32),
}

pub struct SimGpio {
    send: PinId,
    receive: PinId,
    out: [u32; 2],
    modes: [[PinMode; 32]; 2],
    pub charge: Option<u32>,
    pub discharge: Option<u32>,
    /// Input polls since the send pin last changed level.
    polls: u32,
    pub reads: usize,
    pub ops: Vec<Op>,
}

impl SimGpio {
    pub fn new(charge: Option<u32>, discharge: Option<u32>) -> Self {
        Self::wired(SEND, RECEIVE, charge, discharge)
    }

    pub fn wired(send: PinId, receive: PinId, charge: Option<u32>, discharge: Option<u32>) -> Self {
        Self {
            send,
            receive,
            out: [0; 2],
            modes: [[PinMode::Input; 32]; 2],
            charge,
            discharge,
            polls: 0,
            reads: 0,
            ops: Vec::new(),
        }
    }

    /// Same delay for both phases.
    pub fn symmetric(delay: u32) -> Self {
        Self::new(Some(delay), Some(delay))
    }

    pub fn set_delays(&mut self, charge: Option<u32>, discharge: Option<u32>) {
        self.charge = charge;
        self.discharge = discharge;
    }

    pub fn mode(&self, pin: PinId) -> PinMode {
        self.modes[usize::from(pin / 32)][usize::from(pin % 32)]
    }

    pub fn output_high(&self, pin: PinId) -> bool {
        self.out[usize::from(pin / 32)] & self.bitmask(pin) != 0
    }

    fn register_port(register: Register, base: usize) -> Option<usize> {
        (0..2).find(|port| register.0 == base + port * PORT_STRIDE)
    }

    fn receive_level(&mut self) -> bool {
        let settled = |delay: Option<u32>, polls| delay.is_some_and(|delay| polls >= delay);
        let high = if self.output_high(self.send) {
            settled(self.charge, self.polls)
        } else {
            !settled(self.discharge, self.polls)
        };
        self.polls = self.polls.saturating_add(1);
        high
    }

    fn write(&mut self, register: Register, value: impl FnOnce(u32) -> u32) {
        let port = Self::register_port(register, OUT).expect("write to unknown register");
        let send_before = self.output_high(self.send);
        self.out[port] = value(self.out[port]);
        if self.output_high(self.send) != send_before {
            self.polls = 0;
        }
    }
}

impl GpioPort for SimGpio {
    type Port = usize;

    fn bitmask(&self, pin: PinId) -> u32 {
        1 << (pin % 32)
    }

    fn port(&self, pin: PinId) -> usize {
        usize::from(pin / 32)
    }

    fn output_register(&self, port: usize) -> Register {
        Register(OUT + port * PORT_STRIDE)
    }

    fn input_register(&self, port: usize) -> Register {
        Register(IN + port * PORT_STRIDE)
    }

    fn read(&mut self, register: Register) -> u32 {
        let port = Self::register_port(register, IN).expect("read from unknown register");
        self.reads += 1;
        if port == usize::from(self.receive / 32) && self.receive_level() {
            self.bitmask(self.receive)
        } else {
            0
        }
    }

    fn set_bits(&mut self, register: Register, mask: u32) {
        self.ops.push(Op::Set(register, mask));
        self.write(register, |out| out | mask);
    }

    fn clear_bits(&mut self, register: Register, mask: u32) {
        self.ops.push(Op::Clear(register, mask));
        self.write(register, |out| out & !mask);
    }

    fn set_mode(&mut self, pin: PinId, mode: PinMode) {
        self.ops.push(Op::Mode(pin, mode));
        self.modes[usize::from(pin / 32)][usize::from(pin % 32)] = mode;
    }
}
