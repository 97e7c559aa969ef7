//! Charge/discharge timing between a send pin and a receive pin.
//!
//! The receive pin is connected to the send pin through a large
//! resistor, and to the touch electrode. Driving the send pin charges
//! the electrode through the resistor; the more capacitance on the
//! electrode (a finger, say), the longer the receive pin takes to
//! follow. That time is measured by counting iterations of a busy
//! loop.

use log::{debug, trace};

use crate::error::{Error, Phase};
use crate::hal::{GpioPort, PinId, PinMode, Register};
use crate::timeout::Timeout;

/// Capacitive sensor on a send/receive pin pair.
pub struct CapacitiveSensor<'t, G: GpioPort> {
    /// Register access for both pins.
    gpio: G,
    /// Shared loop iteration limit.
    timeout: &'t Timeout,
    send_pin: PinId,
    receive_pin: PinId,
    send_mask: u32,
    receive_mask: u32,
    send_out: Register,
    receive_in: Register,
    receive_out: Register,
    /// Smallest raw total seen so far. `u32::MAX` until the first
    /// successful measurement.
    least_total: u32,
}

impl<'t, G: GpioPort> CapacitiveSensor<'t, G> {
    /// Bind a sensor to `send_pin` and `receive_pin` and make the send
    /// pin an output.
    pub fn new(mut gpio: G, timeout: &'t Timeout, send_pin: PinId, receive_pin: PinId) -> Self {
        let send_mask = gpio.bitmask(send_pin);
        let send_out = gpio.output_register(gpio.port(send_pin));

        let receive_mask = gpio.bitmask(receive_pin);
        let receive_port = gpio.port(receive_pin);
        let receive_in = gpio.input_register(receive_port);
        let receive_out = gpio.output_register(receive_port);

        critical_section::with(|_| gpio.set_mode(send_pin, PinMode::Output));

        Self {
            gpio,
            timeout,
            send_pin,
            receive_pin,
            send_mask,
            receive_mask,
            send_out,
            receive_in,
            receive_out,
            least_total: u32::MAX,
        }
    }

    /// Measure over `samples` charge/discharge cycles and return the
    /// total relative to the smallest total seen so far, or -1 if the
    /// receive pin timed out.
    pub fn measure(&mut self, samples: u8) -> i32 {
        match self.try_measure(samples) {
            Ok(value) => i32::try_from(value).unwrap_or(i32::MAX),
            Err(_) => -1,
        }
    }

    /// Measure over `samples` cycles, subtracting the baseline.
    ///
    /// The baseline is lowered to this call's total first, so the
    /// result is never negative and the first successful call always
    /// reads 0. Zero samples reads 0 without touching the pins or the
    /// baseline.
    pub fn try_measure(&mut self, samples: u8) -> Result<u32, Error> {
        if samples == 0 {
            return Ok(0);
        }
        let total = self.try_measure_raw(samples)?;
        if total < self.least_total {
            debug!(
                "baseline on pins {}/{} lowered to {}",
                self.send_pin, self.receive_pin, total
            );
            self.least_total = total;
        }
        trace!("raw total {} baseline {}", total, self.least_total);
        Ok(total - self.least_total)
    }

    /// Sum of the charge and discharge loop counts over `samples`
    /// cycles, without reference to the baseline.
    ///
    /// All samples count into the same total, and the timeout bounds
    /// that running total rather than each sample.
    pub fn try_measure_raw(&mut self, samples: u8) -> Result<u32, Error> {
        let threshold = self.timeout.iterations();
        let mut total = 0;
        for sample in 0..samples {
            if let Err(err) = self.sense_sample(&mut total, threshold) {
                debug!("sample {} of {} aborted: {}", sample + 1, samples, err);
                return Err(err);
            }
        }
        Ok(total)
    }

    /// Smallest raw total measured so far.
    pub fn baseline(&self) -> Option<u32> {
        (self.least_total != u32::MAX).then_some(self.least_total)
    }

    /// Fold a known untouched total into the baseline. Like a
    /// measurement, this can only lower the baseline.
    pub fn seed_baseline(&mut self, total: u32) {
        self.least_total = self.least_total.min(total);
    }

    pub fn send_pin(&self) -> PinId {
        self.send_pin
    }

    pub fn receive_pin(&self) -> PinId {
        self.receive_pin
    }

    pub fn gpio(&self) -> &G {
        &self.gpio
    }

    pub fn gpio_mut(&mut self) -> &mut G {
        &mut self.gpio
    }

    /// Give back the GPIO handle.
    pub fn release(self) -> G {
        self.gpio
    }

    /// One charge and one discharge, counting into `total`.
    fn sense_sample(&mut self, total: &mut u32, threshold: u32) -> Result<(), Error> {
        critical_section::with(|_| self.start_charge());

        while !self.receive_is_high() && *total < threshold {
            *total += 1;
        }
        if *total >= threshold {
            return Err(Error::Timeout {
                phase: Phase::Charge,
                threshold,
            });
        }

        critical_section::with(|_| self.start_discharge());

        while self.receive_is_high() && *total < threshold {
            *total += 1;
        }
        if *total >= threshold {
            return Err(Error::Timeout {
                phase: Phase::Discharge,
                threshold,
            });
        }
        Ok(())
    }

    fn start_charge(&mut self) {
        self.gpio.clear_bits(self.send_out, self.send_mask);
        self.gpio.set_mode(self.receive_pin, PinMode::Input);
        // Output latch low so no pull-up is left on, then drain the pin.
        self.gpio.clear_bits(self.receive_out, self.receive_mask);
        self.gpio.set_mode(self.receive_pin, PinMode::Output);
        self.gpio.set_mode(self.receive_pin, PinMode::Input);
        self.gpio.set_bits(self.send_out, self.send_mask);
    }

    fn start_discharge(&mut self) {
        // The charge loop exits around half supply; top the pin up.
        self.gpio.set_bits(self.receive_out, self.receive_mask);
        self.gpio.set_mode(self.receive_pin, PinMode::Output);
        self.gpio.set_mode(self.receive_pin, PinMode::Input);
        self.gpio.clear_bits(self.receive_out, self.receive_mask);
        self.gpio.clear_bits(self.send_out, self.send_mask);
    }

    fn receive_is_high(&mut self) -> bool {
        self.gpio.read(self.receive_in) & self.receive_mask != 0
    }
}
