#![no_main]
#![no_std]

use panic_rtt_target as _;
use rtt_target::{rprintln, rtt_init_print};

use cortex_m_rt::entry;
use embedded_hal::delay::DelayNs;
use microbit::{board::Board, hal::timer};

use mb2_capsense::*;
use mb2_capsense::nrf::Nrf52Gpio;

/// Both sensors give up after the same time.
static TIMEOUT: Timeout = Timeout::new(64_000_000);

const SAMPLES: u8 = 30;

#[entry]
fn main() -> ! {
    rtt_init_print!();
    let board = Board::take().unwrap();
    let mut timer0 = timer::Timer::new(board.TIMER0);

    // Edge pin 0 drives two electrodes: edge pin 1 and edge pin 2.
    let mut left = CapacitiveSensor::new(Nrf52Gpio, &TIMEOUT, 2, 3);
    let mut right = CapacitiveSensor::new(Nrf52Gpio, &TIMEOUT, 2, 4);
    TIMEOUT.set_timeout(20);

    loop {
        for (name, sensor) in [("left", &mut left), ("right", &mut right)] {
            match sensor.try_measure_raw(SAMPLES) {
                Ok(raw) => {
                    sensor.seed_baseline(raw);
                    let baseline = sensor.baseline().unwrap_or(raw);
                    rprintln!("{}: raw {} touch {}", name, raw, raw - baseline);
                }
                Err(err) => rprintln!("{}: {}", name, err),
            }
        }
        timer0.delay_ms(500u32);
    }
}
