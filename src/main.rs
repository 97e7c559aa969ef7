#![no_main]
#![no_std]

use panic_rtt_target as _;
use rtt_target::{rprintln, rtt_init_print};

use cortex_m_rt::entry;
use embedded_hal::delay::DelayNs;
use microbit::{board::Board, hal::timer};

use mb2_capsense::{CapacitiveSensor, Timeout, nrf::Nrf52Gpio};

/// nRF52833 core clock.
const CPU_CLOCK_HZ: u32 = 64_000_000;

/// Edge connector pin 0 (P0.02), through ~1 MΩ to the receive pin.
const SEND_PIN: u8 = 2;

/// Edge connector pin 1 (P0.03), wired to the touch electrode.
const RECEIVE_PIN: u8 = 3;

/// Charge/discharge cycles summed per reading.
const SAMPLES: u8 = 30;

/// Minimum reading above baseline to regard as "touched".
const TOUCH_THRESHOLD: i32 = 200;

/// Time in milliseconds between readings.
const SAMPLE_PERIOD_MS: u32 = 100;

/// Give up on a reading after this many milliseconds.
const TIMEOUT_MS: u32 = 50;

static TIMEOUT: Timeout = Timeout::new(CPU_CLOCK_HZ);

/// Button press and release events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchEvent {
    Press,
    Release,
}

/// Forwards `log` records from the library to RTT.
struct RttLogger;

impl log::Log for RttLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        rprintln!("{} {}", record.level(), record.args());
    }

    fn flush(&self) {}
}

static LOGGER: RttLogger = RttLogger;

#[entry]
fn main() -> ! {
    rtt_init_print!();
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(log::LevelFilter::Debug);
    }

    let board = Board::take().unwrap();
    let mut delay = timer::Timer::new(board.TIMER0);

    TIMEOUT.set_timeout(TIMEOUT_MS);
    let mut sensor = CapacitiveSensor::new(Nrf52Gpio, &TIMEOUT, SEND_PIN, RECEIVE_PIN);
    rprintln!("timeout: {} iterations", TIMEOUT.iterations());

    // Let the electrode settle, then take an untouched reading to
    // start the baseline.
    delay.delay_ms(500);
    rprintln!("baseline reading {}", sensor.measure(SAMPLES));

    let mut state = TouchEvent::Release;
    loop {
        let reading = sensor.measure(SAMPLES);
        if reading < 0 {
            rprintln!("timeout");
        } else {
            let new_state = if reading >= TOUCH_THRESHOLD {
                TouchEvent::Press
            } else {
                TouchEvent::Release
            };
            if new_state != state {
                rprintln!("{:?} ({})", new_state, reading);
            }
            state = new_state;
        }
        delay.delay_ms(SAMPLE_PERIOD_MS);
    }
}
