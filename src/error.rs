use core::fmt;

use thiserror::Error;

/// Half of a charge/discharge sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Send pin high, waiting for the receive pin to read high.
    Charge,
    /// Send pin low, waiting for the receive pin to read low.
    Discharge,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Charge => f.write_str("charge"),
            Phase::Discharge => f.write_str("discharge"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// The receive pin did not change level before the loop count
    /// reached the shared threshold.
    #[error("receive pin did not settle during {phase} phase within {threshold} iterations")]
    Timeout { phase: Phase, threshold: u32 },
}
