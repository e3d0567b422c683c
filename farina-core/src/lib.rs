#[cfg(test)]
macro_rules! assert_eq_delta {
    ($a:expr, $b:expr, $d:expr) => {
        let left = ($a - $b).abs();
        assert!(
            left <= $d,
            "assert failed: {} == {}, left {} <= delta {}",
            $a,
            $b,
            left,
            $d
        )
    };
}

mod analysis;
mod impulse_response;
mod magnitude;
mod parameters;
mod series;

pub mod signals;

pub use analysis::*;
pub use impulse_response::*;
pub use magnitude::*;
pub use parameters::*;
pub use series::*;

pub use rustfft::num_complex::Complex64;

use thiserror::Error;

use std::fmt;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("invalid sweep parameters: {0}")]
    InvalidParameters(#[from] ParameterError),
    #[error("non-finite values in {stage}")]
    NumericDegenerate { stage: Stage },
    #[error("sweep has {sweep} samples but its inverse has {inverse}")]
    LengthMismatch { sweep: usize, inverse: usize },
    #[error("signal is empty")]
    EmptySignal,
}

/// Pipeline step that produced a value, used to locate numeric failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Sweep,
    Inverse,
    SweepSpectrum,
    InverseSpectrum,
    Convolution,
    Impulse,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Stage::Sweep => "sweep",
                Stage::Inverse => "inverse sweep",
                Stage::SweepSpectrum => "sweep spectrum",
                Stage::InverseSpectrum => "inverse sweep spectrum",
                Stage::Convolution => "convolution spectrum",
                Stage::Impulse => "impulse response",
            }
        )
    }
}

/// Sample type whose finiteness can be checked, real or complex.
pub(crate) trait Finite {
    fn all_finite(&self) -> bool;
}

impl Finite for f64 {
    fn all_finite(&self) -> bool {
        self.is_finite()
    }
}

impl Finite for Complex64 {
    fn all_finite(&self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }
}

/// Fails with [`Error::NumericDegenerate`] for `stage` on any NaN or infinity.
pub(crate) fn ensure_finite<T: Finite>(data: &[T], stage: Stage) -> Result<(), Error> {
    if data.iter().all(Finite::all_finite) {
        Ok(())
    } else {
        Err(Error::NumericDegenerate { stage })
    }
}
