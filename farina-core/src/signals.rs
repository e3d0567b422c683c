mod sweep;

pub use sweep::{ExponentialSweep, Sweep};

/// A signal with a known number of remaining samples.
pub trait FiniteSignal: ExactSizeIterator<Item = f64> {}

impl<T> FiniteSignal for T where T: ExactSizeIterator<Item = f64> {}
