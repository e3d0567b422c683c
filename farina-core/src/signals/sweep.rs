mod exponential;

pub use exponential::ExponentialSweep;

use tracing::trace;

use crate::{ensure_finite, Error, Stage, SweepParameters, TimeSeries};

/// Forward exponential sweep together with its inverse filter.
///
/// The inverse is the time-reversed sweep divided by the growth factor
/// `k`, which removes the 1/f energy tilt of the sweep so that convolving
/// both yields a flat impulse.
#[derive(Debug, Clone)]
pub struct Sweep {
    forward: TimeSeries,
    inverse: TimeSeries,
}

impl Sweep {
    pub fn new(params: &SweepParameters) -> Result<Self, Error> {
        let generator = ExponentialSweep::new(params);

        let forward = TimeSeries::from_signal(generator.clone());
        ensure_finite(forward.as_slice(), Stage::Sweep)?;

        let inverse = inverse_filter(&forward, &generator);
        ensure_finite(inverse.as_slice(), Stage::Inverse)?;

        trace!(
            samples = forward.len(),
            duration = params.duration(),
            "sweep generated"
        );

        Ok(Self { forward, inverse })
    }

    pub fn forward(&self) -> &TimeSeries {
        &self.forward
    }

    pub fn inverse(&self) -> &TimeSeries {
        &self.inverse
    }

    pub fn into_parts(self) -> (TimeSeries, TimeSeries) {
        (self.forward, self.inverse)
    }
}

fn inverse_filter(forward: &TimeSeries, generator: &ExponentialSweep) -> TimeSeries {
    forward
        .iter()
        .enumerate()
        .rev()
        .map(|(n, s)| s / generator.growth(n))
        .collect()
}
