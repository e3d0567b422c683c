use std::f64::consts::PI;

use crate::SweepParameters;

/// Exponential sine sweep, `sin(2π·f1·L·(exp(t/L) − 1))` with `L = T / R`.
///
/// The instantaneous frequency rises from the start to the end frequency of
/// the parameters over exactly `length` samples.
#[derive(Debug, Clone)]
pub struct ExponentialSweep {
    sample_index: usize,
    n_samples: usize,
    start_frequency: f64,
    sample_rate: f64,
    amplitude: f64,
    l: f64,
}

impl ExponentialSweep {
    pub fn new(params: &SweepParameters) -> Self {
        Self::with_amplitude(params, 1.0)
    }

    pub fn with_amplitude(params: &SweepParameters, amplitude: f64) -> Self {
        Self {
            sample_index: 0,
            n_samples: params.length(),
            start_frequency: params.start_frequency(),
            sample_rate: params.sample_rate(),
            amplitude,
            l: params.duration() / params.log_rate(),
        }
    }

    /// Growth factor `k = exp(t·R/T)` at sample `n`.
    pub fn growth(&self, n: usize) -> f64 {
        f64::exp(self.time(n) / self.l)
    }

    pub fn instantaneous_frequency(&self, t: f64) -> f64 {
        self.start_frequency * f64::exp(t / self.l)
    }

    /// Value of sample `n`, independent of the iterator position.
    pub fn sample(&self, n: usize) -> f64 {
        let phase = 2.0 * PI * self.start_frequency * self.l * (self.growth(n) - 1.0);
        self.amplitude * phase.sin()
    }

    fn time(&self, n: usize) -> f64 {
        n as f64 / self.sample_rate
    }
}

impl Iterator for ExponentialSweep {
    type Item = f64;

    fn next(&mut self) -> Option<Self::Item> {
        if self.sample_index < self.n_samples {
            let s = self.sample(self.sample_index);
            self.sample_index += 1;

            Some(s)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl ExactSizeIterator for ExponentialSweep {
    fn len(&self) -> usize {
        self.n_samples - self.sample_index
    }
}

#[cfg(test)]
mod test {
    use super::ExponentialSweep;
    use crate::SweepParameters;

    #[test]
    fn starts_at_zero() {
        let mut sweep = ExponentialSweep::new(&SweepParameters::default());

        assert_eq!(sweep.next(), Some(0.0));
    }

    #[test]
    fn exact_length() {
        let params = SweepParameters::default();
        let mut sweep = ExponentialSweep::new(&params);
        assert_eq!(sweep.len(), 1024);

        sweep.next();
        assert_eq!(sweep.len(), 1023);

        assert_eq!(sweep.count(), 1023);
    }

    #[test]
    fn frequency_spans_range() {
        let params = SweepParameters::default();
        let sweep = ExponentialSweep::new(&params);

        assert_eq_delta!(sweep.instantaneous_frequency(0.0), 20.0, 1e-12);
        assert_eq_delta!(
            sweep.instantaneous_frequency(params.duration()),
            20_000.0,
            1e-8
        );
    }

    #[test]
    fn growth_factor() {
        let params = SweepParameters::default();
        let sweep = ExponentialSweep::new(&params);

        assert_eq!(sweep.growth(0), 1.0);
        // k reaches end / start one sample after the sweep ends
        let last = f64::exp(params.log_rate() * 1023.0 / 1024.0);
        assert_eq_delta!(sweep.growth(1023), last, 1e-9);
    }

    #[test]
    fn amplitude_scales_samples() {
        let params = SweepParameters::default();
        let unit = ExponentialSweep::new(&params);
        let half = ExponentialSweep::with_amplitude(&params, 0.5);

        for n in [1, 100, 1000] {
            assert_eq_delta!(half.sample(n), 0.5 * unit.sample(n), 1e-15);
        }
    }

    #[test]
    fn bounded_by_amplitude() {
        let params = SweepParameters::default();
        let sweep = ExponentialSweep::with_amplitude(&params, 0.25);

        assert!(sweep.into_iter().all(|s| s.abs() <= 0.25));
    }
}
