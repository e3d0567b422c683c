use rustfft::num_complex::Complex64;
use serde::{ser::SerializeSeq, Serialize, Serializer};

use std::slice::Iter;

use crate::signals::FiniteSignal;

/// Uniformly sampled real signal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TimeSeries(Vec<f64>);

/// Full-length complex transform of a [`TimeSeries`].
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum(Vec<Complex64>);

/// Decibel values derived from a spectrum or a time series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MagnitudeSeries(Vec<f64>);

impl TimeSeries {
    pub fn new(data: Vec<f64>) -> Self {
        Self(data)
    }

    pub fn from_signal(signal: impl FiniteSignal) -> Self {
        let mut data = Vec::with_capacity(signal.len());
        data.extend(signal);

        Self(data)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, f64> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }

    /// Index and value of the sample with the largest magnitude.
    pub fn peak(&self) -> Option<(usize, f64)> {
        self.0
            .iter()
            .copied()
            .enumerate()
            .fold(None, |peak, (i, s)| match peak {
                Some((_, p)) if f64::abs(p) >= s.abs() => peak,
                _ => Some((i, s)),
            })
    }
}

impl Spectrum {
    pub fn new(data: Vec<Complex64>) -> Self {
        Self(data)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, Complex64> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Complex64] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<Complex64> {
        self.0
    }

    /// Linear magnitude of every bin.
    pub fn magnitudes(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().map(|c| c.norm())
    }
}

impl MagnitudeSeries {
    pub fn new(data: Vec<f64>) -> Self {
        Self(data)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, f64> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl AsRef<[f64]> for TimeSeries {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

impl AsRef<[f64]> for MagnitudeSeries {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

impl AsRef<[Complex64]> for Spectrum {
    fn as_ref(&self) -> &[Complex64] {
        &self.0
    }
}

impl FromIterator<f64> for TimeSeries {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl FromIterator<f64> for MagnitudeSeries {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// num-complex is pulled in through rustfft without its serde feature, so
// bins are written as `[re, im]` pairs by hand.
impl Serialize for Spectrum {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for bin in &self.0 {
            seq.serialize_element(&[bin.re, bin.im])?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod test {
    use super::{Spectrum, TimeSeries};
    use crate::Complex64;

    #[test]
    fn peak_uses_absolute_value() {
        let series = TimeSeries::new(vec![0.1, -0.9, 0.5, 0.8]);

        assert_eq!(series.peak(), Some((1, -0.9)));
    }

    #[test]
    fn peak_keeps_first_of_equal_samples() {
        let series = TimeSeries::new(vec![0.0, 1.0, -1.0]);

        assert_eq!(series.peak(), Some((1, 1.0)));
    }

    #[test]
    fn peak_of_empty_series() {
        assert_eq!(TimeSeries::new(vec![]).peak(), None);
    }

    #[test]
    fn spectrum_magnitudes() {
        let spectrum = Spectrum::new(vec![Complex64::new(3.0, 4.0), Complex64::new(0.0, -2.0)]);
        let magnitudes: Vec<_> = spectrum.magnitudes().collect();

        assert_eq!(magnitudes, vec![5.0, 2.0]);
    }

    #[test]
    fn spectrum_serializes_as_pairs() {
        let spectrum = Spectrum::new(vec![Complex64::new(1.0, -0.5)]);
        let json = serde_json::to_string(&spectrum).unwrap();

        assert_eq!(json, "[[1.0,-0.5]]");
    }

    #[test]
    fn time_series_serializes_transparent() {
        let series: TimeSeries = [0.0, 0.25].into_iter().collect();
        let json = serde_json::to_string(&series).unwrap();

        assert_eq!(json, "[0.0,0.25]");
    }
}
