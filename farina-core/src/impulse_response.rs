use rustfft::{num_complex::Complex, FftPlanner};
use tracing::trace;

use crate::{ensure_finite, Complex64, Error, Spectrum, Stage, TimeSeries};

/// Result of deconvolving a sweep with its inverse filter.
#[derive(Debug, Clone)]
pub struct ImpulseResponse {
    impulse: TimeSeries,
    sweep_spectrum: Spectrum,
    inverse_spectrum: Spectrum,
    convolution: Spectrum,
}

impl ImpulseResponse {
    /// Circularly convolves `sweep` with `inverse` in the frequency domain.
    ///
    /// The FFT size equals the signal length, without zero padding, so the
    /// result wraps around. It is shifted by half its length to move the
    /// peak from the buffer edges to its middle.
    pub fn from_signals(sweep: &TimeSeries, inverse: &TimeSeries) -> Result<Self, Error> {
        if sweep.len() != inverse.len() {
            return Err(Error::LengthMismatch {
                sweep: sweep.len(),
                inverse: inverse.len(),
            });
        }

        if sweep.is_empty() {
            return Err(Error::EmptySignal);
        }

        // convert to complex
        let mut sweep: Vec<Complex64> = sweep.iter().map(Complex::from).collect();
        let mut inverse: Vec<Complex64> = inverse.iter().map(Complex::from).collect();

        // convert into frequency domain
        let mut planner = FftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(sweep.len());

        fft.process(&mut sweep);
        fft.process(&mut inverse);

        ensure_finite(&sweep, Stage::SweepSpectrum)?;
        ensure_finite(&inverse, Stage::InverseSpectrum)?;

        // multiply both
        let convolution: Vec<Complex64> = sweep
            .iter()
            .zip(inverse.iter())
            .map(|(s, i)| s * i)
            .collect();

        ensure_finite(&convolution, Stage::Convolution)?;

        // back to time domain
        let mut result = convolution.clone();
        let fft = planner.plan_fft_inverse(result.len());
        fft.process(&mut result);

        // the imaginary part is rounding noise of a real convolution
        let scale = 1.0 / (result.len() as f64);
        let mut impulse: Vec<f64> = result.into_iter().map(|s| s.re * scale).collect();

        ensure_finite(&impulse, Stage::Impulse)?;

        fftshift(&mut impulse);

        trace!(samples = impulse.len(), "impulse response computed");

        Ok(Self {
            impulse: TimeSeries::new(impulse),
            sweep_spectrum: Spectrum::new(sweep),
            inverse_spectrum: Spectrum::new(inverse),
            convolution: Spectrum::new(convolution),
        })
    }

    /// Centered impulse response.
    pub fn impulse(&self) -> &TimeSeries {
        &self.impulse
    }

    pub fn sweep_spectrum(&self) -> &Spectrum {
        &self.sweep_spectrum
    }

    pub fn inverse_spectrum(&self) -> &Spectrum {
        &self.inverse_spectrum
    }

    /// Product of the sweep and inverse spectra.
    pub fn convolution(&self) -> &Spectrum {
        &self.convolution
    }
}

/// Rotates `data` right by half its length, so index 0 lands on `len / 2`.
pub fn fftshift<T>(data: &mut [T]) {
    let mid = data.len() / 2;
    data.rotate_right(mid);
}

/// Direct O(n²) circular convolution of two equally long signals.
pub fn circular_convolution(a: &[f64], b: &[f64]) -> Result<Vec<f64>, Error> {
    if a.len() != b.len() {
        return Err(Error::LengthMismatch {
            sweep: a.len(),
            inverse: b.len(),
        });
    }

    let n = a.len();
    let result: Vec<f64> = (0..n)
        .map(|k| (0..n).map(|m| a[m] * b[(n + k - m) % n]).sum::<f64>())
        .collect();

    Ok(result)
}
