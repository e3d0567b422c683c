use serde::Serialize;
use tracing::{debug, debug_span};

use std::time::{Duration, Instant};

use crate::{
    signals::Sweep, spectrum_to_db, Error, ImpulseResponse, MagnitudeSeries, Spectrum,
    SweepParameters, TimeSeries,
};

/// Everything the sweep deconvolution produces for one set of parameters.
#[derive(Debug, Clone, Serialize)]
pub struct SweepAnalysis {
    parameters: SweepParameters,
    sweep: TimeSeries,
    sweep_inverse: TimeSeries,
    impulse: TimeSeries,
    convolution: Spectrum,
    magnitude_convolution: MagnitudeSeries,
    magnitude_sweep: MagnitudeSeries,
    magnitude_sweep_inverse: MagnitudeSeries,
    x_axis: Vec<f64>,
    #[serde(skip)]
    elapsed: Duration,
}

/// One frequency bin of the three magnitude spectra.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpectrumRow {
    pub frequency: f64,
    pub sweep_db: f64,
    pub inverse_db: f64,
    pub response_db: f64,
}

impl SweepAnalysis {
    pub fn compute(parameters: &SweepParameters) -> Result<Self, Error> {
        let _span = debug_span!("sweep_analysis", length = parameters.length()).entered();
        let started = Instant::now();

        let (sweep, sweep_inverse) = Sweep::new(parameters)?.into_parts();
        let response = ImpulseResponse::from_signals(&sweep, &sweep_inverse)?;

        let magnitude_convolution = spectrum_to_db(response.convolution());
        let magnitude_sweep = spectrum_to_db(response.sweep_spectrum());
        let magnitude_sweep_inverse = spectrum_to_db(response.inverse_spectrum());

        let x_axis = frequency_axis(parameters);

        let elapsed = started.elapsed();
        debug!(?elapsed, "sweep analysis finished");

        Ok(Self {
            parameters: *parameters,
            sweep,
            sweep_inverse,
            impulse: response.impulse().clone(),
            convolution: response.convolution().clone(),
            magnitude_convolution,
            magnitude_sweep,
            magnitude_sweep_inverse,
            x_axis,
            elapsed,
        })
    }

    pub fn parameters(&self) -> &SweepParameters {
        &self.parameters
    }

    pub fn sweep(&self) -> &TimeSeries {
        &self.sweep
    }

    pub fn sweep_inverse(&self) -> &TimeSeries {
        &self.sweep_inverse
    }

    pub fn impulse(&self) -> &TimeSeries {
        &self.impulse
    }

    pub fn convolution(&self) -> &Spectrum {
        &self.convolution
    }

    pub fn magnitude_convolution(&self) -> &MagnitudeSeries {
        &self.magnitude_convolution
    }

    pub fn magnitude_sweep(&self) -> &MagnitudeSeries {
        &self.magnitude_sweep
    }

    pub fn magnitude_sweep_inverse(&self) -> &MagnitudeSeries {
        &self.magnitude_sweep_inverse
    }

    /// Bin frequencies in Hz, `i * sample_rate / length`.
    pub fn x_axis(&self) -> &[f64] {
        &self.x_axis
    }

    /// Wall clock time `compute` took.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Index and value of the largest impulse response sample.
    pub fn impulse_peak(&self) -> (usize, f64) {
        // never empty, the length is validated to be at least two
        self.impulse.peak().unwrap_or((0, 0.0))
    }

    /// Bins with `min_frequency <= frequency <= max_frequency`.
    pub fn spectrum_rows(
        &self,
        min_frequency: f64,
        max_frequency: f64,
    ) -> impl Iterator<Item = SpectrumRow> + '_ {
        self.x_axis
            .iter()
            .zip(self.magnitude_sweep.iter())
            .zip(self.magnitude_sweep_inverse.iter())
            .zip(self.magnitude_convolution.iter())
            .filter(move |(((f, _), _), _)| (min_frequency..=max_frequency).contains(*f))
            .map(|(((&frequency, &sweep_db), &inverse_db), &response_db)| SpectrumRow {
                frequency,
                sweep_db,
                inverse_db,
                response_db,
            })
    }
}

pub fn frequency_axis(parameters: &SweepParameters) -> Vec<f64> {
    let bin_frequency = parameters.bin_frequency();

    (0..parameters.length())
        .map(|i| i as f64 * bin_frequency)
        .collect()
}
