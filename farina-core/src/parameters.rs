use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Input of a sweep measurement.
///
/// Only constructible through [`SweepParameters::new`] (or deserialization,
/// which runs the same checks), so every value in circulation satisfies
/// `0 < start_frequency < end_frequency < sample_rate / 2` and `length >= 2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSweepParameters")]
pub struct SweepParameters {
    start_frequency: f64,
    end_frequency: f64,
    sample_rate: f64,
    length: usize,
}

#[derive(Debug, Deserialize)]
struct RawSweepParameters {
    start_frequency: f64,
    end_frequency: f64,
    sample_rate: f64,
    length: usize,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    #[error("`{field}` must be a finite number")]
    NonFinite { field: &'static str },
    #[error("start frequency needs to be greater than zero, got {0} Hz")]
    StartFrequency(f64),
    #[error("start frequency ({start} Hz) must be lesser than end frequency ({end} Hz)")]
    FrequencyRange { start: f64, end: f64 },
    #[error("sample rate ({sample_rate} Hz) must be greater than twice the end frequency ({end} Hz)")]
    Nyquist { end: f64, sample_rate: f64 },
    #[error("frequency ratio {end} / {start} has no finite logarithm")]
    LogRate { start: f64, end: f64 },
    #[error("length must be at least 2 samples, got {0}")]
    Length(usize),
}

impl SweepParameters {
    pub fn new(
        start_frequency: f64,
        end_frequency: f64,
        sample_rate: f64,
        length: usize,
    ) -> Result<Self, ParameterError> {
        for (field, value) in [
            ("start_frequency", start_frequency),
            ("end_frequency", end_frequency),
            ("sample_rate", sample_rate),
        ] {
            if !value.is_finite() {
                return Err(ParameterError::NonFinite { field });
            }
        }

        if start_frequency <= 0.0 {
            return Err(ParameterError::StartFrequency(start_frequency));
        }

        if end_frequency <= start_frequency {
            return Err(ParameterError::FrequencyRange {
                start: start_frequency,
                end: end_frequency,
            });
        }

        if sample_rate <= 2.0 * end_frequency {
            return Err(ParameterError::Nyquist {
                end: end_frequency,
                sample_rate,
            });
        }

        let log_rate = (end_frequency / start_frequency).ln();
        if !log_rate.is_finite() || log_rate <= 0.0 {
            return Err(ParameterError::LogRate {
                start: start_frequency,
                end: end_frequency,
            });
        }

        if length < 2 {
            return Err(ParameterError::Length(length));
        }

        Ok(Self {
            start_frequency,
            end_frequency,
            sample_rate,
            length,
        })
    }

    pub fn start_frequency(&self) -> f64 {
        self.start_frequency
    }

    pub fn end_frequency(&self) -> f64 {
        self.end_frequency
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Number of samples of the sweep, its inverse and every transform.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Sweep duration `T` in seconds.
    pub fn duration(&self) -> f64 {
        self.length as f64 / self.sample_rate
    }

    /// `R = ln(end_frequency / start_frequency)`
    pub fn log_rate(&self) -> f64 {
        (self.end_frequency / self.start_frequency).ln()
    }

    /// Frequency spacing between two spectrum bins.
    pub fn bin_frequency(&self) -> f64 {
        self.sample_rate / self.length as f64
    }

    pub fn nyquist(&self) -> f64 {
        self.sample_rate / 2.0
    }

    pub fn with_length(&self, length: usize) -> Result<Self, ParameterError> {
        Self::new(
            self.start_frequency,
            self.end_frequency,
            self.sample_rate,
            length,
        )
    }
}

impl Default for SweepParameters {
    fn default() -> Self {
        Self {
            start_frequency: 20.0,
            end_frequency: 20_000.0,
            sample_rate: 48_000.0,
            length: 1024,
        }
    }
}

impl TryFrom<RawSweepParameters> for SweepParameters {
    type Error = ParameterError;

    fn try_from(raw: RawSweepParameters) -> Result<Self, Self::Error> {
        Self::new(
            raw.start_frequency,
            raw.end_frequency,
            raw.sample_rate,
            raw.length,
        )
    }
}
