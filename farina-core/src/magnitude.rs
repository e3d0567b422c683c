use crate::{MagnitudeSeries, Spectrum, TimeSeries};

/// Level reported for a magnitude of zero.
///
/// Lies far below `mag2db` of the smallest positive `f64` (about -6469 dB),
/// so the conversion is strictly increasing for every positive magnitude.
/// Sums of floored levels stay finite, `DB_FLOOR + DB_FLOOR` does not
/// overflow to `-inf` the way `f64::MIN` would.
pub const DB_FLOOR: f64 = -1e300;

/// Amplitude to decibel: `20·log10(|magnitude|)`.
///
/// Zero and NaN map to [`DB_FLOOR`] instead of `-inf` or NaN.
#[inline]
pub fn mag2db(magnitude: f64) -> f64 {
    let magnitude = magnitude.abs();

    if magnitude > 0.0 {
        20.0 * f64::log10(magnitude)
    } else {
        DB_FLOOR
    }
}

pub fn spectrum_to_db(spectrum: &Spectrum) -> MagnitudeSeries {
    spectrum.magnitudes().map(mag2db).collect()
}

pub fn series_to_db(series: &TimeSeries) -> MagnitudeSeries {
    series.iter().copied().map(mag2db).collect()
}
