//! Property-based tests for the sweep deconvolution pipeline.
//!
//! Covers sweep generation, the FFT convolution against a direct circular
//! convolution, decibel conversion and parameter validation.

use farina_core::{
    circular_convolution, fftshift, mag2db, signals::Sweep, ImpulseResponse, SweepAnalysis,
    SweepParameters,
};
use proptest::prelude::*;

/// Frequency range and sample rate that always pass validation.
fn valid_parameters() -> impl Strategy<Value = SweepParameters> {
    (1.0f64..1000.0, 2.0f64..100.0, 2usize..512).prop_map(|(start, ratio, length)| {
        let end = start * ratio;
        let sample_rate = end * 2.5;
        SweepParameters::new(start, end, sample_rate, length).unwrap()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Sweep and inverse always have the requested number of samples and
    /// the sweep starts at sin(0).
    #[test]
    fn sweep_shape(params in valid_parameters()) {
        let sweep = Sweep::new(&params).unwrap();

        prop_assert_eq!(sweep.forward().len(), params.length());
        prop_assert_eq!(sweep.inverse().len(), params.length());
        prop_assert!(sweep.forward().as_slice()[0].abs() < 1e-12);
        prop_assert!(sweep.forward().iter().all(|s| s.abs() <= 1.0));
    }

    /// The FFT pipeline agrees with a direct circular convolution.
    #[test]
    fn fft_matches_direct_convolution(params in valid_parameters()) {
        let sweep = Sweep::new(&params).unwrap();
        let response = ImpulseResponse::from_signals(sweep.forward(), sweep.inverse()).unwrap();

        let mut direct =
            circular_convolution(sweep.forward().as_slice(), sweep.inverse().as_slice()).unwrap();
        fftshift(&mut direct);

        let scale = direct.iter().fold(f64::MIN_POSITIVE, |m, s| m.max(s.abs()));
        for (i, (f, d)) in response.impulse().iter().zip(direct.iter()).enumerate() {
            prop_assert!(
                (f - d).abs() <= 1e-9 * scale,
                "sample {} differs: fft {} direct {} (scale {})", i, f, d, scale
            );
        }
    }

    /// Every bundle part matches the parameter length.
    #[test]
    fn analysis_lengths(params in valid_parameters()) {
        let analysis = SweepAnalysis::compute(&params).unwrap();
        let n = params.length();

        prop_assert_eq!(analysis.impulse().len(), n);
        prop_assert_eq!(analysis.x_axis().len(), n);
        prop_assert_eq!(analysis.magnitude_convolution().len(), n);
        prop_assert!((analysis.x_axis()[1] - params.bin_frequency()).abs() < 1e-9);
    }

    /// Larger magnitudes always map to larger decibel values.
    #[test]
    fn mag2db_is_increasing(
        b in 1e-300f64..1e300,
        factor in 1.001f64..1e6,
        negate in any::<bool>(),
    ) {
        let a = b * factor;
        prop_assume!(a.is_finite());
        let a = if negate { -a } else { a };

        prop_assert!(mag2db(a) > mag2db(b), "mag2db({}) <= mag2db({})", a, b);
    }

    /// Validation rejects end frequencies at or above Nyquist.
    #[test]
    fn rejects_end_above_nyquist(
        start in 1.0f64..100.0,
        end in 200.0f64..20_000.0,
        oversampling in 0.1f64..=1.0,
    ) {
        let sample_rate = 2.0 * end * oversampling;

        prop_assert!(SweepParameters::new(start, end, sample_rate, 1024).is_err());
    }

    /// Validation rejects start frequencies at or above the end frequency.
    #[test]
    fn rejects_inverted_range(end in 1.0f64..1000.0, offset in 0.0f64..1000.0) {
        let start = end + offset;

        prop_assert!(SweepParameters::new(start, end, 48_000.0, 1024).is_err());
    }
}
