//! Bessel function of the first kind, order one.
//!
//! Rational approximation for `|x| < 8` and the Hankel asymptotic form above
//! it (Numerical Recipes `bessj1`). Absolute error stays below 1e-7, which
//! covers the diffraction arguments the simulator produces (`x` up to ~50).

/// Evaluates `J1(x)`.
#[must_use]
pub fn j1(x: f64) -> f64 {
    let ax = x.abs();

    if ax < 8.0 {
        let y = x * x;
        let num = x
            * (72_362_614_232.0
                + y * (-7_895_059_235.0
                    + y * (242_396_853.1
                        + y * (-2_972_611.439 + y * (15_704.482_60 + y * (-30.160_366_06))))));
        let den = 144_725_228_442.0
            + y * (2_300_535_178.0
                + y * (18_583_304.74 + y * (99_447.433_94 + y * (376.999_139_7 + y))));
        num / den
    } else {
        let z = 8.0 / ax;
        let y = z * z;
        let xx = ax - 2.356_194_491;
        let p = 1.0
            + y * (0.183_105e-2
                + y * (-0.351_639_649_6e-4 + y * (0.245_752_017_4e-5 + y * (-0.240_337_019e-6))));
        let q = 0.046_874_999_95
            + y * (-0.200_269_087_3e-3
                + y * (0.844_919_909_6e-5 + y * (-0.882_289_87e-6 + y * 0.105_787_412e-6)));
        let ans = (0.636_619_772 / ax).sqrt() * (xx.cos() * p - z * xx.sin() * q);
        if x < 0.0 {
            -ans
        } else {
            ans
        }
    }
}

/// Normalized Airy envelope `2·J1(x)/x` of a circular aperture.
///
/// Returns exactly 1 for `|x| < 1e-10`, where the quotient would lose all
/// precision.
#[must_use]
pub fn airy_factor(x: f64) -> f64 {
    if x.abs() < AIRY_DEGENERATE_EPSILON {
        1.0
    } else {
        2.0 * j1(x) / x
    }
}

/// Below this argument the Airy envelope is taken as exactly 1.
pub const AIRY_DEGENERATE_EPSILON: f64 = 1e-10;
