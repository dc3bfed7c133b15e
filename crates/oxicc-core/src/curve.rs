//! Tone curves
//!
//! A [`Curve`] is an immutable pair of lookup tables:
//!
//! - `gamma`: linear light → encoded sample, [`GAMMA_LEN`] entries
//! - `inverse_gamma`: encoded sample → linear light, [`INVERSE_GAMMA_LEN`] entries
//!
//! Curves are built from the three ICC encodings (power, sampled points,
//! parametric). When a built curve is numerically the sRGB curve, the shared
//! canonical instance is returned instead, so identical curves compare by
//! [`KnownCurve`] tag regardless of how their tag bytes were written.
//!
//! Tables derived for video range and UQ15 converters are computed on first
//! use and kept on the curve, so every profile sharing a curve shares them.

use std::fmt;
use std::sync::{Arc, LazyLock, OnceLock};

use tracing::trace;

use crate::convert::EncodingRange;
use crate::lut::{
    self, GAMMA_LEN, GAMMA_SCALE_FLOAT, INVERSE_GAMMA_LEN, INVERSE_GAMMA_SCALE, lut_inverts_to,
};
use crate::math::gamma::{ParametricCurve, gamma_decode, gamma_encode};
use crate::math::gamma::{srgb_gamma_decode, srgb_gamma_encode};
use crate::math::interpolation::{lerp, monotonic_position};

/// Absolute tolerance for "roughly equal" parameter and matrix comparisons
pub const ROUGHLY_EQUAL: f64 = 1e-4;

/// Identity of a shared canonical curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownCurve {
    /// IEC 61966-2-1
    Srgb,
    /// Pure 2.2 power, as used by Adobe RGB (1998) compatible profiles
    AdobeRgb,
    /// Identity
    Linear,
    /// Anything built from profile data that matched no canonical curve
    Custom,
}

static SRGB: LazyLock<Arc<Curve>> = LazyLock::new(|| {
    Arc::new(Curve::new(
        lut::build_table(GAMMA_SCALE_FLOAT, srgb_gamma_encode),
        lut::build_table(INVERSE_GAMMA_SCALE, srgb_gamma_decode),
        KnownCurve::Srgb,
    ))
});

static ADOBE_RGB: LazyLock<Arc<Curve>> = LazyLock::new(|| {
    let (gamma, inverse_gamma) = power_tables(2.2);
    Arc::new(Curve::new(gamma, inverse_gamma, KnownCurve::AdobeRgb))
});

static LINEAR: LazyLock<Arc<Curve>> = LazyLock::new(|| {
    Arc::new(Curve::new(
        lut::build_table(GAMMA_SCALE_FLOAT, |x| x),
        lut::build_table(INVERSE_GAMMA_SCALE, |x| x),
        KnownCurve::Linear,
    ))
});

#[derive(Default)]
struct DerivedTables {
    video_gamma: OnceLock<Box<[f32]>>,
    video_inverse_gamma: OnceLock<Box<[f32]>>,
    uq15_gamma: [OnceLock<Box<[u8]>>; 2],
    uq15_inverse_gamma: [OnceLock<Box<[u16]>>; 2],
}

/// An immutable gamma / inverse-gamma table pair
pub struct Curve {
    gamma: Box<[f32]>,
    inverse_gamma: Box<[f32]>,
    known: KnownCurve,
    derived: DerivedTables,
}

impl fmt::Debug for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Curve")
            .field("known", &self.known)
            .field("gamma_len", &self.gamma.len())
            .field("inverse_gamma_len", &self.inverse_gamma.len())
            .finish()
    }
}

fn range_slot(range: EncodingRange) -> usize {
    match range {
        EncodingRange::Full => 0,
        EncodingRange::Video => 1,
    }
}

fn power_tables(gamma: f64) -> (Box<[f32]>, Box<[f32]>) {
    (
        lut::build_table(GAMMA_SCALE_FLOAT, |x| gamma_encode(x, gamma)),
        lut::build_table(INVERSE_GAMMA_SCALE, |x| gamma_decode(x, gamma)),
    )
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

impl Curve {
    fn new(gamma: Box<[f32]>, inverse_gamma: Box<[f32]>, known: KnownCurve) -> Self {
        debug_assert_eq!(gamma.len(), GAMMA_LEN);
        debug_assert_eq!(inverse_gamma.len(), INVERSE_GAMMA_LEN);
        Self {
            gamma,
            inverse_gamma,
            known,
            derived: DerivedTables::default(),
        }
    }

    /// The shared sRGB curve
    pub fn srgb() -> Arc<Self> {
        Arc::clone(&SRGB)
    }

    pub(crate) fn srgb_static() -> &'static Self {
        &SRGB
    }

    /// The shared pure 2.2 power curve
    pub fn adobe_rgb() -> Arc<Self> {
        Arc::clone(&ADOBE_RGB)
    }

    /// The shared identity curve
    pub fn linear() -> Arc<Self> {
        Arc::clone(&LINEAR)
    }

    /// Pure power curve: `inverse_gamma(x) = x^gamma`, `gamma(y) = y^(1/gamma)`
    ///
    /// `gamma` must be positive and finite.
    pub fn from_power(gamma: f64) -> Arc<Self> {
        let (g, ig) = power_tables(gamma);
        Arc::new(Self::new(g, ig, KnownCurve::Custom))
    }

    /// Piecewise-linear curve through 16-bit samples
    ///
    /// `points` must hold at least two samples and be monotonic; `decreasing`
    /// says which direction. The forward table is found by searching the
    /// sample sequence for each linear value.
    pub fn from_points(points: &[u16], decreasing: bool) -> Arc<Self> {
        let mut samples: Vec<f64> = points.iter().map(|&p| f64::from(p) / 65535.0).collect();
        if samples.len() < 2 {
            return Self::linear();
        }
        let last = samples.len() - 1;

        let inverse_gamma = lut::build_table(INVERSE_GAMMA_SCALE, |x| {
            let pos = x * last as f64;
            let idx = (pos as usize).min(last - 1);
            lerp(samples[idx], samples[idx + 1], pos - idx as f64)
        });

        if lut_inverts_to(&inverse_gamma, SRGB.gamma()) {
            trace!(samples = points.len(), "sampled curve matches sRGB");
            return Self::srgb();
        }

        if decreasing {
            samples.reverse();
        }
        let gamma = lut::build_table(GAMMA_SCALE_FLOAT, |y| {
            let t = monotonic_position(&samples, y) / last as f64;
            if decreasing { 1.0 - t } else { t }
        });

        Arc::new(Self::new(gamma, inverse_gamma, KnownCurve::Custom))
    }

    /// Curve from a parametric function
    pub fn from_parameters(curve: &ParametricCurve) -> Arc<Self> {
        if curve.is_srgb(ROUGHLY_EQUAL) {
            trace!("parametric curve matches sRGB");
            return Self::srgb();
        }

        let gamma = lut::build_table(GAMMA_SCALE_FLOAT, |y| finite_or_zero(curve.encode(y)));
        let inverse_gamma =
            lut::build_table(INVERSE_GAMMA_SCALE, |x| finite_or_zero(curve.decode(x)));
        Arc::new(Self::new(gamma, inverse_gamma, KnownCurve::Custom))
    }

    /// Linear → encoded table
    pub fn gamma(&self) -> &[f32] {
        &self.gamma
    }

    /// Encoded → linear table
    pub fn inverse_gamma(&self) -> &[f32] {
        &self.inverse_gamma
    }

    pub fn known(&self) -> KnownCurve {
        self.known
    }

    pub fn is_linear(&self) -> bool {
        self.known == KnownCurve::Linear
    }

    /// Whether two curves are interchangeable
    ///
    /// Canonical curves compare by tag; custom curves by table contents.
    pub fn is_equivalent(&self, other: &Self) -> bool {
        match (self.known, other.known) {
            (KnownCurve::Custom, KnownCurve::Custom) => {
                self.gamma == other.gamma && self.inverse_gamma == other.inverse_gamma
            }
            (a, b) => a == b,
        }
    }

    /// Linear → encoded float table, compressed into video levels if requested
    pub fn gamma_for(&self, range: EncodingRange) -> &[f32] {
        match range {
            EncodingRange::Full => &self.gamma,
            EncodingRange::Video => self
                .derived
                .video_gamma
                .get_or_init(|| lut::video_gamma(&self.gamma)),
        }
    }

    /// Encoded → linear float table, indexed by video codes if requested
    pub fn inverse_gamma_for(&self, range: EncodingRange) -> &[f32] {
        match range {
            EncodingRange::Full => &self.inverse_gamma,
            EncodingRange::Video => self
                .derived
                .video_inverse_gamma
                .get_or_init(|| lut::video_inverse_gamma(&self.inverse_gamma)),
        }
    }

    /// UQ15 linear → 8-bit encoded table, see [`lut::uq15_gamma`]
    pub fn uq15_gamma(&self, range: EncodingRange) -> &[u8] {
        self.derived.uq15_gamma[range_slot(range)].get_or_init(|| {
            trace!(?range, known = ?self.known, "building UQ15 gamma table");
            lut::uq15_gamma(self.gamma_for(range))
        })
    }

    /// 8-bit encoded → UQ15 linear table
    pub fn uq15_inverse_gamma(&self, range: EncodingRange) -> &[u16] {
        self.derived.uq15_inverse_gamma[range_slot(range)]
            .get_or_init(|| lut::uq15_inverse_gamma(self.inverse_gamma_for(range)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lut::interpolate;
    use crate::math::gamma::ParametricCurveType;

    const ROUND_TRIP_TOLERANCE: f32 = 1.0 / GAMMA_SCALE_FLOAT as f32;

    /// inverse(gamma(x)) stays within one table step of x
    fn assert_round_trips(curve: &Curve) {
        for j in 0..=GAMMA_SCALE_FLOAT {
            let x = j as f32 / GAMMA_SCALE_FLOAT as f32;
            let encoded = curve.gamma()[j];
            let back = interpolate(curve.inverse_gamma(), INVERSE_GAMMA_SCALE, encoded);
            assert!(
                (back - x).abs() <= ROUND_TRIP_TOLERANCE,
                "{:?}: index {} came back as {}",
                curve.known(),
                j,
                back * GAMMA_SCALE_FLOAT as f32
            );
        }
    }

    fn sampled(n: usize, f: impl Fn(f64) -> f64) -> Vec<u16> {
        (0..n)
            .map(|i| (f(i as f64 / (n - 1) as f64) * 65535.0).round() as u16)
            .collect()
    }

    #[test]
    fn test_shared_instances() {
        assert!(Arc::ptr_eq(&Curve::srgb(), &Curve::srgb()));
        assert!(Arc::ptr_eq(&Curve::adobe_rgb(), &Curve::adobe_rgb()));
        assert_eq!(Curve::linear().known(), KnownCurve::Linear);
        assert!(Curve::linear().is_linear());
        assert!(!Curve::srgb().is_linear());
    }

    #[test]
    fn test_table_lengths() {
        let curve = Curve::from_power(1.8);
        assert_eq!(curve.gamma().len(), GAMMA_LEN);
        assert_eq!(curve.inverse_gamma().len(), INVERSE_GAMMA_LEN);
        assert_eq!(curve.known(), KnownCurve::Custom);
    }

    #[test]
    fn test_power_curve_values() {
        let curve = Curve::from_power(2.2);
        let mid = curve.inverse_gamma()[128];
        assert!((mid - (128.0f32 / 255.0).powf(2.2)).abs() < 1e-6);
        assert_eq!(curve.gamma()[0], 0.0);
        assert_eq!(curve.gamma()[GAMMA_SCALE_FLOAT], 1.0);
        assert_eq!(curve.gamma()[GAMMA_SCALE_FLOAT + 1], 1.0);
    }

    #[test]
    fn test_round_trip_property() {
        assert_round_trips(&Curve::srgb());
        assert_round_trips(&Curve::adobe_rgb());
        assert_round_trips(&Curve::linear());
        assert_round_trips(&Curve::from_power(1.8));

        let gamma22 = sampled(256, |x| x.powf(2.2));
        assert_round_trips(&Curve::from_points(&gamma22, false));

        // BT.709 transfer
        let para = ParametricCurve::from_icc(
            ParametricCurveType::IEC61966_2_1,
            &[1.0 / 0.45, 1.0 / 1.099, 0.099 / 1.099, 1.0 / 4.5, 0.081],
        )
        .unwrap();
        assert_round_trips(&Curve::from_parameters(&para));
    }

    #[test]
    fn test_sampled_srgb_collapses_to_canonical() {
        let points = sampled(1024, srgb_gamma_decode);
        let curve = Curve::from_points(&points, false);
        assert!(Arc::ptr_eq(&curve, &Curve::srgb()));
    }

    #[test]
    fn test_sampled_power_stays_custom() {
        let points = sampled(256, |x| x.powf(2.2));
        let curve = Curve::from_points(&points, false);
        assert_eq!(curve.known(), KnownCurve::Custom);
        let mid = interpolate(curve.gamma(), GAMMA_SCALE_FLOAT, 0.5);
        assert!((mid - 0.5f32.powf(1.0 / 2.2)).abs() < 1e-3);
    }

    #[test]
    fn test_decreasing_points() {
        let curve = Curve::from_points(&[65535, 32768, 0], true);
        assert!((curve.inverse_gamma()[0] - 1.0).abs() < 1e-6);
        assert!(curve.inverse_gamma()[255].abs() < 1e-6);
        let encoded = interpolate(curve.gamma(), GAMMA_SCALE_FLOAT, 0.25);
        assert!((encoded - 0.75).abs() < 1e-3);
    }

    #[test]
    fn test_parametric_srgb_collapses_to_canonical() {
        // s15Fixed16-rounded sRGB parameters, as stored in real profiles
        let fixed = |v: f64| (v * 65536.0).round() / 65536.0;
        let params = [2.4, 1.0 / 1.055, 0.055 / 1.055, 1.0 / 12.92, 0.04045].map(fixed);
        let para = ParametricCurve::from_icc(ParametricCurveType::IEC61966_2_1, &params).unwrap();
        assert!(Arc::ptr_eq(&Curve::from_parameters(&para), &Curve::srgb()));

        let para = ParametricCurve::gamma(2.4);
        assert_eq!(Curve::from_parameters(&para).known(), KnownCurve::Custom);
    }

    #[test]
    fn test_equivalence() {
        assert!(Curve::srgb().is_equivalent(&Curve::srgb()));
        assert!(!Curve::srgb().is_equivalent(&Curve::adobe_rgb()));
        assert!(Curve::from_power(1.8).is_equivalent(&Curve::from_power(1.8)));
        assert!(!Curve::from_power(1.8).is_equivalent(&Curve::from_power(2.0)));
    }

    #[test]
    fn test_derived_tables_are_memoized() {
        let curve = Curve::from_power(2.0);
        let a = curve.uq15_gamma(EncodingRange::Full);
        let b = curve.uq15_gamma(EncodingRange::Full);
        assert!(std::ptr::eq(a, b));
        assert!(!std::ptr::eq(a, curve.uq15_gamma(EncodingRange::Video)));
        assert_eq!(curve.uq15_gamma(EncodingRange::Video)[0], 16);
        assert_eq!(curve.uq15_gamma(EncodingRange::Video)[lut::GAMMA_SCALE], 235);
        assert_eq!(curve.uq15_inverse_gamma(EncodingRange::Full)[255], lut::UQ15_ONE);
        assert_eq!(curve.inverse_gamma_for(EncodingRange::Full), curve.inverse_gamma());
    }
}
