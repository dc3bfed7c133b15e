//! Canonical profiles and normalization policy
//!
//! Four profiles are built on first use and live for the rest of the process:
//!
//! | profile | matrix | curve |
//! |---|---|---|
//! | [`srgb`] | IEC 61966-2-1 primaries, D50 adapted | sRGB |
//! | [`sgrey`] | none | sRGB |
//! | [`adobe_rgb`] | Adobe RGB (1998) primaries | 2.2 power |
//! | [`display_p3`] | Display P3 primaries | sRGB |
//!
//! Each accessor returns the same `Arc` every time, so callers may compare
//! canonical profiles with [`Arc::ptr_eq`].
//!
//! [`source_profile`] snaps a parsed profile onto a canonical one when its
//! matrix and curve match. [`dest_profile`] picks the profile output should be
//! tagged with for a given [`ColorProfileMode`].

use std::borrow::Cow;
use std::sync::{Arc, LazyLock};

use tracing::debug;

use crate::curve::{Curve, KnownCurve, ROUGHLY_EQUAL};
use crate::icc::ColorSpace;
use crate::math::Matrix4x4;
use crate::profile::{ColorProfile, CurveProfile, MatrixProfile, ProfileKind, ProfileType};
use crate::resources::IccResources;

/// Red chromaticity x above which a matrix is treated as wide gamut
const WIDE_GAMUT_RED_X: f32 = 0.67;
/// Green chromaticity y above which a matrix is treated as wide gamut
const WIDE_GAMUT_GREEN_Y: f32 = 0.62;

const SRGB_MATRIX: Matrix4x4 = Matrix4x4::from_primaries(
    [0.43602939, 0.22243797, 0.01389754],
    [0.38510027, 0.71694100, 0.09707674],
    [0.14307328, 0.06062103, 0.71393112],
);

const ADOBE_RGB_MATRIX: Matrix4x4 = Matrix4x4::from_primaries(
    [0.60974189, 0.31111293, 0.01946551],
    [0.20527343, 0.62567449, 0.06087462],
    [0.14918756, 0.06321258, 0.74456527],
);

const DISPLAY_P3_MATRIX: Matrix4x4 = Matrix4x4::from_primaries(
    [0.51511960, 0.24118953, -0.00105045],
    [0.29197886, 0.69224341, 0.04187909],
    [0.15710442, 0.06656706, 0.78407676],
);

static SRGB: LazyLock<Arc<ColorProfile>> =
    LazyLock::new(|| matrix_profile("sRGB", IccResources::srgb_v4(), SRGB_MATRIX, Curve::srgb()));

static SGREY: LazyLock<Arc<ColorProfile>> = LazyLock::new(|| {
    debug!(name = "sGrey", "initializing canonical profile");
    Arc::new(ColorProfile::new(
        Cow::Borrowed(IccResources::sgrey_v4()),
        ColorSpace::Grey,
        ColorSpace::Xyz,
        ProfileKind::Curve(CurveProfile::new(Some(Curve::srgb()))),
    ))
});

static ADOBE_RGB: LazyLock<Arc<ColorProfile>> = LazyLock::new(|| {
    matrix_profile(
        "Adobe RGB",
        IccResources::adobe_rgb_v4(),
        ADOBE_RGB_MATRIX,
        Curve::adobe_rgb(),
    )
});

static DISPLAY_P3: LazyLock<Arc<ColorProfile>> = LazyLock::new(|| {
    matrix_profile(
        "Display P3",
        IccResources::display_p3_v4(),
        DISPLAY_P3_MATRIX,
        Curve::srgb(),
    )
});

fn matrix_profile(
    name: &'static str,
    bytes: &'static [u8],
    matrix: Matrix4x4,
    curve: Arc<Curve>,
) -> Arc<ColorProfile> {
    debug!(name, "initializing canonical profile");
    match MatrixProfile::new(Some(curve), matrix) {
        Some(profile) => Arc::new(ColorProfile::new(
            Cow::Borrowed(bytes),
            ColorSpace::Rgb,
            ColorSpace::Xyz,
            ProfileKind::Matrix(profile),
        )),
        None => ColorProfile::invalid(),
    }
}

/// How embedded profiles are treated by the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorProfileMode {
    /// Convert to a canonical working space and tag output with it
    #[default]
    Normalize,
    /// As `Normalize`, always embedding the output profile
    NormalizeAndEmbed,
    /// Keep the source profile as is
    Preserve,
    /// Convert everything to sRGB
    ConvertToSrgb,
    /// Disregard embedded profiles
    Ignore,
}

impl ColorProfileMode {
    fn normalizes(self) -> bool {
        matches!(self, Self::Normalize | Self::NormalizeAndEmbed)
    }
}

/// Canonical sRGB
pub fn srgb() -> Arc<ColorProfile> {
    Arc::clone(&SRGB)
}

/// Canonical grey with the sRGB curve
pub fn sgrey() -> Arc<ColorProfile> {
    Arc::clone(&SGREY)
}

/// Canonical Adobe RGB (1998) compatible
pub fn adobe_rgb() -> Arc<ColorProfile> {
    Arc::clone(&ADOBE_RGB)
}

/// Canonical Display P3
pub fn display_p3() -> Arc<ColorProfile> {
    Arc::clone(&DISPLAY_P3)
}

fn matches_canonical(profile: &MatrixProfile, canonical: &ColorProfile) -> bool {
    canonical.as_matrix_profile().is_some_and(|c| {
        profile.curve().known() == c.curve().known()
            && profile.matrix().approx_eq(c.matrix(), ROUGHLY_EQUAL as f32)
    })
}

/// The canonical profile equivalent to `profile`, or `profile` itself
pub fn source_profile(profile: &Arc<ColorProfile>, mode: ColorProfileMode) -> Arc<ColorProfile> {
    if mode == ColorProfileMode::Preserve {
        return Arc::clone(profile);
    }

    match profile.kind() {
        ProfileKind::Curve(curve) if curve.curve().known() == KnownCurve::Srgb => sgrey(),
        ProfileKind::Matrix(matrix) => {
            for canonical in [&*SRGB, &*DISPLAY_P3, &*ADOBE_RGB] {
                if matches_canonical(matrix, canonical) {
                    return Arc::clone(canonical);
                }
            }
            Arc::clone(profile)
        }
        _ => Arc::clone(profile),
    }
}

/// Whether red or green primaries fall outside the sRGB gamut
fn is_wide_gamut(m: &Matrix4x4) -> bool {
    let [r, g, ..] = m.m;
    r[0] / (r[0] + r[1] + r[2]) > WIDE_GAMUT_RED_X || g[1] / (g[0] + g[1] + g[2]) > WIDE_GAMUT_GREEN_Y
}

/// The profile output should carry when the source is `profile`
pub fn dest_profile(profile: &Arc<ColorProfile>, mode: ColorProfileMode) -> Arc<ColorProfile> {
    if mode == ColorProfileMode::Preserve {
        return Arc::clone(profile);
    }

    let is_curve = profile.profile_type() == ProfileType::Curve;
    if mode.normalizes() {
        let is_adobe = Arc::ptr_eq(profile, &ADOBE_RGB)
            || profile
                .as_matrix_profile()
                .is_some_and(|m| matches_canonical(m, &ADOBE_RGB));
        if is_adobe || profile.data_color_space() == ColorSpace::Cmyk {
            return adobe_rgb();
        }
        if is_curve {
            return sgrey();
        }
        match profile.as_matrix_profile() {
            Some(matrix) if !is_wide_gamut(matrix.matrix()) => {}
            _ => return display_p3(),
        }
    }

    if is_curve { sgrey() } else { srgb() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icc::parse;

    const MODES: [ColorProfileMode; 5] = [
        ColorProfileMode::Normalize,
        ColorProfileMode::NormalizeAndEmbed,
        ColorProfileMode::Preserve,
        ColorProfileMode::ConvertToSrgb,
        ColorProfileMode::Ignore,
    ];

    #[test]
    fn test_singletons() {
        assert!(Arc::ptr_eq(&srgb(), &srgb()));
        assert!(Arc::ptr_eq(&display_p3(), &display_p3()));
        for profile in [srgb(), sgrey(), adobe_rgb(), display_p3()] {
            assert!(profile.is_valid());
            assert_eq!(profile.pcs_color_space(), ColorSpace::Xyz);
        }
        assert_eq!(sgrey().profile_type(), ProfileType::Curve);
        assert_eq!(adobe_rgb().as_matrix_profile().unwrap().curve().known(), KnownCurve::AdobeRgb);
        assert!(Arc::ptr_eq(
            display_p3().as_matrix_profile().unwrap().curve(),
            srgb().as_matrix_profile().unwrap().curve()
        ));
    }

    #[test]
    fn test_parsed_resources_snap_to_canonical() {
        let cases = [
            (IccResources::srgb_v4(), srgb()),
            (IccResources::srgb_compact(), srgb()),
            (IccResources::sgrey_v4(), sgrey()),
            (IccResources::adobe_rgb_v4(), adobe_rgb()),
            (IccResources::adobe_rgb_compact(), adobe_rgb()),
            (IccResources::display_p3_v4(), display_p3()),
            (IccResources::display_p3_compact(), display_p3()),
        ];
        for (bytes, expected) in cases {
            let parsed = parse(bytes);
            let snapped = source_profile(&parsed, ColorProfileMode::Normalize);
            assert!(Arc::ptr_eq(&snapped, &expected));

            let kept = source_profile(&parsed, ColorProfileMode::Preserve);
            assert!(Arc::ptr_eq(&kept, &parsed));
        }
    }

    #[test]
    fn test_source_profile_idempotent() {
        let custom = parse(IccResources::srgb_v4());
        let power = Arc::new(ColorProfile::new(
            Cow::Borrowed(&[]),
            ColorSpace::Rgb,
            ColorSpace::Xyz,
            ProfileKind::Matrix(MatrixProfile::new(Some(Curve::from_power(1.8)), SRGB_MATRIX).unwrap()),
        ));
        for profile in [custom, power, ColorProfile::invalid()] {
            for mode in MODES {
                let once = source_profile(&profile, mode);
                let twice = source_profile(&once, mode);
                assert!(Arc::ptr_eq(&once, &twice));
            }
        }
    }

    #[test]
    fn test_curve_mismatch_does_not_snap() {
        let power = Arc::new(ColorProfile::new(
            Cow::Borrowed(&[]),
            ColorSpace::Rgb,
            ColorSpace::Xyz,
            ProfileKind::Matrix(MatrixProfile::new(Some(Curve::from_power(1.8)), SRGB_MATRIX).unwrap()),
        ));
        let source = source_profile(&power, ColorProfileMode::Normalize);
        assert!(Arc::ptr_eq(&source, &power));
        // Fits in sRGB, so normalization targets sRGB
        assert!(Arc::ptr_eq(
            &dest_profile(&power, ColorProfileMode::Normalize),
            &srgb()
        ));
    }

    #[test]
    fn test_dest_profile_policy() {
        use ColorProfileMode::*;

        for mode in MODES {
            let p3 = display_p3();
            assert!(Arc::ptr_eq(&dest_profile(&p3, Preserve), &p3));
            if mode != Preserve {
                assert!(Arc::ptr_eq(&dest_profile(&sgrey(), mode), &sgrey()));
            }
        }

        assert!(Arc::ptr_eq(&dest_profile(&adobe_rgb(), Normalize), &adobe_rgb()));
        assert!(Arc::ptr_eq(&dest_profile(&parse(IccResources::adobe_rgb_v4()), NormalizeAndEmbed), &adobe_rgb()));
        assert!(Arc::ptr_eq(&dest_profile(&srgb(), Normalize), &srgb()));
        assert!(Arc::ptr_eq(&dest_profile(&display_p3(), Normalize), &display_p3()));
        assert!(Arc::ptr_eq(&dest_profile(&ColorProfile::invalid(), Normalize), &display_p3()));

        let cmyk = Arc::new(ColorProfile::new(Cow::Borrowed(&[]), ColorSpace::Cmyk, ColorSpace::Lab, ProfileKind::Unknown));
        assert!(Arc::ptr_eq(&dest_profile(&cmyk, Normalize), &adobe_rgb()));
        assert!(Arc::ptr_eq(&dest_profile(&cmyk, ConvertToSrgb), &srgb()));
        assert!(Arc::ptr_eq(&dest_profile(&display_p3(), Ignore), &srgb()));
        assert!(Arc::ptr_eq(&dest_profile(&adobe_rgb(), ConvertToSrgb), &srgb()));
    }

    #[test]
    fn test_wide_gamut_thresholds() {
        assert!(!is_wide_gamut(&SRGB_MATRIX));
        assert!(is_wide_gamut(&DISPLAY_P3_MATRIX));
        assert!(is_wide_gamut(&ADOBE_RGB_MATRIX));
    }
}
