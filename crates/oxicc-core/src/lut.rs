//! Lookup-table geometry and primitives
//!
//! Every [`Curve`](crate::curve::Curve) carries two float tables of fixed,
//! crate-wide length:
//!
//! - the inverse-gamma table (encoded → linear) has one entry per 8-bit code
//!   value, `INVERSE_GAMMA_SCALE + 1` entries, plus one padding entry
//! - the gamma table (linear → encoded) is sampled more finely, with
//!   `GAMMA_SCALE_FLOAT + 1` entries plus one padding entry
//!
//! The padding entry repeats the last real value so that interpolation at
//! exactly 1.0 can read `table[idx + 1]` without a bounds branch.
//!
//! Derived tables for video range and for UQ15 (unsigned 16-bit fixed point
//! with 15 fractional bits) are built from the float tables here.

use crate::math::interpolation::lerp_f32;

/// Scale of the encoded → linear table: index = code value
pub const INVERSE_GAMMA_SCALE: usize = 255;
/// Length of the encoded → linear table, including padding
pub const INVERSE_GAMMA_LEN: usize = INVERSE_GAMMA_SCALE + 2;

/// Scale of the linear → encoded float table
pub const GAMMA_SCALE_FLOAT: usize = 1023;
/// Length of the linear → encoded float table, including padding
pub const GAMMA_LEN: usize = GAMMA_SCALE_FLOAT + 2;

/// Scale of the UQ15 linear → 8-bit table, indexed by [`uq15_index`]
pub const GAMMA_SCALE: usize = 4096;
/// Length of the UQ15 linear → 8-bit table
pub const GAMMA_UQ15_LEN: usize = GAMMA_SCALE + 1;

/// 1.0 in UQ15
pub const UQ15_ONE: u16 = 1 << 15;
/// Shift from a UQ15 value to a [`GAMMA_SCALE`] table index
pub const UQ15_TABLE_SHIFT: u32 = 3;

/// Video range black level (8-bit)
pub const VIDEO_BLACK: f32 = 16.0;
/// Video range white level (8-bit)
pub const VIDEO_WHITE: f32 = 235.0;
/// Video range span
pub const VIDEO_SCALE: f32 = VIDEO_WHITE - VIDEO_BLACK;

/// Quantize a [0, 1] value to a byte with round-to-nearest
#[inline]
pub fn fix_to_byte(x: f32) -> u8 {
    (x * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Quantize a [0, 1] value to UQ15 with round-to-nearest
#[inline]
pub fn fix_to_uq15(x: f32) -> u16 {
    (x * UQ15_ONE as f32).round().clamp(0.0, UQ15_ONE as f32) as u16
}

/// Enforce boundary consistency
///
/// The value at `scale` is forced finite, and every entry past it is set equal
/// to it.
pub fn fixup(table: &mut [f32], scale: usize) {
    let Some(last) = table.get_mut(scale) else {
        return;
    };
    if !last.is_finite() {
        *last = if *last == f32::NEG_INFINITY { 0.0 } else { 1.0 };
    }
    let last = *last;
    table[scale + 1..].fill(last);
}

/// Sample `f` over [0, 1] into a padded table of the given scale
pub fn build_table(scale: usize, f: impl Fn(f64) -> f64) -> Box<[f32]> {
    let mut table: Box<[f32]> = (0..scale + 2)
        .map(|i| f(i.min(scale) as f64 / scale as f64) as f32)
        .collect();
    fixup(&mut table, scale);
    table
}

/// Interpolated lookup of `x` in [0, 1]
///
/// `table` must hold at least `scale + 2` entries. Out-of-range input is
/// clamped; NaN reads entry 0.
#[inline]
pub fn interpolate(table: &[f32], scale: usize, x: f32) -> f32 {
    let x = if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) };
    let pos = x * scale as f32;
    let idx = (pos as usize).min(scale);
    lerp_f32(table[idx], table[idx + 1], pos - idx as f32)
}

/// Whether `inverse_gamma` round-trips through `gamma` to every code value
///
/// Each encoded code `i` is mapped to linear light by the inverse table, then
/// back through the forward table by interpolation; the result must quantize
/// to exactly `i`.
pub fn lut_inverts_to(inverse_gamma: &[f32], gamma: &[f32]) -> bool {
    if inverse_gamma.len() < INVERSE_GAMMA_SCALE + 1 || gamma.len() < GAMMA_LEN {
        return false;
    }
    (0..=INVERSE_GAMMA_SCALE).all(|i| {
        let encoded = interpolate(gamma, GAMMA_SCALE_FLOAT, inverse_gamma[i]);
        usize::from(fix_to_byte(encoded)) == i
    })
}

/// Remap an inverse-gamma table so video-range codes index it directly
///
/// Code `c` reads the full-range curve at `clamp((c - 16) / 219, 0, 1)`.
pub fn video_inverse_gamma(inverse_gamma: &[f32]) -> Box<[f32]> {
    let mut table: Box<[f32]> = (0..INVERSE_GAMMA_LEN)
        .map(|c| {
            let code = c.min(INVERSE_GAMMA_SCALE) as f32;
            let full = ((code - VIDEO_BLACK) / VIDEO_SCALE).clamp(0.0, 1.0);
            interpolate(inverse_gamma, INVERSE_GAMMA_SCALE, full)
        })
        .collect();
    fixup(&mut table, INVERSE_GAMMA_SCALE);
    table
}

/// Compress a gamma table's output into the video range `[16/255, 235/255]`
pub fn video_gamma(gamma: &[f32]) -> Box<[f32]> {
    gamma
        .iter()
        .map(|&v| (v * VIDEO_SCALE + VIDEO_BLACK) / 255.0)
        .collect()
}

/// Requantize an inverse-gamma table to UQ15, one entry per code value
pub fn uq15_inverse_gamma(inverse_gamma: &[f32]) -> Box<[u16]> {
    inverse_gamma[..=INVERSE_GAMMA_SCALE]
        .iter()
        .map(|&v| fix_to_uq15(v))
        .collect()
}

/// Build the UQ15 → 8-bit encode table from a float gamma table
///
/// Entry `i` is the byte for linear value `i / GAMMA_SCALE`.
pub fn uq15_gamma(gamma: &[f32]) -> Box<[u8]> {
    (0..GAMMA_UQ15_LEN)
        .map(|i| {
            let linear = i as f32 / GAMMA_SCALE as f32;
            fix_to_byte(interpolate(gamma, GAMMA_SCALE_FLOAT, linear))
        })
        .collect()
}

/// Index into a [`uq15_gamma`] table for a UQ15 value, rounded to nearest
#[inline]
pub fn uq15_index(v: u16) -> usize {
    const HALF: u16 = 1 << (UQ15_TABLE_SHIFT - 1);
    usize::from((v.min(UQ15_ONE) + HALF) >> UQ15_TABLE_SHIFT)
}

/// Canonical sRGB gamma table (linear → encoded)
pub fn srgb_gamma() -> &'static [f32] {
    crate::curve::Curve::srgb_static().gamma()
}

/// Canonical sRGB inverse gamma table (encoded → linear)
pub fn srgb_inverse_gamma() -> &'static [f32] {
    crate::curve::Curve::srgb_static().inverse_gamma()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::gamma::{srgb_gamma_decode, srgb_gamma_encode};

    #[test]
    fn test_table_lengths() {
        assert_eq!(srgb_gamma().len(), GAMMA_LEN);
        assert_eq!(srgb_inverse_gamma().len(), INVERSE_GAMMA_LEN);
        assert_eq!(uq15_gamma(srgb_gamma()).len(), GAMMA_UQ15_LEN);
        assert_eq!(uq15_index(UQ15_ONE), GAMMA_SCALE);
        assert_eq!(uq15_index(u16::MAX), GAMMA_SCALE);
    }

    #[test]
    fn test_fix_to_byte() {
        assert_eq!(fix_to_byte(0.0), 0);
        assert_eq!(fix_to_byte(1.0), 255);
        assert_eq!(fix_to_byte(-1.0), 0);
        assert_eq!(fix_to_byte(2.0), 255);
        assert_eq!(fix_to_byte(0.5), 128);
        assert_eq!(fix_to_byte(f32::NAN), 0);
        assert_eq!(fix_to_uq15(1.0), UQ15_ONE);
    }

    #[test]
    fn test_fixup_pads_and_sanitizes() {
        let mut table = [0.0, 0.5, f32::NAN, 7.0];
        fixup(&mut table, 2);
        assert_eq!(table, [0.0, 0.5, 1.0, 1.0]);

        let mut table = [0.0, f32::NEG_INFINITY, 3.0];
        fixup(&mut table, 1);
        assert_eq!(table, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_interpolate_edges() {
        let table = build_table(4, |x| x * x);
        assert_eq!(interpolate(&table, 4, 0.0), 0.0);
        assert_eq!(interpolate(&table, 4, 1.0), 1.0);
        assert_eq!(interpolate(&table, 4, 5.0), 1.0);
        assert_eq!(interpolate(&table, 4, f32::NAN), 0.0);
        // Halfway between 0.25^2 and 0.5^2
        assert!((interpolate(&table, 4, 0.375) - 0.15625).abs() < 1e-6);
    }

    #[test]
    fn test_srgb_tables_invert() {
        assert!(lut_inverts_to(srgb_inverse_gamma(), srgb_gamma()));
        for i in 0..=INVERSE_GAMMA_SCALE {
            let expected = srgb_gamma_decode(i as f64 / 255.0) as f32;
            assert!((srgb_inverse_gamma()[i] - expected).abs() < 1e-6);
        }
        let mid = interpolate(srgb_gamma(), GAMMA_SCALE_FLOAT, 0.5);
        assert!((mid - srgb_gamma_encode(0.5) as f32).abs() < 1e-4);
    }

    #[test]
    fn test_mismatched_tables_do_not_invert() {
        let power = build_table(GAMMA_SCALE_FLOAT, |x| x.powf(1.0 / 2.2));
        assert!(!lut_inverts_to(srgb_inverse_gamma(), &power));
        assert!(!lut_inverts_to(&[0.0; 3], srgb_gamma()));
    }

    #[test]
    fn test_video_tables() {
        let igt = build_table(INVERSE_GAMMA_SCALE, |x| x);
        let video = video_inverse_gamma(&igt);
        assert_eq!(video[0], 0.0);
        assert_eq!(video[16], 0.0);
        assert!((video[235] - 1.0).abs() < 1e-6);
        assert_eq!(video[255], 1.0);
        assert!((video[125] - 109.0 / 219.0).abs() < 1e-3);

        let gt = build_table(GAMMA_SCALE_FLOAT, |x| x);
        let video = video_gamma(&gt);
        assert!((video[0] - 16.0 / 255.0).abs() < 1e-6);
        assert!((video[GAMMA_SCALE_FLOAT] - 235.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_uq15_tables() {
        let igt = build_table(INVERSE_GAMMA_SCALE, |x| x);
        let uq = uq15_inverse_gamma(&igt);
        assert_eq!(uq.len(), INVERSE_GAMMA_SCALE + 1);
        assert_eq!(uq[0], 0);
        assert_eq!(uq[255], UQ15_ONE);

        let gt = build_table(GAMMA_SCALE_FLOAT, |x| x);
        let uq = uq15_gamma(&gt);
        assert_eq!(uq[0], 0);
        assert_eq!(uq[GAMMA_SCALE], 255);
        assert!((127..=128).contains(&uq[GAMMA_SCALE / 2]));
    }
}
