use crate::lut::{UQ15_ONE, VIDEO_BLACK, VIDEO_SCALE};
use crate::simd;

use super::{Converter, EncodingRange};

/// f32 → f32 copy
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Converter<f32, f32> for Passthrough {
    fn convert_line(&self, src: &[f32], dst: &mut [f32]) {
        dst[..src.len()].copy_from_slice(src);
    }
}

/// u8 → f32 without a transfer curve
#[derive(Debug, Clone, Copy)]
pub struct WidenU8 {
    offset: f32,
    divisor: f32,
}

impl WidenU8 {
    pub fn new(range: EncodingRange) -> Self {
        match range {
            EncodingRange::Full => Self {
                offset: 0.0,
                divisor: 255.0,
            },
            EncodingRange::Video => Self {
                offset: VIDEO_BLACK,
                divisor: VIDEO_SCALE,
            },
        }
    }
}

impl Converter<u8, f32> for WidenU8 {
    fn convert_line(&self, src: &[u8], dst: &mut [f32]) {
        simd::widen_u8_to_f32_batch(src, dst, self.offset, self.divisor);
    }
}

/// f32 → u8 without a transfer curve
#[derive(Debug, Clone, Copy)]
pub struct NarrowF32 {
    scale: f32,
    offset: f32,
}

impl NarrowF32 {
    pub fn new(range: EncodingRange) -> Self {
        match range {
            EncodingRange::Full => Self {
                scale: 255.0,
                offset: 0.0,
            },
            EncodingRange::Video => Self {
                scale: VIDEO_SCALE,
                offset: VIDEO_BLACK,
            },
        }
    }
}

impl Converter<f32, u8> for NarrowF32 {
    fn convert_line(&self, src: &[f32], dst: &mut [u8]) {
        simd::narrow_f32_to_u8_batch(src, dst, self.scale, self.offset);
    }
}

/// UQ15 → u8 without a transfer curve
#[derive(Debug, Clone, Copy)]
pub struct NarrowUq15 {
    inner: NarrowF32,
}

impl NarrowUq15 {
    pub fn new(range: EncodingRange) -> Self {
        let inner = NarrowF32::new(range);
        Self {
            inner: NarrowF32 {
                scale: inner.scale / f32::from(UQ15_ONE),
                offset: inner.offset,
            },
        }
    }
}

impl Converter<u16, u8> for NarrowUq15 {
    fn convert_line(&self, src: &[u16], dst: &mut [u8]) {
        simd::narrow_u16_to_u8_batch(src, dst, self.inner.scale, self.inner.offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough() {
        let mut dst = [9.0f32; 4];
        Passthrough.convert_line(&[0.25, -1.0, 2.0], &mut dst);
        assert_eq!(dst, [0.25, -1.0, 2.0, 9.0]);
    }

    #[test]
    fn test_full_range_round_trip() {
        let src: Vec<u8> = (0..=255).collect();
        let mut wide = vec![0.0f32; 256];
        let mut back = vec![0u8; 256];
        WidenU8::new(EncodingRange::Full).convert_line(&src, &mut wide);
        NarrowF32::new(EncodingRange::Full).convert_line(&wide, &mut back);
        assert_eq!(src, back);
    }

    #[test]
    fn test_video_range() {
        let mut wide = [0.0f32; 3];
        WidenU8::new(EncodingRange::Video).convert_line(&[16, 235, 126], &mut wide);
        assert_eq!(wide[0], 0.0);
        assert_eq!(wide[1], 1.0);
        assert!((wide[2] - 110.0 / 219.0).abs() < 1e-6);

        let mut narrow = [0u8; 4];
        NarrowF32::new(EncodingRange::Video).convert_line(&[0.0, 1.0, -1.0, 2.0], &mut narrow);
        assert_eq!(narrow, [16, 235, 0, 255]);
    }

    #[test]
    fn test_uq15_narrow() {
        let mut out = [0u8; 3];
        NarrowUq15::new(EncodingRange::Full).convert_line(&[0, UQ15_ONE / 2, UQ15_ONE], &mut out);
        assert_eq!(out, [0, 128, 255]);

        NarrowUq15::new(EncodingRange::Video).convert_line(&[0, UQ15_ONE / 2, UQ15_ONE], &mut out);
        assert_eq!(out, [16, 126, 235]);
    }
}
