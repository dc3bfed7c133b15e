use std::sync::Arc;

use crate::curve::Curve;
use crate::lut::{GAMMA_SCALE_FLOAT, INVERSE_GAMMA_SCALE};
use crate::simd;

use super::{Converter, EncodingRange};

/// Linear f32 → companded f32 by interpolating the gamma table
#[derive(Debug, Clone)]
pub struct FloatGamma {
    curve: Arc<Curve>,
}

impl FloatGamma {
    pub fn new(curve: Arc<Curve>) -> Self {
        Self { curve }
    }
}

impl Converter<f32, f32> for FloatGamma {
    fn convert_line(&self, src: &[f32], dst: &mut [f32]) {
        simd::interpolate_f32_batch(src, dst, self.curve.gamma(), GAMMA_SCALE_FLOAT);
    }
}

/// Companded f32 → linear f32 by interpolating the inverse gamma table
#[derive(Debug, Clone)]
pub struct FloatInverseGamma {
    curve: Arc<Curve>,
}

impl FloatInverseGamma {
    pub fn new(curve: Arc<Curve>) -> Self {
        Self { curve }
    }
}

impl Converter<f32, f32> for FloatInverseGamma {
    fn convert_line(&self, src: &[f32], dst: &mut [f32]) {
        simd::interpolate_f32_batch(src, dst, self.curve.inverse_gamma(), INVERSE_GAMMA_SCALE);
    }
}

/// Companded u8 → linear f32
#[derive(Debug, Clone)]
pub struct InverseGamma {
    curve: Arc<Curve>,
    range: EncodingRange,
}

impl InverseGamma {
    pub fn new(curve: Arc<Curve>, range: EncodingRange) -> Self {
        Self { curve, range }
    }
}

impl Converter<u8, f32> for InverseGamma {
    fn convert_line(&self, src: &[u8], dst: &mut [f32]) {
        simd::lookup_u8_to_f32_batch(src, dst, self.curve.inverse_gamma_for(self.range));
    }
}

/// Companded u8 → linear UQ15
#[derive(Debug, Clone)]
pub struct Uq15InverseGamma {
    curve: Arc<Curve>,
    range: EncodingRange,
}

impl Uq15InverseGamma {
    pub fn new(curve: Arc<Curve>, range: EncodingRange) -> Self {
        Self { curve, range }
    }
}

impl Converter<u8, u16> for Uq15InverseGamma {
    fn convert_line(&self, src: &[u8], dst: &mut [u16]) {
        simd::lookup_u8_to_u16_batch(src, dst, self.curve.uq15_inverse_gamma(self.range));
    }
}

/// Linear UQ15 → companded u8
#[derive(Debug, Clone)]
pub struct Uq15Gamma {
    curve: Arc<Curve>,
    range: EncodingRange,
}

impl Uq15Gamma {
    pub fn new(curve: Arc<Curve>, range: EncodingRange) -> Self {
        Self { curve, range }
    }
}

impl Converter<u16, u8> for Uq15Gamma {
    fn convert_line(&self, src: &[u16], dst: &mut [u8]) {
        simd::lookup_uq15_to_u8_batch(src, dst, self.curve.uq15_gamma(self.range));
    }
}

/// Linear f32 → companded u8 through the UQ15 gamma table
#[derive(Debug, Clone)]
pub struct FloatUq15Gamma {
    curve: Arc<Curve>,
    range: EncodingRange,
}

impl FloatUq15Gamma {
    pub fn new(curve: Arc<Curve>, range: EncodingRange) -> Self {
        Self { curve, range }
    }
}

impl Converter<f32, u8> for FloatUq15Gamma {
    fn convert_line(&self, src: &[f32], dst: &mut [u8]) {
        simd::lookup_f32_to_u8_batch(src, dst, self.curve.uq15_gamma(self.range));
    }
}
