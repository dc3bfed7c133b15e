//! Fixed-scale numeric conversions
//!
//! No transfer curve is involved; values are only rescaled between integer
//! code ranges and [0, 1].

use multiversion::multiversion;

/// `(v - offset) / divisor` for 8-bit codes, not clamped
#[multiversion(targets("x86_64+avx2", "x86_64+sse4.1", "aarch64+neon",))]
pub fn widen_u8_to_f32_batch(input: &[u8], output: &mut [f32], offset: f32, divisor: f32) {
    assert!(output.len() >= input.len());

    for (inp, out) in input.iter().zip(output.iter_mut()) {
        *out = (f32::from(*inp) - offset) / divisor;
    }
}

/// `round(v * scale + offset)` saturated to a byte
#[multiversion(targets("x86_64+avx2", "x86_64+sse4.1", "aarch64+neon",))]
pub fn narrow_f32_to_u8_batch(input: &[f32], output: &mut [u8], scale: f32, offset: f32) {
    assert!(output.len() >= input.len());

    for (inp, out) in input.iter().zip(output.iter_mut()) {
        // Float to int casts saturate and map NaN to 0
        *out = (inp * scale + offset).round().clamp(0.0, 255.0) as u8;
    }
}

/// `round(v * scale + offset)` for UQ15 input, saturated to a byte
#[multiversion(targets("x86_64+avx2", "x86_64+sse4.1", "aarch64+neon",))]
pub fn narrow_u16_to_u8_batch(input: &[u16], output: &mut [u8], scale: f32, offset: f32) {
    assert!(output.len() >= input.len());

    for (inp, out) in input.iter().zip(output.iter_mut()) {
        *out = (f32::from(*inp) * scale + offset).round().clamp(0.0, 255.0) as u8;
    }
}
