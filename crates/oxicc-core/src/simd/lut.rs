//! Table-driven transfer kernels
//!
//! Direct lookups index the table with the sample value. Interpolated
//! lookups follow [`crate::lut::interpolate`].

use multiversion::multiversion;

use crate::lut::{GAMMA_SCALE, uq15_index};

/// `output[i] = table[input[i]]` for 8-bit codes into a float table
#[multiversion(targets("x86_64+avx2", "x86_64+sse4.1", "aarch64+neon",))]
pub fn lookup_u8_to_f32_batch(input: &[u8], output: &mut [f32], table: &[f32]) {
    assert!(output.len() >= input.len());
    let table = &table[..256];

    for (inp, out) in input.iter().zip(output.iter_mut()) {
        *out = table[usize::from(*inp)];
    }
}

/// `output[i] = table[input[i]]` for 8-bit codes into a UQ15 table
#[multiversion(targets("x86_64+avx2", "x86_64+sse4.1", "aarch64+neon",))]
pub fn lookup_u8_to_u16_batch(input: &[u8], output: &mut [u16], table: &[u16]) {
    assert!(output.len() >= input.len());
    let table = &table[..256];

    for (inp, out) in input.iter().zip(output.iter_mut()) {
        *out = table[usize::from(*inp)];
    }
}

/// UQ15 values through a [`GAMMA_SCALE`] byte table
#[multiversion(targets("x86_64+avx2", "x86_64+sse4.1", "aarch64+neon",))]
pub fn lookup_uq15_to_u8_batch(input: &[u16], output: &mut [u8], table: &[u8]) {
    assert!(output.len() >= input.len());
    let table = &table[..=GAMMA_SCALE];

    for (inp, out) in input.iter().zip(output.iter_mut()) {
        *out = table[uq15_index(*inp)];
    }
}

/// Float values through a [`GAMMA_SCALE`] byte table, rounding to the nearest entry
#[multiversion(targets("x86_64+avx2", "x86_64+sse4.1", "aarch64+neon",))]
pub fn lookup_f32_to_u8_batch(input: &[f32], output: &mut [u8], table: &[u8]) {
    assert!(output.len() >= input.len());
    let table = &table[..=GAMMA_SCALE];
    const SCALE: f32 = GAMMA_SCALE as f32;

    for (inp, out) in input.iter().zip(output.iter_mut()) {
        // NaN saturates to index 0
        let idx = (inp.clamp(0.0, 1.0) * SCALE + 0.5) as usize;
        *out = table[idx.min(GAMMA_SCALE)];
    }
}

/// Interpolated lookup of [0, 1] floats in a padded table of `scale + 2` entries
#[multiversion(targets("x86_64+avx2", "x86_64+sse4.1", "aarch64+neon",))]
pub fn interpolate_f32_batch(input: &[f32], output: &mut [f32], table: &[f32], scale: usize) {
    assert!(output.len() >= input.len());
    assert!(table.len() >= scale + 2);
    let scale_f = scale as f32;

    for (inp, out) in input.iter().zip(output.iter_mut()) {
        let x = if inp.is_nan() { 0.0 } else { inp.clamp(0.0, 1.0) };
        let pos = x * scale_f;
        let idx = (pos as usize).min(scale);
        let lo = table[idx];
        *out = lo + (pos - idx as f32) * (table[idx + 1] - lo);
    }
}
