//! SIMD-Dispatched Line Kernels
//!
//! The inner loops of every converter live here, compiled for several
//! instruction sets with the `multiversion` crate and dispatched at runtime.
//!
//! Supported instruction sets:
//! - x86-64: SSE4.1, AVX2
//! - ARM64: NEON
//!
//! Every kernel requires `output.len() >= input.len()` and panics otherwise.

mod lut;
mod scale;

pub use lut::{
    interpolate_f32_batch, lookup_f32_to_u8_batch, lookup_u8_to_f32_batch, lookup_u8_to_u16_batch,
    lookup_uq15_to_u8_batch,
};
pub use scale::{narrow_f32_to_u8_batch, narrow_u16_to_u8_batch, widen_u8_to_f32_batch};

use std::sync::LazyLock;

/// The `multiversion` target the kernels above dispatch to on this CPU
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelTarget {
    Avx2,
    Sse41,
    Neon,
    Fallback,
}

static KERNEL_TARGET: LazyLock<KernelTarget> = LazyLock::new(KernelTarget::detect);

impl KernelTarget {
    /// Detected once per process
    pub fn current() -> Self {
        *KERNEL_TARGET
    }

    // Checked in the order of the kernels' `targets(...)` list
    fn detect() -> Self {
        #[cfg(target_arch = "x86_64")]
        {
            if std::arch::is_x86_feature_detected!("avx2") {
                return Self::Avx2;
            }
            if std::arch::is_x86_feature_detected!("sse4.1") {
                return Self::Sse41;
            }
        }
        #[cfg(target_arch = "aarch64")]
        {
            if std::arch::is_aarch64_feature_detected!("neon") {
                return Self::Neon;
            }
        }
        Self::Fallback
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Avx2 => "x86_64+avx2",
            Self::Sse41 => "x86_64+sse4.1",
            Self::Neon => "aarch64+neon",
            Self::Fallback => "fallback",
        }
    }
}
