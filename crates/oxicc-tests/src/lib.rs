//! # oxicc-tests
//!
//! Integration testing support for oxicc.
//!
//! This crate provides:
//! - A builder for synthetic ICC profiles, so malformed and edge-case layouts
//!   can be produced without fixture files
//! - Seeded pixel-line and byte-mutation generators
//! - Wrappers around moxcms, used as an independent ICC reader
//!
//! ## Test Categories
//!
//! 1. **Parser scenarios**: classification and rejection of crafted profiles
//! 2. **Canonical profiles**: bundled resources and normalization policy
//! 3. **Cache coherence**: concurrent lookups of identical bytes
//! 4. **Converters**: every supported sample/encoding combination
//! 5. **Curve round trips**: forward and inverse tables of parsed curves
//! 6. **moxcms parity**: colorants and color spaces agree with moxcms

pub mod builder;
pub mod patterns;
pub mod reference;

pub use builder::ProfileBuilder;

/// Route `tracing` output to the test harness, honoring `RUST_LOG`
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// D50-adapted sRGB primaries, one XYZ row per channel
pub const SRGB_PRIMARIES: [[f64; 3]; 3] = [
    [0.43602939, 0.22243797, 0.01389754],
    [0.38510027, 0.71694100, 0.09707674],
    [0.14307328, 0.06062103, 0.71393112],
];

/// D50-adapted Display P3 primaries
pub const DISPLAY_P3_PRIMARIES: [[f64; 3]; 3] = [
    [0.51511960, 0.24118953, -0.00105045],
    [0.29197886, 0.69224341, 0.04187909],
    [0.15710442, 0.06656706, 0.78407676],
];

/// IEC 61966-2-1 as ICC parametric type 3 parameters `g, a, b, c, d`
pub const SRGB_PARAMETERS: [f64; 5] = [2.4, 1.0 / 1.055, 0.055 / 1.055, 1.0 / 12.92, 0.04045];
