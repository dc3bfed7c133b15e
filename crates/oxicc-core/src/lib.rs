//! # oxicc - ICC profile handling for image pipelines
//!
//! Parses embedded ICC profiles, recognizes well-known color spaces and
//! provides per-line converters between companded and linear-light samples.
//!
//! ## Scope
//!
//! - **Matrix/TRC profiles**: RGB profiles with a shared tone curve and
//!   colorant matrix, and grey profiles with an optional `kTRC`
//! - **Canonical profiles**: sRGB, sGrey, Adobe RGB (1998) compatible and
//!   Display P3, with normalization onto them
//! - **Converters**: u8, UQ15 and f32 samples, full or video range, through
//!   fixed-size lookup tables
//!
//! LUT-based profiles (`A2B0`/`B2A0`) are classified as Table and left for an
//! external CMS.
//!
//! ## Quick Start
//!
//! ```no_run
//! use oxicc_core::{ColorProfileMode, Encoding, ProfileCache, canonical};
//!
//! # fn embedded_profile() -> Vec<u8> { Vec::new() }
//! let bytes = embedded_profile();
//! let profile = ProfileCache::global().get_or_add(&bytes);
//! let source = canonical::source_profile(&profile, ColorProfileMode::Normalize);
//!
//! if let Some(curve) = source.as_curve_profile() {
//!     let to_linear = curve.converter::<u8, f32>(Encoding::ToLinear).unwrap();
//!     let line = [0u8, 128, 255];
//!     let mut linear = [0.0f32; 3];
//!     to_linear.convert_line(&line, &mut linear);
//! }
//! ```
//!
//! ## Logging
//!
//! Rejected profiles and canonical-profile initialization are reported at
//! `debug` level through `tracing`; cache and converter activity at `trace`.

pub mod cache;
pub mod canonical;
pub mod convert;
pub mod curve;
pub mod error;
pub mod icc;
pub mod lut;
pub mod math;
pub mod profile;
pub mod resources;
pub mod simd;

pub use cache::ProfileCache;
pub use canonical::ColorProfileMode;
pub use convert::{Converter, Encoding, EncodingRange, Sample, SampleKind};
pub use curve::{Curve, KnownCurve};
pub use error::{Error, Result};
pub use icc::{ColorSpace, parse};
pub use profile::{ColorProfile, ColorRepresentation, CurveProfile, MatrixProfile, ProfileKind, ProfileType};

/// Version of oxicc
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
