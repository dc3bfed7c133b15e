//! Numeric building blocks
//!
//! - Homogeneous 4x4 matrix operations for RGB→XYZ transforms
//! - Transfer function evaluation
//! - Interpolation over sampled curves

pub mod gamma;
pub mod interpolation;
pub mod matrix;

pub use gamma::{ParametricCurve, ParametricCurveType, srgb_gamma_decode, srgb_gamma_encode};
pub use interpolation::{lerp, lerp_f32, monotonic_position};
pub use matrix::Matrix4x4;
