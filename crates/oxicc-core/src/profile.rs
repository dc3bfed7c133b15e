//! Parsed color profiles
//!
//! A [`ColorProfile`] is immutable once built and is shared through `Arc`.
//! Its shape is a closed set:
//!
//! | shape | payload | produced for |
//! |---|---|---|
//! | `Unknown` | none | non-XYZ PCS, CMYK/Lab/other data, or rejected input |
//! | `Table` | none | profiles carrying `A2B0`/`B2A0` |
//! | `Curve` | [`CurveProfile`] | grey data with an optional `kTRC` |
//! | `Matrix` | [`MatrixProfile`] | RGB data with shared TRCs and colorants |
//!
//! A matrix profile carries a curve profile, so converter lookup works the same
//! way for both transformable shapes.

use std::borrow::Cow;
use std::fmt;
use std::sync::{Arc, LazyLock};

use crate::canonical;
use crate::convert::{Converter, ConverterCache, Encoding, EncodingRange, Sample};
use crate::curve::Curve;
use crate::error::{Error, Result};
use crate::icc::ColorSpace;
use crate::math::Matrix4x4;

static INVALID: LazyLock<Arc<ColorProfile>> = LazyLock::new(|| {
    Arc::new(ColorProfile {
        bytes: Cow::Borrowed(&[]),
        data_color_space: ColorSpace::Other,
        pcs_color_space: ColorSpace::Other,
        valid: false,
        kind: ProfileKind::Unknown,
    })
});

/// Classification of a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileType {
    Unknown,
    Table,
    Curve,
    Matrix,
}

/// Channel layout of pixel data a profile may be attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorRepresentation {
    Grey,
    Rgb,
    Bgr,
    Cmyk,
    Other,
}

/// Shape-specific payload of a [`ColorProfile`]
#[derive(Debug)]
pub enum ProfileKind {
    Unknown,
    Table,
    Curve(CurveProfile),
    Matrix(MatrixProfile),
}

/// A parsed or canonical ICC profile
pub struct ColorProfile {
    bytes: Cow<'static, [u8]>,
    data_color_space: ColorSpace,
    pcs_color_space: ColorSpace,
    valid: bool,
    kind: ProfileKind,
}

impl fmt::Debug for ColorProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColorProfile")
            .field("len", &self.bytes.len())
            .field("data_color_space", &self.data_color_space)
            .field("pcs_color_space", &self.pcs_color_space)
            .field("valid", &self.valid)
            .field("kind", &self.kind)
            .finish()
    }
}

impl ColorProfile {
    pub(crate) fn new(
        bytes: Cow<'static, [u8]>,
        data_color_space: ColorSpace,
        pcs_color_space: ColorSpace,
        kind: ProfileKind,
    ) -> Self {
        Self {
            bytes,
            data_color_space,
            pcs_color_space,
            valid: true,
            kind,
        }
    }

    /// The shared result for input that could not be parsed
    pub fn invalid() -> Arc<Self> {
        Arc::clone(&INVALID)
    }

    /// The canonical profile for pixel data of the given layout
    pub fn default_for(representation: ColorRepresentation) -> Arc<Self> {
        match representation {
            ColorRepresentation::Grey => canonical::sgrey(),
            _ => canonical::srgb(),
        }
    }

    /// Original profile bytes, suitable for re-embedding
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn data_color_space(&self) -> ColorSpace {
        self.data_color_space
    }

    pub fn pcs_color_space(&self) -> ColorSpace {
        self.pcs_color_space
    }

    /// `false` only for [`ColorProfile::invalid`]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn kind(&self) -> &ProfileKind {
        &self.kind
    }

    pub fn profile_type(&self) -> ProfileType {
        match self.kind {
            ProfileKind::Unknown => ProfileType::Unknown,
            ProfileKind::Table => ProfileType::Table,
            ProfileKind::Curve(_) => ProfileType::Curve,
            ProfileKind::Matrix(_) => ProfileType::Matrix,
        }
    }

    /// The curve part of a Curve or Matrix profile
    pub fn as_curve_profile(&self) -> Option<&CurveProfile> {
        match &self.kind {
            ProfileKind::Curve(profile) => Some(profile),
            ProfileKind::Matrix(profile) => Some(&profile.curve),
            _ => None,
        }
    }

    pub fn as_matrix_profile(&self) -> Option<&MatrixProfile> {
        match &self.kind {
            ProfileKind::Matrix(profile) => Some(profile),
            _ => None,
        }
    }

    /// Whether pixel data with this layout can be tagged with this profile
    pub fn is_compatible_with(&self, representation: ColorRepresentation) -> bool {
        matches!(
            (self.data_color_space, representation),
            (ColorSpace::Rgb, ColorRepresentation::Rgb | ColorRepresentation::Bgr)
                | (ColorSpace::Cmyk, ColorRepresentation::Cmyk)
                | (ColorSpace::Grey, ColorRepresentation::Grey)
        )
    }

    /// Look up a converter through this profile's curve
    ///
    /// Fails with [`Error::ProfileNotTransformable`] for Unknown and Table
    /// profiles.
    pub fn converter<F: Sample, T: Sample>(
        &self,
        encoding: Encoding,
        range: EncodingRange,
    ) -> Result<Arc<dyn Converter<F, T>>> {
        match self.as_curve_profile() {
            Some(profile) => profile.converter_for(encoding, range),
            None => Err(Error::ProfileNotTransformable {
                profile_type: self.profile_type(),
            }),
        }
    }
}

/// A profile with a single tone curve
#[derive(Debug)]
pub struct CurveProfile {
    curve: Arc<Curve>,
    linear: bool,
    converters: ConverterCache,
}

impl CurveProfile {
    /// `None` means the profile has no tone curve at all
    pub fn new(curve: Option<Arc<Curve>>) -> Self {
        Self {
            linear: curve.is_none(),
            curve: curve.unwrap_or_else(Curve::linear),
            converters: ConverterCache::default(),
        }
    }

    pub fn curve(&self) -> &Arc<Curve> {
        &self.curve
    }

    /// Whether samples are already linear light
    pub fn is_linear(&self) -> bool {
        self.linear
    }

    /// Full-range converter, see [`CurveProfile::converter_for`]
    pub fn converter<F: Sample, T: Sample>(&self, encoding: Encoding) -> Result<Arc<dyn Converter<F, T>>> {
        self.converter_for(encoding, EncodingRange::Full)
    }

    /// Converter from `F` to `T` across this profile's curve
    ///
    /// Built on first request and shared afterwards. Combinations without a
    /// converter fail with [`Error::UnsupportedConversion`] every time.
    pub fn converter_for<F: Sample, T: Sample>(
        &self,
        encoding: Encoding,
        range: EncodingRange,
    ) -> Result<Arc<dyn Converter<F, T>>> {
        self.converters
            .get_or_build::<F, T>(&self.curve, self.linear, encoding, range)
    }

    #[cfg(test)]
    pub(crate) fn cached_converters(&self) -> usize {
        self.converters.len()
    }
}

/// An RGB profile: one shared tone curve plus an RGB → XYZ matrix
#[derive(Debug)]
pub struct MatrixProfile {
    curve: CurveProfile,
    matrix: Matrix4x4,
    inverse: Matrix4x4,
}

impl MatrixProfile {
    /// Returns `None` if `matrix` has no finite inverse
    pub fn new(curve: Option<Arc<Curve>>, matrix: Matrix4x4) -> Option<Self> {
        let inverse = matrix.inverse_precise()?;
        Some(Self {
            curve: CurveProfile::new(curve),
            matrix,
            inverse,
        })
    }

    pub fn curve_profile(&self) -> &CurveProfile {
        &self.curve
    }

    pub fn curve(&self) -> &Arc<Curve> {
        self.curve.curve()
    }

    /// RGB → PCS XYZ, one primary per row
    pub fn matrix(&self) -> &Matrix4x4 {
        &self.matrix
    }

    /// PCS XYZ → RGB
    pub fn inverse_matrix(&self) -> &Matrix4x4 {
        &self.inverse
    }
}
