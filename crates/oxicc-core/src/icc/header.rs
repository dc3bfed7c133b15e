//! ICC Profile Header
//!
//! The ICC profile header is exactly 128 bytes. Only the fields that decide
//! whether and how a profile can be transformed are decoded here.
//! See ICC.1:2010 Section 7.2.

use super::error::IccError;
use super::types::read_u32;

/// Profile file signature - must be 'acsp' (0x61637370)
pub const PROFILE_SIGNATURE: u32 = 0x61637370;

/// Size of the fixed header
pub const HEADER_SIZE: usize = 128;

/// Smallest profile that could still be parsed: the header, the tag count and a
/// single directory entry pointing at an 8-byte tag.
pub const MIN_PROFILE_SIZE: usize = 160;

const DATA_COLOR_SPACE_OFFSET: usize = 16;
const PCS_OFFSET: usize = 20;
const SIGNATURE_OFFSET: usize = 36;
const VERSION_OFFSET: usize = 8;

/// Color space of profile data or of the profile connection space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorSpace {
    /// Unrecognized or unsupported signature
    #[default]
    Other,
    Rgb,
    Grey,
    Cmyk,
    Xyz,
    Lab,
}

impl ColorSpace {
    /// Decode the data color space field
    pub fn from_data_signature(sig: u32) -> Self {
        match &sig.to_be_bytes() {
            b"RGB " => Self::Rgb,
            b"GRAY" => Self::Grey,
            b"CMYK" => Self::Cmyk,
            _ => Self::Other,
        }
    }

    /// Decode the profile connection space field
    pub fn from_pcs_signature(sig: u32) -> Self {
        match &sig.to_be_bytes() {
            b"XYZ " => Self::Xyz,
            b"Lab " => Self::Lab,
            _ => Self::Other,
        }
    }
}

/// The validated subset of an ICC header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IccHeader {
    /// Profile size in bytes, equal to the length of the data
    pub size: u32,
    /// Major version, 2 or 4
    pub major_version: u8,
    /// Color space of data (RGB, CMYK, etc.)
    pub color_space: ColorSpace,
    /// Profile connection space (XYZ or Lab)
    pub pcs: ColorSpace,
}

impl IccHeader {
    /// Parse and validate the header of a complete profile
    pub fn parse(data: &[u8]) -> Result<Self, IccError> {
        if data.len() < MIN_PROFILE_SIZE {
            return Err(IccError::TooSmall {
                expected: MIN_PROFILE_SIZE,
                actual: data.len(),
            });
        }

        let size = read_u32(data, 0)?;
        if size as usize != data.len() {
            return Err(IccError::SizeMismatch {
                header_size: size,
                actual_size: data.len(),
            });
        }

        let signature = read_u32(data, SIGNATURE_OFFSET)?;
        if signature != PROFILE_SIGNATURE {
            return Err(IccError::InvalidSignature(signature));
        }

        let major_version = data[VERSION_OFFSET];
        if !matches!(major_version, 2 | 4) {
            return Err(IccError::UnsupportedVersion {
                major: major_version,
            });
        }

        Ok(Self {
            size,
            major_version,
            color_space: ColorSpace::from_data_signature(read_u32(data, DATA_COLOR_SPACE_OFFSET)?),
            pcs: ColorSpace::from_pcs_signature(read_u32(data, PCS_OFFSET)?),
        })
    }

    /// Whether this crate can build a transform for the profile at all
    pub fn is_transformable(&self) -> bool {
        self.pcs == ColorSpace::Xyz && matches!(self.color_space, ColorSpace::Rgb | ColorSpace::Grey)
    }
}
