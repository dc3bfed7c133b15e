//! ICC Profile Error Types
//!
//! These are rejection reasons. They are logged and then folded into an invalid
//! profile by [`parse`](super::parse); they never reach the caller.

use std::fmt;

use super::types::{TagSignature, TypeSignature};

/// Reasons an ICC profile cannot be turned into a transformable profile
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IccError {
    /// Profile data is too small
    TooSmall { expected: usize, actual: usize },
    /// Profile size in header doesn't match data
    SizeMismatch {
        header_size: u32,
        actual_size: usize,
    },
    /// Invalid profile signature (should be 'acsp')
    InvalidSignature(u32),
    /// Major version other than 2 or 4
    UnsupportedVersion { major: u8 },
    /// Tag directory does not fit in the profile
    DirectoryOverflow { tag_count: u32, profile_size: usize },
    /// Tag offset is out of bounds
    TagOutOfBounds {
        tag: TagSignature,
        offset: u32,
        size: u32,
        profile_size: usize,
    },
    /// A read ran past the end of a tag payload
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },
    /// Required tag is missing
    MissingTag(TagSignature),
    /// Tag payload has a type this parser does not accept there
    InvalidTagType(TypeSignature),
    /// The three colorant tags do not share a type header
    MismatchedColorants,
    /// Red, green and blue TRC payloads differ
    MismatchedTrc,
    /// Curve payload is structurally valid but unusable
    InvalidCurve(&'static str),
    /// Colorant matrix cannot be inverted
    SingularMatrix,
}

impl fmt::Display for IccError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooSmall { expected, actual } => {
                write!(
                    f,
                    "Profile too small: expected at least {} bytes, got {}",
                    expected, actual
                )
            }
            Self::SizeMismatch {
                header_size,
                actual_size,
            } => {
                write!(
                    f,
                    "Size mismatch: header says {} bytes, data is {} bytes",
                    header_size, actual_size
                )
            }
            Self::InvalidSignature(sig) => {
                write!(
                    f,
                    "Invalid profile signature: 0x{:08X} (expected 'acsp')",
                    sig
                )
            }
            Self::UnsupportedVersion { major } => {
                write!(f, "Unsupported profile major version: {}", major)
            }
            Self::DirectoryOverflow {
                tag_count,
                profile_size,
            } => {
                write!(
                    f,
                    "Tag directory of {} entries does not fit in {} bytes",
                    tag_count, profile_size
                )
            }
            Self::TagOutOfBounds {
                tag,
                offset,
                size,
                profile_size,
            } => {
                write!(
                    f,
                    "Tag {} out of bounds: offset {} + size {} > profile size {}",
                    tag, offset, size, profile_size
                )
            }
            Self::Truncated {
                offset,
                needed,
                available,
            } => {
                write!(
                    f,
                    "Truncated data: need {} bytes at offset {}, have {}",
                    needed, offset, available
                )
            }
            Self::MissingTag(tag) => write!(f, "Required tag missing: {}", tag),
            Self::InvalidTagType(type_sig) => write!(f, "Unexpected tag type {}", type_sig),
            Self::MismatchedColorants => write!(f, "Colorant tags have different type headers"),
            Self::MismatchedTrc => write!(f, "Per-channel TRCs differ"),
            Self::InvalidCurve(msg) => write!(f, "Invalid curve: {}", msg),
            Self::SingularMatrix => write!(f, "Colorant matrix is not invertible"),
        }
    }
}

impl std::error::Error for IccError {}
