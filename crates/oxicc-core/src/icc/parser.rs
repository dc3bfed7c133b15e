//! ICC Profile Parser
//!
//! # Structure
//!
//! An ICC profile consists of:
//! 1. A 128-byte header
//! 2. A tag count and a directory of `{signature, offset, size}` entries
//! 3. Tag data (may overlap/share data)
//!
//! Parsing never fails. Structural damage, numeric degeneracy and unsupported
//! tag layouts all produce [`ColorProfile::invalid`]; well-formed profiles this
//! crate cannot transform come back as Unknown or Table with their bytes kept.

use std::borrow::Cow;
use std::sync::Arc;

use tracing::debug;

use crate::profile::{ColorProfile, CurveProfile, MatrixProfile, ProfileKind};

use super::error::IccError;
use super::header::{ColorSpace, HEADER_SIZE, IccHeader};
use super::tags::{parse_colorants, parse_trc};
use super::types::{TagSignature, read_u32};

/// Offset of the first directory entry, after the header and tag count
const DIRECTORY_OFFSET: usize = HEADER_SIZE + 4;
/// signature(4) + offset(4) + size(4)
const DIRECTORY_ENTRY_SIZE: usize = 12;

/// Parse an ICC profile
///
/// ```
/// let profile = oxicc_core::parse(&[0u8; 100]);
/// assert!(!profile.is_valid());
/// ```
pub fn parse(data: &[u8]) -> Arc<ColorProfile> {
    match parse_profile(data) {
        Ok(profile) => Arc::new(profile),
        Err(error) => {
            debug!(%error, len = data.len(), "rejected ICC profile");
            ColorProfile::invalid()
        }
    }
}

fn parse_profile(data: &[u8]) -> Result<ColorProfile, IccError> {
    let header = IccHeader::parse(data)?;

    let kind = if header.is_transformable() {
        match TagDirectory::read(data)? {
            None => {
                debug!("profile uses a LUT transform");
                ProfileKind::Table
            }
            Some(directory) if header.color_space == ColorSpace::Grey => {
                ProfileKind::Curve(grey_profile(&directory)?)
            }
            Some(directory) => ProfileKind::Matrix(rgb_profile(&directory)?),
        }
    } else {
        debug!(
            color_space = ?header.color_space,
            pcs = ?header.pcs,
            "profile is not transformable"
        );
        ProfileKind::Unknown
    };

    Ok(ColorProfile::new(
        Cow::Owned(data.to_vec()),
        header.color_space,
        header.pcs,
        kind,
    ))
}

fn grey_profile(directory: &TagDirectory<'_>) -> Result<CurveProfile, IccError> {
    let curve = match directory.find(TagSignature::GRAY_TRC) {
        Some(trc) => parse_trc(trc)?,
        None => None,
    };
    Ok(CurveProfile::new(curve))
}

fn rgb_profile(directory: &TagDirectory<'_>) -> Result<MatrixProfile, IccError> {
    let red = directory.require(TagSignature::RED_COLORANT)?;
    let green = directory.require(TagSignature::GREEN_COLORANT)?;
    let blue = directory.require(TagSignature::BLUE_COLORANT)?;
    let red_trc = directory.require(TagSignature::RED_TRC)?;
    let green_trc = directory.require(TagSignature::GREEN_TRC)?;
    let blue_trc = directory.require(TagSignature::BLUE_TRC)?;

    if red_trc != green_trc || red_trc != blue_trc {
        return Err(IccError::MismatchedTrc);
    }

    let curve = parse_trc(red_trc)?;
    let matrix = parse_colorants(red, green, blue)?;
    MatrixProfile::new(curve, matrix).ok_or(IccError::SingularMatrix)
}

/// Tag table entry (as stored in profile)
#[derive(Debug, Clone, Copy)]
struct TagEntry {
    signature: TagSignature,
    offset: u32,
    size: u32,
}

/// The validated tag directory of one profile
struct TagDirectory<'a> {
    data: &'a [u8],
    entries: Vec<TagEntry>,
}

impl<'a> TagDirectory<'a> {
    /// Read and bounds-check every entry
    ///
    /// Returns `None` as soon as an `A2B0` or `B2A0` entry is seen; the rest of
    /// the directory is not examined.
    fn read(data: &'a [u8]) -> Result<Option<Self>, IccError> {
        let tag_count = read_u32(data, HEADER_SIZE)?;
        let directory_end = (tag_count as usize)
            .checked_mul(DIRECTORY_ENTRY_SIZE)
            .and_then(|len| len.checked_add(DIRECTORY_OFFSET));
        if directory_end.is_none_or(|end| end > data.len()) {
            return Err(IccError::DirectoryOverflow {
                tag_count,
                profile_size: data.len(),
            });
        }

        let mut entries = Vec::with_capacity(tag_count as usize);
        for i in 0..tag_count as usize {
            let pos = DIRECTORY_OFFSET + i * DIRECTORY_ENTRY_SIZE;
            let entry = TagEntry {
                signature: TagSignature(read_u32(data, pos)?),
                offset: read_u32(data, pos + 4)?,
                size: read_u32(data, pos + 8)?,
            };

            if u64::from(entry.offset) + u64::from(entry.size) > data.len() as u64 {
                return Err(IccError::TagOutOfBounds {
                    tag: entry.signature,
                    offset: entry.offset,
                    size: entry.size,
                    profile_size: data.len(),
                });
            }
            if entry.signature.is_lut_transform() {
                return Ok(None);
            }
            entries.push(entry);
        }

        Ok(Some(Self { data, entries }))
    }

    /// Payload of the first entry with this signature
    fn find(&self, signature: TagSignature) -> Option<&'a [u8]> {
        let entry = self.entries.iter().find(|e| e.signature == signature)?;
        let start = entry.offset as usize;
        self.data.get(start..start + entry.size as usize)
    }

    fn require(&self, signature: TagSignature) -> Result<&'a [u8], IccError> {
        self.find(signature).ok_or(IccError::MissingTag(signature))
    }
}
