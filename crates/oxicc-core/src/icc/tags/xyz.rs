//! XYZ Tag Type
//!
//! Each colorant tag holds one XYZNumber: three s15Fixed16 values.
//! See ICC.1:2010 Section 10.27

use crate::icc::error::IccError;
use crate::icc::types::{TypeSignature, read_s15f16};
use crate::math::matrix::Matrix4x4;

use super::{TAG_HEADER_SIZE, type_signature};

fn read_xyz(data: &[u8]) -> Result<[f32; 3], IccError> {
    Ok([
        read_s15f16(data, TAG_HEADER_SIZE)?.to_f32(),
        read_s15f16(data, TAG_HEADER_SIZE + 4)?.to_f32(),
        read_s15f16(data, TAG_HEADER_SIZE + 8)?.to_f32(),
    ])
}

/// Build the RGB → PCS matrix from the three colorant tag payloads
///
/// The payloads must share an identical 8-byte type header, and that type must
/// be `XYZ `. Each colorant becomes one row of the homogeneous matrix.
pub fn parse_colorants(red: &[u8], green: &[u8], blue: &[u8]) -> Result<Matrix4x4, IccError> {
    let (Some(r), Some(g), Some(b)) = (
        red.get(..TAG_HEADER_SIZE),
        green.get(..TAG_HEADER_SIZE),
        blue.get(..TAG_HEADER_SIZE),
    ) else {
        return Err(IccError::MismatchedColorants);
    };
    if r != g || r != b {
        return Err(IccError::MismatchedColorants);
    }

    let type_sig = type_signature(red)?;
    if type_sig != TypeSignature::XYZ {
        return Err(IccError::InvalidTagType(type_sig));
    }

    Ok(Matrix4x4::from_primaries(
        read_xyz(red)?,
        read_xyz(green)?,
        read_xyz(blue)?,
    ))
}
