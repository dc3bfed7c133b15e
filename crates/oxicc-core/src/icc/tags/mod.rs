//! ICC Tag Decoding
//!
//! Every tag payload starts with:
//! - A 4-byte type signature identifying the data format
//! - 4 reserved bytes
//! - Type-specific data
//!
//! Only the tag types needed for matrix/TRC profiles are decoded.
//! See ICC.1:2010 Section 10.

mod curves;
mod xyz;

pub use curves::parse_trc;
pub use xyz::parse_colorants;

use super::error::IccError;
use super::types::{TypeSignature, read_u32};

/// Size of the type signature plus reserved bytes
pub const TAG_HEADER_SIZE: usize = 8;

/// Read the type signature of a tag payload
pub fn type_signature(data: &[u8]) -> Result<TypeSignature, IccError> {
    read_u32(data, 0).map(TypeSignature)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_signature() {
        assert_eq!(type_signature(b"curv\0\0\0\0").unwrap(), TypeSignature::CURVE);
        assert!(matches!(
            type_signature(b"XY"),
            Err(IccError::Truncated { offset: 0, .. })
        ));
    }
}
