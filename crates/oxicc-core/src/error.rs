//! Error types for oxicc
//!
//! Malformed or unsupported ICC data never produces one of these: the parser
//! folds such input into an invalid, Unknown or Table profile. The variants here
//! describe misuse of the API by the calling pipeline.

use thiserror::Error;

use crate::convert::{Encoding, EncodingRange, SampleKind};
use crate::profile::ProfileType;

/// Result type for oxicc operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in oxicc operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// No converter exists for the requested combination
    #[error("no {encoding:?} converter from {from:?} to {to:?} ({range:?} range)")]
    UnsupportedConversion {
        from: SampleKind,
        to: SampleKind,
        encoding: Encoding,
        range: EncodingRange,
    },

    /// Converters were requested from a profile that carries no curve
    #[error("{profile_type:?} profile has no transfer curve")]
    ProfileNotTransformable { profile_type: ProfileType },
}
