//! ICC Profile Parsing
//!
//! Only as much of ICC.1:2010 is decoded as a matrix/TRC transform needs:
//! the header, the tag directory, `curv`/`para` tone curves and `XYZ `
//! colorants.
//!
//! # Example
//!
//! ```
//! use oxicc_core::icc;
//! use oxicc_core::profile::ProfileType;
//! use oxicc_core::resources::IccResources;
//!
//! let profile = icc::parse(IccResources::srgb_v4());
//! assert_eq!(profile.profile_type(), ProfileType::Matrix);
//! ```

pub mod header;
pub mod tags;
pub mod types;

mod error;
mod parser;

pub use error::IccError;
pub use header::{ColorSpace, IccHeader};
pub use parser::parse;
pub use types::{S15Fixed16, TagSignature, TypeSignature, U8Fixed8};
