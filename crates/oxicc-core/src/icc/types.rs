//! ICC Profile Basic Types
//!
//! Signatures, fixed-point numbers and bounds-checked big-endian readers.
//! All multi-byte ICC values are big-endian.

use super::error::IccError;

/// ICC Tag Signature (4-byte ASCII code)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TagSignature(pub u32);

impl TagSignature {
    /// Create from 4 ASCII characters
    pub const fn from_bytes(b: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(b))
    }

    pub const A2B0: Self = Self::from_bytes(*b"A2B0");
    pub const B2A0: Self = Self::from_bytes(*b"B2A0");
    pub const RED_COLORANT: Self = Self::from_bytes(*b"rXYZ");
    pub const GREEN_COLORANT: Self = Self::from_bytes(*b"gXYZ");
    pub const BLUE_COLORANT: Self = Self::from_bytes(*b"bXYZ");
    pub const RED_TRC: Self = Self::from_bytes(*b"rTRC");
    pub const GREEN_TRC: Self = Self::from_bytes(*b"gTRC");
    pub const BLUE_TRC: Self = Self::from_bytes(*b"bTRC");
    pub const GRAY_TRC: Self = Self::from_bytes(*b"kTRC");

    /// Whether this tag holds a LUT-based transform this crate does not evaluate
    pub const fn is_lut_transform(self) -> bool {
        self.0 == Self::A2B0.0 || self.0 == Self::B2A0.0
    }
}

impl std::fmt::Display for TagSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt_signature(self.0, f)
    }
}

/// Type signatures for ICC tag data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeSignature(pub u32);

impl TypeSignature {
    pub const fn from_bytes(b: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(b))
    }

    pub const XYZ: Self = Self::from_bytes(*b"XYZ ");
    pub const CURVE: Self = Self::from_bytes(*b"curv");
    pub const PARA: Self = Self::from_bytes(*b"para");
}

impl std::fmt::Display for TypeSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt_signature(self.0, f)
    }
}

fn fmt_signature(sig: u32, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let bytes = sig.to_be_bytes();
    if bytes.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
        write!(f, "'{}'", String::from_utf8_lossy(&bytes))
    } else {
        write!(f, "0x{sig:08X}")
    }
}

/// s15Fixed16Number - signed 16.16 fixed point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct S15Fixed16(pub i32);

impl S15Fixed16 {
    pub const ONE: Self = Self(0x10000);

    /// Convert to f64
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 65536.0
    }

    /// Convert to f32
    pub fn to_f32(self) -> f32 {
        self.0 as f32 * (1.0 / 65536.0)
    }
}

/// u8Fixed8Number - unsigned 8.8 fixed point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct U8Fixed8(pub u16);

impl U8Fixed8 {
    pub const ONE: Self = Self(0x100);

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 256.0
    }
}

#[inline]
fn field<const N: usize>(data: &[u8], offset: usize) -> Result<[u8; N], IccError> {
    offset
        .checked_add(N)
        .and_then(|end| data.get(offset..end))
        .and_then(|s| s.try_into().ok())
        .ok_or(IccError::Truncated {
            offset,
            needed: N,
            available: data.len(),
        })
}

/// Read a big-endian u16 at `offset`
#[inline]
pub fn read_u16(data: &[u8], offset: usize) -> Result<u16, IccError> {
    field(data, offset).map(u16::from_be_bytes)
}

/// Read a big-endian u32 at `offset`
#[inline]
pub fn read_u32(data: &[u8], offset: usize) -> Result<u32, IccError> {
    field(data, offset).map(u32::from_be_bytes)
}

/// Read a big-endian s15Fixed16 at `offset`
#[inline]
pub fn read_s15f16(data: &[u8], offset: usize) -> Result<S15Fixed16, IccError> {
    field(data, offset).map(|b| S15Fixed16(i32::from_be_bytes(b)))
}
