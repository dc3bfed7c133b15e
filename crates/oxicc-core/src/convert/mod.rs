//! Per-line sample converters
//!
//! A converter moves one line of samples between numeric representations
//! and, when requested, across the transfer curve of a profile:
//!
//! | profile | encoding | from → to | converter |
//! |---|---|---|---|
//! | linear, or any with `Identity` | any | f32 → f32 | copy |
//! | " | " | u8 → f32 | widening |
//! | " | " | f32 → u8 | narrowing |
//! | " | " | u16 → u8 | UQ15 narrowing |
//! | curve | `FromLinear` | f32 → f32 | interpolated gamma table |
//! | curve | `FromLinear` | u16 → u8 | UQ15 gamma table |
//! | curve | `FromLinear` | f32 → u8 | UQ15 gamma table indexed from float |
//! | curve | `ToLinear` | f32 → f32 | interpolated inverse gamma table |
//! | curve | `ToLinear` | u8 → f32 | inverse gamma table |
//! | curve | `ToLinear` | u8 → u16 | UQ15 inverse gamma table |
//!
//! Converters are stateless apart from the tables they hold, and are built
//! once per profile and key, then shared.

mod scale;
mod table;

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::trace;

use crate::curve::Curve;
use crate::error::{Error, Result};

pub use scale::{Passthrough, NarrowF32, NarrowUq15, WidenU8};
pub use table::{FloatGamma, FloatInverseGamma, FloatUq15Gamma, InverseGamma, Uq15Gamma, Uq15InverseGamma};

/// Transfer applied by a converter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// Source is companded, destination is linear light
    ToLinear,
    /// Source is linear light, destination is companded
    FromLinear,
    /// Numeric change only
    Identity,
}

/// Mapping between 8-bit code values and [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EncodingRange {
    /// 0..=255
    #[default]
    Full,
    /// 16..=235
    Video,
}

/// Numeric representation of a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleKind {
    U8,
    /// Unsigned 16-bit fixed point, 15 fractional bits
    U16,
    F32,
}

/// A sample type converters can read or write
pub trait Sample: bytemuck::Pod + Send + Sync + 'static {
    const KIND: SampleKind;
}

impl Sample for u8 {
    const KIND: SampleKind = SampleKind::U8;
}

impl Sample for u16 {
    const KIND: SampleKind = SampleKind::U16;
}

impl Sample for f32 {
    const KIND: SampleKind = SampleKind::F32;
}

/// Converts a line of `F` samples into `T` samples
pub trait Converter<F: Sample, T: Sample>: Send + Sync {
    /// Convert `src` into the front of `dst`
    ///
    /// # Panics
    ///
    /// If `dst` is shorter than `src`.
    fn convert_line(&self, src: &[F], dst: &mut [T]);

    /// Convert between raw byte buffers holding `F` and `T` samples
    ///
    /// Fails if either buffer is misaligned or not a whole number of samples.
    fn convert_bytes(&self, src: &[u8], dst: &mut [u8]) -> std::result::Result<(), bytemuck::PodCastError> {
        let src = bytemuck::try_cast_slice::<u8, F>(src)?;
        let dst = bytemuck::try_cast_slice_mut::<u8, T>(dst)?;
        self.convert_line(src, dst);
        Ok(())
    }
}

/// Everything that selects a converter for a given curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConverterKey {
    pub from: SampleKind,
    pub to: SampleKind,
    pub encoding: Encoding,
    pub range: EncodingRange,
}

impl ConverterKey {
    pub fn new<F: Sample, T: Sample>(encoding: Encoding, range: EncodingRange) -> Self {
        Self {
            from: F::KIND,
            to: T::KIND,
            encoding,
            range,
        }
    }

    fn unsupported(self) -> Error {
        Error::UnsupportedConversion {
            from: self.from,
            to: self.to,
            encoding: self.encoding,
            range: self.range,
        }
    }
}

/// `Arc<dyn Converter<F, T>>` with `F` and `T` erased
type ErasedConverter = Arc<dyn Any + Send + Sync>;

fn erase<F: Sample, T: Sample, C: Converter<F, T> + 'static>(converter: C) -> ErasedConverter {
    let converter: Arc<dyn Converter<F, T>> = Arc::new(converter);
    Arc::new(converter)
}

fn downcast<F: Sample, T: Sample>(erased: &ErasedConverter) -> Option<Arc<dyn Converter<F, T>>> {
    erased.downcast_ref::<Arc<dyn Converter<F, T>>>().cloned()
}

/// Select and construct the converter for `key`
fn build(key: ConverterKey, curve: &Arc<Curve>, linear: bool) -> Result<ErasedConverter> {
    use Encoding::{FromLinear, ToLinear};
    use SampleKind::{F32, U8, U16};

    let range = key.range;
    if linear || key.encoding == Encoding::Identity {
        let scaled = match (key.from, key.to) {
            (F32, F32) => Some(erase::<f32, f32, _>(Passthrough)),
            (U8, F32) => Some(erase::<u8, f32, _>(WidenU8::new(range))),
            (F32, U8) => Some(erase::<f32, u8, _>(NarrowF32::new(range))),
            (U16, U8) => Some(erase::<u16, u8, _>(NarrowUq15::new(range))),
            _ => None,
        };
        if let Some(converter) = scaled {
            return Ok(converter);
        }
        if key.encoding == Encoding::Identity {
            return Err(key.unsupported());
        }
    }

    let curve = Arc::clone(curve);
    let converter = match (key.encoding, key.from, key.to) {
        (FromLinear, F32, F32) => erase::<f32, f32, _>(FloatGamma::new(curve)),
        (FromLinear, U16, U8) => erase::<u16, u8, _>(Uq15Gamma::new(curve, range)),
        (FromLinear, F32, U8) => erase::<f32, u8, _>(FloatUq15Gamma::new(curve, range)),
        (ToLinear, F32, F32) => erase::<f32, f32, _>(FloatInverseGamma::new(curve)),
        (ToLinear, U8, F32) => erase::<u8, f32, _>(InverseGamma::new(curve, range)),
        (ToLinear, U8, U16) => erase::<u8, u16, _>(Uq15InverseGamma::new(curve, range)),
        _ => return Err(key.unsupported()),
    };
    Ok(converter)
}

/// Memoized converters for one curve
///
/// Concurrent misses for the same key may both build; the last insert wins
/// and both results are equivalent.
#[derive(Default)]
pub(crate) struct ConverterCache {
    entries: RwLock<HashMap<ConverterKey, ErasedConverter>>,
}

impl ConverterCache {
    pub(crate) fn get_or_build<F: Sample, T: Sample>(
        &self,
        curve: &Arc<Curve>,
        linear: bool,
        encoding: Encoding,
        range: EncodingRange,
    ) -> Result<Arc<dyn Converter<F, T>>> {
        let key = ConverterKey::new::<F, T>(encoding, range);

        let cached = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .and_then(downcast::<F, T>);
        if let Some(converter) = cached {
            return Ok(converter);
        }

        let erased = build(key, curve, linear)?;
        let converter = downcast::<F, T>(&erased).ok_or_else(|| key.unsupported())?;
        trace!(
            ?key,
            known = ?curve.known(),
            linear,
            kernel = crate::simd::KernelTarget::current().as_str(),
            "built converter"
        );
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, erased);
        Ok(converter)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl fmt::Debug for ConverterCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterCache")
            .field("len", &self.len())
            .finish()
    }
}
