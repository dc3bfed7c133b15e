//! TRC Tag Types
//!
//! Two encodings are accepted for tone reproduction curves:
//! - curv: identity, a single u8Fixed8 gamma, or a table of u16 samples
//! - para: one of the five ICC parametric functions
//!
//! See ICC.1:2010 Sections 10.5 (curv) and 10.15 (para)

use std::sync::Arc;

use crate::curve::Curve;
use crate::icc::error::IccError;
use crate::icc::types::{S15Fixed16, TypeSignature, U8Fixed8, read_s15f16, read_u16, read_u32};
use crate::math::gamma::{ParametricCurve, ParametricCurveType};

use super::{TAG_HEADER_SIZE, type_signature};

/// Shortest valid TRC payload: type header plus a count or function type
const MIN_TRC_SIZE: usize = 12;

/// Gamma 1.8 as written by u8Fixed8 curv tags
const CURV_GAMMA_1_8: u16 = 0x1cd;
/// Gamma 2.2 (563/256) as written by Adobe RGB compatible curv tags
const CURV_GAMMA_2_2: u16 = 0x233;

/// Upper bound on the raw linear-segment parameters
const PARAM_LIMIT: u32 = 0x10000;

/// Decode a `curv` or `para` payload
///
/// `Ok(None)` means the curve is explicitly the identity.
pub fn parse_trc(data: &[u8]) -> Result<Option<Arc<Curve>>, IccError> {
    if data.len() < MIN_TRC_SIZE {
        return Err(IccError::Truncated {
            offset: 0,
            needed: MIN_TRC_SIZE,
            available: data.len(),
        });
    }

    match type_signature(data)? {
        TypeSignature::CURVE => parse_curv(data),
        TypeSignature::PARA => parse_para(data),
        other => Err(IccError::InvalidTagType(other)),
    }
}

fn parse_curv(data: &[u8]) -> Result<Option<Arc<Curve>>, IccError> {
    let count = read_u32(data, TAG_HEADER_SIZE)? as usize;
    let points_offset = TAG_HEADER_SIZE + 4;

    match count {
        0 => Ok(None),
        1 => {
            let gamma = U8Fixed8(read_u16(data, points_offset)?);
            match gamma.0 {
                0 => Err(IccError::InvalidCurve("zero gamma")),
                0x100 => Ok(None),
                CURV_GAMMA_1_8 => Ok(Some(Curve::from_power(1.8))),
                CURV_GAMMA_2_2 => Ok(Some(Curve::adobe_rgb())),
                _ => Ok(Some(Curve::from_power(gamma.to_f64()))),
            }
        }
        _ => {
            let table = count
                .checked_mul(2)
                .and_then(|n| data.get(points_offset..points_offset.checked_add(n)?))
                .ok_or(IccError::Truncated {
                    offset: points_offset,
                    needed: count.saturating_mul(2),
                    available: data.len(),
                })?;

            let points: Vec<u16> = table
                .chunks_exact(2)
                .map(|c| u16::from_be_bytes([c[0], c[1]]))
                .collect();

            if points == [0, u16::MAX] {
                return Ok(None);
            }

            let increasing = points.windows(2).all(|w| w[0] <= w[1]);
            let decreasing = points.windows(2).all(|w| w[0] >= w[1]);
            if !increasing && !decreasing {
                return Err(IccError::InvalidCurve("non-monotonic samples"));
            }

            // A constant table is both; it is inverted as decreasing
            Ok(Some(Curve::from_points(&points, decreasing)))
        }
    }
}

fn parse_para(data: &[u8]) -> Result<Option<Arc<Curve>>, IccError> {
    let function = read_u16(data, TAG_HEADER_SIZE)?;
    let curve_type = ParametricCurveType::from_icc(function)
        .ok_or(IccError::InvalidCurve("unknown parametric function"))?;

    let params_offset = TAG_HEADER_SIZE + 4;
    let raw = (0..curve_type.param_count())
        .map(|i| read_s15f16(data, params_offset + i * 4))
        .collect::<Result<Vec<S15Fixed16>, _>>()?;
    let raw_at = |i: usize| raw.get(i).map_or(0, |v| v.0);

    let (g, a, c, d, e) = (raw_at(0), raw_at(1), raw_at(3), raw_at(4), raw_at(5));
    if g <= 0 {
        return Err(IccError::InvalidCurve("non-positive exponent"));
    }
    if a == 0 && function > 0 {
        return Err(IccError::InvalidCurve("zero scale"));
    }
    if ((c as u32) > PARAM_LIMIT && function >= 2)
        || ((d as u32) > PARAM_LIMIT && function >= 3)
        || ((e as u32) > PARAM_LIMIT && function == 4)
    {
        return Err(IccError::InvalidCurve("parameter out of range"));
    }

    if curve_type == ParametricCurveType::Gamma {
        return Ok(match g {
            0x10000 => None,
            0x1cd00 | 0x1cccd => Some(Curve::from_power(1.8)),
            0x23300 | 0x23333 => Some(Curve::adobe_rgb()),
            _ => Some(Curve::from_power(S15Fixed16(g).to_f64())),
        });
    }

    let params: Vec<f64> = raw.iter().map(|v| v.to_f64()).collect();
    let curve = ParametricCurve::from_icc(curve_type, &params)
        .ok_or(IccError::InvalidCurve("degenerate parametric curve"))?;
    Ok(Some(Curve::from_parameters(&curve)))
}
