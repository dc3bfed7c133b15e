//! Transfer function evaluation
//!
//! This module provides:
//! - sRGB gamma encode/decode
//! - Pure power curves
//! - The ICC parametric curve family (types 0-4), evaluated in both directions

/// sRGB gamma decode (encoded → linear)
///
/// Uses the IEC 61966-2-1 transfer function.
#[inline]
pub fn srgb_gamma_decode(encoded: f64) -> f64 {
    if encoded <= 0.04045 {
        encoded / 12.92
    } else {
        ((encoded + 0.055) / 1.055).powf(2.4)
    }
}

/// sRGB gamma encode (linear → encoded)
#[inline]
pub fn srgb_gamma_encode(linear: f64) -> f64 {
    if linear <= 0.0031308 {
        linear * 12.92
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

/// Power function decode: y = x^gamma
#[inline]
pub fn gamma_decode(encoded: f64, gamma: f64) -> f64 {
    if encoded <= 0.0 {
        0.0
    } else {
        encoded.powf(gamma)
    }
}

/// Power function encode: y = x^(1/gamma)
#[inline]
pub fn gamma_encode(linear: f64, gamma: f64) -> f64 {
    if linear <= 0.0 {
        0.0
    } else {
        linear.powf(1.0 / gamma)
    }
}

/// ICC Parametric Curve Type
///
/// As defined in ICC.1:2010 Section 10.15
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParametricCurveType {
    /// Type 0: Y = X^g
    Gamma,
    /// Type 1: Y = (aX + b)^g  if X >= -b/a, else 0
    CIE122,
    /// Type 2: Y = (aX + b)^g + c  if X >= -b/a, else c
    IEC61966_3,
    /// Type 3: Y = (aX + b)^g  if X >= d, else cX (sRGB-like)
    IEC61966_2_1,
    /// Type 4: Y = (aX + b)^g + e  if X >= d, else cX + f
    Full,
}

impl ParametricCurveType {
    /// Get the function type from ICC value
    pub fn from_icc(function_type: u16) -> Option<Self> {
        match function_type {
            0 => Some(Self::Gamma),
            1 => Some(Self::CIE122),
            2 => Some(Self::IEC61966_3),
            3 => Some(Self::IEC61966_2_1),
            4 => Some(Self::Full),
            _ => None,
        }
    }

    /// Get the number of parameters required
    pub fn param_count(&self) -> usize {
        match self {
            Self::Gamma => 1,
            Self::CIE122 => 3,
            Self::IEC61966_3 => 4,
            Self::IEC61966_2_1 => 5,
            Self::Full => 7,
        }
    }
}

/// A parametric curve in the general (type 4) form
///
/// `Y = (aX + b)^g + e` for `X >= d`, otherwise `Y = cX + f`.
/// Every ICC subtype is rewritten into this shape when constructed, so
/// evaluation does not branch on the subtype.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParametricCurve {
    pub g: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl ParametricCurve {
    /// Pure power curve
    pub fn gamma(g: f64) -> Self {
        Self {
            g,
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 0.0,
            e: 0.0,
            f: 0.0,
        }
    }

    /// The sRGB transfer function
    pub fn srgb() -> Self {
        Self {
            g: 2.4,
            a: 1.0 / 1.055,
            b: 0.055 / 1.055,
            c: 1.0 / 12.92,
            d: 0.04045,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Build from the parameters of an ICC `para` tag
    ///
    /// `params` holds `g, a, b, c, d, e, f` in tag order, as many as the
    /// subtype defines. Returns `None` if too few are given, or if `a` is zero
    /// for a subtype whose breakpoint is derived from it.
    pub fn from_icc(curve_type: ParametricCurveType, params: &[f64]) -> Option<Self> {
        if params.len() < curve_type.param_count() {
            return None;
        }
        let p = |i: usize| params[i];

        let curve = match curve_type {
            ParametricCurveType::Gamma => Self::gamma(p(0)),
            ParametricCurveType::CIE122 | ParametricCurveType::IEC61966_3 => {
                if p(1) == 0.0 {
                    return None;
                }
                // The constant term applies on both sides of the breakpoint
                let offset = if curve_type == ParametricCurveType::IEC61966_3 {
                    p(3)
                } else {
                    0.0
                };
                Self {
                    g: p(0),
                    a: p(1),
                    b: p(2),
                    c: 0.0,
                    d: -p(2) / p(1),
                    e: offset,
                    f: offset,
                }
            }
            ParametricCurveType::IEC61966_2_1 => Self {
                g: p(0),
                a: p(1),
                b: p(2),
                c: p(3),
                d: p(4),
                e: 0.0,
                f: 0.0,
            },
            ParametricCurveType::Full => Self {
                g: p(0),
                a: p(1),
                b: p(2),
                c: p(3),
                d: p(4),
                e: p(5),
                f: p(6),
            },
        };
        Some(curve)
    }

    /// Encoded → linear
    #[inline]
    pub fn decode(&self, x: f64) -> f64 {
        if x >= self.d {
            (self.a * x + self.b).max(0.0).powf(self.g) + self.e
        } else {
            self.c * x + self.f
        }
    }

    /// Linear → encoded, the algebraic inverse of [`decode`](Self::decode)
    #[inline]
    pub fn encode(&self, y: f64) -> f64 {
        if y > self.c * self.d + self.f {
            ((y - self.e).max(0.0).powf(1.0 / self.g) - self.b) / self.a
        } else if self.c == 0.0 {
            0.0
        } else {
            (y - self.f) / self.c
        }
    }

    /// Whether this curve is the sRGB transfer function within `tolerance`
    pub fn is_srgb(&self, tolerance: f64) -> bool {
        let srgb = Self::srgb();
        let close = |a: f64, b: f64| (a - b).abs() <= tolerance;
        close(self.g, srgb.g)
            && close(self.d, srgb.d)
            && close(self.a, srgb.a)
            && close(self.b, srgb.b)
            && close(self.c, srgb.c)
            && close(self.e, 0.0)
            && close(self.f, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_srgb_gamma_roundtrip() {
        for i in 0..=255 {
            let encoded = i as f64 / 255.0;
            let roundtrip = srgb_gamma_encode(srgb_gamma_decode(encoded));
            assert!(
                (roundtrip - encoded).abs() < 1e-10,
                "sRGB roundtrip failed at {}",
                i
            );
        }
    }

    #[test]
    fn test_srgb_known_values() {
        assert!(srgb_gamma_decode(0.0).abs() < EPSILON);
        assert!((srgb_gamma_decode(1.0) - 1.0).abs() < EPSILON);
        let mid = srgb_gamma_decode(0.5);
        assert!(mid > 0.21 && mid < 0.22, "Mid-gray decode: {}", mid);
    }

    #[test]
    fn test_power_functions() {
        assert_eq!(gamma_decode(-0.5, 2.2), 0.0);
        assert_eq!(gamma_encode(0.0, 2.2), 0.0);
        let y = gamma_decode(0.5, 2.2);
        assert!((gamma_encode(y, 2.2) - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_parametric_srgb_matches_closed_form() {
        let curve = ParametricCurve::srgb();
        for i in 0..=100 {
            let x = i as f64 / 100.0;
            assert!((curve.decode(x) - srgb_gamma_decode(x)).abs() < 1e-6);
            assert!((curve.encode(x) - srgb_gamma_encode(x)).abs() < 1e-5);
        }
        assert!(curve.is_srgb(1e-4));
        assert!(!ParametricCurve::gamma(2.4).is_srgb(1e-4));
    }

    #[test]
    fn test_type2_offset_applies_below_breakpoint() {
        // Y = (0.5X + 0.1)^1 + 0.2, breakpoint at -0.2 so X=0 is on the power side
        let curve =
            ParametricCurve::from_icc(ParametricCurveType::IEC61966_3, &[1.0, 0.5, 0.1, 0.2])
                .unwrap();
        assert!((curve.decode(0.0) - 0.3).abs() < EPSILON);
        assert!((curve.decode(1.0) - 0.8).abs() < EPSILON);
        assert!((curve.encode(0.8) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_type1_clips_below_breakpoint() {
        // Breakpoint at X = 0.25
        let curve =
            ParametricCurve::from_icc(ParametricCurveType::CIE122, &[2.0, 1.0, -0.25]).unwrap();
        assert!((curve.d - 0.25).abs() < EPSILON);
        assert_eq!(curve.decode(0.1), 0.0);
        assert!((curve.decode(0.75) - 0.25).abs() < EPSILON);
        assert!((curve.encode(0.25) - 0.75).abs() < EPSILON);
    }

    #[test]
    fn test_from_icc_rejects_short_or_degenerate() {
        assert!(ParametricCurve::from_icc(ParametricCurveType::Full, &[1.0; 5]).is_none());
        assert!(ParametricCurve::from_icc(ParametricCurveType::CIE122, &[1.0, 0.0, 0.0]).is_none());
        assert_eq!(ParametricCurveType::from_icc(5), None);
        assert_eq!(ParametricCurveType::from_icc(3).map(|t| t.param_count()), Some(5));
    }

    #[test]
    fn test_type4_roundtrip() {
        let curve = ParametricCurve::from_icc(
            ParametricCurveType::Full,
            &[2.2, 0.9, 0.1, 0.05, 0.1, 0.01, 0.002],
        )
        .unwrap();
        for i in 0..=20 {
            let x = 0.1 + 0.9 * i as f64 / 20.0;
            let y = curve.decode(x);
            assert!((curve.encode(y) - x).abs() < 1e-9, "x={x}");
        }
    }
}
