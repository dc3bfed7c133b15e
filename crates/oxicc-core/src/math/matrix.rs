//! Homogeneous 4x4 matrix for RGB→PCS transforms
//!
//! Storage is single precision, matching the precision of the converters that
//! consume it. Inversion is carried out in f64.

use std::ops::Mul;

/// A 4x4 matrix with row-vector convention
///
/// Stored in row-major order: `m[row][col]`. For a colorant matrix the first
/// three rows hold the XYZ of the red, green and blue primaries, and the last
/// row and column are the homogeneous identity, so `xyz = rgb * M`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix4x4 {
    pub m: [[f32; 4]; 4],
}

impl Matrix4x4 {
    pub const IDENTITY: Self = Self {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Create a homogeneous matrix from the three primary rows
    #[inline]
    pub const fn from_primaries(red: [f32; 3], green: [f32; 3], blue: [f32; 3]) -> Self {
        Self {
            m: [
                [red[0], red[1], red[2], 0.0],
                [green[0], green[1], green[2], 0.0],
                [blue[0], blue[1], blue[2], 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Multiply this matrix by another matrix
    ///
    /// Returns self × other
    pub fn multiply(&self, other: &Self) -> Self {
        let mut result = [[0.0f32; 4]; 4];
        for (i, row) in result.iter_mut().enumerate() {
            for (j, v) in row.iter_mut().enumerate() {
                *v = (0..4).map(|k| self.m[i][k] * other.m[k][j]).sum();
            }
        }
        Self { m: result }
    }

    /// Transform a 3-component row vector with an implicit w of 1
    #[inline]
    pub fn transform_vec3(&self, v: [f32; 3]) -> [f32; 3] {
        let m = &self.m;
        std::array::from_fn(|j| v[0] * m[0][j] + v[1] * m[1][j] + v[2] * m[2][j] + m[3][j])
    }

    /// Invert in double precision
    ///
    /// Gauss-Jordan elimination with partial pivoting. Returns `None` when a
    /// pivot is negligible relative to the largest element, or when the result
    /// is not finite.
    pub fn inverse_precise(&self) -> Option<Self> {
        let mut a = self.m.map(|row| row.map(f64::from));
        let mut inv = Self::IDENTITY.m.map(|row| row.map(f64::from));

        let scale = a.iter().flatten().fold(0.0f64, |acc, v| acc.max(v.abs()));
        if !scale.is_finite() || scale == 0.0 {
            return None;
        }
        let tiny = scale * 1e-9;

        for col in 0..4 {
            let pivot_row = (col..4).max_by(|&x, &y| a[x][col].abs().total_cmp(&a[y][col].abs()))?;
            if a[pivot_row][col].abs() < tiny {
                return None;
            }
            a.swap(col, pivot_row);
            inv.swap(col, pivot_row);

            let p = a[col][col];
            for k in 0..4 {
                a[col][k] /= p;
                inv[col][k] /= p;
            }

            for row in 0..4 {
                if row == col {
                    continue;
                }
                let factor = a[row][col];
                if factor == 0.0 {
                    continue;
                }
                for k in 0..4 {
                    a[row][k] -= factor * a[col][k];
                    inv[row][k] -= factor * inv[col][k];
                }
            }
        }

        let result = Self {
            m: inv.map(|row| row.map(|v| v as f32)),
        };
        result.is_finite().then_some(result)
    }

    /// Check that no component is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.m.iter().flatten().all(|v| v.is_finite())
    }

    /// Check if this matrix is approximately equal to another
    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.m
            .iter()
            .flatten()
            .zip(other.m.iter().flatten())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }

    /// Check if this is approximately an identity matrix
    pub fn is_identity(&self, epsilon: f32) -> bool {
        self.approx_eq(&Self::IDENTITY, epsilon)
    }
}

impl Default for Matrix4x4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Matrix4x4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.multiply(&rhs)
    }
}
