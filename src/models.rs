//! Pose model used throughout the solver.
//!
//! A [`Pose`] is a plain 4x4 transform. Entries are named `m{row}{col}` in
//! the external JSON format, and poses act on column vectors, so
//! `offset * pose` applies `pose` first and `offset` second.

use std::ops::Mul;

use nalgebra::{Matrix3, Matrix4, Rotation3, RowVector4, Translation3, UnitQuaternion, Vector3};

/// Rigid (or affine) 3D transform represented by a 4x4 matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub m: Matrix4<f64>,
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

impl Pose {
    pub fn new(m: Matrix4<f64>) -> Self {
        Self { m }
    }

    pub fn identity() -> Self {
        Self::new(Matrix4::identity())
    }

    /// Build a pose from 16 entries ordered `m00, m01, .., m33`.
    pub fn from_row_major(values: &[f64; 16]) -> Self {
        Self::new(Matrix4::from_row_slice(values))
    }

    /// Entries ordered `m00, m01, .., m33`.
    pub fn to_row_major(&self) -> [f64; 16] {
        let mut out = [0.0; 16];
        for r in 0..4 {
            for c in 0..4 {
                out[r * 4 + c] = self.m[(r, c)];
            }
        }
        out
    }

    pub fn from_translation(t: Vector3<f64>) -> Self {
        Self::new(Translation3::from(t).to_homogeneous())
    }

    /// Compose translation, rotation and scale as `T * R * S`.
    pub fn from_trs(
        translation: Vector3<f64>,
        rotation: UnitQuaternion<f64>,
        scale: Vector3<f64>,
    ) -> Self {
        let t = Translation3::from(translation).to_homogeneous();
        let r = rotation.to_homogeneous();
        let s = Matrix4::new_nonuniform_scaling(&scale);
        Self::new(t * r * s)
    }

    /// Cofactor expansion along the first row.
    pub fn determinant(&self) -> f64 {
        (0..4)
            .map(|c| {
                let minor = self.m.remove_row(0).remove_column(c);
                let sign = if c % 2 == 0 { 1.0 } else { -1.0 };
                sign * self.m[(0, c)] * minor.determinant()
            })
            .sum()
    }

    /// Exact test: only a cofactor determinant of exactly zero is rejected.
    /// Agrees with [`Pose::try_inverse`].
    pub fn is_invertible(&self) -> bool {
        self.try_inverse().is_some()
    }

    pub fn try_inverse(&self) -> Option<Self> {
        self.m.try_inverse().map(Self::new)
    }

    pub fn row(&self, i: usize) -> RowVector4<f64> {
        self.m.row(i).into_owned()
    }

    /// Translation part (last column).
    pub fn position(&self) -> Vector3<f64> {
        Vector3::new(self.m[(0, 3)], self.m[(1, 3)], self.m[(2, 3)])
    }

    fn linear(&self) -> Matrix3<f64> {
        self.m.fixed_view::<3, 3>(0, 0).into_owned()
    }

    /// Per-axis scale from the column norms of the linear part. A mirrored
    /// basis is reported as a negative x scale.
    pub fn lossy_scale(&self) -> Vector3<f64> {
        let linear = self.linear();
        let mut scale = Vector3::new(
            linear.column(0).norm(),
            linear.column(1).norm(),
            linear.column(2).norm(),
        );
        if linear.determinant() < 0.0 {
            scale.x = -scale.x;
        }
        scale
    }

    /// Rotation part with scale removed. Degenerate bases give the identity.
    pub fn rotation(&self) -> UnitQuaternion<f64> {
        let scale = self.lossy_scale();
        if scale.iter().any(|s| *s == 0.0 || !s.is_finite()) {
            return UnitQuaternion::identity();
        }
        let mut r = self.linear();
        for (c, s) in scale.iter().enumerate() {
            r.column_mut(c).unscale_mut(*s);
        }
        let q = UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(r));
        UnitQuaternion::new_normalize(q.into_inner())
    }
}

impl From<Matrix4<f64>> for Pose {
    fn from(m: Matrix4<f64>) -> Self {
        Self::new(m)
    }
}

impl Mul for Pose {
    type Output = Pose;

    fn mul(self, rhs: Pose) -> Pose {
        Pose::new(self.m * rhs.m)
    }
}

impl Mul<&Pose> for &Pose {
    type Output = Pose;

    fn mul(self, rhs: &Pose) -> Pose {
        Pose::new(self.m * rhs.m)
    }
}
