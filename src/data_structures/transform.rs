//! Per-draw model transform.
//!
//! A [`Transform`] is authored the way scene objects are placed by hand:
//! a non-uniform scale, three Euler angles in degrees and a translation.

use cgmath::{Deg, Matrix4, Vector3};

/// Scale, XYZ rotation (degrees) and translation of one draw call.
///
/// The fields are plain arrays so that scene tables can be `const`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub scale: [f32; 3],
    pub rotation_degrees: [f32; 3],
    pub translation: [f32; 3],
}

impl Transform {
    /// Identity transform (unit scale, no rotation, no translation).
    pub const IDENTITY: Self = Self {
        scale: [1.0, 1.0, 1.0],
        rotation_degrees: [0.0, 0.0, 0.0],
        translation: [0.0, 0.0, 0.0],
    };

    pub const fn new(scale: [f32; 3], rotation_degrees: [f32; 3], translation: [f32; 3]) -> Self {
        Self {
            scale,
            rotation_degrees,
            translation,
        }
    }

    /// Model matrix `T * Rx * Ry * Rz * S`.
    ///
    /// The product order is fixed: scale is applied first, then Z, Y and X
    /// rotations, then translation.
    pub fn to_matrix(&self) -> Matrix4<f32> {
        let [sx, sy, sz] = self.scale;
        let [rx, ry, rz] = self.rotation_degrees;
        Matrix4::from_translation(Vector3::from(self.translation))
            * Matrix4::from_angle_x(Deg(rx))
            * Matrix4::from_angle_y(Deg(ry))
            * Matrix4::from_angle_z(Deg(rz))
            * Matrix4::from_nonuniform_scale(sx, sy, sz)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Transform> for Matrix4<f32> {
    fn from(transform: Transform) -> Self {
        transform.to_matrix()
    }
}
