//! Cube-Face View Transforms
//!
//! Derives the six fixed view-rotation matrices (one per cube face) and the
//! shared square projection used by both convolution passes. Construction is
//! pure and deterministic.
//!
//! The rotations are hard-coded per face and match the conventional cube-map
//! orientation, so convolved results line up with the source skybox.

use glam::Mat4;

/// Number of faces in a cube map.
pub const FACE_COUNT: usize = 6;

/// Vertical field of view of the face projection (90°, one cube face).
pub const FACE_FOV_Y: f32 = std::f32::consts::FRAC_PI_2;

/// Near plane of the face projection.
pub const FACE_NEAR: f32 = 0.1;

/// Far plane of the face projection. A convention inherited from the
/// environment-cube capture setup, not a physical requirement.
pub const FACE_FAR: f32 = 512.0;

/// One of the six cube-map faces, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubeFace {
    PositiveX,
    NegativeX,
    PositiveY,
    NegativeY,
    PositiveZ,
    NegativeZ,
}

impl CubeFace {
    /// All faces in the fixed canonical order used everywhere in this crate.
    pub const ALL: [CubeFace; FACE_COUNT] = [
        CubeFace::PositiveX,
        CubeFace::NegativeX,
        CubeFace::PositiveY,
        CubeFace::NegativeY,
        CubeFace::PositiveZ,
        CubeFace::NegativeZ,
    ];

    /// Index of this face in the canonical order (also its array layer).
    #[must_use]
    pub fn index(self) -> u32 {
        self as u32
    }

    #[must_use]
    pub fn from_index(index: u32) -> Option<CubeFace> {
        Self::ALL.get(index as usize).copied()
    }

    /// View rotation that orients the capture camera towards this face.
    #[must_use]
    pub fn view_matrix(self) -> Mat4 {
        let deg = f32::to_radians;
        match self {
            CubeFace::PositiveX => {
                Mat4::from_rotation_y(deg(90.0)) * Mat4::from_rotation_x(deg(180.0))
            }
            CubeFace::NegativeX => {
                Mat4::from_rotation_y(deg(-90.0)) * Mat4::from_rotation_x(deg(180.0))
            }
            CubeFace::PositiveY => Mat4::from_rotation_x(deg(90.0)),
            CubeFace::NegativeY => Mat4::from_rotation_x(deg(-90.0)),
            CubeFace::PositiveZ => Mat4::from_rotation_x(deg(180.0)),
            CubeFace::NegativeZ => Mat4::from_rotation_z(deg(180.0)),
        }
    }
}

/// The six view matrices in canonical face order.
#[must_use]
pub fn face_matrices() -> [Mat4; FACE_COUNT] {
    CubeFace::ALL.map(CubeFace::view_matrix)
}

/// The shared 90°-FOV square projection paired with every face view.
#[must_use]
pub fn face_projection() -> Mat4 {
    Mat4::perspective_rh(FACE_FOV_Y, 1.0, FACE_NEAR, FACE_FAR)
}
