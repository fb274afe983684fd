//! Cube-Face Transform Tests
//!
//! Tests for:
//! - Face enumeration and index round-trips
//! - View matrices being distinct pure rotations
//! - The shared 90° square projection

use glam::{Mat4, Vec3, Vec4};

use ibl_bake::CubeFace;
use ibl_bake::cube::{self, FACE_COUNT, face_matrices, face_projection};

const EPSILON: f32 = 1e-5;

// ============================================================================
// Enumeration
// ============================================================================

#[test]
fn canonical_order_and_index_round_trip() {
    assert_eq!(CubeFace::ALL.len(), FACE_COUNT);
    for (i, face) in CubeFace::ALL.into_iter().enumerate() {
        assert_eq!(face.index(), i as u32);
        assert_eq!(CubeFace::from_index(i as u32), Some(face));
    }
    assert_eq!(CubeFace::from_index(6), None);
}

#[test]
fn face_order_matches_cube_map_layer_convention() {
    assert_eq!(CubeFace::ALL[0], CubeFace::PositiveX);
    assert_eq!(CubeFace::ALL[1], CubeFace::NegativeX);
    assert_eq!(CubeFace::ALL[2], CubeFace::PositiveY);
    assert_eq!(CubeFace::ALL[3], CubeFace::NegativeY);
    assert_eq!(CubeFace::ALL[4], CubeFace::PositiveZ);
    assert_eq!(CubeFace::ALL[5], CubeFace::NegativeZ);
}

// ============================================================================
// View matrices
// ============================================================================

#[test]
fn exactly_six_matrices_in_face_order() {
    let matrices = face_matrices();
    assert_eq!(matrices.len(), FACE_COUNT);
    for (i, face) in CubeFace::ALL.into_iter().enumerate() {
        assert!(matrices[i].abs_diff_eq(face.view_matrix(), EPSILON));
    }
}

#[test]
fn view_matrices_are_pure_rotations() {
    for face in CubeFace::ALL {
        let m = face.view_matrix();
        // determinant 1, no translation
        assert!((m.determinant() - 1.0).abs() < EPSILON);
        assert!(m.w_axis.abs_diff_eq(Vec4::new(0.0, 0.0, 0.0, 1.0), EPSILON));
    }
}

#[test]
fn view_matrices_are_pairwise_distinct() {
    let matrices = face_matrices();
    for i in 0..FACE_COUNT {
        for j in (i + 1)..FACE_COUNT {
            assert!(
                !matrices[i].abs_diff_eq(matrices[j], EPSILON),
                "faces {i} and {j} share a view matrix"
            );
        }
    }
}

#[test]
fn each_face_looks_down_a_distinct_axis() {
    // The rotated forward vectors must hit all six axis directions.
    let forward = Vec3::new(0.0, 0.0, -1.0);
    let directions: Vec<Vec3> = CubeFace::ALL
        .into_iter()
        .map(|f| f.view_matrix().transform_vector3(forward))
        .collect();

    for dir in &directions {
        assert!((dir.length() - 1.0).abs() < EPSILON);
        // each direction is axis-aligned
        let abs = dir.abs();
        let max = abs.x.max(abs.y).max(abs.z);
        assert!((max - 1.0).abs() < EPSILON);
    }

    // pairwise distinct covers all 6 axis directions
    for i in 0..directions.len() {
        for j in (i + 1)..directions.len() {
            assert!(directions[i].distance(directions[j]) > 0.5);
        }
    }
}

// ============================================================================
// Projection
// ============================================================================

#[test]
fn projection_is_square_90_degrees() {
    let p = face_projection();
    let expected = Mat4::perspective_rh(
        std::f32::consts::FRAC_PI_2,
        1.0,
        cube::FACE_NEAR,
        cube::FACE_FAR,
    );
    assert!(p.abs_diff_eq(expected, EPSILON));
    // square aspect: equal focal terms on x and y
    assert!((p.x_axis.x - p.y_axis.y).abs() < EPSILON);
}

#[test]
fn projection_constants() {
    assert!((cube::FACE_FOV_Y - std::f32::consts::FRAC_PI_2).abs() < EPSILON);
    assert!((cube::FACE_NEAR - 0.1).abs() < EPSILON);
    assert!((cube::FACE_FAR - 512.0).abs() < EPSILON);
}
