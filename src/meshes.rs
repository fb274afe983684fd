//! Static Mesh Assets
//!
//! Simple data containers that ship alongside the bake pipelines: a
//! procedurally generated textured cube and a PLY-file-backed triangle mesh
//! (the Stanford dragon in the reference assets) with derivable vertex
//! normals and planar UV projection. None of this participates in the
//! precomputation core.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use ply_rs::parser::Parser;
use ply_rs::ply::{DefaultElement, Property};

use crate::errors::{BakeError, Result};

// ============================================================================
// Textured cube
// ============================================================================

/// Interleaved float count per textured-cube vertex: position (4), color (4),
/// uv (2).
pub const CUBE_FLOATS_PER_VERTEX: usize = 10;

/// Non-indexed textured cube: 36 vertices, interleaved position/color/uv.
pub struct TexturedCubeMesh {
    pub vertex_array: [f32; 36 * CUBE_FLOATS_PER_VERTEX],
}

impl TexturedCubeMesh {
    /// Byte stride of one vertex.
    pub const VERTEX_SIZE: u64 = (CUBE_FLOATS_PER_VERTEX * size_of::<f32>()) as u64;
    /// Byte offset of the vec4 position attribute.
    pub const POSITION_OFFSET: u64 = 0;
    /// Byte offset of the vec4 color attribute.
    pub const COLOR_OFFSET: u64 = 4 * size_of::<f32>() as u64;
    /// Byte offset of the vec2 uv attribute.
    pub const UV_OFFSET: u64 = 8 * size_of::<f32>() as u64;
    /// Vertex count (6 faces, 2 triangles each, non-indexed).
    pub const VERTEX_COUNT: u32 = 36;

    #[must_use]
    #[allow(clippy::too_many_lines)]
    pub fn new() -> Self {
        // Corner positions per face, CCW, 2 triangles each. Color derives
        // from the corner position; uv is the standard per-face quad.
        const FACE_CORNERS: [[[f32; 3]; 4]; 6] = [
            // +X
            [[1., -1., -1.], [1., 1., -1.], [1., 1., 1.], [1., -1., 1.]],
            // -X
            [[-1., -1., 1.], [-1., 1., 1.], [-1., 1., -1.], [-1., -1., -1.]],
            // +Y
            [[-1., 1., -1.], [-1., 1., 1.], [1., 1., 1.], [1., 1., -1.]],
            // -Y
            [[-1., -1., 1.], [-1., -1., -1.], [1., -1., -1.], [1., -1., 1.]],
            // +Z
            [[-1., -1., 1.], [1., -1., 1.], [1., 1., 1.], [-1., 1., 1.]],
            // -Z
            [[1., -1., -1.], [-1., -1., -1.], [-1., 1., -1.], [1., 1., -1.]],
        ];
        const CORNER_UVS: [[f32; 2]; 4] = [[0., 1.], [1., 1.], [1., 0.], [0., 0.]];
        const QUAD: [usize; 6] = [0, 1, 2, 0, 2, 3];

        let mut vertex_array = [0.0f32; 36 * CUBE_FLOATS_PER_VERTEX];
        let mut cursor = 0;
        for corners in &FACE_CORNERS {
            for &i in &QUAD {
                let p = corners[i];
                let uv = CORNER_UVS[i];
                let v = &mut vertex_array[cursor..cursor + CUBE_FLOATS_PER_VERTEX];
                v[..3].copy_from_slice(&p);
                v[3] = 1.0;
                // Color from the corner position, remapped to [0, 1]
                v[4] = p[0] * 0.5 + 0.5;
                v[5] = p[1] * 0.5 + 0.5;
                v[6] = p[2] * 0.5 + 0.5;
                v[7] = 1.0;
                v[8..10].copy_from_slice(&uv);
                cursor += CUBE_FLOATS_PER_VERTEX;
            }
        }

        Self { vertex_array }
    }
}

impl Default for TexturedCubeMesh {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// PLY-backed triangle mesh
// ============================================================================

/// Uniform scale applied to PLY positions on load (the reference dragon
/// asset is authored at a tiny scale).
pub const PLY_MESH_SCALE: f32 = 500.0;

/// Plane onto which [`TriangleMesh::projected_plane_uvs`] flattens positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectedPlane {
    Xy,
    Xz,
    Yz,
}

/// Indexed triangle mesh loaded from a PLY file, with room for derived
/// normals and uvs.
pub struct TriangleMesh {
    pub positions: Vec<[f32; 3]>,
    pub triangles: Vec<[u16; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
}

impl TriangleMesh {
    /// Reads positions and triangle indices from a PLY file, scales by
    /// [`PLY_MESH_SCALE`], then derives normals and XY-projected uvs.
    pub fn load_ply(path: &Path) -> Result<Self> {
        let mut reader = BufReader::new(File::open(path)?);
        let ply = Parser::<DefaultElement>::new().read_ply(&mut reader)?;

        let vertex_elems = ply
            .payload
            .get("vertex")
            .ok_or_else(|| BakeError::MeshError("PLY file has no vertex element".into()))?;
        let face_elems = ply
            .payload
            .get("face")
            .ok_or_else(|| BakeError::MeshError("PLY file has no face element".into()))?;

        let mut positions = Vec::with_capacity(vertex_elems.len());
        for elem in vertex_elems {
            positions.push([
                scalar_f32(elem, "x")? * PLY_MESH_SCALE,
                scalar_f32(elem, "y")? * PLY_MESH_SCALE,
                scalar_f32(elem, "z")? * PLY_MESH_SCALE,
            ]);
        }

        let mut triangles = Vec::with_capacity(face_elems.len());
        for elem in face_elems {
            let indices = index_list(elem)?;
            if indices.len() != 3 {
                return Err(BakeError::MeshError(format!(
                    "PLY face is not a triangle ({} indices)",
                    indices.len()
                )));
            }
            triangles.push([indices[0], indices[1], indices[2]]);
        }

        let normals = compute_surface_normals(&positions, &triangles);

        let mut mesh = Self {
            positions,
            triangles,
            normals,
            uvs: Vec::new(),
        };
        mesh.projected_plane_uvs(ProjectedPlane::Xy);
        Ok(mesh)
    }

    /// Replaces the uvs with a planar projection of the positions, rescaled
    /// to [0, 1] over the mesh extent.
    pub fn projected_plane_uvs(&mut self, plane: ProjectedPlane) {
        let (u_axis, v_axis) = match plane {
            ProjectedPlane::Xy => (0, 1),
            ProjectedPlane::Xz => (0, 2),
            ProjectedPlane::Yz => (1, 2),
        };

        let mut min = [f32::INFINITY; 2];
        let mut max = [f32::NEG_INFINITY; 2];
        for p in &self.positions {
            let uv = [p[u_axis], p[v_axis]];
            for i in 0..2 {
                min[i] = min[i].min(uv[i]);
                max[i] = max[i].max(uv[i]);
            }
        }

        let extent = [(max[0] - min[0]).max(f32::EPSILON), (max[1] - min[1]).max(f32::EPSILON)];
        self.uvs = self
            .positions
            .iter()
            .map(|p| {
                [
                    (p[u_axis] - min[0]) / extent[0],
                    (p[v_axis] - min[1]) / extent[1],
                ]
            })
            .collect();
    }
}

/// Area-weighted vertex normals: accumulates the unnormalized face cross
/// products, then normalizes per vertex.
#[must_use]
pub fn compute_surface_normals(
    positions: &[[f32; 3]],
    triangles: &[[u16; 3]],
) -> Vec<[f32; 3]> {
    use glam::Vec3;

    let mut normals = vec![Vec3::ZERO; positions.len()];
    for tri in triangles {
        let [i0, i1, i2] = tri.map(usize::from);
        let p0 = Vec3::from_array(positions[i0]);
        let p1 = Vec3::from_array(positions[i1]);
        let p2 = Vec3::from_array(positions[i2]);
        let face_normal = (p1 - p0).cross(p2 - p0);
        normals[i0] += face_normal;
        normals[i1] += face_normal;
        normals[i2] += face_normal;
    }
    normals
        .into_iter()
        .map(|n| n.normalize_or_zero().to_array())
        .collect()
}

fn scalar_f32(elem: &DefaultElement, key: &str) -> Result<f32> {
    match elem.get(key) {
        Some(Property::Float(v)) => Ok(*v),
        Some(Property::Double(v)) => Ok(*v as f32),
        _ => Err(BakeError::MeshError(format!(
            "PLY vertex property '{key}' missing or not a float"
        ))),
    }
}

fn index_list(elem: &DefaultElement) -> Result<Vec<u16>> {
    let prop = elem
        .get("vertex_indices")
        .or_else(|| elem.get("vertex_index"))
        .ok_or_else(|| BakeError::MeshError("PLY face has no vertex index list".into()))?;

    let to_u16 = |v: i64| -> Result<u16> {
        u16::try_from(v)
            .map_err(|_| BakeError::MeshError(format!("PLY vertex index {v} out of u16 range")))
    };

    match prop {
        Property::ListUShort(list) => Ok(list.clone()),
        Property::ListInt(list) => list.iter().map(|&v| to_u16(i64::from(v))).collect(),
        Property::ListUInt(list) => list.iter().map(|&v| to_u16(i64::from(v))).collect(),
        _ => Err(BakeError::MeshError(
            "PLY face index list has an unsupported type".into(),
        )),
    }
}
