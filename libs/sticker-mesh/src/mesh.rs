//! # Mesh Data Structure
//!
//! Core mesh representation: positions, texture coordinates, triangles,
//! and a per-vertex surface tag telling the UV projector how to map it.

use std::collections::HashMap;

use config::constants::{EPSILON, MAX_TRIANGLES, MAX_VERTICES, WELD_EPSILON};
use glam::{DVec2, DVec3, IVec2};

use crate::error::{MeshError, MeshResult};

/// Which part of the sticker a vertex belongs to.
///
/// Vertices are never shared between surfaces with different UV treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    /// Front or back cap; planar projection of the source image.
    Cap,
    /// Contour side wall; cylindrical projection.
    Wall,
    /// Grid side wall; one texture coordinate for the whole quad, taken
    /// from a corner of the wall's footprint.
    CellWall {
        /// Footprint corner on the pixel lattice, in image coordinates
        corner: IVec2,
    },
}

/// A triangle mesh with per-vertex texture coordinates.
///
/// All geometry calculations use f64 internally. Export to f32 only
/// happens at the WASM boundary for GPU rendering.
///
/// # Example
///
/// ```rust
/// use sticker_mesh::{Mesh, Surface};
/// use glam::DVec3;
///
/// let mut mesh = Mesh::new();
/// mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0), Surface::Cap);
/// mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0), Surface::Cap);
/// mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0), Surface::Cap);
/// mesh.add_triangle(0, 1, 2);
/// assert!(mesh.validate());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Vertex positions (f64 for precision)
    vertices: Vec<DVec3>,
    /// Texture coordinates, parallel to `vertices` once projected
    uvs: Vec<DVec2>,
    /// Surface tag per vertex
    surfaces: Vec<Surface>,
    /// Triangle indices (3 indices per triangle)
    triangles: Vec<[u32; 3]>,
    /// Optional vertex normals
    normals: Option<Vec<DVec3>>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            uvs: Vec::new(),
            surfaces: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
            normals: None,
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns true if the mesh is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3, surface: Surface) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        self.surfaces.push(surface);
        index
    }

    /// Adds a triangle by vertex indices.
    pub fn add_triangle(&mut self, v0: u32, v1: u32, v2: u32) {
        self.triangles.push([v0, v1, v2]);
    }

    /// Adds a quad as four fresh vertices and two triangles.
    ///
    /// Corners must be counter-clockwise when seen from the side the quad
    /// faces.
    pub fn add_quad(&mut self, corners: [DVec3; 4], surface: Surface) {
        let a = self.add_vertex(corners[0], surface);
        let b = self.add_vertex(corners[1], surface);
        let c = self.add_vertex(corners[2], surface);
        let d = self.add_vertex(corners[3], surface);
        self.add_triangle(a, b, c);
        self.add_triangle(a, c, d);
    }

    /// Returns a reference to the vertices.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Returns a reference to the triangles.
    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Returns the per-vertex surface tags.
    #[inline]
    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    /// Returns the texture coordinates (empty until projected).
    #[inline]
    pub fn uv_coords(&self) -> &[DVec2] {
        &self.uvs
    }

    /// Returns the vertex at the given index.
    #[inline]
    pub fn vertex(&self, index: u32) -> DVec3 {
        self.vertices[index as usize]
    }

    /// Sets texture coordinates, one per vertex.
    pub fn set_uvs(&mut self, uvs: Vec<DVec2>) {
        debug_assert_eq!(uvs.len(), self.vertices.len());
        self.uvs = uvs;
    }

    /// Returns the vertex normals.
    pub fn normals(&self) -> Option<&[DVec3]> {
        self.normals.as_deref()
    }

    /// Computes and sets area-weighted normals for each vertex.
    pub fn compute_normals(&mut self) {
        let mut normals = vec![DVec3::ZERO; self.vertices.len()];

        for tri in &self.triangles {
            let v0 = self.vertices[tri[0] as usize];
            let v1 = self.vertices[tri[1] as usize];
            let v2 = self.vertices[tri[2] as usize];
            let normal = (v1 - v0).cross(v2 - v0);

            normals[tri[0] as usize] += normal;
            normals[tri[1] as usize] += normal;
            normals[tri[2] as usize] += normal;
        }

        for normal in &mut normals {
            *normal = normal.normalize_or_zero();
        }

        self.normals = Some(normals);
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        if self.vertices.is_empty() {
            return (DVec3::ZERO, DVec3::ZERO);
        }

        let mut min = self.vertices[0];
        let mut max = self.vertices[0];

        for v in &self.vertices[1..] {
            min = min.min(*v);
            max = max.max(*v);
        }

        (min, max)
    }

    /// Translates the mesh by a vector.
    pub fn translate(&mut self, offset: DVec3) {
        for v in &mut self.vertices {
            *v += offset;
        }
    }

    /// Scales the mesh per axis about the origin.
    pub fn scale(&mut self, factors: DVec3) {
        for v in &mut self.vertices {
            *v *= factors;
        }
        // Normals go stale under non-uniform scale
        self.normals = None;
    }

    /// Validates the mesh for correctness.
    ///
    /// Checks:
    /// - All triangle indices are valid
    /// - No triangle repeats an index
    /// - No zero-area triangles
    ///
    /// Returns true if valid.
    pub fn validate(&self) -> bool {
        let vertex_count = self.vertices.len() as u32;

        for tri in &self.triangles {
            if tri[0] >= vertex_count || tri[1] >= vertex_count || tri[2] >= vertex_count {
                return false;
            }

            if tri[0] == tri[1] || tri[1] == tri[2] || tri[0] == tri[2] {
                return false;
            }

            let v0 = self.vertices[tri[0] as usize];
            let v1 = self.vertices[tri[1] as usize];
            let v2 = self.vertices[tri[2] as usize];
            if (v1 - v0).cross(v2 - v0).length() < EPSILON {
                return false;
            }
        }

        true
    }

    /// Fails if the mesh exceeds the configured vertex or triangle limits.
    pub fn check_limits(&self) -> MeshResult<()> {
        if self.vertices.len() > MAX_VERTICES {
            return Err(MeshError::TooManyVertices {
                count: self.vertices.len(),
                max: MAX_VERTICES,
            });
        }
        if self.triangles.len() > MAX_TRIANGLES {
            return Err(MeshError::TooManyTriangles {
                count: self.triangles.len(),
                max: MAX_TRIANGLES,
            });
        }
        Ok(())
    }

    /// Returns true if the surface is closed and consistently oriented.
    ///
    /// Positions closer than `WELD_EPSILON` are treated as one vertex, since
    /// caps and walls keep separate copies of their shared corners. Every
    /// undirected edge must then be used by exactly two triangles, once in
    /// each direction.
    pub fn is_watertight(&self) -> bool {
        if self.triangles.is_empty() {
            return false;
        }

        let mut welded: HashMap<[i64; 3], u32> = HashMap::new();
        let mut remap = Vec::with_capacity(self.vertices.len());
        for v in &self.vertices {
            let key = [
                (v.x / WELD_EPSILON).round() as i64,
                (v.y / WELD_EPSILON).round() as i64,
                (v.z / WELD_EPSILON).round() as i64,
            ];
            let next = welded.len() as u32;
            remap.push(*welded.entry(key).or_insert(next));
        }

        let mut directed: HashMap<(u32, u32), usize> = HashMap::new();
        for tri in &self.triangles {
            let ids = tri.map(|i| remap[i as usize]);
            if ids[0] == ids[1] || ids[1] == ids[2] || ids[0] == ids[2] {
                return false;
            }
            for k in 0..3 {
                *directed.entry((ids[k], ids[(k + 1) % 3])).or_insert(0) += 1;
            }
        }

        directed
            .iter()
            .all(|(&(a, b), &count)| count == 1 && directed.get(&(b, a)) == Some(&1))
    }

    /// Positions as plain arrays.
    pub fn positions(&self) -> Vec<[f64; 3]> {
        self.vertices.iter().map(|v| v.to_array()).collect()
    }

    /// Texture coordinates as plain arrays.
    pub fn uvs(&self) -> Vec<[f64; 2]> {
        self.uvs.iter().map(|uv| uv.to_array()).collect()
    }

    /// Flattened triangle indices.
    pub fn indices(&self) -> Vec<u32> {
        self.indices_u32()
    }

    /// Exports vertices as f32 array for GPU.
    ///
    /// Returns flattened [x, y, z, x, y, z, ...] array.
    pub fn vertices_f32(&self) -> Vec<f32> {
        let mut result = Vec::with_capacity(self.vertices.len() * 3);
        for v in &self.vertices {
            result.push(v.x as f32);
            result.push(v.y as f32);
            result.push(v.z as f32);
        }
        result
    }

    /// Exports texture coordinates as f32 array for GPU.
    ///
    /// Returns flattened [u, v, u, v, ...] array.
    pub fn uvs_f32(&self) -> Vec<f32> {
        let mut result = Vec::with_capacity(self.uvs.len() * 2);
        for uv in &self.uvs {
            result.push(uv.x as f32);
            result.push(uv.y as f32);
        }
        result
    }

    /// Exports triangle indices as u32 array for GPU.
    ///
    /// Returns flattened [i0, i1, i2, i0, i1, i2, ...] array.
    pub fn indices_u32(&self) -> Vec<u32> {
        let mut result = Vec::with_capacity(self.triangles.len() * 3);
        for tri in &self.triangles {
            result.extend_from_slice(tri);
        }
        result
    }

    /// Exports normals as f32 array for GPU.
    pub fn normals_f32(&self) -> Option<Vec<f32>> {
        self.normals.as_ref().map(|normals| {
            let mut result = Vec::with_capacity(normals.len() * 3);
            for n in normals {
                result.push(n.x as f32);
                result.push(n.y as f32);
                result.push(n.z as f32);
            }
            result
        })
    }
}
