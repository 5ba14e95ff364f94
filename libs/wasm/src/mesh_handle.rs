//! # Mesh Handle
//!
//! WASM-friendly wrapper for sticker mesh data that can be transferred to
//! JavaScript.

use sticker_mesh::StickerMesh;
use wasm_bindgen::prelude::*;

/// A handle to sticker mesh buffers that can be accessed from JavaScript.
///
/// Buffers are flattened to `f32`/`u32` and come back as typed arrays.
///
/// # Example (JavaScript)
///
/// ```javascript
/// const mesh = extrude_image(pixels, width, height, 0.1, 1.0, 128, "grid");
///
/// const geometry = new THREE.BufferGeometry();
/// geometry.setAttribute('position', new THREE.BufferAttribute(mesh.vertices(), 3));
/// geometry.setAttribute('uv', new THREE.BufferAttribute(mesh.uvs(), 2));
/// geometry.setAttribute('normal', new THREE.BufferAttribute(mesh.normals(), 3));
/// geometry.setIndex(new THREE.BufferAttribute(mesh.indices(), 1));
///
/// // Caps are full rectangles on the grid path; discard transparent texels
/// const material = new THREE.MeshStandardMaterial({ map: texture, alphaTest: 0.5 });
/// ```
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct MeshHandle {
    /// Vertex positions as [x, y, z, x, y, z, ...]
    vertices: Vec<f32>,
    /// Texture coordinates as [u, v, u, v, ...]
    uvs: Vec<f32>,
    /// Triangle indices as [i0, i1, i2, i0, i1, i2, ...]
    indices: Vec<u32>,
    /// Vertex normals as [nx, ny, nz, ...]
    normals: Vec<f32>,
    /// Contour bounds as [minX, minY, maxX, maxY] (contour strategy only)
    contour_bounds: Option<Vec<i32>>,
    /// Number of vertices
    vertex_count: u32,
    /// Number of triangles
    triangle_count: u32,
    /// Wall quads or outline segments
    wall_count: u32,
    /// Strategy name
    strategy: String,
}

#[wasm_bindgen]
impl MeshHandle {
    /// Returns the number of vertices.
    #[wasm_bindgen(getter)]
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Returns the number of triangles.
    #[wasm_bindgen(getter)]
    pub fn triangle_count(&self) -> u32 {
        self.triangle_count
    }

    /// Returns the number of wall quads (grid) or outline segments (contour).
    #[wasm_bindgen(getter)]
    pub fn wall_count(&self) -> u32 {
        self.wall_count
    }

    /// Returns `"grid"` or `"contour"`.
    #[wasm_bindgen(getter)]
    pub fn strategy(&self) -> String {
        self.strategy.clone()
    }

    /// Returns the vertex positions as a Float32Array.
    ///
    /// Length: vertex_count * 3
    pub fn vertices(&self) -> Vec<f32> {
        self.vertices.clone()
    }

    /// Returns the texture coordinates as a Float32Array.
    ///
    /// Length: vertex_count * 2
    pub fn uvs(&self) -> Vec<f32> {
        self.uvs.clone()
    }

    /// Returns the triangle indices as a Uint32Array.
    ///
    /// Length: triangle_count * 3
    pub fn indices(&self) -> Vec<u32> {
        self.indices.clone()
    }

    /// Returns the vertex normals as a Float32Array.
    pub fn normals(&self) -> Vec<f32> {
        self.normals.clone()
    }

    /// Returns `[minX, minY, maxX, maxY]` of the traced contour in pixels,
    /// or `undefined` for the grid strategy.
    pub fn contour_bounds(&self) -> Option<Vec<i32>> {
        self.contour_bounds.clone()
    }

    /// Returns true if there is nothing to render.
    pub fn is_empty(&self) -> bool {
        self.triangle_count == 0
    }
}

impl MeshHandle {
    /// Flattens a sticker mesh into GPU-ready buffers.
    pub fn from_sticker(sticker: StickerMesh) -> Self {
        let mesh = &sticker.mesh;
        let normals = mesh
            .normals_f32()
            .unwrap_or_else(|| vec![0.0; mesh.vertex_count() * 3]);

        Self {
            vertices: mesh.vertices_f32(),
            uvs: mesh.uvs_f32(),
            indices: mesh.indices_u32(),
            normals,
            contour_bounds: sticker
                .contour_bounds
                .map(|b| vec![b.min_x, b.min_y, b.max_x, b.max_y]),
            vertex_count: mesh.vertex_count() as u32,
            triangle_count: mesh.triangle_count() as u32,
            wall_count: sticker.wall_count as u32,
            strategy: sticker.strategy.to_string(),
        }
    }
}
