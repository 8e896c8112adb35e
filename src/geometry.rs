//! Procedural Geometry
//!
//! POD vertex types and the tutorial meshes: a colored cube (non-indexed
//! and indexed), a grid plane, a UV sphere, and a box with per-face
//! tangent frames for normal mapping.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Position + color + uv, the layout used by the cube tutorials.
///
/// 40-byte stride: `float4` position, `float4` color, `float2` uv.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct ColorVertex {
    pub position: [f32; 4],
    pub color: [f32; 4],
    pub uv: [f32; 2],
}

impl ColorVertex {
    pub const STRIDE: u64 = std::mem::size_of::<Self>() as u64;
    pub const POSITION_OFFSET: u64 = 0;
    pub const COLOR_OFFSET: u64 = 16;
    pub const UV_OFFSET: u64 = 32;
}

/// Position + normal + uv, for lit meshes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    pub const STRIDE: u64 = std::mem::size_of::<Self>() as u64;
}

/// Position + normal + uv + tangent + bitangent, for normal mapping.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct TangentVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    pub tangent: [f32; 3],
    pub bitangent: [f32; 3],
}

impl TangentVertex {
    pub const STRIDE: u64 = std::mem::size_of::<Self>() as u64;
}

/// One cube face: origin corner plus the two edges spanning the quad.
/// `u × v` points along the outward normal.
const CUBE_FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
    ([1.0, -1.0, 1.0], [0.0, 0.0, -2.0], [0.0, 2.0, 0.0]), // +X
    ([-1.0, -1.0, -1.0], [0.0, 0.0, 2.0], [0.0, 2.0, 0.0]), // -X
    ([-1.0, 1.0, 1.0], [2.0, 0.0, 0.0], [0.0, 0.0, -2.0]), // +Y
    ([-1.0, -1.0, -1.0], [2.0, 0.0, 0.0], [0.0, 0.0, 2.0]), // -Y
    ([-1.0, -1.0, 1.0], [2.0, 0.0, 0.0], [0.0, 2.0, 0.0]), // +Z
    ([1.0, -1.0, -1.0], [-2.0, 0.0, 0.0], [0.0, 2.0, 0.0]), // -Z
];

/// Quad corner parameters: (u factor, v factor, uv).
const QUAD_CORNERS: [(f32, f32, [f32; 2]); 6] = [
    (0.0, 0.0, [0.0, 1.0]),
    (1.0, 0.0, [1.0, 1.0]),
    (1.0, 1.0, [1.0, 0.0]),
    (0.0, 0.0, [0.0, 1.0]),
    (1.0, 1.0, [1.0, 0.0]),
    (0.0, 1.0, [0.0, 0.0]),
];

/// A unit cube (half-extent 1) of 36 colored vertices.
///
/// Colors encode the corner position mapped into `[0, 1]`.
#[must_use]
pub fn cube() -> Vec<ColorVertex> {
    let mut vertices = Vec::with_capacity(36);
    for (corner, u, v) in CUBE_FACES {
        let corner = Vec3::from(corner);
        let u = Vec3::from(u);
        let v = Vec3::from(v);
        for (fu, fv, uv) in QUAD_CORNERS {
            let p = corner + u * fu + v * fv;
            let c = p * 0.5 + Vec3::splat(0.5);
            vertices.push(ColorVertex {
                position: [p.x, p.y, p.z, 1.0],
                color: [c.x, c.y, c.z, 1.0],
                uv,
            });
        }
    }
    vertices
}

/// A unit cube as 24 unique vertices and 36 indices.
#[must_use]
pub fn cube_indexed() -> (Vec<ColorVertex>, Vec<u32>) {
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (face, (corner, u, v)) in CUBE_FACES.into_iter().enumerate() {
        let corner = Vec3::from(corner);
        let u = Vec3::from(u);
        let v = Vec3::from(v);
        let base = (face * 4) as u32;
        for (fu, fv, uv) in [
            (0.0, 0.0, [0.0, 1.0]),
            (1.0, 0.0, [1.0, 1.0]),
            (1.0, 1.0, [1.0, 0.0]),
            (0.0, 1.0, [0.0, 0.0]),
        ] {
            let p = corner + u * fu + v * fv;
            let c = p * 0.5 + Vec3::splat(0.5);
            vertices.push(ColorVertex {
                position: [p.x, p.y, p.z, 1.0],
                color: [c.x, c.y, c.z, 1.0],
                uv,
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    (vertices, indices)
}

/// An indexed grid plane on the XZ axes, normal +Y, centered at the origin.
#[must_use]
pub fn plane(width: f32, depth: f32, rows: u32, cols: u32) -> (Vec<MeshVertex>, Vec<u32>) {
    let rows = rows.max(1);
    let cols = cols.max(1);
    let mut vertices = Vec::with_capacity(((rows + 1) * (cols + 1)) as usize);
    let mut indices = Vec::with_capacity((rows * cols * 6) as usize);

    for r in 0..=rows {
        for c in 0..=cols {
            let fu = c as f32 / cols as f32;
            let fv = r as f32 / rows as f32;
            vertices.push(MeshVertex {
                position: [(fu - 0.5) * width, 0.0, (fv - 0.5) * depth],
                normal: [0.0, 1.0, 0.0],
                uv: [fu, fv],
            });
        }
    }

    let pitch = cols + 1;
    for r in 0..rows {
        for c in 0..cols {
            let i = r * pitch + c;
            indices.extend_from_slice(&[i, i + pitch, i + pitch + 1, i, i + pitch + 1, i + 1]);
        }
    }
    (vertices, indices)
}

/// An indexed UV sphere centered at the origin.
#[must_use]
pub fn sphere(radius: f32, slices: u32, stacks: u32) -> (Vec<MeshVertex>, Vec<u32>) {
    let slices = slices.max(3);
    let stacks = stacks.max(2);
    let mut vertices = Vec::with_capacity(((slices + 1) * (stacks + 1)) as usize);
    let mut indices = Vec::with_capacity((slices * stacks * 6) as usize);

    for stack in 0..=stacks {
        let fv = stack as f32 / stacks as f32;
        let phi = fv * std::f32::consts::PI;
        for slice in 0..=slices {
            let fu = slice as f32 / slices as f32;
            let theta = fu * std::f32::consts::TAU;
            let n = Vec3::new(
                phi.sin() * theta.cos(),
                phi.cos(),
                phi.sin() * theta.sin(),
            );
            vertices.push(MeshVertex {
                position: (n * radius).to_array(),
                normal: n.to_array(),
                uv: [fu, fv],
            });
        }
    }

    let pitch = slices + 1;
    for stack in 0..stacks {
        for slice in 0..slices {
            let i = stack * pitch + slice;
            indices.extend_from_slice(&[i, i + pitch, i + pitch + 1, i, i + pitch + 1, i + 1]);
        }
    }
    (vertices, indices)
}

/// A box of the given extents as 36 vertices with per-face tangent frames.
///
/// Tangent follows the U texture direction, bitangent the V direction, so
/// `tangent × bitangent = normal` on every face.
#[must_use]
pub fn box_with_tangents(width: f32, height: f32, depth: f32) -> Vec<TangentVertex> {
    let half = Vec3::new(width, height, depth) * 0.5;
    let mut vertices = Vec::with_capacity(36);
    for (corner, u, v) in CUBE_FACES {
        let corner = Vec3::from(corner) * half;
        let u = Vec3::from(u) * half;
        let v = Vec3::from(v) * half;
        let tangent = u.normalize();
        let bitangent = v.normalize();
        let normal = tangent.cross(bitangent);
        for (fu, fv, uv) in QUAD_CORNERS {
            vertices.push(TangentVertex {
                position: (corner + u * fu + v * fv).to_array(),
                normal: normal.to_array(),
                uv,
                tangent: tangent.to_array(),
                bitangent: bitangent.to_array(),
            });
        }
    }
    vertices
}
