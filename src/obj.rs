//! Wavefront OBJ Loading
//!
//! Triangulated OBJ loading via `tobj`, converted into the toolkit's Y-up
//! coordinate system: source `(x, y, z)` becomes `(x, -z, y)` for both
//! positions and normals (the minus avoids mirroring the model).

use std::path::Path;

use bytemuck::{Pod, Zeroable};

use crate::errors::Result;

/// Vertex produced by the OBJ loader: position, normal, vertex color.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct ObjVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

impl ObjVertex {
    pub const STRIDE: u64 = std::mem::size_of::<Self>() as u64;
}

/// Loads every shape from an OBJ file into one flat, non-indexed vertex
/// list.
///
/// Faces are triangulated by the parser. Missing normals fall back to +Y
/// with a warning; missing vertex colors default to white.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<ObjVertex>> {
    let path = path.as_ref();
    let (models, _materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: true,
            ..Default::default()
        },
    )?;

    let mut vertices = Vec::new();
    let mut missing_normals = false;

    for model in &models {
        let mesh = &model.mesh;
        for (i, &index) in mesh.indices.iter().enumerate() {
            let v = index as usize;
            let position = swap_axes([
                mesh.positions[3 * v],
                mesh.positions[3 * v + 1],
                mesh.positions[3 * v + 2],
            ]);

            let normal = if mesh.normals.is_empty() {
                missing_normals = true;
                [0.0, 1.0, 0.0]
            } else {
                let n = if mesh.normal_indices.is_empty() {
                    v
                } else {
                    mesh.normal_indices[i] as usize
                };
                swap_axes([
                    mesh.normals[3 * n],
                    mesh.normals[3 * n + 1],
                    mesh.normals[3 * n + 2],
                ])
            };

            let color = if mesh.vertex_color.is_empty() {
                [1.0, 1.0, 1.0]
            } else {
                [
                    mesh.vertex_color[3 * v],
                    mesh.vertex_color[3 * v + 1],
                    mesh.vertex_color[3 * v + 2],
                ]
            };

            vertices.push(ObjVertex {
                position,
                normal,
                color,
            });
        }
    }

    if missing_normals {
        log::warn!("{path:?} has no normals, defaulting to +Y");
    }
    log::info!(
        "Loaded {:?}: {} shapes, {} vertices",
        path,
        models.len(),
        vertices.len()
    );

    Ok(vertices)
}

/// Source OBJ files are Z-up; the toolkit is Y-up.
fn swap_axes([x, y, z]: [f32; 3]) -> [f32; 3] {
    [x, -z, y]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_conversion_is_y_up() {
        assert_eq!(swap_axes([1.0, 2.0, 3.0]), [1.0, -3.0, 2.0]);
    }
}
