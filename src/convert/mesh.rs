use nalgebra::Vector3;

use super::error::StructuralError;
use super::normals::{reconstruct_normals, triangulate};
use super::skinning::pack_skin_weights;
use super::types::{BabylonMesh, BabylonSkeleton, BabylonSubmesh, ValidationIssue};
use crate::document::Mhx2Geometry;

/// Assemble one Babylon mesh record from an MHX2 geometry.
///
/// Positions receive the geometry's placement offset; normals are
/// reconstructed from the un-offset vertices (translation does not change
/// them). Skin buffers are attached only when the document has a skeleton
/// and the geometry carries a weight table.
pub(super) fn assemble_mesh(
    geometry: &Mhx2Geometry,
    skeleton: Option<&BabylonSkeleton>,
    parent: Option<&str>,
    issues: &mut Vec<ValidationIssue>,
) -> Result<BabylonMesh, StructuralError> {
    let source = &geometry.mesh;
    let offset = Vector3::from(geometry.offset);

    let mut mesh = BabylonMesh::new(&geometry.name, &geometry.material);
    mesh.parent_id = parent.map(ToOwned::to_owned);

    mesh.uv.reserve(source.uv_coordinates.len() * 2);
    for pair in &source.uv_coordinates {
        mesh.uv.extend_from_slice(pair);
    }

    mesh.positions.reserve(source.vertices.len() * 3);
    for vertex in &source.vertices {
        let placed = Vector3::from(*vertex) + offset;
        mesh.positions.extend_from_slice(&[placed.x, placed.y, placed.z]);
    }

    mesh.indices = triangulate(&source.faces, source.vertices.len())?;
    mesh.normals = reconstruct_normals(&source.vertices, &source.faces, issues)?;

    // One submesh spanning the whole mesh; MHX2 geometries are single-material.
    mesh.submeshes = vec![BabylonSubmesh {
        material_index: 0,
        vertices_start: 0,
        vertices_stop: source.vertices.len() as u32,
        index_start: 0,
        index_stop: mesh.indices.len() as u32,
    }];

    if let Some(skeleton) = skeleton {
        mesh.skeleton_id = Some(skeleton.id);

        if let Some(weights) = &source.weights {
            let packed = pack_skin_weights(
                weights,
                &skeleton.bone_indices(),
                source.vertices.len(),
                issues,
            )?;
            if let Some(buffers) = packed {
                mesh.matrices_indices = Some(buffers.matrices_indices);
                mesh.matrices_weights = Some(buffers.matrices_weights);
                mesh.matrices_indices_extra = buffers.matrices_indices_extra;
                mesh.matrices_weights_extra = buffers.matrices_weights_extra;
            }
        }
    }

    Ok(mesh)
}

// ─── Tests ────────────────────────────────────────────────────────────────────
