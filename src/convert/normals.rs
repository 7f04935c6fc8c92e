use nalgebra::Vector3;

use super::error::StructuralError;
use super::types::{Severity, ValidationIssue};

// ─── Face validation ──────────────────────────────────────────────────────────

/// Validate one face as a quad with in-range indices.
fn quad_indices(face: &[u32], vertex_count: usize) -> Result<[u32; 4], StructuralError> {
    let quad: [u32; 4] = face
        .try_into()
        .map_err(|_| StructuralError::NonQuadFace(face.len()))?;

    for &index in &quad {
        if index as usize >= vertex_count {
            return Err(StructuralError::FaceIndexOutOfRange {
                index,
                vertex_count,
            });
        }
    }

    Ok(quad)
}

// ─── Triangulation ────────────────────────────────────────────────────────────

/// Triangulate quad faces into a flat index buffer.
///
/// Each quad `(a, b, c, d)` becomes the triangles `(d, b, a)` and `(d, c, b)`.
/// The reversal relative to the source winding is required because MHX2 and
/// Babylon use opposite front-face conventions.
pub(super) fn triangulate(
    faces: &[Vec<u32>],
    vertex_count: usize,
) -> Result<Vec<u32>, StructuralError> {
    let mut indices = Vec::with_capacity(faces.len() * 6);

    for face in faces {
        let [a, b, c, d] = quad_indices(face, vertex_count)?;
        indices.extend_from_slice(&[d, b, a]);
        indices.extend_from_slice(&[d, c, b]);
    }

    Ok(indices)
}

// ─── Normal reconstruction ────────────────────────────────────────────────────

/// Reconstruct per-vertex shading normals from the quad face list.
///
/// Every face's un-normalized normal (`cross(b - a, d - a)`) is accumulated
/// at all four of its vertex indices, so larger faces contribute
/// proportionally more. The output buffer covers every vertex of the position
/// buffer in order: vertices with no adjacent faces, and vertices whose
/// accumulated normals cancel exactly, fall back to a zero normal and raise
/// one warning for the whole mesh.
pub(super) fn reconstruct_normals(
    vertices: &[[f32; 3]],
    faces: &[Vec<u32>],
    issues: &mut Vec<ValidationIssue>,
) -> Result<Vec<f32>, StructuralError> {
    let mut accumulated = vec![Vector3::<f32>::zeros(); vertices.len()];
    let mut touched = vec![false; vertices.len()];

    for face in faces {
        let [a, b, c, d] = quad_indices(face, vertices.len())?;

        let origin = Vector3::from(vertices[a as usize]);
        let edge_ab = Vector3::from(vertices[b as usize]) - origin;
        let edge_ad = Vector3::from(vertices[d as usize]) - origin;
        let face_normal = edge_ab.cross(&edge_ad);

        for index in [a, b, c, d] {
            accumulated[index as usize] += face_normal;
            touched[index as usize] = true;
        }
    }

    let mut normals = Vec::with_capacity(vertices.len() * 3);
    let mut fallback_count = 0usize;

    for (sum, touched) in accumulated.iter().zip(&touched) {
        let normal = if *touched {
            // Exact cancellation is a degenerate case, not a division fault.
            sum.try_normalize(0.0)
        } else {
            None
        };

        if normal.is_none() {
            fallback_count += 1;
        }

        let normal = normal.unwrap_or_else(Vector3::zeros);
        normals.extend_from_slice(&[normal.x, normal.y, normal.z]);
    }

    if fallback_count > 0 {
        log::warn!("{fallback_count} vertex normal(s) fell back to zero");
        issues.push(ValidationIssue {
            severity: Severity::Warning,
            code: "DEGENERATE_GEOMETRY".to_string(),
            message: format!(
                "{fallback_count} vertex(es) have no usable face normals and received a zero normal"
            ),
        });
    }

    Ok(normals)
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_quad() -> Vec<[f32; 3]> {
        vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ]
    }

    #[test]
    fn given_quad_when_triangulating_then_winding_is_reversed() {
        let indices = triangulate(&[vec![0, 1, 2, 3]], 4).expect("quad is valid");
        assert_eq!(indices, vec![3, 1, 0, 3, 2, 1]);
    }

    #[test]
    fn given_triangle_face_when_triangulating_then_structural_error_is_raised() {
        let result = triangulate(&[vec![0, 1, 2]], 4);
        assert!(matches!(result, Err(StructuralError::NonQuadFace(3))));
    }

    #[test]
    fn given_out_of_range_index_when_triangulating_then_structural_error_is_raised() {
        let result = triangulate(&[vec![0, 1, 2, 9]], 4);
        assert!(matches!(
            result,
            Err(StructuralError::FaceIndexOutOfRange { index: 9, .. })
        ));
    }

    #[test]
    fn given_planar_quad_when_reconstructing_then_all_normals_point_up() {
        let mut issues = Vec::new();
        let normals = reconstruct_normals(&unit_quad(), &[vec![0, 1, 2, 3]], &mut issues)
            .expect("quad is valid");

        assert_eq!(normals.len(), 12);
        for vertex in 0..4 {
            assert_eq!(&normals[vertex * 3..vertex * 3 + 3], &[0.0, 0.0, 1.0]);
        }
        assert!(issues.is_empty());
        assert!(normals.iter().all(|component| !component.is_nan()));
    }

    #[test]
    fn given_isolated_vertices_when_reconstructing_then_one_warning_covers_all() {
        let mut vertices = unit_quad();
        vertices.push([5.0, 5.0, 5.0]);
        vertices.push([6.0, 6.0, 6.0]);

        let mut issues = Vec::new();
        let normals = reconstruct_normals(&vertices, &[vec![0, 1, 2, 3]], &mut issues)
            .expect("quad is valid");

        // Normal buffer still matches the position buffer vertex for vertex.
        assert_eq!(normals.len(), vertices.len() * 3);
        assert_eq!(&normals[12..18], &[0.0; 6]);

        let warnings: Vec<_> = issues
            .iter()
            .filter(|issue| issue.code == "DEGENERATE_GEOMETRY")
            .collect();
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn given_cancelling_face_normals_when_reconstructing_then_zero_fallback_is_used() {
        // The same quad listed with both windings: accumulated normals sum
        // to exactly zero at every vertex.
        let faces = vec![vec![0, 1, 2, 3], vec![3, 2, 1, 0]];

        let mut issues = Vec::new();
        let normals =
            reconstruct_normals(&unit_quad(), &faces, &mut issues).expect("quads are valid");

        assert_eq!(normals, vec![0.0; 12]);
        assert_eq!(issues.len(), 1);
        assert!(normals.iter().all(|component| !component.is_nan()));
    }
}
