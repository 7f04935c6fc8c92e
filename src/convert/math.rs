use nalgebra::{Matrix4, Quaternion, UnitQuaternion, Vector3};

// ─── Quaternion construction ──────────────────────────────────────────────────

/// Build a quaternion from a rotation axis and an angle in radians using the
/// half-angle identity.
///
/// The axis is used as given; the result is only a unit quaternion when the
/// axis is. Callers normalize through [`rotation_matrix`] before use.
pub(super) fn quat_from_axis_angle(axis: &Vector3<f32>, angle: f32) -> Quaternion<f32> {
    let half = angle / 2.0;
    let s = half.sin();
    Quaternion::new(half.cos(), axis.x * s, axis.y * s, axis.z * s)
}

// ─── Matrix conversion ────────────────────────────────────────────────────────

/// Normalize a quaternion and convert it to a homogeneous rotation matrix.
///
/// Returns `None` for a zero-norm quaternion; normalizing it would divide by
/// zero, so the caller has to decide how to report the degenerate rotation.
pub(super) fn rotation_matrix(quat: &Quaternion<f32>) -> Option<Matrix4<f32>> {
    if quat.norm() <= f32::EPSILON {
        return None;
    }
    Some(UnitQuaternion::new_normalize(*quat).to_homogeneous())
}

/// Flatten a matrix into the column-major 16-float layout the Babylon format
/// expects. nalgebra stores matrices column-major, so this is storage order.
pub(super) fn matrix_to_array(matrix: &Matrix4<f32>) -> Vec<f32> {
    matrix.as_slice().to_vec()
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use nalgebra::{Point3, Vector3};

    use super::*;

    const TOLERANCE: f32 = 1e-5;

    fn rotate(matrix: &Matrix4<f32>, point: Point3<f32>) -> Point3<f32> {
        matrix.transform_point(&point)
    }

    #[test]
    fn given_quarter_turn_about_z_when_rotating_x_axis_then_result_is_y_axis() {
        let quat = quat_from_axis_angle(&Vector3::z(), std::f32::consts::FRAC_PI_2);
        let matrix = rotation_matrix(&quat).expect("unit axis rotation");

        let rotated = rotate(&matrix, Point3::new(1.0, 0.0, 0.0));
        assert!((rotated - Point3::new(0.0, 1.0, 0.0)).norm() < TOLERANCE);
    }

    #[test]
    fn given_half_turn_about_y_when_rotating_then_x_and_z_flip() {
        let quat = quat_from_axis_angle(&Vector3::y(), std::f32::consts::PI);
        let matrix = rotation_matrix(&quat).expect("unit axis rotation");

        let rotated_x = rotate(&matrix, Point3::new(1.0, 0.0, 0.0));
        let rotated_z = rotate(&matrix, Point3::new(0.0, 0.0, 1.0));
        assert!((rotated_x - Point3::new(-1.0, 0.0, 0.0)).norm() < TOLERANCE);
        assert!((rotated_z - Point3::new(0.0, 0.0, -1.0)).norm() < TOLERANCE);
    }

    #[test]
    fn given_normalized_quaternion_when_converting_then_matrix_is_orthonormal() {
        let quat = quat_from_axis_angle(&Vector3::new(1.0, 2.0, -0.5), 0.83);
        let matrix = rotation_matrix(&quat).expect("nonzero quaternion");

        let columns: Vec<Vector3<f32>> = (0..3)
            .map(|c| Vector3::new(matrix[(0, c)], matrix[(1, c)], matrix[(2, c)]))
            .collect();

        for (i, column) in columns.iter().enumerate() {
            assert!((column.norm() - 1.0).abs() < TOLERANCE);
            for other in columns.iter().skip(i + 1) {
                assert!(column.dot(other).abs() < TOLERANCE);
            }
        }
    }

    #[test]
    fn given_unnormalized_axis_when_rotating_then_axis_direction_is_preserved() {
        // A scaled axis changes the effective angle after normalization but
        // never the rotation axis itself.
        let quat = quat_from_axis_angle(&Vector3::new(0.0, 0.0, 2.0), std::f32::consts::FRAC_PI_2);
        let matrix = rotation_matrix(&quat).expect("nonzero quaternion");

        let on_axis = rotate(&matrix, Point3::new(0.0, 0.0, 5.0));
        assert!((on_axis - Point3::new(0.0, 0.0, 5.0)).norm() < TOLERANCE);
    }

    #[test]
    fn given_zero_norm_quaternion_when_converting_then_none_is_returned() {
        // Zero axis with a half turn: every component collapses to zero.
        let quat = quat_from_axis_angle(&Vector3::zeros(), std::f32::consts::PI);
        assert!(rotation_matrix(&quat).is_none());
    }

    #[test]
    fn given_cross_product_when_using_basis_vectors_then_right_hand_rule_holds() {
        let cross = Vector3::new(1.0, 0.0, 0.0).cross(&Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(cross, Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn given_translation_matrix_when_flattening_then_layout_is_column_major() {
        let matrix = Matrix4::new_translation(&Vector3::new(1.0, 2.0, 3.0));
        let flat = matrix_to_array(&matrix);

        assert_eq!(flat.len(), 16);
        assert_eq!(&flat[12..16], &[1.0, 2.0, 3.0, 1.0]);
    }
}
