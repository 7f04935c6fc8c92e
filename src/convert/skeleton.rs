use nalgebra::{Matrix4, Vector3};

use super::error::StructuralError;
use super::math::{matrix_to_array, quat_from_axis_angle, rotation_matrix};
use super::types::{BabylonBone, BabylonSkeleton};
use crate::document::Mhx2Skeleton;

/// Synthetic root marker MakeHuman writes into the bone list. It is never
/// emitted as a bone; bones parented to it resolve to parent index -1.
pub(super) const ROOT_BONE_MARKER: &str = "Root";

/// Build the output skeleton from the ordered MHX2 bone list.
///
/// Bones are processed in input order and a bone's parent must already be in
/// the table when the bone is reached. This deliberately enforces the source
/// document's parents-before-children ordering instead of topologically
/// sorting; an unknown parent is a fatal structural error.
pub(super) fn build_skeleton(input: &Mhx2Skeleton) -> Result<BabylonSkeleton, StructuralError> {
    let mut bones: Vec<BabylonBone> = Vec::with_capacity(input.bones.len());

    for bone in &input.bones {
        if bone.name == ROOT_BONE_MARKER {
            continue;
        }

        let parent_bone_index = match bone.parent.as_deref() {
            None => -1,
            Some(parent) if parent == ROOT_BONE_MARKER => -1,
            Some(parent) => bones
                .iter()
                .position(|candidate| candidate.name == parent)
                .map(|index| index as i32)
                .ok_or_else(|| StructuralError::ParentBeforeDeclaration(parent.to_string()))?,
        };

        let head = Vector3::from(bone.head);
        let tail = Vector3::from(bone.tail);
        let axis = tail - head;

        let quat = quat_from_axis_angle(&axis, bone.roll);
        let rotation = rotation_matrix(&quat)
            .ok_or_else(|| StructuralError::DegenerateRestRotation(bone.name.clone()))?;

        // Rest pose rotates about the bone's head point, not the world
        // origin: T(head) * R * T(-head).
        let rest = Matrix4::new_translation(&head) * rotation * Matrix4::new_translation(&(-head));

        bones.push(BabylonBone {
            name: bone.name.clone(),
            index: bones.len() as u32,
            parent_bone_index,
            rest: matrix_to_array(&rest),
            length: axis.norm(),
        });
    }

    Ok(BabylonSkeleton {
        name: input.name.clone(),
        id: 0,
        bones,
    })
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use nalgebra::Point3;

    use crate::document::Mhx2Bone;

    use super::*;

    fn bone(name: &str, parent: Option<&str>, head: [f32; 3], tail: [f32; 3], roll: f32) -> Mhx2Bone {
        Mhx2Bone {
            name: name.to_string(),
            parent: parent.map(ToOwned::to_owned),
            head,
            tail,
            roll,
        }
    }

    fn skeleton(bones: Vec<Mhx2Bone>) -> Mhx2Skeleton {
        Mhx2Skeleton {
            name: "Armature".to_string(),
            offset: [0.0, 0.0, 0.0],
            bones,
        }
    }

    #[test]
    fn given_root_parented_chain_when_building_then_root_is_skipped_and_indices_resolve() {
        let input = skeleton(vec![
            bone("Root", None, [0.0, 0.0, 0.0], [0.0, 0.1, 0.0], 0.0),
            bone("B", Some("Root"), [0.0, 0.0, 0.0], [0.0, 1.0, 0.0], 0.0),
            bone("C", Some("B"), [0.0, 1.0, 0.0], [0.0, 2.0, 0.0], 0.0),
        ]);

        let built = build_skeleton(&input).expect("valid ordering");

        assert_eq!(built.bones.len(), 2);
        assert_eq!(built.bones[0].name, "B");
        assert_eq!(built.bones[0].parent_bone_index, -1);
        assert_eq!(built.bones[0].index, 0);
        assert_eq!(built.bones[1].name, "C");
        assert_eq!(built.bones[1].parent_bone_index, 0);
        assert_eq!(built.bones[1].index, 1);
    }

    #[test]
    fn given_child_declared_before_parent_when_building_then_structural_error_is_raised() {
        let input = skeleton(vec![
            bone("C", Some("B"), [0.0, 1.0, 0.0], [0.0, 2.0, 0.0], 0.0),
            bone("B", None, [0.0, 0.0, 0.0], [0.0, 1.0, 0.0], 0.0),
        ]);

        let result = build_skeleton(&input);
        assert!(matches!(
            result,
            Err(StructuralError::ParentBeforeDeclaration(name)) if name == "B"
        ));
    }

    #[test]
    fn given_rolled_bone_when_building_then_rest_leaves_head_fixed() {
        let head = [1.0, 2.0, 3.0];
        let input = skeleton(vec![bone("B", None, head, [1.0, 2.0, 7.0], 1.2)]);

        let built = build_skeleton(&input).expect("valid bone");
        let rest = Matrix4::from_column_slice(&built.bones[0].rest);

        let fixed = rest.transform_point(&Point3::new(1.0, 2.0, 3.0));
        assert!((fixed - Point3::new(1.0, 2.0, 3.0)).norm() < 1e-4);
    }

    #[test]
    fn given_zero_roll_when_building_then_rest_is_identity() {
        let input = skeleton(vec![bone("B", None, [0.5, 0.0, 0.0], [0.5, 3.0, 0.0], 0.0)]);

        let built = build_skeleton(&input).expect("valid bone");
        let rest = Matrix4::from_column_slice(&built.bones[0].rest);

        assert!((rest - Matrix4::identity()).norm() < 1e-6);
        assert!((built.bones[0].length - 3.0).abs() < 1e-6);
    }

    #[test]
    fn given_zero_length_bone_with_half_turn_roll_when_building_then_error_is_raised() {
        let input = skeleton(vec![bone(
            "B",
            None,
            [1.0, 1.0, 1.0],
            [1.0, 1.0, 1.0],
            std::f32::consts::PI,
        )]);

        let result = build_skeleton(&input);
        assert!(matches!(
            result,
            Err(StructuralError::DegenerateRestRotation(name)) if name == "B"
        ));
    }

    #[test]
    fn given_built_skeleton_when_looking_up_indices_then_names_map_to_positions() {
        let input = skeleton(vec![
            bone("B", None, [0.0, 0.0, 0.0], [0.0, 1.0, 0.0], 0.0),
            bone("C", Some("B"), [0.0, 1.0, 0.0], [0.0, 2.0, 0.0], 0.0),
        ]);

        let built = build_skeleton(&input).expect("valid ordering");
        let lookup = built.bone_indices();
        assert_eq!(lookup.get("B"), Some(&0));
        assert_eq!(lookup.get("C"), Some(&1));
        assert_eq!(lookup.get("Root"), None);
    }
}
