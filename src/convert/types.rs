use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

// ─── Diagnostics ──────────────────────────────────────────────────────────────

/// Severity level used by conversion diagnostics. Fatal conditions are not
/// issues; they surface as [`super::StructuralError`].
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Info,
}

/// A single diagnostic produced during conversion.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub code: String,
    pub message: String,
}

/// Summary returned by the top-level conversion entry point.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    pub material_count: usize,
    pub mesh_count: usize,
    pub bone_count: usize,
    pub total_vertices: usize,
    pub total_triangles: usize,
    pub issues: Vec<ValidationIssue>,
}

// ─── Babylon scene records ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ProducerInfo {
    pub name: String,
    pub version: String,
    pub exporter_version: String,
    pub file: String,
}

/// Babylon scene document. Scene-level values are never computed, only
/// echoed: the converter always emits the same lighting/physics defaults.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BabylonScene {
    pub producer: ProducerInfo,
    pub materials: Vec<BabylonMaterial>,
    pub auto_clear: bool,
    pub clear_color: [f32; 3],
    pub ambient_color: [f32; 3],
    pub gravity: [f32; 3],
    pub cameras: Vec<Value>,
    #[serde(rename = "activeCamera_")]
    pub active_camera: String,
    pub lights: Vec<Value>,
    pub multi_materials: Vec<Value>,
    pub shadow_generators: Vec<Value>,
    pub skeletons: Vec<BabylonSkeleton>,
    pub meshes: Vec<BabylonMesh>,
    pub particle_systems: Vec<Value>,
    pub lens_flare_systems: Vec<Value>,
    pub actions: Vec<Value>,
    pub sounds: Vec<Value>,
    pub worker_collisions: bool,
    pub collisions_enabled: bool,
    pub physics_enabled: bool,
    pub auto_animate: bool,
}

impl BabylonScene {
    /// Assemble a scene around converted content, echoing the fixed defaults.
    pub(super) fn new(
        materials: Vec<BabylonMaterial>,
        skeletons: Vec<BabylonSkeleton>,
        meshes: Vec<BabylonMesh>,
    ) -> Self {
        Self {
            producer: ProducerInfo {
                name: "mhx2babylon".to_string(),
                // MHX2 schema revision the converter understands.
                version: "2.0.27".to_string(),
                exporter_version: env!("CARGO_PKG_VERSION").to_string(),
                file: String::new(),
            },
            materials,
            auto_clear: false,
            clear_color: [1.0, 1.0, 1.0],
            ambient_color: [1.0, 1.0, 1.0],
            gravity: [0.0, -9.0, 0.0],
            cameras: Vec::new(),
            active_camera: String::new(),
            lights: Vec::new(),
            multi_materials: Vec::new(),
            shadow_generators: Vec::new(),
            skeletons,
            meshes,
            particle_systems: Vec::new(),
            lens_flare_systems: Vec::new(),
            actions: Vec::new(),
            sounds: Vec::new(),
            worker_collisions: false,
            collisions_enabled: false,
            physics_enabled: false,
            auto_animate: false,
        }
    }
}

// ─── Materials ────────────────────────────────────────────────────────────────

/// Fixed Babylon texture record wrapped around a texture file reference.
/// Only the name varies; MHX2 carries no per-texture transform data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BabylonTexture {
    pub name: String,
    pub level: u32,
    #[serde(rename = "has_alpha")]
    pub has_alpha: u32,
    pub u_offset: f32,
    pub v_offset: f32,
    pub u_scale: f32,
    pub v_scale: f32,
    pub u_ang: f32,
    pub v_ang: f32,
    pub w_ang: f32,
    pub wrap_u: u32,
    pub wrap_v: u32,
    pub coordinates_index: u32,
    pub coordinates_mode: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BabylonMaterial {
    pub name: String,
    pub id: String,
    pub backface_culling: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diffuse: Option<[f32; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specular: Option<[f32; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ambient: Option<[f32; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emissive: Option<[f32; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diffuse_texture: Option<BabylonTexture>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bump_texture: Option<BabylonTexture>,
}

// ─── Skeleton ─────────────────────────────────────────────────────────────────

/// One output bone: rest pose flattened column-major, parent resolved to a
/// dense index (-1 when parented to the synthetic root).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BabylonBone {
    pub name: String,
    pub index: u32,
    pub parent_bone_index: i32,
    pub rest: Vec<f32>,
    pub length: f32,
}

/// Ordered bone sequence. Built once per asset, read-only afterward.
#[derive(Debug, Clone, Serialize)]
pub struct BabylonSkeleton {
    pub name: String,
    pub id: u32,
    pub bones: Vec<BabylonBone>,
}

impl BabylonSkeleton {
    /// Name to bone-index lookup consumed by the skin weight packer.
    pub fn bone_indices(&self) -> HashMap<&str, u32> {
        self.bones
            .iter()
            .map(|bone| (bone.name.as_str(), bone.index))
            .collect()
    }
}

// ─── Mesh ─────────────────────────────────────────────────────────────────────

/// A contiguous vertex/index range sharing one material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BabylonSubmesh {
    pub material_index: u32,
    pub vertices_start: u32,
    pub vertices_stop: u32,
    pub index_start: u32,
    pub index_stop: u32,
}

/// Finished mesh record. Owns its buffers exclusively; skinning buffers are
/// present only when the source geometry carries a weight table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BabylonMesh {
    pub name: String,
    pub id: String,
    pub material_id: String,
    pub is_visible: bool,
    pub is_enabled: bool,
    pub check_collision: bool,
    pub receive_shadows: bool,
    pub pickable: bool,
    pub billboard_mode: u32,
    pub physics_imposter: u32,
    pub tags: String,
    pub animations: Vec<Value>,
    pub instances: Vec<Value>,
    pub actions: Vec<Value>,
    pub submeshes: Vec<BabylonSubmesh>,
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub uv: Vec<f32>,
    pub indices: Vec<u32>,
    pub position: [f32; 3],
    pub scaling: [f32; 3],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skeleton_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matrices_indices: Option<Vec<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matrices_weights: Option<Vec<f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matrices_indices_extra: Option<Vec<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matrices_weights_extra: Option<Vec<f32>>,
}

impl BabylonMesh {
    /// Empty mesh record with the fixed Babylon flag defaults.
    pub(super) fn new(name: &str, material_id: &str) -> Self {
        Self {
            name: name.to_string(),
            id: name.to_string(),
            material_id: material_id.to_string(),
            is_visible: true,
            is_enabled: true,
            check_collision: false,
            receive_shadows: false,
            pickable: false,
            billboard_mode: 0,
            physics_imposter: 0,
            tags: String::new(),
            animations: Vec::new(),
            instances: Vec::new(),
            actions: Vec::new(),
            submeshes: Vec::new(),
            positions: Vec::new(),
            normals: Vec::new(),
            uv: Vec::new(),
            indices: Vec::new(),
            position: [0.0, 0.0, 0.0],
            scaling: [1.0, 1.0, 1.0],
            skeleton_id: None,
            parent_id: None,
            matrices_indices: None,
            matrices_weights: None,
            matrices_indices_extra: None,
            matrices_weights_extra: None,
        }
    }
}
