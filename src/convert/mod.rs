//! MHX2 to Babylon conversion pipeline.
//!
//! The pipeline is a pure document transform: [`convert_document`] turns a
//! loaded [`Mhx2Document`] into a [`BabylonScene`] plus diagnostics, and
//! [`convert_mhx2_to_babylon`] wraps it with file I/O for the CLI.

use std::{fs, path::Path};

use anyhow::{Context, Result};

use crate::document::{load_document, Mhx2Document, Mhx2Geometry};

mod error;
mod material;
mod math;
mod mesh;
mod normals;
mod skeleton;
mod skinning;
mod types;

pub use error::StructuralError;
pub use types::{
    BabylonBone, BabylonMaterial, BabylonMesh, BabylonScene, BabylonSkeleton, BabylonSubmesh,
    BabylonTexture, ConversionReport, ProducerInfo, Severity, ValidationIssue,
};

use material::convert_material;
use mesh::assemble_mesh;
use skeleton::build_skeleton;

// ─── Document conversion ──────────────────────────────────────────────────────

/// Convert a loaded MHX2 document into a Babylon scene.
///
/// The skeleton is built first and stays frozen while meshes are assembled
/// against it. Structural faults abort the conversion; recoverable findings
/// are collected as issues alongside the scene.
pub fn convert_document(
    document: &Mhx2Document,
) -> Result<(BabylonScene, Vec<ValidationIssue>), StructuralError> {
    let mut issues = Vec::new();

    let materials = document.materials.iter().map(convert_material).collect();

    let skeleton = match &document.skeleton {
        Some(input) => Some(build_skeleton(input)?),
        None => None,
    };

    let meshes = convert_geometries(&document.geometries, skeleton.as_ref(), &mut issues)?;

    let skeletons = skeleton.into_iter().collect();
    Ok((BabylonScene::new(materials, skeletons, meshes), issues))
}

/// Assemble all geometries, parenting proxies under the human body mesh.
///
/// The first geometry flagged `human` becomes the scene's parent mesh and is
/// emitted first; every other mesh is parented to it so the whole character
/// moves as one node. Without a human geometry all meshes stay unparented.
fn convert_geometries(
    geometries: &[Mhx2Geometry],
    skeleton: Option<&BabylonSkeleton>,
    issues: &mut Vec<ValidationIssue>,
) -> Result<Vec<BabylonMesh>, StructuralError> {
    let human = geometries.iter().find(|geometry| geometry.human);

    let mut meshes = Vec::with_capacity(geometries.len());

    if let Some(human) = human {
        log::debug!("parenting meshes under human geometry '{}'", human.name);
        issues.push(ValidationIssue {
            severity: Severity::Info,
            code: "HUMAN_PARENT_MESH".to_string(),
            message: format!("geometry '{}' is the parent of all other meshes", human.name),
        });
        meshes.push(assemble_mesh(human, skeleton, None, issues)?);
    }

    for geometry in geometries {
        if human.is_some_and(|human| std::ptr::eq(human, geometry)) {
            continue;
        }
        let parent = human.map(|human| human.name.as_str());
        meshes.push(assemble_mesh(geometry, skeleton, parent, issues)?);
    }

    Ok(meshes)
}

// ─── File-level entry point ───────────────────────────────────────────────────

/// Convert an MHX2 file on disk into a Babylon scene file.
pub fn convert_mhx2_to_babylon(input_path: &Path, output_path: &Path) -> Result<ConversionReport> {
    let document = load_document(input_path)?;
    let (mut scene, issues) = convert_document(&document)
        .with_context(|| format!("cannot convert {}", input_path.display()))?;

    if let Some(file_name) = output_path.file_name() {
        scene.producer.file = file_name.to_string_lossy().into_owned();
    }

    let bytes = serde_json::to_vec(&scene).context("failed to serialize scene")?;
    fs::write(output_path, bytes)
        .with_context(|| format!("failed to write output file: {}", output_path.display()))?;

    Ok(ConversionReport {
        material_count: scene.materials.len(),
        mesh_count: scene.meshes.len(),
        bone_count: scene
            .skeletons
            .first()
            .map_or(0, |skeleton| skeleton.bones.len()),
        total_vertices: scene
            .meshes
            .iter()
            .map(|mesh| mesh.positions.len() / 3)
            .sum(),
        total_triangles: scene.meshes.iter().map(|mesh| mesh.indices.len() / 3).sum(),
        issues,
    })
}

// ─── Tests ────────────────────────────────────────────────────────────────────
