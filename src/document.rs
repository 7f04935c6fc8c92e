//! MHX2 input document schema and loading.
//!
//! The conversion core consumes these records fully loaded; it never touches
//! the filesystem itself. Fixed-dimension points deserialize as fixed-size
//! arrays, so malformed vector dimensionality fails here, before any
//! geometry work starts.

use std::{collections::HashMap, fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level MHX2 document as exported by MakeHuman.
#[derive(Debug, Clone, Deserialize)]
pub struct Mhx2Document {
    #[serde(default)]
    pub materials: Vec<Mhx2Material>,
    /// MHX2 carries at most one skeleton per asset.
    pub skeleton: Option<Mhx2Skeleton>,
    pub geometries: Vec<Mhx2Geometry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Mhx2Material {
    pub name: String,
    #[serde(rename = "backfaceCull", default)]
    pub backface_cull: bool,
    pub diffuse_color: Option<[f32; 3]>,
    pub specular_color: Option<[f32; 3]>,
    pub ambient_color: Option<[f32; 3]>,
    pub emissive_color: Option<[f32; 3]>,
    pub diffuse_texture: Option<String>,
    pub normal_map_texture: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Mhx2Skeleton {
    pub name: String,
    /// Asset placement offset. Applied to mesh vertices, never to bone
    /// math; bones operate in the source document's local space.
    #[serde(default)]
    pub offset: [f32; 3],
    /// Ordered bone list. Parents must precede children.
    pub bones: Vec<Mhx2Bone>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Mhx2Bone {
    pub name: String,
    pub parent: Option<String>,
    pub head: [f32; 3],
    pub tail: [f32; 3],
    pub roll: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Mhx2Geometry {
    pub name: String,
    pub material: String,
    #[serde(default)]
    pub human: bool,
    #[serde(default)]
    pub offset: [f32; 3],
    pub mesh: Mhx2MeshData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Mhx2MeshData {
    pub vertices: Vec<[f32; 3]>,
    #[serde(default)]
    pub uv_coordinates: Vec<[f32; 2]>,
    /// Face index lists. The converter only supports quads; face arity is
    /// validated by the geometry pipeline, not here.
    pub faces: Vec<Vec<u32>>,
    /// Bone name to `[vertexIndex, weight]` pair list.
    pub weights: Option<HashMap<String, Vec<(u32, f32)>>>,
}

/// Load and parse an MHX2 document from disk.
pub fn load_document(path: &Path) -> Result<Mhx2Document> {
    let bytes = fs::read(path)
        .with_context(|| format!("failed to read input file: {}", path.display()))?;
    serde_json::from_slice(&bytes)
        .with_context(|| format!("input is not a valid MHX2 document: {}", path.display()))
}
