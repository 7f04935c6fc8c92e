use super::types::{BabylonMaterial, BabylonTexture};
use crate::document::Mhx2Material;

/// Wrap a texture file reference in the fixed Babylon texture record.
fn convert_texture(name: &str) -> BabylonTexture {
    BabylonTexture {
        name: name.to_string(),
        level: 1,
        has_alpha: 1,
        u_offset: 0.0,
        v_offset: 0.0,
        u_scale: 1.0,
        v_scale: 1.0,
        u_ang: 0.0,
        v_ang: 0.0,
        w_ang: 0.0,
        wrap_u: 1,
        wrap_v: 1,
        coordinates_index: 0,
        coordinates_mode: 0,
    }
}

/// Rename MHX2 material fields into a Babylon material record. Pure key
/// renaming; no color math.
pub(super) fn convert_material(input: &Mhx2Material) -> BabylonMaterial {
    BabylonMaterial {
        name: input.name.clone(),
        id: input.name.clone(),
        backface_culling: input.backface_cull,
        diffuse: input.diffuse_color,
        specular: input.specular_color,
        ambient: input.ambient_color,
        emissive: input.emissive_color,
        diffuse_texture: input.diffuse_texture.as_deref().map(convert_texture),
        bump_texture: input.normal_map_texture.as_deref().map(convert_texture),
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
