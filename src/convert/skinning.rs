use std::collections::HashMap;

use super::error::StructuralError;
use super::types::{Severity, ValidationIssue};

/// Hard limit on bone influencers per vertex. Excess entries are dropped
/// lowest-weight first, without re-normalizing the remainder.
pub(super) const MAX_INFLUENCERS: usize = 8;

/// Influencers packed per buffer; vertices with more spill into the extra
/// buffers.
pub(super) const PRIMARY_INFLUENCER_SLOTS: usize = 4;

/// Fixed-width per-vertex skinning buffers, 4 slots per vertex per buffer.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct SkinBuffers {
    pub matrices_indices: Vec<u32>,
    pub matrices_weights: Vec<f32>,
    pub matrices_indices_extra: Option<Vec<u32>>,
    pub matrices_weights_extra: Option<Vec<f32>>,
}

/// Pack a bone-name-keyed weight table into fixed-width per-vertex slots.
///
/// The table is inverted into per-vertex influence lists via the skeleton's
/// bone-index lookup, strongest weight first. Returns `None` when no vertex
/// carries any influence. When any vertex needs more than 4 slots, the extra
/// buffers are allocated for every vertex of the mesh.
pub(super) fn pack_skin_weights(
    weights: &HashMap<String, Vec<(u32, f32)>>,
    bone_indices: &HashMap<&str, u32>,
    vertex_count: usize,
    issues: &mut Vec<ValidationIssue>,
) -> Result<Option<SkinBuffers>, StructuralError> {
    // Resolve bone names up front and visit them in skeleton order so the
    // packing never depends on map iteration order.
    let mut bone_entries: Vec<(u32, &[(u32, f32)])> = Vec::with_capacity(weights.len());
    for (bone_name, entries) in weights {
        let bone_index = bone_indices
            .get(bone_name.as_str())
            .copied()
            .ok_or_else(|| StructuralError::UnknownWeightBone(bone_name.clone()))?;
        bone_entries.push((bone_index, entries.as_slice()));
    }
    bone_entries.sort_by_key(|(bone_index, _)| *bone_index);

    let mut influences: Vec<Vec<(u32, f32)>> = vec![Vec::new(); vertex_count];
    for (bone_index, entries) in bone_entries {
        for &(vertex_index, weight) in entries {
            let Some(list) = influences.get_mut(vertex_index as usize) else {
                return Err(StructuralError::WeightVertexOutOfRange {
                    index: vertex_index,
                    vertex_count,
                });
            };
            list.push((bone_index, weight));
        }
    }

    // Strongest influences first; ties keep skeleton order (stable sort).
    for list in &mut influences {
        list.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    }

    let mut max_influencers = influences.iter().map(Vec::len).max().unwrap_or(0);
    if max_influencers > MAX_INFLUENCERS {
        log::warn!(
            "a vertex carries {max_influencers} bone influencers; keeping the strongest {MAX_INFLUENCERS}"
        );
        issues.push(ValidationIssue {
            severity: Severity::Warning,
            code: "INFLUENCER_LIMIT_EXCEEDED".to_string(),
            message: format!(
                "a vertex carries {max_influencers} bone influencers; the weakest ones beyond {MAX_INFLUENCERS} were dropped"
            ),
        });
        for list in &mut influences {
            list.truncate(MAX_INFLUENCERS);
        }
        max_influencers = MAX_INFLUENCERS;
    }

    if max_influencers == 0 {
        return Ok(None);
    }

    let needs_extra = max_influencers > PRIMARY_INFLUENCER_SLOTS;
    let mut matrices_indices = Vec::with_capacity(vertex_count * PRIMARY_INFLUENCER_SLOTS);
    let mut matrices_weights = Vec::with_capacity(vertex_count * PRIMARY_INFLUENCER_SLOTS);
    let mut indices_extra = Vec::new();
    let mut weights_extra = Vec::new();

    for list in &influences {
        for slot in 0..PRIMARY_INFLUENCER_SLOTS {
            let (bone_index, weight) = list.get(slot).copied().unwrap_or((0, 0.0));
            matrices_indices.push(bone_index);
            matrices_weights.push(weight);
        }

        if needs_extra {
            for slot in PRIMARY_INFLUENCER_SLOTS..2 * PRIMARY_INFLUENCER_SLOTS {
                let (bone_index, weight) = list.get(slot).copied().unwrap_or((0, 0.0));
                indices_extra.push(bone_index);
                weights_extra.push(weight);
            }
        }
    }

    Ok(Some(SkinBuffers {
        matrices_indices,
        matrices_weights,
        matrices_indices_extra: needs_extra.then_some(indices_extra),
        matrices_weights_extra: needs_extra.then_some(weights_extra),
    }))
}

// ─── Tests ────────────────────────────────────────────────────────────────────
