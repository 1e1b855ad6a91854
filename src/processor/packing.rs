//! Varying packing for semantic-based languages (HLSL, Cg).
//!
//! Before generation, every inter-stage variable other than the position is
//! moved onto consecutive `TEXCOORD` slots, and the downstream stage's
//! matching inputs are renamed to the same slots. Sets needing more than
//! [`MAX_TEXCOORD_SLOTS`] slots between two stages are refused.

use crate::program::{Function, LanguageId, ProgramSet, Semantic, ShaderStage};

use super::ProgramProcessor;

pub const MAX_TEXCOORD_SLOTS: u32 = 8;

#[derive(Debug, Clone)]
pub struct VaryingPackingProcessor {
    language: LanguageId,
}

impl VaryingPackingProcessor {
    #[must_use]
    pub fn new(language: LanguageId) -> Self {
        Self { language }
    }
}

/// Packs `upstream`'s outputs and remaps `downstream`'s inputs to match.
fn pack_interface(upstream: &mut Function, downstream: &mut Function) -> bool {
    let mut remap = Vec::new();
    let mut next_slot = 0;

    for output in upstream.outputs_mut() {
        if output.semantic == Semantic::Position {
            continue;
        }
        if next_slot >= MAX_TEXCOORD_SLOTS {
            log::warn!(
                "Stage interface of '{}' needs more than {MAX_TEXCOORD_SLOTS} texcoord slots",
                output.name
            );
            return false;
        }
        remap.push(((output.semantic, output.index), next_slot));
        output.semantic = Semantic::TexCoord;
        output.index = next_slot;
        next_slot += 1;
    }

    for input in downstream.inputs_mut() {
        let slot = (input.semantic, input.index);
        if let Some(&(_, packed)) = remap.iter().find(|(old, _)| *old == slot) {
            input.semantic = Semantic::TexCoord;
            input.index = packed;
        }
    }

    true
}

impl ProgramProcessor for VaryingPackingProcessor {
    fn target_language(&self) -> &LanguageId {
        &self.language
    }

    fn pre_create_gpu_programs(&self, program_set: &mut ProgramSet) -> bool {
        let pairs: &[(ShaderStage, ShaderStage)] = if program_set.has_geometry() {
            &[
                (ShaderStage::Vertex, ShaderStage::Geometry),
                (ShaderStage::Geometry, ShaderStage::Fragment),
            ]
        } else {
            &[(ShaderStage::Vertex, ShaderStage::Fragment)]
        };

        pairs.iter().all(|&(upstream, downstream)| {
            program_set
                .stage_pair_mut(upstream, downstream)
                .is_some_and(|(up, down)| {
                    pack_interface(up.entry_point_mut(), down.entry_point_mut())
                })
        })
    }

    fn post_create_gpu_programs(&self, _program_set: &mut ProgramSet) -> bool {
        true
    }
}
