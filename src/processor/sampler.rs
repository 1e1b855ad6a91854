use crate::program::{LanguageId, ProgramSet, ShaderStage};

use super::ProgramProcessor;

/// Assigns texture units to sampler uniforms (GLSL, GLSL ES).
///
/// GLSL samplers carry no register binding in source, so after compilation
/// each stage's samplers are numbered in declaration order and the units are
/// recorded on the compiled program, where pass parameter sets pick them up.
#[derive(Debug, Clone)]
pub struct SamplerBindingProcessor {
    language: LanguageId,
}

impl SamplerBindingProcessor {
    #[must_use]
    pub fn new(language: LanguageId) -> Self {
        Self { language }
    }
}

impl ProgramProcessor for SamplerBindingProcessor {
    fn target_language(&self) -> &LanguageId {
        &self.language
    }

    fn pre_create_gpu_programs(&self, _program_set: &mut ProgramSet) -> bool {
        true
    }

    fn post_create_gpu_programs(&self, program_set: &mut ProgramSet) -> bool {
        for stage in ShaderStage::ALL {
            let (Some(cpu), Some(gpu)) = (program_set.cpu_program(stage), program_set.gpu_program(stage))
            else {
                continue;
            };

            let samplers = cpu.parameters().iter().filter(|p| p.ty().is_sampler());
            for (unit, sampler) in (0u32..).zip(samplers) {
                gpu.set_sampler_unit(sampler.name(), unit);
            }
        }
        true
    }
}
