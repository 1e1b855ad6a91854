use crate::gpu::{GpuProgram, GpuProgramParameters};
use crate::program::ShaderStage;

/// A program bound to one stage slot of a pass.
#[derive(Debug, Clone)]
pub struct ProgramBinding {
    pub program_name: String,
    pub parameters: GpuProgramParameters,
}

/// A material pass: the consumer of generated programs.
///
/// Each stage slot holds the name of the bound program and the parameter
/// set laid out after that program's constants.
#[derive(Debug, Clone)]
pub struct Pass {
    material: String,
    technique: usize,
    name: String,
    slots: [Option<ProgramBinding>; ShaderStage::COUNT],
}

impl Pass {
    #[must_use]
    pub fn new(material: impl Into<String>, technique: usize, name: impl Into<String>) -> Self {
        Self {
            material: material.into(),
            technique,
            name: name.into(),
            slots: Default::default(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `material/technique/pass`, used to tag generated programs.
    #[must_use]
    pub fn fully_qualified_name(&self) -> String {
        format!("{}/{}/{}", self.material, self.technique, self.name)
    }

    /// Binds `program` to its stage slot with a fresh parameter set.
    pub fn set_program(&mut self, program: &GpuProgram) {
        self.slots[program.stage().index()] = Some(ProgramBinding {
            program_name: program.name().to_string(),
            parameters: program.create_parameters(),
        });
    }

    pub fn clear_program(&mut self, stage: ShaderStage) {
        self.slots[stage.index()] = None;
    }

    #[must_use]
    pub fn program_name(&self, stage: ShaderStage) -> Option<&str> {
        self.slots[stage.index()]
            .as_ref()
            .map(|binding| binding.program_name.as_str())
    }

    #[must_use]
    pub fn has_program(&self, stage: ShaderStage) -> bool {
        self.slots[stage.index()].is_some()
    }

    #[must_use]
    pub fn parameters(&self, stage: ShaderStage) -> Option<&GpuProgramParameters> {
        self.slots[stage.index()]
            .as_ref()
            .map(|binding| &binding.parameters)
    }

    pub fn parameters_mut(&mut self, stage: ShaderStage) -> Option<&mut GpuProgramParameters> {
        self.slots[stage.index()]
            .as_mut()
            .map(|binding| &mut binding.parameters)
    }
}
