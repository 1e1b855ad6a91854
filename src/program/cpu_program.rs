use serde::{Deserialize, Serialize};

use super::function::Function;
use super::stage::ShaderStage;
use super::types::{AutoConstant, ParameterType};
use super::uniform::UniformParameter;
use crate::errors::{ProgramError, Result};

/// CPU-side description of one shader stage, before source generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    stage: ShaderStage,
    entry_point: Function,
    parameters: Vec<UniformParameter>,
    skeletal_animation_included: bool,
    column_major_matrices: bool,
    source_pass_name: String,
}

impl Program {
    #[must_use]
    pub fn new(stage: ShaderStage, entry_point: Function) -> Self {
        Self {
            stage,
            entry_point,
            parameters: Vec::new(),
            skeletal_animation_included: false,
            column_major_matrices: true,
            source_pass_name: String::new(),
        }
    }

    #[must_use]
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    #[must_use]
    pub fn entry_point(&self) -> &Function {
        &self.entry_point
    }

    pub fn entry_point_mut(&mut self) -> &mut Function {
        &mut self.entry_point
    }

    /// Uniforms in declaration order.
    #[must_use]
    pub fn parameters(&self) -> &[UniformParameter] {
        &self.parameters
    }

    #[must_use]
    pub fn parameter_by_name(&self, name: &str) -> Option<&UniformParameter> {
        self.parameters.iter().find(|p| p.name() == name)
    }

    pub fn add_parameter(&mut self, parameter: UniformParameter) -> Result<()> {
        if self.parameter_by_name(parameter.name()).is_some() {
            return Err(ProgramError::DuplicateUniform(parameter.name().to_string()));
        }
        self.parameters.push(parameter);
        Ok(())
    }

    /// Returns the uniform named `name`, declaring it first if needed.
    pub fn resolve_parameter(
        &mut self,
        name: &str,
        ty: ParameterType,
        auto_constant: Option<AutoConstant>,
    ) -> &UniformParameter {
        let pos = match self.parameters.iter().position(|p| p.name() == name) {
            Some(pos) => pos,
            None => {
                let parameter = match auto_constant {
                    Some(constant) => UniformParameter::auto(name, ty, constant),
                    None => UniformParameter::new(name, ty),
                };
                self.parameters.push(parameter);
                self.parameters.len() - 1
            }
        };
        &self.parameters[pos]
    }

    pub fn remove_parameter(&mut self, name: &str) -> Option<UniformParameter> {
        let pos = self.parameters.iter().position(|p| p.name() == name)?;
        Some(self.parameters.remove(pos))
    }

    #[must_use]
    pub fn skeletal_animation_included(&self) -> bool {
        self.skeletal_animation_included
    }

    pub fn set_skeletal_animation_included(&mut self, included: bool) {
        self.skeletal_animation_included = included;
    }

    #[must_use]
    pub fn use_column_major_matrices(&self) -> bool {
        self.column_major_matrices
    }

    pub fn set_use_column_major_matrices(&mut self, column_major: bool) {
        self.column_major_matrices = column_major;
    }

    /// Qualified name of the pass this program was generated for. Diagnostics only.
    #[must_use]
    pub fn source_pass_name(&self) -> &str {
        &self.source_pass_name
    }

    pub fn set_source_pass_name(&mut self, name: impl Into<String>) {
        self.source_pass_name = name.into();
    }
}
