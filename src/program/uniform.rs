use serde::{Deserialize, Serialize};

use super::types::{AutoConstant, ParameterType};
use crate::gpu::GpuProgramParameters;

/// A named, typed uniform owned by a CPU program.
///
/// At bind time the uniform is matched by name against the constants the
/// compiled program exposes. Uniforms without an auto-constant or a value
/// are bound as manual slots the application fills in later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniformParameter {
    name: String,
    ty: ParameterType,
    array_size: u32,
    auto_constant: Option<AutoConstant>,
    value: Option<Vec<f32>>,
}

impl UniformParameter {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: ParameterType) -> Self {
        Self {
            name: name.into(),
            ty,
            array_size: 1,
            auto_constant: None,
            value: None,
        }
    }

    #[must_use]
    pub fn auto(name: impl Into<String>, ty: ParameterType, constant: AutoConstant) -> Self {
        Self {
            auto_constant: Some(constant),
            ..Self::new(name, ty)
        }
    }

    #[must_use]
    pub fn with_array_size(mut self, size: u32) -> Self {
        self.array_size = size.max(1);
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: Vec<f32>) -> Self {
        self.value = Some(value);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn ty(&self) -> ParameterType {
        self.ty
    }

    #[must_use]
    pub fn array_size(&self) -> u32 {
        self.array_size
    }

    #[must_use]
    pub fn auto_constant(&self) -> Option<AutoConstant> {
        self.auto_constant
    }

    #[must_use]
    pub fn value(&self) -> Option<&[f32]> {
        self.value.as_deref()
    }

    /// Binds this uniform onto a pass parameter set.
    ///
    /// A compiled program that does not expose this uniform (optimised out,
    /// or never referenced) leaves the parameter set untouched.
    pub fn bind(&self, params: &mut GpuProgramParameters) {
        let bound = if let Some(constant) = self.auto_constant {
            params.set_named_auto_constant(&self.name, constant)
        } else if let Some(value) = &self.value {
            params.set_named_constant(&self.name, value.clone())
        } else {
            params.set_named_manual(&self.name)
        };

        if !bound {
            log::trace!("Uniform '{}' has no matching GPU constant", self.name);
        }
    }
}
