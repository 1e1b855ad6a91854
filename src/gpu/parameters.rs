//! Pass Parameter Sets
//!
//! A [`GpuProgramParameters`] holds one slot per constant a compiled program
//! exposes, and records how each slot is fed: by an engine auto-constant, by
//! a fixed value, by the application (manual), or by a texture unit.

use rustc_hash::FxHashMap;

use super::backend::ConstantDefinition;
use crate::program::AutoConstant;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ParameterBinding {
    #[default]
    Unbound,
    /// Filled in by the application.
    Manual,
    Auto(AutoConstant),
    Value(Vec<f32>),
    Sampler(u32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamedConstant {
    pub definition: ConstantDefinition,
    pub binding: ParameterBinding,
}

#[derive(Debug, Clone, Default)]
pub struct GpuProgramParameters {
    constants: Vec<NamedConstant>,
    lookup: FxHashMap<String, usize>,
}

impl GpuProgramParameters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_definitions(definitions: impl IntoIterator<Item = ConstantDefinition>) -> Self {
        let mut params = Self::new();
        for definition in definitions {
            if params.lookup.contains_key(&definition.name) {
                continue;
            }
            params
                .lookup
                .insert(definition.name.clone(), params.constants.len());
            params.constants.push(NamedConstant {
                definition,
                binding: ParameterBinding::Unbound,
            });
        }
        params
    }

    #[must_use]
    pub fn has_named_constant(&self, name: &str) -> bool {
        self.lookup.contains_key(name)
    }

    #[must_use]
    pub fn binding(&self, name: &str) -> Option<&ParameterBinding> {
        self.lookup.get(name).map(|&i| &self.constants[i].binding)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedConstant> {
        self.constants.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.constants.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constants.is_empty()
    }

    fn slot_mut(&mut self, name: &str) -> Option<&mut ParameterBinding> {
        let index = *self.lookup.get(name)?;
        Some(&mut self.constants[index].binding)
    }

    /// Returns `false` when no constant is named `name`.
    pub fn set_named_auto_constant(&mut self, name: &str, constant: AutoConstant) -> bool {
        let Some(slot) = self.slot_mut(name) else {
            return false;
        };
        *slot = ParameterBinding::Auto(constant);
        true
    }

    /// Returns `false` when no constant is named `name`.
    pub fn set_named_constant(&mut self, name: &str, value: Vec<f32>) -> bool {
        let Some(slot) = self.slot_mut(name) else {
            return false;
        };
        *slot = ParameterBinding::Value(value);
        true
    }

    pub fn set_named_sampler(&mut self, name: &str, unit: u32) -> bool {
        let Some(slot) = self.slot_mut(name) else {
            return false;
        };
        *slot = ParameterBinding::Sampler(unit);
        true
    }

    /// Marks a constant as application-fed. Leaves existing bindings alone.
    pub fn set_named_manual(&mut self, name: &str) -> bool {
        let Some(slot) = self.slot_mut(name) else {
            return false;
        };
        if *slot == ParameterBinding::Unbound {
            *slot = ParameterBinding::Manual;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::ParameterType;

    fn params() -> GpuProgramParameters {
        GpuProgramParameters::from_definitions([
            ConstantDefinition::new("uWorldViewProj", ParameterType::Matrix4x4),
            ConstantDefinition::new("uDiffuseMap", ParameterType::Sampler2D),
        ])
    }

    #[test]
    fn test_unknown_constant_is_a_no_op() {
        let mut p = params();
        assert!(!p.set_named_auto_constant("uMissing", AutoConstant::Time));
        assert!(p.binding("uMissing").is_none());
        assert_eq!(p.len(), 2);
    }

    #[test]
    fn test_manual_does_not_override_sampler_unit() {
        let mut p = params();
        p.set_named_sampler("uDiffuseMap", 3);
        assert!(p.set_named_manual("uDiffuseMap"));
        assert_eq!(p.binding("uDiffuseMap"), Some(&ParameterBinding::Sampler(3)));
    }

    #[test]
    fn test_auto_binding_is_idempotent() {
        let mut p = params();
        p.set_named_auto_constant("uWorldViewProj", AutoConstant::WorldViewProjMatrix);
        p.set_named_auto_constant("uWorldViewProj", AutoConstant::WorldViewProjMatrix);
        assert_eq!(
            p.binding("uWorldViewProj"),
            Some(&ParameterBinding::Auto(AutoConstant::WorldViewProjMatrix))
        );
    }
}
