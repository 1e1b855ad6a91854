use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::backend::ConstantDefinition;
use super::parameters::GpuProgramParameters;
use crate::program::{LanguageId, ShaderStage};

/// Well-known keys of [`GpuProgramDescriptor`] parameters.
pub mod param_keys {
    pub const ENTRY_POINT: &str = "entry_point";
    pub const PROFILES: &str = "profiles";
    pub const TARGET: &str = "target";
    pub const ENABLE_BACKWARDS_COMPATIBILITY: &str = "enable_backwards_compatibility";
    pub const COLUMN_MAJOR_MATRICES: &str = "column_major_matrices";
}

/// Resource group generated programs are created in.
pub const DEFAULT_RESOURCE_GROUP: &str = "General";

/// Where a program's source text lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramSource {
    /// Source held in memory.
    Inline(String),
    /// Source file name, resolved against the registry's source root.
    File(PathBuf),
}

/// A GPU program that has been created but not yet loaded.
#[derive(Debug, Clone)]
pub struct GpuProgramDescriptor {
    pub(crate) name: String,
    pub(crate) group: String,
    pub(crate) language: LanguageId,
    pub(crate) stage: ShaderStage,
    pub(crate) source: ProgramSource,
    pub(crate) parameters: BTreeMap<String, String>,
}

impl GpuProgramDescriptor {
    pub(crate) fn new(name: &str, group: &str, language: &LanguageId, stage: ShaderStage) -> Self {
        Self {
            name: name.to_string(),
            group: group.to_string(),
            language: language.clone(),
            stage,
            source: ProgramSource::Inline(String::new()),
            parameters: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_source(&mut self, source: String) {
        self.source = ProgramSource::Inline(source);
    }

    pub fn set_source_file(&mut self, file: impl Into<PathBuf>) {
        self.source = ProgramSource::File(file.into());
    }

    pub fn set_parameter(&mut self, key: &str, value: impl Into<String>) {
        self.parameters.insert(key.to_string(), value.into());
    }

    #[must_use]
    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).map(String::as_str)
    }
}

/// A compiled, driver-backed program.
///
/// Shared through `Arc` by every program set whose generated source is
/// identical. Identity, source and reflected constants never change after
/// loading; the skeletal-animation flag and sampler units are updated in
/// place by the manager and processors.
#[derive(Debug)]
pub struct GpuProgram {
    name: String,
    group: String,
    language: LanguageId,
    stage: ShaderStage,
    source: ProgramSource,
    parameters: BTreeMap<String, String>,
    constants: Vec<ConstantDefinition>,
    skeletal_animation_included: AtomicBool,
    sampler_units: RwLock<FxHashMap<String, u32>>,
}

impl GpuProgram {
    pub(crate) fn from_descriptor(
        descriptor: GpuProgramDescriptor,
        constants: Vec<ConstantDefinition>,
    ) -> Self {
        Self {
            name: descriptor.name,
            group: descriptor.group,
            language: descriptor.language,
            stage: descriptor.stage,
            source: descriptor.source,
            parameters: descriptor.parameters,
            constants,
            skeletal_animation_included: AtomicBool::new(false),
            sampler_units: RwLock::new(FxHashMap::default()),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    #[must_use]
    pub fn language(&self) -> &LanguageId {
        &self.language
    }

    #[must_use]
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    #[must_use]
    pub fn source(&self) -> &ProgramSource {
        &self.source
    }

    /// The source file name, for file-backed programs.
    #[must_use]
    pub fn source_file(&self) -> Option<&Path> {
        match &self.source {
            ProgramSource::File(path) => Some(path),
            ProgramSource::Inline(_) => None,
        }
    }

    #[must_use]
    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn constant_definitions(&self) -> &[ConstantDefinition] {
        &self.constants
    }

    #[must_use]
    pub fn skeletal_animation_included(&self) -> bool {
        self.skeletal_animation_included.load(Ordering::Relaxed)
    }

    pub fn set_skeletal_animation_included(&self, included: bool) {
        self.skeletal_animation_included.store(included, Ordering::Relaxed);
    }

    #[must_use]
    pub fn sampler_unit(&self, sampler: &str) -> Option<u32> {
        self.sampler_units.read().get(sampler).copied()
    }

    pub fn set_sampler_unit(&self, sampler: &str, unit: u32) {
        self.sampler_units.write().insert(sampler.to_string(), unit);
    }

    /// Creates a fresh parameter set laid out after this program's constants.
    #[must_use]
    pub fn create_parameters(&self) -> GpuProgramParameters {
        let mut params = GpuProgramParameters::from_definitions(self.constants.iter().cloned());
        for (sampler, &unit) in self.sampler_units.read().iter() {
            params.set_named_sampler(sampler, unit);
        }
        params
    }
}
