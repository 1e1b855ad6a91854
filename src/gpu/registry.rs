//! GPU Program Registry
//!
//! Name-keyed store of every loaded GPU program, and the only place the
//! driver backend is asked to compile anything. The program manager looks
//! programs up here before generating a new one, which is what makes each
//! generated name compile at most once.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::backend::{CompileRequest, ShaderBackend};
use super::program::{GpuProgram, GpuProgramDescriptor, ProgramSource};
use crate::errors::{ProgramError, Result};
use crate::program::{LanguageId, ShaderStage};

pub struct GpuProgramRegistry {
    backend: Box<dyn ShaderBackend>,
    programs: FxHashMap<String, Arc<GpuProgram>>,
    /// Directory file-backed sources are resolved against.
    source_root: Option<PathBuf>,
}

impl GpuProgramRegistry {
    #[must_use]
    pub fn new(backend: Box<dyn ShaderBackend>) -> Self {
        Self {
            backend,
            programs: FxHashMap::default(),
            source_root: None,
        }
    }

    #[must_use]
    pub fn backend(&self) -> &dyn ShaderBackend {
        self.backend.as_ref()
    }

    #[must_use]
    pub fn source_root(&self) -> Option<&Path> {
        self.source_root.as_deref()
    }

    pub fn set_source_root(&mut self, root: Option<PathBuf>) {
        self.source_root = root;
    }

    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<Arc<GpuProgram>> {
        self.programs.get(name).cloned()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.programs.contains_key(name)
    }

    /// Starts creating a program. Nothing is registered until [`Self::load`].
    pub fn create_program(
        &self,
        name: &str,
        group: &str,
        language: &LanguageId,
        stage: ShaderStage,
    ) -> Result<GpuProgramDescriptor> {
        if self.contains(name) {
            return Err(ProgramError::DuplicateProgram(name.to_string()));
        }
        Ok(GpuProgramDescriptor::new(name, group, language, stage))
    }

    /// Compiles a created program and registers it under its name.
    pub fn load(&mut self, descriptor: GpuProgramDescriptor) -> Result<Arc<GpuProgram>> {
        if self.contains(&descriptor.name) {
            return Err(ProgramError::DuplicateProgram(descriptor.name));
        }

        let file_source;
        let source = match &descriptor.source {
            ProgramSource::Inline(source) => source.as_str(),
            ProgramSource::File(file) => {
                let path = match &self.source_root {
                    Some(root) => root.join(file),
                    None => file.clone(),
                };
                file_source = std::fs::read_to_string(&path)
                    .map_err(|source| ProgramError::SourceRead { path, source })?;
                file_source.as_str()
            }
        };

        let request = CompileRequest {
            name: &descriptor.name,
            language: &descriptor.language,
            stage: descriptor.stage,
            source,
            parameters: &descriptor.parameters,
        };

        let compiled = self
            .backend
            .compile(&request)
            .map_err(|details| ProgramError::Compilation {
                name: descriptor.name.clone(),
                details,
            })?;

        log::debug!(
            "Loaded {} program '{}' ({} constants)",
            descriptor.stage,
            descriptor.name,
            compiled.constants.len()
        );

        let program = Arc::new(GpuProgram::from_descriptor(descriptor, compiled.constants));
        self.programs
            .insert(program.name().to_string(), Arc::clone(&program));
        Ok(program)
    }

    pub fn remove(&mut self, name: &str) -> Option<Arc<GpuProgram>> {
        let removed = self.programs.remove(name);
        if removed.is_some() {
            log::debug!("Removed gpu program '{name}'");
        }
        removed
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.programs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}
