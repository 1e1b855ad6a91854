//! Program Manager
//!
//! Turns the CPU program sets of render states into compiled GPU programs
//! and binds them to passes.
//!
//! ## Acquisition
//!
//! [`ProgramManager::acquire_programs`] asks the render state for its CPU
//! programs, generates source for every stage with the writer of the active
//! target language, names each program after a hash of its source, and
//! compiles only names the registry has not seen. The pass is touched only
//! once every stage succeeded.
//!
//! ## Release
//!
//! [`ProgramManager::release_programs`] unbinds the pass and drops the
//! program set. Compiled programs no other pass references are evicted from
//! the cache and removed from the registry; shared ones stay.
//!
//! ## Threading
//!
//! The manager is meant to be owned by the render-setup phase and driven
//! from one thread. It performs no locking, and eviction relies on `Arc`
//! strong counts that are only meaningful without concurrent clones.
//! Callers processing passes on several threads must serialize access
//! to the manager themselves.

pub mod naming;

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::errors::{ProgramError, Result};
use crate::gpu::{
    DEFAULT_RESOURCE_GROUP, GpuProgram, GpuProgramCache, GpuProgramParameters, GpuProgramRegistry,
    ShaderBackend, param_keys,
};
use crate::pass::Pass;
use crate::processor::{
    ProgramProcessor, ProgramProcessors, SamplerBindingProcessor, VaryingPackingProcessor,
};
use crate::program::{LanguageId, Program, ProgramSet, ShaderStage};
use crate::render_state::TargetRenderState;
use crate::settings::{ProgramManagerSettings, ProgramNaming};
use crate::writer::{
    Dialect, ProgramWriter, ProgramWriterFactories, ProgramWriterFactory, TemplateWriterFactory,
};

use naming::{generate_guid, program_body};

pub struct ProgramManager {
    settings: ProgramManagerSettings,
    registry: GpuProgramRegistry,
    cache: GpuProgramCache,

    processors: ProgramProcessors,
    writer_factories: ProgramWriterFactories,
    /// Writers created so far, one per language.
    writers: FxHashMap<LanguageId, Arc<dyn ProgramWriter>>,

    default_processors: Vec<Arc<dyn ProgramProcessor>>,
    default_writer_factories: Vec<Arc<dyn ProgramWriterFactory>>,

    /// Counter for [`ProgramNaming::Sequential`].
    next_program_id: u64,
    is_shut_down: bool,
}

impl ProgramManager {
    /// Creates a manager compiling through `backend`, with the built-in
    /// processors and writer factories registered.
    #[must_use]
    pub fn new(settings: ProgramManagerSettings, backend: Box<dyn ShaderBackend>) -> Self {
        let mut manager = Self {
            settings,
            registry: GpuProgramRegistry::new(backend),
            cache: GpuProgramCache::new(),
            processors: ProgramProcessors::new(),
            writer_factories: ProgramWriterFactories::new(),
            writers: FxHashMap::default(),
            default_processors: Vec::new(),
            default_writer_factories: Vec::new(),
            next_program_id: 0,
            is_shut_down: false,
        };

        manager.create_default_program_processors();
        manager.create_default_program_writer_factories();
        manager
    }

    fn create_default_program_processors(&mut self) {
        let defaults: [Arc<dyn ProgramProcessor>; 4] = [
            Arc::new(VaryingPackingProcessor::new(LanguageId::CG)),
            Arc::new(SamplerBindingProcessor::new(LanguageId::GLSL)),
            Arc::new(VaryingPackingProcessor::new(LanguageId::HLSL)),
            Arc::new(SamplerBindingProcessor::new(LanguageId::GLSL_ES)),
        ];

        for processor in defaults {
            match self.processors.add(Arc::clone(&processor)) {
                Ok(()) => self.default_processors.push(processor),
                Err(err) => log::warn!("Skipping default processor: {err}"),
            }
        }
    }

    fn create_default_program_writer_factories(&mut self) {
        for dialect in Dialect::ALL {
            let factory: Arc<dyn ProgramWriterFactory> = Arc::new(TemplateWriterFactory::new(dialect));
            self.writer_factories.add_factory(Arc::clone(&factory));
            self.default_writer_factories.push(factory);
        }
    }

    // ── Settings ─────────────────────────────────────────────────────────────

    #[must_use]
    pub fn settings(&self) -> &ProgramManagerSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut ProgramManagerSettings {
        &mut self.settings
    }

    pub fn set_target_language(&mut self, language: LanguageId) {
        self.settings.target_language = language;
    }

    #[must_use]
    pub fn registry(&self) -> &GpuProgramRegistry {
        &self.registry
    }

    #[must_use]
    pub fn cache(&self) -> &GpuProgramCache {
        &self.cache
    }

    // ── Pass Binding ─────────────────────────────────────────────────────────

    /// Generates, compiles and binds the programs of `render_state` to `pass`.
    ///
    /// On failure the pass is left untouched, the render state's program
    /// set is destroyed, and the error names the pass (and the stage, for
    /// stage failures).
    pub fn acquire_programs(
        &mut self,
        pass: &mut Pass,
        render_state: &mut dyn TargetRenderState,
    ) -> Result<()> {
        let pass_name = pass.fully_qualified_name();

        match self.try_acquire_programs(pass, render_state, &pass_name) {
            Ok(()) => Ok(()),
            Err(source) => {
                if let Some(program_set) = render_state.program_set_mut() {
                    self.release_gpu_programs(program_set);
                }
                render_state.destroy_program_set();

                log::error!("Failed to acquire programs for pass '{pass_name}': {source}");
                Err(ProgramError::PassBinding {
                    pass: pass_name,
                    source: Box::new(source),
                })
            }
        }
    }

    fn try_acquire_programs(
        &mut self,
        pass: &mut Pass,
        render_state: &mut dyn TargetRenderState,
        pass_name: &str,
    ) -> Result<()> {
        render_state.create_cpu_programs()?;
        let program_set = render_state
            .program_set_mut()
            .ok_or(ProgramError::MissingProgramSet)?;

        for program in program_set.cpu_programs_mut() {
            program.set_source_pass_name(pass_name);
        }

        self.create_gpu_programs(program_set)?;

        for stage in ShaderStage::ALL {
            if let Some(gpu_program) = program_set.gpu_program(stage) {
                pass.set_program(gpu_program);
            }
        }

        for stage in ShaderStage::ALL {
            if let (Some(program), Some(params)) =
                (program_set.cpu_program(stage), pass.parameters_mut(stage))
            {
                Self::bind_uniform_parameters(program, params);
            }
        }

        Ok(())
    }

    /// Unbinds `pass` and destroys the program set of `render_state`.
    ///
    /// Compiled programs still used by another pass are kept.
    pub fn release_programs(&mut self, pass: &mut Pass, render_state: &mut dyn TargetRenderState) {
        let Some(program_set) = render_state.program_set_mut() else {
            return;
        };

        for stage in ShaderStage::ALL {
            pass.clear_program(stage);
        }

        self.release_gpu_programs(program_set);
        render_state.destroy_program_set();
    }

    /// Binds every uniform of `program`, in declaration order.
    pub fn bind_uniform_parameters(program: &Program, params: &mut GpuProgramParameters) {
        for parameter in program.parameters() {
            parameter.bind(params);
        }
    }

    // ── Generation ───────────────────────────────────────────────────────────

    /// Creates the compiled programs of `program_set` for the active target
    /// language.
    ///
    /// Either every stage gets a compiled program, or none does: on failure
    /// the programs attached so far are detached again and evicted when no
    /// other pass holds them.
    pub fn create_gpu_programs(&mut self, program_set: &mut ProgramSet) -> Result<()> {
        let result = self.generate_gpu_programs(program_set);
        if result.is_err() {
            self.release_gpu_programs(program_set);
        }
        result
    }

    fn generate_gpu_programs(&mut self, program_set: &mut ProgramSet) -> Result<()> {
        // Modern shader models require each stage's inputs to match the
        // previous stage's outputs exactly.
        if self
            .registry
            .backend()
            .is_syntax_supported(&self.settings.stage_sync_syntax)
        {
            Self::synchronize_shader_stages_variables(program_set);
        }

        let language = self.settings.target_language.clone();
        let writer = self.program_writer(&language)?;
        let processor = self
            .processors
            .get(&language)
            .cloned()
            .ok_or_else(|| ProgramError::MissingProcessor(language.clone()))?;

        if !processor.pre_create_gpu_programs(program_set) {
            return Err(ProgramError::PreCreateFailed(language));
        }

        for stage in ShaderStage::GENERATION_ORDER {
            let gpu_program = {
                let Some(program) = program_set.cpu_program(stage) else {
                    continue;
                };

                let gpu_program = self
                    .create_gpu_program(program, writer.as_ref(), &language)
                    .map_err(|err| err.in_stage(stage))?;

                if stage == ShaderStage::Vertex {
                    gpu_program.set_skeletal_animation_included(program.skeletal_animation_included());
                }
                gpu_program
            };

            program_set.set_gpu_program(stage, gpu_program);
        }

        if !processor.post_create_gpu_programs(program_set) {
            return Err(ProgramError::PostCreateFailed(language));
        }

        Ok(())
    }

    /// Returns the compiled program for `program`, compiling it only if no
    /// program with the same generated name exists yet.
    ///
    /// With a cache directory configured, the source file is written before
    /// compiling and stays on disk if compilation fails; a retry generates
    /// the same name and content and reuses it.
    pub fn create_gpu_program(
        &mut self,
        program: &Program,
        writer: &dyn ProgramWriter,
        language: &LanguageId,
    ) -> Result<Arc<GpuProgram>> {
        let stage = program.stage();
        let source = writer.write_source_code(program)?;

        let base_name = match self.settings.naming {
            ProgramNaming::ContentHash => {
                let marker = writer.start_marker();
                let body =
                    program_body(&source, marker).ok_or_else(|| ProgramError::MissingStartMarker {
                        stage,
                        marker: marker.to_string(),
                    })?;
                generate_guid(body)
            }
            ProgramNaming::Sequential => {
                self.next_program_id += 1;
                format!("program_{}", self.next_program_id)
            }
        };
        let name = format!("{base_name}{}", stage.name_suffix());

        if let Some(existing) = self.registry.get_by_name(&name) {
            log::trace!("Reusing {stage} program '{name}'");
            return Ok(existing);
        }

        let mut descriptor =
            self.registry
                .create_program(&name, DEFAULT_RESOURCE_GROUP, language, stage)?;

        match &self.settings.shader_cache_path {
            Some(cache_path) => {
                let file_name = format!("{name}.{language}");
                let path = cache_path.join(&file_name);
                if !path.exists() {
                    std::fs::write(&path, &source)
                        .map_err(|source| ProgramError::CacheWrite {
                            path: path.clone(),
                            source,
                        })?;
                    log::info!("Wrote generated program to '{}'", path.display());
                }
                descriptor.set_source_file(file_name);
            }
            None => descriptor.set_source(source),
        }

        descriptor.set_parameter(param_keys::ENTRY_POINT, program.entry_point().name());

        if *language == LanguageId::HLSL {
            let backend = self.registry.backend();
            if let Some(target) = self
                .settings
                .profiles_list(stage)
                .find(|profile| backend.is_syntax_supported(profile))
            {
                descriptor.set_parameter(param_keys::TARGET, target);
            }
            descriptor.set_parameter(param_keys::ENABLE_BACKWARDS_COMPATIBILITY, "false");
            descriptor.set_parameter(
                param_keys::COLUMN_MAJOR_MATRICES,
                program.use_column_major_matrices().to_string(),
            );
        }

        descriptor.set_parameter(param_keys::PROFILES, self.settings.profiles(stage));

        self.registry
            .set_source_root(self.settings.shader_cache_path.clone());
        let gpu_program = self.registry.load(descriptor)?;

        log::debug!(
            "Created {stage} program '{name}' for pass '{}'",
            program.source_pass_name()
        );

        self.cache.insert(Arc::clone(&gpu_program));
        Ok(gpu_program)
    }

    /// Makes the geometry (if any) and fragment inputs mirror the outputs
    /// of the stage feeding them.
    pub fn synchronize_shader_stages_variables(program_set: &mut ProgramSet) {
        if program_set.has_geometry() {
            if let Some((vs, gs)) = program_set.stage_pair_mut(ShaderStage::Vertex, ShaderStage::Geometry) {
                gs.entry_point_mut()
                    .synchronize_input_params_to(vs.entry_point());
            }
            if let Some((gs, fs)) =
                program_set.stage_pair_mut(ShaderStage::Geometry, ShaderStage::Fragment)
            {
                fs.entry_point_mut()
                    .synchronize_input_params_to(gs.entry_point());
            }
        } else if let Some((vs, fs)) =
            program_set.stage_pair_mut(ShaderStage::Vertex, ShaderStage::Fragment)
        {
            fs.entry_point_mut()
                .synchronize_input_params_to(vs.entry_point());
        }
    }

    // ── Cache ────────────────────────────────────────────────────────────────

    fn release_gpu_programs(&mut self, program_set: &mut ProgramSet) {
        for gpu_program in program_set.take_gpu_programs().into_iter().flatten() {
            let stage = gpu_program.stage();
            let name = gpu_program.name().to_string();
            drop(gpu_program);

            if let Some(evicted) = self.cache.take_if_unshared(stage, &name) {
                self.destroy_gpu_program(&evicted);
            }
        }
    }

    fn destroy_gpu_program(&mut self, gpu_program: &GpuProgram) {
        if self.registry.remove(gpu_program.name()).is_some() {
            log::debug!(
                "Evicted {} program '{}'",
                gpu_program.stage(),
                gpu_program.name()
            );
        }
    }

    /// Evicts every cached program, shared or not.
    pub fn flush_gpu_programs_cache(&mut self) {
        for gpu_program in self.cache.drain() {
            self.destroy_gpu_program(&gpu_program);
        }
    }

    #[must_use]
    pub fn shader_count(&self, stage: ShaderStage) -> usize {
        self.cache.len(stage)
    }

    #[must_use]
    pub fn vertex_shader_count(&self) -> usize {
        self.shader_count(ShaderStage::Vertex)
    }

    #[must_use]
    pub fn fragment_shader_count(&self) -> usize {
        self.shader_count(ShaderStage::Fragment)
    }

    #[must_use]
    pub fn geometry_shader_count(&self) -> usize {
        self.shader_count(ShaderStage::Geometry)
    }

    // ── Processors & Writers ─────────────────────────────────────────────────

    /// Registers a processor. Fails if one is already registered for its
    /// language; the existing registration is kept.
    pub fn add_program_processor(&mut self, processor: Arc<dyn ProgramProcessor>) -> Result<()> {
        self.processors.add(processor)
    }

    pub fn remove_program_processor(
        &mut self,
        language: &LanguageId,
    ) -> Option<Arc<dyn ProgramProcessor>> {
        self.processors.remove(language)
    }

    #[must_use]
    pub fn program_processor(&self, language: &LanguageId) -> Option<&Arc<dyn ProgramProcessor>> {
        self.processors.get(language)
    }

    /// Registers a writer factory, replacing the one for the same language.
    ///
    /// A writer already created for that language is discarded, so the
    /// next generation uses the new factory.
    pub fn add_program_writer_factory(
        &mut self,
        factory: Arc<dyn ProgramWriterFactory>,
    ) -> Option<Arc<dyn ProgramWriterFactory>> {
        self.writers.remove(factory.target_language());
        self.writer_factories.add_factory(factory)
    }

    pub fn remove_program_writer_factory(
        &mut self,
        language: &LanguageId,
    ) -> Option<Arc<dyn ProgramWriterFactory>> {
        self.writers.remove(language);
        self.writer_factories.remove_factory(language)
    }

    /// The writer for `language`, created through its factory on first use.
    pub fn program_writer(&mut self, language: &LanguageId) -> Result<Arc<dyn ProgramWriter>> {
        if let Some(writer) = self.writers.get(language) {
            return Ok(Arc::clone(writer));
        }

        let writer: Arc<dyn ProgramWriter> =
            Arc::from(self.writer_factories.create_program_writer(language)?);
        self.writers.insert(language.clone(), Arc::clone(&writer));
        Ok(writer)
    }

    // ── Teardown ─────────────────────────────────────────────────────────────

    /// Evicts every cached program and unregisters the built-in processors,
    /// writer factories and cached writers. Runs on drop; idempotent.
    pub fn shutdown(&mut self) {
        if self.is_shut_down {
            return;
        }

        self.flush_gpu_programs_cache();

        for processor in std::mem::take(&mut self.default_processors) {
            let language = processor.target_language();
            if self
                .processors
                .get(language)
                .is_some_and(|registered| Arc::ptr_eq(registered, &processor))
            {
                self.processors.remove(language);
            }
        }

        for factory in std::mem::take(&mut self.default_writer_factories) {
            self.writer_factories.remove_factory(factory.target_language());
        }

        self.writers.clear();
        self.is_shut_down = true;
        log::debug!("Program manager shut down");
    }

    #[must_use]
    pub fn is_shut_down(&self) -> bool {
        self.is_shut_down
    }
}

impl Drop for ProgramManager {
    fn drop(&mut self) {
        self.shutdown();
    }
}
