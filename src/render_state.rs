//! Render States
//!
//! The program manager does not build CPU programs itself; it asks a
//! [`TargetRenderState`] to create them. [`RenderState`] is the plain
//! implementation: it keeps a CPU-program description and instantiates a
//! fresh [`ProgramSet`] from it on every creation.

use crate::errors::Result;
use crate::program::{Program, ProgramSet, ShaderStage};

pub trait TargetRenderState {
    /// Builds the CPU programs for this render state, replacing any set
    /// created earlier.
    fn create_cpu_programs(&mut self) -> Result<()>;

    fn program_set(&self) -> Option<&ProgramSet>;

    fn program_set_mut(&mut self) -> Option<&mut ProgramSet>;

    fn destroy_program_set(&mut self);
}

#[derive(Debug)]
pub struct RenderState {
    vertex: Program,
    fragment: Program,
    geometry: Option<Program>,
    program_set: Option<ProgramSet>,
}

impl RenderState {
    /// Stages are checked when the program set is created: a program in
    /// the slot of another stage makes [`TargetRenderState::create_cpu_programs`]
    /// fail with [`ProgramError::StageMismatch`].
    ///
    /// [`ProgramError::StageMismatch`]: crate::ProgramError::StageMismatch
    #[must_use]
    pub fn new(vertex: Program, fragment: Program) -> Self {
        Self {
            vertex,
            fragment,
            geometry: None,
            program_set: None,
        }
    }

    #[must_use]
    pub fn with_geometry(mut self, geometry: Program) -> Self {
        self.geometry = Some(geometry);
        self
    }

    /// The description programs are created from.
    #[must_use]
    pub fn description(&self, stage: ShaderStage) -> Option<&Program> {
        match stage {
            ShaderStage::Vertex => Some(&self.vertex),
            ShaderStage::Fragment => Some(&self.fragment),
            ShaderStage::Geometry => self.geometry.as_ref(),
        }
    }
}

impl TargetRenderState for RenderState {
    fn create_cpu_programs(&mut self) -> Result<()> {
        // Left empty when creation fails.
        self.program_set = None;
        self.program_set = Some(ProgramSet::new(
            self.vertex.clone(),
            self.fragment.clone(),
            self.geometry.clone(),
        )?);
        Ok(())
    }

    fn program_set(&self) -> Option<&ProgramSet> {
        self.program_set.as_ref()
    }

    fn program_set_mut(&mut self) -> Option<&mut ProgramSet> {
        self.program_set.as_mut()
    }

    fn destroy_program_set(&mut self) {
        self.program_set = None;
    }
}
