use std::sync::Arc;

use super::cpu_program::Program;
use super::stage::ShaderStage;
use crate::errors::{ProgramError, Result};
use crate::gpu::GpuProgram;

/// The per-pass bundle of CPU programs and their compiled counterparts.
///
/// Vertex and fragment programs are mandatory; geometry is optional.
#[derive(Debug)]
pub struct ProgramSet {
    vertex: Program,
    fragment: Program,
    geometry: Option<Program>,
    gpu_programs: [Option<Arc<GpuProgram>>; ShaderStage::COUNT],
}

fn check_stage(program: &Program, expected: ShaderStage) -> Result<()> {
    if program.stage() == expected {
        Ok(())
    } else {
        Err(ProgramError::StageMismatch {
            expected,
            found: program.stage(),
        })
    }
}

impl ProgramSet {
    /// Fails if a program sits in the slot of another stage.
    pub fn new(vertex: Program, fragment: Program, geometry: Option<Program>) -> Result<Self> {
        check_stage(&vertex, ShaderStage::Vertex)?;
        check_stage(&fragment, ShaderStage::Fragment)?;
        if let Some(geometry) = &geometry {
            check_stage(geometry, ShaderStage::Geometry)?;
        }

        Ok(Self {
            vertex,
            fragment,
            geometry,
            gpu_programs: Default::default(),
        })
    }

    #[must_use]
    pub fn cpu_program(&self, stage: ShaderStage) -> Option<&Program> {
        match stage {
            ShaderStage::Vertex => Some(&self.vertex),
            ShaderStage::Fragment => Some(&self.fragment),
            ShaderStage::Geometry => self.geometry.as_ref(),
        }
    }

    pub fn cpu_program_mut(&mut self, stage: ShaderStage) -> Option<&mut Program> {
        match stage {
            ShaderStage::Vertex => Some(&mut self.vertex),
            ShaderStage::Fragment => Some(&mut self.fragment),
            ShaderStage::Geometry => self.geometry.as_mut(),
        }
    }

    /// Borrows two adjacent stages at once, upstream first.
    ///
    /// Returns `None` for a missing geometry stage or a pair that is not
    /// adjacent in the pipeline.
    pub fn stage_pair_mut(
        &mut self,
        upstream: ShaderStage,
        downstream: ShaderStage,
    ) -> Option<(&mut Program, &mut Program)> {
        match (upstream, downstream) {
            (ShaderStage::Vertex, ShaderStage::Fragment) => {
                Some((&mut self.vertex, &mut self.fragment))
            }
            (ShaderStage::Vertex, ShaderStage::Geometry) => {
                self.geometry.as_mut().map(|gs| (&mut self.vertex, gs))
            }
            (ShaderStage::Geometry, ShaderStage::Fragment) => {
                self.geometry.as_mut().map(|gs| (gs, &mut self.fragment))
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn has_geometry(&self) -> bool {
        self.geometry.is_some()
    }

    /// Iterates the present CPU programs in table order.
    pub fn cpu_programs_mut(&mut self) -> impl Iterator<Item = &mut Program> {
        [Some(&mut self.vertex), Some(&mut self.fragment), self.geometry.as_mut()]
            .into_iter()
            .flatten()
    }

    #[must_use]
    pub fn gpu_program(&self, stage: ShaderStage) -> Option<&Arc<GpuProgram>> {
        self.gpu_programs[stage.index()].as_ref()
    }

    pub fn set_gpu_program(&mut self, stage: ShaderStage, program: Arc<GpuProgram>) {
        self.gpu_programs[stage.index()] = Some(program);
    }

    /// Detaches every compiled program from the set.
    pub fn take_gpu_programs(&mut self) -> [Option<Arc<GpuProgram>>; ShaderStage::COUNT] {
        std::mem::take(&mut self.gpu_programs)
    }
}
