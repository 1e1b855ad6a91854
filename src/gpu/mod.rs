//! GPU Programs
//!
//! Compiled, driver-backed programs and the structures that own them:
//! - [`ShaderBackend`]: the driver seam (syntax support + compilation)
//! - [`GpuProgramRegistry`]: name-keyed store of loaded programs
//! - [`GpuProgramCache`]: per-stage cache of generated programs, with
//!   pass-scoped eviction
//! - [`GpuProgramParameters`]: per-pass constant bindings

pub mod backend;
pub mod cache;
pub mod parameters;
pub mod program;
pub mod registry;

pub use backend::{CompileRequest, CompiledShader, ConstantDefinition, ShaderBackend};
pub use cache::{GpuProgramCache, RETAINED_REFERENCES};
pub use parameters::{GpuProgramParameters, NamedConstant, ParameterBinding};
pub use program::{
    DEFAULT_RESOURCE_GROUP, GpuProgram, GpuProgramDescriptor, ProgramSource, param_keys,
};
pub use registry::GpuProgramRegistry;
