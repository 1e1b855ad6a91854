#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod errors;
pub mod gpu;
pub mod manager;
pub mod pass;
pub mod processor;
pub mod program;
pub mod render_state;
pub mod settings;
pub mod writer;

pub use errors::{ProgramError, Result};
pub use gpu::{
    CompileRequest, CompiledShader, ConstantDefinition, GpuProgram, GpuProgramCache,
    GpuProgramParameters, GpuProgramRegistry, ParameterBinding, ShaderBackend,
};
pub use manager::ProgramManager;
pub use manager::naming::generate_guid;
pub use pass::Pass;
pub use processor::{ProgramProcessor, SamplerBindingProcessor, VaryingPackingProcessor};
pub use program::{
    AutoConstant, Function, LanguageId, ParameterType, Program, ProgramSet, Semantic,
    ShaderParameter, ShaderStage, UniformParameter,
};
pub use render_state::{RenderState, TargetRenderState};
pub use settings::{ProgramManagerSettings, ProgramNaming};
pub use writer::{Dialect, ProgramWriter, ProgramWriterFactory, TemplateWriterFactory};
