//! Program Model
//!
//! Hardware-agnostic description of the programs a pass needs:
//! - [`Program`]: one CPU program per stage (entry point + uniforms + flags)
//! - [`ProgramSet`]: the per-pass bundle of CPU and compiled programs
//! - [`Function`] / [`ShaderParameter`]: entry points and their stage interfaces
//! - [`UniformParameter`]: named uniforms bound onto pass parameters

pub mod cpu_program;
pub mod function;
pub mod language;
pub mod program_set;
pub mod stage;
pub mod types;
pub mod uniform;

pub use cpu_program::Program;
pub use function::{Function, ShaderParameter};
pub use language::LanguageId;
pub use program_set::ProgramSet;
pub use stage::ShaderStage;
pub use types::{AutoConstant, ParameterType, Semantic};
pub use uniform::UniformParameter;
