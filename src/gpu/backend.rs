use std::collections::BTreeMap;

use crate::program::{LanguageId, ParameterType, ShaderStage};

/// Everything the driver needs to compile one generated program.
#[derive(Debug, Clone, Copy)]
pub struct CompileRequest<'a> {
    pub name: &'a str,
    pub language: &'a LanguageId,
    pub stage: ShaderStage,
    pub source: &'a str,
    /// `entry_point`, `profiles`, `target`, ... as set during generation.
    pub parameters: &'a BTreeMap<String, String>,
}

/// A constant the compiled program exposes for binding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConstantDefinition {
    pub name: String,
    pub ty: ParameterType,
    pub array_size: u32,
}

impl ConstantDefinition {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: ParameterType) -> Self {
        Self {
            name: name.into(),
            ty,
            array_size: 1,
        }
    }
}

/// Result of a successful compilation.
#[derive(Debug, Clone, Default)]
pub struct CompiledShader {
    /// Reflected constants, in the order the driver reports them.
    pub constants: Vec<ConstantDefinition>,
}

/// The graphics driver as seen by the program registry.
///
/// Implementations wrap a concrete API (GL program objects, D3D shader
/// blobs, ...). The manager calls it synchronously from a single thread.
pub trait ShaderBackend {
    /// Whether the driver accepts programs written for `syntax`
    /// (a profile or shader-model string such as `"vs_4_0"` or `"glsl330"`).
    fn is_syntax_supported(&self, syntax: &str) -> bool;

    /// Compiles a generated program.
    ///
    /// On failure returns the driver's diagnostic text.
    fn compile(&self, request: &CompileRequest<'_>) -> Result<CompiledShader, String>;
}
