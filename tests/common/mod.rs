//! Shared fixtures for the integration tests: a recording shader backend and
//! render-state builders.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use myth_shadergen::gpu::{CompileRequest, CompiledShader, ConstantDefinition, ShaderBackend};
use myth_shadergen::{
    AutoConstant, Function, LanguageId, ParameterType, Program, ProgramManager,
    ProgramManagerSettings, RenderState, Semantic, ShaderParameter, ShaderStage, UniformParameter,
};

/// One compilation as seen by the backend.
#[derive(Debug, Clone)]
pub struct RecordedCompile {
    pub name: String,
    pub language: LanguageId,
    pub stage: ShaderStage,
    pub source: String,
    pub parameters: BTreeMap<String, String>,
}

/// Handles shared between a test and the backend it handed to a manager.
#[derive(Debug, Clone, Default)]
pub struct BackendProbe {
    pub compiles: Arc<AtomicUsize>,
    pub requests: Arc<Mutex<Vec<RecordedCompile>>>,
}

impl BackendProbe {
    pub fn compile_count(&self) -> usize {
        self.compiles.load(Ordering::SeqCst)
    }

    pub fn request(&self, name: &str) -> Option<RecordedCompile> {
        self.requests.lock().iter().find(|r| r.name == name).cloned()
    }
}

/// Backend that accepts everything, except sources containing the failure
/// trigger, and reflects a fixed list of constants.
#[derive(Debug, Default)]
pub struct MockBackend {
    probe: BackendProbe,
    supported_syntax: HashSet<String>,
    fail_trigger: Option<String>,
    constants: Vec<ConstantDefinition>,
}

impl MockBackend {
    pub fn new() -> (Self, BackendProbe) {
        let backend = Self::default();
        let probe = backend.probe.clone();
        (backend, probe)
    }

    pub fn with_syntax(mut self, syntax: &str) -> Self {
        self.supported_syntax.insert(syntax.to_string());
        self
    }

    /// Compilation fails for any source containing `trigger`.
    pub fn failing_on(mut self, trigger: &str) -> Self {
        self.fail_trigger = Some(trigger.to_string());
        self
    }

    pub fn with_constant(mut self, name: &str, ty: ParameterType) -> Self {
        self.constants.push(ConstantDefinition::new(name, ty));
        self
    }
}

impl ShaderBackend for MockBackend {
    fn is_syntax_supported(&self, syntax: &str) -> bool {
        self.supported_syntax.contains(syntax)
    }

    fn compile(&self, request: &CompileRequest<'_>) -> Result<CompiledShader, String> {
        self.probe.compiles.fetch_add(1, Ordering::SeqCst);
        self.probe.requests.lock().push(RecordedCompile {
            name: request.name.to_string(),
            language: request.language.clone(),
            stage: request.stage,
            source: request.source.to_string(),
            parameters: request.parameters.clone(),
        });

        if let Some(trigger) = &self.fail_trigger {
            if request.source.contains(trigger.as_str()) {
                return Err(format!("error: '{trigger}' is not a valid statement"));
            }
        }

        Ok(CompiledShader {
            constants: self.constants.clone(),
        })
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn manager_with(backend: MockBackend, settings: ProgramManagerSettings) -> ProgramManager {
    init_logging();
    ProgramManager::new(settings, Box::new(backend))
}

pub fn vertex_program() -> Program {
    let mut main = Function::new("main");
    main.resolve_output(ShaderParameter::new("oPos", ParameterType::Float4, Semantic::Position, 0));
    main.resolve_output(ShaderParameter::new("oUv", ParameterType::Float2, Semantic::TexCoord, 0));
    main.push_statement("oPos = worldViewProj * iPos;");

    let mut program = Program::new(ShaderStage::Vertex, main);
    program
        .add_parameter(UniformParameter::auto(
            "worldViewProj",
            ParameterType::Matrix4x4,
            AutoConstant::WorldViewProjMatrix,
        ))
        .unwrap();
    program
}

/// A fragment program whose body is the single statement `statement`.
pub fn fragment_program(statement: &str) -> Program {
    let mut main = Function::new("main");
    main.resolve_input(ShaderParameter::new("iUv", ParameterType::Float2, Semantic::TexCoord, 0));
    main.push_statement(statement);

    let mut program = Program::new(ShaderStage::Fragment, main);
    program
        .add_parameter(UniformParameter::new("diffuseMap", ParameterType::Sampler2D))
        .unwrap();
    program
}

pub fn geometry_program() -> Program {
    let mut main = Function::new("main");
    main.resolve_input(ShaderParameter::new("iUv", ParameterType::Float2, Semantic::TexCoord, 0));
    main.resolve_output(ShaderParameter::new("oUv", ParameterType::Float2, Semantic::TexCoord, 0));
    main.push_statement("EmitVertex();");
    Program::new(ShaderStage::Geometry, main)
}

pub fn render_state(fragment_statement: &str) -> RenderState {
    RenderState::new(vertex_program(), fragment_program(fragment_statement))
}
