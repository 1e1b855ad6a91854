//! Template Program Writers
//!
//! Built-in writers for GLSL, GLSL ES, HLSL and Cg. Each dialect renders one
//! minijinja template (`templates/<dialect>.tmpl`) from a view of the CPU
//! program; type names and semantics are resolved per dialect before
//! rendering so the templates only lay out text.

use std::borrow::Cow;
use std::sync::OnceLock;

use minijinja::{Environment, Error, ErrorKind, syntax::SyntaxConfig};
use rust_embed::RustEmbed;
use serde::Serialize;

use super::{ProgramWriter, ProgramWriterFactory};
use crate::errors::Result;
use crate::program::{LanguageId, ParameterType, Program, Semantic, ShaderParameter};

static WRITER_ENV: OnceLock<Environment<'static>> = OnceLock::new();

#[derive(RustEmbed)]
#[folder = "src/writer/templates"]
struct WriterTemplates;

fn get_env() -> &'static Environment<'static> {
    WRITER_ENV.get_or_init(|| {
        let mut env = Environment::new();

        let syntax = SyntaxConfig::builder()
            .block_delimiters("{$", "$}")
            .variable_delimiters("{{", "}}")
            .line_statement_prefix("$$")
            .build()
            .expect("Failed to configure template syntax");

        env.set_syntax(syntax);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_undefined_behavior(minijinja::UndefinedBehavior::SemiStrict);
        env.set_loader(template_loader);

        env
    })
}

fn template_loader(name: &str) -> std::result::Result<Option<String>, Error> {
    let filename = if std::path::Path::new(name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("tmpl"))
    {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("{name}.tmpl"))
    };

    match WriterTemplates::get(&filename) {
        Some(file) => std::str::from_utf8(file.data.as_ref())
            .map(|source| Some(source.to_string()))
            .map_err(|e| {
                Error::new(
                    ErrorKind::InvalidOperation,
                    format!("Template '{filename}' is not valid UTF-8: {e}"),
                )
            }),
        None => Ok(None),
    }
}

/// A built-in source dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    Cg,
    Glsl,
    GlslEs,
    Hlsl,
}

impl Dialect {
    pub const ALL: [Dialect; 4] = [Self::Cg, Self::Glsl, Self::GlslEs, Self::Hlsl];

    #[must_use]
    pub fn language(self) -> LanguageId {
        match self {
            Self::Cg => LanguageId::CG,
            Self::Glsl => LanguageId::GLSL,
            Self::GlslEs => LanguageId::GLSL_ES,
            Self::Hlsl => LanguageId::HLSL,
        }
    }

    const fn template_name(self) -> &'static str {
        match self {
            Self::Cg | Self::Hlsl => "hlsl",
            Self::Glsl => "glsl",
            Self::GlslEs => "glsles",
        }
    }

    const fn type_name(self, ty: ParameterType) -> &'static str {
        match self {
            Self::Cg | Self::Hlsl => ty.hlsl_name(),
            Self::Glsl | Self::GlslEs => ty.glsl_name(),
        }
    }

    fn semantic(self, param: &ShaderParameter) -> String {
        match (self, param.semantic) {
            (Self::Glsl | Self::GlslEs, _) | (_, Semantic::Unknown) => String::new(),
            (_, semantic) => format!("{}{}", semantic.hlsl_name(), param.index),
        }
    }
}

#[derive(Serialize)]
struct UniformView<'a> {
    name: &'a str,
    ty: &'static str,
    array_size: u32,
}

#[derive(Serialize)]
struct VaryingView<'a> {
    name: &'a str,
    ty: &'static str,
    semantic: String,
}

#[derive(Serialize)]
struct ProgramContext<'a> {
    language: &'a str,
    stage: &'static str,
    source_pass: &'a str,
    description: &'a str,
    start_marker: &'a str,
    entry_point: &'a str,
    column_major: bool,
    uniforms: Vec<UniformView<'a>>,
    inputs: Vec<VaryingView<'a>>,
    outputs: Vec<VaryingView<'a>>,
    body: &'a [String],
}

/// Writer for one of the built-in dialects.
#[derive(Debug, Clone)]
pub struct TemplateProgramWriter {
    dialect: Dialect,
    language: LanguageId,
}

impl TemplateProgramWriter {
    #[must_use]
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            language: dialect.language(),
        }
    }

    #[must_use]
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn varyings<'a>(&self, params: &'a [ShaderParameter]) -> Vec<VaryingView<'a>> {
        params
            .iter()
            .map(|p| VaryingView {
                name: &p.name,
                ty: self.dialect.type_name(p.ty),
                semantic: self.dialect.semantic(p),
            })
            .collect()
    }
}

impl ProgramWriter for TemplateProgramWriter {
    fn target_language(&self) -> &LanguageId {
        &self.language
    }

    fn write_source_code(&self, program: &Program) -> Result<String> {
        let entry = program.entry_point();

        let ctx = ProgramContext {
            language: self.language.as_str(),
            stage: program.stage().as_str(),
            source_pass: program.source_pass_name(),
            description: entry.description(),
            start_marker: self.start_marker(),
            entry_point: entry.name(),
            column_major: program.use_column_major_matrices(),
            uniforms: program
                .parameters()
                .iter()
                .map(|u| UniformView {
                    name: u.name(),
                    ty: self.dialect.type_name(u.ty()),
                    array_size: u.array_size(),
                })
                .collect(),
            inputs: self.varyings(entry.inputs()),
            outputs: self.varyings(entry.outputs()),
            body: entry.body(),
        };

        let template = get_env().get_template(self.dialect.template_name())?;
        Ok(template.render(&ctx)?)
    }
}

/// Factory producing [`TemplateProgramWriter`]s for one dialect.
#[derive(Debug, Clone)]
pub struct TemplateWriterFactory {
    dialect: Dialect,
    language: LanguageId,
}

impl TemplateWriterFactory {
    #[must_use]
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            language: dialect.language(),
        }
    }
}

impl ProgramWriterFactory for TemplateWriterFactory {
    fn target_language(&self) -> &LanguageId {
        &self.language
    }

    fn create(&self) -> Box<dyn ProgramWriter> {
        Box::new(TemplateProgramWriter::new(self.dialect))
    }
}
