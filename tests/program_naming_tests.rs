//! Program Naming Tests
//!
//! Tests for:
//! - Content-hash names: only the text after the writer's start marker counts
//! - Hash stability (pinned value) and hex layout
//! - Stage suffixes keeping identical bodies of different stages apart
//! - Writer output without a start marker
//! - Custom writer factories replacing the built-in ones
//! - Settings parsing

mod common;

use std::sync::Arc;

use common::{MockBackend, manager_with, render_state};

use myth_shadergen::{
    LanguageId, Pass, Program, ProgramError, ProgramManagerSettings, ProgramNaming, ProgramWriter,
    ProgramWriterFactory, ShaderStage, generate_guid,
};

/// Writes `<preamble>BEGIN_RTSS\n<body>`, where the preamble names the pass.
struct MarkerWriter {
    language: LanguageId,
    marker: &'static str,
}

impl ProgramWriter for MarkerWriter {
    fn target_language(&self) -> &LanguageId {
        &self.language
    }

    fn start_marker(&self) -> &str {
        self.marker
    }

    fn write_source_code(&self, program: &Program) -> myth_shadergen::Result<String> {
        Ok(format!(
            "// pass: {}\nBEGIN_RTSS\nvoid main(){{{}}}",
            program.source_pass_name(),
            program.entry_point().body().join(" ")
        ))
    }
}

struct MarkerWriterFactory {
    language: LanguageId,
    marker: &'static str,
}

impl ProgramWriterFactory for MarkerWriterFactory {
    fn target_language(&self) -> &LanguageId {
        &self.language
    }

    fn create(&self) -> Box<dyn ProgramWriter> {
        Box::new(MarkerWriter {
            language: self.language.clone(),
            marker: self.marker,
        })
    }
}

fn marker_factory(marker: &'static str) -> Arc<dyn ProgramWriterFactory> {
    Arc::new(MarkerWriterFactory {
        language: LanguageId::GLSL,
        marker,
    })
}

/// Writes the same program text for every stage; only the preamble differs.
struct UniformBodyWriter {
    language: LanguageId,
}

impl ProgramWriter for UniformBodyWriter {
    fn target_language(&self) -> &LanguageId {
        &self.language
    }

    fn start_marker(&self) -> &str {
        "BEGIN_RTSS"
    }

    fn write_source_code(&self, program: &Program) -> myth_shadergen::Result<String> {
        Ok(format!("// {} program\nBEGIN_RTSS{UNIFORM_BODY}", program.stage()))
    }
}

struct UniformBodyWriterFactory {
    language: LanguageId,
}

impl ProgramWriterFactory for UniformBodyWriterFactory {
    fn target_language(&self) -> &LanguageId {
        &self.language
    }

    fn create(&self) -> Box<dyn ProgramWriter> {
        Box::new(UniformBodyWriter {
            language: self.language.clone(),
        })
    }
}

const UNIFORM_BODY: &str = "\nvoid main(){...}";

/// Name of [`UNIFORM_BODY`]; fixed across runs and platforms.
const UNIFORM_BODY_GUID: &str = "7a2dbcde-1571-4223-22a1-3f80de0f7f6d";

// ============================================================================
// Content Hash Tests
// ============================================================================

#[test]
fn name_hashes_only_the_text_after_the_marker() {
    let (backend, _probe) = MockBackend::new();
    let mut manager = manager_with(backend, ProgramManagerSettings::default());
    manager.add_program_writer_factory(marker_factory("BEGIN_RTSS"));

    let mut pass = Pass::new("Stone", 0, "base");
    let mut rs = render_state("gl_FragColor = vec4(1.0);");
    manager.acquire_programs(&mut pass, &mut rs).unwrap();

    let expected = format!("{}_FS", generate_guid("\nvoid main(){gl_FragColor = vec4(1.0);}"));
    assert_eq!(pass.program_name(ShaderStage::Fragment), Some(expected.as_str()));
}

#[test]
fn preamble_differences_do_not_change_the_name() {
    let (backend, probe) = MockBackend::new();
    let mut manager = manager_with(backend, ProgramManagerSettings::default());
    manager.add_program_writer_factory(marker_factory("BEGIN_RTSS"));

    let mut pass_a = Pass::new("Stone", 0, "base");
    let mut pass_b = Pass::new("Marble", 3, "shadow");
    let mut rs_a = render_state("gl_FragColor = vec4(1.0);");
    let mut rs_b = render_state("gl_FragColor = vec4(1.0);");
    manager.acquire_programs(&mut pass_a, &mut rs_a).unwrap();
    manager.acquire_programs(&mut pass_b, &mut rs_b).unwrap();

    assert_eq!(
        pass_a.program_name(ShaderStage::Fragment),
        pass_b.program_name(ShaderStage::Fragment)
    );
    assert_eq!(probe.compile_count(), 2);
}

#[test]
fn guid_is_stable_and_hex_formatted() {
    let guid = generate_guid("\nvoid main(){}");
    assert_eq!(guid, generate_guid("\nvoid main(){}"));
    assert_eq!(guid.len(), 36);
    for (i, c) in guid.chars().enumerate() {
        if matches!(i, 8 | 13 | 18 | 23) {
            assert_eq!(c, '-');
        } else {
            assert!(c.is_ascii_hexdigit() && !c.is_ascii_uppercase());
        }
    }
}

#[test]
fn guid_matches_the_pinned_value() {
    assert_eq!(generate_guid(UNIFORM_BODY), UNIFORM_BODY_GUID);
}

#[test]
fn identical_bodies_in_different_stages_get_separate_programs() {
    let (backend, probe) = MockBackend::new();
    let mut manager = manager_with(backend, ProgramManagerSettings::default());
    manager.add_program_writer_factory(Arc::new(UniformBodyWriterFactory {
        language: LanguageId::GLSL,
    }));

    let mut pass_a = Pass::new("Stone", 0, "base");
    let mut pass_b = Pass::new("Marble", 0, "base");
    let mut rs_a = render_state("gl_FragColor = vec4(1.0);");
    let mut rs_b = render_state("gl_FragColor = vec4(0.5);");
    manager.acquire_programs(&mut pass_a, &mut rs_a).unwrap();
    manager.acquire_programs(&mut pass_b, &mut rs_b).unwrap();

    let vs = format!("{UNIFORM_BODY_GUID}_VS");
    let fs = format!("{UNIFORM_BODY_GUID}_FS");
    assert_eq!(pass_a.program_name(ShaderStage::Vertex), Some(vs.as_str()));
    assert_eq!(pass_a.program_name(ShaderStage::Fragment), Some(fs.as_str()));
    assert_eq!(pass_b.program_name(ShaderStage::Vertex), Some(vs.as_str()));
    assert_eq!(pass_b.program_name(ShaderStage::Fragment), Some(fs.as_str()));

    assert_eq!(probe.compile_count(), 2);
    assert_eq!(manager.vertex_shader_count(), 1);
    assert_eq!(manager.fragment_shader_count(), 1);
    assert!(manager.cache().contains(ShaderStage::Vertex, &vs));
    assert!(manager.cache().contains(ShaderStage::Fragment, &fs));

    manager.release_programs(&mut pass_a, &mut rs_a);
    assert!(manager.cache().contains(ShaderStage::Vertex, &vs));
    assert!(manager.cache().contains(ShaderStage::Fragment, &fs));
    assert!(manager.registry().contains(&vs));
    assert!(manager.registry().contains(&fs));

    manager.release_programs(&mut pass_b, &mut rs_b);
    assert!(manager.cache().is_empty());
    assert!(manager.registry().is_empty());
}

#[test]
fn single_character_changes_produce_different_names() {
    assert_ne!(generate_guid("void main(){a}"), generate_guid("void main(){b}"));
}

// ============================================================================
// Marker Tests
// ============================================================================

#[test]
fn source_without_marker_is_rejected() {
    let (backend, probe) = MockBackend::new();
    let mut manager = manager_with(backend, ProgramManagerSettings::default());
    manager.add_program_writer_factory(marker_factory("#version 450"));

    let mut pass = Pass::new("Stone", 0, "base");
    let mut rs = render_state("gl_FragColor = vec4(1.0);");
    let err = manager.acquire_programs(&mut pass, &mut rs).unwrap_err();

    assert!(matches!(
        err.root_cause(),
        ProgramError::MissingStartMarker { marker, .. } if marker == "#version 450"
    ));
    assert_eq!(err.stage(), Some(ShaderStage::Vertex));
    assert_eq!(probe.compile_count(), 0);
    assert!(!pass.has_program(ShaderStage::Vertex));
}

#[test]
fn sequential_naming_ignores_the_marker() {
    let (backend, _probe) = MockBackend::new();
    let settings = ProgramManagerSettings {
        naming: ProgramNaming::Sequential,
        ..Default::default()
    };
    let mut manager = manager_with(backend, settings);
    manager.add_program_writer_factory(marker_factory("#version 450"));

    let mut pass = Pass::new("Stone", 0, "base");
    let mut rs = render_state("gl_FragColor = vec4(1.0);");
    manager.acquire_programs(&mut pass, &mut rs).unwrap();

    assert_eq!(pass.program_name(ShaderStage::Vertex), Some("program_1_VS"));
}

// ============================================================================
// Writer Factory Tests
// ============================================================================

#[test]
fn replacing_a_factory_returns_the_previous_one() {
    let (backend, _probe) = MockBackend::new();
    let mut manager = manager_with(backend, ProgramManagerSettings::default());

    let previous = manager.add_program_writer_factory(marker_factory("BEGIN_RTSS"));
    assert!(previous.is_some_and(|f| *f.target_language() == LanguageId::GLSL));

    let removed = manager.remove_program_writer_factory(&LanguageId::GLSL);
    assert!(removed.is_some());
    assert!(manager.remove_program_writer_factory(&LanguageId::GLSL).is_none());
}

#[test]
fn replacing_a_factory_discards_the_cached_writer() {
    let (backend, _probe) = MockBackend::new();
    let mut manager = manager_with(backend, ProgramManagerSettings::default());

    let mut pass_a = Pass::new("Stone", 0, "base");
    let mut rs_a = render_state("gl_FragColor = vec4(1.0);");
    manager.acquire_programs(&mut pass_a, &mut rs_a).unwrap();

    manager.add_program_writer_factory(marker_factory("BEGIN_RTSS"));
    let mut pass_b = Pass::new("Stone", 0, "base");
    let mut rs_b = render_state("gl_FragColor = vec4(1.0);");
    manager.acquire_programs(&mut pass_b, &mut rs_b).unwrap();

    let expected = format!("{}_FS", generate_guid("\nvoid main(){gl_FragColor = vec4(1.0);}"));
    assert_eq!(pass_b.program_name(ShaderStage::Fragment), Some(expected.as_str()));
    assert_ne!(
        pass_a.program_name(ShaderStage::Fragment),
        pass_b.program_name(ShaderStage::Fragment)
    );
}

// ============================================================================
// Settings Tests
// ============================================================================

#[test]
fn settings_parse_from_json() -> anyhow::Result<()> {
    let settings = ProgramManagerSettings::from_json_str(
        r#"{ "target_language": "hlsl", "naming": "sequential", "shader_cache_path": "cache" }"#,
    )?;

    assert_eq!(settings.target_language, LanguageId::HLSL);
    assert_eq!(settings.naming, ProgramNaming::Sequential);
    assert_eq!(settings.shader_cache_path.as_deref(), Some(std::path::Path::new("cache")));
    assert_eq!(settings.profiles_list(ShaderStage::Fragment).next(), Some("ps_4_0"));
    Ok(())
}

#[test]
fn malformed_settings_are_an_error() {
    let err = ProgramManagerSettings::from_json_str(r#"{ "naming": "random" }"#).unwrap_err();
    assert!(matches!(err, ProgramError::Settings(_)));
}
