//! Program Manager Settings
//!
//! Configuration for the program manager: which shading language to
//! generate, where (and whether) generated sources are persisted, the
//! per-stage profile candidates, and how generated programs are named.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use myth_shadergen::{ProgramManagerSettings, LanguageId};
//!
//! // Default: GLSL, content-hashed names, in-memory sources
//! let settings = ProgramManagerSettings::default();
//!
//! // HLSL with an on-disk shader cache
//! let settings = ProgramManagerSettings {
//!     target_language: LanguageId::HLSL,
//!     shader_cache_path: Some("cache/shaders".into()),
//!     ..Default::default()
//! };
//!
//! // Or from JSON
//! let settings = ProgramManagerSettings::from_json_str(r#"{ "target_language": "glsles" }"#)?;
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::program::{LanguageId, ShaderStage};

/// Syntax whose support means the driver requires matching stage signatures.
pub const DEFAULT_STAGE_SYNC_SYNTAX: &str = "vs_4_0_level_9_1";

const DEFAULT_VERTEX_PROFILES: &str = "gpu_vp gp4vp vp40 vp30 arbvp1 vs_4_0 \
    vs_4_0_level_9_3 vs_4_0_level_9_1 vs_3_0 vs_2_x vs_2_a vs_2_0 vs_1_1";
const DEFAULT_FRAGMENT_PROFILES: &str = "ps_4_0 ps_4_0_level_9_3 ps_4_0_level_9_1 ps_3_x \
    ps_3_0 fp40 fp30 fp20 arbfp1 ps_2_x ps_2_a ps_2_b ps_2_0 ps_1_4 ps_1_3 ps_1_2 ps_1_1";
const DEFAULT_GEOMETRY_PROFILES: &str = "gs_4_0 gpu_gp gp4gp";

/// How generated programs are named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramNaming {
    /// Names derive from a 128-bit hash of the generated source.
    ///
    /// Identical programs share one compiled resource, and names stay
    /// stable across runs so the on-disk cache can be reused.
    #[default]
    ContentHash,

    /// Names come from a per-manager counter.
    ///
    /// Degraded mode for platforms where hashing or file caching is not
    /// wanted: every request compiles a fresh program and nothing is shared.
    Sequential,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramManagerSettings {
    /// Shading language programs are generated in.
    pub target_language: LanguageId,

    /// Directory generated sources are written to and reused from.
    ///
    /// `None` keeps generated sources in memory only.
    pub shader_cache_path: Option<PathBuf>,

    /// Space-separated vertex profile candidates, most preferred first.
    pub vertex_profiles: String,
    pub fragment_profiles: String,
    pub geometry_profiles: String,

    pub naming: ProgramNaming,

    /// When the backend supports this syntax, stage inputs are synchronized
    /// with the previous stage's outputs before generation.
    pub stage_sync_syntax: String,
}

impl Default for ProgramManagerSettings {
    fn default() -> Self {
        Self {
            target_language: LanguageId::GLSL,
            shader_cache_path: None,
            vertex_profiles: DEFAULT_VERTEX_PROFILES.to_string(),
            fragment_profiles: DEFAULT_FRAGMENT_PROFILES.to_string(),
            geometry_profiles: DEFAULT_GEOMETRY_PROFILES.to_string(),
            naming: ProgramNaming::default(),
            stage_sync_syntax: DEFAULT_STAGE_SYNC_SYNTAX.to_string(),
        }
    }
}

impl ProgramManagerSettings {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The profile string for `stage`, as set on compiled programs.
    #[must_use]
    pub fn profiles(&self, stage: ShaderStage) -> &str {
        match stage {
            ShaderStage::Vertex => &self.vertex_profiles,
            ShaderStage::Fragment => &self.fragment_profiles,
            ShaderStage::Geometry => &self.geometry_profiles,
        }
    }

    /// The profile candidates for `stage`, most preferred first.
    pub fn profiles_list(&self, stage: ShaderStage) -> impl Iterator<Item = &str> {
        self.profiles(stage).split_whitespace()
    }
}
