//! Shader Stages
//!
//! The three programmable stages a generated program set can contain.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A programmable pipeline stage.
///
/// Every per-stage table in the crate (CPU programs, compiled programs,
/// pass slots, cache maps) is indexed through [`ShaderStage::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Geometry,
}

impl ShaderStage {
    /// Number of stages, i.e. the length of every per-stage table.
    pub const COUNT: usize = 3;

    /// All stages in table order.
    pub const ALL: [ShaderStage; Self::COUNT] = [Self::Vertex, Self::Fragment, Self::Geometry];

    /// Stages in generation order: vertex, then geometry, then fragment.
    pub const GENERATION_ORDER: [ShaderStage; Self::COUNT] =
        [Self::Vertex, Self::Geometry, Self::Fragment];

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Vertex => 0,
            Self::Fragment => 1,
            Self::Geometry => 2,
        }
    }

    /// Suffix appended to generated program names.
    ///
    /// Keeps identically-hashed sources of different stages apart.
    #[inline]
    #[must_use]
    pub const fn name_suffix(self) -> &'static str {
        match self {
            Self::Vertex => "_VS",
            Self::Fragment => "_FS",
            Self::Geometry => "_GS",
        }
    }

    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
            Self::Geometry => "geometry",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
