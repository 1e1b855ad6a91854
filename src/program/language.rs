use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a target shading language (`"glsl"`, `"hlsl"`, ...).
///
/// Writers, writer factories and processors are all keyed by this id.
/// Languages beyond the built-in constants can be introduced freely by
/// registering a processor and a writer factory for them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageId(Cow<'static, str>);

impl LanguageId {
    pub const CG: LanguageId = LanguageId(Cow::Borrowed("cg"));
    pub const GLSL: LanguageId = LanguageId(Cow::Borrowed("glsl"));
    pub const GLSL_ES: LanguageId = LanguageId(Cow::Borrowed("glsles"));
    pub const HLSL: LanguageId = LanguageId(Cow::Borrowed("hlsl"));

    #[must_use]
    pub fn new(id: impl Into<Cow<'static, str>>) -> Self {
        Self(id.into())
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LanguageId {
    fn default() -> Self {
        Self::GLSL
    }
}

impl From<&'static str> for LanguageId {
    fn from(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }
}

impl From<String> for LanguageId {
    fn from(id: String) -> Self {
        Self(Cow::Owned(id))
    }
}

impl AsRef<str> for LanguageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
