//! Value types and semantics shared by uniforms and stage-interface variables.

use serde::{Deserialize, Serialize};

/// The type of a uniform or stage-interface variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterType {
    Float,
    Float2,
    Float3,
    Float4,
    Int,
    Int2,
    Int3,
    Int4,
    Matrix3x3,
    Matrix3x4,
    Matrix4x4,
    Sampler2D,
    Sampler3D,
    SamplerCube,
}

impl ParameterType {
    #[inline]
    #[must_use]
    pub const fn is_sampler(self) -> bool {
        matches!(self, Self::Sampler2D | Self::Sampler3D | Self::SamplerCube)
    }

    /// Type name in GLSL and GLSL ES.
    #[must_use]
    pub const fn glsl_name(self) -> &'static str {
        match self {
            Self::Float => "float",
            Self::Float2 => "vec2",
            Self::Float3 => "vec3",
            Self::Float4 => "vec4",
            Self::Int => "int",
            Self::Int2 => "ivec2",
            Self::Int3 => "ivec3",
            Self::Int4 => "ivec4",
            Self::Matrix3x3 => "mat3",
            Self::Matrix3x4 => "mat3x4",
            Self::Matrix4x4 => "mat4",
            Self::Sampler2D => "sampler2D",
            Self::Sampler3D => "sampler3D",
            Self::SamplerCube => "samplerCube",
        }
    }

    /// Type name in HLSL and Cg.
    #[must_use]
    pub const fn hlsl_name(self) -> &'static str {
        match self {
            Self::Float => "float",
            Self::Float2 => "float2",
            Self::Float3 => "float3",
            Self::Float4 => "float4",
            Self::Int => "int",
            Self::Int2 => "int2",
            Self::Int3 => "int3",
            Self::Int4 => "int4",
            Self::Matrix3x3 => "float3x3",
            Self::Matrix3x4 => "float3x4",
            Self::Matrix4x4 => "float4x4",
            Self::Sampler2D => "sampler2D",
            Self::Sampler3D => "sampler3D",
            Self::SamplerCube => "samplerCUBE",
        }
    }
}

/// Binding semantic of a stage-interface variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Semantic {
    Position,
    Normal,
    Tangent,
    Binormal,
    BlendIndices,
    BlendWeights,
    Color,
    TexCoord,
    Unknown,
}

impl Semantic {
    /// Semantic keyword used by HLSL and Cg, without the index.
    #[must_use]
    pub const fn hlsl_name(self) -> &'static str {
        match self {
            Self::Position => "POSITION",
            Self::Normal => "NORMAL",
            Self::Tangent => "TANGENT",
            Self::Binormal => "BINORMAL",
            Self::BlendIndices => "BLENDINDICES",
            Self::BlendWeights => "BLENDWEIGHT",
            Self::Color => "COLOR",
            Self::TexCoord => "TEXCOORD",
            Self::Unknown => "",
        }
    }
}

/// Engine-provided values a uniform can be bound to automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoConstant {
    WorldMatrix,
    ViewMatrix,
    ProjectionMatrix,
    WorldViewProjMatrix,
    InverseTransposeWorldMatrix,
    WorldMatrixArray3x4,
    CameraPosition,
    LightPosition,
    LightDiffuseColour,
    SurfaceAmbientColour,
    SurfaceDiffuseColour,
    Time,
}
