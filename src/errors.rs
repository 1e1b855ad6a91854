//! Error Types
//!
//! This module defines the error type used throughout the shader generator.
//!
//! # Overview
//!
//! [`ProgramError`] covers three families of failure:
//! - **Configuration**: duplicate or missing processors, missing writer
//!   factories, malformed settings
//! - **Generation**: malformed writer output, processor hooks refusing a
//!   program set, template rendering, on-disk cache I/O
//! - **Compilation**: the driver rejected a generated program
//!
//! Stage-level failures are wrapped in [`ProgramError::Stage`] and pass-level
//! failures in [`ProgramError::PassBinding`], so a single error reported from
//! [`ProgramManager::acquire_programs`] names both the pass and the stage.
//!
//! [`ProgramManager::acquire_programs`]: crate::ProgramManager::acquire_programs

use std::path::PathBuf;

use thiserror::Error;

use crate::program::{LanguageId, ShaderStage};

/// The main error type for shader program generation.
#[derive(Error, Debug)]
pub enum ProgramError {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// A processor for this language is already registered.
    #[error("A processor for language '{0}' already exists")]
    DuplicateProcessor(LanguageId),

    /// No processor is registered for the active target language.
    #[error("Could not find processor for language '{0}'")]
    MissingProcessor(LanguageId),

    /// No writer factory can produce a writer for the active target language.
    #[error("No program writer factory registered for language '{0}'")]
    MissingWriterFactory(LanguageId),

    /// Settings could not be parsed.
    #[error("Invalid program manager settings: {0}")]
    Settings(#[from] serde_json::Error),

    // ========================================================================
    // Generation Errors
    // ========================================================================
    /// The writer emitted source without the language's start marker.
    #[error("Wrong program source detected: {stage} program has no start marker '{marker}'")]
    MissingStartMarker {
        stage: ShaderStage,
        marker: String,
    },

    /// The processor's pre-generation hook rejected the program set.
    #[error("Could not pre create gpu programs for language '{0}'")]
    PreCreateFailed(LanguageId),

    /// The processor's post-generation hook rejected the program set.
    #[error("Could not post process gpu programs for language '{0}'")]
    PostCreateFailed(LanguageId),

    /// A CPU program declared the same uniform twice.
    #[error("Uniform parameter '{0}' already exists")]
    DuplicateUniform(String),

    /// A GPU program resource with this name already exists.
    #[error("A gpu program named '{0}' already exists")]
    DuplicateProgram(String),

    /// A CPU program was placed in the slot of another stage.
    #[error("Expected a {expected} program, got a {found} program")]
    StageMismatch {
        expected: ShaderStage,
        found: ShaderStage,
    },

    /// The render state has no program set to generate from.
    #[error("Render state has no program set")]
    MissingProgramSet,

    /// Source template rendering failed.
    #[error("Program source generation failed: {0}")]
    Template(#[from] minijinja::Error),

    // ========================================================================
    // On-disk Cache Errors
    // ========================================================================
    /// Writing a generated program to the cache directory failed.
    #[error("Failed to write program cache file '{path}': {source}")]
    CacheWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading a file-backed program source failed.
    #[error("Failed to read program source file '{path}': {source}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ========================================================================
    // Compilation Errors
    // ========================================================================
    /// The driver rejected a generated program.
    #[error(
        "Gpu program '{name}' generated from render states caused a compilation error.\n{details}"
    )]
    Compilation { name: String, details: String },

    // ========================================================================
    // Aggregates
    // ========================================================================
    /// Creating the compiled program for one stage failed.
    #[error("Could not create gpu {stage} program: {source}")]
    Stage {
        stage: ShaderStage,
        #[source]
        source: Box<ProgramError>,
    },

    /// Acquiring programs for a pass failed; nothing was bound to the pass.
    #[error("Could not acquire programs for pass '{pass}': {source}")]
    PassBinding {
        pass: String,
        #[source]
        source: Box<ProgramError>,
    },
}

impl ProgramError {
    pub(crate) fn in_stage(self, stage: ShaderStage) -> Self {
        Self::Stage {
            stage,
            source: Box::new(self),
        }
    }

    /// The innermost error, with stage and pass wrappers removed.
    #[must_use]
    pub fn root_cause(&self) -> &ProgramError {
        match self {
            Self::Stage { source, .. } | Self::PassBinding { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// The stage the failure occurred in, if it is stage-specific.
    #[must_use]
    pub fn stage(&self) -> Option<ShaderStage> {
        match self {
            Self::Stage { stage, .. } | Self::MissingStartMarker { stage, .. } => Some(*stage),
            Self::PassBinding { source, .. } => source.stage(),
            _ => None,
        }
    }
}

/// Alias for `Result<T, ProgramError>`.
pub type Result<T> = std::result::Result<T, ProgramError>;
