//! Program Writers
//!
//! A [`ProgramWriter`] turns a CPU [`Program`] into source text for one
//! shading language. Writers are produced by [`ProgramWriterFactory`]s, which
//! the program manager keeps in a [`ProgramWriterFactories`] registry and
//! asks for a writer the first time a language is generated.
//!
//! Every writer output has two parts separated by the writer's start marker:
//! a preamble that may carry non-semantic metadata (source pass, language
//! banner), and the program proper. Only the part from the marker onwards
//! identifies a program.

pub mod template;

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::errors::{ProgramError, Result};
use crate::program::{LanguageId, Program};

pub use template::{Dialect, TemplateProgramWriter, TemplateWriterFactory};

/// Marker separating the preamble from the program source.
pub const PROGRAM_START_TOKEN: &str =
    "//-----------------------------------------------------------------------------\n\
     //                         PROGRAM SOURCE";

pub trait ProgramWriter {
    fn target_language(&self) -> &LanguageId;

    /// Marker the program proper starts with.
    fn start_marker(&self) -> &str {
        PROGRAM_START_TOKEN
    }

    fn write_source_code(&self, program: &Program) -> Result<String>;
}

pub trait ProgramWriterFactory {
    fn target_language(&self) -> &LanguageId;

    fn create(&self) -> Box<dyn ProgramWriter>;
}

/// Writer factories keyed by target language.
#[derive(Default)]
pub struct ProgramWriterFactories {
    factories: FxHashMap<LanguageId, Arc<dyn ProgramWriterFactory>>,
}

impl ProgramWriterFactories {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `factory`, returning the factory it replaces, if any.
    pub fn add_factory(
        &mut self,
        factory: Arc<dyn ProgramWriterFactory>,
    ) -> Option<Arc<dyn ProgramWriterFactory>> {
        let language = factory.target_language().clone();
        log::debug!("Registered program writer factory for '{language}'");
        self.factories.insert(language, factory)
    }

    pub fn remove_factory(&mut self, language: &LanguageId) -> Option<Arc<dyn ProgramWriterFactory>> {
        self.factories.remove(language)
    }

    #[must_use]
    pub fn contains(&self, language: &LanguageId) -> bool {
        self.factories.contains_key(language)
    }

    pub fn create_program_writer(&self, language: &LanguageId) -> Result<Box<dyn ProgramWriter>> {
        self.factories
            .get(language)
            .map(|factory| factory.create())
            .ok_or_else(|| ProgramError::MissingWriterFactory(language.clone()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}
