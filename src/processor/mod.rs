//! Program Processors
//!
//! A [`ProgramProcessor`] adjusts a program set for one target language,
//! once before any source is generated and once after every stage has been
//! compiled. Either hook may refuse the set by returning `false`, which
//! aborts generation for that pass.

pub mod packing;
pub mod sampler;

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::errors::{ProgramError, Result};
use crate::program::{LanguageId, ProgramSet};

pub use packing::{MAX_TEXCOORD_SLOTS, VaryingPackingProcessor};
pub use sampler::SamplerBindingProcessor;

pub trait ProgramProcessor {
    fn target_language(&self) -> &LanguageId;

    /// Runs before source generation. Returning `false` aborts generation.
    fn pre_create_gpu_programs(&self, program_set: &mut ProgramSet) -> bool;

    /// Runs after every stage is compiled. Returning `false` aborts generation.
    fn post_create_gpu_programs(&self, program_set: &mut ProgramSet) -> bool;
}

/// At most one processor per target language.
#[derive(Default)]
pub struct ProgramProcessors {
    processors: FxHashMap<LanguageId, Arc<dyn ProgramProcessor>>,
}

impl ProgramProcessors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `processor`. A second processor for the same language is
    /// rejected and the existing registration is kept.
    pub fn add(&mut self, processor: Arc<dyn ProgramProcessor>) -> Result<()> {
        let language = processor.target_language().clone();
        if self.processors.contains_key(&language) {
            return Err(ProgramError::DuplicateProcessor(language));
        }
        log::debug!("Registered program processor for '{language}'");
        self.processors.insert(language, processor);
        Ok(())
    }

    pub fn remove(&mut self, language: &LanguageId) -> Option<Arc<dyn ProgramProcessor>> {
        self.processors.remove(language)
    }

    #[must_use]
    pub fn get(&self, language: &LanguageId) -> Option<&Arc<dyn ProgramProcessor>> {
        self.processors.get(language)
    }

    #[must_use]
    pub fn contains(&self, language: &LanguageId) -> bool {
        self.processors.contains_key(language)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.processors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }
}
