//! Generated Program Cache
//!
//! Per-stage map from generated program name to the compiled program.
//!
//! While a program is cached, exactly two references are retained by the
//! shader system itself: one here and one in the [`GpuProgramRegistry`].
//! Every further reference belongs to a program set attached to some pass,
//! so a program whose count drops back to [`RETAINED_REFERENCES`] is no
//! longer used by any pass and can be evicted.
//!
//! Strong counts are only meaningful while the cache is driven from one
//! thread; see [`ProgramManager`](crate::ProgramManager).
//!
//! [`GpuProgramRegistry`]: super::GpuProgramRegistry

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::program::GpuProgram;
use crate::program::ShaderStage;

/// References held by the cache and the registry.
pub const RETAINED_REFERENCES: usize = 2;

#[derive(Debug, Default)]
pub struct GpuProgramCache {
    maps: [FxHashMap<String, Arc<GpuProgram>>; ShaderStage::COUNT],
}

impl GpuProgramCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Caches `program` under its own name and stage, replacing nothing:
    /// an already cached program of that name is kept.
    pub fn insert(&mut self, program: Arc<GpuProgram>) {
        self.maps[program.stage().index()]
            .entry(program.name().to_string())
            .or_insert(program);
    }

    #[must_use]
    pub fn get(&self, stage: ShaderStage, name: &str) -> Option<&Arc<GpuProgram>> {
        self.maps[stage.index()].get(name)
    }

    #[must_use]
    pub fn contains(&self, stage: ShaderStage, name: &str) -> bool {
        self.maps[stage.index()].contains_key(name)
    }

    /// Whether no pass holds the cached program anymore.
    #[must_use]
    pub fn is_unshared(&self, stage: ShaderStage, name: &str) -> bool {
        self.get(stage, name)
            .is_some_and(|program| Arc::strong_count(program) <= RETAINED_REFERENCES)
    }

    /// Removes and returns the program if no pass holds it anymore.
    ///
    /// A name that is not cached is skipped.
    pub fn take_if_unshared(&mut self, stage: ShaderStage, name: &str) -> Option<Arc<GpuProgram>> {
        if self.is_unshared(stage, name) {
            self.maps[stage.index()].remove(name)
        } else {
            None
        }
    }

    /// Empties the cache, returning every program it held.
    pub fn drain(&mut self) -> Vec<Arc<GpuProgram>> {
        self.maps
            .iter_mut()
            .flat_map(|map| map.drain().map(|(_, program)| program))
            .collect()
    }

    #[must_use]
    pub fn len(&self, stage: ShaderStage) -> usize {
        self.maps[stage.index()].len()
    }

    #[must_use]
    pub fn total_len(&self) -> usize {
        self.maps.iter().map(FxHashMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.maps.iter().all(FxHashMap::is_empty)
    }
}
