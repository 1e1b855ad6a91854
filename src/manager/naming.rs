//! Program Naming
//!
//! Generated programs are named after a 128-bit xxh3 hash of their source,
//! formatted as a hyphenated 8-4-4-4-12 hex identifier. Only the text after
//! the writer's start marker is hashed: the preamble before it carries
//! metadata (source pass, banners) that differs between otherwise identical
//! programs.

use uuid::Uuid;
use xxhash_rust::xxh3::xxh3_128_with_seed;

/// Seed shared by every program hash, so names are stable across runs.
pub const PROGRAM_HASH_SEED: u64 = 0xC8FD_1C6A_5E11_B0A7;

/// The part of `source` that identifies the program: everything after the
/// first occurrence of `marker`.
#[must_use]
pub fn program_body<'a>(source: &'a str, marker: &str) -> Option<&'a str> {
    source
        .find(marker)
        .map(|idx| &source[idx + marker.len()..])
}

/// Hyphenated hex identifier of `program_source`.
#[must_use]
pub fn generate_guid(program_source: &str) -> String {
    let hash = xxh3_128_with_seed(program_source.as_bytes(), PROGRAM_HASH_SEED);
    Uuid::from_u128(hash).hyphenated().to_string()
}
