//! Character-level language model.
//!
//! - Per-context frequency tables (`ContextTable` of `CharRecord`)
//! - The sliding-window model itself (`LanguageModel`): training and generation

/// One observed character with its count and derived probabilities.
pub mod char_record;

/// Ordered frequency table for a single context.
///
/// Counts observations, turns them into a cumulative distribution and
/// samples from it.
pub mod context_table;

/// Sliding-window model mapping contexts to frequency tables.
///
/// Handles training from a character stream or a corpus file, seeded
/// generation and the debug dump.
pub mod language_model;
