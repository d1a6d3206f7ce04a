//! Long-s OCR correction.
//!
//! OCR of early printed Latin reads the long s (ſ) as `f`. Pass 1 rewrites
//! letter sequences that cannot occur in Latin with an f; Pass 2 decides
//! ambiguous word-initial f by comparing corpus n-gram frequencies.

mod engine;
mod ngrams;
mod normalizer;
pub mod rules;

pub use engine::{LiteralEngine, LongSEngine, PatternEngine, Rewrite, engine_for};
pub use ngrams::{BIGRAM_FILE, FOURGRAM_FILE, NgramTables, TRIGRAM_FILE};
pub use normalizer::{LongSNormalizer, Statistics};
pub use rules::{ALLOWLIST, Confidence, PASS1_RULES, PASS2_RULES, TransformationRule, WORD_FINAL_RULE};
