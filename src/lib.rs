//! Preprocessing for historical Latin and Greek text.
//!
//! - [`uv`]: resolve u/v spelling to vowel `u` or consonant `v`.
//! - [`long_s`]: repair long-s (ſ) misread as `f` by OCR.
//! - [`diacritics`]: strip Greek polytonic marks and build character maps.
//! - [`strip`]: remove Latin macrons.
//! - [`preprocessor`]: long-s then U/V as one chain.

pub mod config;
pub mod context;
pub mod diacritics;
pub mod error;
pub mod long_s;
pub mod preprocessor;
pub mod strip;
pub mod uv;

#[cfg(feature = "python")]
mod python;

pub use config::{Backend, LongSConfig, PreprocessorConfig, UvConfig};
pub use context::CharContext;
pub use diacritics::{CharsetMap, aligned_pairs, base_char, build_charset, strip_diacritics};
pub use error::{PreprocessError, Result};
pub use long_s::{LongSNormalizer, NgramTables, Statistics, TransformationRule};
pub use preprocessor::{LatinPreprocessor, normalize};
pub use strip::strip_macrons;
pub use uv::{
    ChangeRecord, NormalizationResult, UvNormalizer, UvRule, collapse_v_to_u, normalize_uv,
    normalize_uv_detailed,
};
