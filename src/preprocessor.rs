//! Long-s correction followed by U/V normalization.
//!
//! Long-s runs first: `ftatua` has to become `statua` before the U/V rules
//! look at its neighbours.

use crate::config::PreprocessorConfig;
use crate::error::Result;
use crate::long_s::{LongSNormalizer, NgramTables, Statistics};
use crate::uv::UvNormalizer;
use rayon::prelude::*;
use std::sync::Arc;

#[derive(Debug)]
pub struct LatinPreprocessor {
    long_s: Option<LongSNormalizer>,
    uv: Option<UvNormalizer>,
    apply_pass2: bool,
}

impl LatinPreprocessor {
    /// Build from `config`, loading n-gram tables only when long-s is enabled.
    pub fn new(config: &PreprocessorConfig) -> Result<Self> {
        let tables = if config.long_s {
            Some(Arc::new(NgramTables::locate(config.ngram_dir.as_deref())?))
        } else {
            None
        };
        Self::build(config, tables)
    }

    /// Build over tables the caller already holds.
    pub fn with_tables(config: &PreprocessorConfig, tables: Arc<NgramTables>) -> Result<Self> {
        Self::build(config, Some(tables))
    }

    fn build(config: &PreprocessorConfig, tables: Option<Arc<NgramTables>>) -> Result<Self> {
        let long_s = match tables {
            Some(tables) if config.long_s => {
                Some(LongSNormalizer::new(tables, config.long_s_settings.clone())?)
            }
            _ => None,
        };
        let uv = config.uv.then(|| UvNormalizer::new(&config.uv_settings));
        Ok(Self {
            long_s,
            uv,
            apply_pass2: config.long_s_settings.apply_pass2,
        })
    }

    /// Whole-text chain. With long-s enabled, whitespace runs collapse to one space.
    pub fn normalize_text(&mut self, text: &str) -> String {
        let text = match self.long_s.as_mut() {
            Some(long_s) => long_s.normalize_text_full(text, self.apply_pass2, false),
            None => text.to_string(),
        };
        match &self.uv {
            Some(uv) => uv.normalize(&text),
            None => text,
        }
    }

    /// Single-token chain; nothing but the corrected letters changes.
    pub fn normalize_word(&mut self, word: &str) -> String {
        let word = match self.long_s.as_mut() {
            Some(long_s) => long_s.normalize_word_full(word, self.apply_pass2).0,
            None => word.to_string(),
        };
        match &self.uv {
            Some(uv) => uv.normalize(&word),
            None => word,
        }
    }

    /// `normalize_text` over many texts in parallel, in input order.
    pub fn normalize_batch<S>(&mut self, texts: &[S]) -> Vec<String>
    where
        S: AsRef<str> + Sync,
    {
        let corrected = match self.long_s.as_mut() {
            Some(long_s) => long_s.normalize_batch(texts, self.apply_pass2),
            None => texts.iter().map(|t| t.as_ref().to_string()).collect(),
        };
        match &self.uv {
            Some(uv) => corrected.par_iter().map(|t| uv.normalize(t)).collect(),
            None => corrected,
        }
    }

    pub fn long_s_statistics(&self) -> Option<&Statistics> {
        self.long_s.as_ref().map(LongSNormalizer::statistics)
    }
}

/// One-shot chain with default settings over `tables`.
pub fn normalize(text: &str, tables: Arc<NgramTables>) -> Result<String> {
    let mut preprocessor = LatinPreprocessor::with_tables(&PreprocessorConfig::default(), tables)?;
    Ok(preprocessor.normalize_text(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn tables() -> Arc<NgramTables> {
        let trigrams = HashMap::from([("<fu".to_string(), 2000), ("<su".to_string(), 30000)]);
        Arc::new(NgramTables::from_maps(HashMap::new(), trigrams, HashMap::new()))
    }

    #[test]
    fn test_full_chain() {
        assert_eq!(normalize("ftatua uirumque cano", tables()).unwrap(), "statua virumque cano");
        assert_eq!(normalize("Arma uirumque cano", tables()).unwrap(), "Arma virumque cano");
    }

    #[test]
    fn test_steps_can_be_disabled() {
        let config = PreprocessorConfig {
            uv: false,
            ..PreprocessorConfig::default()
        };
        let mut p = LatinPreprocessor::with_tables(&config, tables()).unwrap();
        assert_eq!(p.normalize_text("ftatua uirumque"), "statua uirumque");

        let config = PreprocessorConfig {
            long_s: false,
            ..PreprocessorConfig::default()
        };
        let mut p = LatinPreprocessor::new(&config).unwrap();
        assert_eq!(p.normalize_text("ftella  uirumque"), "ftella  virumque");
        assert!(p.long_s_statistics().is_none());
    }

    #[test]
    fn test_pass2_switch() {
        let mut config = PreprocessorConfig::default();
        config.long_s_settings.apply_pass2 = false;
        let mut p = LatinPreprocessor::with_tables(&config, tables()).unwrap();
        assert_eq!(p.normalize_word("funt"), "funt");

        let mut p = LatinPreprocessor::with_tables(&PreprocessorConfig::default(), tables()).unwrap();
        assert_eq!(p.normalize_word("funt"), "sunt");
    }

    #[test]
    fn test_word_keeps_punctuation() {
        let mut p = LatinPreprocessor::with_tables(&PreprocessorConfig::default(), tables()).unwrap();
        assert_eq!(p.normalize_word("uirumque,"), "virumque,");
        assert_eq!(p.normalize_word("eft."), "est.");
    }

    #[test]
    fn test_batch() {
        let mut p = LatinPreprocessor::with_tables(&PreprocessorConfig::default(), tables()).unwrap();
        let out = p.normalize_batch(&["ftatua uirumque", "Arma   cano", "funt"]);
        assert_eq!(out, vec!["statua virumque", "Arma cano", "sunt"]);
        assert_eq!(p.long_s_statistics().unwrap().total_words, 5);
    }
}
