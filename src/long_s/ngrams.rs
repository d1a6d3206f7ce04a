use crate::config::resolve_ngram_dir;
use crate::error::{PreprocessError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub const BIGRAM_FILE: &str = "bigrams.json";
pub const TRIGRAM_FILE: &str = "trigrams.json";
pub const FOURGRAM_FILE: &str = "4grams.json";

/// Corpus frequency tables keyed by n-gram, with `<` marking word start.
///
/// Read-only after construction; share it behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct NgramTables {
    bigrams: HashMap<String, u64>,
    trigrams: HashMap<String, u64>,
    fourgrams: HashMap<String, u64>,
}

impl NgramTables {
    pub fn from_maps(
        bigrams: HashMap<String, u64>,
        trigrams: HashMap<String, u64>,
        fourgrams: HashMap<String, u64>,
    ) -> Self {
        Self {
            bigrams,
            trigrams,
            fourgrams,
        }
    }

    /// Load all three tables from `dir`. Any missing or corrupt file fails the whole load.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let tables = Self {
            bigrams: load_table(dir, BIGRAM_FILE)?,
            trigrams: load_table(dir, TRIGRAM_FILE)?,
            fourgrams: load_table(dir, FOURGRAM_FILE)?,
        };
        log::debug!(
            "Loaded n-gram tables from {}: {} bigrams, {} trigrams, {} 4-grams",
            dir.display(),
            tables.bigrams.len(),
            tables.trigrams.len(),
            tables.fourgrams.len()
        );
        Ok(tables)
    }

    /// Load from an explicit directory, the environment override, or the default location.
    pub fn locate(explicit: Option<&Path>) -> Result<Self> {
        Self::load_dir(&resolve_ngram_dir(explicit))
    }

    pub fn bigram(&self, key: &str) -> u64 {
        self.bigrams.get(key).copied().unwrap_or(0)
    }

    pub fn trigram(&self, key: &str) -> u64 {
        self.trigrams.get(key).copied().unwrap_or(0)
    }

    pub fn fourgram(&self, key: &str) -> u64 {
        self.fourgrams.get(key).copied().unwrap_or(0)
    }
}

fn load_table(dir: &Path, name: &str) -> Result<HashMap<String, u64>> {
    let path = dir.join(name);
    let content = fs::read_to_string(&path).map_err(|e| {
        PreprocessError::Configuration(format!("n-gram file not readable: {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        PreprocessError::Configuration(format!("n-gram file is corrupt: {}: {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, body: &str) {
        fs::write(dir.join(name), body).unwrap();
    }

    #[test]
    fn test_missing_key_is_zero() {
        let tables = NgramTables::from_maps(
            HashMap::new(),
            HashMap::from([("<su".to_string(), 30000)]),
            HashMap::new(),
        );
        assert_eq!(tables.trigram("<su"), 30000);
        assert_eq!(tables.trigram("<fu"), 0);
        assert_eq!(tables.fourgram("<sim"), 0);
        assert_eq!(tables.bigram("<s"), 0);
    }

    #[test]
    fn test_load_dir() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), BIGRAM_FILE, r#"{"<s": 10}"#);
        write(dir.path(), TRIGRAM_FILE, r#"{"<fu": 2, "<su": 9}"#);
        write(dir.path(), FOURGRAM_FILE, r#"{"<sim": 7}"#);

        let tables = NgramTables::load_dir(dir.path()).unwrap();
        assert_eq!(tables.bigram("<s"), 10);
        assert_eq!(tables.trigram("<fu"), 2);
        assert_eq!(tables.fourgram("<sim"), 7);
    }

    #[test]
    fn test_missing_file_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), BIGRAM_FILE, "{}");
        write(dir.path(), TRIGRAM_FILE, "{}");

        let err = NgramTables::load_dir(dir.path()).unwrap_err();
        assert!(matches!(err, PreprocessError::Configuration(ref msg) if msg.contains(FOURGRAM_FILE)));
    }

    #[test]
    fn test_corrupt_file_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), BIGRAM_FILE, "{}");
        write(dir.path(), TRIGRAM_FILE, r#"{"<fu": "many"}"#);
        write(dir.path(), FOURGRAM_FILE, "{}");

        let err = NgramTables::load_dir(dir.path()).unwrap_err();
        assert!(matches!(err, PreprocessError::Configuration(ref msg) if msg.contains("corrupt")));
    }
}
