//! Python bindings.

use crate::config::LongSConfig;
use crate::error::PreprocessError;
use crate::long_s::LongSNormalizer;
use crate::{diacritics, strip, uv};
use pyo3::exceptions::{PyIOError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock};

// Shared long-s normalizer, built on first use or by init_ngrams
static LONG_S: OnceLock<Mutex<LongSNormalizer>> = OnceLock::new();

fn to_py_err(err: PreprocessError) -> PyErr {
    match err {
        PreprocessError::InvalidArgument(msg) => PyValueError::new_err(msg),
        PreprocessError::Io { .. } => PyIOError::new_err(err.to_string()),
        other => PyRuntimeError::new_err(other.to_string()),
    }
}

fn long_s() -> PyResult<MutexGuard<'static, LongSNormalizer>> {
    let cell = match LONG_S.get() {
        Some(cell) => cell,
        None => {
            let normalizer = LongSNormalizer::from_dir(None, LongSConfig::default()).map_err(to_py_err)?;
            // another thread may have set it first
            let _ = LONG_S.set(Mutex::new(normalizer));
            LONG_S
                .get()
                .ok_or_else(|| PyRuntimeError::new_err("long-s normalizer not initialized"))?
        }
    };
    cell.lock()
        .map_err(|_| PyRuntimeError::new_err("long-s normalizer lock poisoned"))
}

/// Load n-gram tables from `ngram_dir` (or the default location).
/// Returns False when tables were already loaded.
#[pyfunction]
#[pyo3(signature = (ngram_dir=None))]
fn init_ngrams(ngram_dir: Option<String>) -> PyResult<bool> {
    if LONG_S.get().is_some() {
        return Ok(false);
    }
    let dir = ngram_dir.map(PathBuf::from);
    let normalizer = LongSNormalizer::from_dir(dir.as_deref(), LongSConfig::default()).map_err(to_py_err)?;
    Ok(LONG_S.set(Mutex::new(normalizer)).is_ok())
}

#[pyfunction]
fn normalize_uv(text: &str) -> String {
    uv::normalize_uv(text)
}

/// Returns: (char, rule_name)
#[pyfunction]
fn normalize_uv_char(text: &str, index: usize) -> PyResult<(char, String)> {
    let normalizer = uv::UvNormalizer::default();
    let (ch, rule) = normalizer.classify_char(text, index).map_err(to_py_err)?;
    Ok((ch, rule.to_string()))
}

/// Returns: (normalized, [(position, original, normalized, rule, context)])
#[pyfunction]
fn normalize_uv_detailed(text: &str) -> (String, Vec<(usize, char, char, String, String)>) {
    let result = uv::normalize_uv_detailed(text);
    let changes = result
        .changes
        .into_iter()
        .map(|c| (c.position, c.original, c.normalized, c.rule.to_string(), c.context))
        .collect();
    (result.normalized, changes)
}

#[pyfunction]
fn collapse_v_to_u(text: &str) -> String {
    uv::collapse_v_to_u(text)
}

/// Returns: (word, applied_rules)
#[pyfunction]
fn normalize_long_s_word_pass1(word: &str) -> PyResult<(String, Vec<String>)> {
    Ok(long_s()?.normalize_word_pass1(word))
}

/// Returns: (word, applied_rules)
#[pyfunction]
#[pyo3(signature = (word, threshold=2.0))]
fn normalize_long_s_word_pass2(word: &str, threshold: f64) -> PyResult<(String, Vec<String>)> {
    Ok(long_s()?.normalize_word_pass2(word, threshold))
}

#[pyfunction]
#[pyo3(signature = (word, apply_pass2=true))]
fn normalize_long_s_word_full(word: &str, apply_pass2: bool) -> PyResult<(String, Vec<String>)> {
    Ok(long_s()?.normalize_word_full(word, apply_pass2))
}

#[pyfunction]
#[pyo3(signature = (text, apply_pass2=true))]
fn normalize_long_s_text(text: &str, apply_pass2: bool) -> PyResult<String> {
    Ok(long_s()?.normalize_text_full(text, apply_pass2, false))
}

#[pyfunction]
fn strip_diacritics(text: &str) -> String {
    diacritics::strip_diacritics(text)
}

#[pyfunction]
fn base_char(ch: char) -> String {
    diacritics::base_char(ch)
}

#[pyfunction]
fn aligned_pairs(text: &str) -> Vec<(String, char)> {
    diacritics::aligned_pairs(text)
}

#[pyfunction]
fn strip_macrons(text: &str) -> String {
    strip::strip_macrons(text)
}

/// Long-s correction then U/V normalization.
#[pyfunction]
fn normalize(text: &str) -> PyResult<String> {
    let corrected = long_s()?.normalize_text_full(text, true, false);
    Ok(uv::normalize_uv(&corrected))
}

#[pymodule]
fn rust_latin_preprocess(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(init_ngrams, m)?)?;
    m.add_function(wrap_pyfunction!(normalize_uv, m)?)?;
    m.add_function(wrap_pyfunction!(normalize_uv_char, m)?)?;
    m.add_function(wrap_pyfunction!(normalize_uv_detailed, m)?)?;
    m.add_function(wrap_pyfunction!(collapse_v_to_u, m)?)?;
    m.add_function(wrap_pyfunction!(normalize_long_s_word_pass1, m)?)?;
    m.add_function(wrap_pyfunction!(normalize_long_s_word_pass2, m)?)?;
    m.add_function(wrap_pyfunction!(normalize_long_s_word_full, m)?)?;
    m.add_function(wrap_pyfunction!(normalize_long_s_text, m)?)?;
    m.add_function(wrap_pyfunction!(strip_diacritics, m)?)?;
    m.add_function(wrap_pyfunction!(base_char, m)?)?;
    m.add_function(wrap_pyfunction!(aligned_pairs, m)?)?;
    m.add_function(wrap_pyfunction!(strip_macrons, m)?)?;
    m.add_function(wrap_pyfunction!(normalize, m)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass2_is_exposed() {
        let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/ngrams").to_string();
        init_ngrams(Some(dir)).unwrap();
        let (word, rules) = normalize_long_s_word_pass2("funt", 2.0).unwrap();
        assert_eq!(word, "sunt");
        assert_eq!(rules, vec!["<fu → <su (freq: 30000 vs 2000)"]);
        assert_eq!(normalize_long_s_word_pass2("funt", 100.0).unwrap().0, "funt");
        assert_eq!(normalize_long_s_word_pass2("FUit", 2.0).unwrap().0, "Fuit");
    }
}
