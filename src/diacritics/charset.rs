use super::aligned_pairs;
use crate::error::{PreprocessError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

pub const PAD_TOKEN: &str = "<pad>";
pub const UNK_TOKEN: &str = "<unk>";

/// Placeholder for indices with no output character.
const DECODE_FALLBACK: &str = "?";

/// On-disk form of a [`CharsetMap`].
#[derive(Serialize, Deserialize)]
struct CharsetRecord {
    input_chars: Vec<String>,
    output_chars: Vec<String>,
    base_to_variants: BTreeMap<String, Vec<String>>,
}

/// Index mapping between stripped characters (input) and polytonic characters (output).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharsetMap {
    input_chars: Vec<String>,
    output_chars: Vec<String>,
    base_to_variants: BTreeMap<String, Vec<String>>,
    input_index: HashMap<String, usize>,
    output_index: HashMap<String, usize>,
}

fn index_of(vocab: &[String]) -> HashMap<String, usize> {
    vocab.iter().enumerate().map(|(i, c)| (c.clone(), i)).collect()
}

fn encode(index: &HashMap<String, usize>, text: &str) -> Vec<usize> {
    let unk = index.get(UNK_TOKEN).copied().unwrap_or(0);
    let mut buf = [0u8; 4];
    text.chars()
        .map(|c| index.get(&*c.encode_utf8(&mut buf)).copied().unwrap_or(unk))
        .collect()
}

fn decode(vocab: &[String], indices: &[usize]) -> String {
    indices
        .iter()
        .map(|&i| vocab.get(i).map_or(DECODE_FALLBACK, String::as_str))
        .collect()
}

impl CharsetMap {
    pub fn new(
        input_chars: Vec<String>,
        output_chars: Vec<String>,
        base_to_variants: BTreeMap<String, Vec<String>>,
    ) -> Self {
        Self {
            input_index: index_of(&input_chars),
            output_index: index_of(&output_chars),
            input_chars,
            output_chars,
            base_to_variants,
        }
    }

    pub fn input_chars(&self) -> &[String] {
        &self.input_chars
    }

    pub fn output_chars(&self) -> &[String] {
        &self.output_chars
    }

    pub fn base_to_variants(&self) -> &BTreeMap<String, Vec<String>> {
        &self.base_to_variants
    }

    /// Observed polytonic forms of `base`, sorted.
    pub fn variants(&self, base: &str) -> &[String] {
        self.base_to_variants.get(base).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn input_size(&self) -> usize {
        self.input_chars.len()
    }

    pub fn output_size(&self) -> usize {
        self.output_chars.len()
    }

    /// Unknown characters map to the `<unk>` index (0 if there is none).
    pub fn encode_input(&self, text: &str) -> Vec<usize> {
        encode(&self.input_index, text)
    }

    pub fn encode_output(&self, text: &str) -> Vec<usize> {
        encode(&self.output_index, text)
    }

    /// Out-of-range indices decode to `?`.
    pub fn decode_input(&self, indices: &[usize]) -> String {
        decode(&self.input_chars, indices)
    }

    pub fn decode_output(&self, indices: &[usize]) -> String {
        decode(&self.output_chars, indices)
    }

    /// Write as pretty-printed JSON, creating parent directories.
    ///
    /// The file is written next to its target and renamed into place.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(|e| PreprocessError::io(parent, e))?;

        let record = CharsetRecord {
            input_chars: self.input_chars.clone(),
            output_chars: self.output_chars.clone(),
            base_to_variants: self.base_to_variants.clone(),
        };

        let mut temp = NamedTempFile::new_in(parent).map_err(|e| PreprocessError::io(parent, e))?;
        {
            let mut writer = BufWriter::new(temp.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, &record)?;
            writer
                .write_all(b"\n")
                .and_then(|_| writer.flush())
                .map_err(|e| PreprocessError::io(path, e))?;
        }
        temp.persist(path)
            .map_err(|e| PreprocessError::io(path, e.error))?;

        log::debug!("Saved {} to {}", self, path.display());
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| PreprocessError::io(path, e))?;
        let record: CharsetRecord =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| {
                PreprocessError::Deserialize {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
        let map = Self::new(record.input_chars, record.output_chars, record.base_to_variants);
        log::debug!("Loaded {} from {}", map, path.display());
        Ok(map)
    }
}

impl fmt::Display for CharsetMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CharsetMap(input={}, output={}, bases={})",
            self.input_size(),
            self.output_size(),
            self.base_to_variants.len()
        )
    }
}

/// Collect the input/output vocabularies of a polytonic corpus.
///
/// Both vocabularies start with `<pad>` and `<unk>` and are otherwise sorted.
pub fn build_charset<S: AsRef<str>>(texts: &[S]) -> CharsetMap {
    let mut inputs = BTreeSet::new();
    let mut outputs = BTreeSet::new();
    let mut variants: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for text in texts {
        for (base, poly) in aligned_pairs(text.as_ref()) {
            let poly = poly.to_string();
            outputs.insert(poly.clone());
            variants.entry(base.clone()).or_default().insert(poly);
            inputs.insert(base);
        }
    }

    let reserved = || [PAD_TOKEN.to_string(), UNK_TOKEN.to_string()];
    let input_chars = reserved().into_iter().chain(inputs).collect();
    let output_chars = reserved().into_iter().chain(outputs).collect();
    let base_to_variants = variants
        .into_iter()
        .map(|(base, set)| (base, set.into_iter().collect()))
        .collect();

    CharsetMap::new(input_chars, output_chars, base_to_variants)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> CharsetMap {
        build_charset(&["ἄνθρωπος", "λόγος"])
    }

    #[test]
    fn test_vocabularies() {
        let map = corpus();
        assert_eq!(&map.input_chars()[..2], &["<pad>", "<unk>"]);
        assert_eq!(&map.output_chars()[..2], &["<pad>", "<unk>"]);
        // α γ θ λ ν ο π ρ ς ω
        assert_eq!(map.input_size(), 12);
        assert_eq!(map.variants("ο"), &["ο", "ό"]);
        assert_eq!(map.variants("α"), &["ἄ"]);
        assert!(map.variants("β").is_empty());
        assert!(map.input_chars()[2..].windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_encode_decode() {
        let map = corpus();
        let ids = map.encode_output("λόγος");
        assert_eq!(map.decode_output(&ids), "λόγος");
        assert_eq!(map.decode_input(&map.encode_input("λογος")), "λογος");

        assert_eq!(map.encode_input("β"), vec![1]);
        assert_eq!(map.decode_output(&[0, 9999]), "<pad>?");
    }

    #[test]
    fn test_encode_without_unk_falls_back_to_zero() {
        let map = CharsetMap::new(vec!["α".into()], vec!["ά".into()], BTreeMap::new());
        assert_eq!(map.encode_input("αβ"), vec![0, 0]);
    }

    #[test]
    fn test_display() {
        let map = corpus();
        assert_eq!(map.to_string(), "CharsetMap(input=12, output=13, bases=10)");
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("charset.json");
        let map = corpus();
        map.save(&path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"input_chars\""));
        assert!(text.contains("ἄ"));

        assert_eq!(CharsetMap::load(&path).unwrap(), map);
    }

    #[test]
    fn test_load_missing_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("charset.json");
        fs::write(&path, r#"{"input_chars": [], "output_chars": []}"#).unwrap();

        let err = CharsetMap::load(&path).unwrap_err();
        assert!(matches!(err, PreprocessError::Deserialize { .. }));
        assert!(err.to_string().contains("base_to_variants"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = CharsetMap::load("/nonexistent/charset.json").unwrap_err();
        assert!(matches!(err, PreprocessError::Io { .. }));
    }
}
