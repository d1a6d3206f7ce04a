use super::engine::{LongSEngine, engine_for};
use super::ngrams::NgramTables;
use super::rules::{ALLOWLIST, PASS2_RULES, TransformationRule};
use crate::config::LongSConfig;
use crate::context::{detect_case, restore_case};
use crate::error::Result;
use rayon::prelude::*;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Running totals for one normalizer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Statistics {
    pub total_words: u64,
    pub words_modified: u64,
    /// Firing count per rule key, e.g. `ft → st` or `<fu → <su (Pass 2)`.
    pub transformations: HashMap<String, u64>,
}

impl Statistics {
    fn record(&mut self, key: String) {
        *self.transformations.entry(key).or_insert(0) += 1;
    }

    pub fn merge(&mut self, other: &Statistics) {
        self.total_words += other.total_words;
        self.words_modified += other.words_modified;
        for (key, count) in &other.transformations {
            *self.transformations.entry(key.clone()).or_insert(0) += count;
        }
    }

    pub fn reset(&mut self) {
        *self = Statistics::default();
    }

    pub fn modified_pct(&self) -> f64 {
        if self.total_words == 0 {
            return 0.0;
        }
        self.words_modified as f64 / self.total_words as f64 * 100.0
    }

    /// Transformations by descending count, ties broken by key.
    pub fn ranked(&self) -> Vec<(&str, u64)> {
        let mut ranked: Vec<(&str, u64)> = self
            .transformations
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}

fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.total_words == 0 {
            return writeln!(f, "No words processed.");
        }
        let rule = "=".repeat(60);
        writeln!(f)?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "TRANSFORMATION STATISTICS")?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "Total words processed: {}", thousands(self.total_words))?;
        writeln!(
            f,
            "Words modified: {} ({:.2}%)",
            thousands(self.words_modified),
            self.modified_pct()
        )?;
        writeln!(f)?;
        writeln!(f, "Transformations applied:")?;
        for (key, count) in self.ranked() {
            writeln!(f, "  {:20} : {:>6}x", key, thousands(count))?;
        }
        writeln!(f, "{}", rule)
    }
}

/// Which Pass 2 table a word-initial pair is judged on.
enum Evidence {
    Trigram,
    Fourgram(char),
}

/// Two-pass long-s corrector.
///
/// The n-gram tables are shared; the statistics are owned. Use [`fork`] to
/// get an independent accumulator over the same tables for another thread.
///
/// [`fork`]: LongSNormalizer::fork
pub struct LongSNormalizer {
    tables: Arc<NgramTables>,
    engine: Arc<dyn LongSEngine>,
    config: LongSConfig,
    stats: Statistics,
}

impl fmt::Debug for LongSNormalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LongSNormalizer")
            .field("engine", &self.engine.name())
            .field("config", &self.config)
            .field("stats", &self.stats)
            .finish()
    }
}

impl LongSNormalizer {
    pub fn new(tables: Arc<NgramTables>, config: LongSConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            tables,
            engine: Arc::from(engine_for(config.backend)),
            config,
            stats: Statistics::default(),
        })
    }

    /// Load the n-gram tables (explicit dir, environment, default) and build.
    pub fn from_dir(dir: Option<&Path>, config: LongSConfig) -> Result<Self> {
        let tables = NgramTables::locate(dir)?;
        Self::new(Arc::new(tables), config)
    }

    pub fn config(&self) -> &LongSConfig {
        &self.config
    }

    pub fn tables(&self) -> &Arc<NgramTables> {
        &self.tables
    }

    pub fn backend_name(&self) -> &'static str {
        self.engine.name()
    }

    pub fn statistics(&self) -> &Statistics {
        &self.stats
    }

    /// Same tables and settings, empty statistics.
    pub fn fork(&self) -> Self {
        Self {
            tables: Arc::clone(&self.tables),
            engine: Arc::clone(&self.engine),
            config: self.config.clone(),
            stats: Statistics::default(),
        }
    }

    /// Deterministic substitutions. Returns the word and the rules that fired.
    ///
    /// The result always carries the input's case pattern (upper, title or
    /// lower), so mixed-case input comes back re-cased even when nothing fires.
    pub fn normalize_word_pass1(&mut self, word: &str) -> (String, Vec<String>) {
        let case = detect_case(word);
        let rewrite = self.engine.rewrite(&word.to_lowercase());
        if rewrite.fired.is_empty() {
            return (restore_case(&rewrite.word, case), Vec::new());
        }

        let mut applied = Vec::with_capacity(rewrite.fired.len());
        for rule in rewrite.fired {
            applied.push(rule.description.to_string());
            self.stats.record(rule.counter_key());
        }
        (restore_case(&rewrite.word, case), applied)
    }

    /// Frequency-gated word-initial f→s, meant for Pass 1 output.
    pub fn normalize_word_pass2(&mut self, word: &str, threshold: f64) -> (String, Vec<String>) {
        let case = detect_case(word);
        let lowered = word.to_lowercase();
        if ALLOWLIST.contains(lowered.as_str()) {
            return (restore_case(&lowered, case), Vec::new());
        }

        let mut chars = lowered.chars();
        let branch = match (chars.next(), chars.next(), chars.next()) {
            (Some('f'), Some('u'), _) => Some((&PASS2_RULES[0], Evidence::Trigram)),
            (Some('f'), Some('e'), _) => Some((&PASS2_RULES[1], Evidence::Trigram)),
            (Some('f'), Some('i'), Some(third)) => Some((&PASS2_RULES[2], Evidence::Fourgram(third))),
            _ => None,
        };

        let Some((rule, evidence)) = branch else {
            return (restore_case(&lowered, case), Vec::new());
        };
        let Some(description) = self.judge(rule, &evidence, threshold) else {
            return (restore_case(&lowered, case), Vec::new());
        };

        let mut result = lowered;
        result.replace_range(..1, "s");
        self.stats
            .record(format!("<{} → <{} (Pass 2)", rule.pattern, rule.replacement));
        (restore_case(&result, case), vec![description])
    }

    /// Description of the firing when the s-form wins, `None` otherwise.
    fn judge(&self, rule: &TransformationRule, evidence: &Evidence, threshold: f64) -> Option<String> {
        let (f_freq, s_freq, label) = match evidence {
            Evidence::Trigram => (
                self.tables.trigram(&format!("<{}", rule.pattern)),
                self.tables.trigram(&format!("<{}", rule.replacement)),
                "freq",
            ),
            Evidence::Fourgram(third) => (
                self.tables.fourgram(&format!("<{}{}", rule.pattern, third)),
                self.tables.fourgram(&format!("<{}{}", rule.replacement, third)),
                "4gram freq",
            ),
        };
        let fires = s_freq as f64 > f_freq as f64 * threshold && s_freq > 0;
        log::trace!(
            "pass 2 <{} vs <{}: {} vs {} (threshold {}) -> {}",
            rule.pattern,
            rule.replacement,
            s_freq,
            f_freq,
            threshold,
            fires
        );
        fires.then(|| {
            format!(
                "<{} → <{} ({}: {} vs {})",
                rule.pattern, rule.replacement, label, s_freq, f_freq
            )
        })
    }

    /// Pass 1, then Pass 2 at the configured threshold when `apply_pass2`.
    pub fn normalize_word_full(&mut self, word: &str, apply_pass2: bool) -> (String, Vec<String>) {
        let (word, mut applied) = self.normalize_word_pass1(word);
        if !apply_pass2 {
            return (word, applied);
        }
        let (word, more) = self.normalize_word_pass2(&word, self.config.threshold);
        applied.extend(more);
        (word, applied)
    }

    pub fn normalize_text_pass1(&mut self, text: &str, report: bool) -> String {
        self.normalize_tokens(text, report, |n, w| n.normalize_word_pass1(w))
    }

    /// Whitespace runs in `text` collapse to single spaces.
    pub fn normalize_text_full(&mut self, text: &str, apply_pass2: bool, report: bool) -> String {
        self.normalize_tokens(text, report, |n, w| n.normalize_word_full(w, apply_pass2))
    }

    fn normalize_tokens<F>(&mut self, text: &str, report: bool, mut step: F) -> String
    where
        F: FnMut(&mut Self, &str) -> (String, Vec<String>),
    {
        let mut words = Vec::new();
        for token in text.split_whitespace() {
            self.stats.total_words += 1;
            let (word, applied) = step(self, token);
            if !applied.is_empty() {
                self.stats.words_modified += 1;
            }
            words.push(word);
        }
        if report {
            self.print_statistics();
        }
        words.join(" ")
    }

    /// Normalize many texts in parallel; worker statistics fold into this instance.
    pub fn normalize_batch<S>(&mut self, texts: &[S], apply_pass2: bool) -> Vec<String>
    where
        S: AsRef<str> + Sync,
    {
        let this = &*self;
        let results: Vec<(String, Statistics)> = texts
            .par_iter()
            .map(|text| {
                let mut worker = this.fork();
                let out = worker.normalize_text_full(text.as_ref(), apply_pass2, false);
                (out, worker.stats)
            })
            .collect();

        let mut outputs = Vec::with_capacity(results.len());
        for (out, stats) in results {
            self.stats.merge(&stats);
            outputs.push(out);
        }
        outputs
    }

    pub fn print_statistics(&self) {
        log::info!(
            "long-s: {} of {} words modified",
            self.stats.words_modified,
            self.stats.total_words
        );
        print!("{}", self.stats);
    }

    pub fn reset_statistics(&mut self) {
        self.stats.reset();
    }
}
