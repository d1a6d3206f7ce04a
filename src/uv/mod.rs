//! U/V disambiguation for Latin.
//!
//! Every u or v in a text is resolved to the vowel (`u`) or the consonant
//! (`v`) by a fixed cascade of positional, morphological and lexical rules.
//! The first rule that matches decides. Two interchangeable implementations
//! of the cascade exist: [`RuleCascade`] walks an ordered guard table, and
//! [`InlineCascade`] does the same decisions as straight-line branching.

mod cascade;
mod inline;
pub mod lexicon;
mod normalizer;

pub use cascade::RuleCascade;
pub use inline::InlineCascade;
pub use normalizer::{
    ChangeRecord, NormalizationResult, UvNormalizer, collapse_v_to_u, normalize_uv,
    normalize_uv_detailed,
};

use crate::config::Backend;
use crate::context::CharContext;
use std::fmt;

/// Name of the rule that decided a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UvRule {
    AfterQ,
    NguDigraph,
    GuBeforeVowel,
    WordException,
    VoloPerfect,
    PerfectUere,
    PerfectUi,
    PerfectUit,
    PerfectUimus,
    PerfectUisse,
    PerfectUerStem,
    DoubleFirstVowelConsonant,
    DoubleFirstConsonantCluster,
    DoubleFirstInitialI,
    DoubleFirstAfterVowel,
    DoubleSecondVowelConsonant,
    DoubleSecondConsonantCluster,
    DoubleSecondInitialI,
    DoubleSecondAfterVowel,
    InitialBeforeVowel,
    InitialBeforeConsonant,
    Intervocalic,
    BeforeConsonant,
    WordFinal,
    VocalicStem,
    PostConsonantBeforeVowel,
    PostConsonantBeforeConsonant,
    Default,
}

impl UvRule {
    /// Stable tag used in change logs and regression corpora.
    pub fn as_str(&self) -> &'static str {
        match self {
            UvRule::AfterQ => "after_q",
            UvRule::NguDigraph => "ngu_digraph",
            UvRule::GuBeforeVowel => "gu_before_vowel",
            UvRule::WordException => "word_exception",
            UvRule::VoloPerfect => "volo_perfect",
            UvRule::PerfectUere => "perfect_uere",
            UvRule::PerfectUi => "perfect_ui",
            UvRule::PerfectUit => "perfect_uit",
            UvRule::PerfectUimus => "perfect_uimus",
            UvRule::PerfectUisse => "perfect_uisse",
            UvRule::PerfectUerStem => "perfect_uer_stem",
            UvRule::DoubleFirstVowelConsonant => "double_u_first_VCuu",
            UvRule::DoubleFirstConsonantCluster => "double_u_first_CCuu",
            UvRule::DoubleFirstInitialI => "double_u_first_initial_i",
            UvRule::DoubleFirstAfterVowel => "double_u_first_Vuu",
            UvRule::DoubleSecondVowelConsonant => "double_u_second_VCuu",
            UvRule::DoubleSecondConsonantCluster => "double_u_second_CCuu",
            UvRule::DoubleSecondInitialI => "double_u_second_initial_i",
            UvRule::DoubleSecondAfterVowel => "double_u_second_Vuu",
            UvRule::InitialBeforeVowel => "initial_before_vowel",
            UvRule::InitialBeforeConsonant => "initial_before_consonant",
            UvRule::Intervocalic => "intervocalic",
            UvRule::BeforeConsonant => "before_consonant",
            UvRule::WordFinal => "word_final",
            UvRule::VocalicStem => "vocalic_u_stem",
            UvRule::PostConsonantBeforeVowel => "post_consonant_before_vowel",
            UvRule::PostConsonantBeforeConsonant => "post_consonant_before_consonant",
            UvRule::Default => "default",
        }
    }
}

impl fmt::Display for UvRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of classifying one position. `value` is always lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub value: char,
    pub rule: UvRule,
}

impl Verdict {
    pub(crate) const fn u(rule: UvRule) -> Self {
        Self { value: 'u', rule }
    }

    pub(crate) const fn v(rule: UvRule) -> Self {
        Self { value: 'v', rule }
    }
}

/// A U/V rule cascade.
///
/// `classify` assumes the character at `idx` is u/v in either case; the
/// normalizer checks that before calling.
pub trait UvClassifier: Send + Sync {
    fn classify(&self, ctx: &CharContext<'_>, idx: usize) -> Verdict;

    fn name(&self) -> &'static str;
}

pub fn classifier_for(backend: Backend) -> Box<dyn UvClassifier> {
    match backend {
        Backend::Baseline => Box::new(RuleCascade::new()),
        Backend::Tuned => Box::new(InlineCascade),
    }
}

/// Lowercased neighbour, for the ASCII comparisons the rules make.
pub(crate) fn lower(c: Option<char>) -> Option<char> {
    c.map(|c| c.to_ascii_lowercase())
}

/// True when `c` is absent or not a letter (end of the word).
pub(crate) fn ends_word(c: Option<char>) -> bool {
    c.is_none_or(|c| !c.is_alphabetic())
}
