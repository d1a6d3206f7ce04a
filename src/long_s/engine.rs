//! Pass 1 rewriting engines.
//!
//! Both engines take an already lowercased word and return the rewritten
//! word together with the rules that fired, in firing order.

use super::rules::{PASS1_RULES, TransformationRule, WORD_FINAL_RULE};
use crate::config::Backend;
use lazy_static::lazy_static;
use regex::{NoExpand, Regex};

/// Result of running Pass 1 over one lowercased word.
#[derive(Debug, Clone, PartialEq)]
pub struct Rewrite {
    pub word: String,
    pub fired: Vec<&'static TransformationRule>,
}

pub trait LongSEngine: Send + Sync {
    fn rewrite(&self, lowered: &str) -> Rewrite;

    fn name(&self) -> &'static str;
}

pub fn engine_for(backend: Backend) -> Box<dyn LongSEngine> {
    match backend {
        Backend::Baseline => Box::new(PatternEngine),
        Backend::Tuned => Box::new(LiteralEngine),
    }
}

lazy_static! {
    // Pass 1 rules compiled once, in rule order
    static ref PASS1_PATTERNS: Vec<(Regex, &'static TransformationRule)> = PASS1_RULES
        .iter()
        .map(|rule| {
            let re = Regex::new(&regex::escape(rule.pattern)).expect("escaped literal is a valid regex");
            (re, rule)
        })
        .collect();

    static ref WORD_FINAL_F: Regex = Regex::new(r"f$").expect("valid regex");
}

/// Compiled-regex engine; the reference implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct PatternEngine;

impl LongSEngine for PatternEngine {
    fn rewrite(&self, lowered: &str) -> Rewrite {
        let mut word = lowered.to_string();
        let mut fired = Vec::new();

        for (pattern, rule) in PASS1_PATTERNS.iter() {
            if pattern.is_match(&word) {
                word = pattern.replace_all(&word, NoExpand(rule.replacement)).into_owned();
                fired.push(*rule);
            }
        }

        if WORD_FINAL_F.is_match(&word) {
            word = WORD_FINAL_F.replace(&word, NoExpand("s")).into_owned();
            fired.push(&WORD_FINAL_RULE);
        }

        Rewrite { word, fired }
    }

    fn name(&self) -> &'static str {
        "baseline"
    }
}

/// Plain substring engine, no regex machinery.
#[derive(Debug, Default, Clone, Copy)]
pub struct LiteralEngine;

impl LongSEngine for LiteralEngine {
    fn rewrite(&self, lowered: &str) -> Rewrite {
        let mut word = lowered.to_string();
        let mut fired = Vec::new();

        for rule in PASS1_RULES.iter() {
            if word.contains(rule.pattern) {
                word = word.replace(rule.pattern, rule.replacement);
                fired.push(rule);
            }
        }

        if word.ends_with('f') {
            word.pop();
            word.push('s');
            fired.push(&WORD_FINAL_RULE);
        }

        Rewrite { word, fired }
    }

    fn name(&self) -> &'static str {
        "tuned"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptions(rewrite: &Rewrite) -> Vec<&'static str> {
        rewrite.fired.iter().map(|r| r.description).collect()
    }

    #[test]
    fn test_trigram_rules() {
        for engine in [engine_for(Backend::Baseline), engine_for(Backend::Tuned)] {
            assert_eq!(engine.rewrite("ftatua").word, "statua");
            assert_eq!(engine.rewrite("fpiritus").word, "spiritus");
            assert_eq!(engine.rewrite("fufcepit").word, "suscepit");
            assert_eq!(engine.rewrite("fumma").word, "summa");
            assert_eq!(engine.rewrite("fquam").word, "squam");
        }
    }

    #[test]
    fn test_bigram_rules() {
        for engine in [engine_for(Backend::Baseline), engine_for(Backend::Tuned)] {
            assert_eq!(engine.rewrite("fpecies").word, "species");
            assert_eq!(engine.rewrite("ftella").word, "stella");
            assert_eq!(engine.rewrite("fcientia").word, "scientia");
        }
    }

    #[test]
    fn test_word_final() {
        for engine in [engine_for(Backend::Baseline), engine_for(Backend::Tuned)] {
            assert_eq!(engine.rewrite("ef").word, "es");
            assert_eq!(engine.rewrite("fff").word, "ffs");
            assert_eq!(engine.rewrite("f").word, "s");
            assert_eq!(descriptions(&engine.rewrite("reuf")), vec!["word-final f → s (0.01% ratio)"]);
        }
    }

    #[test]
    fn test_rule_fires_once_per_word_even_when_repeated() {
        for engine in [engine_for(Backend::Baseline), engine_for(Backend::Tuned)] {
            let rewrite = engine.rewrite("ftaftim");
            assert_eq!(rewrite.word, "stastim");
            assert_eq!(descriptions(&rewrite), vec!["ft → st (impossible in Latin)"]);
        }
    }

    #[test]
    fn test_multiple_rules_in_order() {
        for engine in [engine_for(Backend::Baseline), engine_for(Backend::Tuned)] {
            let rewrite = engine.rewrite("fufcipief");
            assert_eq!(rewrite.word, "suscipies");
            assert_eq!(
                descriptions(&rewrite),
                vec!["fuf → sus (0.18% ratio)", "word-final f → s (0.01% ratio)"]
            );
        }
    }

    #[test]
    fn test_untouched_words() {
        for engine in [engine_for(Backend::Baseline), engine_for(Backend::Tuned)] {
            for word in ["", "dominus", "123", "αβγ", "ſtatua", "fuit"] {
                let rewrite = engine.rewrite(word);
                assert_eq!(rewrite.word, word);
                assert!(rewrite.fired.is_empty());
            }
        }
    }
}
