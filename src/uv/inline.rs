//! Straight-line U/V cascade.
//!
//! Makes the same decisions, in the same order, as [`super::RuleCascade`],
//! but reads the neighbour window once and only builds the lowercased word
//! when a lexical rule actually needs it.

use super::lexicon::{VOCALIC_U_WORDS, VOLO_PREFIXES, has_vocalic_stem, is_u_perfect_consonant};
use super::{UvClassifier, UvRule, Verdict, ends_word, lower};
use crate::context::{CharContext, is_alpha, is_consonant, is_vowel};
use lazy_static::lazy_static;

lazy_static! {
    /// Longer words can never be in the exception set.
    static ref LONGEST_EXCEPTION: usize =
        VOCALIC_U_WORDS.iter().map(|w| w.chars().count()).max().unwrap_or(0);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct InlineCascade;

/// Lowercased word, built on first use.
struct LazyWord<'a> {
    ctx: &'a CharContext<'a>,
    idx: usize,
    word: Option<String>,
}

impl LazyWord<'_> {
    fn get(&mut self) -> &str {
        let (ctx, idx) = (self.ctx, self.idx);
        self.word.get_or_insert_with(|| ctx.extract_word(idx))
    }
}

impl UvClassifier for InlineCascade {
    fn classify(&self, ctx: &CharContext<'_>, idx: usize) -> Verdict {
        let at = |delta: isize| ctx.offset(idx, delta);
        let (prev, prev2, prev3) = (at(-1), at(-2), at(-3));
        let next = [at(1), at(2), at(3), at(4), at(5)];
        let lp = lower(prev);
        let ln = next.map(lower);

        match lp {
            Some('q') => return Verdict::u(UvRule::AfterQ),
            Some('g') if next[0].is_some_and(is_vowel) => {
                return if lower(prev2) == Some('n') {
                    Verdict::u(UvRule::NguDigraph)
                } else {
                    Verdict::u(UvRule::GuBeforeVowel)
                };
            }
            _ => {}
        }

        let mut word = LazyWord { ctx, idx, word: None };
        let (start, end) = ctx.word_span(idx);
        if end - start <= *LONGEST_EXCEPTION && VOCALIC_U_WORDS.contains(word.get()) {
            return Verdict::u(UvRule::WordException);
        }

        let perfect_stem = prev.is_some_and(is_u_perfect_consonant);

        if lp == Some('l') && ln[..2] == [Some('i'), Some('t')] && ends_word(next[2]) {
            let w = word.get();
            if VOLO_PREFIXES.iter().any(|p| w.starts_with(p)) {
                return Verdict::u(UvRule::VoloPerfect);
            }
        }

        if ln[..3] == [Some('e'), Some('r'), Some('e')] && ends_word(next[3]) && perfect_stem {
            return Verdict::u(UvRule::PerfectUere);
        }

        if ln[0] == Some('i') {
            if ends_word(next[1]) && perfect_stem {
                return Verdict::u(UvRule::PerfectUi);
            }
            if ln[1] == Some('t') && ends_word(next[2]) && perfect_stem {
                return Verdict::u(UvRule::PerfectUit);
            }
            if ln[1..4] == [Some('m'), Some('u'), Some('s')] && ends_word(next[4]) && perfect_stem {
                return Verdict::u(UvRule::PerfectUimus);
            }
            if ln[1..4] == [Some('s'), Some('s'), Some('e')]
                && ends_word(next[4])
                && prev.is_some_and(is_consonant)
            {
                return Verdict::u(UvRule::PerfectUisse);
            }
        }

        if ln[..2] == [Some('e'), Some('r')] && matches!(ln[2], Some('a' | 'i' | 'o')) && perfect_stem {
            return Verdict::u(UvRule::PerfectUerStem);
        }

        if matches!(ln[0], Some('u' | 'v')) {
            if let Some(p) = prev {
                if is_consonant(p) {
                    return if prev2.is_some_and(is_vowel) {
                        Verdict::v(UvRule::DoubleFirstVowelConsonant)
                    } else {
                        Verdict::u(UvRule::DoubleFirstConsonantCluster)
                    };
                }
                if is_vowel(p) {
                    return if lp == Some('i') && ctx.is_word_boundary(idx - 1) {
                        Verdict::u(UvRule::DoubleFirstInitialI)
                    } else {
                        Verdict::v(UvRule::DoubleFirstAfterVowel)
                    };
                }
            }
        }

        if matches!(lp, Some('u' | 'v')) {
            if let Some(p2) = prev2 {
                if is_consonant(p2) {
                    return if prev3.is_some_and(is_vowel) {
                        Verdict::u(UvRule::DoubleSecondVowelConsonant)
                    } else {
                        Verdict::v(UvRule::DoubleSecondConsonantCluster)
                    };
                }
                if is_vowel(p2) {
                    return if p2.to_ascii_lowercase() == 'i' && ctx.is_word_boundary(idx - 2) {
                        Verdict::v(UvRule::DoubleSecondInitialI)
                    } else {
                        Verdict::u(UvRule::DoubleSecondAfterVowel)
                    };
                }
            }
        }

        let next_vowel = next[0].is_some_and(is_vowel);
        let prev_consonant = prev.is_some_and(is_consonant);

        if ctx.is_word_boundary(idx) {
            return if next_vowel {
                Verdict::v(UvRule::InitialBeforeVowel)
            } else {
                Verdict::u(UvRule::InitialBeforeConsonant)
            };
        }
        if prev.is_some_and(is_vowel) && next_vowel {
            return Verdict::v(UvRule::Intervocalic);
        }
        if next[0].is_some_and(is_consonant) {
            return Verdict::u(UvRule::BeforeConsonant);
        }
        if ctx.is_word_end(idx) {
            return Verdict::u(UvRule::WordFinal);
        }
        if prev_consonant && next_vowel {
            return if has_vocalic_stem(word.get()) {
                Verdict::u(UvRule::VocalicStem)
            } else {
                Verdict::v(UvRule::PostConsonantBeforeVowel)
            };
        }
        if prev_consonant && next[0].is_none_or(|n| is_consonant(n) || !is_alpha(n)) {
            return Verdict::u(UvRule::PostConsonantBeforeConsonant);
        }

        Verdict::u(UvRule::Default)
    }

    fn name(&self) -> &'static str {
        "tuned"
    }
}
