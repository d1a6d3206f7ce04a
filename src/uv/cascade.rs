//! Table-driven U/V cascade.
//!
//! Each rule is a guard that either returns a verdict or passes. Guards run
//! in table order and the first verdict wins, so the order of `CASCADE` is
//! part of the behaviour: moving the double-u guards below the intervocalic
//! guard, for one, turns `iuuat` into `ivvat`.

use super::lexicon::{VOCALIC_U_WORDS, VOLO_PREFIXES, has_vocalic_stem, is_u_perfect_consonant};
use super::{UvClassifier, UvRule, Verdict, ends_word, lower};
use crate::context::{CharContext, is_alpha, is_consonant, is_vowel};

/// Everything a guard may look at.
struct Site<'a> {
    ctx: CharContext<'a>,
    idx: usize,
    word: String,
}

impl Site<'_> {
    fn at(&self, delta: isize) -> Option<char> {
        self.ctx.offset(self.idx, delta)
    }

    fn lc(&self, delta: isize) -> Option<char> {
        lower(self.at(delta))
    }

    fn prev_is(&self, test: fn(char) -> bool) -> bool {
        self.at(-1).is_some_and(test)
    }

    fn next_is(&self, test: fn(char) -> bool) -> bool {
        self.at(1).is_some_and(test)
    }

    /// Lowercased chars at offsets `1..` spell `tail`.
    fn followed_by(&self, tail: &str) -> bool {
        tail.chars()
            .zip(1..)
            .all(|(expected, delta)| self.lc(delta) == Some(expected))
    }
}

type Guard = fn(&Site<'_>) -> Option<Verdict>;

const CASCADE: &[Guard] = &[
    after_q,
    gu_before_vowel,
    word_exception,
    volo_perfect,
    perfect_uere,
    perfect_ui,
    perfect_uit,
    perfect_uimus,
    perfect_uisse,
    perfect_uer_stem,
    double_first,
    double_second,
    word_initial,
    intervocalic,
    before_consonant,
    word_final,
    post_consonant_before_vowel,
    post_consonant_before_consonant,
];

fn after_q(site: &Site<'_>) -> Option<Verdict> {
    (site.lc(-1) == Some('q')).then_some(Verdict::u(UvRule::AfterQ))
}

fn gu_before_vowel(site: &Site<'_>) -> Option<Verdict> {
    if site.lc(-1) != Some('g') || !site.next_is(is_vowel) {
        return None;
    }
    if site.lc(-2) == Some('n') {
        Some(Verdict::u(UvRule::NguDigraph))
    } else {
        Some(Verdict::u(UvRule::GuBeforeVowel))
    }
}

fn word_exception(site: &Site<'_>) -> Option<Verdict> {
    VOCALIC_U_WORDS
        .contains(site.word.as_str())
        .then_some(Verdict::u(UvRule::WordException))
}

fn volo_perfect(site: &Site<'_>) -> Option<Verdict> {
    let shape = site.lc(-1) == Some('l') && site.followed_by("it") && ends_word(site.at(3));
    let stem = VOLO_PREFIXES.iter().any(|p| site.word.starts_with(p));
    (shape && stem).then_some(Verdict::u(UvRule::VoloPerfect))
}

fn perfect_uere(site: &Site<'_>) -> Option<Verdict> {
    let matched = site.followed_by("ere")
        && ends_word(site.at(4))
        && site.prev_is(is_u_perfect_consonant);
    matched.then_some(Verdict::u(UvRule::PerfectUere))
}

fn perfect_ui(site: &Site<'_>) -> Option<Verdict> {
    let matched =
        site.followed_by("i") && ends_word(site.at(2)) && site.prev_is(is_u_perfect_consonant);
    matched.then_some(Verdict::u(UvRule::PerfectUi))
}

fn perfect_uit(site: &Site<'_>) -> Option<Verdict> {
    let matched =
        site.followed_by("it") && ends_word(site.at(3)) && site.prev_is(is_u_perfect_consonant);
    matched.then_some(Verdict::u(UvRule::PerfectUit))
}

fn perfect_uimus(site: &Site<'_>) -> Option<Verdict> {
    let matched = site.followed_by("imus")
        && ends_word(site.at(5))
        && site.prev_is(is_u_perfect_consonant);
    matched.then_some(Verdict::u(UvRule::PerfectUimus))
}

fn perfect_uisse(site: &Site<'_>) -> Option<Verdict> {
    let matched = site.followed_by("isse") && ends_word(site.at(5)) && site.prev_is(is_consonant);
    matched.then_some(Verdict::u(UvRule::PerfectUisse))
}

fn perfect_uer_stem(site: &Site<'_>) -> Option<Verdict> {
    let matched = site.followed_by("er")
        && matches!(site.lc(3), Some('a' | 'i' | 'o'))
        && site.prev_is(is_u_perfect_consonant);
    matched.then_some(Verdict::u(UvRule::PerfectUerStem))
}

/// First of a uu/uv/vu/vv pair, decided by what precedes it.
fn double_first(site: &Site<'_>) -> Option<Verdict> {
    if !matches!(site.lc(1), Some('u' | 'v')) {
        return None;
    }
    let prev = site.at(-1)?;
    if is_consonant(prev) {
        if site.at(-2).is_some_and(is_vowel) {
            Some(Verdict::v(UvRule::DoubleFirstVowelConsonant))
        } else {
            Some(Verdict::u(UvRule::DoubleFirstConsonantCluster))
        }
    } else if is_vowel(prev) {
        if prev.to_ascii_lowercase() == 'i' && site.ctx.is_word_boundary(site.idx - 1) {
            Some(Verdict::u(UvRule::DoubleFirstInitialI))
        } else {
            Some(Verdict::v(UvRule::DoubleFirstAfterVowel))
        }
    } else {
        None
    }
}

/// Second of a pair, decided by what precedes the first.
fn double_second(site: &Site<'_>) -> Option<Verdict> {
    if !matches!(site.lc(-1), Some('u' | 'v')) {
        return None;
    }
    let before_pair = site.at(-2)?;
    if is_consonant(before_pair) {
        if site.at(-3).is_some_and(is_vowel) {
            Some(Verdict::u(UvRule::DoubleSecondVowelConsonant))
        } else {
            Some(Verdict::v(UvRule::DoubleSecondConsonantCluster))
        }
    } else if is_vowel(before_pair) {
        if before_pair.to_ascii_lowercase() == 'i' && site.ctx.is_word_boundary(site.idx - 2) {
            Some(Verdict::v(UvRule::DoubleSecondInitialI))
        } else {
            Some(Verdict::u(UvRule::DoubleSecondAfterVowel))
        }
    } else {
        None
    }
}

fn word_initial(site: &Site<'_>) -> Option<Verdict> {
    if !site.ctx.is_word_boundary(site.idx) {
        return None;
    }
    if site.next_is(is_vowel) {
        Some(Verdict::v(UvRule::InitialBeforeVowel))
    } else {
        Some(Verdict::u(UvRule::InitialBeforeConsonant))
    }
}

fn intervocalic(site: &Site<'_>) -> Option<Verdict> {
    (site.prev_is(is_vowel) && site.next_is(is_vowel)).then_some(Verdict::v(UvRule::Intervocalic))
}

fn before_consonant(site: &Site<'_>) -> Option<Verdict> {
    site.next_is(is_consonant).then_some(Verdict::u(UvRule::BeforeConsonant))
}

fn word_final(site: &Site<'_>) -> Option<Verdict> {
    site.ctx.is_word_end(site.idx).then_some(Verdict::u(UvRule::WordFinal))
}

fn post_consonant_before_vowel(site: &Site<'_>) -> Option<Verdict> {
    if !(site.prev_is(is_consonant) && site.next_is(is_vowel)) {
        return None;
    }
    if has_vocalic_stem(&site.word) {
        Some(Verdict::u(UvRule::VocalicStem))
    } else {
        Some(Verdict::v(UvRule::PostConsonantBeforeVowel))
    }
}

fn post_consonant_before_consonant(site: &Site<'_>) -> Option<Verdict> {
    if !site.prev_is(is_consonant) {
        return None;
    }
    let closed = site.at(1).is_none_or(|n| is_consonant(n) || !is_alpha(n));
    closed.then_some(Verdict::u(UvRule::PostConsonantBeforeConsonant))
}

/// Reference cascade: one guard per rule, evaluated in order.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleCascade;

impl RuleCascade {
    pub fn new() -> Self {
        RuleCascade
    }
}

impl UvClassifier for RuleCascade {
    fn classify(&self, ctx: &CharContext<'_>, idx: usize) -> Verdict {
        let site = Site {
            ctx: *ctx,
            idx,
            word: ctx.extract_word(idx),
        };
        CASCADE
            .iter()
            .find_map(|guard| guard(&site))
            .unwrap_or(Verdict::u(UvRule::Default))
    }

    fn name(&self) -> &'static str {
        "baseline"
    }
}
