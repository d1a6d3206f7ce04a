//! Greek polytonic diacritic stripping.
//!
//! Works on NFD: every marked letter is split into base plus combining
//! marks, the Greek marks are dropped and the rest is recomposed.

mod charset;

pub use charset::{CharsetMap, PAD_TOKEN, UNK_TOKEN, build_charset};

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::canonical_combining_class;

/// The 24 lowercase letters plus final sigma.
pub const GREEK_BASE_CHARS: &str = "αβγδεζηθικλμνξοπρσςτυφχψω";

/// Letters that can carry diacritics: the vowels and rho.
pub const MUTABLE_CHARS: &str = "αεηιουωρ";

/// Combining marks removed by stripping.
const GREEK_MARKS: [char; 11] = [
    '\u{0300}', // grave
    '\u{0301}', // acute
    '\u{0302}', // circumflex
    '\u{0303}', // tilde
    '\u{0304}', // macron
    '\u{0306}', // breve
    '\u{0308}', // diaeresis
    '\u{0313}', // smooth breathing
    '\u{0314}', // rough breathing
    '\u{0342}', // perispomeni
    '\u{0345}', // ypogegrammeni (iota subscript)
];

fn is_greek_mark(c: char) -> bool {
    GREEK_MARKS.contains(&c)
}

pub fn is_mutable(c: char) -> bool {
    MUTABLE_CHARS.contains(c)
}

/// Lowercase and remove all Greek diacritics. Other scripts come back lowercased.
pub fn strip_diacritics(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_greek_mark(*c))
        .nfc()
        .collect()
}

/// Undecorated lowercase form of one character; empty for a bare mark.
pub fn base_char(ch: char) -> String {
    ch.to_lowercase()
        .nfd()
        .filter(|c| !is_greek_mark(*c))
        .nfc()
        .collect()
}

/// `(base, original)` pairs over the composed characters of `text`.
///
/// Combining marks left over after NFC have no base letter and are dropped,
/// so the two sides always have the same length.
pub fn aligned_pairs(text: &str) -> Vec<(String, char)> {
    let composed: String = text.to_lowercase().nfc().collect();
    composed
        .chars()
        .filter(|&ch| canonical_combining_class(ch) == 0)
        .filter_map(|ch| {
            let base = base_char(ch);
            (!base.is_empty()).then_some((base, ch))
        })
        .collect()
}
