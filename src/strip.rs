//! Latin macron removal.

use unicode_normalization::UnicodeNormalization;

fn precomposed_base(c: char) -> Option<char> {
    Some(match c {
        'ā' => 'a',
        'ē' => 'e',
        'ī' => 'i',
        'ō' => 'o',
        'ū' => 'u',
        'ȳ' => 'y',
        'Ā' => 'A',
        'Ē' => 'E',
        'Ī' => 'I',
        'Ō' => 'O',
        'Ū' => 'U',
        'Ȳ' => 'Y',
        _ => return None,
    })
}

/// Remove macrons and breves, keeping case. Other marks survive.
pub fn strip_macrons(text: &str) -> String {
    text.chars()
        .map(|c| precomposed_base(c).unwrap_or(c))
        .nfd()
        .filter(|c| !matches!(c, '\u{0304}' | '\u{0306}'))
        .nfc()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precomposed() {
        assert_eq!(strip_macrons("laudāre"), "laudare");
        assert_eq!(strip_macrons("Rōma"), "Roma");
        assert_eq!(strip_macrons("ĀĒĪŌŪȲ"), "AEIOUY");
    }

    #[test]
    fn test_combining_marks() {
        assert_eq!(strip_macrons("a\u{0304}mo\u{0306}"), "amo");
        assert_eq!(strip_macrons("ă"), "a");
    }

    #[test]
    fn test_other_marks_survive() {
        assert_eq!(strip_macrons("café"), "café");
        assert_eq!(strip_macrons("plain text"), "plain text");
        assert_eq!(strip_macrons(""), "");
    }
}
