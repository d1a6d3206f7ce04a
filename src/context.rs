//! Character-context helpers shared by the U/V and long-s engines.
//!
//! Positions are char offsets into a `[char]` buffer, never byte offsets.
//! Every neighbour lookup is bounds-safe and yields `None` off either end.

/// Latin vowels, including macron forms.
pub fn is_vowel(c: char) -> bool {
    matches!(
        c,
        'a' | 'e' | 'i' | 'o' | 'u' | 'A' | 'E' | 'I' | 'O' | 'U'
            | 'ā' | 'ē' | 'ī' | 'ō' | 'ū'
            | 'Ā' | 'Ē' | 'Ī' | 'Ō' | 'Ū'
    )
}

/// Latin consonants. u/v are excluded: they are what gets classified.
pub fn is_consonant(c: char) -> bool {
    matches!(
        c.to_ascii_lowercase(),
        'b' | 'c' | 'd' | 'f' | 'g' | 'h' | 'j' | 'k' | 'l' | 'm' | 'n' | 'p' | 'q' | 'r'
            | 's' | 't' | 'w' | 'x' | 'y' | 'z'
    )
}

pub fn is_alpha(c: char) -> bool {
    c.is_alphabetic()
}

/// Either case of u or v.
pub fn is_uv(c: char) -> bool {
    matches!(c, 'u' | 'v' | 'U' | 'V')
}

/// Read-only view over a text buffer.
#[derive(Debug, Clone, Copy)]
pub struct CharContext<'a> {
    chars: &'a [char],
}

impl<'a> CharContext<'a> {
    pub fn new(chars: &'a [char]) -> Self {
        Self { chars }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &'a [char] {
        self.chars
    }

    pub fn char_at(&self, idx: usize) -> Option<char> {
        self.chars.get(idx).copied()
    }

    /// Character `delta` positions away from `idx`; `None` when out of range.
    pub fn offset(&self, idx: usize, delta: isize) -> Option<char> {
        let target = idx.checked_add_signed(delta)?;
        self.char_at(target)
    }

    /// True at index 0 or when the preceding character is not a letter.
    pub fn is_word_boundary(&self, idx: usize) -> bool {
        if idx == 0 {
            return true;
        }
        self.char_at(idx - 1).is_none_or(|c| !is_alpha(c))
    }

    /// True at the last index or when the following character is not a letter.
    pub fn is_word_end(&self, idx: usize) -> bool {
        if idx + 1 >= self.chars.len() {
            return true;
        }
        self.char_at(idx + 1).is_none_or(|c| !is_alpha(c))
    }

    /// Char span `[start, end)` of the alphabetic run containing `idx`.
    pub fn word_span(&self, idx: usize) -> (usize, usize) {
        if idx >= self.chars.len() {
            return (idx, idx);
        }
        let mut start = idx;
        while start > 0 && is_alpha(self.chars[start - 1]) {
            start -= 1;
        }
        let mut end = idx;
        while end + 1 < self.chars.len() && is_alpha(self.chars[end + 1]) {
            end += 1;
        }
        (start, end + 1)
    }

    /// The lowercased word containing `idx`.
    pub fn extract_word(&self, idx: usize) -> String {
        let (start, end) = self.word_span(idx);
        self.chars[start..end].iter().flat_map(|c| c.to_lowercase()).collect()
    }

    /// `abc[d]efg` style snippet with `window` characters on each side.
    pub fn snippet(&self, idx: usize, window: usize) -> String {
        let Some(center) = self.char_at(idx) else {
            return String::new();
        };
        let start = idx.saturating_sub(window);
        let end = (idx + window + 1).min(self.chars.len());
        let mut out = String::with_capacity((end - start + 2) * 2);
        out.extend(&self.chars[start..idx]);
        out.push('[');
        out.push(center);
        out.push(']');
        out.extend(&self.chars[idx + 1..end]);
        out
    }
}

/// Word-level capitalisation pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseKind {
    Upper,
    Title,
    Other,
}

pub fn detect_case(word: &str) -> CaseKind {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return CaseKind::Other;
    };
    let multi = chars.next().is_some();
    let has_cased = word.chars().any(|c| c.is_uppercase() || c.is_lowercase());
    let all_upper = has_cased && !word.chars().any(|c| c.is_lowercase());

    if multi && all_upper {
        CaseKind::Upper
    } else if first.is_uppercase() {
        CaseKind::Title
    } else {
        CaseKind::Other
    }
}

/// Reapply `kind` to an already lowercased word.
pub fn restore_case(word: &str, kind: CaseKind) -> String {
    match kind {
        CaseKind::Upper => word.to_uppercase(),
        CaseKind::Title => {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
        CaseKind::Other => word.to_string(),
    }
}
