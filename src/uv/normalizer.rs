use super::{UvClassifier, UvRule, classifier_for};
use crate::config::UvConfig;
use crate::context::{CharContext, is_uv};
use crate::error::{PreprocessError, Result};
use lazy_static::lazy_static;

lazy_static! {
    /// Shared default instance; stateless, so safe to use from any thread.
    static ref DEFAULT_NORMALIZER: UvNormalizer = UvNormalizer::default();
}

/// One position where the output differs from the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    /// Char offset into the original text.
    pub position: usize,
    pub original: char,
    pub normalized: char,
    pub rule: UvRule,
    /// Neighbourhood with the changed char bracketed, e.g. `mqu[e]`.
    pub context: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizationResult {
    pub original: String,
    pub normalized: String,
    /// Left-to-right, one per changed position.
    pub changes: Vec<ChangeRecord>,
}

impl NormalizationResult {
    /// Fraction of char positions agreeing with `reference`.
    ///
    /// Texts of different length score 0.0; two empty texts score 1.0.
    pub fn accuracy_against(&self, reference: &str) -> f64 {
        let ours: Vec<char> = self.normalized.chars().collect();
        let theirs: Vec<char> = reference.chars().collect();
        if ours.len() != theirs.len() {
            return 0.0;
        }
        if theirs.is_empty() {
            return 1.0;
        }
        let matches = ours.iter().zip(&theirs).filter(|(a, b)| a == b).count();
        matches as f64 / theirs.len() as f64
    }
}

/// Applies a U/V cascade across whole texts.
pub struct UvNormalizer {
    classifier: Box<dyn UvClassifier>,
    context_window: usize,
}

impl Default for UvNormalizer {
    fn default() -> Self {
        Self::new(&UvConfig::default())
    }
}

impl std::fmt::Debug for UvNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UvNormalizer")
            .field("backend", &self.classifier.name())
            .field("context_window", &self.context_window)
            .finish()
    }
}

fn match_case(value: char, like: char) -> char {
    if like.is_uppercase() {
        value.to_ascii_uppercase()
    } else {
        value
    }
}

impl UvNormalizer {
    pub fn new(config: &UvConfig) -> Self {
        Self {
            classifier: classifier_for(config.backend),
            context_window: config.context_window,
        }
    }

    /// Build around a caller-supplied cascade.
    pub fn with_classifier(classifier: Box<dyn UvClassifier>, context_window: usize) -> Self {
        Self {
            classifier,
            context_window,
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.classifier.name()
    }

    pub fn normalize(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        let chars: Vec<char> = text.chars().collect();
        let ctx = CharContext::new(&chars);
        chars
            .iter()
            .enumerate()
            .map(|(i, &ch)| {
                if is_uv(ch) {
                    match_case(self.classifier.classify(&ctx, i).value, ch)
                } else {
                    ch
                }
            })
            .collect()
    }

    /// Resolve the u/v at char index `idx`, in the case of the input char.
    pub fn classify_char(&self, text: &str, idx: usize) -> Result<(char, UvRule)> {
        let chars: Vec<char> = text.chars().collect();
        let ch = *chars.get(idx).ok_or_else(|| {
            PreprocessError::InvalidArgument(format!(
                "position {} is outside a text of {} characters",
                idx,
                chars.len()
            ))
        })?;
        if !is_uv(ch) {
            return Err(PreprocessError::InvalidArgument(format!(
                "character at position {} is not u/v: '{}'",
                idx, ch
            )));
        }
        let verdict = self.classifier.classify(&CharContext::new(&chars), idx);
        Ok((match_case(verdict.value, ch), verdict.rule))
    }

    pub fn normalize_detailed(&self, text: &str) -> NormalizationResult {
        let chars: Vec<char> = text.chars().collect();
        let ctx = CharContext::new(&chars);
        let mut normalized = String::with_capacity(text.len());
        let mut changes = Vec::new();

        for (i, &ch) in chars.iter().enumerate() {
            if !is_uv(ch) {
                normalized.push(ch);
                continue;
            }
            let verdict = self.classifier.classify(&ctx, i);
            let resolved = match_case(verdict.value, ch);
            normalized.push(resolved);
            if resolved != ch {
                changes.push(ChangeRecord {
                    position: i,
                    original: ch,
                    normalized: resolved,
                    rule: verdict.rule,
                    context: ctx.snippet(i, self.context_window),
                });
            }
        }

        NormalizationResult {
            original: text.to_string(),
            normalized,
            changes,
        }
    }
}

/// Normalize with the shared default instance.
pub fn normalize_uv(text: &str) -> String {
    DEFAULT_NORMALIZER.normalize(text)
}

pub fn normalize_uv_detailed(text: &str) -> NormalizationResult {
    DEFAULT_NORMALIZER.normalize_detailed(text)
}

/// Replace every v with u, keeping case.
///
/// Lossy: `normalize_uv` applied afterwards need not give back the input.
pub fn collapse_v_to_u(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'v' => 'u',
            'V' => 'U',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Backend;

    fn both() -> [UvNormalizer; 2] {
        [
            UvNormalizer::new(&UvConfig {
                backend: Backend::Baseline,
                ..UvConfig::default()
            }),
            UvNormalizer::new(&UvConfig::default()),
        ]
    }

    #[test]
    fn test_after_q() {
        for n in both() {
            assert_eq!(n.normalize("quod"), "quod");
            assert_eq!(n.normalize("aqua"), "aqua");
            assert_eq!(n.normalize("quinque"), "quinque");
        }
    }

    #[test]
    fn test_ngu_digraph() {
        for n in both() {
            assert_eq!(n.normalize("lingua"), "lingua");
            assert_eq!(n.normalize("sanguis"), "sanguis");
            assert_eq!(n.normalize("pinguis"), "pinguis");
        }
    }

    #[test]
    fn test_word_exceptions() {
        for n in both() {
            assert_eq!(n.normalize("cui"), "cui");
            assert_eq!(n.normalize("sua"), "sua");
            assert_eq!(n.normalize("perpetuum"), "perpetuum");
            assert_eq!(n.normalize("eius"), "eius");
        }
    }

    #[test]
    fn test_perfect_tense() {
        for n in both() {
            assert_eq!(n.normalize("fuit"), "fuit");
            assert_eq!(n.normalize("potuit"), "potuit");
            assert_eq!(n.normalize("fuisse"), "fuisse");
            assert_eq!(n.normalize("fuerat"), "fuerat");
            assert_eq!(n.normalize("voluit"), "voluit");
        }
    }

    #[test]
    fn test_double_u() {
        for n in both() {
            assert_eq!(n.normalize("seruus"), "servus");
            assert_eq!(n.normalize("fluuius"), "fluvius");
            assert_eq!(n.normalize("nouus"), "novus");
            assert_eq!(n.normalize("iuuat"), "iuvat");
            assert_eq!(n.normalize("paruus"), "parvus");
        }
    }

    #[test]
    fn test_initial_and_intervocalic() {
        for n in both() {
            assert_eq!(n.normalize("uia"), "via");
            assert_eq!(n.normalize("uinum"), "vinum");
            assert_eq!(n.normalize("nouo"), "novo");
            assert_eq!(n.normalize("breuis"), "brevis");
            assert_eq!(n.normalize("auis"), "avis");
        }
    }

    #[test]
    fn test_sentence_and_case() {
        for n in both() {
            assert_eq!(n.normalize("Arma uirumque cano"), "Arma virumque cano");
            assert_eq!(n.normalize("SENATVS POPVLVSQVE ROMANVS"), "SENATUS POPULUSQUE ROMANUS");
            assert_eq!(n.normalize("Veni, uidi, uici"), "Veni, vidi, vici");
        }
    }

    #[test]
    fn test_vocalic_stems_and_soluit() {
        for n in both() {
            assert_eq!(n.normalize("soluit"), "solvit");
            assert_eq!(n.normalize("statuae"), "statuae");
            assert_eq!(n.normalize("arduo"), "arduo");
            assert_eq!(n.normalize("persuadeo"), "persuadeo");
        }
    }

    #[test]
    fn test_empty_and_plain_text() {
        let n = UvNormalizer::default();
        assert_eq!(n.normalize(""), "");
        assert_eq!(n.normalize("123 ... ab"), "123 ... ab");
        assert!(n.normalize_detailed("").changes.is_empty());
    }

    #[test]
    fn test_classify_char() {
        let n = UvNormalizer::default();
        assert_eq!(n.classify_char("uia", 0).unwrap(), ('v', UvRule::InitialBeforeVowel));
        assert_eq!(n.classify_char("Uia", 0).unwrap(), ('V', UvRule::InitialBeforeVowel));
        assert_eq!(n.classify_char("quod", 1).unwrap(), ('u', UvRule::AfterQ));
        assert!(matches!(
            n.classify_char("abc", 1),
            Err(PreprocessError::InvalidArgument(_))
        ));
        assert!(matches!(
            n.classify_char("uia", 7),
            Err(PreprocessError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_detailed_records_changes() {
        let result = normalize_uv_detailed("Arma uirumque cano");
        assert_eq!(result.normalized, "Arma virumque cano");
        assert_eq!(result.changes.len(), 1);
        let change = &result.changes[0];
        assert_eq!(change.position, 5);
        assert_eq!((change.original, change.normalized), ('u', 'v'));
        assert_eq!(change.rule, UvRule::InitialBeforeVowel);
        assert_eq!(change.context, "ma [u]iru");
    }

    #[test]
    fn test_detailed_window_is_configurable() {
        let n = UvNormalizer::new(&UvConfig {
            context_window: 1,
            ..UvConfig::default()
        });
        let result = n.normalize_detailed("nouus");
        assert_eq!(result.normalized, "novus");
        assert_eq!(result.changes[0].context, "o[u]u");
    }

    #[test]
    fn test_collapse_v_to_u() {
        assert_eq!(collapse_v_to_u("Arma virumque cano"), "Arma uirumque cano");
        assert_eq!(collapse_v_to_u("VIVAT"), "UIUAT");
        assert_eq!(normalize_uv(&collapse_v_to_u("virumque")), "virumque");
    }

    #[test]
    fn test_accuracy_against() {
        let result = normalize_uv_detailed("uia");
        assert_eq!(result.accuracy_against("via"), 1.0);
        assert!((result.accuracy_against("uia") - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(result.accuracy_against("viae"), 0.0);
        assert_eq!(NormalizationResult::default().accuracy_against(""), 1.0);
    }
}
