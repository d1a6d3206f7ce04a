//! Property checks over generated input.

use proptest::prelude::*;
use rust_latin_preprocess::context::{CharContext, detect_case, restore_case};
use rust_latin_preprocess::long_s::{LiteralEngine, LongSEngine, NgramTables, PatternEngine};
use rust_latin_preprocess::uv::{InlineCascade, RuleCascade, UvClassifier};
use rust_latin_preprocess::{
    LongSConfig, LongSNormalizer, build_charset, collapse_v_to_u, normalize_uv,
};
use std::collections::HashMap;
use std::sync::Arc;

fn long_s() -> LongSNormalizer {
    let trigrams = [("<fu", 2000), ("<su", 30000), ("<fe", 3000), ("<se", 25000)]
        .iter()
        .map(|(k, v)| (k.to_string(), *v))
        .collect();
    let tables = NgramTables::from_maps(HashMap::new(), trigrams, HashMap::new());
    LongSNormalizer::new(Arc::new(tables), LongSConfig::default()).unwrap()
}

fn title(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

const GREEK: &str = "αάἀἄὰβγδεέἐηήῆιίοόρῥσςυύῦωώῶᾳ";

proptest! {
    #[test]
    fn uv_passes_through_text_without_u_or_v(text in "[a-tw-zA-TW-Z0-9 ,.;]{0,40}") {
        prop_assert_eq!(normalize_uv(&text), text);
    }

    #[test]
    fn long_s_passes_through_words_without_f(word in "[a-eg-z]{1,12}") {
        let mut n = long_s();
        for variant in [word.clone(), word.to_uppercase(), title(&word)] {
            let (out, rules) = n.normalize_word_full(&variant, true);
            prop_assert_eq!(out, variant);
            prop_assert!(rules.is_empty());
        }
    }

    #[test]
    fn long_s_recases_mixed_words_without_f(word in "[a-eg-zA-EG-Z]{1,12}") {
        let mut n = long_s();
        let expected = restore_case(&word.to_lowercase(), detect_case(&word));
        let (out, rules) = n.normalize_word_full(&word, true);
        prop_assert_eq!(out, expected);
        prop_assert!(rules.is_empty());
    }

    #[test]
    fn uv_only_swaps_u_and_v(text in "[uvUVqgnlieaorstm ]{0,40}") {
        let out = normalize_uv(&text);
        prop_assert_eq!(out.chars().count(), text.chars().count());
        prop_assert_eq!(collapse_v_to_u(&out), collapse_v_to_u(&text));
    }

    #[test]
    fn long_s_preserves_case_pattern(word in "[a-z]{1,12}") {
        let mut n = long_s();
        for variant in [word.clone(), word.to_uppercase(), title(&word)] {
            let (out, _) = n.normalize_word_full(&variant, true);
            prop_assert_eq!(detect_case(&out), detect_case(&variant), "{} -> {}", variant, out);
        }
    }

    #[test]
    fn uv_backends_agree(text in "[uvUVqgnlieaorstmf ,]{0,30}") {
        let chars: Vec<char> = text.chars().collect();
        let ctx = CharContext::new(&chars);
        for idx in 0..chars.len() {
            if matches!(chars[idx], 'u' | 'v' | 'U' | 'V') {
                prop_assert_eq!(RuleCascade::new().classify(&ctx, idx), InlineCascade.classify(&ctx, idx));
            }
        }
    }

    #[test]
    fn long_s_engines_agree(word in "[fqupestcmi]{0,12}") {
        prop_assert_eq!(PatternEngine.rewrite(&word), LiteralEngine.rewrite(&word));
    }

    #[test]
    fn statistics_count_every_token(words in proptest::collection::vec("[a-z]{1,8}", 0..20)) {
        let mut n = long_s();
        let text = words.join(" ");
        let out = n.normalize_text_full(&text, true, false);
        let stats = n.statistics();
        prop_assert_eq!(stats.total_words, words.len() as u64);
        prop_assert!(stats.words_modified <= stats.total_words);
        prop_assert_eq!(out.split_whitespace().count(), words.len());
    }

    #[test]
    fn charset_round_trips_observed_text(picks in proptest::collection::vec(0usize..29, 1..40)) {
        let alphabet: Vec<char> = GREEK.chars().collect();
        let text: String = picks.iter().map(|&i| alphabet[i]).collect();
        let map = build_charset(&[text.as_str()]);
        prop_assert_eq!(map.decode_output(&map.encode_output(&text)), text);
    }
}
