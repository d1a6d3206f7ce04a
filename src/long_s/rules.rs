use lazy_static::lazy_static;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// One f→s substitution and the corpus evidence behind it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformationRule {
    pub pattern: &'static str,
    pub replacement: &'static str,
    pub description: &'static str,
    pub confidence: Confidence,
    /// Share of the f-form among all occurrences in a clean corpus, in percent.
    pub ratio: f64,
}

impl TransformationRule {
    /// Key under which firings are counted, e.g. `ft → st`.
    pub fn counter_key(&self) -> String {
        format!("{} → {}", self.pattern, self.replacement)
    }
}

impl fmt::Display for TransformationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description)
    }
}

const fn rule(
    pattern: &'static str,
    replacement: &'static str,
    description: &'static str,
    confidence: Confidence,
    ratio: f64,
) -> TransformationRule {
    TransformationRule {
        pattern,
        replacement,
        description,
        confidence,
        ratio,
    }
}

/// Pass 1 substitutions, trigrams before bigrams. Order is significant.
pub static PASS1_RULES: [TransformationRule; 7] = [
    rule("fqu", "squ", "fqu → squ (impossible)", Confidence::High, 0.00),
    rule("fpe", "spe", "fpe → spe (impossible)", Confidence::High, 0.00),
    rule("fuf", "sus", "fuf → sus (0.18% ratio)", Confidence::High, 0.18),
    rule("fum", "sum", "fum → sum (0.64% ratio)", Confidence::High, 0.64),
    rule("fp", "sp", "fp → sp (impossible in Latin)", Confidence::High, 0.00),
    rule("ft", "st", "ft → st (impossible in Latin)", Confidence::High, 0.00),
    rule("fc", "sc", "fc → sc (impossible in Latin)", Confidence::High, 0.00),
];

/// Trailing f, applied after every `PASS1_RULES` entry. `>` marks word end.
pub static WORD_FINAL_RULE: TransformationRule =
    rule("f>", "s>", "word-final f → s (0.01% ratio)", Confidence::High, 0.01);

/// Word-initial pairs settled by n-gram frequency in Pass 2.
pub static PASS2_RULES: [TransformationRule; 3] = [
    rule("fu", "su", "fu vs su (12.87% ratio)", Confidence::Medium, 12.87),
    rule("fe", "se", "fe vs se (23.30% ratio)", Confidence::Medium, 23.30),
    rule("fi", "si", "fi vs si (27.94% ratio)", Confidence::Low, 27.94),
];

lazy_static! {
    /// Genuine f-initial words Pass 2 must never touch.
    pub static ref ALLOWLIST: HashSet<&'static str> = {
        let words = [
            "facere", "facio", "facit", "faciunt", "feceram", "fecerant", "fecerat", "fecere",
            "fecerim", "fecerint", "fecerit", "fecerunt", "feci", "fecimus", "fecisse", "fecissem",
            "fecissent", "fecisset", "fecisti", "fecistis", "fecit", "fecunda", "fecundam", "fecundi",
            "fecundis", "fecunditas", "fecunditatem", "fecundus", "felice", "felicem", "felices", "felici",
            "felicibus", "felicis", "feliciter", "felicium", "felix", "femina", "feminae", "feminam",
            "feminarum", "feminas", "feminis", "fenestra", "fenestram", "fenestras", "fenestris", "feram",
            "ferebam", "ferebant", "ferebat", "ferebatur", "feremus", "ferendi", "ferendo", "ferendum",
            "ferens", "ferent", "ferentem", "ferentis", "feres", "feret", "ferimus", "fero",
            "ferocem", "feroces", "feroci", "ferocis", "ferociter", "ferox", "ferre", "ferrem",
            "ferrent", "ferret", "ferri", "ferro", "ferrum", "fers", "fert", "fertis",
            "fertur", "ferunt", "feruntur", "festa", "festi", "festis", "festo", "festum",
            "fiant", "fiat", "fide", "fidei", "fideles", "fidelibus", "fidelis", "fideliter",
            "fidelium", "fidem", "fides", "fiebant", "fiebat", "fierent", "fieret", "fieri",
            "figura", "figurae", "figuram", "figurarum", "figuras", "figuris", "filia", "filiae",
            "filiam", "filiarum", "filias", "filii", "filiis", "filio", "filiorum", "filios",
            "filium", "filius", "finem", "fines", "finibus", "finire", "finis", "finit",
            "finita", "finitum", "finitur", "finium", "fio", "firma", "firmam", "firmamenti",
            "firmamento", "firmamentum", "firmare", "firmat", "firmi", "firmiter", "firmum", "firmus",
            "fit", "fiunt", "forma", "formae", "formam", "formas", "fuerat", "fuerint",
            "fuerit", "fuerunt", "fugere", "fugerunt", "fugi", "fugiens", "fugio", "fugisse",
            "fugit", "fugiunt", "fuisse", "fuissem", "fuissent", "fuisset", "fuit", "fundamenta",
            "fundamenti", "fundamento", "fundamentum", "furor", "furore", "furorem", "furoris", "futura",
            "futuram", "futuri", "futuris", "futurum", "futurus",
        ];
        words.iter().cloned().collect()
    };
}
