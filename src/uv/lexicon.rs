use lazy_static::lazy_static;
use std::collections::HashSet;

lazy_static! {
    /// Whole words whose u is vocalic even where positional rules say v.
    pub static ref VOCALIC_U_WORDS: HashSet<&'static str> = {
        let words = [
            // cui/huius pronouns
            "cui", "cuius", "huic", "huius", "cuique", "cuiquam",
            // suus, tuus
            "sua", "suae", "suam", "suas", "suis", "suo", "suos", "suum", "suorum", "suarum",
            "tua", "tuae", "tuam", "tuas", "tuis", "tuo", "tuos", "tuum", "tuorum", "tuarum",
            "tuus", "suus",
            "eius", "eiusdem",
            // duo
            "duo", "duae", "duos", "duas", "duobus", "duabus", "duorum", "duarum",
            // -uus / -uum adjectives
            "perpetuum", "perpetua", "perpetuae", "perpetuo", "perpetuam",
            "annuum", "annua", "annuae", "annuo",
            "mutuus", "mutua", "mutuae", "mutuum", "mutuo",
            "continuus", "continua", "continuae", "continuum", "continuo",
            "vacuus", "vacua", "vacuae", "vacuum", "vacuo",
            "ambiguus", "ambigua", "ambiguae", "ambiguum", "ambiguo",
            "exiguus", "exigua", "exiguum", "exiguo",
            "assiduus", "assidua", "assiduum", "assiduo",
            // u-perfects
            "intremuit", "tremuit", "fremuit", "gemuit", "intremuitque",
            "expalluit", "palluit",
            "deseruit", "inseruit", "conseruit",
            // syncopated -uere
            "potuere", "fuere", "habuere", "tenuere", "docuere", "monuere",
            "placuere", "tacuere", "patuere", "latuere", "caruere", "obstipuere",
            "obruerat", "obruit",
            // fruor
            "frui", "fruor", "fruitur", "fruuntur",
            "tenues", "tenuis", "impluit", "compluit",
            // fluo
            "fluunt", "effluunt", "affluunt", "confluunt", "influunt",
            "refluunt", "defluunt", "profluunt", "circumfluunt",
        ];
        words.iter().cloned().collect()
    };
}

/// Substrings marking a vocalic u in consonant-u-vowel position.
/// Only consulted by the post-consonant rule, after every earlier rule missed.
pub const VOCALIC_U_STEMS: &[&str] = &[
    "suad",     // suadeo, persuadeo
    "suar",     // suarum
    "suav",     // suavis
    "statu",    // statua
    "ardu",     // arduus
    "fatu",     // fatuus
    "residu",   // residuus
    "strenu",   // strenuus
    "conspicu", // conspicuus
    "individu", // individuus
];

/// Consonants that precede u in -ui- perfect endings (fuit, potuit, habuit, ...).
pub fn is_u_perfect_consonant(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'f' | 't' | 'n' | 'b' | 'c' | 'm' | 's' | 'p' | 'x')
}

pub fn has_vocalic_stem(word_lower: &str) -> bool {
    VOCALIC_U_STEMS.iter().any(|stem| word_lower.contains(stem))
}

/// Lowercase first letters of volo/nolo/malo forms with an l-perfect.
pub const VOLO_PREFIXES: &[&str] = &["vol", "nol", "mal", "uol"];
