use serde::{Deserialize, Serialize};

/// Part of speech of a morpheme, coarsened from the Sejong tagset used by
/// Korean morphological analyzers (ko-dic, kiwi).
#[derive(
    Clone,
    Copy,
    Debug,
    Serialize,
    Deserialize,
    Hash,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    schemars::JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum PartOfSpeech {
    CommonNoun,   // NNG
    ProperNoun,   // NNP
    BoundNoun,    // NNB, NNBC
    Numeral,      // NR
    Pronoun,      // NP
    Verb,         // VV
    Adjective,    // VA
    Auxiliary,    // VX
    Copula,       // VCP, VCN
    Determiner,   // MM
    Adverb,       // MAG, MAJ
    Interjection, // IC
    Particle,     // J*
    Ending,       // E*
    Root,         // XR
    Affix,        // XPN, XSN, XSV, XSA
    Foreign,      // SL, SH
    Number,       // SN
    Symbol,       // SF, SE, SSO, SSC, SC, SY
    Unknown,
}

impl PartOfSpeech {
    /// Classifies a raw analyzer tag. Compound tags such as `VV+EP` and
    /// irregular markers such as `VV-R` are classified by their first segment.
    pub fn from_tag(tag: &str) -> Self {
        let head = tag.split(['+', '-']).next().unwrap_or_default().trim();
        match head {
            "NNG" => PartOfSpeech::CommonNoun,
            "NNP" => PartOfSpeech::ProperNoun,
            t if t.starts_with("NNB") => PartOfSpeech::BoundNoun,
            "NR" => PartOfSpeech::Numeral,
            "NP" => PartOfSpeech::Pronoun,
            "VV" => PartOfSpeech::Verb,
            "VA" => PartOfSpeech::Adjective,
            "VX" => PartOfSpeech::Auxiliary,
            "VCP" | "VCN" => PartOfSpeech::Copula,
            "MM" => PartOfSpeech::Determiner,
            "MAG" | "MAJ" => PartOfSpeech::Adverb,
            "IC" => PartOfSpeech::Interjection,
            "XR" => PartOfSpeech::Root,
            "SL" | "SH" => PartOfSpeech::Foreign,
            "SN" => PartOfSpeech::Number,
            t if t.starts_with('J') => PartOfSpeech::Particle,
            t if t.starts_with('E') => PartOfSpeech::Ending,
            t if t.starts_with('X') => PartOfSpeech::Affix,
            t if t.starts_with('S') => PartOfSpeech::Symbol,
            _ => PartOfSpeech::Unknown,
        }
    }

    /// True for the `NN*` classes: common, proper and bound nouns.
    pub fn is_noun_class(self) -> bool {
        matches!(
            self,
            PartOfSpeech::CommonNoun | PartOfSpeech::ProperNoun | PartOfSpeech::BoundNoun
        )
    }
}

impl std::fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let word = match self {
            PartOfSpeech::CommonNoun => "common noun",
            PartOfSpeech::ProperNoun => "proper noun",
            PartOfSpeech::BoundNoun => "bound noun",
            PartOfSpeech::Numeral => "numeral",
            PartOfSpeech::Pronoun => "pronoun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adjective => "adjective",
            PartOfSpeech::Auxiliary => "auxiliary",
            PartOfSpeech::Copula => "copula",
            PartOfSpeech::Determiner => "determiner",
            PartOfSpeech::Adverb => "adverb",
            PartOfSpeech::Interjection => "interjection",
            PartOfSpeech::Particle => "particle",
            PartOfSpeech::Ending => "ending",
            PartOfSpeech::Root => "root",
            PartOfSpeech::Affix => "affix",
            PartOfSpeech::Foreign => "foreign word",
            PartOfSpeech::Number => "number",
            PartOfSpeech::Symbol => "symbol",
            PartOfSpeech::Unknown => "unknown",
        };
        write!(f, "{word}")
    }
}

/// A morpheme as produced by a [`crate::Tokenizer`]. Offsets count `char`s in
/// the analyzed text.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, schemars::JsonSchema)]
pub struct Token {
    pub form: String,
    pub pos: PartOfSpeech,
    pub start: usize,
    pub len: usize,
}

impl Token {
    pub fn new(form: impl Into<String>, pos: PartOfSpeech, start: usize) -> Self {
        let form = form.into();
        let len = form.chars().count();
        Self {
            form,
            pos,
            start,
            len,
        }
    }

    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noun_tags() {
        for tag in ["NNG", "NNP", "NNB", "NNBC"] {
            assert!(PartOfSpeech::from_tag(tag).is_noun_class(), "{tag}");
        }
    }

    #[test]
    fn test_non_noun_tags() {
        for tag in ["NP", "NR", "VV", "JKS", "JX", "EF", "XSN", "SF", "SL", "", "W_URL"] {
            assert!(!PartOfSpeech::from_tag(tag).is_noun_class(), "{tag}");
        }
    }

    #[test]
    fn test_compound_and_irregular_tags() {
        assert_eq!(PartOfSpeech::from_tag("VV+EP"), PartOfSpeech::Verb);
        assert_eq!(PartOfSpeech::from_tag("VA-I"), PartOfSpeech::Adjective);
        assert_eq!(PartOfSpeech::from_tag("NNG+JKS"), PartOfSpeech::CommonNoun);
    }

    #[test]
    fn test_token_length_counts_chars() {
        let token = Token::new("삼각형", PartOfSpeech::CommonNoun, 10);
        assert_eq!(token.len, 3);
        assert_eq!(token.end(), 13);
    }
}
