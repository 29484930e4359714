//! Text normalization applied before scoring
//!
//! Surface formatting (case, spacing, punctuation, concrete numbers and links)
//! should not hide a duplicate, so both sides of a comparison go through the
//! same pipeline first.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").unwrap());
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[\w.\-]+@[\w.\-]+\.[a-z]{2,}\b").unwrap());
static DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());
static PUNCT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").unwrap());
static SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").unwrap());

/// How much of the input is folded away before comparison
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Normalization {
    /// NFKC, lowercase, `url`/`email`/`0` placeholders, punctuation
    /// stripped, whitespace collapsed
    #[default]
    Full,
    /// Lowercase and trim only
    Basic,
}

impl Normalization {
    #[inline]
    #[must_use]
    pub fn from_flag(normalize: bool) -> Self {
        if normalize {
            Normalization::Full
        } else {
            Normalization::Basic
        }
    }

    pub fn apply(self, text: &str) -> String {
        match self {
            Normalization::Full => normalize_full(text),
            Normalization::Basic => text.trim().to_lowercase(),
        }
    }
}

fn normalize_full(text: &str) -> String {
    let s: String = text.nfkc().collect::<String>().to_lowercase();
    let s = URL_RE.replace_all(&s, " url ");
    let s = EMAIL_RE.replace_all(&s, " email ");
    let s = DIGITS_RE.replace_all(&s, " 0 ");
    let s = PUNCT_RE.replace_all(&s, " ");
    SPACE_RE.replace_all(&s, " ").trim().to_string()
}

/// Split into word tokens (runs of alphanumerics and `_`), lowercased
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    WORD_RE.find_iter(text).map(|m| m.as_str().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_normalization() {
        assert_eq!(Normalization::Full.apply("  Hello,   WORLD!!  "), "hello world");
        assert_eq!(
            Normalization::Full.apply("See https://example.com/a?b=1 now"),
            "see url now"
        );
        assert_eq!(Normalization::Full.apply("mail bob.smith@example.org today"), "mail email today");
        assert_eq!(Normalization::Full.apply("Budget 2024 was 15% over"), "budget 0 was 0 over");
    }

    #[test]
    fn test_full_normalization_nfkc() {
        // fullwidth letters and the "fi" ligature fold to plain ascii
        assert_eq!(Normalization::Full.apply("ＡＢＣ ﬁle"), "abc file");
    }

    #[test]
    fn test_basic_normalization() {
        assert_eq!(Normalization::Basic.apply("  Hello, World! "), "hello, world!");
        assert_eq!(Normalization::from_flag(false), Normalization::Basic);
        assert_eq!(Normalization::from_flag(true), Normalization::Full);
    }

    #[test]
    fn test_tokenize() {
        let tokens: Vec<String> = tokenize("You just, hate-animals! snake_case").collect();
        assert_eq!(tokens, vec!["you", "just", "hate", "animals", "snake_case"]);
        assert_eq!(tokenize("  ... ").count(), 0);
    }
}
