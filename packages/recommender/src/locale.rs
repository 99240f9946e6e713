//! Input locale handling.
//!
//! A locale selects which extraction rule tables apply and which language
//! tags get attached to the parsed profile. Adding a locale means adding
//! rule tables in `parser::rules`; the extraction algorithm itself never
//! changes.

use serde::{Deserialize, Serialize};

/// Supported input locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English
    En,
    /// Urdu
    Ur,
}

impl Default for Locale {
    fn default() -> Self {
        Self::En
    }
}

impl Locale {
    /// Language tag recorded on profiles for this locale.
    pub fn language(&self) -> &'static str {
        match self {
            Locale::En => "english",
            Locale::Ur => "urdu",
        }
    }

    /// Parse from a locale code ("en", "ur"). Unknown codes fall back to
    /// English.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "ur" => Locale::Ur,
            _ => Locale::En,
        }
    }

    /// BCP 47-ish code for this locale.
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ur => "ur",
        }
    }
}

/// True when the text contains any Latin letters.
///
/// Used to tag "english" on profiles even for Urdu-locale messages that mix
/// scripts.
pub fn contains_latin_script(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(Locale::from_code("en"), Locale::En);
        assert_eq!(Locale::from_code("UR"), Locale::Ur);
        assert_eq!(Locale::from_code("fr"), Locale::En);
    }

    #[test]
    fn test_language_tags() {
        assert_eq!(Locale::En.language(), "english");
        assert_eq!(Locale::Ur.language(), "urdu");
    }

    #[test]
    fn test_latin_script_detection() {
        assert!(contains_latin_script("hello"));
        assert!(contains_latin_script("mujhe scholarship chahiye"));
        assert!(!contains_latin_script("مجھے وظیفہ چاہیے"));
        assert!(!contains_latin_script("123 456"));
    }
}
