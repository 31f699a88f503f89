//! User preference models.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// Language code used when no preference is stored or it cannot be read.
pub const DEFAULT_LANGUAGE: &str = "en";

/// UI languages with a translation table.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Language {
    #[default]
    En,
    Es,
    Fr,
    Ar,
}

impl Language {
    /// Native display name shown in the settings screen.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Es => "Español",
            Language::Fr => "Français",
            Language::Ar => "العربية",
        }
    }

    /// Parses a stored code, `None` for anything unsupported.
    pub fn from_code(code: &str) -> Option<Self> {
        code.trim().parse().ok()
    }

    pub fn code(&self) -> &str {
        self.as_ref()
    }

    pub fn supported() -> Vec<Language> {
        Language::iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip_through_strum() {
        for language in Language::supported() {
            assert_eq!(Language::from_code(language.code()), Some(language));
        }
    }

    #[test]
    fn test_from_code_rejects_unknown() {
        assert_eq!(Language::from_code("de"), None);
        assert_eq!(Language::from_code(" FR "), Some(Language::Fr));
    }

    #[test]
    fn test_default_matches_constant() {
        assert_eq!(Language::default().code(), DEFAULT_LANGUAGE);
    }
}
