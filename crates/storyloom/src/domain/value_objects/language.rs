//! Language - Story languages supported by the writer

use serde::{Deserialize, Serialize};

/// Story language
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    /// Traditional Chinese
    Zh,
}

impl Language {
    /// Wire code (`en` / `zh`)
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }

    /// Human readable name used inside prompts
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Zh => "Traditional Chinese",
        }
    }

    /// The other language of the bilingual pair
    pub fn other(&self) -> Language {
        match self {
            Language::En => Language::Zh,
            Language::Zh => Language::En,
        }
    }

    /// All language codes, in declaration order
    pub const CODES: &'static [&'static str] = &["en", "zh"];
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "zh" | "zh-tw" | "zh-hant" | "chinese" => Ok(Language::Zh),
            _ => Err(format!("Unknown language: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("EN".parse::<Language>().unwrap(), Language::En);
        assert_eq!("zh-TW".parse::<Language>().unwrap(), Language::Zh);
        assert!("fr".parse::<Language>().is_err());
    }

    #[test]
    fn test_other_language() {
        assert_eq!(Language::En.other(), Language::Zh);
        assert_eq!(Language::Zh.other(), Language::En);
    }

    #[test]
    fn test_serde_uses_codes() {
        let json = serde_json::to_string(&Language::Zh).unwrap();
        assert_eq!(json, "\"zh\"");
        let parsed: Language = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(parsed, Language::En);
    }
}
