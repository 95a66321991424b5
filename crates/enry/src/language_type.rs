use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Linguist category of a language, as named by `get_language_type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LanguageType {
    #[default]
    Unknown,
    Data,
    Programming,
    Markup,
    Prose,
}

impl LanguageType {
    pub fn as_str(self) -> &'static str {
        match self {
            LanguageType::Unknown => "Unknown",
            LanguageType::Data => "Data",
            LanguageType::Programming => "Programming",
            LanguageType::Markup => "Markup",
            LanguageType::Prose => "Prose",
        }
    }
}

impl fmt::Display for LanguageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageType {
    type Err = std::convert::Infallible;

    /// Case-insensitive; anything unrecognized is `Unknown`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s.trim().to_ascii_lowercase().as_str() {
            "data" => LanguageType::Data,
            "programming" => LanguageType::Programming,
            "markup" => LanguageType::Markup,
            "prose" => LanguageType::Prose,
            _ => LanguageType::Unknown,
        };
        Ok(kind)
    }
}

impl From<&str> for LanguageType {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(LanguageType::from("Programming"), LanguageType::Programming);
        assert_eq!(LanguageType::from("prose"), LanguageType::Prose);
        assert_eq!(LanguageType::from(" DATA "), LanguageType::Data);
        assert_eq!(LanguageType::from(""), LanguageType::Unknown);
        assert_eq!(LanguageType::from("spreadsheet"), LanguageType::Unknown);
    }

    #[test]
    fn test_display_matches_native_names() {
        for kind in [
            LanguageType::Unknown,
            LanguageType::Data,
            LanguageType::Programming,
            LanguageType::Markup,
            LanguageType::Prose,
        ] {
            assert_eq!(LanguageType::from(kind.to_string().as_str()), kind);
        }
    }
}
