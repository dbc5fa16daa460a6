use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EquityError;

/// Which side of a bilingual label to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Arabic,
    English,
    Both,
}

impl FromStr for Language {
    type Err = EquityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ar" | "arabic" => Ok(Language::Arabic),
            "en" | "english" => Ok(Language::English),
            "both" => Ok(Language::Both),
            other => Err(EquityError::InputValidation {
                field: "language".into(),
                reason: format!("unknown language '{other}'"),
            }),
        }
    }
}

/// An Arabic label with its English translation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BilingualText {
    pub arabic: String,
    pub english: String,
}

impl BilingualText {
    pub fn new(arabic: impl Into<String>, english: impl Into<String>) -> Self {
        BilingualText {
            arabic: arabic.into(),
            english: english.into(),
        }
    }

    pub fn render(&self, language: Language) -> String {
        match language {
            Language::Arabic => self.arabic.clone(),
            Language::English => self.english.clone(),
            Language::Both => self.to_string(),
        }
    }
}

/// `arabic / english`, the notice style used for every user-facing message.
impl fmt::Display for BilingualText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.arabic, self.english)
    }
}

/// A label that shows Arabic at rest and swaps to English in place while the
/// pointer is over it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverLabel {
    text: BilingualText,
    hovered: bool,
}

impl HoverLabel {
    pub fn new(text: BilingualText) -> Self {
        HoverLabel {
            text,
            hovered: false,
        }
    }

    pub fn pointer_enter(&mut self) {
        self.hovered = true;
    }

    pub fn pointer_leave(&mut self) {
        self.hovered = false;
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn shown(&self) -> &str {
        if self.hovered {
            &self.text.english
        } else {
            &self.text.arabic
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_languages() {
        let t = BilingualText::new("حفظ", "Save");
        assert_eq!(t.render(Language::Arabic), "حفظ");
        assert_eq!(t.render(Language::English), "Save");
        assert_eq!(t.render(Language::Both), "حفظ / Save");
    }

    #[test]
    fn test_hover_swaps_in_place() {
        let mut label = HoverLabel::new(BilingualText::new("إيضاح", "Note"));
        assert_eq!(label.shown(), "إيضاح");
        label.pointer_enter();
        assert_eq!(label.shown(), "Note");
        label.pointer_enter();
        assert!(label.is_hovered());
        label.pointer_leave();
        assert_eq!(label.shown(), "إيضاح");
    }

    #[test]
    fn test_language_parse() {
        assert_eq!("EN".parse::<Language>().unwrap(), Language::English);
        assert_eq!("ar".parse::<Language>().unwrap(), Language::Arabic);
        assert!("fr".parse::<Language>().is_err());
    }
}
