use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;

pub const MIN_FONT_SIZE: u8 = 14;
pub const MAX_FONT_SIZE: u8 = 22;
pub const DEFAULT_FONT_SIZE: u8 = 16;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    #[default]
    Default,
    Verdana,
    Georgia,
    Comic,
    Dyslexic,
}

impl FontFamily {
    pub const ALL: [FontFamily; 5] = [
        FontFamily::Default,
        FontFamily::Verdana,
        FontFamily::Georgia,
        FontFamily::Comic,
        FontFamily::Dyslexic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FontFamily::Default => "default",
            FontFamily::Verdana => "verdana",
            FontFamily::Georgia => "georgia",
            FontFamily::Comic => "comic",
            FontFamily::Dyslexic => "dyslexic",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FontFamily::Default => "Default Font",
            FontFamily::Verdana => "Verdana",
            FontFamily::Georgia => "Georgia",
            FontFamily::Comic => "Comic Sans",
            FontFamily::Dyslexic => "Open Dyslexic",
        }
    }

    /// CSS `font-family` value.
    pub fn css(self) -> &'static str {
        match self {
            FontFamily::Default => "system-ui, sans-serif",
            FontFamily::Verdana => "Verdana, sans-serif",
            FontFamily::Georgia => "Georgia, serif",
            FontFamily::Comic => "\"Comic Sans MS\", cursive",
            FontFamily::Dyslexic => "\"OpenDyslexic\", sans-serif",
        }
    }
}

impl FromStr for FontFamily {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FontFamily::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| TypeConstraintError::InvalidValue(format!("unknown font '{s}'")))
    }
}

/// Accessibility settings of the customer screens.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DisplayPreferences {
    pub font_size: u8,
    pub font_family: FontFamily,
    pub high_contrast: bool,
}

impl Default for DisplayPreferences {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            font_family: FontFamily::Default,
            high_contrast: false,
        }
    }
}

impl DisplayPreferences {
    /// Clamps the font size into the supported slider range.
    pub fn with_font_size(mut self, font_size: i64) -> Self {
        self.font_size =
            font_size.clamp(i64::from(MIN_FONT_SIZE), i64::from(MAX_FONT_SIZE)) as u8;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_size_is_clamped() {
        let prefs = DisplayPreferences::default();
        assert_eq!(prefs.with_font_size(40).font_size, MAX_FONT_SIZE);
        assert_eq!(prefs.with_font_size(2).font_size, MIN_FONT_SIZE);
        assert_eq!(prefs.with_font_size(18).font_size, 18);
    }
}
