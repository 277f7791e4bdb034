use serde::Deserialize;

use crate::domain::preferences::{DisplayPreferences, FontFamily};
use crate::domain::weather::Location;

#[derive(Debug, Deserialize)]
/// Text settings and contrast toggle of the customer screens.
pub struct PreferencesForm {
    #[serde(default)]
    pub font_size: Option<i64>,
    #[serde(default)]
    pub font_family: Option<String>,
    #[serde(default)]
    pub high_contrast: Option<String>,
    /// Page to return to after saving.
    #[serde(default)]
    pub return_to: Option<String>,
}

impl PreferencesForm {
    /// Only the two customer pages are accepted as return targets.
    pub fn return_path(&self) -> &'static str {
        match self.return_to.as_deref() {
            Some("/customer/cart") => "/customer/cart",
            _ => "/customer",
        }
    }

    /// Applies the submitted settings on top of the current ones. Unknown
    /// font families keep the current choice.
    pub fn apply(&self, current: DisplayPreferences) -> DisplayPreferences {
        let mut preferences = match self.font_size {
            Some(size) => current.with_font_size(size),
            None => current,
        };
        if let Some(family) = self
            .font_family
            .as_deref()
            .and_then(|f| f.parse::<FontFamily>().ok())
        {
            preferences.font_family = family;
        }
        preferences.high_contrast = self.high_contrast.is_some();
        preferences
    }
}

#[derive(Debug, Deserialize)]
pub struct LocationForm {
    pub location: String,
}

impl LocationForm {
    pub fn location(&self) -> Option<Location> {
        self.location.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_are_applied_and_clamped() {
        let form = PreferencesForm {
            font_size: Some(30),
            font_family: Some("georgia".to_string()),
            high_contrast: Some("on".to_string()),
            return_to: Some("https://evil.example".to_string()),
        };

        let prefs = form.apply(DisplayPreferences::default());

        assert_eq!(prefs.font_size, 22);
        assert_eq!(prefs.font_family, FontFamily::Georgia);
        assert!(prefs.high_contrast);
        assert_eq!(form.return_path(), "/customer");
    }

    #[test]
    fn unchecked_contrast_turns_it_off() {
        let current = DisplayPreferences {
            high_contrast: true,
            ..DisplayPreferences::default()
        };
        let form = PreferencesForm {
            font_size: None,
            font_family: Some("wingdings".to_string()),
            high_contrast: None,
            return_to: Some("/customer/cart".to_string()),
        };

        let prefs = form.apply(current);

        assert!(!prefs.high_contrast);
        assert_eq!(prefs.font_family, FontFamily::Default);
        assert_eq!(form.return_path(), "/customer/cart");
    }
}
