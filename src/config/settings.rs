//! Application settings configuration.

use serde::{Deserialize, Serialize};

/// Default number of hits requested per search.
const DEFAULT_PAGE_SIZE: u32 = 20;

/// The backend edition. Only affects what the header shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppMode {
    /// Community edition.
    #[default]
    Ce,
    /// Enterprise edition.
    Ee,
}

impl AppMode {
    /// Short label for the header.
    pub fn label(&self) -> &'static str {
        match self {
            AppMode::Ce => "CE",
            AppMode::Ee => "EE",
        }
    }
}

/// Application-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// The name of the default profile to use.
    pub default_profile: Option<String>,
    /// Number of hits requested per search.
    pub page_size: u32,
    /// Whether highlights are loaded automatically for the selected hit.
    pub show_file_preview: bool,
    /// Backend edition.
    pub mode: AppMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_profile: None,
            page_size: DEFAULT_PAGE_SIZE,
            show_file_preview: false,
            mode: AppMode::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.page_size, 20);
        assert!(!settings.show_file_preview);
        assert_eq!(settings.mode, AppMode::Ce);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings: Settings = toml::from_str("mode = \"ee\"").unwrap();
        assert_eq!(settings.mode, AppMode::Ee);
        assert_eq!(settings.page_size, 20);
        assert_eq!(settings.mode.label(), "EE");
    }
}
