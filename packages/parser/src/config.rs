//! Markup locators and page configuration read from data attributes.

use std::fmt;
use std::str::FromStr;

use roxmltree::Document;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::markup::{element_by_id, non_empty_attribute};

/// Element carrying the page feature flags.
pub const CONTAINER_ID: &str = "glossary-page-container";

/// Element holding the glossary title.
pub const TITLE_ID: &str = "glossary-page-title";

/// Element holding the "about" paragraph and links.
pub const ABOUT_ID: &str = "glossary-page-about";

/// Element holding the tag vocabulary.
pub const TAGS_ID: &str = "glossary-page-tags";

/// Element holding the item list.
pub const ITEMS_ID: &str = "glossary-page-items";

/// Display theme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    /// Get the string value used in storage and markup.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a string that names none of the three themes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme '{0}'")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    /// Only the exact lowercase names are recognized.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" => Ok(Self::System),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}

/// Width of the item cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardWidth {
    #[default]
    Compact,
    Intermediate,
    Wide,
}

impl CardWidth {
    /// Parse from the `data-card-width` attribute. Unknown values fall back to compact.
    #[must_use]
    pub fn from_attribute(value: &str) -> Self {
        match value {
            "intermediate" => Self::Intermediate,
            "wide" => Self::Wide,
            _ => Self::Compact,
        }
    }
}

/// Feature flags and user details read from the page markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageConfig {
    pub enable_help_for_making_changes: bool,
    pub enable_saving_changes_in_memory: bool,
    pub enable_export_menu: bool,
    pub enable_order_items_buttons: bool,
    pub enable_last_updated_dates: bool,
    pub card_width: CardWidth,
    pub version_number: Option<u64>,
    pub default_theme: Theme,
    pub editor_is_running: bool,
    pub separate_backend_base_url: Option<String>,
    pub bearer_token: Option<String>,
    pub user_name: Option<String>,
    pub user_email_address: Option<String>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            enable_help_for_making_changes: false,
            enable_saving_changes_in_memory: false,
            enable_export_menu: true,
            enable_order_items_buttons: true,
            enable_last_updated_dates: false,
            card_width: CardWidth::Compact,
            version_number: None,
            default_theme: Theme::System,
            editor_is_running: false,
            separate_backend_base_url: None,
            bearer_token: None,
            user_name: None,
            user_email_address: None,
        }
    }
}

impl PageConfig {
    /// Read the configuration from the container and body data attributes.
    ///
    /// Missing elements or attributes leave the defaults in place.
    #[must_use]
    pub fn from_markup(doc: &Document<'_>) -> Self {
        let mut config = Self::default();

        if let Some(body) = doc
            .descendants()
            .find(|n| n.is_element() && n.tag_name().name().eq_ignore_ascii_case("body"))
        {
            let owned = |name: &str| non_empty_attribute(body, name).map(str::to_string);
            config.separate_backend_base_url = owned("data-separate-backend-base-url");
            config.bearer_token = owned("data-bearer-token");
            config.user_name = owned("data-user-name");
            config.user_email_address = owned("data-user-email-address");
        }

        let Some(container) = element_by_id(doc.root_element(), CONTAINER_ID) else {
            config.editor_is_running = config.separate_backend_base_url.is_some();
            return config;
        };

        let is_true = |name: &str| container.attribute(name) == Some("true");
        let is_not_false = |name: &str| container.attribute(name) != Some("false");

        config.enable_help_for_making_changes = is_true("data-enable-help-for-making-changes");
        config.enable_saving_changes_in_memory = is_true("data-enable-saving-changes-in-memory");
        config.enable_export_menu = is_not_false("data-enable-export-menu");
        config.enable_order_items_buttons = is_not_false("data-enable-order-items-buttons");
        config.enable_last_updated_dates = is_true("data-enable-last-updated-dates");
        config.card_width = container
            .attribute("data-card-width")
            .map(CardWidth::from_attribute)
            .unwrap_or_default();
        config.version_number = container
            .attribute("data-version-number")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|v| *v != 0);
        config.default_theme = container
            .attribute("data-default-theme")
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();
        config.editor_is_running =
            config.separate_backend_base_url.is_some() || is_true("data-editor-is-running");

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_str() {
        assert_eq!("dark".parse::<Theme>(), Ok(Theme::Dark));
        assert_eq!("light".parse::<Theme>(), Ok(Theme::Light));
        assert_eq!("system".parse::<Theme>(), Ok(Theme::System));
        assert!("Dark".parse::<Theme>().is_err());
        assert!("".parse::<Theme>().is_err());
    }

    #[test]
    fn test_unknown_theme_message() {
        let err = "solar".parse::<Theme>().unwrap_err();
        assert_eq!(err, UnknownTheme("solar".to_string()));
        assert_eq!(err.to_string(), "unknown theme 'solar'");

        let boxed: Box<dyn std::error::Error> = Box::new(err);
        assert!(boxed.source().is_none());
    }

    #[test]
    fn test_card_width_from_attribute() {
        assert_eq!(CardWidth::from_attribute("wide"), CardWidth::Wide);
        assert_eq!(
            CardWidth::from_attribute("intermediate"),
            CardWidth::Intermediate
        );
        assert_eq!(CardWidth::from_attribute("huge"), CardWidth::Compact);
    }

    #[test]
    fn test_config_defaults_without_container() {
        let doc = Document::parse("<html><body/></html>").unwrap();
        assert_eq!(PageConfig::from_markup(&doc), PageConfig::default());
    }

    #[test]
    fn test_config_reads_container_flags() {
        let xml = r#"<html><body data-user-name="Ada" data-bearer-token="">
            <div id="glossary-page-container"
                 data-enable-help-for-making-changes="true"
                 data-enable-export-menu="false"
                 data-enable-last-updated-dates="true"
                 data-card-width="wide"
                 data-version-number="7"
                 data-default-theme="dark"/>
        </body></html>"#;
        let doc = Document::parse(xml).unwrap();
        let config = PageConfig::from_markup(&doc);

        assert!(config.enable_help_for_making_changes);
        assert!(!config.enable_saving_changes_in_memory);
        assert!(!config.enable_export_menu);
        assert!(config.enable_order_items_buttons);
        assert!(config.enable_last_updated_dates);
        assert_eq!(config.card_width, CardWidth::Wide);
        assert_eq!(config.version_number, Some(7));
        assert_eq!(config.default_theme, Theme::Dark);
        assert!(!config.editor_is_running);
        assert_eq!(config.user_name.as_deref(), Some("Ada"));
        assert_eq!(config.bearer_token, None);
    }

    #[test]
    fn test_separate_backend_implies_editor_running() {
        let xml = r#"<html><body data-separate-backend-base-url="http://localhost:3003">
            <div id="glossary-page-container"/>
        </body></html>"#;
        let doc = Document::parse(xml).unwrap();
        let config = PageConfig::from_markup(&doc);

        assert!(config.editor_is_running);
        assert_eq!(
            config.separate_backend_base_url.as_deref(),
            Some("http://localhost:3003")
        );
    }

    #[test]
    fn test_invalid_version_number_is_absent() {
        let xml = r#"<div id="glossary-page-container" data-version-number="abc"/>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(PageConfig::from_markup(&doc).version_number, None);
    }

    #[test]
    fn test_config_serializes_camel_case() {
        let json = serde_json::to_value(PageConfig::default()).unwrap();
        assert_eq!(json["enableExportMenu"], true);
        assert_eq!(json["cardWidth"], "compact");
        assert_eq!(json["defaultTheme"], "system");
    }
}
