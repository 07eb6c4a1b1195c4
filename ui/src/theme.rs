//! Light/dark visual mode.

use crate::core::error::PortfolioError;
use crate::core::platform;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Theme::Dark)
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// A stored `"dark"` wins; any other non-empty stored value means light.
    /// Nothing stored defers to the system preference.
    pub fn resolve(stored: Option<&str>, system_prefers_dark: bool) -> Self {
        match stored.filter(|value| !value.is_empty()) {
            Some("dark") => Theme::Dark,
            Some(_) => Theme::Light,
            None if system_prefers_dark => Theme::Dark,
            None => Theme::Light,
        }
    }

    /// Class for an icon that should only show in this theme.
    pub fn icon_class(self, icon_theme: Theme) -> &'static str {
        if self == icon_theme {
            "theme-icon"
        } else {
            "theme-icon hidden"
        }
    }

    /// Push the mode onto `<body>` (the stylesheet keys off `body.dark`).
    pub fn apply(self) -> Result<(), PortfolioError> {
        platform::set_body_class("dark", self.is_dark())
    }
}
