//! Application state rendered by the views.

use crate::core::error::PortfolioError;
use crate::core::storage::Preferences;
use crate::i18n::{Bundle, Job, Locale, Project, TextTable, SUBTITLE_KEY};
use crate::theme::Theme;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PortfolioState {
    pub theme: Theme,
    /// `None` until the first bundle has loaded.
    pub locale: Option<Locale>,
    pub texts: TextTable,
    pub page_title: String,
    pub subtitle: String,
    pub skills: Vec<String>,
    pub experience: Vec<Job>,
    pub projects: Vec<Project>,
    /// Bumped on every committed locale; effects keyed on it restart.
    pub epoch: u64,
    /// Bumped only when a bundle brings a subtitle; restarts the typewriter.
    pub subtitle_epoch: u64,
}

impl PortfolioState {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.locale.is_some()
    }

    /// Locale the toggle flips from: the one on screen, else the fallback.
    pub fn active_locale(&self, fallback: Locale) -> Locale {
        self.locale.unwrap_or(fallback)
    }

    /// Replace every bundle-derived region with `bundle`'s content.
    pub fn commit_locale(&mut self, locale: Locale, bundle: &Bundle) {
        self.locale = Some(locale);
        self.texts.apply(bundle);
        if let Some(title) = bundle.text("page_title") {
            self.page_title = title.to_string();
        }
        if let Some(subtitle) = bundle.text(SUBTITLE_KEY) {
            self.subtitle = subtitle.to_string();
            self.subtitle_epoch = self.subtitle_epoch.wrapping_add(1);
        }
        self.skills = bundle.skills.clone();
        self.experience = bundle.experience.clone();
        self.projects = bundle.projects.clone();
        self.epoch = self.epoch.wrapping_add(1);
    }
}

/// Commit a finished bundle load and persist the locale.
///
/// A failed load leaves `state` and the persisted flag untouched. A failed
/// write of the flag is returned after the state has been committed.
pub fn apply_locale(
    state: &mut PortfolioState,
    prefs: &Preferences,
    locale: Locale,
    loaded: Result<Bundle, PortfolioError>,
) -> Result<(), PortfolioError> {
    let bundle = loaded?;
    state.commit_locale(locale, &bundle);
    prefs.set_locale(locale)
}
