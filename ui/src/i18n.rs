//! Internationalization (i18n) support for `portfolio-ui`.
//!
//! Display text lives in one JSON bundle per locale:
//! ```text
//! i18n/
//!   es.json   (default locale)
//!   en.json
//! ```
//!
//! In the browser the bundles are fetched relative to the page
//! (`{bundle_base}{code}.json`). Native builds and tests read the same files
//! embedded at compile time through `rust-embed`.
//!
//! A bundle has four sections:
//! - `main`: flat text key → string map, bound to elements carrying a
//!   `data-key` attribute;
//! - `skills`: ordered skill labels;
//! - `experience`: ordered job records;
//! - `projects`: ordered project cards.
//!
//! To add a locale: add a [`Locale`] variant, drop `<code>.json` next to the
//! others and run the tests (`tests/bundle_keys.rs` checks completeness).

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

use crate::core::error::PortfolioError;
use crate::core::platform;

/// Text key rendered by the typewriter rather than bound directly.
pub const SUBTITLE_KEY: &str = "hero_subtitle";

#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Es,
    En,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::Es, Locale::En];

    pub fn code(self) -> &'static str {
        match self {
            Locale::Es => "es",
            Locale::En => "en",
        }
    }

    /// Accepts bare codes and full language tags (`en-GB`, `es_MX`).
    pub fn from_code(code: &str) -> Option<Self> {
        let tag: LanguageIdentifier = code.trim().replace('_', "-").parse().ok()?;
        match tag.language.as_str() {
            "es" => Some(Locale::Es),
            "en" => Some(Locale::En),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Locale::Es => Locale::En,
            Locale::En => Locale::Es,
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.json", self.code())
    }

    /// Class for a locale icon; only the active locale's icon shows.
    pub fn icon_class(self, icon_locale: Locale) -> &'static str {
        if self == icon_locale {
            "lang-icon"
        } else {
            "lang-icon hidden"
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub title: String,
    pub company: String,
    pub date: String,
    pub description: Vec<String>,
    #[serde(default)]
    pub highlight: Option<String>,
}

impl Job {
    /// Highlights that are missing or blank are not shown.
    pub fn highlight(&self) -> Option<&str> {
        self.highlight
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub image: String,
    pub code_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
    pub main: BTreeMap<String, String>,
    pub skills: Vec<String>,
    pub experience: Vec<Job>,
    pub projects: Vec<Project>,
}

impl Bundle {
    pub fn from_json(src: &str) -> Result<Self, PortfolioError> {
        Ok(serde_json::from_str(src)?)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.main
            .get(key)
            .map(String::as_str)
            .filter(|text| !text.is_empty())
    }
}

/// Text currently bound to `data-key` elements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextTable {
    entries: BTreeMap<String, String>,
}

impl TextTable {
    /// Overlay a bundle's `main` map. Keys that are missing or empty in the
    /// bundle keep their previous text; the typewriter key is never bound.
    pub fn apply(&mut self, bundle: &Bundle) {
        for (key, value) in &bundle.main {
            if key == SUBTITLE_KEY || value.is_empty() {
                continue;
            }
            self.entries.insert(key.clone(), value.clone());
        }
    }

    pub fn get(&self, key: &str) -> &str {
        self.entries.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Where bundles come from.
#[derive(Debug, Clone, PartialEq)]
pub enum BundleSource {
    /// Fetched over HTTP from `{base}{code}.json`.
    Http { base: String },
    /// Compiled into the binary.
    Embedded,
    /// Never resolves; stands in for a hung request.
    #[cfg(test)]
    Stalled,
}

impl BundleSource {
    pub fn platform_default(base: &str) -> Self {
        if cfg!(target_arch = "wasm32") {
            BundleSource::Http {
                base: base.to_string(),
            }
        } else {
            BundleSource::Embedded
        }
    }

    pub fn url(base: &str, locale: Locale) -> String {
        format!("{base}{}", locale.file_name())
    }

    pub async fn load(&self, locale: Locale) -> Result<Bundle, PortfolioError> {
        match self {
            BundleSource::Http { base } => {
                let body = platform::fetch_text(&Self::url(base, locale)).await?;
                Bundle::from_json(&body)
            }
            BundleSource::Embedded => embedded_bundle(locale),
            #[cfg(test)]
            BundleSource::Stalled => std::future::pending().await,
        }
    }
}

fn embedded_bundle(locale: Locale) -> Result<Bundle, PortfolioError> {
    let name = locale.file_name();
    let file = Localizations::get(&name).ok_or(PortfolioError::MissingBundle(name))?;
    Ok(serde_json::from_slice(&file.data)?)
}

static AVAILABLE: Lazy<Vec<Locale>> = Lazy::new(|| {
    let mut locales = Localizations::iter()
        .filter_map(|path| path.strip_suffix(".json").and_then(Locale::from_code))
        .collect::<Vec<_>>();
    locales.sort_by_key(|locale| locale.code());
    locales.dedup();
    locales
});

/// Locales with an embedded bundle (sorted by code).
pub fn available_locales() -> &'static [Locale] {
    AVAILABLE.as_slice()
}
