//! Site configuration. The launcher provides a [`SiteConfig`] through
//! context; anything not overridden keeps the defaults below.

use serde::Deserialize;

use crate::effects::particles::ParticleConfig;
use crate::i18n::Locale;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub storage: StorageKeys,
    /// Prefix prepended to `{code}.json` when fetching bundles.
    pub bundle_base: String,
    pub default_locale: Locale,
    pub cv: CvLinks,
    pub typewriter_interval_ms: u64,
    /// Share of a section that must be on screen before it fades in.
    pub fade_in_threshold: f64,
    pub particles: ParticleConfig,
    pub particle_colors: ParticleColors,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            storage: StorageKeys::default(),
            bundle_base: "./".to_string(),
            default_locale: Locale::Es,
            cv: CvLinks::default(),
            typewriter_interval_ms: 100,
            fade_in_threshold: 0.1,
            particles: ParticleConfig::default(),
            particle_colors: ParticleColors::default(),
        }
    }
}

impl SiteConfig {
    /// Parse a (possibly partial) JSON override on top of the defaults.
    pub fn from_json(src: &str) -> Result<Self, crate::core::error::PortfolioError> {
        Ok(serde_json::from_str(src)?)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    pub theme: String,
    pub locale: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            theme: "theme".to_string(),
            locale: "language".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CvLinks {
    pub es: String,
    pub en: String,
}

impl CvLinks {
    pub fn for_locale(&self, locale: Locale) -> &str {
        match locale {
            Locale::Es => &self.es,
            Locale::En => &self.en,
        }
    }
}

impl Default for CvLinks {
    fn default() -> Self {
        Self {
            es: "./assets/docs/E.Pérez CV.pdf".to_string(),
            en: "./assets/docs/Eduardo_Perez_CV_EN.pdf".to_string(),
        }
    }
}

/// Used when the stylesheet does not define the particle custom properties.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParticleColors {
    pub light: String,
    pub dark: String,
}

impl Default for ParticleColors {
    fn default() -> Self {
        Self {
            light: "#0284c7".to_string(),
            dark: "#7dd3fc".to_string(),
        }
    }
}
