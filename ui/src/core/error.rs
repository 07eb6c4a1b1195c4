//! Error type shared by every fallible operation in the page, plus the one
//! place those errors end up: [`report`].

use std::fmt;

use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum PortfolioError {
    #[error("request for {url} failed with HTTP status {status}")]
    Status { url: String, status: u16 },

    #[error("network error while fetching {url}: {message}")]
    Network { url: String, message: String },

    #[error("bundle could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("no embedded bundle named {0}")]
    MissingBundle(String),

    #[error("storage unavailable: {0}")]
    Storage(String),

    #[error("DOM operation failed: {0}")]
    Dom(String),

    #[error("{0} is not supported on this platform")]
    Unsupported(&'static str),
}

/// Independent areas of the page. Each one reports its failures under its
/// own tag, so one failing concern never hides the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Concern {
    Config,
    Theme,
    Locale,
    Animations,
}

impl Concern {
    pub fn as_str(self) -> &'static str {
        match self {
            Concern::Config => "config",
            Concern::Theme => "theme",
            Concern::Locale => "locale",
            Concern::Animations => "animations",
        }
    }
}

impl fmt::Display for Concern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single error boundary. Failures surface in the console only.
pub fn report(concern: Concern, err: &PortfolioError) {
    error!(concern = %concern, "{err}");
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn js_error(value: wasm_bindgen::JsValue) -> PortfolioError {
    PortfolioError::Dom(
        value
            .as_string()
            .unwrap_or_else(|| format!("{value:?}")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_names_the_url() {
        let err = PortfolioError::Status {
            url: "./fr.json".into(),
            status: 404,
        };
        let message = err.to_string();
        assert!(message.contains("./fr.json"));
        assert!(message.contains("404"));
    }

    #[test]
    fn decode_errors_convert_from_serde() {
        let raw = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: PortfolioError = raw.into();
        assert!(matches!(err, PortfolioError::Decode(_)));
    }
}
