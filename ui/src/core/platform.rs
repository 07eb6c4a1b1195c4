//! Browser glue. Every function has a native counterpart so the views and
//! the unit tests compile off the web.

use crate::core::error::PortfolioError;

#[cfg(target_arch = "wasm32")]
use crate::core::error::js_error;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[cfg(target_arch = "wasm32")]
pub async fn sleep_ms(ms: u64) {
    gloo_timers::future::TimeoutFuture::new(ms.min(u32::MAX as u64) as u32).await;
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep_ms(ms: u64) {
    tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn window() -> Result<web_sys::Window, PortfolioError> {
    web_sys::window().ok_or(PortfolioError::Unsupported("window"))
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn document() -> Result<web_sys::Document, PortfolioError> {
    window()?
        .document()
        .ok_or(PortfolioError::Unsupported("document"))
}

#[cfg(target_arch = "wasm32")]
pub fn system_prefers_dark() -> bool {
    web_sys::window()
        .and_then(|win| win.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .map(|query| query.matches())
        .unwrap_or(false)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn system_prefers_dark() -> bool {
    false
}

/// Toggle a class on `<body>`.
#[cfg(target_arch = "wasm32")]
pub fn set_body_class(class: &str, on: bool) -> Result<(), PortfolioError> {
    let body = document()?
        .body()
        .ok_or_else(|| PortfolioError::Dom("document has no <body>".to_string()))?;
    body.class_list()
        .toggle_with_force(class, on)
        .map(|_| ())
        .map_err(js_error)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn set_body_class(_class: &str, _on: bool) -> Result<(), PortfolioError> {
    Ok(())
}

/// Set the `lang` attribute of the root element.
#[cfg(target_arch = "wasm32")]
pub fn set_document_lang(code: &str) -> Result<(), PortfolioError> {
    let root = document()?
        .document_element()
        .ok_or_else(|| PortfolioError::Dom("document has no root element".to_string()))?;
    root.set_attribute("lang", code).map_err(js_error)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn set_document_lang(_code: &str) -> Result<(), PortfolioError> {
    Ok(())
}

/// Read a CSS custom property from the root element. Empty when unset.
#[cfg(target_arch = "wasm32")]
pub fn root_css_var(name: &str) -> Result<String, PortfolioError> {
    let root = document()?
        .document_element()
        .ok_or_else(|| PortfolioError::Dom("document has no root element".to_string()))?;
    let style = window()?
        .get_computed_style(&root)
        .map_err(js_error)?
        .ok_or_else(|| PortfolioError::Dom("no computed style for root".to_string()))?;
    style
        .get_property_value(name)
        .map(|value| value.trim().to_string())
        .map_err(js_error)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn root_css_var(_name: &str) -> Result<String, PortfolioError> {
    Ok(String::new())
}

/// GET `url` and return the body as text. Non-2xx responses are errors.
#[cfg(target_arch = "wasm32")]
pub async fn fetch_text(url: &str) -> Result<String, PortfolioError> {
    use wasm_bindgen_futures::JsFuture;

    let network = |value: wasm_bindgen::JsValue| PortfolioError::Network {
        url: url.to_string(),
        message: value
            .as_string()
            .unwrap_or_else(|| format!("{value:?}")),
    };

    let response = JsFuture::from(window()?.fetch_with_str(url))
        .await
        .map_err(network)?;
    let response: web_sys::Response = response.dyn_into().map_err(network)?;
    if !response.ok() {
        return Err(PortfolioError::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }

    let body = JsFuture::from(response.text().map_err(network)?)
        .await
        .map_err(network)?;
    body.as_string().ok_or_else(|| PortfolioError::Network {
        url: url.to_string(),
        message: "response body is not text".to_string(),
    })
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn fetch_text(_url: &str) -> Result<String, PortfolioError> {
    Err(PortfolioError::Unsupported("HTTP bundle fetch"))
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn native_fetch_reports_unsupported() {
        let err = futures::executor::block_on(fetch_text("./es.json")).unwrap_err();
        assert!(matches!(err, PortfolioError::Unsupported(_)));
    }
}
