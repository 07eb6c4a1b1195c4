//! Reading-progress bar pinned to the top of the page.

use dioxus::prelude::*;

/// Percentage of the scrollable height already scrolled, in `[0, 100]`.
/// A page that cannot scroll reports 0.
pub fn scroll_percent(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> f64 {
    let scrollable = scroll_height - viewport_height;
    if !scroll_y.is_finite() || !scrollable.is_finite() || scrollable <= 0.0 {
        return 0.0;
    }
    (scroll_y / scrollable * 100.0).clamp(0.0, 100.0)
}

#[component]
pub fn ScrollProgressBar(progress: Signal<f64>) -> Element {
    let style = format!("width: {:.2}%", progress());

    rsx! {
        div { class: "scroll-progress",
            div { id: "scroll-progress-bar", class: "scroll-progress__bar", style: "{style}" }
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use listener::ScrollListener;

#[cfg(target_arch = "wasm32")]
mod listener {
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;

    use super::scroll_percent;
    use crate::core::error::{js_error, report, Concern, PortfolioError};
    use crate::core::platform;

    /// Window `scroll` listener feeding the current percentage to a callback.
    /// Removed on drop.
    pub struct ScrollListener {
        window: web_sys::Window,
        callback: Closure<dyn FnMut()>,
    }

    impl ScrollListener {
        pub fn attach(on_scroll: impl Fn(f64) + 'static) -> Result<Self, PortfolioError> {
            let window = platform::window()?;
            let callback = Closure::<dyn FnMut()>::new(move || match current_percent() {
                Ok(percent) => on_scroll(percent),
                Err(err) => report(Concern::Animations, &err),
            });
            window
                .add_event_listener_with_callback("scroll", callback.as_ref().unchecked_ref())
                .map_err(js_error)?;
            Ok(Self { window, callback })
        }
    }

    impl Drop for ScrollListener {
        fn drop(&mut self) {
            let _ = self
                .window
                .remove_event_listener_with_callback("scroll", self.callback.as_ref().unchecked_ref());
        }
    }

    fn current_percent() -> Result<f64, PortfolioError> {
        let window = platform::window()?;
        let scroll_y = window.scroll_y().map_err(js_error)?;
        let viewport = window.inner_height().map_err(js_error)?.as_f64().unwrap_or(0.0);
        let height = platform::document()?
            .document_element()
            .map(|root| f64::from(root.scroll_height()))
            .unwrap_or(0.0);
        Ok(scroll_percent(scroll_y, height, viewport))
    }
}
