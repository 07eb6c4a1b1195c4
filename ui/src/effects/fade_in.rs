//! Sections that fade in the first time they scroll into view.

use std::collections::BTreeSet;

use dioxus::prelude::*;

/// Class every observed section carries.
pub const SECTION_CLASS: &str = "fade-in-section";
/// Added once a section has been seen.
pub const VISIBLE_CLASS: &str = "is-visible";

/// Ids of sections that have already been revealed. Revealing is one-way.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FadeInTracker {
    visible: BTreeSet<String>,
}

impl FadeInTracker {
    /// Returns `true` only the first time `id` is marked.
    pub fn mark_visible(&mut self, id: &str) -> bool {
        !id.is_empty() && self.visible.insert(id.to_string())
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.visible.contains(id)
    }

    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }
}

pub fn section_class(visible: bool, extra: &str) -> String {
    let mut class = String::from(SECTION_CLASS);
    if visible {
        class.push(' ');
        class.push_str(VISIBLE_CLASS);
    }
    if !extra.is_empty() {
        class.push(' ');
        class.push_str(extra);
    }
    class
}

#[component]
pub fn FadeInSection(id: String, #[props(default)] class: String, children: Element) -> Element {
    let tracker: Option<Signal<FadeInTracker>> = try_use_context::<Signal<FadeInTracker>>();
    let mut visible = false;
    if let Some(tracker) = tracker {
        visible = tracker.read().is_visible(&id);
    }
    let class = section_class(visible, &class);

    rsx! {
        section { id: "{id}", class: "{class}", {children} }
    }
}

#[cfg(target_arch = "wasm32")]
pub use observer::SectionObserver;

#[cfg(target_arch = "wasm32")]
mod observer {
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

    use crate::core::error::{js_error, PortfolioError};
    use crate::core::platform;

    type EntriesCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

    /// Watches every element matching a selector and reports each element's
    /// id once, on its first intersection. Disconnects on drop.
    pub struct SectionObserver {
        observer: IntersectionObserver,
        _callback: EntriesCallback,
    }

    impl SectionObserver {
        pub fn attach(
            selector: &str,
            threshold: f64,
            on_visible: impl Fn(String) + 'static,
        ) -> Result<Self, PortfolioError> {
            let callback: EntriesCallback = Closure::new(
                move |entries: js_sys::Array, observer: IntersectionObserver| {
                    for entry in entries.iter() {
                        let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                            continue;
                        };
                        if !entry.is_intersecting() {
                            continue;
                        }
                        let target = entry.target();
                        observer.unobserve(&target);
                        on_visible(target.id());
                    }
                },
            );

            let init = IntersectionObserverInit::new();
            js_sys::Reflect::set(
                &init,
                &JsValue::from_str("threshold"),
                &JsValue::from_f64(threshold),
            )
            .map_err(js_error)?;
            let observer =
                IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
                    .map_err(js_error)?;

            let sections = platform::document()?
                .query_selector_all(selector)
                .map_err(js_error)?;
            for index in 0..sections.length() {
                if let Some(element) = sections
                    .item(index)
                    .and_then(|node| node.dyn_into::<Element>().ok())
                {
                    observer.observe(&element);
                }
            }

            Ok(Self {
                observer,
                _callback: callback,
            })
        }
    }

    impl Drop for SectionObserver {
        fn drop(&mut self) {
            self.observer.disconnect();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marking_is_reported_once_per_section() {
        let mut tracker = FadeInTracker::default();
        assert!(tracker.mark_visible("about"));
        assert!(!tracker.mark_visible("about"));
        assert!(tracker.mark_visible("projects"));
        assert!(!tracker.mark_visible("projects"));
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn anonymous_sections_are_ignored() {
        let mut tracker = FadeInTracker::default();
        assert!(!tracker.mark_visible(""));
        assert!(tracker.is_empty());
    }

    #[test]
    fn visible_class_appears_exactly_once() {
        let class = section_class(true, "section--alt");
        assert_eq!(class.matches(VISIBLE_CLASS).count(), 1);
        assert!(class.starts_with(SECTION_CLASS));
        assert!(class.ends_with("section--alt"));
        assert_eq!(section_class(false, ""), SECTION_CLASS);
    }
}
