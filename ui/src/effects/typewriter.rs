//! One-shot typewriter reveal for the hero subtitle.

use dioxus::prelude::*;

use crate::core::platform;

/// Successive prefixes of `text`, one more character each, ending with the
/// whole string. Splits on `char` boundaries.
pub fn frames(text: &str) -> impl Iterator<Item = &str> + '_ {
    text.char_indices()
        .map(move |(start, ch)| &text[..start + ch.len_utf8()])
}

/// Reveals `text` one character every `interval_ms`, followed by a caret.
/// Remount (via `key`) to restart with new text.
#[component]
pub fn Typewriter(text: String, interval_ms: u64) -> Element {
    let mut shown = use_signal(String::new);

    let source = text.clone();
    use_future(move || {
        let source = source.clone();
        async move {
            for frame in frames(&source) {
                shown.set(frame.to_string());
                platform::sleep_ms(interval_ms).await;
            }
        }
    });

    if text.is_empty() {
        return rsx! {};
    }

    rsx! {
        "{shown}"
        span { class: "caret" }
    }
}
