#![cfg(test)]
/*!
Stylesheet lint for the web build.

Ensures that the selectors the Rust components rely on stay present in
`web/assets/main.css`. The toggles, effects and list regions only swap
classes; if a refactor drops one of those rules the page silently stops
reacting (theme switch without colors, sections stuck invisible, bar
never growing).

If you intentionally rename a selector:
    1. Update the component markup in `ui/src`.
    2. Adjust REQUIRED_SELECTORS accordingly.

A plain substring check is enough as an early warning.
*/

const MAIN_CSS: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/main.css"));

/// Selectors / tokens the components depend on.
const REQUIRED_SELECTORS: &[&str] = &[
    // Theme tokens
    ":root",
    "body {",
    "body.dark",
    "--particles-color-light",
    "--particles-color-dark",
    // Toggle icons
    ".hidden",
    ".site-header__toggle",
    // Effects
    ".fade-in-section",
    ".fade-in-section.is-visible",
    ".caret",
    "@keyframes caret-blink",
    "#scroll-progress-bar",
    "#particles-js",
    // Rebuilt regions
    ".skills__tag",
    ".timeline__item",
    ".timeline__highlight",
    ".project-card__image",
    ".project-card__link",
    // Shared UI
    ".card {",
    ".button--primary",
    ".button--ghost",
    ".accent-text",
    "@media (max-width: 720px)",
];

#[test]
fn stylesheet_contains_required_selectors() {
    let missing: Vec<&str> = REQUIRED_SELECTORS
        .iter()
        .copied()
        .filter(|sel| !MAIN_CSS.contains(sel))
        .collect();

    if !missing.is_empty() {
        panic!(
            "Missing {} required CSS selectors/tokens in main.css:\n{}",
            missing.len(),
            missing.join("\n")
        );
    }
}

#[test]
fn stylesheet_not_trivially_empty() {
    let non_ws_len = MAIN_CSS.chars().filter(|c| !c.is_whitespace()).count();
    assert!(
        non_ws_len > 3_000,
        "Stylesheet appears unexpectedly small ({non_ws_len} non-whitespace chars) – \
         did the file get truncated or path change?"
    );
}

#[test]
fn dark_mode_overrides_the_base_tokens() {
    let dark = MAIN_CSS
        .split("body.dark {")
        .nth(1)
        .and_then(|rest| rest.split('}').next())
        .expect("body.dark block present");
    for token in ["--color-bg", "--color-text", "--color-accent"] {
        assert!(dark.contains(token), "body.dark does not override {token}");
    }
}
