use dioxus::prelude::*;

use crate::controller::PortfolioEvent;
use crate::core::config::SiteConfig;
use crate::i18n::{self, Locale};
use crate::state::PortfolioState;
use crate::theme::Theme;

/// Fixed page header: section links plus the locale and theme toggles.
///
/// Both toggles only send events; the controller owns the state change and
/// persistence. Icons swap purely from the current state: the light icon
/// shows in light mode, and the icon of the active locale shows.
#[component]
pub fn SiteHeader(state: Signal<PortfolioState>) -> Element {
    let events = use_coroutine_handle::<PortfolioEvent>();
    let config = try_use_context::<SiteConfig>().unwrap_or_default();
    let show_switcher = i18n::available_locales().len() > 1;

    let snapshot = state.read();
    let theme = snapshot.theme;
    let locale = snapshot.active_locale(config.default_locale);
    let t = |key: &str| snapshot.texts.get(key).to_string();

    rsx! {
        header { id: "navbar", class: "site-header",
            div { class: "site-header__inner",
                a { class: "site-header__brand", href: "#hero", "data-key": "nav_brand", {t("nav_brand")} }

                nav { class: "site-header__links",
                    a { class: "site-header__link", href: "#about", "data-key": "nav_about", {t("nav_about")} }
                    a { class: "site-header__link", href: "#skills", "data-key": "nav_skills", {t("nav_skills")} }
                    a { class: "site-header__link", href: "#experience", "data-key": "nav_experience", {t("nav_experience")} }
                    a { class: "site-header__link", href: "#projects", "data-key": "nav_projects", {t("nav_projects")} }
                    a { class: "site-header__link", href: "#contact", "data-key": "nav_contact", {t("nav_contact")} }
                }

                div { class: "site-header__actions",
                    if show_switcher {
                        button {
                            id: "lang-toggle",
                            r#type: "button",
                            class: "site-header__toggle",
                            aria_label: "Cambiar idioma / Switch language",
                            onclick: move |_| events.send(PortfolioEvent::ToggleLocale),
                            span { id: "lang-icon-es", class: locale.icon_class(Locale::Es), "ES" }
                            span { id: "lang-icon-en", class: locale.icon_class(Locale::En), "EN" }
                        }
                    }
                    button {
                        id: "theme-toggle",
                        r#type: "button",
                        class: "site-header__toggle",
                        aria_label: "Cambiar tema / Toggle theme",
                        onclick: move |_| events.send(PortfolioEvent::ToggleTheme),
                        span { id: "theme-icon-light", class: theme.icon_class(Theme::Light), "☀" }
                        span { id: "theme-icon-dark", class: theme.icon_class(Theme::Dark), "☾" }
                    }
                }
            }
        }
    }
}
