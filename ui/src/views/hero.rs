use dioxus::prelude::*;

use crate::core::config::SiteConfig;
use crate::effects::Typewriter;
use crate::state::PortfolioState;

#[component]
pub fn Hero(state: Signal<PortfolioState>) -> Element {
    let config = try_use_context::<SiteConfig>().unwrap_or_default();

    let snapshot = state.read();
    let t = |key: &str| snapshot.texts.get(key).to_string();
    let cv_href = config
        .cv
        .for_locale(snapshot.active_locale(config.default_locale))
        .to_string();
    let subtitle = snapshot.subtitle.clone();
    let subtitle_epoch = snapshot.subtitle_epoch;

    rsx! {
        section { id: "hero", class: "hero",
            div { class: "hero__content",
                p { class: "hero__greeting", "data-key": "hero_greeting", {t("hero_greeting")} }
                h1 { class: "hero__title", "data-key": "hero_title", {t("hero_title")} }
                // Restarted whenever a bundle brings a new subtitle.
                p { class: "hero__subtitle accent-text", "data-key": "hero_subtitle",
                    Typewriter {
                        key: "{subtitle_epoch}",
                        text: subtitle,
                        interval_ms: config.typewriter_interval_ms,
                    }
                }
                p { class: "hero__intro", "data-key": "hero_intro", {t("hero_intro")} }

                div { class: "hero__actions",
                    a {
                        class: "button button--primary",
                        href: "#projects",
                        "data-key": "hero_cta_projects",
                        {t("hero_cta_projects")}
                    }
                    a {
                        id: "cv-download-btn",
                        class: "button button--ghost",
                        href: "{cv_href}",
                        target: "_blank",
                        "data-key": "cv_download_btn",
                        {t("cv_download_btn")}
                    }
                }
            }
        }
    }
}
