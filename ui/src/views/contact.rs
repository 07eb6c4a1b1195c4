use dioxus::prelude::*;

use crate::effects::FadeInSection;
use crate::state::PortfolioState;

#[component]
pub fn Contact(state: Signal<PortfolioState>) -> Element {
    let snapshot = state.read();
    let t = |key: &str| snapshot.texts.get(key).to_string();
    let email = snapshot.texts.get("contact_email").to_string();

    rsx! {
        FadeInSection { id: "contact", class: "section",
            h2 { class: "section__title", "data-key": "contact_title", {t("contact_title")} }
            div { class: "contact card",
                p { "data-key": "contact_text", {t("contact_text")} }
                if !email.is_empty() {
                    a {
                        class: "button button--primary",
                        href: "mailto:{email}",
                        "data-key": "contact_cta",
                        {t("contact_cta")}
                    }
                }
            }
        }
    }
}

#[component]
pub fn Footer(state: Signal<PortfolioState>) -> Element {
    let snapshot = state.read();

    rsx! {
        footer { class: "site-footer",
            p { "data-key": "footer_text", {snapshot.texts.get("footer_text").to_string()} }
        }
    }
}
