use dioxus::prelude::*;

use crate::effects::FadeInSection;
use crate::state::PortfolioState;

#[component]
pub fn About(state: Signal<PortfolioState>) -> Element {
    let snapshot = state.read();
    let t = |key: &str| snapshot.texts.get(key).to_string();

    rsx! {
        FadeInSection { id: "about", class: "section",
            h2 { class: "section__title", "data-key": "about_title", {t("about_title")} }
            div { class: "about card",
                p { "data-key": "about_p1", {t("about_p1")} }
                p { "data-key": "about_p2", {t("about_p2")} }
            }
        }
    }
}
