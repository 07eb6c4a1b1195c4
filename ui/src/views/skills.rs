use dioxus::prelude::*;

use crate::effects::FadeInSection;
use crate::state::PortfolioState;

#[component]
pub fn Skills(state: Signal<PortfolioState>) -> Element {
    let snapshot = state.read();
    let t = |key: &str| snapshot.texts.get(key).to_string();

    rsx! {
        FadeInSection { id: "skills", class: "section section--alt",
            h2 { class: "section__title", "data-key": "skills_title", {t("skills_title")} }
            div { id: "skills-container", class: "skills",
                for (index, skill) in snapshot.skills.iter().enumerate() {
                    span { key: "{index}-{skill}", class: "skills__tag", "{skill}" }
                }
            }
        }
    }
}
