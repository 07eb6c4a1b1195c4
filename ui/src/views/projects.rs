use dioxus::prelude::*;

use crate::effects::FadeInSection;
use crate::i18n::Project;
use crate::state::PortfolioState;

#[component]
pub fn Projects(state: Signal<PortfolioState>) -> Element {
    let snapshot = state.read();
    let t = |key: &str| snapshot.texts.get(key).to_string();
    let cards = project_cards(&snapshot.projects, snapshot.texts.get("view_code_btn"));

    rsx! {
        FadeInSection { id: "projects", class: "section section--alt",
            h2 { class: "section__title", "data-key": "projects_title", {t("projects_title")} }
            div { id: "projects-container", class: "projects",
                for card in cards.into_iter() {
                    {render_project(card)}
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ProjectCard {
    key: String,
    title: String,
    description: String,
    image: String,
    code_url: String,
    code_label: String,
}

fn project_cards(projects: &[Project], view_code: &str) -> Vec<ProjectCard> {
    projects
        .iter()
        .enumerate()
        .map(|(index, project)| ProjectCard {
            key: format!("{index}-{}", project.title),
            title: project.title.clone(),
            description: project.description.clone(),
            image: project.image.clone(),
            code_url: project.code_url.clone(),
            code_label: format!("{view_code} →"),
        })
        .collect()
}

fn render_project(card: ProjectCard) -> Element {
    let ProjectCard {
        key,
        title,
        description,
        image,
        code_url,
        code_label,
    } = card;

    rsx! {
        div { key: "{key}", class: "card project-card",
            img { class: "project-card__image", src: "{image}", alt: "{title}" }
            div { class: "project-card__body",
                h3 { class: "project-card__title", "{title}" }
                p { class: "project-card__description", "{description}" }
                div { class: "project-card__links",
                    a {
                        class: "project-card__link accent-text",
                        href: "{code_url}",
                        target: "_blank",
                        rel: "noopener noreferrer",
                        "{code_label}"
                    }
                }
            }
        }
    }
}
