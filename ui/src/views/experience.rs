use dioxus::prelude::*;

use crate::effects::FadeInSection;
use crate::i18n::Job;
use crate::state::PortfolioState;

#[component]
pub fn Experience(state: Signal<PortfolioState>) -> Element {
    let snapshot = state.read();
    let t = |key: &str| snapshot.texts.get(key).to_string();
    let cards = job_cards(&snapshot.experience, snapshot.texts.get("highlight_prefix"));

    rsx! {
        FadeInSection { id: "experience", class: "section",
            h2 { class: "section__title", "data-key": "experience_title", {t("experience_title")} }
            div { id: "experience-container", class: "timeline",
                for card in cards.into_iter() {
                    {render_job(card)}
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct JobCard {
    key: String,
    title: String,
    company: String,
    date: String,
    points: Vec<String>,
    /// `(prefix, text)`; only present for non-blank highlights.
    highlight: Option<(String, String)>,
}

fn job_cards(jobs: &[Job], highlight_prefix: &str) -> Vec<JobCard> {
    jobs.iter()
        .enumerate()
        .map(|(index, job)| JobCard {
            key: format!("{index}-{}", job.company),
            title: job.title.clone(),
            company: job.company.clone(),
            date: job.date.clone(),
            points: job.description.clone(),
            highlight: job
                .highlight()
                .map(|text| (highlight_prefix.to_string(), text.to_string())),
        })
        .collect()
}

fn render_job(card: JobCard) -> Element {
    let JobCard {
        key,
        title,
        company,
        date,
        points,
        highlight,
    } = card;

    rsx! {
        div { key: "{key}", class: "timeline__item",
            div { class: "card timeline__card",
                div { class: "timeline__heading",
                    h3 { class: "timeline__title", "{title}" }
                    span { class: "timeline__date", "{date}" }
                }
                h4 { class: "timeline__company", "{company}" }
                ul { class: "timeline__points",
                    for point in points.iter() {
                        li { "{point}" }
                    }
                }
                if let Some((prefix, text)) = highlight {
                    p { class: "timeline__highlight accent-text",
                        "{prefix}: "
                        span { class: "timeline__highlight-text", "{text}" }
                    }
                }
            }
        }
    }
}
