use dioxus::prelude::*;

use ui::core::config::SiteConfig;
use ui::Portfolio;

const MAIN_CSS: Asset = asset!("/assets/main.css");

/// Deployment overrides on top of `SiteConfig::default()`.
const SITE_CONFIG: &str = include_str!("../site.json");

fn main() {
    dioxus::launch(App);
}

fn site_config() -> SiteConfig {
    SiteConfig::from_json(SITE_CONFIG).unwrap_or_else(|err| {
        ui::core::error::report(ui::core::error::Concern::Config, &err);
        SiteConfig::default()
    })
}

#[component]
fn App() -> Element {
    use_context_provider(site_config);

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        Portfolio {}
    }
}
