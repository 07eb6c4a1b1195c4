use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use tracing::debug;

use crate::components::SiteHeader;
use crate::controller::{use_portfolio_controller, Controller, PortfolioEvent, PortfolioSignals};
use crate::core::config::SiteConfig;
use crate::core::error::{report, Concern, PortfolioError};
use crate::core::platform;
use crate::core::storage::Preferences;
use crate::effects::{ParticleBackground, ScrollProgressBar};
use crate::i18n::BundleSource;
use crate::theme::Theme;

use super::{About, Contact, Experience, Footer, Hero, Projects, Skills};

/// The whole page. Owns the application state and the controller
/// coroutine; every section below only reads state and sends events.
#[component]
pub fn Portfolio() -> Element {
    let config = try_use_context::<SiteConfig>().unwrap_or_default();
    let prefs = use_hook({
        let keys = config.storage.clone();
        move || Preferences::platform_default(keys)
    });

    let initial_theme = use_hook({
        let prefs = prefs.clone();
        move || {
            let system_dark = platform::system_prefers_dark();
            prefs.theme(system_dark).unwrap_or_else(|err| {
                report(Concern::Theme, &err);
                Theme::resolve(None, system_dark)
            })
        }
    });

    let controller = Controller {
        prefs: prefs.clone(),
        source: BundleSource::platform_default(&config.bundle_base),
        default_locale: config.default_locale,
    };
    let (signals, events) = use_portfolio_controller(controller, initial_theme);
    let PortfolioSignals {
        state, progress, ..
    } = signals;

    // Initial render pass for the persisted (or default) locale.
    use_hook({
        let prefs = prefs.clone();
        let default_locale = config.default_locale;
        move || {
            let locale = prefs.locale(default_locale).unwrap_or_else(|err| {
                report(Concern::Locale, &err);
                default_locale
            });
            events.send(PortfolioEvent::SetLocale(locale));
        }
    });

    use_effect(move || {
        let theme = state.read().theme;
        if let Err(err) = theme.apply() {
            report(Concern::Theme, &err);
        }
    });

    use_effect(move || {
        if let Some(locale) = state.read().locale {
            if let Err(err) = platform::set_document_lang(locale.code()) {
                report(Concern::Locale, &err);
            }
        }
    });

    let listeners = use_hook(|| Rc::new(RefCell::new(PageListeners::default())));
    {
        let listeners = listeners.clone();
        use_drop(move || listeners.borrow_mut().detach());
    }

    let threshold = config.fade_in_threshold;
    let on_mounted = move |_| {
        for err in listeners.borrow_mut().attach(events, threshold) {
            report(Concern::Animations, &err);
        }
    };

    let (theme, epoch, title) = {
        let snapshot = state.read();
        (snapshot.theme, snapshot.epoch, snapshot.page_title.clone())
    };

    rsx! {
        if !title.is_empty() {
            document::Title { "{title}" }
        }

        ScrollProgressBar { progress }
        ParticleBackground { key: "{theme.as_str()}-{epoch}", theme, epoch }
        SiteHeader { state }

        main { class: "portfolio", onmounted: on_mounted,
            Hero { state }
            About { state }
            Skills { state }
            Experience { state }
            Projects { state }
            Contact { state }
        }

        Footer { state }
    }
}

/// Browser listeners that live as long as the page: the fade-in observer
/// and the scroll listener. Both forward to the controller.
#[derive(Default)]
struct PageListeners {
    #[cfg(target_arch = "wasm32")]
    sections: Option<crate::effects::fade_in::SectionObserver>,
    #[cfg(target_arch = "wasm32")]
    scroll: Option<crate::effects::progress::ScrollListener>,
}

impl PageListeners {
    /// Attach whatever is not attached yet. Each listener is independent:
    /// one failing does not keep the other from attaching.
    #[cfg(target_arch = "wasm32")]
    fn attach(&mut self, events: Coroutine<PortfolioEvent>, threshold: f64) -> Vec<PortfolioError> {
        use crate::effects::fade_in::{SectionObserver, SECTION_CLASS};
        use crate::effects::progress::ScrollListener;

        let Self { sections, scroll } = self;
        let steps: Vec<AttachStep<'_>> = vec![
            Box::new(move || -> Result<(), PortfolioError> {
                if sections.is_none() {
                    let tx = events.tx();
                    let observer =
                        SectionObserver::attach(&format!(".{SECTION_CLASS}"), threshold, move |id| {
                            let _ = tx.unbounded_send(PortfolioEvent::SectionVisible(id));
                        })?;
                    *sections = Some(observer);
                    debug!("fade-in observer attached");
                }
                Ok(())
            }),
            Box::new(move || -> Result<(), PortfolioError> {
                if scroll.is_none() {
                    let tx = events.tx();
                    let listener = ScrollListener::attach(move |percent| {
                        let _ = tx.unbounded_send(PortfolioEvent::Scrolled(percent));
                    })?;
                    *scroll = Some(listener);
                    debug!("scroll listener attached");
                }
                Ok(())
            }),
        ];
        run_all(steps)
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn attach(&mut self, _events: Coroutine<PortfolioEvent>, _threshold: f64) -> Vec<PortfolioError> {
        debug!("no page listeners off the web");
        run_all(Vec::new())
    }

    fn detach(&mut self) {
        *self = Self::default();
    }
}

type AttachStep<'a> = Box<dyn FnOnce() -> Result<(), PortfolioError> + 'a>;

/// Runs every step, even after a failure, and returns the failures.
fn run_all(steps: Vec<AttachStep<'_>>) -> Vec<PortfolioError> {
    steps.into_iter().filter_map(|step| step().err()).collect()
}
