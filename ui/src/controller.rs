//! Event loops behind the page.
//!
//! User actions and browser callbacks arrive as [`PortfolioEvent`]s on one
//! coroutine that never awaits the network: theme, scroll and section
//! events take effect immediately. Locale requests are forwarded to a
//! second coroutine that loads bundles strictly one at a time, so a switch
//! requested mid-fetch waits for the previous one to finish.

use dioxus::prelude::*;
use futures_util::StreamExt;
use tracing::{debug, info};

use crate::core::error::{report, Concern};
use crate::core::storage::Preferences;
use crate::effects::FadeInTracker;
use crate::i18n::{BundleSource, Locale};
use crate::state::{apply_locale, PortfolioState};
use crate::theme::Theme;

#[derive(Debug, Clone, PartialEq)]
pub enum PortfolioEvent {
    ToggleTheme,
    ToggleLocale,
    SetLocale(Locale),
    SectionVisible(String),
    Scrolled(f64),
}

/// Work item for the locale queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleRequest {
    /// Flip relative to the locale on screen once earlier requests are done.
    Toggle,
    Set(Locale),
}

/// Reactive state the controller writes and the views read.
#[derive(Clone, Copy, PartialEq)]
pub struct PortfolioSignals {
    pub state: Signal<PortfolioState>,
    pub sections: Signal<FadeInTracker>,
    pub progress: Signal<f64>,
}

#[derive(Clone)]
pub struct Controller {
    pub prefs: Preferences,
    pub source: BundleSource,
    pub default_locale: Locale,
}

/// Create the page signals and spawn both loops. The returned coroutine is
/// also provided as context, so descendants reach it through
/// `use_coroutine_handle::<PortfolioEvent>()`.
pub fn use_portfolio_controller(
    controller: Controller,
    initial_theme: Theme,
) -> (PortfolioSignals, Coroutine<PortfolioEvent>) {
    let state = use_signal(|| PortfolioState::new(initial_theme));
    let sections = use_signal(FadeInTracker::default);
    let progress = use_signal(|| 0.0_f64);
    use_context_provider(|| sections);

    let signals = PortfolioSignals {
        state,
        sections,
        progress,
    };

    let locales = use_coroutine({
        let controller = controller.clone();
        move |rx| controller.clone().run_locale_queue(rx, state)
    });
    let events = use_coroutine(move |rx| controller.clone().run(rx, signals, locales));

    (signals, events)
}

impl Controller {
    /// Handles every page event. Locale events are only queued here.
    pub async fn run(
        self,
        mut rx: UnboundedReceiver<PortfolioEvent>,
        signals: PortfolioSignals,
        locales: Coroutine<LocaleRequest>,
    ) {
        let PortfolioSignals {
            mut state,
            mut sections,
            mut progress,
        } = signals;

        while let Some(event) = rx.next().await {
            match event {
                PortfolioEvent::ToggleTheme => {
                    let next = state.peek().theme.toggled();
                    state.with_mut(|s| s.theme = next);
                    if let Err(err) = self.prefs.set_theme(next) {
                        report(Concern::Theme, &err);
                    }
                    info!(theme = next.as_str(), "theme toggled");
                }
                PortfolioEvent::ToggleLocale => locales.send(LocaleRequest::Toggle),
                PortfolioEvent::SetLocale(locale) => locales.send(LocaleRequest::Set(locale)),
                PortfolioEvent::SectionVisible(id) => {
                    if !sections.peek().is_visible(&id) {
                        debug!(section = %id, "section revealed");
                        sections.with_mut(|tracker| tracker.mark_visible(&id));
                    }
                }
                PortfolioEvent::Scrolled(percent) => {
                    if *progress.peek() != percent {
                        progress.set(percent);
                    }
                }
            }
        }
    }

    /// Loads bundles in request order. The only loop that awaits a fetch.
    pub async fn run_locale_queue(
        self,
        mut rx: UnboundedReceiver<LocaleRequest>,
        state: Signal<PortfolioState>,
    ) {
        while let Some(request) = rx.next().await {
            let locale = match request {
                LocaleRequest::Set(locale) => locale,
                LocaleRequest::Toggle => {
                    let fallback = self.persisted_locale();
                    state.peek().active_locale(fallback).toggled()
                }
            };
            self.switch_locale(state, locale).await;
        }
    }

    fn persisted_locale(&self) -> Locale {
        self.prefs
            .locale(self.default_locale)
            .unwrap_or_else(|err| {
                report(Concern::Locale, &err);
                self.default_locale
            })
    }

    async fn switch_locale(&self, mut state: Signal<PortfolioState>, locale: Locale) {
        debug!(%locale, "loading bundle");
        let loaded = self.source.load(locale).await;

        // Snapshot after the await so theme changes made meanwhile are kept.
        let mut next = state.peek().clone();
        let result = apply_locale(&mut next, &self.prefs, locale, loaded);
        if next.epoch != state.peek().epoch {
            state.set(next);
            info!(%locale, "locale applied");
        }
        if let Err(err) = result {
            report(Concern::Locale, &err);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use dioxus::dioxus_core::{NoOpMutations, VirtualDom};

    use super::*;
    use crate::core::config::StorageKeys;
    use crate::core::storage::{MemoryStore, PrefStore};

    /// Everything the mounted test page shares with the test body.
    #[derive(Clone)]
    struct Bench {
        store: Rc<MemoryStore>,
        source: BundleSource,
        initial_theme: Theme,
        wiring: Rc<RefCell<Option<(PortfolioSignals, Coroutine<PortfolioEvent>)>>>,
    }

    fn bench_page() -> Element {
        let bench = use_context::<Bench>();
        let controller = Controller {
            prefs: Preferences::new(bench.store.clone(), StorageKeys::default()),
            source: bench.source.clone(),
            default_locale: Locale::Es,
        };
        let wiring = use_portfolio_controller(controller, bench.initial_theme);
        use_hook(|| {
            bench.wiring.borrow_mut().replace(wiring);
        });
        rsx! {}
    }

    struct Page {
        runtime: tokio::runtime::Runtime,
        dom: VirtualDom,
        store: Rc<MemoryStore>,
        signals: PortfolioSignals,
        events: Coroutine<PortfolioEvent>,
    }

    impl Page {
        fn mount(store: Rc<MemoryStore>, source: BundleSource) -> Self {
            let initial_theme = Preferences::new(store.clone(), StorageKeys::default())
                .theme(false)
                .unwrap();
            let wiring = Rc::new(RefCell::new(None));
            let bench = Bench {
                store: store.clone(),
                source,
                initial_theme,
                wiring: wiring.clone(),
            };
            let mut dom = VirtualDom::new(bench_page).with_root_context(bench);
            dom.rebuild_in_place();
            let (signals, events) = wiring.borrow_mut().take().expect("page mounted");
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()
                .unwrap();
            let mut page = Self {
                runtime,
                dom,
                store,
                signals,
                events,
            };
            page.settle();
            page
        }

        fn send(&mut self, event: PortfolioEvent) {
            let events = self.events;
            self.dom.in_runtime(|| events.send(event));
            self.settle();
        }

        /// Let spawned tasks run until nothing is left to do right now.
        fn settle(&mut self) {
            let Self { runtime, dom, .. } = self;
            runtime.block_on(async {
                for _ in 0..10 {
                    let _ = tokio::time::timeout(Duration::from_millis(5), dom.wait_for_work()).await;
                    dom.render_immediate(&mut NoOpMutations);
                }
            });
        }

        fn state(&self) -> PortfolioState {
            let state = self.signals.state;
            self.dom.in_runtime(|| {
                let snapshot = state.peek().clone();
                snapshot
            })
        }

        fn progress(&self) -> f64 {
            let progress = self.signals.progress;
            self.dom.in_runtime(|| {
                let value = *progress.peek();
                value
            })
        }

        fn section_visible(&self, id: &str) -> bool {
            let sections = self.signals.sections;
            self.dom.in_runtime(|| {
                let visible = sections.peek().is_visible(id);
                visible
            })
        }

        fn flag(&self, key: &str) -> Option<String> {
            self.store.get(key).unwrap()
        }
    }

    #[test]
    fn theme_toggle_twice_restores_state_and_flag() {
        let store = Rc::new(MemoryStore::new());
        store.set("theme", "dark").unwrap();
        let mut page = Page::mount(store, BundleSource::Embedded);
        assert_eq!(page.state().theme, Theme::Dark);

        page.send(PortfolioEvent::ToggleTheme);
        assert_eq!(page.state().theme, Theme::Light);
        assert_eq!(page.flag("theme").as_deref(), Some("light"));

        page.send(PortfolioEvent::ToggleTheme);
        assert_eq!(page.state().theme, Theme::Dark);
        assert_eq!(page.flag("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn theme_scroll_and_sections_apply_while_a_bundle_load_is_pending() {
        let mut page = Page::mount(Rc::new(MemoryStore::new()), BundleSource::Stalled);

        page.send(PortfolioEvent::SetLocale(Locale::En));
        page.send(PortfolioEvent::ToggleTheme);
        page.send(PortfolioEvent::Scrolled(42.0));
        page.send(PortfolioEvent::SectionVisible("about".into()));

        let state = page.state();
        assert_eq!(state.theme, Theme::Dark);
        assert_eq!(page.flag("theme").as_deref(), Some("dark"));
        assert_eq!(page.progress(), 42.0);
        assert!(page.section_visible("about"));
        // The load itself is still in flight.
        assert!(!state.is_loaded());
        assert_eq!(page.flag("language"), None);
    }

    #[test]
    fn locale_toggle_follows_persisted_then_on_screen_locale() {
        let store = Rc::new(MemoryStore::new());
        store.set("language", "en").unwrap();
        let mut page = Page::mount(store, BundleSource::Embedded);

        // Nothing on screen yet: flip relative to the persisted locale.
        page.send(PortfolioEvent::ToggleLocale);
        let state = page.state();
        assert_eq!(state.locale, Some(Locale::Es));
        assert_eq!(state.epoch, 1);
        assert_eq!(page.flag("language").as_deref(), Some("es"));

        page.send(PortfolioEvent::ToggleLocale);
        let state = page.state();
        assert_eq!(state.locale, Some(Locale::En));
        assert_eq!(state.epoch, 2);
        assert_eq!(page.flag("language").as_deref(), Some("en"));
        assert!(!state.texts.get("about_title").is_empty());
    }

    #[test]
    fn failed_locale_load_keeps_epoch_and_flag() {
        let store = Rc::new(MemoryStore::new());
        store.set("language", "es").unwrap();
        let mut page = Page::mount(store, BundleSource::Http { base: "./".into() });

        page.send(PortfolioEvent::SetLocale(Locale::En));
        let state = page.state();
        assert_eq!(state.epoch, 0);
        assert_eq!(state.locale, None);
        assert!(state.texts.is_empty());
        assert_eq!(page.flag("language").as_deref(), Some("es"));
    }

    #[test]
    fn theme_changed_during_load_survives_the_commit() {
        let mut page = Page::mount(Rc::new(MemoryStore::new()), BundleSource::Embedded);
        page.send(PortfolioEvent::ToggleTheme);
        page.send(PortfolioEvent::SetLocale(Locale::Es));

        let state = page.state();
        assert_eq!(state.locale, Some(Locale::Es));
        assert_eq!(state.theme, Theme::Dark);
    }
}
