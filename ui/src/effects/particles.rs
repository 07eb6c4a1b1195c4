//! Decorative particle field drawn behind the page.
//!
//! The simulation ([`ParticleField`]) is plain Rust and runs anywhere; the
//! canvas driver underneath only exists on the web. Behavior follows the
//! classic "particles" look: drifting dots, faint links between close
//! neighbours, links to the pointer on hover, extra dots on click.

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use rand::rngs::StdRng;
use rand::Rng;
use serde::Deserialize;
use tracing::debug;

use crate::core::config::{ParticleColors, SiteConfig};
use crate::core::error::{report, Concern};
use crate::core::platform;
use crate::theme::Theme;

pub const CANVAS_ID: &str = "particles-js";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Particles per `density_area` (in thousands of px²). A non-positive
    /// area means `count` is used as-is.
    pub count: f64,
    pub density_area: f64,
    pub max_radius: f64,
    pub random_radius: bool,
    pub opacity: f64,
    pub link_distance: f64,
    pub link_opacity: f64,
    pub link_width: f64,
    pub speed: f64,
    pub grab_distance: f64,
    pub grab_opacity: f64,
    pub push_count: usize,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 80.0,
            density_area: 800.0,
            max_radius: 3.0,
            random_radius: true,
            opacity: 0.5,
            link_distance: 150.0,
            link_opacity: 0.4,
            link_width: 1.0,
            speed: 2.0,
            grab_distance: 140.0,
            grab_opacity: 1.0,
            push_count: 4,
        }
    }
}

impl ParticleConfig {
    pub fn count_for(&self, width: f64, height: f64) -> usize {
        if self.density_area <= 0.0 {
            return self.count.max(0.0).round() as usize;
        }
        let area = (width * height / 1000.0).max(0.0);
        (area * self.count / self.density_area).round() as usize
    }
}

/// Opacity of a line of length `distance` that fades out at `max_distance`.
/// `None` once the line would be invisible.
pub fn fade_opacity(base: f64, distance: f64, max_distance: f64) -> Option<f64> {
    if max_distance <= 0.0 || distance > max_distance {
        return None;
    }
    let opacity = base * (1.0 - distance / max_distance);
    (opacity > 0.0).then_some(opacity)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub opacity: f64,
}

pub struct ParticleField {
    config: ParticleConfig,
    width: f64,
    height: f64,
    particles: Vec<Particle>,
    pointer: Option<(f64, f64)>,
    rng: StdRng,
}

impl ParticleField {
    pub fn new(config: ParticleConfig, width: f64, height: f64, rng: StdRng) -> Self {
        let mut field = Self {
            config,
            width,
            height,
            particles: Vec::new(),
            pointer: None,
            rng,
        };
        let count = field.config.count_for(width, height);
        for _ in 0..count {
            let x = field.rng.gen::<f64>() * width;
            let y = field.rng.gen::<f64>() * height;
            let particle = field.spawn(x, y);
            field.particles.push(particle);
        }
        field
    }

    fn spawn(&mut self, x: f64, y: f64) -> Particle {
        let scale = if self.config.random_radius {
            self.rng.gen::<f64>()
        } else {
            1.0
        };
        Particle {
            x,
            y,
            vx: self.rng.gen::<f64>() - 0.5,
            vy: self.rng.gen::<f64>() - 0.5,
            radius: scale * self.config.max_radius,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    /// Track a new canvas size, adding or dropping particles to keep density.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        let target = self.config.count_for(width, height);
        if target < self.particles.len() {
            self.particles.truncate(target);
        }
        while self.particles.len() < target {
            let x = self.rng.gen::<f64>() * width;
            let y = self.rng.gen::<f64>() * height;
            let particle = self.spawn(x, y);
            self.particles.push(particle);
        }
    }

    pub fn set_pointer(&mut self, pointer: Option<(f64, f64)>) {
        self.pointer = pointer;
    }

    /// Click interaction: drop `push_count` new particles at the pointer.
    pub fn push_at(&mut self, x: f64, y: f64) {
        for _ in 0..self.config.push_count {
            let particle = self.spawn(x, y);
            self.particles.push(particle);
        }
    }

    /// Advance one frame. Particles leaving an edge re-enter on the opposite
    /// edge at a random position along it.
    pub fn step(&mut self) {
        let factor = self.config.speed / 2.0;
        let (width, height) = (self.width, self.height);
        for index in 0..self.particles.len() {
            let mut p = self.particles[index];
            p.x += p.vx * factor;
            p.y += p.vy * factor;

            if p.x - p.radius > width {
                p.x = -p.radius;
                p.y = self.rng.gen::<f64>() * height;
            } else if p.x + p.radius < 0.0 {
                p.x = width + p.radius;
                p.y = self.rng.gen::<f64>() * height;
            }
            if p.y - p.radius > height {
                p.y = -p.radius;
                p.x = self.rng.gen::<f64>() * width;
            } else if p.y + p.radius < 0.0 {
                p.y = height + p.radius;
                p.x = self.rng.gen::<f64>() * width;
            }
            self.particles[index] = p;
        }
    }

    /// Lines between every pair of particles within `link_distance`.
    pub fn links(&self) -> Vec<Link> {
        let mut links = Vec::new();
        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                let distance = (a.x - b.x).hypot(a.y - b.y);
                if let Some(opacity) =
                    fade_opacity(self.config.link_opacity, distance, self.config.link_distance)
                {
                    links.push(Link {
                        from: (a.x, a.y),
                        to: (b.x, b.y),
                        opacity,
                    });
                }
            }
        }
        links
    }

    /// Hover interaction: lines from the pointer to nearby particles.
    pub fn pointer_links(&self) -> Vec<Link> {
        let Some((px, py)) = self.pointer else {
            return Vec::new();
        };
        self.particles
            .iter()
            .filter_map(|p| {
                let distance = (p.x - px).hypot(p.y - py);
                fade_opacity(self.config.grab_opacity, distance, self.config.grab_distance).map(
                    |opacity| Link {
                        from: (p.x, p.y),
                        to: (px, py),
                        opacity,
                    },
                )
            })
            .collect()
    }
}

/// Viewport point → canvas-local point, `None` outside the canvas.
/// `origin` is the canvas's top-left corner in viewport coordinates.
pub fn to_canvas_point(
    client: (f64, f64),
    origin: (f64, f64),
    size: (f64, f64),
) -> Option<(f64, f64)> {
    let (x, y) = (client.0 - origin.0, client.1 - origin.1);
    let inside = (0.0..=size.0).contains(&x) && (0.0..=size.1).contains(&y);
    inside.then_some((x, y))
}

/// Particle color for `theme`: the stylesheet's custom property when set,
/// otherwise the configured fallback.
pub fn theme_color(theme: Theme, fallback: &ParticleColors) -> String {
    let (property, default) = match theme {
        Theme::Dark => ("--particles-color-dark", &fallback.dark),
        Theme::Light => ("--particles-color-light", &fallback.light),
    };
    match platform::root_css_var(property) {
        Ok(value) if !value.is_empty() => value,
        Ok(_) => default.clone(),
        Err(err) => {
            report(Concern::Animations, &err);
            default.clone()
        }
    }
}

/// Full-page canvas. Remount (via `key`) whenever theme or locale changes
/// so the field restarts with the right palette.
#[component]
pub fn ParticleBackground(theme: Theme, epoch: u64) -> Element {
    let config = try_use_context::<SiteConfig>().unwrap_or_default();
    let slot = use_hook(|| Rc::new(RefCell::new(None::<canvas::ParticleAnimation>)));

    {
        let slot = slot.clone();
        use_drop(move || {
            slot.borrow_mut().take();
        });
    }

    let on_mounted = move |_| {
        let color = theme_color(theme, &config.particle_colors);
        debug!(theme = theme.as_str(), epoch, %color, "starting particle field");
        match canvas::ParticleAnimation::start(CANVAS_ID, config.particles.clone(), color) {
            Ok(animation) => {
                slot.borrow_mut().replace(animation);
            }
            Err(err) => report(Concern::Animations, &err),
        }
    };

    rsx! {
        canvas {
            id: CANVAS_ID,
            class: "particles",
            aria_hidden: "true",
            onmounted: on_mounted,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod canvas {
    use super::ParticleConfig;
    use crate::core::error::PortfolioError;

    /// Nothing to draw on off the web.
    pub struct ParticleAnimation;

    impl ParticleAnimation {
        pub fn start(
            _canvas_id: &str,
            _config: ParticleConfig,
            _color: String,
        ) -> Result<Self, PortfolioError> {
            Ok(Self)
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod canvas {
    use std::cell::{Cell, RefCell};
    use std::f64::consts::TAU;
    use std::rc::Rc;

    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

    use super::{to_canvas_point, Link, ParticleConfig, ParticleField};
    use crate::core::error::{js_error, report, Concern, PortfolioError};
    use crate::core::platform;

    type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

    /// A running `requestAnimationFrame` loop plus its pointer listeners.
    /// Dropping it stops the loop and detaches the listeners.
    pub struct ParticleAnimation {
        window: web_sys::Window,
        running: Rc<Cell<bool>>,
        frame_id: Rc<Cell<i32>>,
        frame: FrameCallback,
        listeners: Vec<(&'static str, Closure<dyn FnMut(MouseEvent)>)>,
    }

    impl ParticleAnimation {
        pub fn start(
            canvas_id: &str,
            config: ParticleConfig,
            color: String,
        ) -> Result<Self, PortfolioError> {
            let window = platform::window()?;
            let canvas: HtmlCanvasElement = platform::document()?
                .get_element_by_id(canvas_id)
                .ok_or_else(|| PortfolioError::Dom(format!("#{canvas_id} not found")))?
                .dyn_into()
                .map_err(|_| PortfolioError::Dom(format!("#{canvas_id} is not a canvas")))?;
            let context: CanvasRenderingContext2d = canvas
                .get_context("2d")
                .map_err(js_error)?
                .ok_or_else(|| PortfolioError::Dom("2d context unavailable".to_string()))?
                .dyn_into()
                .map_err(|_| PortfolioError::Dom("unexpected context type".to_string()))?;

            let width = f64::from(canvas.client_width());
            let height = f64::from(canvas.client_height());
            let field = Rc::new(RefCell::new(ParticleField::new(
                config,
                width,
                height,
                StdRng::from_entropy(),
            )));

            // The canvas sits under the page content, so pointer input is
            // taken from the window and mapped into canvas space.
            let mut listeners = Vec::new();
            {
                let field = field.clone();
                let canvas = canvas.clone();
                listeners.push((
                    "mousemove",
                    Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
                        let pointer = pointer_on(&canvas, &event);
                        field.borrow_mut().set_pointer(pointer);
                    }),
                ));
            }
            {
                let field = field.clone();
                listeners.push((
                    "mouseout",
                    Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
                        // Only when the pointer leaves the window itself.
                        if event.related_target().is_none() {
                            field.borrow_mut().set_pointer(None);
                        }
                    }),
                ));
            }
            {
                let field = field.clone();
                let canvas = canvas.clone();
                listeners.push((
                    "click",
                    Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
                        if let Some((x, y)) = pointer_on(&canvas, &event) {
                            field.borrow_mut().push_at(x, y);
                        }
                    }),
                ));
            }
            for (name, listener) in &listeners {
                window
                    .add_event_listener_with_callback(name, listener.as_ref().unchecked_ref())
                    .map_err(js_error)?;
            }

            let running = Rc::new(Cell::new(true));
            let frame_id = Rc::new(Cell::new(0));
            let frame: FrameCallback = Rc::new(RefCell::new(None));
            {
                let handle = frame.clone();
                let running = running.clone();
                let frame_id = frame_id.clone();
                let window = window.clone();
                *frame.borrow_mut() = Some(Closure::<dyn FnMut()>::new(move || {
                    if !running.get() {
                        return;
                    }
                    let mut field = field.borrow_mut();
                    if let Err(err) = render_frame(&window, &canvas, &context, &mut field, &color) {
                        report(Concern::Animations, &err);
                        running.set(false);
                        return;
                    }
                    if let Some(callback) = handle.borrow().as_ref() {
                        match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
                            Ok(id) => frame_id.set(id),
                            Err(err) => report(Concern::Animations, &js_error(err)),
                        }
                    }
                }));
            }

            if let Some(callback) = frame.borrow().as_ref() {
                let id = window
                    .request_animation_frame(callback.as_ref().unchecked_ref())
                    .map_err(js_error)?;
                frame_id.set(id);
            }

            Ok(Self {
                window,
                running,
                frame_id,
                frame,
                listeners,
            })
        }
    }

    impl Drop for ParticleAnimation {
        fn drop(&mut self) {
            self.running.set(false);
            let _ = self.window.cancel_animation_frame(self.frame_id.get());
            for (name, listener) in &self.listeners {
                let _ = self
                    .window
                    .remove_event_listener_with_callback(name, listener.as_ref().unchecked_ref());
            }
            self.frame.borrow_mut().take();
        }
    }

    fn pointer_on(canvas: &HtmlCanvasElement, event: &MouseEvent) -> Option<(f64, f64)> {
        let rect = canvas.get_bounding_client_rect();
        to_canvas_point(
            (f64::from(event.client_x()), f64::from(event.client_y())),
            (rect.left(), rect.top()),
            (rect.width(), rect.height()),
        )
    }

    fn render_frame(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        context: &CanvasRenderingContext2d,
        field: &mut ParticleField,
        color: &str,
    ) -> Result<(), PortfolioError> {
        let ratio = window.device_pixel_ratio().max(1.0);
        let width = f64::from(canvas.client_width());
        let height = f64::from(canvas.client_height());
        let (pixel_width, pixel_height) = ((width * ratio) as u32, (height * ratio) as u32);
        if canvas.width() != pixel_width || canvas.height() != pixel_height {
            canvas.set_width(pixel_width);
            canvas.set_height(pixel_height);
        }
        if field.size() != (width, height) {
            field.resize(width, height);
        }

        field.step();

        context
            .set_transform(ratio, 0.0, 0.0, ratio, 0.0, 0.0)
            .map_err(js_error)?;
        context.clear_rect(0.0, 0.0, width, height);

        let paint = JsValue::from_str(color);
        context.set_stroke_style(&paint);
        context.set_fill_style(&paint);
        context.set_line_width(field.config().link_width);
        for link in field.links().into_iter().chain(field.pointer_links()) {
            stroke_link(context, &link);
        }

        context.set_global_alpha(field.config().opacity);
        for particle in field.particles() {
            context.begin_path();
            context
                .arc(particle.x, particle.y, particle.radius, 0.0, TAU)
                .map_err(js_error)?;
            context.fill();
        }
        context.set_global_alpha(1.0);
        Ok(())
    }

    fn stroke_link(context: &CanvasRenderingContext2d, link: &Link) {
        context.set_global_alpha(link.opacity);
        context.begin_path();
        context.move_to(link.from.0, link.from.1);
        context.line_to(link.to.0, link.to.1);
        context.stroke();
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn field(width: f64, height: f64) -> ParticleField {
        ParticleField::new(
            ParticleConfig::default(),
            width,
            height,
            StdRng::seed_from_u64(7),
        )
    }

    #[test]
    fn count_follows_density_area() {
        let config = ParticleConfig::default();
        assert_eq!(config.count_for(1000.0, 800.0), 80);
        assert_eq!(config.count_for(0.0, 800.0), 0);
        let fixed = ParticleConfig {
            density_area: 0.0,
            ..ParticleConfig::default()
        };
        assert_eq!(fixed.count_for(10.0, 10.0), 80);
    }

    #[test]
    fn particles_start_inside_canvas_with_bounded_radius() {
        let field = field(1000.0, 800.0);
        assert_eq!(field.particles().len(), 80);
        for p in field.particles() {
            assert!((0.0..=1000.0).contains(&p.x));
            assert!((0.0..=800.0).contains(&p.y));
            assert!((0.0..3.0).contains(&p.radius));
        }
    }

    #[test]
    fn stepping_keeps_particles_near_canvas() {
        let mut field = field(400.0, 300.0);
        for _ in 0..2_000 {
            field.step();
        }
        for p in field.particles() {
            assert!(p.x >= -p.radius - 1.0 && p.x <= 400.0 + p.radius + 1.0);
            assert!(p.y >= -p.radius - 1.0 && p.y <= 300.0 + p.radius + 1.0);
        }
    }

    #[test]
    fn link_opacity_fades_with_distance() {
        assert_eq!(fade_opacity(0.4, 0.0, 150.0), Some(0.4));
        let half = fade_opacity(0.4, 75.0, 150.0).unwrap();
        assert!((half - 0.2).abs() < 1e-9);
        assert_eq!(fade_opacity(0.4, 150.0, 150.0), None);
        assert_eq!(fade_opacity(0.4, 151.0, 150.0), None);
    }

    #[test]
    fn links_respect_distance_limit() {
        let field = field(1000.0, 800.0);
        for link in field.links() {
            let distance = (link.from.0 - link.to.0).hypot(link.from.1 - link.to.1);
            assert!(distance < 150.0);
            assert!(link.opacity > 0.0 && link.opacity <= 0.4);
        }
    }

    #[test]
    fn click_pushes_particles_and_hover_grabs() {
        let mut field = field(1000.0, 800.0);
        assert!(field.pointer_links().is_empty());

        field.push_at(500.0, 400.0);
        assert_eq!(field.particles().len(), 84);

        field.set_pointer(Some((500.0, 400.0)));
        let grabbed = field.pointer_links();
        assert!(grabbed.len() >= 4);
        assert!(grabbed.iter().all(|link| link.to == (500.0, 400.0)));
    }

    #[test]
    fn resize_rebalances_particle_count() {
        let mut field = field(1000.0, 800.0);
        field.resize(500.0, 800.0);
        assert_eq!(field.particles().len(), 40);
        field.resize(2000.0, 800.0);
        assert_eq!(field.particles().len(), 160);
        assert_eq!(field.size(), (2000.0, 800.0));
    }

    #[test]
    fn window_pointer_maps_into_canvas_space() {
        let origin = (0.0, 64.0);
        let size = (1280.0, 656.0);
        assert_eq!(to_canvas_point((10.0, 74.0), origin, size), Some((10.0, 10.0)));
        assert_eq!(to_canvas_point((1280.0, 720.0), origin, size), Some((1280.0, 656.0)));
        assert_eq!(to_canvas_point((10.0, 20.0), origin, size), None);
        assert_eq!(to_canvas_point((1300.0, 100.0), origin, size), None);
    }

    #[test]
    fn pointer_from_page_content_still_grabs() {
        let mut field = field(1000.0, 800.0);
        field.push_at(300.0, 200.0);
        let pointer = to_canvas_point((300.0, 200.0), (0.0, 0.0), field.size());
        field.set_pointer(pointer);
        assert!(field.pointer_links().len() >= 4);

        field.set_pointer(to_canvas_point((-5.0, 200.0), (0.0, 0.0), field.size()));
        assert!(field.pointer_links().is_empty());
    }

    #[test]
    fn native_palette_uses_configured_fallback() {
        let colors = ParticleColors::default();
        assert_eq!(theme_color(Theme::Dark, &colors), colors.dark);
        assert_eq!(theme_color(Theme::Light, &colors), colors.light);
    }
}
