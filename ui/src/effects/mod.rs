//! Presentation effects. Each one is independent of the others and of the
//! bundle data, except that the hero subtitle feeds the typewriter.

pub mod fade_in;
pub mod particles;
pub mod progress;
pub mod typewriter;

pub use fade_in::{FadeInSection, FadeInTracker};
pub use particles::ParticleBackground;
pub use progress::ScrollProgressBar;
pub use typewriter::Typewriter;
