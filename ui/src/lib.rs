//! Shared UI crate for the portfolio page. State, localization, effects and
//! views live here; platform crates only launch [`Portfolio`].

pub mod components;
pub mod controller;
pub mod core;
pub mod effects;
pub mod i18n;
pub mod state;
pub mod theme;
pub mod views;

pub use views::Portfolio;
