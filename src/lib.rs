//! Ad-serving data layer: advertisers, categories, zones, text and banner
//! ads, and impression/click tracking, plus the HTTP plugin that serves them.
//!
//! Admin front-ends drive the services through [`state::AppState::sv`].

pub mod config;
pub mod entity;
pub mod error;
pub mod plugins;
pub mod prelude;
pub mod state;
pub mod sv;
mod utils;
