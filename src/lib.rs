//! Life expectancy viewer: downloads per-country life expectancy figures,
//! cleans them into a canonical table and ranks countries by year.
//!
//! The [`data`] module holds everything that does not touch the UI and is
//! what the integration tests exercise.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;
