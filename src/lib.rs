//! Regional air-quality dashboard: an embedded dataset of state records,
//! a filter/derive engine, and CSV / JSON / PDF export of the current view.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod state;
pub mod ui;
