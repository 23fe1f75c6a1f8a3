//! Mortgage benchmark dashboard: literal and seeded benchmark tables, a
//! selection/filter engine, mean-baseline classification and chart-ready
//! projection, plus the egui front end that renders them.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod state;
pub mod ui;
