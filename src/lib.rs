//! Ultramarathon race-result trends: a cleaning and aggregation pipeline over
//! a results table, and an egui viewer that charts the summaries.

pub mod app;
pub mod chart;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;
