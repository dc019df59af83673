//! Cooking-session monitoring dashboard: reads sensor capture tables, scrapes
//! the image server, and serves HTML pages plus JSON series endpoints.

pub mod api;
pub mod app;
pub mod config;
pub mod db;
pub mod images;
pub mod render;
pub mod series;
pub mod sessions;
pub mod stats;
pub mod util;
