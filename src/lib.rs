//! Terminal map of conflict zones and the peacebuilding work around them.

pub mod app;
pub mod braille;
pub mod config;
pub mod contribute;
pub mod data;
pub mod logging;
pub mod map;
pub mod ui;
pub mod zones;
