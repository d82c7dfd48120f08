//! CLI library components for Campaign Studio.

pub mod commands;
pub mod describe;
pub mod logging;
pub mod render;
pub mod settings;
