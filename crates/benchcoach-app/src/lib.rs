// benchcoach command-line application: config, file loading, rendering.

pub mod cli;
pub mod commands;
pub mod config;
pub mod loader;
pub mod logging;
pub mod report;
