// src/core/mod.rs

pub mod commons;
pub mod config_resolver;
pub mod env_switcher;
pub mod paths;
pub mod pattern;
pub mod script_scanner;
pub mod state_store;
