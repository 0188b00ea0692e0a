// src/core/mod.rs

pub mod commons;
pub mod config_loader;
pub mod namespace;
pub mod option_spec;
pub mod schema;
pub mod validation;
