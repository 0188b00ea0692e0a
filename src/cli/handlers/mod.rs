// src/cli/handlers/mod.rs

pub mod generate;
