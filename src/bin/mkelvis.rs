// src/bin/mkelvis.rs

use clap::Parser;
use colored::*;
use mkelvis::{
    cli::{Cli, handlers},
    constants::{EX_CANTCREAT, EX_SOFTWARE, EX_USAGE},
    core::{config_loader::ConfigError, schema::SchemaError},
    render::RenderError,
    system::output::OutputError,
};

/// Maps a failure to a sysexits-style exit code.
fn exit_code(e: &anyhow::Error) -> i32 {
    if e.downcast_ref::<SchemaError>().is_some() || e.downcast_ref::<ConfigError>().is_some() {
        EX_USAGE
    } else if e.downcast_ref::<RenderError>().is_some() {
        EX_SOFTWARE
    } else if e.downcast_ref::<OutputError>().is_some() {
        EX_CANTCREAT
    } else {
        1
    }
}

/// Sets up logging, runs the generator and reports any error on stderr.
fn main() {
    env_logger::init();

    if let Err(e) = handlers::generate::handle(Cli::parse()) {
        eprintln!("\n{}: {:#}", "Error".red().bold(), e);
        std::process::exit(exit_code(&e));
    }
}
