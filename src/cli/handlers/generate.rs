// src/cli/handlers/generate.rs

use crate::{
    cli::Cli,
    core::{config_loader, schema},
    models::ElvisDefinition,
    render::{self, completion},
    system::output,
};
use anyhow::{Context, Result};
use colored::Colorize;
use std::{
    ffi::OsString,
    io::{self, Write},
    path::{Path, PathBuf},
};

/// Builds the definition from the schema file and the command line.
pub fn build_definition(cli: &Cli) -> Result<ElvisDefinition> {
    let mut def = match &cli.schema {
        Some(path) => config_loader::load_definition(path)
            .with_context(|| format!("Failed to load schema '{}'", path.display()))?,
        None => ElvisDefinition::default(),
    };
    cli.apply_to(&mut def);
    Ok(def)
}

fn completion_path(script: &Path) -> PathBuf {
    let mut name: OsString = script.as_os_str().to_owned();
    name.push(".completion");
    PathBuf::from(name)
}

/// Resolves, renders and writes the elvis described by `cli`.
pub fn handle(cli: Cli) -> Result<()> {
    log::debug!("Generate args: {:?}", cli);

    let def = build_definition(&cli)?;
    let elvis = schema::resolve(&def).context("Invalid elvis definition")?;
    let script = render::render_elvis(&elvis)
        .with_context(|| format!("Failed to render elvis '{}'", elvis.name))?;
    let completion_script = if cli.completion {
        Some(
            completion::render_bash_completion(&elvis)
                .with_context(|| format!("Failed to render completion for '{}'", elvis.name))?,
        )
    } else {
        None
    };

    if cli.stdout {
        let text = completion_script.as_deref().unwrap_or(script.as_str());
        io::stdout()
            .lock()
            .write_all(text.as_bytes())
            .context("Failed to write to stdout")?;
        return Ok(());
    }

    let path = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&elvis.name));
    output::write_script(&path, &script, true)
        .with_context(|| format!("Failed to write elvis to '{}'", path.display()))?;
    eprintln!(
        "{} elvis '{}' at {}",
        "Created".green().bold(),
        elvis.name.cyan(),
        path.display()
    );

    if let Some(text) = completion_script {
        let path = completion_path(&path);
        output::write_script(&path, &text, false)
            .with_context(|| format!("Failed to write completion to '{}'", path.display()))?;
        eprintln!(
            "{} bash completion at {}",
            "Created".green().bold(),
            path.display()
        );
    }
    Ok(())
}
