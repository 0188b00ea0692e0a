// src/render/mod.rs

//! # Elvis Renderer
//!
//! Turns a resolved `Elvis` into the text of a surfraw elvis. Each section of
//! the script has its own module; `render_elvis` assembles them in the order
//! the shell needs them:
//!
//! 1. Header and the `surfraw` library import.
//! 2. Shell helpers, only those the elvis uses.
//! 3. `w3_config_hook`, `w3_usage_hook`, `w3_parse_option_hook` and the
//!    optional `w3_complete_hook_opt`.
//! 4. The main body: parse, validate, collapse, inline, map and browse.

pub mod collapse;
pub mod completion;
pub mod defaults;
pub mod dispatch;
pub mod helpers;
pub mod query;
pub mod usage;
pub mod validate;

#[cfg(all(test, unix))]
mod script_tests;

use crate::{
    constants::GENERATOR_SIGNATURE,
    core::commons::quote,
    models::Elvis,
};
use std::fmt::Write;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to format generated script: {0}")]
    Fmt(#[from] std::fmt::Error),
    #[error("Value cannot be placed in a shell script: {0}")]
    Quote(#[from] shlex::QuoteError),
}

/// Line-oriented buffer for generated shell code, indented with tabs.
#[derive(Debug, Default)]
pub struct ScriptWriter {
    buf: String,
    depth: usize,
}

impl ScriptWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes one line at the current indentation. Empty lines stay empty.
    pub fn line(&mut self, text: &str) -> Result<(), RenderError> {
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.buf.push('\t');
            }
        }
        writeln!(self.buf, "{}", text)?;
        Ok(())
    }

    /// Writes a line verbatim, ignoring indentation (here-document bodies).
    pub fn raw(&mut self, text: &str) -> Result<(), RenderError> {
        writeln!(self.buf, "{}", text)?;
        Ok(())
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Writes `name()` and its body. An empty body becomes `:`.
    pub fn function<F>(&mut self, name: &str, body: F) -> Result<(), RenderError>
    where
        F: FnOnce(&mut ScriptWriter) -> Result<(), RenderError>,
    {
        self.line(&format!("{}()", name))?;
        self.line("{")?;
        self.indent();
        let start = self.buf.len();
        body(self)?;
        if self.buf.len() == start {
            self.line(":")?;
        }
        self.dedent();
        self.line("}")?;
        self.line("")
    }

    /// Wraps `body` between the list-context helpers.
    pub fn in_list_context<F>(&mut self, body: F) -> Result<(), RenderError>
    where
        F: FnOnce(&mut ScriptWriter) -> Result<(), RenderError>,
    {
        self.line("_sr_begin_list_context")?;
        body(self)?;
        self.line("_sr_end_list_context")
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

/// Case pattern matching any of `values` literally.
pub fn case_pattern<S: AsRef<str>>(values: &[S]) -> Result<String, RenderError> {
    let quoted = values
        .iter()
        .map(|v| quote(v.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(quoted.join("|"))
}

fn write_header(elvis: &Elvis, w: &mut ScriptWriter) -> Result<(), RenderError> {
    w.line("#!/bin/sh")?;
    w.line(&format!(
        "# elvis: {}{}-- {}",
        elvis.name,
        "\t".repeat(elvis.num_tabs),
        elvis.description.replace('\n', " ")
    ))?;
    w.line(&format!("# Generated by {}", GENERATOR_SIGNATURE))?;
    w.line(". surfraw || exit 1")?;
    w.line("")
}

fn write_main(elvis: &Elvis, w: &mut ScriptWriter) -> Result<(), RenderError> {
    w.line("w3_config")?;
    w.line("w3_parse_args \"$@\"")?;
    w.line("if test -z \"$w3_args\"; then")?;
    w.indent();
    w.line(&format!("w3_browse_url {}", quote(&elvis.base_url)?))?;
    w.dedent();
    w.line("else")?;
    w.indent();
    validate::write_validation(elvis, w)?;
    collapse::write_collapses(elvis, w)?;
    query::write_inlines(elvis, w)?;
    if elvis.has_inlines() {
        w.line("escaped_args=\"$(w3_url_escape \"$w3_args$_sr_inlines\")\"")?;
    } else {
        w.line("escaped_args=\"$(w3_url_escape \"$w3_args\")\"")?;
    }
    query::write_mappings(elvis, w)?;
    query::write_browse(elvis, w)?;
    w.dedent();
    w.line("fi")
}

/// Renders the complete elvis script.
pub fn render_elvis(elvis: &Elvis) -> Result<String, RenderError> {
    log::info!("Rendering elvis '{}'", elvis.name);
    let mut w = ScriptWriter::new();

    write_header(elvis, &mut w)?;
    helpers::write_helpers(elvis, &mut w)?;
    defaults::write_config_hook(elvis, &mut w)?;
    usage::write_usage_hook(elvis, &mut w)?;
    dispatch::write_parse_option_hook(elvis, &mut w)?;
    if elvis.completion_hooks {
        completion::write_complete_hook(elvis, &mut w)?;
    }
    write_main(elvis, &mut w)?;

    let script = w.finish();
    log::debug!("Rendered {} bytes for '{}'", script.len(), elvis.name);
    Ok(script)
}

// MARK: --- TEST SUPPORT ---


// MARK: --- UNIT TESTS ---
