// src/render/usage.rs

//! Help text of the elvis, printed by `w3_usage_hook` through a here-document.

use super::{RenderError, ScriptWriter};
use crate::{
    core::{commons::heredoc_escape, namespace::Namespacer},
    models::{Elvis, Flag, Variable, VariableKind},
};

const OPTION_INDENT: &str = "  ";
const DETAIL_INDENT: &str = "    ";

/// The forms a user types to set the variable, spelled with `name`.
fn invocation(name: &str, variable: &Variable) -> String {
    match &variable.kind {
        VariableKind::Bool { .. } => format!("-{}=yes|no", name),
        VariableKind::List { .. } => format!(
            "-add-{n}={m}, -remove-{n}={m}, -clear-{n}",
            n = name,
            m = variable.metavar
        ),
        _ => format!("-{}={}", name, variable.metavar),
    }
}

/// One indented line per line of `text`. A here-document delimiter inside
/// `text` can then never stand alone on a line.
fn indented(indent: &str, text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| format!("{}{}", indent, line.trim_end_matches('\r')))
        .collect()
}

fn variable_lines(variable: &Variable, var: &str) -> Vec<String> {
    let mut lines = vec![format!("{}{}", OPTION_INDENT, invocation(&variable.name, variable))];
    lines.extend(indented(DETAIL_INDENT, &variable.description));
    match &variable.kind {
        VariableKind::Bool { .. } => lines.push(format!("{}Values: yes, no", DETAIL_INDENT)),
        kind => {
            if let Some(values) = kind.allowed_values() {
                lines.push(format!("{}Values: {}", DETAIL_INDENT, values.join(", ")));
            }
        }
    }
    let aliases: Vec<String> = variable
        .aliases
        .iter()
        .map(|alias| invocation(alias, variable))
        .collect();
    if !aliases.is_empty() {
        lines.push(format!("{}Aliases: {}", DETAIL_INDENT, aliases.join(", ")));
    }
    // Left unescaped: the live value is expanded when help is shown.
    lines.push(format!("{}Default: ${}", DETAIL_INDENT, var));
    lines
}

fn flag_lines(flag: &Flag) -> Vec<String> {
    let mut lines = vec![format!("{}-{}", OPTION_INDENT, flag.name)];
    lines.extend(indented(DETAIL_INDENT, &flag.description));
    if !flag.aliases.is_empty() {
        let aliases: Vec<String> = flag.aliases.iter().map(|a| format!("-{}", a)).collect();
        lines.push(format!("{}Aliases: {}", DETAIL_INDENT, aliases.join(", ")));
    }
    lines
}

/// Emits `w3_usage_hook`.
pub fn write_usage_hook(elvis: &Elvis, w: &mut ScriptWriter) -> Result<(), RenderError> {
    let ns = Namespacer::for_elvis(&elvis.name);
    w.function("w3_usage_hook", |w| {
        w.line("cat <<EOF")?;
        w.raw("Usage: $w3_argv0 [options] [search words]...")?;
        w.raw("Description:")?;
        for line in indented(OPTION_INDENT, &elvis.description) {
            w.raw(&heredoc_escape(&line))?;
        }

        let variables = elvis.variables_in_declaration_order();
        if !variables.is_empty() {
            w.raw("Local options:")?;
        }
        for variable in variables {
            let var = ns.namespace(&variable.name);
            let mut lines = variable_lines(variable, &var);
            let default_line = lines.pop();
            for line in lines {
                w.raw(&heredoc_escape(&line))?;
            }
            if let Some(line) = default_line {
                w.raw(&line)?;
            }
            for flag_name in &variable.flags {
                if let Some(flag) = elvis.flag(flag_name) {
                    for line in flag_lines(flag) {
                        w.raw(&heredoc_escape(&line))?;
                    }
                }
            }
        }

        w.raw("EOF")?;
        w.line("w3_global_usage")
    })
}
