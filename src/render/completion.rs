// src/render/completion.rs

//! # Completion
//!
//! Two outputs share the same candidate tables:
//! - `w3_complete_hook_opt` inside the elvis, which echoes the values an
//!   option accepts.
//! - A standalone bash completion script registering `_surfraw_elvis_NAME`.

use super::{RenderError, ScriptWriter};
use crate::{
    constants::GENERATOR_SIGNATURE,
    core::commons::quote,
    models::{Elvis, VariableKind},
};

/// Option tokens (as typed before `=`) paired with the values they accept.
fn value_candidates(elvis: &Elvis) -> Vec<(Vec<String>, Vec<String>)> {
    let mut table = Vec::new();
    for variable in elvis.variables_in_declaration_order() {
        let names = std::iter::once(&variable.name).chain(&variable.aliases);
        match &variable.kind {
            VariableKind::Bool { .. } => table.push((
                names.map(|n| format!("-{}", n)).collect(),
                vec!["yes".to_string(), "no".to_string()],
            )),
            VariableKind::Enum { values, .. } => {
                table.push((names.map(|n| format!("-{}", n)).collect(), values.clone()))
            }
            VariableKind::List { .. } => {
                if let Some(values) = variable.kind.allowed_values() {
                    let tokens = names
                        .flat_map(|n| [format!("-add-{}", n), format!("-remove-{}", n)])
                        .collect();
                    table.push((tokens, values.to_vec()));
                }
            }
            VariableKind::Anything { .. } | VariableKind::Special(_) => {}
        }
    }
    table
}

/// Every option token the elvis understands, `=` included for options taking an argument.
fn option_words(elvis: &Elvis) -> Vec<String> {
    let mut words = Vec::new();
    for flag in &elvis.flags {
        words.push(format!("-{}", flag.name));
        words.extend(flag.aliases.iter().map(|a| format!("-{}", a)));
    }
    for variable in elvis.variables_in_declaration_order() {
        for name in std::iter::once(&variable.name).chain(&variable.aliases) {
            if variable.kind.is_list() {
                words.push(format!("-add-{}=", name));
                words.push(format!("-remove-{}=", name));
                words.push(format!("-clear-{}", name));
            } else {
                words.push(format!("-{}=", name));
            }
        }
    }
    words
}

fn value_pattern(tokens: &[String]) -> String {
    tokens
        .iter()
        .map(|t| format!("{}=*", t))
        .collect::<Vec<_>>()
        .join("|")
}

/// Emits `w3_complete_hook_opt`.
pub fn write_complete_hook(elvis: &Elvis, w: &mut ScriptWriter) -> Result<(), RenderError> {
    let table = value_candidates(elvis);
    w.function("w3_complete_hook_opt", |w| {
        w.line("opt=\"$1\"")?;
        w.line("case \"$opt\" in")?;
        w.indent();
        for (tokens, values) in &table {
            w.line(&format!(
                "{}) echo {} ;;",
                value_pattern(tokens),
                quote(&values.join(" "))?
            ))?;
        }
        w.line("*) return 1 ;;")?;
        w.dedent();
        w.line("esac")
    })
}

/// Renders the bash completion script for the elvis.
pub fn render_bash_completion(elvis: &Elvis) -> Result<String, RenderError> {
    log::info!("Rendering bash completion for '{}'", elvis.name);
    let function = format!("_surfraw_elvis_{}", elvis.name);
    let mut w = ScriptWriter::new();

    w.line(&format!("# bash completion for the {} elvis", elvis.name))?;
    w.line(&format!("# Generated by {}", GENERATOR_SIGNATURE))?;
    w.line("")?;
    w.function(&function, |w| {
        w.line("local line=\"${COMP_LINE:0:COMP_POINT}\"")?;
        w.line("local cur=\"${line##*[[:space:]]}\"")?;
        w.line("local values")?;
        w.line("case \"$cur\" in")?;
        w.indent();
        for (tokens, values) in value_candidates(elvis) {
            w.line(&format!(
                "{}) values={} ;;",
                value_pattern(&tokens),
                quote(&values.join(" "))?
            ))?;
        }
        w.line("-*)")?;
        w.indent();
        w.line(&format!(
            "COMPREPLY=( $(compgen -W {} -- \"$cur\") )",
            quote(&option_words(elvis).join(" "))?
        ))?;
        w.line("[[ ${#COMPREPLY[@]} -eq 1 && ${COMPREPLY[0]} == *= ]] && compopt -o nospace")?;
        w.line("return 0")?;
        w.line(";;")?;
        w.dedent();
        w.line("*) return 0 ;;")?;
        w.dedent();
        w.line("esac")?;
        w.line("COMPREPLY=( $(compgen -W \"$values\" -- \"${cur#*=}\") )")?;
        // Without '=' in COMP_WORDBREAKS bash replaces the whole word.
        w.line("[[ \"$COMP_WORDBREAKS\" == *=* ]] || COMPREPLY=( \"${COMPREPLY[@]/#/${cur%%=*}=}\" )")?;
        w.line("return 0")
    })?;
    w.line(&format!("complete -F {} {}", function, elvis.name))?;

    Ok(w.finish())
}
