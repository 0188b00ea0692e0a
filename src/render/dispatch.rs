// src/render/dispatch.rs

//! `w3_parse_option_hook`: one case arm per option, aliases merged into the
//! arm of their target. Unknown options return 1 so surfraw can try its own.

use super::{RenderError, ScriptWriter};
use crate::{
    constants::LIST_SEPARATOR,
    core::{commons::quote, namespace::Namespacer},
    models::{Elvis, Flag, FlagValue, Variable, VariableKind},
};

/// `-a|-b` for options without an argument, `-a=*|-b=*` otherwise.
fn pattern(prefix: &str, names: &[&str], takes_arg: bool) -> String {
    let suffix = if takes_arg { "=*" } else { "" };
    names
        .iter()
        .map(|name| format!("-{}{}{}", prefix, name, suffix))
        .collect::<Vec<_>>()
        .join("|")
}

fn option_names<'a>(name: &'a str, aliases: &'a [String]) -> Vec<&'a str> {
    std::iter::once(name)
        .chain(aliases.iter().map(String::as_str))
        .collect()
}

fn flag_arm(flag: &Flag, ns: &Namespacer) -> Result<String, RenderError> {
    let var = ns.namespace(&flag.target);
    let action = match &flag.value {
        FlagValue::Bool(value) => {
            format!("setoptyn {} {}", var, if *value { "yes" } else { "no" })
        }
        FlagValue::Scalar(value) => format!("setopt {} {}", var, quote(value)?),
        FlagValue::List(values) => format!(
            "setopt {} {}",
            var,
            quote(&values.join(&LIST_SEPARATOR.to_string()))?
        ),
    };
    let names = option_names(&flag.name, &flag.aliases);
    Ok(format!("{}) {} ;;", pattern("", &names, false), action))
}

fn variable_arms(variable: &Variable, ns: &Namespacer) -> Vec<String> {
    let var = ns.namespace(&variable.name);
    let names = option_names(&variable.name, &variable.aliases);
    match &variable.kind {
        VariableKind::Bool { .. } => vec![format!(
            "{}) setoptyn {} \"$optarg\" ;;",
            pattern("", &names, true),
            var
        )],
        VariableKind::List { .. } => vec![
            format!(
                "{}) _sr_list_add {} \"$optarg\" ;;",
                pattern("add-", &names, true),
                var
            ),
            format!(
                "{}) _sr_list_remove {} \"$optarg\" ;;",
                pattern("remove-", &names, true),
                var
            ),
            format!("{}) setopt {} '' ;;", pattern("clear-", &names, false), var),
        ],
        VariableKind::Enum { .. } | VariableKind::Anything { .. } | VariableKind::Special(_) => {
            vec![format!(
                "{}) setopt {} \"$optarg\" ;;",
                pattern("", &names, true),
                var
            )]
        }
    }
}

/// Emits `w3_parse_option_hook`.
pub fn write_parse_option_hook(elvis: &Elvis, w: &mut ScriptWriter) -> Result<(), RenderError> {
    let ns = Namespacer::for_elvis(&elvis.name);
    w.function("w3_parse_option_hook", |w| {
        w.line("opt=\"$1\"")?;
        w.line("optarg=\"$2\"")?;
        w.line("case \"$opt\" in")?;
        w.indent();
        for flag in &elvis.flags {
            w.line(&flag_arm(flag, &ns)?)?;
        }
        for variable in elvis.variables_in_declaration_order() {
            for arm in variable_arms(variable, &ns) {
                w.line(&arm)?;
            }
        }
        w.line("*) return 1 ;;")?;
        w.dedent();
        w.line("esac")?;
        w.line("return 0")
    })
}
