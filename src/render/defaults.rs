// src/render/defaults.rs

use super::{RenderError, ScriptWriter};
use crate::{
    constants::LIST_SEPARATOR,
    core::{commons::quote, namespace::Namespacer, schema::special_default},
    models::{Elvis, VariableKind},
};

/// Emits `w3_config_hook`, declaring the default of every variable.
pub fn write_config_hook(elvis: &Elvis, w: &mut ScriptWriter) -> Result<(), RenderError> {
    let ns = Namespacer::for_elvis(&elvis.name);
    w.function("w3_config_hook", |w| {
        for variable in elvis.variables_in_declaration_order() {
            let var = ns.namespace(&variable.name);
            let statement = match &variable.kind {
                VariableKind::Bool { default } => {
                    format!("defyn {} {}", var, if *default { "yes" } else { "no" })
                }
                VariableKind::Enum { default, .. } | VariableKind::Anything { default } => {
                    format!("def {} {}", var, quote(default)?)
                }
                VariableKind::List { defaults, .. } => {
                    let joined = defaults.join(&LIST_SEPARATOR.to_string());
                    format!("def {} {}", var, quote(&joined)?)
                }
                // Expanded when the elvis runs, so the host environment decides.
                VariableKind::Special(kind) => format!("def {} \"{}\"", var, special_default(*kind)),
            };
            w.line(&statement)?;
        }
        Ok(())
    })
}
