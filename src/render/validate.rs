// src/render/validate.rs

use super::{RenderError, ScriptWriter, case_pattern};
use crate::{
    core::{commons::quote, namespace::Namespacer},
    models::{Elvis, ListItemKind, VariableKind},
};

/// Emits the membership checks for enums and enum lists. Errors name the
/// option the user typed, never the shell variable.
pub fn write_validation(elvis: &Elvis, w: &mut ScriptWriter) -> Result<(), RenderError> {
    let ns = Namespacer::for_elvis(&elvis.name);
    for variable in elvis.variables_in_declaration_order() {
        let var = ns.namespace(&variable.name);
        match &variable.kind {
            VariableKind::Enum { values, .. } => {
                let valid = quote(&values.join(", "))?;
                w.line(&format!("case \"${}\" in", var))?;
                w.indent();
                w.line(&format!("{}) ;;", case_pattern(values)?))?;
                w.line(&format!(
                    "*) _sr_invalid_value -{} \"${}\" {} ;;",
                    variable.name, var, valid
                ))?;
                w.dedent();
                w.line("esac")?;
            }
            VariableKind::List {
                item: ListItemKind::Enum,
                values,
                ..
            } => {
                let valid = quote(&values.join(", "))?;
                w.in_list_context(|w| {
                    w.line(&format!("for _sr_item in ${}; do", var))?;
                    w.indent();
                    w.line("case \"$_sr_item\" in")?;
                    w.indent();
                    w.line(&format!("{}) ;;", case_pattern(values)?))?;
                    w.line(&format!(
                        "*) _sr_end_list_context; _sr_invalid_value -add-{} \"$_sr_item\" {} ;;",
                        variable.name, valid
                    ))?;
                    w.dedent();
                    w.line("esac")?;
                    w.dedent();
                    w.line("done")
                })?;
            }
            _ => {}
        }
    }
    Ok(())
}
