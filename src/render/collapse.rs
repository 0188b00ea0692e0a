// src/render/collapse.rs

//! Value rewriting. Branches are tried in order and the first match wins;
//! values matching no branch pass through unchanged.

use super::{RenderError, ScriptWriter, case_pattern};
use crate::{
    core::{commons::quote, namespace::Namespacer},
    models::{Collapse, Elvis},
};

fn write_case(
    collapse: &Collapse,
    subject: &str,
    target: &str,
    w: &mut ScriptWriter,
) -> Result<(), RenderError> {
    w.line(&format!("case \"${}\" in", subject))?;
    w.indent();
    for branch in &collapse.branches {
        w.line(&format!(
            "{}) {}={} ;;",
            case_pattern(&branch.inputs)?,
            target,
            quote(&branch.output)?
        ))?;
    }
    w.dedent();
    w.line("esac")
}

pub fn write_collapses(elvis: &Elvis, w: &mut ScriptWriter) -> Result<(), RenderError> {
    let ns = Namespacer::for_elvis(&elvis.name);
    for collapse in &elvis.collapses {
        let var = ns.namespace(&collapse.variable);
        let is_list = elvis
            .variable(&collapse.variable)
            .is_some_and(|v| v.kind.is_list());

        if !is_list {
            write_case(collapse, &var, &var, w)?;
            continue;
        }

        // Element-wise, reassembled in the original order.
        w.line("_sr_collapsed=")?;
        w.in_list_context(|w| {
            w.line(&format!("for _sr_item in ${}; do", var))?;
            w.indent();
            write_case(collapse, "_sr_item", "_sr_item", w)?;
            w.line("_sr_collapsed=\"${_sr_collapsed:+$_sr_collapsed,}$_sr_item\"")?;
            w.dedent();
            w.line("done")
        })?;
        w.line(&format!("{}=\"$_sr_collapsed\"", var))?;
    }
    Ok(())
}
