// src/render/helpers.rs

//! Shell functions shared by the generated hooks. Only the helpers an elvis
//! actually calls are emitted.

use super::{RenderError, ScriptWriter};
use crate::models::{Elvis, ListItemKind, VariableKind};

const LIST_CONTEXT: &[&str] = &[
    "_sr_begin_list_context()",
    "{",
    "\t_sr_saved_ifs=\"$IFS\"",
    "\tIFS=','",
    "\tset -f",
    "}",
    "",
    "_sr_end_list_context()",
    "{",
    "\tIFS=\"$_sr_saved_ifs\"",
    "\tset +f",
    "}",
    "",
];

const LIST_ADD: &[&str] = &[
    "# _sr_list_add VARIABLE VALUES",
    "_sr_list_add()",
    "{",
    "\ttest -z \"$2\" && return 0",
    "\teval \"_sr_current=\\\"\\$$1\\\"\"",
    "\tif test -z \"$_sr_current\"; then",
    "\t\tsetopt \"$1\" \"$2\"",
    "\telse",
    "\t\tsetopt \"$1\" \"$_sr_current,$2\"",
    "\tfi",
    "}",
    "",
];

const LIST_REMOVE: &[&str] = &[
    "# _sr_list_remove VARIABLE VALUES",
    "_sr_list_remove()",
    "{",
    "\teval \"_sr_current=\\\"\\$$1\\\"\"",
    "\t_sr_kept=",
    "\t_sr_begin_list_context",
    "\tfor _sr_item in $_sr_current; do",
    "\t\tcase \",$2,\" in",
    "\t\t\t*\",$_sr_item,\"*) ;;",
    "\t\t\t*) _sr_kept=\"${_sr_kept:+$_sr_kept,}$_sr_item\" ;;",
    "\t\tesac",
    "\tdone",
    "\t_sr_end_list_context",
    "\tsetopt \"$1\" \"$_sr_kept\"",
    "}",
    "",
];

const INVALID_VALUE: &[&str] = &[
    "# _sr_invalid_value OPTION VALUE VALID_VALUES",
    "_sr_invalid_value()",
    "{",
    "\techo \"$w3_argv0: invalid value '$2' for $1 (valid values: $3)\" >&2",
    "\texit 1",
    "}",
    "",
];

const ADD_INLINE: &[&str] = &[
    "# _sr_add_inline KEYWORD VALUE",
    "_sr_add_inline()",
    "{",
    "\tcase \"$2\" in",
    "\t\t'') ;;",
    "\t\t*[[:space:]]*) _sr_inlines=\"$_sr_inlines $1:\\\"$2\\\"\" ;;",
    "\t\t*) _sr_inlines=\"$_sr_inlines $1:$2\" ;;",
    "\tesac",
    "}",
    "",
];

const ADD_MAPPING: &[&str] = &[
    "# _sr_add_mapping PARAMETER VALUE",
    "_sr_add_mapping()",
    "{",
    "\t_sr_url_args=\"${_sr_url_args:+$_sr_url_args&}$1=$2\"",
    "}",
    "",
];

/// True when some variable is checked against a fixed set of values.
fn needs_validation(elvis: &Elvis) -> bool {
    elvis.variables.iter().any(|v| {
        matches!(
            v.kind,
            VariableKind::Enum { .. }
                | VariableKind::List {
                    item: ListItemKind::Enum,
                    ..
                }
        )
    })
}

fn write_block(w: &mut ScriptWriter, block: &[&str]) -> Result<(), RenderError> {
    block.iter().try_for_each(|line| w.line(line))
}

pub fn write_helpers(elvis: &Elvis, w: &mut ScriptWriter) -> Result<(), RenderError> {
    if elvis.has_lists() {
        write_block(w, LIST_CONTEXT)?;
        write_block(w, LIST_ADD)?;
        write_block(w, LIST_REMOVE)?;
    }
    if needs_validation(elvis) {
        write_block(w, INVALID_VALUE)?;
    }
    if elvis.has_inlines() {
        write_block(w, ADD_INLINE)?;
    }
    if elvis.has_mappings() || elvis.query_parameter.is_some() {
        write_block(w, ADD_MAPPING)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::test_support::*;

    #[test]
    fn test_no_helpers_for_minimal_elvis() {
        assert_eq!(render_with(&minimal(), write_helpers), "");
    }

    #[test]
    fn test_all_helpers_for_full_elvis() {
        let out = render_with(&full(), write_helpers);
        for name in [
            "_sr_begin_list_context()",
            "_sr_end_list_context()",
            "_sr_list_add()",
            "_sr_list_remove()",
            "_sr_invalid_value()",
            "_sr_add_inline()",
            "_sr_add_mapping()",
        ] {
            assert!(out.contains(name), "missing helper {}", name);
        }
    }

    #[test]
    fn test_query_parameter_alone_needs_mapping_helper() {
        let mut def = minimal();
        def.query_parameter = Some("q".to_string());
        let out = render_with(&def, write_helpers);
        assert!(out.contains("_sr_add_mapping()"));
        assert!(!out.contains("_sr_invalid_value()"));
    }
}
