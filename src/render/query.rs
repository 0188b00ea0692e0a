// src/render/query.rs

//! Search-query assembly: inline `keyword:value` tokens, URL parameter
//! mappings and the final `w3_browse_url` call.

use super::{RenderError, ScriptWriter};
use crate::{
    core::{commons::quote, namespace::Namespacer},
    models::{Elvis, Mapping},
};

/// Appends inline tokens to `_sr_inlines`: scalar inlines first, then list inlines.
pub fn write_inlines(elvis: &Elvis, w: &mut ScriptWriter) -> Result<(), RenderError> {
    if !elvis.has_inlines() {
        return Ok(());
    }
    let ns = Namespacer::for_elvis(&elvis.name);
    w.line("_sr_inlines=")?;
    for inline in &elvis.inlines {
        w.line(&format!(
            "_sr_add_inline {} \"${}\"",
            quote(&inline.keyword)?,
            ns.namespace(&inline.variable)
        ))?;
    }
    for inline in &elvis.list_inlines {
        let keyword = quote(&inline.keyword)?;
        w.in_list_context(|w| {
            w.line(&format!(
                "for _sr_item in ${}; do",
                ns.namespace(&inline.variable)
            ))?;
            w.indent();
            w.line(&format!("_sr_add_inline {} \"$_sr_item\"", keyword))?;
            w.dedent();
            w.line("done")
        })?;
    }
    Ok(())
}

fn mapped_value(mapping: &Mapping, expr: &str) -> String {
    if mapping.url_encode {
        format!("\"$(w3_url_escape \"{}\")\"", expr)
    } else {
        format!("\"{}\"", expr)
    }
}

/// Appends `PARAMETER=VALUE` pairs to `_sr_url_args`: scalar mappings, list
/// mappings, then the query parameter carrying the escaped search terms.
pub fn write_mappings(elvis: &Elvis, w: &mut ScriptWriter) -> Result<(), RenderError> {
    if !elvis.has_mappings() && elvis.query_parameter.is_none() {
        return Ok(());
    }
    let ns = Namespacer::for_elvis(&elvis.name);
    w.line("_sr_url_args=")?;

    for mapping in &elvis.mappings {
        let var = format!("${}", ns.namespace(&mapping.variable));
        w.line(&format!(
            "_sr_add_mapping {} {}",
            quote(&mapping.parameter)?,
            mapped_value(mapping, &var)
        ))?;
    }

    for mapping in &elvis.list_mappings {
        let var = ns.namespace(&mapping.variable);
        let parameter = quote(&mapping.parameter)?;
        w.line(&format!("if test -z \"${}\"; then", var))?;
        w.indent();
        w.line(&format!("_sr_add_mapping {} ''", parameter))?;
        w.dedent();
        w.line("else")?;
        w.indent();
        w.in_list_context(|w| {
            w.line(&format!("for _sr_item in ${}; do", var))?;
            w.indent();
            // Values are escaped outside the list context.
            w.line("_sr_end_list_context")?;
            w.line(&format!(
                "_sr_add_mapping {} {}",
                parameter,
                mapped_value(mapping, "$_sr_item")
            ))?;
            w.line("_sr_begin_list_context")?;
            w.dedent();
            w.line("done")
        })?;
        w.dedent();
        w.line("fi")?;
    }

    if let Some(parameter) = &elvis.query_parameter {
        w.line(&format!(
            "_sr_add_mapping {} \"$escaped_args\"",
            quote(parameter)?
        ))?;
    }
    Ok(())
}

/// Emits the final `w3_browse_url` for a search.
pub fn write_browse(elvis: &Elvis, w: &mut ScriptWriter) -> Result<(), RenderError> {
    let url = quote(&elvis.search_url)?;
    let line = if elvis.query_parameter.is_some() {
        format!("w3_browse_url {}\"$_sr_url_args\"", url)
    } else if elvis.append_search_args {
        format!("w3_browse_url {}\"$escaped_args\"", url)
    } else {
        format!("w3_browse_url {}", url)
    };
    w.line(&line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InlineDef;
    use crate::render::test_support::*;

    #[test]
    fn test_inlines() {
        let mut def = full();
        def.list_inlines.push(InlineDef {
            variable: "kinds".to_string(),
            keyword: "type".to_string(),
        });
        let out = render_with(&def, write_inlines);
        assert_eq!(
            out,
            "_sr_inlines=\n\
             _sr_add_inline site \"$SURFRAW_test_site\"\n\
             _sr_begin_list_context\n\
             for _sr_item in $SURFRAW_test_kinds; do\n\
             \t_sr_add_inline type \"$_sr_item\"\n\
             done\n\
             _sr_end_list_context\n"
        );
    }

    #[test]
    fn test_no_inlines() {
        assert_eq!(render_with(&minimal(), write_inlines), "");
    }

    #[test]
    fn test_mappings_order() {
        let out = render_with(&full(), write_mappings);
        let scalar = out
            .find("_sr_add_mapping kl \"$(w3_url_escape \"$SURFRAW_test_region\")\"")
            .unwrap();
        let empty_list = out.find("\t_sr_add_mapping kind ''\n").unwrap();
        let query = out.find("_sr_add_mapping q \"$escaped_args\"").unwrap();
        assert!(out.starts_with("_sr_url_args=\n"));
        assert!(scalar < empty_list && empty_list < query);
        assert!(out.contains("\t\t_sr_add_mapping kind \"$(w3_url_escape \"$_sr_item\")\"\n"));
    }

    #[test]
    fn test_unencoded_mapping() {
        let mut def = full();
        def.mappings[0].url_encode = false;
        let out = render_with(&def, write_mappings);
        assert!(out.contains("_sr_add_mapping kl \"$SURFRAW_test_region\"\n"));
    }

    #[test]
    fn test_browse_forms() {
        let search = quote("https://example.com/search?").unwrap();

        let out = render_with(&full(), write_browse);
        assert_eq!(out, format!("w3_browse_url {}\"$_sr_url_args\"\n", search));

        let out = render_with(&minimal(), write_browse);
        assert_eq!(out, format!("w3_browse_url {}\"$escaped_args\"\n", search));

        let mut def = minimal();
        def.append_search_args = false;
        let out = render_with(&def, write_browse);
        assert_eq!(out, format!("w3_browse_url {}\n", search));
    }
}
