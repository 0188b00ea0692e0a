// src/render/script_tests.rs

//! Runs generated elvi with `/bin/sh` against a stub of the surfraw library.
//! The stub's `w3_browse_url` prints the URL instead of opening it.

use super::render_elvis;
use super::test_support::*;
use crate::{
    core::schema::resolve,
    models::{AliasDef, AnythingDef, BoolDef, CollapseDef, ElvisDefinition, InlineDef, MappingDef},
};
use std::{env, fs, process::Command, process::Output};

const SURFRAW_STUB: &str = r#"
w3_argv0=elvis
def() { eval "$1=\"\$2\""; }
setopt() { eval "$1=\"\$2\""; }
setoptyn() {
	case "$2" in
		yes|no) eval "$1=\"\$2\"" ;;
		*) echo "bad yes/no value: $2" >&2; exit 3 ;;
	esac
}
defyn() { setoptyn "$1" "$2"; }
w3_config() { w3_config_hook; }
w3_global_usage() { :; }
w3_url_escape() { printf '%s' "$1" | sed -e 's/%/%25/g' -e 's/ /%20/g' -e 's/&/%26/g'; }
w3_browse_url() { echo "$1"; }
w3_parse_args() {
	w3_args=
	for arg in "$@"; do
		case "$arg" in
			-help) w3_usage_hook; exit 0 ;;
			-*)
				w3_parse_option_hook "$arg" "${arg#*=}" || { echo "unknown option $arg" >&2; exit 2; }
				;;
			*) w3_args="${w3_args:+$w3_args }$arg" ;;
		esac
	done
}
"#;

fn run(def: &ElvisDefinition, args: &[&str]) -> Output {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("surfraw"), SURFRAW_STUB).unwrap();
    let script = dir.path().join("elvis");
    fs::write(&script, render_elvis(&resolve(def).unwrap()).unwrap()).unwrap();

    let path = format!(
        "{}:{}",
        dir.path().display(),
        env::var("PATH").unwrap_or_default()
    );
    Command::new("sh")
        .arg(&script)
        .args(args)
        .env("PATH", path)
        .env_remove("SURFRAW_results")
        .output()
        .unwrap()
}

fn url(def: &ElvisDefinition, args: &[&str]) -> String {
    let output = run(def, args);
    assert!(
        output.status.success(),
        "elvis failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap().trim_end().to_string()
}

const SEARCH: &str = "https://example.com/search?";

#[test]
fn test_defaults_reach_the_url() {
    assert_eq!(
        url(&full(), &["foo"]),
        format!("{}kl=us&kind=a&kind=b&q=foo", SEARCH)
    );
}

#[test]
fn test_list_add_remove_clear() {
    let def = full();
    assert_eq!(
        url(&def, &["-add-kinds=c", "foo"]),
        format!("{}kl=us&kind=a&kind=b&kind=c&q=foo", SEARCH)
    );
    assert_eq!(
        url(&def, &["-add-kinds=c", "-remove-kinds=a", "foo"]),
        format!("{}kl=us&kind=b&kind=c&q=foo", SEARCH)
    );
    assert_eq!(
        url(&def, &["-remove-kinds=a,b", "foo"]),
        format!("{}kl=us&kind=&q=foo", SEARCH)
    );
    assert_eq!(
        url(&def, &["-clear-kinds", "foo"]),
        format!("{}kl=us&kind=&q=foo", SEARCH)
    );
}

#[test]
fn test_invalid_list_value_is_fatal() {
    let output = run(&full(), &["-add-kinds=d", "foo"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid value 'd' for -add-kinds (valid values: a, b, c)"));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_invalid_enum_value_is_fatal() {
    let output = run(&full(), &["-region=fr", "foo"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("for -region"));
}

#[test]
fn test_no_search_terms_opens_base_url() {
    assert_eq!(url(&full(), &["-add-kinds=d"]), "https://example.com");
}

#[test]
fn test_aliases_behave_like_their_target() {
    let def = full();
    assert_eq!(
        url(&def, &["-add-k=c", "foo"]),
        url(&def, &["-add-kinds=c", "foo"])
    );
    assert_eq!(url(&def, &["-clear-k", "foo"]), url(&def, &["-clear-kinds", "foo"]));
}

#[test]
fn test_bool_and_flag_aliases_behave_like_their_target() {
    let mut def = full();
    def.mappings.push(MappingDef {
        variable: "safe".to_string(),
        parameter: "sf".to_string(),
        url_encode: false,
    });
    def.aliases.push(AliasDef {
        name: "n".to_string(),
        target: "nsfw".to_string(),
        target_type: "flag".to_string(),
    });
    let expected = format!("{}kl=us&sf=no&kind=a&kind=b&q=foo", SEARCH);
    assert_eq!(url(&def, &["-safe=no", "foo"]), expected);
    assert_eq!(url(&def, &["-s=no", "foo"]), expected);
    assert_eq!(url(&def, &["-nsfw", "foo"]), expected);
    assert_eq!(url(&def, &["-n", "foo"]), expected);
}

#[test]
fn test_flags_set_their_target() {
    let mut def = full();
    def.mappings.push(MappingDef {
        variable: "safe".to_string(),
        parameter: "sf".to_string(),
        url_encode: false,
    });
    assert_eq!(
        url(&def, &["-clear-kinds", "-all", "-nsfw", "foo"]),
        format!("{}kl=us&sf=no&kind=a&kind=b&kind=c&q=foo", SEARCH)
    );
}

#[test]
fn test_search_terms_and_mappings_are_escaped() {
    let mut def = minimal();
    def.query_parameter = Some("q".to_string());
    def.anythings.push(AnythingDef {
        name: "site".to_string(),
        default: String::new(),
    });
    def.mappings.push(MappingDef {
        variable: "site".to_string(),
        parameter: "as".to_string(),
        url_encode: true,
    });
    assert_eq!(
        url(&def, &["-site=a b", "x&y", "z"]),
        format!("{}as=a%20b&q=x%26y%20z", SEARCH)
    );

    def.mappings[0].url_encode = false;
    assert_eq!(
        url(&def, &["-site=a b", "z"]),
        format!("{}as=a b&q=z", SEARCH)
    );
}

#[test]
fn test_inline_keywords_join_the_query() {
    assert_eq!(
        url(&full(), &["-site=example.org", "foo"]),
        format!("{}kl=us&kind=a&kind=b&q=foo%20site:example.org", SEARCH)
    );
}

#[test]
fn test_inline_values_with_whitespace_are_quoted() {
    assert_eq!(
        url(&full(), &["-site=a b", "foo"]),
        format!("{}kl=us&kind=a&kind=b&q=foo%20site:\"a%20b\"", SEARCH)
    );
}

#[test]
fn test_list_collapse_and_inline_are_element_wise() {
    let mut def = full();
    def.collapses.push(CollapseDef {
        variable: "kinds".to_string(),
        branches: vec![strings(&["a", "c"])],
    });
    def.list_inlines.push(InlineDef {
        variable: "kinds".to_string(),
        keyword: "type".to_string(),
    });
    assert_eq!(
        url(&def, &["-site=a b", "foo"]),
        format!(
            "{}kl=us&kind=c&kind=b&q=foo%20site:\"a%20b\"%20type:c%20type:b",
            SEARCH
        )
    );
    assert_eq!(
        url(&def, &["-add-kinds=a", "-remove-kinds=b", "foo"]),
        format!("{}kl=us&kind=c&kind=c&q=foo%20type:c%20type:c", SEARCH)
    );
}

#[test]
fn test_multiline_description_keeps_the_script_valid() {
    let mut def = minimal();
    def.description = Some("line one\nEOF\necho INJECTED".to_string());
    assert_eq!(url(&def, &["foo"]), format!("{}foo", SEARCH));

    let output = run(&def, &["-help"]);
    assert!(output.status.success());
    let help = String::from_utf8(output.stdout).unwrap();
    assert!(help.contains("  line one\n  EOF\n  echo INJECTED (example.com)\n"));
}

#[test]
fn test_collapse_first_match_wins() {
    let mut def = minimal();
    def.query_parameter = Some("q".to_string());
    def.anythings.push(AnythingDef {
        name: "period".to_string(),
        default: "day".to_string(),
    });
    def.mappings.push(MappingDef {
        variable: "period".to_string(),
        parameter: "p".to_string(),
        url_encode: true,
    });
    def.collapses.push(CollapseDef {
        variable: "period".to_string(),
        branches: vec![strings(&["x", "y", "z"]), strings(&["y", "w"])],
    });
    assert_eq!(url(&def, &["-period=y", "foo"]), format!("{}p=z&q=foo", SEARCH));
    assert_eq!(url(&def, &["-period=w", "foo"]), format!("{}p=w&q=foo", SEARCH));
    assert_eq!(url(&def, &["foo"]), format!("{}p=day&q=foo", SEARCH));
}

#[test]
fn test_append_and_no_append_forms() {
    let def = minimal();
    assert_eq!(url(&def, &["foo"]), format!("{}foo", SEARCH));

    let mut def = minimal();
    def.append_search_args = false;
    assert_eq!(url(&def, &["foo"]), SEARCH);
}

#[test]
fn test_bad_bool_is_rejected_by_surfraw() {
    let mut def = minimal();
    def.bools.push(BoolDef {
        name: "safe".to_string(),
        default: "yes".to_string(),
    });
    let output = run(&def, &["-safe=maybe", "foo"]);
    assert_eq!(output.status.code(), Some(3));
}
