// src/cli/mod.rs

use crate::{
    core::option_spec,
    models::{
        AliasDef, AnythingDef, BoolDef, CollapseDef, DescribeDef, ElvisDefinition, EnumDef,
        FlagDef, InlineDef, ListDef, MappingDef, MetavarDef,
    },
};
use clap::Parser;
use std::path::PathBuf;

pub mod handlers;

/// mkelvis: Generates surfraw elvi from option definitions.
///
/// Definitions come from a TOML schema (`--schema`), the command line, or both.
/// Command-line settings override the schema and command-line options are
/// added to the ones it declares.
#[derive(Parser, Debug, Default)]
#[command(
    name = "mkelvis",
    author,
    version,
    about,
    styles = clap::builder::Styles::styled()
        .header(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .usage(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .literal(clap::builder::styling::AnsiColor::Cyan.on_default().bold())
        .placeholder(clap::builder::styling::AnsiColor::Green.on_default()),
)]
pub struct Cli {
    /// Name of the elvis. Also the default output file.
    pub name: Option<String>,

    /// URL opened when no search terms are given, without the scheme.
    pub base_url: Option<String>,

    /// URL searches are sent to, without the scheme.
    pub search_url: Option<String>,

    /// TOML file with the elvis definition.
    #[arg(long, value_name = "FILE")]
    pub schema: Option<PathBuf>,

    /// Description shown by `sr -elvi` and in the help text.
    #[arg(long)]
    pub description: Option<String>,

    /// Use http:// instead of https://.
    #[arg(long)]
    pub insecure: bool,

    /// Tabs between the elvis name and its description in `sr -elvi`.
    #[arg(long, value_name = "N")]
    pub num_tabs: Option<usize>,

    /// URL parameter carrying the search terms; enables mappings.
    #[arg(short = 'Q', long, value_name = "PARAM", conflicts_with = "no_append_args")]
    pub query_parameter: Option<String>,

    /// Do not append the search terms to the search URL.
    #[arg(long)]
    pub no_append_args: bool,

    /// Add the special -results=NUM option.
    #[arg(long)]
    pub use_results_option: bool,

    /// Add the special -language=ISOCODE option.
    #[arg(long)]
    pub use_language_option: bool,

    /// Do not emit the w3_complete_hook_opt completion hook.
    #[arg(long)]
    pub no_completion_hooks: bool,

    /// Flag option setting TARGET to VALUE.
    #[arg(short = 'F', long = "flag", value_name = "NAME:TARGET:VALUE", value_parser = option_spec::parse_flag)]
    pub flags: Vec<FlagDef>,

    /// Boolean option.
    #[arg(short = 'Y', long = "yes-no", value_name = "NAME:DEFAULT", value_parser = option_spec::parse_yes_no)]
    pub bools: Vec<BoolDef>,

    /// Option restricted to a set of values.
    #[arg(short = 'E', long = "enum", value_name = "NAME:DEFAULT:VALUES", value_parser = option_spec::parse_enum)]
    pub enums: Vec<EnumDef>,

    /// Unchecked option.
    #[arg(short = 'A', long = "anything", value_name = "NAME:DEFAULT", value_parser = option_spec::parse_anything)]
    pub anythings: Vec<AnythingDef>,

    /// Alternative name for an option of the given TYPE.
    #[arg(long = "alias", value_name = "NAME:TARGET:TYPE", value_parser = option_spec::parse_alias)]
    pub aliases: Vec<AliasDef>,

    /// Repeatable option holding a list of `enum` or `anything` values.
    #[arg(long = "list", value_name = "NAME:TYPE:DEFAULTS[:VALUES]", value_parser = option_spec::parse_list)]
    pub lists: Vec<ListDef>,

    /// Send a variable as a URL parameter (encoded unless the third part is `no`).
    #[arg(long = "map", value_name = "VARIABLE:PARAMETER[:yes|no]", value_parser = option_spec::parse_mapping)]
    pub mappings: Vec<MappingDef>,

    /// Send every element of a list variable as a URL parameter.
    #[arg(long = "list-map", value_name = "VARIABLE:PARAMETER[:yes|no]", value_parser = option_spec::parse_mapping)]
    pub list_mappings: Vec<MappingDef>,

    /// Add `KEYWORD:value` to the search terms.
    #[arg(long = "inline", value_name = "VARIABLE:KEYWORD", value_parser = option_spec::parse_inline)]
    pub inlines: Vec<InlineDef>,

    /// Add `KEYWORD:value` to the search terms for every element of a list.
    #[arg(long = "list-inline", value_name = "VARIABLE:KEYWORD", value_parser = option_spec::parse_inline)]
    pub list_inlines: Vec<InlineDef>,

    /// Rewrite values: each group lists inputs followed by their replacement.
    #[arg(long = "collapse", value_name = "VARIABLE:A,B,RESULT[:C,RESULT]", value_parser = option_spec::parse_collapse)]
    pub collapses: Vec<CollapseDef>,

    /// Metavar shown in the help text.
    #[arg(long = "metavar", value_name = "VARIABLE:METAVAR", value_parser = option_spec::parse_metavar)]
    pub metavars: Vec<MetavarDef>,

    /// Description shown in the help text.
    #[arg(long = "describe", value_name = "VARIABLE:DESCRIPTION", value_parser = option_spec::parse_describe)]
    pub descriptions: Vec<DescribeDef>,

    /// Output file. Defaults to the elvis name in the current directory.
    #[arg(short, long, value_name = "PATH", conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Print to stdout instead of writing a file.
    #[arg(long)]
    pub stdout: bool,

    /// Also write a bash completion script to `<output>.completion`.
    /// With --stdout, print the completion script instead of the elvis.
    #[arg(long)]
    pub completion: bool,
}

impl Cli {
    /// Layers the command line over `def`: settings override, options are appended.
    pub fn apply_to(&self, def: &mut ElvisDefinition) {
        let overrides = [
            (&mut def.name, &self.name),
            (&mut def.base_url, &self.base_url),
            (&mut def.search_url, &self.search_url),
            (&mut def.description, &self.description),
            (&mut def.query_parameter, &self.query_parameter),
        ];
        for (slot, value) in overrides {
            if value.is_some() {
                slot.clone_from(value);
            }
        }
        if self.num_tabs.is_some() {
            def.num_tabs = self.num_tabs;
        }

        def.insecure |= self.insecure;
        def.use_results_option |= self.use_results_option;
        def.use_language_option |= self.use_language_option;
        if self.no_append_args {
            def.append_search_args = false;
        }
        if self.no_completion_hooks {
            def.completion_hooks = false;
        }

        def.bools.extend(self.bools.iter().cloned());
        def.enums.extend(self.enums.iter().cloned());
        def.anythings.extend(self.anythings.iter().cloned());
        def.lists.extend(self.lists.iter().cloned());
        def.flags.extend(self.flags.iter().cloned());
        def.aliases.extend(self.aliases.iter().cloned());
        def.mappings.extend(self.mappings.iter().cloned());
        def.list_mappings.extend(self.list_mappings.iter().cloned());
        def.inlines.extend(self.inlines.iter().cloned());
        def.list_inlines.extend(self.list_inlines.iter().cloned());
        def.collapses.extend(self.collapses.iter().cloned());
        def.metavars.extend(self.metavars.iter().cloned());
        def.descriptions.extend(self.descriptions.iter().cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_colon_specs() {
        let cli = Cli::try_parse_from([
            "mkelvis",
            "ddg",
            "duckduckgo.com",
            "duckduckgo.com/html?",
            "-Y",
            "safe:yes",
            "-E",
            "region:us:us,uk",
            "--list",
            "kinds:enum:a:a,b",
            "-F",
            "nsfw:safe:no",
            "--map",
            "region:kl",
            "-Q",
            "q",
        ])
        .unwrap();
        assert_eq!(cli.name.as_deref(), Some("ddg"));
        assert_eq!(cli.bools[0].default, "yes");
        assert_eq!(cli.enums[0].values, vec!["us", "uk"]);
        assert_eq!(cli.lists[0].values, vec!["a", "b"]);
        assert_eq!(cli.flags[0].target, "safe");
        assert!(cli.mappings[0].url_encode);
    }

    #[test]
    fn test_malformed_spec_is_a_parse_error() {
        assert!(Cli::try_parse_from(["mkelvis", "-E", "region:us"]).is_err());
    }

    #[test]
    fn test_query_parameter_conflicts_with_no_append() {
        assert!(Cli::try_parse_from(["mkelvis", "-Q", "q", "--no-append-args"]).is_err());
    }

    #[test]
    fn test_apply_to_overrides_and_appends() {
        let mut def = ElvisDefinition {
            name: Some("old".to_string()),
            base_url: Some("example.com".to_string()),
            ..Default::default()
        };
        def.bools.push(BoolDef {
            name: "safe".to_string(),
            default: "yes".to_string(),
        });

        let cli =
            Cli::try_parse_from(["mkelvis", "new", "--no-append-args", "-Y", "fast:no"]).unwrap();
        cli.apply_to(&mut def);

        assert_eq!(def.name.as_deref(), Some("new"));
        assert_eq!(def.base_url.as_deref(), Some("example.com"));
        assert!(!def.append_search_args);
        assert_eq!(def.bools.len(), 2);
        assert_eq!(def.bools[1].name, "fast");
    }
}
