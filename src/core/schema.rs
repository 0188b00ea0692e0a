// src/core/schema.rs

//! # Schema Resolution
//!
//! Turns a raw `ElvisDefinition` into a validated, immutable `Elvis`. Every
//! check that can fail happens here, so rendering never starts on an invalid
//! schema.
//!
//! Resolution runs in a fixed order:
//! 1. Settings (name, URLs, tab count, query parameter).
//! 2. Variable-creating options, then the opted-in special options.
//! 3. Flags, which need their target variables.
//! 4. Aliases, which may target variables or flags.
//! 5. Metavar and description overrides.
//! 6. Mappings, inlines and collapses, which only reference variables.

use crate::{
    constants::{DEFAULT_NUM_TABS, LANGUAGE_DEFAULT, RESULTS_DEFAULT},
    core::validation::{
        parse_bool, split_list, validate_elvis_name, validate_enum_value, validate_metavar,
        validate_name, validate_option_name, validate_url_parameter,
    },
    models::{
        Alias, Collapse, CollapseBranch, Elvis, ElvisDefinition, Flag, FlagValue, InlineDef,
        InlineMapping, ListItemKind, Mapping, MappingDef, OptionKind, SpecialKind, Variable,
        VariableKind,
    },
};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("missing required setting '{0}'")]
    MissingSetting(&'static str),
    #[error("elvis name '{0}' may only contain letters, digits and underscores")]
    InvalidElvisName(String),
    #[error("name '{0}' is an invalid variable name for an elvis")]
    InvalidName(String),
    #[error("option name '{0}' is global, which cannot be overridden by elvi")]
    ForbiddenName(String),
    #[error("the option name '{0}' is duplicated")]
    DuplicateName(String),
    #[error("bool '{0}' must be one of the following: no, yes")]
    InvalidBool(String),
    #[error("enum value '{0}' must match the regex '^[a-z0-9][a-z0-9_+-]*$'")]
    InvalidEnumValue(String),
    #[error("enum '{0}' must specify its valid values")]
    MissingEnumValues(String),
    #[error("default value '{default}' of '{option}' must be within '{values}'")]
    DefaultNotAllowed {
        option: String,
        default: String,
        values: String,
    },
    #[error(
        "defaults of list option '{option}' ('{defaults}') must be a subset of its valid values ('{values}')"
    )]
    ListDefaultsNotAllowed {
        option: String,
        defaults: String,
        values: String,
    },
    #[error("list type '{0}' must be one of the following: anything, enum")]
    UnknownListType(String),
    #[error(
        "option type '{0}' must be one of the following: anything, bool, enum, flag, list, special"
    )]
    UnknownOptionType(String),
    #[error("alias '{0}' may not target another alias")]
    AliasOfAlias(String),
    #[error("flag option '{flag}' does not target any existing variable ('{target}')")]
    UnresolvedFlagTarget { flag: String, target: String },
    #[error("alias '{alias}' does not target any option of matching type ('{kind}')")]
    UnresolvedAliasTarget { alias: String, kind: OptionKind },
    #[error("value '{value}' of flag '{flag}' is invalid: {reason}")]
    InvalidFlagValue {
        flag: String,
        value: String,
        reason: String,
    },
    #[error("{subject} '{variable}' does not target any existing variable")]
    UnknownVariable {
        subject: &'static str,
        variable: String,
    },
    #[error("{subject} '{variable}' must target a list option")]
    NotAList {
        subject: &'static str,
        variable: String,
    },
    #[error("collapse for '{variable}' is invalid: {reason}")]
    InvalidCollapse { variable: String, reason: String },
    #[error("metavar '{0}' must match the regex '^[a-z]+$'")]
    InvalidMetavar(String),
    #[error("'{0}' is an invalid URL parameter")]
    InvalidUrlParameter(String),
    #[error("mapping variables without a defined query parameter is forbidden")]
    MappingWithoutQueryParameter,
    #[error("a query parameter cannot be combined with not appending search arguments")]
    QueryParameterWithoutAppend,
    #[error("the number of tabs must be at least 1 (got {0})")]
    InvalidNumTabs(usize),
    #[error("option arg '{arg}' {reason}")]
    InvalidSpec { arg: String, reason: String },
}

/// Tracks every external option name. Variables, flags and aliases share one namespace.
#[derive(Debug, Default)]
struct NameRegistry {
    seen: HashSet<String>,
}

impl NameRegistry {
    fn claim(&mut self, name: &str) -> Result<(), SchemaError> {
        validate_option_name(name)?;
        if !self.seen.insert(name.to_string()) {
            return Err(SchemaError::DuplicateName(name.to_string()));
        }
        Ok(())
    }
}

/// Parses the option type named by an alias definition.
pub fn parse_option_kind(alias: &str, typename: &str) -> Result<OptionKind, SchemaError> {
    match typename {
        "alias" => Err(SchemaError::AliasOfAlias(alias.to_string())),
        // Older elvis definitions spell bools this way.
        "bool" | "yes-no" => Ok(OptionKind::Bool),
        "flag" => Ok(OptionKind::Flag),
        "enum" => Ok(OptionKind::Enum),
        "anything" => Ok(OptionKind::Anything),
        "special" => Ok(OptionKind::Special),
        "list" => Ok(OptionKind::List),
        other => Err(SchemaError::UnknownOptionType(other.to_string())),
    }
}

fn parse_list_item_kind(typename: &str) -> Result<ListItemKind, SchemaError> {
    match typename {
        "enum" => Ok(ListItemKind::Enum),
        "anything" => Ok(ListItemKind::Anything),
        other => Err(SchemaError::UnknownListType(other.to_string())),
    }
}

/// Resolves and validates a complete elvis definition.
pub fn resolve(def: &ElvisDefinition) -> Result<Elvis, SchemaError> {
    log::debug!("Resolving elvis definition: {:?}", def.name);

    // --- 1. Settings ---
    let name = def
        .name
        .as_deref()
        .ok_or(SchemaError::MissingSetting("name"))?;
    validate_elvis_name(name)?;
    let base_url = def
        .base_url
        .as_deref()
        .ok_or(SchemaError::MissingSetting("base_url"))?;
    let search_url = def
        .search_url
        .as_deref()
        .ok_or(SchemaError::MissingSetting("search_url"))?;

    let num_tabs = def.num_tabs.unwrap_or(DEFAULT_NUM_TABS);
    if num_tabs < 1 {
        return Err(SchemaError::InvalidNumTabs(num_tabs));
    }

    if let Some(parameter) = &def.query_parameter {
        validate_url_parameter(parameter)?;
        if !def.append_search_args {
            return Err(SchemaError::QueryParameterWithoutAppend);
        }
    }

    let description = match &def.description {
        Some(desc) => format!("{} ({})", desc, base_url),
        None => format!("Search {} ({})", name, base_url),
    };
    let scheme = if def.insecure { "http" } else { "https" };

    // --- 2-5. Options ---
    let mut names = NameRegistry::default();
    let mut variables = build_variables(def, &mut names)?;
    let mut flags = resolve_flags(def, &mut variables, &mut names)?;
    let aliases = resolve_aliases(def, &mut variables, &mut flags, &mut names)?;
    apply_overrides(def, &mut variables)?;

    // --- 6. Variable targets ---
    let mappings = resolve_mappings(&def.mappings, &variables, false)?;
    let list_mappings = resolve_mappings(&def.list_mappings, &variables, true)?;
    let inlines = resolve_inlines(&def.inlines, &variables, false)?;
    let list_inlines = resolve_inlines(&def.list_inlines, &variables, true)?;
    let collapses = resolve_collapses(def, &variables)?;

    if (!mappings.is_empty() || !list_mappings.is_empty()) && def.query_parameter.is_none() {
        return Err(SchemaError::MappingWithoutQueryParameter);
    }

    log::debug!(
        "Resolved elvis '{}': {} variables, {} flags, {} aliases",
        name,
        variables.len(),
        flags.len(),
        aliases.len()
    );

    Ok(Elvis {
        name: name.to_string(),
        description,
        base_url: format!("{}://{}", scheme, base_url),
        search_url: format!("{}://{}", scheme, search_url),
        num_tabs,
        query_parameter: def.query_parameter.clone(),
        append_search_args: def.append_search_args,
        completion_hooks: def.completion_hooks,
        variables,
        flags,
        aliases,
        mappings,
        list_mappings,
        inlines,
        list_inlines,
        collapses,
    })
}

fn new_variable(name: &str, kind: VariableKind, description: String) -> Variable {
    Variable {
        name: name.to_string(),
        kind,
        metavar: name.to_uppercase(),
        description,
        aliases: Vec::new(),
        flags: Vec::new(),
    }
}

fn check_enum_values(option: &str, values: &[String]) -> Result<(), SchemaError> {
    if values.is_empty() {
        return Err(SchemaError::MissingEnumValues(option.to_string()));
    }
    for value in values {
        validate_enum_value(value)?;
    }
    Ok(())
}

fn build_variables(
    def: &ElvisDefinition,
    names: &mut NameRegistry,
) -> Result<Vec<Variable>, SchemaError> {
    let mut variables = Vec::new();

    for b in &def.bools {
        names.claim(&b.name)?;
        let default = parse_bool(&b.default)?;
        variables.push(new_variable(
            &b.name,
            VariableKind::Bool { default },
            format!("A bool option for '{}'", b.name),
        ));
    }

    for e in &def.enums {
        names.claim(&e.name)?;
        check_enum_values(&e.name, &e.values)?;
        validate_enum_value(&e.default)?;
        if !e.values.contains(&e.default) {
            return Err(SchemaError::DefaultNotAllowed {
                option: e.name.clone(),
                default: e.default.clone(),
                values: e.values.join(","),
            });
        }
        variables.push(new_variable(
            &e.name,
            VariableKind::Enum {
                default: e.default.clone(),
                values: e.values.clone(),
            },
            format!("An enum option for '{}'", e.name),
        ));
    }

    for a in &def.anythings {
        names.claim(&a.name)?;
        variables.push(new_variable(
            &a.name,
            VariableKind::Anything {
                default: a.default.clone(),
            },
            format!("An unchecked option for '{}'", a.name),
        ));
    }

    for l in &def.lists {
        names.claim(&l.name)?;
        let item = parse_list_item_kind(&l.item_type)?;
        let values = match item {
            ListItemKind::Enum => {
                check_enum_values(&l.name, &l.values)?;
                if !l.defaults.iter().all(|d| l.values.contains(d)) {
                    return Err(SchemaError::ListDefaultsNotAllowed {
                        option: l.name.clone(),
                        defaults: l.defaults.join(","),
                        values: l.values.join(","),
                    });
                }
                l.values.clone()
            }
            // Nothing to check for 'anything' lists.
            ListItemKind::Anything => Vec::new(),
        };
        variables.push(new_variable(
            &l.name,
            VariableKind::List {
                item,
                defaults: l.defaults.clone(),
                values,
            },
            format!(
                "A repeatable (cumulative) '{}' list option for '{}'",
                item.typename(),
                l.name
            ),
        ));
    }

    if def.use_results_option {
        variables.push(special_variable(SpecialKind::Results, names)?);
    }
    if def.use_language_option {
        variables.push(special_variable(SpecialKind::Language, names)?);
    }

    Ok(variables)
}

fn special_variable(kind: SpecialKind, names: &mut NameRegistry) -> Result<Variable, SchemaError> {
    names.claim(kind.name())?;
    let (metavar, description) = match kind {
        SpecialKind::Results => ("NUM", "Number of search results returned"),
        SpecialKind::Language => (
            "ISOCODE",
            "Two letter language code (resembles ISO country codes)",
        ),
    };
    Ok(Variable {
        name: kind.name().to_string(),
        kind: VariableKind::Special(kind),
        metavar: metavar.to_string(),
        description: description.to_string(),
        aliases: Vec::new(),
        flags: Vec::new(),
    })
}

/// Host-environment expression a special option defaults to.
pub fn special_default(kind: SpecialKind) -> &'static str {
    match kind {
        SpecialKind::Results => RESULTS_DEFAULT,
        SpecialKind::Language => LANGUAGE_DEFAULT,
    }
}

/// Checks a flag's value against its target and returns it in typed form.
fn flag_value_for(target: &Variable, raw: &str) -> Result<FlagValue, String> {
    match &target.kind {
        VariableKind::Bool { .. } => parse_bool(raw).map(FlagValue::Bool).map_err(|e| e.to_string()),
        VariableKind::Enum { values, .. } => {
            validate_enum_value(raw).map_err(|e| e.to_string())?;
            if values.iter().any(|v| v == raw) {
                Ok(FlagValue::Scalar(raw.to_string()))
            } else {
                Err(format!("must be one of '{}'", values.join(",")))
            }
        }
        VariableKind::Anything { .. } => Ok(FlagValue::Scalar(raw.to_string())),
        VariableKind::Special(SpecialKind::Results) => raw
            .parse::<u64>()
            .map(|n| FlagValue::Scalar(n.to_string()))
            .map_err(|_| "value for special 'results' option must be an integer".to_string()),
        // There are far too many language codes to check.
        VariableKind::Special(SpecialKind::Language) => Ok(FlagValue::Scalar(raw.to_string())),
        VariableKind::List { item, values, .. } => {
            let items = split_list(raw);
            if *item == ListItemKind::Enum {
                for value in &items {
                    validate_enum_value(value).map_err(|e| e.to_string())?;
                }
                if !items.iter().all(|v| values.contains(v)) {
                    return Err(format!(
                        "must be a subset of the target's values ('{}')",
                        values.join(",")
                    ));
                }
            }
            Ok(FlagValue::List(items))
        }
    }
}

fn resolve_flags(
    def: &ElvisDefinition,
    variables: &mut [Variable],
    names: &mut NameRegistry,
) -> Result<Vec<Flag>, SchemaError> {
    let mut flags = Vec::with_capacity(def.flags.len());
    for f in &def.flags {
        names.claim(&f.name)?;
        let target = variables
            .iter_mut()
            .find(|v| v.name == f.target)
            .ok_or_else(|| SchemaError::UnresolvedFlagTarget {
                flag: f.name.clone(),
                target: f.target.clone(),
            })?;

        let value =
            flag_value_for(target, &f.value).map_err(|reason| SchemaError::InvalidFlagValue {
                flag: f.name.clone(),
                value: f.value.clone(),
                reason,
            })?;

        let description = match (&target.kind, &value) {
            (VariableKind::List { item, .. }, FlagValue::List(items)) => format!(
                "An alias for the '{}' list option '{}' with the values '{}'",
                item.typename(),
                target.name,
                items.join(",")
            ),
            _ => format!("An alias for -{}={}", target.name, f.value),
        };

        log::trace!("Flag '{}' resolved to target '{}'", f.name, target.name);
        target.flags.push(f.name.clone());
        flags.push(Flag {
            name: f.name.clone(),
            target: target.name.clone(),
            value,
            description,
            aliases: Vec::new(),
        });
    }
    Ok(flags)
}

fn resolve_aliases(
    def: &ElvisDefinition,
    variables: &mut [Variable],
    flags: &mut [Flag],
    names: &mut NameRegistry,
) -> Result<Vec<Alias>, SchemaError> {
    let mut aliases = Vec::with_capacity(def.aliases.len());
    for a in &def.aliases {
        let kind = parse_option_kind(&a.name, &a.target_type)?;
        names.claim(&a.name)?;
        validate_name(&a.target)?;

        let unresolved = || SchemaError::UnresolvedAliasTarget {
            alias: a.name.clone(),
            kind,
        };
        if kind == OptionKind::Flag {
            let flag = flags
                .iter_mut()
                .find(|f| f.name == a.target)
                .ok_or_else(unresolved)?;
            flag.aliases.push(a.name.clone());
        } else {
            let variable = variables
                .iter_mut()
                .find(|v| v.name == a.target && v.kind.option_kind() == kind)
                .ok_or_else(unresolved)?;
            variable.aliases.push(a.name.clone());
        }

        aliases.push(Alias {
            name: a.name.clone(),
            target: a.target.clone(),
            kind,
        });
    }
    Ok(aliases)
}

fn find_variable_mut<'a>(
    variables: &'a mut [Variable],
    subject: &'static str,
    name: &str,
) -> Result<&'a mut Variable, SchemaError> {
    variables
        .iter_mut()
        .find(|v| v.name == name)
        .ok_or_else(|| SchemaError::UnknownVariable {
            subject,
            variable: name.to_string(),
        })
}

fn apply_overrides(def: &ElvisDefinition, variables: &mut [Variable]) -> Result<(), SchemaError> {
    for m in &def.metavars {
        let metavar = validate_metavar(&m.metavar)?;
        find_variable_mut(variables, "metavar", &m.variable)?.metavar = metavar;
    }
    for d in &def.descriptions {
        find_variable_mut(variables, "description", &d.variable)?.description =
            d.description.clone();
    }
    Ok(())
}

fn check_target<'a>(
    variables: &'a [Variable],
    subject: &'static str,
    name: &str,
    must_be_list: bool,
) -> Result<&'a Variable, SchemaError> {
    let variable = variables
        .iter()
        .find(|v| v.name == name)
        .ok_or_else(|| SchemaError::UnknownVariable {
            subject,
            variable: name.to_string(),
        })?;
    if must_be_list && !variable.kind.is_list() {
        return Err(SchemaError::NotAList {
            subject,
            variable: name.to_string(),
        });
    }
    Ok(variable)
}

fn resolve_mappings(
    defs: &[MappingDef],
    variables: &[Variable],
    lists: bool,
) -> Result<Vec<Mapping>, SchemaError> {
    defs.iter()
        .map(|m| {
            check_target(variables, "URL parameter", &m.variable, lists)?;
            validate_url_parameter(&m.parameter)?;
            Ok(Mapping {
                variable: m.variable.clone(),
                parameter: m.parameter.clone(),
                url_encode: m.url_encode,
            })
        })
        .collect()
}

fn resolve_inlines(
    defs: &[InlineDef],
    variables: &[Variable],
    lists: bool,
) -> Result<Vec<InlineMapping>, SchemaError> {
    defs.iter()
        .map(|i| {
            check_target(variables, "inlining", &i.variable, lists)?;
            validate_name(&i.keyword)?;
            Ok(InlineMapping {
                variable: i.variable.clone(),
                keyword: i.keyword.clone(),
            })
        })
        .collect()
}

fn resolve_collapses(
    def: &ElvisDefinition,
    variables: &[Variable],
) -> Result<Vec<Collapse>, SchemaError> {
    let mut collapses = Vec::with_capacity(def.collapses.len());
    for c in &def.collapses {
        check_target(variables, "collapse", &c.variable, false)?;
        if c.branches.is_empty() {
            return Err(SchemaError::InvalidCollapse {
                variable: c.variable.clone(),
                reason: "at least one group of values is required".to_string(),
            });
        }
        let mut branches = Vec::with_capacity(c.branches.len());
        for group in &c.branches {
            match group.split_last() {
                Some((output, inputs)) if !inputs.is_empty() => branches.push(CollapseBranch {
                    inputs: inputs.to_vec(),
                    output: output.clone(),
                }),
                _ => {
                    return Err(SchemaError::InvalidCollapse {
                        variable: c.variable.clone(),
                        reason: format!(
                            "group '{}' needs at least one value and a result",
                            group.join(",")
                        ),
                    });
                }
            }
        }
        collapses.push(Collapse {
            variable: c.variable.clone(),
            branches,
        });
    }
    Ok(collapses)
}

// MARK: --- UNIT TESTS ---
