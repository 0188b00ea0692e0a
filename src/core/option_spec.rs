// src/core/option_spec.rs

//! Parsers for the colon-delimited option specs accepted on the command line,
//! e.g. `--enum region:us:us,uk,de`. They only split the argument; the parts are
//! validated later by `core::schema::resolve`.

use crate::{
    core::{schema::SchemaError, validation::parse_bool, validation::split_list},
    models::{
        AliasDef, AnythingDef, BoolDef, CollapseDef, DescribeDef, EnumDef, FlagDef, InlineDef,
        ListDef, MappingDef, MetavarDef,
    },
};

const SPEC_SEPARATOR: char = ':';

fn invalid(arg: &str, reason: impl Into<String>) -> SchemaError {
    SchemaError::InvalidSpec {
        arg: arg.to_string(),
        reason: reason.into(),
    }
}

/// Splits `arg` into exactly `N` parts.
fn split_exact<const N: usize>(arg: &str) -> Result<[&str; N], SchemaError> {
    let parts: Vec<&str> = arg.split(SPEC_SEPARATOR).collect();
    parts
        .try_into()
        .map_err(|_| invalid(arg, format!("needs exactly {} colon-separated parts", N)))
}

/// Splits `arg` into `N` parts plus an optional last one.
fn split_optional<const N: usize>(arg: &str) -> Result<([&str; N], Option<&str>), SchemaError> {
    let mut parts: Vec<&str> = arg.split(SPEC_SEPARATOR).collect();
    let optional = if parts.len() > N { parts.pop() } else { None };
    let required = parts.try_into().map_err(|_| {
        invalid(arg, format!("needs {} or {} colon-separated parts", N, N + 1))
    })?;
    Ok((required, optional))
}

/// `NAME:TARGET:VALUE`
pub fn parse_flag(arg: &str) -> Result<FlagDef, SchemaError> {
    let [name, target, value] = split_exact(arg)?;
    Ok(FlagDef {
        name: name.to_string(),
        target: target.to_string(),
        value: value.to_string(),
    })
}

/// `NAME:DEFAULT`
pub fn parse_yes_no(arg: &str) -> Result<BoolDef, SchemaError> {
    let [name, default] = split_exact(arg)?;
    Ok(BoolDef {
        name: name.to_string(),
        default: default.to_string(),
    })
}

/// `NAME:DEFAULT:V1,V2,...`
pub fn parse_enum(arg: &str) -> Result<EnumDef, SchemaError> {
    let [name, default, values] = split_exact(arg)?;
    Ok(EnumDef {
        name: name.to_string(),
        default: default.to_string(),
        values: split_list(values),
    })
}

/// `NAME:DEFAULT`, the default may be empty.
pub fn parse_anything(arg: &str) -> Result<AnythingDef, SchemaError> {
    let [name, default] = split_exact(arg)?;
    Ok(AnythingDef {
        name: name.to_string(),
        default: default.to_string(),
    })
}

/// `NAME:TARGET:TYPE`
pub fn parse_alias(arg: &str) -> Result<AliasDef, SchemaError> {
    let [name, target, target_type] = split_exact(arg)?;
    Ok(AliasDef {
        name: name.to_string(),
        target: target.to_string(),
        target_type: target_type.to_string(),
    })
}

/// `NAME:TYPE:DEFAULTS[:VALUES]`
pub fn parse_list(arg: &str) -> Result<ListDef, SchemaError> {
    let ([name, item_type, defaults], values) = split_optional(arg)?;
    Ok(ListDef {
        name: name.to_string(),
        item_type: item_type.to_string(),
        defaults: split_list(defaults),
        values: values.map(split_list).unwrap_or_default(),
    })
}

/// `VARIABLE:PARAMETER[:yes|no]`, URL encoding is on unless `no` is given.
pub fn parse_mapping(arg: &str) -> Result<MappingDef, SchemaError> {
    let ([variable, parameter], encode) = split_optional(arg)?;
    let url_encode = match encode {
        Some(word) => parse_bool(word).map_err(|e| invalid(arg, e.to_string()))?,
        None => true,
    };
    Ok(MappingDef {
        variable: variable.to_string(),
        parameter: parameter.to_string(),
        url_encode,
    })
}

/// `VARIABLE:KEYWORD`
pub fn parse_inline(arg: &str) -> Result<InlineDef, SchemaError> {
    let [variable, keyword] = split_exact(arg)?;
    Ok(InlineDef {
        variable: variable.to_string(),
        keyword: keyword.to_string(),
    })
}

/// `VARIABLE:A,B,RESULT[:C,D,RESULT2...]`
pub fn parse_collapse(arg: &str) -> Result<CollapseDef, SchemaError> {
    let (variable, groups) = arg
        .split_once(SPEC_SEPARATOR)
        .ok_or_else(|| invalid(arg, "needs at least 2 colon-separated parts"))?;
    Ok(CollapseDef {
        variable: variable.to_string(),
        branches: groups.split(SPEC_SEPARATOR).map(split_list).collect(),
    })
}

/// `VARIABLE:METAVAR`
pub fn parse_metavar(arg: &str) -> Result<MetavarDef, SchemaError> {
    let [variable, metavar] = split_exact(arg)?;
    Ok(MetavarDef {
        variable: variable.to_string(),
        metavar: metavar.to_string(),
    })
}

/// `VARIABLE:DESCRIPTION`, the description may contain colons.
pub fn parse_describe(arg: &str) -> Result<DescribeDef, SchemaError> {
    match arg.split_once(SPEC_SEPARATOR) {
        Some((variable, description)) => Ok(DescribeDef {
            variable: variable.to_string(),
            description: description.to_string(),
        }),
        None => Err(invalid(arg, "needs at least 2 colon-separated parts")),
    }
}

// MARK: --- UNIT TESTS ---

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        let flag = parse_flag("nsfw:safe:no").unwrap();
        assert_eq!(flag.name, "nsfw");
        assert_eq!(flag.target, "safe");
        assert_eq!(flag.value, "no");
        assert!(parse_flag("nsfw:safe").is_err());
    }

    #[test]
    fn test_parse_enum_values() {
        let e = parse_enum("region:us:us,uk,de").unwrap();
        assert_eq!(e.default, "us");
        assert_eq!(e.values, vec!["us", "uk", "de"]);
    }

    #[test]
    fn test_parse_anything_allows_empty_default() {
        let a = parse_anything("site:").unwrap();
        assert_eq!(a.name, "site");
        assert_eq!(a.default, "");
    }

    #[test]
    fn test_parse_list_with_and_without_values() {
        let l = parse_list("kinds:enum:a,b:a,b,c").unwrap();
        assert_eq!(l.item_type, "enum");
        assert_eq!(l.defaults, vec!["a", "b"]);
        assert_eq!(l.values, vec!["a", "b", "c"]);

        let l = parse_list("tags:anything:").unwrap();
        assert!(l.defaults.is_empty());
        assert!(l.values.is_empty());
    }

    #[test]
    fn test_parse_mapping_encode_flag() {
        assert!(parse_mapping("region:kl").unwrap().url_encode);
        assert!(!parse_mapping("region:kl:no").unwrap().url_encode);
        let err = parse_mapping("region:kl:maybe").unwrap_err();
        assert!(matches!(err, SchemaError::InvalidSpec { arg, .. } if arg == "region:kl:maybe"));
    }

    #[test]
    fn test_parse_collapse_groups() {
        let c = parse_collapse("period:x,y,z:y,w").unwrap();
        assert_eq!(c.variable, "period");
        assert_eq!(c.branches, vec![vec!["x", "y", "z"], vec!["y", "w"]]);
        assert!(parse_collapse("period").is_err());
    }

    #[test]
    fn test_parse_describe_keeps_colons() {
        let d = parse_describe("site:Restrict to site: e.g. example.com").unwrap();
        assert_eq!(d.variable, "site");
        assert_eq!(d.description, "Restrict to site: e.g. example.com");
        assert!(parse_describe("site").is_err());
    }

    #[test]
    fn test_too_many_parts() {
        assert!(parse_yes_no("safe:yes:extra").is_err());
        assert!(parse_alias("s:safe:bool:x").is_err());
    }
}
