// src/core/validation.rs

//! Grammar checks for the pieces of an elvis definition.
//!
//! Option names are deliberately narrower than shell identifiers so that every
//! generated variable reads `SURFRAW_elvisname_onewordvar`.

use crate::{
    constants::{FALSE_WORDS, FORBIDDEN_OPTION_NAMES, LIST_SEPARATOR, TRUE_WORDS},
    core::schema::SchemaError,
};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref OPTION_NAME_RE: Regex = Regex::new(r"^[a-z]+$").unwrap();
    static ref ELVIS_NAME_RE: Regex = Regex::new(r"^[A-Za-z0-9_]+$").unwrap();
    static ref ENUM_VALUE_RE: Regex = Regex::new(ENUM_VALUE_PATTERN).unwrap();
    static ref METAVAR_RE: Regex = Regex::new(r"^[a-z]+$").unwrap();
    static ref URL_PARAMETER_RE: Regex = Regex::new(r"^[^\s&=#]+$").unwrap();
}

pub const ENUM_VALUE_PATTERN: &str = "^[a-z0-9][a-z0-9_+-]*$";

/// Checks an option, variable or keyword name.
pub fn validate_name(name: &str) -> Result<&str, SchemaError> {
    if OPTION_NAME_RE.is_match(name) {
        Ok(name)
    } else {
        Err(SchemaError::InvalidName(name.to_string()))
    }
}

/// Checks a name that becomes a user-visible option of the elvis.
pub fn validate_option_name(name: &str) -> Result<&str, SchemaError> {
    validate_name(name)?;
    if FORBIDDEN_OPTION_NAMES.contains(&name) {
        return Err(SchemaError::ForbiddenName(name.to_string()));
    }
    Ok(name)
}

/// The elvis name is embedded in every variable name, so it must be an identifier fragment.
pub fn validate_elvis_name(name: &str) -> Result<&str, SchemaError> {
    if ELVIS_NAME_RE.is_match(name) {
        Ok(name)
    } else {
        Err(SchemaError::InvalidElvisName(name.to_string()))
    }
}

pub fn validate_enum_value(value: &str) -> Result<&str, SchemaError> {
    if ENUM_VALUE_RE.is_match(value) {
        Ok(value)
    } else {
        Err(SchemaError::InvalidEnumValue(value.to_string()))
    }
}

pub fn parse_bool(word: &str) -> Result<bool, SchemaError> {
    if TRUE_WORDS.contains(&word) {
        Ok(true)
    } else if FALSE_WORDS.contains(&word) {
        Ok(false)
    } else {
        Err(SchemaError::InvalidBool(word.to_string()))
    }
}

/// Returns the metavar in the upper case form used in help output.
pub fn validate_metavar(metavar: &str) -> Result<String, SchemaError> {
    if METAVAR_RE.is_match(metavar) {
        Ok(metavar.to_uppercase())
    } else {
        Err(SchemaError::InvalidMetavar(metavar.to_string()))
    }
}

pub fn validate_url_parameter(parameter: &str) -> Result<&str, SchemaError> {
    if URL_PARAMETER_RE.is_match(parameter) {
        Ok(parameter)
    } else {
        Err(SchemaError::InvalidUrlParameter(parameter.to_string()))
    }
}

/// Splits a comma-separated list. An empty string is an empty list.
pub fn split_list(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        Vec::new()
    } else {
        raw.split(LIST_SEPARATOR).map(str::to_string).collect()
    }
}

// MARK: --- UNIT TESTS ---

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("safe").is_ok());
        assert!(validate_name("Safe").is_err());
        assert!(validate_name("safe_search").is_err());
        assert!(validate_name("").is_err());
    }

    #[test]
    fn test_validate_option_name_rejects_global_options() {
        assert!(matches!(
            validate_option_name("browser"),
            Err(SchemaError::ForbiddenName(name)) if name == "browser"
        ));
        assert!(validate_option_name("region").is_ok());
    }

    #[test]
    fn test_validate_elvis_name() {
        assert!(validate_elvis_name("duckduckgo").is_ok());
        assert!(validate_elvis_name("my_elvis2").is_ok());
        assert!(validate_elvis_name("bad-name").is_err());
        assert!(validate_elvis_name("dir/name").is_err());
    }

    #[test]
    fn test_validate_enum_value() {
        assert!(validate_enum_value("c++").is_ok());
        assert!(validate_enum_value("en-us").is_ok());
        assert!(validate_enum_value("-leading").is_err());
        assert!(validate_enum_value("Upper").is_err());
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("yes").unwrap());
        assert!(!parse_bool("no").unwrap());
        assert!(parse_bool("true").is_err());
    }

    #[test]
    fn test_validate_metavar_is_uppercased() {
        assert_eq!(validate_metavar("num").unwrap(), "NUM");
        assert!(validate_metavar("NUM").is_err());
    }

    #[test]
    fn test_validate_url_parameter() {
        assert!(validate_url_parameter("q").is_ok());
        assert!(validate_url_parameter("filter[type]").is_ok());
        assert!(validate_url_parameter("a&b").is_err());
        assert!(validate_url_parameter("a b").is_err());
        assert!(validate_url_parameter("").is_err());
    }

    #[test]
    fn test_split_list() {
        assert!(split_list("").is_empty());
        assert_eq!(split_list("a,b"), vec!["a", "b"]);
        assert_eq!(split_list("a,,b"), vec!["a", "", "b"]);
    }
}
