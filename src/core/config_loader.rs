// src/core/config_loader.rs

//! # Config Loader
//!
//! Loads an elvis schema from a TOML file into an `ElvisDefinition`. Values
//! are only deserialized here; validation happens in `core::schema::resolve`.

use crate::models::ElvisDefinition;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Errors that can occur while reading a schema file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read schema file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The TOML content is invalid or does not match the schema layout.
    #[error("Failed to parse TOML file at '{path}': {source}")]
    TomlParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Reads and deserializes a schema file.
pub fn load_definition(path: &Path) -> Result<ElvisDefinition, ConfigError> {
    log::debug!("Loading elvis schema from '{}'", path.display());
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_definition(&content).map_err(|e| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source: e,
    })
}

pub fn parse_definition(content: &str) -> Result<ElvisDefinition, toml::de::Error> {
    toml::from_str(content)
}

// MARK: --- UNIT TESTS ---

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SCHEMA: &str = r#"
name = "ddg"
base_url = "duckduckgo.com"
search_url = "duckduckgo.com/html?"
query_parameter = "q"
use_results_option = true

[[bools]]
name = "safe"
default = "yes"

[[enums]]
name = "region"
default = "us"
values = ["us", "uk", "de"]

[[lists]]
name = "kinds"
type = "enum"
defaults = ["a"]
values = ["a", "b"]

[[mappings]]
variable = "region"
parameter = "kl"

[[mappings]]
variable = "safe"
parameter = "kp"
url_encode = false

[[collapses]]
variable = "region"
branches = [["gb", "uk"]]
"#;

    #[test]
    fn test_parse_definition() {
        let def = parse_definition(SCHEMA).unwrap();
        assert_eq!(def.name.as_deref(), Some("ddg"));
        assert_eq!(def.query_parameter.as_deref(), Some("q"));
        assert!(def.use_results_option);
        assert!(def.append_search_args);
        assert!(def.completion_hooks);
        assert_eq!(def.bools[0].name, "safe");
        assert_eq!(def.enums[0].values, vec!["us", "uk", "de"]);
        assert_eq!(def.lists[0].item_type, "enum");
        assert!(def.mappings[0].url_encode);
        assert!(!def.mappings[1].url_encode);
        assert_eq!(def.collapses[0].branches, vec![vec!["gb", "uk"]]);
    }

    #[test]
    fn test_parse_definition_rejects_unknown_types() {
        assert!(parse_definition("num_tabs = \"two\"").is_err());
    }

    #[test]
    fn test_load_definition_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SCHEMA.as_bytes()).unwrap();
        let def = load_definition(file.path()).unwrap();
        assert_eq!(def.base_url.as_deref(), Some("duckduckgo.com"));
    }

    #[test]
    fn test_load_definition_missing_file() {
        let err = load_definition(Path::new("/nonexistent/elvis.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
