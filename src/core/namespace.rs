// src/core/namespace.rs

use crate::constants::NAMESPACE_PREFIX;

/// Maps option names to the shell variables surfraw reserves for an elvis.
///
/// Option names are unique and already validated, so the mapping is injective
/// and never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespacer {
    prefix: String,
}

impl Namespacer {
    pub fn for_elvis(elvis_name: &str) -> Self {
        Self {
            prefix: format!("{}_{}", NAMESPACE_PREFIX, elvis_name),
        }
    }

    pub fn namespace(&self, name: &str) -> String {
        format!("{}_{}", self.prefix, name)
    }
}
