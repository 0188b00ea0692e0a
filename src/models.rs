// src/models.rs

use serde::{Deserialize, Serialize};
use std::fmt;

// --- DEFINITION MODELS (What is read from the command line or a schema file) ---
// Strings here are unvalidated. `core::schema::resolve` turns them into an `Elvis`.

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BoolDef {
    pub name: String,
    pub default: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct EnumDef {
    pub name: String,
    pub default: String,
    pub values: Vec<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AnythingDef {
    pub name: String,
    #[serde(default)]
    pub default: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ListDef {
    pub name: String,
    /// Either `enum` or `anything`.
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(default)]
    pub defaults: Vec<String>,
    #[serde(default)]
    pub values: Vec<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FlagDef {
    pub name: String,
    pub target: String,
    /// For list targets this is a comma-separated list of values.
    pub value: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AliasDef {
    pub name: String,
    pub target: String,
    #[serde(rename = "type")]
    pub target_type: String,
}

fn default_true() -> bool {
    true
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MappingDef {
    pub variable: String,
    pub parameter: String,
    #[serde(default = "default_true")]
    pub url_encode: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct InlineDef {
    pub variable: String,
    pub keyword: String,
}

/// Each branch lists the input values followed by the value they collapse to.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CollapseDef {
    pub variable: String,
    pub branches: Vec<Vec<String>>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MetavarDef {
    pub variable: String,
    pub metavar: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DescribeDef {
    pub variable: String,
    pub description: String,
}

/// Represents the deserialized structure of an elvis schema file, and the
/// accumulated command-line definitions layered on top of it.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ElvisDefinition {
    pub name: Option<String>,
    pub base_url: Option<String>,
    pub search_url: Option<String>,
    pub description: Option<String>,
    pub insecure: bool,
    pub num_tabs: Option<usize>,
    pub query_parameter: Option<String>,
    pub append_search_args: bool,
    pub completion_hooks: bool,
    pub use_results_option: bool,
    pub use_language_option: bool,

    pub bools: Vec<BoolDef>,
    pub enums: Vec<EnumDef>,
    pub anythings: Vec<AnythingDef>,
    pub lists: Vec<ListDef>,
    pub flags: Vec<FlagDef>,
    pub aliases: Vec<AliasDef>,

    pub mappings: Vec<MappingDef>,
    pub list_mappings: Vec<MappingDef>,
    pub inlines: Vec<InlineDef>,
    pub list_inlines: Vec<InlineDef>,
    pub collapses: Vec<CollapseDef>,
    pub metavars: Vec<MetavarDef>,
    pub descriptions: Vec<DescribeDef>,
}

impl Default for ElvisDefinition {
    fn default() -> Self {
        Self {
            name: None,
            base_url: None,
            search_url: None,
            description: None,
            insecure: false,
            num_tabs: None,
            query_parameter: None,
            append_search_args: true,
            completion_hooks: true,
            use_results_option: false,
            use_language_option: false,
            bools: Vec::new(),
            enums: Vec::new(),
            anythings: Vec::new(),
            lists: Vec::new(),
            flags: Vec::new(),
            aliases: Vec::new(),
            mappings: Vec::new(),
            list_mappings: Vec::new(),
            inlines: Vec::new(),
            list_inlines: Vec::new(),
            collapses: Vec::new(),
            metavars: Vec::new(),
            descriptions: Vec::new(),
        }
    }
}

// --- RESOLVED MODELS (What the renderers consume) ---

/// Every kind of option an elvis can define, named the way users refer to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKind {
    Flag,
    Bool,
    Enum,
    Anything,
    Special,
    List,
}

impl OptionKind {
    pub fn typename(self) -> &'static str {
        match self {
            OptionKind::Flag => "flag",
            OptionKind::Bool => "bool",
            OptionKind::Enum => "enum",
            OptionKind::Anything => "anything",
            OptionKind::Special => "special",
            OptionKind::List => "list",
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.typename())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListItemKind {
    Enum,
    Anything,
}

impl ListItemKind {
    pub fn typename(self) -> &'static str {
        match self {
            ListItemKind::Enum => "enum",
            ListItemKind::Anything => "anything",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialKind {
    Results,
    Language,
}

impl SpecialKind {
    pub fn name(self) -> &'static str {
        match self {
            SpecialKind::Results => "results",
            SpecialKind::Language => "language",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariableKind {
    Bool {
        default: bool,
    },
    Enum {
        default: String,
        values: Vec<String>,
    },
    List {
        item: ListItemKind,
        defaults: Vec<String>,
        values: Vec<String>,
    },
    Anything {
        default: String,
    },
    Special(SpecialKind),
}

impl VariableKind {
    pub fn option_kind(&self) -> OptionKind {
        match self {
            VariableKind::Bool { .. } => OptionKind::Bool,
            VariableKind::Enum { .. } => OptionKind::Enum,
            VariableKind::List { .. } => OptionKind::List,
            VariableKind::Anything { .. } => OptionKind::Anything,
            VariableKind::Special(_) => OptionKind::Special,
        }
    }

    /// Position of this kind's group in generated code: bools, enums, lists, anythings, specials.
    pub fn group_rank(&self) -> u8 {
        match self {
            VariableKind::Bool { .. } => 0,
            VariableKind::Enum { .. } => 1,
            VariableKind::List { .. } => 2,
            VariableKind::Anything { .. } => 3,
            VariableKind::Special(_) => 4,
        }
    }

    /// Values an argument is checked against, if the kind constrains them.
    pub fn allowed_values(&self) -> Option<&[String]> {
        match self {
            VariableKind::Enum { values, .. } => Some(values),
            VariableKind::List {
                item: ListItemKind::Enum,
                values,
                ..
            } => Some(values),
            _ => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, VariableKind::List { .. })
    }
}

/// A storage-backed option: it owns a shell variable in the generated elvis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub kind: VariableKind,
    pub metavar: String,
    pub description: String,
    /// Names of aliases targeting this variable, in definition order.
    pub aliases: Vec<String>,
    /// Names of flags targeting this variable, in definition order.
    pub flags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    Bool(bool),
    Scalar(String),
    List(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    pub name: String,
    pub target: String,
    pub value: FlagValue,
    pub description: String,
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    pub name: String,
    pub target: String,
    pub kind: OptionKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    pub variable: String,
    pub parameter: String,
    pub url_encode: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineMapping {
    pub variable: String,
    pub keyword: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollapseBranch {
    pub inputs: Vec<String>,
    pub output: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collapse {
    pub variable: String,
    pub branches: Vec<CollapseBranch>,
}

/// A fully resolved, validated elvis. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Elvis {
    pub name: String,
    pub description: String,
    pub base_url: String,
    pub search_url: String,
    pub num_tabs: usize,
    pub query_parameter: Option<String>,
    pub append_search_args: bool,
    pub completion_hooks: bool,

    /// Variables in definition order. Use `variables_in_declaration_order` when rendering.
    pub variables: Vec<Variable>,
    pub flags: Vec<Flag>,
    pub aliases: Vec<Alias>,

    pub mappings: Vec<Mapping>,
    pub list_mappings: Vec<Mapping>,
    pub inlines: Vec<InlineMapping>,
    pub list_inlines: Vec<InlineMapping>,
    pub collapses: Vec<Collapse>,
}

impl Elvis {
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }

    pub fn flag(&self, name: &str) -> Option<&Flag> {
        self.flags.iter().find(|f| f.name == name)
    }

    /// Variables grouped by kind (bools, enums, lists, anythings, specials),
    /// keeping definition order inside each group.
    pub fn variables_in_declaration_order(&self) -> Vec<&Variable> {
        let mut ordered: Vec<&Variable> = self.variables.iter().collect();
        // `sort_by_key` is stable.
        ordered.sort_by_key(|v| v.kind.group_rank());
        ordered
    }

    pub fn has_lists(&self) -> bool {
        self.variables.iter().any(|v| v.kind.is_list())
    }

    pub fn has_mappings(&self) -> bool {
        !self.mappings.is_empty() || !self.list_mappings.is_empty()
    }

    pub fn has_inlines(&self) -> bool {
        !self.inlines.is_empty() || !self.list_inlines.is_empty()
    }
}
