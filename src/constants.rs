// src/constants.rs

/// Prefix shared by every variable surfraw exposes to elvi.
pub const NAMESPACE_PREFIX: &str = "SURFRAW";

/// Separator used to store list options in a single shell variable.
pub const LIST_SEPARATOR: char = ',';

/// Default number of tabs between the elvis name and its description in `sr -elvi`.
pub const DEFAULT_NUM_TABS: usize = 1;

/// Identifies the generator in the header of every generated file.
pub const GENERATOR_SIGNATURE: &str = concat!("mkelvis ", env!("CARGO_PKG_VERSION"));

/// Global surfraw options. Elvi may not define options with these names.
pub const FORBIDDEN_OPTION_NAMES: &[&str] = &[
    "browser",
    "elvi",
    "g",
    "graphical",
    "h",
    "help",
    "lh",
    "p",
    "print",
    "o",
    "new",
    "ns",
    "newscreen",
    "t",
    "text",
    "q",
    "quote",
    "version",
    "bookmark-search-elvis",
    "custom-search",
    "escape-url-args",
    "local-help",
];

pub const TRUE_WORDS: &[&str] = &["yes"];
pub const FALSE_WORDS: &[&str] = &["no"];

/// Default of the `results` special option.
pub const RESULTS_DEFAULT: &str = "$SURFRAW_results";

/// Default of the `language` special option. English when `SURFRAW_lang` is unset.
pub const LANGUAGE_DEFAULT: &str = "${SURFRAW_lang:=en}";

// sysexits.h
pub const EX_USAGE: i32 = 64;
pub const EX_SOFTWARE: i32 = 70;
pub const EX_CANTCREAT: i32 = 73;
