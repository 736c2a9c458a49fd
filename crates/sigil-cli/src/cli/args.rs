//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` so commands compose the same
//! definitions.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Script file, or `-` for stdin (positional).
pub fn script_path_arg() -> Arg {
    Arg::new("script_path")
        .value_name("SCRIPT")
        .value_parser(value_parser!(PathBuf))
        .conflicts_with("script_text")
        .help("Script file (use - for stdin)")
}

/// Inline script text (-e/--eval).
pub fn script_text_arg() -> Arg {
    Arg::new("script_text")
        .short('e')
        .long("eval")
        .value_name("TEXT")
        .help("Inline script text")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Machine-readable output (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print the watch log and registry as JSON")
}

/// Realm trace verbosity (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Print realm operations to stderr (-vv adds raw handles)")
}

/// Execution fuel limit (--fuel).
pub fn fuel_arg() -> Arg {
    Arg::new("fuel")
        .long("fuel")
        .value_name("N")
        .default_value("1000000")
        .value_parser(value_parser!(u32))
        .help("Execution fuel limit")
}

/// Nesting limit for parsing and evaluation (--max-depth).
pub fn max_depth_arg() -> Arg {
    Arg::new("max_depth")
        .long("max-depth")
        .value_name("N")
        .default_value("256")
        .value_parser(value_parser!(u32))
        .help("Maximum nesting depth")
}

/// Treat warnings as errors (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Treat warnings as errors")
}
