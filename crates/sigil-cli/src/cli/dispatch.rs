//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! - `*Params` structs mirror command `*Args` but are populated from clap
//! - `Into<*Args>` impls resolve color choice and verbosity for the handlers

use std::path::PathBuf;

use clap::ArgMatches;
use sigil_core::Verbosity;
use sigil_lib::FuelLimits;
use sigil_lib::engine::{DEFAULT_EXEC_FUEL, DEFAULT_RECURSION_FUEL};

use super::ColorChoice;
use crate::commands::ast::AstArgs;
use crate::commands::check::CheckArgs;
use crate::commands::run::RunArgs;
use crate::commands::script_loader::ScriptInput;

pub struct RunParams {
    pub script_path: Option<PathBuf>,
    pub script_text: Option<String>,
    pub json: bool,
    pub verbose: u8,
    pub fuel: u32,
    pub max_depth: u32,
    pub color: ColorChoice,
}

impl RunParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            script_path: m.get_one::<PathBuf>("script_path").cloned(),
            script_text: m.get_one::<String>("script_text").cloned(),
            json: m.get_flag("json"),
            verbose: m.get_count("verbose"),
            fuel: m.get_one::<u32>("fuel").copied().unwrap_or(DEFAULT_EXEC_FUEL),
            max_depth: m
                .get_one::<u32>("max_depth")
                .copied()
                .unwrap_or(DEFAULT_RECURSION_FUEL),
            color: parse_color(m),
        }
    }
}

impl From<RunParams> for RunArgs {
    fn from(p: RunParams) -> Self {
        // Without -v the trace is not printed at all.
        let verbosity = (p.verbose > 0).then(|| Verbosity::from_count(p.verbose));

        Self {
            input: ScriptInput::new(p.script_path, p.script_text),
            json: p.json,
            verbosity,
            limits: FuelLimits::new()
                .with_exec_fuel(p.fuel)
                .with_recursion_limit(p.max_depth),
            color: p.color.should_colorize(),
        }
    }
}

pub struct CheckParams {
    pub script_path: Option<PathBuf>,
    pub script_text: Option<String>,
    pub strict: bool,
    pub max_depth: u32,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            script_path: m.get_one::<PathBuf>("script_path").cloned(),
            script_text: m.get_one::<String>("script_text").cloned(),
            strict: m.get_flag("strict"),
            max_depth: m
                .get_one::<u32>("max_depth")
                .copied()
                .unwrap_or(DEFAULT_RECURSION_FUEL),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            input: ScriptInput::new(p.script_path, p.script_text),
            strict: p.strict,
            limits: FuelLimits::new().with_recursion_limit(p.max_depth),
            color: p.color.should_colorize(),
        }
    }
}

pub struct AstParams {
    pub script_path: Option<PathBuf>,
    pub script_text: Option<String>,
    pub color: ColorChoice,
}

impl AstParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            script_path: m.get_one::<PathBuf>("script_path").cloned(),
            script_text: m.get_one::<String>("script_text").cloned(),
            color: parse_color(m),
        }
    }
}

impl From<AstParams> for AstArgs {
    fn from(p: AstParams) -> Self {
        Self {
            input: ScriptInput::new(p.script_path, p.script_text),
            color: p.color.should_colorize(),
        }
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
