//! Evaluate a script and print its watch log.

use serde::Serialize;
use sigil_core::{Colors, PrintTracer, Realm, Registry, Verbosity};
use sigil_lib::{Evaluation, FuelLimits, Script};

use super::script_loader::{ScriptInput, load_or_exit};

pub struct RunArgs {
    pub input: ScriptInput,
    pub json: bool,
    /// `None` keeps the realm trace off stderr.
    pub verbosity: Option<Verbosity>,
    pub limits: FuelLimits,
    pub color: bool,
}

/// `--json` output: the evaluation plus the registry it left behind.
#[derive(Serialize)]
pub struct RunReport<'a> {
    #[serde(flatten)]
    pub evaluation: &'a Evaluation,
    pub registry: &'a Registry,
}

pub fn run(args: RunArgs) {
    let source = load_or_exit(&args.input);

    let script = match Script::parse_with(&source, args.limits) {
        Ok(script) => script,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    // Warnings are printed but do not stop the run.
    if !script.diagnostics().is_empty() {
        eprint!(
            "{}",
            script.diagnostics().render_colored(&source, args.color)
        );
    }
    if !script.is_valid() {
        std::process::exit(1);
    }

    let mut realm = traced_realm(args.verbosity, args.color);
    let evaluation = match script.evaluate_in(&mut realm) {
        Ok(evaluation) => evaluation,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    if args.verbosity.is_some() {
        realm.tracer().print();
    }

    if args.json {
        match render_json(&evaluation, realm.registry()) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    } else if !evaluation.watches.is_empty() || !evaluation.is_ok() {
        println!("{}", evaluation.render());
    }

    if !evaluation.is_ok() {
        if !args.json {
            eprint!(
                "{}",
                evaluation.diagnostics().render_colored(&source, args.color)
            );
        }
        std::process::exit(1);
    }
}

pub fn traced_realm(verbosity: Option<Verbosity>, color: bool) -> Realm<PrintTracer> {
    let tracer = PrintTracer::new(verbosity.unwrap_or_default(), Colors::new(color));
    Realm::with_tracer(tracer)
}

pub fn render_json(
    evaluation: &Evaluation,
    registry: &Registry,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&RunReport {
        evaluation,
        registry,
    })
}
