use sigil_lib::{FuelLimits, Script};

use super::script_loader::{ScriptInput, load_or_exit};

pub struct CheckArgs {
    pub input: ScriptInput,
    pub strict: bool,
    pub limits: FuelLimits,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let source = load_or_exit(&args.input);

    if source.trim().is_empty() {
        eprintln!("error: script cannot be empty");
        std::process::exit(1);
    }

    let script = match Script::parse_with(&source, args.limits) {
        Ok(script) => script,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    if !passes(&script, args.strict) {
        eprint!(
            "{}",
            script.diagnostics().render_colored(&source, args.color)
        );
        std::process::exit(1);
    }

    // Silent on success, warnings included unless --strict.
}

pub fn passes(script: &Script<'_>, strict: bool) -> bool {
    if strict {
        script.diagnostics().is_empty()
    } else {
        script.is_valid()
    }
}
