//! Show the syntax tree of a script.

use sigil_lib::Script;

use super::script_loader::{ScriptInput, load_or_exit};

pub struct AstArgs {
    pub input: ScriptInput,
    pub color: bool,
}

pub fn run(args: AstArgs) {
    let source = load_or_exit(&args.input);

    let script = match Script::parse(&source) {
        Ok(script) => script,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    // The tree is printed even for invalid scripts; recovery keeps what parsed.
    println!("{}", script.dump_ast());

    if !script.diagnostics().is_empty() {
        eprint!(
            "{}",
            script.diagnostics().render_colored(&source, args.color)
        );
    }
    if !script.is_valid() {
        std::process::exit(1);
    }
}
