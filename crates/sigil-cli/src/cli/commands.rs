//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("sigil")
        .about("Unique identifiers and a global registry, explored through watch scripts")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(run_command())
        .subcommand(check_command())
        .subcommand(ast_command())
}

/// Evaluate a script and print the watch log.
pub fn run_command() -> Command {
    Command::new("run")
        .about("Evaluate a script and print the watch log")
        .override_usage(
            "\
  sigil run <SCRIPT>
  sigil run -e <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  sigil run demo.sigil                     # watch log
  sigil run demo.sigil --json              # watches, error, and registry as JSON
  sigil run demo.sigil -v                  # also trace realm operations
  sigil run -e 'Identifier.for("app");'    # inline script
  cat demo.sigil | sigil run -             # from stdin"#,
        )
        .arg(script_path_arg())
        .arg(script_text_arg())
        .arg(json_arg())
        .arg(verbose_arg())
        .arg(fuel_arg())
        .arg(max_depth_arg())
        .arg(color_arg())
}

/// Parse a script and report diagnostics without running it.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Check a script for errors")
        .override_usage(
            "\
  sigil check <SCRIPT>
  sigil check -e <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  sigil check demo.sigil              # silent on success
  sigil check demo.sigil --strict     # warnings fail the check
  sigil check -e 'var x = ;'          # inline script"#,
        )
        .arg(script_path_arg())
        .arg(script_text_arg())
        .arg(strict_arg())
        .arg(max_depth_arg())
        .arg(color_arg())
}

/// Print the syntax tree of a script.
pub fn ast_command() -> Command {
    Command::new("ast")
        .about("Show the syntax tree of a script")
        .override_usage(
            "\
  sigil ast <SCRIPT>
  sigil ast -e <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  sigil ast demo.sigil
  sigil ast -e 'new Identifier;'"#,
        )
        .arg(script_path_arg())
        .arg(script_text_arg())
        .arg(color_arg())
}
