use std::io::Write;
use std::path::PathBuf;

use super::script_loader::{LoadError, ScriptInput};

#[test]
fn inline_text_wins() {
    let input = ScriptInput::new(
        Some(PathBuf::from("ignored.sigil")),
        Some("1;".to_string()),
    );
    assert_eq!(input.load().unwrap(), "1;");
}

#[test]
fn reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "Identifier.for(\"app\");").unwrap();

    let input = ScriptInput::new(Some(file.path().to_path_buf()), None);
    assert_eq!(input.load().unwrap(), "Identifier.for(\"app\");");
}

#[test]
fn missing_file_names_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.sigil");

    let input = ScriptInput::new(Some(path.clone()), None);
    let err = input.load().unwrap_err();
    assert!(matches!(err, LoadError::File { .. }));
    assert!(
        err.to_string()
            .starts_with(&format!("failed to read '{}': ", path.display()))
    );
}

#[test]
fn no_input() {
    let err = ScriptInput::default().load().unwrap_err();
    insta::assert_snapshot!(err, @"script is required: use positional argument or -e/--eval");
}
