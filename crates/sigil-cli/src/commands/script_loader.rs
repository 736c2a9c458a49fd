use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("script is required: use positional argument or -e/--eval")]
    Missing,

    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),

    #[error("failed to read '{}': {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Where the script text comes from: inline text, a file, or stdin (`-`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptInput {
    pub path: Option<PathBuf>,
    pub text: Option<String>,
}

impl ScriptInput {
    pub fn new(path: Option<PathBuf>, text: Option<String>) -> Self {
        Self { path, text }
    }

    pub fn load(&self) -> Result<String, LoadError> {
        if let Some(text) = &self.text {
            return Ok(text.clone());
        }

        match self.path.as_deref() {
            Some(path) if path.as_os_str() == "-" => load_stdin(),
            Some(path) => load_file(path),
            None => Err(LoadError::Missing),
        }
    }
}

/// Load the script or exit with `error: ...`.
pub fn load_or_exit(input: &ScriptInput) -> String {
    match input.load() {
        Ok(source) => source,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}

fn load_stdin() -> Result<String, LoadError> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(LoadError::Stdin)?;
    Ok(buf)
}

fn load_file(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::File {
        path: path.to_path_buf(),
        source,
    })
}
