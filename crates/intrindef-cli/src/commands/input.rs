//! Loading the declaration file named on the command line.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use intrindef_compiler::Session;

const STDIN_ORIGIN: &str = "<stdin>";
const INLINE_ORIGIN: &str = "<text>";

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("declaration file is required: use a positional argument or -e/--text")]
    Missing,

    #[error("failed to read {path}: {source}")]
    Read { path: String, source: io::Error },
}

/// Where the declarations come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Path(PathBuf),
    Stdin,
    Text(String),
    Missing,
}

impl Input {
    pub fn new(path: Option<PathBuf>, text: Option<String>) -> Self {
        match (text, path) {
            (Some(text), _) => Input::Text(text),
            (None, Some(path)) if path.as_os_str() == "-" => Input::Stdin,
            (None, Some(path)) => Input::Path(path),
            (None, None) => Input::Missing,
        }
    }

    /// Read the source text and the origin used to label positions.
    pub fn load(&self) -> Result<(String, String), InputError> {
        match self {
            Input::Text(text) => Ok((text.clone(), INLINE_ORIGIN.to_string())),
            Input::Stdin => {
                let mut buf = String::new();
                io::stdin()
                    .read_to_string(&mut buf)
                    .map_err(|source| InputError::Read {
                        path: STDIN_ORIGIN.to_string(),
                        source,
                    })?;
                Ok((buf, STDIN_ORIGIN.to_string()))
            }
            Input::Path(path) => {
                let origin = path.display().to_string();
                let text = fs::read_to_string(path).map_err(|source| InputError::Read {
                    path: origin.clone(),
                    source,
                })?;
                Ok((text, origin))
            }
            Input::Missing => Err(InputError::Missing),
        }
    }
}

/// Load and resolve the input, exiting with a rendered diagnostic on failure.
pub fn open_session(input: &Input, color: bool) -> Session {
    let (source, origin) = input.load().unwrap_or_else(|e| fail(&e.to_string()));

    tracing::debug!(%origin, bytes = source.len(), "loaded declarations");

    Session::new(source.as_str(), origin).unwrap_or_else(|e| {
        eprintln!("{}", e.render(&source, color));
        std::process::exit(1);
    })
}

pub fn fail(msg: &str) -> ! {
    eprintln!("error: {}", msg);
    std::process::exit(1);
}
