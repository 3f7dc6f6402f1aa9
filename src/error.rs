use std::fmt;
use std::path::Path;

pub type Result<T> = std::result::Result<T, ProbeError>;

#[derive(Debug)]
pub enum ProbeError {
    /// Input file does not exist
    NotFound { path: String },

    /// Input file exists but could not be read
    ReadFile { path: String, source: std::io::Error },

    /// Debug dump could not be read from stdin
    ReadStdin(std::io::Error),

    /// Top-level JSON decode failed
    InvalidJson { path: String, source: serde_json::Error },

    /// Comparison output could not be serialized
    JsonSerialize { context: String, source: serde_json::Error },

    /// Comparison output could not be written
    WriteFile { path: String, source: std::io::Error },
}

impl ProbeError {
    /// Classify an I/O failure on `path`, separating "missing" from other errors.
    pub fn read(path: &Path, source: std::io::Error) -> Self {
        let path = path.display().to_string();
        if source.kind() == std::io::ErrorKind::NotFound {
            ProbeError::NotFound { path }
        } else {
            ProbeError::ReadFile { path, source }
        }
    }
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeError::NotFound { path } => {
                write!(f, "File '{}' not found", path)
            }
            ProbeError::ReadFile { path, source } => {
                write!(f, "Could not read '{}': {}", path, source)
            }
            ProbeError::ReadStdin(source) => {
                write!(f, "Could not read debug output from stdin: {}", source)
            }
            ProbeError::InvalidJson { path, source } => {
                write!(f, "Invalid JSON file '{}': {}", path, source)
            }
            ProbeError::JsonSerialize { context, source } => {
                write!(f, "JSON serialize error ({}): {}", context, source)
            }
            ProbeError::WriteFile { path, source } => {
                write!(f, "Could not write '{}': {}", path, source)
            }
        }
    }
}

impl std::error::Error for ProbeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProbeError::ReadFile { source, .. } => Some(source),
            ProbeError::ReadStdin(source) => Some(source),
            ProbeError::InvalidJson { source, .. } => Some(source),
            ProbeError::JsonSerialize { source, .. } => Some(source),
            ProbeError::WriteFile { source, .. } => Some(source),
            ProbeError::NotFound { .. } => None,
        }
    }
}
