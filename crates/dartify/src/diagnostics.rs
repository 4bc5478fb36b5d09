//! Error types
//!
//! Every fatal condition of a run is a `DartifyError`. Unresolvable type
//! references and duplicate members are not errors; the emitters degrade or
//! skip them silently.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for dartify operations
pub type DartifyResult<T> = Result<T, DartifyError>;

/// Main error type for dartify
#[derive(Debug, Error)]
pub enum DartifyError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TypeScript parse error
    #[error("TypeScript parse error in {file}: {message}")]
    TypeScriptParse { file: PathBuf, message: String },

    /// Invalid path
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file could not be parsed
    #[error("Invalid configuration file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The input tree holds no declaration files
    #[error("No .d.ts files found in {}", .0.display())]
    NoDeclarationFiles(PathBuf),
}

impl DartifyError {
    /// Create a parse error
    pub fn parse(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        DartifyError::TypeScriptParse {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        DartifyError::Config(message.into())
    }

    /// Whether this is the "nothing to do" precondition failure
    pub fn is_no_input(&self) -> bool {
        matches!(self, DartifyError::NoDeclarationFiles(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_mentions_file() {
        let err = DartifyError::parse("types/control.d.ts", "unexpected token");
        assert!(err.to_string().contains("types/control.d.ts"));
        assert!(err.to_string().contains("unexpected token"));
    }

    #[test]
    fn test_no_input_error() {
        let err = DartifyError::NoDeclarationFiles(PathBuf::from("input"));
        assert!(err.is_no_input());
        assert_eq!(err.to_string(), "No .d.ts files found in input");
        assert!(!DartifyError::config("missing output_dir").is_no_input());
    }
}
