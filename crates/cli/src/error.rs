//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: pipeline error (unknown generator, sampling failure, bad dimensions)
//! - 11: I/O error (background load, GIF/PNG write)
//! - 12: input error (bad colormap, bad JSON params, bad flag values)
//! - 13: serialization error

use aurora_core::AuroraError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
pub enum CliError {
    /// A pipeline-level error (unknown generator, sampling failure, bad
    /// dimensions).
    Pipeline(AuroraError),
    /// An I/O error (background load, GIF or PNG write).
    Io(String),
    /// A user input error (bad colormap name, bad JSON params).
    Input(String),
    /// A serialization error (JSON output failure).
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Pipeline(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Pipeline(e) => write!(f, "{e}"),
            CliError::Io(msg) => write!(f, "{msg}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<AuroraError> for CliError {
    fn from(e: AuroraError) -> Self {
        match e {
            AuroraError::Io(msg) => CliError::Io(msg),
            AuroraError::UnknownColormap(name) => {
                CliError::Input(format!("unknown colormap: {name}"))
            }
            other => CliError::Pipeline(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_error_exit_code_is_10() {
        let err = CliError::Pipeline(AuroraError::UnknownGenerator("foo".into()));
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn io_error_exit_code_is_11() {
        let err = CliError::Io("write failed".into());
        assert_eq!(err.exit_code(), 11);
    }

    #[test]
    fn input_error_exit_code_is_12() {
        let err = CliError::Input("bad colormap".into());
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn serialization_error_exit_code_is_13() {
        let err = CliError::Serialization("json fail".into());
        assert_eq!(err.exit_code(), 13);
    }

    #[test]
    fn from_aurora_io_routes_to_cli_io() {
        let err = CliError::from(AuroraError::Io("disk full".into()));
        assert_eq!(err.exit_code(), 11);
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn from_aurora_unknown_colormap_routes_to_input() {
        let err = CliError::from(AuroraError::UnknownColormap("jet".into()));
        assert_eq!(err.exit_code(), 12);
        assert!(err.to_string().contains("jet"));
    }

    #[test]
    fn from_aurora_non_io_routes_to_pipeline() {
        let err = CliError::from(AuroraError::UnknownGenerator("xyz".into()));
        assert_eq!(err.exit_code(), 10);
        assert!(err.to_string().contains("xyz"));
    }

    #[test]
    fn from_serde_json_error_routes_to_serialization() {
        let bad_json = serde_json::from_str::<serde_json::Value>("{invalid");
        let err = CliError::from(bad_json.unwrap_err());
        assert_eq!(err.exit_code(), 13);
    }
}
