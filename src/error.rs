//! Error types for the merge engine.
//!
//! Every failure is terminal for the current invocation, nothing is retried.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Host platform or an external program is missing.
    #[error("{requirement}\n\n{hint}")]
    RequirementUnmet { requirement: String, hint: String },

    /// An input file could not be stat'd.
    #[error("failed to stat input file {}: {source}", path.display())]
    StatFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// None of the inputs reported a birth time.
    #[error("failed to get oldest creation time, no input file reports a birth time")]
    MissingCreationTime,

    #[error("invalid file format: {}", .0.display())]
    InvalidFilenameFormat(PathBuf),

    /// Nothing to merge
    #[error("no input files given")]
    NoInputs,

    #[error("duplicate file detected: {}. Please remove duplicates and try again", .0.display())]
    DuplicateInput(PathBuf),

    /// External program could not be started or exited unsuccessfully.
    #[error("{tool} command failed: {reason}{}", fmt_diagnostics(.diagnostics))]
    ExternalToolFailure {
        tool: String,
        reason: String,
        diagnostics: String,
    },

    #[error("failed to set file times for {}: {reason}", path.display())]
    TimestampApplyFailure { path: PathBuf, reason: String },

    #[error("failed to {action}: {source}")]
    Io {
        action: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to render merge plan: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn io(action: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            action: action.into(),
            source,
        }
    }

    pub fn requirement(requirement: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::RequirementUnmet {
            requirement: requirement.into(),
            hint: hint.into(),
        }
    }

    pub fn tool(tool: impl Into<String>, reason: impl Into<String>, diagnostics: impl Into<String>) -> Self {
        Self::ExternalToolFailure {
            tool: tool.into(),
            reason: reason.into(),
            diagnostics: diagnostics.into(),
        }
    }

    /// Short name of the error class, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Error::RequirementUnmet { .. } => "RequirementUnmet",
            Error::StatFailure { .. } => "StatFailure",
            Error::MissingCreationTime => "MissingCreationTime",
            Error::InvalidFilenameFormat(_) => "InvalidFilenameFormat",
            Error::NoInputs => "NoInputs",
            Error::DuplicateInput(_) => "DuplicateInput",
            Error::ExternalToolFailure { .. } => "ExternalToolFailure",
            Error::TimestampApplyFailure { .. } => "TimestampApplyFailure",
            Error::Io { .. } => "Io",
            Error::Json(_) => "Json",
        }
    }
}

fn fmt_diagnostics(diagnostics: &str) -> String {
    let trimmed = diagnostics.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("\n{}", trimmed)
    }
}
