//! Error taxonomy for a generation run.
//!
//! Nothing here is recovered from: the driver stops at the first error and
//! hands it to the CLI, which reports it and exits non-zero.
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum GenError {
    /// The scan directory is missing or could not be listed.
    #[error("cannot scan {}: {message}", .dir.display())]
    Scan { dir: PathBuf, message: String },

    #[error("invalid scan pattern `{pattern}`")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// The module file could not be read.
    #[error("failed to load module {}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The module file was read but is not a usable manifest.
    #[error("invalid module {}: {message}", .path.display())]
    InvalidModule { path: PathBuf, message: String },

    /// A declaration cannot be rendered.
    #[error("{}", describe_metadata(.type_name, .member, .message))]
    Metadata {
        type_name: String,
        member: Option<String>,
        message: String,
    },

    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenError {
    pub(crate) fn metadata(type_name: &str, member: Option<&str>, message: impl Into<String>) -> Self {
        GenError::Metadata {
            type_name: type_name.to_string(),
            member: member.map(str::to_string),
            message: message.into(),
        }
    }
}

fn describe_metadata(type_name: &str, member: &Option<String>, message: &str) -> String {
    match member {
        Some(member) => format!("type `{type_name}`, member `{member}`: {message}"),
        None => format!("type `{type_name}`: {message}"),
    }
}
