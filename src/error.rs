//! Failure taxonomy for configuration resolution.

use crate::coerce::CastKind;
use crate::value::RuntimeType;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by [`ResolverBuilder::resolve`](crate::ResolverBuilder::resolve).
///
/// Resolution is all-or-nothing: any variant here means no resolver was
/// constructed and no partial snapshot exists. A missing config file is not
/// an error; it is an empty file layer.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The declared type is incompatible with the merged value's runtime type.
    #[error("can not cast \"{observed}\" type to \"{declared}\" type")]
    TypeCast {
        key: String,
        observed: RuntimeType,
        declared: CastKind,
    },

    /// A numeric cast was declared but the string has no numeric prefix.
    #[error("can not parse \"{value}\" as {declared} for key \"{key}\"")]
    NumberParse {
        key: String,
        value: String,
        declared: CastKind,
    },

    /// The config file exists but could not be read.
    #[error("failed to read config file {}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file content is not valid JSON/YAML.
    #[error("failed to parse config file {}: {message}", path.display())]
    FileParse { path: PathBuf, message: String },
}
