//! Layered resolution: defaults, file content, environment overrides.
//!
//! Layers apply lowest to highest precedence onto a single accumulator, then
//! the type mapping coerces the merged result. Everything happens once,
//! synchronously, inside [`ResolverBuilder::resolve`].

use crate::coerce::{CastKind, coerce};
use crate::error::ConfigError;
use crate::flatten::flatten;
use crate::value::Value;
use serde_json::Value as Json;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Caller-supplied transform applied to raw nested file content before
/// flattening. Runs on the nested shape, so it can restructure sub-objects
/// (e.g. collapse a `{host, port}` object into a single scalar) before the
/// flattener sees them.
pub type CompatTransform = Box<dyn FnOnce(Json) -> Json>;

/// Builder for a [`Resolver`].
///
/// All inputs are optional; an empty builder resolves to an empty snapshot.
/// The file layer can come from disk ([`file`](Self::file)) or be handed in
/// already loaded ([`nested`](Self::nested)); when both are set the in-memory
/// content wins and the path is never touched.
#[derive(Default)]
pub struct ResolverBuilder {
    defaults: HashMap<String, Value>,
    file: Option<PathBuf>,
    nested: Option<Json>,
    env: HashMap<String, String>,
    env_prefix: String,
    compat: Option<CompatTransform>,
    types: HashMap<String, CastKind>,
}

impl ResolverBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lowest-precedence layer: these keys survive unless a file or
    /// environment entry overwrites them.
    pub fn defaults(mut self, defaults: HashMap<String, Value>) -> Self {
        self.defaults = defaults;
        self
    }

    /// File layer read from disk at resolve time. A missing file is an empty
    /// layer, not an error; `.yaml`/`.yml` parse as YAML, anything else as JSON.
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// File layer supplied directly as already-loaded nested content.
    pub fn nested(mut self, content: Json) -> Self {
        self.nested = Some(content);
        self
    }

    /// Highest-precedence layer: a snapshot of environment variables.
    pub fn env(mut self, snapshot: HashMap<String, String>) -> Self {
        self.env = snapshot;
        self
    }

    /// Snapshot the live process environment as the override layer.
    pub fn env_from_process(self) -> Self {
        self.env(std::env::vars().collect())
    }

    /// Only environment entries starting with this prefix apply (case
    /// sensitive). The prefix is stripped and the remainder lowercased to
    /// form the flat key. An empty prefix matches every entry.
    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Backward-compatibility transform for legacy file shapes, run on the
    /// raw nested content before flattening.
    pub fn compat(mut self, transform: impl FnOnce(Json) -> Json + 'static) -> Self {
        self.compat = Some(Box::new(transform));
        self
    }

    /// Declared types, coerced after the merge. Keys absent from the merged
    /// result are skipped.
    pub fn types(mut self, mapping: HashMap<String, CastKind>) -> Self {
        self.types = mapping;
        self
    }

    /// Merge all layers and apply type coercion.
    ///
    /// Any coercion failure aborts the whole resolution; there is no partial
    /// result.
    pub fn resolve(self) -> Result<Resolver, ConfigError> {
        let mut merged = self.defaults;

        let nested = match (self.nested, self.file.as_deref()) {
            (Some(content), _) => Some(content),
            (None, Some(path)) => load_file(path)?,
            (None, None) => None,
        };
        if let Some(raw) = nested {
            let raw = match self.compat {
                Some(transform) => transform(raw),
                None => raw,
            };
            let file_layer = flatten(&raw);
            debug!(keys = file_layer.len(), "applying file layer");
            merged.extend(file_layer);
        }

        for (name, raw) in &self.env {
            if let Some(rest) = name.strip_prefix(&self.env_prefix) {
                merged.insert(rest.to_lowercase(), Value::Str(raw.clone()));
            }
        }

        for (key, declared) in &self.types {
            if let Some(value) = merged.remove(key) {
                merged.insert(key.clone(), coerce(key, value, *declared)?);
            }
        }

        debug!(keys = merged.len(), "configuration resolved");
        Ok(Resolver { values: merged })
    }
}

fn load_file(path: &Path) -> Result<Option<Json>, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "config file not found, skipping file layer");
            return Ok(None);
        }
        Err(source) => {
            return Err(ConfigError::FileRead {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml" | "yml")
    );
    let parsed = if is_yaml {
        serde_yaml::from_str::<Json>(&text).map_err(|err| ConfigError::FileParse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?
    } else {
        serde_json::from_str::<Json>(&text).map_err(|err| ConfigError::FileParse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?
    };
    Ok(Some(parsed))
}

/// An immutable resolved configuration snapshot.
///
/// Construction runs merge and coercion to completion or failure; afterwards
/// the snapshot never changes, so it can be shared and read concurrently
/// without locking.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolver {
    values: HashMap<String, Value>,
}

impl Resolver {
    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::new()
    }

    /// Look up a single key. Absent keys return `None`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Read-only view of the whole snapshot.
    pub fn values(&self) -> &HashMap<String, Value> {
        &self.values
    }
}
