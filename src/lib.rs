//! Layered configuration resolution.
//!
//! Merges three layers into one flat key-value snapshot, lowest to highest
//! precedence:
//! 1. **Defaults** - flat map supplied by the caller
//! 2. **File** - nested JSON or YAML content, flattened to underscore-joined keys
//! 3. **Environment** - prefix-matched entries from a caller-supplied snapshot
//!
//! After the merge, an optional type mapping coerces values into their
//! declared types (`boolean`, `integer`, `double`, `array`, `try_integer`).
//! Resolution runs once, synchronously; the resulting snapshot is immutable
//! and safe to share across threads.
//!
//! ```
//! use flatcfg::{CastKind, Resolver, Value};
//! use std::collections::HashMap;
//!
//! let env = HashMap::from([("APP_SERVER_PORT".to_string(), "8080".to_string())]);
//! let types = HashMap::from([("server_port".to_string(), CastKind::Integer)]);
//! let config = Resolver::builder()
//!     .env(env)
//!     .env_prefix("APP_")
//!     .types(types)
//!     .resolve()?;
//! assert_eq!(config.get("server_port"), Some(&Value::Int(8080)));
//! # Ok::<(), flatcfg::ConfigError>(())
//! ```

mod coerce;
mod error;
mod flatten;
mod resolver;
mod value;

pub use coerce::CastKind;
pub use error::ConfigError;
pub use flatten::flatten;
pub use resolver::{CompatTransform, Resolver, ResolverBuilder};
pub use value::{RuntimeType, Value};
