//! fieldshape - field-level shaping for serde records
//!
//! Converts typed records into generic key/value maps (and back), exposing a
//! subset or reshaped view of a record without per-endpoint mapping code.
//!
//! # Pipeline
//!
//! `Serializer::serialize` encodes a record, then applies, in order:
//!
//! 1. **Transformations** - per-field value rewrites
//! 2. **Conditional fields** - drop a field unless its predicate holds
//! 3. **Allowlist** - keep exactly the listed fields; listed but absent ones become null
//!
//! Validation is a separate, fail-fast pass via `Serializer::validate`.
//!
//! # Modules
//!
//! - [`shaper`] - Pipeline and its configuration
//! - [`validators`] - Built-in validators and the validator trait
//! - [`transforms`] - Built-in transformations
//! - [`codec`] - Record encoding/decoding, YAML and XML output
//! - [`profile`] - Declarative profiles for config files
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface
//!
//! # Example
//!
//! ```
//! use fieldshape::{ShapeConfig, Serializer, validators};
//! use serde::Serialize;
//! use serde_json::json;
//!
//! #[derive(Serialize)]
//! struct User { id: u64, name: String, role: String }
//!
//! let serializer = Serializer::new(
//!     ShapeConfig::new()
//!         .transform("name", |v| v.as_str().map(|s| json!(s.to_uppercase())))
//!         .fields(["id", "name"])
//!         .validate_with("name", validators::not_empty),
//! );
//!
//! let user = User { id: 1, name: "alice".into(), role: "user".into() };
//! let out = serializer.serialize(&user).unwrap();
//! assert_eq!(serde_json::Value::Object(out), json!({"id": 1, "name": "ALICE"}));
//! ```

pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod profile;
pub mod shaper;
pub mod transforms;
pub mod validators;

/// Field name to dynamically-typed value
pub type FieldMap = serde_json::Map<String, serde_json::Value>;

// Re-export commonly used types
pub use config::{Config, OutputFormat};
pub use error::{SerializationError, ShapeError, TransformationError, ValidationError};
pub use profile::{ConditionSpec, NamedValidator, ProfileSpec, TransformKind, ValidatorSpec};
pub use shaper::{Condition, Serializer, ShapeConfig, Transform, ValidatorChain};
pub use validators::{FieldValidator, StringField};
