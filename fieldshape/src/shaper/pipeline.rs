//! The shaping pipeline
//!
//! `serialize` runs four stages over a freshly encoded mapping:
//!
//! ```text
//! record -> encode -> transform -> conditional inclusion -> allowlist -> FieldMap
//! ```
//!
//! Conditions see every field that survived transformation, including ones
//! the allowlist is about to drop. `validate` is a separate, fail-fast pass
//! over a mapping and never runs as part of `serialize`.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::options::ShapeConfig;
use crate::FieldMap;
use crate::codec;
use crate::error::{SerializationError, ShapeError, TransformationError, ValidationError};

/// Shapes records according to a [`ShapeConfig`]
///
/// Holds no state besides the configuration, so one instance can serve any
/// number of calls, concurrently included.
#[derive(Debug, Default)]
pub struct Serializer {
    config: ShapeConfig,
}

impl Serializer {
    pub fn new(config: ShapeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ShapeConfig {
        &self.config
    }

    /// Encode a record and shape the resulting mapping
    pub fn serialize<T: Serialize + ?Sized>(&self, record: &T) -> Result<FieldMap, ShapeError> {
        let map = codec::encode(record)?;
        self.apply(map)
    }

    /// Shape an already-encoded mapping
    pub fn apply(&self, mut map: FieldMap) -> Result<FieldMap, ShapeError> {
        debug!(fields = map.len(), "Serializer::apply: called");
        self.apply_transformations(&mut map)?;
        self.apply_conditions(&mut map);
        Ok(self.apply_allowlist(map))
    }

    /// Decode a mapping into a typed record
    pub fn deserialize<T: DeserializeOwned>(&self, map: &FieldMap) -> Result<T, SerializationError> {
        codec::decode(map)
    }

    /// Check the mapping against the configured validator chains
    ///
    /// Returns the first failure: a listed field that is absent, or the first
    /// validator in a chain that rejects its field's value.
    pub fn validate(&self, data: &FieldMap) -> Result<(), ValidationError> {
        let Some(validations) = &self.config.validations else {
            debug!("Serializer::validate: no validations configured");
            return Ok(());
        };

        for (field, chain) in validations {
            let Some(value) = data.get(field) else {
                debug!(%field, "Serializer::validate: field missing");
                return Err(ValidationError::missing(field.as_str()));
            };

            for validator in chain {
                if let Err(message) = validator.validate(value) {
                    debug!(%field, %message, "Serializer::validate: validator rejected value");
                    return Err(ValidationError {
                        field: field.clone(),
                        value: Some(value.clone()),
                        message,
                    });
                }
            }
        }

        Ok(())
    }

    /// Encode a record straight to XML, bypassing the pipeline
    pub fn serialize_to_xml<T: Serialize + ?Sized>(&self, record: &T) -> Result<String, SerializationError> {
        codec::encode_xml(record)
    }

    /// Encode a record straight to YAML, bypassing the pipeline
    pub fn serialize_to_yaml<T: Serialize + ?Sized>(&self, record: &T) -> Result<String, SerializationError> {
        codec::encode_yaml(record)
    }

    fn apply_transformations(&self, map: &mut FieldMap) -> Result<(), TransformationError> {
        let Some(transformations) = &self.config.transformations else {
            return Ok(());
        };

        for (field, transform) in transformations {
            let Some(slot) = map.get_mut(field) else {
                continue;
            };

            match transform(&*slot) {
                Some(Value::Null) | None => {
                    return Err(TransformationError {
                        field: field.clone(),
                        value: slot.clone(),
                        message: "transformation returned nil".to_string(),
                    });
                }
                Some(new_value) => {
                    debug!(%field, "Serializer::apply_transformations: transformed");
                    *slot = new_value;
                }
            }
        }

        Ok(())
    }

    fn apply_conditions(&self, map: &mut FieldMap) {
        let Some(conditions) = &self.config.conditional_fields else {
            return;
        };

        // Decide against one snapshot so exclusions cannot influence each other
        let snapshot: &FieldMap = map;
        let excluded: Vec<&String> = conditions
            .iter()
            .filter(|(_, predicate)| !predicate(snapshot))
            .map(|(field, _)| field)
            .collect();

        for field in excluded {
            debug!(%field, "Serializer::apply_conditions: excluded");
            map.shift_remove(field);
        }
    }

    fn apply_allowlist(&self, mut map: FieldMap) -> FieldMap {
        let Some(fields) = self.config.allowlist() else {
            return map;
        };

        let mut filtered = FieldMap::new();
        for field in fields {
            if filtered.contains_key(field) {
                continue;
            }
            let value = map.remove(field).unwrap_or(Value::Null);
            filtered.insert(field.clone(), value);
        }
        filtered
    }
}
