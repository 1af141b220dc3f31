//! Record encoding and decoding
//!
//! Thin wrappers over serde that move records in and out of the [`FieldMap`]
//! representation, plus the YAML and XML text encoders. These are the only
//! places that touch a caller's typed record.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::FieldMap;
use crate::error::SerializationError;

/// Indentation used for XML output
const XML_INDENT: usize = 2;

/// Encode a record into a field mapping
///
/// Fails if serde cannot encode the record, or if the record is not
/// shaped like a mapping (a bare number, string, or sequence).
pub fn encode<T: Serialize + ?Sized>(record: &T) -> Result<FieldMap, SerializationError> {
    let value = serde_json::to_value(record)
        .map_err(|e| SerializationError::new(format!("failed to serialize struct: {}", e)))?;

    match value {
        Value::Object(map) => {
            debug!(fields = map.len(), "encode: record encoded");
            Ok(map)
        }
        other => Err(SerializationError::new(format!(
            "record did not encode to a mapping (got {})",
            kind_of(&other)
        ))),
    }
}

/// Decode a field mapping into a typed record
pub fn decode<T: DeserializeOwned>(map: &FieldMap) -> Result<T, SerializationError> {
    debug!(fields = map.len(), "decode: called");
    serde_json::from_value(Value::Object(map.clone()))
        .map_err(|e| SerializationError::new(format!("failed to deserialize map to struct: {}", e)))
}

/// Encode a record as YAML
pub fn encode_yaml<T: Serialize + ?Sized>(record: &T) -> Result<String, SerializationError> {
    serde_yaml::to_string(record).map_err(|e| SerializationError::new(format!("failed to serialize to YAML: {}", e)))
}

/// Encode a record as indented XML, with the root element named after the type
pub fn encode_xml<T: Serialize + ?Sized>(record: &T) -> Result<String, SerializationError> {
    let mut buffer = String::new();
    let mut ser = quick_xml::se::Serializer::new(&mut buffer);
    ser.indent(' ', XML_INDENT);
    record
        .serialize(ser)
        .map_err(|e| SerializationError::new(format!("failed to serialize to XML: {}", e)))?;
    Ok(buffer)
}

/// Encode a record as indented XML under an explicit root element
///
/// Needed for dynamically-typed records such as `serde_json::Value`, which
/// have no type name to use as the root.
pub fn encode_xml_with_root<T: Serialize + ?Sized>(record: &T, root: &str) -> Result<String, SerializationError> {
    let mut buffer = String::new();
    let mut ser = quick_xml::se::Serializer::with_root(&mut buffer, Some(root))
        .map_err(|e| SerializationError::new(format!("invalid XML root '{}': {}", root, e)))?;
    ser.indent(' ', XML_INDENT);
    record
        .serialize(ser)
        .map_err(|e| SerializationError::new(format!("failed to serialize to XML: {}", e)))?;
    Ok(buffer)
}

/// Human-readable name of a value's variant
pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}
