//! Shaping configuration

use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use crate::FieldMap;
use crate::validators::FieldValidator;

/// Replaces a field's value; `None` means the transformation failed
pub type Transform = Box<dyn Fn(&Value) -> Option<Value> + Send + Sync>;

/// Decides from the whole mapping whether a field is kept
pub type Condition = Box<dyn Fn(&FieldMap) -> bool + Send + Sync>;

/// Ordered chain of validators for one field
pub type ValidatorChain = Vec<Box<dyn FieldValidator>>;

/// What to include, reshape, drop, and check
///
/// Every feature is off while its field is `None`. Keyed features iterate in
/// field-name order.
#[derive(Default)]
pub struct ShapeConfig {
    /// Allowlist of output fields, in output order
    pub fields: Option<Vec<String>>,

    /// Per-field value transformations
    pub transformations: Option<BTreeMap<String, Transform>>,

    /// Per-field inclusion predicates
    pub conditional_fields: Option<BTreeMap<String, Condition>>,

    /// Per-field validator chains, run by `validate`
    pub validations: Option<BTreeMap<String, ValidatorChain>>,
}

impl ShapeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict output to these fields, in this order
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Register a transformation, replacing any earlier one for the field
    pub fn transform<F>(mut self, field: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Value) -> Option<Value> + Send + Sync + 'static,
    {
        self.transformations
            .get_or_insert_with(BTreeMap::new)
            .insert(field.into(), Box::new(f));
        self
    }

    /// Keep `field` only while `predicate` holds for the mapping
    pub fn include_if<F>(mut self, field: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&FieldMap) -> bool + Send + Sync + 'static,
    {
        self.conditional_fields
            .get_or_insert_with(BTreeMap::new)
            .insert(field.into(), Box::new(predicate));
        self
    }

    /// Append a validator to the field's chain
    pub fn validate_with<V>(mut self, field: impl Into<String>, validator: V) -> Self
    where
        V: FieldValidator + 'static,
    {
        self.validations
            .get_or_insert_with(BTreeMap::new)
            .entry(field.into())
            .or_default()
            .push(Box::new(validator));
        self
    }

    /// Require the field to be present, with no further checks
    pub fn require(mut self, field: impl Into<String>) -> Self {
        self.validations
            .get_or_insert_with(BTreeMap::new)
            .entry(field.into())
            .or_default();
        self
    }

    /// Allowlist, if one is active
    pub fn allowlist(&self) -> Option<&[String]> {
        self.fields.as_deref().filter(|f| !f.is_empty())
    }
}

impl fmt::Debug for ShapeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn keys<V>(map: &Option<BTreeMap<String, V>>) -> Vec<&str> {
            map.iter().flat_map(|m| m.keys().map(String::as_str)).collect()
        }

        f.debug_struct("ShapeConfig")
            .field("fields", &self.fields)
            .field("transformations", &keys(&self.transformations))
            .field("conditional_fields", &keys(&self.conditional_fields))
            .field("validations", &keys(&self.validations))
            .finish()
    }
}
