//! Declarative shaping profiles
//!
//! A profile is the file-friendly form of a [`ShapeConfig`]: transformations,
//! conditions, and validators are named instead of written as closures.
//!
//! ```yaml
//! profiles:
//!   public-user:
//!     fields: [id, name, email]
//!     transform:
//!       name: uppercase
//!     include-if:
//!       email: { field: role, equals: admin }
//!     validate:
//!       name: [not-empty, { max-length: 32 }]
//!       email: [valid-email]
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

use crate::FieldMap;
use crate::shaper::ShapeConfig;
use crate::transforms;
use crate::validators;

/// Named shaping profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSpec {
    /// Allowlist, in output order
    pub fields: Vec<String>,

    /// Built-in transformation per field
    pub transform: BTreeMap<String, TransformKind>,

    /// Inclusion condition per field
    #[serde(rename = "include-if")]
    pub include_if: BTreeMap<String, ConditionSpec>,

    /// Validator chain per field
    pub validate: BTreeMap<String, Vec<ValidatorSpec>>,
}

/// Built-in transformations available to profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransformKind {
    Uppercase,
    Lowercase,
    Trim,
    Redact,
    ToString,
}

impl TransformKind {
    pub fn function(self) -> fn(&Value) -> Option<Value> {
        match self {
            Self::Uppercase => transforms::uppercase,
            Self::Lowercase => transforms::lowercase,
            Self::Trim => transforms::trim,
            Self::Redact => transforms::redact,
            Self::ToString => transforms::to_string,
        }
    }
}

/// Keep a field only when another field matches
///
/// With neither `equals` nor `present` set, the other field just has to exist.
/// `equals: null` matches a field holding null. Combining `equals` with
/// `present: false` is rejected when the profile is parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ConditionFields")]
pub struct ConditionSpec {
    /// Field the condition inspects
    pub field: String,

    /// Required value of that field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equals: Option<Value>,

    /// Whether that field must be present (true) or absent (false)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub present: Option<bool>,
}

/// Wire form of [`ConditionSpec`], checked before use
#[derive(Deserialize)]
struct ConditionFields {
    field: String,

    #[serde(default, deserialize_with = "explicit_value")]
    equals: Option<Value>,

    #[serde(default)]
    present: Option<bool>,
}

// A key that is present maps to Some, even when its value is null
fn explicit_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl TryFrom<ConditionFields> for ConditionSpec {
    type Error = String;

    fn try_from(raw: ConditionFields) -> Result<Self, Self::Error> {
        if raw.equals.is_some() && raw.present == Some(false) {
            return Err(format!(
                "condition on '{}' cannot require a value with `equals` and absence with `present: false`",
                raw.field
            ));
        }
        Ok(Self {
            field: raw.field,
            equals: raw.equals,
            present: raw.present,
        })
    }
}

impl ConditionSpec {
    /// Evaluate the condition against a mapping
    pub fn matches(&self, map: &FieldMap) -> bool {
        let current = map.get(&self.field);

        if self.equals.as_ref().is_some_and(|expected| current != Some(expected)) {
            return false;
        }

        match self.present {
            Some(present) => current.is_some() == present,
            None => current.is_some(),
        }
    }
}

/// Built-in validators available to profiles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValidatorSpec {
    Named(NamedValidator),
    MaxLength {
        #[serde(rename = "max-length")]
        max_length: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NamedValidator {
    NotEmpty,
    Positive,
    ValidPassword,
    ValidEmail,
}

impl ProfileSpec {
    /// Build the runtime configuration for this profile
    pub fn build(&self) -> ShapeConfig {
        debug!(
            fields = self.fields.len(),
            transforms = self.transform.len(),
            conditions = self.include_if.len(),
            validations = self.validate.len(),
            "ProfileSpec::build: called"
        );

        let mut config = ShapeConfig::new();

        if !self.fields.is_empty() {
            config = config.fields(self.fields.iter().cloned());
        }

        for (field, kind) in &self.transform {
            config = config.transform(field.clone(), kind.function());
        }

        for (field, condition) in &self.include_if {
            let condition = condition.clone();
            config = config.include_if(field.clone(), move |map: &FieldMap| condition.matches(map));
        }

        for (field, chain) in &self.validate {
            config = config.require(field.clone());
            for spec in chain {
                config = match spec {
                    ValidatorSpec::Named(NamedValidator::NotEmpty) => {
                        config.validate_with(field.clone(), validators::not_empty)
                    }
                    ValidatorSpec::Named(NamedValidator::Positive) => {
                        config.validate_with(field.clone(), validators::positive)
                    }
                    ValidatorSpec::Named(NamedValidator::ValidPassword) => {
                        config.validate_with(field.clone(), validators::valid_password)
                    }
                    ValidatorSpec::Named(NamedValidator::ValidEmail) => {
                        config.validate_with(field.clone(), validators::valid_email)
                    }
                    ValidatorSpec::MaxLength { max_length } => {
                        config.validate_with(field.clone(), validators::max_length(*max_length))
                    }
                };
            }
        }

        config
    }
}
