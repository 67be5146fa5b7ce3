//! Named parameter shared by user tools and catalog entries
//!
//! A user tool carries `name`/`value` pairs, a catalog entry carries
//! `name`/`is_required` pairs. Both are a [`Parameter`] whose second field is
//! flattened in from `V`.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

/// A named parameter with a payload whose meaning depends on the document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter<V> {
    /// Parameter name, referenced from args templates
    #[serde(default, deserialize_with = "scalar_string")]
    pub name: String,
    #[serde(flatten)]
    pub spec: V,
}

/// Value supplied by the user for a parameter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamValue {
    #[serde(deserialize_with = "scalar_string")]
    pub value: String,
}

/// Requirement flag declared by a catalog entry
///
/// Advisory only: a missing required parameter is logged, never rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamRequirement {
    pub is_required: bool,
}

/// Parameter as it appears in the user config
pub type UserParam = Parameter<ParamValue>;

/// Parameter as it appears in the tool catalog
pub type SystemParam = Parameter<ParamRequirement>;

impl UserParam {
    /// Create a user parameter
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            spec: ParamValue { value: value.into() },
        }
    }

    /// The user-supplied value
    pub fn value(&self) -> &str {
        &self.spec.value
    }
}

impl SystemParam {
    /// Create a catalog parameter declaration
    pub fn new(name: impl Into<String>, is_required: bool) -> Self {
        Self {
            name: name.into(),
            spec: ParamRequirement { is_required },
        }
    }

    /// Whether the catalog marks this parameter as required
    pub fn is_required(&self) -> bool {
        self.spec.is_required
    }
}

/// Accept any YAML scalar for a string field, taking its textual form
pub(crate) fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        Value::Sequence(_) => Err(de::Error::invalid_type(de::Unexpected::Seq, &"a scalar")),
        Value::Mapping(_) => Err(de::Error::invalid_type(de::Unexpected::Map, &"a scalar")),
        Value::Tagged(tagged) => Err(de::Error::custom(format!(
            "unexpected tag {} where a scalar was expected",
            tagged.tag
        ))),
    }
}
