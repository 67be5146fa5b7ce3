//! Config Loader - read user configs and tool catalogs from YAML
//!
//! Keys are matched case-insensitively and a key with a null value counts as
//! absent, so every missing field takes its zero value.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};

use crate::error::{CmdgenError, Result};
use crate::model::{SystemConfig, UserConfig};

/// Origin reported for documents that were not read from disk
const INLINE_ORIGIN: &str = "<inline>";

/// A declarative document that can be loaded from YAML
pub trait YamlDocument: DeserializeOwned + Default {
    /// Human readable kind, used in log records
    const KIND: &'static str;

    /// Load the document from a file
    fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CmdgenError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let doc = parse_document(&content, path)?;
        log::info!("Loaded {} from: {}", Self::KIND, path.display());
        Ok(doc)
    }

    /// Load the document from a YAML string
    fn from_yaml(content: &str) -> Result<Self> {
        parse_document(content, Path::new(INLINE_ORIGIN))
    }
}

impl YamlDocument for UserConfig {
    const KIND: &'static str = "user config";
}

impl YamlDocument for SystemConfig {
    const KIND: &'static str = "tool catalog";
}

fn parse_document<T: DeserializeOwned + Default>(content: &str, origin: &Path) -> Result<T> {
    let parse_err = |source| CmdgenError::Parse {
        path: origin.to_path_buf(),
        source,
    };

    let mut value: Value = serde_yaml::from_str(content).map_err(parse_err)?;
    if value.is_null() {
        log::debug!("{} is empty, using zero value", origin.display());
        return Ok(T::default());
    }

    value.apply_merge().map_err(parse_err)?;
    normalize(&mut value);
    serde_yaml::from_value(value).map_err(parse_err)
}

/// Lowercase mapping keys and drop null-valued entries, recursively
fn normalize(value: &mut Value) {
    match value {
        Value::Mapping(map) => {
            let entries = std::mem::take(map);
            *map = entries
                .into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, mut v)| {
                    normalize(&mut v);
                    (lowercase_key(k), v)
                })
                .collect::<Mapping>();
        }
        Value::Sequence(seq) => seq.iter_mut().for_each(normalize),
        Value::Tagged(tagged) => normalize(&mut tagged.value),
        _ => {}
    }
}

fn lowercase_key(key: Value) -> Value {
    match key {
        Value::String(s) => Value::String(s.to_lowercase()),
        other => other,
    }
}
