use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Number, Value};
use tracing::debug;

use crate::error::{DocumentError, DocumentResult};
use crate::transport::TransportStack;

/// Name under which the default cache configuration is reported.
pub const DEFAULT_CACHE_NAME: &str = "___defaultcache";

/// A parsed cache-manager configuration document.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigDocument {
    #[serde(default = "empty_section")]
    global: Value,
    #[serde(default = "empty_section")]
    default: Value,
    #[serde(default)]
    caches: BTreeMap<String, Value>,
    #[serde(default)]
    transport: Option<TransportStack>,
}

fn empty_section() -> Value {
    Value::Object(Map::new())
}

fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => Number::from_f64(f)
            .map_or_else(|| Value::String(f.to_string()), Value::Number),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, toml_to_json(value)))
                .collect(),
        ),
    }
}

impl ConfigDocument {
    /// Parse a TOML document. Datetimes are kept as their TOML text.
    pub fn from_toml_str(text: &str) -> DocumentResult<Self> {
        let table: toml::Table = toml::from_str(text)?;
        let doc: Self = serde_json::from_value(toml_to_json(toml::Value::Table(table)))
            .map_err(|e| DocumentError::InvalidLayout(e.to_string()))?;
        doc.validated()
    }

    /// Parse a JSON document.
    pub fn from_json_str(text: &str) -> DocumentResult<Self> {
        let doc: Self = serde_json::from_str(text)?;
        doc.validated()
    }

    /// Load a document from disk. Files ending in `.json` are parsed as JSON,
    /// anything else as TOML.
    pub fn load(path: &Path) -> DocumentResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let doc = if is_json {
            Self::from_json_str(&text)?
        } else {
            Self::from_toml_str(&text)?
        };
        debug!(
            path = %path.display(),
            caches = doc.caches.len() + 1,
            transport = doc.transport.as_ref().map_or(0, TransportStack::len),
            "loaded configuration document"
        );
        Ok(doc)
    }

    fn validated(self) -> DocumentResult<Self> {
        if !self.global.is_object() {
            return Err(DocumentError::InvalidLayout("[global] must be a table".into()));
        }
        if !self.default.is_object() {
            return Err(DocumentError::InvalidLayout("[default] must be a table".into()));
        }
        for (name, config) in &self.caches {
            if name == DEFAULT_CACHE_NAME {
                return Err(DocumentError::InvalidLayout(format!(
                    "cache name {name:?} is reserved for the default cache"
                )));
            }
            if !config.is_object() {
                return Err(DocumentError::InvalidLayout(format!(
                    "[caches.{name}] must be a table"
                )));
            }
        }
        if let Some(stack) = &self.transport {
            if let Some(component) = stack.iter().find(|c| c.name.is_empty()) {
                return Err(DocumentError::InvalidLayout(format!(
                    "transport component without a name: {:?}",
                    component.internal
                )));
            }
        }
        Ok(self)
    }

    /// The global (cache-manager wide) section.
    pub fn global(&self) -> &Value {
        &self.global
    }

    /// The default cache configuration.
    pub fn default_cache(&self) -> &Value {
        &self.default
    }

    /// Look up a cache configuration by name. [`DEFAULT_CACHE_NAME`] resolves
    /// to the default cache.
    pub fn cache(&self, name: &str) -> Option<&Value> {
        if name == DEFAULT_CACHE_NAME {
            Some(&self.default)
        } else {
            self.caches.get(name)
        }
    }

    /// All cache names, the default cache included, in name order.
    pub fn cache_names(&self) -> Vec<&str> {
        self.caches().into_keys().collect()
    }

    /// All cache configurations by name, the default cache included.
    pub fn caches(&self) -> BTreeMap<&str, &Value> {
        let mut all: BTreeMap<&str, &Value> = self
            .caches
            .iter()
            .map(|(name, config)| (name.as_str(), config))
            .collect();
        all.insert(DEFAULT_CACHE_NAME, &self.default);
        all
    }

    /// The transport stack, if the document declares one.
    pub fn transport(&self) -> Option<&TransportStack> {
        self.transport.as_ref()
    }
}
