//! Input formats: JSON, YAML and TOML documents into structured values
//!
//! Every loader keeps the key order of the source document.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{Mapping, Scalar, Value};

/// Supported input document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    Json,
    Yaml,
    Toml,
}

impl InputFormat {
    /// Detect format from the file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        ext.parse().ok()
    }

    /// Format given explicitly, else detected from `path`.
    ///
    /// Without a path (stdin) JSON is assumed.
    pub fn resolve(explicit: Option<Self>, path: Option<&Path>) -> ApplicationResult<Self> {
        match (explicit, path) {
            (Some(format), _) => Ok(format),
            (None, Some(path)) => Self::from_path(path).ok_or_else(|| {
                ApplicationError::UnknownFormat(format!(
                    "{} (use --format json|yaml|toml)",
                    path.display()
                ))
            }),
            (None, None) => Ok(InputFormat::Json),
        }
    }

    /// Parse a document into a structured value.
    pub fn parse(self, content: &str) -> ApplicationResult<Value> {
        debug!("parse: format={}, bytes={}", self, content.len());
        let parse_err = |message: String| ApplicationError::Parse {
            format: self,
            message,
        };
        match self {
            InputFormat::Json => serde_json::from_str::<serde_json::Value>(content)
                .map(Value::from)
                .map_err(|e| parse_err(e.to_string())),
            InputFormat::Yaml => {
                let mut doc: serde_yaml::Value =
                    serde_yaml::from_str(content).map_err(|e| parse_err(e.to_string()))?;
                doc.apply_merge().map_err(|e| parse_err(e.to_string()))?;
                Ok(Value::from(doc))
            }
            InputFormat::Toml => toml::from_str::<toml::Table>(content)
                .map(|table| Value::from(toml::Value::Table(table)))
                .map_err(|e| parse_err(e.to_string())),
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InputFormat::Json => "json",
            InputFormat::Yaml => "yaml",
            InputFormat::Toml => "toml",
        })
    }
}

impl FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(InputFormat::Json),
            "yaml" | "yml" => Ok(InputFormat::Yaml),
            "toml" => Ok(InputFormat::Toml),
            other => Err(format!("unsupported format: {other} (expected json, yaml or toml)")),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Scalar(Scalar::Integer(i))
                } else if n.is_u64() {
                    // Beyond i64: keep the exact digits.
                    Value::Scalar(Scalar::Text(n.to_string()))
                } else {
                    Value::Scalar(Scalar::Float(n.as_f64().unwrap_or(f64::NAN)))
                }
            }
            serde_json::Value::String(s) => Value::Scalar(Scalar::Text(s)),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Mapping(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect::<Mapping>(),
            ),
        }
    }
}

impl From<serde_yaml::Value> for Value {
    fn from(v: serde_yaml::Value) -> Self {
        match v {
            serde_yaml::Value::Null => Value::Null,
            serde_yaml::Value::Bool(b) => Value::Bool(b),
            serde_yaml::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Scalar(Scalar::Integer(i))
                } else if n.is_u64() {
                    Value::Scalar(Scalar::Text(n.to_string()))
                } else {
                    Value::Scalar(Scalar::Float(n.as_f64().unwrap_or(f64::NAN)))
                }
            }
            serde_yaml::Value::String(s) => Value::Scalar(Scalar::Text(s)),
            serde_yaml::Value::Sequence(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            serde_yaml::Value::Mapping(map) => Value::Mapping(
                map.into_iter()
                    .map(|(k, v)| (yaml_key(k), Value::from(v)))
                    .collect::<Mapping>(),
            ),
            serde_yaml::Value::Tagged(tagged) => Value::from(tagged.value),
        }
    }
}

/// Mapping keys are strings; YAML allows any value as key.
fn yaml_key(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Null => "null".to_string(),
        serde_yaml::Value::Tagged(tagged) => yaml_key(tagged.value),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

impl From<toml::Value> for Value {
    fn from(v: toml::Value) -> Self {
        match v {
            toml::Value::String(s) => Value::Scalar(Scalar::Text(s)),
            toml::Value::Integer(i) => Value::Scalar(Scalar::Integer(i)),
            toml::Value::Float(x) => Value::Scalar(Scalar::Float(x)),
            toml::Value::Boolean(b) => Value::Bool(b),
            toml::Value::Datetime(dt) => Value::Scalar(Scalar::Text(dt.to_string())),
            toml::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            toml::Value::Table(table) => Value::Mapping(
                table
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect::<Mapping>(),
            ),
        }
    }
}
