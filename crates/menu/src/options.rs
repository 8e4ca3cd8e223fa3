//! Menu configuration
//!
//! [`Options`] is validated once, when it is built, and never changes
//! afterwards. It can be assembled in code through [`OptionsBuilder`] or parsed
//! from a JSON value:
//!
//! ```
//! use menu::Options;
//! use serde_json::json;
//!
//! let options = Options::from_value(&json!({
//!     "filter": "**/*.txt",
//!     "keySeparator": "/",
//!     "nodeOutputField": null,
//! }))
//! .unwrap();
//!
//! assert_eq!(options.key_field(), "menu");
//! assert_eq!(options.key_separator(), "/");
//! assert_eq!(options.node_output_field(), None);
//! ```

use crate::error::MenuError;
use crate::filter::Filter;
use crate::reader::{AsIsKeyReader, DefaultKeyReader, KeyReader};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

const DEFAULT_FIELD: &str = "menu";
const DEFAULT_SEPARATOR: &str = ".";

/// Validated menu configuration
#[derive(Clone)]
pub struct Options {
    filter: Filter,
    key_field: String,
    key_separator: String,
    key_reader: Arc<dyn KeyReader>,
    tree_output_field: Option<String>,
    node_output_field: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            filter: Filter::all(),
            key_field: DEFAULT_FIELD.to_string(),
            key_separator: DEFAULT_SEPARATOR.to_string(),
            key_reader: Arc::new(DefaultKeyReader),
            tree_output_field: Some(DEFAULT_FIELD.to_string()),
            node_output_field: Some(DEFAULT_FIELD.to_string()),
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("filter", &self.filter)
            .field("key_field", &self.key_field)
            .field("key_separator", &self.key_separator)
            .field("tree_output_field", &self.tree_output_field)
            .field("node_output_field", &self.node_output_field)
            .finish_non_exhaustive()
    }
}

impl Options {
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::default()
    }

    /// Parse options from JSON
    ///
    /// `null` yields the defaults. A string is shorthand for using the same
    /// name as key field, tree output field and node output field. Anything
    /// else must be an object with camelCase option names.
    pub fn from_value(value: &Value) -> Result<Self, MenuError> {
        let raw = match value {
            Value::Null => RawOptions::default(),
            Value::String(name) => RawOptions {
                key_field: Some(name.clone()),
                tree_output_field: Some(name.clone()),
                node_output_field: Some(name.clone()),
                ..RawOptions::default()
            },
            Value::Object(_) => RawOptions::deserialize(value)
                .map_err(|e| MenuError::options(e.to_string()))?,
            _ => return Err(MenuError::options("expected an object or a string")),
        };

        raw.into_builder()?.build()
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// The item field holding the raw key
    pub fn key_field(&self) -> &str {
        &self.key_field
    }

    /// Separator used to split string keys
    pub fn key_separator(&self) -> &str {
        &self.key_separator
    }

    pub fn key_reader(&self) -> &dyn KeyReader {
        self.key_reader.as_ref()
    }

    /// The metadata entry the finished tree is published to, if any
    pub fn tree_output_field(&self) -> Option<&str> {
        self.tree_output_field.as_deref()
    }

    /// The name each item's node is attached under, if any
    pub fn node_output_field(&self) -> Option<&str> {
        self.node_output_field.as_deref()
    }
}

/// Collects option values and validates them in [`build`](OptionsBuilder::build)
#[derive(Clone)]
pub struct OptionsBuilder {
    filter: Vec<String>,
    key_field: String,
    key_separator: String,
    key_reader: Arc<dyn KeyReader>,
    tree_output_field: Option<String>,
    node_output_field: Option<String>,
}

impl Default for OptionsBuilder {
    fn default() -> Self {
        Self {
            filter: vec!["**".to_string()],
            key_field: DEFAULT_FIELD.to_string(),
            key_separator: DEFAULT_SEPARATOR.to_string(),
            key_reader: Arc::new(DefaultKeyReader),
            tree_output_field: Some(DEFAULT_FIELD.to_string()),
            node_output_field: Some(DEFAULT_FIELD.to_string()),
        }
    }
}

impl OptionsBuilder {
    /// Replace the filter with a single glob pattern
    pub fn filter(mut self, pattern: impl Into<String>) -> Self {
        self.filter = vec![pattern.into()];
        self
    }

    /// Replace the filter with a list of glob patterns
    pub fn filters<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn key_field(mut self, field: impl Into<String>) -> Self {
        self.key_field = field.into();
        self
    }

    pub fn key_separator(mut self, separator: impl Into<String>) -> Self {
        self.key_separator = separator.into();
        self
    }

    /// Install a custom key reader
    pub fn key_reader<R: KeyReader + 'static>(mut self, reader: R) -> Self {
        self.key_reader = Arc::new(reader);
        self
    }

    /// Use sequences as they are, without splitting or coercion
    pub fn key_as_is(self) -> Self {
        self.key_reader(AsIsKeyReader)
    }

    pub fn tree_output_field(mut self, field: Option<impl Into<String>>) -> Self {
        self.tree_output_field = field.map(Into::into);
        self
    }

    pub fn node_output_field(mut self, field: Option<impl Into<String>>) -> Self {
        self.node_output_field = field.map(Into::into);
        self
    }

    pub fn build(self) -> Result<Options, MenuError> {
        if self.key_field.is_empty() {
            return Err(MenuError::options("keyField must not be empty"));
        }
        if self.key_separator.is_empty() {
            return Err(MenuError::options("keySeparator must not be empty"));
        }
        if self.tree_output_field.as_deref() == Some("") {
            return Err(MenuError::options("treeOutputField must not be empty"));
        }
        if self.node_output_field.as_deref() == Some("") {
            return Err(MenuError::options("nodeOutputField must not be empty"));
        }

        Ok(Options {
            filter: Filter::new(&self.filter)?,
            key_field: self.key_field,
            key_separator: self.key_separator,
            key_reader: self.key_reader,
            tree_output_field: self.tree_output_field,
            node_output_field: self.node_output_field,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FilterValue {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ReaderValue {
    Flag(bool),
    Name(String),
}

fn default_output_field() -> Option<String> {
    Some(DEFAULT_FIELD.to_string())
}

/// Options as they appear in JSON, before validation
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOptions {
    filter: Option<FilterValue>,
    key_field: Option<String>,
    key_separator: Option<String>,
    key_reader: Option<ReaderValue>,
    #[serde(default = "default_output_field")]
    tree_output_field: Option<String>,
    #[serde(default = "default_output_field")]
    node_output_field: Option<String>,
}

impl Default for RawOptions {
    fn default() -> Self {
        Self {
            filter: None,
            key_field: None,
            key_separator: None,
            key_reader: None,
            tree_output_field: default_output_field(),
            node_output_field: default_output_field(),
        }
    }
}

impl RawOptions {
    fn into_builder(self) -> Result<OptionsBuilder, MenuError> {
        let mut builder = Options::builder()
            .tree_output_field(self.tree_output_field)
            .node_output_field(self.node_output_field);

        match self.filter {
            Some(FilterValue::One(pattern)) => builder = builder.filter(pattern),
            Some(FilterValue::Many(patterns)) => builder = builder.filters(patterns),
            None => {}
        }
        if let Some(field) = self.key_field {
            builder = builder.key_field(field);
        }
        if let Some(separator) = self.key_separator {
            builder = builder.key_separator(separator);
        }
        match self.key_reader {
            None => {}
            Some(ReaderValue::Flag(false)) => builder = builder.key_as_is(),
            Some(ReaderValue::Name(name)) if name == "as-is" => builder = builder.key_as_is(),
            Some(ReaderValue::Name(name)) if name == "default" => {}
            Some(other) => {
                return Err(MenuError::options(format!(
                    "keyReader must be \"default\", \"as-is\" or false, found {:?}",
                    other
                )))
            }
        }

        Ok(builder)
    }
}
