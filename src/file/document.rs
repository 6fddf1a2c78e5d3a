//! The configuration document capability the serializers read from.
//!
//! The framework only needs a handful of lookups ([`ConfigurationDocument`]), so any
//! tree-shaped key/value format can be plugged in. [`TomlDocument`] is the implementation
//! used by the loader and by tests.

use std::fmt::{self, Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

use miette::{miette, Context, IntoDiagnostic, Result};
pub use toml::{Table, Value};

use super::path::ConfigPath;


/// Read-only access to a tree-structured configuration document.
pub trait ConfigurationDocument {
    /// The file (or other source handle) this document was read from.
    fn source(&self) -> &Path;

    /// Returns `true` if there is a value at `path`. When `explicit_only` is set,
    /// values that only exist in a defaults layer are ignored.
    fn contains(&self, path: &ConfigPath, explicit_only: bool) -> bool;

    /// Returns the value at `path`. The root path has no value (use [`Self::get_section`]).
    fn get(&self, path: &ConfigPath) -> Option<&Value>;

    /// Returns the section (table) at `path`, or `None` if the value is missing or not a section.
    fn get_section(&self, path: &ConfigPath) -> Option<&Table>;

    /// Returns the direct child keys of the section at `path`, in document order.
    fn get_keys(&self, path: &ConfigPath) -> Vec<String>;

    /// Returns the value at `path` in string form. Non-string scalars are formatted.
    fn get_string(&self, path: &ConfigPath) -> Option<String> {
        self.get(path).map(value_to_string)
    }
}


/// The runtime "type" of a configuration value, used for type assertions
/// and for error messages.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ValueKind {
    Boolean,
    Integer,
    Double,
    /// Either an integer or a floating point number.
    Number,
    String,
    List,
    Section,
    Datetime,
}

impl ValueKind {
    pub fn of(value: &Value) -> ValueKind {
        match value {
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Double,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::List,
            Value::Table(_) => ValueKind::Section,
            Value::Datetime(_) => ValueKind::Datetime,
        }
    }

    /// Returns `true` if a value of kind `actual` may be used where `self` is expected.
    pub fn accepts(self, actual: ValueKind) -> bool {
        match self {
            ValueKind::Number => matches!(actual, ValueKind::Integer | ValueKind::Double),
            expected => expected == actual,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Boolean => "Boolean",
            ValueKind::Integer => "Integer",
            ValueKind::Double => "Double",
            ValueKind::Number => "Number",
            ValueKind::String => "String",
            ValueKind::List => "List",
            ValueKind::Section => "Section",
            ValueKind::Datetime => "Datetime",
        }
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}


/// Formats a value the way a configuration author wrote it (strings without quotes).
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(string) => string.clone(),
        Value::Integer(integer) => integer.to_string(),
        Value::Float(float) => float.to_string(),
        Value::Boolean(boolean) => boolean.to_string(),
        Value::Datetime(datetime) => datetime.to_string(),
        other => other.to_string(),
    }
}


fn lookup<'t>(table: &'t Table, path: &ConfigPath) -> Option<&'t Value> {
    let (first, rest) = path.segments().split_first()?;

    let mut current = table.get(first)?;
    for segment in rest {
        current = current.as_table()?.get(segment)?;
    }

    Some(current)
}

fn lookup_section<'t>(table: &'t Table, path: &ConfigPath) -> Option<&'t Table> {
    if path.is_root() {
        return Some(table);
    }

    lookup(table, path)?.as_table()
}


/// A [`ConfigurationDocument`] backed by a parsed TOML table, with an optional
/// layer of default values underneath it.
#[derive(Clone, Debug)]
pub struct TomlDocument {
    source: PathBuf,
    root: Table,
    defaults: Option<Table>,
}

impl TomlDocument {
    pub fn new<P: Into<PathBuf>>(source: P, root: Table) -> Self {
        Self {
            source: source.into(),
            root,
            defaults: None,
        }
    }

    /// Parses a document from an in-memory string. `source` is only used for diagnostics.
    pub fn parse<P: Into<PathBuf>>(source: P, contents: &str) -> Result<Self> {
        let source = source.into();

        let root = toml::from_str::<Table>(contents)
            .into_diagnostic()
            .wrap_err_with(|| miette!("Could not parse {} as TOML.", source.display()))?;

        Ok(Self::new(source, root))
    }

    /// Reads and parses the document at `file_path`.
    pub fn load_from_path<P: AsRef<Path>>(file_path: P) -> Result<Self> {
        let file_path = file_path.as_ref();

        let contents = fs::read_to_string(file_path)
            .into_diagnostic()
            .wrap_err_with(|| miette!("Could not read {}.", file_path.display()))?;

        Self::parse(file_path, &contents)
    }

    /// Layers `defaults` underneath this document. Lookups fall back to the defaults,
    /// except for explicit-only presence checks.
    #[must_use = "function returns the modified document"]
    pub fn with_defaults(mut self, defaults: Table) -> Self {
        self.defaults = Some(defaults);
        self
    }

    pub fn root(&self) -> &Table {
        &self.root
    }
}

impl ConfigurationDocument for TomlDocument {
    fn source(&self) -> &Path {
        &self.source
    }

    fn contains(&self, path: &ConfigPath, explicit_only: bool) -> bool {
        if path.is_root() {
            return true;
        }

        if lookup(&self.root, path).is_some() {
            return true;
        }

        !explicit_only
            && self
                .defaults
                .as_ref()
                .is_some_and(|defaults| lookup(defaults, path).is_some())
    }

    fn get(&self, path: &ConfigPath) -> Option<&Value> {
        lookup(&self.root, path).or_else(|| {
            self.defaults
                .as_ref()
                .and_then(|defaults| lookup(defaults, path))
        })
    }

    fn get_section(&self, path: &ConfigPath) -> Option<&Table> {
        lookup_section(&self.root, path).or_else(|| {
            self.defaults
                .as_ref()
                .and_then(|defaults| lookup_section(defaults, path))
        })
    }

    fn get_keys(&self, path: &ConfigPath) -> Vec<String> {
        let mut keys: Vec<String> = lookup_section(&self.root, path)
            .map(|section| section.keys().cloned().collect())
            .unwrap_or_default();

        if let Some(default_section) = self
            .defaults
            .as_ref()
            .and_then(|defaults| lookup_section(defaults, path))
        {
            for key in default_section.keys() {
                if !keys.contains(key) {
                    keys.push(key.clone());
                }
            }
        }

        keys
    }
}
