//! # Type Lookup
//!
//! The engine resolves typedefs through the [`TypeLookup`] collaborator,
//! which maps a type name to the raw serialized JSON fragment defining it.
//! The fragment is parsed per resolution step and discarded afterwards.
//!
//! [`TypeRegistry`] is the in-process implementation: an immutable-after-load
//! map that can be filled programmatically or from a directory of JSON/YAML
//! typedef files. Each file is an object mapping type names to descriptors:
//!
//! ```yaml
//! interface-name:
//!   leaf-type: string
//!   pattern: "^[a-z]+[0-9]*$"
//! vlan-id:
//!   leaf-type: uint16
//!   from: "1"
//!   to: "4094"
//! ```

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::RegistryError;

/// Source of typedef definitions.
///
/// Implementations must be safe for concurrent reads; the engine never
/// writes through this interface.
pub trait TypeLookup: Send + Sync {
    /// The raw JSON fragment defining `name`, or `None` if undefined.
    fn lookup_type_definition(&self, name: &str) -> Option<Cow<'_, str>>;
}

impl<T: TypeLookup + ?Sized> TypeLookup for &T {
    fn lookup_type_definition(&self, name: &str) -> Option<Cow<'_, str>> {
        (**self).lookup_type_definition(name)
    }
}

impl TypeLookup for HashMap<String, String> {
    fn lookup_type_definition(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(|s| Cow::Borrowed(s.as_str()))
    }
}

/// A lookup that defines no types. Every typedef reference fails to resolve.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoImports;

impl TypeLookup for NoImports {
    fn lookup_type_definition(&self, _name: &str) -> Option<Cow<'_, str>> {
        None
    }
}

/// In-memory typedef store.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    definitions: HashMap<String, String>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `*.json`, `*.yaml` and `*.yml` file in `dir`.
    ///
    /// Files are read in name order so that duplicate-name errors are
    /// deterministic. Subdirectories are not traversed.
    ///
    /// # Errors
    ///
    /// Returns a [`RegistryError`] if the directory or a file cannot be
    /// read, a file does not parse, a file's top level is not an object,
    /// or a type name is defined twice.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let dir = dir.as_ref();
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source| RegistryError::Io { path, source }
        };

        let mut files: Vec<PathBuf> = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_err(dir))? {
            let path = entry.map_err(io_err(dir))?.path();
            if path.is_file() && typedef_format(&path).is_some() {
                files.push(path);
            }
        }
        files.sort();

        let mut registry = Self::new();
        for path in &files {
            let defs = read_typedef_file(path)?;
            for (name, definition) in defs {
                if registry.contains(&name) {
                    return Err(RegistryError::DuplicateType {
                        name,
                        path: path.clone(),
                    });
                }
                registry.insert(name, &definition);
            }
            tracing::debug!(file = %path.display(), total = registry.len(), "loaded typedef file");
        }
        Ok(registry)
    }

    /// Register a definition, replacing any previous one with the same name.
    pub fn insert(&mut self, name: impl Into<String>, definition: &Value) {
        self.definitions.insert(name.into(), definition.to_string());
    }

    /// Register an already serialized definition verbatim. The text is not
    /// checked here; an unparsable fragment fails at resolution time.
    pub fn insert_raw(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.definitions.insert(name.into(), text.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Registered type names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.definitions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl TypeLookup for TypeRegistry {
    fn lookup_type_definition(&self, name: &str) -> Option<Cow<'_, str>> {
        self.definitions.get(name).map(|s| Cow::Borrowed(s.as_str()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Yaml,
}

fn typedef_format(path: &Path) -> Option<Format> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Some(Format::Json),
        Some("yaml" | "yml") => Some(Format::Yaml),
        _ => None,
    }
}

fn read_typedef_file(path: &Path) -> Result<serde_json::Map<String, Value>, RegistryError> {
    let content = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let value = match typedef_format(path) {
        Some(Format::Yaml) => parse_yaml(&content).map_err(|reason| RegistryError::Yaml {
            path: path.to_path_buf(),
            reason,
        })?,
        _ => serde_json::from_str(&content).map_err(|source| RegistryError::Json {
            path: path.to_path_buf(),
            source,
        })?,
    };

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(RegistryError::NotAMapping {
            path: path.to_path_buf(),
        }),
    }
}

/// Parse a YAML typedef document straight into a JSON value.
///
/// Only the JSON-compatible subset is accepted: mapping keys must be
/// strings, and the first error names the offending position.
pub(crate) fn parse_yaml(content: &str) -> Result<Value, String> {
    serde_yaml::from_str::<Value>(content).map_err(|e| e.to_string())
}
