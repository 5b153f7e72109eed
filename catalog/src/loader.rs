//! Catalog loading with builder pattern and fallback chains.
//!
//! Provides [`SchemaCatalog`] for lookup of registered schemas by command
//! name and [`CatalogBuilder`] for trying several sources in order.
//!
//! # Loading patterns
//!
//! ```no_run
//! use switchline_catalog::SchemaCatalog;
//!
//! // Load every description file in a directory
//! let catalog = SchemaCatalog::from_dir("schemas/").unwrap();
//! assert!(catalog.get("arc").is_some());
//!
//! // Load a single description
//! let catalog = SchemaCatalog::from_file("schemas/arc.yaml").unwrap();
//!
//! // Use the builder for a fallback chain
//! let catalog = SchemaCatalog::builder()
//!     .from_dir("schemas/")
//!     .from_file("arc.json")
//!     .build()
//!     .unwrap();
//! ```

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use switchline_core::{Schema, SchemaDescription};
use tracing::{debug, info, warn};

use crate::error::{CatalogError, Result};

/// Describes where a [`SchemaCatalog`] was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// Loaded from a directory of description files.
    Directory(PathBuf),
    /// Loaded from a single description file.
    File(PathBuf),
    /// Loaded via a fallback chain of multiple sources.
    Multiple(Vec<CatalogSource>),
}

#[derive(Debug)]
struct Entry {
    schema: Schema,
    path: PathBuf,
}

/// Registered schemas indexed by command name.
///
/// # Examples
///
/// ```no_run
/// use switchline_catalog::SchemaCatalog;
///
/// let catalog = SchemaCatalog::from_dir("schemas/").unwrap();
/// println!("Loaded {} schemas", catalog.len());
///
/// for name in catalog.commands() {
///     println!("  {}", name);
/// }
/// ```
#[derive(Debug)]
pub struct SchemaCatalog {
    entries: BTreeMap<String, Entry>,
    source: CatalogSource,
}

/// Returns `true` for paths with a `json`, `yaml` or `yml` extension.
pub fn is_schema_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("json" | "yaml" | "yml")
    )
}

/// Reads one description file, picking the format from its extension.
///
/// # Errors
///
/// Returns [`CatalogError::UnsupportedFormat`] for any other extension,
/// [`CatalogError::Io`] if the file cannot be opened, or a JSON/YAML error if
/// it does not deserialize into a [`SchemaDescription`].
pub fn load_description(path: impl AsRef<Path>) -> Result<SchemaDescription> {
    let path = path.as_ref();
    let extension = path.extension().and_then(|e| e.to_str());
    let description = match extension {
        Some("json") => serde_json::from_reader(BufReader::new(File::open(path)?))?,
        Some("yaml" | "yml") => serde_yaml::from_reader(BufReader::new(File::open(path)?))?,
        _ => return Err(CatalogError::UnsupportedFormat(path.to_path_buf())),
    };
    Ok(description)
}

fn load_schema(path: &Path) -> Result<Schema> {
    let description = load_description(path)?;
    let schema = Schema::new(description).map_err(|source| CatalogError::Configuration {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        path = %path.display(),
        command = schema.command(),
        switches = schema.switches().len(),
        arguments = schema.arguments().len(),
        "loaded schema"
    );
    Ok(schema)
}

impl SchemaCatalog {
    /// Returns a new [`CatalogBuilder`] for configuring a fallback chain.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// Loads a single description file.
    ///
    /// # Errors
    ///
    /// Returns any error from [`load_description`], or
    /// [`CatalogError::Configuration`] if the description is rejected at
    /// registration.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut catalog = Self {
            entries: BTreeMap::new(),
            source: CatalogSource::File(path.to_path_buf()),
        };
        catalog.insert(path, load_schema(path)?)?;
        info!(path = %path.display(), schemas = catalog.len(), "schema catalog loaded");
        Ok(catalog)
    }

    /// Loads every description file directly inside `path`.
    ///
    /// Subdirectories and files with other extensions are skipped. Files are
    /// loaded in name order, so errors are reported deterministically.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the directory cannot be read, the first
    /// error from a failing file, or [`CatalogError::DuplicateCommand`] when two
    /// files describe the same command.
    pub fn from_dir(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut files = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let file_path = entry?.path();
            if file_path.is_file() && is_schema_file(&file_path) {
                files.push(file_path);
            }
        }
        files.sort();

        let mut catalog = Self {
            entries: BTreeMap::new(),
            source: CatalogSource::Directory(path.to_path_buf()),
        };
        for file_path in files {
            let schema = load_schema(&file_path)?;
            catalog.insert(&file_path, schema)?;
        }

        info!(path = %path.display(), schemas = catalog.len(), "schema catalog loaded");
        Ok(catalog)
    }

    fn insert(&mut self, path: &Path, schema: Schema) -> Result<()> {
        if let Some(existing) = self.entries.get(schema.command()) {
            return Err(CatalogError::DuplicateCommand {
                command: schema.command().to_string(),
                first: existing.path.clone(),
                second: path.to_path_buf(),
            });
        }
        self.entries.insert(
            schema.command().to_string(),
            Entry {
                schema,
                path: path.to_path_buf(),
            },
        );
        Ok(())
    }

    /// Looks up a schema by command name.
    pub fn get(&self, command: &str) -> Option<&Schema> {
        self.entries.get(command).map(|entry| &entry.schema)
    }

    /// Returns the free-form description of a command, if it has one.
    pub fn description(&self, command: &str) -> Option<&str> {
        self.get(command).and_then(Schema::description)
    }

    /// Returns the file a command was loaded from.
    pub fn path(&self, command: &str) -> Option<&Path> {
        self.entries.get(command).map(|entry| entry.path.as_path())
    }

    /// Returns `true` if the catalog contains a schema for `command`.
    pub fn contains(&self, command: &str) -> bool {
        self.entries.contains_key(command)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns command names in sorted order.
    pub fn commands(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn source(&self) -> &CatalogSource {
        &self.source
    }
}

/// Builder for constructing a [`SchemaCatalog`] with a fallback chain.
///
/// Sources are tried in the order they are added. The first successful load
/// wins; if all fail, [`CatalogError::NoSourcesAvailable`] is returned.
///
/// # Example
///
/// ```no_run
/// use switchline_catalog::SchemaCatalog;
///
/// let catalog = SchemaCatalog::builder()
///     .from_dir("/etc/switchline/")
///     .from_file("/opt/arc.yaml")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct CatalogBuilder {
    sources: Vec<CatalogSource>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a directory of description files as a source.
    pub fn from_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.push(CatalogSource::Directory(path.into()));
        self
    }

    /// Adds a single description file as a source.
    pub fn from_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.push(CatalogSource::File(path.into()));
        self
    }

    /// Attempts to load a catalog from configured sources in order.
    ///
    /// The returned catalog reports [`CatalogSource::Multiple`] with every
    /// configured source.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NoSourcesAvailable`] if no source loads.
    pub fn build(self) -> Result<SchemaCatalog> {
        for source in &self.sources {
            let result = match source {
                CatalogSource::Directory(path) => SchemaCatalog::from_dir(path),
                CatalogSource::File(path) => SchemaCatalog::from_file(path),
                CatalogSource::Multiple(_) => continue,
            };

            match result {
                Ok(mut catalog) => {
                    catalog.source = CatalogSource::Multiple(self.sources.clone());
                    return Ok(catalog);
                }
                Err(err) => warn!(source = ?source, error = %err, "schema source failed"),
            }
        }

        Err(CatalogError::NoSourcesAvailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use switchline_core::{FieldDecl, ValueKind};

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("sl_catalog_{name}_{}", std::process::id()));
        std::fs::remove_dir_all(&dir).ok();
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn test_description(command: &str) -> SchemaDescription {
        SchemaDescription::new(command)
            .with_argument("target", 1, ValueKind::String)
            .with_field(FieldDecl::switch("level", ValueKind::symbols(["low", "high"])))
    }

    fn write_json(dir: &Path, file: &str, description: &SchemaDescription) -> PathBuf {
        let path = dir.join(file);
        std::fs::write(&path, serde_json::to_string_pretty(description).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_from_dir() {
        let dir = temp_dir("from_dir");
        write_json(&dir, "arc.json", &test_description("arc"));
        write_json(&dir, "copy.json", &test_description("copy"));
        std::fs::write(dir.join("notes.txt"), "not a schema").unwrap();

        let catalog = SchemaCatalog::from_dir(&dir).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains("arc"));
        assert_eq!(catalog.commands().collect::<Vec<_>>(), ["arc", "copy"]);
        assert_eq!(catalog.source(), &CatalogSource::Directory(dir.clone()));
        assert_eq!(catalog.path("copy"), Some(dir.join("copy.json").as_path()));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_from_file_yaml() {
        let dir = temp_dir("from_file_yaml");
        let path = dir.join("arc.yml");
        std::fs::write(
            &path,
            "command: arc\ndescription: Artifacts control\nfields:\n  - name: tf\n    binding: switch\n    kind: string\n    default: tf\n",
        )
        .unwrap();

        let catalog = SchemaCatalog::from_file(&path).unwrap();
        assert_eq!(catalog.description("arc"), Some("Artifacts control"));
        assert_eq!(catalog.get("arc").unwrap().switches().len(), 1);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_from_file_unsupported_format() {
        let err = SchemaCatalog::from_file("schema.toml").unwrap_err();
        assert!(matches!(err, CatalogError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_duplicate_command() {
        let dir = temp_dir("duplicate");
        write_json(&dir, "a.json", &test_description("arc"));
        write_json(&dir, "b.json", &test_description("arc"));

        let err = SchemaCatalog::from_dir(&dir).unwrap_err();
        match err {
            CatalogError::DuplicateCommand { command, first, second } => {
                assert_eq!(command, "arc");
                assert_eq!(first, dir.join("a.json"));
                assert_eq!(second, dir.join("b.json"));
            }
            other => panic!("unexpected error: {other}"),
        }

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_configuration_error_names_file() {
        let dir = temp_dir("config_error");
        let description = SchemaDescription::new("arc")
            .with_switch("opt", ValueKind::Bool)
            .with_switch("opt", ValueKind::Int);
        let path = write_json(&dir, "arc.json", &description);

        let err = SchemaCatalog::from_file(&path).unwrap_err();
        assert!(matches!(err, CatalogError::Configuration { .. }));
        assert!(err.to_string().starts_with(&path.display().to_string()));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_builder_fallback() {
        let dir = temp_dir("builder_fallback");
        let path = write_json(&dir, "arc.json", &test_description("arc"));

        let catalog = SchemaCatalog::builder()
            .from_dir(dir.join("missing"))
            .from_file(&path)
            .build()
            .unwrap();
        assert!(catalog.contains("arc"));
        assert!(matches!(catalog.source(), CatalogSource::Multiple(sources) if sources.len() == 2));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_builder_no_sources() {
        let err = SchemaCatalog::builder().build().unwrap_err();
        assert!(matches!(err, CatalogError::NoSourcesAvailable));

        let err = SchemaCatalog::builder()
            .from_file("/nonexistent/switchline/arc.json")
            .build()
            .unwrap_err();
        assert!(matches!(err, CatalogError::NoSourcesAvailable));
    }
}
