//! Schema directory loader.
//!
//! One document per resource type: `<type>.json`, `<type>.yaml` or
//! `<type>.yml`. The file stem is the registry key.

use std::collections::BTreeMap;
use std::path::PathBuf;

use restprobe_application::ports::SchemaSource;
use restprobe_application::{ApplicationError, ApplicationResult};
use restprobe_domain::{ResourceType, Schema, SchemaRegistry};
use tokio::fs;

use crate::serialization::{DocumentFormat, parse_document};

/// Loads a [`SchemaRegistry`] from a directory of schema documents.
#[derive(Debug, Clone)]
pub struct FileSchemaSource {
    dir: PathBuf,
}

impl FileSchemaSource {
    /// Creates a source reading from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Lists schema files keyed by resource type, rejecting duplicates.
    async fn schema_files(&self) -> ApplicationResult<BTreeMap<String, (PathBuf, DocumentFormat)>> {
        let source_name = self.dir.display().to_string();
        let mut entries = fs::read_dir(&self.dir)
            .await
            .map_err(|e| ApplicationError::schema_load(&source_name, e))?;

        let mut files: BTreeMap<String, (PathBuf, DocumentFormat)> = BTreeMap::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| ApplicationError::schema_load(&source_name, e))?
        {
            let path = entry.path();
            let Some(format) = DocumentFormat::from_path(&path) else {
                tracing::debug!(path = %path.display(), "skipping non-schema file");
                continue;
            };
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
                continue;
            };

            if let Some((existing, _)) = files.get(&stem) {
                return Err(ApplicationError::schema_load(
                    path.display().to_string(),
                    format!(
                        "duplicate schema for resource type '{stem}' (already defined by {})",
                        existing.display()
                    ),
                ));
            }
            files.insert(stem, (path, format));
        }
        Ok(files)
    }
}

impl SchemaSource for FileSchemaSource {
    async fn load(&self) -> ApplicationResult<SchemaRegistry> {
        let files = self.schema_files().await?;
        let mut registry = SchemaRegistry::new();

        for (resource_type, (path, format)) in files {
            let source_name = path.display().to_string();
            let text = fs::read_to_string(&path)
                .await
                .map_err(|e| ApplicationError::schema_load(&source_name, e))?;
            let schema: Schema = parse_document(&text, format)
                .map_err(|e| ApplicationError::schema_load(&source_name, e))?;

            registry
                .register(ResourceType::new(resource_type), schema)
                .map_err(|e| ApplicationError::schema_load(&source_name, e))?;
        }

        if registry.is_empty() {
            tracing::warn!(dir = %self.dir.display(), "no schema documents found");
        } else {
            tracing::info!(
                dir = %self.dir.display(),
                schemas = registry.len(),
                "loaded schema registry"
            );
        }
        Ok(registry)
    }
}
