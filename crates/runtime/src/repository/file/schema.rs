//! Schema bootstrap for the file-backed catalog.

use std::fs;
use std::path::{Path, PathBuf};

use crate::repository::RepositoryError;
use crate::repository::types::{Catalog, SchemaHeader};

/// (Re)creates the meals table from an optional template.
///
/// The template is a JSON header:
///
/// ```text
/// { "table": "meals", "schema_version": 1 }
/// ```
///
/// Without a template the built-in [`SchemaHeader::default`] is used.
#[derive(Debug, Clone, Default)]
pub struct SchemaBootstrap {
    template: Option<PathBuf>,
}

impl SchemaBootstrap {
    pub fn new(template: Option<PathBuf>) -> Self {
        Self { template }
    }

    pub fn template(&self) -> Option<&Path> {
        self.template.as_deref()
    }

    /// Read and check the configured header.
    pub fn header(&self) -> Result<SchemaHeader, RepositoryError> {
        let Some(path) = &self.template else {
            return Ok(SchemaHeader::default());
        };

        let invalid = |reason: String| RepositoryError::SchemaTemplate {
            path: path.clone(),
            reason,
        };

        let json = fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
        let header: SchemaHeader = serde_json::from_str(&json).map_err(|e| invalid(e.to_string()))?;
        header.check().map_err(invalid)?;

        Ok(header)
    }

    /// Write a fresh empty catalog to `path`, replacing whatever was there.
    pub fn recreate(&self, path: &Path) -> Result<Catalog, RepositoryError> {
        let header = self.header()?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let catalog = Catalog::empty(header);
        catalog.persist(path)?;

        match &self.template {
            Some(template) => tracing::info!(
                "Recreated meals table at {} from template {}",
                path.display(),
                template.display()
            ),
            None => tracing::info!("Recreated meals table at {}", path.display()),
        }

        Ok(catalog)
    }
}
