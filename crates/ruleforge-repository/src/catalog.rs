//! File system based attribute catalog
//!
//! Reads `<root>/attributes.yaml`:
//!
//! ```yaml
//! attributes:
//!   - name: age
//!     data_type: integer
//!   - name: country
//!     data_type: string
//! ```
//!
//! Type names accept the usual aliases (`int`, `bool`, `double`, ...). A
//! missing file is an empty catalog.

use async_trait::async_trait;
use path_absolutize::Absolutize;
use ruleforge_core::types::{AttributeDefinition, DataType};
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;

use crate::memory::InMemoryAttributeCatalog;
use crate::traits::AttributeCatalog;
use crate::{RepositoryError, RepositoryResult};

/// File name of the catalog under the repository root
pub const ATTRIBUTES_FILE: &str = "attributes.yaml";

#[derive(Deserialize)]
struct AttributesDocument {
    #[serde(default)]
    attributes: Vec<RawAttribute>,
}

#[derive(Deserialize)]
struct RawAttribute {
    name: String,
    data_type: String,
}

/// Attribute catalog loaded from `attributes.yaml`
pub struct FileSystemAttributeCatalog {
    path: PathBuf,
    attributes: RwLock<InMemoryAttributeCatalog>,
}

impl FileSystemAttributeCatalog {
    /// Load the catalog under `root_path`
    pub async fn load<P: AsRef<Path>>(root_path: P) -> RepositoryResult<Self> {
        let root = root_path.as_ref();
        let path = root
            .absolutize()
            .map_err(|e| RepositoryError::Other(format!("Failed to absolutize path: {}", e)))?
            .join(ATTRIBUTES_FILE);

        let attributes = read_catalog(&path).await?;
        tracing::debug!(
            "Loaded {} attribute declarations from {}",
            attributes.definitions().len(),
            path.display()
        );

        Ok(Self {
            path,
            attributes: RwLock::new(attributes),
        })
    }

    /// Re-read the file, replacing the declarations only if it parses
    pub async fn reload(&self) -> RepositoryResult<()> {
        let attributes = read_catalog(&self.path).await?;
        *self.attributes.write().await = attributes;
        Ok(())
    }
}

async fn read_catalog(path: &Path) -> RepositoryResult<InMemoryAttributeCatalog> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(InMemoryAttributeCatalog::new()),
        Err(e) => return Err(e.into()),
    };

    let document: AttributesDocument = serde_yaml::from_str(&content)?;

    let mut definitions: Vec<AttributeDefinition> = Vec::with_capacity(document.attributes.len());
    for raw in document.attributes {
        let invalid = |message: String| RepositoryError::InvalidDocument {
            path: path.display().to_string(),
            message,
        };

        let data_type: DataType = raw
            .data_type
            .parse()
            .map_err(|e| invalid(format!("attribute '{}': {}", raw.name, e)))?;
        if definitions.iter().any(|d| d.name == raw.name) {
            return Err(invalid(format!("attribute '{}' declared twice", raw.name)));
        }
        definitions.push(AttributeDefinition::new(raw.name, data_type));
    }

    Ok(definitions.into_iter().collect())
}

#[async_trait]
impl AttributeCatalog for FileSystemAttributeCatalog {
    async fn declared_type(&self, name: &str) -> RepositoryResult<Option<DataType>> {
        Ok(self.attributes.read().await.get(name))
    }

    async fn list_attributes(&self) -> RepositoryResult<Vec<AttributeDefinition>> {
        Ok(self.attributes.read().await.definitions())
    }
}
