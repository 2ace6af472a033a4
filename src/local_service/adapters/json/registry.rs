//! Service registry persisted as a JSON document.
//!
//! The document has the shape `{"services": [...]}`. Top-level keys other
//! than `services`, and unknown keys inside each entry, are kept as-is when
//! the file is rewritten.

use crate::local_service::{
    domain::{ServiceDescriptor, ServicePort},
    ports::{ServiceRegistry, ServiceRegistryError, ServiceRegistryResult},
};
use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Default, Serialize, Deserialize)]
struct ServiceDocument {
    #[serde(default)]
    services: Vec<ServiceDescriptor>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// JSON file registry.
///
/// Every read goes to disk. Mutations are serialized by an in-process lock
/// and replace the file by renaming a sibling temporary file over it.
#[derive(Debug, Clone)]
pub struct JsonFileServiceRegistry {
    path: Arc<Utf8PathBuf>,
    write_lock: Arc<Mutex<()>>,
}

impl JsonFileServiceRegistry {
    /// Creates a registry backed by the file at `path`.
    ///
    /// The file does not need to exist yet.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    async fn modify<T, F>(&self, change: F) -> ServiceRegistryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut ServiceDocument) -> ServiceRegistryResult<T> + Send + 'static,
    {
        let _guard = self.write_lock.lock().await;
        let path = Arc::clone(&self.path);
        run_blocking(move || {
            let mut document = read_document(&path)?;
            let value = change(&mut document)?;
            write_document(&path, &document)?;
            Ok(value)
        })
        .await
    }
}

async fn run_blocking<T, F>(work: F) -> ServiceRegistryResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> ServiceRegistryResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(ServiceRegistryError::io)?
}

fn split_path(path: &Utf8Path) -> ServiceRegistryResult<(&Utf8Path, &str)> {
    let file_name = path.file_name().ok_or_else(|| {
        ServiceRegistryError::io(std::io::Error::other(format!(
            "configuration path {path} must name a file"
        )))
    })?;
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    Ok((parent, file_name))
}

fn read_document(path: &Utf8Path) -> ServiceRegistryResult<ServiceDocument> {
    let (parent, file_name) = split_path(path)?;
    let dir = match Dir::open_ambient_dir(parent, ambient_authority()) {
        Ok(dir) => dir,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(ServiceDocument::default()),
        Err(err) => return Err(ServiceRegistryError::io(err)),
    };
    let contents = match dir.read_to_string(file_name) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(ServiceDocument::default()),
        Err(err) => return Err(ServiceRegistryError::io(err)),
    };
    if contents.trim().is_empty() {
        return Ok(ServiceDocument::default());
    }
    serde_json::from_str(&contents).map_err(ServiceRegistryError::invalid_document)
}

fn write_document(path: &Utf8Path, document: &ServiceDocument) -> ServiceRegistryResult<()> {
    let (parent, file_name) = split_path(path)?;
    Dir::create_ambient_dir_all(parent, ambient_authority()).map_err(ServiceRegistryError::io)?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(ServiceRegistryError::io)?;

    let mut contents =
        serde_json::to_string_pretty(document).map_err(ServiceRegistryError::invalid_document)?;
    contents.push('\n');

    let temp_name = format!(".{file_name}.tmp");
    dir.write(&temp_name, contents)
        .map_err(ServiceRegistryError::io)?;
    dir.rename(&temp_name, &dir, file_name)
        .map_err(ServiceRegistryError::io)
}

#[async_trait]
impl ServiceRegistry for JsonFileServiceRegistry {
    async fn load_all(&self) -> ServiceRegistryResult<Vec<ServiceDescriptor>> {
        let path = Arc::clone(&self.path);
        let document = run_blocking(move || read_document(&path)).await?;
        Ok(document.services)
    }

    async fn append(&self, descriptor: ServiceDescriptor) -> ServiceRegistryResult<()> {
        self.modify(move |document| {
            let port = descriptor.port();
            if document.services.iter().any(|d| d.port() == port) {
                return Err(ServiceRegistryError::DuplicatePort(port));
            }
            document.services.push(descriptor);
            Ok(())
        })
        .await
    }

    async fn remove_by_port(
        &self,
        port: ServicePort,
    ) -> ServiceRegistryResult<Vec<ServiceDescriptor>> {
        self.modify(move |document| {
            let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut document.services)
                .into_iter()
                .partition(|descriptor| descriptor.port() == port);
            if removed.is_empty() {
                return Err(ServiceRegistryError::NotFound(port));
            }
            document.services = kept;
            Ok(removed)
        })
        .await
    }
}
