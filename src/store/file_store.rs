use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use super::{TokenStore, AUTH_TOKEN_STORAGE_KEY};

/// Persists the token in a small JSON key/value document, the on-disk
/// counterpart of browser local storage. Other keys in the document are
/// preserved.
pub struct FileStore {
    path: PathBuf,
    // Serialises read-modify-write cycles on the document.
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    fn read_document(&self) -> HashMap<String, String> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return HashMap::new(),
            Err(e) => {
                warn!("Failed to read token store {}: {}", self.path.display(), e);
                return HashMap::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("Token store {} is not valid JSON: {}", self.path.display(), e);
            HashMap::new()
        })
    }

    /// Write the document to a temp file beside the store and rename it into
    /// place, so readers never see a half-written document.
    fn write_document(&self, document: &HashMap<String, String>) -> Result<(), String> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| format!("Error creating {}: {}", dir.display(), e))?;

        let raw = serde_json::to_string_pretty(document)
            .map_err(|e| format!("Error serialising token store: {}", e))?;
        let mut temp = NamedTempFile::new_in(dir)
            .map_err(|e| format!("Error creating temp file in {}: {}", dir.display(), e))?;
        temp.write_all(raw.as_bytes())
            .and_then(|()| temp.as_file().sync_all())
            .map_err(|e| format!("Error writing {}: {}", temp.path().display(), e))?;
        temp.persist(&self.path)
            .map_err(|e| format!("Error replacing {}: {}", self.path.display(), e.error))?;
        Ok(())
    }

    fn update(&self, token: Option<&str>) {
        let _guard = self.lock.lock().unwrap_or_else(|p| p.into_inner());
        let mut document = self.read_document();
        match token {
            Some(token) => {
                document.insert(AUTH_TOKEN_STORAGE_KEY.to_string(), token.to_string());
            }
            None => {
                if document.remove(AUTH_TOKEN_STORAGE_KEY).is_none() {
                    return;
                }
            }
        }
        match self.write_document(&document) {
            Ok(()) => debug!("Token store {} updated", self.path.display()),
            Err(e) => warn!("{}", e),
        }
    }
}

impl TokenStore for FileStore {
    fn get(&self) -> Option<String> {
        let _guard = self.lock.lock().unwrap_or_else(|p| p.into_inner());
        self.read_document()
            .remove(AUTH_TOKEN_STORAGE_KEY)
            .filter(|token| !token.is_empty())
    }

    fn set(&self, token: &str) {
        self.update(Some(token));
    }

    fn delete(&self) {
        self.update(None);
    }
}
