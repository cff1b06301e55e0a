//! The active workspace document and its encrypted lock file.

use crate::error::{StorageError, StorageResult};
use leapp_crypto::{decrypt, encrypt, EncryptedData, WorkspaceKey};
use leapp_types::{GlobalSettings, Workspace};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

/// Holds the single mutable workspace document of the process.
///
/// Callers point the store at a lock file and a key, then `reload_workspace`
/// to load it. Mutations go through `update_workspace`, `create_workspace`,
/// `remove_workspace`, and `apply_global_settings`.
pub trait WorkspaceStore: Send + Sync {
    /// Selects the lock file, relative to the store's base directory.
    fn set_workspace_file_name(&self, file_name: &str) -> StorageResult<()>;

    fn workspace_file_name(&self) -> StorageResult<String>;

    fn set_encryption_key(&self, key: WorkspaceKey) -> StorageResult<()>;

    /// Re-reads the lock file. A missing file yields an empty workspace.
    fn reload_workspace(&self) -> StorageResult<()>;

    /// Snapshot of the in-memory document.
    fn get_workspace(&self) -> StorageResult<Workspace>;

    /// Mutates the document and persists it.
    fn update_workspace(&self, apply: &mut dyn FnMut(&mut Workspace)) -> StorageResult<()>;

    /// Writes a fresh document if the lock file does not exist yet.
    fn create_workspace(&self) -> StorageResult<()>;

    /// Deletes the lock file and resets the in-memory document.
    fn remove_workspace(&self) -> StorageResult<()>;

    fn extract_global_settings(&self) -> StorageResult<GlobalSettings> {
        Ok(self.get_workspace()?.settings)
    }

    fn apply_global_settings(&self, settings: &GlobalSettings) -> StorageResult<()> {
        self.update_workspace(&mut |workspace| workspace.settings = settings.clone())
    }
}

struct Inner {
    file_name: String,
    key: Option<WorkspaceKey>,
    workspace: Workspace,
}

/// Workspace store persisting to encrypted JSON lock files.
pub struct FileWorkspaceStore {
    base_dir: PathBuf,
    inner: Mutex<Inner>,
}

impl FileWorkspaceStore {
    /// Creates a store rooted at `base_dir` (the user's home directory in
    /// production), initially pointing at `file_name` with no key.
    pub fn new(base_dir: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            inner: Mutex::new(Inner {
                file_name: file_name.into(),
                key: None,
                workspace: Workspace::default(),
            }),
        }
    }

    /// Absolute path of the lock file currently selected.
    pub fn workspace_path(&self) -> StorageResult<PathBuf> {
        let inner = self.lock()?;
        Ok(self.base_dir.join(&inner.file_name))
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))
    }
}

fn read_document(path: &Path, key: &WorkspaceKey) -> StorageResult<Workspace> {
    let bytes = std::fs::read(path)?;
    let sealed: EncryptedData = serde_json::from_slice(&bytes)?;
    let plaintext = decrypt(key, &sealed)?;
    Ok(serde_json::from_slice(&plaintext)?)
}

fn write_document(path: &Path, key: &WorkspaceKey, workspace: &Workspace) -> StorageResult<()> {
    let plaintext = serde_json::to_vec(workspace)?;
    let sealed = encrypt(key, &plaintext)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    // Rename over the old file; readers never see a partial write.
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, serde_json::to_vec(&sealed)?)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

impl WorkspaceStore for FileWorkspaceStore {
    fn set_workspace_file_name(&self, file_name: &str) -> StorageResult<()> {
        let mut inner = self.lock()?;
        debug!("workspace file set to {file_name}");
        inner.file_name = file_name.to_string();
        Ok(())
    }

    fn workspace_file_name(&self) -> StorageResult<String> {
        Ok(self.lock()?.file_name.clone())
    }

    fn set_encryption_key(&self, key: WorkspaceKey) -> StorageResult<()> {
        self.lock()?.key = Some(key);
        Ok(())
    }

    fn reload_workspace(&self) -> StorageResult<()> {
        let mut inner = self.lock()?;
        let path = self.base_dir.join(&inner.file_name);
        let workspace = if path.exists() {
            let key = inner.key.as_ref().ok_or(StorageError::KeyNotSet)?;
            read_document(&path, key)?
        } else {
            debug!("no workspace at {}, starting empty", path.display());
            Workspace::default()
        };
        inner.workspace = workspace;
        Ok(())
    }

    fn get_workspace(&self) -> StorageResult<Workspace> {
        Ok(self.lock()?.workspace.clone())
    }

    fn update_workspace(&self, apply: &mut dyn FnMut(&mut Workspace)) -> StorageResult<()> {
        let mut inner = self.lock()?;
        let path = self.base_dir.join(&inner.file_name);
        let mut next = inner.workspace.clone();
        apply(&mut next);
        let key = inner.key.as_ref().ok_or(StorageError::KeyNotSet)?;
        write_document(&path, key, &next)?;
        inner.workspace = next;
        Ok(())
    }

    fn create_workspace(&self) -> StorageResult<()> {
        let mut inner = self.lock()?;
        let path = self.base_dir.join(&inner.file_name);
        if path.exists() {
            return Ok(());
        }
        let key = inner.key.as_ref().ok_or(StorageError::KeyNotSet)?;
        let fresh = Workspace::default();
        write_document(&path, key, &fresh)?;
        inner.workspace = fresh;
        info!("created workspace {}", inner.file_name);
        Ok(())
    }

    fn remove_workspace(&self) -> StorageResult<()> {
        let mut inner = self.lock()?;
        let path = self.base_dir.join(&inner.file_name);
        if path.exists() {
            std::fs::remove_file(&path)?;
            info!("removed workspace {}", inner.file_name);
        }
        inner.workspace = Workspace::default();
        Ok(())
    }
}
