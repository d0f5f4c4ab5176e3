/*
[INPUT]:  Device id file path
[OUTPUT]: Device id persisted across restarts
[POS]:    Identity layer - durable storage for the generated device id
[UPDATE]: When the device id file format or location changes
*/

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Persists the per-install device id as a single line of text
#[derive(Debug, Clone)]
pub struct DeviceIdStore {
    path: PathBuf,
}

impl DeviceIdStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored id; missing, unreadable or blank files yield `None`
    pub fn load(&self) -> Option<String> {
        let content = fs::read_to_string(&self.path).ok()?;
        let id = content.trim();
        if id.is_empty() {
            return None;
        }
        Some(id.to_string())
    }

    /// Write the id, creating parent directories as needed
    pub fn save(&self, device_id: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&self.path, format!("{device_id}\n"))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let mut perms = fs::metadata(&self.path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&self.path, perms)?;
        }

        Ok(())
    }

    /// Return the stored id or persist the one produced by `create`
    pub fn load_or_create(&self, create: impl FnOnce() -> String) -> io::Result<String> {
        if let Some(id) = self.load() {
            return Ok(id);
        }
        let id = create();
        self.save(&id)?;
        Ok(id)
    }
}
