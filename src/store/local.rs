//! Directory-backed vault store.
//!
//! Layout under the root directory:
//!
//! ```text
//! <root>/groups/<gid>/vault   sealed group vault
//! <root>/groups/<gid>/.lock   advisory lock file
//! ```

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::lock::VaultLock;
use super::FileSystem;
use crate::errors::{Result, SherlockError};
use crate::vault::DEFAULT_GROUP;

const GROUPS_DIR: &str = "groups";
const VAULT_FILE: &str = "vault";
const LOCK_FILE: &str = ".lock";

/// Stores each group in its own directory below `root`.
#[derive(Debug, Clone)]
pub struct LocalFileSystem {
    root: PathBuf,
}

impl LocalFileSystem {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn groups_dir(&self) -> PathBuf {
        self.root.join(GROUPS_DIR)
    }

    /// Directory of `gid`, or `None` when the id cannot name a directory
    /// below the groups folder.
    fn group_dir(&self, gid: &str) -> Option<PathBuf> {
        let safe = !gid.is_empty()
            && gid != "."
            && gid != ".."
            && !gid.contains(['/', '\\', '\0']);
        safe.then(|| self.groups_dir().join(gid))
    }

    fn existing_group_dir(&self, gid: &str) -> Result<PathBuf> {
        self.group_dir(gid)
            .filter(|dir| dir.is_dir())
            .ok_or(SherlockError::NoSuchGroup)
    }

    fn new_group(&self, gid: &str, initial_vault: &[u8]) -> Result<()> {
        let dir = self
            .group_dir(gid)
            .ok_or_else(|| SherlockError::InvalidGroupName(format!("'{gid}'")))?;
        if dir.join(VAULT_FILE).exists() {
            return Err(SherlockError::GroupExists(gid.to_string()));
        }
        create_private_dir(&dir)?;
        write_atomic(&dir.join(VAULT_FILE), initial_vault)?;
        tracing::debug!(gid, "group directory created");
        Ok(())
    }
}

impl FileSystem for LocalFileSystem {
    type Lock = VaultLock;

    fn init_root(&self, initial_vault: &[u8]) -> Result<()> {
        create_private_dir(&self.root)?;
        create_private_dir(&self.groups_dir())?;
        self.new_group(DEFAULT_GROUP, initial_vault)
    }

    fn create_group(&self, gid: &str, initial_vault: &[u8]) -> Result<()> {
        if !self.groups_dir().is_dir() {
            return Err(SherlockError::NotSetUp);
        }
        if self.group_exists(gid) {
            return Err(SherlockError::GroupExists(gid.to_string()));
        }
        self.new_group(gid, initial_vault)
    }

    fn group_exists(&self, gid: &str) -> bool {
        self.group_dir(gid).is_some_and(|dir| dir.is_dir())
    }

    fn vault_exists(&self, gid: &str) -> bool {
        self.group_dir(gid)
            .is_some_and(|dir| dir.join(VAULT_FILE).is_file())
    }

    fn read_group_vault(&self, gid: &str) -> Result<Vec<u8>> {
        let path = self.existing_group_dir(gid)?.join(VAULT_FILE);
        match fs::read(&path) {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(SherlockError::NoSuchGroup),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, gid: &str, data: &[u8]) -> Result<()> {
        let dir = self.existing_group_dir(gid)?;
        write_atomic(&dir.join(VAULT_FILE), data)
    }

    fn delete(&self, gid: &str) -> Result<()> {
        let dir = self.existing_group_dir(gid)?;
        fs::remove_dir_all(&dir)?;
        Ok(())
    }

    fn read_registered_groups(&self) -> Result<Vec<String>> {
        let dir = self.groups_dir();
        if !dir.is_dir() {
            return Err(SherlockError::NotSetUp);
        }

        let mut groups = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                groups.push(entry.file_name().to_string_lossy().to_string());
            }
        }
        groups.sort();
        Ok(groups)
    }

    fn lock(&self, gid: &str) -> Result<VaultLock> {
        let dir = self.existing_group_dir(gid)?;
        VaultLock::acquire(&dir.join(LOCK_FILE))
    }
}

/// Create `dir` (and parents), owner-only on Unix.
fn create_private_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(dir)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dir, fs::Permissions::from_mode(0o700))?;
    }
    Ok(())
}

/// Write `data` to `path` atomically: temp file in the same directory,
/// then rename over the target. Readers never see a half-written vault.
///
/// On Unix the temp file is created owner-only, so the blob is never
/// readable by anyone else.
fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let parent = path.parent().unwrap_or(Path::new("."));
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    // A leftover from an interrupted write may carry looser permissions.
    match fs::remove_file(&tmp_path) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(&tmp_path)?;
    file.write_all(data)?;
    file.sync_all()?;
    drop(file);

    fs::rename(&tmp_path, path)?;
    Ok(())
}
