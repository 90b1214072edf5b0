//! File-based snapshot storage.

use std::fs;
use std::path::{Path, PathBuf};

use super::error::{RepositoryError, Result};
use super::snapshot::Snapshot;

/// Stores snapshots as individual bincode files named after their slot.
///
/// # File Format
///
/// Slots are stored as `{name}.bin` in bincode format. Writes go to a
/// temporary file first and are renamed into place, so a crash never leaves
/// a half-written slot behind. [`FileSnapshotRepository::export_json`] writes
/// a readable `{name}.json` copy next to it for inspection.
#[derive(Debug, Clone)]
pub struct FileSnapshotRepository {
    base_dir: PathBuf,
}

impl FileSnapshotRepository {
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn slot_path(&self, name: &str, extension: &str) -> Result<PathBuf> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(RepositoryError::InvalidName(name.to_owned()));
        }
        Ok(self.base_dir.join(format!("{name}.{extension}")))
    }

    pub fn save(&self, name: &str, snapshot: &Snapshot) -> Result<()> {
        let path = self.slot_path(name, "bin")?;
        write_atomically(&path, &snapshot.encode()?)?;
        tracing::debug!(
            target: "runtime::repository",
            slot = name,
            prompt_number = snapshot.prompt_number,
            "saved snapshot to {}",
            path.display()
        );
        Ok(())
    }

    pub fn load(&self, name: &str) -> Result<Option<Snapshot>> {
        let path = self.slot_path(name, "bin")?;
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let snapshot = Snapshot::decode(&bytes)?;
        tracing::debug!(
            target: "runtime::repository",
            slot = name,
            prompt_number = snapshot.prompt_number,
            "loaded snapshot from {}",
            path.display()
        );
        Ok(Some(snapshot))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.slot_path(name, "bin")
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    pub fn delete(&self, name: &str) -> Result<()> {
        let path = self.slot_path(name, "bin")?;
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Names of all stored slots, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "bin")
                && let Some(stem) = path.file_stem().and_then(|stem| stem.to_str())
            {
                names.push(stem.to_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn export_json(&self, name: &str, snapshot: &Snapshot) -> Result<PathBuf> {
        let path = self.slot_path(name, "json")?;
        write_atomically(&path, snapshot.to_json()?.as_bytes())?;
        Ok(path)
    }
}

fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut temp_path = path.as_os_str().to_owned();
    temp_path.push(".tmp");
    fs::write(&temp_path, bytes)?;
    fs::rename(&temp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_names_stay_inside_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSnapshotRepository::new(dir.path()).unwrap();
        for bad in ["", "../escape", "a/b", "dot.ted"] {
            assert!(matches!(
                repo.slot_path(bad, "bin"),
                Err(RepositoryError::InvalidName(_))
            ));
        }
        assert!(repo.slot_path("slot_1", "bin").is_ok());
    }

    #[test]
    fn missing_slot_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSnapshotRepository::new(dir.path().join("saves")).unwrap();
        assert!(repo.load("nothing").unwrap().is_none());
        assert!(!repo.exists("nothing"));
        assert!(repo.list().unwrap().is_empty());
    }
}
