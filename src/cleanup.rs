//! Interrupt-safe scratch space and partial output tracking.
//!
//! Every scratch directory and in-progress output file is registered in a
//! global list so the Ctrl+C handler can remove them before exiting.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex};

use tempfile::TempDir;

use crate::constants::output_names::SCRATCH_PREFIX;
use crate::error::Result;

/// Global registry of paths to remove on interrupt.
static ACTIVE_PATHS: LazyLock<Mutex<Vec<PathBuf>>> = LazyLock::new(|| Mutex::new(Vec::new()));

/// RAII guard for a scratch directory holding rendered segments.
pub struct ScratchDir {
    dir: TempDir,
}

impl ScratchDir {
    /// Create a hidden scratch directory inside `parent`.
    ///
    /// Keeping it beside the output keeps segment writes on the same volume.
    pub fn create_in(parent: &Path) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(SCRATCH_PREFIX)
            .tempdir_in(parent)?;
        register_path(dir.path());
        Ok(Self { dir })
    }

    /// Path of the scratch directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        unregister_path(self.dir.path());
        // TempDir removes the directory itself.
    }
}

/// RAII guard for an output file being written.
///
/// The file is deleted on drop unless [`PartialOutput::commit`] was called,
/// so failed writes never leave a truncated video behind.
pub struct PartialOutput {
    path: PathBuf,
    committed: bool,
}

impl PartialOutput {
    /// Start tracking `path`.
    pub fn begin(path: &Path) -> Self {
        register_path(path);
        Self {
            path: path.to_path_buf(),
            committed: false,
        }
    }

    /// Keep the file.
    pub fn commit(mut self) -> PathBuf {
        self.committed = true;
        unregister_path(&self.path);
        self.path.clone()
    }
}

impl Drop for PartialOutput {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.path);
            unregister_path(&self.path);
        }
    }
}

/// Register a path for removal on interrupt.
pub fn register_path(path: &Path) {
    if let Ok(mut paths) = ACTIVE_PATHS.lock() {
        paths.push(path.to_path_buf());
    }
}

/// Unregister a path after normal cleanup.
pub fn unregister_path(path: &Path) {
    if let Ok(mut paths) = ACTIVE_PATHS.lock() {
        paths.retain(|p| p != path);
    }
}

/// Remove every registered file and directory. Called on signal.
pub fn cleanup_all() {
    if let Ok(paths) = ACTIVE_PATHS.lock() {
        for path in paths.iter() {
            if path.is_dir() {
                let _ = fs::remove_dir_all(path);
            } else {
                let _ = fs::remove_file(path);
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_scratch_dir_removed_on_drop() {
        let parent = TempDir::new().unwrap();
        let scratch = ScratchDir::create_in(parent.path()).unwrap();
        let path = scratch.path().to_path_buf();
        assert!(path.is_dir());
        assert!(
            path.file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with(SCRATCH_PREFIX)
        );

        drop(scratch);
        assert!(!path.exists());
    }

    #[test]
    #[serial]
    fn test_uncommitted_output_is_deleted() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("reel.mp4");

        let partial = PartialOutput::begin(&out);
        fs::write(&out, b"half written").unwrap();
        drop(partial);
        assert!(!out.exists());

        let partial = PartialOutput::begin(&out);
        fs::write(&out, b"complete").unwrap();
        let kept = partial.commit();
        assert_eq!(kept, out);
        assert!(out.exists());
    }

    #[test]
    #[serial]
    fn test_cleanup_all_removes_registered_paths() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("partial.mp4");
        let sub = dir.path().join(".scorereel-abc");
        fs::write(&file, b"x").unwrap();
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("segment_0000.mp4"), b"x").unwrap();

        register_path(&file);
        register_path(&sub);
        cleanup_all();

        assert!(!file.exists());
        assert!(!sub.exists());
        unregister_path(&file);
        unregister_path(&sub);
    }
}
