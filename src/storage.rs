use crate::model::Task;
use anyhow::Result;
use directories::ProjectDirs;
use fs2::FileExt;
use log::warn;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Basename of the single slot holding the whole serialized list.
pub const SLOT_FILE: &str = "todos.json";

/// Environment override for the data directory. Wins over the config file,
/// which keeps tests and scripts isolated from the real list.
pub const DATA_DIR_ENV: &str = "AFAIRE_DATA_DIR";

pub struct LocalStorage;

impl LocalStorage {
    /// Resolves the data directory: `AFAIRE_DATA_DIR`, then the caller's
    /// override (from config), then the platform data dir. Creates it when
    /// missing. `None` when no home directory is resolvable.
    pub fn data_dir(override_dir: Option<&Path>) -> Option<PathBuf> {
        let dir = if let Ok(env_dir) = env::var(DATA_DIR_ENV) {
            Some(PathBuf::from(env_dir))
        } else if let Some(dir) = override_dir {
            Some(dir.to_path_buf())
        } else {
            ProjectDirs::from("com", "trougnouf", "afaire")
                .map(|proj| proj.data_dir().to_path_buf())
        };
        if let Some(dir) = &dir
            && !dir.exists()
        {
            let _ = fs::create_dir_all(dir);
        }
        dir
    }

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    /// Runs `f` while holding an advisory lock next to `path`, so two
    /// running instances cannot interleave their rewrites of the slot.
    pub fn with_lock<T, F>(path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let lock_path = path.with_extension("lock");
        let lock_file = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .open(&lock_path)?;
        lock_file.lock_exclusive()?;
        let result = f();
        let _ = FileExt::unlock(&lock_file);
        result
    }

    /// Overwrites the slot wholesale with the serialized list.
    pub fn save(path: &Path, tasks: &[Task]) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(tasks)?;
        Self::with_lock(path, || Self::atomic_write(path, &json))
    }

    /// Reads the whole list back. A missing, empty, or corrupt slot is an
    /// empty list; startup never surfaces a storage error to the user.
    pub fn load(path: &Path) -> Vec<Task> {
        if !path.exists() {
            return vec![];
        }
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Vec<Task>>(&json) {
                Ok(tasks) => tasks,
                Err(e) => {
                    warn!("slot {} is unreadable ({e}); starting empty", path.display());
                    vec![]
                }
            },
            Err(e) => {
                warn!("cannot read slot {} ({e}); starting empty", path.display());
                vec![]
            }
        }
    }
}
