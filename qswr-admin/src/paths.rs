//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows. A `--data-dir`
//! override moves every file under one directory instead.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "sa";
const ORGANIZATION: &str = "qswr";
const APPLICATION: &str = "qswr-admin";

/// Name of the log file written by the running process.
const LATEST_LOG: &str = "latest.log";

/// Maximum number of old log files to keep.
const MAX_OLD_LOGS: usize = 25;

/// Resolved locations for everything the application writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    data: PathBuf,
    cache: PathBuf,
}

impl AppPaths {
    /// Platform directories, or `None` if no home directory can be determined.
    pub fn platform() -> Option<Self> {
        let dirs = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)?;
        Some(Self {
            data: dirs.data_dir().to_path_buf(),
            cache: dirs.cache_dir().to_path_buf(),
        })
    }

    /// Keeps data and logs under a single directory.
    pub fn rooted(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            cache: root.join("logs"),
            data: root,
        }
    }

    /// Uses `override_dir` when given, the platform directories otherwise.
    pub fn resolve(override_dir: Option<&Path>) -> Option<Self> {
        match override_dir {
            Some(dir) => Some(Self::rooted(dir)),
            None => Self::platform(),
        }
    }

    /// Directory for persistent application data.
    ///
    /// - Linux: `$XDG_DATA_HOME/qswr-admin` or `~/.local/share/qswr-admin`
    /// - macOS: `~/Library/Application Support/sa.qswr.qswr-admin`
    /// - Windows: `C:\Users\<User>\AppData\Roaming\qswr\qswr-admin\data`
    pub fn data_dir(&self) -> &Path {
        &self.data
    }

    /// Directory for logs.
    pub fn cache_dir(&self) -> &Path {
        &self.cache
    }

    /// The session database.
    pub fn session_db(&self) -> PathBuf {
        self.data.join("session.db")
    }

    /// The settings database.
    pub fn settings_db(&self) -> PathBuf {
        self.data.join("settings.db")
    }

    /// The log file of the current run.
    pub fn log_file(&self) -> PathBuf {
        self.cache.join(LATEST_LOG)
    }

    /// Creates the data and cache directories.
    pub fn ensure(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.data)?;
        fs::create_dir_all(&self.cache)
    }

    /// Rotate logs: rename latest.log to a timestamped name and drop the
    /// oldest archives.
    ///
    /// Call this at startup before creating the new log file.
    pub fn rotate_logs(&self) {
        let latest = self.log_file();
        if latest.exists() {
            let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
            let archived = self.cache.join(format!("{}.log", timestamp));
            let _ = fs::rename(&latest, &archived);
        }
        cleanup_old_logs(&self.cache, MAX_OLD_LOGS);
    }
}

/// Remove archived log files, keeping only the newest `keep`.
fn cleanup_old_logs(cache_dir: &Path, keep: usize) {
    let Ok(entries) = fs::read_dir(cache_dir) else { return };

    let mut logs: Vec<_> = entries
        .filter_map(|e| e.ok())
        .filter(|e| {
            let name = e.file_name();
            let name = name.to_string_lossy();
            name.ends_with(".log") && name != LATEST_LOG
        })
        .collect();

    // Oldest first; archive names sort by timestamp.
    logs.sort_by_key(|e| e.file_name());

    if logs.len() > keep {
        for entry in logs.iter().take(logs.len() - keep) {
            let _ = fs::remove_file(entry.path());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rooted_layout() {
        let paths = AppPaths::rooted("/tmp/qswr");
        assert_eq!(paths.session_db(), PathBuf::from("/tmp/qswr/session.db"));
        assert_eq!(paths.settings_db(), PathBuf::from("/tmp/qswr/settings.db"));
        assert_eq!(paths.log_file(), PathBuf::from("/tmp/qswr/logs/latest.log"));
    }

    #[test]
    fn test_rotation_keeps_newest_archives() {
        let dir = tempfile::tempdir().unwrap();
        let paths = AppPaths::rooted(dir.path());
        paths.ensure().unwrap();

        for i in 0..(MAX_OLD_LOGS + 3) {
            fs::write(paths.cache_dir().join(format!("20260101_0000{:02}.log", i)), "old").unwrap();
        }
        fs::write(paths.log_file(), "current").unwrap();

        paths.rotate_logs();

        assert!(!paths.log_file().exists());
        let remaining: Vec<String> = fs::read_dir(paths.cache_dir())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(remaining.len(), MAX_OLD_LOGS);
        assert!(!remaining.contains(&"20260101_000000.log".to_string()));
    }
}
