//! In-memory mock of the [`FileSystem`] trait.
//!
//! Simulates a `/proc`-shaped tree entirely in memory so collector tests
//! can run anywhere and simulate racy states (a listed PID whose records
//! are already gone) that are hard to reproduce against a live kernel.

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};

use crate::collector::traits::FileSystem;

/// In-memory filesystem for testing.
#[derive(Debug, Clone, Default)]
pub struct MockFs {
    files: HashMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
}

impl MockFs {
    /// Creates an empty mock filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file, creating parent directories implicitly.
    pub fn add_file(&mut self, path: impl AsRef<Path>, content: impl Into<String>) {
        let path = path.as_ref().to_path_buf();
        self.add_ancestors(&path);
        self.files.insert(path, content.into());
    }

    /// Adds a directory (and its ancestors).
    pub fn add_dir(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();
        self.add_ancestors(&path);
        self.directories.insert(path);
    }

    /// Adds a process directory with its stat, status, and cmdline records.
    pub fn add_process(&mut self, pid: u32, stat: &str, status: &str, cmdline: &str) {
        let base = PathBuf::from(format!("/proc/{}", pid));
        self.add_dir(&base);
        self.add_file(base.join("stat"), stat);
        self.add_file(base.join("status"), status);
        self.add_file(base.join("cmdline"), cmdline);
    }

    /// Removes a process directory and its records, simulating an exit
    /// between directory listing and record read.
    pub fn remove_process(&mut self, pid: u32) {
        let base = PathBuf::from(format!("/proc/{}", pid));
        self.files.retain(|path, _| !path.starts_with(&base));
        self.directories.remove(&base);
    }

    fn add_ancestors(&mut self, path: &Path) {
        let mut parent = path.parent();
        while let Some(p) = parent {
            if !p.as_os_str().is_empty() {
                self.directories.insert(p.to_path_buf());
            }
            parent = p.parent();
        }
    }
}

impl FileSystem for MockFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("file not found: {:?}", path),
            )
        })
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.directories.contains(path)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        if !self.directories.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("directory not found: {:?}", path),
            ));
        }

        let mut entries = HashSet::new();
        for file in self.files.keys() {
            if file.parent() == Some(path) {
                entries.insert(file.clone());
            }
        }
        for dir in &self.directories {
            if dir.parent() == Some(path) {
                entries.insert(dir.clone());
            }
        }
        Ok(entries.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_file_creates_ancestors() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/1/stat", "1 (init) S ...");

        assert!(fs.exists(Path::new("/proc/1/stat")));
        assert!(fs.exists(Path::new("/proc/1")));
        assert!(fs.exists(Path::new("/proc")));
        assert_eq!(
            fs.read_to_string(Path::new("/proc/1/stat")).unwrap(),
            "1 (init) S ..."
        );
    }

    #[test]
    fn read_dir_lists_direct_children_only() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/1/stat", "a");
        fs.add_file("/proc/1/status", "b");
        fs.add_file("/proc/2/stat", "c");
        fs.add_file("/proc/uptime", "1.0 1.0");

        let entries = fs.read_dir(Path::new("/proc")).unwrap();
        assert_eq!(entries.len(), 3); // 1, 2, uptime

        let entries = fs.read_dir(Path::new("/proc/1")).unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn missing_paths_are_not_found() {
        let fs = MockFs::new();
        let err = fs.read_to_string(Path::new("/proc/uptime")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(fs.read_dir(Path::new("/proc")).is_err());
    }

    #[test]
    fn remove_process_drops_its_records() {
        let mut fs = MockFs::new();
        fs.add_process(10, "10 (a) S", "Uid:\t0\t0\t0\t0\n", "a\0");
        assert!(fs.exists(Path::new("/proc/10/stat")));

        fs.remove_process(10);
        assert!(!fs.exists(Path::new("/proc/10")));
        assert!(!fs.exists(Path::new("/proc/10/stat")));
        // The proc root itself survives.
        assert!(fs.exists(Path::new("/proc")));
    }
}
