use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Persistent storage at the granularity this layer needs: whole-file reads
/// and writes plus a directory listing. ROM images and save files are small
/// enough that streaming access buys nothing here.
pub trait Vfs {
    /// Reads the full contents of `path`. A missing file surfaces as
    /// `io::ErrorKind::NotFound`.
    fn read(&self, path: &str) -> io::Result<Vec<u8>>;

    /// Creates or replaces `path` with `bytes`.
    fn write(&self, path: &str, bytes: &[u8]) -> io::Result<()>;

    /// File names (not paths) of the plain files directly under `dir`.
    fn list(&self, dir: &str) -> io::Result<Vec<String>>;
}

/// `std::fs`-backed storage rooted at a data directory.
pub struct StdVfs {
    root: PathBuf,
}

impl StdVfs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(Path::new(path))
    }
}

impl Vfs for StdVfs {
    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        fs::read(self.resolve(path))
    }

    fn write(&self, path: &str, bytes: &[u8]) -> io::Result<()> {
        fs::write(self.resolve(path), bytes)
    }

    fn list(&self, dir: &str) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(self.resolve(dir))? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                match entry.file_name().into_string() {
                    Ok(name) => names.push(name),
                    Err(name) => log::warn!("skipping non-UTF-8 file name {:?}", name),
                }
            }
        }
        names.sort();
        Ok(names)
    }
}
