use std::{
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
};

use path_absolutize::Absolutize;


#[derive(thiserror::Error, Debug)]
#[error("{0}")]
pub struct FileError(String);

pub trait FileSystem {
    type Reader: Read;

    fn is_file(&self, path: &Path) -> io::Result<bool>;

    fn open_read(&self, path: &Path) -> io::Result<Self::Reader>;
}

pub struct RealFileSystem;

impl RealFileSystem {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl Default for RealFileSystem {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for RealFileSystem {
    type Reader = File;

    #[inline]
    fn is_file(&self, path: &Path) -> io::Result<bool> {
        Ok(path.metadata()?.is_file())
    }

    #[inline]
    fn open_read(&self, path: &Path) -> io::Result<Self::Reader> {
        File::open(path)
    }
}

/// Resolves `path` against `cwd`. Falls back to the path as given.
pub fn resolve_path<C: AsRef<Path>, P: AsRef<Path>>(cwd: C, path: P) -> PathBuf {
    let path = path.as_ref();
    match path.absolutize_from(cwd.as_ref()) {
        Ok(abs) => abs.into_owned(),
        Err(_) => path.to_path_buf(),
    }
}

/// Opens `path` for reading, distinguishing a missing file from an I/O failure.
pub fn open_source<S: FileSystem, C: AsRef<Path>, P: AsRef<Path>>(
    file_system: &S,
    cwd: C,
    path: P,
) -> Result<(PathBuf, S::Reader), FileError> {
    let full = resolve_path(cwd, path);
    match file_system.is_file(&full) {
        Ok(true) => {}
        Ok(false) => {
            return Err(FileError(format!(
                "File not found: \"{}\"",
                full.display()
            )))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(FileError(format!(
                "File not found: \"{}\"",
                full.display()
            )))
        }
        Err(e) => {
            return Err(FileError(format!(
                "Failed to open \"{}\" for reading: {e}",
                full.display()
            )))
        }
    }
    match file_system.open_read(&full) {
        Ok(reader) => Ok((full, reader)),
        Err(e) => Err(FileError(format!(
            "Failed to open \"{}\" for reading: {e}",
            full.display()
        ))),
    }
}
