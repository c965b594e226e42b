use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("file not found: {}", .0.display())]
    MissingFile(PathBuf),
    #[error("could not access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("refusing to overwrite {}: header path equals source path (no `.c` in name)", .0.display())]
    SameOutputPath(PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Map an I/O error on `path`, turning `NotFound` into [`Error::MissingFile`].
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Error::MissingFile(path.to_path_buf())
        } else {
            Error::Io { path: path.to_path_buf(), source }
        }
    }
}
