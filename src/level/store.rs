use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

use super::Level;
use crate::codec::CodecError;

/// Errors that can occur while loading or saving a level
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("cannot create directory \"{path}\": {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot open file \"{path}\": {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read from file \"{path}\": {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed write to file \"{path}\": {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("level file is empty")]
    Empty,

    #[error("level too large to encode: offset {size} exceeds 32 bits")]
    TooLarge { size: usize },

    #[error("invalid level name \"{name}\": must be a plain file name inside the level directory")]
    InvalidName { name: String },

    #[error("malformed level data: {0}")]
    Decode(#[from] CodecError),

    #[error(
        "directory regions out of order: vertices end {vertices_end}, lines end {lines_end}, directory at {directory_offset}"
    )]
    RegionOutOfBounds {
        vertices_end: u32,
        lines_end: u32,
        directory_offset: u32,
    },
}

/// Result type for level persistence
pub type LevelResult<T> = Result<T, LevelError>;

/// A directory of level files
#[derive(Debug, Clone)]
pub struct LevelStore {
    root: PathBuf,
}

impl LevelStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the level file `name`.
    ///
    /// Only plain relative names are accepted; absolute paths and `..`
    /// would escape the level directory.
    pub fn path_for(&self, name: &str) -> LevelResult<PathBuf> {
        let path = Path::new(name);
        let plain = path.components().next().is_some()
            && path.components().all(|part| matches!(part, Component::Normal(_)));
        if !plain {
            return Err(LevelError::InvalidName {
                name: name.to_owned(),
            });
        }
        Ok(self.root.join(path))
    }

    /// Write `level` under `name`, creating the level directory if needed.
    ///
    /// A failed write may leave a partial file behind.
    pub fn save(&self, level: &Level, name: &str) -> LevelResult<()> {
        let result = self
            .path_for(name)
            .and_then(|path| self.write_file(level, &path).map(|()| path));
        match result {
            Ok(path) => {
                log::info!("Level saved to \"{}\"", path.display());
                Ok(())
            }
            Err(err) => {
                log::warn!("Level save failed: {}", err);
                Err(err)
            }
        }
    }

    /// Read and decode the level stored under `name`
    pub fn load(&self, name: &str) -> LevelResult<Level> {
        let result = self.path_for(name).and_then(|path| {
            let level = Self::read_file(&path)?;
            log::info!(
                "Level loaded from \"{}\": {} vertices, {} lines",
                path.display(),
                level.vertices().len(),
                level.lines().len()
            );
            Ok(level)
        });
        if let Err(err) = &result {
            log::warn!("Level load failed for \"{}\": {}", name, err);
        }
        result
    }

    fn write_file(&self, level: &Level, path: &Path) -> LevelResult<()> {
        let bytes = level.encode()?;

        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(|source| LevelError::CreateDir {
                path: self.root.clone(),
                source,
            })?;
        }

        let mut file = File::create(path).map_err(|source| LevelError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        file.write_all(&bytes)
            .and_then(|()| file.flush())
            .map_err(|source| LevelError::Write {
                path: path.to_path_buf(),
                source,
            })
    }

    fn read_file(path: &Path) -> LevelResult<Level> {
        let mut file = File::open(path).map_err(|source| LevelError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|source| LevelError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        Level::decode(&bytes)
    }
}
