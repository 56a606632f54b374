use anyhow::{Result, Context, anyhow};
use std::fs;
use std::path::{Path, PathBuf};

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Copy a regular file into a directory, keeping its file name
    pub fn copy_into_dir<P1: AsRef<Path>, P2: AsRef<Path>>(file: P1, dir: P2) -> Result<PathBuf> {
        let file = file.as_ref();

        let metadata = fs::metadata(file)
            .with_context(|| format!("Unable to stat file: {:?}", file))?;
        if !metadata.is_file() {
            return Err(anyhow!("Not a regular file: {:?}", file));
        }

        let file_name = file
            .file_name()
            .ok_or_else(|| anyhow!("File has no name: {:?}", file))?;
        let target = dir.as_ref().join(file_name);

        Self::ensure_dir(dir.as_ref())?;
        fs::copy(file, &target)
            .with_context(|| format!("Copy interrupted: {:?} -> {:?}", file, target))?;

        Ok(target)
    }
}
