//! Disk helpers backing the file-based services

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Join path parts onto a base, passing absolute parts through unchanged
pub fn resolve_path(base: impl AsRef<Path>, parts: &[&str]) -> PathBuf {
    let mut resolved = base.as_ref().to_path_buf();
    for part in parts {
        let part = Path::new(part);
        if part.is_absolute() {
            resolved = part.to_path_buf();
        } else {
            resolved.push(part);
        }
    }
    resolved
}

/// Write contents, creating parent directories as needed
pub fn write_file(destination: impl AsRef<Path>, contents: &str) -> io::Result<()> {
    let destination = destination.as_ref();
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(destination, contents)
}

/// Read a file to a string; missing files surface as `NotFound`
pub fn read_file(source: impl AsRef<Path>) -> io::Result<String> {
    let source = source.as_ref();
    if !source.exists() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("No file to read at {}", source.display()),
        ));
    }
    fs::read_to_string(source)
}

/// Remove a file if it exists; missing files are a no-op
pub fn delete_file(destination: impl AsRef<Path>) -> io::Result<()> {
    let destination = destination.as_ref();
    if destination.exists() {
        fs::remove_file(destination)?;
    }
    Ok(())
}

pub fn create_dir(destination: impl AsRef<Path>) -> io::Result<()> {
    fs::create_dir_all(destination)
}

/// Remove a directory and its contents if it exists
pub fn delete_dir(target: impl AsRef<Path>) -> io::Result<()> {
    let target = target.as_ref();
    if target.exists() {
        fs::remove_dir_all(target)?;
    }
    Ok(())
}

pub fn does_file_exist(target: impl AsRef<Path>) -> bool {
    target.as_ref().is_file()
}

pub fn does_dir_exist(target: impl AsRef<Path>) -> bool {
    target.as_ref().exists()
}

pub fn is_dir(target: impl AsRef<Path>) -> bool {
    target.as_ref().is_dir()
}
