//! Capability-based file helpers for the CLI's JSON inputs and outputs.

use std::io::{self, BufReader, ErrorKind};

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use serde::de::DeserializeOwned;

use crate::CliError;

/// Open a UTF-8 file path using ambient authority.
pub(crate) fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Open the directory holding `path` and return it with the file name.
fn open_parent(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} has no file name")))?;
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, name.to_owned()))
}

/// Split `path` into an ambient anchor directory and the remainder below
/// it.
///
/// The anchor takes every leading root, prefix, `.` and `..` component, so
/// the remainder never has to climb out of it. An empty anchor is the
/// current directory.
fn anchor_and_rest(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let mut anchor = Utf8PathBuf::new();
    let mut rest = Utf8PathBuf::new();
    for component in path.components() {
        match component {
            Utf8Component::Prefix(_)
            | Utf8Component::RootDir
            | Utf8Component::CurDir
            | Utf8Component::ParentDir
                if rest.as_str().is_empty() =>
            {
                anchor.push(component);
            }
            other => rest.push(other),
        }
    }
    if anchor.as_str().is_empty() {
        anchor.push(".");
    }
    let dir = fs_utf8::Dir::open_ambient_dir(&anchor, ambient_authority())?;
    Ok((dir, rest))
}

/// Create every missing directory above `path`.
pub(crate) fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() {
        return Ok(());
    }
    let (anchor, rest) = anchor_and_rest(parent)?;
    if rest.as_str().is_empty() {
        return Ok(());
    }
    anchor.create_dir_all(&rest)
}

/// Return whether `path` exists and is a regular file.
pub(crate) fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_parent(path)?;
    dir.metadata(name.as_str()).map(|meta| meta.is_file())
}

/// Replace the contents of `path`, creating parent directories as needed.
///
/// The bytes go to a staging file in the same directory which is then
/// renamed over `path`, so readers see either the old or the new contents.
pub(crate) fn write_file(path: &Utf8Path, contents: &[u8]) -> io::Result<()> {
    ensure_parent_dir(path)?;
    let (dir, name) = open_parent(path)?;
    let staging = format!(".{name}.tmp");
    dir.write(staging.as_str(), contents)?;
    dir.rename(staging.as_str(), &dir, name.as_str())
}

/// Take an exclusive advisory lock on `<path>.lock`, creating it and any
/// missing parent directories.
///
/// The lock is held until the returned file is dropped.
pub(crate) fn lock_beside(path: &Utf8Path) -> io::Result<std::fs::File> {
    ensure_parent_dir(path)?;
    let (dir, name) = open_parent(path)?;
    let mut options = fs_utf8::OpenOptions::new();
    options.create(true).truncate(false).write(true);
    let file = dir.open_with(format!("{name}.lock"), &options)?.into_std();
    file.lock()?;
    Ok(file)
}

/// Fail unless `path` names an existing regular file.
pub(crate) fn require_file(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == ErrorKind::NotFound => Err(CliError::MissingSourceFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Decode the JSON document stored at `path`.
pub(crate) fn read_json<T: DeserializeOwned>(
    path: &Utf8Path,
    field: &'static str,
) -> Result<T, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenInput {
        field,
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::ParseInput {
        field,
        path: path.to_path_buf(),
        source,
    })
}

/// Like [`read_json`], but a missing file yields `None`.
pub(crate) fn read_optional_json<T: DeserializeOwned>(
    path: &Utf8Path,
    field: &'static str,
) -> Result<Option<T>, CliError> {
    match open_utf8_file(path) {
        Ok(file) => serde_json::from_reader(BufReader::new(file))
            .map(Some)
            .map_err(|source| CliError::ParseInput {
                field,
                path: path.to_path_buf(),
                source,
            }),
        Err(source) if source.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(CliError::OpenInput {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}
