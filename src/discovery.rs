// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Resolves the user's target into the media files to process.

use std::{
  fs,
  path::{Path, PathBuf},
};

use walkdir::WalkDir;

use crate::{
  error::Error,
  prim::{MediaFile, is_supported},
};

/// Returns supported media files under `target`, which may be a directory
/// (searched recursively), a single file, or a glob pattern. Sorted by path,
/// without duplicates.
pub fn discover(target: &Path) -> Result<Vec<MediaFile>, Error> {
  let mut paths = if target.is_dir() {
    walk(target)?
  } else if target.is_file() {
    if !is_supported(target) {
      return Err(Error::invalid_target(target, "Not a supported media file"));
    }
    vec![target.to_path_buf()]
  } else if is_glob(target) {
    expand(target)?
  } else {
    return Err(Error::invalid_target(target, "No such file or directory"));
  };

  paths.sort();
  paths.dedup();
  log::debug!("{}: Found {} media files.", target.display(), paths.len());

  Ok(paths.into_iter().filter_map(MediaFile::new).collect())
}

/// Supported files in the same directory as `path`, excluding `path` itself.
/// Not recursive.
pub fn siblings(path: &Path) -> Result<Vec<PathBuf>, Error> {
  let dir = match path.parent() {
    Some(p) if !p.as_os_str().is_empty() => p,
    _ => Path::new("."),
  };

  let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, "Listing directory", e))?;

  let mut siblings = Vec::new();
  for entry in entries {
    let entry = entry.map_err(|e| Error::io(dir, "Listing directory", e))?;
    if !entry.file_type().is_ok_and(|t| t.is_file()) {
      continue;
    }

    let sibling = path.with_file_name(entry.file_name());
    if sibling != path && is_supported(&sibling) {
      siblings.push(sibling);
    }
  }

  siblings.sort();
  Ok(siblings)
}

fn walk(dir: &Path) -> Result<Vec<PathBuf>, Error> {
  let mut paths = Vec::new();
  for entry in WalkDir::new(dir) {
    let entry = entry.map_err(|e| {
      let path = e.path().unwrap_or(dir).to_path_buf();
      Error::io(path, "Walking directory", e.into())
    })?;

    if entry.file_type().is_file() && is_supported(entry.path()) {
      paths.push(entry.into_path());
    }
  }

  Ok(paths)
}

fn is_glob(target: &Path) -> bool {
  target
    .to_string_lossy()
    .contains(|c| matches!(c, '*' | '?' | '['))
}

fn expand(pattern: &Path) -> Result<Vec<PathBuf>, Error> {
  let matches = glob::glob(&pattern.to_string_lossy())
    .map_err(|e| Error::invalid_target(pattern, format!("Invalid glob pattern ({e})")))?;

  let mut paths = Vec::new();
  for entry in matches {
    let path = entry.map_err(|e| {
      let path = e.path().to_path_buf();
      Error::io(path, "Expanding glob pattern", e.into_error())
    })?;

    if path.is_file() && is_supported(&path) {
      paths.push(path);
    }
  }

  if paths.is_empty() {
    return Err(Error::invalid_target(pattern, "No media files match pattern"));
  }

  Ok(paths)
}
