// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Media file handling.

use core::fmt;
use std::{
  ffi::{OsStr, OsString},
  fmt::{Display, Formatter},
  fs,
  path::{Path, PathBuf},
};

use crate::error::Error;

/// Supported extensions (compared case-insensitively) and the kind of media
/// each one holds.
const EXTENSIONS: [(&str, MediaKind); 12] = [
  ("mp4", MediaKind::Video),
  ("mov", MediaKind::Video),
  ("avi", MediaKind::Video),
  ("jpg", MediaKind::Image),
  ("jpeg", MediaKind::Image),
  ("png", MediaKind::Image),
  ("gif", MediaKind::Image),
  ("tiff", MediaKind::Image),
  ("tif", MediaKind::Image),
  ("webp", MediaKind::Image),
  ("heic", MediaKind::Image),
  ("heif", MediaKind::Image),
];

/// AppleDouble resource forks (e.g. `._IMG_0001.jpg`) left behind on non-Apple
/// file systems.
const HIDDEN_PREFIX: &str = "._";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
  Image,
  Video,
}

impl MediaKind {
  /// Kind of media at `path`, judged by extension alone.
  pub fn from_path(path: &Path) -> Option<Self> {
    let ext = path.extension()?.to_str()?;
    EXTENSIONS
      .iter()
      .find(|(e, _)| e.eq_ignore_ascii_case(ext))
      .map(|(_, kind)| *kind)
  }
}

impl Display for MediaKind {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      MediaKind::Image => write!(f, "image"),
      MediaKind::Video => write!(f, "video"),
    }
  }
}

/// Whether the file name follows the hidden-file convention.
pub fn is_hidden(path: &Path) -> bool {
  path
    .file_name()
    .is_some_and(|n| n.to_string_lossy().starts_with(HIDDEN_PREFIX))
}

/// Whether `path` names a media file this tool handles.
pub fn is_supported(path: &Path) -> bool {
  !is_hidden(path) && MediaKind::from_path(path).is_some()
}

/// Path to the sidecar for `path`, e.g. `IMG_0001.HEIC` -> `IMG_0001.HEIC.xmp`.
pub fn sidecar_path(path: &Path) -> PathBuf {
  let mut sidecar = OsString::from(path.as_os_str());
  sidecar.push(".xmp");
  PathBuf::from(sidecar)
}

/// A single media file discovered on disk. Derived attributes are computed on
/// request, so sidecar existence always reflects the file system at the time of
/// asking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
  path: PathBuf,
  kind: MediaKind,
}

impl MediaFile {
  /// Returns `None` if `path` is not a supported media file.
  pub fn new(path: impl Into<PathBuf>) -> Option<Self> {
    let path = path.into();
    if is_hidden(&path) {
      return None;
    }
    let kind = MediaKind::from_path(&path)?;

    Some(Self { path, kind })
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  pub fn kind(&self) -> MediaKind {
    self.kind
  }

  pub fn is_image(&self) -> bool {
    self.kind == MediaKind::Image
  }

  /// Path without its final extension. Files sharing a stem belong together.
  pub fn stem(&self) -> PathBuf {
    self.path.with_extension("")
  }

  pub fn extension(&self) -> &OsStr {
    self.path.extension().unwrap_or_default()
  }

  pub fn sidecar_path(&self) -> PathBuf {
    sidecar_path(&self.path)
  }

  pub fn has_sidecar(&self) -> bool {
    self.sidecar_path().is_file()
  }

  /// Size on disk, in bytes.
  pub fn size(&self) -> Result<u64, Error> {
    fs::metadata(&self.path)
      .map(|m| m.len())
      .map_err(|e| Error::io(&self.path, "Reading file size", e))
  }
}

impl Display for MediaFile {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.path.display())
  }
}
