// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Everything touching the world outside the process: `ExifTool`, the trash,
//! and sidecar files.

use std::{
  collections::HashMap,
  ffi::{OsStr, OsString},
  fs,
  path::{Path, PathBuf},
  process::{Command, Output},
};

use serde::Deserialize;
use serde_json::Value;

use crate::{error::Error, prim::Tags};

/// Follows RFC 3339 (offset omitted when unknown) for parsing with `chrono`.
const DATETIME_READ_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Minimum supported (tested) version of `ExifTool`.
const EXIFTOOL_MIN_VERSION: (u32, u32) = (13, 10);

/// Reads metadata tags from a media file.
pub trait MetadataReader {
  /// Returns the value of each of `tags` found in `path`, keyed by bare tag
  /// name. Tags not present are absent from the result.
  fn read_tags(&self, path: &Path, tags: &[&str]) -> Result<Tags, Error>;
}

/// Sends files somewhere they can be recovered from.
pub trait Recycler {
  fn recycle(&self, path: &Path) -> Result<(), Error>;
}

/// The `ExifTool` executable.
pub struct ExifTool {
  program: PathBuf,
}

impl ExifTool {
  pub fn new(program: impl Into<PathBuf>) -> Self {
    Self {
      program: program.into(),
    }
  }

  /// Checks that `ExifTool` is present and new enough.
  pub fn check(&self) -> Result<(), Error> {
    let output = self.run(["-ver"])?;
    if !output.status.success() {
      return Err(Error::ExifToolUnavailable(format!(
        "`-ver` exited with {}",
        output.status
      )));
    }

    version_check(&String::from_utf8_lossy(&output.stdout), EXIFTOOL_MIN_VERSION)
  }

  fn run<I: IntoIterator<Item = S>, S: AsRef<OsStr>>(&self, args: I) -> Result<Output, Error> {
    let mut cmd = Command::new(&self.program);
    cmd.args(args);

    log::trace!(
      "Running ExifTool: {}",
      cmd
        .get_args()
        .map(OsStr::to_string_lossy)
        .collect::<Vec<_>>()
        .join(" ")
    );

    let output = cmd
      .output()
      .map_err(|e| Error::ExifToolUnavailable(e.to_string()))?;
    log::trace!("{}", String::from_utf8_lossy(&output.stdout));

    Ok(output)
  }
}

impl MetadataReader for ExifTool {
  fn read_tags(&self, path: &Path, tags: &[&str]) -> Result<Tags, Error> {
    let mut args = ["-json", "-d", DATETIME_READ_FORMAT].map(OsString::from).to_vec();
    args.extend(tags.iter().map(|t| OsString::from(format!("-{t}"))));
    args.push(path.as_os_str().to_os_string());

    let output = self.run(args)?;
    if !output.status.success() {
      return Err(Error::MetadataRead {
        path:   path.to_path_buf(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
      });
    }

    parse_tags(path, &output.stdout)
  }
}

/// One entry of `ExifTool`'s JSON output.
#[derive(Deserialize)]
struct Record {
  #[serde(rename = "SourceFile", default)]
  _source_file: Option<PathBuf>,
  #[serde(flatten)]
  tags:         HashMap<String, Value>,
}

/// Parses `ExifTool`'s JSON-formatted output for a single file. Non-string
/// values (e.g. numbers) are kept in their JSON text form.
fn parse_tags(path: &Path, stdout: &[u8]) -> Result<Tags, Error> {
  // `serde_json` doesn't handle the empty case.
  if stdout.iter().all(u8::is_ascii_whitespace) {
    return Ok(Tags::new());
  }

  let records =
    serde_json::from_slice::<Vec<Record>>(stdout).map_err(|source| Error::MetadataParse {
      path: path.to_path_buf(),
      source,
    })?;

  Ok(
    records
      .into_iter()
      .next()
      .map(|r| {
        r.tags
          .into_iter()
          .map(|(k, v)| match v {
            Value::String(s) => (k, s),
            other => (k, other.to_string()),
          })
          .collect()
      })
      .unwrap_or_default(),
  )
}

/// Returns whether `version`, from `ExifTool`'s stdout, is as new or newer than
/// `version_required_min`.
fn version_check(version: &str, version_required_min: (u32, u32)) -> Result<(), Error> {
  let version = version.trim();
  let Some((major, minor)) = version.split_once('.') else {
    return Err(Error::ExifToolVersionUnparsable(version.to_string()));
  };

  let (Ok(major), Ok(minor)) = (major.parse::<u32>(), minor.parse::<u32>()) else {
    return Err(Error::ExifToolVersionUnparsable(version.to_string()));
  };

  if (major, minor) >= version_required_min {
    Ok(())
  } else {
    Err(Error::ExifToolVersion {
      found:    version.to_string(),
      required: format!("{}.{}", version_required_min.0, version_required_min.1),
    })
  }
}

/// The platform's trash (freedesktop.org trash on Linux, the Finder's Trash on
/// macOS, the Recycle Bin on Windows). Nothing is touched until a file is
/// recycled.
pub struct Trash;

impl Recycler for Trash {
  fn recycle(&self, path: &Path) -> Result<(), Error> {
    trash::delete(path).map_err(|source| Error::Recycle {
      path: path.to_path_buf(),
      source,
    })
  }
}

/// Creates or overwrites the sidecar at `path`.
pub fn write_sidecar(path: &Path, contents: &str) -> Result<(), Error> {
  fs::write(path, contents).map_err(|e| Error::io(path, "Writing XMP sidecar", e))
}

pub fn remove_sidecar(path: &Path) -> Result<(), Error> {
  fs::remove_file(path).map_err(|e| Error::io(path, "Deleting XMP sidecar", e))
}


#[cfg(test)]
mod test_check {
  use super::*;
  use crate::testing::*;

  #[test]
  fn fails_when_missing() {
    let exiftool = ExifTool::new("/nonexistent/exiftool");

    assert_err!(exiftool.check(), "ExifTool is not available");
  }

  #[test]
  fn fails_when_version_query_fails() {
    // Exits non-zero without output, whatever its arguments.
    let exiftool = ExifTool::new("false");

    assert_err!(exiftool.check(), "ExifTool is not available (`-ver` exited with");
  }
}
