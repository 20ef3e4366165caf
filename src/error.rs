// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Fatal errors. Any of these aborts the whole run with exit status 1.

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("ExifTool is not available ({0}). Please install ExifTool and try again.")]
  ExifToolUnavailable(String),

  #[error(
    "ExifTool version {found} is too old ({required} or newer is required). Please update ExifTool and try again."
  )]
  ExifToolVersion { found: String, required: String },

  #[error("Unexpected ExifTool version string: \"{0}\".")]
  ExifToolVersionUnparsable(String),

  #[error("{}: {reason}.", .target.display())]
  InvalidTarget { target: PathBuf, reason: String },

  #[error("{}: Failed to extract metadata.\nstderr:\n{stderr}", .path.display())]
  MetadataRead { path: PathBuf, stderr: String },

  #[error("{}: Failed to parse ExifTool output ({source}).", .path.display())]
  MetadataParse {
    path:   PathBuf,
    source: serde_json::Error,
  },

  #[error("{}: Failed to recycle ({source}).", .path.display())]
  Recycle {
    path:   PathBuf,
    source: trash::Error,
  },

  #[error("{}: {action} failed ({source}).", .path.display())]
  Io {
    path:   PathBuf,
    action: &'static str,
    source: io::Error,
  },
}

impl Error {
  pub fn invalid_target(target: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
    Self::InvalidTarget {
      target: target.into(),
      reason: reason.into(),
    }
  }

  pub fn io(path: impl Into<PathBuf>, action: &'static str, source: io::Error) -> Self {
    Self::Io {
      path: path.into(),
      action,
      source,
    }
  }
}
