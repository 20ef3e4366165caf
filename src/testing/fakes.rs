// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Stand-ins for `ExifTool` and the system trash.

use std::{
  cell::RefCell,
  collections::HashMap,
  fs, io,
  path::{Path, PathBuf},
};

use crate::{
  error::Error,
  io::{MetadataReader, Recycler},
  prim::Tags,
};

/// Returns scripted tags per path and records every read. Paths without a
/// script read as having no tags.
#[derive(Default)]
pub struct FakeReader {
  tags:  HashMap<PathBuf, Tags>,
  reads: RefCell<Vec<PathBuf>>,
  fail:  bool,
}

impl FakeReader {
  pub fn new() -> Self {
    Self::default()
  }

  /// Every read fails, as `ExifTool` exiting non-zero would.
  pub fn failing() -> Self {
    Self {
      fail: true,
      ..Self::default()
    }
  }

  pub fn with(mut self, path: impl Into<PathBuf>, tags: &[(&str, &str)]) -> Self {
    self.tags.insert(
      path.into(),
      tags
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect(),
    );
    self
  }

  /// Paths read so far, in order.
  pub fn reads(&self) -> Vec<PathBuf> {
    self.reads.borrow().clone()
  }
}

impl MetadataReader for FakeReader {
  fn read_tags(&self, path: &Path, _tags: &[&str]) -> Result<Tags, Error> {
    self.reads.borrow_mut().push(path.to_path_buf());

    if self.fail {
      return Err(Error::MetadataRead {
        path:   path.to_path_buf(),
        stderr: "Error: File format error".to_string(),
      });
    }

    Ok(self.tags.get(path).cloned().unwrap_or_default())
  }
}

/// Moves recycled files, flattened, into a trash directory.
pub struct FakeTrash {
  dir:      PathBuf,
  recycled: RefCell<Vec<PathBuf>>,
}

impl FakeTrash {
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    Self {
      dir:      dir.into(),
      recycled: RefCell::new(Vec::new()),
    }
  }

  pub fn recycled(&self) -> Vec<PathBuf> {
    self.recycled.borrow().clone()
  }
}

impl Recycler for FakeTrash {
  fn recycle(&self, path: &Path) -> Result<(), Error> {
    let name = path
      .file_name()
      .ok_or_else(|| Error::io(path, "Recycling", io::ErrorKind::InvalidInput.into()))?;

    fs::rename(path, self.dir.join(name)).map_err(|e| Error::io(path, "Recycling", e))?;
    self.recycled.borrow_mut().push(path.to_path_buf());

    Ok(())
  }
}
