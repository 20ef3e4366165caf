// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Resolution of the values written to sidecars: capture timestamps and Live
//! Photo content identifiers.

mod content_id;
mod timestamp;

use std::{
  collections::{HashMap, hash_map::Entry},
  path::{Path, PathBuf},
};

pub use content_id::*;
pub use timestamp::*;

use crate::{
  error::Error,
  io::MetadataReader,
  prim::{REQUESTED, Tags},
};

/// Reads each file's tags at most once per run.
pub struct TagCache<'r> {
  reader: &'r dyn MetadataReader,
  cache:  HashMap<PathBuf, Tags>,
}

impl<'r> TagCache<'r> {
  pub fn new(reader: &'r dyn MetadataReader) -> Self {
    Self {
      reader,
      cache: HashMap::new(),
    }
  }

  /// Tags for `path`, reading them on first request.
  pub fn get(&mut self, path: &Path) -> Result<&Tags, Error> {
    match self.cache.entry(path.to_path_buf()) {
      Entry::Occupied(e) => Ok(&*e.into_mut()),
      Entry::Vacant(e) => {
        log::debug!("{}: Reading metadata.", path.display());
        let tags = self.reader.read_tags(path, &REQUESTED)?;
        Ok(&*e.insert(tags))
      }
    }
  }
}
