// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Grouping of media files sharing a file name stem.

use core::fmt;
use std::{
  collections::HashMap,
  fmt::{Display, Formatter},
  path::PathBuf,
};

use super::MediaFile;

/// How the members of a group relate to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
  /// A single file.
  Standalone,
  /// One image and one video.
  LivePhotoPair,
  /// Two images, one of which is presumably a low-resolution preview.
  PreviewPair,
  /// Two images and one video.
  PreviewTriple,
  /// Anything else (e.g. two videos). Never processed.
  Malformed,
}

impl Display for GroupKind {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      GroupKind::Standalone => write!(f, "standalone file"),
      GroupKind::LivePhotoPair => write!(f, "Live Photo pair"),
      GroupKind::PreviewPair => write!(f, "preview pair"),
      GroupKind::PreviewTriple => write!(f, "preview triple"),
      GroupKind::Malformed => write!(f, "malformed group"),
    }
  }
}

/// Media files sharing a stem (path without final extension), members sorted
/// by path.
#[derive(Debug, Clone)]
pub struct FileGroup {
  stem:    PathBuf,
  members: Vec<MediaFile>,
}

impl FileGroup {
  pub fn members(&self) -> &[MediaFile] {
    &self.members
  }

  pub fn kind(&self) -> GroupKind {
    let images = self.members.iter().filter(|m| m.is_image()).count();
    let videos = self.members.len() - images;

    match (images, videos) {
      (1, 0) | (0, 1) => GroupKind::Standalone,
      (1, 1) => GroupKind::LivePhotoPair,
      (2, 0) => GroupKind::PreviewPair,
      (2, 1) => GroupKind::PreviewTriple,
      _ => GroupKind::Malformed,
    }
  }
}

impl Display for FileGroup {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.stem.display())
  }
}

/// Partitions `files` by stem. Groups come out in order of first appearance.
pub fn group_by_stem<'a>(files: impl IntoIterator<Item = &'a MediaFile>) -> Vec<FileGroup> {
  let mut groups: Vec<FileGroup> = Vec::new();
  let mut index: HashMap<PathBuf, usize> = HashMap::new();

  for file in files {
    let stem = file.stem();
    if let Some(&i) = index.get(&stem) {
      groups[i].members.push(file.clone());
    } else {
      index.insert(stem.clone(), groups.len());
      groups.push(FileGroup {
        stem,
        members: vec![file.clone()],
      });
    }
  }

  for group in &mut groups {
    group.members.sort_by(|a, b| a.path().cmp(b.path()));
  }

  groups
}
