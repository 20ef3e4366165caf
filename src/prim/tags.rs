// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Metadata tag names and lookups.
//!
//! Names are from `ExifTool`'s tags: <https://exiftool.org/TagNames/>.

use core::fmt;
use std::{
  collections::HashMap,
  fmt::{Display, Formatter},
};

/// Tag name -> value, as reported by the metadata reader. Absent tags are
/// absent keys.
pub type Tags = HashMap<String, String>;

/// Everything either resolver needs, requested in a single read per file.
pub const REQUESTED: [&str; 7] = [
  "EXIF:DateTimeOriginal",
  "EXIF:CreateDate",
  "XMP:DateCreated",
  "XMP:CreateDate",
  "MakerNotes:ContentIdentifier",
  "Track*:MediaCreateDate",
  "Track*:TrackCreateDate",
];

/// Links the image and video of a Live Photo.
pub const CONTENT_IDENTIFIER: &str = "ContentIdentifier";

/// Date & time fields, in order of priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
  DateTimeOriginal,
  CreateDate,
  DateCreated,
  MediaCreateDate,
  TrackCreateDate,
}

impl DateField {
  pub const PRIORITY: [DateField; 5] = [
    DateField::DateTimeOriginal,
    DateField::CreateDate,
    DateField::DateCreated,
    DateField::MediaCreateDate,
    DateField::TrackCreateDate,
  ];

  pub fn name(self) -> &'static str {
    match self {
      DateField::DateTimeOriginal => "DateTimeOriginal",
      DateField::CreateDate => "CreateDate",
      DateField::DateCreated => "DateCreated",
      DateField::MediaCreateDate => "MediaCreateDate",
      DateField::TrackCreateDate => "TrackCreateDate",
    }
  }

  /// EXIF fields photo libraries already read on their own.
  pub fn is_exposed(self) -> bool {
    matches!(self, DateField::DateTimeOriginal | DateField::CreateDate)
  }

  /// Container / track level fields, found in video files.
  pub fn is_track(self) -> bool {
    matches!(self, DateField::MediaCreateDate | DateField::TrackCreateDate)
  }

  /// Finds this field's value in `tags`. Track fields may come back under a
  /// per-track name (e.g. `Track2MediaCreateDate`), so any key containing the
  /// field name matches, preferring an exact match and then the first key in
  /// sorted order.
  pub fn lookup(self, tags: &Tags) -> Option<&str> {
    let name = self.name();
    if let Some(value) = tags.get(name) {
      return Some(value.as_str());
    }
    if !self.is_track() {
      return None;
    }

    tags
      .iter()
      .filter(|(k, _)| k.contains(name))
      .min_by(|a, b| a.0.cmp(b.0))
      .map(|(_, v)| v.as_str())
  }
}

impl Display for DateField {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.name())
  }
}
