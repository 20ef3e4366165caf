// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Capture timestamp resolution, falling back to the nearest neighboring file
//! when a group carries no usable date & time of its own.

use core::fmt;
use std::{
  collections::HashSet,
  fmt::{Display, Formatter},
  path::{Path, PathBuf},
};

use super::TagCache;
use crate::{
  discovery,
  error::Error,
  prim::{CaptureTime, DateField, MediaFile},
};

/// Where a resolved timestamp came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
  /// A top-level EXIF/XMP field of the file itself.
  ExifField,
  /// A container / track field of the file itself (videos).
  TrackField,
  /// Borrowed from another file in the same directory.
  NeighborInferred,
  /// Supplied by the user for the whole run.
  Override,
}

impl Display for Provenance {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      Provenance::ExifField => write!(f, "metadata"),
      Provenance::TrackField => write!(f, "track metadata"),
      Provenance::NeighborInferred => write!(f, "neighboring file"),
      Provenance::Override => write!(f, "command line"),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTimestamp {
  pub time:       CaptureTime,
  pub provenance: Provenance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampOutcome {
  Resolved(ResolvedTimestamp),
  /// Found in a field photo libraries already read, so no sidecar is needed.
  Exposed(DateField),
  NotFound,
}

/// Run-wide timestamp settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampPolicy {
  /// Used for every file instead of reading metadata.
  pub iso:              Option<CaptureTime>,
  /// Write timestamps even when found in an exposed field.
  pub override_exposed: bool,
}

/// Resolves the capture timestamp for a group's `members` (sorted by path).
/// The first member with a valid date field decides. Failing that, the
/// nearest file in the first member's directory is used, skipping the group's
/// own members and anything in `excluded`.
pub fn resolve_timestamp(
  cache: &mut TagCache,
  members: &[MediaFile],
  policy: TimestampPolicy,
  excluded: &HashSet<PathBuf>,
) -> Result<TimestampOutcome, Error> {
  let Some(first) = members.first() else {
    return Ok(TimestampOutcome::NotFound);
  };

  if let Some(time) = policy.iso {
    log::debug!("{first}: Using provided date & time {time}.");
    return Ok(TimestampOutcome::Resolved(ResolvedTimestamp {
      time,
      provenance: Provenance::Override,
    }));
  }

  for member in members {
    let Some((field, time)) = find_field(cache, member.path())? else {
      log::debug!("{member}: No creation date.");
      continue;
    };

    if field.is_exposed() {
      if !policy.override_exposed {
        return Ok(TimestampOutcome::Exposed(field));
      }
      log::info!("{member}: Overriding exposed {field}.");
    }

    let provenance = if field.is_track() {
      log::info!("{member}: Recovered creation date from track metadata ({field}).");
      Provenance::TrackField
    } else {
      Provenance::ExifField
    };

    return Ok(TimestampOutcome::Resolved(ResolvedTimestamp { time, provenance }));
  }

  let mut skip = excluded.clone();
  skip.extend(members.iter().map(|m| m.path().to_path_buf()));

  Ok(
    infer_from_neighbors(cache, first.path(), &skip)?
      .map_or(TimestampOutcome::NotFound, TimestampOutcome::Resolved),
  )
}

/// Searches outward from `target` through its directory in sorted order,
/// checking the preceding file before the following one at each distance.
fn infer_from_neighbors(
  cache: &mut TagCache,
  target: &Path,
  skip: &HashSet<PathBuf>,
) -> Result<Option<ResolvedTimestamp>, Error> {
  let mut sequence = discovery::siblings(target)?
    .into_iter()
    .filter(|p| !skip.contains(p))
    .collect::<Vec<_>>();
  sequence.push(target.to_path_buf());
  sequence.sort();

  let Some(pos) = sequence.iter().position(|p| p == target) else {
    return Ok(None);
  };

  for distance in 1..sequence.len() {
    let before = pos.checked_sub(distance);
    let after = Some(pos + distance).filter(|&i| i < sequence.len());

    for neighbor in [before, after].into_iter().flatten().map(|i| &sequence[i]) {
      if let Some((field, time)) = find_field(cache, neighbor)? {
        log::info!(
          "{}: Inferred creation date from {} ({field}).",
          target.display(),
          neighbor.display()
        );
        return Ok(Some(ResolvedTimestamp {
          time,
          provenance: Provenance::NeighborInferred,
        }));
      }
    }
  }

  Ok(None)
}

/// First date field of `path`, in priority order, holding a valid value.
fn find_field(cache: &mut TagCache, path: &Path) -> Result<Option<(DateField, CaptureTime)>, Error> {
  let tags = cache.get(path)?;

  for field in DateField::PRIORITY {
    let Some(value) = field.lookup(tags) else {
      continue;
    };

    match value.parse::<CaptureTime>() {
      Ok(time) => return Ok(Some((field, time))),
      Err(e) => log::warn!("{}: Invalid {field} ({e}).", path.display()),
    }
  }

  Ok(None)
}
