// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Live Photo content identifier resolution.

use std::path::PathBuf;

use uuid::Uuid;

use super::TagCache;
use crate::{
  error::Error,
  prim::{CONTENT_IDENTIFIER, MediaFile},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentIdOutcome {
  /// Read from at least one member, and no member disagrees.
  Found(String),
  /// No member has one, so a fresh one was made.
  Generated(String),
  /// Two members disagree. The pair must be left alone.
  Mismatch {
    path:     PathBuf,
    expected: String,
    found:    String,
  },
}

impl ContentIdOutcome {
  /// The identifier to write, if any.
  pub fn id(&self) -> Option<&str> {
    match self {
      ContentIdOutcome::Found(id) | ContentIdOutcome::Generated(id) => Some(id),
      ContentIdOutcome::Mismatch { .. } => None,
    }
  }
}

/// Resolves the content identifier shared by a Live Photo pair's `members`.
pub fn resolve_content_id(
  cache: &mut TagCache,
  members: &[MediaFile],
) -> Result<ContentIdOutcome, Error> {
  let mut adopted: Option<String> = None;

  for member in members {
    let Some(found) = cache.get(member.path())?.get(CONTENT_IDENTIFIER) else {
      continue;
    };

    let Some(expected) = &adopted else {
      adopted = Some(found.clone());
      continue;
    };

    if expected != found {
      return Ok(ContentIdOutcome::Mismatch {
        path:     member.path().to_path_buf(),
        expected: expected.clone(),
        found:    found.clone(),
      });
    }
  }

  if let Some(id) = adopted {
    return Ok(ContentIdOutcome::Found(id));
  }

  let id = Uuid::new_v4().to_string();
  if let Some(first) = members.first() {
    log::info!("{first}: Creating missing content identifier {id}.");
  }
  Ok(ContentIdOutcome::Generated(id))
}
