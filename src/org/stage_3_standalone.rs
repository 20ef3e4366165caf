// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Organizer Stage 3: Files outside any Live Photo pair.

use std::slice;

use super::Organizer;
use crate::{
  decision::{Payload, Target, plan},
  error::Error,
  prim::MediaFile,
  resolve::TimestampOutcome,
};

impl Organizer<'_> {
  /// Standalone files only ever get a timestamp. Without the time feature
  /// nothing is read, though existing sidecars may still be deleted under
  /// force / recalculate.
  pub(super) fn process_standalone(&mut self, file: &MediaFile) -> Result<(), Error> {
    log::debug!("{file}: Processing standalone {}.", file.kind());

    let mut payload = Payload::default();
    let mut exposed = None;

    if self.options.time {
      match self.resolve_time(slice::from_ref(file))? {
        TimestampOutcome::Resolved(r) => {
          log::debug!("{file}: Creation date {} from {}.", r.time, r.provenance);
          payload.timestamp = Some(r.time);
        }
        TimestampOutcome::Exposed(field) => exposed = Some(field),
        TimestampOutcome::NotFound => {}
      }
    }

    self.apply(
      file,
      plan(vec![Target::from(file)], payload, self.options.mode),
      exposed,
    )
  }
}
