// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Organizer Stage 2: Live Photo pairs.

use super::Organizer;
use crate::{
  decision::{Payload, Target, plan},
  error::Error,
  prim::FileGroup,
  resolve::{ContentIdOutcome, TimestampOutcome, resolve_content_id},
};

impl Organizer<'_> {
  /// Writes the same sidecar for both halves of a Live Photo. Pairs whose
  /// halves disagree on their content identifier are left untouched.
  pub(super) fn process_live_photo(&mut self, group: &FileGroup) -> Result<(), Error> {
    log::debug!("{group}: Processing Live Photo pair.");

    let mut payload = Payload::default();

    if self.options.live_photos {
      let outcome = resolve_content_id(&mut self.tags, group.members())?;
      if let ContentIdOutcome::Mismatch {
        path,
        expected,
        found,
      } = &outcome
      {
        log::warn!(
          "{}: Content identifier mismatch ({found} vs. {expected}), skipping Live Photo pair.",
          path.display()
        );
        return Ok(());
      }
      payload.content_id = outcome.id().map(str::to_string);
    }

    let mut exposed = None;
    if self.options.time {
      match self.resolve_time(group.members())? {
        TimestampOutcome::Resolved(r) => {
          log::debug!("{group}: Creation date {} from {}.", r.time, r.provenance);
          payload.timestamp = Some(r.time);
        }
        TimestampOutcome::Exposed(field) => exposed = Some(field),
        TimestampOutcome::NotFound => log::debug!("{group}: No creation date found."),
      }
    }

    let targets = group.members().iter().map(Target::from).collect();
    self.apply(group, plan(targets, payload, self.options.mode), exposed)
  }
}
