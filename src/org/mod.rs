// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Runs the requested features over a set of media files.
//!
//! Stages run in order:
//! 1. Previews are recycled, and drop out of everything after.
//! 2. Live Photo pairs get a shared content identifier and/or timestamp.
//! 3. Remaining files get a timestamp.

mod stage_1_previews;
mod stage_2_live_photos;
mod stage_3_standalone;

use std::{
  collections::HashSet,
  fmt::Display,
  path::{Path, PathBuf},
};

use crate::{
  decision::{Mode, Plan, Rule, SidecarDecision, SkipReason},
  error::Error,
  io::{self, MetadataReader, Recycler},
  prim::{DateField, FileGroup, GroupKind, MediaFile, group_by_stem, sidecar_path},
  resolve::{TagCache, TimestampOutcome, TimestampPolicy, resolve_timestamp},
  xmp,
};

/// Run configuration, fixed for the whole run.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
  /// Write capture timestamps.
  pub time:        bool,
  /// Link Live Photo pairs by content identifier.
  pub live_photos: bool,
  /// Recycle low-resolution previews.
  pub previews:    bool,
  pub mode:        Mode,
  pub dry_run:     bool,
  pub timestamps:  TimestampPolicy,
}

/// What a run did (or, for a dry run, would have done).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
  pub written:  usize,
  pub deleted:  usize,
  pub recycled: usize,
}

impl Summary {
  pub fn report(&self, target: &Path, dry_run: bool) -> String {
    let Summary {
      written,
      deleted,
      recycled,
    } = self;
    let target = target.display();

    if dry_run {
      format!(
        "Dry run complete. Would write {written} XMP files, delete {deleted} XMP files and recycle {recycled} previews in {target}."
      )
    } else {
      format!(
        "Complete. Wrote {written} XMP files, deleted {deleted} XMP files and recycled {recycled} previews in {target}."
      )
    }
  }
}

pub struct Organizer<'a> {
  options:  Options,
  tags:     TagCache<'a>,
  trash:    &'a dyn Recycler,
  files:    Vec<MediaFile>,
  recycled: HashSet<PathBuf>,
  summary:  Summary,
}

impl<'a> Organizer<'a> {
  /// `files` should be sorted by path, as from `discovery::discover`.
  pub fn new(
    options: Options,
    reader: &'a dyn MetadataReader,
    trash: &'a dyn Recycler,
    files: Vec<MediaFile>,
  ) -> Self {
    Self {
      options,
      tags: TagCache::new(reader),
      trash,
      files,
      recycled: HashSet::new(),
      summary: Summary::default(),
    }
  }

  pub fn run(mut self) -> Result<Summary, Error> {
    if self.options.previews {
      self.remove_previews()?;
    }

    if self.options.time || self.options.live_photos {
      self.create_sidecars()?;
    }

    Ok(self.summary)
  }

  fn create_sidecars(&mut self) -> Result<(), Error> {
    log::info!("Creating XMP sidecars.");

    let groups = group_by_stem(
      self
        .files
        .iter()
        .filter(|f| !self.recycled.contains(f.path())),
    );

    for group in groups {
      match group.kind() {
        GroupKind::LivePhotoPair => self.process_live_photo(&group)?,
        GroupKind::Standalone => self.process_standalone(&group.members()[0])?,
        // Previews that weren't removed are files in their own right.
        GroupKind::PreviewPair | GroupKind::PreviewTriple => {
          for member in group.members() {
            self.process_standalone(member)?;
          }
        }
        GroupKind::Malformed => log_malformed(&group),
      }
    }

    Ok(())
  }

  fn resolve_time(&mut self, members: &[MediaFile]) -> Result<TimestampOutcome, Error> {
    resolve_timestamp(
      &mut self.tags,
      members,
      self.options.timestamps,
      &self.recycled,
    )
  }

  /// Carries out `plan` for the group or file named `label`. `exposed` is set
  /// when a timestamp was found but not needed.
  fn apply(
    &mut self,
    label: &impl Display,
    plan: Plan,
    exposed: Option<DateField>,
  ) -> Result<(), Error> {
    match plan.rule {
      Rule::SkipExisting => log::warn!("{label}: {}, skipping.", SkipReason::AlreadyExists),
      Rule::SkipNotRecalculable => {
        log::debug!("{label}: {}, skipping.", SkipReason::NotRecalculable);
      }
      Rule::SkipUnresolved => match exposed {
        Some(field) => log::debug!("{label}: Creation date already exposed in {field}, skipping."),
        None if !self.options.time => log::debug!("{label}: Nothing to write, skipping."),
        None => log::warn!("{label}: {}, skipping.", SkipReason::Unresolved),
      },
      Rule::Write | Rule::DeleteExisting => {}
    }

    let dry_run = self.options.dry_run;

    for (target, decision) in plan.decisions {
      let sidecar = sidecar_path(&target.path);

      match decision {
        SidecarDecision::Write(payload) => {
          if dry_run {
            log::info!("{}: Would write XMP file.", sidecar.display());
          } else {
            log::info!("{}: Writing XMP file.", sidecar.display());
            io::write_sidecar(&sidecar, &xmp::render(&payload))?;
          }
          self.summary.written += 1;
        }
        SidecarDecision::Delete => {
          if dry_run {
            log::warn!("{}: Nothing to write, would delete XMP file.", sidecar.display());
          } else {
            log::warn!("{}: Nothing to write, deleting XMP file.", sidecar.display());
            io::remove_sidecar(&sidecar)?;
          }
          self.summary.deleted += 1;
        }
        SidecarDecision::Skip(reason) => {
          log::trace!("{}: Skipped ({reason}).", target.path.display());
        }
      }
    }

    Ok(())
  }
}

/// Existing sidecars are left alone, whatever the mode.
fn log_malformed(group: &FileGroup) {
  let members = group
    .members()
    .iter()
    .map(|m| m.extension().to_string_lossy().into_owned())
    .collect::<Vec<_>>();

  log::debug!(
    "{group}: Skipping {} ({}).",
    group.kind(),
    members.join(", ")
  );
}
