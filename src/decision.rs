// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Decides, per group, whether sidecars are written, skipped, or deleted.
//!
//! The decision depends only on the run mode, whether any member already has a
//! sidecar, and whether anything was resolved to write. It never touches the
//! file system, so every combination can be tested in isolation.

use core::fmt;
use std::{
  fmt::{Display, Formatter},
  path::PathBuf,
};

use crate::prim::{CaptureTime, MediaFile};

/// How existing sidecars are treated for the whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
  /// Only create sidecars where none exist.
  #[default]
  Create,
  /// Replace existing sidecars, and create missing ones.
  Force,
  /// Replace existing sidecars only.
  Recalculate,
}

impl Mode {
  /// Recalculate takes precedence over force.
  pub fn new(force: bool, recalculate: bool) -> Self {
    match (force, recalculate) {
      (_, true) => Mode::Recalculate,
      (true, false) => Mode::Force,
      (false, false) => Mode::Create,
    }
  }
}

/// The rule that matched. Evaluated in declaration order, first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
  /// Force/recalculate with an existing sidecar but nothing to write.
  DeleteExisting,
  /// A sidecar exists and the run may not replace it.
  SkipExisting,
  /// Recalculate only replaces sidecars, and there is none.
  SkipNotRecalculable,
  /// Something resolved.
  Write,
  /// Nothing resolved, and nothing to clean up.
  SkipUnresolved,
}

/// Picks the rule for a group.
pub fn decide(mode: Mode, has_existing: bool, would_write: bool) -> Rule {
  match (mode, has_existing, would_write) {
    (Mode::Force | Mode::Recalculate, true, false) => Rule::DeleteExisting,
    (Mode::Create, true, _) => Rule::SkipExisting,
    (Mode::Recalculate, false, _) => Rule::SkipNotRecalculable,
    (_, _, true) => Rule::Write,
    _ => Rule::SkipUnresolved,
  }
}

/// Values to write to a sidecar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
  pub timestamp:  Option<CaptureTime>,
  pub content_id: Option<String>,
}

impl Payload {
  pub fn would_write(&self) -> bool {
    self.timestamp.is_some() || self.content_id.is_some()
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
  AlreadyExists,
  NotRecalculable,
  Unresolved,
}

impl Display for SkipReason {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      SkipReason::AlreadyExists => write!(f, "XMP file already exists"),
      SkipReason::NotRecalculable => write!(f, "no existing XMP file in recalculate mode"),
      SkipReason::Unresolved => write!(f, "no creation date or content identifier found"),
    }
  }
}

/// What happens to a single member's sidecar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidecarDecision {
  Write(Payload),
  Skip(SkipReason),
  /// Only issued for members that have a sidecar.
  Delete,
}

/// A member file, as seen by the decision engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
  pub path:        PathBuf,
  pub has_sidecar: bool,
}

impl From<&MediaFile> for Target {
  fn from(file: &MediaFile) -> Self {
    Self {
      path:        file.path().to_path_buf(),
      has_sidecar: file.has_sidecar(),
    }
  }
}

/// Outcome for a whole group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
  pub rule:      Rule,
  pub decisions: Vec<(Target, SidecarDecision)>,
}

/// Decides what happens to every member of a group.
pub fn plan(targets: Vec<Target>, payload: Payload, mode: Mode) -> Plan {
  let has_existing = targets.iter().any(|t| t.has_sidecar);
  let rule = decide(mode, has_existing, payload.would_write());

  let decisions = targets
    .into_iter()
    .filter_map(|t| {
      let decision = match rule {
        Rule::DeleteExisting if t.has_sidecar => SidecarDecision::Delete,
        Rule::DeleteExisting => return None,
        Rule::SkipExisting => SidecarDecision::Skip(SkipReason::AlreadyExists),
        Rule::SkipNotRecalculable => SidecarDecision::Skip(SkipReason::NotRecalculable),
        Rule::Write => SidecarDecision::Write(payload.clone()),
        Rule::SkipUnresolved => SidecarDecision::Skip(SkipReason::Unresolved),
      };
      Some((t, decision))
    })
    .collect();

  Plan { rule, decisions }
}

#[cfg(test)]
mod test_decide {
  use super::*;

  #[test]
  fn recalculate_dominates_force() {
    assert_eq!(Mode::new(true, true), Mode::Recalculate);
    assert_eq!(Mode::new(true, false), Mode::Force);
    assert_eq!(Mode::new(false, false), Mode::Create);
  }

  #[test]
  fn deletes_only_when_replacing_with_nothing() {
    assert_eq!(decide(Mode::Force, true, false), Rule::DeleteExisting);
    assert_eq!(decide(Mode::Recalculate, true, false), Rule::DeleteExisting);
    assert_eq!(decide(Mode::Create, true, false), Rule::SkipExisting);
  }

  #[test]
  fn existing_sidecar_blocks_create() {
    assert_eq!(decide(Mode::Create, true, true), Rule::SkipExisting);
  }

  #[test]
  fn recalculate_needs_existing_sidecar() {
    assert_eq!(decide(Mode::Recalculate, false, true), Rule::SkipNotRecalculable);
    assert_eq!(decide(Mode::Recalculate, false, false), Rule::SkipNotRecalculable);
    assert_eq!(decide(Mode::Recalculate, true, true), Rule::Write);
  }

  #[test]
  fn writes_when_resolved() {
    assert_eq!(decide(Mode::Create, false, true), Rule::Write);
    assert_eq!(decide(Mode::Force, false, true), Rule::Write);
    assert_eq!(decide(Mode::Force, true, true), Rule::Write);
  }

  #[test]
  fn skips_when_unresolved() {
    assert_eq!(decide(Mode::Create, false, false), Rule::SkipUnresolved);
    assert_eq!(decide(Mode::Force, false, false), Rule::SkipUnresolved);
  }
}

#[cfg(test)]
mod test_plan {
  use super::*;

  fn target(path: &str, has_sidecar: bool) -> Target {
    Target {
      path: PathBuf::from(path),
      has_sidecar,
    }
  }

  fn payload() -> Payload {
    Payload {
      timestamp:  Some("2023-06-01T10:00:00-04:00".parse().unwrap()),
      content_id: Some("abc-123".to_string()),
    }
  }

  #[test]
  fn writes_every_member() {
    let p = plan(
      vec![target("a.HEIC", false), target("a.MOV", false)],
      payload(),
      Mode::Create,
    );

    assert_eq!(p.rule, Rule::Write);
    assert_eq!(
      p.decisions,
      [
        (target("a.HEIC", false), SidecarDecision::Write(payload())),
        (target("a.MOV", false), SidecarDecision::Write(payload())),
      ]
    );
  }

  #[test]
  fn one_existing_sidecar_skips_whole_group() {
    let p = plan(
      vec![target("a.HEIC", true), target("a.MOV", false)],
      payload(),
      Mode::Create,
    );

    assert!(
      p.decisions
        .iter()
        .all(|(_, d)| *d == SidecarDecision::Skip(SkipReason::AlreadyExists))
    );
  }

  #[test]
  fn deletes_only_existing_sidecars() {
    let p = plan(
      vec![target("a.HEIC", true), target("a.MOV", false)],
      Payload::default(),
      Mode::Force,
    );

    assert_eq!(p.rule, Rule::DeleteExisting);
    assert_eq!(p.decisions, [(target("a.HEIC", true), SidecarDecision::Delete)]);
  }

  #[test]
  fn force_rewrites_existing_sidecar() {
    let p = plan(vec![target("a.jpg", true)], payload(), Mode::Force);

    assert_eq!(p.decisions, [(target("a.jpg", true), SidecarDecision::Write(payload()))]);
  }

  #[test]
  fn partial_payload_still_writes() {
    let payload = Payload {
      timestamp:  None,
      content_id: Some("abc-123".to_string()),
    };

    let p = plan(vec![target("a.HEIC", false)], payload, Mode::Create);

    assert_eq!(p.rule, Rule::Write);
  }
}
