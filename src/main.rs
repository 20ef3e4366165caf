//! Creates XMP sidecars for a photo collection: links Live Photo images to
//! their videos, exposes capture dates photo libraries don't read, and recycles
//! low-resolution previews. Acts as a wrapper around `ExifTool`.
//!
//! Copyright 2023-5 Seth Pendergrass. See LICENSE.

mod decision;
mod discovery;
mod error;
mod io;
mod org;
mod prim;
mod resolve;
mod setup;
mod xmp;

#[cfg(test)]
mod testing;

use std::{path::PathBuf, process::exit};

use clap::{ArgAction, ArgGroup, Parser};

use crate::{
  decision::Mode,
  error::Error,
  io::{ExifTool, Trash},
  org::{Options, Organizer, Summary},
  prim::CaptureTime,
  resolve::TimestampPolicy,
};

#[derive(Parser)]
#[command(version, about)]
#[command(group(
  ArgGroup::new("features")
    .args(["time", "live_photos", "previews"])
    .required(true)
    .multiple(true)
))]
struct Args {
  /// Directory (searched recursively), file, or glob pattern to process.
  path: PathBuf,

  /// Replace existing XMP files, and create missing ones.
  #[arg(short, long)]
  force: bool,

  /// Replace existing XMP files only. Takes precedence over `--force`.
  #[arg(short, long)]
  recalculate: bool,

  /// Report what would be done without changing anything.
  #[arg(short = 'n', long)]
  dry_run: bool,

  /// Write capture dates & times not already exposed in EXIF.
  #[arg(short, long)]
  time: bool,

  /// Link Live Photo images and videos by content identifier.
  #[arg(short, long)]
  live_photos: bool,

  /// Recycle low-resolution preview images.
  #[arg(short, long)]
  previews: bool,

  /// Use this date & time (ISO 8601) for every file instead of reading it.
  #[arg(short, long, requires = "time")]
  iso: Option<CaptureTime>,

  /// Write dates & times even when already exposed in EXIF.
  #[arg(short = 'o', long = "override", requires = "time")]
  override_exposed: bool,

  /// Log each file written and where its date & time came from.
  #[arg(short, long)]
  verbose: bool,

  /// Log per-file processing. Repeat to include `ExifTool` output.
  #[arg(short, long, action = ArgAction::Count)]
  debug: u8,

  /// `ExifTool` executable.
  #[arg(long, env = "EXIFTOOL", default_value = "exiftool")]
  exiftool: PathBuf,
}

impl Args {
  fn options(&self) -> Options {
    Options {
      time:        self.time,
      live_photos: self.live_photos,
      previews:    self.previews,
      mode:        Mode::new(self.force, self.recalculate),
      dry_run:     self.dry_run,
      timestamps:  TimestampPolicy {
        iso:              self.iso,
        override_exposed: self.override_exposed,
      },
    }
  }
}

fn main() {
  let args = Args::parse();
  setup::configure_logging(args.verbose, args.debug);

  match run(&args) {
    Ok(summary) => println!("{}", summary.report(&args.path, args.dry_run)),
    Err(e) => {
      log::error!("{e}");
      exit(1);
    }
  }
}

fn run(args: &Args) -> Result<Summary, Error> {
  let exiftool = ExifTool::new(&args.exiftool);
  exiftool.check()?;

  let files = discovery::discover(&args.path)?;

  Organizer::new(args.options(), &exiftool, &Trash, files).run()
}

#[cfg(test)]
mod test_args {
  use clap::CommandFactory;

  use super::*;

  fn parse(args: &[&str]) -> Result<Args, clap::Error> {
    Args::try_parse_from(["xmptool"].iter().chain(args))
  }

  #[test]
  fn is_well_formed() {
    Args::command().debug_assert();
  }

  #[test]
  fn requires_a_feature() {
    assert!(parse(&["photos"]).is_err());
    assert!(parse(&["photos", "-p"]).is_ok());
  }

  #[test]
  fn iso_requires_time() {
    assert!(parse(&["photos", "-l", "-i", "2023-06-01T10:00:00"]).is_err());
    assert!(parse(&["photos", "-t", "-i", "2023-06-01T10:00:00"]).is_ok());
  }

  #[test]
  fn override_requires_time() {
    assert!(parse(&["photos", "-l", "-o"]).is_err());
    assert!(parse(&["photos", "-t", "-o"]).is_ok());
  }

  #[test]
  fn rejects_invalid_iso() {
    assert!(parse(&["photos", "-t", "-i", "2023:06:01 10:00:00"]).is_err());
  }

  #[test]
  fn builds_options() {
    let args = parse(&["photos", "-tlfr", "-n", "-o", "-i", "2023-06-01T10:00:00"]).unwrap();

    let options = args.options();

    assert!(options.time && options.live_photos && options.dry_run);
    assert!(!options.previews);
    assert_eq!(options.mode, Mode::Recalculate);
    assert!(options.timestamps.override_exposed);
    assert_eq!(
      options.timestamps.iso,
      Some("2023-06-01T10:00:00".parse().unwrap())
    );
  }

  #[test]
  fn counts_debug_flags() {
    assert_eq!(parse(&["photos", "-p", "-dd"]).unwrap().debug, 2);
  }
}
