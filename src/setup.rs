// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Program setup functions.

use std::io::Write;

use env_logger::Builder;
use log::LevelFilter;

/// Sets up `env_logger` with the format "LEVEL\tmessage" (e.g. "WARN\tsomething
/// went wrong").
///
/// Log levels:
/// Error: Program errors.
/// Warn: Skipped files needing attention, and file removal.
/// Info: Sidecar writes and where dates & times came from.
/// Debug: Per-group flow.
/// Trace: `ExifTool` invocations and output.
pub fn configure_logging(verbose: bool, debug: u8) {
  let level = match (verbose, debug) {
    (_, 2..) => LevelFilter::Trace,
    (_, 1) => LevelFilter::Debug,
    (true, 0) => LevelFilter::Info,
    (false, 0) => LevelFilter::Warn,
  };

  Builder::new()
    .filter_level(level)
    .format(|buf, record| {
      let style = buf.default_level_style(record.level());
      writeln!(buf, "{style}{}{style:#}\t{}", record.level(), record.args())
    })
    .init();
}
