// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Helper for setting up test directories with media files and sidecars.

use std::{
  collections::HashSet,
  fs,
  path::{Path, PathBuf},
};

use tempfile::TempDir;
use walkdir::WalkDir;

/// Temporary directory holding a `media/` tree for the files under test and a
/// sibling `trash/` for anything recycled. Removed on drop.
pub struct TestDir {
  _temp: TempDir,
  root:  PathBuf,
  trash: PathBuf,
}

impl TestDir {
  /// Note: Prefer using `test_dir!()` macro.
  pub fn new(files: &[(&str, u64)]) -> Self {
    let temp = TempDir::new().unwrap();
    let base = temp.path().canonicalize().unwrap();
    let root = base.join("media");
    let trash = base.join("trash");
    fs::create_dir(&root).unwrap();
    fs::create_dir(&trash).unwrap();

    let d = Self {
      _temp: temp,
      root,
      trash,
    };
    for (file, size) in files {
      d.add(file, *size);
    }

    d
  }

  /// Creates `file` (relative to the root) filled with `size` bytes.
  pub fn add(&self, file: impl AsRef<Path>, size: u64) -> PathBuf {
    let path = self.path(file);
    assert!(!path.exists(), "File already exists: {path:?}");

    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let len = usize::try_from(size).unwrap();
    fs::write(&path, vec![0u8; len]).unwrap();

    path
  }

  /// All files under the root.
  pub fn files(&self) -> HashSet<PathBuf> {
    traverse_dir(&self.root)
  }

  /// All files under the trash.
  pub fn files_trash(&self) -> HashSet<PathBuf> {
    traverse_dir(&self.trash)
  }

  pub fn path(&self, file: impl AsRef<Path>) -> PathBuf {
    self.root.join(file)
  }

  pub fn read(&self, file: impl AsRef<Path>) -> String {
    fs::read_to_string(self.path(file)).unwrap()
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  pub fn trash(&self) -> &Path {
    &self.trash
  }
}

fn traverse_dir(root: &Path) -> HashSet<PathBuf> {
  WalkDir::new(root)
    .into_iter()
    .map(Result::unwrap)
    .filter(|e| e.file_type().is_file())
    .map(walkdir::DirEntry::into_path)
    .collect()
}

/// Lays out a `TestDir`. Each file is a name, optionally followed by its size
/// in bytes: `test_dir!("a.jpg", "a.HEIC": 4000)`.
#[macro_export]
macro_rules! test_dir {
  ($($file:literal $(: $size:literal)?),* $(,)?) => {{
    let files: Vec<(&str, u64)> = vec![$(($file, 0 $(+ $size)?)),*];
    $crate::testing::TestDir::new(&files)
  }};
}
