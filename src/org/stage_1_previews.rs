// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Organizer Stage 1: Recycling of low-resolution previews.

use super::Organizer;
use crate::{
  error::Error,
  prim::{FileGroup, GroupKind, MediaFile, group_by_stem},
};

impl Organizer<'_> {
  /// Recycles the preview out of every preview pair / triple. Recycled files
  /// are left out of all later stages.
  pub(super) fn remove_previews(&mut self) -> Result<(), Error> {
    log::info!("Removing previews.");

    for group in group_by_stem(&self.files) {
      if !matches!(group.kind(), GroupKind::PreviewPair | GroupKind::PreviewTriple) {
        continue;
      }

      let Some(preview) = select_preview(&group)? else {
        continue;
      };

      if self.options.dry_run {
        log::warn!("{preview}: Would recycle preview.");
      } else {
        log::warn!("{preview}: Recycling preview.");
        self.trash.recycle(preview.path())?;
      }

      self.recycled.insert(preview.path().to_path_buf());
      self.summary.recycled += 1;
    }

    Ok(())
  }
}

/// The smallest image in `group`. Ties go to the first in path order.
pub fn select_preview(group: &FileGroup) -> Result<Option<&MediaFile>, Error> {
  let mut smallest: Option<(&MediaFile, u64)> = None;

  for image in group.members().iter().filter(|m| m.is_image()) {
    let size = image.size()?;
    if smallest.is_none_or(|(_, s)| size < s) {
      smallest = Some((image, size));
    }
  }

  Ok(smallest.map(|(image, _)| image))
}

#[cfg(test)]
mod test_select_preview {
  use super::*;
  use crate::testing::*;

  fn group(d: &TestDir) -> FileGroup {
    let files = crate::discovery::discover(d.root()).unwrap();
    group_by_stem(&files).remove(0)
  }

  #[test]
  fn selects_smaller_image_of_pair() {
    let d = test_dir!("IMG_0001.jpg": 1000, "IMG_0001.HEIC": 4000);

    let g = group(&d);

    assert_eq!(select_preview(&g).unwrap().unwrap().path(), d.path("IMG_0001.jpg"));
  }

  #[test]
  fn ignores_video_of_triple() {
    let d = test_dir!("IMG_0001.jpg": 1000, "IMG_0001.HEIC": 4000, "IMG_0001.mov": 10);

    let g = group(&d);

    assert_eq!(select_preview(&g).unwrap().unwrap().path(), d.path("IMG_0001.jpg"));
  }

  #[test]
  fn breaks_ties_by_path() {
    let d = test_dir!("IMG_0001.jpg": 1000, "IMG_0001.HEIC": 1000);

    let g = group(&d);

    assert_eq!(select_preview(&g).unwrap().unwrap().path(), d.path("IMG_0001.HEIC"));
  }
}
