// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Extra asserts to make tests shorter / more readable.

#[macro_export]
macro_rules! assert_dir {
  ($dir:expr, [$($path:literal),* $(,)?]) => {{
    let actual = $dir.files();
    let expected = std::collections::HashSet::from([$($dir.path($path)),*]);

    assert!(
      actual == expected,
      "Directory contents do not match:\nActual:   {actual:#?}\nExpected: {expected:#?}"
    );
  }}
}

#[macro_export]
macro_rules! assert_trash {
  ($dir:expr, [$($path:literal),* $(,)?]) => {{
    let actual = $dir.files_trash();
    let expected = std::collections::HashSet::from([$($dir.trash().join($path)),*]);

    assert!(
      actual == expected,
      "Trash contents do not match:\nActual:   {actual:#?}\nExpected: {expected:#?}"
    );
  }}
}

#[macro_export]
macro_rules! assert_err {
  ($res:expr, $msg:literal) => {{
    let Err(e) = $res else {
      panic!("Unexpected `Ok`.");
    };
    let e = e.to_string();

    assert!(
      e.contains($msg),
      "Error message did not contain expected substring.\nActual:\n{e}\nExpected:\n{}",
      $msg
    );
  }};
}
