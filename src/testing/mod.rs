// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Test-only utilities.

mod asserts;
mod fakes;
mod test_dir;

pub use fakes::*;
pub use test_dir::*;

pub use crate::{assert_dir, assert_err, assert_trash, test_dir};
