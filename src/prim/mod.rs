// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Primitive types for representing media files, the groups they form, and
//! the metadata read from them.

mod group;
mod media;
mod tags;
mod timestamp;

pub use group::*;
pub use media::*;
pub use tags::*;
pub use timestamp::*;
