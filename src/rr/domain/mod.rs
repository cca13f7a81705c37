// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Domain name associated types, i.e. labels and names

mod label;
mod name;

pub use self::label::{IntoLabel, Label, MAX_LABEL_LENGTH};
pub use self::name::{LabelIter, Name};
