// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! All record data structures and the associated implementations

pub mod a;
pub mod aaaa;
pub mod csync;
pub mod hinfo;
pub mod name;
pub mod opt;
pub mod wks;

pub use self::csync::CSYNC;
pub use self::hinfo::HINFO;
pub use self::opt::{EdnsCode, EdnsOption, Owner, OPT};
pub use self::wks::WKS;
