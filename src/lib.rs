// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Record data core of a DNS stack.
//!
//! This library implements the bit-exact wire encoder and decoder for DNS
//! resource records, the DNSSEC key, signature and digest machinery that
//! cryptographically validates zone data, the windowed type bitmap shared by
//! the NSEC, NSEC3 and CSYNC records, EDNS0 option codecs, and the
//! presentation-format (master file token) parsers for the supported record
//! types.
//!
//! Transports, resolvers and zone file tokenization are concerns of the
//! callers; this crate consumes byte buffers and token slices and produces
//! typed record values, emitted byte spans, presentation strings, signatures
//! and verification verdicts.
//!
//! ## Example
//!
//! ```
//! use std::str::FromStr;
//!
//! use rrdata::rr::{Name, RData, Record};
//! use rrdata::serialize::binary::{BinDecodable, BinDecoder, BinEncodable, BinEncoder};
//!
//! let record = Record::from_rdata(
//!     Name::from_str("www.example.com.").unwrap(),
//!     300,
//!     RData::CNAME(Name::from_str("example.com.").unwrap()),
//! );
//!
//! let mut bytes = Vec::new();
//! let mut encoder = BinEncoder::new(&mut bytes);
//! record.emit(&mut encoder).unwrap();
//! drop(encoder);
//!
//! let mut decoder = BinDecoder::new(&bytes);
//! assert_eq!(Record::read(&mut decoder).unwrap(), record);
//! ```

#![warn(
    missing_docs,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::unimplemented,
    rust_2018_idioms
)]
#![allow(clippy::needless_doctest_main, clippy::single_component_path_imports)]

pub mod error;
pub mod rr;
pub mod serialize;

pub use crate::error::{CodecError, CodecErrorKind, CodecResult};
pub use crate::error::{DnsSecError, DnsSecErrorKind, DnsSecResult};
