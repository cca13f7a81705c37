// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Record type for all cases where the rdata is a single domain name,
//! e.g. CNAME and NS
//!
//! [RFC 1035, DOMAIN NAMES - IMPLEMENTATION AND SPECIFICATION, November 1987](https://tools.ietf.org/html/rfc1035)
//!
//! ```text
//! 3.3.1. CNAME RDATA format
//!
//!     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//!     /                     CNAME                     /
//!     /                                               /
//!     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//!
//! where:
//!
//! CNAME           A <domain-name> which specifies the canonical or primary
//!                 name for the owner.  The owner name is an alias.
//! ```

use crate::error::*;
use crate::rr::domain::Name;
use crate::serialize::binary::*;

/// Read the RData from the given Decoder
pub fn read(decoder: &mut BinDecoder<'_>) -> CodecResult<Name> {
    Name::read(decoder)
}

/// Write the RData to the given Encoder
///
/// The name is eligible for compression when not in canonical form, and is
/// lowercased for the RFC 4034 section 6.2 record types when it is.
pub fn emit(encoder: &mut BinEncoder<'_>, name: &Name) -> CodecResult<()> {
    let is_canonical_names = encoder.is_canonical_names();
    name.emit_with_lowercase(encoder, is_canonical_names)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test() {
        let rdata = Name::from_str("www.example.com.").unwrap();

        let mut bytes = Vec::new();
        let mut encoder: BinEncoder<'_> = BinEncoder::new(&mut bytes);
        assert!(emit(&mut encoder, &rdata).is_ok());
        let bytes = encoder.into_bytes();

        let mut decoder: BinDecoder<'_> = BinDecoder::new(bytes);
        let read_rdata = read(&mut decoder).expect("Decoding error");
        assert_eq!(rdata, read_rdata);
    }

    #[test]
    fn test_canonical_target_bytes() {
        // alias.example.net. in canonical form
        let rdata = Name::from_str("Alias.Example.Net.").unwrap();

        let mut bytes = Vec::new();
        let mut encoder: BinEncoder<'_> = BinEncoder::new(&mut bytes);
        encoder.set_canonical_names(true);
        emit(&mut encoder, &rdata).expect("Encoding error");
        let bytes = encoder.into_bytes();

        assert_eq!(
            bytes.as_slice(),
            &[
                0x05, 0x61, 0x6c, 0x69, 0x61, 0x73, 0x07, 0x65, 0x78, 0x61, 0x6d, 0x70, 0x6c,
                0x65, 0x03, 0x6e, 0x65, 0x74, 0x00,
            ]
        );
    }
}
