// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! IPv4 address record data
//!
//! [RFC 1035, DOMAIN NAMES - IMPLEMENTATION AND SPECIFICATION, November 1987](https://tools.ietf.org/html/rfc1035)
//!
//! ```text
//! 3.4. Internet specific RRs
//!
//! 3.4.1. A RDATA format
//!
//!     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//!     |                    ADDRESS                    |
//!     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//!
//! where:
//!
//! ADDRESS         A 32 bit Internet address.
//!
//! Hosts that have multiple Internet addresses will have multiple A
//! records.
//! ```

use std::net::Ipv4Addr;

use crate::error::*;
use crate::serialize::binary::*;

/// Read the RData from the given Decoder
pub fn read(decoder: &mut BinDecoder<'_>) -> CodecResult<Ipv4Addr> {
    Ipv4Addr::read(decoder)
}

/// Write the RData to the given Encoder
pub fn emit(encoder: &mut BinEncoder<'_>, address: Ipv4Addr) -> CodecResult<()> {
    address.emit(encoder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test() {
        let rdata = Ipv4Addr::new(10, 0, 0, 1);

        let mut bytes = Vec::new();
        let mut encoder: BinEncoder<'_> = BinEncoder::new(&mut bytes);
        assert!(emit(&mut encoder, rdata).is_ok());
        let bytes = encoder.into_bytes();

        assert_eq!(bytes.as_slice(), &[0x0A, 0x00, 0x00, 0x01]);

        let mut decoder: BinDecoder<'_> = BinDecoder::new(bytes);
        let read_rdata = read(&mut decoder).expect("Decoding error");
        assert_eq!(rdata, read_rdata);
    }
}
