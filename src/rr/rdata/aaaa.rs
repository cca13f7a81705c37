// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! IPv6 address record data
//!
//! [RFC 3596, DNS Extensions to Support IPv6, October 2003](https://tools.ietf.org/html/rfc3596)
//!
//! ```text
//! 2.2 AAAA data format
//!
//!    A 128 bit IPv6 address is encoded in the data portion of an AAAA
//!    resource record in network byte order (high-order byte first).
//! ```

use std::net::Ipv6Addr;

use crate::error::*;
use crate::serialize::binary::*;

/// Read the RData from the given Decoder
pub fn read(decoder: &mut BinDecoder<'_>) -> CodecResult<Ipv6Addr> {
    Ipv6Addr::read(decoder)
}

/// Write the RData to the given Encoder
pub fn emit(encoder: &mut BinEncoder<'_>, address: &Ipv6Addr) -> CodecResult<()> {
    address.emit(encoder)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test() {
        let rdata = Ipv6Addr::from_str("2001:db8::1").unwrap();

        let mut bytes = Vec::new();
        let mut encoder: BinEncoder<'_> = BinEncoder::new(&mut bytes);
        assert!(emit(&mut encoder, &rdata).is_ok());
        let bytes = encoder.into_bytes();

        let mut decoder: BinDecoder<'_> = BinDecoder::new(bytes);
        let read_rdata = read(&mut decoder).expect("Decoding error");
        assert_eq!(rdata, read_rdata);
    }
}
