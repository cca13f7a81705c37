// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Parser for DNSKEY text form

use std::str::FromStr as _;

use crate::rr::dnssec::rdata::DNSKEY;
use crate::rr::dnssec::Algorithm;
use crate::serialize::txt::errors::{ParseError, ParseErrorKind, ParseResult};

/// Parse the RData from a set of Tokens
///
/// ```text
/// dskey.example.com. 86400 IN DNSKEY 256 3 5 ( AQPSKmynfzW4kyBv015MUG2DeIQ3
///                                              Cbl+BBZH4b/0PY1kxkmvHjcZc8no
///                                              kfzj31GajIQKY+5CptLr3buXA10h
///                                              WqTkF7H6RfoRqXQeogmMHfpftf6z
///                                              Mv1LyBUgia7za6ZEzOJBOztyvhjL
///                                              742iU/TpPSEDhm2SNKLijfUppn1U
///                                              aNvv4w==  )
/// ```
///
/// The base64 public key may be split across any number of trailing tokens.
pub(crate) fn parse<'i>(mut tokens: impl Iterator<Item = &'i str>) -> ParseResult<DNSKEY> {
    let flags_str = tokens
        .next()
        .ok_or_else(|| ParseError::from(ParseErrorKind::Message("flags not present")))?;
    let protocol_str = tokens
        .next()
        .ok_or_else(|| ParseError::from(ParseErrorKind::Message("protocol not present")))?;
    let algorithm_str = tokens
        .next()
        .ok_or_else(|| ParseError::from(ParseErrorKind::Message("algorithm not present")))?;

    let flags = u16::from_str(flags_str)?;
    if ![0, 128, 256, 257, 384, 385].contains(&flags) {
        return Err(ParseError::from(ParseErrorKind::Message(
            "flags field carries bits other than zone key, revoke and secure entry point",
        )));
    }

    let secure_entry_point = is_bit_set(flags, 0);
    let revoke = is_bit_set(flags, 7);
    let zone_key = is_bit_set(flags, 8);

    let protocol = u8::from_str(protocol_str)?;
    if protocol != 3 {
        return Err(ParseError::from(ParseErrorKind::Message(
            "protocol field must be 3",
        )));
    }

    let algorithm = Algorithm::from_u8(algorithm_str.parse()?);

    let public_key_str: String = tokens.collect();
    if public_key_str.is_empty() {
        return Err(ParseError::from(ParseErrorKind::Message(
            "public key not present",
        )));
    }

    let public_key = data_encoding::BASE64.decode(public_key_str.as_bytes())?;

    Ok(DNSKEY::new(
        zone_key,
        secure_entry_point,
        revoke,
        algorithm,
        public_key,
    ))
}

fn is_bit_set(value: u16, bit: usize) -> bool {
    let mask = 1 << bit;
    value & mask == mask
}
