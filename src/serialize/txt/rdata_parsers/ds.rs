// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Parser for DS text form

use std::str::FromStr;

use crate::rr::dnssec::rdata::DS;
use crate::rr::dnssec::{Algorithm, DigestType};
use crate::serialize::txt::errors::{ParseError, ParseErrorKind, ParseResult};

/// Parse the RData from a set of Tokens
///
/// [RFC 4034, Resource Records for the DNS Security Extensions](https://datatracker.ietf.org/doc/html/rfc4034#section-5.3)
/// ```text
/// 5.3.  The DS RR Presentation Format
///
///    The presentation format of the RDATA portion is as follows:
///
///    The Key Tag field MUST be represented as an unsigned decimal integer.
///
///    The Algorithm field MUST be represented either as an unsigned decimal
///    integer or as an algorithm mnemonic specified in Appendix A.1.
///
///    The Digest Type field MUST be represented as an unsigned decimal
///    integer.
///
///    The Digest MUST be represented as a sequence of case-insensitive
///    hexadecimal digits.  Whitespace is allowed within the hexadecimal
///    text.
/// ```
pub(crate) fn parse<'i, I: Iterator<Item = &'i str>>(mut tokens: I) -> ParseResult<DS> {
    let tag_str: &str = tokens
        .next()
        .ok_or_else(|| ParseError::from(ParseErrorKind::Message("key tag not present")))?;
    let algorithm_str: &str = tokens
        .next()
        .ok_or_else(|| ParseError::from(ParseErrorKind::Message("algorithm not present")))?;
    let digest_type_str: &str = tokens
        .next()
        .ok_or_else(|| ParseError::from(ParseErrorKind::Message("digest type not present")))?;

    let tag: u16 = tag_str.parse()?;
    let algorithm = match Algorithm::from_str(algorithm_str) {
        Ok(algorithm) => algorithm,
        // the field may also be the unsigned decimal integer
        Err(_) => Algorithm::from_u8(algorithm_str.parse()?),
    };
    let digest_type = DigestType::from_u8(u8::from_str(digest_type_str)?);

    let digest_str: String = tokens.collect();
    if digest_str.is_empty() {
        return Err(ParseError::from(ParseErrorKind::Message(
            "digest not present",
        )));
    }
    let digest = data_encoding::HEXUPPER_PERMISSIVE.decode(digest_str.as_bytes())?;

    Ok(DS::new(tag, algorithm, digest_type, digest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(deprecated)]
    fn test_parsing() {
        assert_eq!(
            parse("60485 5 1 2BB183AF5F22588179A53B0A 98631FAD1A292118".split(' ')).unwrap(),
            DS::new(
                60485,
                Algorithm::RSASHA1,
                DigestType::SHA1,
                vec![
                    0x2B, 0xB1, 0x83, 0xAF, 0x5F, 0x22, 0x58, 0x81, 0x79, 0xA5, 0x3B, 0x0A, 0x98,
                    0x63, 0x1F, 0xAD, 0x1A, 0x29, 0x21, 0x18
                ]
            )
        );
    }

    #[test]
    #[allow(deprecated)]
    fn test_parsing_mnemonic_algorithm() {
        assert_eq!(
            parse("60485 RSASHA1 1 2BB183AF5F22588179A53B0A98631FAD1A292118".split(' ')).unwrap(),
            DS::new(
                60485,
                Algorithm::RSASHA1,
                DigestType::SHA1,
                vec![
                    0x2B, 0xB1, 0x83, 0xAF, 0x5F, 0x22, 0x58, 0x81, 0x79, 0xA5, 0x3B, 0x0A, 0x98,
                    0x63, 0x1F, 0xAD, 0x1A, 0x29, 0x21, 0x18
                ]
            )
        );
    }

    #[test]
    fn test_parsing_fails() {
        assert!(parse("60485 5 1".split(' ')).is_err());
        assert!(parse("60485 5 1 NOTHEX".split(' ')).is_err());
        assert!(parse("".split_whitespace()).is_err());
    }

    #[test]
    fn test_display_round_trip() {
        let rdata = DS::new(
            60485,
            Algorithm::ED25519,
            DigestType::SHA256,
            vec![0xDE, 0xAD, 0xBE, 0xEF],
        );
        assert_eq!(parse(rdata.to_string().split_whitespace()).unwrap(), rdata);
    }
}
