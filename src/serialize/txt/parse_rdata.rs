// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! record data parsing dispatch, master-file-style tokens to `RData`

use crate::rr::{Name, RData, RecordType};
use crate::serialize::txt::errors::{ParseError, ParseErrorKind, ParseResult};
use crate::serialize::txt::rdata_parsers::*;

/// Extension on [`RData`] for parsing from the presentation format
pub trait RDataParser: Sized {
    /// Attempts to parse a set of tokens for the given record type
    fn try_from_str_tokens<'i, I: Iterator<Item = &'i str>>(
        record_type: RecordType,
        tokens: I,
        origin: Option<&Name>,
    ) -> ParseResult<Self>;
}

impl RDataParser for RData {
    /// Parse the RData from a set of whitespace separated tokens, one
    /// logical record line with the owner, ttl, class and type removed
    fn try_from_str_tokens<'i, I: Iterator<Item = &'i str>>(
        record_type: RecordType,
        mut tokens: I,
        origin: Option<&Name>,
    ) -> ParseResult<Self> {
        let rdata = match record_type {
            RecordType::A => Self::A(
                tokens
                    .next()
                    .ok_or_else(|| {
                        ParseError::from(ParseErrorKind::MissingToken("address".to_string()))
                    })
                    .and_then(|s| s.parse().map_err(ParseError::from))?,
            ),
            RecordType::AAAA => Self::AAAA(
                tokens
                    .next()
                    .ok_or_else(|| {
                        ParseError::from(ParseErrorKind::MissingToken("address".to_string()))
                    })
                    .and_then(|s| s.parse().map_err(ParseError::from))?,
            ),
            RecordType::CNAME => Self::CNAME(cname::parse(tokens, origin)?),
            RecordType::CSYNC => Self::CSYNC(csync::parse(tokens)?),
            RecordType::DNSKEY => Self::DNSKEY(dnskey::parse(tokens)?),
            RecordType::DS => Self::DS(ds::parse(tokens)?),
            RecordType::HINFO => Self::HINFO(hinfo::parse(tokens)?),
            RecordType::NS => Self::NS(cname::parse(tokens, origin)?),
            RecordType::WKS => Self::WKS(wks::parse(tokens)?),
            record_type => {
                return Err(ParseError::from(ParseErrorKind::UnsupportedRecordType(
                    record_type,
                )))
            }
        };

        Ok(rdata)
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;
    use std::str::FromStr;

    use super::*;
    use crate::rr::dnssec::{Algorithm, DigestType};
    use crate::rr::rdata::{CSYNC, HINFO, WKS};

    #[test]
    fn test_dispatch() {
        assert_eq!(
            RData::try_from_str_tokens(RecordType::A, ["10.0.0.1"].into_iter(), None).unwrap(),
            RData::A(Ipv4Addr::new(10, 0, 0, 1))
        );

        assert_eq!(
            RData::try_from_str_tokens(
                RecordType::CNAME,
                ["alias.example.net."].into_iter(),
                None
            )
            .unwrap(),
            RData::CNAME(Name::from_str("alias.example.net.").unwrap())
        );

        assert_eq!(
            RData::try_from_str_tokens(
                RecordType::CSYNC,
                ["1", "3", "A", "NS", "AAAA"].into_iter(),
                None
            )
            .unwrap(),
            RData::CSYNC(CSYNC::new(
                1,
                true,
                true,
                [RecordType::A, RecordType::NS, RecordType::AAAA]
            ))
        );

        assert_eq!(
            RData::try_from_str_tokens(
                RecordType::HINFO,
                ["VAX-11/780", "UNIX"].into_iter(),
                None
            )
            .unwrap(),
            RData::HINFO(HINFO::new("VAX-11/780".to_string(), "UNIX".to_string()))
        );

        assert_eq!(
            RData::try_from_str_tokens(
                RecordType::WKS,
                ["10.0.0.1", "6", "25", "80"].into_iter(),
                None
            )
            .unwrap(),
            RData::WKS(WKS::new(Ipv4Addr::new(10, 0, 0, 1), 6, vec![25, 80]))
        );
    }

    #[test]
    fn test_unsupported_type() {
        let err = RData::try_from_str_tokens(RecordType::OPT, [].into_iter(), None).unwrap_err();
        match err.kind() {
            ParseErrorKind::UnsupportedRecordType(RecordType::OPT) => (),
            kind => panic!("unexpected error: {kind:?}"),
        }
    }

    #[test]
    fn test_presentation_round_trip() {
        // Display then reparse is identity for the presentation formats
        let rdatas = [
            RData::CSYNC(CSYNC::new(
                1,
                true,
                true,
                [RecordType::A, RecordType::NS, RecordType::AAAA],
            )),
            RData::DS(crate::rr::dnssec::rdata::DS::new(
                60485,
                Algorithm::ED25519,
                DigestType::SHA256,
                vec![0xDE, 0xAD, 0xBE, 0xEF],
            )),
            RData::DNSKEY(crate::rr::dnssec::rdata::DNSKEY::new(
                true,
                true,
                false,
                Algorithm::ED25519,
                vec![0xAB_u8; 32],
            )),
            RData::WKS(WKS::new(Ipv4Addr::new(10, 0, 0, 1), 6, vec![25, 80])),
            RData::A(Ipv4Addr::new(10, 0, 0, 1)),
        ];

        for rdata in rdatas {
            let presentation = rdata.to_string();
            let reparsed = RData::try_from_str_tokens(
                rdata.to_record_type(),
                presentation.split_whitespace(),
                None,
            )
            .unwrap();
            assert_eq!(reparsed, rdata);
        }
    }
}
