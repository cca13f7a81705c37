// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Parser for WKS text form

use std::net::Ipv4Addr;

use crate::rr::rdata::WKS;
use crate::serialize::txt::errors::{ParseError, ParseErrorKind, ParseResult};

/// Parse the RData from a set of Tokens
///
/// ```text
/// HOSTA.ISI.EDU.  WKS  10.0.0.1 6 25 80
/// ```
///
/// The address is followed by the protocol number and the open ports, all
/// as unsigned decimal integers.
pub(crate) fn parse<'i, I: Iterator<Item = &'i str>>(mut tokens: I) -> ParseResult<WKS> {
    let address: Ipv4Addr = tokens
        .next()
        .ok_or_else(|| ParseError::from(ParseErrorKind::MissingToken("address".to_string())))
        .and_then(|s| s.parse().map_err(Into::into))?;

    let protocol: u8 = tokens
        .next()
        .ok_or_else(|| ParseError::from(ParseErrorKind::MissingToken("protocol".to_string())))
        .and_then(|s| s.parse().map_err(Into::into))?;

    let mut ports: Vec<u16> = Vec::new();
    for token in tokens {
        let port: u16 = token.parse()?;
        ports.push(port);
    }

    Ok(WKS::new(address, protocol, ports))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsing() {
        assert_eq!(
            parse(vec!["10.0.0.1", "6", "25", "80"].into_iter()).unwrap(),
            WKS::new(Ipv4Addr::new(10, 0, 0, 1), 6, vec![25, 80])
        );
    }

    #[test]
    fn test_parsing_no_ports() {
        assert_eq!(
            parse(vec!["192.0.2.1", "17"].into_iter()).unwrap(),
            WKS::new(Ipv4Addr::new(192, 0, 2, 1), 17, vec![])
        );
    }

    #[test]
    fn test_parsing_fails() {
        assert!(parse(vec!["10.0.0.1"].into_iter()).is_err());
        assert!(parse(vec!["not-an-address", "6"].into_iter()).is_err());
        assert!(parse(vec!["10.0.0.1", "6", "notaport"].into_iter()).is_err());
        assert!(parse(vec![].into_iter()).is_err());
    }

    #[test]
    fn test_display_round_trip() {
        let rdata = WKS::new(Ipv4Addr::new(10, 0, 0, 1), 6, vec![80, 25]);
        let presentation = rdata.to_string();
        assert_eq!(parse(presentation.split_whitespace()).unwrap(), rdata);
    }
}
