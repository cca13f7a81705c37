// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Parser for HINFO text form

use crate::rr::rdata::HINFO;
use crate::serialize::txt::errors::{ParseError, ParseErrorKind, ParseResult};

/// Parse the RData from a set of Tokens
///
/// ```text
/// UCBARPA.Berkeley.EDU.   HINFO   "VAX-11/780" "UNIX"
/// ```
///
/// A token may be surrounded by one level of double quotes, with `\"` and
/// `\\` escapes inside; the quoting emitted by the `Display` impl is
/// accepted back unchanged.
pub(crate) fn parse<'i, I: Iterator<Item = &'i str>>(mut tokens: I) -> ParseResult<HINFO> {
    let cpu = tokens
        .next()
        .ok_or_else(|| ParseError::from(ParseErrorKind::MissingToken("cpu".to_string())))
        .map(unquote)??;
    let os = tokens
        .next()
        .ok_or_else(|| ParseError::from(ParseErrorKind::MissingToken("os".to_string())))
        .map(unquote)??;

    Ok(HINFO::new(cpu, os))
}

fn unquote(token: &str) -> ParseResult<String> {
    let inner = if token.len() >= 2 && token.starts_with('"') && token.ends_with('"') {
        &token[1..token.len() - 1]
    } else {
        token
    };

    let mut unescaped = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some(escaped) => unescaped.push(escaped),
                None => {
                    return Err(ParseError::from(ParseErrorKind::Message(
                        "trailing escape in character-string",
                    )))
                }
            }
        } else {
            unescaped.push(ch);
        }
    }

    Ok(unescaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsing() {
        assert_eq!(
            parse(vec!["VAX-11/780", "UNIX"].into_iter()).unwrap(),
            HINFO::new("VAX-11/780".to_string(), "UNIX".to_string())
        );
    }

    #[test]
    fn test_parsing_quoted() {
        assert_eq!(
            parse(vec!["\"DEC-2060\"", "\"TOPS20\""].into_iter()).unwrap(),
            HINFO::new("DEC-2060".to_string(), "TOPS20".to_string())
        );
    }

    #[test]
    fn test_parsing_fails() {
        assert!(parse(vec!["VAX-11/780"].into_iter()).is_err());
        assert!(parse(vec![].into_iter()).is_err());
    }

    #[test]
    fn test_display_round_trip() {
        let rdata = HINFO::new("a \"quoted\" cpu".to_string(), "os\\2".to_string());
        let presentation = rdata.to_string();

        // the Display form is two whitespace separated quoted tokens; split
        // on the separating space between the closing and opening quotes
        let (cpu, os) = presentation.split_once("\" \"").unwrap();
        let cpu = format!("{cpu}\"");
        let os = format!("\"{os}");

        let reparsed = parse(vec![cpu.as_str(), os.as_str()].into_iter()).unwrap();
        assert_eq!(reparsed, rdata);
    }
}
