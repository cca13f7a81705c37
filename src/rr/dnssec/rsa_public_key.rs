// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::error::*;

/// An RSA public key in the DNSKEY wire layout,
/// [RFC 3110, section 2](https://tools.ietf.org/html/rfc3110#section-2)
///
/// ```text
///        Field             Size
///        -----             ----
///        exponent length   1 or 3 octets (see text)
///        exponent          as specified by length field
///        modulus           remaining space
///
///  The public key exponent is a variable length unsigned integer.  Its
///  length in octets is represented as one octet if it is in the range of
///  1 to 255 and by a zero octet followed by a two octet unsigned length
///  if it is longer than 255 bytes.
/// ```
#[derive(Debug)]
pub(crate) struct RsaPublicKey<'a> {
    n: &'a [u8],
    e: &'a [u8],
}

impl<'a> RsaPublicKey<'a> {
    pub(crate) fn try_from(encoded: &'a [u8]) -> CodecResult<Self> {
        let (e_len_len, e_len) = match encoded.first() {
            Some(&0) if encoded.len() >= 3 => {
                (3, (usize::from(encoded[1]) << 8) | usize::from(encoded[2]))
            }
            Some(e_len) if *e_len != 0 => (1, usize::from(*e_len)),
            _ => return Err(CodecError::from("bad RSA public key")),
        };

        if encoded.len() < e_len_len + e_len {
            return Err(CodecError::from("bad RSA public key"));
        };

        let (e, n) = encoded[e_len_len..].split_at(e_len);

        Ok(Self { n, e })
    }

    pub(crate) fn n(&self) -> &[u8] {
        self.n
    }

    pub(crate) fn e(&self) -> &[u8] {
        self.e
    }
}
