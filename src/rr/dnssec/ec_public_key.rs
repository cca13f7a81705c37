// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use super::Algorithm;
use crate::error::*;

/// An ECDSA public key in the raw affine `(X, Y)` DNSKEY layout.
///
/// DNSSEC encodes uncompressed EC public keys without the standard 0x04
/// prefix that indicates they are uncompressed, but crypto libraries
/// require that prefix.
#[derive(Clone, Copy, PartialEq, Debug)]
pub(crate) struct EcPublicKey {
    buf: [u8; MAX_LEN],
    len: usize,
}

// The length of the longest supported EC public key (P-384).
const MAX_LEN: usize = 1 + (2 * 48);

impl EcPublicKey {
    /// The coordinate size in octets for the curve named by the algorithm
    pub(crate) fn coordinate_len(algorithm: Algorithm) -> CodecResult<usize> {
        match algorithm {
            Algorithm::ECDSAP256SHA256 => Ok(32),
            Algorithm::ECDSAP384SHA384 => Ok(48),
            _ => Err(CodecErrorKind::UnsupportedAlgorithm(algorithm).into()),
        }
    }

    pub(crate) fn from_unprefixed(without_prefix: &[u8], algorithm: Algorithm) -> CodecResult<Self> {
        let field_len = Self::coordinate_len(algorithm)?;
        let len = 1 + (2 * field_len);
        if len - 1 != without_prefix.len() {
            return Err(CodecError::from("EC public key is the wrong length"));
        }
        let mut buf = [0x04_u8; MAX_LEN];
        buf[1..len].copy_from_slice(without_prefix);
        Ok(Self { buf, len })
    }

    pub(crate) fn prefixed_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub(crate) fn unprefixed_bytes(&self) -> &[u8] {
        &self.buf[1..self.len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix() {
        let raw = [0xAB_u8; 64];
        let key = EcPublicKey::from_unprefixed(&raw, Algorithm::ECDSAP256SHA256).unwrap();
        assert_eq!(key.prefixed_bytes()[0], 0x04);
        assert_eq!(&key.prefixed_bytes()[1..], &raw);
        assert_eq!(key.unprefixed_bytes(), &raw);
    }

    #[test]
    fn test_wrong_length() {
        let raw = [0xAB_u8; 64];
        assert!(EcPublicKey::from_unprefixed(&raw, Algorithm::ECDSAP384SHA384).is_err());
        assert!(EcPublicKey::from_unprefixed(&raw[..63], Algorithm::ECDSAP256SHA256).is_err());
    }

    #[test]
    fn test_not_an_ec_algorithm() {
        let raw = [0xAB_u8; 64];
        assert!(EcPublicKey::from_unprefixed(&raw, Algorithm::ED25519).is_err());
    }
}
