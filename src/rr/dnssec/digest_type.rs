// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use ring::digest;

#[cfg(feature = "serde-config")]
use serde::{Deserialize, Serialize};

use super::Digest;
use crate::error::*;

/// The digest algorithms for the DS record digest field
///
/// ```text
/// 0 Reserved - [RFC3658]
/// 1 SHA-1 MANDATORY [RFC3658]
/// 2 SHA-256 MANDATORY [RFC4509]
/// 3 GOST R 34.11-94 OPTIONAL [RFC5933]
/// 4 SHA-384 OPTIONAL [RFC6605]
/// 5-255 Unassigned -
/// ```
///
/// Unassigned values are preserved so that records referencing future
/// digest algorithms still round-trip; only digest computation refuses
/// them.
#[cfg_attr(feature = "serde-config", derive(Deserialize, Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[non_exhaustive]
pub enum DigestType {
    /// [RFC 3658](https://tools.ietf.org/html/rfc3658)
    SHA1,
    /// [RFC 4509](https://tools.ietf.org/html/rfc4509)
    SHA256,
    /// [RFC 5933](https://tools.ietf.org/html/rfc5933), computation is not implemented
    GOSTR34_11_94,
    /// [RFC 6605](https://tools.ietf.org/html/rfc6605)
    SHA384,
    /// An unassigned digest type identifier
    Unknown(u8),
}

impl DigestType {
    /// <http://www.iana.org/assignments/ds-rr-types/ds-rr-types.xhtml>
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::SHA1,
            2 => Self::SHA256,
            3 => Self::GOSTR34_11_94,
            4 => Self::SHA384,
            _ => Self::Unknown(value),
        }
    }

    /// The *ring* counterpart for the digest
    pub fn to_ring_digest_alg(self) -> CodecResult<&'static digest::Algorithm> {
        match self {
            Self::SHA1 => Ok(&digest::SHA1_FOR_LEGACY_USE_ONLY),
            Self::SHA256 => Ok(&digest::SHA256),
            Self::SHA384 => Ok(&digest::SHA384),
            _ => Err(CodecErrorKind::UnsupportedDigestType(self).into()),
        }
    }

    /// Hash the data
    pub fn hash(self, data: &[u8]) -> CodecResult<Digest> {
        let alg = self.to_ring_digest_alg()?;
        Ok(digest::digest(alg, data))
    }
}

impl From<DigestType> for u8 {
    fn from(a: DigestType) -> Self {
        match a {
            DigestType::SHA1 => 1,
            DigestType::SHA256 => 2,
            DigestType::GOSTR34_11_94 => 3,
            DigestType::SHA384 => 4,
            DigestType::Unknown(v) => v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecErrorKind;

    #[test]
    fn test_round_trip() {
        for value in [1_u8, 2, 3, 4, 5, 255] {
            assert_eq!(u8::from(DigestType::from_u8(value)), value);
        }
    }

    #[test]
    fn test_supported_hashes() {
        assert_eq!(DigestType::SHA1.hash(b"abc").unwrap().as_ref().len(), 20);
        assert_eq!(DigestType::SHA256.hash(b"abc").unwrap().as_ref().len(), 32);
        assert_eq!(DigestType::SHA384.hash(b"abc").unwrap().as_ref().len(), 48);
    }

    #[test]
    fn test_unsupported_hashes() {
        for digest_type in [DigestType::GOSTR34_11_94, DigestType::Unknown(5)] {
            let err = digest_type.hash(b"abc").unwrap_err();
            match err.kind() {
                CodecErrorKind::UnsupportedDigestType(ty) => assert_eq!(*ty, digest_type),
                kind => panic!("unexpected error: {kind:?}"),
            }
        }
    }
}
