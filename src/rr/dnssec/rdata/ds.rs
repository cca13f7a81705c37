// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! pointer record from parent zone to child zone for dnskey proof

use std::fmt;

#[cfg(feature = "serde-config")]
use serde::{Deserialize, Serialize};

use crate::error::*;
use crate::rr::dnssec::rdata::DNSKEY;
use crate::rr::dnssec::{Algorithm, DigestType};
use crate::rr::domain::Name;
use crate::serialize::binary::*;

/// [RFC 4034, DNSSEC Resource Records, March 2005](https://tools.ietf.org/html/rfc4034#section-5)
///
/// ```text
/// 5.1.  DS RDATA Wire Format
///
///    The RDATA for a DS RR consists of a 2 octet Key Tag field, a 1 octet
///    Algorithm field, a 1 octet Digest Type field, and a Digest field.
///
///                         1 1 1 1 1 1 1 1 1 1 2 2 2 2 2 2 2 2 2 2 3 3
///     0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///    |           Key Tag             |  Algorithm    |  Digest Type  |
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///    /                                                               /
///    /                            Digest                             /
///    /                                                               /
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///
/// 5.2.  Processing of DS RRs When Validating Responses
///
///    The DS RR links the authentication chain across zone boundaries, so
///    the DS RR requires extra care in processing.  The DNSKEY RR referred
///    to in the DS RR MUST be a DNSSEC zone key.  The DNSKEY RR Flags MUST
///    have Flags bit 7 set.  If the DNSKEY flags do not indicate a DNSSEC
///    zone key, the DS RR (and the DNSKEY RR it references) MUST NOT be
///    used in the validation process.
/// ```
#[cfg_attr(feature = "serde-config", derive(Deserialize, Serialize))]
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct DS {
    key_tag: u16,
    algorithm: Algorithm,
    digest_type: DigestType,
    digest: Vec<u8>,
}

impl DS {
    /// Constructs a new DS RData
    ///
    /// # Arguments
    ///
    /// * `key_tag` - the key tag associated to the DNSKEY
    /// * `algorithm` - algorithm as specified in the DNSKEY
    /// * `digest_type` - hash algorithm used to validate the DNSKEY
    /// * `digest` - hash of the DNSKEY
    pub fn new(
        key_tag: u16,
        algorithm: Algorithm,
        digest_type: DigestType,
        digest: Vec<u8>,
    ) -> Self {
        Self {
            key_tag,
            algorithm,
            digest_type,
            digest,
        }
    }

    /// Constructs a DS referencing `key` at `name` by computing its tag and digest.
    pub fn from_key(name: &Name, key: &DNSKEY, digest_type: DigestType) -> CodecResult<Self> {
        let key_tag = key.calculate_key_tag()?;
        let digest = key.to_digest(name, digest_type)?;
        Ok(Self::new(
            key_tag,
            key.algorithm(),
            digest_type,
            digest.as_ref().to_vec(),
        ))
    }

    /// [RFC 4034, DNSSEC Resource Records, March 2005](https://tools.ietf.org/html/rfc4034#section-5.1.1)
    ///
    /// ```text
    /// 5.1.1.  The Key Tag Field
    ///
    ///    The Key Tag field lists the key tag of the DNSKEY RR referred to by
    ///    the DS record, in network byte order.
    /// ```
    pub fn key_tag(&self) -> u16 {
        self.key_tag
    }

    /// [RFC 4034, DNSSEC Resource Records, March 2005](https://tools.ietf.org/html/rfc4034#section-5.1.2)
    ///
    /// ```text
    /// 5.1.2.  The Algorithm Field
    ///
    ///    The Algorithm field lists the algorithm number of the DNSKEY RR
    ///    referred to by the DS record.
    /// ```
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// [RFC 4034, DNSSEC Resource Records, March 2005](https://tools.ietf.org/html/rfc4034#section-5.1.3)
    ///
    /// ```text
    /// 5.1.3.  The Digest Type Field
    ///
    ///    The DS RR refers to a DNSKEY RR by including a digest of that DNSKEY
    ///    RR.  The Digest Type field identifies the algorithm used to construct
    ///    the digest.
    /// ```
    pub fn digest_type(&self) -> DigestType {
        self.digest_type
    }

    /// [RFC 4034, DNSSEC Resource Records, March 2005](https://tools.ietf.org/html/rfc4034#section-5.1.4)
    ///
    /// ```text
    /// 5.1.4.  The Digest Field
    ///
    ///    The DS record refers to a DNSKEY RR by including a digest of that
    ///    DNSKEY RR.
    /// ```
    pub fn digest(&self) -> &[u8] {
        &self.digest
    }

    /// Validates that a given DNSKEY is covered by the DS record.
    ///
    /// The digest is recomputed over the canonical owner name and rdata of
    /// the key and compared in constant time. A digest type with no
    /// registered implementation covers nothing.
    ///
    /// # Return
    ///
    /// true if and only if the DNSKEY is covered by the DS record.
    pub fn covers(&self, name: &Name, key: &DNSKEY) -> CodecResult<bool> {
        if key.algorithm() != self.algorithm() {
            return Ok(false);
        }
        if key.calculate_key_tag()? != self.key_tag() {
            return Ok(false);
        }

        let hash = match key.to_digest(name, self.digest_type()) {
            Ok(hash) => hash,
            Err(e) => {
                return match e.kind() {
                    CodecErrorKind::UnsupportedDigestType(_) => Ok(false),
                    _ => Err(e),
                }
            }
        };

        Ok(ring::constant_time::verify_slices_are_equal(hash.as_ref(), self.digest()).is_ok())
    }
}

/// Read the RData from the given Decoder
pub fn read(decoder: &mut BinDecoder<'_>, rdata_length: u16) -> CodecResult<DS> {
    let start_idx = decoder.index();

    let key_tag: u16 = decoder.read_u16()?;
    let algorithm: Algorithm = Algorithm::read(decoder)?;
    let digest_type = DigestType::from_u8(decoder.read_u8()?);

    let bytes_read = decoder.index() - start_idx;
    let left = (rdata_length as usize)
        .checked_sub(bytes_read)
        .ok_or_else(|| CodecError::from("invalid rdata length in DS"))?;
    let digest = decoder.read_vec(left)?;

    Ok(DS::new(key_tag, algorithm, digest_type, digest))
}

/// Write the RData to the given Encoder
pub fn emit(encoder: &mut BinEncoder<'_>, rdata: &DS) -> CodecResult<()> {
    encoder.emit_u16(rdata.key_tag())?;
    rdata.algorithm().emit(encoder)?;
    encoder.emit(rdata.digest_type().into())?;
    encoder.emit_vec(rdata.digest())?;

    Ok(())
}

/// [RFC 4034, DNSSEC Resource Records, March 2005](https://tools.ietf.org/html/rfc4034#section-5.3)
///
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
///
/// 5.4.  DS RR Example
///
///    dskey.example.com. 86400 IN DS 60485 5 1 ( 2BB183AF5F22588179A53B0A
///                                               98631FAD1A292118 )
/// ```
impl fmt::Display for DS {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(
            f,
            "{tag} {alg} {ty} {digest}",
            tag = self.key_tag,
            alg = u8::from(self.algorithm),
            ty = u8::from(self.digest_type),
            digest = data_encoding::HEXUPPER_PERMISSIVE.encode(&self.digest)
        )
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test() {
        let rdata = DS::new(
            0xF00F,
            Algorithm::RSASHA256,
            DigestType::SHA256,
            vec![5, 6, 7, 8],
        );

        let mut bytes = Vec::new();
        let mut encoder: BinEncoder<'_> = BinEncoder::new(&mut bytes);
        assert!(emit(&mut encoder, &rdata).is_ok());
        let bytes = encoder.into_bytes();

        let mut decoder: BinDecoder<'_> = BinDecoder::new(bytes);
        let read_rdata = read(&mut decoder, bytes.len() as u16).expect("Decoding error");
        assert_eq!(rdata, read_rdata);
    }

    #[test]
    fn test_covers_ed25519() {
        let name = Name::from_str("example.com.").unwrap();

        // flags 257: a zone key and secure entry point
        let dnskey_rdata =
            DNSKEY::new(true, true, false, Algorithm::ED25519, (0..32).collect());
        let ds_rdata = DS::from_key(&name, &dnskey_rdata, DigestType::SHA256).unwrap();
        assert_eq!(ds_rdata.key_tag(), dnskey_rdata.calculate_key_tag().unwrap());

        assert!(ds_rdata.covers(&name, &dnskey_rdata).unwrap());

        // the digest binds every bit of the public key
        let mut tweaked_key: Vec<u8> = (0..32).collect();
        tweaked_key[31] ^= 0x01;
        let tweaked =
            DNSKEY::new(true, true, false, Algorithm::ED25519, tweaked_key);
        assert!(!ds_rdata.covers(&name, &tweaked).unwrap());
    }

    #[test]
    fn test_covers_requires_matching_algorithm() {
        let name = Name::from_str("example.com.").unwrap();
        let dnskey_rdata = DNSKEY::new(true, true, false, Algorithm::ED25519, vec![0xAB_u8; 32]);

        let ds_rdata = DS::new(
            dnskey_rdata.calculate_key_tag().unwrap(),
            Algorithm::ECDSAP256SHA256,
            DigestType::SHA256,
            dnskey_rdata
                .to_digest(&name, DigestType::SHA256)
                .unwrap()
                .as_ref()
                .to_vec(),
        );

        assert!(!ds_rdata.covers(&name, &dnskey_rdata).unwrap());
    }

    #[test]
    fn test_covers_requires_matching_key_tag() {
        let name = Name::from_str("example.com.").unwrap();
        let dnskey_rdata = DNSKEY::new(true, true, false, Algorithm::ED25519, vec![0xAB_u8; 32]);
        let key_tag = dnskey_rdata.calculate_key_tag().unwrap();

        let ds_rdata = DS::new(
            key_tag.wrapping_add(1),
            Algorithm::ED25519,
            DigestType::SHA256,
            dnskey_rdata
                .to_digest(&name, DigestType::SHA256)
                .unwrap()
                .as_ref()
                .to_vec(),
        );

        assert!(!ds_rdata.covers(&name, &dnskey_rdata).unwrap());
    }

    #[test]
    fn test_unsupported_digest_type_covers_nothing() {
        let name = Name::from_str("example.com.").unwrap();
        let dnskey_rdata = DNSKEY::new(true, true, false, Algorithm::ED25519, vec![0xAB_u8; 32]);

        let ds_rdata = DS::new(
            dnskey_rdata.calculate_key_tag().unwrap(),
            Algorithm::ED25519,
            DigestType::GOSTR34_11_94,
            vec![0_u8; 32],
        );

        // never silently equal, but not an error either
        assert!(!ds_rdata.covers(&name, &dnskey_rdata).unwrap());
    }

    #[test]
    fn test_unknown_digest_type_round_trips() {
        let bytes = [0xF0, 0x0F, 15, 5, 0xDE, 0xAD];
        let mut decoder: BinDecoder<'_> = BinDecoder::new(&bytes);
        let rdata = read(&mut decoder, bytes.len() as u16).expect("Decoding error");
        assert_eq!(rdata.digest_type(), DigestType::Unknown(5));

        let mut reencoded = Vec::new();
        let mut encoder: BinEncoder<'_> = BinEncoder::new(&mut reencoded);
        emit(&mut encoder, &rdata).expect("Encoding error");
        assert_eq!(encoder.into_bytes().as_slice(), &bytes);
    }

    #[test]
    fn test_display() {
        let rdata = DS::new(
            60485,
            Algorithm::RSASHA1,
            DigestType::SHA1,
            vec![
                0x2B, 0xB1, 0x83, 0xAF, 0x5F, 0x22, 0x58, 0x81, 0x79, 0xA5, 0x3B, 0x0A, 0x98,
                0x63, 0x1F, 0xAD, 0x1A, 0x29, 0x21, 0x18,
            ],
        );
        assert_eq!(
            rdata.to_string(),
            "60485 5 1 2BB183AF5F22588179A53B0A98631FAD1A292118"
        );
    }
}
