// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! public key record data for signing zone records

use std::fmt;

#[cfg(feature = "serde-config")]
use serde::{Deserialize, Serialize};

use crate::error::*;
use crate::rr::dnssec::{Algorithm, Digest, DigestType};
use crate::rr::domain::Name;
use crate::serialize::binary::{BinDecodable, BinDecoder, BinEncodable, BinEncoder};

/// [RFC 4034](https://tools.ietf.org/html/rfc4034#section-2), DNSSEC Resource Records, March 2005
///
/// ```text
/// 2.1.  DNSKEY RDATA Wire Format
///
///    The RDATA for a DNSKEY RR consists of a 2 octet Flags Field, a 1
///    octet Protocol Field, a 1 octet Algorithm Field, and the Public Key
///    Field.
///
///                         1 1 1 1 1 1 1 1 1 1 2 2 2 2 2 2 2 2 2 2 3 3
///     0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///    |              Flags            |    Protocol   |   Algorithm   |
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///    /                                                               /
///    /                            Public Key                         /
///    /                                                               /
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///
/// 2.1.5.  Notes on DNSKEY RDATA Design
///
///    Although the Protocol Field always has value 3, it is retained for
///    backward compatibility with early versions of the KEY record.
/// ```
#[cfg_attr(feature = "serde-config", derive(Deserialize, Serialize))]
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct DNSKEY {
    zone_key: bool,
    secure_entry_point: bool,
    revoke: bool,
    algorithm: Algorithm,
    public_key: Vec<u8>,
}

impl DNSKEY {
    /// Construct a new DNSKEY RData
    ///
    /// # Arguments
    ///
    /// * `zone_key` - this key is used to sign Zone resource records
    /// * `secure_entry_point` - this key is used to sign DNSKeys that sign the Zone records
    /// * `revoke` - this key has been revoked
    /// * `algorithm` - specifies the algorithm which this Key uses to sign records
    /// * `public_key` - the public key material in the on-wire layout for the algorithm
    pub fn new(
        zone_key: bool,
        secure_entry_point: bool,
        revoke: bool,
        algorithm: Algorithm,
        public_key: Vec<u8>,
    ) -> Self {
        Self {
            zone_key,
            secure_entry_point,
            revoke,
            algorithm,
            public_key,
        }
    }

    /// [RFC 4034, DNSSEC Resource Records, March 2005](https://tools.ietf.org/html/rfc4034#section-2.1.1)
    ///
    /// ```text
    /// 2.1.1.  The Flags Field
    ///
    ///    Bit 7 of the Flags field is the Zone Key flag.  If bit 7 has value 1,
    ///    then the DNSKEY record holds a DNS zone key, and the DNSKEY RR's
    ///    owner name MUST be the name of a zone.  If bit 7 has value 0, then
    ///    the DNSKEY record holds some other type of DNS public key and MUST
    ///    NOT be used to verify RRSIGs that cover RRsets.
    /// ```
    pub fn is_zone_key(&self) -> bool {
        self.zone_key
    }

    /// Sets the Zone Key flag; setting an already set flag is a no-op
    pub fn set_zone_key(&mut self, zone_key: bool) {
        self.zone_key = zone_key;
    }

    /// [RFC 4034, DNSSEC Resource Records, March 2005](https://tools.ietf.org/html/rfc4034#section-2.1.1)
    ///
    /// ```text
    /// 2.1.1.  The Flags Field
    ///
    ///    Bit 15 of the Flags field is the Secure Entry Point flag, described
    ///    in [RFC3757].  If bit 15 has value 1, then the DNSKEY record holds a
    ///    key intended for use as a secure entry point.  This flag is only
    ///    intended to be a hint to zone signing or debugging software as to the
    ///    intended use of this DNSKEY record; validators MUST NOT alter their
    ///    behavior during the signature validation process in any way based on
    ///    the setting of this bit.
    /// ```
    pub fn is_secure_entry_point(&self) -> bool {
        self.secure_entry_point
    }

    /// Sets the Secure Entry Point flag; setting an already set flag is a no-op
    pub fn set_secure_entry_point(&mut self, secure_entry_point: bool) {
        self.secure_entry_point = secure_entry_point;
    }

    /// [RFC 5011, Trust Anchor Update, September 2007](https://tools.ietf.org/html/rfc5011#section-3)
    ///
    /// ```text
    /// 7.  IANA Considerations
    ///
    ///   The IANA has assigned a bit in the DNSKEY flags field (see Section 7
    ///   of [RFC4034]) for the REVOKE bit (8).
    /// ```
    pub fn is_revoked(&self) -> bool {
        self.revoke
    }

    /// Sets the Revoke flag; setting an already set flag is a no-op
    pub fn set_revoked(&mut self, revoke: bool) {
        self.revoke = revoke;
    }

    /// [RFC 4034, DNSSEC Resource Records, March 2005](https://tools.ietf.org/html/rfc4034#section-2.1.3)
    ///
    /// ```text
    /// 2.1.3.  The Algorithm Field
    ///
    ///    The Algorithm field identifies the public key's cryptographic
    ///    algorithm and determines the format of the Public Key field.
    /// ```
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// [RFC 4034, DNSSEC Resource Records, March 2005](https://tools.ietf.org/html/rfc4034#section-2.1.4)
    ///
    /// ```text
    /// 2.1.4.  The Public Key Field
    ///
    ///    The Public Key Field holds the public key material.  The format
    ///    depends on the algorithm of the key being stored and is described in
    ///    separate documents.
    /// ```
    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    /// The 16 bit flags field of this key
    pub fn flags(&self) -> u16 {
        let mut flags: u16 = 0;
        if self.zone_key {
            flags |= 0b0000_0001_0000_0000
        }
        if self.secure_entry_point {
            flags |= 0b0000_0000_0000_0001
        }
        if self.revoke {
            flags |= 0b0000_0000_1000_0000
        }

        flags
    }

    /// Creates a message digest for this DNSKEY record, used by the DS record.
    ///
    /// ```text
    /// 5.1.4.  The Digest Field
    ///
    ///    The digest is calculated by concatenating the canonical form of the
    ///    fully qualified owner name of the DNSKEY RR with the DNSKEY RDATA,
    ///    and then applying the digest algorithm.
    ///
    ///      digest = digest_algorithm( DNSKEY owner name | DNSKEY RDATA);
    ///
    ///       "|" denotes concatenation
    ///
    ///      DNSKEY RDATA = Flags | Protocol | Algorithm | Public Key.
    /// ```
    ///
    /// # Arguments
    ///
    /// * `name` - the owner name of the DNSKEY record.
    /// * `digest_type` - the `DigestType` with which to create the message digest.
    pub fn to_digest(&self, name: &Name, digest_type: DigestType) -> CodecResult<Digest> {
        let mut buf: Vec<u8> = Vec::new();
        {
            let mut encoder = BinEncoder::new(&mut buf);
            encoder.set_canonical_names(true);
            name.emit(&mut encoder)
                .and_then(|_| emit(&mut encoder, self))?;
        }

        digest_type.hash(&buf)
    }

    /// The key tag is calculated as a hash to more quickly lookup a DNSKEY.
    ///
    /// [RFC 2535](https://tools.ietf.org/html/rfc2535), Domain Name System Security Extensions, March 1999
    ///
    /// ```text
    /// 4.1.6 Key Tag Field
    ///
    ///  The "key Tag" is a two octet quantity that is used to efficiently
    ///  select between multiple keys which may be applicable and thus check
    ///  that a public key about to be used for the computationally expensive
    ///  effort to check the signature is possibly valid.  For algorithm 1
    ///  (MD5/RSA) as defined in [RFC 2537], it is the next to the bottom two
    ///  octets of the public key modulus needed to decode the signature
    ///  field.  That is to say, the most significant 16 of the least
    ///  significant 24 bits of the modulus in network (big endian) order. For
    ///  all other algorithms, including private algorithms, it is calculated
    ///  as a simple checksum of the KEY RR as described in Appendix C.
    ///
    /// Appendix C: Key Tag Calculation
    ///
    ///  /* assumes int is at least 16 bits
    ///     first byte of the key tag is the most significant byte of return
    ///     value
    ///     second byte of the key tag is the least significant byte of
    ///     return value
    ///     */
    ///
    ///  int keytag (
    ///
    ///          unsigned char key[],  /* the RDATA part of the KEY RR */
    ///          unsigned int keysize, /* the RDLENGTH */
    ///          )
    ///  {
    ///  long int    ac;    /* assumed to be 32 bits or larger */
    ///
    ///  for ( ac = 0, i = 0; i < keysize; ++i )
    ///      ac += (i&1) ? key[i] : key[i]<<8;
    ///  ac += (ac>>16) & 0xFFFF;
    ///  return ac & 0xFFFF;
    ///  }
    /// ```
    pub fn calculate_key_tag(&self) -> CodecResult<u16> {
        #[allow(deprecated)]
        if self.algorithm == Algorithm::RSAMD5 {
            // the most significant 16 of the least significant 24 bits of
            // the modulus. The & here matches deployed legacy
            // implementations bit-for-bit and is deliberately not the
            // Appendix B.1 formula; do not "correct" it.
            let key = &self.public_key;
            if key.len() < 4 {
                return Err(CodecError::from("RSAMD5 public key too short for key tag"));
            }
            return Ok(u16::from(key[key.len() - 4]) & (u16::from(key[key.len() - 3]) << 8));
        }

        let mut bytes: Vec<u8> = Vec::with_capacity(512);
        {
            let mut e = BinEncoder::new(&mut bytes);
            emit(&mut e, self)?;
        }
        Ok(Self::calculate_key_tag_internal(&bytes))
    }

    /// The checksum over the serialized rdata, for all algorithms other than RSAMD5
    pub fn calculate_key_tag_internal(bytes: &[u8]) -> u16 {
        let mut ac: u32 = 0;
        for (i, k) in bytes.iter().enumerate() {
            ac += u32::from(*k) << if i & 0x01 != 0 { 0 } else { 8 };
        }
        ac += (ac >> 16) & 0xFFFF;
        (ac & 0xFFFF) as u16
    }
}

/// Read the RData from the given Decoder
pub fn read(decoder: &mut BinDecoder<'_>, rdata_length: u16) -> CodecResult<DNSKEY> {
    let flags: u16 = decoder.read_u16()?;

    //    Bits 0-6 and 8-14 are reserved: these bits MUST have value 0 upon
    //    creation of the DNSKEY RR and MUST be ignored upon receipt.
    let zone_key: bool = flags & 0b0000_0001_0000_0000 == 0b0000_0001_0000_0000;
    let secure_entry_point: bool = flags & 0b0000_0000_0000_0001 == 0b0000_0000_0000_0001;
    let revoke: bool = flags & 0b0000_0000_1000_0000 == 0b0000_0000_1000_0000;

    // RFC 4034                DNSSEC Resource Records               March 2005
    //
    // 2.1.2.  The Protocol Field
    //
    //    The Protocol Field MUST have value 3, and the DNSKEY RR MUST be
    //    treated as invalid during signature verification if it is found to be
    //    some value other than 3.
    let protocol: u8 = decoder.read_u8()?;
    if protocol != 3 {
        return Err(CodecErrorKind::DnsKeyProtocolNot3(protocol).into());
    }

    let algorithm: Algorithm = Algorithm::read(decoder)?;

    // the public key is the left-over bytes minus 4 for the first fields
    let key_len = (rdata_length as usize)
        .checked_sub(4)
        .ok_or_else(|| CodecError::from("invalid rdata length in DNSKEY"))?;
    let public_key: Vec<u8> = decoder.read_vec(key_len)?;

    Ok(DNSKEY::new(
        zone_key,
        secure_entry_point,
        revoke,
        algorithm,
        public_key,
    ))
}

/// Write the RData to the given Encoder
pub fn emit(encoder: &mut BinEncoder<'_>, rdata: &DNSKEY) -> CodecResult<()> {
    encoder.emit_u16(rdata.flags())?;
    encoder.emit(3)?; // protocol is always 3 per RFC 4034
    rdata.algorithm().emit(encoder)?;
    encoder.emit_vec(rdata.public_key())?;

    Ok(())
}

/// [RFC 4034](https://tools.ietf.org/html/rfc4034#section-2.2), DNSSEC Resource Records, March 2005
///
/// ```text
/// 2.2.  The DNSKEY RR Presentation Format
///
///    The presentation format of the RDATA portion is as follows:
///
///    The Flag field MUST be represented as an unsigned decimal integer.
///    Given the currently defined flags, the possible values are: 0, 256,
///    and 257.
///
///    The Protocol Field MUST be represented as an unsigned decimal integer
///    with a value of 3.
///
///    The Algorithm field MUST be represented either as an unsigned decimal
///    integer or as an algorithm mnemonic as specified in Appendix A.1.
///
///    The Public Key field MUST be represented as a Base64 encoding of the
///    Public Key.
/// ```
impl fmt::Display for DNSKEY {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(
            f,
            "{flags} 3 {alg} {key}",
            flags = self.flags(),
            alg = u8::from(self.algorithm),
            key = data_encoding::BASE64.encode(&self.public_key)
        )
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    pub(crate) fn test() {
        let rdata = DNSKEY::new(
            true,
            true,
            false,
            Algorithm::RSASHA256,
            vec![0, 1, 2, 3, 4, 5, 6, 7],
        );

        let mut bytes = Vec::new();
        let mut encoder: BinEncoder<'_> = BinEncoder::new(&mut bytes);
        assert!(emit(&mut encoder, &rdata).is_ok());
        let bytes = encoder.into_bytes();

        let mut decoder: BinDecoder<'_> = BinDecoder::new(bytes);
        let read_rdata = read(&mut decoder, bytes.len() as u16).expect("error decoding");

        assert_eq!(rdata, read_rdata);
        assert!(rdata
            .to_digest(
                &Name::from_str("www.example.com.").unwrap(),
                DigestType::SHA256
            )
            .is_ok());
    }

    #[test]
    fn test_flags_word() {
        let rdata = DNSKEY::new(true, true, false, Algorithm::ED25519, vec![0_u8; 32]);
        assert_eq!(rdata.flags(), 257);

        let rdata = DNSKEY::new(true, false, false, Algorithm::ED25519, vec![0_u8; 32]);
        assert_eq!(rdata.flags(), 256);

        let mut rdata = DNSKEY::new(false, false, false, Algorithm::ED25519, vec![0_u8; 32]);
        assert_eq!(rdata.flags(), 0);

        rdata.set_revoked(true);
        assert_eq!(rdata.flags(), 0b1000_0000);
        // setters are idempotent
        rdata.set_revoked(true);
        assert_eq!(rdata.flags(), 0b1000_0000);
    }

    #[test]
    fn test_protocol_not_3_rejected() {
        let bytes = [0x01, 0x01, 0x02, 0x08, 0xAA];
        let mut decoder: BinDecoder<'_> = BinDecoder::new(&bytes);
        let err = read(&mut decoder, bytes.len() as u16).unwrap_err();
        match err.kind() {
            CodecErrorKind::DnsKeyProtocolNot3(2) => (),
            kind => panic!("unexpected error: {kind:?}"),
        }
    }

    #[test]
    fn test_calculate_key_tag_checksum() {
        let test_text = "The quick brown fox jumps over the lazy dog";
        let test_vectors = vec![
            (vec![], 0),
            (vec![0, 0, 0, 0], 0),
            (vec![0xff, 0xff, 0xff, 0xff], 0xffff),
            (vec![1, 0, 0, 0], 0x0100),
            (vec![0, 1, 0, 0], 0x0001),
            (vec![0, 0, 1, 0], 0x0100),
            (test_text.as_bytes().to_vec(), 0x8d5b),
        ];

        for (input_data, exp_result) in test_vectors {
            let result = DNSKEY::calculate_key_tag_internal(&input_data);
            assert_eq!(result, exp_result);
        }
    }

    #[test]
    fn test_key_tag_depends_on_all_fields() {
        let rdata = DNSKEY::new(true, true, false, Algorithm::ED25519, vec![0x55_u8; 32]);
        let tag = rdata.calculate_key_tag().unwrap();

        // flipping a flag bit changes the tag
        let flagged = DNSKEY::new(true, false, false, Algorithm::ED25519, vec![0x55_u8; 32]);
        assert_ne!(tag, flagged.calculate_key_tag().unwrap());

        // flipping a public key bit changes the tag
        let mut key = vec![0x55_u8; 32];
        key[7] ^= 0x01;
        let tweaked = DNSKEY::new(true, true, false, Algorithm::ED25519, key);
        assert_ne!(tag, tweaked.calculate_key_tag().unwrap());
    }

    #[test]
    #[allow(deprecated)]
    fn test_rsamd5_key_tag_quirk() {
        // the legacy computation is a bitwise AND of the two modulus bytes,
        // not the Appendix B.1 sum
        let key = vec![0x12, 0x34, 0x56, 0xF0, 0x0F, 0x78, 0x9A];
        let rdata = DNSKEY::new(true, false, false, Algorithm::RSAMD5, key);
        let expected = u16::from(0xF0_u8) & (u16::from(0x0F_u8) << 8);
        assert_eq!(rdata.calculate_key_tag().unwrap(), expected);

        let short = DNSKEY::new(true, false, false, Algorithm::RSAMD5, vec![1, 2, 3]);
        assert!(short.calculate_key_tag().is_err());
    }

    #[test]
    fn test_digest_changes_with_key_bits() {
        let name = Name::from_str("example.com.").unwrap();
        let rdata = DNSKEY::new(true, true, false, Algorithm::ED25519, vec![0xAA_u8; 32]);
        let digest = rdata.to_digest(&name, DigestType::SHA256).unwrap();

        let mut key = vec![0xAA_u8; 32];
        key[0] ^= 0x80;
        let tweaked = DNSKEY::new(true, true, false, Algorithm::ED25519, key);
        let tweaked_digest = tweaked.to_digest(&name, DigestType::SHA256).unwrap();

        assert_ne!(digest.as_ref(), tweaked_digest.as_ref());
    }

    #[test]
    fn test_digest_lowercases_owner() {
        let rdata = DNSKEY::new(true, true, false, Algorithm::ED25519, vec![0xAA_u8; 32]);

        let lower = rdata
            .to_digest(&Name::from_str("example.com.").unwrap(), DigestType::SHA256)
            .unwrap();
        let upper = rdata
            .to_digest(&Name::from_str("EXAMPLE.COM.").unwrap(), DigestType::SHA256)
            .unwrap();

        assert_eq!(lower.as_ref(), upper.as_ref());
    }
}
