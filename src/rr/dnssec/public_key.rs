// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Public Key implementations for supported key types

use ring::signature::{self, ED25519_PUBLIC_KEY_LEN};

use crate::error::*;
use crate::rr::dnssec::ec_public_key::EcPublicKey;
use crate::rr::dnssec::rsa_public_key::RsaPublicKey;
use crate::rr::dnssec::Algorithm;

/// PublicKeys implement the ability to ideally be zero copy abstractions over public keys for verifying signed content.
///
/// In DNS the KEY and DNSKEY types are generally the RData types which store public key material.
pub trait PublicKey {
    /// Returns the public bytes of the public key, in DNS format
    fn public_bytes(&self) -> &[u8];

    /// Verifies the hash matches the signature with the current `key`.
    ///
    /// # Arguments
    ///
    /// * `algorithm` - the algorithm the signature was produced with
    /// * `message` - the message to be validated
    /// * `signature` - the signature to use to verify the message
    ///
    /// # Return value
    ///
    /// Ok if and only if the signature is valid for the message. A failed
    /// verification is `VerifyFailed`, distinct from an algorithm with no
    /// registered implementation, which is `UnsupportedAlgorithm`.
    fn verify(&self, algorithm: Algorithm, message: &[u8], signature: &[u8]) -> CodecResult<()>;
}

/// An ECDSA P-256 or P-384 public key
///
/// ```text
/// RFC 6605                    ECDSA for DNSSEC                  April 2012
///
///   4.  DNSKEY and RRSIG Resource Records for ECDSA
///
///   ECDSA public keys consist of a single value, called "Q" in FIPS
///   186-3.  In DNSSEC keys, Q is a simple bit string that represents the
///   uncompressed form of a curve point, "x | y".
///
///   The ECDSA signature is the combination of two non-negative integers,
///   called "r" and "s" in FIPS 186-3.  The two integers, each of which is
///   formatted as a simple octet string, are combined into a single longer
///   octet string for DNSSEC as the concatenation "r | s".  (Conversion of
///   the integers to bit strings is described in Section C.2 of FIPS
///   186-3.)  For P-256, each integer MUST be encoded as 32 octets; for
///   P-384, each integer MUST be encoded as 48 octets.
/// ```
#[derive(Debug)]
pub struct Ec {
    key: EcPublicKey,
}

impl Ec {
    /// Constructs a new EC public key from the raw `x | y` DNSKEY bytes
    pub fn from_public_bytes(public_key: &[u8], algorithm: Algorithm) -> CodecResult<Self> {
        EcPublicKey::from_unprefixed(public_key, algorithm).map(|key| Self { key })
    }
}

impl PublicKey for Ec {
    fn public_bytes(&self) -> &[u8] {
        self.key.unprefixed_bytes()
    }

    fn verify(&self, algorithm: Algorithm, message: &[u8], signature: &[u8]) -> CodecResult<()> {
        // the *_FIXED verification algorithms expect the raw fixed-width
        // "r | s" layout the DNSSEC wire format uses, never ASN.1 DER
        let alg = match algorithm {
            Algorithm::ECDSAP256SHA256 => &signature::ECDSA_P256_SHA256_FIXED,
            Algorithm::ECDSAP384SHA384 => &signature::ECDSA_P384_SHA384_FIXED,
            _ => return Err(CodecErrorKind::UnsupportedAlgorithm(algorithm).into()),
        };
        let public_key = signature::UnparsedPublicKey::new(alg, self.key.prefixed_bytes());
        public_key
            .verify(message, signature)
            .map_err(|_| CodecErrorKind::VerifyFailed.into())
    }
}

/// An Ed25519 public key
///
/// ```text
/// RFC 8080              EdDSA for DNSSEC               February 2017
///
///  An Ed25519 public key consists of a 32-octet value, which is encoded
///  into the Public Key field of a DNSKEY resource record as a simple bit
///  string.  The generation of a public key is defined in Section 5.1.5
///  in [RFC 8032].
/// ```
#[derive(Debug)]
pub struct Ed25519<'k> {
    raw: &'k [u8],
}

impl<'k> Ed25519<'k> {
    /// Constructs a new Ed25519 public key from the 32 octet DNSKEY bytes
    pub fn from_public_bytes(public_key: &'k [u8]) -> CodecResult<Self> {
        if public_key.len() != ED25519_PUBLIC_KEY_LEN {
            return Err(CodecError::from(format!(
                "expected {} byte public_key: {}",
                ED25519_PUBLIC_KEY_LEN,
                public_key.len()
            )));
        }

        Ok(Self { raw: public_key })
    }
}

impl PublicKey for Ed25519<'_> {
    fn public_bytes(&self) -> &[u8] {
        self.raw
    }

    fn verify(&self, _: Algorithm, message: &[u8], signature: &[u8]) -> CodecResult<()> {
        let public_key = signature::UnparsedPublicKey::new(&signature::ED25519, self.raw);
        public_key
            .verify(message, signature)
            .map_err(|_| CodecErrorKind::VerifyFailed.into())
    }
}

/// An RSA public key
#[derive(Debug)]
pub struct Rsa<'k> {
    raw: &'k [u8],
    pkey: RsaPublicKey<'k>,
}

impl<'k> Rsa<'k> {
    /// Constructs a new RSA public key from the RFC 3110 DNSKEY bytes, see
    /// [`RsaPublicKey`] for the layout
    pub fn from_public_bytes(raw: &'k [u8]) -> CodecResult<Self> {
        let pkey = RsaPublicKey::try_from(raw)?;
        Ok(Self { raw, pkey })
    }
}

impl PublicKey for Rsa<'_> {
    fn public_bytes(&self) -> &[u8] {
        self.raw
    }

    fn verify(&self, algorithm: Algorithm, message: &[u8], signature: &[u8]) -> CodecResult<()> {
        #[allow(deprecated)]
        let alg = match algorithm {
            Algorithm::RSASHA256 => &signature::RSA_PKCS1_1024_8192_SHA256_FOR_LEGACY_USE_ONLY,
            Algorithm::RSASHA512 => &signature::RSA_PKCS1_1024_8192_SHA512_FOR_LEGACY_USE_ONLY,
            Algorithm::RSASHA1 | Algorithm::RSASHA1NSEC3SHA1 => {
                &signature::RSA_PKCS1_1024_8192_SHA1_FOR_LEGACY_USE_ONLY
            }
            _ => return Err(CodecErrorKind::UnsupportedAlgorithm(algorithm).into()),
        };
        let public_key = signature::RsaPublicKeyComponents {
            n: self.pkey.n(),
            e: self.pkey.e(),
        };
        public_key
            .verify(alg, message, signature)
            .map_err(|_| CodecErrorKind::VerifyFailed.into())
    }
}

/// Variants of all known public keys
#[derive(Debug)]
#[non_exhaustive]
pub enum PublicKeyEnum<'k> {
    /// RSA keypair
    Rsa(Rsa<'k>),
    /// Elliptic curve keypair
    Ec(Ec),
    /// Ed25519 public key for the Algorithm::ED25519
    Ed25519(Ed25519<'k>),
}

impl<'k> PublicKeyEnum<'k> {
    /// Converts the bytes into a PublicKey of the specified algorithm
    #[allow(deprecated)]
    pub fn from_public_bytes(public_key: &'k [u8], algorithm: Algorithm) -> CodecResult<Self> {
        match algorithm {
            Algorithm::ECDSAP256SHA256 | Algorithm::ECDSAP384SHA384 => Ok(PublicKeyEnum::Ec(
                Ec::from_public_bytes(public_key, algorithm)?,
            )),
            Algorithm::ED25519 => Ok(PublicKeyEnum::Ed25519(Ed25519::from_public_bytes(
                public_key,
            )?)),
            Algorithm::RSASHA1
            | Algorithm::RSASHA1NSEC3SHA1
            | Algorithm::RSASHA256
            | Algorithm::RSASHA512 => Ok(PublicKeyEnum::Rsa(Rsa::from_public_bytes(public_key)?)),
            _ => Err(CodecErrorKind::UnsupportedAlgorithm(algorithm).into()),
        }
    }
}

impl PublicKey for PublicKeyEnum<'_> {
    fn public_bytes(&self) -> &[u8] {
        match self {
            PublicKeyEnum::Ec(ec) => ec.public_bytes(),
            PublicKeyEnum::Ed25519(ed) => ed.public_bytes(),
            PublicKeyEnum::Rsa(rsa) => rsa.public_bytes(),
        }
    }

    fn verify(&self, algorithm: Algorithm, message: &[u8], signature: &[u8]) -> CodecResult<()> {
        match self {
            PublicKeyEnum::Ec(ec) => ec.verify(algorithm, message, signature),
            PublicKeyEnum::Ed25519(ed) => ed.verify(algorithm, message, signature),
            PublicKeyEnum::Rsa(rsa) => rsa.verify(algorithm, message, signature),
        }
    }
}

/// An owned variant of PublicKey
pub struct PublicKeyBuf {
    key_buf: Vec<u8>,
}

impl PublicKeyBuf {
    /// Constructs a new PublicKey from the specified bytes, these should be in DNSKEY form.
    pub fn new(key_buf: Vec<u8>) -> Self {
        Self { key_buf }
    }

    /// Extracts the inner buffer of public key bytes.
    pub fn into_inner(self) -> Vec<u8> {
        self.key_buf
    }
}

impl PublicKey for PublicKeyBuf {
    fn public_bytes(&self) -> &[u8] {
        &self.key_buf
    }

    fn verify(&self, algorithm: Algorithm, message: &[u8], signature: &[u8]) -> CodecResult<()> {
        let public_key = PublicKeyEnum::from_public_bytes(&self.key_buf, algorithm)?;

        public_key.verify(algorithm, message, signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecErrorKind;

    #[test]
    fn test_unsupported_algorithms() {
        #[allow(deprecated)]
        for algorithm in [
            Algorithm::ECCGOST,
            Algorithm::ED448,
            Algorithm::RSAMD5,
            Algorithm::DSA,
            Algorithm::Unknown(200),
        ] {
            let err = PublicKeyEnum::from_public_bytes(&[0_u8; 64], algorithm).unwrap_err();
            match err.kind() {
                CodecErrorKind::UnsupportedAlgorithm(a) => assert_eq!(*a, algorithm),
                kind => panic!("unexpected error: {kind:?}"),
            }
        }
    }

    #[test]
    fn test_verify_failed_is_not_unsupported() {
        let public_key = [0x55_u8; 64];
        let key = PublicKeyEnum::from_public_bytes(&public_key, Algorithm::ECDSAP256SHA256)
            .expect("key should parse");

        let err = key
            .verify(Algorithm::ECDSAP256SHA256, b"message", &[0_u8; 64])
            .unwrap_err();
        match err.kind() {
            CodecErrorKind::VerifyFailed => (),
            kind => panic!("unexpected error: {kind:?}"),
        }
    }
}
