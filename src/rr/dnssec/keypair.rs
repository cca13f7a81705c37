// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Signing key abstractions over the ring backend
//!
//! Private keys are carried as DER-encoded PKCS#8 documents. All signing
//! and key generation draws randomness from ring's `SystemRandom`, the one
//! process-wide cryptographically secure source.

use ring::{
    rand::SystemRandom,
    signature::{
        EcdsaKeyPair, Ed25519KeyPair, KeyPair as RingKeyPair, RsaKeyPair,
        ECDSA_P256_SHA256_FIXED_SIGNING, ECDSA_P384_SHA384_FIXED_SIGNING, RSA_PKCS1_SHA256,
        RSA_PKCS1_SHA512,
    },
};

use crate::error::{DnsSecErrorKind, DnsSecResult};
use crate::rr::dnssec::{Algorithm, PublicKeyBuf};

/// A key that can be used to sign records.
pub trait SigningKey: Send + Sync + 'static {
    /// Sign the message bytes.
    ///
    /// # Return value
    ///
    /// The signature in the DNSSEC wire layout for the key's algorithm,
    /// ready to be stored in an `RRSIG` or compared by a verifier.
    fn sign(&self, message: &[u8]) -> DnsSecResult<Vec<u8>>;

    /// Returns a [`PublicKeyBuf`] with the DNSKEY wire layout public key.
    fn to_public_key(&self) -> DnsSecResult<PublicKeyBuf>;

    /// The algorithm of this signing key.
    fn algorithm(&self) -> Algorithm;
}

/// Decode a signing key pair from DER-encoded PKCS#8 bytes.
pub fn decode_key(bytes: &[u8], algorithm: Algorithm) -> DnsSecResult<Box<dyn SigningKey>> {
    #[allow(deprecated)]
    match algorithm {
        Algorithm::ECDSAP256SHA256 | Algorithm::ECDSAP384SHA384 => Ok(Box::new(
            EcdsaSigningKey::from_pkcs8(bytes, algorithm)?,
        )),
        Algorithm::ED25519 => Ok(Box::new(Ed25519SigningKey::from_pkcs8(bytes)?)),
        Algorithm::RSASHA256 | Algorithm::RSASHA512 => {
            Ok(Box::new(RsaSigningKey::from_pkcs8(bytes, algorithm)?))
        }
        Algorithm::RSASHA1 | Algorithm::RSASHA1NSEC3SHA1 => {
            Err(format!("unsupported signing algorithm (insecure): {algorithm:?}").into())
        }
        _ => Err(format!("unsupported signing algorithm: {algorithm:?}").into()),
    }
}

/// Generates a signing key pair and returns the DER-encoded PKCS#8 bytes.
///
/// RSA key generation is not offered by the backend; RSA signing keys must
/// be generated externally and decoded with [`decode_key`].
pub fn generate_pkcs8(algorithm: Algorithm) -> DnsSecResult<Vec<u8>> {
    match algorithm {
        Algorithm::ECDSAP256SHA256 | Algorithm::ECDSAP384SHA384 => {
            EcdsaSigningKey::generate_pkcs8(algorithm)
        }
        Algorithm::ED25519 => Ed25519SigningKey::generate_pkcs8(),
        _ => Err(DnsSecErrorKind::Message("key generation unsupported for this algorithm").into()),
    }
}

/// An ECDSA signing key pair (backed by ring).
pub struct EcdsaSigningKey {
    inner: EcdsaKeyPair,
    algorithm: Algorithm,
}

impl EcdsaSigningKey {
    /// Decode signing key pair from DER-encoded PKCS#8 bytes.
    ///
    /// Errors unless the given algorithm is one of the following:
    ///
    /// - [`Algorithm::ECDSAP256SHA256`]
    /// - [`Algorithm::ECDSAP384SHA384`]
    pub fn from_pkcs8(bytes: &[u8], algorithm: Algorithm) -> DnsSecResult<Self> {
        let rng = SystemRandom::new();
        let ring_algorithm = match algorithm {
            Algorithm::ECDSAP256SHA256 => &ECDSA_P256_SHA256_FIXED_SIGNING,
            Algorithm::ECDSAP384SHA384 => &ECDSA_P384_SHA384_FIXED_SIGNING,
            _ => return Err(DnsSecErrorKind::Message("unsupported algorithm").into()),
        };

        Ok(Self {
            inner: EcdsaKeyPair::from_pkcs8(ring_algorithm, bytes, &rng)?,
            algorithm,
        })
    }

    /// Generate signing key pair and return the DER-encoded PKCS#8 bytes.
    pub fn generate_pkcs8(algorithm: Algorithm) -> DnsSecResult<Vec<u8>> {
        let rng = SystemRandom::new();
        let alg = match algorithm {
            Algorithm::ECDSAP256SHA256 => &ECDSA_P256_SHA256_FIXED_SIGNING,
            Algorithm::ECDSAP384SHA384 => &ECDSA_P384_SHA384_FIXED_SIGNING,
            _ => return Err(DnsSecErrorKind::Message("unsupported algorithm").into()),
        };

        let pkcs8 = EcdsaKeyPair::generate_pkcs8(alg, &rng)?;
        Ok(pkcs8.as_ref().to_vec())
    }
}

impl SigningKey for EcdsaSigningKey {
    fn sign(&self, message: &[u8]) -> DnsSecResult<Vec<u8>> {
        // the FIXED signing algorithms produce the raw fixed-width "r | s"
        // layout the DNSSEC wire format requires
        let rng = SystemRandom::new();
        Ok(self.inner.sign(&rng, message)?.as_ref().to_vec())
    }

    fn to_public_key(&self) -> DnsSecResult<PublicKeyBuf> {
        // ring prefixes the uncompressed point with 0x04, DNSKEY strips it
        let mut bytes = self.inner.public_key().as_ref().to_vec();
        bytes.remove(0);
        Ok(PublicKeyBuf::new(bytes))
    }

    fn algorithm(&self) -> Algorithm {
        self.algorithm
    }
}

/// An Ed25519 signing key pair (backed by ring).
pub struct Ed25519SigningKey {
    inner: Ed25519KeyPair,
}

impl Ed25519SigningKey {
    /// Decode signing key pair from DER-encoded PKCS#8 bytes.
    pub fn from_pkcs8(bytes: &[u8]) -> DnsSecResult<Self> {
        Ok(Self {
            inner: Ed25519KeyPair::from_pkcs8(bytes)?,
        })
    }

    /// Generate signing key pair and return the DER-encoded PKCS#8 bytes.
    pub fn generate_pkcs8() -> DnsSecResult<Vec<u8>> {
        let rng = SystemRandom::new();
        let pkcs8 = Ed25519KeyPair::generate_pkcs8(&rng)?;
        Ok(pkcs8.as_ref().to_vec())
    }
}

impl SigningKey for Ed25519SigningKey {
    fn sign(&self, message: &[u8]) -> DnsSecResult<Vec<u8>> {
        Ok(self.inner.sign(message).as_ref().to_vec())
    }

    fn to_public_key(&self) -> DnsSecResult<PublicKeyBuf> {
        Ok(PublicKeyBuf::new(self.inner.public_key().as_ref().to_vec()))
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::ED25519
    }
}

/// An RSA signing key pair (backed by ring).
pub struct RsaSigningKey {
    inner: RsaKeyPair,
    algorithm: Algorithm,
}

impl RsaSigningKey {
    /// Decode signing key pair from DER-encoded PKCS#8 bytes.
    ///
    /// Errors unless the given algorithm is one of the following:
    ///
    /// - [`Algorithm::RSASHA256`]
    /// - [`Algorithm::RSASHA512`]
    pub fn from_pkcs8(bytes: &[u8], algorithm: Algorithm) -> DnsSecResult<Self> {
        match algorithm {
            #[allow(deprecated)]
            Algorithm::RSASHA1 | Algorithm::RSASHA1NSEC3SHA1 => {
                return Err(
                    format!("unsupported signing algorithm (insecure): {algorithm:?}").into(),
                )
            }
            Algorithm::RSASHA256 | Algorithm::RSASHA512 => {}
            _ => return Err(format!("unsupported signing algorithm: {algorithm:?}").into()),
        }

        Ok(Self {
            inner: RsaKeyPair::from_pkcs8(bytes)?,
            algorithm,
        })
    }
}

impl SigningKey for RsaSigningKey {
    fn sign(&self, message: &[u8]) -> DnsSecResult<Vec<u8>> {
        let encoding = match self.algorithm {
            Algorithm::RSASHA256 => &RSA_PKCS1_SHA256,
            Algorithm::RSASHA512 => &RSA_PKCS1_SHA512,
            _ => unreachable!("signing algorithm was checked in from_pkcs8"),
        };

        let rng = SystemRandom::new();
        let mut signature = vec![0; self.inner.public().modulus_len()];
        self.inner.sign(encoding, &rng, message, &mut signature)?;
        Ok(signature)
    }

    fn to_public_key(&self) -> DnsSecResult<PublicKeyBuf> {
        // ring hands back the DER RSAPublicKey sequence; the DNSKEY form is
        // rebuilt from the modulus and exponent components per RFC 3110
        let der = self.inner.public_key().as_ref();
        let (n, e) = parse_der_rsa_public_key(der)?;

        let mut dnskey = Vec::with_capacity(3 + e.len() + n.len());
        if e.len() > 255 {
            dnskey.push(0);
            dnskey.extend((e.len() as u16).to_be_bytes());
        } else {
            dnskey.push(e.len() as u8);
        }
        dnskey.extend(e);
        dnskey.extend(n);
        Ok(PublicKeyBuf::new(dnskey))
    }

    fn algorithm(&self) -> Algorithm {
        self.algorithm
    }
}

/// Splits a DER encoded `RSAPublicKey ::= SEQUENCE { modulus, publicExponent }`
/// into its two unsigned big-endian integers, leading zero octets stripped.
fn parse_der_rsa_public_key(der: &[u8]) -> DnsSecResult<(&[u8], &[u8])> {
    fn read_len(der: &[u8], at: &mut usize) -> DnsSecResult<usize> {
        let first = *der
            .get(*at)
            .ok_or_else(|| DnsSecErrorKind::Message("truncated DER length"))?;
        *at += 1;
        if first & 0x80 == 0 {
            return Ok(first as usize);
        }
        let num_octets = (first & 0x7F) as usize;
        if num_octets == 0 || num_octets > std::mem::size_of::<usize>() {
            return Err(DnsSecErrorKind::Message("unsupported DER length form").into());
        }
        let mut len = 0_usize;
        for _ in 0..num_octets {
            let octet = *der
                .get(*at)
                .ok_or_else(|| DnsSecErrorKind::Message("truncated DER length"))?;
            *at += 1;
            len = (len << 8) | octet as usize;
        }
        Ok(len)
    }

    fn read_integer<'a>(der: &'a [u8], at: &mut usize) -> DnsSecResult<&'a [u8]> {
        if der.get(*at) != Some(&0x02) {
            return Err(DnsSecErrorKind::Message("expected DER INTEGER").into());
        }
        *at += 1;
        let len = read_len(der, at)?;
        let end = *at + len;
        let mut bytes = der
            .get(*at..end)
            .ok_or_else(|| DnsSecErrorKind::Message("truncated DER INTEGER"))?;
        *at = end;
        while bytes.first() == Some(&0) {
            bytes = &bytes[1..];
        }
        Ok(bytes)
    }

    let mut at = 0_usize;
    if der.first() != Some(&0x30) {
        return Err(DnsSecErrorKind::Message("expected DER SEQUENCE").into());
    }
    at += 1;
    let _seq_len = read_len(der, &mut at)?;

    let n = read_integer(der, &mut at)?;
    let e = read_integer(der, &mut at)?;
    Ok((n, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rr::dnssec::PublicKey;

    fn public_key_round_trip(algorithm: Algorithm) {
        let pkcs8 = generate_pkcs8(algorithm).expect("keygen failed");
        let key = decode_key(&pkcs8, algorithm).expect("decode failed");
        let public_key = key.to_public_key().expect("public key export failed");

        let message = b"www.example.com";
        let mut signature = key.sign(message).expect("signing failed");

        assert!(public_key.verify(algorithm, message, &signature).is_ok());

        // tampering with the signature must break verification
        signature[10] = !signature[10];
        assert!(public_key.verify(algorithm, message, &signature).is_err());
    }

    #[test]
    fn test_ecdsa_p256() {
        public_key_round_trip(Algorithm::ECDSAP256SHA256);
    }

    #[test]
    fn test_ecdsa_p384() {
        public_key_round_trip(Algorithm::ECDSAP384SHA384);
    }

    #[test]
    fn test_ed25519() {
        public_key_round_trip(Algorithm::ED25519);
    }

    #[test]
    fn test_different_keys_do_not_verify() {
        let algorithm = Algorithm::ED25519;
        let key = decode_key(&generate_pkcs8(algorithm).unwrap(), algorithm).unwrap();
        let other = decode_key(&generate_pkcs8(algorithm).unwrap(), algorithm).unwrap();

        let message = b"www.example.com";
        let signature = key.sign(message).unwrap();

        assert!(other
            .to_public_key()
            .unwrap()
            .verify(algorithm, message, &signature)
            .is_err());
    }

    #[test]
    fn test_rsa_generate_unsupported() {
        assert!(generate_pkcs8(Algorithm::RSASHA256).is_err());
    }

    #[test]
    fn test_different_message_does_not_verify() {
        let algorithm = Algorithm::ECDSAP256SHA256;
        let key = decode_key(&generate_pkcs8(algorithm).unwrap(), algorithm).unwrap();
        let public_key = key.to_public_key().unwrap();

        let signature = key.sign(b"www.example.com").unwrap();
        assert!(public_key
            .verify(algorithm, b"www.example.net", &signature)
            .is_err());
    }
}
