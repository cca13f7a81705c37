// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Verifier is a structure for performing the verification half of the DNSSEC specification

use crate::error::*;
use crate::rr::dnssec::rdata::DNSKEY;
use crate::rr::dnssec::{Algorithm, PublicKey, PublicKeyEnum};

/// Types which are able to verify DNS based signatures
pub trait Verifier {
    /// Return the algorithm which this Verifier covers
    fn algorithm(&self) -> Algorithm;

    /// Return the public key associated with this verifier
    fn key(&self) -> CodecResult<PublicKeyEnum<'_>>;

    /// Verifies the message matches the signature with the current `key`.
    ///
    /// # Arguments
    ///
    /// * `message` - the message to be validated
    /// * `signature` - the signature over the message, e.g. extracted from
    ///                 an `RRSIG`
    ///
    /// # Return value
    ///
    /// Ok if and only if the signature is valid for the message.
    fn verify(&self, message: &[u8], signature: &[u8]) -> CodecResult<()> {
        self.key()?.verify(self.algorithm(), message, signature)
    }
}

impl Verifier for DNSKEY {
    fn algorithm(&self) -> Algorithm {
        self.algorithm()
    }

    fn key(&self) -> CodecResult<PublicKeyEnum<'_>> {
        PublicKeyEnum::from_public_bytes(self.public_key(), self.algorithm())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rr::dnssec::keypair::{decode_key, generate_pkcs8};

    #[test]
    fn test_dnskey_verifies_its_own_signatures() {
        let algorithm = Algorithm::ED25519;
        let key = decode_key(&generate_pkcs8(algorithm).unwrap(), algorithm).unwrap();
        let dnskey = DNSKEY::new(
            true,
            true,
            false,
            algorithm,
            key.to_public_key().unwrap().into_inner(),
        );

        let message = b"signed zone data";
        let signature = key.sign(message).unwrap();

        assert!(dnskey.verify(message, &signature).is_ok());
        assert!(dnskey.verify(b"other data", &signature).is_err());
    }
}
