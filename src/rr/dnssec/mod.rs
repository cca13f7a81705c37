// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! dns security extension related modules

mod algorithm;
mod digest_type;
mod ec_public_key;
pub mod keypair;
pub mod public_key;
pub mod rdata;
mod rsa_public_key;
mod verifier;

pub use self::algorithm::Algorithm;
pub use self::digest_type::DigestType;
pub use self::keypair::{
    decode_key, generate_pkcs8, EcdsaSigningKey, Ed25519SigningKey, RsaSigningKey, SigningKey,
};
pub use self::public_key::{PublicKey, PublicKeyBuf, PublicKeyEnum};
pub use self::verifier::Verifier;

pub use ring::digest::Digest;
