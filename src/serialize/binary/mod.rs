// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Binary serialization types

mod decoder;
mod encoder;

use std::net::{Ipv4Addr, Ipv6Addr};

pub use self::decoder::BinDecoder;
pub use self::encoder::{BinEncoder, Place};

use crate::error::*;

/// A type which can be encoded into the DNS binary format
pub trait BinEncodable {
    /// Write the type to the stream
    fn emit(&self, encoder: &mut BinEncoder<'_>) -> CodecResult<()>;

    /// Returns the object in binary form
    fn to_bytes(&self) -> CodecResult<Vec<u8>> {
        let mut bytes = Vec::<u8>::new();
        {
            let mut encoder = BinEncoder::new(&mut bytes);
            self.emit(&mut encoder)?;
        }

        Ok(bytes)
    }
}

/// A type which can be decoded from the DNS binary format
pub trait BinDecodable<'r>: Sized {
    /// Read the type from the stream
    fn read(decoder: &mut BinDecoder<'r>) -> CodecResult<Self>;

    /// Returns the object decoded from binary form
    fn from_bytes(bytes: &'r [u8]) -> CodecResult<Self> {
        let mut decoder = BinDecoder::new(bytes);
        Self::read(&mut decoder)
    }
}

impl BinEncodable for u16 {
    fn emit(&self, encoder: &mut BinEncoder<'_>) -> CodecResult<()> {
        encoder.emit_u16(*self)
    }
}

impl<'r> BinDecodable<'r> for u16 {
    fn read(decoder: &mut BinDecoder<'_>) -> CodecResult<Self> {
        decoder.read_u16()
    }
}

impl BinEncodable for u32 {
    fn emit(&self, encoder: &mut BinEncoder<'_>) -> CodecResult<()> {
        encoder.emit_u32(*self)
    }
}

impl<'r> BinDecodable<'r> for u32 {
    fn read(decoder: &mut BinDecoder<'_>) -> CodecResult<Self> {
        decoder.read_u32()
    }
}

impl BinEncodable for Vec<u8> {
    fn emit(&self, encoder: &mut BinEncoder<'_>) -> CodecResult<()> {
        encoder.emit_vec(self)
    }
}

impl BinEncodable for Ipv4Addr {
    fn emit(&self, encoder: &mut BinEncoder<'_>) -> CodecResult<()> {
        encoder.emit_vec(&self.octets())
    }
}

impl<'r> BinDecodable<'r> for Ipv4Addr {
    fn read(decoder: &mut BinDecoder<'r>) -> CodecResult<Self> {
        let octets = decoder.read_slice(4)?;
        Ok(Self::new(octets[0], octets[1], octets[2], octets[3]))
    }
}

impl BinEncodable for Ipv6Addr {
    fn emit(&self, encoder: &mut BinEncoder<'_>) -> CodecResult<()> {
        encoder.emit_vec(&self.octets())
    }
}

impl<'r> BinDecodable<'r> for Ipv6Addr {
    fn read(decoder: &mut BinDecoder<'r>) -> CodecResult<Self> {
        let octets = decoder.read_slice(16)?;
        let mut fixed = [0_u8; 16];
        fixed.copy_from_slice(octets);
        Ok(Self::from(fixed))
    }
}
