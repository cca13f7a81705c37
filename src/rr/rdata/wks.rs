// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! WKS record for well known service descriptions

use std::fmt;
use std::net::Ipv4Addr;

#[cfg(feature = "serde-config")]
use serde::{Deserialize, Serialize};

use crate::error::*;
use crate::serialize::binary::*;

/// [RFC 1035, DOMAIN NAMES - IMPLEMENTATION AND SPECIFICATION, November 1987][rfc1035]
///
/// ```text
/// 3.4.2. WKS RDATA format
///
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     |                    ADDRESS                    |
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     |       PROTOCOL        |                       |
///     +--+--+--+--+--+--+--+--+                       |
///     |                                               |
///     /                   <BIT MAP>                   /
///     /                                               /
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///
/// where:
///
/// ADDRESS         An 32 bit Internet address
///
/// PROTOCOL        An 8 bit IP protocol number
///
/// <BIT MAP>       A variable length bit map.  The bit map must be a
///                 multiple of 8 bits long.
///
/// The WKS record is used to describe the well known services supported by
/// a particular protocol on a particular internet address.  The PROTOCOL
/// field specifies an IP protocol number, and the bit map has one bit per
/// port of the specified protocol.  The first bit corresponds to port 0,
/// the second to port 1, etc.
///
/// For example, if PROTOCOL=TCP (6), the 26th bit corresponds to TCP port
/// 25 (SMTP).  If this bit is set, a SMTP server should be listening on TCP
/// port 25; if zero, SMTP service is not supported on the specified
/// address.
/// ```
///
/// [rfc1035]: https://tools.ietf.org/html/rfc1035
#[cfg_attr(feature = "serde-config", derive(Deserialize, Serialize))]
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct WKS {
    address: Ipv4Addr,
    protocol: u8,
    ports: Vec<u16>,
}

impl WKS {
    /// Creates a new WKS record data.
    ///
    /// # Arguments
    ///
    /// * `address` - the internet address offering the services
    /// * `protocol` - an IP protocol number, e.g. 6 for TCP
    /// * `ports` - the open ports; sorted and deduplicated on construction
    pub fn new(address: Ipv4Addr, protocol: u8, ports: Vec<u16>) -> Self {
        let mut ports = ports;
        ports.sort_unstable();
        ports.dedup();

        Self {
            address,
            protocol,
            ports,
        }
    }

    /// The internet address offering the services
    pub fn address(&self) -> Ipv4Addr {
        self.address
    }

    /// The IP protocol number the port bitmap applies to
    pub fn protocol(&self) -> u8 {
        self.protocol
    }

    /// The sorted set of open port numbers
    pub fn ports(&self) -> &[u16] {
        &self.ports
    }
}

/// Read the RData from the given Decoder
///
/// The bitmap occupies whatever remains of the rdata after the address and
/// protocol octets; bit `n` of octet `k`, most significant bit first, names
/// port `8k + n`.
pub fn read(decoder: &mut BinDecoder<'_>, rdata_length: u16) -> CodecResult<WKS> {
    let start_idx = decoder.index();

    let address = Ipv4Addr::read(decoder)?;
    let protocol = decoder.read_u8()?;

    let bitmap_len = (rdata_length as usize)
        .checked_sub(decoder.index() - start_idx)
        .ok_or_else(|| CodecError::from("invalid rdata length in WKS"))?;
    let bitmap = decoder.read_slice(bitmap_len)?;

    let mut ports = Vec::new();
    for (octet_idx, octet) in bitmap.iter().enumerate() {
        let mut bits = *octet;
        for bit_idx in 0..8_u16 {
            if bits & 0b1000_0000 == 0b1000_0000 {
                ports.push((octet_idx as u16) * 8 + bit_idx);
            }
            bits <<= 1;
        }
    }

    Ok(WKS {
        address,
        protocol,
        ports,
    })
}

/// Write the RData to the given Encoder
///
/// The emitted bitmap is exactly long enough to reach the highest open port.
pub fn emit(encoder: &mut BinEncoder<'_>, wks: &WKS) -> CodecResult<()> {
    wks.address.emit(encoder)?;
    encoder.emit_u8(wks.protocol)?;

    let Some(max_port) = wks.ports.last() else {
        return Ok(());
    };

    let mut bitmap = vec![0_u8; (*max_port as usize) / 8 + 1];
    for port in &wks.ports {
        bitmap[(*port as usize) / 8] |= 0b1000_0000 >> (port % 8);
    }
    encoder.emit_vec(&bitmap)?;

    Ok(())
}

/// In master files, both ports and protocols are expressed using mnemonics
/// or decimal numbers; this emitter uses decimal numbers:
///
/// ```text
/// HOSTA.ISI.EDU.  WKS  10.0.0.1 6 25 80
/// ```
impl fmt::Display for WKS {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{} {}", self.address, self.protocol)?;
        for port in &self.ports {
            write!(f, " {port}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test() {
        let rdata = WKS::new(Ipv4Addr::new(10, 0, 0, 1), 6, vec![25, 80]);

        let mut bytes = Vec::new();
        let mut encoder: BinEncoder<'_> = BinEncoder::new(&mut bytes);
        assert!(emit(&mut encoder, &rdata).is_ok());
        let bytes = encoder.into_bytes();

        // port 25 is octet 3, second most significant bit; port 80 is the
        // most significant bit of octet 10
        assert_eq!(
            bytes.as_slice(),
            &[
                0x0A, 0x00, 0x00, 0x01, 0x06, 0x00, 0x00, 0x00, 0x40, 0x00, 0x00, 0x00, 0x00,
                0x00, 0x00, 0x00, 0x00, 0x80,
            ]
        );

        let mut decoder: BinDecoder<'_> = BinDecoder::new(bytes);
        let read_rdata = read(&mut decoder, bytes.len() as u16).expect("Decoding error");
        assert_eq!(rdata, read_rdata);
    }

    #[test]
    fn test_no_ports() {
        let rdata = WKS::new(Ipv4Addr::new(192, 0, 2, 1), 17, vec![]);

        let mut bytes = Vec::new();
        let mut encoder: BinEncoder<'_> = BinEncoder::new(&mut bytes);
        assert!(emit(&mut encoder, &rdata).is_ok());
        let bytes = encoder.into_bytes();

        assert_eq!(bytes.len(), 5);

        let mut decoder: BinDecoder<'_> = BinDecoder::new(bytes);
        let read_rdata = read(&mut decoder, bytes.len() as u16).expect("Decoding error");
        assert_eq!(rdata, read_rdata);
    }

    #[test]
    fn test_ports_sorted_and_deduplicated() {
        let rdata = WKS::new(Ipv4Addr::new(10, 0, 0, 1), 6, vec![80, 25, 80]);
        assert_eq!(rdata.ports(), &[25, 80]);
    }

    #[test]
    fn test_truncated() {
        let bytes = [0x0A, 0x00, 0x00];
        let mut decoder: BinDecoder<'_> = BinDecoder::new(&bytes);
        assert!(read(&mut decoder, 5).is_err());
    }

    #[test]
    fn test_display() {
        let rdata = WKS::new(Ipv4Addr::new(10, 0, 0, 1), 6, vec![25, 80]);
        assert_eq!(rdata.to_string(), "10.0.0.1 6 25 80");
    }
}
