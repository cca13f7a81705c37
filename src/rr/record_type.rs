// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! record type definitions

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

#[cfg(feature = "serde-config")]
use serde::{Deserialize, Serialize};

use crate::error::*;
use crate::serialize::binary::*;

/// The type of the resource record.
///
/// This specifies the type of data in the RData field of the Resource Record
#[cfg_attr(feature = "serde-config", derive(Deserialize, Serialize))]
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, PartialOrd, Ord)]
#[non_exhaustive]
pub enum RecordType {
    /// [RFC 1035](https://tools.ietf.org/html/rfc1035) IPv4 Address record
    A,
    /// [RFC 3596](https://tools.ietf.org/html/rfc3596) IPv6 address record
    AAAA,
    /// [RFC 1035](https://tools.ietf.org/html/rfc1035) Canonical name record
    CNAME,
    /// [RFC 7477](https://tools.ietf.org/html/rfc7477) Child-to-parent synchronization record
    CSYNC,
    /// [RFC 4034](https://tools.ietf.org/html/rfc4034) DNS Key record: RSASHA256 and RSASHA512, ECDSAP256SHA256 and ECDSAP384SHA384, ED25519
    DNSKEY,
    /// [RFC 4034](https://tools.ietf.org/html/rfc4034) Delegation signer: RSASHA256 and RSASHA512, ECDSAP256SHA256 and ECDSAP384SHA384, ED25519
    DS,
    /// [RFC 1035](https://tools.ietf.org/html/rfc1035) Host information record
    HINFO,
    /// [RFC 8005](https://tools.ietf.org/html/rfc8005) Host identity protocol
    HIP,
    /// [RFC 1035](https://tools.ietf.org/html/rfc1035) Mail exchange record
    MX,
    /// [RFC 1035](https://tools.ietf.org/html/rfc1035) Name server record
    NS,
    /// [RFC 4034](https://tools.ietf.org/html/rfc4034) Next-Secure record
    NSEC,
    /// [RFC 5155](https://tools.ietf.org/html/rfc5155) NSEC record version 3
    NSEC3,
    /// [RFC 5155](https://tools.ietf.org/html/rfc5155) NSEC3 parameters
    NSEC3PARAM,
    /// [RFC 6891](https://tools.ietf.org/html/rfc6891) Option record for EDNS
    OPT,
    /// [RFC 1035](https://tools.ietf.org/html/rfc1035) Pointer record
    PTR,
    /// [RFC 4034](https://tools.ietf.org/html/rfc4034) DNSSEC signature
    RRSIG,
    /// [RFC 1035](https://tools.ietf.org/html/rfc1035) Start of authority record
    SOA,
    /// [RFC 2782](https://tools.ietf.org/html/rfc2782) Service locator
    SRV,
    /// [RFC 1035](https://tools.ietf.org/html/rfc1035) Text record
    TXT,
    /// [RFC 1035](https://tools.ietf.org/html/rfc1035) Well known service description
    WKS,
    /// Unknown Record type, stored and parsed as the RFC 3597 `TYPE###` form
    Unknown(u16),
    /// This corresponds to a record type of 0, unspecified
    ZERO,
}

impl RecordType {
    /// Returns true if this is an ANY
    pub fn is_ip_addr(self) -> bool {
        matches!(self, Self::A | Self::AAAA)
    }
}

impl FromStr for RecordType {
    type Err = CodecError;

    /// Convert `&str` to `RecordType`
    ///
    /// ```
    /// use std::str::FromStr;
    /// use rrdata::rr::record_type::RecordType;
    ///
    /// let var: RecordType = RecordType::from_str("A").unwrap();
    /// assert_eq!(RecordType::A, var);
    ///
    /// // RFC 3597 generic form for unassigned types
    /// let var: RecordType = RecordType::from_str("TYPE300").unwrap();
    /// assert_eq!(RecordType::Unknown(300), var);
    /// ```
    fn from_str(str: &str) -> Result<Self, Self::Err> {
        match str {
            "A" => Ok(Self::A),
            "AAAA" => Ok(Self::AAAA),
            "CNAME" => Ok(Self::CNAME),
            "CSYNC" => Ok(Self::CSYNC),
            "DNSKEY" => Ok(Self::DNSKEY),
            "DS" => Ok(Self::DS),
            "HINFO" => Ok(Self::HINFO),
            "HIP" => Ok(Self::HIP),
            "MX" => Ok(Self::MX),
            "NS" => Ok(Self::NS),
            "NSEC" => Ok(Self::NSEC),
            "NSEC3" => Ok(Self::NSEC3),
            "NSEC3PARAM" => Ok(Self::NSEC3PARAM),
            "OPT" => Ok(Self::OPT),
            "PTR" => Ok(Self::PTR),
            "RRSIG" => Ok(Self::RRSIG),
            "SOA" => Ok(Self::SOA),
            "SRV" => Ok(Self::SRV),
            "TXT" => Ok(Self::TXT),
            "WKS" => Ok(Self::WKS),
            "ZERO" => Ok(Self::ZERO),
            _ if str.starts_with("TYPE") => {
                let code: u16 = str[4..]
                    .parse()
                    .map_err(|_| CodecError::from(format!("unknown record type: {str}")))?;
                Ok(Self::from(code))
            }
            _ => Err(CodecError::from(format!("unknown record type: {str}"))),
        }
    }
}

impl From<u16> for RecordType {
    /// Convert from `u16` to `RecordType`
    ///
    /// ```
    /// use rrdata::rr::record_type::RecordType;
    ///
    /// let var = RecordType::from(1);
    /// assert_eq!(RecordType::A, var);
    /// ```
    fn from(value: u16) -> Self {
        match value {
            0 => Self::ZERO,
            1 => Self::A,
            2 => Self::NS,
            5 => Self::CNAME,
            6 => Self::SOA,
            11 => Self::WKS,
            12 => Self::PTR,
            13 => Self::HINFO,
            15 => Self::MX,
            16 => Self::TXT,
            28 => Self::AAAA,
            33 => Self::SRV,
            41 => Self::OPT,
            43 => Self::DS,
            46 => Self::RRSIG,
            47 => Self::NSEC,
            48 => Self::DNSKEY,
            50 => Self::NSEC3,
            51 => Self::NSEC3PARAM,
            55 => Self::HIP,
            62 => Self::CSYNC,
            _ => Self::Unknown(value),
        }
    }
}

impl From<RecordType> for u16 {
    /// Convert from `RecordType` to `u16`
    ///
    /// ```
    /// use rrdata::rr::record_type::RecordType;
    ///
    /// let var: u16 = RecordType::A.into();
    /// assert_eq!(1, var);
    /// ```
    fn from(rt: RecordType) -> Self {
        match rt {
            RecordType::ZERO => 0,
            RecordType::A => 1,
            RecordType::NS => 2,
            RecordType::CNAME => 5,
            RecordType::SOA => 6,
            RecordType::WKS => 11,
            RecordType::PTR => 12,
            RecordType::HINFO => 13,
            RecordType::MX => 15,
            RecordType::TXT => 16,
            RecordType::AAAA => 28,
            RecordType::SRV => 33,
            RecordType::OPT => 41,
            RecordType::DS => 43,
            RecordType::RRSIG => 46,
            RecordType::NSEC => 47,
            RecordType::DNSKEY => 48,
            RecordType::NSEC3 => 50,
            RecordType::NSEC3PARAM => 51,
            RecordType::HIP => 55,
            RecordType::CSYNC => 62,
            RecordType::Unknown(code) => code,
        }
    }
}

impl BinEncodable for RecordType {
    fn emit(&self, encoder: &mut BinEncoder<'_>) -> CodecResult<()> {
        encoder.emit_u16((*self).into())
    }
}

impl<'r> BinDecodable<'r> for RecordType {
    fn read(decoder: &mut BinDecoder<'r>) -> CodecResult<Self> {
        decoder.read_u16().map(Self::from)
    }
}

impl Display for RecordType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match *self {
            Self::A => f.write_str("A"),
            Self::AAAA => f.write_str("AAAA"),
            Self::CNAME => f.write_str("CNAME"),
            Self::CSYNC => f.write_str("CSYNC"),
            Self::DNSKEY => f.write_str("DNSKEY"),
            Self::DS => f.write_str("DS"),
            Self::HINFO => f.write_str("HINFO"),
            Self::HIP => f.write_str("HIP"),
            Self::MX => f.write_str("MX"),
            Self::NS => f.write_str("NS"),
            Self::NSEC => f.write_str("NSEC"),
            Self::NSEC3 => f.write_str("NSEC3"),
            Self::NSEC3PARAM => f.write_str("NSEC3PARAM"),
            Self::OPT => f.write_str("OPT"),
            Self::PTR => f.write_str("PTR"),
            Self::RRSIG => f.write_str("RRSIG"),
            Self::SOA => f.write_str("SOA"),
            Self::SRV => f.write_str("SRV"),
            Self::TXT => f.write_str("TXT"),
            Self::WKS => f.write_str("WKS"),
            Self::Unknown(code) => write!(f, "TYPE{code}"),
            Self::ZERO => f.write_str("ZERO"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u16_round_trip() {
        for rt in [
            RecordType::A,
            RecordType::AAAA,
            RecordType::CNAME,
            RecordType::CSYNC,
            RecordType::DNSKEY,
            RecordType::DS,
            RecordType::HINFO,
            RecordType::HIP,
            RecordType::NS,
            RecordType::OPT,
            RecordType::WKS,
            RecordType::Unknown(300),
        ] {
            assert_eq!(rt, RecordType::from(u16::from(rt)));
        }
    }

    #[test]
    fn test_type_generic_form() {
        assert_eq!(
            RecordType::from_str("TYPE300").unwrap(),
            RecordType::Unknown(300)
        );
        // assigned codes normalize back to the mnemonic
        assert_eq!(RecordType::from_str("TYPE1").unwrap(), RecordType::A);
        assert_eq!(RecordType::Unknown(300).to_string(), "TYPE300");
        assert!(RecordType::from_str("TYPEabc").is_err());
        assert!(RecordType::from_str("NOPE").is_err());
    }
}
