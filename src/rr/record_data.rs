// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! record data enum variants

use std::cmp::Ordering;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use enum_as_inner::EnumAsInner;
#[cfg(feature = "serde-config")]
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::dnssec::rdata::{DNSKEY, DS};
use super::domain::Name;
use super::rdata;
use super::rdata::{CSYNC, HINFO, OPT, WKS};
use super::record_type::RecordType;
use crate::error::*;
use crate::serialize::binary::*;

/// Record data enum variants
///
/// [RFC 1035](https://tools.ietf.org/html/rfc1035), DOMAIN NAMES - IMPLEMENTATION AND SPECIFICATION, November 1987
///
/// ```text
/// 3.3. Standard RRs
///
/// The following RR definitions are expected to occur, at least
/// potentially, in all classes.  In particular, NS, SOA, CNAME, and PTR
/// will be used in all classes, and have the same format in all classes.
/// Because their RDATA format is known, all domain names in the RDATA
/// section of these RRs may be compressed.
/// ```
#[cfg_attr(feature = "serde-config", derive(Deserialize, Serialize))]
#[derive(Debug, EnumAsInner, PartialEq, Clone, Eq, Hash)]
#[non_exhaustive]
pub enum RData {
    /// ```text
    /// 3.4.1. A RDATA format
    ///
    ///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    ///     |                    ADDRESS                    |
    ///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    ///
    /// where:
    ///
    /// ADDRESS         A 32 bit Internet address.
    /// ```
    A(Ipv4Addr),

    /// ```text
    /// -- RFC 1886 -- IPv6 DNS Extensions              December 1995
    ///
    /// 2.2 AAAA data format
    ///
    ///    A 128 bit IPv6 address is encoded in the data portion of an AAAA
    ///    resource record in network byte order (high-order byte first).
    /// ```
    AAAA(Ipv6Addr),

    /// ```text
    /// 3.3.1. CNAME RDATA format
    ///
    ///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    ///     /                     CNAME                     /
    ///     /                                               /
    ///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    ///
    /// where:
    ///
    /// CNAME           A <domain-name> which specifies the canonical or primary
    ///                 name for the owner.  The owner name is an alias.
    /// ```
    CNAME(Name),

    /// ```text
    /// 2.1.1.  The CSYNC Resource Record Wire Format
    ///
    /// The CSYNC RDATA consists of the following fields:
    ///
    ///                       1 1 1 1 1 1 1 1 1 1 2 2 2 2 2 2 2 2 2 2 3 3
    ///   0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
    ///  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
    ///  |                          SOA Serial                           |
    ///  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
    ///  |       Flags                   |            Type Bit Map       /
    ///  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
    ///  /                     Type Bit Map (continued)                  /
    ///  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
    /// ```
    CSYNC(CSYNC),

    /// ```text
    /// 2.1.  DNSKEY RDATA Wire Format
    ///
    ///    The RDATA for a DNSKEY RR consists of a 2 octet Flags Field, a 1
    ///    octet Protocol Field, a 1 octet Algorithm Field, and the Public Key
    ///    Field.
    /// ```
    DNSKEY(DNSKEY),

    /// ```text
    /// 5.1.  DS RDATA Wire Format
    ///
    ///    The RDATA for a DS RR consists of a 2 octet Key Tag field, a 1 octet
    ///    Algorithm field, a 1 octet Digest Type field, and a Digest field.
    /// ```
    DS(DS),

    /// ```text
    /// 3.3.2. HINFO RDATA format
    ///
    ///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    ///     /                      CPU                      /
    ///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    ///     /                       OS                      /
    ///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    /// ```
    HINFO(HINFO),

    /// ```text
    /// 3.3.11. NS RDATA format
    ///
    ///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    ///     /                   NSDNAME                     /
    ///     /                                               /
    ///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    ///
    /// where:
    ///
    /// NSDNAME         A <domain-name> which specifies a host which should be
    ///                 authoritative for the specified class and domain.
    /// ```
    NS(Name),

    /// ```text
    /// RFC 6891                   EDNS(0) Extensions                 April 2013
    /// 6.1.2.  Wire Format
    ///
    /// The variable part of an OPT RR may contain zero or more options in
    ///    the RDATA.  Each option MUST be treated as a bit field.
    /// ```
    OPT(OPT),

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
    /// ```
    WKS(WKS),

    /// Record data for record types not otherwise supported, carried opaque
    /// per [RFC 3597](https://tools.ietf.org/html/rfc3597)
    Unknown {
        /// RecordType code
        code: u16,
        /// The opaque rdata bytes
        rdata: Vec<u8>,
    },

    /// This corresponds to a record type of 0, unspecified
    ZERO,
}

impl RData {
    fn to_bytes(&self) -> Vec<u8> {
        let mut buf: Vec<u8> = Vec::new();
        {
            let mut encoder = BinEncoder::new(&mut buf);
            self.emit(&mut encoder).unwrap_or_else(|_| {
                warn!("could not encode RDATA: {:?}", self);
            });
        }
        buf
    }

    /// Read the RData from the given Decoder
    ///
    /// The codec for the type must consume exactly `rdata_length` bytes,
    /// otherwise the read fails with `IncorrectRDataLengthRead`.
    pub fn read(
        decoder: &mut BinDecoder<'_>,
        record_type: RecordType,
        rdata_length: u16,
    ) -> CodecResult<Self> {
        let start_idx = decoder.index();

        let result = match record_type {
            RecordType::A => {
                debug!("reading A");
                rdata::a::read(decoder).map(Self::A)
            }
            RecordType::AAAA => {
                debug!("reading AAAA");
                rdata::aaaa::read(decoder).map(Self::AAAA)
            }
            RecordType::CNAME => {
                debug!("reading CNAME");
                rdata::name::read(decoder).map(Self::CNAME)
            }
            RecordType::CSYNC => {
                debug!("reading CSYNC");
                rdata::csync::read(decoder, rdata_length).map(Self::CSYNC)
            }
            RecordType::DNSKEY => {
                debug!("reading DNSKEY");
                super::dnssec::rdata::dnskey::read(decoder, rdata_length).map(Self::DNSKEY)
            }
            RecordType::DS => {
                debug!("reading DS");
                super::dnssec::rdata::ds::read(decoder, rdata_length).map(Self::DS)
            }
            RecordType::HINFO => {
                debug!("reading HINFO");
                rdata::hinfo::read(decoder).map(Self::HINFO)
            }
            RecordType::NS => {
                debug!("reading NS");
                rdata::name::read(decoder).map(Self::NS)
            }
            RecordType::OPT => {
                debug!("reading OPT");
                rdata::opt::read(decoder, rdata_length).map(Self::OPT)
            }
            RecordType::WKS => {
                debug!("reading WKS");
                rdata::wks::read(decoder, rdata_length).map(Self::WKS)
            }
            RecordType::ZERO => {
                debug!("reading EMPTY");
                return Ok(Self::ZERO);
            }
            record_type => {
                debug!("reading Unknown record: {}", record_type);
                decoder
                    .read_vec(rdata_length as usize)
                    .map(|rdata| Self::Unknown {
                        code: record_type.into(),
                        rdata,
                    })
            }
        };

        // we should have read rdata_length, but we did not
        let read = decoder.index() - start_idx;
        if read != rdata_length as usize {
            return Err(CodecErrorKind::IncorrectRDataLengthRead {
                read,
                len: rdata_length as usize,
            }
            .into());
        }

        result
    }

    /// Write the RData to the given Encoder
    ///
    /// [RFC 4034](https://tools.ietf.org/html/rfc4034#section-6.2), DNSSEC Resource Records, March 2005
    ///
    /// ```text
    /// 6.2.  Canonical RR Form
    ///
    ///    For the purposes of DNS security, the canonical form of an RR is the
    ///    wire format of the RR where:
    ///
    ///    ...
    ///
    ///    3.  if the type of the RR is NS, MD, MF, CNAME, SOA, MB, MG, MR, PTR,
    ///        HINFO, MINFO, MX, HINFO, RP, AFSDB, RT, SIG, PX, NXT, NAPTR, KX,
    ///        SRV, DNAME, A6, RRSIG, or (rfc6840 removes NSEC), all uppercase
    ///        US-ASCII letters in the DNS names contained within the RDATA are replaced
    ///        by the corresponding lowercase US-ASCII letters;
    /// ```
    ///
    /// Per [RFC 3597](https://tools.ietf.org/html/rfc3597#section-4), names
    /// in the RDATA of record types defined after RFC 1035 are never
    /// compressed on the wire.
    pub fn emit(&self, encoder: &mut BinEncoder<'_>) -> CodecResult<()> {
        match self {
            Self::A(address) => rdata::a::emit(encoder, *address),
            Self::AAAA(address) => rdata::aaaa::emit(encoder, address),
            // to_lowercase for rfc4034 and rfc6840
            Self::CNAME(name) | Self::NS(name) => rdata::name::emit(encoder, name),
            Self::CSYNC(csync) => {
                encoder.with_canonical_names(|encoder| rdata::csync::emit(encoder, csync))
            }
            Self::DNSKEY(dnskey) => encoder
                .with_canonical_names(|encoder| super::dnssec::rdata::dnskey::emit(encoder, dnskey)),
            Self::DS(ds) => {
                encoder.with_canonical_names(|encoder| super::dnssec::rdata::ds::emit(encoder, ds))
            }
            Self::HINFO(hinfo) => rdata::hinfo::emit(encoder, hinfo),
            Self::OPT(opt) => rdata::opt::emit(encoder, opt),
            Self::WKS(wks) => {
                encoder.with_canonical_names(|encoder| rdata::wks::emit(encoder, wks))
            }
            Self::Unknown { rdata, .. } => encoder.emit_vec(rdata),
            Self::ZERO => Ok(()),
        }
    }

    /// Converts this to a RecordType
    pub fn to_record_type(&self) -> RecordType {
        match self {
            Self::A(..) => RecordType::A,
            Self::AAAA(..) => RecordType::AAAA,
            Self::CNAME(..) => RecordType::CNAME,
            Self::CSYNC(..) => RecordType::CSYNC,
            Self::DNSKEY(..) => RecordType::DNSKEY,
            Self::DS(..) => RecordType::DS,
            Self::HINFO(..) => RecordType::HINFO,
            Self::NS(..) => RecordType::NS,
            Self::OPT(..) => RecordType::OPT,
            Self::WKS(..) => RecordType::WKS,
            Self::Unknown { code, .. } => RecordType::Unknown(*code),
            Self::ZERO => RecordType::ZERO,
        }
    }

    /// An upper bound on the encoded length of the rdata, sufficient for
    /// sizing an emit buffer. The bound need not be tight.
    pub fn max_rdata_len(&self) -> usize {
        match self {
            Self::A(..) => 4,
            Self::AAAA(..) => 16,
            // uncompressed name: a length octet per label plus the root octet
            Self::CNAME(name) | Self::NS(name) => name.len() + 1,
            Self::CSYNC(csync) => 4 + 2 + csync.type_bit_maps().max_encoded_len(),
            Self::DNSKEY(dnskey) => 4 + dnskey.public_key().len(),
            Self::DS(ds) => 4 + ds.digest().len(),
            Self::HINFO(hinfo) => 1 + hinfo.cpu().len() + 1 + hinfo.os().len(),
            Self::OPT(opt) => opt
                .as_ref()
                .values()
                .map(|option| 4 + option.len() as usize)
                .sum(),
            Self::WKS(wks) => {
                4 + 1 + wks.ports().last().map_or(0, |port| *port as usize / 8 + 1)
            }
            Self::Unknown { rdata, .. } => rdata.len(),
            Self::ZERO => 0,
        }
    }
}

impl fmt::Display for RData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Self::A(address) => write!(f, "{address}"),
            Self::AAAA(address) => write!(f, "{address}"),
            Self::CNAME(name) | Self::NS(name) => write!(f, "{name}"),
            Self::CSYNC(csync) => write!(f, "{csync}"),
            Self::DNSKEY(dnskey) => write!(f, "{dnskey}"),
            Self::DS(ds) => write!(f, "{ds}"),
            Self::HINFO(hinfo) => write!(f, "{hinfo}"),
            Self::OPT(opt) => write!(f, "{opt}"),
            Self::WKS(wks) => write!(f, "{wks}"),
            // RFC 3597 unknown rdata presentation
            Self::Unknown { rdata, .. } => write!(
                f,
                "\\# {} {}",
                rdata.len(),
                data_encoding::HEXUPPER_PERMISSIVE.encode(rdata)
            ),
            Self::ZERO => Ok(()),
        }
    }
}

impl PartialOrd<Self> for RData {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RData {
    // RFC 4034                DNSSEC Resource Records               March 2005
    //
    // 6.3.  Canonical RR Ordering within an RRset
    //
    //    For the purposes of DNS security, RRs with the same owner name,
    //    class, and type are sorted by treating the RDATA portion of the
    //    canonical form of each RR as a left-justified unsigned octet sequence
    //    in which the absence of an octet sorts before a zero octet.
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_bytes().cmp(&other.to_bytes())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::rr::rdata::EdnsOption;

    fn round_trip(rdata: &RData) -> RData {
        let mut bytes = Vec::new();
        let mut encoder = BinEncoder::new(&mut bytes);
        rdata.emit(&mut encoder).expect("encoding error");
        let bytes = encoder.into_bytes();

        assert!(bytes.len() <= rdata.max_rdata_len());

        let mut decoder = BinDecoder::new(bytes);
        RData::read(&mut decoder, rdata.to_record_type(), bytes.len() as u16)
            .expect("decoding error")
    }

    #[test]
    fn test_round_trips() {
        let mut opt = OPT::default();
        opt.insert(EdnsOption::N3U(vec![1, 2]));

        for rdata in [
            RData::A(Ipv4Addr::new(10, 0, 0, 1)),
            RData::AAAA(Ipv6Addr::from_str("2001:db8::1").unwrap()),
            RData::CNAME(Name::from_str("alias.example.net.").unwrap()),
            RData::CSYNC(CSYNC::new(1, true, true, [RecordType::A, RecordType::NS])),
            RData::DNSKEY(DNSKEY::new(
                true,
                true,
                false,
                crate::rr::dnssec::Algorithm::ED25519,
                vec![0xAB_u8; 32],
            )),
            RData::DS(DS::new(
                0xF00F,
                crate::rr::dnssec::Algorithm::ED25519,
                crate::rr::dnssec::DigestType::SHA256,
                vec![5, 6, 7, 8],
            )),
            RData::HINFO(HINFO::new("cpu".to_string(), "os".to_string())),
            RData::NS(Name::from_str("ns1.example.com.").unwrap()),
            RData::OPT(opt),
            RData::WKS(WKS::new(Ipv4Addr::new(10, 0, 0, 1), 6, vec![25, 80])),
            RData::Unknown {
                code: 300,
                rdata: vec![0xDE, 0xAD, 0xBE, 0xEF],
            },
        ] {
            assert_eq!(round_trip(&rdata), rdata);
        }
    }

    #[test]
    fn test_cname_canonical_bytes() {
        let rdata = RData::CNAME(Name::from_str("alias.example.net.").unwrap());

        let mut bytes = Vec::new();
        let mut encoder = BinEncoder::new(&mut bytes);
        encoder.set_canonical_names(true);
        rdata.emit(&mut encoder).expect("encoding error");

        assert_eq!(
            encoder.into_bytes().as_slice(),
            &[
                0x05, 0x61, 0x6c, 0x69, 0x61, 0x73, 0x07, 0x65, 0x78, 0x61, 0x6d, 0x70, 0x6c,
                0x65, 0x03, 0x6e, 0x65, 0x74, 0x00,
            ]
        );
    }

    #[test]
    fn test_short_rdata_read_fails() {
        // an A record body truncated mid-address
        let bytes = [0x0A, 0x00];
        let mut decoder = BinDecoder::new(&bytes);
        assert!(RData::read(&mut decoder, RecordType::A, 2).is_err());
    }

    #[test]
    fn test_trailing_rdata_read_fails() {
        // a CNAME followed by bytes the codec does not consume
        let mut bytes = Vec::new();
        let mut encoder = BinEncoder::new(&mut bytes);
        Name::from_str("a.example.com.")
            .unwrap()
            .emit(&mut encoder)
            .unwrap();
        encoder.emit_vec(&[0xFF, 0xFF]).unwrap();
        let bytes = encoder.into_bytes();

        let mut decoder = BinDecoder::new(bytes);
        let err = RData::read(&mut decoder, RecordType::CNAME, bytes.len() as u16).unwrap_err();
        match err.kind() {
            CodecErrorKind::IncorrectRDataLengthRead { .. } => (),
            kind => panic!("unexpected error: {kind:?}"),
        }
    }

    #[test]
    fn test_canonical_ordering() {
        let mut rdatas = vec![
            RData::A(Ipv4Addr::new(10, 0, 0, 2)),
            RData::A(Ipv4Addr::new(10, 0, 0, 1)),
        ];
        rdatas.sort();
        assert_eq!(rdatas[0], RData::A(Ipv4Addr::new(10, 0, 0, 1)));
    }
}
