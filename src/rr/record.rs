// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! resource record implementation

use std::fmt;

#[cfg(feature = "serde-config")]
use serde::{Deserialize, Serialize};

use crate::error::*;
use crate::rr::dns_class::DNSClass;
use crate::rr::domain::Name;
use crate::rr::record_data::RData;
use crate::rr::record_type::RecordType;
use crate::serialize::binary::*;

/// Resource records are storage value in DNS, into which all key/value pair data is stored.
///
/// [RFC 1035](https://tools.ietf.org/html/rfc1035), DOMAIN NAMES - IMPLEMENTATION AND SPECIFICATION, November 1987
///
/// ```text
/// 4.1.3. Resource record format
///
/// The answer, authority, and additional sections all share the same
/// format: a variable number of resource records, where the number of
/// records is specified in the corresponding count field in the header.
/// Each resource record has the following format:
///                                     1  1  1  1  1  1
///       0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     |                                               |
///     /                                               /
///     /                      NAME                     /
///     |                                               |
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     |                      TYPE                     |
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     |                     CLASS                     |
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     |                      TTL                      |
///     |                                               |
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     |                   RDLENGTH                    |
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--|
///     /                     RDATA                     /
///     /                                               /
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// ```
#[cfg_attr(feature = "serde-config", derive(Deserialize, Serialize))]
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct Record {
    name_labels: Name,
    dns_class: DNSClass,
    ttl: u32,
    rdata: RData,
}

impl Record {
    /// Creates a new record from the rdata, with the record type derived from it
    ///
    /// # Arguments
    ///
    /// * `name` - name of the resource records
    /// * `ttl` - time-to-live is the amount of time this record should be cached before refreshing
    /// * `rdata` - record data to associate with the Record
    pub fn from_rdata(name: Name, ttl: u32, rdata: RData) -> Self {
        Self {
            name_labels: name,
            dns_class: DNSClass::IN,
            ttl,
            rdata,
        }
    }

    /// Returns the name of the record
    pub fn name(&self) -> &Name {
        &self.name_labels
    }

    /// Sets the name of the record
    pub fn set_name(&mut self, name: Name) -> &mut Self {
        self.name_labels = name;
        self
    }

    /// Returns the type of the RecordData in the record, derived from the rdata
    pub fn record_type(&self) -> RecordType {
        self.rdata.to_record_type()
    }

    /// Returns the DNSClass of the Record, generally IN for internet
    pub fn dns_class(&self) -> DNSClass {
        self.dns_class
    }

    /// Sets the DNSClass of the record
    pub fn set_dns_class(&mut self, dns_class: DNSClass) -> &mut Self {
        self.dns_class = dns_class;
        self
    }

    /// Returns the time-to-live of the record
    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    /// Sets the time-to-live of the record
    pub fn set_ttl(&mut self, ttl: u32) -> &mut Self {
        self.ttl = ttl;
        self
    }

    /// Returns the Record Data, i.e. the record specific data
    pub fn data(&self) -> &RData {
        &self.rdata
    }

    /// Consumes the record and returns the record data
    pub fn into_data(self) -> RData {
        self.rdata
    }
}

impl BinEncodable for Record {
    /// Emits the header and rdata of the record, backfilling the rdlength
    /// once the rdata codec has run.
    fn emit(&self, encoder: &mut BinEncoder<'_>) -> CodecResult<()> {
        self.name_labels.emit(encoder)?;
        self.record_type().emit(encoder)?;
        self.dns_class.emit(encoder)?;
        encoder.emit_u32(self.ttl)?;

        // placeholder for the rdata length, to be filled in below
        let place = encoder.place_u16()?;

        self.rdata.emit(encoder)?;

        let len = encoder.len_since_place(&place);
        assert!(len <= u16::MAX as usize);
        place.replace(encoder, len as u16)?;

        Ok(())
    }
}

impl<'r> BinDecodable<'r> for Record {
    /// parse a resource record line example:
    ///  WARNING: the record_bytes is 100% consumed and destroyed in this parsing process
    fn read(decoder: &mut BinDecoder<'r>) -> CodecResult<Self> {
        // NAME            an owner name, i.e., the name of the node to which this
        //                 resource record pertains.
        let name_labels: Name = Name::read(decoder)?;

        // TYPE            two octets containing one of the RR TYPE codes.
        let record_type: RecordType = RecordType::read(decoder)?;

        // CLASS           two octets containing one of the RR CLASS codes.
        let dns_class: DNSClass = DNSClass::read(decoder)?;

        // TTL             a 32 bit signed integer that specifies the time interval
        //                that the resource record may be cached before the source
        //                of the information should again be consulted.
        let ttl: u32 = decoder.read_u32()?;

        // RDLENGTH        an unsigned 16 bit integer that specifies the length in
        //                octets of the RDATA field.
        let rd_length = decoder.read_u16()?;

        // this will prevent reading beyond the end of the rdata slice, and
        //  the rdata codec is held to consuming exactly this many bytes
        let rdata = RData::read(decoder, record_type, rd_length)?;

        Ok(Self {
            name_labels,
            dns_class,
            ttl,
            rdata,
        })
    }
}

impl fmt::Display for Record {
    /// One record per line, master file style
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(
            f,
            "{name} {ttl} {class} {ty} {rdata}",
            name = self.name_labels,
            ttl = self.ttl,
            class = self.dns_class,
            ty = self.record_type(),
            rdata = self.rdata,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;
    use std::str::FromStr;

    use super::*;
    use crate::rr::rdata::CSYNC;

    #[test]
    fn test_emit_and_read() {
        let record = Record::from_rdata(
            Name::from_str("www.example.com.").unwrap(),
            5,
            RData::A(Ipv4Addr::new(192, 0, 2, 1)),
        );

        let mut bytes = Vec::new();
        let mut encoder = BinEncoder::new(&mut bytes);
        record.emit(&mut encoder).expect("encoding error");
        let bytes = encoder.into_bytes();

        let mut decoder = BinDecoder::new(bytes);
        let read = Record::read(&mut decoder).expect("decoding error");
        assert_eq!(read, record);
    }

    #[test]
    fn test_rdlength_backfilled() {
        let record = Record::from_rdata(
            Name::from_str("example.com.").unwrap(),
            0,
            RData::CSYNC(CSYNC::new(
                1,
                true,
                true,
                [RecordType::A, RecordType::NS, RecordType::AAAA],
            )),
        );

        let mut bytes = Vec::new();
        let mut encoder = BinEncoder::new(&mut bytes);
        record.emit(&mut encoder).expect("encoding error");
        let bytes = encoder.into_bytes();

        // name: 13 octets, type/class: 4, ttl: 4, rdlength: 2
        let rdlength_offset = 13 + 4 + 4;
        let rd_length =
            u16::from_be_bytes([bytes[rdlength_offset], bytes[rdlength_offset + 1]]) as usize;
        assert_eq!(rd_length, bytes.len() - rdlength_offset - 2);
    }

    #[test]
    fn test_owner_compression_across_records() {
        let record = Record::from_rdata(
            Name::from_str("www.example.com.").unwrap(),
            5,
            RData::CNAME(Name::from_str("www.example.com.").unwrap()),
        );

        let mut bytes = Vec::new();
        let mut encoder = BinEncoder::new(&mut bytes);
        record.emit(&mut encoder).expect("encoding error");
        let bytes = encoder.into_bytes();

        // the rdata name is compressed down to a pointer at the owner
        // 17 (name) + 2 + 2 + 4 + 2 (header) + 2 (pointer)
        assert_eq!(bytes.len(), 29);

        let mut decoder = BinDecoder::new(bytes);
        let read = Record::read(&mut decoder).expect("decoding error");
        assert_eq!(read, record);
    }
}
