// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! CSYNC record for synchronizing data from a child zone to the parent

use std::fmt;

#[cfg(feature = "serde-config")]
use serde::{Deserialize, Serialize};

use crate::error::*;
use crate::rr::type_bit_map::RecordTypeSet;
use crate::rr::RecordType;
use crate::serialize::binary::*;

/// [RFC 7477, Child-to-Parent Synchronization in DNS, March 2015][rfc7477]
///
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
///
/// [rfc7477]: https://tools.ietf.org/html/rfc7477
#[cfg_attr(feature = "serde-config", derive(Deserialize, Serialize))]
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct CSYNC {
    soa_serial: u32,
    immediate: bool,
    soa_minimum: bool,
    type_bit_maps: RecordTypeSet,
}

impl CSYNC {
    /// Creates a new CSYNC record data.
    ///
    /// # Arguments
    ///
    /// * `soa_serial` - A serial number for the zone
    /// * `immediate` - A flag signalling if the change should happen immediately
    /// * `soa_minimum` - A flag to used to signal if the soa_serial should be validated
    /// * `type_bit_maps` - the types to synchronize; sorted and deduplicated on construction
    pub fn new(
        soa_serial: u32,
        immediate: bool,
        soa_minimum: bool,
        type_bit_maps: impl IntoIterator<Item = RecordType>,
    ) -> Self {
        Self {
            soa_serial,
            immediate,
            soa_minimum,
            type_bit_maps: RecordTypeSet::new(type_bit_maps),
        }
    }

    /// The serial this record was published at
    pub fn soa_serial(&self) -> u32 {
        self.soa_serial
    }

    /// [RFC 7477](https://tools.ietf.org/html/rfc7477#section-2.1.1.2.1), Child-to-Parent Synchronization in DNS, March 2015
    ///
    /// ```text
    /// 2.1.1.2.1.  The Type Bit Map Field
    ///
    ///    The Type Bit Map field indicates the record types to be processed by
    ///    the parental agent, according to the procedures in Section 3.  The
    ///    Type Bit Map field is encoded in the same way as the Type Bit Map
    ///    field of the NSEC record, described in [RFC4034], Section 4.1.2.
    /// ```
    pub fn type_bit_maps(&self) -> &RecordTypeSet {
        &self.type_bit_maps
    }

    /// [RFC 7477](https://tools.ietf.org/html/rfc7477#section-2.1.1.2), Child-to-Parent Synchronization in DNS, March 2015
    ///
    /// ```text
    /// 2.1.1.2.  The Flags Field
    ///
    ///    The Flags field contains 16 bits of boolean flags that define
    ///    operations that affect the processing of the CSYNC record.  The flags
    ///    defined in this document are as follows:
    ///
    ///       0x00 0x01: "immediate"
    ///
    ///       0x00 0x02: "soaminimum"
    ///
    ///    The remaining flags are reserved for use by future specifications.
    ///    Undefined flags MUST be set to 0 by CSYNC publishers.  Parental
    ///    agents MUST NOT process a CSYNC record if it contains a 1 value for a
    ///    flag that is unknown to or unsupported by the parental agent.
    /// ```
    pub fn flags(&self) -> u16 {
        let mut flags: u16 = 0;
        if self.immediate {
            flags |= 0b0000_0001
        };
        if self.soa_minimum {
            flags |= 0b0000_0010
        };
        flags
    }
}

/// Read the RData from the given Decoder
pub fn read(decoder: &mut BinDecoder<'_>, rdata_length: u16) -> CodecResult<CSYNC> {
    let start_idx = decoder.index();

    let soa_serial = decoder.read_u32()?;

    let flags = decoder.read_u16()?;
    if flags & !0b0000_0011 != 0 {
        return Err(CodecErrorKind::UnrecognizedCsyncFlags(flags).into());
    }

    let immediate: bool = flags & 0b0000_0001 == 0b0000_0001;
    let soa_minimum: bool = flags & 0b0000_0010 == 0b0000_0010;

    let bit_map_len = (rdata_length as usize)
        .checked_sub(decoder.index() - start_idx)
        .ok_or_else(|| CodecError::from("invalid rdata length in CSYNC"))?;
    let type_bit_maps = RecordTypeSet::read_data(decoder, bit_map_len)?;

    Ok(CSYNC {
        soa_serial,
        immediate,
        soa_minimum,
        type_bit_maps,
    })
}

/// Write the RData to the given Encoder
pub fn emit(encoder: &mut BinEncoder<'_>, csync: &CSYNC) -> CodecResult<()> {
    encoder.emit_u32(csync.soa_serial)?;
    encoder.emit_u16(csync.flags())?;
    csync.type_bit_maps.emit(encoder)?;

    Ok(())
}

impl fmt::Display for CSYNC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(
            f,
            "{soa_serial} {flags}",
            soa_serial = &self.soa_serial,
            flags = &self.flags(),
        )?;

        for ty in self.type_bit_maps.iter() {
            write!(f, " {ty}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test() {
        let types = vec![RecordType::A, RecordType::NS, RecordType::AAAA];

        let rdata = CSYNC::new(123, true, true, types);

        let mut bytes = Vec::new();
        let mut encoder: BinEncoder<'_> = BinEncoder::new(&mut bytes);
        assert!(emit(&mut encoder, &rdata).is_ok());
        let bytes = encoder.into_bytes();

        let mut decoder: BinDecoder<'_> = BinDecoder::new(bytes);
        let read_rdata = read(&mut decoder, bytes.len() as u16).expect("Decoding error");
        assert_eq!(rdata, read_rdata);
    }

    #[test]
    fn test_wire_bytes() {
        let rdata = CSYNC::new(
            1,
            true,
            true,
            [RecordType::A, RecordType::NS, RecordType::AAAA],
        );

        let mut bytes = Vec::new();
        let mut encoder: BinEncoder<'_> = BinEncoder::new(&mut bytes);
        emit(&mut encoder, &rdata).expect("Encoding error");
        let bytes = encoder.into_bytes();

        assert_eq!(
            bytes.as_slice(),
            &[
                0x00, 0x00, 0x00, 0x01, 0x00, 0x03, 0x00, 0x04, 0x60, 0x00, 0x00, 0x08,
            ]
        );
    }

    #[test]
    fn test_reserved_flags_rejected() {
        let bytes = [0x00, 0x00, 0x00, 0x01, 0x00, 0x04, 0x00, 0x01, 0x40];
        let mut decoder: BinDecoder<'_> = BinDecoder::new(&bytes);
        let err = read(&mut decoder, bytes.len() as u16).unwrap_err();
        match err.kind() {
            CodecErrorKind::UnrecognizedCsyncFlags(0b100) => (),
            kind => panic!("unexpected error: {kind:?}"),
        }
    }

    #[test]
    fn test_display() {
        let rdata = CSYNC::new(
            1,
            true,
            true,
            [RecordType::A, RecordType::NS, RecordType::AAAA],
        );
        assert_eq!(rdata.to_string(), "1 3 A NS AAAA");
    }
}
