// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! type bit map helper definitions

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

#[cfg(feature = "serde-config")]
use serde::{Deserialize, Serialize};

use crate::error::*;
use crate::rr::RecordType;
use crate::serialize::binary::*;

/// A sorted, deduplicated collection of record types.
///
/// This represents the windowed "type bit maps" field shared by the
/// NSEC, NSEC3 and CSYNC records, [RFC 4034, section
/// 4.1.2](https://tools.ietf.org/html/rfc4034#section-4.1.2):
///
/// ```text
///  The RR type space is split into 256 window blocks, each representing
///  the low-order 8 bits of the 16-bit RR type space.  Each block that
///  has at least one active RR type is encoded using a single octet
///  window number (from 0 to 255), a single octet bitmap length (from 1
///  to 32) indicating the number of octets used for the bitmap of the
///  window block, and up to 32 octets (256 bits) of bitmap.
///
///  Blocks are present in the NSEC RR RDATA in increasing numerical
///  order.
///
///  Blocks with no types present MUST NOT be included.  Trailing zero
///  octets in the bitmap MUST be omitted.
/// ```
#[cfg_attr(feature = "serde-config", derive(Deserialize, Serialize))]
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RecordTypeSet {
    types: BTreeSet<RecordType>,
}

impl RecordTypeSet {
    /// Construct a new set of record types.
    pub fn new(types: impl IntoIterator<Item = RecordType>) -> Self {
        Self {
            types: types.into_iter().collect(),
        }
    }

    /// Returns an iterator over the types, in ascending type code order.
    pub fn iter(&self) -> impl Iterator<Item = RecordType> + '_ {
        self.types.iter().copied()
    }

    /// Returns true if the type is present in the set.
    pub fn contains(&self, record_type: RecordType) -> bool {
        self.types.contains(&record_type)
    }

    /// Returns the number of types in the set.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if no types are present.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// An upper bound on the encoded length of this set.
    ///
    /// Two octets of window header plus the bitmap octets needed to reach
    /// the highest populated bit, summed over the populated windows. Exact
    /// for this codec, which always trims trailing zero octets.
    pub fn max_encoded_len(&self) -> usize {
        let mut max_low_by_window: BTreeMap<u8, u8> = BTreeMap::new();
        for rr_type in self.types.iter() {
            let code = u16::from(*rr_type);
            let window = (code >> 8) as u8;
            let low = (code & 0x00FF) as u8;
            let entry = max_low_by_window.entry(window).or_insert(0);
            *entry = (*entry).max(low);
        }

        max_low_by_window
            .values()
            .map(|low| 2 + (*low as usize / 8) + 1)
            .sum()
    }

    /// Decode a type bit map field occupying exactly `bit_map_len` bytes.
    ///
    /// Windows must appear in ascending order, never repeat, and carry a
    /// bitmap length of 1 to 32 octets.
    pub fn read_data(decoder: &mut BinDecoder<'_>, bit_map_len: usize) -> CodecResult<Self> {
        let start_idx = decoder.index();
        let mut types = BTreeSet::new();
        let mut prev_window: Option<u8> = None;

        while decoder.index() - start_idx < bit_map_len {
            let window = decoder.read_u8()?;
            if let Some(prev) = prev_window {
                if window <= prev {
                    return Err(CodecErrorKind::BitMapWindowOutOfOrder(window).into());
                }
            }
            prev_window = Some(window);

            let len = decoder.read_u8()?;
            if len == 0 || len > 32 {
                return Err(CodecErrorKind::BitMapWindowLengthInvalid(len).into());
            }

            let bitmap = decoder.read_slice(len as usize)?;
            for (octet_idx, octet) in bitmap.iter().enumerate() {
                let mut bits = *octet;
                for bit_idx in 0..8_u8 {
                    // most significant bit first, bit 0 of octet 0 is type 0
                    if bits & 0b1000_0000 == 0b1000_0000 {
                        let low = (octet_idx as u8) * 8 + bit_idx;
                        let code = (u16::from(window) << 8) | u16::from(low);
                        types.insert(RecordType::from(code));
                    }
                    bits <<= 1;
                }
            }
        }

        if decoder.index() - start_idx != bit_map_len {
            return Err(CodecErrorKind::IncorrectRDataLengthRead {
                read: decoder.index() - start_idx,
                len: bit_map_len,
            }
            .into());
        }

        Ok(Self { types })
    }
}

impl BinEncodable for RecordTypeSet {
    fn emit(&self, encoder: &mut BinEncoder<'_>) -> CodecResult<()> {
        let mut windows: BTreeMap<u8, Vec<u8>> = BTreeMap::new();

        // collect the bitmaps
        for rr_type in self.types.iter() {
            let code = u16::from(*rr_type);
            let window = (code >> 8) as u8;
            let low = (code & 0x00FF) as u8;

            let bit_map = windows.entry(window).or_default();
            let index = low / 8;
            let bit = 0b1000_0000 >> (low % 8);

            if bit_map.len() < (index as usize + 1) {
                bit_map.resize(index as usize + 1, 0_u8);
            }

            bit_map[index as usize] |= bit;
        }

        // output the bitmaps, ascending window order from the BTreeMap
        for (window, bitmap) in windows {
            encoder.emit(window)?;
            // a window bitmap never exceeds 32 octets by construction
            encoder.emit(bitmap.len() as u8)?;
            for bits in bitmap {
                encoder.emit(bits)?;
            }
        }

        Ok(())
    }
}

impl fmt::Debug for RecordTypeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordTypeSet")
            .field("types", &self.types)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(set: &RecordTypeSet) -> Vec<u8> {
        let mut bytes = Vec::new();
        let mut encoder = BinEncoder::new(&mut bytes);
        set.emit(&mut encoder).expect("encoding error");
        encoder.into_bytes().clone()
    }

    fn decode(bytes: &[u8]) -> CodecResult<RecordTypeSet> {
        let mut decoder = BinDecoder::new(bytes);
        RecordTypeSet::read_data(&mut decoder, bytes.len())
    }

    #[test]
    fn test_round_trip_single_window() {
        let set = RecordTypeSet::new([RecordType::A, RecordType::NS, RecordType::AAAA]);

        let bytes = encode(&set);
        // window 0, 4 octets: A(1) NS(2) => 0x60, AAAA(28) => octet 3 bit 4 => 0x08
        assert_eq!(bytes, vec![0x00, 0x04, 0x60, 0x00, 0x00, 0x08]);

        assert_eq!(decode(&bytes).expect("decoding error"), set);
    }

    #[test]
    fn test_round_trip_multiple_windows() {
        let set = RecordTypeSet::new([
            RecordType::A,
            RecordType::HIP,
            RecordType::Unknown(300),
        ]);

        let bytes = encode(&set);
        let reread = decode(&bytes).expect("decoding error");
        assert_eq!(reread, set);

        // types 1 and 55 live in window 0, type 300 in window 1
        assert_eq!(bytes[0], 0);
        let window_zero_len = bytes[1] as usize;
        assert_eq!(bytes[2 + window_zero_len], 1);
    }

    #[test]
    fn test_dedup_on_construction() {
        let set = RecordTypeSet::new([RecordType::A, RecordType::A, RecordType::NS]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_max_encoded_len() {
        let set = RecordTypeSet::new([
            RecordType::A,
            RecordType::HIP,
            RecordType::Unknown(300),
        ]);

        let bytes = encode(&set);
        assert!(bytes.len() <= set.max_encoded_len());

        // trailing zeros trimmed makes the bound exact here
        assert_eq!(bytes.len(), set.max_encoded_len());
    }

    #[test]
    fn test_zero_length_window_rejected() {
        let bytes = [0x00, 0x00];
        let err = decode(&bytes).unwrap_err();
        match err.kind() {
            CodecErrorKind::BitMapWindowLengthInvalid(0) => (),
            kind => panic!("unexpected error: {kind:?}"),
        }
    }

    #[test]
    fn test_window_length_over_32_rejected() {
        let mut bytes = vec![0x00, 33];
        bytes.extend(std::iter::repeat(0xFF).take(33));
        let err = decode(&bytes).unwrap_err();
        match err.kind() {
            CodecErrorKind::BitMapWindowLengthInvalid(33) => (),
            kind => panic!("unexpected error: {kind:?}"),
        }
    }

    #[test]
    fn test_out_of_order_window_rejected() {
        let bytes = [0x01, 0x01, 0x40, 0x00, 0x01, 0x40];
        let err = decode(&bytes).unwrap_err();
        match err.kind() {
            CodecErrorKind::BitMapWindowOutOfOrder(0) => (),
            kind => panic!("unexpected error: {kind:?}"),
        }
    }

    #[test]
    fn test_repeated_window_rejected() {
        let bytes = [0x00, 0x01, 0x40, 0x00, 0x01, 0x40];
        let err = decode(&bytes).unwrap_err();
        match err.kind() {
            CodecErrorKind::BitMapWindowOutOfOrder(0) => (),
            kind => panic!("unexpected error: {kind:?}"),
        }
    }

    #[test]
    fn test_truncated_bitmap() {
        let bytes = [0x00, 0x04, 0x60];
        assert!(decode(&bytes).is_err());
    }
}
