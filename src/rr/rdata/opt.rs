// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! option record for passing protocol options between the client and server

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

#[cfg(feature = "serde-config")]
use serde::{Deserialize, Serialize};

use tracing::warn;

use crate::error::*;
use crate::serialize::binary::*;

/// The OPT record type is used for ExtendedDNS records.
///
/// These allow for additional information to be associated with the DNS request that otherwise
/// would require changes to the DNS protocol.
///
/// [RFC 6891, EDNS(0) Extensions, April 2013](https://tools.ietf.org/html/rfc6891#section-6)
///
/// ```text
/// 6.1.2.  Wire Format
///
///    An OPT RR has a fixed part and a variable set of options expressed as
///    {attribute, value} pairs.  The variable part of an OPT RR may contain
///    zero or more options in the RDATA.  Each option MUST be treated as a
///    bit field.  Each option is encoded as:
///
///                   +0 (MSB)                            +1 (LSB)
///        +---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+
///     0: |                          OPTION-CODE                          |
///        +---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+
///     2: |                         OPTION-LENGTH                         |
///        +---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+
///     4: |                                                               |
///        /                          OPTION-DATA                          /
///        /                                                               /
///        +---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+
///
///    Any OPTION-CODE values not understood by a responder or requestor
///    MUST be ignored.
/// ```
#[cfg_attr(feature = "serde-config", derive(Deserialize, Serialize))]
#[derive(Default, Debug, PartialEq, Eq, Clone)]
pub struct OPT {
    options: HashMap<EdnsCode, EdnsOption>,
}

impl OPT {
    /// Creates a new OPT record data.
    ///
    /// # Arguments
    ///
    /// * `options` - A map of the codes and record types
    pub fn new(options: HashMap<EdnsCode, EdnsOption>) -> Self {
        Self { options }
    }

    /// Get a single option based on the code
    pub fn get(&self, code: EdnsCode) -> Option<&EdnsOption> {
        self.options.get(&code)
    }

    /// Insert a new option, the key is derived from the `EdnsOption`
    pub fn insert(&mut self, option: EdnsOption) {
        self.options.insert((&option).into(), option);
    }

    /// Remove an option, the key is derived from the `EdnsOption`
    pub fn remove(&mut self, option: EdnsCode) {
        self.options.remove(&option);
    }

    /// Returns the number of options
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Returns true if there are no options
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

impl Hash for OPT {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // HashMap has no defined iteration order, so combine per-entry hashes
        // with an order-independent (commutative) operator.
        let combined = self
            .options
            .iter()
            .fold(0u64, |acc, entry| {
                let mut entry_hasher = std::collections::hash_map::DefaultHasher::new();
                entry.hash(&mut entry_hasher);
                acc ^ entry_hasher.finish()
            });
        combined.hash(state);
    }
}

impl AsMut<HashMap<EdnsCode, EdnsOption>> for OPT {
    fn as_mut(&mut self) -> &mut HashMap<EdnsCode, EdnsOption> {
        &mut self.options
    }
}

impl AsRef<HashMap<EdnsCode, EdnsOption>> for OPT {
    fn as_ref(&self) -> &HashMap<EdnsCode, EdnsOption> {
        &self.options
    }
}

/// Read the RData from the given Decoder
pub fn read(decoder: &mut BinDecoder<'_>, rdata_length: u16) -> CodecResult<OPT> {
    let mut state: OptReadState = OptReadState::ReadCode;
    let mut options: HashMap<EdnsCode, EdnsOption> = HashMap::new();
    let start_idx = decoder.index();

    let rdata_length = rdata_length as usize;
    while rdata_length > decoder.index() - start_idx {
        match state {
            OptReadState::ReadCode => {
                state = OptReadState::Code {
                    code: EdnsCode::from(decoder.read_u16()?),
                };
            }
            OptReadState::Code { code } => {
                let length = decoder.read_u16()? as usize;
                if length > rdata_length {
                    return Err(CodecError::from("OPT value length exceeds rdata length"));
                }
                // If the length is 0, the `OptReadState::Data` state is
                // skipped; it always reads at least one byte.
                state = if length == 0 {
                    options.insert(code, (code, &[] as &[u8]).into());
                    OptReadState::ReadCode
                } else {
                    OptReadState::Data {
                        code,
                        length,
                        collected: Vec::<u8>::with_capacity(length),
                    }
                };
            }
            OptReadState::Data {
                code,
                length,
                mut collected,
            } => {
                collected.push(decoder.pop()?);
                if length == collected.len() {
                    options.insert(code, (code, &collected as &[u8]).into());
                    state = OptReadState::ReadCode;
                } else {
                    state = OptReadState::Data {
                        code,
                        length,
                        collected,
                    };
                }
            }
        }
    }

    if state != OptReadState::ReadCode {
        // there was some problem parsing the data for the options, ignoring them
        warn!("incomplete or poorly formatted EDNS options: {:?}", state);
        options.clear();
    }

    Ok(OPT::new(options))
}

/// Write the RData to the given Encoder
pub fn emit(encoder: &mut BinEncoder<'_>, opt: &OPT) -> CodecResult<()> {
    for (edns_code, edns_option) in opt.as_ref().iter() {
        encoder.emit_u16(u16::from(*edns_code))?;
        encoder.emit_u16(edns_option.len())?;
        edns_option.emit(encoder)?
    }
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum OptReadState {
    ReadCode,
    Code {
        code: EdnsCode,
    }, // expect LSB for the opt code, store the high byte
    Data {
        code: EdnsCode,
        length: usize,
        collected: Vec<u8>,
    }, // expect the data for the option
}

/// The code of the EDNS data option
#[cfg_attr(feature = "serde-config", derive(Deserialize, Serialize))]
#[derive(Hash, Debug, Copy, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EdnsCode {
    /// [RFC 6891, Reserved](https://tools.ietf.org/html/rfc6891)
    Zero,

    /// [RFC 8764, Apple's Long-Lived Queries, Optional](https://tools.ietf.org/html/rfc8764)
    LLQ,

    /// [UL On-hold](http://files.dns-sd.org/draft-sekar-dns-ul.txt)
    UL,

    /// [RFC 5001, NSID](https://tools.ietf.org/html/rfc5001)
    NSID,

    /// [draft-cheshire-edns0-owner-option, EDNS0 OWNER Option](https://tools.ietf.org/html/draft-cheshire-edns0-owner-option-01)
    Owner,

    /// [RFC 6975, DNSSEC Algorithm Understood](https://tools.ietf.org/html/rfc6975)
    DAU,

    /// [RFC 6975, DS Hash Understood](https://tools.ietf.org/html/rfc6975)
    DHU,

    /// [RFC 6975, NSEC3 Hash Understood](https://tools.ietf.org/html/rfc6975)
    N3U,

    /// [RFC 7871, Client Subnet, Optional](https://tools.ietf.org/html/rfc7871)
    Subnet,

    /// [RFC 7314, EDNS EXPIRE, Optional](https://tools.ietf.org/html/rfc7314)
    Expire,

    /// [RFC 7873, DNS Cookies](https://tools.ietf.org/html/rfc7873)
    Cookie,

    /// [RFC 7828, edns-tcp-keepalive](https://tools.ietf.org/html/rfc7828)
    Keepalive,

    /// [RFC 7830, The EDNS(0) Padding](https://tools.ietf.org/html/rfc7830)
    Padding,

    /// [RFC 7901, CHAIN Query Requests in DNS, Optional](https://tools.ietf.org/html/rfc7901)
    Chain,

    /// Unknown, used to deal with unknown or unsupported codes
    Unknown(u16),
}

impl From<u16> for EdnsCode {
    fn from(value: u16) -> Self {
        match value {
            0 => Self::Zero,
            1 => Self::LLQ,
            2 => Self::UL,
            3 => Self::NSID,
            4 => Self::Owner,
            5 => Self::DAU,
            6 => Self::DHU,
            7 => Self::N3U,
            8 => Self::Subnet,
            9 => Self::Expire,
            10 => Self::Cookie,
            11 => Self::Keepalive,
            12 => Self::Padding,
            13 => Self::Chain,
            _ => Self::Unknown(value),
        }
    }
}

impl From<EdnsCode> for u16 {
    fn from(value: EdnsCode) -> Self {
        match value {
            EdnsCode::Zero => 0,
            EdnsCode::LLQ => 1,
            EdnsCode::UL => 2,
            EdnsCode::NSID => 3,
            EdnsCode::Owner => 4,
            EdnsCode::DAU => 5,
            EdnsCode::DHU => 6,
            EdnsCode::N3U => 7,
            EdnsCode::Subnet => 8,
            EdnsCode::Expire => 9,
            EdnsCode::Cookie => 10,
            EdnsCode::Keepalive => 11,
            EdnsCode::Padding => 12,
            EdnsCode::Chain => 13,
            EdnsCode::Unknown(value) => value,
        }
    }
}

/// options used to pass information about capabilities between client and server
///
/// `note: Not all EdnsOptions are supported at this time.`
///
/// <http://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-13>
#[cfg_attr(feature = "serde-config", derive(Deserialize, Serialize))]
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
#[non_exhaustive]
pub enum EdnsOption {
    /// [draft-cheshire-edns0-owner-option, EDNS0 OWNER Option](https://tools.ietf.org/html/draft-cheshire-edns0-owner-option-01)
    Owner(Owner),

    /// [RFC 6975, NSEC3 Hash Understood](https://tools.ietf.org/html/rfc6975)
    ///
    /// A list of NSEC3 hash algorithm codes the client understands,
    /// one octet per code.
    N3U(Vec<u8>),

    /// Unknown, used to deal with unknown or unsupported codes
    Unknown(u16, Vec<u8>),
}

impl EdnsOption {
    /// Returns the length in bytes of the EdnsOption
    pub fn len(&self) -> u16 {
        match self {
            EdnsOption::Owner(owner) => owner.len(),
            EdnsOption::N3U(ref algorithms) => algorithms.len() as u16,
            EdnsOption::Unknown(_, ref data) => data.len() as u16,
        }
    }

    /// Returns `true` if the length in bytes of the EdnsOption is 0
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BinEncodable for EdnsOption {
    fn emit(&self, encoder: &mut BinEncoder<'_>) -> CodecResult<()> {
        match self {
            EdnsOption::Owner(owner) => owner.emit(encoder),
            EdnsOption::N3U(ref algorithms) => encoder.emit_vec(algorithms),
            EdnsOption::Unknown(_, ref data) => encoder.emit_vec(data),
        }
    }
}

/// only the supported extensions are decoded here; unsupported or
/// malformed option data is carried opaque
impl<'a> From<(EdnsCode, &'a [u8])> for EdnsOption {
    fn from(value: (EdnsCode, &'a [u8])) -> Self {
        match value.0 {
            EdnsCode::Owner => match Owner::from_bytes(value.1) {
                Ok(owner) => Self::Owner(owner),
                Err(e) => {
                    warn!("malformed EDNS owner option: {}", e);
                    Self::Unknown(value.0.into(), value.1.to_vec())
                }
            },
            EdnsCode::N3U => Self::N3U(value.1.to_vec()),
            _ => Self::Unknown(value.0.into(), value.1.to_vec()),
        }
    }
}

impl<'a> From<&'a EdnsOption> for EdnsCode {
    fn from(value: &'a EdnsOption) -> Self {
        match value {
            EdnsOption::Owner(..) => Self::Owner,
            EdnsOption::N3U(..) => Self::N3U,
            EdnsOption::Unknown(code, _) => (*code).into(),
        }
    }
}

/// [draft-cheshire-edns0-owner-option, EDNS0 OWNER Option](https://tools.ietf.org/html/draft-cheshire-edns0-owner-option-01)
///
/// ```text
///     +0 (MSB)                            +1 (LSB)
///  +---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+
///  |                    OPTION-CODE = 4 (OWNER)                    |
///  +---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+
///  |                 OPTION-LENGTH = 8, 14, or more                |
///  +---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+
///  |    Version    |    Sequence   |                               |
///  +---+---+---+---+---+---+---+---+                               |
///  |                     Primary MAC Address                       |
///  +---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+
///  |            Wakeup MAC Address (optional)                      |
///  |                               +---+---+---+---+---+---+---+---+
///  |                               |     Password (optional)       |
///  +---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+
/// ```
///
/// When a password is carried without a distinct wakeup MAC, the primary
/// MAC is repeated in the wakeup slot so that the password field lands at
/// its expected offset; both encodings are accepted on read.
#[cfg_attr(feature = "serde-config", derive(Deserialize, Serialize))]
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct Owner {
    version: u8,
    sequence: u8,
    primary_mac: [u8; 6],
    wakeup_mac: Option<[u8; 6]>,
    password: Option<Vec<u8>>,
}

impl Owner {
    /// Creates a new Owner option data.
    pub fn new(
        version: u8,
        sequence: u8,
        primary_mac: [u8; 6],
        wakeup_mac: Option<[u8; 6]>,
        password: Option<Vec<u8>>,
    ) -> Self {
        Self {
            version,
            sequence,
            primary_mac,
            wakeup_mac,
            password,
        }
    }

    /// The version of this option, 0 in the current draft
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Update sequence number, incremented on each sleep cycle
    pub fn sequence(&self) -> u8 {
        self.sequence
    }

    /// The MAC address of the sleeping host's primary interface
    pub fn primary_mac(&self) -> [u8; 6] {
        self.primary_mac
    }

    /// The MAC address to put in the magic packet, when different from the primary
    pub fn wakeup_mac(&self) -> Option<[u8; 6]> {
        self.wakeup_mac
    }

    /// The SecureOn password for the magic packet
    pub fn password(&self) -> Option<&[u8]> {
        self.password.as_deref()
    }

    /// Decodes the option data
    fn from_bytes(data: &[u8]) -> CodecResult<Self> {
        if data.len() < 8 {
            return Err(CodecError::from("owner option data too short"));
        }
        if data.len() > 8 && data.len() < 14 {
            return Err(CodecError::from(
                "owner option wakeup MAC must be 6 octets",
            ));
        }

        let version = data[0];
        let sequence = data[1];
        let mut primary_mac = [0_u8; 6];
        primary_mac.copy_from_slice(&data[2..8]);

        let (wakeup_mac, password) = if data.len() >= 14 {
            let mut wakeup = [0_u8; 6];
            wakeup.copy_from_slice(&data[8..14]);
            let password = if data.len() > 14 {
                Some(data[14..].to_vec())
            } else {
                None
            };
            (Some(wakeup), password)
        } else {
            (None, None)
        };

        Ok(Self {
            version,
            sequence,
            primary_mac,
            wakeup_mac,
            password,
        })
    }

    /// Length in bytes of the encoded option data
    pub fn len(&self) -> u16 {
        let mut len = 8_u16;
        if self.wakeup_mac.is_some() || self.password.is_some() {
            len += 6;
        }
        if let Some(password) = &self.password {
            len += password.len() as u16;
        }
        len
    }

    /// Returns true if the encoded option data would be empty, which is never the case
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl BinEncodable for Owner {
    fn emit(&self, encoder: &mut BinEncoder<'_>) -> CodecResult<()> {
        encoder.emit_u8(self.version)?;
        encoder.emit_u8(self.sequence)?;
        encoder.emit_vec(&self.primary_mac)?;

        match (&self.wakeup_mac, &self.password) {
            (Some(wakeup), _) => encoder.emit_vec(wakeup)?,
            // keep the password at its expected offset by repeating the
            // primary MAC in the wakeup slot
            (None, Some(_)) => encoder.emit_vec(&self.primary_mac)?,
            (None, None) => (),
        }

        if let Some(password) = &self.password {
            encoder.emit_vec(password)?;
        }

        Ok(())
    }
}

impl fmt::Display for OPT {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for (code, option) in self.options.iter() {
            write!(f, "{:?}={:?} ", code, option)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(rdata: &OPT) -> OPT {
        let mut bytes = Vec::new();
        let mut encoder: BinEncoder<'_> = BinEncoder::new(&mut bytes);
        emit(&mut encoder, rdata).expect("Encoding error");
        let bytes = encoder.into_bytes();

        let mut decoder: BinDecoder<'_> = BinDecoder::new(bytes);
        read(&mut decoder, bytes.len() as u16).expect("Decoding error")
    }

    #[test]
    fn test() {
        let mut rdata = OPT::default();
        rdata.insert(EdnsOption::N3U(vec![1, 2]));

        assert_eq!(round_trip(&rdata), rdata);
    }

    #[test]
    fn test_read_empty_option_at_end_of_opt() {
        let bytes: Vec<u8> = vec![
            0x00, 0x0a, 0x00, 0x08, 0x0b, 0x64, 0xb4, 0xdc, 0xd7, 0xb0, 0xcc, 0x8f, 0x00, 0x08,
            0x00, 0x04, 0x00, 0x01, 0x00, 0x00, 0x00, 0x0b, 0x00, 0x00,
        ];

        let mut decoder: BinDecoder<'_> = BinDecoder::new(&bytes);
        let read_rdata = read(&mut decoder, bytes.len() as u16);
        assert!(
            read_rdata.is_ok(),
            "error decoding: {:?}",
            read_rdata.unwrap_err()
        );

        let opt = read_rdata.unwrap();
        let mut options = HashMap::default();
        options.insert(EdnsCode::Subnet, EdnsOption::Unknown(8, vec![0, 1, 0, 0]));
        options.insert(
            EdnsCode::Cookie,
            EdnsOption::Unknown(10, vec![0x0b, 0x64, 0xb4, 0xdc, 0xd7, 0xb0, 0xcc, 0x8f]),
        );
        options.insert(EdnsCode::Keepalive, EdnsOption::Unknown(11, vec![]));
        let options = OPT::new(options);
        assert_eq!(opt, options);
    }

    #[test]
    fn test_owner_minimal() {
        let mut rdata = OPT::default();
        rdata.insert(EdnsOption::Owner(Owner::new(
            0,
            3,
            [0x00, 0x11, 0x22, 0x33, 0x44, 0x55],
            None,
            None,
        )));

        let mut bytes = Vec::new();
        let mut encoder: BinEncoder<'_> = BinEncoder::new(&mut bytes);
        emit(&mut encoder, &rdata).expect("Encoding error");
        let bytes = encoder.into_bytes();

        assert_eq!(
            bytes.as_slice(),
            &[
                0x00, 0x04, 0x00, 0x08, 0x00, 0x03, 0x00, 0x11, 0x22, 0x33, 0x44, 0x55,
            ]
        );

        let mut decoder: BinDecoder<'_> = BinDecoder::new(bytes);
        assert_eq!(read(&mut decoder, bytes.len() as u16).unwrap(), rdata);
    }

    #[test]
    fn test_owner_password_backfills_wakeup_slot() {
        let primary = [0x00, 0x11, 0x22, 0x33, 0x44, 0x55];
        let owner = Owner::new(0, 0, primary, None, Some(vec![0xDE, 0xAD, 0xBE, 0xEF]));

        assert_eq!(owner.len(), 18);

        let mut bytes = Vec::new();
        let mut encoder: BinEncoder<'_> = BinEncoder::new(&mut bytes);
        owner.emit(&mut encoder).expect("Encoding error");
        let bytes = encoder.into_bytes();

        // primary MAC is repeated in the wakeup slot
        assert_eq!(&bytes[2..8], &primary);
        assert_eq!(&bytes[8..14], &primary);
        assert_eq!(&bytes[14..], &[0xDE, 0xAD, 0xBE, 0xEF]);

        // and the duplicated encoding is accepted on read
        let reread = Owner::from_bytes(bytes).unwrap();
        assert_eq!(reread.primary_mac(), primary);
        assert_eq!(reread.wakeup_mac(), Some(primary));
        assert_eq!(reread.password(), Some(&[0xDE, 0xAD, 0xBE, 0xEF][..]));
    }

    #[test]
    fn test_owner_distinct_wakeup() {
        let owner = Owner::new(
            0,
            1,
            [0x00, 0x11, 0x22, 0x33, 0x44, 0x55],
            Some([0x66, 0x77, 0x88, 0x99, 0xAA, 0xBB]),
            None,
        );
        assert_eq!(owner.len(), 14);

        let mut bytes = Vec::new();
        let mut encoder: BinEncoder<'_> = BinEncoder::new(&mut bytes);
        owner.emit(&mut encoder).expect("Encoding error");
        let bytes = encoder.into_bytes();

        assert_eq!(Owner::from_bytes(bytes).unwrap(), owner);
    }

    #[test]
    fn test_owner_bad_length_is_opaque() {
        // 10 bytes: too long for the short form, too short for a wakeup MAC
        let data = [0_u8; 10];
        let option = EdnsOption::from((EdnsCode::Owner, &data[..]));
        assert_eq!(option, EdnsOption::Unknown(4, data.to_vec()));
    }
}
