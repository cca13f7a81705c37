// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! HINFO record for storing host information

use std::fmt;

#[cfg(feature = "serde-config")]
use serde::{Deserialize, Serialize};

use crate::error::*;
use crate::serialize::binary::*;

/// [RFC 1035, DOMAIN NAMES - IMPLEMENTATION AND SPECIFICATION, November 1987][rfc1035]
///
/// ```text
/// 3.3.2. HINFO RDATA format
///
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     /                      CPU                      /
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     /                       OS                      /
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///
/// where:
///
/// CPU             A <character-string> which specifies the CPU type.
///
/// OS              A <character-string> which specifies the operating
///                 system type.
///
/// Standard values for CPU and OS can be found in [RFC-1010].
/// ```
///
/// [rfc1035]: https://tools.ietf.org/html/rfc1035
#[cfg_attr(feature = "serde-config", derive(Deserialize, Serialize))]
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct HINFO {
    cpu: Box<[u8]>,
    os: Box<[u8]>,
}

impl HINFO {
    /// Creates a new HINFO record data.
    ///
    /// # Arguments
    ///
    /// * `cpu` - A <character-string> which specifies the CPU type.
    /// * `os` - A <character-string> which specifies the operating system type.
    pub fn new(cpu: String, os: String) -> Self {
        Self {
            cpu: cpu.into_bytes().into_boxed_slice(),
            os: os.into_bytes().into_boxed_slice(),
        }
    }

    /// Creates a new HINFO record data from bytes, allowing binary record data.
    pub fn from_bytes(cpu: Box<[u8]>, os: Box<[u8]>) -> Self {
        Self { cpu, os }
    }

    /// A <character-string> which specifies the CPU type.
    pub fn cpu(&self) -> &[u8] {
        &self.cpu
    }

    /// A <character-string> which specifies the operating system type.
    pub fn os(&self) -> &[u8] {
        &self.os
    }
}

/// Read the RData from the given Decoder
pub fn read(decoder: &mut BinDecoder<'_>) -> CodecResult<HINFO> {
    let cpu = decoder.read_character_data()?.to_vec().into_boxed_slice();
    let os = decoder.read_character_data()?.to_vec().into_boxed_slice();

    Ok(HINFO { cpu, os })
}

/// Write the RData to the given Encoder
pub fn emit(encoder: &mut BinEncoder<'_>, hinfo: &HINFO) -> CodecResult<()> {
    encoder.emit_character_data(&hinfo.cpu)?;
    encoder.emit_character_data(&hinfo.os)?;

    Ok(())
}

fn write_quoted(f: &mut fmt::Formatter<'_>, data: &[u8]) -> Result<(), fmt::Error> {
    write!(f, "\"")?;
    for ch in String::from_utf8_lossy(data).chars() {
        match ch {
            '"' | '\\' => write!(f, "\\{ch}")?,
            ch => write!(f, "{ch}")?,
        }
    }
    write!(f, "\"")
}

/// The presentation format is the two character-strings, each quoted with
/// backslash-escaping of `"` and `\`:
///
/// ```text
///            SRI-NIC.ARPA.           HINFO   "DEC-2060" "TOPS20"
/// ```
impl fmt::Display for HINFO {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write_quoted(f, &self.cpu)?;
        write!(f, " ")?;
        write_quoted(f, &self.os)
    }
}
