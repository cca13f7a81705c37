// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Error types for the crate

use std::fmt;

use enum_as_inner::EnumAsInner;
use thiserror::Error;

use crate::rr::dnssec::{Algorithm, DigestType};

/// An alias for results returned by codec functions of this crate
pub type CodecResult<T> = ::std::result::Result<T, CodecError>;

/// The error kind for wire codec and validation errors
#[derive(Debug, EnumAsInner, Error)]
#[non_exhaustive]
pub enum CodecErrorKind {
    /// The buffer ended in the middle of a field
    #[error("unexpected end of input reached")]
    Truncated,

    /// Character data length exceeded the limit
    #[error("char data length exceeds {max}: {len}")]
    CharacterDataTooLong {
        /// Specified maximum
        max: usize,
        /// Actual length
        len: usize,
    },

    /// A domain name was too long
    #[error("name label data exceed 255: {0}")]
    DomainNameTooLong(usize),

    /// Label bytes exceeded the limit of 63
    #[error("label bytes exceed 63: {0}")]
    LabelBytesTooLong(usize),

    /// A name compression pointer did not point strictly backwards
    #[error("label points to data not prior to idx: {idx} ptr: {ptr}")]
    PointerNotPriorToLabel {
        /// index of the label containing this pointer
        idx: usize,
        /// location to which the pointer is directing
        ptr: u16,
    },

    /// An unrecognized label code was found
    #[error("unrecognized label code: {0:b}")]
    UnrecognizedLabelCode(u8),

    /// The length of rdata read was not as expected
    #[error("incorrect rdata length read: {read} expected: {len}")]
    IncorrectRDataLengthRead {
        /// The amount of read data
        read: usize,
        /// The expected length of the data
        len: usize,
    },

    /// The maximum buffer size was exceeded
    #[error("maximum buffer size exceeded: {0}")]
    MaxBufferSizeExceeded(usize),

    /// DNSKEY protocol field was not the required value 3
    #[error("dnskey protocol value unknown, must be 3: {0}")]
    DnsKeyProtocolNot3(u8),

    /// Unrecognized csync flags were found
    #[error("csync flags should be 0b000000**: {0:b}")]
    UnrecognizedCsyncFlags(u16),

    /// A type bitmap window header repeated or went backwards
    #[error("type bitmap window out of order or repeated: {0}")]
    BitMapWindowOutOfOrder(u8),

    /// A type bitmap window length was outside 1..=32
    #[error("type bitmap window length must be 1..=32: {0}")]
    BitMapWindowLengthInvalid(u8),

    /// The algorithm is recognized but no implementation is registered
    #[error("algorithm not supported: {0}")]
    UnsupportedAlgorithm(Algorithm),

    /// The digest type is recognized but no implementation is registered
    #[error("digest type not supported: {0:?}")]
    UnsupportedDigestType(DigestType),

    /// A signature or digest did not verify
    #[error("signature verification failed")]
    VerifyFailed,

    /// An error with an arbitrary message, referenced as &'static str
    #[error("{0}")]
    Message(&'static str),

    /// An error with an arbitrary message, stored as String
    #[error("{0}")]
    Msg(String),

    // foreign
    /// An unspecified ring error, e.g. from key material rejection
    #[error("ring error: {0}")]
    Ring(#[from] ring::error::Unspecified),
}

/// The error type for wire codec and validation errors
#[derive(Error, Debug)]
#[non_exhaustive]
pub struct CodecError {
    /// Kind of error that occurred
    pub kind: Box<CodecErrorKind>,
}

impl CodecError {
    /// Get the kind of the error
    #[inline]
    pub fn kind(&self) -> &CodecErrorKind {
        &self.kind
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

impl From<CodecErrorKind> for CodecError {
    fn from(kind: CodecErrorKind) -> Self {
        Self {
            kind: Box::new(kind),
        }
    }
}

impl From<&'static str> for CodecError {
    fn from(msg: &'static str) -> Self {
        CodecErrorKind::Message(msg).into()
    }
}

impl From<String> for CodecError {
    fn from(msg: String) -> Self {
        CodecErrorKind::Msg(msg).into()
    }
}

impl From<ring::error::Unspecified> for CodecError {
    fn from(e: ring::error::Unspecified) -> Self {
        CodecErrorKind::from(e).into()
    }
}

/// An alias for results of key management and signing operations
pub type DnsSecResult<T> = ::std::result::Result<T, DnsSecError>;

/// The error kind for key management and signing errors
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DnsSecErrorKind {
    /// An error with an arbitrary message, referenced as &'static str
    #[error("{0}")]
    Message(&'static str),

    /// An error with an arbitrary message, stored as String
    #[error("{0}")]
    Msg(String),

    // foreign
    /// A codec error
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// Ring rejected the key material
    #[error("ring key rejected: {0}")]
    RingKeyRejected(#[from] ring::error::KeyRejected),

    /// An unspecified ring error
    #[error("ring error: {0}")]
    Ring(#[from] ring::error::Unspecified),
}

/// The error type for key management and signing errors
#[derive(Error, Debug)]
#[non_exhaustive]
pub struct DnsSecError {
    /// Kind of error that occurred
    pub kind: Box<DnsSecErrorKind>,
}

impl DnsSecError {
    /// Get the kind of the error
    #[inline]
    pub fn kind(&self) -> &DnsSecErrorKind {
        &self.kind
    }
}

impl fmt::Display for DnsSecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

impl From<DnsSecErrorKind> for DnsSecError {
    fn from(kind: DnsSecErrorKind) -> Self {
        Self {
            kind: Box::new(kind),
        }
    }
}

impl From<&'static str> for DnsSecError {
    fn from(msg: &'static str) -> Self {
        DnsSecErrorKind::Message(msg).into()
    }
}

impl From<String> for DnsSecError {
    fn from(msg: String) -> Self {
        DnsSecErrorKind::Msg(msg).into()
    }
}

impl From<CodecError> for DnsSecError {
    fn from(e: CodecError) -> Self {
        DnsSecErrorKind::from(e).into()
    }
}

impl From<ring::error::KeyRejected> for DnsSecError {
    fn from(e: ring::error::KeyRejected) -> Self {
        DnsSecErrorKind::from(e).into()
    }
}

impl From<ring::error::Unspecified> for DnsSecError {
    fn from(e: ring::error::Unspecified) -> Self {
        DnsSecErrorKind::from(e).into()
    }
}
