// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::error::{CodecError, CodecErrorKind, CodecResult};

/// A cursor over a borrowed byte buffer for reading wire format data.
///
/// This is non-destructive to the inner buffer, b/c for pointer types a
/// reverse seek is needed to look up previously written names.
pub struct BinDecoder<'a> {
    buffer: &'a [u8],
    index: usize,
}

impl<'a> BinDecoder<'a> {
    /// Creates a new BinDecoder
    ///
    /// # Arguments
    ///
    /// * `buffer` - buffer from which all data will be read
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, index: 0 }
    }

    /// Pop one byte from the buffer
    pub fn pop(&mut self) -> CodecResult<u8> {
        if self.index < self.buffer.len() {
            let byte = self.buffer[self.index];
            self.index += 1;
            Ok(byte)
        } else {
            Err(CodecErrorKind::Truncated.into())
        }
    }

    /// Returns the number of bytes remaining in the buffer
    pub fn len(&self) -> usize {
        self.buffer.len().saturating_sub(self.index)
    }

    /// Returns `true` if the buffer is exhausted
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Peek one byte forward, without moving the current index forward
    pub fn peek(&self) -> Option<u8> {
        self.buffer.get(self.index).copied()
    }

    /// Returns the current index into the buffer
    pub fn index(&self) -> usize {
        self.index
    }

    /// This is a cheap clone; the buffer is shared and only the index is set
    ///  to the value passed in. Used when following compression pointers.
    pub fn clone(&self, index_at: u16) -> BinDecoder<'a> {
        BinDecoder {
            buffer: self.buffer,
            index: index_at as usize,
        }
    }

    /// Reads an RFC 1035 character-string from the buffer
    ///
    /// ```text
    /// <character-string> is a single
    /// length octet followed by that number of characters.  <character-string>
    /// is treated as binary information, and can be up to 256 characters in
    /// length (including the length octet).
    /// ```
    pub fn read_character_data(&mut self) -> CodecResult<&'a [u8]> {
        let length = self.pop()? as usize;
        self.read_slice(length)
    }

    /// Reads a Vec out of the buffer
    ///
    /// # Arguments
    ///
    /// * `len` - number of bytes to read from the buffer
    pub fn read_vec(&mut self, len: usize) -> CodecResult<Vec<u8>> {
        self.read_slice(len).map(ToOwned::to_owned)
    }

    /// Reads a slice out of the buffer, without allocating
    ///
    /// # Arguments
    ///
    /// * `len` - number of bytes to read from the buffer
    pub fn read_slice(&mut self, len: usize) -> CodecResult<&'a [u8]> {
        let end = self
            .index
            .checked_add(len)
            .ok_or_else(|| CodecError::from("invalid length for slice"))?;
        if end > self.buffer.len() {
            return Err(CodecErrorKind::Truncated.into());
        }
        let slice: &'a [u8] = &self.buffer[self.index..end];
        self.index = end;
        Ok(slice)
    }

    /// Reads a byte from the buffer, equivalent to `Self::pop()`
    pub fn read_u8(&mut self) -> CodecResult<u8> {
        self.pop()
    }

    /// Reads the next two bytes as a big-endian u16
    pub fn read_u16(&mut self) -> CodecResult<u16> {
        let s = self.read_slice(2)?;
        Ok(u16::from_be_bytes([s[0], s[1]]))
    }

    /// Reads the next four bytes as a big-endian u32
    pub fn read_u32(&mut self) -> CodecResult<u32> {
        let s = self.read_slice(4)?;
        Ok(u32::from_be_bytes([s[0], s[1], s[2], s[3]]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_slice() {
        let deadbeef = b"deadbeef";
        let mut decoder = BinDecoder::new(deadbeef);

        let read = decoder.read_slice(4).expect("failed to read dead");
        assert_eq!(read, b"dead");

        let read = decoder.read_slice(2).expect("failed to read be");
        assert_eq!(read, b"be");

        let read = decoder.read_slice(0).expect("failed to read nothing");
        assert_eq!(read, b"");

        // this should fail
        assert!(decoder.read_slice(3).is_err());
    }

    #[test]
    fn test_read_ints() {
        let bytes = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07];
        let mut decoder = BinDecoder::new(&bytes);

        assert_eq!(decoder.read_u16().unwrap(), 0x0102);
        assert_eq!(decoder.read_u32().unwrap(), 0x0304_0506);
        assert_eq!(decoder.read_u8().unwrap(), 0x07);
        assert!(decoder.read_u8().is_err());
    }

    #[test]
    fn test_read_character_data() {
        let bytes = [3, b'a', b'b', b'c', 1, b'z'];
        let mut decoder = BinDecoder::new(&bytes);

        assert_eq!(decoder.read_character_data().unwrap(), b"abc");
        assert_eq!(decoder.read_character_data().unwrap(), b"z");
        assert!(decoder.is_empty());

        // length octet exceeds remaining bytes
        let bytes = [4, b'a'];
        let mut decoder = BinDecoder::new(&bytes);
        assert!(decoder.read_character_data().is_err());
    }
}
