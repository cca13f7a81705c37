// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! domain name, aka labels, implementation

use std::char;
use std::cmp::Ordering;
use std::fmt::{self, Write};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

#[cfg(feature = "serde-config")]
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use tinyvec::TinyVec;

use crate::error::{CodecError, CodecErrorKind, CodecResult};
use crate::rr::domain::label::{IntoLabel, Label};
use crate::serialize::binary::{BinDecodable, BinDecoder, BinEncodable, BinEncoder};

/// A domain name
#[derive(Clone, Default, Eq)]
pub struct Name {
    is_fqdn: bool,
    label_data: TinyVec<[u8; 32]>,
    // 24 here because TinyVec holds an inline buffer up to 24 bytes without
    // increasing its stack footprint
    label_ends: TinyVec<[u8; 24]>,
}

impl Name {
    /// Maximum legal length of a domain name
    pub const MAX_LENGTH: usize = 255;

    /// Create a new domain::Name, i.e. label
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the root label, i.e. no labels
    pub fn root() -> Self {
        let mut this = Self::new();
        this.is_fqdn = true;
        this
    }

    /// Extend the name with the offered label, and ensure maximum name length is not exceeded.
    fn extend_name(&mut self, label: &[u8]) -> CodecResult<()> {
        let new_len = self.len() + label.len() + 1;

        if new_len > Self::MAX_LENGTH {
            return Err(CodecErrorKind::DomainNameTooLong(new_len).into());
        };

        self.label_data.extend_from_slice(label);
        self.label_ends.push(self.label_data.len() as u8);

        Ok(())
    }

    /// Returns true if there are no labels, i.e. it's empty.
    ///
    /// In DNS the root is represented by `.`
    pub fn is_root(&self) -> bool {
        self.label_ends.is_empty() && self.is_fqdn()
    }

    /// Returns true if the name is a fully qualified domain name.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::str::FromStr;
    /// use rrdata::rr::domain::Name;
    ///
    /// let name = Name::from_str("www.example.com").unwrap();
    /// assert!(!name.is_fqdn());
    ///
    /// let name = Name::from_str("www.example.com.").unwrap();
    /// assert!(name.is_fqdn());
    /// ```
    pub fn is_fqdn(&self) -> bool {
        self.is_fqdn
    }

    /// Specifies this name is a fully qualified domain name
    pub fn set_fqdn(&mut self, val: bool) {
        self.is_fqdn = val
    }

    /// Returns an iterator over the labels
    pub fn iter(&self) -> LabelIter<'_> {
        LabelIter {
            name: self,
            start: 0,
            end: self.label_ends.len() as u8,
        }
    }

    /// Appends the label to the end of this name
    pub fn append_label<L: IntoLabel>(mut self, label: L) -> CodecResult<Self> {
        self.extend_name(label.into_label()?.as_bytes())?;
        Ok(self)
    }

    /// Creates a new Name from the specified labels
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::str::FromStr;
    /// use rrdata::rr::domain::Name;
    ///
    /// let from_labels = Name::from_labels(vec!["www", "example", "com"]).unwrap();
    /// assert_eq!(from_labels, Name::from_str("www.example.com.").unwrap());
    ///
    /// let root = Name::from_labels(Vec::<&str>::new()).unwrap();
    /// assert!(root.is_root());
    /// ```
    pub fn from_labels<I, L>(labels: I) -> CodecResult<Self>
    where
        I: IntoIterator<Item = L>,
        L: IntoLabel,
    {
        let mut name = Self {
            is_fqdn: true,
            ..Self::default()
        };
        for label in labels {
            name = name.append_label(label.into_label()?)?;
        }

        Ok(name)
    }

    /// Appends `other` to `self`, returning a new `Name`
    ///
    /// Carries forward `is_fqdn` from `other`.
    pub fn append_name(mut self, other: &Self) -> CodecResult<Self> {
        for label in other.iter() {
            self.extend_name(label)?;
        }

        self.is_fqdn = other.is_fqdn;
        Ok(self)
    }

    /// Appends the `domain` to `self`, making the new `Name` an FQDN
    pub fn append_domain(self, domain: &Self) -> CodecResult<Self> {
        let mut this = self.append_name(domain)?;
        this.set_fqdn(true);
        Ok(this)
    }

    /// Creates a new Name with all labels lowercased
    pub fn to_lowercase(&self) -> Self {
        let new_label_data = self
            .label_data
            .iter()
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self {
            is_fqdn: self.is_fqdn,
            label_data: new_label_data,
            label_ends: self.label_ends.clone(),
        }
    }

    /// Trims off the first part of the name, to help with searching for the domain piece
    ///
    /// # Examples
    ///
    /// ```
    /// use std::str::FromStr;
    /// use rrdata::rr::domain::Name;
    ///
    /// let example_com = Name::from_str("example.com.").unwrap();
    /// assert_eq!(example_com.base_name(), Name::from_str("com.").unwrap());
    /// assert_eq!(Name::from_str("com.").unwrap().base_name(), Name::root());
    /// ```
    pub fn base_name(&self) -> Self {
        let length = self.label_ends.len();
        if length > 0 {
            return self.trim_to(length - 1);
        }
        self.clone()
    }

    /// Trims to the number of labels specified
    pub fn trim_to(&self, num_labels: usize) -> Self {
        if num_labels > self.label_ends.len() {
            self.clone()
        } else {
            Self::from_labels(self.iter().skip(self.label_ends.len() - num_labels))
                .expect("trim_to cannot grow the name")
        }
    }

    /// returns true if the name components of self are all present at the end of name
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::str::FromStr;
    /// use rrdata::rr::domain::Name;
    ///
    /// let name = Name::from_str("www.example.com").unwrap();
    /// let zone = Name::from_str("example.com").unwrap();
    /// assert!(zone.zone_of(&name));
    /// assert!(!name.zone_of(&zone));
    /// ```
    pub fn zone_of(&self, name: &Self) -> bool {
        let self_len = self.label_ends.len();
        let name_len = name.label_ends.len();
        if self_len == 0 {
            return true;
        }
        if self_len > name_len {
            return false;
        }

        let self_iter = self.iter().rev();
        let name_iter = name.iter().rev();

        self_iter
            .zip(name_iter)
            .all(|(a, b)| a.eq_ignore_ascii_case(b))
    }

    /// Returns the number of labels in the name, not counting the root label
    pub fn num_labels(&self) -> u8 {
        self.label_ends.len() as u8
    }

    /// Returns the encoded length of this name, ignoring compression.
    ///
    /// The root is one, one for the single zero octet. Every other name
    /// adds a length octet per label plus the label's octets.
    pub fn len(&self) -> usize {
        let dots = if !self.label_ends.is_empty() {
            self.label_ends.len()
        } else {
            1
        };
        dots + self.label_data.len()
    }

    /// Returns whether the length of this name is zero labels
    pub fn is_empty(&self) -> bool {
        self.len() == 1
    }

    /// Parse a name from a UTF-8 string, handling IDNA conversion of the labels
    pub fn from_utf8<S: AsRef<str>>(local: S) -> CodecResult<Self> {
        Self::from_encoded_str::<LabelEncUtf8>(local.as_ref(), None)
    }

    /// Parse a name from an ASCII-only string, preserving the case of the labels
    pub fn from_ascii<S: AsRef<str>>(local: S) -> CodecResult<Self> {
        Self::from_encoded_str::<LabelEncAscii>(local.as_ref(), None)
    }

    /// Parse a presentation-format name, resolving relative names against `origin`
    ///
    /// # Examples
    ///
    /// ```
    /// use std::str::FromStr;
    /// use rrdata::rr::domain::Name;
    ///
    /// let origin = Name::from_str("example.com.").unwrap();
    /// let name = Name::parse("www", Some(&origin)).unwrap();
    /// assert_eq!(name, Name::from_str("www.example.com.").unwrap());
    /// ```
    pub fn parse(local: &str, origin: Option<&Self>) -> CodecResult<Self> {
        Self::from_encoded_str::<LabelEncUtf8>(local, origin)
    }

    /// Parses a string with `\DDD` decimal escapes and `\X` character escapes
    fn from_encoded_str<E: LabelEnc>(local: &str, origin: Option<&Self>) -> CodecResult<Self> {
        let mut name = Self::new();
        let mut label = String::new();

        let mut state = ParseState::Label;

        // short circuit root parse
        if local == "." {
            name.set_fqdn(true);
            return Ok(name);
        }

        for ch in local.chars() {
            match state {
                ParseState::Label => match ch {
                    '.' => {
                        name = name.append_label(E::to_label(&label)?)?;
                        label.clear();
                    }
                    '\\' => state = ParseState::Escape1,
                    ch if !ch.is_control() && !ch.is_whitespace() => label.push(ch),
                    _ => return Err(format!("unrecognized char: {ch}").into()),
                },
                ParseState::Escape1 => {
                    if ch.is_numeric() {
                        state = ParseState::Escape2(
                            ch.to_digit(10)
                                .ok_or_else(|| CodecError::from(format!("illegal char: {ch}")))?,
                        );
                    } else {
                        // it's a single escaped char
                        label.push(ch);
                        state = ParseState::Label;
                    }
                }
                ParseState::Escape2(i) => {
                    if ch.is_numeric() {
                        state = ParseState::Escape3(
                            i,
                            ch.to_digit(10)
                                .ok_or_else(|| CodecError::from(format!("illegal char: {ch}")))?,
                        );
                    } else {
                        return Err(CodecError::from(format!("unrecognized char: {ch}")));
                    }
                }
                ParseState::Escape3(i, ii) => {
                    if ch.is_numeric() {
                        // decimal byte escape per RFC 1035 5.1
                        let val: u32 = (i * 100)
                            + (ii * 10)
                            + ch.to_digit(10)
                                .ok_or_else(|| CodecError::from(format!("illegal char: {ch}")))?;
                        let new: char = char::from_u32(val)
                            .ok_or_else(|| CodecError::from(format!("illegal char: {ch}")))?;
                        label.push(new);
                        state = ParseState::Label;
                    } else {
                        return Err(format!("unrecognized char: {ch}").into());
                    }
                }
            }
        }

        if !label.is_empty() {
            name = name.append_label(E::to_label(&label)?)?;
        }

        // check if the last character processed was an unescaped `.`
        if label.is_empty() && !local.is_empty() {
            name.set_fqdn(true);
        } else if let Some(other) = origin {
            return name.append_domain(other);
        }

        Ok(name)
    }

    /// Emits the name to the encoder.
    ///
    /// In canonical form there will be no pointers written to the encoder
    /// (i.e. no compression); otherwise suffixes already present in the
    /// message are replaced with a two octet pointer.
    pub fn emit_as_canonical(
        &self,
        encoder: &mut BinEncoder<'_>,
        canonical: bool,
    ) -> CodecResult<()> {
        let buf_len = encoder.len(); // lazily assert the size is less than 255...
        let labels = self.iter();

        // we're going to write out each label, tracking the indexes of the start to each label
        //   then we'll look to see if we can remove them and recapture the capacity in the buffer...
        let mut labels_written = Vec::with_capacity(self.label_ends.len());
        for label in labels {
            if label.len() > 63 {
                return Err(CodecErrorKind::LabelBytesTooLong(label.len()).into());
            }

            labels_written.push(encoder.offset());
            encoder.emit_character_data(label)?;
        }
        let last_index = encoder.offset();
        // now search for other labels already stored matching from the beginning label, strip then to the end
        //   if it's not found, then store this as a new label
        for label_idx in &labels_written {
            match encoder.get_label_pointer(*label_idx, last_index) {
                // if writing canonical and already found, continue
                Some(_) if canonical => continue,
                Some(loc) if !canonical && loc & 0xC000 == 0 => {
                    // reset back to the beginning of this label, and then write the pointer...
                    encoder.set_offset(*label_idx);
                    encoder.trim();

                    // write out the pointer marker
                    //  or'd with the location which is less than 2^14
                    encoder.emit_u16(0xC000u16 | (loc & 0x3FFFu16))?;

                    // we found a pointer don't write more, break
                    return Ok(());
                }
                _ => {
                    // no existing label exists, store this new one.
                    encoder.store_label_pointer(*label_idx, last_index);
                }
            }
        }

        // if we're getting here, then we didn't write out a pointer and are ending the name
        // the end of the list of names
        encoder.emit(0)?;

        // the entire name needs to be less than 256.
        let length = encoder.len() - buf_len;
        if length > 255 {
            return Err(CodecErrorKind::DomainNameTooLong(length).into());
        }

        Ok(())
    }

    /// Writes the labels, as lower case, to the encoder
    ///
    /// # Arguments
    ///
    /// * `encoder` - encoder for writing this name
    /// * `lowercase` - if true the name will be lowercased, otherwise it will not be changed when writing
    pub fn emit_with_lowercase(
        &self,
        encoder: &mut BinEncoder<'_>,
        lowercase: bool,
    ) -> CodecResult<()> {
        let is_canonical_names = encoder.is_canonical_names();
        if lowercase {
            self.to_lowercase()
                .emit_as_canonical(encoder, is_canonical_names)
        } else {
            self.emit_as_canonical(encoder, is_canonical_names)
        }
    }

    /// Compare two Names, not considering FQDN-ness.
    fn cmp_labels(&self, other: &Self, ignore_case: bool) -> Ordering {
        if self.label_ends.is_empty() && other.label_ends.is_empty() {
            return Ordering::Equal;
        }

        // we reverse the iters so that we are comparing from the root/domain to the local...
        let self_labels = self.iter().rev();
        let other_labels = other.iter().rev();

        for (l, r) in self_labels.zip(other_labels) {
            let l = Label::from_raw_bytes(l).expect("labels in names are already verified");
            let r = Label::from_raw_bytes(r).expect("labels in names are already verified");
            match l.cmp_with_case(&r, ignore_case) {
                Ordering::Equal => continue,
                not_eq => return not_eq,
            }
        }

        self.label_ends.len().cmp(&other.label_ends.len())
    }

    /// Case sensitive comparison
    pub fn cmp_case(&self, other: &Self) -> Ordering {
        match (self.is_fqdn(), other.is_fqdn()) {
            (false, true) => Ordering::Less,
            (true, false) => Ordering::Greater,
            _ => self.cmp_labels(other, false),
        }
    }

    /// Compares the Names, in a case sensitive manner
    pub fn eq_case(&self, other: &Self) -> bool {
        self.cmp_case(other) == Ordering::Equal
    }

    /// Converts this name into an ascii safe string.
    ///
    /// If the name is an IDNA name, then the name labels will be returned with the `xn--` prefix.
    pub fn to_ascii(&self) -> String {
        let mut s = String::with_capacity(self.len());
        self.write_labels(&mut s)
            .expect("string conversion of name should not fail");
        s
    }

    /// Converts the Name labels to the utf8 String form, final `.` included for FQDNs.
    pub fn to_utf8(&self) -> String {
        format!("{self}")
    }

    fn write_labels<W: Write>(&self, f: &mut W) -> Result<(), fmt::Error> {
        let mut iter = self.iter().map(|b| {
            Label::from_raw_bytes(b).expect("labels in names are already verified")
        });
        if let Some(label) = iter.next() {
            label.write_ascii(f)?;
        }

        for label in iter {
            write!(f, ".")?;
            label.write_ascii(f)?;
        }

        // if it was the root name
        if self.is_root() || self.is_fqdn() {
            write!(f, ".")?;
        }
        Ok(())
    }

    /// True if the first label of this name is the wildcard, i.e. '*'
    pub fn is_wildcard(&self) -> bool {
        self.iter().next().map_or(false, |l| l == b"*")
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Name(\"")?;
        self.write_labels(f)?;
        f.write_str("\")")
    }
}

/// An iterator over labels in a name
pub struct LabelIter<'a> {
    name: &'a Name,
    start: u8,
    end: u8,
}

impl<'a> Iterator for LabelIter<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        if self.start >= self.end {
            return None;
        }

        let end = *self.name.label_ends.get(self.start as usize)?;
        let start = match self.start {
            0 => 0,
            _ => self.name.label_ends[(self.start - 1) as usize],
        };
        self.start += 1;
        Some(&self.name.label_data[start as usize..end as usize])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end.saturating_sub(self.start) as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for LabelIter<'_> {}

impl DoubleEndedIterator for LabelIter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.end <= self.start {
            return None;
        }

        self.end -= 1;

        let end = *self.name.label_ends.get(self.end as usize)?;
        let start = match self.end {
            0 => 0,
            _ => self.name.label_ends[(self.end - 1) as usize],
        };

        Some(&self.name.label_data[start as usize..end as usize])
    }
}

impl<'a> IntoIterator for &'a Name {
    type Item = &'a [u8];
    type IntoIter = LabelIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

enum ParseState {
    Label,
    Escape1,
    Escape2(u32),
    Escape3(u32, u32),
}

trait LabelEnc {
    fn to_label(name: &str) -> CodecResult<Label>;
}

struct LabelEncAscii;

impl LabelEnc for LabelEncAscii {
    fn to_label(name: &str) -> CodecResult<Label> {
        Label::from_ascii(name)
    }
}

struct LabelEncUtf8;

impl LabelEnc for LabelEncUtf8 {
    fn to_label(name: &str) -> CodecResult<Label> {
        Label::from_utf8(name)
    }
}

impl BinEncodable for Name {
    fn emit(&self, encoder: &mut BinEncoder<'_>) -> CodecResult<()> {
        let is_canonical_names = encoder.is_canonical_names();
        self.emit_with_lowercase(encoder, is_canonical_names)
    }
}

impl<'r> BinDecodable<'r> for Name {
    /// parses the chain of labels
    ///  this has a max of 255 octets, with each label being less than 63.
    fn read(decoder: &mut BinDecoder<'r>) -> CodecResult<Self> {
        let mut name = Self::default();
        read_inner(decoder, &mut name, None)?;
        Ok(name)
    }
}

fn read_inner(
    decoder: &mut BinDecoder<'_>,
    name: &mut Name,
    max_idx: Option<usize>,
) -> CodecResult<()> {
    let mut state: LabelParseState = LabelParseState::LabelLengthOrPointer;
    let name_start = decoder.index();

    // assume all chars are utf-8. We're doing byte-by-byte operations, no endianness issues...
    // reserved: (1000 0000 aka 0800) && (0100 0000 aka 0400)
    // pointer: (slice == 1100 0000 aka C0) & C0 == true, then 03FF & slice = offset
    // label: 03FF & slice = length; slice.next(length) = label
    // root: 0000
    loop {
        // this protects against overlapping labels
        if let Some(max_idx) = max_idx {
            if decoder.index() >= max_idx {
                return Err(CodecErrorKind::PointerNotPriorToLabel {
                    idx: name_start,
                    ptr: max_idx as u16,
                }
                .into());
            }
        }

        state = match state {
            LabelParseState::LabelLengthOrPointer => {
                // determine what the next label is
                match decoder.peek() {
                    Some(0) => {
                        // RFC 1035 Section 3.1 - the zero length root label
                        //  terminates every fully qualified name on the wire
                        name.set_fqdn(true);
                        LabelParseState::Root
                    }
                    None => {
                        // Valid names on the wire should end in a 0-octet; if
                        // the last byte wasn't 00, the name is invalid.
                        return Err(CodecErrorKind::Truncated.into());
                    }
                    Some(byte) if byte & 0b1100_0000 == 0b1100_0000 => LabelParseState::Pointer,
                    Some(byte) if byte & 0b1100_0000 == 0b0000_0000 => LabelParseState::Label,
                    Some(byte) => return Err(CodecErrorKind::UnrecognizedLabelCode(byte).into()),
                }
            }
            // labels must have a maximum length of 63
            LabelParseState::Label => {
                let label = decoder.read_character_data()?;
                if label.len() > 63 {
                    return Err(CodecErrorKind::LabelBytesTooLong(label.len()).into());
                }

                name.extend_name(label)?;

                // reset to collect more data
                LabelParseState::LabelLengthOrPointer
            }
            //         4.1.4. Message compression
            //
            // The pointer takes the form of a two octet sequence:
            //
            //     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
            //     | 1  1|                OFFSET                   |
            //     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
            //
            // The OFFSET field specifies an offset from the start of the
            // message. All pointed-to labels must appear prior to this name;
            // forward or self-referential jumps are malformed.
            LabelParseState::Pointer => {
                let pointer_location = decoder.index();
                let location = decoder.read_u16()? & 0x3FFF;

                if location as usize >= name_start {
                    return Err(CodecErrorKind::PointerNotPriorToLabel {
                        idx: pointer_location,
                        ptr: location,
                    }
                    .into());
                }

                let mut pointer = decoder.clone(location);
                read_inner(&mut pointer, name, Some(name_start))?;

                // Pointers always finish the name, break like Root.
                break;
            }
            LabelParseState::Root => {
                // need to pop() the 0 off the stack...
                decoder.pop()?;
                break;
            }
        }
    }

    let len = name.len();
    if len > Name::MAX_LENGTH {
        return Err(CodecErrorKind::DomainNameTooLong(len).into());
    }

    Ok(())
}

/// This is the list of states for the label parsing state machine
enum LabelParseState {
    LabelLengthOrPointer, // basically the start of the FSM
    Label,                // storing length of the label, must be < 63
    Pointer,              // location of pointer in slice,
    Root,                 // root is the end of the labels list for an FQDN
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_labels(f)
    }
}

impl PartialEq<Self> for Name {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl PartialOrd<Self> for Name {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Name {
    /// Case insensitive comparison, see [`Name::cmp_case`] for case sensitive comparisons
    ///
    /// RFC 4034                DNSSEC Resource Records               March 2005
    ///
    /// ```text
    /// 6.1.  Canonical DNS Name Order
    ///
    ///  For the purposes of DNS security, owner names are ordered by treating
    ///  individual labels as unsigned left-justified octet strings.  The
    ///  absence of a octet sorts before a zero value octet, and uppercase
    ///  US-ASCII letters are treated as if they were lowercase US-ASCII
    ///  letters.
    /// ```
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_fqdn(), other.is_fqdn()) {
            (false, true) => Ordering::Less,
            (true, false) => Ordering::Greater,
            _ => self.cmp_labels(other, true),
        }
    }
}

impl Hash for Name {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u8(self.is_fqdn as u8);

        // this needs to be CaseInsensitive like PartialEq
        for l in self
            .iter()
            .map(|l| Label::from_raw_bytes(l).expect("labels in names are already verified"))
            .map(|l| l.to_lowercase())
        {
            l.hash(state);
        }
    }
}

impl FromStr for Name {
    type Err = CodecError;

    /// Uses the Name::from_utf8 conversion on this string
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_utf8(s)
    }
}

#[cfg(feature = "serde-config")]
impl Serialize for Name {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_utf8())
    }
}

#[cfg(feature = "serde-config")]
impl<'de> Deserialize<'de> for Name {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_utf8(s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialize::binary::{BinDecodable, BinDecoder, BinEncoder};

    fn name(s: &str) -> Name {
        Name::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(name(".").to_utf8(), ".");
        assert_eq!(name("www.example.com.").to_utf8(), "www.example.com.");
        assert_eq!(name("www.example.com").to_utf8(), "www.example.com");
        assert!(name("www.example.com.").is_fqdn());
        assert!(!name("www.example.com").is_fqdn());
    }

    #[test]
    fn test_origin_resolution() {
        let origin = name("example.com.");
        let rel = Name::parse("www", Some(&origin)).unwrap();
        assert_eq!(rel, name("www.example.com."));

        // absolute names ignore the origin
        let abs = Name::parse("www.example.net.", Some(&origin)).unwrap();
        assert_eq!(abs, name("www.example.net."));
    }

    #[test]
    fn test_encoded_len() {
        assert_eq!(Name::root().len(), 1);
        assert_eq!(name("www.example.com.").len(), 16);
    }

    #[test]
    fn test_name_too_long() {
        let label = "a".repeat(63);
        let mut n = Name::root();
        for _ in 0..3 {
            n = n.append_label(label.as_str()).unwrap();
        }
        // 3 * 64 + 1 = 193, one more label of 63 would exceed 255
        assert!(n.append_label(label.as_str()).is_err());
    }

    #[test]
    fn test_wire_round_trip() {
        let n = name("WWW.example.COM.");

        let mut bytes = Vec::new();
        let mut encoder = BinEncoder::new(&mut bytes);
        n.emit(&mut encoder).unwrap();
        let bytes = encoder.into_bytes();

        let mut decoder = BinDecoder::new(bytes);
        let read = Name::read(&mut decoder).unwrap();
        assert_eq!(read, n);
        // case is preserved on the wire in non-canonical form
        assert!(read.eq_case(&n));
    }

    #[test]
    fn test_canonical_emit_lowercases() {
        let n = name("Alias.Example.NET.");

        let mut bytes = Vec::new();
        let mut encoder = BinEncoder::new(&mut bytes);
        encoder.set_canonical_names(true);
        n.emit(&mut encoder).unwrap();
        let bytes = encoder.into_bytes();

        assert_eq!(
            bytes.as_slice(),
            &[
                0x05, b'a', b'l', b'i', b'a', b's', 0x07, b'e', b'x', b'a', b'm', b'p', b'l', b'e',
                0x03, b'n', b'e', b't', 0x00,
            ]
        );
    }

    #[test]
    fn test_pointer_compression() {
        let first = name("www.example.com.");
        let second = name("www.example.com.");

        let mut bytes = Vec::new();
        let mut encoder = BinEncoder::new(&mut bytes);
        first.emit(&mut encoder).unwrap();
        let offset_after_first = encoder.offset();
        second.emit(&mut encoder).unwrap();
        let len = encoder.len();
        let bytes = encoder.into_bytes();

        // the second occurrence is exactly two bytes
        assert_eq!(len - offset_after_first, 2);
        assert_eq!(bytes[offset_after_first] & 0xC0, 0xC0);

        // and decodes back to the same name
        let mut decoder = BinDecoder::new(bytes);
        let one = Name::read(&mut decoder).unwrap();
        let two = Name::read(&mut decoder).unwrap();
        assert_eq!(one, first);
        assert_eq!(two, second);
    }

    #[test]
    fn test_canonical_never_compresses() {
        let n = name("www.example.com.");

        let mut bytes = Vec::new();
        let mut encoder = BinEncoder::new(&mut bytes);
        encoder.set_canonical_names(true);
        n.emit(&mut encoder).unwrap();
        n.emit(&mut encoder).unwrap();
        let bytes = encoder.into_bytes();

        // no 0xC0..0xFF may appear in a label length position
        for b in bytes.iter() {
            assert!(*b & 0xC0 != 0xC0);
        }
    }

    #[test]
    fn test_forward_pointer_rejected() {
        // name starting at 0 pointing at itself
        let bytes = [0xC0, 0x00];
        let mut decoder = BinDecoder::new(&bytes);
        let err = Name::read(&mut decoder).unwrap_err();
        match err.kind() {
            CodecErrorKind::PointerNotPriorToLabel { .. } => (),
            kind => panic!("unexpected error: {kind:?}"),
        }
    }

    #[test]
    fn test_unrecognized_label_code() {
        let bytes = [0b1000_0001, 0x00];
        let mut decoder = BinDecoder::new(&bytes);
        let err = Name::read(&mut decoder).unwrap_err();
        match err.kind() {
            CodecErrorKind::UnrecognizedLabelCode(0b1000_0001) => (),
            kind => panic!("unexpected error: {kind:?}"),
        }
    }

    #[test]
    fn test_rfc4034_canonical_order() {
        let mut names = vec![
            name("z.example."),
            name("example."),
            name("yljkjljk.a.example."),
            name("a.example."),
            name("Z.a.example."),
        ];
        names.sort();

        let expected = vec![
            name("example."),
            name("a.example."),
            name("yljkjljk.a.example."),
            name("Z.a.example."),
            name("z.example."),
        ];
        assert_eq!(names, expected);
    }

    #[test]
    fn test_case_insensitive_eq() {
        assert_eq!(name("WWW.Example.COM."), name("www.example.com."));
        assert!(!name("WWW.Example.COM.").eq_case(&name("www.example.com.")));
    }

    #[test]
    fn test_escapes() {
        let n = Name::from_ascii("a\\.b.example.com.").unwrap();
        assert_eq!(n.num_labels(), 3);
        assert_eq!(n.iter().next().unwrap(), b"a.b");

        let n = Name::from_ascii("a\\046b.example.com.").unwrap();
        assert_eq!(n.num_labels(), 3);
        assert_eq!(n.iter().next().unwrap(), b"a.b");
    }
}
