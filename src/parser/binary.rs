//! The binary parser handles the parsing and generation of the
//! [`crate::GeneOntology`] in binary format.
//!
//! Every blob starts with the identifying bytes `GOP` and a version byte.
//! All integers are encoded as big-endian `u32`, strings are prefixed
//! with their byte length and sections with their total length.
pub(crate) mod annotation;
pub(crate) mod term;

use std::fmt::Display;

use crate::{u32_from_bytes, GoError, GoResult};

const MAGIC: [u8; 3] = [0x47, 0x4f, 0x50];

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) enum BinaryVersion {
    V1,
}

impl TryFrom<u8> for BinaryVersion {
    type Error = GoError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1u8 => Ok(BinaryVersion::V1),
            _ => Err(GoError::NotImplemented),
        }
    }
}

impl Display for BinaryVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinaryVersion::V1 => write!(f, "1"),
        }
    }
}

/// Returns the identifying header for the current binary version
pub(crate) fn header() -> Vec<u8> {
    let mut bytes = MAGIC.to_vec();
    bytes.push(1u8);
    bytes
}

/// Identifies the encoding version and returns the data after the header
///
/// # Errors
///
/// - Missing `GOP` bytes: [`GoError::ParseBinaryError`]
/// - Invalid version: [`GoError::NotImplemented`]
pub(crate) fn version(bytes: &[u8]) -> GoResult<(BinaryVersion, &[u8])> {
    if bytes.len() < 4 || bytes[0..3] != MAGIC {
        return Err(GoError::ParseBinaryError);
    }
    Ok((BinaryVersion::try_from(bytes[3])?, &bytes[4..]))
}

/// Converts a length into `u32`
///
/// # Panics
///
/// Panics if `n` is larger than `u32::MAX`
pub(crate) fn usize_to_u32(n: usize) -> u32 {
    n.try_into().expect("binary data cannot hold more than u32::MAX bytes")
}

/// Appends `buffer` as section, prefixed with its length
pub(crate) fn push_section(res: &mut Vec<u8>, buffer: &[u8]) {
    res.extend_from_slice(&usize_to_u32(buffer.len()).to_be_bytes());
    res.extend_from_slice(buffer);
}

/// Appends a string, prefixed with its length
pub(crate) fn push_str(res: &mut Vec<u8>, s: &str) {
    push_section(res, s.as_bytes());
}

/// Reads binary data front to back
///
/// Every read checks the remaining length and fails with
/// [`GoError::ParseBinaryError`] instead of panicking.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Cursor<'a> {
    data: &'a [u8],
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn take(&mut self, n: usize) -> GoResult<&'a [u8]> {
        if self.data.len() < n {
            return Err(GoError::ParseBinaryError);
        }
        let (head, tail) = self.data.split_at(n);
        self.data = tail;
        Ok(head)
    }

    pub fn u8(&mut self) -> GoResult<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn u32(&mut self) -> GoResult<u32> {
        Ok(u32_from_bytes(self.take(4)?))
    }

    /// Reads a length-prefixed section
    pub fn section(&mut self) -> GoResult<Cursor<'a>> {
        let len = self.u32()? as usize;
        Ok(Cursor::new(self.take(len)?))
    }

    /// Reads a length-prefixed UTF-8 string
    pub fn str(&mut self) -> GoResult<&'a str> {
        let len = self.u32()? as usize;
        std::str::from_utf8(self.take(len)?).map_err(|_| GoError::ParseBinaryError)
    }

    /// Reads a `u32` count followed by that many strings
    pub fn strings(&mut self) -> GoResult<Vec<&'a str>> {
        let n = self.u32()?;
        (0..n).map(|_| self.str()).collect()
    }
}

/// Appends a `u32` count followed by every string
pub(crate) fn push_strings<'a, I: ExactSizeIterator<Item = &'a str>>(res: &mut Vec<u8>, strings: I) {
    res.extend_from_slice(&usize_to_u32(strings.len()).to_be_bytes());
    for s in strings {
        push_str(res, s);
    }
}
