//! Create [`GoTermInternal`] from binary representation
//! and vice versa

use super::{push_str, usize_to_u32, Cursor};
use crate::term::internal::GoTermInternal;
use crate::{Domain, GoError, GoResult, GoTermId, TermGroup};

impl GoTermInternal {
    /// Returns a binary representation of the term
    ///
    /// The binary layout is defined as:
    ///
    /// | Byte offset | Number of bytes | Description |
    /// | --- | --- | --- |
    /// | 0 | 4 | The length of the remaining blob as big-endian `u32` |
    /// | 4 | 4 | The Term ID as big-endian `u32` |
    /// | 8 | 1 | The [`Domain`] |
    /// | 9 | 4 + n | The Term name, prefixed with its length |
    /// | 13 + n | 1 | `1` if a definition follows, else `0` |
    /// | 14 + n | 4 + m | The definition, prefixed with its length (optional) |
    /// | .. | 4 + 4x | The `is_a` parents (see `TermGroup::as_bytes`) |
    /// | .. | 4 + 4y | The `part_of` wholes (see `TermGroup::as_bytes`) |
    ///
    /// Back-edges and closures are not stored.
    ///
    /// # Panics
    ///
    /// This method will panic if the total byte length is longer than `u32::MAX`
    pub(crate) fn as_bytes(&self) -> Vec<u8> {
        let mut blob = Vec::new();
        blob.extend_from_slice(&self.id().to_be_bytes());
        blob.push(self.domain().as_u8());
        push_str(&mut blob, self.name());
        match self.definition() {
            Some(definition) => {
                blob.push(1u8);
                push_str(&mut blob, definition);
            }
            None => blob.push(0u8),
        }
        blob.append(&mut self.is_a().as_bytes());
        blob.append(&mut self.part_of().as_bytes());

        let mut res = Vec::with_capacity(blob.len() + 4);
        res.extend_from_slice(&usize_to_u32(blob.len()).to_be_bytes());
        res.append(&mut blob);
        res
    }
}

/// Reads a [`TermGroup`] in the layout of `TermGroup::as_bytes`
pub(crate) fn group_from_cursor(cursor: &mut Cursor) -> GoResult<TermGroup> {
    let n = cursor.u32()?;
    let mut group = TermGroup::with_capacity(n as usize);
    for _ in 0..n {
        group.insert(GoTermId::from(cursor.u32()?));
    }
    Ok(group)
}

/// Reads one [`GoTermInternal`] and advances the cursor past it
///
/// See [`GoTermInternal::as_bytes`] for the layout.
///
/// # Errors
///
/// [`GoError::ParseBinaryError`] if the data is truncated, the term blob
/// holds unexpected trailing bytes or the domain is unknown
pub(crate) fn from_cursor(cursor: &mut Cursor) -> GoResult<GoTermInternal> {
    let mut blob = cursor.section()?;

    let id = GoTermId::from(blob.u32()?);
    let domain = Domain::try_from(blob.u8()?)?;
    let name = blob.str()?.to_string();
    let mut term = GoTermInternal::new(id, name, domain);

    match blob.u8()? {
        0 => (),
        1 => *term.definition_mut() = Some(blob.str()?.to_string()),
        _ => return Err(GoError::ParseBinaryError),
    }
    for parent in &group_from_cursor(&mut blob)? {
        term.add_parent(parent);
    }
    for whole in &group_from_cursor(&mut blob)? {
        term.add_whole(whole);
    }

    if blob.is_empty() {
        Ok(term)
    } else {
        Err(GoError::ParseBinaryError)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn term() -> GoTermInternal {
        let mut term =
            GoTermInternal::new(5634u32.into(), "nucleus".into(), Domain::CellularComponent);
        *term.definition_mut() = Some("A membrane-bounded organelle.".into());
        term.add_parent(43231u32);
        term.add_whole(5622u32);
        term
    }

    #[test]
    fn layout() {
        let bytes = term().as_bytes();
        assert_eq!(bytes[0..4], [0, 0, 0, (bytes.len() - 4) as u8]);
        assert_eq!(bytes[4..8], 5634u32.to_be_bytes());
        assert_eq!(bytes[8], 3);
        assert_eq!(bytes[9..13], [0, 0, 0, 7]);
        assert_eq!(&bytes[13..20], b"nucleus");
        assert_eq!(bytes[20], 1);
    }

    #[test]
    fn decode() {
        let bytes = term().as_bytes();
        let mut cursor = Cursor::new(&bytes);
        let decoded = from_cursor(&mut cursor).unwrap();
        assert!(cursor.is_empty());
        assert_eq!(decoded.id(), &GoTermId::from(5634u32));
        assert_eq!(decoded.name(), "nucleus");
        assert_eq!(decoded.domain(), Domain::CellularComponent);
        assert_eq!(decoded.definition(), Some("A membrane-bounded organelle."));
        assert!(decoded.is_a().contains(&43231u32.into()));
        assert!(decoded.part_of().contains(&5622u32.into()));
        assert!(decoded.children().is_empty());
    }

    #[test]
    fn invalid_domain() {
        let mut bytes = term().as_bytes();
        bytes[8] = 7;
        assert_eq!(
            from_cursor(&mut Cursor::new(&bytes)).unwrap_err(),
            GoError::ParseBinaryError
        );
    }

    #[test]
    fn truncated() {
        let bytes = term().as_bytes();
        assert!(from_cursor(&mut Cursor::new(&bytes[..bytes.len() - 1])).is_err());
    }
}
