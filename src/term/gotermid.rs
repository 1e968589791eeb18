use core::fmt::Debug;
use std::fmt::Display;

use crate::{GoError, GoResult, ID_PREFIX};

/// The unique identifier of a GO term
///
/// The ID is stored as the integer accession number, e.g. `GO:0008150`
/// is stored as `8150`. This makes it `Copy` and cheap to use as a key.
/// Only the canonical form with 7 zero-padded digits is parsed, so
/// `GO:8150` is not an ID.
///
/// # Examples
///
/// ```
/// use geneontology::GoTermId;
///
/// let id = GoTermId::try_from("GO:0008150").unwrap();
/// assert_eq!(id.as_u32(), 8150);
/// assert_eq!(id.to_string(), "GO:0008150");
///
/// assert!(GoTermId::try_from("HP:0008150").is_err());
/// assert!(GoTermId::try_from("GO:ABC").is_err());
/// ```
#[derive(Copy, Clone, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct GoTermId {
    inner: u32,
}

impl GoTermId {
    /// Returns the accession number of the term
    pub fn as_u32(&self) -> u32 {
        self.inner
    }

    /// Returns the memory representation of the accession number
    /// as a byte array in big-endian (network) byte order
    pub fn to_be_bytes(&self) -> [u8; 4] {
        self.inner.to_be_bytes()
    }
}

impl TryFrom<&str> for GoTermId {
    type Error = GoError;
    fn try_from(s: &str) -> GoResult<Self> {
        let Some(acc) = s
            .strip_prefix(ID_PREFIX)
            .and_then(|rest| rest.strip_prefix(':'))
        else {
            return Err(GoError::InvalidInput(format!("invalid GO term ID: {s}")));
        };
        // only the canonical, zero-padded form is accepted
        let canonical = acc.len() == 7 || (acc.len() > 7 && !acc.starts_with('0'));
        if !canonical || !acc.bytes().all(|b| b.is_ascii_digit()) {
            return Err(GoError::InvalidInput(format!("invalid GO term ID: {s}")));
        }
        Ok(GoTermId {
            inner: acc.parse::<u32>()?,
        })
    }
}

impl From<u32> for GoTermId {
    fn from(inner: u32) -> Self {
        Self { inner }
    }
}

impl From<[u8; 4]> for GoTermId {
    fn from(bytes: [u8; 4]) -> Self {
        Self {
            inner: u32::from_be_bytes(bytes),
        }
    }
}

impl Debug for GoTermId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GoTermId({self})")
    }
}

impl Display for GoTermId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{:07}", ID_PREFIX, self.inner)
    }
}

impl PartialEq<str> for GoTermId {
    fn eq(&self, other: &str) -> bool {
        GoTermId::try_from(other).map_or(false, |id| id == *self)
    }
}

impl PartialEq<&str> for GoTermId {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_and_display() {
        let id = GoTermId::try_from("GO:0000123").unwrap();
        assert_eq!(id.as_u32(), 123);
        assert_eq!(format!("{id}"), "GO:0000123");
        assert_eq!(format!("{id:?}"), "GoTermId(GO:0000123)");
    }

    #[test]
    fn from_accession() {
        assert_eq!(GoTermId::from(8150u32).to_string(), "GO:0008150");
    }

    #[test]
    fn compare_to_str() {
        let id = GoTermId::from(5575u32);
        assert_eq!(id, "GO:0005575");
        assert!(id != "GO:0005576");
        assert!(id != "foobar");
    }

    #[test]
    fn invalid_ids() {
        assert!(GoTermId::try_from("").is_err());
        assert!(GoTermId::try_from("GO:").is_err());
        assert!(GoTermId::try_from("GO0008150").is_err());
        assert!(GoTermId::try_from("GO:+8150").is_err());
        assert!(GoTermId::try_from("GO:99999999999").is_err());
    }

    #[test]
    fn non_canonical_ids() {
        assert!(GoTermId::try_from("GO:6915").is_err());
        assert!(GoTermId::try_from("GO:00006915").is_err());
        assert!(GoTermId::try_from("GO:000691").is_err());
        assert_eq!(
            GoTermId::try_from("GO:12345678").unwrap().to_string(),
            "GO:12345678"
        );
        assert!(GoTermId::from(6915u32) != "GO:6915");
    }

    #[test]
    fn bytes() {
        let id = GoTermId::from(258u32);
        assert_eq!(id.to_be_bytes(), [0, 0, 1, 2]);
        assert_eq!(GoTermId::from([0, 0, 1, 2]), id);
    }
}
