use std::ops::BitOr;

use crate::{GoTerm, GoTermId, Ontology};

/// A set of [`GoTermId`]s representing a group of GO terms
///
/// Each term can occur only once in the group. The IDs are kept sorted,
/// so two groups with the same members are always equal.
///
/// This group is used e.g. for the parents, children, ancestors and
/// descendants of a term.
///
/// # Examples
///
/// ```
/// use geneontology::{GoTermId, TermGroup};
///
/// let mut group = TermGroup::new();
/// assert!(group.insert(GoTermId::from(3u32)));
/// assert!(group.insert(GoTermId::from(1u32)));
/// assert!(!group.insert(GoTermId::from(3u32)));
///
/// assert_eq!(group.len(), 2);
/// assert!(group.contains(&GoTermId::from(1u32)));
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct TermGroup {
    ids: Vec<GoTermId>,
}

impl TermGroup {
    /// Constructs a new, empty [`TermGroup`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a new, empty [`TermGroup`] with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: Vec::with_capacity(capacity),
        }
    }

    /// Returns `true` if the group contains no [`GoTermId`]s
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns the number of [`GoTermId`]s in the group
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Adds a new [`GoTermId`] to the group
    ///
    /// Returns whether the `GoTermId` was newly inserted.
    pub fn insert<I: Into<GoTermId>>(&mut self, id: I) -> bool {
        let id = id.into();
        match self.ids.binary_search(&id) {
            Ok(_) => false,
            Err(idx) => {
                self.ids.insert(idx, id);
                true
            }
        }
    }

    /// Appends a [`GoTermId`] without checking order or uniqueness
    ///
    /// Callers must ensure that `id` is larger than every ID in the group.
    fn insert_unchecked(&mut self, id: GoTermId) {
        self.ids.push(id);
    }

    /// Returns `true` if the group contains the [`GoTermId`]
    pub fn contains(&self, id: &GoTermId) -> bool {
        self.ids.binary_search(id).is_ok()
    }

    /// Returns an Iterator of the [`GoTermId`]s inside the group
    pub fn iter(&self) -> TermIds<'_> {
        TermIds::new(self.ids.iter())
    }

    /// Returns an iterator of the [`GoTerm`]s of the group
    ///
    /// IDs that are not part of `ontology` are skipped.
    pub fn terms<'a>(&'a self, ontology: &'a Ontology) -> impl Iterator<Item = GoTerm<'a>> + 'a {
        self.iter().filter_map(|id| ontology.term(id))
    }

    /// Returns a byte representation of the group
    ///
    /// The first 4 bytes hold the number of IDs, followed by each
    /// ID as big-endian `u32`
    pub(crate) fn as_bytes(&self) -> Vec<u8> {
        let mut res = Vec::with_capacity(4 + self.len() * 4);
        let n: u32 = self
            .len()
            .try_into()
            .expect("a group cannot hold more than u32::MAX terms");
        res.extend_from_slice(&n.to_be_bytes());
        for id in &self.ids {
            res.extend_from_slice(&id.to_be_bytes());
        }
        res
    }
}

impl FromIterator<GoTermId> for TermGroup {
    fn from_iter<T: IntoIterator<Item = GoTermId>>(iter: T) -> Self {
        let mut ids: Vec<GoTermId> = iter.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();
        Self { ids }
    }
}

impl<'a> IntoIterator for &'a TermGroup {
    type Item = GoTermId;

    type IntoIter = TermIds<'a>;

    fn into_iter(self) -> TermIds<'a> {
        TermIds::new(self.ids.iter())
    }
}

/// An iterator over [`GoTermId`]s
pub struct TermIds<'a> {
    inner: std::slice::Iter<'a, GoTermId>,
}

impl<'a> TermIds<'a> {
    fn new(inner: std::slice::Iter<'a, GoTermId>) -> Self {
        Self { inner }
    }
}

impl<'a> Iterator for TermIds<'a> {
    type Item = GoTermId;
    fn next(&mut self) -> Option<GoTermId> {
        self.inner.next().copied()
    }
}

/// Iterate [`GoTerm`]s of an owned [`TermGroup`]
///
/// It is used in situations where we cannot reference the [`TermGroup`]
/// because it is short-lived and must own it instead
pub struct GroupCombine<'a> {
    inner: TermGroup,
    ontology: &'a Ontology,
    idx: usize,
}

impl<'a> GroupCombine<'a> {
    /// Constructs a new [`GroupCombine`] from a [`TermGroup`] and a reference
    /// to the [`Ontology`]
    pub fn new(inner: TermGroup, ontology: &'a Ontology) -> Self {
        Self {
            inner,
            idx: 0,
            ontology,
        }
    }
}

impl<'a> Iterator for GroupCombine<'a> {
    type Item = GoTerm<'a>;
    fn next(&mut self) -> Option<Self::Item> {
        while let Some(term_id) = self.inner.ids.get(self.idx) {
            self.idx += 1;
            if let Some(term) = self.ontology.term(*term_id) {
                return Some(term);
            }
        }
        None
    }
}

impl BitOr for &TermGroup {
    type Output = TermGroup;

    fn bitor(self, rhs: &TermGroup) -> TermGroup {
        let mut group = TermGroup::with_capacity(self.len() + rhs.len());
        let mut lhs = self.ids.iter().peekable();
        let mut rhs = rhs.ids.iter().peekable();
        loop {
            let next = match (lhs.peek(), rhs.peek()) {
                (Some(a), Some(b)) if a < b => lhs.next(),
                (Some(a), Some(b)) if a > b => rhs.next(),
                (Some(_), Some(_)) => {
                    rhs.next();
                    lhs.next()
                }
                (Some(_), None) => lhs.next(),
                (None, Some(_)) => rhs.next(),
                (None, None) => break,
            };
            if let Some(id) = next {
                group.insert_unchecked(*id);
            }
        }
        group
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(ids: &[u32]) -> TermGroup {
        ids.iter().map(|id| GoTermId::from(*id)).collect()
    }

    #[test]
    fn test_group_iter() {
        let group = group(&[3, 1, 2]);

        let ids: Vec<u32> = group.iter().map(|id| id.as_u32()).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let mut count = 0;
        for _ in &group {
            count += 1;
        }
        assert_eq!(count, 3);
    }

    #[test]
    fn test_from_iter_dedups() {
        let group = group(&[5, 1, 5, 1, 2]);
        assert_eq!(group, self::group(&[1, 2, 5]));
    }

    #[test]
    fn test_bitor_set1() {
        let result = &group(&[1, 2, 3]) | &group(&[2, 4]);
        assert_eq!(result, group(&[1, 2, 3, 4]));
    }

    #[test]
    fn test_bitor_set2() {
        let result = &group(&[1, 2, 3]) | &group(&[1, 2, 4, 5]);
        assert_eq!(result.ids, group(&[1, 2, 3, 4, 5]).ids);
    }

    #[test]
    fn test_bitor_empty() {
        let result = &TermGroup::new() | &group(&[7]);
        assert_eq!(result, group(&[7]));
    }

    #[test]
    fn test_as_bytes() {
        let bytes = group(&[1, 258]).as_bytes();
        assert_eq!(bytes, vec![0, 0, 0, 2, 0, 0, 0, 1, 0, 0, 1, 2]);
    }
}
