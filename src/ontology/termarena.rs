use std::collections::HashMap;

use crate::term::internal::GoTermInternal;
use crate::{GoTermId, DEFAULT_NUM_TERMS};

/// Owns all terms of the ontology
///
/// Terms are stored in insertion order and addressed by their
/// [`GoTermId`] or by their position in the arena.
#[derive(Debug, Clone)]
pub(crate) struct Arena {
    terms: Vec<GoTermInternal>,
    ids: HashMap<GoTermId, usize>,
}

impl Arena {
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Inserts a term, replacing a previous term with the same ID
    ///
    /// Returns `true` if a term was replaced
    pub fn insert(&mut self, term: GoTermInternal) -> bool {
        let id = *term.id();
        if let Some(idx) = self.ids.get(&id) {
            self.terms[*idx] = term;
            true
        } else {
            self.ids.insert(id, self.terms.len());
            self.terms.push(term);
            false
        }
    }

    pub fn contains(&self, id: GoTermId) -> bool {
        self.ids.contains_key(&id)
    }

    pub fn index(&self, id: GoTermId) -> Option<usize> {
        self.ids.get(&id).copied()
    }

    pub fn get(&self, id: GoTermId) -> Option<&GoTermInternal> {
        self.index(id).map(|idx| &self.terms[idx])
    }

    pub fn get_mut(&mut self, id: GoTermId) -> Option<&mut GoTermInternal> {
        self.index(id).map(|idx| &mut self.terms[idx])
    }

    pub fn get_by_index(&self, idx: usize) -> &GoTermInternal {
        &self.terms[idx]
    }

    pub fn get_by_index_mut(&mut self, idx: usize) -> &mut GoTermInternal {
        &mut self.terms[idx]
    }

    pub fn values(&self) -> std::slice::Iter<'_, GoTermInternal> {
        self.terms.iter()
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            terms: Vec::with_capacity(DEFAULT_NUM_TERMS),
            ids: HashMap::with_capacity(DEFAULT_NUM_TERMS),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Domain;

    #[test]
    fn insert_and_replace() {
        let mut arena = Arena::default();
        assert!(!arena.insert(GoTermInternal::new(
            5u32.into(),
            "first".into(),
            Domain::BiologicalProcess
        )));
        assert!(!arena.insert(GoTermInternal::new(
            3u32.into(),
            "second".into(),
            Domain::BiologicalProcess
        )));
        assert!(arena.insert(GoTermInternal::new(
            5u32.into(),
            "replaced".into(),
            Domain::BiologicalProcess
        )));

        assert_eq!(arena.len(), 2);
        assert_eq!(arena.index(5u32.into()), Some(0));
        assert_eq!(arena.get(5u32.into()).unwrap().name(), "replaced");
        let ids: Vec<GoTermId> = arena.values().map(|term| *term.id()).collect();
        assert_eq!(ids, vec![GoTermId::from(5u32), GoTermId::from(3u32)]);
        assert!(arena.get(4u32.into()).is_none());
    }
}
