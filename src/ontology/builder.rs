//! Step-wise construction of an [`Ontology`]
//!
//! The builder moves through a fixed sequence of states. Each transition
//! consumes the builder, so a state can never be skipped:
//!
//! ```text
//! Builder<LooseCollection>  add terms, names, synonyms, alternative IDs
//!     |
//!     terms_complete()
//!     v
//! Builder<AllTerms>
//!     |
//!     connect_all_terms()   add children / parts back-edges
//!     v
//! Builder<ConnectedTerms> --- build() ---> Ontology (not flattened)
//!     |
//!     flatten()             compute ancestors / descendants
//!     v
//! Builder<FlattenedTerms> --- build() ---> Ontology
//! ```
use std::collections::HashMap;
use std::marker::PhantomData;

use tracing::{debug, warn};

use crate::ontology::termarena::Arena;
use crate::ontology::Ontology;
use crate::term::internal::GoTermInternal;
use crate::{GoError, GoResult, GoTermId, TermGroup};

/// Terms can be added, but are not connected yet
pub struct LooseCollection;
/// All terms are present
pub struct AllTerms;
/// All terms know their children and parts
pub struct ConnectedTerms;
/// All terms know their ancestors and descendants
pub struct FlattenedTerms;

fn transition_state<TX, TY>(builder: Builder<TX>) -> Builder<TY> {
    Builder::<TY> {
        terms: builder.terms,
        names: builder.names,
        synonyms: builder.synonyms,
        alt_ids: builder.alt_ids,
        closure_includes_part_of: builder.closure_includes_part_of,
        state: PhantomData,
    }
}

/// Builds an [`Ontology`]
///
/// # Examples
///
/// ```
/// use geneontology::ontology::Builder;
/// use geneontology::{Domain, GoTermId};
///
/// let mut builder = Builder::new();
/// builder.add_term(1u32, "root", Domain::BiologicalProcess, &[], &[]);
/// builder.add_term(2u32, "middle", Domain::BiologicalProcess, &[1u32.into()], &[]);
/// builder.add_term(3u32, "leaf", Domain::BiologicalProcess, &[2u32.into()], &[]);
///
/// let ontology = builder
///     .terms_complete()
///     .connect_all_terms()
///     .unwrap()
///     .flatten(true)
///     .unwrap()
///     .build();
///
/// let leaf = ontology.term(3u32).unwrap();
/// assert_eq!(leaf.ancestors().unwrap().len(), 2);
/// assert_eq!(ontology.term(1u32).unwrap().descendants().unwrap().len(), 2);
/// ```
pub struct Builder<T> {
    terms: Arena,
    names: HashMap<String, GoTermId>,
    synonyms: HashMap<String, GoTermId>,
    alt_ids: HashMap<GoTermId, GoTermId>,
    closure_includes_part_of: bool,
    state: PhantomData<T>,
}

impl<T> Builder<T> {
    /// Returns the number of terms in the builder
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns `true` if the builder holds no terms
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl Default for Builder<LooseCollection> {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder<LooseCollection> {
    /// Constructs an empty builder
    pub fn new() -> Builder<LooseCollection> {
        Builder::<LooseCollection> {
            terms: Arena::default(),
            names: HashMap::default(),
            synonyms: HashMap::default(),
            alt_ids: HashMap::default(),
            closure_includes_part_of: true,
            state: PhantomData,
        }
    }

    /// Creates and inserts a new term with its direct `is_a` parents
    /// and `part_of` wholes
    ///
    /// The name is registered in the name index, the last term with
    /// a given name wins.
    pub fn add_term<I: Into<GoTermId>>(
        &mut self,
        id: I,
        name: &str,
        domain: crate::Domain,
        is_a: &[GoTermId],
        part_of: &[GoTermId],
    ) -> GoTermId {
        let mut term = GoTermInternal::new(id.into(), name.to_string(), domain);
        for parent in is_a {
            term.add_parent(*parent);
        }
        for whole in part_of {
            term.add_whole(*whole);
        }
        self.insert_term(term)
    }

    /// Inserts a term that was fully parsed
    pub(crate) fn insert_term(&mut self, term: GoTermInternal) -> GoTermId {
        let id = *term.id();
        self.names.insert(term.name().to_string(), id);
        if self.terms.insert(term) {
            warn!("Term {} is defined more than once", id);
        }
        id
    }

    /// Registers a name for a term, replacing earlier registrations
    pub(crate) fn add_name(&mut self, name: &str, id: GoTermId) {
        self.names.insert(name.to_string(), id);
    }

    /// Registers an exact synonym for a term
    pub fn add_synonym<I: Into<GoTermId>>(&mut self, synonym: &str, id: I) {
        self.synonyms.insert(synonym.to_string(), id.into());
    }

    /// Registers an alternative ID for a term
    pub fn add_alt_id<I: Into<GoTermId>, J: Into<GoTermId>>(&mut self, alt_id: I, id: J) {
        self.alt_ids.insert(alt_id.into(), id.into());
    }

    /// Finishes adding terms
    #[must_use]
    pub fn terms_complete(self) -> Builder<AllTerms> {
        transition_state(self)
    }
}

impl Builder<AllTerms> {
    /// Adds the `children` and `parts` back-edges to every parent and whole
    ///
    /// # Errors
    ///
    /// [`GoError::DanglingReference`] if a term refers to a parent or whole
    /// that is not part of the ontology
    pub fn connect_all_terms(mut self) -> GoResult<Builder<ConnectedTerms>> {
        let mut child_edges: Vec<(GoTermId, GoTermId)> = Vec::new();
        let mut part_edges: Vec<(GoTermId, GoTermId)> = Vec::new();
        for term in self.terms.values() {
            let id = *term.id();
            child_edges.extend(term.is_a().iter().map(|parent| (id, parent)));
            part_edges.extend(term.part_of().iter().map(|whole| (id, whole)));
        }
        debug!(
            "Connecting {} is_a and {} part_of relations",
            child_edges.len(),
            part_edges.len()
        );

        for (child, parent) in child_edges {
            self.terms
                .get_mut(parent)
                .ok_or(GoError::DanglingReference {
                    term: child,
                    target: parent,
                })?
                .add_child(child);
        }
        for (part, whole) in part_edges {
            self.terms
                .get_mut(whole)
                .ok_or(GoError::DanglingReference {
                    term: part,
                    target: whole,
                })?
                .add_part(part);
        }
        Ok(transition_state(self))
    }
}

impl Builder<ConnectedTerms> {
    /// Computes and stores the ancestors and descendants of every term
    ///
    /// Ancestors follow `is_a` and, if `include_part_of` is set, `part_of`
    /// relations. Descendants follow the inverse relations.
    ///
    /// # Errors
    ///
    /// [`GoError::CyclicRelation`] if the relations contain a cycle
    pub fn flatten(mut self, include_part_of: bool) -> GoResult<Builder<FlattenedTerms>> {
        let ancestors = Closure::new(&self.terms, Direction::Ancestors, include_part_of).compute()?;
        let descendants =
            Closure::new(&self.terms, Direction::Descendants, include_part_of).compute()?;

        for (idx, (anc, desc)) in ancestors.into_iter().zip(descendants).enumerate() {
            self.terms.get_by_index_mut(idx).set_closures(anc, desc);
        }
        self.closure_includes_part_of = include_part_of;
        Ok(transition_state(self))
    }

    /// Records whether closures follow `part_of` relations, without
    /// computing them
    #[must_use]
    pub fn closure_includes_part_of(mut self, include_part_of: bool) -> Self {
        self.closure_includes_part_of = include_part_of;
        self
    }

    /// Builds an [`Ontology`] without ancestors and descendants
    ///
    /// Propagated queries on such an ontology fail with [`GoError::NotFlattened`]
    pub fn build(self) -> Ontology {
        Ontology {
            terms: self.terms,
            names: self.names,
            synonyms: self.synonyms,
            alt_ids: self.alt_ids,
            flattened: false,
            closure_includes_part_of: self.closure_includes_part_of,
        }
    }
}

impl Builder<FlattenedTerms> {
    /// Builds the final [`Ontology`]
    pub fn build(self) -> Ontology {
        Ontology {
            terms: self.terms,
            names: self.names,
            synonyms: self.synonyms,
            alt_ids: self.alt_ids,
            flattened: true,
            closure_includes_part_of: self.closure_includes_part_of,
        }
    }
}

#[derive(Clone, Copy)]
enum Direction {
    Ancestors,
    Descendants,
}

/// Memoised transitive closure over the arena
///
/// Every term's closure is computed exactly once and then reused by all
/// terms that reach it, so shared sub-graphs are never traversed twice.
struct Closure<'a> {
    arena: &'a Arena,
    direction: Direction,
    include_part_of: bool,
    cache: Vec<Option<TermGroup>>,
    active: Vec<bool>,
}

impl<'a> Closure<'a> {
    fn new(arena: &'a Arena, direction: Direction, include_part_of: bool) -> Self {
        Self {
            arena,
            direction,
            include_part_of,
            cache: vec![None; arena.len()],
            active: vec![false; arena.len()],
        }
    }

    fn compute(mut self) -> GoResult<Vec<TermGroup>> {
        for idx in 0..self.arena.len() {
            self.visit(idx)?;
        }
        Ok(self
            .cache
            .into_iter()
            .map(Option::unwrap_or_default)
            .collect())
    }

    fn neighbours(&self, term: &'a GoTermInternal) -> impl Iterator<Item = GoTermId> + 'a {
        let (primary, secondary) = match self.direction {
            Direction::Ancestors => (term.is_a(), term.part_of()),
            Direction::Descendants => (term.children(), term.parts()),
        };
        let include_part_of = self.include_part_of;
        primary
            .iter()
            .chain(secondary.iter().filter(move |_| include_part_of))
    }

    /// Resolves the neighbours of a term into arena indices
    fn frame(&self, idx: usize) -> GoResult<Frame> {
        let term = self.arena.get_by_index(idx);
        let next = self
            .neighbours(term)
            .map(|next| {
                self.arena
                    .index(next)
                    .map(|next_idx| (next, next_idx))
                    .ok_or(GoError::DanglingReference {
                        term: *term.id(),
                        target: next,
                    })
            })
            .collect::<GoResult<Vec<_>>>()?;
        Ok(Frame { idx, next, pos: 0 })
    }

    /// Post-order traversal with an explicit stack
    ///
    /// A term is finalised once all of its neighbours are. Terms on the
    /// stack are `active`, reaching one of them again is a cycle.
    fn visit(&mut self, start: usize) -> GoResult<()> {
        if self.cache[start].is_some() {
            return Ok(());
        }
        let mut stack = vec![self.frame(start)?];
        self.active[start] = true;

        while let Some(frame) = stack.last_mut() {
            match frame.next.get(frame.pos).copied() {
                Some((next, next_idx)) => {
                    frame.pos += 1;
                    if self.cache[next_idx].is_some() {
                        continue;
                    }
                    if self.active[next_idx] {
                        return Err(GoError::CyclicRelation(next));
                    }
                    stack.push(self.frame(next_idx)?);
                    self.active[next_idx] = true;
                }
                None => {
                    if let Some(done) = stack.pop() {
                        self.finish(done);
                    }
                }
            }
        }
        Ok(())
    }

    fn finish(&mut self, frame: Frame) {
        let mut ids: Vec<GoTermId> = Vec::new();
        for (next, next_idx) in frame.next {
            ids.push(next);
            if let Some(group) = &self.cache[next_idx] {
                ids.extend(group.iter());
            }
        }
        self.active[frame.idx] = false;
        self.cache[frame.idx] = Some(ids.into_iter().collect());
    }
}

/// A term on the traversal stack and its resolved neighbours
struct Frame {
    idx: usize,
    next: Vec<(GoTermId, usize)>,
    pos: usize,
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Domain;

    fn ids(ids: &[u32]) -> Vec<GoTermId> {
        ids.iter().map(|id| GoTermId::from(*id)).collect()
    }

    fn group(ids: &[u32]) -> TermGroup {
        ids.iter().map(|id| GoTermId::from(*id)).collect()
    }

    /// ```text
    ///        1
    ///      /   \
    ///     2     3 (part_of 1)
    ///      \   /
    ///        4
    /// ```
    fn diamond() -> Builder<ConnectedTerms> {
        let mut builder = Builder::new();
        builder.add_term(1u32, "root", Domain::CellularComponent, &[], &[]);
        builder.add_term(2u32, "left", Domain::CellularComponent, &ids(&[1]), &[]);
        builder.add_term(3u32, "right", Domain::CellularComponent, &[], &ids(&[1]));
        builder.add_term(4u32, "bottom", Domain::CellularComponent, &ids(&[2, 3]), &[]);
        builder.terms_complete().connect_all_terms().unwrap()
    }

    #[test]
    fn back_edges() {
        let ont = diamond().build();
        assert_eq!(ont.get(1u32.into()).unwrap().children(), &group(&[2]));
        assert_eq!(ont.get(1u32.into()).unwrap().parts(), &group(&[3]));
        assert_eq!(ont.get(3u32.into()).unwrap().children(), &group(&[4]));
        assert!(!ont.is_flattened());
        assert!(ont.get(4u32.into()).unwrap().ancestors().is_none());
    }

    #[test]
    fn closure_with_part_of() {
        let ont = diamond().flatten(true).unwrap().build();
        assert!(ont.is_flattened());
        assert_eq!(ont.get(4u32.into()).unwrap().ancestors(), Some(&group(&[1, 2, 3])));
        assert_eq!(ont.get(1u32.into()).unwrap().descendants(), Some(&group(&[2, 3, 4])));
        assert_eq!(ont.get(3u32.into()).unwrap().ancestors(), Some(&group(&[1])));
        assert_eq!(ont.get(4u32.into()).unwrap().descendants(), Some(&group(&[])));
    }

    #[test]
    fn closure_without_part_of() {
        let ont = diamond().flatten(false).unwrap().build();
        assert_eq!(ont.get(4u32.into()).unwrap().ancestors(), Some(&group(&[1, 2, 3])));
        assert_eq!(ont.get(3u32.into()).unwrap().ancestors(), Some(&group(&[])));
        assert_eq!(ont.get(1u32.into()).unwrap().descendants(), Some(&group(&[2, 4])));
    }

    #[test]
    fn ancestors_and_descendants_are_inverse() {
        let ont = diamond().flatten(true).unwrap().build();
        for term in ont.terms() {
            for anc in term.ancestors().unwrap() {
                let anc = ont.term(anc).unwrap();
                assert!(anc.descendants().unwrap().contains(&term.id()));
            }
            for desc in term.descendants().unwrap() {
                let desc = ont.term(desc).unwrap();
                assert!(desc.ancestors().unwrap().contains(&term.id()));
            }
        }
    }

    #[test]
    fn dangling_parent() {
        let mut builder = Builder::new();
        builder.add_term(1u32, "orphan", Domain::BiologicalProcess, &ids(&[99]), &[]);
        let err = builder.terms_complete().connect_all_terms().err().unwrap();
        assert_eq!(
            err,
            GoError::DanglingReference {
                term: 1u32.into(),
                target: 99u32.into()
            }
        );
    }

    #[test]
    fn dangling_whole() {
        let mut builder = Builder::new();
        builder.add_term(1u32, "orphan", Domain::CellularComponent, &[], &ids(&[99]));
        assert!(builder.terms_complete().connect_all_terms().is_err());
    }

    #[test]
    fn cycle_is_an_error() {
        let mut builder = Builder::new();
        builder.add_term(1u32, "a", Domain::BiologicalProcess, &ids(&[2]), &[]);
        builder.add_term(2u32, "b", Domain::BiologicalProcess, &ids(&[1]), &[]);
        let connected = builder.terms_complete().connect_all_terms().unwrap();
        assert!(matches!(
            connected.flatten(true).err(),
            Some(GoError::CyclicRelation(_))
        ));
    }

    #[test]
    fn deep_chain() {
        // every term is_a the previous one; deeper than the call stack allows for recursion
        let depth = 3_000u32;
        let handle = std::thread::Builder::new()
            .stack_size(128 * 1024)
            .spawn(move || {
                let mut builder = Builder::new();
                builder.add_term(1u32, "t1", Domain::BiologicalProcess, &[], &[]);
                for id in 2..=depth {
                    let name = format!("t{id}");
                    builder.add_term(id, &name, Domain::BiologicalProcess, &ids(&[id - 1]), &[]);
                }
                let ont = builder
                    .terms_complete()
                    .connect_all_terms()
                    .unwrap()
                    .flatten(true)
                    .unwrap()
                    .build();
                let leaf = ont.get(depth.into()).unwrap();
                let root = ont.get(1u32.into()).unwrap();
                (
                    leaf.ancestors().unwrap().len(),
                    root.descendants().unwrap().len(),
                )
            })
            .unwrap();
        let (ancestors, descendants) = handle.join().unwrap();
        assert_eq!(ancestors, depth as usize - 1);
        assert_eq!(descendants, depth as usize - 1);
    }

    #[test]
    fn unflattened_keeps_part_of_flag() {
        let ont = diamond().closure_includes_part_of(false).build();
        assert!(!ont.is_flattened());
        assert!(!ont.closure_includes_part_of());
        assert!(diamond().build().closure_includes_part_of());
    }

    #[test]
    fn wide_diamond_lattice() {
        // 30 layers of 4 terms, every term is_a every term of the layer above.
        // A closure without memoisation would need 4^30 steps.
        let mut builder = Builder::new();
        builder.add_term(0u32, "root", Domain::BiologicalProcess, &[], &[]);
        let mut above = ids(&[0]);
        for layer in 0..30u32 {
            let current: Vec<GoTermId> = (0..4u32)
                .map(|i| GoTermId::from(1 + layer * 4 + i))
                .collect();
            for id in &current {
                builder.add_term(*id, "node", Domain::BiologicalProcess, &above, &[]);
            }
            above = current;
        }
        let ont = builder
            .terms_complete()
            .connect_all_terms()
            .unwrap()
            .flatten(true)
            .unwrap()
            .build();
        assert_eq!(ont.len(), 121);
        let bottom = ont.term(120u32).unwrap();
        assert_eq!(bottom.ancestors().unwrap().len(), 117);
        assert_eq!(ont.term(0u32).unwrap().descendants().unwrap().len(), 120);
    }

    #[test]
    fn name_index_last_writer_wins() {
        let mut builder = Builder::new();
        builder.add_term(1u32, "same", Domain::BiologicalProcess, &[], &[]);
        builder.add_term(2u32, "same", Domain::BiologicalProcess, &[], &[]);
        let ont = builder.terms_complete().connect_all_terms().unwrap().build();
        assert_eq!(ont.term_by_name("same").unwrap().id(), GoTermId::from(2u32));
    }
}
