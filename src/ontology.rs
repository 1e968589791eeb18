use core::fmt::Debug;
use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, warn};

use crate::parser;
use crate::parser::binary::{push_section, push_str, Cursor};
use crate::term::internal::GoTermInternal;
use crate::term::{GoTerm, GoTermId};
use crate::{GoError, GoResult};

pub mod builder;
mod termarena;
pub use builder::Builder;
use termarena::Arena;

/// Options for parsing an OBO file into an [`Ontology`]
///
/// # Examples
///
/// ```
/// use geneontology::OboOptions;
///
/// let options = OboOptions::default().part_of_cc_only(true);
/// assert!(options.flatten);
/// assert!(options.part_of_cc_only);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OboOptions {
    /// Compute ancestors and descendants of every term
    pub flatten: bool,
    /// Only record `part_of` relations of cellular component terms
    pub part_of_cc_only: bool,
    /// Follow `part_of` relations (and their inverse) when flattening
    pub closure_includes_part_of: bool,
}

impl Default for OboOptions {
    fn default() -> Self {
        Self {
            flatten: true,
            part_of_cc_only: false,
            closure_includes_part_of: true,
        }
    }
}

impl OboOptions {
    /// Sets whether ancestors and descendants are computed
    #[must_use]
    pub fn flatten(mut self, flatten: bool) -> Self {
        self.flatten = flatten;
        self
    }

    /// Sets whether `part_of` relations are restricted to cellular components
    #[must_use]
    pub fn part_of_cc_only(mut self, part_of_cc_only: bool) -> Self {
        self.part_of_cc_only = part_of_cc_only;
        self
    }

    /// Sets whether `part_of` relations are followed during flattening
    #[must_use]
    pub fn closure_includes_part_of(mut self, include: bool) -> Self {
        self.closure_includes_part_of = include;
        self
    }
}

#[cfg_attr(doc, aquamarine::aquamarine)]
/// `Ontology` holds all [`GoTerm`]s and their relations
///
/// An `Ontology` is immutable once built. Parsing a new OBO file
/// creates a new `Ontology` instead of changing an existing one.
///
/// # Examples
///
/// ```
/// use geneontology::{GoTermId, OboOptions, Ontology};
///
/// let obo = "[Term]
/// id: GO:0005575
/// name: cellular_component
/// namespace: cellular_component
/// synonym: \"cell or subcellular entity\" EXACT []
///
/// [Term]
/// id: GO:0005634
/// name: nucleus
/// namespace: cellular_component
/// alt_id: GO:0005636
/// is_a: GO:0005575 ! cellular_component
/// ";
/// let ontology = Ontology::from_obo(obo.as_bytes(), &OboOptions::default()).unwrap();
/// assert_eq!(ontology.len(), 2);
///
/// let nucleus = ontology.term_by_id("GO:0005634").unwrap();
/// assert_eq!(nucleus.name(), "nucleus");
/// assert_eq!(ontology.term_by_alt_id("GO:0005636").unwrap(), nucleus);
///
/// let root = ontology.term_by_name("cell or subcellular entity").unwrap();
/// assert!(root.ancestor_of(&nucleus).unwrap());
///
/// for term in &ontology {
///     println!("{}", term.pretty_format(false, None, true));
/// }
/// ```
///
/// # Layout
///
/// Every term belongs to one of the three domains. Terms are connected via
/// `is_a` (child to parent) and `part_of` (part to whole) relations.
/// After flattening, each term also knows all its ancestors and descendants.
///
/// ```mermaid
/// erDiagram
///     ONTOLOGY ||--|{ GOTERM : contains
///     GOTERM ||--o{ GOTERM : is_a
///     GOTERM ||--o{ GOTERM : part_of
///     GOTERM {
///         GoTermId id
///         str name
///         Domain domain
///         TermGroup is_a
///         TermGroup part_of
///         TermGroup children
///         TermGroup parts
///         TermGroup ancestors
///         TermGroup descendants
///     }
/// ```
///
/// # Relations of the public structs
///
/// ```mermaid
/// classDiagram
///     class Ontology {
///         term() GoTerm
///         terms() Iter
///     }
///
///     class GoTerm {
///         - GoTermId id
///         - &Ontology
///         is_a() TermGroup
///         children() TermGroup
///         ancestors() TermGroup
///         descendants() TermGroup
///     }
///
///     class TermGroup {
///         - Vec~GoTermId~
///         iter() TermIds
///         terms() GoTerm
///     }
///
///     Ontology ..|> `ontology::Iter`: terms()
///     `ontology::Iter` --* GoTerm: iterates()
///     GoTerm ..|> TermGroup: ancestors()
///     TermGroup ..|> GoTerm: terms()
/// ```
pub struct Ontology {
    terms: Arena,
    names: HashMap<String, GoTermId>,
    synonyms: HashMap<String, GoTermId>,
    alt_ids: HashMap<GoTermId, GoTermId>,
    flattened: bool,
    closure_includes_part_of: bool,
}

impl Debug for Ontology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ontology with {} terms", self.terms.len())
    }
}

/// Public API of the Ontology
impl Ontology {
    /// Parses an OBO file from a reader
    ///
    /// # Errors
    ///
    /// - [`GoError::InvalidInput`] if a `[Term]` stanza is missing its
    ///   `id`, `name` or `namespace` or the reader fails
    /// - [`GoError::DanglingReference`] if a relation targets an unknown term
    /// - [`GoError::CyclicRelation`] if flattening finds a cycle
    pub fn from_obo<R: std::io::BufRead>(reader: R, options: &OboOptions) -> GoResult<Self> {
        parser::go_obo::read_obo(reader, options)
    }

    /// Parses a (possibly gzip-compressed) OBO file
    ///
    /// # Errors
    ///
    /// [`GoError::CannotOpenFile`] if the file cannot be read, plus all
    /// errors of [`Ontology::from_obo`]
    pub fn from_obo_file<P: AsRef<Path>>(path: P, options: &OboOptions) -> GoResult<Self> {
        let reader = crate::utils::open_reader(path)?;
        Self::from_obo(reader, options)
    }

    /// Returns the number of terms in the ontology
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns `true` if the ontology contains no terms
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns `true` if ancestors and descendants were computed
    pub fn is_flattened(&self) -> bool {
        self.flattened
    }

    /// Returns `true` if the ancestors and descendants follow `part_of`
    /// relations as well
    pub fn closure_includes_part_of(&self) -> bool {
        self.closure_includes_part_of
    }

    /// Returns `true` if a term with the ID exists
    pub fn contains<I: Into<GoTermId>>(&self, term_id: I) -> bool {
        self.terms.contains(term_id.into())
    }

    /// Returns the [`GoTerm`] of the provided [`GoTermId`]
    ///
    /// If no such term is present in the Ontology, `None` is returned
    ///
    /// # Examples
    ///
    /// ```
    /// use geneontology::{OboOptions, Ontology};
    ///
    /// let obo = "[Term]\nid: GO:0003674\nname: molecular_function\nnamespace: molecular_function\n";
    /// let ontology = Ontology::from_obo(obo.as_bytes(), &OboOptions::default()).unwrap();
    ///
    /// assert_eq!(ontology.term(3674u32).unwrap().name(), "molecular_function");
    /// assert!(ontology.term(1u32).is_none());
    /// ```
    pub fn term<I: Into<GoTermId>>(&self, term_id: I) -> Option<GoTerm<'_>> {
        self.get(term_id.into()).map(|term| GoTerm::new(self, term))
    }

    /// Returns the [`GoTerm`] of an ID like `GO:0008150`
    ///
    /// # Errors
    ///
    /// [`GoError::TermNotFound`] if the ID is invalid or unknown
    pub fn term_by_id(&self, id: &str) -> GoResult<GoTerm<'_>> {
        let term_id =
            GoTermId::try_from(id).map_err(|_| GoError::TermNotFound(id.to_string()))?;
        GoTerm::try_new(self, term_id)
    }

    /// Returns the [`GoTerm`] of an accession number, e.g. `8150`
    ///
    /// # Errors
    ///
    /// [`GoError::TermNotFound`] if no term has this accession
    pub fn term_by_acc(&self, acc: u32) -> GoResult<GoTerm<'_>> {
        GoTerm::try_new(self, GoTermId::from(acc))
    }

    /// Returns the [`GoTerm`] with the given name
    ///
    /// Exact names are searched first, exact synonyms second.
    ///
    /// # Errors
    ///
    /// [`GoError::TermNotFound`] if neither a name nor a synonym matches
    pub fn term_by_name(&self, name: &str) -> GoResult<GoTerm<'_>> {
        if let Some(id) = self.names.get(name) {
            return GoTerm::try_new(self, *id);
        }
        if let Some(id) = self.synonyms.get(name) {
            warn!("Resolved term name '{}' via synonym to {}", name, id);
            return GoTerm::try_new(self, *id);
        }
        Err(GoError::TermNotFound(name.to_string()))
    }

    /// Returns the [`GoTerm`] for an alternative ID
    ///
    /// # Errors
    ///
    /// [`GoError::TermNotFound`] if the ID is not a known alternative ID
    pub fn term_by_alt_id(&self, alt_id: &str) -> GoResult<GoTerm<'_>> {
        GoTermId::try_from(alt_id)
            .ok()
            .and_then(|alt| self.alt_ids.get(&alt))
            .ok_or_else(|| GoError::TermNotFound(alt_id.to_string()))
            .and_then(|id| GoTerm::try_new(self, *id))
    }

    /// Returns an iterator over all [`GoTerm`]s in parsing order
    pub fn terms(&self) -> Iter<'_> {
        self.into_iter()
    }

    /// Returns a binary representation of the ontology
    ///
    /// The binary data is separated into sections, each prefixed with
    /// its length as big-endian `u32`:
    ///
    /// - Flags (1 byte: flattened, closure follows `part_of`)
    /// - Terms (see `GoTermInternal::as_bytes`)
    /// - Name index
    /// - Synonym index
    /// - Alternative IDs
    ///
    /// Ancestors and descendants are not stored, but recomputed when
    /// the ontology is loaded with [`Ontology::from_bytes`].
    ///
    /// # Panics
    ///
    /// Panics when the length of any section is larger than `u32::MAX`
    pub fn as_bytes(&self) -> Vec<u8> {
        let mut res = Vec::new();

        let mut flags = 0u8;
        if self.flattened {
            flags |= 0b01;
        }
        if self.closure_includes_part_of {
            flags |= 0b10;
        }
        res.push(flags);

        let mut buffer = Vec::new();
        for term in self.terms.values() {
            buffer.append(&mut term.as_bytes());
        }
        push_section(&mut res, &buffer);

        push_section(&mut res, &index_as_bytes(&self.names));
        push_section(&mut res, &index_as_bytes(&self.synonyms));

        buffer.clear();
        let mut alt_ids: Vec<(&GoTermId, &GoTermId)> = self.alt_ids.iter().collect();
        alt_ids.sort_unstable();
        for (alt, id) in alt_ids {
            buffer.extend_from_slice(&alt.to_be_bytes());
            buffer.extend_from_slice(&id.to_be_bytes());
        }
        push_section(&mut res, &buffer);

        res
    }

    /// Builds an ontology from its binary representation
    ///
    /// See [`Ontology::as_bytes`] for the layout.
    ///
    /// # Errors
    ///
    /// [`GoError::ParseBinaryError`] if the data is truncated or malformed,
    /// plus the errors of connecting and flattening the terms
    pub fn from_bytes(bytes: &[u8]) -> GoResult<Self> {
        let mut cursor = Cursor::new(bytes);
        let ontology = Self::from_cursor(&mut cursor)?;
        if cursor.is_empty() {
            Ok(ontology)
        } else {
            Err(GoError::ParseBinaryError)
        }
    }
}

/// Crate-only functions
impl Ontology {
    pub(crate) fn get(&self, term_id: GoTermId) -> Option<&GoTermInternal> {
        self.terms.get(term_id)
    }

    pub(crate) fn from_cursor(cursor: &mut Cursor) -> GoResult<Self> {
        let flags = cursor.u8()?;
        let flattened = flags & 0b01 != 0;
        let include_part_of = flags & 0b10 != 0;

        let mut builder = Builder::new();

        let mut terms = cursor.section()?;
        while !terms.is_empty() {
            builder.insert_term(parser::binary::term::from_cursor(&mut terms)?);
        }

        let mut names = cursor.section()?;
        while !names.is_empty() {
            let name = names.str()?;
            builder.add_name(name, GoTermId::from(names.u32()?));
        }

        let mut synonyms = cursor.section()?;
        while !synonyms.is_empty() {
            let synonym = synonyms.str()?;
            builder.add_synonym(synonym, synonyms.u32()?);
        }

        let mut alt_ids = cursor.section()?;
        while !alt_ids.is_empty() {
            let alt = alt_ids.u32()?;
            builder.add_alt_id(alt, alt_ids.u32()?);
        }

        let connected = builder.terms_complete().connect_all_terms()?;
        debug!("Restored {} terms from bytes", connected.len());
        if flattened {
            Ok(connected.flatten(include_part_of)?.build())
        } else {
            Ok(connected.closure_includes_part_of(include_part_of).build())
        }
    }
}

fn index_as_bytes(index: &HashMap<String, GoTermId>) -> Vec<u8> {
    let mut entries: Vec<(&String, &GoTermId)> = index.iter().collect();
    entries.sort_unstable();
    let mut buffer = Vec::new();
    for (key, id) in entries {
        push_str(&mut buffer, key);
        buffer.extend_from_slice(&id.to_be_bytes());
    }
    buffer
}

/// Iterates the Ontology and yields [`GoTerm`]s
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, GoTermInternal>,
    ontology: &'a Ontology,
}

impl<'a> std::iter::Iterator for Iter<'a> {
    type Item = GoTerm<'a>;
    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|term| GoTerm::new(self.ontology, term))
    }
}

impl<'a> IntoIterator for &'a Ontology {
    type Item = GoTerm<'a>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            inner: self.terms.values(),
            ontology: self,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::TermGroup;

    const ABC: &str = "[Term]
id: GO:0000001
name: A
namespace: biological_process
synonym: \"alpha\" EXACT []
synonym: \"first\" RELATED []

[Term]
id: GO:0000002
name: B
namespace: biological_process
alt_id: GO:0000012
is_a: GO:0000001 ! A

[Term]
id: GO:0000003
name: C
namespace: biological_process
is_a: GO:0000002 ! B
";

    fn group(ids: &[u32]) -> TermGroup {
        ids.iter().map(|id| GoTermId::from(*id)).collect()
    }

    fn abc() -> Ontology {
        Ontology::from_obo(ABC.as_bytes(), &OboOptions::default()).unwrap()
    }

    #[test]
    fn chain_closures() {
        let ont = abc();
        assert_eq!(ont.term(3u32).unwrap().ancestors().unwrap(), &group(&[1, 2]));
        assert_eq!(ont.term(1u32).unwrap().descendants().unwrap(), &group(&[2, 3]));
        assert_eq!(ont.term(2u32).unwrap().children(), &group(&[3]));
    }

    #[test]
    fn lookups() {
        let ont = abc();
        assert_eq!(ont.term_by_id("GO:0000002").unwrap().name(), "B");
        assert_eq!(ont.term_by_acc(3).unwrap().name(), "C");
        assert_eq!(ont.term_by_alt_id("GO:0000012").unwrap().name(), "B");
        assert!(ont.term_by_alt_id("GO:0000002").is_err());
        assert_eq!(
            ont.term_by_id("GO:0000099"),
            Err(GoError::TermNotFound("GO:0000099".to_string()))
        );
        assert!(ont.term_by_id("nonsense").is_err());
    }

    #[test]
    fn name_then_synonym() {
        let ont = abc();
        assert_eq!(ont.term_by_name("A").unwrap().acc(), 1);
        assert_eq!(ont.term_by_name("alpha").unwrap().acc(), 1);
        // only EXACT synonyms are indexed
        assert!(matches!(
            ont.term_by_name("first"),
            Err(GoError::TermNotFound(_))
        ));
    }

    #[test]
    fn parsing_twice_is_identical() {
        let first = abc();
        let second = abc();
        assert_eq!(first.len(), second.len());
        for (a, b) in first.terms().zip(second.terms()) {
            assert_eq!(a.id(), b.id());
            assert_eq!(a.is_a(), b.is_a());
            assert_eq!(a.children(), b.children());
            assert_eq!(a.ancestors(), b.ancestors());
            assert_eq!(a.descendants(), b.descendants());
        }
    }

    #[test]
    fn not_flattened() {
        let ont = Ontology::from_obo(ABC.as_bytes(), &OboOptions::default().flatten(false)).unwrap();
        assert!(!ont.is_flattened());
        assert_eq!(ont.term(3u32).unwrap().ancestors(), Err(GoError::NotFlattened));
        assert_eq!(ont.term(2u32).unwrap().children(), &group(&[3]));
    }

    #[test]
    fn iterate_in_parsing_order() {
        let ont = abc();
        let ids: Vec<u32> = ont.terms().map(|term| term.acc()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn binary_round_trip() {
        let ont = abc();
        let restored = Ontology::from_bytes(&ont.as_bytes()).unwrap();
        assert_eq!(restored.len(), 3);
        assert!(restored.is_flattened());
        assert!(restored.closure_includes_part_of());
        assert_eq!(restored.term_by_name("alpha").unwrap().acc(), 1);
        assert_eq!(restored.term_by_alt_id("GO:0000012").unwrap().acc(), 2);
        for (a, b) in ont.terms().zip(restored.terms()) {
            assert_eq!(a.name(), b.name());
            assert_eq!(a.domain(), b.domain());
            assert_eq!(a.ancestors(), b.ancestors());
            assert_eq!(a.descendants(), b.descendants());
        }
    }

    #[test]
    fn truncated_bytes() {
        let bytes = abc().as_bytes();
        assert_eq!(
            Ontology::from_bytes(&bytes[..bytes.len() - 3]).err(),
            Some(GoError::ParseBinaryError)
        );
    }
}
