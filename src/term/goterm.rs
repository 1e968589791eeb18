use std::fmt::Display;
use std::hash::Hash;

use crate::term::internal::GoTermInternal;
use crate::term::{Domain, GoTermId, TermGroup, ABBREVIATIONS};
use crate::{GoError, GoResult, Ontology, ID_PREFIX};

/// A single term of the Gene Ontology
///
/// The term is a cheap, borrowed view into the [`Ontology`]. Two terms
/// are equal if their [`GoTermId`]s are equal.
#[derive(Debug, Clone, Copy)]
pub struct GoTerm<'a> {
    term: &'a GoTermInternal,
    ontology: &'a Ontology,
}

impl<'a> GoTerm<'a> {
    /// Constructs a new [`GoTerm`]
    ///
    /// # Errors
    ///
    /// If the given [`GoTermId`] does not match an existing term
    /// it returns [`GoError::TermNotFound`]
    pub fn try_new(ontology: &'a Ontology, term_id: GoTermId) -> GoResult<GoTerm<'a>> {
        let term = ontology
            .get(term_id)
            .ok_or_else(|| GoError::TermNotFound(term_id.to_string()))?;
        Ok(GoTerm::new(ontology, term))
    }

    pub(crate) fn new(ontology: &'a Ontology, term: &'a GoTermInternal) -> GoTerm<'a> {
        GoTerm { term, ontology }
    }

    /// Returns the [`GoTermId`] of the term
    ///
    /// e.g.: `GO:0008150`
    pub fn id(&self) -> GoTermId {
        *self.term.id()
    }

    /// Returns the accession number of the term, e.g. `8150`
    pub fn acc(&self) -> u32 {
        self.term.id().as_u32()
    }

    /// Returns the name of the term
    ///
    /// e.g.: `biological_process`
    pub fn name(&self) -> &'a str {
        self.term.name()
    }

    /// Returns the [`Domain`] (namespace) of the term
    pub fn domain(&self) -> Domain {
        self.term.domain()
    }

    /// Returns the abbreviated namespace, e.g. `BP`
    pub fn domain_short(&self) -> &'static str {
        self.term.domain().short()
    }

    /// Returns the definition of the term, if present
    pub fn definition(&self) -> Option<&'a str> {
        self.term.definition()
    }

    /// Returns the direct `is_a` parents
    pub fn is_a(&self) -> &'a TermGroup {
        self.term.is_a()
    }

    /// Returns the direct `part_of` wholes
    pub fn part_of(&self) -> &'a TermGroup {
        self.term.part_of()
    }

    /// Returns the direct children (inverse of `is_a`)
    pub fn children(&self) -> &'a TermGroup {
        self.term.children()
    }

    /// Returns the direct parts (inverse of `part_of`)
    pub fn parts(&self) -> &'a TermGroup {
        self.term.parts()
    }

    /// Returns all direct and indirect ancestors
    ///
    /// # Errors
    ///
    /// [`GoError::NotFlattened`] if the ontology was built without flattening
    pub fn ancestors(&self) -> GoResult<&'a TermGroup> {
        self.term.ancestors().ok_or(GoError::NotFlattened)
    }

    /// Returns all direct and indirect descendants
    ///
    /// # Errors
    ///
    /// [`GoError::NotFlattened`] if the ontology was built without flattening
    pub fn descendants(&self) -> GoResult<&'a TermGroup> {
        self.term.descendants().ok_or(GoError::NotFlattened)
    }

    /// Returns an iterator of the direct `is_a` parent terms
    pub fn parents(&self) -> impl Iterator<Item = GoTerm<'a>> + 'a {
        self.term.is_a().terms(self.ontology)
    }

    /// Returns `true` if `self` is a direct or indirect ancestor of `other`
    ///
    /// # Errors
    ///
    /// [`GoError::NotFlattened`] if the ontology was built without flattening
    pub fn ancestor_of(&self, other: &GoTerm) -> GoResult<bool> {
        Ok(self.descendants()?.contains(&other.id()))
    }

    /// Returns `true` if `self` is a direct or indirect descendant of `other`
    ///
    /// # Errors
    ///
    /// [`GoError::NotFlattened`] if the ontology was built without flattening
    pub fn descendant_of(&self, other: &GoTerm) -> GoResult<bool> {
        Ok(self.ancestors()?.contains(&other.id()))
    }

    /// Returns a formatted display string
    ///
    /// The output is `<namespace>: <name> (<id>)`, or `<namespace>: <name>`
    /// if `omit_acc` is set. With `abbreviate`, common phrases like
    /// `positive ` are shortened (see [`ABBREVIATIONS`]). Names longer than
    /// `max_name_length` (if at least 3) are truncated and end in `...`.
    ///
    /// # Examples
    ///
    /// ```
    /// use geneontology::{Ontology, OboOptions};
    ///
    /// let obo = "[Term]
    /// id: GO:0008284
    /// name: positive regulation of cell population proliferation
    /// namespace: biological_process
    /// ";
    /// let ontology = Ontology::from_obo(obo.as_bytes(), &OboOptions::default()).unwrap();
    /// let term = ontology.term(8284u32).unwrap();
    ///
    /// assert_eq!(
    ///     term.pretty_format(false, None, true),
    ///     "BP: pos. regulation of cell population prolif. (GO:0008284)"
    /// );
    /// assert_eq!(
    ///     term.pretty_format(true, Some(20), true),
    ///     "BP: pos. regulation o..."
    /// );
    /// ```
    pub fn pretty_format(
        &self,
        omit_acc: bool,
        max_name_length: Option<usize>,
        abbreviate: bool,
    ) -> String {
        let mut name = self.name().to_string();
        if abbreviate {
            for (long, short) in ABBREVIATIONS {
                name = name.replace(long, short);
            }
        }
        if let Some(max_len) = max_name_length {
            if max_len >= 3 && name.chars().count() > max_len {
                name = name.chars().take(max_len - 3).collect::<String>() + "...";
            }
        }
        if omit_acc {
            format!("{}: {}", self.domain_short(), name)
        } else {
            format!("{}: {} ({})", self.domain_short(), name, self.id())
        }
    }

    /// Returns `(id, "GO", namespace abbreviation, name)`
    pub fn tuple(&self) -> (String, &'static str, &'static str, &'a str) {
        (
            self.id().to_string(),
            ID_PREFIX,
            self.domain_short(),
            self.name(),
        )
    }
}

impl PartialEq for GoTerm<'_> {
    fn eq(&self, other: &GoTerm) -> bool {
        self.term.id() == other.term.id()
    }
}

impl Eq for GoTerm<'_> {}

impl Hash for GoTerm<'_> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.term.id().hash(state);
    }
}

impl Display for GoTerm<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<GoTerm: {}>", self.pretty_format(false, None, true))
    }
}

#[cfg(test)]
mod test {
    use crate::{Domain, OboOptions, Ontology};

    const OBO: &str = "[Term]
id: GO:0000001
name: negative regulation of interferon-gamma signaling
namespace: biological_process
def: \"A process that stops \\\"signaling\\\".\" [GOC:test]

[Term]
id: GO:0000002
name: nucleus
namespace: cellular_component
";

    fn ontology() -> Ontology {
        Ontology::from_obo(OBO.as_bytes(), &OboOptions::default()).unwrap()
    }

    #[test]
    fn accessors() {
        let ont = ontology();
        let term = ont.term(1u32).unwrap();
        assert_eq!(term.acc(), 1);
        assert_eq!(term.domain(), Domain::BiologicalProcess);
        assert_eq!(term.definition(), Some("A process that stops \"signaling\"."));
        assert_eq!(ont.term(2u32).unwrap().definition(), None);
    }

    #[test]
    fn abbreviations_in_order() {
        let ont = ontology();
        let term = ont.term(1u32).unwrap();
        assert_eq!(
            term.pretty_format(true, None, true),
            "BP: neg. regulation of IFN-gamma signal."
        );
        assert_eq!(
            term.pretty_format(true, None, false),
            "BP: negative regulation of interferon-gamma signaling"
        );
    }

    #[test]
    fn truncation() {
        let ont = ontology();
        let term = ont.term(2u32).unwrap();
        // "nucleus" has 7 characters
        assert_eq!(term.pretty_format(true, Some(7), true), "CC: nucleus");
        assert_eq!(term.pretty_format(true, Some(6), true), "CC: nuc...");
        // lengths below 3 disable truncation
        assert_eq!(term.pretty_format(true, Some(2), true), "CC: nucleus");
    }

    #[test]
    fn tuple_and_display() {
        let ont = ontology();
        let term = ont.term(2u32).unwrap();
        assert_eq!(
            term.tuple(),
            ("GO:0000002".to_string(), "GO", "CC", "nucleus")
        );
        assert_eq!(term.to_string(), "<GoTerm: CC: nucleus (GO:0000002)>");
    }

    #[test]
    fn equality() {
        let ont = ontology();
        assert_eq!(ont.term(1u32).unwrap(), ont.term(1u32).unwrap());
        assert_ne!(ont.term(1u32).unwrap(), ont.term(2u32).unwrap());
    }
}
