use std::fmt::Display;

use smallvec::SmallVec;

use crate::annotations::EvidenceCode;
use crate::{GoError, GoResult, GoTerm, GoTermId, Ontology};

/// One association between a gene and a GO term
///
/// The annotation holds the [`GoTermId`] of the term, not the term itself.
/// Use [`Annotation::term`] to look it up in the [`Ontology`].
/// Equality and hashing include every field.
///
/// # Examples
///
/// ```
/// use geneontology::{Annotation, GoTermId};
///
/// let annotation = Annotation::new("TP53", GoTermId::from(6915u32), "IDA")
///     .unwrap()
///     .with_db_ref(["PMID:1", "PMID:2"]);
///
/// assert_eq!(annotation.gene(), "TP53");
/// assert_eq!(annotation.evidence().as_str(), "IDA");
/// assert_eq!(
///     annotation.to_string(),
///     "Annotation of gene 'TP53' with GO term 'GO:0006915' (IDA, reference: PMID:1|PMID:2)"
/// );
///
/// assert!(Annotation::new("", GoTermId::from(6915u32), "IDA").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Annotation {
    gene: String,
    term: GoTermId,
    evidence: EvidenceCode,
    db_id: Option<String>,
    db_ref: SmallVec<[String; 2]>,
    with_from: SmallVec<[String; 2]>,
}

impl Annotation {
    /// Constructs a new `Annotation` without references
    ///
    /// # Errors
    ///
    /// [`GoError::InvalidInput`] if the gene or the evidence code is empty
    pub fn new(gene: &str, term: GoTermId, evidence: &str) -> GoResult<Self> {
        if gene.is_empty() {
            return Err(GoError::InvalidInput(
                "annotation requires a gene".to_string(),
            ));
        }
        Ok(Self {
            gene: gene.to_string(),
            term,
            evidence: EvidenceCode::try_from(evidence)?,
            db_id: None,
            db_ref: SmallVec::new(),
            with_from: SmallVec::new(),
        })
    }

    /// Sets the database object ID
    #[must_use]
    pub fn with_db_id(mut self, db_id: &str) -> Self {
        self.db_id = Some(db_id.to_string());
        self
    }

    /// Sets the references, e.g. `PMID:2676709`
    #[must_use]
    pub fn with_db_ref<I, S>(mut self, db_ref: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.db_ref = db_ref.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the supporting identifiers of the *with / from* column
    #[must_use]
    pub fn with_with_from<I, S>(mut self, with_from: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_from = with_from.into_iter().map(Into::into).collect();
        self
    }

    /// The gene symbol
    pub fn gene(&self) -> &str {
        &self.gene
    }

    /// The ID of the annotated term
    pub fn term_id(&self) -> GoTermId {
        self.term
    }

    /// Returns the annotated [`GoTerm`], if it is part of `ontology`
    pub fn term<'a>(&self, ontology: &'a Ontology) -> Option<GoTerm<'a>> {
        ontology.term(self.term)
    }

    /// The evidence code
    pub fn evidence(&self) -> &EvidenceCode {
        &self.evidence
    }

    /// The database object ID, e.g. a UniProt accession
    pub fn db_id(&self) -> Option<&str> {
        self.db_id.as_deref()
    }

    /// The references of the annotation
    pub fn db_ref(&self) -> &[String] {
        &self.db_ref
    }

    /// The supporting identifiers of the *with / from* column
    pub fn with_from(&self) -> &[String] {
        &self.with_from
    }

    /// Returns a human readable description, including the formatted term
    ///
    /// If the term is not part of `ontology`, only its ID is shown.
    pub fn pretty_format(&self, ontology: &Ontology) -> String {
        let term = self.term(ontology).map_or_else(
            || self.term.to_string(),
            |term| term.pretty_format(false, None, true),
        );
        self.format_with(&term)
    }

    fn format_with(&self, term: &str) -> String {
        format!(
            "Annotation of gene '{}' with GO term '{}' ({}, reference: {})",
            self.gene,
            term,
            self.evidence,
            self.db_ref.join("|")
        )
    }
}

impl Display for Annotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.format_with(&self.term.to_string()))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::OboOptions;

    fn annotation() -> Annotation {
        Annotation::new("TP53", GoTermId::from(6915u32), "IDA")
            .unwrap()
            .with_db_id("P04637")
            .with_db_ref(["PMID:1"])
            .with_with_from(["UniProtKB:Q00987", "UniProtKB:Q00988"])
    }

    #[test]
    fn fields() {
        let annotation = annotation();
        assert_eq!(annotation.db_id(), Some("P04637"));
        assert_eq!(annotation.db_ref(), ["PMID:1".to_string()]);
        assert_eq!(annotation.with_from().len(), 2);
        assert_eq!(annotation.term_id(), GoTermId::from(6915u32));
    }

    #[test]
    fn structural_equality() {
        assert_eq!(annotation(), annotation());
        assert_ne!(annotation(), annotation().with_db_ref(["PMID:2"]));
        assert_ne!(annotation(), annotation().with_with_from(Vec::<String>::new()));
    }

    #[test]
    fn invalid() {
        assert!(Annotation::new("TP53", GoTermId::from(1u32), "").is_err());
        assert!(Annotation::new("", GoTermId::from(1u32), "IDA").is_err());
    }

    #[test]
    fn pretty_format() {
        let obo = "[Term]\nid: GO:0006915\nname: apoptotic process\nnamespace: biological_process\n";
        let ontology = Ontology::from_obo(obo.as_bytes(), &OboOptions::default()).unwrap();
        assert_eq!(
            annotation().pretty_format(&ontology),
            "Annotation of gene 'TP53' with GO term 'BP: apoptotic process (GO:0006915)' (IDA, reference: PMID:1)"
        );
        let unknown = Annotation::new("TP53", GoTermId::from(1u32), "IDA").unwrap();
        assert_eq!(
            unknown.pretty_format(&ontology),
            "Annotation of gene 'TP53' with GO term 'GO:0000001' (IDA, reference: )"
        );
    }
}
