use std::collections::BTreeSet;
use std::io::BufRead;
use std::path::Path;

use tracing::{debug, info};

use crate::parser::binary::{self, push_section, Cursor};
use crate::term::GroupCombine;
use crate::{utils, AnnotationFilter, AnnotationIndex, GeneSetCollection, GeneUniverse};
use crate::{GoError, GoResult, GoTerm, GoTermId, IngestReport, OboOptions, Ontology};

/// The Gene Ontology together with its gene annotations
///
/// `GeneOntology` owns the [`Ontology`] graph and the [`AnnotationIndex`]
/// built on top of it. The ontology must be parsed before annotations
/// can be added. Parsing a new ontology discards all annotations, parsing
/// new annotations replaces the previous ones.
///
/// # Examples
///
/// ```
/// use geneontology::{AnnotationFilter, GeneOntology, GeneUniverse, GoError, OboOptions};
///
/// let mut go = GeneOntology::default();
/// assert_eq!(
///     go.parse_annotations("".as_bytes(), GeneUniverse::default(), &AnnotationFilter::default())
///         .unwrap_err(),
///     GoError::OntologyNotLoaded
/// );
///
/// let obo = "[Term]\nid: GO:0005634\nname: nucleus\nnamespace: cellular_component\n";
/// go.parse_ontology(obo.as_bytes(), &OboOptions::default()).unwrap();
/// assert_eq!(go.get_term_by_name("nucleus").unwrap().id().as_u32(), 5634);
/// ```
#[derive(Debug, Default)]
pub struct GeneOntology {
    ontology: Option<Ontology>,
    annotations: AnnotationIndex,
}

impl GeneOntology {
    /// Parses the ontology from OBO data and discards all previous state
    ///
    /// # Errors
    ///
    /// See [`Ontology::from_obo`]. On error, the `GeneOntology` is left
    /// without an ontology.
    pub fn parse_ontology<R: BufRead>(&mut self, reader: R, options: &OboOptions) -> GoResult<()> {
        self.ontology = None;
        self.annotations = AnnotationIndex::default();
        self.ontology = Some(Ontology::from_obo(reader, options)?);
        Ok(())
    }

    /// Parses the ontology from a plain or gzip-compressed OBO file
    ///
    /// # Errors
    ///
    /// [`GoError::CannotOpenFile`] and all errors of [`GeneOntology::parse_ontology`]
    pub fn parse_ontology_file<P: AsRef<Path>>(
        &mut self,
        path: P,
        options: &OboOptions,
    ) -> GoResult<()> {
        self.parse_ontology(utils::open_reader(path)?, options)
    }

    /// Parses gene annotations from GAF data and replaces all previous
    /// annotations
    ///
    /// # Errors
    ///
    /// - [`GoError::OntologyNotLoaded`] if no ontology was parsed before
    /// - all errors of [`AnnotationIndex::from_gaf`]
    pub fn parse_annotations<R: BufRead>(
        &mut self,
        reader: R,
        universe: GeneUniverse,
        filter: &AnnotationFilter,
    ) -> GoResult<IngestReport> {
        self.annotations = AnnotationIndex::default();
        let ontology = self.ontology.as_ref().ok_or(GoError::OntologyNotLoaded)?;
        let (index, report) = AnnotationIndex::from_gaf(reader, ontology, universe, filter)?;
        self.annotations = index;
        Ok(report)
    }

    /// Parses gene annotations from a plain or gzip-compressed GAF file
    ///
    /// # Errors
    ///
    /// [`GoError::CannotOpenFile`] and all errors of [`GeneOntology::parse_annotations`]
    pub fn parse_annotations_file<P: AsRef<Path>>(
        &mut self,
        path: P,
        universe: GeneUniverse,
        filter: &AnnotationFilter,
    ) -> GoResult<IngestReport> {
        let reader = utils::open_reader(path)?;
        self.parse_annotations(reader, universe, filter)
    }

    /// Returns the ontology
    ///
    /// # Errors
    ///
    /// [`GoError::OntologyNotLoaded`] if no ontology was parsed yet
    pub fn ontology(&self) -> GoResult<&Ontology> {
        self.ontology.as_ref().ok_or(GoError::OntologyNotLoaded)
    }

    /// Returns the annotation index
    pub fn annotations(&self) -> &AnnotationIndex {
        &self.annotations
    }

    /// Returns the term with the ID `GO:nnnnnnn`
    ///
    /// # Errors
    ///
    /// [`GoError::OntologyNotLoaded`] or [`GoError::TermNotFound`]
    pub fn get_term_by_id(&self, id: &str) -> GoResult<GoTerm<'_>> {
        self.ontology()?.term_by_id(id)
    }

    /// Returns the term with the numeric accession
    ///
    /// # Errors
    ///
    /// [`GoError::OntologyNotLoaded`] or [`GoError::TermNotFound`]
    pub fn get_term_by_acc(&self, acc: u32) -> GoResult<GoTerm<'_>> {
        self.ontology()?.term_by_acc(acc)
    }

    /// Returns the term with the name or exact synonym `name`
    ///
    /// # Errors
    ///
    /// [`GoError::OntologyNotLoaded`] or [`GoError::TermNotFound`]
    pub fn get_term_by_name(&self, name: &str) -> GoResult<GoTerm<'_>> {
        self.ontology()?.term_by_name(name)
    }

    /// Returns the terms a gene is annotated with
    ///
    /// # Errors
    ///
    /// - [`GoError::OntologyNotLoaded`]
    /// - [`GoError::GeneNotFound`] if the gene is not part of the universe
    /// - [`GoError::NotFlattened`] if ancestors are requested but were
    ///   never computed
    pub fn get_gene_terms(&self, gene: &str, include_ancestors: bool) -> GoResult<GroupCombine<'_>> {
        let ontology = self.ontology()?;
        let terms = self.annotations.gene_terms(ontology, gene, include_ancestors)?;
        Ok(GroupCombine::new(terms, ontology))
    }

    /// Returns the genes annotated with the term `GO:nnnnnnn`
    ///
    /// # Errors
    ///
    /// - [`GoError::OntologyNotLoaded`]
    /// - [`GoError::TermNotFound`] for invalid or unknown IDs
    /// - [`GoError::NotFlattened`] if descendants are requested but were
    ///   never computed
    pub fn get_term_genes(&self, id: &str, include_descendants: bool) -> GoResult<BTreeSet<&str>> {
        let ontology = self.ontology()?;
        let term_id =
            GoTermId::try_from(id).map_err(|_| GoError::TermNotFound(id.to_string()))?;
        self.annotations
            .term_genes(ontology, term_id, include_descendants)
    }

    /// Derives the non-redundant gene sets of all terms
    ///
    /// See [`GeneSetCollection::derive`]
    ///
    /// # Errors
    ///
    /// [`GoError::OntologyNotLoaded`] or [`GoError::NotFlattened`]
    pub fn derive_minimal_gene_sets(
        &self,
        min_size: Option<usize>,
        max_size: Option<usize>,
    ) -> GoResult<GeneSetCollection> {
        GeneSetCollection::derive(self.ontology()?, &self.annotations, min_size, max_size)
    }

    /// Returns a binary representation of the full state
    ///
    /// - Header (`GOP` and the version byte)
    /// - Ontology (see [`Ontology::as_bytes`]), empty if no ontology is loaded
    /// - Annotation index: gene universe and all annotations, empty if no
    ///   ontology is loaded
    ///
    /// Every section starts with 4 bytes to indicate its size
    /// (big-endian encoded `u32`)
    ///
    /// # Panics
    ///
    /// Panics when the length of any section is larger than `u32::MAX`
    pub fn as_bytes(&self) -> Vec<u8> {
        let mut res = binary::header();
        match &self.ontology {
            Some(ontology) => {
                push_section(&mut res, &ontology.as_bytes());
                push_section(&mut res, &self.annotations.as_bytes());
            }
            None => {
                push_section(&mut res, &[]);
                push_section(&mut res, &[]);
            }
        }
        res
    }

    /// Restores a `GeneOntology` from bytes
    ///
    /// Ancestors and descendants are recomputed.
    ///
    /// # Errors
    ///
    /// - Missing header or truncated data: [`GoError::ParseBinaryError`]
    /// - Unknown version: [`GoError::NotImplemented`]
    pub fn from_bytes(bytes: &[u8]) -> GoResult<Self> {
        let (version, data) = binary::version(bytes)?;
        debug!("Parsing from bytes v{}", version);
        let mut cursor = Cursor::new(data);

        let mut section = cursor.section()?;
        if section.is_empty() {
            let annotations = cursor.section()?;
            return if annotations.is_empty() && cursor.is_empty() {
                Ok(Self::default())
            } else {
                Err(GoError::ParseBinaryError)
            };
        }
        let ontology = Ontology::from_cursor(&mut section)?;
        if !section.is_empty() {
            return Err(GoError::ParseBinaryError);
        }

        let mut section = cursor.section()?;
        let annotations = AnnotationIndex::from_cursor(&mut section, &ontology)?;
        if !section.is_empty() || !cursor.is_empty() {
            return Err(GoError::ParseBinaryError);
        }

        Ok(Self {
            ontology: Some(ontology),
            annotations,
        })
    }

    /// Writes the binary representation to a file
    ///
    /// # Errors
    ///
    /// [`GoError::CannotOpenFile`] if the file cannot be written
    pub fn save<P: AsRef<Path>>(&self, path: P, compress: bool) -> GoResult<()> {
        let path = path.as_ref();
        utils::write_bytes(path, &self.as_bytes(), compress)?;
        info!("Saved gene ontology to {}", path.display());
        Ok(())
    }

    /// Loads a `GeneOntology` from a plain or gzip-compressed binary file
    ///
    /// # Errors
    ///
    /// [`GoError::CannotOpenFile`] and all errors of [`GeneOntology::from_bytes`]
    pub fn load<P: AsRef<Path>>(path: P) -> GoResult<Self> {
        Self::from_bytes(&utils::read_bytes(path)?)
    }
}
