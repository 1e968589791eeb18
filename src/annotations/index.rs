use std::collections::{BTreeSet, HashMap, HashSet};
use std::io::BufRead;

use tracing::{debug, info};

use crate::annotations::{Annotation, AnnotationFilter, GeneUniverse, IngestReport};
use crate::parser::gaf::{self, split_pipe, strip_species, GafRecord};
use crate::{GoError, GoResult, GoTerm, GoTermId, Ontology, TermGroup};

/// All annotations of one ingestion run, indexed by term and by gene
///
/// Every term of the ontology and every gene of the [`GeneUniverse`] has an
/// entry, which might be empty.
///
/// # Examples
///
/// ```
/// use geneontology::{AnnotationFilter, AnnotationIndex, GeneUniverse, GoTermId, OboOptions, Ontology};
///
/// let obo = "[Term]
/// id: GO:0000001
/// name: parent
/// namespace: biological_process
///
/// [Term]
/// id: GO:0000002
/// name: child
/// namespace: biological_process
/// is_a: GO:0000001 ! parent
/// ";
/// let ontology = Ontology::from_obo(obo.as_bytes(), &OboOptions::default()).unwrap();
///
/// let gaf = "!gaf-version: 2.2
/// UniProtKB\tP1\tFOO\t\tGO:0000002\tPMID:1\tIMP\t\tP\t\t\tprotein\ttaxon:9606\t20200101\tUniProt
/// UniProtKB\tP2\tBAR\tNOT\tGO:0000002\tPMID:1\tIMP\t\tP\t\t\tprotein\ttaxon:9606\t20200101\tUniProt
/// ";
/// let (index, report) = AnnotationIndex::from_gaf(
///     gaf.as_bytes(),
///     &ontology,
///     GeneUniverse::new(["FOO", "BAR"]),
///     &AnnotationFilter::default(),
/// ).unwrap();
///
/// assert_eq!(report.valid, 1);
/// let terms = index.gene_terms(&ontology, "FOO", true).unwrap();
/// assert_eq!(terms.len(), 2);
/// assert!(index.gene_terms(&ontology, "BAR", true).unwrap().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct AnnotationIndex {
    universe: GeneUniverse,
    upper_case: Option<HashMap<String, String>>,
    annotations: Vec<Annotation>,
    term_annotations: HashMap<GoTermId, Vec<usize>>,
    gene_annotations: HashMap<String, Vec<usize>>,
}

impl AnnotationIndex {
    /// Constructs an empty index for all terms of `ontology` and all genes
    /// of `universe`
    pub fn new(ontology: &Ontology, universe: GeneUniverse, ignore_case: bool) -> Self {
        let term_annotations = ontology.terms().map(|term| (term.id(), Vec::new())).collect();
        let gene_annotations = universe.iter().map(|gene| (gene.clone(), Vec::new())).collect();
        let upper_case = ignore_case.then(|| {
            universe
                .iter()
                .map(|gene| (gene.to_uppercase(), gene.clone()))
                .collect()
        });
        Self {
            universe,
            upper_case,
            annotations: Vec::new(),
            term_annotations,
            gene_annotations,
        }
    }

    /// Reads annotations from GAF data
    ///
    /// Empty lines and comment lines starting with `!` are skipped.
    /// Records are filtered as configured in `filter`, records of unknown
    /// genes or terms are counted in the [`IngestReport`] and dropped.
    ///
    /// # Errors
    ///
    /// - [`GoError::InvalidRecord`] if a record of the selected database
    ///   has fewer than 8 columns
    /// - [`GoError::MissingGene`] if a used record has no gene symbol
    /// - [`GoError::InvalidInput`] if the reader fails or a used record has
    ///   no evidence code
    pub fn from_gaf<R: BufRead>(
        reader: R,
        ontology: &Ontology,
        universe: GeneUniverse,
        filter: &AnnotationFilter,
    ) -> GoResult<(Self, IngestReport)> {
        let mut index = Self::new(ontology, universe, filter.ignore_case);
        let evidence = filter.evidence_predicate();
        let exclude_ref: HashSet<&str> = filter.exclude_ref.iter().map(String::as_str).collect();
        let mut report = IngestReport::default();

        info!("Parsing annotations");
        for (idx, line) in reader.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.map_err(|err| {
                GoError::InvalidInput(format!("unable to read annotations: {err}"))
            })?;
            if line.is_empty() || line.starts_with('!') {
                continue;
            }

            let (db, qualifier) = gaf::source(&line);
            if !filter.accepts_source(db, qualifier) {
                continue;
            }
            let record = GafRecord::parse(&line, line_no)?;
            report.considered += 1;

            if !evidence.accepts(record.evidence) {
                report.excluded_by_evidence += 1;
                continue;
            }

            // multi-reference records are never excluded
            let db_ref = split_pipe(record.db_ref);
            if db_ref.len() == 1 && exclude_ref.contains(db_ref[0].as_str()) {
                report.excluded_by_reference += 1;
                continue;
            }

            if record.gene.is_empty() {
                return Err(GoError::MissingGene { line: line_no });
            }
            let gene = if filter.strip_species {
                strip_species(record.gene)
            } else {
                record.gene
            };

            let gene = index.resolve_gene(gene).map(str::to_string);
            if gene.is_none() {
                report.add_unknown_gene(record.gene);
            }
            let term_id = GoTermId::try_from(record.term_id)
                .ok()
                .filter(|id| ontology.contains(*id));
            if term_id.is_none() {
                report.add_unknown_term(record.term_id);
            }
            let (Some(gene), Some(term_id)) = (gene, term_id) else {
                continue;
            };

            let mut annotation = Annotation::new(&gene, term_id, record.evidence)?
                .with_db_ref(db_ref)
                .with_with_from(split_pipe(record.with_from));
            if !record.db_id.is_empty() {
                annotation = annotation.with_db_id(record.db_id);
            }
            index.push(annotation);
            report.valid += 1;
        }

        report.unique_pairs = index.unique_pairs();
        report.log();
        Ok((index, report))
    }

    /// Adds an annotation to all indices
    pub(crate) fn push(&mut self, annotation: Annotation) {
        let idx = self.annotations.len();
        self.term_annotations
            .entry(annotation.term_id())
            .or_default()
            .push(idx);
        self.gene_annotations
            .entry(annotation.gene().to_string())
            .or_default()
            .push(idx);
        self.annotations.push(annotation);
    }

    /// Returns the number of annotations
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    /// Returns `true` if there are no annotations
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Returns all annotations in reading order
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Returns the [`GeneUniverse`] of the ingestion run
    pub fn universe(&self) -> &GeneUniverse {
        &self.universe
    }

    /// Returns `true` if gene symbols are matched case-insensitively
    pub fn ignore_case(&self) -> bool {
        self.upper_case.is_some()
    }

    /// Returns the symbol of `gene` as used in the [`GeneUniverse`]
    ///
    /// If case is ignored, `tp53` resolves to e.g. `TP53`.
    pub fn resolve_gene(&self, gene: &str) -> Option<&str> {
        match &self.upper_case {
            Some(upper_case) => upper_case.get(&gene.to_uppercase()).map(String::as_str),
            None => self.universe.get(gene),
        }
    }

    /// Returns all annotations of a gene
    ///
    /// # Errors
    ///
    /// [`GoError::GeneNotFound`] if the gene is not part of the universe
    pub fn gene_annotations(
        &self,
        gene: &str,
    ) -> GoResult<impl Iterator<Item = &Annotation> + '_> {
        let key = self.resolve_gene(gene).unwrap_or(gene);
        let indices = self
            .gene_annotations
            .get(key)
            .ok_or_else(|| GoError::GeneNotFound(gene.to_string()))?;
        Ok(indices.iter().map(|idx| &self.annotations[*idx]))
    }

    /// Returns all annotations directly made to a term
    ///
    /// # Errors
    ///
    /// [`GoError::TermNotFound`] if the term was not part of the ontology
    pub fn term_annotations(
        &self,
        term_id: GoTermId,
    ) -> GoResult<impl Iterator<Item = &Annotation> + '_> {
        let indices = self
            .term_annotations
            .get(&term_id)
            .ok_or_else(|| GoError::TermNotFound(term_id.to_string()))?;
        Ok(indices.iter().map(|idx| &self.annotations[*idx]))
    }

    /// Returns the IDs of all terms a gene is annotated with
    ///
    /// With `include_ancestors`, all ancestors of these terms are included.
    ///
    /// # Errors
    ///
    /// - [`GoError::GeneNotFound`] if the gene is not part of the universe
    /// - [`GoError::NotFlattened`] if ancestors are requested from an
    ///   ontology without ancestors
    pub fn gene_terms(
        &self,
        ontology: &Ontology,
        gene: &str,
        include_ancestors: bool,
    ) -> GoResult<TermGroup> {
        if include_ancestors && !ontology.is_flattened() {
            return Err(GoError::NotFlattened);
        }
        let direct: TermGroup = self.gene_annotations(gene)?.map(Annotation::term_id).collect();
        if !include_ancestors {
            return Ok(direct);
        }
        let mut terms = direct.clone();
        for term_id in &direct {
            let term = GoTerm::try_new(ontology, term_id)?;
            terms = &terms | term.ancestors()?;
        }
        Ok(terms)
    }

    /// Returns the genes that are annotated with a term
    ///
    /// With `include_descendants`, genes annotated with any descendant
    /// of the term are included.
    ///
    /// # Errors
    ///
    /// - [`GoError::TermNotFound`] if the term is not part of the ontology
    /// - [`GoError::NotFlattened`] if descendants are requested from an
    ///   ontology without descendants
    pub fn term_genes<'a>(
        &'a self,
        ontology: &Ontology,
        term_id: GoTermId,
        include_descendants: bool,
    ) -> GoResult<BTreeSet<&'a str>> {
        let term = GoTerm::try_new(ontology, term_id)?;
        let mut genes: BTreeSet<&str> = self.direct_genes(term_id).collect();
        if include_descendants {
            if !ontology.is_flattened() {
                return Err(GoError::NotFlattened);
            }
            for descendant in term.descendants()? {
                genes.extend(self.direct_genes(descendant));
            }
        }
        Ok(genes)
    }

    fn direct_genes(&self, term_id: GoTermId) -> impl Iterator<Item = &str> + '_ {
        self.term_annotations
            .get(&term_id)
            .into_iter()
            .flatten()
            .map(|idx| self.annotations[*idx].gene())
    }

    /// Number of distinct gene - term pairs
    fn unique_pairs(&self) -> usize {
        let pairs: HashSet<(&str, GoTermId)> = self
            .annotations
            .iter()
            .map(|annotation| (annotation.gene(), annotation.term_id()))
            .collect();
        debug!("{} annotations form {} pairs", self.annotations.len(), pairs.len());
        pairs.len()
    }
}
