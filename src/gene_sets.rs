//! Non-redundant gene sets derived from GO annotations
//!
//! Every GO term defines a gene set: all genes annotated with the term
//! or any of its descendants. Many terms share the exact same gene set,
//! in which case only the most specific terms are kept.
use std::collections::{BTreeSet, HashMap};

use tracing::{debug, info};

use crate::{AnnotationIndex, GoResult, GoTermId, Ontology};

/// The genes of one GO term, including genes of all descendant terms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneSet {
    term: GoTermId,
    genes: BTreeSet<String>,
}

impl GeneSet {
    /// The ID of the GO term
    pub fn term_id(&self) -> GoTermId {
        self.term
    }

    /// The gene symbols in alphabetical order
    pub fn genes(&self) -> &BTreeSet<String> {
        &self.genes
    }

    /// The number of genes
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Returns `true` if the set contains no genes
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }
}

/// Counts of the redundancy elimination
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RedundancyStats {
    /// Terms with a non-empty gene set within the size limits
    pub selected: usize,
    /// Terms whose gene set is shared with at least one other term
    pub affected: usize,
    /// Terms removed as redundant
    pub excluded: usize,
    /// Terms in the final collection
    pub retained: usize,
}

/// A collection of non-redundant [`GeneSet`]s, ordered by term ID
///
/// # Examples
///
/// ```
/// use geneontology::{AnnotationFilter, AnnotationIndex, GeneSetCollection, GeneUniverse, OboOptions, Ontology};
///
/// let obo = "[Term]
/// id: GO:0000001
/// name: general
/// namespace: molecular_function
///
/// [Term]
/// id: GO:0000002
/// name: specific
/// namespace: molecular_function
/// is_a: GO:0000001 ! general
/// ";
/// let gaf = "UniProtKB\tP1\tFOO\t\tGO:0000002\tPMID:1\tIDA\t\tF\t\t\tprotein\ttaxon:9606\t20200101\tUniProt\n";
///
/// let ontology = Ontology::from_obo(obo.as_bytes(), &OboOptions::default()).unwrap();
/// let (index, _) = AnnotationIndex::from_gaf(
///     gaf.as_bytes(),
///     &ontology,
///     GeneUniverse::new(["FOO"]),
///     &AnnotationFilter::default(),
/// ).unwrap();
///
/// // both terms have the gene set {FOO}, only the specific one is kept
/// let collection = GeneSetCollection::derive(&ontology, &index, None, None).unwrap();
/// assert_eq!(collection.len(), 1);
/// assert_eq!(collection.iter().next().unwrap().term_id().as_u32(), 2);
/// assert_eq!(collection.stats().excluded, 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneSetCollection {
    sets: Vec<GeneSet>,
    stats: RedundancyStats,
}

impl GeneSetCollection {
    /// Derives one gene set per GO term and removes redundant terms
    ///
    /// Gene sets that are empty, smaller than `min_size` or larger than
    /// `max_size` are skipped. If several terms have identical gene sets,
    /// a term is removed if another of these terms is one of its
    /// descendants. Equally specific terms are all kept.
    ///
    /// # Errors
    ///
    /// [`crate::GoError::NotFlattened`] if the ontology has no descendants
    pub fn derive(
        ontology: &Ontology,
        index: &AnnotationIndex,
        min_size: Option<usize>,
        max_size: Option<usize>,
    ) -> GoResult<Self> {
        let mut term_ids: Vec<GoTermId> = ontology.terms().map(|term| term.id()).collect();
        term_ids.sort_unstable();

        let mut selected: Vec<(GoTermId, BTreeSet<&str>)> = Vec::new();
        for term_id in term_ids {
            let genes = index.term_genes(ontology, term_id, true)?;
            if genes.is_empty()
                || min_size.is_some_and(|min| genes.len() < min)
                || max_size.is_some_and(|max| genes.len() > max)
            {
                continue;
            }
            selected.push((term_id, genes));
        }

        let mut groups: HashMap<&BTreeSet<&str>, Vec<GoTermId>> = HashMap::new();
        for (term_id, genes) in &selected {
            groups.entry(genes).or_default().push(*term_id);
        }

        let mut stats = RedundancyStats {
            selected: selected.len(),
            ..Default::default()
        };
        let mut redundant: BTreeSet<GoTermId> = BTreeSet::new();
        for group in groups.values().filter(|group| group.len() > 1) {
            stats.affected += group.len();
            for term_id in group {
                let descendants = ontology
                    .term(*term_id)
                    .ok_or_else(|| crate::GoError::TermNotFound(term_id.to_string()))?
                    .descendants()?;
                if group
                    .iter()
                    .any(|other| other != term_id && descendants.contains(other))
                {
                    redundant.insert(*term_id);
                }
            }
        }
        stats.excluded = redundant.len();
        debug!("Redundant terms: {:?}", redundant);

        let sets: Vec<GeneSet> = selected
            .into_iter()
            .filter(|(term_id, _)| !redundant.contains(term_id))
            .map(|(term, genes)| GeneSet {
                term,
                genes: genes.into_iter().map(str::to_string).collect(),
            })
            .collect();
        stats.retained = sets.len();

        info!(
            "Selected {} GO terms, {} affected by redundancy, {} excluded, {} retained",
            stats.selected, stats.affected, stats.excluded, stats.retained
        );
        Ok(Self { sets, stats })
    }

    /// Returns the number of gene sets
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Returns `true` if the collection holds no gene sets
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Returns the counts of the redundancy elimination
    pub fn stats(&self) -> RedundancyStats {
        self.stats
    }

    /// Returns the gene set of a term, if it is part of the collection
    pub fn get(&self, term_id: GoTermId) -> Option<&GeneSet> {
        self.sets
            .binary_search_by_key(&term_id, |set| set.term)
            .ok()
            .map(|idx| &self.sets[idx])
    }

    /// Returns an iterator over all gene sets
    pub fn iter(&self) -> std::slice::Iter<'_, GeneSet> {
        self.sets.iter()
    }
}

impl<'a> IntoIterator for &'a GeneSetCollection {
    type Item = &'a GeneSet;
    type IntoIter = std::slice::Iter<'a, GeneSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.sets.iter()
    }
}
