//! `geneontology` reads the Gene Ontology (GO) and gene - term associations
//! and answers propagated membership queries:
//!
//! - Which GO terms (including all inherited ones) annotate a gene?
//! - Which genes (including those annotated to a more specific term) belong to a term?
//!
//! It also derives a collection of non-redundant gene sets, one per GO term,
//! keeping only the most specific term when several terms share the exact
//! same propagated genes.
//!
//! # Examples
//!
//! ```
//! use geneontology::{AnnotationFilter, GeneOntology, GeneUniverse, OboOptions};
//!
//! let obo = "[Term]
//! id: GO:0000001
//! name: root process
//! namespace: biological_process
//!
//! [Term]
//! id: GO:0000002
//! name: leaf process
//! namespace: biological_process
//! is_a: GO:0000001 ! root process
//! ";
//! let gaf = "UniProtKB\tP1\tFOO\t\tGO:0000002\tPMID:1\tIDA\t\tP\tfoo\t\tprotein\ttaxon:9606\t20200101\tUniProt\n";
//!
//! let mut go = GeneOntology::default();
//! go.parse_ontology(obo.as_bytes(), &OboOptions::default()).unwrap();
//! go.parse_annotations(
//!     gaf.as_bytes(),
//!     GeneUniverse::new(["FOO", "BAR"]),
//!     &AnnotationFilter::default(),
//! ).unwrap();
//!
//! let genes = go.get_term_genes("GO:0000001", true).unwrap();
//! assert!(genes.contains("FOO"));
//! assert!(go.get_term_genes("GO:0000001", false).unwrap().is_empty());
//! ```
use std::num::ParseIntError;
use thiserror::Error;

pub mod annotations;
pub mod gene_sets;
pub mod ontology;
pub mod term;
mod gene_ontology;
mod parser;
mod utils;

pub use annotations::{
    Annotation, AnnotationFilter, AnnotationIndex, EvidenceCode, GeneUniverse, IngestReport,
};
pub use gene_ontology::GeneOntology;
pub use gene_sets::{GeneSet, GeneSetCollection, RedundancyStats};
pub use ontology::{OboOptions, Ontology};
pub use term::{Domain, GoTerm, GoTermId, TermGroup};

const DEFAULT_NUM_PARENTS: usize = 4;
const DEFAULT_NUM_CHILDREN: usize = 8;
const DEFAULT_NUM_TERMS: usize = 50_000;

/// Prefix of every GO term ID, e.g. `GO:0008150`
pub const ID_PREFIX: &str = "GO";

/// Source database that is selected by default during annotation ingestion
pub const DEFAULT_DB: &str = "UniProtKB";

/// Main Error type for this crate
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GoError {
    /// Binary data of a version this crate does not know
    #[error("not implemented")]
    NotImplemented,
    /// No term exists for the given ID, accession or name
    #[error("term does not exist: {0}")]
    TermNotFound(String),
    /// The gene is not part of the gene universe
    #[error("gene does not exist: {0}")]
    GeneNotFound(String),
    /// Structurally invalid input data
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// A term refers to a parent or whole that is not part of the ontology
    #[error("term {term} references unknown term {target}")]
    DanglingReference {
        /// The term holding the relation
        term: GoTermId,
        /// The referenced, missing term
        target: GoTermId,
    },
    /// The `is_a` / `part_of` relations contain a cycle
    #[error("cyclic relation involving {0}")]
    CyclicRelation(GoTermId),
    /// An annotation record without a gene symbol
    #[error("missing target gene in line {line}")]
    MissingGene {
        /// 1-based line number
        line: usize,
    },
    /// An annotation record with too few columns
    #[error("invalid annotation record in line {line}")]
    InvalidRecord {
        /// 1-based line number
        line: usize,
    },
    /// Ancestors or descendants were requested but never computed
    #[error("ontology is not flattened")]
    NotFlattened,
    /// Annotations can only be parsed after the ontology
    #[error("no ontology loaded")]
    OntologyNotLoaded,
    /// Failed to open or read a file
    #[error("cannot open file {0}")]
    CannotOpenFile(String),
    /// Failed to parse an integer
    #[error("unable to parse Integer")]
    ParseIntError,
    /// Failed to parse binary data
    #[error("unable to parse binary data")]
    ParseBinaryError,
}

impl From<ParseIntError> for GoError {
    fn from(_: ParseIntError) -> Self {
        GoError::ParseIntError
    }
}

impl From<std::num::TryFromIntError> for GoError {
    fn from(_: std::num::TryFromIntError) -> Self {
        GoError::ParseBinaryError
    }
}

/// Shortcut for `Result<T, GoError>`
pub type GoResult<T> = Result<T, GoError>;

/// Returns a big-endian `u32` from the first 4 bytes
///
/// # Panics
///
/// Panics if `bytes` holds fewer than 4 bytes
fn u32_from_bytes(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}
