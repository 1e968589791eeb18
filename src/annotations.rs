//! Annotations connect genes to [`GoTerm`](crate::GoTerm)s
//!
//! An [`Annotation`] is one asserted gene - term association, read from
//! a Gene Association File (GAF). All annotations of an ingestion run are
//! held by the [`AnnotationIndex`], which can be queried by gene and by term.
//!
//! Ingestion is configured with an [`AnnotationFilter`] and restricted to a
//! [`GeneUniverse`]. Records that are filtered out are counted in the
//! [`IngestReport`].

mod annotation;
mod evidence;
mod filter;
mod index;
mod report;
mod universe;

pub use annotation::Annotation;
pub use evidence::{EvidenceCode, EvidenceType};
pub use filter::{AnnotationFilter, EvidenceFilter};
pub use index::AnnotationIndex;
pub use report::IngestReport;
pub use universe::GeneUniverse;
