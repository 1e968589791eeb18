use std::collections::HashMap;

use tracing::{info, warn};

/// Statistics of one annotation ingestion run
///
/// Records of other databases and negated (`NOT`) records are not
/// counted at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Records of the selected database without `NOT` qualifier
    pub considered: usize,
    /// Records dropped because of their evidence code
    pub excluded_by_evidence: usize,
    /// Records dropped because of their single reference
    pub excluded_by_reference: usize,
    /// Records with a gene symbol outside the gene universe
    pub unknown_gene_annotations: usize,
    /// Unknown gene symbols (as written in the file) and their frequency
    pub unknown_genes: HashMap<String, usize>,
    /// Records with a term ID that is not part of the ontology
    pub unknown_term_annotations: usize,
    /// Unknown term IDs and their frequency
    pub unknown_terms: HashMap<String, usize>,
    /// Records that became annotations
    pub valid: usize,
    /// Distinct gene - term pairs among the valid annotations
    pub unique_pairs: usize,
}

impl IngestReport {
    pub(crate) fn add_unknown_gene(&mut self, gene: &str) {
        self.unknown_gene_annotations += 1;
        *self.unknown_genes.entry(gene.to_string()).or_default() += 1;
    }

    pub(crate) fn add_unknown_term(&mut self, term_id: &str) {
        self.unknown_term_annotations += 1;
        *self.unknown_terms.entry(term_id.to_string()).or_default() += 1;
    }

    /// Logs the statistics
    pub(crate) fn log(&self) {
        if self.considered > 0 {
            #[allow(clippy::cast_precision_loss)]
            let percent = 100.0 * self.excluded_by_evidence as f64 / self.considered as f64;
            info!(
                "Parsed {} positive GO annotations ({} = {:.1}% excluded based on evidence type)",
                self.considered, self.excluded_by_evidence, percent
            );
        }
        if self.excluded_by_reference > 0 {
            info!(
                "{} annotations excluded based on their reference",
                self.excluded_by_reference
            );
        }
        if self.unknown_gene_annotations > 0 {
            warn!(
                "{} annotations with {} unknown gene names",
                self.unknown_gene_annotations,
                self.unknown_genes.len()
            );
        }
        if self.unknown_term_annotations > 0 {
            warn!(
                "{} annotations with {} unknown term IDs",
                self.unknown_term_annotations,
                self.unknown_terms.len()
            );
        }
        info!("Found a total of {} valid annotations", self.valid);
        info!("{} unique gene - term associations", self.unique_pairs);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn counters() {
        let mut report = IngestReport::default();
        report.add_unknown_gene("FOO");
        report.add_unknown_gene("FOO");
        report.add_unknown_term("GO:0000099");
        assert_eq!(report.unknown_gene_annotations, 2);
        assert_eq!(report.unknown_genes.get("FOO"), Some(&2));
        assert_eq!(report.unknown_term_annotations, 1);
        report.log();
    }
}
