//! Parses records of Gene Association Files (GAF)
//!
//! ```text
//! UniProtKB  A0A024RBG1  NUDT4B      GO:0003723  GO_REF:0000043  IEA  UniProtKB-KW:KW-0694  F ...
//! UniProtKB  A0A075B6H7  IGKV3-7  NOT  GO:0005886  PMID:21873635  IBA  PANTHER:PTN000587099  C ...
//! ```
//!
//! Only the first 8 columns are used:
//!
//! | Column | Content |
//! | --- | --- |
//! | 0 | Database, e.g. `UniProtKB` |
//! | 1 | Database object ID |
//! | 2 | Gene symbol |
//! | 3 | Qualifier, e.g. `NOT` |
//! | 4 | GO term ID |
//! | 5 | References, `|`-separated |
//! | 6 | Evidence code |
//! | 7 | With / From, `|`-separated |
use smallvec::SmallVec;

use crate::{GoError, GoResult};

/// Number of columns a record must have
const MIN_COLUMNS: usize = 8;

/// The qualifier that negates an annotation
pub(crate) const NOT_QUALIFIER: &str = "NOT";

/// The raw columns of a single GAF record
///
/// Database and qualifier are read beforehand with [`source`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct GafRecord<'a> {
    pub db_id: &'a str,
    pub gene: &'a str,
    pub term_id: &'a str,
    pub db_ref: &'a str,
    pub evidence: &'a str,
    pub with_from: &'a str,
}

impl<'a> GafRecord<'a> {
    /// Splits a tab-separated line into its columns
    ///
    /// # Errors
    ///
    /// [`GoError::InvalidRecord`] if the line has fewer than 8 columns
    pub fn parse(line: &'a str, line_no: usize) -> GoResult<Self> {
        let cols: SmallVec<[&str; 17]> = line.split('\t').collect();
        if cols.len() < MIN_COLUMNS {
            return Err(GoError::InvalidRecord { line: line_no });
        }
        Ok(Self {
            db_id: cols[1],
            gene: cols[2],
            term_id: cols[4],
            db_ref: cols[5],
            evidence: cols[6],
            with_from: cols[7],
        })
    }
}

/// Returns the database and qualifier columns of a raw line
///
/// Records from other databases and negated records are dropped before
/// the remaining columns are checked, so the qualifier of a short line
/// is empty.
pub(crate) fn source(line: &str) -> (&str, &str) {
    let mut cols = line.split('\t');
    let db = cols.next().unwrap_or_default();
    (db, cols.nth(2).unwrap_or_default())
}

/// Splits a `|`-separated column, an empty column yields no entries
pub(crate) fn split_pipe(value: &str) -> SmallVec<[String; 2]> {
    if value.is_empty() {
        SmallVec::new()
    } else {
        value.split('|').map(str::to_string).collect()
    }
}

/// Removes a species suffix, e.g. `TP53_HUMAN` becomes `TP53`
pub(crate) fn strip_species(gene: &str) -> &str {
    gene.rsplit_once('_').map_or(gene, |(symbol, _)| symbol)
}

#[cfg(test)]
mod test {
    use super::*;

    const LINE: &str = "UniProtKB\tP04637\tTP53\t\tGO:0006915\tPMID:1|PMID:2\tIDA\tUniProtKB:Q00987\tP\tCellular tumor antigen p53\t\tprotein\ttaxon:9606\t20200101\tUniProt\t\t";

    #[test]
    fn parse_record() {
        let record = GafRecord::parse(LINE, 1).unwrap();
        assert_eq!(record.db_id, "P04637");
        assert_eq!(record.gene, "TP53");
        assert_eq!(record.term_id, "GO:0006915");
        assert_eq!(record.db_ref, "PMID:1|PMID:2");
        assert_eq!(record.evidence, "IDA");
        assert_eq!(record.with_from, "UniProtKB:Q00987");
    }

    #[test]
    fn too_few_columns() {
        assert_eq!(
            GafRecord::parse("UniProtKB\tP04637\tTP53", 12).unwrap_err(),
            GoError::InvalidRecord { line: 12 }
        );
    }

    #[test]
    fn source_columns() {
        assert_eq!(source(LINE), ("UniProtKB", ""));
        assert_eq!(source("MGI\tX\tY\tNOT"), ("MGI", "NOT"));
        assert_eq!(source("MGI\tX"), ("MGI", ""));
        assert_eq!(source(""), ("", ""));
    }

    #[test]
    fn pipes() {
        assert!(split_pipe("").is_empty());
        assert_eq!(split_pipe("PMID:1").as_slice(), ["PMID:1".to_string()]);
        assert_eq!(split_pipe("a|b|c").len(), 3);
    }

    #[test]
    fn species_suffix() {
        assert_eq!(strip_species("TP53_HUMAN"), "TP53");
        assert_eq!(strip_species("A_B_MOUSE"), "A_B");
        assert_eq!(strip_species("TP53"), "TP53");
    }
}
