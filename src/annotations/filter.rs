use std::collections::HashSet;

use crate::DEFAULT_DB;

/// Selects which GAF records become [`Annotation`](crate::Annotation)s
///
/// # Examples
///
/// ```
/// use geneontology::AnnotationFilter;
///
/// let filter = AnnotationFilter::default()
///     .exclude_evidence(["IEA", "ND"])
///     .exclude_ref(["PMID:2676709"])
///     .ignore_case(true);
///
/// assert_eq!(filter.db, "UniProtKB");
/// let evidence = filter.evidence_predicate();
/// assert!(evidence.accepts("IDA"));
/// assert!(!evidence.accepts("IEA"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationFilter {
    /// Only records of this database (column 0) are used. An empty
    /// string disables the check.
    pub db: String,
    /// If not empty, only these evidence codes are used
    pub select_evidence: Vec<String>,
    /// Evidence codes to skip. Ignored if `select_evidence` is not empty.
    pub exclude_evidence: Vec<String>,
    /// References that exclude a record, but only if it is the record's
    /// single reference
    pub exclude_ref: Vec<String>,
    /// Remove a species suffix like `_HUMAN` from gene symbols
    pub strip_species: bool,
    /// Match gene symbols case-insensitively
    pub ignore_case: bool,
}

impl Default for AnnotationFilter {
    fn default() -> Self {
        Self {
            db: DEFAULT_DB.to_string(),
            select_evidence: Vec::new(),
            exclude_evidence: Vec::new(),
            exclude_ref: Vec::new(),
            strip_species: false,
            ignore_case: false,
        }
    }
}

fn to_strings<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values.into_iter().map(Into::into).collect()
}

impl AnnotationFilter {
    /// Sets the database
    #[must_use]
    pub fn db(mut self, db: &str) -> Self {
        self.db = db.to_string();
        self
    }

    /// Sets the evidence codes to select
    #[must_use]
    pub fn select_evidence<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select_evidence = to_strings(codes);
        self
    }

    /// Sets the evidence codes to exclude
    #[must_use]
    pub fn exclude_evidence<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_evidence = to_strings(codes);
        self
    }

    /// Sets the references to exclude
    #[must_use]
    pub fn exclude_ref<I, S>(mut self, refs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_ref = to_strings(refs);
        self
    }

    /// Sets whether species suffixes are removed from gene symbols
    #[must_use]
    pub fn strip_species(mut self, strip: bool) -> Self {
        self.strip_species = strip;
        self
    }

    /// Sets whether gene symbols are matched case-insensitively
    #[must_use]
    pub fn ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }

    /// Returns `true` if a record of database `db` with `qualifier` is used
    pub(crate) fn accepts_source(&self, db: &str, qualifier: &str) -> bool {
        (self.db.is_empty() || self.db == db) && qualifier != crate::parser::gaf::NOT_QUALIFIER
    }

    /// Resolves the select and exclude lists into a single [`EvidenceFilter`]
    ///
    /// A non-empty `select_evidence` takes precedence over `exclude_evidence`.
    pub fn evidence_predicate(&self) -> EvidenceFilter {
        if !self.select_evidence.is_empty() {
            EvidenceFilter::Select(self.select_evidence.iter().cloned().collect())
        } else if !self.exclude_evidence.is_empty() {
            EvidenceFilter::Exclude(self.exclude_evidence.iter().cloned().collect())
        } else {
            EvidenceFilter::All
        }
    }
}

/// Decides which evidence codes are used
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvidenceFilter {
    /// Every evidence code
    All,
    /// Only the listed codes
    Select(HashSet<String>),
    /// All but the listed codes
    Exclude(HashSet<String>),
}

impl EvidenceFilter {
    /// Returns `true` if `code` passes the filter
    pub fn accepts(&self, code: &str) -> bool {
        match self {
            EvidenceFilter::All => true,
            EvidenceFilter::Select(codes) => codes.contains(code),
            EvidenceFilter::Exclude(codes) => !codes.contains(code),
        }
    }
}
