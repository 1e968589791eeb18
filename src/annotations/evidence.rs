use std::fmt::Display;

use crate::{GoError, GoResult};

/// The class of an [`EvidenceCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvidenceType {
    /// Inferred from experiment
    Experimental,
    /// Inferred from computational analysis
    Computational,
    /// Author statements
    Literature,
    /// Inferred by a curator
    Curator,
    /// No biological data available
    NoData,
    /// Inferred from electronic annotation
    Automatic,
}

impl EvidenceType {
    /// Returns the name, e.g. `experimental`
    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceType::Experimental => "experimental",
            EvidenceType::Computational => "computational",
            EvidenceType::Literature => "literature",
            EvidenceType::Curator => "curator",
            EvidenceType::NoData => "no_data",
            EvidenceType::Automatic => "automatic",
        }
    }

    /// Returns the short label, e.g. `exp.`
    pub fn short(&self) -> &'static str {
        match self {
            EvidenceType::Experimental => "exp.",
            EvidenceType::Computational => "comp.",
            EvidenceType::Literature => "lit.",
            EvidenceType::Curator => "cur.",
            EvidenceType::NoData => "n.d.",
            EvidenceType::Automatic => "autom.",
        }
    }
}

impl Display for EvidenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

const EVIDENCE_CODES: [(&str, &str, EvidenceType); 21] = [
    ("EXP", "experiment", EvidenceType::Experimental),
    ("IDA", "direct assay", EvidenceType::Experimental),
    ("IPI", "physical interaction", EvidenceType::Experimental),
    ("IMP", "mutant phenotype", EvidenceType::Experimental),
    ("IGI", "genetic interaction", EvidenceType::Experimental),
    ("IEP", "expression pattern", EvidenceType::Experimental),
    ("ISS", "sequence or structural similarity", EvidenceType::Computational),
    ("ISO", "sequence orthology", EvidenceType::Computational),
    ("ISA", "sequence alignment", EvidenceType::Computational),
    ("ISM", "sequence model", EvidenceType::Computational),
    ("IGC", "genomic context", EvidenceType::Computational),
    ("IBA", "biological aspect of ancestor", EvidenceType::Computational),
    ("IBD", "biological aspect of descendant", EvidenceType::Computational),
    ("IKR", "key residues", EvidenceType::Computational),
    ("IRD", "rapid divergence", EvidenceType::Computational),
    ("RCA", "reviewed computational analysis", EvidenceType::Computational),
    ("TAS", "traceable author statement", EvidenceType::Literature),
    ("NAS", "non-traceable author statement", EvidenceType::Literature),
    ("IC", "inferred by curator", EvidenceType::Curator),
    ("ND", "no biological data available", EvidenceType::NoData),
    ("IEA", "inferred from electronic annotation", EvidenceType::Automatic),
];

/// The evidence code of an [`Annotation`](crate::Annotation), e.g. `IDA`
///
/// Any non-empty code is accepted. Codes outside the standard GO
/// vocabulary have no [`EvidenceCode::name`] and no [`EvidenceCode::kind`].
///
/// # Examples
///
/// ```
/// use geneontology::annotations::{EvidenceCode, EvidenceType};
///
/// let code = EvidenceCode::try_from("IDA").unwrap();
/// assert_eq!(code.name(), Some("direct assay"));
/// assert_eq!(code.kind(), Some(EvidenceType::Experimental));
/// assert_eq!(code.kind().unwrap().short(), "exp.");
///
/// assert!(EvidenceCode::try_from("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EvidenceCode(String);

impl EvidenceCode {
    /// Returns the code as written in the annotation file
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn lookup(&self) -> Option<&'static (&'static str, &'static str, EvidenceType)> {
        EVIDENCE_CODES.iter().find(|(code, _, _)| *code == self.0)
    }

    /// Returns the description of the code, e.g. `direct assay` for `IDA`
    pub fn name(&self) -> Option<&'static str> {
        self.lookup().map(|(_, name, _)| *name)
    }

    /// Returns the [`EvidenceType`] of the code
    pub fn kind(&self) -> Option<EvidenceType> {
        self.lookup().map(|(_, _, kind)| *kind)
    }
}

impl TryFrom<&str> for EvidenceCode {
    type Error = GoError;
    fn try_from(code: &str) -> GoResult<Self> {
        if code.is_empty() {
            Err(GoError::InvalidInput("empty evidence code".to_string()))
        } else {
            Ok(Self(code.to_string()))
        }
    }
}

impl Display for EvidenceCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn known_codes() {
        let iea = EvidenceCode::try_from("IEA").unwrap();
        assert_eq!(iea.kind(), Some(EvidenceType::Automatic));
        assert_eq!(iea.kind().unwrap().short(), "autom.");
        let ic = EvidenceCode::try_from("IC").unwrap();
        assert_eq!(ic.name(), Some("inferred by curator"));
        assert_eq!(ic.kind().unwrap().to_string(), "curator");
    }

    #[test]
    fn unknown_code() {
        let code = EvidenceCode::try_from("HTP").unwrap();
        assert_eq!(code.as_str(), "HTP");
        assert!(code.name().is_none());
        assert!(code.kind().is_none());
    }
}
