use std::fmt::Display;
use std::str::FromStr;

use crate::GoError;

/// The three top-level namespaces of the Gene Ontology
///
/// Every term belongs to exactly one domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Domain {
    /// `biological_process`
    BiologicalProcess,
    /// `molecular_function`
    MolecularFunction,
    /// `cellular_component`, the only domain where `part_of` describes
    /// a physical part / whole relation
    CellularComponent,
}

impl Domain {
    /// The namespace as written in the OBO file
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::BiologicalProcess => "biological_process",
            Domain::MolecularFunction => "molecular_function",
            Domain::CellularComponent => "cellular_component",
        }
    }

    /// The two-letter abbreviation, e.g. `BP`
    pub fn short(&self) -> &'static str {
        match self {
            Domain::BiologicalProcess => "BP",
            Domain::MolecularFunction => "MF",
            Domain::CellularComponent => "CC",
        }
    }

    pub(crate) fn as_u8(self) -> u8 {
        match self {
            Domain::BiologicalProcess => 1,
            Domain::MolecularFunction => 2,
            Domain::CellularComponent => 3,
        }
    }
}

impl TryFrom<u8> for Domain {
    type Error = GoError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Domain::BiologicalProcess),
            2 => Ok(Domain::MolecularFunction),
            3 => Ok(Domain::CellularComponent),
            _ => Err(GoError::ParseBinaryError),
        }
    }
}

impl FromStr for Domain {
    type Err = GoError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "biological_process" => Ok(Domain::BiologicalProcess),
            "molecular_function" => Ok(Domain::MolecularFunction),
            "cellular_component" => Ok(Domain::CellularComponent),
            _ => Err(GoError::InvalidInput(format!("unknown namespace: {s}"))),
        }
    }
}

impl Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
