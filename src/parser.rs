//! Parsing the Gene Ontology and its annotations
//!
//! - OBO files with the term definitions ([`go_obo`])
//! - Gene Association Files (GAF) with gene - term annotations ([`gaf`])
//! - The crate's own binary format ([`binary`])

pub(crate) mod binary;
pub(crate) mod gaf;
/// Module to parse `go-basic.obo` files
pub(crate) mod go_obo;
