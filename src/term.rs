//! [`GoTerm`]s are the nodes of the Gene Ontology
//!
//! A term is identified by its [`GoTermId`] and belongs to exactly one
//! [`Domain`]. Terms are connected via `is_a` (child -> parent) and
//! `part_of` (part -> whole) relations.
//!
//! Sets of terms, e.g. the parents or the ancestors of a term, are
//! represented as [`TermGroup`].

mod domain;
mod goterm;
mod gotermid;
mod group;
pub(crate) mod internal;

pub use domain::Domain;
pub use goterm::GoTerm;
pub use gotermid::GoTermId;
pub use group::{GroupCombine, TermGroup, TermIds};

/// Phrase abbreviations applied by [`GoTerm::pretty_format`], in this order
pub const ABBREVIATIONS: [(&str, &str); 5] = [
    ("positive ", "pos. "),
    ("negative ", "neg. "),
    ("interferon-", "IFN-"),
    ("proliferation", "prolif."),
    ("signaling", "signal."),
];
