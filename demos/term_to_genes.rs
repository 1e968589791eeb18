//! Prints every GO term and its genes, including the genes of all
//! descendant terms
//!
//! `cargo run --example term_to_genes -- tests/small.obo tests/small.gaf tests/genes.tsv`

use geneontology::{AnnotationFilter, GeneOntology, GeneUniverse, OboOptions};

fn main() {
    simple_logger::init_with_env().unwrap();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 4 {
        println!("Usage: term_to_genes <OBO> <GAF> <GENES>");
        return;
    }

    let mut go = GeneOntology::default();
    go.parse_ontology_file(&args[1], &OboOptions::default())
        .unwrap();
    let universe = GeneUniverse::from_tsv_file(&args[3]).unwrap();
    go.parse_annotations_file(&args[2], universe, &AnnotationFilter::default())
        .unwrap();

    let mut terms: Vec<_> = go.ontology().unwrap().terms().collect();
    terms.sort_by_key(|term| term.id());
    for term in terms {
        let genes: Vec<&str> = go
            .get_term_genes(&term.id().to_string(), true)
            .unwrap()
            .into_iter()
            .collect();
        println!("{}\t{}\t{}", term.id(), term.name(), genes.join(","));
    }
}
