//! Derives the non-redundant GO gene sets and prints them in GMT format
//!
//! `cargo run --example gene_sets -- tests/small.obo tests/small.gaf tests/genes.tsv 1 500`

use geneontology::{AnnotationFilter, GeneOntology, GeneUniverse, OboOptions};

fn main() {
    simple_logger::init_with_env().unwrap();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 4 {
        println!("Usage: gene_sets <OBO> <GAF> <GENES> [MIN_SIZE] [MAX_SIZE]");
        return;
    }
    let min_size = args.get(4).map(|n| n.parse::<usize>().unwrap());
    let max_size = args.get(5).map(|n| n.parse::<usize>().unwrap());

    let mut go = GeneOntology::default();
    go.parse_ontology_file(&args[1], &OboOptions::default().part_of_cc_only(true))
        .unwrap();
    let universe = GeneUniverse::from_tsv_file(&args[3]).unwrap();
    let filter = AnnotationFilter::default().exclude_evidence(["IEA"]);
    go.parse_annotations_file(&args[2], universe, &filter)
        .unwrap();

    let collection = go.derive_minimal_gene_sets(min_size, max_size).unwrap();
    let ontology = go.ontology().unwrap();
    for set in &collection {
        let term = ontology.term(set.term_id()).unwrap();
        let genes: Vec<&str> = set.genes().iter().map(String::as_str).collect();
        println!(
            "{}\t{} [{}]\t{}",
            term.id(),
            term.name(),
            term.domain_short(),
            genes.join("\t")
        );
    }
    eprintln!("{:?}", collection.stats());
}
