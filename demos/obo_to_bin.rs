//! Parses the ontology and annotations and saves them in binary format
//!
//! `cargo run --example obo_to_bin -- tests/small.obo tests/small.gaf tests/genes.tsv go.bin.gz`

use geneontology::{AnnotationFilter, GeneOntology, GeneUniverse, OboOptions};

fn main() {
    simple_logger::init_with_env().unwrap();

    let mut args = std::env::args();
    if args.len() == 5 {
        let obo = args.nth(1).unwrap();
        let gaf = args.next().unwrap();
        let genes = args.next().unwrap();
        let filename = args.next().unwrap();

        let mut go = GeneOntology::default();
        go.parse_ontology_file(obo, &OboOptions::default()).unwrap();
        let universe = GeneUniverse::from_tsv_file(genes).unwrap();
        go.parse_annotations_file(gaf, universe, &AnnotationFilter::default())
            .unwrap();
        println!(
            "Gene ontology with {} terms and {} annotations",
            go.ontology().unwrap().len(),
            go.annotations().len()
        );

        match go.save(&filename, filename.ends_with(".gz")) {
            Ok(()) => println!("Saved output"),
            Err(err) => println!("Error: {}", err),
        };
    } else {
        println!("Usage: obo_to_bin <OBO> <GAF> <GENES> <OUTPUT>")
    }
}
