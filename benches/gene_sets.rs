use std::fmt::Write;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use geneontology::{AnnotationFilter, GeneOntology, GeneUniverse, OboOptions};

const LAYERS: u32 = 20;
const WIDTH: u32 = 50;

fn obo() -> String {
    let mut obo = String::new();
    for layer in 0..LAYERS {
        for pos in 0..WIDTH {
            let id = layer * WIDTH + pos + 1;
            write!(
                obo,
                "[Term]\nid: GO:{id:07}\nname: term {id}\nnamespace: biological_process\n"
            )
            .unwrap();
            if layer > 0 {
                let above = (layer - 1) * WIDTH + 1;
                writeln!(obo, "is_a: GO:{:07}", above + pos).unwrap();
                writeln!(obo, "is_a: GO:{:07}", above + (pos + 3) % WIDTH).unwrap();
            }
            obo.push('\n');
        }
    }
    obo
}

/// Annotates every gene with a few terms of the lower layers
fn gaf(genes: u32) -> String {
    let n_terms = LAYERS * WIDTH;
    let mut gaf = String::from("!gaf-version: 2.2\n");
    for gene in 0..genes {
        for k in 0..3 {
            let term = n_terms - (gene * 7 + k * 13) % (WIDTH * 5);
            writeln!(
                gaf,
                "UniProtKB\tP{gene}\tGENE{gene}\t\tGO:{term:07}\tPMID:1\tIDA\t\tP\t\t\tprotein\ttaxon:9606\t20230101\tUniProt"
            )
            .unwrap();
        }
    }
    gaf
}

fn gene_sets_benchmark(c: &mut Criterion) {
    let mut go = GeneOntology::default();
    go.parse_ontology(obo().as_bytes(), &OboOptions::default())
        .expect("requires valid OBO");
    go.parse_annotations(
        gaf(2000).as_bytes(),
        GeneUniverse::new((0..2000).map(|gene| format!("GENE{gene}"))),
        &AnnotationFilter::default(),
    )
    .expect("requires valid GAF");

    c.bench_function("minimal gene sets", |b| {
        b.iter(|| {
            go.derive_minimal_gene_sets(black_box(Some(5)), black_box(Some(1000)))
                .expect("requires flattened ontology")
                .len()
        })
    });
}

criterion_group!(gene_sets, gene_sets_benchmark);
criterion_main!(gene_sets);
