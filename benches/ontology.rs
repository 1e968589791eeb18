use std::fmt::Write;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use geneontology::{OboOptions, Ontology};

/// Every term has two parents in the layer above, forming many diamonds
fn diamond_obo(layers: u32, width: u32) -> String {
    let mut obo = String::from("format-version: 1.2\n\n");
    for layer in 0..layers {
        for pos in 0..width {
            let id = layer * width + pos + 1;
            write!(
                obo,
                "[Term]\nid: GO:{id:07}\nname: term {id}\nnamespace: biological_process\n"
            )
            .unwrap();
            if layer > 0 {
                let above = (layer - 1) * width + 1;
                writeln!(obo, "is_a: GO:{:07}", above + pos).unwrap();
                writeln!(obo, "is_a: GO:{:07}", above + (pos + 1) % width).unwrap();
            }
            obo.push('\n');
        }
    }
    obo
}

fn parse_ontology_benchmark(c: &mut Criterion) {
    let obo = diamond_obo(40, 100);
    c.bench_function("parse obo 4000 terms", |b| {
        b.iter(|| {
            Ontology::from_obo(black_box(obo.as_bytes()), &OboOptions::default().flatten(false))
                .expect("requires valid OBO")
                .len()
        })
    });
    c.bench_function("parse and flatten obo 4000 terms", |b| {
        b.iter(|| {
            Ontology::from_obo(black_box(obo.as_bytes()), &OboOptions::default())
                .expect("requires valid OBO")
                .len()
        })
    });
}

fn from_bytes_benchmark(c: &mut Criterion) {
    let bytes = Ontology::from_obo(diamond_obo(40, 100).as_bytes(), &OboOptions::default())
        .expect("requires valid OBO")
        .as_bytes();
    c.bench_function("ontology from bytes", |b| {
        b.iter(|| {
            Ontology::from_bytes(black_box(&bytes[..]))
                .expect("requires valid bytes")
                .len()
        })
    });
}

criterion_group! {
    name = ontology;
    config = Criterion::default().sample_size(20).measurement_time(Duration::from_secs(10));
    targets = parse_ontology_benchmark, from_bytes_benchmark
}
criterion_main!(ontology);
