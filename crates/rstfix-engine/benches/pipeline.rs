use criterion::{Criterion, criterion_group, criterion_main};
use rstfix_engine::{Document, Pipeline};

/// Repeat a page mixing every legacy pattern with plain prose.
fn generate_rst_content(sections: usize) -> String {
    let mut content = String::new();
    for i in 0..sections {
        content.push_str(&format!("Section {i}\n==========\n\n"));
        content.push_str("| ``ipa-server-install --setup-dns``\n");
        content.push_str("| ``--forwarder=192.0.2.1``\n\n");
        content.push_str("| **Note: \\`named\\` must   be restarted**\n");
        content.push_str("Use **``ipa-getcert``** and the ``certmonger``* service.\n");
        content.push_str("    ipa user-add jdoe\n| *``--first=John``\n....\n\n");
        content.push_str("+------+------+\n| ``a`` | ``b`` |\n+------+------+\n\n");
        content.push_str("Plain paragraph text that no rule touches at all.\n\n");
    }
    content
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    group.sample_size(10);

    let content = generate_rst_content(200);
    let pipeline = Pipeline::standard();

    group.bench_function("standard", |b| {
        b.iter(|| {
            let mut document = Document::from_text(std::hint::black_box(&content));
            let stats = pipeline.run(&mut document);
            std::hint::black_box((document, stats));
        });
    });

    group.bench_function("from_text", |b| {
        b.iter(|| std::hint::black_box(Document::from_text(std::hint::black_box(&content))));
    });

    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
