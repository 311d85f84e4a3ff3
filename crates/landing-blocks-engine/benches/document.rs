use criterion::{Criterion, black_box, criterion_group, criterion_main};
use landing_blocks_engine::editing::{Direction, Document};
use landing_blocks_engine::models::BlockKind;
use landing_blocks_engine::render::render_page;
mod common;

fn bench_block_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("block_operations");
    group.sample_size(20);

    group.bench_function("add_200_blocks", |b| {
        b.iter(|| {
            let doc = common::generate_page(black_box(200));
            black_box(doc);
        });
    });

    let doc = common::generate_page(200);
    let last = doc.blocks()[doc.len() - 1].id.to_string();
    group.bench_function("move_last_block_to_top", |b| {
        b.iter(|| {
            let mut doc = doc.clone();
            while doc.move_block(&last, Direction::Up).unwrap() {}
            black_box(doc);
        });
    });

    group.bench_function("add_after_many_same_kind", |b| {
        let mut doc = Document::new("Heroes");
        for _ in 0..200 {
            doc.add_block(BlockKind::Hero);
        }
        b.iter(|| {
            let mut doc = doc.clone();
            black_box(doc.add_block(BlockKind::Hero).id.clone());
        });
    });

    group.finish();
}

fn bench_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("rendering");
    group.sample_size(20);

    let doc = common::generate_page(100);
    group.bench_function("render_page", |b| {
        b.iter(|| black_box(render_page(&doc)));
    });

    group.bench_function("serialize_record", |b| {
        b.iter(|| black_box(serde_json::to_string(&doc.to_record()).unwrap()));
    });

    group.finish();
}

criterion_group!(benches, bench_block_operations, bench_rendering);
criterion_main!(benches);
