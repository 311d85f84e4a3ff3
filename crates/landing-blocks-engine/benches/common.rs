use landing_blocks_engine::editing::Document;
use landing_blocks_engine::models::BlockKind;

// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_page(blocks: usize) -> Document {
    let mut doc = Document::new("Benchmark page");
    for i in 0..blocks {
        doc.add_block(BlockKind::ALL[i % BlockKind::ALL.len()]);
    }
    doc
}
