// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
use page_builder_engine::indicator::Rect;

/// `rows` rows of `per_row` equal leaves with a 10px gap between them
#[allow(dead_code)]
pub fn leaf_grid(rows: usize, per_row: usize) -> Vec<Rect> {
    let width = 80.0;
    let height = 40.0;
    let gap = 10.0;
    let mut leaves = Vec::with_capacity(rows * per_row);
    for row in 0..rows {
        for column in 0..per_row {
            leaves.push(Rect::from_origin_size(
                gap + column as f64 * (width + gap),
                gap + row as f64 * (height + gap),
                width,
                height,
            ));
        }
    }
    leaves
}

/// Section box enclosing `leaf_grid(rows, per_row)`
#[allow(dead_code)]
pub fn section_for(rows: usize, per_row: usize) -> Rect {
    Rect::from_origin_size(
        0.0,
        0.0,
        10.0 + per_row as f64 * 90.0,
        10.0 + rows as f64 * 50.0,
    )
}
