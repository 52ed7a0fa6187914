use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tetris_fumen::codec::{decode, encode, Page, Piece, PieceType, Rotation};

/// A 20-page stack build-up with a comment every fifth page
fn sample_pages() -> Vec<Page> {
    let mut pages = Vec::new();
    let mut page = Page::default();
    for i in 0..20usize {
        let kind = PieceType::from_code((i % 7) as u8 + 1).unwrap_or_default();
        page.piece = Piece::new(kind, Rotation::North, (220 + i % 10) as u8);
        page.field.set(i % 10, 23 - i / 10, kind.code());
        page.flags.comment = if i % 5 == 0 {
            format!("page {}: build", i)
        } else {
            String::new()
        };
        pages.push(page.clone());
    }
    pages
}

fn bench_encode(c: &mut Criterion) {
    let pages = sample_pages();

    c.bench_function("encode_20_pages", |b| {
        b.iter(|| encode(black_box(&pages)))
    });
}

fn bench_decode(c: &mut Criterion) {
    let text = encode(&sample_pages()).unwrap();

    c.bench_function("decode_20_pages", |b| {
        b.iter(|| decode(black_box(&text)))
    });
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
