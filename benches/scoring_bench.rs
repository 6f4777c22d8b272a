use cipherforge::cipher::{Adfgvx, Playfair, SquareKey};
use cipherforge::config::MutationPolicy;
use cipherforge::consts::{ADFGVX_ALPHABET, PLAYFAIR_ALPHABET};
use cipherforge::optimizer::mutation::mutate_square;
use cipherforge::scorer::NgramScorer;
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn setup_scorer() -> NgramScorer {
    // Synthetic table: every quadgram over the first 12 letters.
    let letters = &PLAYFAIR_ALPHABET.as_bytes()[..12];
    let mut counts = Vec::new();
    for &a in letters {
        for &b in letters {
            for &c in letters {
                for &d in letters {
                    let gram = String::from_utf8(vec![a, b, c, d]).expect("ascii");
                    counts.push((gram, u64::from(a ^ b ^ c ^ d) + 1));
                }
            }
        }
    }
    NgramScorer::from_counts(counts).expect("Failed to build scorer")
}

fn sample_text(len: usize) -> Vec<u8> {
    let mut rng = fastrand::Rng::with_seed(42);
    (0..len)
        .map(|_| PLAYFAIR_ALPHABET.as_bytes()[rng.usize(..25)])
        .collect()
}

fn criterion_benchmark(c: &mut Criterion) {
    let scorer = setup_scorer();
    let text = String::from_utf8(sample_text(600)).expect("ascii");

    c.bench_function("score (600 letters, 20k quadgrams)", |b| {
        b.iter(|| scorer.score(black_box(&text)))
    });

    let mut rng = fastrand::Rng::with_seed(7);
    let playfair_key = SquareKey::shuffled(PLAYFAIR_ALPHABET, &mut rng).expect("key");
    let playfair = Playfair::new(&playfair_key).expect("playfair");
    let playfair_ct = playfair.encrypt(text.as_bytes()).expect("encrypt");

    c.bench_function("playfair build + decrypt (600)", |b| {
        b.iter(|| {
            Playfair::new(black_box(&playfair_key))
                .ok()
                .and_then(|pf| pf.decrypt(black_box(playfair_ct.as_bytes())))
        })
    });

    let square = SquareKey::shuffled(ADFGVX_ALPHABET, &mut rng).expect("square");
    let order = "4 0 6 2 1 3 5".parse().expect("order");
    let adfgvx = Adfgvx::new(&square, order).expect("adfgvx");
    let adfgvx_ct = adfgvx.encrypt(text.as_bytes()).expect("encrypt");

    c.bench_function("adfgvx decrypt (1200 symbols, width 7)", |b| {
        b.iter(|| adfgvx.decrypt(black_box(adfgvx_ct.as_bytes())))
    });

    let policy = MutationPolicy::mixed(0.6, 0.4);
    c.bench_function("square mutation", |b| {
        b.iter(|| mutate_square(black_box(&square), &mut rng, &policy))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
