#![no_main]

use approx_index::index::{FilterIndexBuilder, IndexConfig, QueryLimits};
use approx_index::query::{Pattern, QueryEngine};
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    reference: Vec<u8>,
    query: Vec<u8>,
    buckets: Option<u16>,
}

fuzz_target!(|input: Input| {
    // Arbitrary queries must either be rejected or answered; never panic.
    let Ok(pattern) = Pattern::new(input.query, &QueryLimits::default()) else {
        return;
    };

    let mut config = IndexConfig::new(pattern.len());
    if let Some(b) = input.buckets {
        config = config.with_buckets(b as usize);
    }
    let Ok(index) = FilterIndexBuilder::new(config).build(&input.reference) else {
        return;
    };

    let result = QueryEngine::new(&index).query(&pattern).unwrap();
    assert!(result.as_slice().windows(2).all(|w| w[0] < w[1]));

    // Every window within distance 2 must be reported
    let len = pattern.len();
    if input.reference.len() >= len {
        for p in 0..=input.reference.len() - len {
            let distance = input.reference[p..p + len]
                .iter()
                .zip(pattern.as_bytes())
                .filter(|(a, b)| a != b)
                .count();
            if distance <= 2 {
                assert!(result.contains(p));
            }
        }
    }
});
