#![no_main]
use libfuzzer_sys::fuzz_target;
use simmstring::{select_best, JaroWinkler, SortOrder, TargetSet};

fuzz_target!(|data: &[u8]| {
    let Some((&k, rest)) = data.split_first() else {
        return;
    };
    let text = String::from_utf8_lossy(rest);
    let mut lines = text.split('\n');
    let source = lines.next().unwrap_or_default();
    let targets = TargetSet::build(lines);
    let k = usize::from(k % 16) + 1;

    let ranked = select_best(source, &targets, k, &JaroWinkler::default())
        .into_ranked(SortOrder::Descending);
    assert_eq!(ranked.len(), k.min(targets.len()));
    assert!(ranked.iter().all(|p| (0.0..=1.0).contains(&p.score())));
    assert!(ranked.windows(2).all(|w| w[0].score() >= w[1].score()));
});
