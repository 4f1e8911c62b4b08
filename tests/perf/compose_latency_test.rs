use std::time::Instant;

use crate::collection::Collections;
use crate::compose::compose;
use crate::model::{ListItem, Profile, ProfileKey};

fn p95_ms(samples: &mut [f64]) -> f64 {
    samples.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let last = samples.len().saturating_sub(1);
    let idx = ((last as f64) * 0.95).round() as usize;
    samples[idx.min(last)]
}

#[test]
fn warm_compose_p95_under_budget() {
    let repository: Vec<ListItem> = (0..5_000)
        .map(|i| {
            ListItem::new(Profile::new(
                if i % 2 == 0 { "chrome" } else { "edge" },
                &format!("Profile {i}"),
                &format!("Person {i:05}"),
            ))
        })
        .collect();

    let history: Vec<ProfileKey> = repository.iter().take(100).map(ListItem::key).collect();
    let mut collections = Collections::new();
    for c in 0..5 {
        let name = format!("set-{c}");
        collections.add(&name).unwrap();
        for item in repository.iter().skip(c * 40).take(40) {
            collections.set_membership(&name, item.key(), true).unwrap();
        }
    }

    for _ in 0..5 {
        let _ = compose(&repository, "person 01", &collections, &history);
    }

    let mut samples = Vec::with_capacity(40);
    for _ in 0..40 {
        let start = Instant::now();
        let lists = compose(&repository, "person 01", &collections, &history);
        samples.push(start.elapsed().as_secs_f64() * 1000.0);
        assert_eq!(lists.tabs().len(), 7);
    }

    let p95 = p95_ms(&mut samples);
    assert!(p95 <= 250.0, "compose p95 too high: {p95:.3}ms (budget 250.0ms)");
}
