//! Generation loop behavior.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use cardstorm_core::exposition::encode;
use cardstorm_core::generator::{generate, GenerateRequest, GenerationReport};
use cardstorm_core::labels::derive;
use cardstorm_core::SeriesStore;

fn req(series_count: u64, value_range: f64) -> GenerateRequest {
    GenerateRequest {
        series_count,
        value_range,
        ..GenerateRequest::default()
    }
}

#[test]
fn defaults() {
    let r = GenerateRequest::default();
    assert_eq!(r.series_count, 10_000);
    assert_eq!(r.value_range, 1_000.0);
}

#[test]
fn generates_requested_series() {
    let store = SeriesStore::new();
    let mut rng = StdRng::seed_from_u64(7);
    let report = generate(&store, &req(25, 100.0), &mut rng).unwrap();

    assert_eq!(report.generated, 25);
    assert_eq!(store.gauge().len(), 25);
    assert_eq!(store.counter().len(), 25);
    for i in 0..25 {
        let v = store.gauge_value(&derive(i)).unwrap();
        assert!((0.0..100.0).contains(&v), "gauge out of range: {v}");
        assert_eq!(store.counter_value(&derive(i)), Some(1.0));
    }
}

#[test]
fn regeneration_reuses_series() {
    let store = SeriesStore::new();
    let mut rng = StdRng::seed_from_u64(1);
    generate(&store, &req(40, 1_000.0), &mut rng).unwrap();
    let first = store.gauge_value(&derive(0)).unwrap();

    let mut rng = StdRng::seed_from_u64(2);
    generate(&store, &req(40, 1_000.0), &mut rng).unwrap();

    assert_eq!(store.gauge().len(), 40);
    assert_eq!(store.counter().len(), 40);
    for i in 0..40 {
        assert_eq!(store.counter_value(&derive(i)), Some(2.0));
    }

    let mut replay = StdRng::seed_from_u64(2);
    let fresh = SeriesStore::new();
    generate(&fresh, &req(40, 1_000.0), &mut replay).unwrap();
    let latest = store.gauge_value(&derive(0)).unwrap();
    assert_eq!(Some(latest), fresh.gauge_value(&derive(0)));
    assert_ne!(first, latest);
}

#[test]
fn larger_count_extends_store() {
    let store = SeriesStore::new();
    let mut rng = StdRng::seed_from_u64(3);
    generate(&store, &req(10, 10.0), &mut rng).unwrap();
    generate(&store, &req(15, 10.0), &mut rng).unwrap();

    assert_eq!(store.gauge().len(), 15);
    assert_eq!(store.counter_value(&derive(9)), Some(2.0));
    assert_eq!(store.counter_value(&derive(14)), Some(1.0));
}

#[test]
fn zero_count_changes_nothing() {
    let store = SeriesStore::new();
    let mut rng = StdRng::seed_from_u64(4);
    generate(&store, &req(3, 100.0), &mut rng).unwrap();
    let before = encode(&store);

    let report = generate(&store, &req(0, 100.0), &mut rng).unwrap();
    assert_eq!(report.generated, 0);
    assert_eq!(encode(&store), before);
}

#[test]
fn non_positive_value_range_is_rejected() {
    let store = SeriesStore::new();
    let mut rng = StdRng::seed_from_u64(5);
    for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let err = generate(&store, &req(5, bad), &mut rng).expect_err("must fail");
        assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
    }
    assert!(store.gauge().is_empty());
}

#[test]
fn duration_is_rounded_to_two_decimals() {
    let report = GenerationReport {
        generated: 1,
        elapsed: Duration::from_millis(1_236),
    };
    assert_eq!(report.duration_secs_rounded(), 1.24);

    let report = GenerationReport {
        generated: 1,
        elapsed: Duration::from_micros(40),
    };
    assert_eq!(report.duration_secs_rounded(), 0.0);
}

#[test]
fn progress_logging_does_not_change_result() {
    let store = SeriesStore::new();
    let mut rng = StdRng::seed_from_u64(6);
    let req = GenerateRequest {
        series_count: 9,
        value_range: 10.0,
        progress_every: 2,
    };
    let report = generate(&store, &req, &mut rng).unwrap();
    assert_eq!(report.generated, 9);
    assert_eq!(store.counter().len(), 9);
}
