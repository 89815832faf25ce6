//! Text exposition output.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::Duration;

use cardstorm_core::exposition::{encode, escape_help, escape_label, Encode};
use cardstorm_core::labels::{derive, LabelTuple};
use cardstorm_core::registry::{Desc, GaugeVec};
use cardstorm_core::SeriesStore;

fn sample_lines<'a>(out: &'a str, name: &str) -> Vec<&'a str> {
    let prefix = format!("{name}{{");
    out.lines().filter(|l| l.starts_with(&prefix)).collect()
}

fn label_part(t: &LabelTuple) -> String {
    format!(
        "{{series_id=\"{}\",dimension_alpha=\"{}\",dimension_beta=\"{}\"}}",
        t.series_id, t.alpha, t.beta
    )
}

#[test]
fn empty_store_emits_preambles_only() {
    let out = encode(&SeriesStore::new());
    assert!(out.contains("# HELP high_cardinality_gauge A gauge metric with extremely high cardinality for testing monitoring stack limits\n"));
    assert!(out.contains("# TYPE high_cardinality_gauge gauge\n"));
    assert!(out.contains("# TYPE high_cardinality_counter_total counter\n"));
    assert!(out.contains("# TYPE health_check_requests_total counter\n"));
    assert!(out.contains("# TYPE health_check_latency_seconds histogram\n"));
    assert!(sample_lines(&out, "high_cardinality_gauge").is_empty());
    assert!(sample_lines(&out, "high_cardinality_counter_total").is_empty());
    assert!(out.ends_with('\n'));
}

#[test]
fn five_series_are_complete() {
    let store = SeriesStore::new();
    for i in 0..5 {
        let t = derive(i);
        store.set_gauge(&t, i as f64 + 0.5);
        store.inc_counter(&t);
    }
    let out = encode(&store);

    let gauges = sample_lines(&out, "high_cardinality_gauge");
    let counters = sample_lines(&out, "high_cardinality_counter_total");
    assert_eq!(gauges.len(), 5);
    assert_eq!(counters.len(), 5);

    for i in 0..5 {
        let t = derive(i);
        let g = format!("high_cardinality_gauge{} {}", label_part(&t), i as f64 + 0.5);
        let c = format!("high_cardinality_counter_total{} 1", label_part(&t));
        assert!(gauges.contains(&g.as_str()), "missing {g}");
        assert!(counters.contains(&c.as_str()), "missing {c}");
    }
}

#[test]
fn preamble_precedes_samples() {
    let store = SeriesStore::new();
    store.set_gauge(&derive(0), 1.0);
    let out = encode(&store);
    let help = out.find("# HELP high_cardinality_gauge ").unwrap();
    let ty = out.find("# TYPE high_cardinality_gauge gauge").unwrap();
    let sample = out.find("high_cardinality_gauge{").unwrap();
    assert!(help < ty && ty < sample);
}

#[test]
fn health_series_render_without_braces() {
    let store = SeriesStore::new();
    store.increment_health_counter();
    store.observe_latency(Duration::from_micros(200));
    let out = encode(&store);

    assert!(out.contains("\nhealth_check_requests_total 1\n"));
    assert!(out.contains("health_check_latency_seconds_bucket{le=\"0.0001\"} 0\n"));
    assert!(out.contains("health_check_latency_seconds_bucket{le=\"0.0005\"} 1\n"));
    assert!(out.contains("health_check_latency_seconds_bucket{le=\"10\"} 1\n"));
    assert!(out.contains("health_check_latency_seconds_bucket{le=\"+Inf\"} 1\n"));
    assert!(out.contains("health_check_latency_seconds_sum 0.0002\n"));
    assert!(out.contains("health_check_latency_seconds_count 1\n"));
}

#[test]
fn label_values_are_escaped() {
    assert_eq!(escape_label(r#"a\b"c"#), r#"a\\b\"c"#);
    assert_eq!(escape_label("line\nbreak"), "line\\nbreak");
    assert_eq!(escape_help("x\\y\n\"z\""), "x\\\\y\\n\"z\"");

    let gauge: GaugeVec<1> = GaugeVec::new(
        Desc {
            name: "odd_gauge",
            help: "help with\nnewline",
        },
        ["path"],
    );
    gauge.set(["C:\\tmp\n\"x\"".into()], 2.0);
    let mut out = String::new();
    gauge.encode(&mut out).unwrap();
    assert_eq!(
        out,
        "# HELP odd_gauge help with\\nnewline\n# TYPE odd_gauge gauge\nodd_gauge{path=\"C:\\\\tmp\\n\\\"x\\\"\"} 2\n"
    );
}

#[test]
fn special_values_use_format_spelling() {
    let gauge: GaugeVec<1> = GaugeVec::new(Desc { name: "g", help: "h" }, ["k"]);
    gauge.set(["nan".into()], f64::NAN);
    gauge.set(["pinf".into()], f64::INFINITY);
    gauge.set(["ninf".into()], f64::NEG_INFINITY);
    let mut out = String::new();
    gauge.encode(&mut out).unwrap();
    assert!(out.contains("g{k=\"nan\"} NaN\n"));
    assert!(out.contains("g{k=\"pinf\"} +Inf\n"));
    assert!(out.contains("g{k=\"ninf\"} -Inf\n"));
}

#[test]
fn repeated_encodes_of_unchanged_store_match() {
    let store = SeriesStore::new();
    for i in 0..100 {
        store.set_gauge(&derive(i), 3.0);
        store.inc_counter(&derive(i));
    }
    assert_eq!(encode(&store), encode(&store));
}

#[test]
fn health_counter_is_exposed_at_zero_from_start() {
    let out = encode(&SeriesStore::new());
    assert!(out.lines().any(|l| l == "health_check_requests_total 0"));
    assert!(out.lines().any(|l| l == "health_check_latency_seconds_count 0"));
}
