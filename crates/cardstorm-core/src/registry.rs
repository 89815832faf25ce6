//! In-process series store.
//!
//! Families are backed by `DashMap` keyed by a fixed-arity array of label
//! values; the label names live on the family, so every series in a family
//! shares the same label set by construction. Values are `f64` stored as bit
//! patterns in `AtomicU64`, which keeps updates to a single series atomic
//! without a per-series mutex.

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::error::{CardstormError, Result};
use crate::labels::{self, LabelTuple};

/// `f64` cell with atomic load/store/add.
#[derive(Debug, Default)]
struct AtomicF64(AtomicU64);

impl AtomicF64 {
    fn load(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Relaxed))
    }

    fn store(&self, v: f64) {
        self.0.store(v.to_bits(), Ordering::Relaxed);
    }

    /// CAS loop so concurrent adds on the same series are never lost.
    fn add(&self, delta: f64) {
        let mut cur = self.0.load(Ordering::Relaxed);
        loop {
            let next = (f64::from_bits(cur) + delta).to_bits();
            match self
                .0
                .compare_exchange_weak(cur, next, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return,
                Err(actual) => cur = actual,
            }
        }
    }
}

/// Metric type as written on the `# TYPE` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Counter,
    Gauge,
    Histogram,
}

impl MetricKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
            MetricKind::Histogram => "histogram",
        }
    }
}

/// Name and help text of a family.
#[derive(Debug, Clone, Copy)]
pub struct Desc {
    pub name: &'static str,
    pub help: &'static str,
}

/// Series map shared by gauge and counter families.
struct Family<const N: usize> {
    desc: Desc,
    label_names: [&'static str; N],
    series: DashMap<[String; N], AtomicF64>,
}

impl<const N: usize> Family<N> {
    fn new(desc: Desc, label_names: [&'static str; N]) -> Self {
        Self {
            desc,
            label_names,
            series: DashMap::new(),
        }
    }

    fn get(&self, labels: &[String; N]) -> Option<f64> {
        self.series.get(labels).map(|v| v.load())
    }

    fn for_each(&self, mut f: impl FnMut(&[String; N], f64)) {
        for r in self.series.iter() {
            f(r.key(), r.value().load());
        }
    }
}

pub struct GaugeVec<const N: usize> {
    family: Family<N>,
}

impl<const N: usize> GaugeVec<N> {
    pub fn new(desc: Desc, label_names: [&'static str; N]) -> Self {
        Self { family: Family::new(desc, label_names) }
    }

    /// Create-or-overwrite. Last write wins.
    pub fn set(&self, labels: [String; N], v: f64) {
        self.family.series.entry(labels).or_default().store(v);
    }

    pub fn get(&self, labels: &[String; N]) -> Option<f64> {
        self.family.get(labels)
    }

    pub fn len(&self) -> usize {
        self.family.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.family.series.is_empty()
    }

    pub fn desc(&self) -> Desc {
        self.family.desc
    }

    pub fn label_names(&self) -> &[&'static str; N] {
        &self.family.label_names
    }

    /// Visit every series with its current value.
    pub fn for_each(&self, f: impl FnMut(&[String; N], f64)) {
        self.family.for_each(f)
    }
}

pub struct CounterVec<const N: usize> {
    family: Family<N>,
}

impl<const N: usize> CounterVec<N> {
    pub fn new(desc: Desc, label_names: [&'static str; N]) -> Self {
        Self { family: Family::new(desc, label_names) }
    }

    /// Create the series at 0 if absent; leaves an existing value alone.
    pub fn touch(&self, labels: [String; N]) {
        self.family.series.entry(labels).or_default();
    }

    /// Increment by 1.
    pub fn inc(&self, labels: [String; N]) {
        self.family.series.entry(labels).or_default().add(1.0);
    }

    /// Increment by `delta`, which must be finite and non-negative.
    pub fn inc_by(&self, labels: [String; N], delta: f64) -> Result<()> {
        if !delta.is_finite() || delta < 0.0 {
            return Err(CardstormError::BadRequest(format!(
                "counter {} can only increase, got delta {delta}",
                self.family.desc.name
            )));
        }
        self.family.series.entry(labels).or_default().add(delta);
        Ok(())
    }

    pub fn get(&self, labels: &[String; N]) -> Option<f64> {
        self.family.get(labels)
    }

    pub fn len(&self) -> usize {
        self.family.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.family.series.is_empty()
    }

    pub fn desc(&self) -> Desc {
        self.family.desc
    }

    pub fn label_names(&self) -> &[&'static str; N] {
        &self.family.label_names
    }

    pub fn for_each(&self, f: impl FnMut(&[String; N], f64)) {
        self.family.for_each(f)
    }
}

// Upper bounds in microseconds: 100us .. 10s.
const BUCKETS_MICROS: [u64; 14] = [
    100, 500, 1_000, 5_000, 10_000, 25_000, 50_000, 100_000, 250_000, 500_000, 1_000_000,
    2_500_000, 5_000_000, 10_000_000,
];

/// Unlabeled latency histogram with fixed buckets.
///
/// Each observation lands in exactly one slot (the first bucket whose bound
/// holds it, or the overflow slot); cumulative counts are computed when a
/// snapshot is taken, so a reader never sees a non-monotonic bucket series.
pub struct Histogram {
    desc: Desc,
    slots: [AtomicU64; BUCKETS_MICROS.len()],
    overflow: AtomicU64,
    sum_nanos: AtomicU64,
}

/// Point-in-time view of a histogram, values in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSnapshot {
    /// `(upper bound in seconds, cumulative count)`, excluding `+Inf`.
    pub buckets: Vec<(f64, u64)>,
    /// Total observations; also the `+Inf` bucket.
    pub count: u64,
    pub sum: f64,
}

impl Histogram {
    pub fn new(desc: Desc) -> Self {
        Self {
            desc,
            slots: Default::default(),
            overflow: AtomicU64::new(0),
            sum_nanos: AtomicU64::new(0),
        }
    }

    pub fn observe(&self, d: Duration) {
        let nanos = u64::try_from(d.as_nanos()).unwrap_or(u64::MAX);
        self.sum_nanos.fetch_add(nanos, Ordering::Relaxed);
        match BUCKETS_MICROS.iter().position(|&b| nanos <= b * 1_000) {
            Some(i) => self.slots[i].fetch_add(1, Ordering::Relaxed),
            None => self.overflow.fetch_add(1, Ordering::Relaxed),
        };
    }

    pub fn snapshot(&self) -> HistogramSnapshot {
        let mut cumulative = 0u64;
        let buckets = BUCKETS_MICROS
            .iter()
            .zip(self.slots.iter())
            .map(|(&b, slot)| {
                cumulative += slot.load(Ordering::Relaxed);
                (b as f64 / 1_000_000.0, cumulative)
            })
            .collect();
        let count = cumulative + self.overflow.load(Ordering::Relaxed);
        let sum = self.sum_nanos.load(Ordering::Relaxed) as f64 / 1_000_000_000.0;
        HistogramSnapshot { buckets, count, sum }
    }

    pub fn desc(&self) -> Desc {
        self.desc
    }
}

/// Every family the process exposes.
///
/// Constructed once at startup and shared by reference; there is no global
/// registry.
pub struct SeriesStore {
    health_requests: CounterVec<0>,
    health_latency: Histogram,
    gauge: GaugeVec<3>,
    counter: CounterVec<3>,
}

impl Default for SeriesStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SeriesStore {
    pub fn new() -> Self {
        let store = Self {
            health_requests: CounterVec::new(
                Desc {
                    name: "health_check_requests_total",
                    help: "Total number of health check requests",
                },
                [],
            ),
            health_latency: Histogram::new(Desc {
                name: "health_check_latency_seconds",
                help: "Latency of health check requests",
            }),
            gauge: GaugeVec::new(
                Desc {
                    name: "high_cardinality_gauge",
                    help: "A gauge metric with extremely high cardinality for testing monitoring stack limits",
                },
                labels::LABEL_NAMES,
            ),
            counter: CounterVec::new(
                Desc {
                    name: "high_cardinality_counter_total",
                    help: "A counter metric with extremely high cardinality for testing monitoring stack limits",
                },
                labels::LABEL_NAMES,
            ),
        };
        // The health counter is a scalar series: it exists from startup at 0.
        store.health_requests.touch([]);
        store
    }

    pub fn set_gauge(&self, labels: &LabelTuple, value: f64) {
        self.gauge.set(labels.clone().into_values(), value);
    }

    pub fn increment_counter(&self, labels: &LabelTuple, delta: f64) -> Result<()> {
        self.counter.inc_by(labels.clone().into_values(), delta)
    }

    /// `increment_counter` with a delta of 1.
    pub fn inc_counter(&self, labels: &LabelTuple) {
        self.counter.inc(labels.clone().into_values());
    }

    pub fn increment_health_counter(&self) {
        self.health_requests.inc([]);
    }

    pub fn observe_latency(&self, d: Duration) {
        self.health_latency.observe(d);
    }

    pub fn gauge_value(&self, labels: &LabelTuple) -> Option<f64> {
        self.gauge.get(&labels.clone().into_values())
    }

    pub fn counter_value(&self, labels: &LabelTuple) -> Option<f64> {
        self.counter.get(&labels.clone().into_values())
    }

    pub fn health_requests(&self) -> &CounterVec<0> {
        &self.health_requests
    }

    pub fn health_latency(&self) -> &Histogram {
        &self.health_latency
    }

    pub fn gauge(&self) -> &GaugeVec<3> {
        &self.gauge
    }

    pub fn counter(&self) -> &CounterVec<3> {
        &self.counter
    }
}
