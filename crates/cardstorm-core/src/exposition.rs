//! Prometheus text exposition format (0.0.4) writer.
//!
//! Output per family: `# HELP`, `# TYPE`, then one line per series. Families
//! are written in registration order; series within a family follow the map's
//! iteration order.

use std::fmt::{self, Write};

use crate::registry::{CounterVec, Desc, GaugeVec, Histogram, MetricKind, SeriesStore};

/// Content type to pair with [`encode`] output.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Escape a label value: backslash, double quote, newline.
pub fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// Escape HELP text: backslash and newline only.
pub fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

/// Sample value formatting, including the special float spellings.
struct Value(f64);

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        if v.is_nan() {
            f.write_str("NaN")
        } else if v == f64::INFINITY {
            f.write_str("+Inf")
        } else if v == f64::NEG_INFINITY {
            f.write_str("-Inf")
        } else {
            write!(f, "{v}")
        }
    }
}

fn write_preamble<W: Write>(out: &mut W, desc: Desc, kind: MetricKind) -> fmt::Result {
    writeln!(out, "# HELP {} {}", desc.name, escape_help(desc.help))?;
    writeln!(out, "# TYPE {} {}", desc.name, kind.as_str())
}

fn write_sample<W: Write, const N: usize>(
    out: &mut W,
    name: &str,
    names: &[&'static str; N],
    values: &[String; N],
    v: f64,
) -> fmt::Result {
    out.write_str(name)?;
    if N > 0 {
        out.write_char('{')?;
        for (i, (k, val)) in names.iter().zip(values.iter()).enumerate() {
            if i > 0 {
                out.write_char(',')?;
            }
            write!(out, "{}=\"{}\"", k, escape_label(val))?;
        }
        out.write_char('}')?;
    }
    writeln!(out, " {}", Value(v))
}

/// Families the encoder knows how to write.
pub trait Encode {
    fn encode<W: Write>(&self, out: &mut W) -> fmt::Result;
}

impl<const N: usize> Encode for GaugeVec<N> {
    fn encode<W: Write>(&self, out: &mut W) -> fmt::Result {
        let desc = self.desc();
        write_preamble(out, desc, MetricKind::Gauge)?;
        let mut res = Ok(());
        self.for_each(|labels, v| {
            if res.is_ok() {
                res = write_sample(out, desc.name, self.label_names(), labels, v);
            }
        });
        res
    }
}

impl<const N: usize> Encode for CounterVec<N> {
    fn encode<W: Write>(&self, out: &mut W) -> fmt::Result {
        let desc = self.desc();
        write_preamble(out, desc, MetricKind::Counter)?;
        let mut res = Ok(());
        self.for_each(|labels, v| {
            if res.is_ok() {
                res = write_sample(out, desc.name, self.label_names(), labels, v);
            }
        });
        res
    }
}

impl Encode for Histogram {
    fn encode<W: Write>(&self, out: &mut W) -> fmt::Result {
        let desc = self.desc();
        write_preamble(out, desc, MetricKind::Histogram)?;
        let snap = self.snapshot();
        for (le, count) in &snap.buckets {
            writeln!(out, "{}_bucket{{le=\"{}\"}} {}", desc.name, Value(*le), count)?;
        }
        writeln!(out, "{}_bucket{{le=\"+Inf\"}} {}", desc.name, snap.count)?;
        writeln!(out, "{}_sum {}", desc.name, Value(snap.sum))?;
        writeln!(out, "{}_count {}", desc.name, snap.count)
    }
}

/// Write every family in `store` to `out`.
pub fn encode_into<W: Write>(store: &SeriesStore, out: &mut W) -> fmt::Result {
    store.health_requests().encode(out)?;
    store.health_latency().encode(out)?;
    store.gauge().encode(out)?;
    store.counter().encode(out)
}

/// Render the whole store into a `String`.
pub fn encode(store: &SeriesStore) -> String {
    let mut out = String::new();
    if let Err(e) = encode_into(store, &mut out) {
        tracing::error!(error = %e, "metrics encoding failed");
    }
    out
}
