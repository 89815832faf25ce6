//! Deterministic label derivation for the high-cardinality families.
//!
//! Every index maps to exactly one `(series_id, dimension_alpha, dimension_beta)`
//! triple. `series_id` is injective over the index; the two dimensions cycle
//! through small fixed enumerations, so cardinality grows with `series_id` only.

/// Label names shared by the high-cardinality gauge and counter, in key order.
pub const LABEL_NAMES: [&str; 3] = ["series_id", "dimension_alpha", "dimension_beta"];

pub const ALPHA_VALUES: [&str; 7] = [
    "group_A", "group_B", "group_C", "group_D", "group_E", "group_F", "group_G",
];

pub const BETA_VALUES: [&str; 4] = ["type_X", "type_Y", "type_Z", "type_W"];

const SERIES_ID_PREFIX: &str = "unique_series_";

/// Label values for one generated series.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LabelTuple {
    pub series_id: String,
    pub alpha: &'static str,
    pub beta: &'static str,
}

impl LabelTuple {
    /// Owned key in `LABEL_NAMES` order.
    pub fn into_values(self) -> [String; 3] {
        [self.series_id, self.alpha.to_string(), self.beta.to_string()]
    }
}

/// Derive the label tuple for `index`. Pure and O(1).
pub fn derive(index: u64) -> LabelTuple {
    // usize is at least 32 bits on supported targets and both moduli are tiny.
    let alpha = ALPHA_VALUES[(index % ALPHA_VALUES.len() as u64) as usize];
    let beta = BETA_VALUES[(index % BETA_VALUES.len() as u64) as usize];
    LabelTuple {
        series_id: format!("{SERIES_ID_PREFIX}{index}"),
        alpha,
        beta,
    }
}
