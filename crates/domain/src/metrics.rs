use std::{
    collections::{BTreeMap, btree_map},
    ops::{Add, AddAssign},
};

use strum::IntoEnumIterator;

/// Canonical metric keys shared by every associator.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "camelCase")]
pub enum Metric {
    TotalSets,
    TotalReps,
    TotalStrengthDuration,
    TotalIntervalDuration,
    TotalEnduranceDuration,
    TotalRestTimeBetween,
    TotalDuration,
}

/// Snapshot of metric values.
///
/// A snapshot emitted by a single exercise only contains the keys relevant to its kind. Absent
/// keys read as zero. Stored values are always finite and non-negative.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Metrics(BTreeMap<Metric, f64>);

impl Metrics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot containing every canonical key set to zero.
    #[must_use]
    pub fn zero() -> Self {
        Self(Metric::iter().map(|m| (m, 0.0)).collect())
    }

    /// Fold snapshots into a complete snapshot.
    ///
    /// The result contains every canonical key, also if `metrics` is empty.
    pub fn sum<'a>(metrics: impl IntoIterator<Item = &'a Metrics>) -> Self {
        let mut result = Self::zero();
        for m in metrics {
            result += m;
        }
        result
    }

    #[must_use]
    pub fn with(mut self, metric: Metric, value: f64) -> Self {
        self.insert(metric, value);
        self
    }

    pub fn insert(&mut self, metric: Metric, value: f64) {
        self.0.insert(metric, sanitize(value));
    }

    #[must_use]
    pub fn get(&self, metric: Metric) -> f64 {
        self.0.get(&metric).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn contains(&self, metric: Metric) -> bool {
        self.0.contains_key(&metric)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Metric, f64> {
        self.0.iter()
    }
}

impl AddAssign<&Metrics> for Metrics {
    fn add_assign(&mut self, rhs: &Metrics) {
        for (metric, value) in &rhs.0 {
            let sum = self.get(*metric) + value;
            self.insert(*metric, sum);
        }
    }
}

impl Add<&Metrics> for Metrics {
    type Output = Metrics;

    fn add(mut self, rhs: &Metrics) -> Self::Output {
        self += rhs;
        self
    }
}

impl FromIterator<(Metric, f64)> for Metrics {
    fn from_iter<T: IntoIterator<Item = (Metric, f64)>>(iter: T) -> Self {
        let mut result = Self::new();
        for (metric, value) in iter {
            result.insert(metric, value);
        }
        result
    }
}

impl<'a> IntoIterator for &'a Metrics {
    type Item = (&'a Metric, &'a f64);
    type IntoIter = btree_map::Iter<'a, Metric, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// Saturates at f64::MAX, maps NaN and negative values to zero.
fn sanitize(value: f64) -> f64 {
    if value.is_nan() || value <= 0.0 {
        0.0
    } else {
        value.min(f64::MAX)
    }
}
