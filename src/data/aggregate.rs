use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::ops::RangeInclusive;

use super::filter::after_year;
use super::model::RaceResult;
use super::stats::{self, BoxSummary};

// ---------------------------------------------------------------------------
// Summary types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearPoint {
    pub year: i64,
    pub value: f64,
}

/// One line of a per-distance chart, points ordered by year.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceSeries {
    pub distance: String,
    pub points: Vec<YearPoint>,
}

/// All finish times of one year, in hours.
#[derive(Debug, Clone, PartialEq)]
pub struct YearDistribution {
    pub year: i64,
    pub hours: Vec<f64>,
    pub mean_hours: f64,
    pub spread: BoxSummary,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgeQuartiles {
    pub year: i64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearCount {
    pub year: i64,
    pub count: usize,
}

// ---------------------------------------------------------------------------
// Finish time over time
// ---------------------------------------------------------------------------

/// Mean finish time in hours per (distance, year); one series per distance.
pub fn performance_over_time(results: &[RaceResult]) -> Vec<DistanceSeries> {
    mean_hours_by_distance_year(results.iter())
}

/// [`performance_over_time`] restricted to events after `cutoff`.
pub fn performance_over_time_since(results: &[RaceResult], cutoff: i64) -> Vec<DistanceSeries> {
    mean_hours_by_distance_year(after_year(results, cutoff))
}

fn mean_hours_by_distance_year<'a>(
    results: impl Iterator<Item = &'a RaceResult>,
) -> Vec<DistanceSeries> {
    // Summed as f64: the parser puts no upper bound on hours.
    let mut sums: BTreeMap<(&str, i64), (f64, usize)> = BTreeMap::new();
    for r in results {
        let Some(distance) = r.distance.as_deref() else {
            continue;
        };
        let entry = sums.entry((distance, r.year)).or_default();
        entry.0 += r.performance_sec as f64;
        entry.1 += 1;
    }

    into_series(
        sums.into_iter()
            .map(|(key, (total, n))| (key, total / n as f64 / 3600.0)),
    )
}

/// Regroup `(distance, year) → value` pairs, already in key order, into series.
fn into_series<'a>(values: impl Iterator<Item = ((&'a str, i64), f64)>) -> Vec<DistanceSeries> {
    let mut series: Vec<DistanceSeries> = Vec::new();
    for ((distance, year), value) in values {
        match series.last_mut() {
            Some(s) if s.distance == distance => s.points.push(YearPoint { year, value }),
            _ => series.push(DistanceSeries {
                distance: distance.to_string(),
                points: vec![YearPoint { year, value }],
            }),
        }
    }
    series
}

// ---------------------------------------------------------------------------
// Finishers per year
// ---------------------------------------------------------------------------

/// Total finishers per (year, distance) after `cutoff`.
///
/// Every result row repeats its event's finisher count, so only the first row
/// per (event name, year, distance) is counted. Missing counts add zero.
pub fn finishers_per_year(results: &[RaceResult], cutoff: i64) -> Vec<DistanceSeries> {
    let mut seen: HashSet<(Option<&str>, i64, Option<&str>)> = HashSet::new();
    let mut totals: BTreeMap<(&str, i64), f64> = BTreeMap::new();

    for r in after_year(results, cutoff) {
        let key = (r.event_name.as_deref(), r.year, r.distance.as_deref());
        if !seen.insert(key) {
            continue;
        }
        let Some(distance) = r.distance.as_deref() else {
            continue;
        };
        *totals.entry((distance, r.year)).or_default() += r.finishers.unwrap_or(0.0);
    }

    into_series(totals.into_iter())
}

// ---------------------------------------------------------------------------
// Finish time distribution for one distance
// ---------------------------------------------------------------------------

/// Per-year finish times for `distance` after `cutoff`, keeping only years
/// with more than `min_observations` finishers. Years ascend.
pub fn time_distribution(
    results: &[RaceResult],
    cutoff: i64,
    distance: &str,
    min_observations: usize,
) -> Vec<YearDistribution> {
    let mut by_year: BTreeMap<i64, Vec<f64>> = BTreeMap::new();
    for r in after_year(results, cutoff).filter(|r| r.distance.as_deref() == Some(distance)) {
        by_year.entry(r.year).or_default().push(r.performance_hours());
    }

    by_year
        .into_iter()
        .filter(|(_, hours)| hours.len() > min_observations)
        .filter_map(|(year, hours)| {
            Some(YearDistribution {
                year,
                mean_hours: stats::mean(&hours)?,
                spread: BoxSummary::from_values(&hours)?,
                hours,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Age distribution
// ---------------------------------------------------------------------------

/// Median and interquartile range of finisher ages per year after `cutoff`.
/// Ages outside `ages` (inclusive) and missing ages are ignored.
pub fn age_distribution(
    results: &[RaceResult],
    cutoff: i64,
    ages: RangeInclusive<f64>,
) -> Vec<AgeQuartiles> {
    let mut by_year: BTreeMap<i64, Vec<f64>> = BTreeMap::new();
    for r in after_year(results, cutoff) {
        if let Some(age) = r.age.filter(|a| ages.contains(a)) {
            by_year.entry(r.year).or_default().push(age);
        }
    }

    by_year
        .into_iter()
        .filter_map(|(year, ages)| {
            let sorted = stats::sorted(&ages);
            Some(AgeQuartiles {
                year,
                q1: stats::quantile_sorted(&sorted, 0.25)?,
                median: stats::quantile_sorted(&sorted, 0.5)?,
                q3: stats::quantile_sorted(&sorted, 0.75)?,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Country participation
// ---------------------------------------------------------------------------

/// Number of distinct athlete countries per year after `cutoff`.
pub fn country_counts(results: &[RaceResult], cutoff: i64) -> Vec<YearCount> {
    let mut by_year: BTreeMap<i64, BTreeSet<&str>> = BTreeMap::new();
    for r in after_year(results, cutoff) {
        let countries = by_year.entry(r.year).or_default();
        if let Some(country) = r.country.as_deref() {
            countries.insert(country);
        }
    }

    by_year
        .into_iter()
        .map(|(year, countries)| YearCount {
            year,
            count: countries.len(),
        })
        .collect()
}
