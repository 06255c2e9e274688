use std::collections::{BTreeSet, HashMap};

use super::error::DataError;
use super::model::{columns, CleanedDataset, RaceResult, RawTable, TopDistanceDataset};
use super::performance::performance_seconds;

// ---------------------------------------------------------------------------
// Cleaning: raw table → typed results
// ---------------------------------------------------------------------------

/// Derive `performance_sec` and keep rows with a parsed performance and an integer year.
///
/// Fails only when one of the expected columns is absent from the table.
pub fn clean(table: &RawTable) -> Result<CleanedDataset, DataError> {
    let idx = |name: &str| {
        table
            .column_index(name)
            .ok_or_else(|| DataError::MissingColumn(name.to_string()))
    };
    let performance = idx(columns::PERFORMANCE)?;
    let year = idx(columns::YEAR)?;
    let distance = idx(columns::DISTANCE)?;
    let finishers = idx(columns::FINISHERS)?;
    let event_name = idx(columns::EVENT_NAME)?;
    let age = idx(columns::AGE)?;
    let country = idx(columns::COUNTRY)?;

    let mut results = Vec::with_capacity(table.len());
    for row in &table.rows {
        let Some(performance_sec) = row[performance].as_str().and_then(performance_seconds) else {
            continue;
        };
        let Some(year) = row[year].as_i64() else {
            continue;
        };

        results.push(RaceResult {
            event_name: row[event_name].as_label(),
            year,
            distance: row[distance].as_label(),
            finishers: row[finishers].as_f64(),
            performance_sec,
            age: row[age].as_f64(),
            country: row[country].as_label(),
        });
    }

    let dropped = table.len() - results.len();
    log::debug!(
        "Cleaning kept {} rows, dropped {dropped} with missing performance or year",
        results.len()
    );
    Ok(CleanedDataset { results, dropped })
}

// ---------------------------------------------------------------------------
// Top-K distance selection
// ---------------------------------------------------------------------------

/// The `k` most frequent distance labels, most frequent first.
///
/// Equal counts are ordered by label so the selection never depends on row order.
pub fn top_distances(results: &[RaceResult], k: usize) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for r in results {
        if let Some(d) = r.distance.as_deref() {
            *counts.entry(d).or_default() += 1;
        }
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|(la, ca), (lb, cb)| cb.cmp(ca).then_with(|| la.cmp(lb)));
    ranked
        .into_iter()
        .take(k)
        .map(|(label, _)| label.to_string())
        .collect()
}

/// Keep only the rows whose distance is one of the `k` most frequent.
pub fn filter_top_distances(results: &[RaceResult], k: usize) -> TopDistanceDataset {
    let distances = top_distances(results, k);
    let selected: BTreeSet<&str> = distances.iter().map(String::as_str).collect();

    let kept = results
        .iter()
        .filter(|r| r.distance.as_deref().is_some_and(|d| selected.contains(d)))
        .cloned()
        .collect();

    log::info!("Top {k} distances: {distances:?}");
    TopDistanceDataset {
        distances,
        results: kept,
    }
}

/// Rows from events held strictly after `cutoff`.
pub fn after_year(results: &[RaceResult], cutoff: i64) -> impl Iterator<Item = &RaceResult> {
    results.iter().filter(move |r| r.year > cutoff)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::data::model::CellValue;
    use proptest::prelude::*;

    pub(crate) fn result(distance: &str, year: i64) -> RaceResult {
        RaceResult {
            event_name: Some(format!("{distance} race")),
            year,
            distance: Some(distance.to_string()),
            finishers: Some(10.0),
            performance_sec: 3600,
            age: Some(40.0),
            country: Some("USA".to_string()),
        }
    }

    fn raw_table(rows: &[[&str; 7]]) -> RawTable {
        let mut table = RawTable::new(columns::REQUIRED.iter().map(|c| c.to_string()).collect());
        for row in rows {
            table.push_row(
                row.iter()
                    .map(|cell| match cell.parse::<i64>() {
                        Ok(i) => CellValue::Integer(i),
                        Err(_) if cell.is_empty() => CellValue::Null,
                        Err(_) => CellValue::String(cell.to_string()),
                    })
                    .collect(),
            );
        }
        table
    }

    #[test]
    fn clean_drops_unparsed_performance_and_missing_year() {
        // Event name, year, distance, finishers, performance, country, age
        let table = raw_table(&[
            ["A", "2018", "50km", "120", "4:00:00 h", "USA", "35"],
            ["A", "2018", "50km", "120", "DNF", "USA", "35"],
            ["B", "", "50km", "80", "5:00:00 h", "FRA", "41"],
            ["C", "2019", "", "", "6:00:00 h", "", ""],
        ]);

        let cleaned = clean(&table).unwrap();
        assert_eq!(cleaned.len(), 2);
        assert_eq!(cleaned.dropped, 2);

        let first = &cleaned.results[0];
        assert_eq!(first.performance_sec, 4 * 3600);
        assert_eq!(first.year, 2018);
        assert_eq!(first.finishers, Some(120.0));
        assert_eq!(first.age, Some(35.0));

        let last = &cleaned.results[1];
        assert_eq!(last.distance, None);
        assert_eq!(last.country, None);
        assert_eq!(last.finishers, None);
    }

    #[test]
    fn clean_keeps_fractional_finisher_counts() {
        let mut table = raw_table(&[["A", "2018", "50km", "", "4:00:00 h", "USA", "35"]]);
        table.rows[0][3] = CellValue::Float(12.5);
        let cleaned = clean(&table).unwrap();
        assert_eq!(cleaned.results[0].finishers, Some(12.5));
    }

    #[test]
    fn clean_requires_expected_columns() {
        let table = RawTable::new(vec![columns::PERFORMANCE.to_string()]);
        let err = clean(&table).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn(_)));
    }

    #[test]
    fn top_distances_ranks_by_frequency() {
        let mut results = Vec::new();
        results.extend((0..5).map(|_| result("100km", 2000)));
        results.extend((0..9).map(|_| result("50km", 2000)));
        results.extend((0..2).map(|_| result("10km", 2000)));
        assert_eq!(top_distances(&results, 2), vec!["50km", "100km"]);
        assert_eq!(top_distances(&results, 10).len(), 3);
    }

    #[test]
    fn top_distance_ties_break_by_label() {
        let results: Vec<_> = ["6h", "50mi", "50km", "6h", "50mi", "50km"]
            .iter()
            .map(|d| result(d, 2000))
            .collect();
        assert_eq!(top_distances(&results, 2), vec!["50km", "50mi"]);
    }

    #[test]
    fn filter_keeps_only_selected_labels() {
        let mut results = Vec::new();
        results.extend((0..4).map(|_| result("50km", 2000)));
        results.extend((0..3).map(|_| result("100km", 2000)));
        results.extend((0..1).map(|_| result("10km", 2000)));
        let mut unlabelled = result("50km", 2000);
        unlabelled.distance = None;
        results.push(unlabelled);

        let top = filter_top_distances(&results, 2);
        assert_eq!(top.len(), 7);
        let labels: BTreeSet<_> = top.results.iter().filter_map(|r| r.distance.clone()).collect();
        assert_eq!(labels.len(), 2);
        assert!(top.results.iter().all(|r| r.distance.is_some()));
    }

    #[test]
    fn after_year_is_strict() {
        let results = vec![result("50km", 1950), result("50km", 1951)];
        let years: Vec<_> = after_year(&results, 1950).map(|r| r.year).collect();
        assert_eq!(years, vec![1951]);
    }

    proptest! {
        #[test]
        fn top_labels_outrank_every_other_label(
            labels in proptest::collection::vec(0u8..6, 0..60),
            k in 0usize..5,
        ) {
            let results: Vec<_> = labels.iter().map(|n| result(&format!("d{n}"), 2000)).collect();
            let mut counts: HashMap<String, usize> = HashMap::new();
            for n in &labels {
                *counts.entry(format!("d{n}")).or_default() += 1;
            }

            let top = top_distances(&results, k);
            prop_assert_eq!(top.len(), k.min(counts.len()));

            let selected: BTreeSet<&str> = top.iter().map(String::as_str).collect();
            prop_assert_eq!(selected.len(), top.len());
            let weakest_selected = top.iter().map(|l| counts[l]).min().unwrap_or(usize::MAX);
            for (label, count) in &counts {
                if !selected.contains(label.as_str()) {
                    prop_assert!(*count <= weakest_selected, "{label} ({count}) left out");
                }
            }

            let kept = filter_top_distances(&results, k);
            prop_assert!(kept
                .results
                .iter()
                .all(|r| r.distance.as_deref().is_some_and(|d| selected.contains(d))));
            let expected: usize = top.iter().map(|l| counts[l]).sum();
            prop_assert_eq!(kept.len(), expected);
        }
    }
}
