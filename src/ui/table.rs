use eframe::egui::{Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::chart::{ChartKind, ChartSummary};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Summary table (bottom panel)
// ---------------------------------------------------------------------------

/// Show the numbers behind the current chart.
pub fn summary_table(ui: &mut Ui, state: &AppState) {
    let Some(summary) = &state.summary else {
        return;
    };
    let (headers, rows) = summary_rows(state.chart, summary);

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .columns(Column::auto().at_least(90.0), headers.len())
        .header(20.0, |mut header| {
            for title in &headers {
                header.col(|ui: &mut Ui| {
                    ui.strong(*title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let cells = &rows[row.index()];
                for cell in cells {
                    row.col(|ui: &mut Ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}

/// Column headers and formatted rows for a summary.
pub fn summary_rows(
    kind: ChartKind,
    summary: &ChartSummary,
) -> (Vec<&'static str>, Vec<Vec<String>>) {
    match summary {
        ChartSummary::Series(series) => {
            let value = |v: f64| match kind {
                ChartKind::FinishersPerYear => format!("{v:.0}"),
                _ => format!("{v:.2}"),
            };
            let rows = series
                .iter()
                .flat_map(|s| {
                    s.points
                        .iter()
                        .map(move |p| vec![s.distance.clone(), p.year.to_string(), value(p.value)])
                })
                .collect();
            (vec!["Distance", "Year", kind.y_label()], rows)
        }
        ChartSummary::Distribution(years) => {
            let rows = years
                .iter()
                .map(|y| {
                    vec![
                        y.year.to_string(),
                        y.hours.len().to_string(),
                        format!("{:.2}", y.mean_hours),
                        format!("{:.2}", y.spread.median),
                        format!("{:.2}", y.spread.q1),
                        format!("{:.2}", y.spread.q3),
                    ]
                })
                .collect();
            (
                vec!["Year", "Finishers", "Mean (h)", "Median (h)", "Q1 (h)", "Q3 (h)"],
                rows,
            )
        }
        ChartSummary::Ages(years) => {
            let rows = years
                .iter()
                .map(|y| {
                    vec![
                        y.year.to_string(),
                        format!("{:.1}", y.median),
                        format!("{:.1}", y.q1),
                        format!("{:.1}", y.q3),
                    ]
                })
                .collect();
            (vec!["Year", "Median age", "25th pct", "75th pct"], rows)
        }
        ChartSummary::Counts(years) => {
            let rows = years
                .iter()
                .map(|y| vec![y.year.to_string(), y.count.to_string()])
                .collect();
            (vec!["Year", "Countries"], rows)
        }
    }
}
