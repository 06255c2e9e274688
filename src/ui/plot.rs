use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{
    BoxElem, BoxPlot, BoxSpread, Legend, Line, LineStyle, Plot, PlotUi, Points, Polygon,
};

use crate::chart::ChartSummary;
use crate::data::aggregate::{AgeQuartiles, DistanceSeries, YearCount, YearDistribution};
use crate::state::AppState;

const MEAN_COLOR: Color32 = Color32::RED;
const MEDIAN_COLOR: Color32 = Color32::from_rgb(40, 90, 220);
const COUNTRY_COLOR: Color32 = Color32::from_rgb(30, 150, 60);

// ---------------------------------------------------------------------------
// Chart plot (central panel)
// ---------------------------------------------------------------------------

/// Render the selected chart in the central panel.
pub fn chart_plot(ui: &mut Ui, state: &AppState) {
    let summary = match &state.summary {
        Some(summary) => summary,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a file to view race trends  (File → Open…)");
            });
            return;
        }
    };

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(state.chart.title(&state.config));
    });

    if summary.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No data for this chart with the current parameters.");
        });
        return;
    }

    Plot::new(("chart", state.chart))
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label(state.chart.y_label())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| match summary {
            ChartSummary::Series(series) => distance_lines(plot_ui, state, series),
            ChartSummary::Distribution(years) => distribution(plot_ui, state, years),
            ChartSummary::Ages(years) => age_band(plot_ui, years),
            ChartSummary::Counts(years) => country_line(plot_ui, years),
        });
}

fn year_points(points: impl Iterator<Item = (i64, f64)>) -> Vec<[f64; 2]> {
    points.map(|(year, value)| [year as f64, value]).collect()
}

/// One line with markers per distance.
fn distance_lines(plot_ui: &mut PlotUi, state: &AppState, series: &[DistanceSeries]) {
    for s in series {
        let color = state.color_map.color_for(&s.distance);
        let points = || year_points(s.points.iter().map(|p| (p.year, p.value)));

        plot_ui.line(
            Line::new(points())
                .name(&s.distance)
                .color(color)
                .width(2.0),
        );
        plot_ui.points(Points::new(points()).name(&s.distance).color(color).radius(3.0));
    }
}

/// Box per year (no outliers) with the yearly mean overlaid.
fn distribution(plot_ui: &mut PlotUi, state: &AppState, years: &[YearDistribution]) {
    let color = state.color_map.color_for(&state.config.focus_distance);

    let boxes: Vec<BoxElem> = years
        .iter()
        .map(|y| {
            let s = y.spread;
            BoxElem::new(
                y.year as f64,
                BoxSpread::new(s.lower_whisker, s.q1, s.median, s.q3, s.upper_whisker),
            )
            .name(y.year.to_string())
            .box_width(0.6)
            .whisker_width(0.3)
            .fill(color.gamma_multiply(0.4))
            .stroke(Stroke::new(1.0, color))
        })
        .collect();
    let label = format!("{} finish times", state.config.focus_distance);
    plot_ui.box_plot(BoxPlot::new(boxes).name(label));

    let means = || year_points(years.iter().map(|y| (y.year, y.mean_hours)));
    plot_ui.line(
        Line::new(means())
            .name("Mean Finish Time")
            .color(MEAN_COLOR)
            .style(LineStyle::dashed_dense())
            .width(1.5),
    );
    plot_ui.points(
        Points::new(means())
            .name("Mean Finish Time")
            .color(MEAN_COLOR)
            .radius(3.0),
    );
}

/// Median age line over a shaded interquartile band.
fn age_band(plot_ui: &mut PlotUi, years: &[AgeQuartiles]) {
    const IQR_LABEL: &str = "IQR (25th-75th percentile)";
    let band = MEDIAN_COLOR.gamma_multiply(0.2);

    // Polygons are filled as convex shapes, so the band is drawn one year-to-year span at a time.
    for pair in years.windows(2) {
        let [a, b] = pair else {
            continue;
        };
        let (xa, xb) = (a.year as f64, b.year as f64);
        let span = vec![[xa, a.q1], [xb, b.q1], [xb, b.q3], [xa, a.q3]];
        plot_ui.polygon(
            Polygon::new(span)
                .name(IQR_LABEL)
                .fill_color(band)
                .stroke(Stroke::NONE),
        );
    }

    plot_ui.line(
        Line::new(year_points(years.iter().map(|y| (y.year, y.median))))
            .name("Median Age")
            .color(MEDIAN_COLOR)
            .width(2.0),
    );
}

fn country_line(plot_ui: &mut PlotUi, years: &[YearCount]) {
    let points = || year_points(years.iter().map(|y| (y.year, y.count as f64)));
    plot_ui.line(Line::new(points()).name("Countries").color(COUNTRY_COLOR).width(2.0));
    plot_ui.points(Points::new(points()).name("Countries").color(COUNTRY_COLOR).radius(3.0));
}
