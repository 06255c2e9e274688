use crate::config::AnalysisConfig;
use crate::data::aggregate::{
    self, AgeQuartiles, DistanceSeries, YearCount, YearDistribution,
};
use crate::data::model::RaceResult;

// ---------------------------------------------------------------------------
// Chart catalogue
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    PerformanceOverTime,
    PerformanceSinceCutoff,
    FinishersPerYear,
    TimeDistribution,
    AgeDistribution,
    CountryCounts,
}

impl ChartKind {
    pub const ALL: [ChartKind; 6] = [
        ChartKind::PerformanceOverTime,
        ChartKind::PerformanceSinceCutoff,
        ChartKind::FinishersPerYear,
        ChartKind::TimeDistribution,
        ChartKind::AgeDistribution,
        ChartKind::CountryCounts,
    ];

    /// Short name for the chart selector.
    pub fn label(self) -> &'static str {
        match self {
            ChartKind::PerformanceOverTime => "Finish time (all years)",
            ChartKind::PerformanceSinceCutoff => "Finish time (recent)",
            ChartKind::FinishersPerYear => "Finishers per year",
            ChartKind::TimeDistribution => "Finish time distribution",
            ChartKind::AgeDistribution => "Age distribution",
            ChartKind::CountryCounts => "Countries per year",
        }
    }

    pub fn title(self, config: &AnalysisConfig) -> String {
        match self {
            ChartKind::PerformanceOverTime => {
                "Average Ultrarunning Finish Time Over Time by Distance".to_string()
            }
            ChartKind::PerformanceSinceCutoff => {
                "Average Ultramarathon Finish Time Over Time by Distance".to_string()
            }
            ChartKind::FinishersPerYear => {
                "Total Ultrarunning Finishers Per Year by Distance".to_string()
            }
            ChartKind::TimeDistribution => format!(
                "Finish Time Distribution by Year for the {} race",
                config.focus_distance
            ),
            ChartKind::AgeDistribution => {
                "Age Distribution of Ultramarathon Finishers Over Time".to_string()
            }
            ChartKind::CountryCounts => "Number of Unique Countries Represented by Year".to_string(),
        }
    }

    pub fn y_label(self) -> &'static str {
        match self {
            ChartKind::PerformanceOverTime | ChartKind::PerformanceSinceCutoff => {
                "Average Finish Time (hours)"
            }
            ChartKind::FinishersPerYear => "Total Finishers",
            ChartKind::TimeDistribution => "Finish Time (Hours)",
            ChartKind::AgeDistribution => "Age",
            ChartKind::CountryCounts => "Number of Countries",
        }
    }
}

// ---------------------------------------------------------------------------
// Chart summaries
// ---------------------------------------------------------------------------

/// The aggregate behind one chart.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartSummary {
    /// One line per distance.
    Series(Vec<DistanceSeries>),
    Distribution(Vec<YearDistribution>),
    Ages(Vec<AgeQuartiles>),
    Counts(Vec<YearCount>),
}

impl ChartSummary {
    /// Number of rows the summary table shows.
    pub fn len(&self) -> usize {
        match self {
            ChartSummary::Series(series) => series.iter().map(|s| s.points.len()).sum(),
            ChartSummary::Distribution(years) => years.len(),
            ChartSummary::Ages(years) => years.len(),
            ChartSummary::Counts(years) => years.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Aggregate `results` (already restricted to the top distances) for `kind`.
pub fn summarize(kind: ChartKind, results: &[RaceResult], config: &AnalysisConfig) -> ChartSummary {
    let cutoff = config.after_year;
    let summary = match kind {
        ChartKind::PerformanceOverTime => {
            ChartSummary::Series(aggregate::performance_over_time(results))
        }
        ChartKind::PerformanceSinceCutoff => {
            ChartSummary::Series(aggregate::performance_over_time_since(results, cutoff))
        }
        ChartKind::FinishersPerYear => {
            ChartSummary::Series(aggregate::finishers_per_year(results, cutoff))
        }
        ChartKind::TimeDistribution => ChartSummary::Distribution(aggregate::time_distribution(
            results,
            cutoff,
            &config.focus_distance,
            config.min_year_observations,
        )),
        ChartKind::AgeDistribution => {
            ChartSummary::Ages(aggregate::age_distribution(results, cutoff, config.age_range()))
        }
        ChartKind::CountryCounts => ChartSummary::Counts(aggregate::country_counts(results, cutoff)),
    };
    log::debug!("Built {:?} summary with {} rows", kind, summary.len());
    summary
}
