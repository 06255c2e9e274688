use std::ops::RangeInclusive;

/// Where the viewer looks for results at startup, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "./data/TWO_CENTURIES_OF_UM_RACES.csv";

/// Tunable parameters of the analysis, edited from the side panel.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// How many of the most frequent distances to keep.
    pub top_k: usize,
    /// Charts other than the all-years trend only use events after this year.
    pub after_year: i64,
    /// Distance shown in the finish-time distribution chart.
    pub focus_distance: String,
    /// A year needs more finishers than this to appear in the distribution chart.
    pub min_year_observations: usize,
    pub min_age: f64,
    pub max_age: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_k: 3,
            after_year: 1950,
            focus_distance: "50km".to_string(),
            min_year_observations: 30,
            min_age: 10.0,
            max_age: 100.0,
        }
    }
}

impl AnalysisConfig {
    pub fn age_range(&self) -> RangeInclusive<f64> {
        self.min_age..=self.max_age
    }
}
