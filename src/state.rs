use std::path::PathBuf;

use crate::chart::{summarize, ChartKind, ChartSummary};
use crate::color::ColorMap;
use crate::config::AnalysisConfig;
use crate::data::error::DataError;
use crate::data::filter::{clean, filter_top_distances};
use crate::data::model::{CleanedDataset, RawTable, TopDistanceDataset};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// File the current dataset came from.
    pub source: Option<PathBuf>,

    /// Cleaned rows of the loaded file, kept for the whole session.
    pub cleaned: Option<CleanedDataset>,

    /// Cleaned rows restricted to the top distances (cached).
    pub top: TopDistanceDataset,

    /// Analysis parameters.
    pub config: AnalysisConfig,

    /// Chart currently shown.
    pub chart: ChartKind,

    /// Aggregate behind the current chart (cached).
    pub summary: Option<ChartSummary>,

    /// Colours of the selected distances.
    pub color_map: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            source: None,
            cleaned: None,
            top: TopDistanceDataset::default(),
            config: AnalysisConfig::default(),
            chart: ChartKind::PerformanceOverTime,
            summary: None,
            color_map: ColorMap::default(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Clean a newly loaded table and rebuild everything derived from it.
    ///
    /// On error the previous dataset stays in place.
    pub fn set_dataset(&mut self, source: PathBuf, table: &RawTable) -> Result<(), DataError> {
        let cleaned = clean(table)?;
        log::info!(
            "{}: {} usable results, {} dropped",
            source.display(),
            cleaned.len(),
            cleaned.dropped
        );

        self.source = Some(source);
        self.cleaned = Some(cleaned);
        self.status_message = None;
        self.refilter();
        Ok(())
    }

    /// Recompute the top-distance rows, colours and summary after `top_k` changes.
    pub fn refilter(&mut self) {
        if let Some(cleaned) = &self.cleaned {
            self.top = filter_top_distances(&cleaned.results, self.config.top_k);
            self.color_map = ColorMap::new(&self.top.distances);
        }
        self.resummarize();
    }

    /// Rebuild the summary of the current chart.
    pub fn resummarize(&mut self) {
        self.summary = self
            .cleaned
            .as_ref()
            .map(|_| summarize(self.chart, &self.top.results, &self.config));
    }

    pub fn set_chart(&mut self, chart: ChartKind) {
        if self.chart != chart {
            self.chart = chart;
            self.resummarize();
        }
    }

    /// Apply edited parameters, refiltering only when the distance selection changes.
    pub fn set_config(&mut self, config: AnalysisConfig) {
        if config == self.config {
            return;
        }
        let refilter = config.top_k != self.config.top_k;
        self.config = config;
        if refilter {
            self.refilter();
        } else {
            self.resummarize();
        }
    }
}
