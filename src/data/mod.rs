/// Data layer: loading, cleaning, filtering, and per-chart aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RawTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  clean → CleanedDataset, top-K distances → TopDistanceDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  one summary table per chart
///   └───────────┘
/// ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod performance;
pub mod stats;
