/// Data layer: core types, loading, and outlier removal.
///
/// Architecture:
/// ```text
///   *.tsv (timestamp, value)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse cells, drop bad rows → Series
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  drop the n lowest values, restore time order
///   └──────────┘
///        │
///        ▼
///     Series → chart::ChartUnit
/// ```

pub mod loader;
pub mod model;
pub mod filter;
