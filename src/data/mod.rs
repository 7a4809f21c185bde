/// Data layer: core types, loading, normalisation, statistics.
///
/// Architecture:
/// ```text
///  <name>.json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (column kinds inferred once)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize  │  relabel columns for display
///   └───────────┘
///        │
///        ▼
///   ┌──────────────────┐
///   │ stats / charts    │  summary counts, bar + histogram specs
///   └──────────────────┘
/// ```

pub mod catalog;
pub mod charts;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod stats;
