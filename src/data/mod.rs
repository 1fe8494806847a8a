/// Data layer: core types, loading, and range aggregation.
///
/// Architecture:
/// ```text
///  .json / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (validated)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<Sample>, segments, feature values
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  ranges   │  two-pass aggregation → RangesResult
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod ranges;
