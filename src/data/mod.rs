/// Data layer: core types, loading, and pricing.
///
/// Architecture:
/// ```text
///      .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Table   │  header, Vec<Row>, cost column index
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ pricing  │  (row, margin) → sale price
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod pricing;
