/// Data layer: core types, ingestion, filtering, tagging, tokenizing.
///
/// Architecture:
/// ```text
///   uploaded .csv bytes
///          │
///          ▼
///     ┌──────────┐
///     │  ingest   │  sniff dialect, parse → Table (+ to_csv for download)
///     └──────────┘
///          │
///          ▼
///     ┌──────────┐
///     │   Table   │  named columns of CellValue, equal length
///     └──────────┘
///        │     │
///        ▼     ▼
///   ┌────────┐ ┌──────────┐
///   │ filter  │ │  tokens   │  untagged/keyword masks │ keyword frequencies
///   └────────┘ └──────────┘
///        │
///        ▼
///     ┌──────────┐
///     │   tag     │  apply Category/Subcategory to masked rows
///     └──────────┘
/// ```
pub mod filter;
pub mod ingest;
pub mod model;
pub mod tag;
pub mod tokens;
