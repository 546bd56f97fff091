//! Data layer: core types, the embedded dataset, and filtering.
//!
//! Architecture:
//! ```text
//!   ┌──────────┐
//!   │ dataset  │  static [RegionRecord; N]
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter  │  FilterCriteria predicates → filtered view
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ summary  │  count / mean / worst over the view
//!   └──────────┘
//! ```

pub mod dataset;
pub mod filter;
pub mod model;
pub mod summary;
