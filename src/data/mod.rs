/// Data layer: benchmark tables, filtering, classification, projection.
///
/// Architecture:
/// ```text
///   store (literal tables)      synthetic (seeded generator)
///            │                          │
///            └────────────┬─────────────┘
///                         ▼
///                   ┌──────────┐
///                   │  filter   │  Selection → subset, Month → Quarter rollup
///                   └──────────┘
///                         │
///                         ▼
///                   ┌──────────┐
///                   │ classify  │  Strong / Neutral / Weak against the mean
///                   └──────────┘
///                         │
///                         ▼
///                   ┌────────────┐
///                   │ projection  │  ordered {label, value, display text}
///                   └────────────┘
/// ```

pub mod classify;
pub mod dimensions;
pub mod filter;
pub mod model;
pub mod projection;
pub mod store;
pub mod synthetic;
