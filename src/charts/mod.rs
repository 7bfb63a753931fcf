//! Chart construction
//!
//! Builders that turn per-country rows into Plotly figure specifications:
//!
//! - **comparison**: dumbbell chart with reference line and change labels
//! - **choropleth**: Europe map coloured by an internet-access metric
//! - **figure**: the serializable figure model both builders emit
//! - **palette**: shared colours

pub mod choropleth;
pub mod comparison;
pub mod figure;
pub mod palette;

pub use choropleth::{ChoroplethMap, MapMetric, MetricScale, ScaleKind};
pub use comparison::{change_label, sort_rows, ComparisonChart, SortOrder};
pub use figure::Figure;
