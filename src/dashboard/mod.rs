//! Dashboard
//!
//! Assembles one render pass: partition the table, compute the key metrics,
//! build both figures for the current selections, and wrap the raw table for
//! the explorer. Every pass reads the same immutable table and keeps no state.
//!
//! Failures that only affect one panel (no aggregate row, highlighted country
//! absent, a missing value) are carried per panel so the rest still renders.

pub mod explorer;
pub mod metrics;
pub mod page;

pub use explorer::ExplorerView;
pub use metrics::{Delta, Direction, KeyMetrics, MetricCard};
pub use page::{render_page, render_unavailable};

use serde::{Deserialize, Serialize};

use crate::charts::comparison::DEFAULT_REFERENCE_NAME;
use crate::charts::{ChoroplethMap, ComparisonChart, Figure, MapMetric, MetricScale, SortOrder};
use crate::data::{DataResult, Partition, Table, DEFAULT_AGGREGATE_MARKER};

pub const TITLE: &str = "Remote Work Adoption in Europe: A 2022-2024 Analysis";
pub const PAGE_TITLE: &str = "Remote Work in Europe Dashboard";

/// User selections read on every render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selection {
    #[serde(default)]
    pub sort: SortOrder,
    #[serde(default)]
    pub map_metric: MapMetric,
}

impl Selection {
    /// Parse raw query values, falling back to defaults on anything unknown
    pub fn from_params(sort: Option<&str>, map_metric: Option<&str>) -> Self {
        Self {
            sort: parse_or_default(sort, "sort"),
            map_metric: parse_or_default(map_metric, "map_metric"),
        }
    }
}

fn parse_or_default<T>(raw: Option<&str>, param: &str) -> T
where
    T: std::str::FromStr<Err = String> + Default,
{
    match raw.filter(|s| !s.trim().is_empty()) {
        Some(s) => s.parse().unwrap_or_else(|e| {
            tracing::warn!(param = %param, error = %e, "Ignoring invalid selection");
            T::default()
        }),
        None => T::default(),
    }
}

/// Which rows play which role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSettings {
    /// Country featured in the metrics panel and highlighted on the chart
    pub highlight_country: String,
    /// Substring identifying the aggregate row
    pub aggregate_marker: String,
    /// Short name for the aggregate in labels ("EU" gives "EU Average")
    pub reference_name: String,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            highlight_country: "Romania".to_string(),
            aggregate_marker: DEFAULT_AGGREGATE_MARKER.to_string(),
            reference_name: DEFAULT_REFERENCE_NAME.to_string(),
        }
    }
}

/// One fully built render pass
#[derive(Debug)]
pub struct Dashboard {
    pub settings: DashboardSettings,
    pub selection: Selection,
    pub metrics: DataResult<KeyMetrics>,
    pub comparison: DataResult<Figure>,
    pub map: Figure,
    pub map_scale: &'static MetricScale,
    pub explorer: ExplorerView,
}

impl Dashboard {
    pub fn build(table: &Table, selection: Selection, settings: &DashboardSettings) -> Self {
        let partition = Partition::split(table, &settings.aggregate_marker);

        let metrics = KeyMetrics::for_country(
            &partition,
            &settings.highlight_country,
            &settings.reference_name,
        );
        if let Err(e) = &metrics {
            tracing::warn!(error = %e, "Key metrics unavailable");
        }

        let comparison = comparison_figure(&partition, selection.sort, settings);
        if let Err(e) = &comparison {
            tracing::warn!(error = %e, "Comparison chart unavailable");
        }

        let map = ChoroplethMap::new(&partition.countries)
            .with_metric(selection.map_metric)
            .build();

        Self {
            settings: settings.clone(),
            selection,
            metrics,
            comparison,
            map,
            map_scale: selection.map_metric.scale(),
            explorer: ExplorerView::from_table(table),
        }
    }
}

/// The comparison chart needs the aggregate's latest value for its reference line
pub fn comparison_figure(
    partition: &Partition,
    sort: SortOrder,
    settings: &DashboardSettings,
) -> DataResult<Figure> {
    let reference = partition.aggregate_latest()?;
    Ok(ComparisonChart::new(&partition.countries, reference)
        .with_sort(sort)
        .with_highlight(&settings.highlight_country)
        .with_reference_name(&settings.reference_name)
        .build())
}
