//! Key Metrics
//!
//! Three headline numbers for the highlighted country: its 2024 remote-work
//! rate, its gap to the aggregate, and its 2024 internet access.

use serde::Serialize;

use crate::data::{Column, DataResult, Partition, Row};

/// Movement of a value since the baseline year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Flat,
}

impl Direction {
    pub fn of(value: f64) -> Self {
        if value > 0.0 {
            Direction::Up
        } else if value < 0.0 {
            Direction::Down
        } else {
            Direction::Flat
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Delta {
    pub text: String,
    pub direction: Direction,
}

/// One labelled number
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricCard {
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<Delta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyMetrics {
    pub country: String,
    pub remote_work: MetricCard,
    pub vs_aggregate: MetricCard,
    pub internet_access: MetricCard,
}

impl KeyMetrics {
    /// Compute the panel for `country` against `aggregate`, which the labels
    /// call `reference_name` (e.g. "EU").
    ///
    /// Fails with `MissingValue` if either row lacks a value the panel shows.
    pub fn compute(country: &Row, aggregate: &Row, reference_name: &str) -> DataResult<Self> {
        let name = &country.country;

        let latest = country.require(Column::RemoteWork2024)?;
        let change = country.require(Column::RemoteWorkChange)?;
        let reference = aggregate.require(Column::RemoteWork2024)?;
        let internet = country.require(Column::InternetAccess2024)?;
        let internet_change = country.require(Column::InternetAccessChange)?;

        Ok(Self {
            country: name.clone(),
            remote_work: MetricCard {
                label: format!("{} Remote Work % (2024)", name),
                value: format!("{:.2}%", latest),
                delta: Some(delta(change)),
                help: None,
            },
            vs_aggregate: MetricCard {
                label: format!("{} vs {} Average (2024)", name, reference_name),
                value: format!("{:.2} pts", latest - reference),
                delta: None,
                help: Some(format!(
                    "Difference between {}'s rate and the {} average.",
                    name, reference_name
                )),
            },
            internet_access: MetricCard {
                label: format!("{} Internet Access % (2024)", name),
                value: format!("{:.2}%", internet),
                delta: Some(delta(internet_change)),
                help: None,
            },
        })
    }

    /// Look up `country` and the aggregate in `partition`, then compute
    pub fn for_country(
        partition: &Partition,
        country: &str,
        reference_name: &str,
    ) -> DataResult<Self> {
        let aggregate = partition.aggregate()?;
        let row = partition.country(country)?;
        Self::compute(row, aggregate, reference_name)
    }

    pub fn cards(&self) -> [&MetricCard; 3] {
        [&self.remote_work, &self.vs_aggregate, &self.internet_access]
    }
}

fn delta(change: f64) -> Delta {
    Delta {
        text: format!("{:.2} vs 2022", change),
        direction: Direction::of(change),
    }
}
