//! Choropleth Map
//!
//! Colours each mapped country by the selected internet-access metric.
//! The viewport is pinned to Europe regardless of which rows are present.

use serde::{Deserialize, Serialize};

use super::figure::{
    ChoroplethMarker, ChoroplethTrace, ColorBar, Figure, Geo, GeoAxis, GeoCenter, Layout, Line,
    Margin, Projection, Text, Trace,
};
use super::palette;
use crate::data::{Column, Row};

pub const MAP_HEIGHT: u32 = 800;
pub const EUROPE_CENTER: GeoCenter = GeoCenter { lat: 54.0, lon: 15.0 };
pub const EUROPE_LON_RANGE: [f64; 2] = [-15.0, 50.0];
pub const EUROPE_LAT_RANGE: [f64; 2] = [35.0, 75.0];

/// How a colour scale reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleKind {
    /// Low to high
    Sequential,
    /// Centred on zero; sign is visible
    Diverging,
}

/// Everything the map needs to know about a metric
#[derive(Debug, Clone, Serialize)]
pub struct MetricScale {
    pub column: Column,
    pub label: &'static str,
    pub colorbar_title: &'static str,
    pub colorscale: &'static str,
    pub kind: ScaleKind,
    pub help_text: &'static str,
}

static INTERNET_ACCESS_SCALE: MetricScale = MetricScale {
    column: Column::InternetAccess2024,
    label: "Internet Access % (2024)",
    colorbar_title: "Internet Access %",
    colorscale: "Blues",
    kind: ScaleKind::Sequential,
    help_text: "Darker blue indicates higher percentage of households with internet access in 2024",
};

static INTERNET_CHANGE_SCALE: MetricScale = MetricScale {
    column: Column::InternetAccessChange,
    label: "Change in Access (2022-2024)",
    colorbar_title: "Change in Access (pts)",
    colorscale: "RdYlBu",
    kind: ScaleKind::Diverging,
    help_text: "Blue shows improvement, red shows decline in internet access from 2022 to 2024",
};

/// Map metric selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapMetric {
    #[default]
    InternetAccess,
    InternetChange,
}

impl MapMetric {
    pub fn all() -> &'static [MapMetric] {
        &[MapMetric::InternetAccess, MapMetric::InternetChange]
    }

    /// Query-string value
    pub fn as_str(&self) -> &'static str {
        match self {
            MapMetric::InternetAccess => "internet_access",
            MapMetric::InternetChange => "internet_change",
        }
    }

    pub fn scale(&self) -> &'static MetricScale {
        match self {
            MapMetric::InternetAccess => &INTERNET_ACCESS_SCALE,
            MapMetric::InternetChange => &INTERNET_CHANGE_SCALE,
        }
    }
}

impl std::fmt::Display for MapMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MapMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "internet_access" | "access" | "current" => Ok(MapMetric::InternetAccess),
            "internet_change" | "change" => Ok(MapMetric::InternetChange),
            other => Err(format!(
                "unknown map metric '{}' (expected internet_access or internet_change)",
                other
            )),
        }
    }
}

/// Builder for the map figure
pub struct ChoroplethMap<'a> {
    rows: &'a [Row],
    metric: MapMetric,
}

impl<'a> ChoroplethMap<'a> {
    pub fn new(rows: &'a [Row]) -> Self {
        Self {
            rows,
            metric: MapMetric::default(),
        }
    }

    pub fn with_metric(mut self, metric: MapMetric) -> Self {
        self.metric = metric;
        self
    }

    pub fn build(&self) -> Figure {
        let scale = self.metric.scale();
        let mapped: Vec<(&Row, &str)> = self
            .rows
            .iter()
            .filter_map(|r| r.iso_alpha.as_deref().map(|iso| (r, iso)))
            .collect();

        let dropped = self.rows.len() - mapped.len();
        if dropped > 0 {
            tracing::debug!(dropped, "Rows without map identifier left off the map");
        }

        let trace = ChoroplethTrace {
            name: String::new(),
            locations: mapped.iter().map(|(_, iso)| iso.to_string()).collect(),
            locationmode: "ISO-3".to_string(),
            z: mapped.iter().map(|(r, _)| r.value(scale.column)).collect(),
            colorscale: scale.colorscale.to_string(),
            zmid: match scale.kind {
                ScaleKind::Diverging => Some(0.0),
                ScaleKind::Sequential => None,
            },
            colorbar: ColorBar {
                title: Text::new(scale.colorbar_title),
            },
            marker: ChoroplethMarker {
                line: Line::solid(palette::MAP_BORDER, 0.5),
            },
            customdata: mapped.iter().map(|(r, _)| r.country.clone()).collect(),
            hovertemplate: "<b>%{customdata}</b><br>%{z:.2f}".to_string(),
        };

        Figure {
            data: vec![Trace::Choropleth(trace)],
            layout: Layout {
                height: Some(MAP_HEIGHT),
                geo: Some(Geo {
                    scope: "world".to_string(),
                    projection: Projection {
                        kind: "mercator".to_string(),
                    },
                    center: EUROPE_CENTER,
                    lonaxis: GeoAxis {
                        range: EUROPE_LON_RANGE,
                    },
                    lataxis: GeoAxis {
                        range: EUROPE_LAT_RANGE,
                    },
                    showlakes: false,
                    landcolor: palette::MAP_LAND.to_string(),
                    countrycolor: palette::MAP_COUNTRY_LINE.to_string(),
                }),
                margin: Some(Margin::default()),
                ..Default::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<Row> {
        vec![
            Row::new("Romania").internet(Some(91.0), Some(2.0)).iso("ROU"),
            Row::new("Kosovo").internet(Some(88.0), Some(-1.0)),
            Row::new("Norway").internet(Some(99.0), Some(-0.5)).iso("NOR"),
        ]
    }

    fn choropleth(figure: &Figure) -> &ChoroplethTrace {
        match &figure.data[0] {
            Trace::Choropleth(t) => t,
            other => panic!("expected choropleth, got {:?}", other),
        }
    }

    #[test]
    fn test_scale_kinds() {
        assert_eq!(MapMetric::InternetAccess.scale().kind, ScaleKind::Sequential);
        assert_eq!(MapMetric::InternetChange.scale().kind, ScaleKind::Diverging);
    }

    #[test]
    fn test_current_value_uses_sequential_scale() {
        let rows = rows();
        let figure = ChoroplethMap::new(&rows)
            .with_metric(MapMetric::InternetAccess)
            .build();
        let trace = choropleth(&figure);

        assert_eq!(trace.colorscale, "Blues");
        assert_eq!(trace.zmid, None);
        assert_eq!(trace.z, [Some(91.0), Some(99.0)]);
        assert_eq!(trace.colorbar.title.text, "Internet Access %");
    }

    #[test]
    fn test_change_value_uses_diverging_scale() {
        let rows = rows();
        let figure = ChoroplethMap::new(&rows)
            .with_metric(MapMetric::InternetChange)
            .build();
        let trace = choropleth(&figure);

        assert_eq!(trace.colorscale, "RdYlBu");
        assert_eq!(trace.zmid, Some(0.0));
        assert_eq!(trace.z, [Some(2.0), Some(-0.5)]);
    }

    #[test]
    fn test_switching_metric_keeps_row_set() {
        let rows = rows();
        let access = ChoroplethMap::new(&rows)
            .with_metric(MapMetric::InternetAccess)
            .build();
        let change = ChoroplethMap::new(&rows)
            .with_metric(MapMetric::InternetChange)
            .build();

        assert_eq!(choropleth(&access).locations, ["ROU", "NOR"]);
        assert_eq!(choropleth(&access).locations, choropleth(&change).locations);
        assert_eq!(choropleth(&access).customdata, choropleth(&change).customdata);
    }

    #[test]
    fn test_missing_value_stays_on_map() {
        let rows = vec![Row::new("Malta").iso("MLT")];
        let figure = ChoroplethMap::new(&rows).build();

        assert_eq!(choropleth(&figure).locations, ["MLT"]);
        assert_eq!(choropleth(&figure).z, [None]);
    }

    #[test]
    fn test_viewport_is_fixed_to_europe() {
        let figure = ChoroplethMap::new(&[]).build();
        let geo = figure.layout.geo.as_ref().unwrap();

        assert_eq!(geo.center, EUROPE_CENTER);
        assert_eq!(geo.lonaxis.range, EUROPE_LON_RANGE);
        assert_eq!(geo.lataxis.range, EUROPE_LAT_RANGE);
        assert_eq!(geo.projection.kind, "mercator");
        assert_eq!(figure.layout.height, Some(MAP_HEIGHT));
    }

    #[test]
    fn test_map_metric_parse() {
        for &metric in MapMetric::all() {
            assert_eq!(metric.as_str().parse::<MapMetric>().unwrap(), metric);
        }
        assert!("population".parse::<MapMetric>().is_err());
    }
}
