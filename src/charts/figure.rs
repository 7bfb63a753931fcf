//! Figure model
//!
//! A typed subset of the Plotly figure schema. Serializes to the
//! `{"data": [...], "layout": {...}}` JSON that `Plotly.newPlot` accepts.
//! Only the attributes the dashboard sets are modelled.

use serde::Serialize;
use serde_json::Value;

/// A complete chart specification
#[derive(Debug, Clone, Default, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    /// Find a trace by its legend name
    pub fn trace(&self, name: &str) -> Option<&Trace> {
        self.data.iter().find(|t| t.name() == name)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Plot layers
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Scatter(ScatterTrace),
    Choropleth(ChoroplethTrace),
}

impl Trace {
    pub fn name(&self) -> &str {
        match self {
            Trace::Scatter(t) => &t.name,
            Trace::Choropleth(t) => &t.name,
        }
    }
}

/// Marker series on cartesian axes
#[derive(Debug, Clone, Serialize)]
pub struct ScatterTrace {
    pub name: String,
    pub mode: String,
    pub x: Vec<Option<f64>>,
    pub y: Vec<String>,
    pub marker: Marker,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customdata: Option<Vec<Vec<Value>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertemplate: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Marker {
    pub color: Color,
    pub size: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
}

/// One colour for the whole series, or one per point
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Color {
    Single(String),
    PerPoint(Vec<String>),
}

#[cfg(test)]
impl Color {
    /// Colour of point `index`
    pub fn at(&self, index: usize) -> Option<&str> {
        match self {
            Color::Single(c) => Some(c),
            Color::PerPoint(colors) => colors.get(index).map(String::as_str),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub color: String,
    pub width: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<String>,
}

impl Line {
    pub fn solid(color: &str, width: f64) -> Self {
        Self {
            color: color.to_string(),
            width,
            dash: None,
        }
    }

    pub fn dashed(color: &str, width: f64) -> Self {
        Self {
            color: color.to_string(),
            width,
            dash: Some("dash".to_string()),
        }
    }
}

/// Region-coloured map layer
#[derive(Debug, Clone, Serialize)]
pub struct ChoroplethTrace {
    pub name: String,
    pub locations: Vec<String>,
    pub locationmode: String,
    pub z: Vec<Option<f64>>,
    pub colorscale: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zmid: Option<f64>,
    pub colorbar: ColorBar,
    pub marker: ChoroplethMarker,
    pub customdata: Vec<String>,
    pub hovertemplate: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColorBar {
    pub title: Text,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChoroplethMarker {
    pub line: Line,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Text {
    pub text: String,
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Position on an axis: numeric, or a category label
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Coord {
    Number(f64),
    Category(String),
}

/// Layout-level line shape
#[derive(Debug, Clone, Serialize)]
pub struct Shape {
    #[serde(rename = "type")]
    pub kind: String,
    pub xref: String,
    pub yref: String,
    pub x0: f64,
    pub x1: f64,
    pub y0: Coord,
    pub y1: Coord,
    pub line: Line,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer: Option<String>,
}

/// Free-standing text label
#[derive(Debug, Clone, Serialize)]
pub struct Annotation {
    pub x: f64,
    pub y: Coord,
    pub xref: String,
    pub yref: String,
    pub text: String,
    pub showarrow: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
    pub xanchor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yanchor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    pub color: String,
    pub size: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub shapes: Vec<Shape>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo: Option<Geo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot_bgcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paper_bgcolor: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Text>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autorange: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoryorder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoryarray: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gridcolor: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Legend {
    pub orientation: String,
    pub yanchor: String,
    pub y: f64,
    pub xanchor: String,
    pub x: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Geo {
    pub scope: String,
    pub projection: Projection,
    pub center: GeoCenter,
    pub lonaxis: GeoAxis,
    pub lataxis: GeoAxis,
    pub showlakes: bool,
    pub landcolor: String,
    pub countrycolor: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Projection {
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoCenter {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoAxis {
    pub range: [f64; 2],
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Margin {
    pub r: u32,
    pub t: u32,
    pub l: u32,
    pub b: u32,
}
