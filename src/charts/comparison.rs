//! Comparison Chart
//!
//! Dumbbell chart of remote-work adoption per country: a 2022 marker and a
//! 2024 marker joined by a connector, an internet-access marker on the same
//! percentage axis, a dashed reference line at the aggregate's 2024 value,
//! and a signed change label at the right edge of every row.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::cmp::Ordering;

use super::figure::{
    Annotation, Axis, Color, Coord, Figure, Font, Layout, Legend, Line, Marker, ScatterTrace,
    Shape, Text, Trace,
};
use super::palette;
use crate::data::Row;

/// Gap between the rightmost marker and the change labels
pub const ANNOTATION_MARGIN: f64 = 3.0;
/// Gap between the rightmost marker and the end of the axis
pub const AXIS_MARGIN: f64 = 8.0;
pub const CHART_HEIGHT: u32 = 800;

pub const BASELINE_SERIES: &str = "2022";
pub const LATEST_SERIES: &str = "2024";
pub const INTERNET_SERIES: &str = "Internet Access 2024";
pub const REFERENCE_LABEL: &str = "EU Average 2024";
/// Name the default reference label is built from
pub const DEFAULT_REFERENCE_NAME: &str = "EU";
pub const X_AXIS_TITLE: &str = "Percentage (%) of enterprises conducting meetings remotely";

const LATEST_HOVER: &str = "<b>%{y}</b><br>\
Remote Work 2024: %{x:.2f}%<br>\
Change since 2022: %{customdata[0]:.2f} pts<br>\
Trend: %{customdata[3]}<br>\
Internet Access 2024: %{customdata[1]:.2f}%<br>\
Internet Change: %{customdata[2]:.2f} pts\
<extra></extra>";

const INTERNET_HOVER: &str = "<b>%{y}</b><br>\
Internet Access 2024: %{x:.2f}%<br>\
Internet Change: %{customdata[0]:.2f} pts<br>\
Remote Work 2024: %{customdata[1]:.2f}%<br>\
<extra></extra>";

/// Row ordering for the comparison chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Remote work 2024, high to low
    #[default]
    Latest,
    /// Remote work change 2022→2024, high to low
    Change,
    /// Country name, A to Z
    Alphabetical,
}

impl SortOrder {
    pub fn all() -> &'static [SortOrder] {
        &[SortOrder::Latest, SortOrder::Change, SortOrder::Alphabetical]
    }

    /// Query-string value
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Latest => "latest",
            SortOrder::Change => "change",
            SortOrder::Alphabetical => "alphabetical",
        }
    }

    /// Selector label
    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Latest => "Remote Work 2024 (High to Low)",
            SortOrder::Change => "Remote Work Growth (High to Low)",
            SortOrder::Alphabetical => "Alphabetical",
        }
    }

    fn compare(&self, a: &Row, b: &Row) -> Ordering {
        match self {
            SortOrder::Latest => descending(a.remote_work_2024, b.remote_work_2024),
            SortOrder::Change => descending(a.remote_work_change, b.remote_work_change),
            SortOrder::Alphabetical => a.country.cmp(&b.country),
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "latest" | "remote_work_2024" => Ok(SortOrder::Latest),
            "change" | "growth" | "remote_work_change" => Ok(SortOrder::Change),
            "alphabetical" | "country" | "name" => Ok(SortOrder::Alphabetical),
            other => Err(format!(
                "unknown sort order '{}' (expected latest, change or alphabetical)",
                other
            )),
        }
    }
}

/// Descending by value; missing values last
fn descending(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (finite(a), finite(b)) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Stable sort of `rows` by `order`; ties keep input order.
pub fn sort_rows(rows: &[Row], order: SortOrder) -> Vec<&Row> {
    let mut sorted: Vec<&Row> = rows.iter().collect();
    sorted.sort_by(|a, b| order.compare(a, b));
    sorted
}

/// Label text and colour for a change value
pub fn change_label(change: f64) -> (String, &'static str) {
    if change >= 0.0 {
        (format!("+{:.1}", change.abs()), palette::GAIN)
    } else {
        (format!("{:.1}", change), palette::LOSS)
    }
}

/// Builder for the comparison chart
pub struct ComparisonChart<'a> {
    rows: &'a [Row],
    reference: f64,
    order: SortOrder,
    highlight: Option<&'a str>,
    reference_label: String,
}

impl<'a> ComparisonChart<'a> {
    /// `reference` is the aggregate's 2024 remote-work value
    pub fn new(rows: &'a [Row], reference: f64) -> Self {
        Self {
            rows,
            reference,
            order: SortOrder::default(),
            highlight: None,
            reference_label: REFERENCE_LABEL.to_string(),
        }
    }

    pub fn with_sort(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    /// Country whose markers get the accent colour
    pub fn with_highlight(mut self, country: &'a str) -> Self {
        self.highlight = Some(country);
        self
    }

    /// Label the reference line "<name> Average 2024"
    pub fn with_reference_name(mut self, name: &str) -> Self {
        self.reference_label = format!("{} Average 2024", name);
        self
    }

    pub fn build(&self) -> Figure {
        let sorted = sort_rows(self.rows, self.order);
        let categories: Vec<String> = sorted.iter().map(|r| r.country.clone()).collect();

        let max_x = sorted
            .iter()
            .flat_map(|r| [r.remote_work_2022, r.remote_work_2024, r.internet_access_2024])
            .filter_map(finite)
            .fold(0.0_f64, f64::max);

        let mut shapes: Vec<Shape> = sorted.iter().filter_map(|r| connector(r)).collect();
        shapes.push(self.reference_line());

        let data = vec![
            Trace::Scatter(ScatterTrace {
                name: BASELINE_SERIES.to_string(),
                mode: "markers".to_string(),
                x: sorted.iter().map(|r| r.remote_work_2022).collect(),
                y: categories.clone(),
                marker: Marker {
                    color: self.colors(&sorted, palette::BASELINE),
                    size: 10.0,
                    symbol: None,
                    line: None,
                },
                customdata: None,
                hovertemplate: None,
            }),
            Trace::Scatter(ScatterTrace {
                name: LATEST_SERIES.to_string(),
                mode: "markers".to_string(),
                x: sorted.iter().map(|r| r.remote_work_2024).collect(),
                y: categories.clone(),
                marker: Marker {
                    color: self.colors(&sorted, palette::LATEST),
                    size: 10.0,
                    symbol: Some("diamond".to_string()),
                    line: None,
                },
                customdata: Some(
                    sorted
                        .iter()
                        .map(|r| {
                            vec![
                                json!(r.remote_work_change),
                                json!(r.internet_access_2024),
                                json!(r.internet_access_change),
                                json!(r.remote_work_trend),
                            ]
                        })
                        .collect(),
                ),
                hovertemplate: Some(LATEST_HOVER.to_string()),
            }),
            Trace::Scatter(ScatterTrace {
                name: INTERNET_SERIES.to_string(),
                mode: "markers".to_string(),
                x: sorted.iter().map(|r| r.internet_access_2024).collect(),
                y: categories.clone(),
                marker: Marker {
                    color: self.colors(&sorted, palette::INTERNET),
                    size: 8.0,
                    symbol: Some("circle".to_string()),
                    line: Some(Line::solid(palette::MARKER_OUTLINE, 2.0)),
                },
                customdata: Some(
                    sorted
                        .iter()
                        .map(|r| -> Vec<Value> {
                            vec![
                                json!(r.internet_access_change),
                                json!(r.remote_work_2024),
                                json!(r.remote_work_change),
                            ]
                        })
                        .collect(),
                ),
                hovertemplate: Some(INTERNET_HOVER.to_string()),
            }),
        ];

        let mut annotations = vec![Annotation {
            x: self.reference,
            y: Coord::Number(1.0),
            xref: "x".to_string(),
            yref: "paper".to_string(),
            text: self.reference_label.clone(),
            showarrow: false,
            font: None,
            xanchor: "left".to_string(),
            yanchor: Some("bottom".to_string()),
        }];

        annotations.extend(sorted.iter().filter_map(|r| {
            let change = finite(r.remote_work_change)?;
            let (text, color) = change_label(change);
            Some(Annotation {
                x: max_x + ANNOTATION_MARGIN,
                y: Coord::Category(r.country.clone()),
                xref: "x".to_string(),
                yref: "y".to_string(),
                text,
                showarrow: false,
                font: Some(Font {
                    color: color.to_string(),
                    size: 11.0,
                    family: Some("Arial".to_string()),
                }),
                xanchor: "left".to_string(),
                yanchor: None,
            })
        }));

        Figure {
            data,
            layout: Layout {
                height: Some(CHART_HEIGHT),
                xaxis: Some(Axis {
                    title: Some(Text::new(X_AXIS_TITLE)),
                    range: Some([0.0, max_x + AXIS_MARGIN]),
                    gridcolor: Some(palette::GRID.to_string()),
                    ..Default::default()
                }),
                yaxis: Some(Axis {
                    autorange: Some("reversed".to_string()),
                    categoryorder: Some("array".to_string()),
                    categoryarray: Some(categories),
                    gridcolor: Some(palette::GRID.to_string()),
                    ..Default::default()
                }),
                legend: Some(Legend {
                    orientation: "h".to_string(),
                    yanchor: "bottom".to_string(),
                    y: 1.02,
                    xanchor: "right".to_string(),
                    x: 1.0,
                }),
                shapes,
                annotations,
                plot_bgcolor: Some(palette::BACKGROUND.to_string()),
                paper_bgcolor: Some(palette::BACKGROUND.to_string()),
                ..Default::default()
            },
        }
    }

    fn colors(&self, rows: &[&Row], default: &str) -> Color {
        match self.highlight {
            Some(name) => Color::PerPoint(
                rows.iter()
                    .map(|r| {
                        if r.country == name {
                            palette::HIGHLIGHT.to_string()
                        } else {
                            default.to_string()
                        }
                    })
                    .collect(),
            ),
            None => Color::Single(default.to_string()),
        }
    }

    fn reference_line(&self) -> Shape {
        Shape {
            kind: "line".to_string(),
            xref: "x".to_string(),
            yref: "paper".to_string(),
            x0: self.reference,
            x1: self.reference,
            y0: Coord::Number(0.0),
            y1: Coord::Number(1.0),
            line: Line::dashed(palette::AGGREGATE, 2.0),
            layer: None,
        }
    }
}

/// Connector between a row's 2022 and 2024 values, if both exist
fn connector(row: &Row) -> Option<Shape> {
    let from = finite(row.remote_work_2022)?;
    let to = finite(row.remote_work_2024)?;
    Some(Shape {
        kind: "line".to_string(),
        xref: "x".to_string(),
        yref: "y".to_string(),
        x0: from,
        x1: to,
        y0: Coord::Category(row.country.clone()),
        y1: Coord::Category(row.country.clone()),
        line: Line::solid(palette::CONNECTOR, 2.0),
        layer: Some("below".to_string()),
    })
}

/// Position of the reference line in a built figure
pub fn reference_value(figure: &Figure) -> Option<f64> {
    figure
        .layout
        .shapes
        .iter()
        .find(|s| s.yref == "paper")
        .map(|s| s.x0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> Vec<Row> {
        vec![
            Row::new("A")
                .remote_work(Some(10.0), Some(20.0))
                .internet(Some(30.0), Some(1.0)),
            Row::new("B")
                .remote_work(None, Some(15.0))
                .change(Some(-2.0))
                .internet(Some(25.0), Some(-0.5)),
            Row::new("C")
                .remote_work(Some(5.0), Some(5.0))
                .internet(Some(40.0), Some(0.0)),
        ]
    }

    fn names(rows: &[&Row]) -> Vec<String> {
        rows.iter().map(|r| r.country.clone()).collect()
    }

    fn scatter<'f>(figure: &'f Figure, name: &str) -> &'f ScatterTrace {
        match figure.trace(name) {
            Some(Trace::Scatter(t)) => t,
            other => panic!("no scatter trace {}: {:?}", name, other),
        }
    }

    fn change_annotations(figure: &Figure) -> Vec<&Annotation> {
        figure
            .layout
            .annotations
            .iter()
            .filter(|a| a.yref == "y")
            .collect()
    }

    #[test]
    fn test_sort_latest_descending() {
        let rows = abc();
        assert_eq!(names(&sort_rows(&rows, SortOrder::Latest)), ["A", "B", "C"]);
    }

    #[test]
    fn test_sort_change_descending() {
        let rows = abc();
        // A: +10, C: 0, B: -2
        assert_eq!(names(&sort_rows(&rows, SortOrder::Change)), ["A", "C", "B"]);
    }

    #[test]
    fn test_sort_alphabetical() {
        let rows = vec![Row::new("Spain"), Row::new("Austria"), Row::new("Malta")];
        assert_eq!(
            names(&sort_rows(&rows, SortOrder::Alphabetical)),
            ["Austria", "Malta", "Spain"]
        );
    }

    #[test]
    fn test_sort_is_stable_and_idempotent() {
        let rows = vec![
            Row::new("X").remote_work(Some(1.0), Some(10.0)),
            Row::new("Y").remote_work(Some(2.0), Some(10.0)),
            Row::new("Z").remote_work(None, None),
            Row::new("W").remote_work(Some(3.0), Some(12.0)),
            Row::new("V").remote_work(Some(4.0), Some(10.0)),
        ];

        for &order in SortOrder::all() {
            let once: Vec<Row> = sort_rows(&rows, order).into_iter().cloned().collect();
            let twice = sort_rows(&once, order);
            assert_eq!(names(&twice), names(&once.iter().collect::<Vec<_>>()));
        }

        // Ties keep input order, missing sorts last
        assert_eq!(
            names(&sort_rows(&rows, SortOrder::Latest)),
            ["W", "X", "Y", "V", "Z"]
        );
    }

    #[test]
    fn test_missing_baseline_draws_no_connector() {
        let rows = abc();
        let figure = ComparisonChart::new(&rows, 12.0).build();

        let connectors: Vec<_> = figure
            .layout
            .shapes
            .iter()
            .filter(|s| s.yref == "y")
            .collect();
        assert_eq!(connectors.len(), 2);
        assert!(connectors
            .iter()
            .all(|s| s.y0 != Coord::Category("B".to_string())));

        let a = connectors
            .iter()
            .find(|s| s.y0 == Coord::Category("A".to_string()))
            .unwrap();
        assert_eq!((a.x0, a.x1), (10.0, 20.0));
    }

    #[test]
    fn test_reference_line_at_aggregate_value() {
        let rows = abc();
        for &order in SortOrder::all() {
            for highlight in ["A", "C", "nobody"] {
                let figure = ComparisonChart::new(&rows, 12.0)
                    .with_sort(order)
                    .with_highlight(highlight)
                    .build();
                assert_eq!(reference_value(&figure), Some(12.0));
            }
        }

        let figure = ComparisonChart::new(&rows, 12.0).build();
        let label = figure
            .layout
            .annotations
            .iter()
            .find(|a| a.text == REFERENCE_LABEL)
            .unwrap();
        assert_eq!(label.x, 12.0);

        let figure = ComparisonChart::new(&rows, 12.0)
            .with_reference_name(DEFAULT_REFERENCE_NAME)
            .build();
        assert!(figure
            .layout
            .annotations
            .iter()
            .any(|a| a.text == REFERENCE_LABEL));

        let figure = ComparisonChart::new(&rows, 12.0)
            .with_reference_name("OECD")
            .build();
        assert!(figure
            .layout
            .annotations
            .iter()
            .any(|a| a.text == "OECD Average 2024"));
    }

    #[test]
    fn test_zero_change_is_labelled_as_gain() {
        let rows = abc();
        let figure = ComparisonChart::new(&rows, 12.0).build();

        let c = change_annotations(&figure)
            .into_iter()
            .find(|a| a.y == Coord::Category("C".to_string()))
            .unwrap();
        assert_eq!(c.text, "+0.0");
        assert_eq!(c.font.as_ref().unwrap().color, palette::GAIN);

        let b = change_annotations(&figure)
            .into_iter()
            .find(|a| a.y == Coord::Category("B".to_string()))
            .unwrap();
        assert_eq!(b.text, "-2.0");
        assert_eq!(b.font.as_ref().unwrap().color, palette::LOSS);
    }

    #[test]
    fn test_change_label() {
        assert_eq!(change_label(1.26), ("+1.3".to_string(), palette::GAIN));
        assert_eq!(change_label(-0.0), ("+0.0".to_string(), palette::GAIN));
        assert_eq!(change_label(-3.04), ("-3.0".to_string(), palette::LOSS));
    }

    #[test]
    fn test_annotations_and_axis_clear_all_series() {
        let rows = abc();
        let figure = ComparisonChart::new(&rows, 12.0).build();

        // Internet access (40) is the rightmost value
        for a in change_annotations(&figure) {
            assert_eq!(a.x, 40.0 + ANNOTATION_MARGIN);
        }
        let xaxis = figure.layout.xaxis.as_ref().unwrap();
        assert_eq!(xaxis.range, Some([0.0, 40.0 + AXIS_MARGIN]));
    }

    #[test]
    fn test_rows_without_change_get_no_label() {
        let rows = vec![
            Row::new("A").remote_work(Some(1.0), Some(2.0)),
            Row::new("B").remote_work(None, Some(2.0)),
        ];
        let figure = ComparisonChart::new(&rows, 1.0).build();
        assert_eq!(change_annotations(&figure).len(), 1);
    }

    #[test]
    fn test_category_axis_follows_sort_and_is_reversed() {
        let rows = abc();
        let figure = ComparisonChart::new(&rows, 12.0)
            .with_sort(SortOrder::Change)
            .build();

        let yaxis = figure.layout.yaxis.as_ref().unwrap();
        assert_eq!(yaxis.autorange.as_deref(), Some("reversed"));
        assert_eq!(
            yaxis.categoryarray.as_deref(),
            Some(&["A".to_string(), "C".to_string(), "B".to_string()][..])
        );
        assert_eq!(scatter(&figure, LATEST_SERIES).y, ["A", "C", "B"]);
    }

    #[test]
    fn test_three_aligned_series() {
        let rows = abc();
        let figure = ComparisonChart::new(&rows, 12.0).build();

        assert_eq!(figure.data.len(), 3);
        assert_eq!(scatter(&figure, BASELINE_SERIES).x, [Some(10.0), None, Some(5.0)]);
        assert_eq!(
            scatter(&figure, LATEST_SERIES).x,
            [Some(20.0), Some(15.0), Some(5.0)]
        );
        assert_eq!(
            scatter(&figure, INTERNET_SERIES).x,
            [Some(30.0), Some(25.0), Some(40.0)]
        );
        assert_eq!(
            scatter(&figure, LATEST_SERIES).marker.symbol.as_deref(),
            Some("diamond")
        );
    }

    #[test]
    fn test_highlight_colours_every_series() {
        let rows = abc();
        let figure = ComparisonChart::new(&rows, 12.0).with_highlight("B").build();

        for (series, default) in [
            (BASELINE_SERIES, palette::BASELINE),
            (LATEST_SERIES, palette::LATEST),
            (INTERNET_SERIES, palette::INTERNET),
        ] {
            let color = &scatter(&figure, series).marker.color;
            assert_eq!(color.at(0), Some(default));
            assert_eq!(color.at(1), Some(palette::HIGHLIGHT));
            assert_eq!(color.at(2), Some(default));
        }
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!("latest".parse::<SortOrder>().unwrap(), SortOrder::Latest);
        assert_eq!("Change".parse::<SortOrder>().unwrap(), SortOrder::Change);
        assert_eq!(
            "alphabetical".parse::<SortOrder>().unwrap(),
            SortOrder::Alphabetical
        );
        assert!("random".parse::<SortOrder>().is_err());

        for &order in SortOrder::all() {
            assert_eq!(order.as_str().parse::<SortOrder>().unwrap(), order);
        }
    }
}
