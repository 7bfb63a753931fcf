//! Page rendering
//!
//! Server-side HTML for the dashboard. Figures are embedded as JSON and drawn
//! in the browser by plotly.js; the selection controls submit a plain GET so
//! every change is a fresh render.

use std::fmt::Write;

use super::{Dashboard, ExplorerView, KeyMetrics, MetricCard, PAGE_TITLE, TITLE};
use crate::charts::{Figure, MapMetric, SortOrder};
use crate::data::DataError;

pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
pub const UNAVAILABLE_MESSAGE: &str =
    "Data could not be loaded. Please check the file path and format.";

const MAP_INTRO: &str = "This map shows household internet access across European countries, \
which is a key enabler for remote work adoption. Countries with higher internet penetration \
typically have better infrastructure to support remote work practices.";

const STYLE: &str = r#"
body { font-family: "Source Sans Pro", Arial, sans-serif; margin: 0 2rem 2rem; color: #262730; }
h1 { margin-top: 1.5rem; }
.metrics { display: grid; grid-template-columns: repeat(3, 1fr); gap: 1rem; }
.metric .label { font-size: 0.9rem; color: #555; }
.metric .value { font-size: 2rem; }
.metric .delta.up { color: #09ab3b; }
.metric .delta.down { color: #ff2b2b; }
.metric .delta.flat { color: #808495; }
.columns { display: grid; grid-template-columns: 1fr 1fr; gap: 2rem; }
.chart { height: 800px; }
.alert { padding: 1rem; border-radius: 0.5rem; }
.alert.warning { background: #fffce7; color: #926c05; }
.panel-error { padding: 1rem; border-radius: 0.5rem; background: #ffecec; color: #7d353b; }
.caption, .note { font-size: 0.85rem; color: #808495; }
table { border-collapse: collapse; font-size: 0.85rem; }
th, td { border: 1px solid #e6e9ef; padding: 0.25rem 0.5rem; text-align: left; }
hr { border: none; border-top: 1px solid #e6e9ef; margin: 1.5rem 0; }
"#;

/// Render the full dashboard page
pub fn render_page(dashboard: &Dashboard) -> String {
    let mut body = String::new();

    body.push_str(&metrics_section(
        &dashboard.settings.highlight_country,
        &dashboard.metrics,
    ));
    body.push_str("<hr>\n");

    body.push_str("<form method=\"get\" class=\"columns\">\n");

    body.push_str("<div>\n<h3>The Evolution of Remote Work (2022 vs. 2024)</h3>\n");
    body.push_str(&sort_control(dashboard.selection.sort));
    match &dashboard.comparison {
        Ok(figure) => body.push_str(&figure_block("comparison-chart", figure)),
        Err(e) => body.push_str(&panel_error(e)),
    }
    body.push_str("</div>\n");

    body.push_str("<div>\n<h3>Supporting Context: Household Internet Access</h3>\n");
    let _ = writeln!(body, "<p>{}</p>", MAP_INTRO);
    body.push_str(&map_control(dashboard.selection.map_metric));
    let _ = writeln!(
        body,
        "<p class=\"caption\">{}</p>",
        escape(dashboard.map_scale.help_text)
    );
    body.push_str(&figure_block("map-chart", &dashboard.map));
    body.push_str("</div>\n");

    body.push_str("</form>\n");

    body.push_str(&explorer_section(&dashboard.explorer));

    document(&body, true)
}

/// Render the page shown when the table could not be loaded: a single
/// warning and nothing else.
pub fn render_unavailable(error: &DataError) -> String {
    let body = format!(
        "<div class=\"alert warning\" role=\"alert\">{} <span class=\"note\">{}</span></div>\n",
        UNAVAILABLE_MESSAGE,
        escape(&error.to_string())
    );
    document(&body, false)
}

fn document(body: &str, with_plotly: bool) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(html, "<title>{}</title>", PAGE_TITLE);
    let _ = writeln!(html, "<style>{}</style>", STYLE);
    if with_plotly {
        let _ = writeln!(html, "<script src=\"{}\"></script>", PLOTLY_CDN);
    }
    html.push_str("</head>\n<body>\n");
    let _ = writeln!(html, "<h1>{}</h1>", TITLE);
    html.push_str(body);
    html.push_str("</body>\n</html>\n");
    html
}

fn metrics_section(country: &str, metrics: &Result<KeyMetrics, DataError>) -> String {
    let mut html = String::new();
    let _ = writeln!(html, "<h3>Key Insights for {}</h3>", escape(country));
    match metrics {
        Ok(metrics) => {
            html.push_str("<div class=\"metrics\">\n");
            for card in metrics.cards() {
                html.push_str(&metric_card(card));
            }
            html.push_str("</div>\n");
        }
        Err(e) => html.push_str(&panel_error(e)),
    }
    html
}

fn metric_card(card: &MetricCard) -> String {
    let mut html = String::new();
    match &card.help {
        Some(help) => {
            let _ = writeln!(html, "<div class=\"metric\" title=\"{}\">", escape(help));
        }
        None => html.push_str("<div class=\"metric\">\n"),
    }
    let _ = writeln!(html, "<div class=\"label\">{}</div>", escape(&card.label));
    let _ = writeln!(html, "<div class=\"value\">{}</div>", escape(&card.value));
    if let Some(delta) = &card.delta {
        let (class, arrow) = match delta.direction {
            super::Direction::Up => ("up", "&#8593;"),
            super::Direction::Down => ("down", "&#8595;"),
            super::Direction::Flat => ("flat", "&#8594;"),
        };
        let _ = writeln!(
            html,
            "<div class=\"delta {}\">{} {}</div>",
            class,
            arrow,
            escape(&delta.text)
        );
    }
    html.push_str("</div>\n");
    html
}

fn sort_control(selected: SortOrder) -> String {
    let mut html = String::from(
        "<label>Sort Countries By: <select name=\"sort\" onchange=\"this.form.submit()\">\n",
    );
    for order in SortOrder::all() {
        let _ = writeln!(
            html,
            "<option value=\"{}\"{}>{}</option>",
            order.as_str(),
            if *order == selected { " selected" } else { "" },
            order.label()
        );
    }
    html.push_str("</select></label>\n");
    html
}

fn map_control(selected: MapMetric) -> String {
    let mut html = String::from("<fieldset><legend>Select Map Metric:</legend>\n");
    for metric in MapMetric::all() {
        let _ = writeln!(
            html,
            "<label><input type=\"radio\" name=\"map_metric\" value=\"{}\"{} onchange=\"this.form.submit()\"> {}</label>",
            metric.as_str(),
            if *metric == selected { " checked" } else { "" },
            metric.scale().label
        );
    }
    html.push_str("</fieldset>\n");
    html
}

fn figure_block(id: &str, figure: &Figure) -> String {
    match figure.to_json() {
        Ok(json) => format!(
            "<div id=\"{id}\" class=\"chart\"></div>\n<script>(function () {{ var fig = {json}; \
Plotly.newPlot(\"{id}\", fig.data, fig.layout, {{responsive: true}}); }})();</script>\n",
            id = id,
            json = json.replace("</", "<\\/"),
        ),
        Err(e) => {
            tracing::error!(chart = %id, error = %e, "Failed to serialize figure");
            format!(
                "<div class=\"panel-error\">Chart could not be rendered: {}</div>\n",
                escape(&e.to_string())
            )
        }
    }
}

fn panel_error(error: &DataError) -> String {
    format!(
        "<div class=\"panel-error\" role=\"alert\">{}</div>\n",
        escape(&error.to_string())
    )
}

fn explorer_section(view: &ExplorerView) -> String {
    let mut html = String::from("<details>\n<summary>Explore the Full Dataset</summary>\n");

    if !view.report.missing_columns.is_empty() {
        let _ = writeln!(
            html,
            "<p class=\"note\">Missing columns: {}</p>",
            escape(&view.report.missing_columns.join(", "))
        );
    }
    if view.report.rows_failed > 0 {
        let _ = writeln!(
            html,
            "<p class=\"note\">{} malformed record(s) skipped.</p>",
            view.report.rows_failed
        );
    }
    if view.report.invalid_values > 0 {
        let _ = writeln!(
            html,
            "<p class=\"note\">{} value(s) could not be read as numbers and are shown as missing.</p>",
            view.report.invalid_values
        );
    }

    html.push_str("<table>\n<thead><tr>");
    for column in &view.columns {
        let _ = write!(html, "<th>{}</th>", escape(column));
    }
    html.push_str("</tr></thead>\n<tbody>\n");
    for record in &view.records {
        html.push_str("<tr>");
        for cell in record {
            let _ = write!(html, "<td>{}</td>", escape(cell));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n</details>\n");
    html
}

/// Escape text for HTML element content and quoted attributes
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{DashboardSettings, Selection};
    use crate::data::{Row, Table};
    use std::path::PathBuf;

    fn table() -> Table {
        Table::from_rows(vec![
            Row::new("European Union - 27 countries (from 2020)")
                .remote_work(Some(20.0), Some(22.0))
                .internet(Some(93.0), Some(1.0)),
            Row::new("Romania")
                .remote_work(Some(8.0), Some(9.5))
                .internet(Some(91.0), Some(2.0))
                .iso("ROU"),
            Row::new("Bosnia <and> Herzegovina").iso("BIH"),
        ])
    }

    #[test]
    fn test_full_page() {
        let dashboard = Dashboard::build(
            &table(),
            Selection::default(),
            &DashboardSettings::default(),
        );
        let html = render_page(&dashboard);

        assert!(html.contains(TITLE));
        assert!(html.contains("Key Insights for Romania"));
        assert!(html.contains("9.50%"));
        assert!(html.contains("id=\"comparison-chart\""));
        assert!(html.contains("id=\"map-chart\""));
        assert!(html.contains("<summary>Explore the Full Dataset</summary>"));
        assert!(html.contains(PLOTLY_CDN));
        assert!(!html.contains("alert warning"));
    }

    #[test]
    fn test_selection_is_reflected_in_controls() {
        let selection = Selection {
            sort: SortOrder::Change,
            map_metric: MapMetric::InternetChange,
        };
        let dashboard = Dashboard::build(&table(), selection, &DashboardSettings::default());
        let html = render_page(&dashboard);

        assert!(html.contains("<option value=\"change\" selected>"));
        assert!(html.contains("value=\"internet_change\" checked"));
        assert!(html.contains("Blue shows improvement"));
    }

    #[test]
    fn test_unavailable_page_has_single_warning() {
        let err = DataError::NotFound {
            path: PathBuf::from("romania_remote_work_prepared_data.csv"),
        };
        let html = render_unavailable(&err);

        assert_eq!(html.matches("alert warning").count(), 1);
        assert!(html.contains(UNAVAILABLE_MESSAGE));
        assert!(html.contains("romania_remote_work_prepared_data.csv"));
        assert!(!html.contains("class=\"chart\""));
        assert!(!html.contains("class=\"metric"));
        assert!(!html.contains("<details>"));
        assert!(!html.contains("plotly"));
    }

    #[test]
    fn test_explorer_notes_unreadable_values() {
        let table = crate::data::read_table_str(
            "Country,Remote_Work_2022,Remote_Work_2024\nRomania,n/a,9.5\n",
        )
        .unwrap();
        let dashboard = Dashboard::build(&table, Selection::default(), &DashboardSettings::default());
        let html = render_page(&dashboard);

        assert!(html.contains("1 value(s) could not be read as numbers"));
        assert!(html.contains("<td>n/a</td>"));
    }

    #[test]
    fn test_panel_errors_do_not_hide_other_panels() {
        let table = Table::from_rows(vec![Row::new("Romania").iso("ROU")]);
        let dashboard = Dashboard::build(&table, Selection::default(), &DashboardSettings::default());
        let html = render_page(&dashboard);

        assert_eq!(html.matches("class=\"panel-error\"").count(), 2);
        assert!(html.contains("No aggregate row matching"));
        assert!(html.contains("id=\"map-chart\""));
        assert!(html.contains("<details>"));
    }

    #[test]
    fn test_cells_are_escaped() {
        let dashboard = Dashboard::build(
            &table(),
            Selection::default(),
            &DashboardSettings::default(),
        );
        let html = render_page(&dashboard);

        assert!(html.contains("<td>Bosnia &lt;and&gt; Herzegovina</td>"));
        assert!(!html.contains("<td>Bosnia <and>"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
        assert_eq!(escape("Türkiye"), "Türkiye");
    }
}
