//! Telework CLI
//!
//! Command-line interface for the dashboard without running the server:
//! - Render the page to a static HTML file
//! - Print the key metrics
//! - Dump the loaded table
//! - Generate a default config file

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use telework::charts::{MapMetric, SortOrder};
use telework::config::{generate_default_config, Config};
use telework::dashboard::{
    render_page, render_unavailable, Dashboard, ExplorerView, KeyMetrics, Selection,
};
use telework::data::{load_table, Partition, Table};

#[derive(Parser)]
#[command(name = "telework-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Remote work in Europe, from the command line")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// CSV file, overrides the configured path
    #[arg(short, long, global = true)]
    pub data: Option<PathBuf>,

    /// Log level for diagnostics on stderr
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the dashboard to a static HTML file
    Render {
        /// Output file
        #[arg(short, long, default_value = "dashboard.html")]
        output: PathBuf,
        /// Comparison chart order (latest, change, alphabetical)
        #[arg(long, default_value = "latest", value_parser = parse_sort)]
        sort: SortOrder,
        /// Map metric (internet_access, internet_change)
        #[arg(long, default_value = "internet_access", value_parser = parse_map_metric)]
        map_metric: MapMetric,
    },

    /// Print the key metrics for a country
    Summary {
        /// Country (default: the configured highlight country)
        #[arg(long)]
        country: Option<String>,
    },

    /// Print the loaded table
    Explore {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ExploreFormat::Table)]
        format: ExploreFormat,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExploreFormat {
    Table,
    Csv,
    Json,
}

fn parse_sort(s: &str) -> Result<SortOrder, String> {
    s.parse()
}

fn parse_map_metric(s: &str) -> Result<MapMetric, String> {
    s.parse()
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    telework::logging::init_cli(&cli.log_level);

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load_default(),
    };
    if let Some(data) = &cli.data {
        config.data.path = data.to_string_lossy().into_owned();
    }
    let settings = config.dashboard.settings();

    match cli.command {
        Commands::Render {
            output,
            sort,
            map_metric,
        } => {
            let html = match load_table(&config.data.path()) {
                Ok(table) => {
                    let selection = Selection { sort, map_metric };
                    render_page(&Dashboard::build(&table, selection, &settings))
                }
                Err(e) => {
                    eprintln!("Warning: {}", e);
                    render_unavailable(&e)
                }
            };

            if let Some(parent) = output.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(&output, html)
                .with_context(|| format!("writing {}", output.display()))?;
            println!("Dashboard written to {}", output.display());
        }

        Commands::Summary { country } => {
            let table = open(&config)?;
            let partition = Partition::split(&table, &settings.aggregate_marker);
            let country = country.unwrap_or_else(|| settings.highlight_country.clone());
            let metrics = KeyMetrics::for_country(&partition, &country, &settings.reference_name)?;
            print_metrics(&metrics);
        }

        Commands::Explore { format } => {
            let table = open(&config)?;
            let view = ExplorerView::from_table(&table);

            match format {
                ExploreFormat::Table => println!("{}", view.to_text()),
                ExploreFormat::Csv => view.write_csv(std::io::stdout().lock())?,
                ExploreFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
            }

            if !view.report.is_clean() {
                eprintln!(
                    "{} malformed record(s) skipped, {} invalid value(s), missing columns: [{}]",
                    view.report.rows_failed,
                    view.report.invalid_values,
                    view.report.missing_columns.join(", ")
                );
            }
        }

        Commands::Config { output } => {
            let config = generate_default_config();

            match output {
                Some(path) => {
                    // Create parent directory if needed
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

fn open(config: &Config) -> anyhow::Result<Table> {
    let path = config.data.path();
    load_table(&path).with_context(|| format!("loading {}", path.display()))
}

fn print_metrics(metrics: &KeyMetrics) {
    for card in metrics.cards() {
        print!("{:<40} {:>12}", card.label, card.value);
        if let Some(delta) = &card.delta {
            print!("  ({})", delta.text);
        }
        println!();
        if let Some(help) = &card.help {
            println!("    {}", help);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selections() {
        assert_eq!(parse_sort("change").unwrap(), SortOrder::Change);
        assert!(parse_sort("sideways").is_err());
        assert_eq!(
            parse_map_metric("internet_change").unwrap(),
            MapMetric::InternetChange
        );
    }

    #[test]
    fn test_cli_parses_render() {
        let cli = Cli::try_parse_from([
            "telework-cli",
            "render",
            "--sort",
            "alphabetical",
            "--data",
            "x.csv",
        ])
        .unwrap();

        assert_eq!(cli.data, Some(PathBuf::from("x.csv")));
        match cli.command {
            Commands::Render {
                sort, map_metric, ..
            } => {
                assert_eq!(sort, SortOrder::Alphabetical);
                assert_eq!(map_metric, MapMetric::InternetAccess);
            }
            _ => panic!("expected render"),
        }
    }
}
