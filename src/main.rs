//! Non-interactive entry point: load the two datasets, build the default
//! view datasets for one report date, and print a summary or export JSON.

use anyhow::{bail, Context, Result};
use clap::Parser;
use hesitancy_atlas::views::{bubble, map, stream};
use hesitancy_atlas::{join, MapAttribute, SizeAttribute, StreamAttribute, US_STATES};
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "hesitancy_atlas",
    about = "COVID-19 vaccine hesitancy and community risk, by U.S. county"
)]
struct Args {
    /// Community-levels CSV path
    #[arg(short = 'c', long = "community")]
    community: PathBuf,

    /// Vaccine-hesitancy CSV path
    #[arg(short = 'v', long = "hesitancy")]
    hesitancy: PathBuf,

    /// Report date (defaults to the earliest in the data)
    #[arg(short = 'd', long = "date")]
    date: Option<String>,

    /// Map attribute label, e.g. "Cases Per 100k"
    #[arg(long = "attribute", default_value = "Social Vulnerability Index")]
    attribute: String,

    /// State name for the map view (defaults to the country view)
    #[arg(long = "state")]
    state: Option<String>,

    /// Directory for bubble.json / map.json / stream.json export
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let Some(attribute) = MapAttribute::from_label(&args.attribute) else {
        let labels: Vec<&str> = MapAttribute::ALL.iter().map(|a| a.label()).collect();
        bail!(
            "unknown map attribute '{}'; valid attributes: [{}]",
            args.attribute,
            labels.join(", ")
        );
    };

    if let Some(name) = args.state.as_deref() {
        if !US_STATES.contains(&name) {
            bail!(
                "unknown state '{name}'; valid states: [{}]",
                US_STATES.join(", ")
            );
        }
    }

    let session = join::process(&args.community, &args.hesitancy, args.date.as_deref())?;
    info!(
        date = %session.date,
        counties = session.joined.height(),
        "processed session"
    );

    let scope = match args.state.as_deref() {
        Some(name) if name != "Country View" => map::MapScope::State(name),
        _ => map::MapScope::Country,
    };

    let bubble_chart = bubble::assemble(
        &session.joined,
        SizeAttribute::PercentWhite,
        &bubble::BubbleOptions::default(),
    )?;
    let choropleth = map::assemble(&session.joined, attribute, None, scope)?;
    let stream_graph = stream::assemble(&session.community, StreamAttribute::CommunityLevel)?;

    match &args.output {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create output directory {}", dir.display()))?;
            write_json(&dir.join("bubble.json"), &bubble_chart)?;
            write_json(&dir.join("map.json"), &choropleth)?;
            write_json(&dir.join("stream.json"), &stream_graph)?;
            info!(dir = %dir.display(), "exported view datasets");
        }
        None => {
            let points: usize = bubble_chart.series.iter().map(|s| s.points.len()).sum();
            println!("Report date: {}", session.date);
            println!("Joined counties: {}", session.joined.height());
            println!(
                "Bubble: {} series, {} points after thresholds",
                bubble_chart.series.len(),
                points
            );
            println!(
                "Map ({}): {} regions, {} legend buckets",
                choropleth.attribute,
                choropleth.regions.len(),
                choropleth.legend.len()
            );
            println!(
                "Stream ({}): {} layers over {} dates",
                stream_graph.attribute,
                stream_graph.layers.len(),
                stream_graph.dates.len()
            );
        }
    }

    Ok(())
}

fn write_json<T: serde::Serialize>(path: &PathBuf, value: &T) -> Result<()> {
    let file = fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(file, value)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
