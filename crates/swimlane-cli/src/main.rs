//! swimlane CLI: Lay out and view multi-lane timelines

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use swimlane_engine::{ConfigError, PackOrder, TimelineDocument, TimelineLayout};
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Multi-lane timeline layout with a terminal viewer
#[derive(Parser)]
#[command(name = "swimlane")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log layout passes to stderr (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the TUI (default when no command specified)
    Tui {
        /// Timeline document; the sample timeline when omitted
        file: Option<PathBuf>,
    },

    /// Compute and print the layout of a timeline document
    Layout {
        /// Timeline document
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Override the document's packing order
        #[arg(long, value_enum)]
        order: Option<OrderArg>,
    },

    /// Validate a timeline document and report malformed items
    Check {
        /// Timeline document
        file: PathBuf,
    },

    /// Print the sample timeline document as JSON
    Sample,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrderArg {
    /// Items in lane order
    Insertion,
    /// Items sorted by start date, then duration
    ByStart,
}

impl From<OrderArg> for PackOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Insertion => PackOrder::Insertion,
            OrderArg::ByStart => PackOrder::ByStart,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        None => run_tui(None),
        Some(Commands::Tui { file }) => run_tui(file.as_deref()),
        Some(Commands::Layout { file, json, order }) => {
            init_logging(cli.verbose);
            cmd_layout(&file, json, order);
        }
        Some(Commands::Check { file }) => {
            init_logging(cli.verbose);
            cmd_check(&file);
        }
        Some(Commands::Sample) => cmd_sample(),
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "swimlane_engine=debug,info" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn load_or_exit(path: &Path) -> TimelineDocument {
    match TimelineDocument::load(path) {
        Ok(doc) => {
            debug!(path = %path.display(), lanes = doc.lanes.len(), "loaded document");
            doc
        }
        Err(e) => exit_with(&e),
    }
}

fn exit_with(e: &ConfigError) -> ! {
    eprintln!("Error: {e}");
    std::process::exit(1);
}

fn run_tui(file: Option<&Path>) {
    // No subscriber here: log lines on stderr would tear the alternate screen.
    let document = file.map_or_else(TimelineDocument::sample, load_or_exit);
    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to create tokio runtime: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = rt.block_on(swimlane_tui::run_tui(document)) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn cmd_layout(path: &Path, json: bool, order: Option<OrderArg>) {
    let mut document = load_or_exit(path);
    if let Some(order) = order {
        document.pack_order = order.into();
    }
    let pack_order = document.pack_order;
    let layout = document.into_model().layout();

    if json {
        match serde_json::to_string_pretty(&layout) {
            Ok(text) => println!("{text}"),
            Err(e) => exit_with(&ConfigError::Serialize(e)),
        }
        return;
    }

    print_layout(&layout, pack_order);
}

fn print_layout(layout: &TimelineLayout, order: PackOrder) {
    println!(
        "Window: {} .. {} ({} days)",
        layout.window.start(),
        layout.window.end(),
        layout.window.span_days()
    );
    println!("Pack order: {order}");
    println!("Total height: {}px\n", layout.total_height_px);

    let label_width = layout
        .lanes
        .iter()
        .flat_map(|lane| lane.items.iter().map(|item| item.label.chars().count()))
        .max()
        .unwrap_or(0)
        .max(5);

    for lane in &layout.lanes {
        println!(
            "{}  rows={}  height={}px  offset={}px",
            lane.name, lane.row_count, lane.height_px, lane.offset_px
        );
        for item in &lane.items {
            println!(
                "  {:<label_width$}  row {}  left {:>7}  width {:>7}  top {}px",
                item.label,
                item.row,
                item.left_percent.to_string(),
                item.width_percent.to_string(),
                item.top_px
            );
        }
        println!();
    }
}

fn cmd_check(path: &Path) {
    let document = load_or_exit(path);
    let inverted = document.inverted_items();
    let item_count: usize = document.lanes.iter().map(|lane| lane.items.len()).sum();

    info!(lanes = document.lanes.len(), items = item_count, "document parsed");

    if inverted.is_empty() {
        println!(
            "{}: ok ({} lanes, {item_count} items)",
            path.display(),
            document.lanes.len()
        );
        return;
    }

    println!("{}: {} malformed item(s)", path.display(), inverted.len());
    for (lane, item) in &inverted {
        println!("  {lane} / {item}: ends before it starts");
    }
    std::process::exit(1);
}

fn cmd_sample() {
    match serde_json::to_string_pretty(&TimelineDocument::sample()) {
        Ok(text) => println!("{text}"),
        Err(e) => exit_with(&ConfigError::Serialize(e)),
    }
}
