//! PSA Converter - Command Line Interface
//!
//! Converts pickup-and-delivery benchmark instances into the canonical
//! PSA matrix format.

use clap::{Parser, Subcommand, ValueEnum};
use psa_converter::batch::{run_batch, BatchConfig};
use psa_converter::convert::{convert_file, convert_source, default_output_path, ConvertOptions};
use psa_converter::matrix::DistanceMetric;
use psa_converter::psa::read_tour;
use psa_converter::visualization::Visualizer;

use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "psa-converter")]
#[command(author = "M2 AI2D Student")]
#[command(version = "1.0")]
#[command(about = "Converts pickup-and-delivery benchmark instances into the PSA format")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a single instance file
    Convert {
        /// Path to the raw instance file
        #[arg(short, long)]
        input: PathBuf,

        /// Output path (defaults to `<input-name>.psa` beside the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Source dialect
        #[arg(short, long, value_enum, default_value = "auto")]
        dialect: DialectArg,

        /// Distance function for the matrix
        #[arg(short, long, value_enum, default_value = "euclidean")]
        metric: MetricArg,
    },

    /// Convert every raw instance in a directory
    Batch {
        /// Directory containing raw instance files
        #[arg(short, long)]
        dir: PathBuf,

        /// Output directory for `.psa` files (defaults to the input directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Source dialect
        #[arg(long, value_enum, default_value = "auto")]
        dialect: DialectArg,

        /// Distance function for the matrix
        #[arg(short, long, value_enum, default_value = "euclidean")]
        metric: MetricArg,

        /// Write a per-file CSV summary here
        #[arg(short, long)]
        report: Option<PathBuf>,
    },

    /// Parse and normalize an instance, print its statistics
    Analyze {
        /// Path to the raw instance file
        #[arg(short, long)]
        instance: PathBuf,

        /// Source dialect
        #[arg(short, long, value_enum, default_value = "auto")]
        dialect: DialectArg,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render an instance and a solver tour to SVG
    Render {
        /// Path to the raw instance file
        #[arg(short, long)]
        instance: PathBuf,

        /// Path to a tour file (whitespace-separated normalized node indices)
        #[arg(short, long)]
        tour: Option<PathBuf>,

        /// Output SVG path
        #[arg(short, long)]
        output: PathBuf,

        /// Source dialect
        #[arg(short, long, value_enum, default_value = "auto")]
        dialect: DialectArg,

        /// Canvas width
        #[arg(long, default_value = "600")]
        width: f64,

        /// Canvas height
        #[arg(long, default_value = "600")]
        height: f64,

        /// Canvas margin
        #[arg(long, default_value = "50")]
        margin: f64,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum DialectArg {
    /// Sniff the dialect from the file content
    Auto,
    /// Hosny PDPTW: pickup and delivery records in split halves
    Hosny,
    /// Wan-Rong-Jih CTSPPDTW: comment-marked node table plus task records
    WanRongJih,
}

impl DialectArg {
    fn to_dialect(self) -> Option<psa_converter::Dialect> {
        match self {
            DialectArg::Auto => None,
            DialectArg::Hosny => Some(psa_converter::Dialect::Hosny),
            DialectArg::WanRongJih => Some(psa_converter::Dialect::WanRongJih),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum MetricArg {
    /// True 2-D Euclidean distance, rounded to nearest integer
    Euclidean,
    /// The legacy converters' x-axis-only formula, for bit-for-bit
    /// compatibility with previously generated PSA files
    LegacyXAxis,
}

impl MetricArg {
    fn to_metric(self) -> DistanceMetric {
        match self {
            MetricArg::Euclidean => DistanceMetric::Euclidean,
            MetricArg::LegacyXAxis => DistanceMetric::LegacyXAxis,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert { input, output, dialect, metric } => {
            convert_one(&input, output, dialect, metric);
        }

        Commands::Batch { dir, output_dir, dialect, metric, report } => {
            run_batch_dir(&dir, output_dir, dialect, metric, report);
        }

        Commands::Analyze { instance, dialect, json } => {
            analyze_instance(&instance, dialect, json);
        }

        Commands::Render { instance, tour, output, dialect, width, height, margin } => {
            render_instance(&instance, tour, &output, dialect, width, height, margin);
        }
    }
}

fn convert_one(input: &PathBuf, output: Option<PathBuf>, dialect: DialectArg, metric: MetricArg) {
    let options = ConvertOptions {
        dialect: dialect.to_dialect(),
        metric: metric.to_metric(),
    };
    let output = output.unwrap_or_else(|| default_output_path(input));

    match convert_file(input, &output, &options) {
        Ok(conversion) => {
            println!(
                "Converted {:?} [{}]: {} nodes, {} tasks -> {:?}",
                input,
                conversion.dialect,
                conversion.instance.num_nodes(),
                conversion.instance.num_tasks(),
                output
            );
        }
        Err(e) => {
            eprintln!("Error converting {:?}: {}", input, e);
            std::process::exit(1);
        }
    }
}

fn run_batch_dir(
    dir: &PathBuf,
    output_dir: Option<PathBuf>,
    dialect: DialectArg,
    metric: MetricArg,
    report: Option<PathBuf>,
) {
    let config = BatchConfig {
        output_dir,
        options: ConvertOptions {
            dialect: dialect.to_dialect(),
            metric: metric.to_metric(),
        },
    };

    let summary = match run_batch(dir, &config) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("Error reading directory {:?}: {}", dir, e);
            std::process::exit(1);
        }
    };

    println!("{}", summary.report());

    if let Some(report_path) = report {
        match summary.export_csv(&report_path) {
            Ok(()) => println!("Summary exported to {:?}", report_path),
            Err(e) => eprintln!("Failed to export summary: {}", e),
        }
    }

    if summary.num_failed() > 0 {
        std::process::exit(1);
    }
}

fn analyze_instance(path: &PathBuf, dialect: DialectArg, json: bool) {
    let instance = match load_instance(path, dialect) {
        Ok(instance) => instance,
        Err(e) => {
            eprintln!("Error loading instance: {}", e);
            std::process::exit(1);
        }
    };

    let stats = instance.statistics();
    if json {
        println!("{}", serde_json::to_string_pretty(&stats).unwrap());
    } else {
        println!("========== Instance Analysis ==========\n");
        println!("{}", stats);
    }
}

fn render_instance(
    path: &PathBuf,
    tour_path: Option<PathBuf>,
    output: &PathBuf,
    dialect: DialectArg,
    width: f64,
    height: f64,
    margin: f64,
) {
    let instance = match load_instance(path, dialect) {
        Ok(instance) => instance,
        Err(e) => {
            eprintln!("Error loading instance: {}", e);
            std::process::exit(1);
        }
    };

    let tour = match tour_path {
        Some(tour_path) => {
            let content = match std::fs::read_to_string(&tour_path) {
                Ok(content) => content,
                Err(e) => {
                    eprintln!("Error reading tour {:?}: {}", tour_path, e);
                    std::process::exit(1);
                }
            };
            match read_tour(&content) {
                Ok(tour) => Some(tour),
                Err(e) => {
                    eprintln!("Error parsing tour {:?}: {}", tour_path, e);
                    std::process::exit(1);
                }
            }
        }
        None => None,
    };

    let viz = Visualizer {
        width,
        height,
        margin,
        ..Visualizer::default()
    };

    let svg = match viz.render(&instance, tour.as_deref()) {
        Ok(svg) => svg,
        Err(e) => {
            eprintln!("Error rendering: {}", e);
            std::process::exit(1);
        }
    };

    match viz.save_svg(&svg, output) {
        Ok(()) => println!("Rendering saved to {:?}", output),
        Err(e) => {
            eprintln!("Failed to save SVG: {}", e);
            std::process::exit(1);
        }
    }
}

fn load_instance(
    path: &PathBuf,
    dialect: DialectArg,
) -> psa_converter::Result<psa_converter::Instance> {
    let content = std::fs::read_to_string(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let options = ConvertOptions {
        dialect: dialect.to_dialect(),
        metric: DistanceMetric::Euclidean,
    };
    Ok(convert_source(&name, &content, &options)?.instance)
}
