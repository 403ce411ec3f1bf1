use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use streetroute::map::FileFormat;

#[derive(Debug, thiserror::Error)]
#[error("{0}: {1}")]
struct LoadError(PathBuf, #[source] streetroute::map::Error);

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Compression {
    /// Guess from the file extension and content
    Auto,
    Plain,
    Gzip,
    Bzip2,
}

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// The path to the street map file
    map_file: PathBuf,

    /// The path to the deliveries file
    deliveries_file: PathBuf,

    /// Compression of the input files
    #[arg(long, value_enum, default_value_t = Compression::Auto)]
    compression: Compression,

    /// Increase logging verbosity (may be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    colog::default_builder()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .init();

    let g = load_graph(&cli.map_file, cli.compression)?;
    let deliveries = load_deliveries(&cli.deliveries_file, cli.compression)?;

    let planner = streetroute::DeliveryPlanner::new(&g);
    let plan = planner.plan(&deliveries.depot, &deliveries.requests)?;

    println!("Starting at the depot...");
    for command in &plan.commands {
        println!("{}", command);
    }
    println!("You are back at the depot and your deliveries are done!");
    println!("{:.2} miles travelled for all deliveries.", plan.distance);

    Ok(())
}

fn file_format(path: &Path, compression: Compression) -> FileFormat {
    match compression {
        Compression::Auto => FileFormat::from_path(path),
        Compression::Plain => FileFormat::Plain,
        Compression::Gzip => FileFormat::Gzip,
        Compression::Bzip2 => FileFormat::Bzip2,
    }
}

fn load_graph(path: &Path, compression: Compression) -> Result<streetroute::Graph, LoadError> {
    let mut g = streetroute::Graph::default();
    match streetroute::map::add_segments_from_file(&mut g, file_format(path, compression), path) {
        Ok(()) => Ok(g),
        Err(e) => Err(LoadError(PathBuf::from(path), e)),
    }
}

fn load_deliveries(
    path: &Path,
    compression: Compression,
) -> Result<streetroute::map::Deliveries, LoadError> {
    streetroute::map::read_deliveries_from_file(file_format(path, compression), path)
        .map_err(|e| LoadError(PathBuf::from(path), e))
}
