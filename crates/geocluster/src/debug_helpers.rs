use crate::Point;
use clap::Parser;
use rand::RngExt;
use snafu::prelude::*;
use std::f64::consts::PI;
use std::path::{Path, PathBuf};

#[derive(Parser)]
pub struct PointsArgs {
    /// CSV file with `id,latitude,longitude` rows. A header row is skipped.
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Number of synthetic blobs, used when no CSV is given
    #[arg(long, default_value_t = 3)]
    pub synthetic: usize,

    /// Points per synthetic blob
    #[arg(long, default_value_t = 20)]
    pub per_blob: usize,

    /// Seed for the synthetic data and the clustering runs
    #[arg(long, default_value_t = 314159)]
    pub seed: u64,

    /// Log at debug level
    #[arg(long)]
    pub debug: bool,
}

#[derive(Debug, Snafu)]
pub enum LoadPointsError {
    #[snafu(display("failed to read {}", path.display()))]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("line {line}: expected 3 fields, got {fields}"))]
    FieldCount { line: usize, fields: usize },

    #[snafu(display("line {line}: invalid id {value:?}"))]
    InvalidId {
        line: usize,
        value: String,
        source: std::num::ParseIntError,
    },

    #[snafu(display("line {line}: invalid coordinate {value:?}"))]
    InvalidCoordinate {
        line: usize,
        value: String,
        source: std::num::ParseFloatError,
    },
}

pub fn init_logging(debug: bool) {
    let level = if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    pretty_env_logger::formatted_timed_builder()
        .filter_level(level)
        .init();
}

pub fn load_points(path: &Path) -> Result<Vec<Point>, LoadPointsError> {
    let text = std::fs::read_to_string(path).context(ReadSnafu { path })?;
    parse_points(&text)
}

pub fn parse_points(text: &str) -> Result<Vec<Point>, LoadPointsError> {
    let mut points = Vec::new();

    for (i, row) in text.lines().enumerate() {
        let line = i + 1;
        let row = row.trim();
        if row.is_empty() || row.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = row.split(',').map(str::trim).collect();
        ensure!(
            fields.len() == 3,
            FieldCountSnafu {
                line,
                fields: fields.len()
            }
        );

        // Header
        if i == 0 && fields[0].parse::<i64>().is_err() {
            continue;
        }

        let id = fields[0]
            .parse()
            .context(InvalidIdSnafu { line, value: fields[0] })?;
        let latitude = fields[1]
            .parse()
            .context(InvalidCoordinateSnafu { line, value: fields[1] })?;
        let longitude = fields[2]
            .parse()
            .context(InvalidCoordinateSnafu { line, value: fields[2] })?;

        points.push(Point::new(id, latitude, longitude));
    }

    Ok(points)
}

/// Uniform points over `[0, height) x [0, width)`.
pub fn generate_random_points(
    rng: &mut impl RngExt,
    count: usize,
    height: f64,
    width: f64,
) -> Vec<Point> {
    (0..count)
        .map(|i| {
            Point::new(
                i as i64,
                rng.random::<f64>() * height,
                rng.random::<f64>() * width,
            )
        })
        .collect()
}

/// Blobs on an 800x600 canvas: centres kept 100 units from the border, points
/// 20 to 70 units from their centre.
pub fn generate_clustered_points(
    rng: &mut impl RngExt,
    num_clusters: usize,
    points_per_cluster: usize,
) -> Vec<Point> {
    const HEIGHT: f64 = 600.0;
    const WIDTH: f64 = 800.0;

    let mut points = Vec::with_capacity(num_clusters * points_per_cluster);
    for _ in 0..num_clusters {
        let center_lat = rng.random::<f64>() * (HEIGHT - 200.0) + 100.0;
        let center_lng = rng.random::<f64>() * (WIDTH - 200.0) + 100.0;

        for _ in 0..points_per_cluster {
            let angle = rng.random::<f64>() * 2.0 * PI;
            let radius = rng.random::<f64>() * 50.0 + 20.0;
            points.push(Point::new(
                points.len() as i64,
                center_lat + angle.cos() * radius,
                center_lng + angle.sin() * radius,
            ));
        }
    }
    points
}

/// Points from `--csv`, or synthetic blobs when no file is given.
pub fn points_from_args(args: &PointsArgs) -> Result<Vec<Point>, LoadPointsError> {
    match &args.csv {
        Some(path) => load_points(path),
        None => {
            let mut rng = crate::rng::from_seed(args.seed);
            Ok(generate_clustered_points(&mut rng, args.synthetic, args.per_blob))
        }
    }
}
