use clap::Parser;
use geocluster::debug_helpers::{LoadPointsError, PointsArgs, init_logging, points_from_args};
use geocluster::kmeans::{self, Options, ReseedStrategy};
use geocluster::{calculate_cluster_radius, palette, rng};
use log::info;
use std::time::Instant;

#[derive(Parser)]
struct Args {
    #[command(flatten)]
    points: PointsArgs,

    /// Number of clusters
    #[arg(short, default_value_t = 3)]
    k: usize,

    #[arg(long, default_value_t = kmeans::MAX_ITERATIONS)]
    max_iterations: usize,

    /// Reseed empty clusters onto the farthest point instead of a random one
    #[arg(long)]
    farthest: bool,
}

#[snafu::report]
fn main() -> Result<(), LoadPointsError> {
    let args = Args::parse();
    init_logging(args.points.debug);

    let points = points_from_args(&args.points)?;
    info!("loaded {} points", points.len());

    let options = Options {
        max_iterations: args.max_iterations,
        reseed: if args.farthest {
            ReseedStrategy::FarthestPoint
        } else {
            ReseedStrategy::RandomPoint
        },
        ..Options::default()
    };

    let mut rng = rng::from_seed(args.points.seed);
    let t = Instant::now();
    let result = kmeans::find_centroids(&mut rng, &points, args.k, &options);
    let elapsed = t.elapsed();
    let clusters = kmeans::assemble(&points, &result);

    println!(
        "k={}, iterations={}, converged={}, wcss={:.6}, {:?}",
        clusters.len(),
        result.iterations,
        result.converged,
        kmeans::elbow::wcss(&clusters),
        elapsed,
    );
    for cluster in &clusters {
        println!(
            "C{} {} centroid=({:.6}, {:.6}) radius={:.6} points={}",
            cluster.id + 1,
            palette::to_hex(cluster.color),
            cluster.centroid.latitude,
            cluster.centroid.longitude,
            calculate_cluster_radius(cluster),
            cluster.points.len(),
        );
    }

    Ok(())
}
