use clap::Parser;
use geocluster::debug_helpers::{LoadPointsError, PointsArgs, init_logging, points_from_args};
use geocluster::kmeans::elbow;
use geocluster::rng;
use log::info;

#[derive(Parser)]
struct Args {
    #[command(flatten)]
    points: PointsArgs,

    /// Largest k to evaluate
    #[arg(long, default_value_t = elbow::DEFAULT_MAX_K)]
    max_k: usize,
}

#[snafu::report]
fn main() -> Result<(), LoadPointsError> {
    let args = Args::parse();
    init_logging(args.points.debug);

    let points = points_from_args(&args.points)?;
    info!("loaded {} points", points.len());

    let mut rng = rng::from_seed(args.points.seed);
    let curve = elbow::wcss_curve(&mut rng, &points, args.max_k);
    // Elbow over the printed curve, limited to k <= n / 2
    let suggested = elbow::suggest_from_curve(points.len(), args.max_k, &curve);

    for (i, wcss) in curve.iter().enumerate() {
        let marker = if i + 1 == suggested { " <-" } else { "" };
        println!("k={:>2} wcss={:.6}{}", i + 1, wcss, marker);
    }
    println!("suggested k={suggested}");

    Ok(())
}
