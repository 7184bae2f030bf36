use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use engine::{
    ArtifactPaths, CropPrediction, RecommendationContext, DEFAULT_DATA_PATH, DEFAULT_LABELS_PATH,
    DEFAULT_MODEL_PATH,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;

/// CropRecs - District Crop Recommendation Engine
#[derive(Parser)]
#[command(name = "crop-recs")]
#[command(about = "Crop recommendations from district soil and weather data", long_about = None)]
struct Cli {
    /// District soil/weather CSV
    #[arg(short, long, env = "CROP_RECS_DATA", default_value = DEFAULT_DATA_PATH)]
    data: PathBuf,

    /// Random forest JSON artifact
    #[arg(short, long, env = "CROP_RECS_MODEL", default_value = DEFAULT_MODEL_PATH)]
    model: PathBuf,

    /// Label encoder JSON artifact
    #[arg(short, long, env = "CROP_RECS_LABELS", default_value = DEFAULT_LABELS_PATH)]
    labels: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get crop recommendations for a district
    Recommend {
        /// District name (case-insensitive)
        #[arg(long)]
        district: String,

        /// Number of crops to return
        #[arg(long, default_value = "3")]
        top_n: usize,
    },

    /// List districts in the dataset with their features
    Districts {
        /// Only show districts containing this text (case-insensitive)
        #[arg(long)]
        filter: Option<String>,
    },

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let paths = ArtifactPaths {
        data: cli.data,
        model: cli.model,
        labels: cli.labels,
    };

    // Load dataset and model artifacts
    let start = Instant::now();
    let context = Arc::new(
        RecommendationContext::load(&paths).context("Failed to load recommendation artifacts")?,
    );
    println!(
        "{} Loaded {} districts and {} crops in {:?}",
        "✓".green(),
        context.dataset().len(),
        context.n_classes(),
        start.elapsed()
    );

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend { district, top_n } => handle_recommend(&context, &district, top_n)?,
        Commands::Districts { filter } => handle_districts(&context, filter.as_deref()),
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(context, requests, concurrent).await?,
    }

    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(context: &RecommendationContext, district: &str, top_n: usize) -> Result<()> {
    let recommendations = context.recommend(district, top_n)?;
    print_recommendations(district, &recommendations);
    Ok(())
}

/// Handle the 'districts' command
fn handle_districts(context: &RecommendationContext, filter: Option<&str>) {
    let filter = filter.map(str::to_lowercase);
    let dataset = context.dataset();

    if !dataset.missing_columns().is_empty() {
        println!(
            "{} dataset lacks columns: {}",
            "!".yellow(),
            dataset.missing_columns().join(", ")
        );
    }

    let mut shown = 0;
    for record in dataset.records() {
        if let Some(filter) = &filter {
            if !record.district.to_lowercase().contains(filter.as_str()) {
                continue;
            }
        }
        shown += 1;

        let features = match record.feature_vector() {
            Some(fv) => fv
                .as_slice()
                .iter()
                .map(|v| format!("{:.1}", v))
                .collect::<Vec<_>>()
                .join(", "),
            None => "(incomplete)".dimmed().to_string(),
        };
        println!("{} [{}]", record.district.bold(), features);
    }
    println!("{} of {} districts shown", shown, dataset.len());
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    context: Arc<RecommendationContext>,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    let districts: Vec<String> = context.dataset().districts().map(String::from).collect();
    if districts.is_empty() {
        bail!("Dataset has no districts to benchmark");
    }
    if requests == 0 {
        bail!("Benchmark needs at least one request");
    }

    // Pick random districts up front so the timed loop only measures lookups
    let picks: Vec<String> = (0..requests)
        .map(|_| districts[rand::random_range(0..districts.len())].clone())
        .collect();

    let limiter = Arc::new(Semaphore::new(concurrent.max(1)));
    let wall_clock = Instant::now();

    let mut handles = vec![];
    for district in picks {
        let context = context.clone();
        let limiter = limiter.clone();
        let handle = tokio::spawn(async move {
            let _permit = limiter.acquire_owned().await?;
            let elapsed = tokio::task::spawn_blocking(move || {
                let start = Instant::now();
                context.recommend(&district, 3)?;
                Ok::<_, anyhow::Error>(start.elapsed())
            })
            .await??;
            Ok::<_, anyhow::Error>(elapsed)
        });
        handles.push(handle);
    }

    // Wait for all tasks to complete and collect timings
    let mut timings: Vec<Duration> = vec![];
    for handle in handles {
        timings.push(handle.await??);
    }
    let total_time = wall_clock.elapsed();

    timings.sort();
    let latency_sum: Duration = timings.iter().sum();
    let avg_latency = latency_sum / (timings.len() as u32);
    let percentile = |p: f64| timings[((timings.len() as f64 * p) as usize).min(timings.len() - 1)];
    let throughput = requests as f64 / total_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Helper function to format and print recommendations
fn print_recommendations(district: &str, recommendations: &[CropPrediction]) {
    println!(
        "{}",
        format!("Crop recommendations for {}:", district).bold().blue()
    );
    for (rank, prediction) in recommendations.iter().enumerate() {
        println!(
            "{}. {} - {:.1}%",
            (rank + 1).to_string().green(),
            prediction.crop,
            prediction.probability * 100.0
        );
    }
}
