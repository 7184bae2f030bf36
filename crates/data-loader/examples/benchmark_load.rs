use data_loader::DistrictDataset;
use std::path::Path;
use std::time::Instant;

fn main() {
    let path = Path::new("data/combined_soil_weather_data.csv");

    println!("Loading district dataset...\n");

    let start = Instant::now();
    let dataset = DistrictDataset::load_from_csv(path)
        .expect("Failed to load dataset");
    let elapsed = start.elapsed();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Rows: {}", dataset.len());
    println!("Missing feature columns: {:?}", dataset.missing_columns());
    println!("\nPerformance: {:.0} rows/second",
             dataset.len() as f64 / elapsed.as_secs_f64());
}
