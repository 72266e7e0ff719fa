//! Test Reading Submitter
//!
//! Generates weather readings and posts them to a running predictor as form
//! submissions, logging the category each result page reports.

use air_quality_predictor::{AirQualityCategory, WeatherReading};
use rand::Rng;
use std::time::Duration;
use tracing::{info, warn};

/// Reading generator for testing
struct ReadingGenerator {
    rng: rand::rngs::ThreadRng,
}

impl ReadingGenerator {
    fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }

    /// Breezy day with good visibility
    fn generate_clear(&mut self) -> WeatherReading {
        let avg = self.rng.gen_range(15.0..32.0);
        let wind = self.rng.gen_range(8.0..20.0);
        WeatherReading {
            avg_temperature: avg,
            max_temperature: avg + self.rng.gen_range(3.0..8.0),
            min_temperature: avg - self.rng.gen_range(3.0..8.0),
            sea_level_pressure: self.rng.gen_range(1002.0..1012.0),
            humidity: self.rng.gen_range(30.0..70.0),
            visibility: self.rng.gen_range(5.0..10.0),
            wind_speed: wind,
            max_wind_speed: wind + self.rng.gen_range(5.0..15.0),
        }
    }

    /// Cold, humid, still day with poor visibility
    fn generate_stagnant(&mut self) -> WeatherReading {
        let avg = self.rng.gen_range(8.0..18.0);
        let wind = self.rng.gen_range(0.5..3.0);
        WeatherReading {
            avg_temperature: avg,
            max_temperature: avg + self.rng.gen_range(2.0..6.0),
            min_temperature: avg - self.rng.gen_range(2.0..6.0),
            sea_level_pressure: self.rng.gen_range(1015.0..1025.0),
            humidity: self.rng.gen_range(75.0..98.0),
            visibility: self.rng.gen_range(0.3..2.0),
            wind_speed: wind,
            max_wind_speed: wind + self.rng.gen_range(1.0..5.0),
        }
    }
}

/// Pull the category back out of a rendered result page
fn reported_category(page: &str) -> Option<AirQualityCategory> {
    AirQualityCategory::ALL
        .into_iter()
        .find(|c| page.contains(&format!(">{}<", c.description())))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("submit_reading=info".parse()?),
        )
        .init();

    info!("Starting Test Reading Submitter");

    // Parse arguments
    let args: Vec<String> = std::env::args().collect();
    let url = args
        .get(1)
        .map(|s| s.as_str())
        .unwrap_or("http://127.0.0.1:5000/");
    let count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(20);
    let stagnant_rate: f64 = args
        .get(3)
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.3)
        .clamp(0.0, 1.0);
    let delay_ms: u64 = args.get(4).and_then(|s| s.parse().ok()).unwrap_or(100);

    info!(
        url = %url,
        count = count,
        stagnant_rate = stagnant_rate,
        delay_ms = delay_ms,
        "Configuration loaded"
    );

    // Result pages come back directly; a redirect means the server hit an error.
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    let mut generator = ReadingGenerator::new();
    let mut rng = rand::thread_rng();
    let mut succeeded = 0;
    let mut failed = 0;

    for i in 0..count {
        let reading = if rng.gen_bool(stagnant_rate) {
            generator.generate_stagnant()
        } else {
            generator.generate_clear()
        };

        let response = match client.post(url).form(&reading).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Failed to reach predictor");
                failed += 1;
                continue;
            }
        };

        let status = response.status();
        if status.is_success() {
            let page = response.text().await?;
            succeeded += 1;
            info!(
                submission = i + 1,
                humidity = format!("{:.1}", reading.humidity),
                visibility = format!("{:.1}", reading.visibility),
                category = ?reported_category(&page),
                "Prediction received"
            );
        } else {
            failed += 1;
            warn!(
                submission = i + 1,
                status = %status,
                location = ?response.headers().get(reqwest::header::LOCATION),
                "Prediction rejected"
            );
        }

        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }

    info!(
        "Completed! Submitted {} readings ({} succeeded, {} failed)",
        count, succeeded, failed
    );

    Ok(())
}
