//! Request metrics for the prediction service.

use crate::error::AqiError;
use crate::types::AirQualityCategory;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tracing::info;

/// Metrics collector shared by the request handlers
pub struct ServiceMetrics {
    /// Successful predictions
    pub predictions_served: AtomicU64,
    /// Submissions rejected by form validation
    pub validation_failures: AtomicU64,
    /// Scaler or model failures
    pub pipeline_failures: AtomicU64,
    /// Predictions by category
    by_category: RwLock<HashMap<AirQualityCategory, u64>>,
    /// Inference times (in microseconds)
    inference_times: RwLock<Vec<u64>>,
    /// Start time for rate calculation
    start_time: Instant,
}

impl ServiceMetrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            predictions_served: AtomicU64::new(0),
            validation_failures: AtomicU64::new(0),
            pipeline_failures: AtomicU64::new(0),
            by_category: RwLock::new(HashMap::new()),
            inference_times: RwLock::new(Vec::with_capacity(1000)),
            start_time: Instant::now(),
        }
    }

    /// Record a successful prediction
    pub fn record_prediction(&self, inference_time: Duration, category: AirQualityCategory) {
        self.predictions_served.fetch_add(1, Ordering::Relaxed);

        if let Ok(mut times) = self.inference_times.write() {
            times.push(inference_time.as_micros() as u64);
            // Keep only last 10000 for memory efficiency
            if times.len() > 10000 {
                times.drain(0..5000);
            }
        }

        if let Ok(mut counts) = self.by_category.write() {
            *counts.entry(category).or_insert(0) += 1;
        }
    }

    /// Record a rejected submission
    pub fn record_failure(&self, error: &AqiError) {
        if error.is_validation() {
            self.validation_failures.fetch_add(1, Ordering::Relaxed);
        } else {
            self.pipeline_failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Get inference time statistics
    pub fn get_latency_stats(&self) -> LatencyStats {
        let Ok(times) = self.inference_times.read() else {
            return LatencyStats::default();
        };
        if times.is_empty() {
            return LatencyStats::default();
        }

        let mut sorted: Vec<u64> = times.clone();
        sorted.sort_unstable();

        let sum: u64 = sorted.iter().sum();
        let count = sorted.len();

        LatencyStats {
            count: count as u64,
            mean_us: sum / count as u64,
            p50_us: sorted[count / 2],
            p95_us: sorted[(count as f64 * 0.95) as usize],
            p99_us: sorted[(count as f64 * 0.99) as usize],
            max_us: sorted[count - 1],
        }
    }

    /// Get prediction counts by category
    pub fn get_category_counts(&self) -> HashMap<AirQualityCategory, u64> {
        self.by_category
            .read()
            .map(|counts| counts.clone())
            .unwrap_or_default()
    }

    /// Requests handled per second since start
    pub fn get_throughput(&self) -> f64 {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        let handled = self.predictions_served.load(Ordering::Relaxed)
            + self.validation_failures.load(Ordering::Relaxed)
            + self.pipeline_failures.load(Ordering::Relaxed);
        if elapsed > 0.0 {
            handled as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Log summary statistics
    pub fn print_summary(&self) {
        let served = self.predictions_served.load(Ordering::Relaxed);
        let invalid = self.validation_failures.load(Ordering::Relaxed);
        let failed = self.pipeline_failures.load(Ordering::Relaxed);
        let latency = self.get_latency_stats();
        let counts = self.get_category_counts();

        info!(
            predictions = served,
            validation_failures = invalid,
            pipeline_failures = failed,
            throughput = format!("{:.2} req/s", self.get_throughput()),
            "Service metrics summary"
        );
        info!(
            mean_us = latency.mean_us,
            p50_us = latency.p50_us,
            p95_us = latency.p95_us,
            p99_us = latency.p99_us,
            max_us = latency.max_us,
            "Inference latency"
        );

        for category in AirQualityCategory::ALL {
            let count = counts.get(&category).copied().unwrap_or(0);
            let pct = if served > 0 {
                (count as f64 / served as f64) * 100.0
            } else {
                0.0
            };
            info!(category = %category, count = count, "{:>5.1}% of predictions", pct);
        }
    }
}

impl Default for ServiceMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Inference time statistics
#[derive(Debug, Default, PartialEq)]
pub struct LatencyStats {
    pub count: u64,
    pub mean_us: u64,
    pub p50_us: u64,
    pub p95_us: u64,
    pub p99_us: u64,
    pub max_us: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_recording() {
        let metrics = ServiceMetrics::new();

        metrics.record_prediction(Duration::from_micros(100), AirQualityCategory::Good);
        metrics.record_prediction(Duration::from_micros(300), AirQualityCategory::Good);
        metrics.record_prediction(Duration::from_micros(200), AirQualityCategory::Hazardous);
        metrics.record_failure(&AqiError::Validation {
            field: "H",
            reason: "missing field".to_string(),
        });
        metrics.record_failure(&AqiError::Prediction("boom".to_string()));

        assert_eq!(metrics.predictions_served.load(Ordering::Relaxed), 3);
        assert_eq!(metrics.validation_failures.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.pipeline_failures.load(Ordering::Relaxed), 1);

        let counts = metrics.get_category_counts();
        assert_eq!(counts.get(&AirQualityCategory::Good), Some(&2));
        assert_eq!(counts.get(&AirQualityCategory::Hazardous), Some(&1));
        assert_eq!(counts.get(&AirQualityCategory::Moderate), None);
    }

    #[test]
    fn test_latency_stats() {
        let metrics = ServiceMetrics::new();
        assert_eq!(metrics.get_latency_stats(), LatencyStats::default());

        for us in [100, 200, 300, 400] {
            metrics.record_prediction(Duration::from_micros(us), AirQualityCategory::Moderate);
        }

        let stats = metrics.get_latency_stats();
        assert_eq!(stats.count, 4);
        assert_eq!(stats.mean_us, 250);
        assert_eq!(stats.p50_us, 300);
        assert_eq!(stats.max_us, 400);
    }
}
