use shower_axis::config::estimator;
use shower_axis::io::{load_showers, write_json_file};
use shower_axis::{ShowerAxisEstimator, ShowerEstimate};
use serde::Serialize;
use std::env;
use std::path::Path;
use std::time::Instant;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = estimator::load_config(Path::new(&config_path))?;
    let params = config.estimator.to_params();
    params
        .validate()
        .map_err(|e| format!("Invalid estimator config: {e}"))?;

    let showers = load_showers(&config.input)?;
    let est = ShowerAxisEstimator::new(params);
    let t0 = Instant::now();
    let results = est.estimate_batch(&showers);
    let elapsed_ms = t0.elapsed().as_secs_f64() * 1000.0;

    let entries: Vec<ShowerEntry> = results
        .into_iter()
        .enumerate()
        .map(|(index, result)| match result {
            Ok(estimate) => ShowerEntry {
                index,
                estimate: Some(estimate),
                error: None,
            },
            Err(err) => ShowerEntry {
                index,
                estimate: None,
                error: Some(err.to_string()),
            },
        })
        .collect();
    let failed = entries.iter().filter(|e| e.error.is_some()).count();
    let unverified = entries
        .iter()
        .filter_map(|e| e.estimate.as_ref())
        .filter(|e| !e.axis.axis.polarity.is_verified())
        .count();

    let report = AxisToolReport {
        shower_count: entries.len(),
        failed_count: failed,
        unverified_count: unverified,
        elapsed_ms,
        showers: entries,
    };
    write_json_file(&config.output.result_json, &report)?;

    println!(
        "Estimated {} of {} showers in {:.3} ms",
        report.shower_count - report.failed_count,
        report.shower_count,
        report.elapsed_ms
    );
    if report.unverified_count > 0 {
        println!(
            "{} directions have an unverified sign",
            report.unverified_count
        );
    }
    println!("Saved results to {}", config.output.result_json.display());

    Ok(())
}

fn usage() -> String {
    "Usage: shower_axis_tool <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AxisToolReport {
    shower_count: usize,
    failed_count: usize,
    /// Estimated showers whose direction sign no test could settle.
    unverified_count: usize,
    elapsed_ms: f64,
    showers: Vec<ShowerEntry>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ShowerEntry {
    index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    estimate: Option<ShowerEstimate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}
