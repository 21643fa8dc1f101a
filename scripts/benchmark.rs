// scripts/benchmark.rs
use lattice_bs::analytics::bs_analytic;
use lattice_bs::math_utils::Timer;
use lattice_bs::sweep::{convergence_sweep, EstimatorSet, SweepConfig};
use lattice_bs::{Estimator, MarketParams, OptionType};
use std::env;
use std::error::Error;
use std::fs::File;
use std::io::{self, Write};
use std::process::Command;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct SystemInfo {
    os: String,
    cpu_cores: usize,
    rust_version: String,
    rustc_flags: String,
    rayon_threads: usize,
}

impl SystemInfo {
    fn gather() -> Self {
        Self {
            os: env::consts::OS.to_string(),
            cpu_cores: num_cpus::get(),
            rust_version: Command::new("rustc")
                .arg("--version")
                .output()
                .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
                .unwrap_or_else(|_| "Unknown Rust version".to_string()),
            rustc_flags: env::var("RUSTFLAGS").unwrap_or_else(|_| "default".to_string()),
            rayon_threads: rayon::current_num_threads(),
        }
    }
}

#[derive(Debug)]
struct BenchmarkResult {
    name: String,
    steps: usize,
    time_ms: f64,
    value: f64,
    analytic_value: f64,
    abs_error: f64,
}

fn run_estimator_benchmarks(market: &MarketParams) -> Result<Vec<BenchmarkResult>, Box<dyn Error>> {
    let mut results = Vec::new();
    let analytic = bs_analytic::bs_put_price(
        market.t_start,
        market.s0,
        market.k,
        market.t_start + market.t,
        market.sigma,
        market.r,
        market.q,
    );

    for &steps in &[100, 500, 1_000, 2_000] {
        println!("Running lattice benchmarks with N = {}...", steps);

        for estimator in Estimator::ALL {
            let mut timer = Timer::new();
            timer.start();
            let result = estimator.price(market, steps, OptionType::Put)?;
            let time_ms = timer.elapsed_ms();

            results.push(BenchmarkResult {
                name: format!("{} put", estimator),
                steps,
                time_ms,
                value: result.value,
                analytic_value: analytic,
                abs_error: (result.value - analytic).abs(),
            });
        }
    }

    Ok(results)
}

fn run_sweep_benchmark(market: &MarketParams) -> Result<BenchmarkResult, Box<dyn Error>> {
    let cfg = SweepConfig {
        market: *market,
        steps: (10..=500).step_by(10).collect(),
        estimators: EstimatorSet::ALL,
        option_type: OptionType::Put,
    };

    let mut timer = Timer::new();
    timer.start();
    let rows = convergence_sweep(&cfg)?;
    let time_ms = timer.elapsed_ms();

    let last = rows
        .iter()
        .rev()
        .find(|row| row.estimator == Estimator::Bbsr)
        .ok_or("sweep returned no BBSR rows")?;

    Ok(BenchmarkResult {
        name: format!("parallel sweep ({} lattices)", rows.len()),
        steps: last.steps,
        time_ms,
        value: last.result.value,
        analytic_value: last.reference.value,
        abs_error: last.value_error().abs(),
    })
}

fn write_results_to_csv(
    results: &[BenchmarkResult],
    system_info: &SystemInfo,
    filename: &str,
) -> io::Result<()> {
    let mut file = File::create(filename)?;

    writeln!(file, "# System Information")?;
    writeln!(file, "# OS: {}", system_info.os)?;
    writeln!(file, "# CPU Cores: {}", system_info.cpu_cores)?;
    writeln!(file, "# Rust Version: {}", system_info.rust_version)?;
    writeln!(file, "# RUSTFLAGS: {}", system_info.rustc_flags)?;
    writeln!(file, "# Rayon Threads: {}", system_info.rayon_threads)?;
    writeln!(
        file,
        "# Benchmark Date: {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(file, "#")?;

    writeln!(file, "Benchmark,Steps,Time_ms,Value,Analytic_Value,Abs_Error")?;
    for result in results {
        writeln!(
            file,
            "{},{},{:.3},{:.8},{:.8},{:.3e}",
            result.name,
            result.steps,
            result.time_ms,
            result.value,
            result.analytic_value,
            result.abs_error
        )?;
    }

    println!("Results written to {}", filename);
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("lattice-bs Benchmark Suite");
    println!("==========================\n");

    let system_info = SystemInfo::gather();
    println!("System Information:");
    println!("  OS: {}", system_info.os);
    println!("  CPU Cores: {}", system_info.cpu_cores);
    println!("  Rust Version: {}", system_info.rust_version);
    println!("  RUSTFLAGS: {}", system_info.rustc_flags);
    println!("  Rayon Threads: {}", system_info.rayon_threads);
    println!();

    let market = MarketParams::default();
    let mut all_results = run_estimator_benchmarks(&market)?;

    println!("\nRunning parallel convergence sweep...");
    all_results.push(run_sweep_benchmark(&market)?);

    println!("\n{:=<90}", "");
    println!("BENCHMARK RESULTS");
    println!("{:=<90}", "");
    println!(
        "{:<36} {:>8} {:>12} {:>12} {:>12} {:>12}",
        "Benchmark", "Steps", "Time (ms)", "Value", "Analytic", "Abs Error"
    );
    println!("{:-<90}", "");
    for result in &all_results {
        println!(
            "{:<36} {:>8} {:>12.3} {:>12.6} {:>12.6} {:>12.2e}",
            result.name,
            result.steps,
            result.time_ms,
            result.value,
            result.analytic_value,
            result.abs_error
        );
    }
    println!("{:=<90}", "");

    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let filename = format!("benchmark_results_{}.csv", timestamp);
    write_results_to_csv(&all_results, &system_info, &filename)?;

    println!("\nTo reproduce: cargo run --bin benchmark --release");
    Ok(())
}
