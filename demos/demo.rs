// demos/demo.rs
use lattice_bs::analytics::bs_analytic;
use lattice_bs::math_utils::Timer;
use lattice_bs::output;
use lattice_bs::sweep::{convergence_sweep, SweepConfig, SweepSummary};
use lattice_bs::{
    average_price_and_greeks, bbs_price_and_greeks, bbsr_price_and_greeks, price_and_greeks,
    MarketParams, OptionType, PricingResult,
};
use tracing_subscriber::EnvFilter;

fn print_row(label: &str, r: &PricingResult, time_ms: Option<f64>) {
    println!(
        "{:<22} {:>10.6} {:>10.6} {:>10.6} {:>10.6} {:>10}",
        label,
        r.value,
        r.delta,
        r.gamma,
        r.theta,
        time_ms.map(|t| format!("{:.3}", t)).unwrap_or_else(|| "-".to_string())
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();
    let write_csv = args.iter().any(|a| a == "--csv");

    let market = MarketParams {
        s0: 41.0,
        k: 40.0,
        t: 1.0,
        sigma: 0.30,
        q: 0.01,
        r: 0.03,
        t_start: 0.0,
    };
    let steps = 100;

    println!("European PUT, S={} K={} T={} σ={} q={} r={} N={}\n", market.s0, market.k, market.t, market.sigma, market.q, market.r, steps);
    println!(
        "{:<22} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "Method", "Value", "Delta", "Gamma", "Theta", "Time (ms)"
    );
    println!("{}", "-".repeat(77));

    let estimators: [(&str, fn(&MarketParams, usize, Option<&str>) -> lattice_bs::LatticeResult<PricingResult>); 4] = [
        ("Binomial", price_and_greeks),
        ("Average binomial", average_price_and_greeks),
        ("BBS", bbs_price_and_greeks),
        ("BBSR", bbsr_price_and_greeks),
    ];

    let mut timer = Timer::new();
    for (label, estimator) in estimators {
        timer.start();
        match estimator(&market, steps, Some("PUT")) {
            Ok(result) => print_row(label, &result, Some(timer.elapsed_ms())),
            Err(e) => println!("{:<22} error: {}", label, e),
        }
    }

    let exact = bs_analytic::bs_greeks(
        market.t_start,
        market.s0,
        market.k,
        market.t_start + market.t,
        market.sigma,
        market.r,
        market.q,
        OptionType::Put,
    );
    print_row("Black-Scholes", &exact, None);

    println!("\n--- Convergence sweep (N = 10..200) ---");
    let cfg = SweepConfig {
        market,
        ..Default::default()
    };
    match convergence_sweep(&cfg) {
        Ok(rows) => {
            for s in SweepSummary::from_rows(&rows) {
                println!(
                    "{:<18} mean |err| {:.3e}   max |err| {:.3e}",
                    s.estimator, s.mean_abs_error, s.max_abs_error
                );
            }
            if write_csv {
                match output::write_sweep_to_csv("lattice_sweep.csv", &rows) {
                    Ok(()) => println!("\nSweep written to lattice_sweep.csv"),
                    Err(e) => eprintln!("Could not write sweep: {}", e),
                }
            }
        }
        Err(e) => eprintln!("Sweep failed: {}", e),
    }

    println!("\n--- Option type defaulting ---");
    match price_and_greeks(&market, steps, None) {
        Ok(r) => print_row("Binomial (no type)", &r, None),
        Err(e) => eprintln!("error: {}", e),
    }
}
