// tests/convergence_test.rs
use lattice_bs::lattice::estimators::Estimator;
use lattice_bs::sweep::{convergence_sweep, EstimatorSet, SweepConfig, SweepSummary};
use lattice_bs::{MarketParams, OptionType};

fn summary_for(summaries: &[SweepSummary], estimator: Estimator) -> &SweepSummary {
    summaries
        .iter()
        .find(|s| s.estimator == estimator)
        .expect("estimator present in sweep")
}

#[test]
fn test_bbs_beats_binomial_on_average() {
    for option_type in [OptionType::Call, OptionType::Put] {
        let cfg = SweepConfig {
            market: MarketParams::default(),
            steps: (20..120).collect(),
            estimators: EstimatorSet::BINOMIAL | EstimatorSet::BBS,
            option_type,
        };
        let rows = convergence_sweep(&cfg).expect("Valid sweep");
        let summaries = SweepSummary::from_rows(&rows);

        let tree = summary_for(&summaries, Estimator::Binomial);
        let bbs = summary_for(&summaries, Estimator::Bbs);

        println!("\n=== {} sweep N=20..119 ===", option_type);
        println!("Binomial mean |err|: {:.6}", tree.mean_abs_error);
        println!("BBS mean |err|:      {:.6}", bbs.mean_abs_error);

        assert_eq!(tree.points, 100);
        assert!(bbs.mean_abs_error < tree.mean_abs_error);
    }
}

#[test]
fn test_errors_shrink_with_refinement() {
    let cfg = SweepConfig {
        steps: vec![50, 400],
        estimators: EstimatorSet::ALL,
        ..Default::default()
    };
    let rows = convergence_sweep(&cfg).expect("Valid sweep");

    for estimator in Estimator::ALL {
        let err = |n: usize| {
            rows.iter()
                .find(|r| r.estimator == estimator && r.steps == n)
                .map(|r| r.value_error().abs())
                .expect("row present")
        };
        println!("{}: N=50 {:.2e}  N=400 {:.2e}", estimator, err(50), err(400));
        assert!(err(400) < err(50), "{} did not improve", estimator);
    }
}

#[test]
fn test_bbsr_outperforms_bbs() {
    let cfg = SweepConfig {
        steps: (50..=150).step_by(10).collect(),
        estimators: EstimatorSet::BBS | EstimatorSet::BBSR,
        ..Default::default()
    };
    let rows = convergence_sweep(&cfg).expect("Valid sweep");
    let summaries = SweepSummary::from_rows(&rows);

    let bbs = summary_for(&summaries, Estimator::Bbs);
    let bbsr = summary_for(&summaries, Estimator::Bbsr);
    assert!(bbsr.max_abs_error < bbs.mean_abs_error);
}

#[test]
#[ignore]
fn test_full_sweep_report() {
    let cfg = SweepConfig {
        steps: (10..=1000).step_by(10).collect(),
        ..Default::default()
    };
    let rows = convergence_sweep(&cfg).expect("Valid sweep");

    println!("\nEstimator\tPoints\tMean |err|\tMax |err|");
    println!("{}", "-".repeat(60));
    for s in SweepSummary::from_rows(&rows) {
        println!(
            "{}\t{}\t{:.3e}\t{:.3e}",
            s.estimator, s.points, s.mean_abs_error, s.max_abs_error
        );
    }
}
