// src/sweep.rs
//! Convergence sweeps of lattice estimators against the closed form
//!
//! Every (N, estimator) pair is an independent lattice, so the sweep fans
//! the grid out over the rayon pool. Rows come back in grid order: by N,
//! then by estimator in `Estimator::ALL` order.

use crate::analytics::bs_analytic;
use crate::error::{LatticeError, LatticeResult};
use crate::lattice::estimators::Estimator;
use crate::lattice::greeks::PricingResult;
use crate::market::{MarketParams, OptionType};
use bitflags::bitflags;
use rayon::prelude::*;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct EstimatorSet: u32 {
        const NONE     = 0;
        const BINOMIAL = 1 << 0;
        const AVERAGE  = 1 << 1;
        const BBS      = 1 << 2;
        const BBSR     = 1 << 3;
        const ALL      = Self::BINOMIAL.bits() | Self::AVERAGE.bits() | Self::BBS.bits() | Self::BBSR.bits();
    }
}

impl EstimatorSet {
    fn flag(estimator: Estimator) -> EstimatorSet {
        match estimator {
            Estimator::Binomial => EstimatorSet::BINOMIAL,
            Estimator::AverageBinomial => EstimatorSet::AVERAGE,
            Estimator::Bbs => EstimatorSet::BBS,
            Estimator::Bbsr => EstimatorSet::BBSR,
        }
    }

    /// Selected estimators in `Estimator::ALL` order
    pub fn estimators(&self) -> Vec<Estimator> {
        Estimator::ALL
            .into_iter()
            .filter(|e| self.contains(Self::flag(*e)))
            .collect()
    }
}

#[derive(Clone, Debug)]
pub struct SweepConfig {
    pub market: MarketParams,
    pub steps: Vec<usize>,
    pub estimators: EstimatorSet,
    pub option_type: OptionType,
}

impl SweepConfig {
    /// Validate the sweep configuration
    ///
    /// Every selected estimator must accept the smallest requested N.
    pub fn validate(&self) -> LatticeResult<()> {
        self.market.validate()?;

        if self.estimators.is_empty() {
            return Err(LatticeError::InvalidConfiguration {
                field: "estimators".to_string(),
                reason: "at least one estimator must be selected".to_string(),
            });
        }

        let smallest = match self.steps.iter().min() {
            Some(&n) => n,
            None => {
                return Err(LatticeError::InvalidConfiguration {
                    field: "steps".to_string(),
                    reason: "step grid is empty".to_string(),
                })
            }
        };

        for estimator in self.estimators.estimators() {
            if smallest < estimator.min_steps() {
                return Err(LatticeError::InvalidConfiguration {
                    field: "steps".to_string(),
                    reason: format!(
                        "{} needs N ≥ {}, grid starts at {}",
                        estimator,
                        estimator.min_steps(),
                        smallest
                    ),
                });
            }
        }

        Ok(())
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig {
            market: MarketParams::default(),
            steps: (10..=200).step_by(10).collect(),
            estimators: EstimatorSet::ALL,
            option_type: OptionType::Put,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SweepRow {
    pub steps: usize,
    pub estimator: Estimator,
    pub result: PricingResult,
    pub reference: PricingResult,
}

impl SweepRow {
    /// Signed value error against the closed form
    pub fn value_error(&self) -> f64 {
        self.result.value - self.reference.value
    }
}

/// Price every selected estimator at every N of the grid
pub fn convergence_sweep(cfg: &SweepConfig) -> LatticeResult<Vec<SweepRow>> {
    cfg.validate()?;

    let m = &cfg.market;
    let reference = bs_analytic::bs_greeks(
        m.t_start,
        m.s0,
        m.k,
        m.t_start + m.t,
        m.sigma,
        m.r,
        m.q,
        cfg.option_type,
    );

    let estimators = cfg.estimators.estimators();
    let grid: Vec<(usize, Estimator)> = cfg
        .steps
        .iter()
        .flat_map(|&n| estimators.iter().map(move |&e| (n, e)))
        .collect();

    tracing::info!(
        points = grid.len(),
        threads = rayon::current_num_threads(),
        "running convergence sweep"
    );

    grid.into_par_iter()
        .map(|(steps, estimator)| -> LatticeResult<SweepRow> {
            let result = estimator.price(m, steps, cfg.option_type)?;
            Ok(SweepRow {
                steps,
                estimator,
                result,
                reference,
            })
        })
        .collect()
}

/// Mean absolute value error of one estimator over a sweep
#[derive(Clone, Debug, PartialEq)]
pub struct SweepSummary {
    pub estimator: Estimator,
    pub points: usize,
    pub mean_abs_error: f64,
    pub max_abs_error: f64,
}

impl SweepSummary {
    /// One summary per estimator present in `rows`, in `Estimator::ALL` order
    pub fn from_rows(rows: &[SweepRow]) -> Vec<SweepSummary> {
        Estimator::ALL
            .into_iter()
            .filter_map(|estimator| {
                let errors: Vec<f64> = rows
                    .iter()
                    .filter(|row| row.estimator == estimator)
                    .map(|row| row.value_error().abs())
                    .collect();
                if errors.is_empty() {
                    return None;
                }
                Some(SweepSummary {
                    estimator,
                    points: errors.len(),
                    mean_abs_error: errors.iter().sum::<f64>() / errors.len() as f64,
                    max_abs_error: errors.iter().cloned().fold(0.0, f64::max),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimator_set_order() {
        let set = EstimatorSet::BBSR | EstimatorSet::BINOMIAL;
        assert_eq!(set.estimators(), vec![Estimator::Binomial, Estimator::Bbsr]);
        assert_eq!(EstimatorSet::ALL.estimators().len(), 4);
        assert!(EstimatorSet::NONE.estimators().is_empty());
    }

    #[test]
    fn test_config_validation() {
        assert!(SweepConfig::default().validate().is_ok());

        let empty = SweepConfig {
            steps: vec![],
            ..Default::default()
        };
        assert!(matches!(
            empty.validate(),
            Err(LatticeError::InvalidConfiguration { .. })
        ));

        let too_coarse = SweepConfig {
            steps: vec![4, 8],
            estimators: EstimatorSet::BBSR,
            ..Default::default()
        };
        assert!(too_coarse.validate().is_err());

        let nothing = SweepConfig {
            estimators: EstimatorSet::NONE,
            ..Default::default()
        };
        assert!(nothing.validate().is_err());
    }

    #[test]
    fn test_sweep_rows_in_grid_order() {
        let cfg = SweepConfig {
            steps: vec![8, 16],
            estimators: EstimatorSet::BINOMIAL | EstimatorSet::BBS,
            ..Default::default()
        };
        let rows = convergence_sweep(&cfg).unwrap();
        let order: Vec<(usize, Estimator)> = rows.iter().map(|r| (r.steps, r.estimator)).collect();
        assert_eq!(
            order,
            vec![
                (8, Estimator::Binomial),
                (8, Estimator::Bbs),
                (16, Estimator::Binomial),
                (16, Estimator::Bbs),
            ]
        );

        let summary = SweepSummary::from_rows(&rows);
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].points, 2);
        assert!(summary[0].max_abs_error >= summary[0].mean_abs_error);
    }
}
