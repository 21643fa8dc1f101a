// src/lattice/greeks.rs
//! Finite-difference Greeks from the three layers nearest the root
//!
//! # Node layout
//! ```text
//! depth 0        depth 1        depth 2
//!                               V22 (u²S)
//!                V11 (uS)
//! V00 (S)                       V21 (udS)
//!                V10 (dS)
//!                               V20 (d²S)
//! ```
//!
//! # Formulas
//! ```text
//! Δ = (V10 - V11) / (S10 - S11)
//! Γ = [(V20 - V21)/(S20 - S21) - (V21 - V22)/(S21 - S22)] / ((S20 - S22)/2)
//! Θ = (V21 - V00) / (2Δt)
//! ```
//!
//! Theta is the raw slope between the root and the middle depth-2 node, which
//! sits at the same underlying price two steps later. It is not negated.

use super::layer::LatticeLayer;
use super::params::LatticeParams;

/// Option value and lattice sensitivities for one side
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PricingResult {
    pub value: f64,
    pub delta: f64,
    pub gamma: f64,
    pub theta: f64,
}

impl PricingResult {
    /// Componentwise arithmetic mean of two results
    pub fn average(&self, other: &PricingResult) -> PricingResult {
        PricingResult {
            value: (self.value + other.value) / 2.0,
            delta: (self.delta + other.delta) / 2.0,
            gamma: (self.gamma + other.gamma) / 2.0,
            theta: (self.theta + other.theta) / 2.0,
        }
    }

    /// Componentwise Richardson extrapolation `2 * fine - coarse`
    pub fn richardson(fine: &PricingResult, coarse: &PricingResult) -> PricingResult {
        PricingResult {
            value: 2.0 * fine.value - coarse.value,
            delta: 2.0 * fine.delta - coarse.delta,
            gamma: 2.0 * fine.gamma - coarse.gamma,
            theta: 2.0 * fine.theta - coarse.theta,
        }
    }
}

/// Node values at depths 2, 1 and 0 of a single side
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GreekSnapshot {
    pub v22: f64,
    pub v21: f64,
    pub v20: f64,
    pub v11: f64,
    pub v10: f64,
    pub v00: f64,
}

impl GreekSnapshot {
    /// Apply the central differences around spot `s0`
    pub fn greeks(&self, s0: f64, lattice: &LatticeParams) -> PricingResult {
        let (u, d) = (lattice.u, lattice.d);
        let s11 = u * s0;
        let s10 = d * s0;
        let s22 = u * u * s0;
        let s21 = u * d * s0;
        let s20 = d * d * s0;

        let delta = (self.v10 - self.v11) / (s10 - s11);
        let gamma = ((self.v20 - self.v21) / (s20 - s21) - (self.v21 - self.v22) / (s21 - s22))
            / ((s20 - s22) / 2.0);
        let theta = (self.v21 - self.v00) / (2.0 * lattice.dt);

        PricingResult {
            value: self.v00,
            delta,
            gamma,
            theta,
        }
    }
}

/// Collects the snapshot as a layer buffer passes through depths 2, 1, 0
#[derive(Debug, Default)]
pub(crate) struct SnapshotRecorder {
    depth2: Option<[f64; 3]>,
    depth1: Option<[f64; 2]>,
    depth0: Option<f64>,
}

impl SnapshotRecorder {
    pub(crate) fn record(&mut self, layer: &LatticeLayer) {
        let v = layer.values();
        match layer.depth() {
            2 => self.depth2 = Some([v[0], v[1], v[2]]),
            1 => self.depth1 = Some([v[0], v[1]]),
            0 => self.depth0 = Some(v[0]),
            _ => return,
        }
        tracing::trace!(depth = layer.depth(), "captured snapshot layer");
    }

    /// `None` unless all three depths were seen
    pub(crate) fn finish(self) -> Option<GreekSnapshot> {
        let [v22, v21, v20] = self.depth2?;
        let [v11, v10] = self.depth1?;
        Some(GreekSnapshot {
            v22,
            v21,
            v20,
            v11,
            v10,
            v00: self.depth0?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::MarketParams;

    #[test]
    fn test_linear_payoff_has_unit_delta_zero_gamma() {
        // V = S at every node: delta 1, gamma 0
        let market = MarketParams::default();
        let lattice = LatticeParams::new(&market, 10).unwrap();
        let s = market.s0;
        let snapshot = GreekSnapshot {
            v22: lattice.node_price(s, 2, 0),
            v21: lattice.node_price(s, 2, 1),
            v20: lattice.node_price(s, 2, 2),
            v11: lattice.node_price(s, 1, 0),
            v10: lattice.node_price(s, 1, 1),
            v00: s,
        };

        let greeks = snapshot.greeks(s, &lattice);
        assert!((greeks.delta - 1.0).abs() < 1e-12);
        assert!(greeks.gamma.abs() < 1e-10);
        assert_eq!(greeks.value, s);
    }

    #[test]
    fn test_recorder_requires_all_depths() {
        let mut recorder = SnapshotRecorder::default();
        recorder.record(&LatticeLayer::from_fn(3, |i| i as f64));
        recorder.record(&LatticeLayer::from_fn(1, |i| i as f64));
        recorder.record(&LatticeLayer::from_fn(0, |_| 7.0));
        assert!(recorder.finish().is_none());

        let mut recorder = SnapshotRecorder::default();
        recorder.record(&LatticeLayer::from_fn(2, |i| 10.0 + i as f64));
        recorder.record(&LatticeLayer::from_fn(1, |i| 20.0 + i as f64));
        recorder.record(&LatticeLayer::from_fn(0, |_| 30.0));
        let snapshot = recorder.finish().unwrap();
        assert_eq!((snapshot.v22, snapshot.v21, snapshot.v20), (10.0, 11.0, 12.0));
        assert_eq!((snapshot.v11, snapshot.v10), (20.0, 21.0));
        assert_eq!(snapshot.v00, 30.0);
    }

    #[test]
    fn test_average_and_richardson() {
        let a = PricingResult { value: 4.0, delta: 0.5, gamma: 0.04, theta: -2.0 };
        let b = PricingResult { value: 2.0, delta: 0.3, gamma: 0.02, theta: -1.0 };

        let mean = a.average(&b);
        assert_eq!(mean.value, 3.0);
        assert_eq!(mean.theta, -1.5);

        let extrapolated = PricingResult::richardson(&a, &b);
        assert_eq!(extrapolated.value, 6.0);
        assert_eq!(extrapolated.theta, -3.0);
    }
}
