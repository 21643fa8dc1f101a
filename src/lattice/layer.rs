// src/lattice/layer.rs
use super::params::LatticeParams;

/// Node values of one lattice depth, held in a buffer that is reused as
/// induction walks back towards the root.
///
/// Index `k` is the node with `k` down-moves. Only the first `depth + 1`
/// entries are live; the tail keeps stale values from deeper layers.
#[derive(Clone, Debug)]
pub struct LatticeLayer {
    values: Vec<f64>,
    depth: usize,
}

impl LatticeLayer {
    /// Build the layer at `depth`, evaluating `node` for each index
    pub fn from_fn(depth: usize, node: impl FnMut(usize) -> f64) -> Self {
        LatticeLayer {
            values: (0..=depth).map(node).collect(),
            depth,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn values(&self) -> &[f64] {
        &self.values[..=self.depth]
    }

    pub fn root(&self) -> f64 {
        self.values[0]
    }

    /// Discount one step towards the root, in place
    ///
    /// ```text
    /// V(j, k) = e^(-rΔt) * (p * V(j+1, k) + (1 - p) * V(j+1, k+1))
    /// ```
    ///
    /// Writing index k only reads k and k+1, which are still the deeper
    /// layer's values when walking k upwards.
    pub fn step_back(&mut self, lattice: &LatticeParams) {
        debug_assert!(self.depth > 0, "cannot step back from the root");
        let depth = self.depth - 1;
        for k in 0..=depth {
            self.values[k] =
                lattice.discount * (self.values[k] * lattice.p_rn + self.values[k + 1] * lattice.q_rn);
        }
        self.depth = depth;
    }
}
