//! Binomial lattice engine
//!
//! `params` derives the step multipliers, `layer` holds the reusable node
//! buffer, `pricer` runs the backward induction behind a pluggable terminal
//! layer, `greeks` turns the nodes nearest the root into sensitivities, and
//! `estimators` exposes the binomial, averaged, BBS and BBSR variants.

pub mod estimators;
pub mod greeks;
pub mod layer;
pub mod params;
pub mod pricer;
