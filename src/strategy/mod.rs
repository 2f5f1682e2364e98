pub mod implementations;
pub mod moves;
pub mod optimization;
pub mod traits;

pub use implementations::{CarbonCapScore, CarbonTaxScore, HybridCarbonScore, WeightedScore};
pub use optimization::{optimize, optimize_with, KpiView, OptimizationResult, Termination};
pub use traits::Objective;
