//! Batch study support: generated BOM instances and parameter sweeps.

pub mod instances;
pub mod sweeps;

pub use instances::{generate_instance, Topology};
pub use sweeps::{
    carbon_cap_sweep, carbon_policy_comparison, carbon_tax_sweep, demand_sensitivity,
    hybrid_sweep, service_target_sweep, CarbonPolicy, SweepRow,
};
