//! DDMRP buffer positioning and supplier selection.
//!
//! Scores a bill of materials jointly on cost, carbon emissions, reliability
//! and lead time, and hill-climbs over buffer placement and supplier
//! assignment. Evaluation is pure: every call recomputes everything from the
//! static [`scenario::Scenario`] and a caller-owned [`model::Configuration`].

pub mod engine;
pub mod error;
pub mod io;
pub mod logging;
pub mod model;
pub mod scenario;
pub mod strategy;
pub mod study;

pub use engine::{evaluate, score, Totals};
pub use error::{DdmrpError, Result};
pub use model::{Configuration, NodeId, SupplierId};
pub use scenario::{Scenario, ScenarioParams};
pub use strategy::{optimize, optimize_with, OptimizationResult};
